//! Configuration for a Markdown-to-HTML bundling run.
//!
//! All behaviour is controlled through [`BundleConfig`], built via its
//! [`BundleConfigBuilder`]. The defaults reproduce the zero-argument
//! behaviour: read [`DEFAULT_INPUT`] from the working directory, write
//! [`DEFAULT_OUTPUT`] next to it, overwriting unconditionally.

use crate::error::BundleError;
use std::path::PathBuf;

/// Source filename used when none is configured.
pub const DEFAULT_INPUT: &str = "document.md";

/// Output filename used when none is configured.
pub const DEFAULT_OUTPUT: &str = "document.html";

/// Document title used when none is configured.
pub const DEFAULT_TITLE: &str = "Markdown Document";

/// Configuration for a bundling run.
///
/// Built via [`BundleConfig::builder()`] or using
/// [`BundleConfig::default()`].
///
/// # Example
/// ```rust
/// use mdbundle::BundleConfig;
///
/// let config = BundleConfig::builder()
///     .input("notes.md")
///     .output("notes.html")
///     .title("Release Notes")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct BundleConfig {
    /// Path of the source Markdown file. Default: [`DEFAULT_INPUT`].
    pub input: PathBuf,

    /// Path of the HTML file to write. Default: [`DEFAULT_OUTPUT`].
    /// An existing file at this path is overwritten without confirmation.
    pub output: PathBuf,

    /// Title placed in the document `<head>`. Default: [`DEFAULT_TITLE`].
    pub title: String,

    /// Base directory against which relative image paths are resolved.
    ///
    /// `None` (the default) resolves against the process working directory,
    /// which is what a command-line invocation expects. Library callers and
    /// tests set this to pin resolution to a known directory regardless of
    /// where the process runs.
    pub base_dir: Option<PathBuf>,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            title: DEFAULT_TITLE.to_string(),
            base_dir: None,
        }
    }
}

impl BundleConfig {
    /// Create a new builder for `BundleConfig`.
    pub fn builder() -> BundleConfigBuilder {
        BundleConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`BundleConfig`].
#[derive(Debug)]
pub struct BundleConfigBuilder {
    config: BundleConfig,
}

impl BundleConfigBuilder {
    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.input = path.into();
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = path.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.base_dir = Some(dir.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<BundleConfig, BundleError> {
        let c = &self.config;
        if c.input == c.output {
            return Err(BundleError::InvalidConfig(format!(
                "input and output are the same file: '{}'",
                c.input.display()
            )));
        }
        if c.title.trim().is_empty() {
            return Err(BundleError::InvalidConfig(
                "title must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}
