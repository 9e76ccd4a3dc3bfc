//! Error types for the mdbundle library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`BundleError`] — **Fatal**: the bundle cannot be produced at all
//!   (source file missing or unreadable, output file unwritable, invalid
//!   configuration). Returned as `Err(BundleError)` from the top-level
//!   `bundle*` functions.
//!
//! * [`ImageError`] — **Non-fatal**: a single image reference failed to
//!   resolve (file missing, permission denied, read error). The reference
//!   is left unchanged in the output and the run continues; the error is
//!   stored inside [`crate::pipeline::inline::Substitution`] so callers can
//!   inspect which references fell back.
//!
//! The separation makes the fail-open policy explicit: an image failure is
//! data about the run, not a reason to abort it.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the mdbundle library.
///
/// Per-image failures use [`ImageError`] and are stored in
/// [`crate::pipeline::inline::Substitution`] rather than propagated here.
#[derive(Debug, Error)]
pub enum BundleError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Source Markdown file was not found at the given path.
    #[error("Source file not found: '{path}'\nCheck the path exists and is readable.")]
    SourceNotFound { path: PathBuf },

    /// Process does not have read permission on the source file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    SourcePermissionDenied { path: PathBuf },

    /// The source file exists but is not valid UTF-8 text.
    #[error("Source file '{path}' is not valid UTF-8 text")]
    SourceNotUtf8 { path: PathBuf },

    /// Reading the source file failed for another reason.
    #[error("Failed to read source file '{path}': {source}")]
    SourceReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output HTML file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal error for a single image reference.
///
/// Stored alongside the original reference text when inlining falls back.
/// The overall run always continues; the offending reference is emitted
/// byte-for-byte unchanged.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum ImageError {
    /// Referenced image file does not exist.
    #[error("image file not found: '{path}'")]
    NotFound { path: PathBuf },

    /// Process does not have read permission on the image file.
    #[error("permission denied reading image '{path}'")]
    PermissionDenied { path: PathBuf },

    /// Reading the image file failed for another reason.
    #[error("failed to read image '{path}': {detail}")]
    ReadFailed { path: PathBuf, detail: String },
}

impl ImageError {
    /// The path the resolver attempted, regardless of the failure kind.
    pub fn path(&self) -> &PathBuf {
        match self {
            ImageError::NotFound { path }
            | ImageError::PermissionDenied { path }
            | ImageError::ReadFailed { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_not_found_display() {
        let e = BundleError::SourceNotFound {
            path: PathBuf::from("notes.md"),
        };
        let msg = e.to_string();
        assert!(msg.contains("notes.md"), "got: {msg}");
    }

    #[test]
    fn output_write_failed_display() {
        let e = BundleError::OutputWriteFailed {
            path: PathBuf::from("out.html"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        let msg = e.to_string();
        assert!(msg.contains("out.html"));
        assert!(msg.contains("disk full"));
    }

    #[test]
    fn image_not_found_display_mentions_path() {
        let e = ImageError::NotFound {
            path: PathBuf::from("./absent.png"),
        };
        assert!(e.to_string().contains("absent.png"));
    }

    #[test]
    fn image_read_failed_display() {
        let e = ImageError::ReadFailed {
            path: PathBuf::from("logo.png"),
            detail: "interrupted".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("logo.png"));
        assert!(msg.contains("interrupted"));
    }

    #[test]
    fn image_error_path_accessor() {
        let e = ImageError::PermissionDenied {
            path: PathBuf::from("secret.png"),
        };
        assert_eq!(e.path(), &PathBuf::from("secret.png"));
    }
}
