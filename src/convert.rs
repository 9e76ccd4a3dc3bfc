//! Top-level bundling entry points.
//!
//! The pipeline is a pure three-stage transform (inline → escape → render)
//! bracketed by file I/O. [`bundle`] runs the transform on in-memory text;
//! [`bundle_file`] reads the source first; [`bundle_to_file`] additionally
//! writes the result. Only the I/O ends can fail — the transform itself
//! always completes, carrying per-image fallbacks in its result.

use crate::config::BundleConfig;
use crate::error::BundleError;
use crate::pipeline::escape::escape_template_literal;
use crate::pipeline::inline::{inline_images, FsResolver, ImageResolver, Substitution};
use crate::pipeline::input;
use crate::pipeline::render::render_document;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Statistics for one bundling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleStats {
    /// Image-reference matches found in the source.
    pub image_refs: usize,
    /// References replaced with data URIs.
    pub inlined_images: usize,
    /// References left unchanged because resolution failed.
    pub failed_images: usize,
    /// Size of the source Markdown in bytes.
    pub source_bytes: usize,
    /// Size of the assembled HTML document in bytes.
    pub html_bytes: usize,
    /// Wall-clock duration of the transform in milliseconds.
    pub duration_ms: u64,
}

/// Result of a bundling run: the assembled document plus per-reference
/// outcomes and run statistics.
#[derive(Debug, Clone)]
pub struct BundleOutput {
    /// The complete HTML document.
    pub html: String,
    /// One outcome per image-reference match, in document order.
    pub substitutions: Vec<Substitution>,
    /// Run statistics.
    pub stats: BundleStats,
}

/// Bundle in-memory Markdown text into an HTML document string.
///
/// Relative image paths resolve against `config.base_dir`, or the process
/// working directory when unset. This never fails: unresolvable images
/// fall back to their original reference text (inspect
/// `output.substitutions` for details).
pub fn bundle(markdown: &str, config: &BundleConfig) -> BundleOutput {
    let resolver = match &config.base_dir {
        Some(dir) => FsResolver::with_base_dir(dir.clone()),
        None => FsResolver::new(),
    };
    bundle_with_resolver(markdown, &resolver, config)
}

/// Like [`bundle`], with an injected image resolver.
///
/// The seam exists so the substitution behaviour can be exercised against
/// an in-memory resolver; production callers use [`bundle`].
pub fn bundle_with_resolver(
    markdown: &str,
    resolver: &dyn ImageResolver,
    config: &BundleConfig,
) -> BundleOutput {
    let start = Instant::now();

    // ── Stage 1: inline image references ─────────────────────────────────
    let inlined = inline_images(markdown, resolver);
    let inlined_count = inlined.substitutions.iter().filter(|s| s.is_inlined()).count();
    let failed_count = inlined.substitutions.len() - inlined_count;

    // ── Stage 2: escape for the template literal ─────────────────────────
    let escaped = escape_template_literal(&inlined.text);

    // ── Stage 3: assemble the document ───────────────────────────────────
    let html = render_document(&escaped, &config.title);

    let stats = BundleStats {
        image_refs: inlined.substitutions.len(),
        inlined_images: inlined_count,
        failed_images: failed_count,
        source_bytes: markdown.len(),
        html_bytes: html.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "Bundled {} bytes of Markdown → {} bytes of HTML ({}/{} images inlined)",
        stats.source_bytes, stats.html_bytes, stats.inlined_images, stats.image_refs
    );

    BundleOutput {
        html,
        substitutions: inlined.substitutions,
        stats,
    }
}

/// Read the configured source file and bundle it.
///
/// # Errors
/// Fatal only: source missing, unreadable, or not UTF-8. Per-image
/// failures never surface here.
pub fn bundle_file(config: &BundleConfig) -> Result<BundleOutput, BundleError> {
    let markdown = input::read_source(&config.input)?;
    Ok(bundle(&markdown, config))
}

/// Read the source, bundle it, and write the configured output file.
///
/// The write is atomic (sibling temp file + rename): an aborted run leaves
/// no partial output, and an existing file at the output path is replaced
/// in one step.
pub fn bundle_to_file(config: &BundleConfig) -> Result<BundleOutput, BundleError> {
    let output = bundle_file(config)?;
    write_output(&config.output, &output.html)?;
    info!("Wrote {}", config.output.display());
    Ok(output)
}

/// Atomic write: temp file in the target directory, then rename.
fn write_output(path: &Path, html: &str) -> Result<(), BundleError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| BundleError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let tmp_path = path.with_extension("html.tmp");
    std::fs::write(&tmp_path, html).map_err(|e| BundleError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!("Staged output at {}", tmp_path.display());

    std::fs::rename(&tmp_path, path).map_err(|e| BundleError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}
