//! # mdbundle
//!
//! Bundle a Markdown document into a single self-contained HTML file.
//!
//! ## Why this crate?
//!
//! A Markdown file with local images cannot be shared as one artifact —
//! mail it, archive it, or move it, and the figures break. This crate
//! inlines every resolvable local image as a base64 data URI and wraps the
//! result in an HTML shell that renders the Markdown client-side (via
//! marked.js) with a print-to-PDF button. The output is one file with no
//! local dependencies.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown
//!  │
//!  ├─ 1. Input    read the source file
//!  ├─ 2. Inline   ![alt](path) → ![alt](data:image/…;base64,…)
//!  ├─ 3. Escape   neutralise ` and ${ for the embedded literal
//!  ├─ 4. Render   splice into the fixed HTML/CSS shell
//!  └─ 5. Output   atomic write of the assembled document
//! ```
//!
//! Image inlining is fail-open per reference: a missing or unreadable
//! image is logged and its reference passes through unchanged; the bundle
//! is still produced.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mdbundle::{bundle_to_file, BundleConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BundleConfig::builder()
//!         .input("notes.md")
//!         .output("notes.html")
//!         .title("Field Notes")
//!         .build()?;
//!     let output = bundle_to_file(&config)?;
//!     eprintln!(
//!         "{}/{} images inlined",
//!         output.stats.inlined_images, output.stats.image_refs
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `mdbundle` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! mdbundle = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{BundleConfig, BundleConfigBuilder, DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_TITLE};
pub use convert::{bundle, bundle_file, bundle_to_file, bundle_with_resolver, BundleOutput, BundleStats};
pub use error::{BundleError, ImageError};
pub use pipeline::inline::{FsResolver, ImageResolver, Substitution};
