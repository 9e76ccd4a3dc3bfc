//! Source reading: load the Markdown document into memory.
//!
//! The whole file is read before any processing begins; there is no
//! streaming. Failures here are fatal — unlike image references, a missing
//! or unreadable source leaves nothing to bundle.

use crate::error::BundleError;
use std::path::Path;
use tracing::debug;

/// Read the source Markdown file to a string.
///
/// I/O failures are mapped to the matching [`BundleError`] variant so the
/// caller gets "file not found" rather than a bare `io::Error`.
pub fn read_source(path: &Path) -> Result<String, BundleError> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            debug!("Read source: {} ({} bytes)", path.display(), text.len());
            Ok(text)
        }
        Err(e) => Err(match e.kind() {
            std::io::ErrorKind::NotFound => BundleError::SourceNotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => BundleError::SourcePermissionDenied {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::InvalidData => BundleError::SourceNotUtf8 {
                path: path.to_path_buf(),
            },
            _ => BundleError::SourceReadFailed {
                path: path.to_path_buf(),
                source: e,
            },
        }),
    }
}
