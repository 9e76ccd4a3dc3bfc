//! Image inlining: `![alt](path)` → `![alt](data:image/…;base64,…)`.
//!
//! ## Why data URIs?
//!
//! The whole point of the bundle is that the output HTML has no file
//! dependencies: it can be mailed, archived, or dropped on a share and
//! still show its figures. Embedding each image's bytes directly in the
//! Markdown text as a base64 data URI removes the last link to the source
//! tree before the document ever reaches a browser.
//!
//! ## Fail-open per reference
//!
//! A reference whose file cannot be read is emitted byte-for-byte
//! unchanged and the failure is logged at WARN level with the attempted
//! path. One broken figure never costs the rest of the document: every
//! substitution is independent, and the run always completes.
//!
//! File access goes through the [`ImageResolver`] trait so the
//! substitution logic can be tested against an in-memory resolver without
//! touching the filesystem.

use crate::error::ImageError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The Markdown image-reference pattern.
///
/// Non-greedy on both the alt-text and the path group, matched
/// left-to-right over the document exactly once; substituted output is
/// never re-scanned. A path containing a literal `)` is truncated at the
/// first `)` — an inherited ambiguity of the minimal pattern, not guarded
/// against.
static RE_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap());

/// Resolves an image path to its raw bytes.
///
/// The production implementation is [`FsResolver`]; tests inject a fake
/// to exercise the substitution logic without filesystem access.
pub trait ImageResolver {
    fn resolve(&self, path: &Path) -> Result<Vec<u8>, ImageError>;
}

/// Filesystem-backed resolver.
///
/// Absolute paths are used as-is. Relative paths are resolved against the
/// configured base directory, or the process working directory when none
/// is set.
#[derive(Debug, Default)]
pub struct FsResolver {
    base_dir: Option<PathBuf>,
}

impl FsResolver {
    pub fn new() -> Self {
        Self { base_dir: None }
    }

    pub fn with_base_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(dir.into()),
        }
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match &self.base_dir {
            Some(base) => base.join(path),
            // Fall back to the relative path itself if the working
            // directory is unavailable; the OS resolves it the same way.
            None => std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf()),
        }
    }
}

impl ImageResolver for FsResolver {
    fn resolve(&self, path: &Path) -> Result<Vec<u8>, ImageError> {
        let resolved = self.resolve_path(path);
        match std::fs::read(&resolved) {
            Ok(bytes) => Ok(bytes),
            Err(e) => Err(match e.kind() {
                std::io::ErrorKind::NotFound => ImageError::NotFound { path: resolved },
                std::io::ErrorKind::PermissionDenied => {
                    ImageError::PermissionDenied { path: resolved }
                }
                _ => ImageError::ReadFailed {
                    path: resolved,
                    detail: e.to_string(),
                },
            }),
        }
    }
}

/// Outcome of one image-reference match, in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Substitution {
    /// Reference was replaced with a data URI embedding `bytes` bytes.
    Inlined { path: PathBuf, bytes: usize },
    /// Reference was left unchanged because resolution failed.
    Unchanged { path: PathBuf, error: ImageError },
}

impl Substitution {
    pub fn is_inlined(&self) -> bool {
        matches!(self, Substitution::Inlined { .. })
    }
}

/// Result of the inlining pass: the rewritten text plus one
/// [`Substitution`] per image-reference match.
#[derive(Debug, Clone)]
pub struct InlinedDocument {
    pub text: String,
    pub substitutions: Vec<Substitution>,
}

/// Replace every resolvable image reference with a base64 data URI.
///
/// Each match is handled independently: on success the reference becomes
/// `![alt](data:image/<subtype>;base64,<encoded>)`, on failure it is
/// emitted unchanged and the error is recorded and logged. Non-matching
/// text is never altered, so the output differs from the input only inside
/// successfully replaced references.
pub fn inline_images(text: &str, resolver: &dyn ImageResolver) -> InlinedDocument {
    let mut substitutions = Vec::new();

    let rewritten = RE_IMAGE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let alt = &caps[1];
            let raw_path = &caps[2];
            let path = Path::new(raw_path);

            match resolver.resolve(path) {
                Ok(bytes) => {
                    let subtype = media_subtype(path);
                    let encoded = STANDARD.encode(&bytes);
                    debug!(
                        "Inlined {} ({} bytes → {} base64 chars)",
                        raw_path,
                        bytes.len(),
                        encoded.len()
                    );
                    substitutions.push(Substitution::Inlined {
                        path: path.to_path_buf(),
                        bytes: bytes.len(),
                    });
                    format!("![{alt}](data:image/{subtype};base64,{encoded})")
                }
                Err(error) => {
                    warn!("Could not inline image {}: {}", error.path().display(), error);
                    substitutions.push(Substitution::Unchanged {
                        path: path.to_path_buf(),
                        error,
                    });
                    caps[0].to_string()
                }
            }
        })
        .into_owned();

    InlinedDocument {
        text: rewritten,
        substitutions,
    }
}

/// Derive the data-URI media subtype from the file extension.
///
/// Lower-cased, with `jpg` normalised to `jpeg` (the registered subtype).
/// A path with no extension yields an empty subtype.
fn media_subtype(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext == "jpg" {
        "jpeg".to_string()
    } else {
        ext
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory resolver: known paths resolve to fixed bytes, everything
    /// else is NotFound.
    struct FakeResolver {
        files: HashMap<PathBuf, Vec<u8>>,
    }

    impl FakeResolver {
        fn new(entries: &[(&str, &[u8])]) -> Self {
            Self {
                files: entries
                    .iter()
                    .map(|(p, b)| (PathBuf::from(p), b.to_vec()))
                    .collect(),
            }
        }
    }

    impl ImageResolver for FakeResolver {
        fn resolve(&self, path: &Path) -> Result<Vec<u8>, ImageError> {
            self.files.get(path).cloned().ok_or(ImageError::NotFound {
                path: path.to_path_buf(),
            })
        }
    }

    #[test]
    fn resolvable_reference_becomes_data_uri() {
        let bytes: &[u8] = b"\x89PNG\r\n\x1a\nfakepixels";
        let resolver = FakeResolver::new(&[("./logo.png", bytes)]);

        let result = inline_images("intro ![logo](./logo.png) outro", &resolver);

        let expected = format!(
            "intro ![logo](data:image/png;base64,{}) outro",
            STANDARD.encode(bytes)
        );
        assert_eq!(result.text, expected);
        assert_eq!(result.substitutions.len(), 1);
        assert!(result.substitutions[0].is_inlined());
    }

    #[test]
    fn data_uri_decodes_back_to_original_bytes() {
        let bytes: &[u8] = &[0, 1, 2, 254, 255, 127];
        let resolver = FakeResolver::new(&[("img.gif", bytes)]);

        let result = inline_images("![x](img.gif)", &resolver);

        let b64 = result
            .text
            .split("base64,")
            .nth(1)
            .and_then(|rest| rest.strip_suffix(')'))
            .expect("output must contain a data URI");
        assert_eq!(STANDARD.decode(b64).expect("valid base64"), bytes);
    }

    #[test]
    fn missing_file_left_byte_for_byte_unchanged() {
        let resolver = FakeResolver::new(&[]);

        let input = "see ![missing](./absent.png) here";
        let result = inline_images(input, &resolver);

        assert_eq!(result.text, input);
        assert_eq!(result.substitutions.len(), 1);
        match &result.substitutions[0] {
            Substitution::Unchanged { path, error } => {
                assert_eq!(path, &PathBuf::from("./absent.png"));
                assert!(error.to_string().contains("absent.png"));
            }
            other => panic!("expected Unchanged, got {other:?}"),
        }
    }

    #[test]
    fn one_failure_does_not_affect_other_matches() {
        let resolver = FakeResolver::new(&[("a.png", b"aaa")]);

        let result = inline_images("![a](a.png) and ![b](b.png)", &resolver);

        assert!(result.text.contains("data:image/png;base64,"));
        assert!(result.text.contains("![b](b.png)"));
        assert_eq!(result.substitutions.len(), 2);
        assert!(result.substitutions[0].is_inlined());
        assert!(!result.substitutions[1].is_inlined());
    }

    #[test]
    fn jpg_extension_normalised_to_jpeg() {
        let resolver = FakeResolver::new(&[("photo.jpg", b"jpegbytes")]);
        let result = inline_images("![p](photo.jpg)", &resolver);
        assert!(result.text.contains("data:image/jpeg;base64,"));
    }

    #[test]
    fn extension_is_lowercased() {
        let resolver = FakeResolver::new(&[("SHOT.PNG", b"pngbytes")]);
        let result = inline_images("![s](SHOT.PNG)", &resolver);
        assert!(result.text.contains("data:image/png;base64,"));
    }

    #[test]
    fn extensionless_path_gets_empty_subtype() {
        let resolver = FakeResolver::new(&[("figure", b"bytes")]);
        let result = inline_images("![f](figure)", &resolver);
        assert!(result.text.contains("data:image/;base64,"));
    }

    #[test]
    fn match_count_is_preserved() {
        let resolver = FakeResolver::new(&[("ok.png", b"x")]);
        let input = "![1](ok.png)\n![2](gone.png)\ntext\n![3](ok.png)";

        let result = inline_images(input, &resolver);

        assert_eq!(result.substitutions.len(), 3);
        // Replaced or preserved, every match still reads as an image reference.
        assert_eq!(result.text.matches("![").count(), 3);
    }

    #[test]
    fn plain_links_do_not_match() {
        let resolver = FakeResolver::new(&[("ok.png", b"x")]);
        let result = inline_images("[a link](page.md) with no bang", &resolver);
        assert_eq!(result.text, "[a link](page.md) with no bang");
        assert!(result.substitutions.is_empty());
    }

    #[test]
    fn alt_text_is_preserved_verbatim() {
        let resolver = FakeResolver::new(&[("d.png", b"z")]);
        let result = inline_images("![Fig. 1: overview](d.png)", &resolver);
        assert!(result.text.starts_with("![Fig. 1: overview](data:image/png;base64,"));
    }

    #[test]
    fn media_subtype_cases() {
        assert_eq!(media_subtype(Path::new("a.png")), "png");
        assert_eq!(media_subtype(Path::new("a.JPG")), "jpeg");
        assert_eq!(media_subtype(Path::new("a.jpeg")), "jpeg");
        assert_eq!(media_subtype(Path::new("a.SVG")), "svg");
        assert_eq!(media_subtype(Path::new("noext")), "");
    }

    #[test]
    fn fs_resolver_reads_real_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("pic.png"), b"realbytes").expect("write");

        let resolver = FsResolver::with_base_dir(dir.path());
        let bytes = resolver.resolve(Path::new("pic.png")).expect("resolve");
        assert_eq!(bytes, b"realbytes");
    }

    #[test]
    fn fs_resolver_missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let resolver = FsResolver::with_base_dir(dir.path());

        let err = resolver
            .resolve(Path::new("nope.png"))
            .expect_err("must fail");
        assert!(matches!(err, ImageError::NotFound { .. }));
    }

    #[test]
    fn fs_resolver_absolute_path_bypasses_base_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let abs = dir.path().join("abs.png");
        std::fs::write(&abs, b"absolute").expect("write");

        // Base dir points elsewhere; the absolute path must still win.
        let resolver = FsResolver::with_base_dir("/nonexistent-base");
        let bytes = resolver.resolve(&abs).expect("resolve");
        assert_eq!(bytes, b"absolute");
    }
}
