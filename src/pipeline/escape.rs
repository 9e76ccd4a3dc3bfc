//! Escaping for the embedded JavaScript template literal.
//!
//! The bundled Markdown lives inside a backtick-delimited literal in the
//! output document, so two sequences must be neutralised before embedding:
//! the backtick itself (would close the literal) and `${` (would start an
//! interpolation). The two substitutions are independent and cannot
//! interact — escaping a backtick never produces `${` and vice versa — so
//! running them in sequence never double-escapes.
//!
//! Literal backslashes in the source are not rewritten; a source
//! containing e.g. a two-character `\n` sequence is interpreted by the
//! literal at view time.

/// Escape `text` for embedding in a backtick template literal.
///
/// Only the delimiter and the interpolation trigger are altered; every
/// other character passes through untouched.
pub fn escape_template_literal(text: &str) -> String {
    text.replace('`', "\\`").replace("${", "\\${")
}
