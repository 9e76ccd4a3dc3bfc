//! Document assembly: wrap escaped content in the fixed HTML/CSS shell.
//!
//! ## Why render client-side?
//!
//! The shell does not contain rendered HTML — it contains the Markdown
//! itself inside a template literal, plus a script that parses it with
//! marked.js when the document is opened. Keeping the source text in the
//! bundle means the generator needs no Markdown parser at all, and the
//! document stays a faithful, inspectable copy of its input. The only
//! runtime dependency is the renderer script, fetched from a CDN when the
//! page loads.
//!
//! The template is deterministic: no timestamps, no generated identifiers.
//! Identical escaped content and title produce byte-identical documents.

/// URL of the client-side Markdown renderer loaded by the shell.
pub const RENDERER_URL: &str = "https://cdn.jsdelivr.net/npm/marked/marked.min.js";

/// `id` of the container element the rendered Markdown is injected into.
pub const CONTENT_ELEMENT_ID: &str = "content";

/// Fixed inline stylesheet: document card on a grey page, bordered images,
/// GFM-ish tables and blockquotes, and print rules that strip the chrome.
const STYLESHEET: &str = r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 40px 20px;
            background-color: #f9f9f9;
        }
        .document {
            background-color: white;
            padding: 40px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        img {
            max-width: 100%;
            height: auto;
            border: 1px solid #ddd;
            border-radius: 4px;
            margin: 20px 0;
            display: block;
        }
        pre {
            background-color: #f4f4f4;
            padding: 15px;
            border-radius: 5px;
            overflow-x: auto;
            border: 1px solid #eee;
        }
        code {
            font-family: "SFMono-Regular", Consolas, "Liberation Mono", Menlo, Courier, monospace;
            background-color: #f4f4f4;
            padding: 2px 5px;
            border-radius: 3px;
            font-size: 0.9em;
        }
        pre code {
            padding: 0;
            background-color: transparent;
        }
        h1, h2, h3 {
            color: #2c3e50;
            margin-top: 1.5em;
        }
        h1 { border-bottom: 2px solid #eee; padding-bottom: 10px; }
        h2 { border-bottom: 1px solid #eee; padding-bottom: 5px; }
        blockquote {
            border-left: 4px solid #1565C0;
            margin: 0;
            padding-left: 15px;
            color: #555;
            background-color: #f0f7ff;
            padding: 10px 15px;
            border-radius: 0 4px 4px 0;
        }
        table {
            border-collapse: collapse;
            width: 100%;
            margin: 20px 0;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 12px;
            text-align: left;
        }
        th {
            background-color: #f4f4f4;
        }
        .print-btn {
            position: fixed;
            top: 20px;
            right: 20px;
            background-color: #1565C0;
            color: white;
            border: none;
            padding: 10px 20px;
            border-radius: 5px;
            cursor: pointer;
            font-weight: bold;
            box-shadow: 0 2px 5px rgba(0,0,0,0.2);
        }
        @media print {
            .print-btn { display: none; }
            body { background-color: white; padding: 0; }
            .document { box-shadow: none; padding: 0; }
        }
    "#;

/// Produce the complete HTML document embedding `escaped` content.
///
/// `escaped` must already have been passed through
/// [`crate::pipeline::escape::escape_template_literal`]; this function
/// splices it verbatim into the template literal.
pub fn render_document(escaped: &str, title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{RENDERER_URL}"></script>
    <style>{STYLESHEET}</style>
</head>
<body>
    <button class="print-btn" onclick="window.print()">Save as PDF / Print</button>
    <div class="document" id="{CONTENT_ELEMENT_ID}"></div>

    <script>
        const markdownContent = `{escaped}`;
        document.getElementById('{CONTENT_ELEMENT_ID}').innerHTML = marked.parse(markdownContent);
    </script>
</body>
</html>
"#
    )
}
