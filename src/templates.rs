//! HTML page shells for the note viewer.
//!
//! Two fixed templates: the note page (mermaid script plus a
//! viewport-constrained body) and the landing page listing every note.

use std::borrow::Cow;

// ============================================================================
// Styles
// ============================================================================

const NOTE_STYLE: &str = r#"
body {
    max-width: 800px;
    margin: 0 auto;
    padding: 20px;
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
    line-height: 1.6;
}
img {
    max-width: 100%;
    height: auto;
}
"#;

const LANDING_STYLE: &str = r#"
body {
    max-width: 800px;
    margin: 0 auto;
    padding: 20px;
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
    line-height: 1.6;
}
h1 {
    border-bottom: 2px solid #eee;
    padding-bottom: 10px;
}
ul {
    list-style-type: none;
    padding: 0;
}
li {
    margin: 10px 0;
    padding: 10px;
    background: #f5f5f5;
    border-radius: 4px;
}
a {
    color: #0366d6;
    text-decoration: none;
}
a:hover {
    text-decoration: underline;
}
"#;

// ============================================================================
// Escaping
// ============================================================================

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Percent-encode a note reference for use in an href, segment by segment
/// so the `/` separators survive.
fn encode_ref(reference: &str) -> String {
    reference
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<Cow<str>>>()
        .join("/")
}

// ============================================================================
// Page Shells
// ============================================================================

/// Wrap a rendered note fragment in the fixed page template.
pub fn note_page(content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <script src="https://cdn.jsdelivr.net/npm/mermaid/dist/mermaid.min.js"></script>
    <script>
        mermaid.initialize({{ startOnLoad: true }});
    </script>
    <style>{style}</style>
</head>
<body>
{content}
</body>
</html>"#,
        style = NOTE_STYLE,
        content = content,
    )
}

/// Build the landing page linking every note reference to its note route.
pub fn landing_page(references: &[String]) -> String {
    let mut items = String::new();
    for reference in references {
        items.push_str(&format!(
            "        <li><a href=\"/notes/{}\">{}</a></li>\n",
            encode_ref(reference),
            html_escape(reference),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Notes</title>
    <style>{style}</style>
</head>
<body>
    <h1>Notes</h1>
    <ul>
{items}    </ul>
</body>
</html>"#,
        style = LANDING_STYLE,
        items = items,
    )
}
