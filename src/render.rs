//! Markdown rendering with mermaid diagram support.
//!
//! Mermaid blocks are swapped for `<div class="mermaid">` wrappers on the
//! markdown text *before* conversion. pulldown-cmark passes raw HTML
//! blocks through verbatim, so the diagram source inside the div reaches
//! the browser untouched for the mermaid script to pick up.

use crate::templates;
use pulldown_cmark::Parser;

/// Replace ```` ```mermaid ```` fence pairs with mermaid div wrappers.
///
/// Only a line that is exactly the mermaid opener (after trimming) opens a
/// block, and only the next bare fence closer ends it; every other code
/// fence stays an ordinary fence.
pub fn replace_mermaid_fences(markdown: &str) -> String {
    let mut in_mermaid = false;

    let lines: Vec<String> = markdown
        .split('\n')
        .map(|line| {
            let trimmed = line.trim();
            if trimmed == "```mermaid" {
                in_mermaid = true;
                "<div class=\"mermaid\">".to_string()
            } else if in_mermaid && trimmed == "```" {
                in_mermaid = false;
                "</div>".to_string()
            } else {
                line.to_string()
            }
        })
        .collect();

    lines.join("\n")
}

/// Convert markdown to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

/// Render a full note page: substitute diagram blocks, convert to HTML,
/// and wrap the fragment in the fixed page shell.
pub fn render_page(markdown: &str) -> String {
    let with_diagrams = replace_mermaid_fences(markdown);
    templates::note_page(&markdown_to_html(&with_diagrams))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mermaid_fences_become_div_pair() {
        let markdown = "# Title\n```mermaid\ngraph TD;\nA-->B;\n```\nafter";
        let result = replace_mermaid_fences(markdown);
        assert_eq!(
            result,
            "# Title\n<div class=\"mermaid\">\ngraph TD;\nA-->B;\n</div>\nafter"
        );
    }

    #[test]
    fn non_mermaid_fences_are_untouched() {
        let markdown = "```rust\nfn main() {}\n```";
        assert_eq!(replace_mermaid_fences(markdown), markdown);
    }

    #[test]
    fn closer_outside_mermaid_block_is_untouched() {
        // A bare closer with no open mermaid block stays a fence line.
        let markdown = "```\ncode\n```\n```mermaid\nA-->B\n```";
        assert_eq!(
            replace_mermaid_fences(markdown),
            "```\ncode\n```\n<div class=\"mermaid\">\nA-->B\n</div>"
        );
    }

    #[test]
    fn indented_fence_lines_still_match() {
        let markdown = "  ```mermaid\nA-->B\n  ```";
        assert_eq!(
            replace_mermaid_fences(markdown),
            "<div class=\"mermaid\">\nA-->B\n</div>"
        );
    }

    #[test]
    fn markdown_converts_headings_and_lists() {
        let html = markdown_to_html("# Hello\n\n- one\n- two\n");
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn diagram_source_survives_conversion_unescaped() {
        let page = render_page("```mermaid\ngraph TD;\nA-->B;\n```");
        assert!(page.contains("<div class=\"mermaid\">"));
        assert!(page.contains("A-->B;"), "diagram text must not be HTML-escaped");
        assert!(page.contains("</div>"));
    }

    #[test]
    fn page_shell_declares_mermaid_script() {
        let page = render_page("# Note");
        assert!(page.contains("mermaid.min.js"));
        assert!(page.contains("<h1>Note</h1>"));
    }
}
