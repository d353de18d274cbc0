//! HTML rendering for highlighted command spans.
//!
//! Emits Pygments-compatible `<span>` markup so the output drops straight
//! into the documentation renderer's existing highlight stylesheet.

use super::{Category, Span};

/// Pygments short class name for a category.
///
/// Plain text is rendered without a wrapping span.
#[must_use]
pub const fn css_class(category: Category) -> Option<&'static str> {
    match category {
        Category::Keyword => Some("k"),
        Category::Argument => Some("na"),
        Category::Str => Some("s"),
        Category::Comment => Some("c1"),
        Category::Text => None,
    }
}

/// Renders spans as a single line of HTML.
///
/// Each categorized span becomes `<span class="…">text</span>`; plain text
/// is emitted bare. All span text is HTML-escaped.
#[must_use]
pub fn render_html(spans: &[Span<'_>]) -> String {
    let mut out = String::new();
    for span in spans {
        match css_class(span.category) {
            Some(class) => {
                out.push_str("<span class=\"");
                out.push_str(class);
                out.push_str("\">");
                out.push_str(&escape_html(span.text));
                out.push_str("</span>");
            }
            None => out.push_str(&escape_html(span.text)),
        }
    }
    out
}

/// Escapes HTML metacharacters in span text.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::CommandLexer;

    #[test]
    fn test_render_basic_line() {
        let lexer = CommandLexer::new();
        let spans = lexer.highlight("run --fast");
        assert_eq!(
            render_html(&spans),
            "<span class=\"k\">run</span> <span class=\"na\">--fast</span>"
        );
    }

    #[test]
    fn test_string_span_is_escaped() {
        let lexer = CommandLexer::new();
        let spans = lexer.highlight("say \"<b>\"");
        let html = render_html(&spans);
        assert!(html.contains("<span class=\"s\">&quot;&lt;b&gt;&quot;</span>"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_comment_class() {
        let lexer = CommandLexer::new();
        let spans = lexer.highlight("# note");
        assert_eq!(render_html(&spans), "<span class=\"c1\"># note</span>");
    }

    #[test]
    fn test_plain_text_is_unwrapped() {
        let lexer = CommandLexer::new();
        let spans = lexer.highlight("  indented & bare");
        assert_eq!(render_html(&spans), "  indented &amp; bare");
    }

    #[test]
    fn test_escape_html_covers_metacharacters() {
        assert_eq!(escape_html("a & b < c > \"d\""), "a &amp; b &lt; c &gt; &quot;d&quot;");
    }
}
