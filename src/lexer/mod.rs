//! Lexer for the platform's operator command language.
//!
//! Converts a command line (or a whole snippet) into a stream of
//! categorized spans for syntax highlighting:
//! - the leading word of each line is the command keyword
//! - `-f` / `--flag-name` style options
//! - single- and double-quoted string literals with backslash escapes
//! - `#` comments to end of line
//! - everything else is plain text
//!
//! The lexer is purely functional and infallible: spans always cover the
//! input exactly, and unrecognized bytes degrade to plain text instead of
//! failing. There is no registration step; whoever needs highlighting
//! constructs a [`CommandLexer`] and calls [`CommandLexer::highlight`].

pub mod html;

use regex::Regex;

/// Highlight category of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Command name at the start of a line
    Keyword,
    /// A `-f` or `--flag-name` option
    Argument,
    /// A quoted string literal
    Str,
    /// A `#` comment running to end of line
    Comment,
    /// Anything else (whitespace, bare words, stray punctuation)
    Text,
}

impl Category {
    /// Stable lowercase name used in span listings and JSON output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Argument => "argument",
            Self::Str => "string",
            Self::Comment => "comment",
            Self::Text => "text",
        }
    }
}

/// A categorized slice of the input.
///
/// Spans are contiguous and non-overlapping; concatenating `text` over a
/// highlight result reproduces the input byte for byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    /// The matched slice of the original input
    pub text: &'a str,
    /// Highlight category
    pub category: Category,
}

/// A single classification rule: an anchored pattern and the category it
/// assigns. Rules are tried in order; the first match wins.
struct Rule {
    pattern: Regex,
    category: Category,
    /// Only applies when the cursor sits at the start of a line
    line_start_only: bool,
}

impl Rule {
    fn new(pattern: &str, category: Category, line_start_only: bool) -> Self {
        Self {
            // Patterns are fixed at compile time
            pattern: Regex::new(pattern).expect("valid regex"),
            category,
            line_start_only,
        }
    }
}

/// Lexer for operator command syntax.
///
/// The rule table is built once in [`CommandLexer::new`] and immutable
/// afterwards; a single lexer value can highlight any number of inputs.
pub struct CommandLexer {
    rules: Vec<Rule>,
}

impl CommandLexer {
    /// Builds the lexer with its rule table.
    #[must_use]
    pub fn new() -> Self {
        let rules = vec![
            Rule::new(r"^#[^\n]*", Category::Comment, false),
            // Closing quote optional: an unterminated literal runs to end of line
            Rule::new(r#"^"(?:\\.|[^"\\\n])*"?"#, Category::Str, false),
            Rule::new(r"^'(?:\\.|[^'\\\n])*'?", Category::Str, false),
            Rule::new(r"^--?[A-Za-z0-9][A-Za-z0-9._-]*", Category::Argument, false),
            Rule::new(r"^[A-Za-z0-9_][A-Za-z0-9._-]*", Category::Keyword, true),
            Rule::new(r"^\r?\n", Category::Text, false),
            Rule::new(r"^[ \t]+", Category::Text, false),
            Rule::new(r#"^[^\s"'#]+"#, Category::Text, false),
        ];
        Self { rules }
    }

    /// Splits `input` into categorized spans.
    ///
    /// The result covers the input with no gaps or overlaps, and adjacent
    /// plain-text spans are coalesced. Never fails: input the rules do not
    /// recognize is consumed one character at a time as [`Category::Text`].
    #[must_use]
    pub fn highlight<'a>(&self, input: &'a str) -> Vec<Span<'a>> {
        let mut ranges: Vec<(usize, usize, Category)> = Vec::new();
        let mut pos = 0;
        let mut at_line_start = true;

        while pos < input.len() {
            let (len, category) = self.classify(&input[pos..], at_line_start);
            let end = pos + len;

            match ranges.last_mut() {
                Some((_, last_end, Category::Text)) if category == Category::Text => {
                    *last_end = end;
                }
                _ => ranges.push((pos, end, category)),
            }

            at_line_start = input[pos..end].ends_with('\n');
            pos = end;
        }

        ranges
            .into_iter()
            .map(|(start, end, category)| Span {
                text: &input[start..end],
                category,
            })
            .collect()
    }

    /// Matches the rule table against the cursor position.
    ///
    /// Returns the matched byte length and category. Falls back to a single
    /// character of [`Category::Text`]; a zero-length result would stall the
    /// scan, so empty matches are skipped.
    fn classify(&self, rest: &str, at_line_start: bool) -> (usize, Category) {
        for rule in &self.rules {
            if rule.line_start_only && !at_line_start {
                continue;
            }
            if let Some(m) = rule.pattern.find(rest) {
                if m.end() > 0 {
                    return (m.end(), rule.category);
                }
            }
        }
        let fallback = rest.chars().next().map_or(1, char::len_utf8);
        (fallback, Category::Text)
    }
}

impl Default for CommandLexer {
    fn default() -> Self {
        Self::new()
    }
}
