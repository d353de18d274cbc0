//! Highlight command handler
//!
//! Tokenizes an operator command line and prints the spans.

use std::io::Read;

use crate::cli::args::{HighlightArgs, HighlightFormat};
use crate::error::FieldManualError;
use crate::lexer::CommandLexer;
use crate::lexer::html::render_html;

/// Tokenize a command line and print the result.
///
/// Reads the line from the positional argument, or from stdin when the
/// argument is omitted.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or JSON serialization fails.
pub fn run(args: &HighlightArgs) -> Result<(), FieldManualError> {
    let input = match &args.line {
        Some(line) => line.clone(),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let lexer = CommandLexer::new();
    let spans = lexer.highlight(&input);

    match args.format {
        HighlightFormat::Spans => {
            for span in &spans {
                println!("{}\t{}", span.category.name(), span.text.escape_debug());
            }
        }
        HighlightFormat::Html => {
            println!("{}", render_html(&spans));
        }
        HighlightFormat::Json => {
            let items: Vec<serde_json::Value> = spans
                .iter()
                .map(|span| {
                    serde_json::json!({
                        "category": span.category.name(),
                        "text": span.text,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string(&items)?);
        }
    }
    Ok(())
}
