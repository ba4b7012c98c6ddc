use crate::ParseError;
use ariadne::{Label, Report, ReportKind, Source};

impl ParseError {
    /// Prints a span-labelled report for a failed parse of `input`.
    pub fn pretty_print(&self, input: &str) {
        let report = match self {
            ParseError::UnexpectedToken { found, expected } => {
                Report::build(ReportKind::Error, ("REPL", found.span.to_range()))
                    .with_message(format!("Unexpected token: {}", found.kind))
                    .with_label(
                        Label::new(("REPL", found.span.to_range()))
                            .with_message(format!("Expected {expected}")),
                    )
            }
            ParseError::UnexpectedEof(expected) => {
                let idx = input.len();
                let span = idx.saturating_sub(1)..idx;
                Report::build(ReportKind::Error, ("REPL", span.clone()))
                    .with_message("Unexpected end of input")
                    .with_label(Label::new(("REPL", span)).with_message(format!("Expected {expected}")))
            }
            ParseError::LexerError(lex_err) => {
                Report::build(ReportKind::Error, ("REPL", lex_err.span.to_range()))
                    .with_message("Lexer Error")
                    .with_label(
                        Label::new(("REPL", lex_err.span.to_range()))
                            .with_message(lex_err.error.to_string()),
                    )
            }
        };
        report
            .finish()
            .print(("REPL", Source::from(input)))
            .unwrap();
    }
}
