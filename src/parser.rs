use std::iter::Peekable;
use std::vec::IntoIter;
use thiserror::Error;

use crate::Span;
use crate::lexer::{LexerError, Token, TokenKind};

/// A node of the generic parse tree the reader consumes.
///
/// The parser deliberately produces an untyped tree of tagged nodes rather
/// than a typed AST: compound nodes keep their bracket tokens as `"char"`
/// leaves and the whole input is collected under a root node tagged `">"`.
/// Interpretation of the tags (including skipping punctuation and `"regex"`
/// leaves) belongs entirely to the reader.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNode {
    pub tag: &'static str,
    pub contents: String,
    pub children: Vec<ParseNode>,
    pub span: Span,
}

impl ParseNode {
    pub fn leaf(tag: &'static str, contents: impl Into<String>, span: Span) -> ParseNode {
        ParseNode {
            tag,
            contents: contents.into(),
            children: Vec::new(),
            span,
        }
    }

    pub fn branch(tag: &'static str, children: Vec<ParseNode>, span: Span) -> ParseNode {
        ParseNode {
            tag,
            contents: String::new(),
            children,
            span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Parse Error [at {}..{}]: unexpected token '{}', expected {}", .found.span.start, .found.span.end, .found.kind, .expected)]
    UnexpectedToken { found: Token, expected: String },
    #[error("Parse Error: unexpected end of input, expected {0}")]
    UnexpectedEof(String),
    #[error("Lexer Error during parse: {0}")]
    LexerError(#[from] LexerError),
}

// Result type alias for convenience
type ParseResult<T> = Result<T, ParseError>;

pub struct Parser {
    // We iterate over owned Tokens, consuming them.
    tokens: Peekable<IntoIter<Token>>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens: tokens.into_iter().peekable(),
        }
    }

    // Consumes the next token if available.
    fn next_token(&mut self) -> Option<Token> {
        self.tokens.next()
    }

    /// Parses a single expression from the token stream.
    pub fn parse_expr(&mut self) -> ParseResult<ParseNode> {
        let token = self.next_token();
        self.parse_expr_with_token(token)
    }

    fn parse_expr_with_token(&mut self, token: Option<Token>) -> ParseResult<ParseNode> {
        match token {
            Some(Token {
                kind: TokenKind::LParen,
                span,
            }) => self.parse_compound("sexpr", TokenKind::RParen, "(", ")", span),
            Some(Token {
                kind: TokenKind::LBrace,
                span,
            }) => self.parse_compound("qexpr", TokenKind::RBrace, "{", "}", span),
            Some(Token {
                kind: TokenKind::Number(text),
                span,
            }) => Ok(ParseNode::leaf("number", text, span)),
            Some(Token {
                kind: TokenKind::Symbol(text),
                span,
            }) => Ok(ParseNode::leaf("symbol", text, span)),
            Some(found) => Err(ParseError::UnexpectedToken {
                found,
                expected: "an expression".to_string(),
            }),
            None => Err(ParseError::UnexpectedEof("an expression".to_string())),
        }
    }

    /// Parses the inside of `(...)` or `{...}` after the opening bracket has
    /// been consumed. The bracket tokens are kept as `"char"` leaves so the
    /// produced tree mirrors the full source text.
    fn parse_compound(
        &mut self,
        tag: &'static str,
        close: TokenKind,
        open_text: &str,
        close_text: &str,
        open_span: Span,
    ) -> ParseResult<ParseNode> {
        let mut children = vec![ParseNode::leaf("char", open_text, open_span)];
        loop {
            if let Some(token) = self.tokens.next_if(|t| t.kind == close) {
                children.push(ParseNode::leaf("char", close_text, token.span));
                return Ok(ParseNode::branch(tag, children, open_span.merge(token.span)));
            }
            if self.tokens.peek().is_none() {
                return Err(ParseError::UnexpectedEof(format!("'{}'", close_text)));
            }
            let child = self.parse_expr()?;
            children.push(child);
        }
    }

    /// Parses the entire token sequence as a sequence of top-level
    /// expressions collected under the grammar root, so `+ 1 2` works at the
    /// prompt without outer parentheses.
    pub fn parse(mut self) -> ParseResult<ParseNode> {
        let mut children = Vec::new();
        while self.tokens.peek().is_some() {
            children.push(self.parse_expr()?);
        }
        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => first.span.merge(last.span),
            _ => Span::default(),
        };
        Ok(ParseNode::branch(">", children, span))
    }
}

// Helper function to lex and parse a string directly (useful for tests and REPL)
pub fn parse_str(input: &str) -> ParseResult<ParseNode> {
    let tokens = crate::lexer::tokenize(input)?;
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Span;
    use crate::lexer::LexerErrorKind;

    // Helper for asserting successful parsing
    fn assert_parse(input: &str, expected: ParseNode) {
        match parse_str(input) {
            Ok(result) => assert_eq!(result, expected, "Input: '{}'", input),
            Err(e) => panic!("Parsing failed for input '{}': {}", input, e),
        }
    }

    // Helper for asserting parse errors
    fn assert_parse_error(input: &str, expected_error_variant: ParseError) {
        match parse_str(input) {
            Ok(result) => panic!(
                "Expected parsing to fail for input '{}', but got: {:?}",
                input, result
            ),
            Err(e) => {
                // Compare enum variants, ignoring specific content for simplicity
                assert_eq!(
                    std::mem::discriminant(&e),
                    std::mem::discriminant(&expected_error_variant),
                    "Input: '{}', Expected error variant like {:?}, got: {:?}",
                    input,
                    expected_error_variant,
                    e
                );
            }
        }
    }

    fn leaf(tag: &'static str, contents: &str, start: usize, end: usize) -> ParseNode {
        ParseNode::leaf(tag, contents, Span::new(start, end))
    }

    fn branch(tag: &'static str, children: Vec<ParseNode>, start: usize, end: usize) -> ParseNode {
        ParseNode::branch(tag, children, Span::new(start, end))
    }

    #[test]
    fn test_parse_atoms() {
        assert_parse("123", branch(">", vec![leaf("number", "123", 0, 3)], 0, 3));
        assert_parse("-4.5", branch(">", vec![leaf("number", "-4.5", 0, 4)], 0, 4));
        assert_parse(
            "symbol",
            branch(">", vec![leaf("symbol", "symbol", 0, 6)], 0, 6),
        );
        assert_parse("+", branch(">", vec![leaf("symbol", "+", 0, 1)], 0, 1));
    }

    #[test]
    fn test_parse_empty_input() {
        assert_parse("", branch(">", vec![], 0, 0));
        assert_parse("   ", branch(">", vec![], 0, 0));
    }

    #[test]
    fn test_parse_empty_sexpr() {
        assert_parse(
            "()",
            branch(
                ">",
                vec![branch(
                    "sexpr",
                    vec![leaf("char", "(", 0, 1), leaf("char", ")", 1, 2)],
                    0,
                    2,
                )],
                0,
                2,
            ),
        );
    }

    #[test]
    fn test_parse_simple_sexpr() {
        assert_parse(
            "(+ 10 20)",
            branch(
                ">",
                vec![branch(
                    "sexpr",
                    vec![
                        leaf("char", "(", 0, 1),
                        leaf("symbol", "+", 1, 2),
                        leaf("number", "10", 3, 5),
                        leaf("number", "20", 6, 8),
                        leaf("char", ")", 8, 9),
                    ],
                    0,
                    9,
                )],
                0,
                9,
            ),
        );
    }

    #[test]
    fn test_parse_qexpr() {
        assert_parse(
            "{1 2}",
            branch(
                ">",
                vec![branch(
                    "qexpr",
                    vec![
                        leaf("char", "{", 0, 1),
                        leaf("number", "1", 1, 2),
                        leaf("number", "2", 3, 4),
                        leaf("char", "}", 4, 5),
                    ],
                    0,
                    5,
                )],
                0,
                5,
            ),
        );
    }

    #[test]
    fn test_parse_nested() {
        assert_parse(
            "(a {b})",
            branch(
                ">",
                vec![branch(
                    "sexpr",
                    vec![
                        leaf("char", "(", 0, 1),
                        leaf("symbol", "a", 1, 2),
                        branch(
                            "qexpr",
                            vec![
                                leaf("char", "{", 3, 4),
                                leaf("symbol", "b", 4, 5),
                                leaf("char", "}", 5, 6),
                            ],
                            3,
                            6,
                        ),
                        leaf("char", ")", 6, 7),
                    ],
                    0,
                    7,
                )],
                0,
                7,
            ),
        );
    }

    #[test]
    fn test_parse_multiple_top_level_expressions() {
        assert_parse(
            "+ 1 2",
            branch(
                ">",
                vec![
                    leaf("symbol", "+", 0, 1),
                    leaf("number", "1", 2, 3),
                    leaf("number", "2", 4, 5),
                ],
                0,
                5,
            ),
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_parse_error("(1 2", ParseError::UnexpectedEof("')'".to_string()));
        assert_parse_error("{1 2", ParseError::UnexpectedEof("'}'".to_string()));
        assert_parse_error("(", ParseError::UnexpectedEof("')'".to_string()));
        assert_parse_error(
            ")",
            ParseError::UnexpectedToken {
                found: Token {
                    kind: TokenKind::RParen,
                    span: Span::new(0, 1),
                },
                expected: "an expression".to_string(),
            },
        );
        // A closer of the wrong kind is parsed as an expression and rejected
        assert_parse_error(
            "(1 }",
            ParseError::UnexpectedToken {
                found: Token {
                    kind: TokenKind::RBrace,
                    span: Span::new(3, 4),
                },
                expected: "an expression".to_string(),
            },
        );
    }

    #[test]
    fn test_parse_lexer_error_propagation() {
        assert_parse_error(
            "(+ 1 @)",
            ParseError::LexerError(LexerError {
                error: LexerErrorKind::InvalidToken,
                span: Span::new(5, 6),
            }),
        );
    }
}
