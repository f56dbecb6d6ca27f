//! High-level parser API
//!
//! This module provides a convenient Parser struct that handles:
//! - Dropping trivia before the token stream reaches the combinators
//! - Parsing with any parse function
//! - Extracting errors from events
//! - Building syntax trees
//!
//! # Example
//!
//! ```no_run
//! use terse_parser::parser::Parser;
//! use terse_parser::parse_source_file;
//! use terse_lexer::lex;
//!
//! let source = "class A { int x = 1; }";
//! let tokens: Vec<_> = lex(source)
//!     .filter_map(|t| t.ok())
//!     .map(|spanned| (spanned.value, spanned.span))
//!     .collect();
//!
//! let result = Parser::parse(source, tokens.into_iter(), parse_source_file);
//!
//! println!("Syntax tree: {:?}", result.tree);
//! for error in result.errors {
//!     println!("Error: {}", error.message);
//! }
//! ```

use terse_lexer::Token;
use terse_span::Span;
use terse_syntax_tree::SyntaxNode;

use crate::event::{is_significant, Event, EventSink, TreeBuilder};

/// A parse error with a message and optional span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The error message
    pub message: String,
    /// The span where the error occurred (if available)
    pub span: Option<Span>,
}

/// The result of parsing, containing both the syntax tree and any errors
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The parsed syntax tree
    pub tree: SyntaxNode,
    /// Any parse errors encountered
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// High-level parser that provides a convenient API for parsing
pub struct Parser;

impl Parser {
    /// Parse source code using the provided parse function
    ///
    /// # Arguments
    ///
    /// * `source` - The source code to parse
    /// * `tokens` - Iterator of tokens (from the lexer), trivia may be included
    /// * `parse_fn` - The parse function to use (e.g., `parse_source_file`)
    pub fn parse<I, F>(source: &str, tokens: I, parse_fn: F) -> ParseResult
    where
        I: Iterator<Item = (Token, Span)>,
        F: FnOnce(&str, std::vec::IntoIter<(Token, Span)>, &mut EventSink),
    {
        let significant: Vec<_> = tokens.filter(|(token, _)| is_significant(token)).collect();

        let mut sink = EventSink::new();
        parse_fn(source, significant.into_iter(), &mut sink);

        let errors: Vec<ParseError> = sink
            .events()
            .iter()
            .filter_map(|e| match e {
                Event::Error { message, span } => Some(ParseError {
                    message: message.clone(),
                    span: span.clone(),
                }),
                _ => None,
            })
            .collect();

        let tree = TreeBuilder::new(source, sink.into_events()).build();

        ParseResult { tree, errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_source_file;
    use terse_lexer::lex;
    use terse_syntax_tree::SyntaxKind;

    fn tokens(source: &str) -> Vec<(Token, Span)> {
        lex(source)
            .filter_map(|t| t.ok())
            .map(|spanned| (spanned.value, spanned.span))
            .collect()
    }

    #[test]
    fn test_parser_with_valid_source() {
        let source = "class Test { }";
        let result = Parser::parse(source, tokens(source).into_iter(), parse_source_file);

        assert!(result.errors.is_empty(), "Should have no errors: {:?}", result.errors);
        assert_eq!(result.tree.kind(), SyntaxKind::SourceFile);
        assert_eq!(result.tree.text().to_string(), source);
    }

    #[test]
    fn test_parser_keeps_tree_on_error() {
        let source = "class 123";
        let result = Parser::parse(source, tokens(source).into_iter(), parse_source_file);

        assert!(!result.errors.is_empty());
        assert!(result.errors.iter().all(|e| e.span.is_some()));
        assert_eq!(result.tree.kind(), SyntaxKind::SourceFile);
        assert_eq!(result.tree.text().to_string(), source);
    }
}
