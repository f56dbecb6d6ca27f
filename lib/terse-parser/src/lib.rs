//! Terse Parser
//!
//! Event-driven parsing for the Java subset the folding engine inspects.
//! All parsers emit events that are then converted into syntax trees using
//! the `rowan` library via `terse-syntax-tree`.
//!
//! # Event-Driven Architecture
//!
//! 1. Parsers take an `EventSink` and emit parsing events (StartNode, AddToken, FinishNode, Error)
//! 2. Events are collected in the sink
//! 3. A `TreeBuilder` converts events into a lossless syntax tree, restoring
//!    the whitespace and comments that the parsers never see
//!
//! # Example
//!
//! ```no_run
//! use terse_parser::parse_source_file_from_source;
//! use terse_lexer::significant_tokens;
//!
//! let source = "class A { int x = a + b; }";
//! let result = parse_source_file_from_source(source, significant_tokens(source).into_iter());
//!
//! println!("Syntax tree: {:#?}", result.tree);
//! for error in result.errors {
//!     println!("Error: {}", error.message);
//! }
//! ```

pub mod class;
pub mod common;
pub mod event;
pub mod expr;
pub mod import;
pub mod parser;
pub mod source_file;
pub mod stmt;
pub mod ty;

use terse_lexer::Token;
use terse_span::Span;

// Re-export commonly used types
pub use class::ClassDeclaration;
pub use import::ImportDeclaration;

// Re-export event-driven parse functions
pub use class::parse_class_declaration;
pub use expr::parse_expr;
pub use import::parse_import_declaration;
pub use source_file::parse_source_file;
pub use stmt::parse_stmt;
pub use ty::parse_ty;

// Re-export Parser API
pub use parser::{ParseError, ParseResult, Parser};

/// Convenience function to parse a source file from source and tokens
/// Returns a ParseResult with the syntax tree and any errors
pub fn parse_source_file_from_source<I>(source: &str, tokens: I) -> ParseResult
where
    I: Iterator<Item = (Token, Span)>,
{
    Parser::parse(source, tokens, parse_source_file)
}

/// Convenience function to parse a single expression
pub fn parse_expr_from_source<I>(source: &str, tokens: I) -> ParseResult
where
    I: Iterator<Item = (Token, Span)>,
{
    Parser::parse(source, tokens, parse_expr)
}

/// Convenience function to parse a single statement
pub fn parse_stmt_from_source<I>(source: &str, tokens: I) -> ParseResult
where
    I: Iterator<Item = (Token, Span)>,
{
    Parser::parse(source, tokens, parse_stmt)
}
