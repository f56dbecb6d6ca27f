//! Common parser combinators shared across multiple parsers
//!
//! The token stream handed to these combinators never contains trivia, so
//! none of them need to skip whitespace or comments.

use chumsky::prelude::*;
use terse_lexer::Token;
use terse_span::Span;
use terse_syntax_tree::SyntaxKind;

use crate::event::EventSink;

/// Match a specific token and return its span
pub fn token(t: Token) -> impl Parser<Token, Span, Error = Simple<Token>> + Clone {
    just(t).map_with_span(|_, span| span)
}

/// Match one of several tokens and return it with its span
pub fn one_of_tokens(
    tokens: &'static [Token],
) -> impl Parser<Token, (Token, Span), Error = Simple<Token>> + Clone {
    filter_map(move |span: Span, token: Token| {
        if tokens.contains(&token) {
            Ok((token, span))
        } else {
            Err(Simple::expected_input_found(
                span,
                tokens.iter().copied().map(Some),
                Some(token),
            ))
        }
    })
}

/// Parse an identifier and return its span
pub fn identifier() -> impl Parser<Token, Span, Error = Simple<Token>> + Clone {
    filter_map(|span, token| match token {
        Token::Identifier => Ok(span),
        _ => Err(Simple::expected_input_found(span, vec![Some(Token::Identifier)], Some(token))),
    })
}

/// Parse a dotted name: `java.util.List`
pub fn qualified_name_parser() -> impl Parser<Token, QualifiedNameData, Error = Simple<Token>> + Clone {
    identifier()
        .then(token(Token::Dot).then(identifier()).repeated())
        .map(|(first, rest)| QualifiedNameData { first, rest })
}

/// Parse a modifier list: `public static final`
pub fn modifiers_parser() -> impl Parser<Token, Vec<(Token, Span)>, Error = Simple<Token>> + Clone {
    filter_map(|span, token: Token| {
        if token.is_modifier() {
            Ok((token, span))
        } else {
            Err(Simple::expected_input_found(span, vec![], Some(token)))
        }
    })
    .repeated()
}

/// Raw data for a dotted name
#[derive(Debug, Clone)]
pub struct QualifiedNameData {
    pub first: Span,
    pub rest: Vec<(Span, Span)>,
}

impl QualifiedNameData {
    pub fn span(&self) -> Span {
        let end = self.rest.last().map(|(_, name)| name.end).unwrap_or(self.first.end);
        self.first.start..end
    }
}

/// Emit the tokens of a dotted name (without a wrapping node)
pub fn emit_qualified_name_tokens(sink: &mut EventSink, name: &QualifiedNameData) {
    sink.add_token(SyntaxKind::Identifier, name.first.clone());
    for (dot, segment) in &name.rest {
        sink.add_token(SyntaxKind::Dot, dot.clone());
        sink.add_token(SyntaxKind::Identifier, segment.clone());
    }
}

/// Emit a QualifiedName node
pub fn emit_qualified_name(sink: &mut EventSink, name: &QualifiedNameData) {
    sink.start_node(SyntaxKind::QualifiedName);
    emit_qualified_name_tokens(sink, name);
    sink.finish_node();
}

/// Emit a Modifiers node if any modifier is present
pub fn emit_modifiers(sink: &mut EventSink, modifiers: &[(Token, Span)]) {
    if modifiers.is_empty() {
        return;
    }
    sink.start_node(SyntaxKind::Modifiers);
    for (token, span) in modifiers {
        sink.add_token(SyntaxKind::from(*token), span.clone());
    }
    sink.finish_node();
}

/// Turn chumsky errors into sink errors
pub fn report_errors(sink: &mut EventSink, errors: Vec<Simple<Token>>) {
    for error in errors {
        sink.error_at(describe_error(&error), error.span());
    }
}

/// Human readable description of a chumsky error
pub fn describe_error(error: &Simple<Token>) -> String {
    if let chumsky::error::SimpleReason::Custom(message) = error.reason() {
        return message.clone();
    }
    let found = match error.found() {
        Some(token) => format!("{:?}", token),
        None => "end of input".to_string(),
    };
    let mut expected: Vec<String> = error
        .expected()
        .map(|e| match e {
            Some(token) => format!("{:?}", token),
            None => "end of input".to_string(),
        })
        .collect();
    expected.sort();
    if expected.is_empty() {
        format!("unexpected {}", found)
    } else {
        format!("expected {}, found {}", expected.join(" or "), found)
    }
}

/// A comma separated list of at least one item; each item keeps the span of the comma before it
pub fn comma_list<P, O>(item: P) -> impl Parser<Token, Vec<(Option<Span>, O)>, Error = Simple<Token>> + Clone
where
    P: Parser<Token, O, Error = Simple<Token>> + Clone,
{
    item.clone()
        .then(token(Token::Comma).then(item).repeated())
        .map(|(first, rest)| {
            std::iter::once((None, first))
                .chain(rest.into_iter().map(|(comma, item)| (Some(comma), item)))
                .collect()
        })
}

/// Emit a comma list, calling `emit_item` for every element
pub fn emit_comma_list<O>(
    sink: &mut EventSink,
    items: &[(Option<Span>, O)],
    mut emit_item: impl FnMut(&mut EventSink, &O),
) {
    for (comma, item) in items {
        if let Some(comma) = comma {
            sink.add_token(SyntaxKind::Comma, comma.clone());
        }
        emit_item(sink, item);
    }
}
