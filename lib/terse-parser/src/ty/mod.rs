//! Type parsing
//!
//! Supports the type syntax that appears in declarations, casts and `new`:
//! - Primitive types: `int`, `double`, `void`
//! - Named types with optional qualification: `BigDecimal`, `java.util.List`
//! - Type arguments, including the diamond: `Map<String, List<Integer>>`, `ArrayList<>`
//! - Array dimensions: `int[]`, `String[][]`

use chumsky::prelude::*;
use terse_lexer::Token;
use terse_span::Span;
use terse_syntax_tree::SyntaxKind;

use crate::common::{
    comma_list, emit_comma_list, emit_qualified_name_tokens, qualified_name_parser, token,
    QualifiedNameData,
};
use crate::event::EventSink;

/// Base of a type, before type arguments and dimensions
#[derive(Debug, Clone)]
pub enum TyBase {
    Primitive(Token, Span),
    Named(QualifiedNameData),
}

/// Type arguments: `<A, B>` or the diamond `<>`
#[derive(Debug, Clone)]
pub struct TypeArgumentsData {
    pub lt: Span,
    pub args: Vec<(Option<Span>, TyVariant)>,
    pub gt: Span,
}

/// Raw parsed data for a type
#[derive(Debug, Clone)]
pub struct TyVariant {
    pub base: TyBase,
    pub arguments: Option<TypeArgumentsData>,
    /// `[` `]` pairs
    pub dims: Vec<(Span, Span)>,
}

impl TyVariant {
    pub fn span(&self) -> Span {
        let start = match &self.base {
            TyBase::Primitive(_, span) => span.start,
            TyBase::Named(name) => name.first.start,
        };
        let end = if let Some((_, rbracket)) = self.dims.last() {
            rbracket.end
        } else if let Some(args) = &self.arguments {
            args.gt.end
        } else {
            match &self.base {
                TyBase::Primitive(_, span) => span.end,
                TyBase::Named(name) => name.span().end,
            }
        };
        start..end
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.base, TyBase::Primitive(..)) && self.dims.is_empty()
    }
}

fn primitive_parser() -> impl Parser<Token, (Token, Span), Error = Simple<Token>> + Clone {
    filter_map(|span, token: Token| {
        if token.is_primitive_type() || token == Token::Void {
            Ok((token, span))
        } else {
            Err(Simple::expected_input_found(span, vec![], Some(token)))
        }
    })
}

/// Parser for array dimension pairs `[]`
pub fn dims_parser() -> impl Parser<Token, Vec<(Span, Span)>, Error = Simple<Token>> + Clone {
    token(Token::LBracket).then(token(Token::RBracket)).repeated()
}

fn arguments_of<P>(ty: P) -> impl Parser<Token, TypeArgumentsData, Error = Simple<Token>> + Clone
where
    P: Parser<Token, TyVariant, Error = Simple<Token>> + Clone,
{
    token(Token::Lt)
        .then(comma_list(ty).or_not())
        .then(token(Token::Gt))
        .map(|((lt, args), gt)| TypeArgumentsData {
            lt,
            args: args.unwrap_or_default(),
            gt,
        })
}

/// Parser for a standalone `<...>` list, e.g. class type parameters
pub fn type_arguments_parser() -> impl Parser<Token, TypeArgumentsData, Error = Simple<Token>> + Clone {
    arguments_of(ty_parser())
}

/// Parser for types
pub fn ty_parser() -> impl Parser<Token, TyVariant, Error = Simple<Token>> + Clone {
    recursive(|ty| {
        let arguments = arguments_of(ty);

        let primitive = primitive_parser().map(|(t, span)| TyBase::Primitive(t, span));
        let named = qualified_name_parser().map(TyBase::Named);

        primitive
            .then(dims_parser())
            .map(|(base, dims)| TyVariant {
                base,
                arguments: None,
                dims,
            })
            .or(named
                .then(arguments.or_not())
                .then(dims_parser())
                .map(|((base, arguments), dims)| TyVariant {
                    base,
                    arguments,
                    dims,
                }))
    })
}

/// Emit events for a type
pub fn emit_ty_variant(sink: &mut EventSink, ty: &TyVariant) {
    sink.start_node(SyntaxKind::Type);
    match &ty.base {
        TyBase::Primitive(token, span) => sink.add_token(SyntaxKind::from(*token), span.clone()),
        TyBase::Named(name) => emit_qualified_name_tokens(sink, name),
    }
    if let Some(arguments) = &ty.arguments {
        emit_type_arguments(sink, arguments);
    }
    emit_dims(sink, &ty.dims);
    sink.finish_node();
}

/// Emit a TypeArguments node
pub fn emit_type_arguments(sink: &mut EventSink, arguments: &TypeArgumentsData) {
    sink.start_node(SyntaxKind::TypeArguments);
    sink.add_token(SyntaxKind::Lt, arguments.lt.clone());
    emit_comma_list(sink, &arguments.args, emit_ty_variant);
    sink.add_token(SyntaxKind::Gt, arguments.gt.clone());
    sink.finish_node();
}

/// Emit `[` `]` pairs as bare tokens
pub fn emit_dims(sink: &mut EventSink, dims: &[(Span, Span)]) {
    for (l, r) in dims {
        sink.add_token(SyntaxKind::LBracket, l.clone());
        sink.add_token(SyntaxKind::RBracket, r.clone());
    }
}

/// Parse a type and emit events
pub fn parse_ty<I>(source: &str, tokens: I, sink: &mut EventSink)
where
    I: Iterator<Item = (Token, Span)>,
{
    let end_pos = source.len();
    let stream = chumsky::Stream::from_iter(end_pos..end_pos, tokens);

    match ty_parser().then_ignore(end()).parse(stream) {
        Ok(ty) => emit_ty_variant(sink, &ty),
        Err(errors) => {
            sink.start_node(SyntaxKind::Type);
            crate::common::report_errors(sink, errors);
            sink.finish_node();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser as TreeParser;
    use terse_lexer::significant_tokens;
    use terse_syntax_tree::helpers::type_text;

    fn parse(source: &str) -> crate::ParseResult {
        TreeParser::parse(source, significant_tokens(source).into_iter(), parse_ty)
    }

    #[test]
    fn test_primitive_and_array_types() {
        let result = parse("int[]");
        assert!(result.is_ok(), "{:?}", result.errors);
        assert_eq!(type_text(&result.tree), "int[]");
    }

    #[test]
    fn test_nested_type_arguments_close_with_separate_angles() {
        let result = parse("Map<String, List<Integer>>");
        assert!(result.is_ok(), "{:?}", result.errors);
        let args = result
            .tree
            .children()
            .find(|n| n.kind() == SyntaxKind::TypeArguments)
            .unwrap();
        assert_eq!(args.children().count(), 2);
    }

    #[test]
    fn test_diamond() {
        let result = parse("java.util.ArrayList<>");
        assert!(result.is_ok(), "{:?}", result.errors);
        assert_eq!(type_text(&result.tree), "java.util.ArrayList<>");
    }
}
