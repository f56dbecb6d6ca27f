use chumsky::prelude::*;
use terse_lexer::Token;
use terse_span::Span;
use terse_syntax_tree::helpers::{find_child, identifier_text};
use terse_syntax_tree::{SyntaxKind, SyntaxNode};

use crate::common::{comma_list, emit_comma_list, emit_modifiers, identifier, modifiers_parser, report_errors, token};
use crate::event::{Event, EventSink, TreeBuilder};
use crate::stmt::{
    block_parser, emit_block, emit_declaration_parts, emit_parameter, local_variable_parser,
    parameter_parser, BlockData, LocalVariableData, ParameterData,
};
use crate::ty::{emit_ty_variant, emit_type_arguments, ty_parser, type_arguments_parser, TyVariant, TypeArgumentsData};

/// Represents a class declaration: `modifiers class Name<T> extends A implements B { ... }`
///
/// The declaration is stored as a lossless syntax tree. All data is derived
/// from the tree rather than stored separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration {
    pub syntax: SyntaxNode,
    pub span: Span,
}

impl ClassDeclaration {
    /// Create a new ClassDeclaration from events and source text
    pub fn from_events(source: &str, events: Vec<Event>, span: Span) -> Self {
        let syntax = TreeBuilder::new(source, events).build();
        Self { syntax, span }
    }

    /// Wrap an existing ClassDeclaration node
    pub fn cast(syntax: SyntaxNode) -> Option<Self> {
        if syntax.kind() != SyntaxKind::ClassDeclaration {
            return None;
        }
        let range = syntax.text_range();
        let span = range.start().into()..range.end().into();
        Some(Self { syntax, span })
    }

    /// Get the class name from this declaration
    pub fn name(&self) -> Option<String> {
        identifier_text(&self.syntax)
    }

    /// Field, method and nested class nodes of the body
    pub fn members(&self) -> Vec<SyntaxNode> {
        find_child(&self.syntax, SyntaxKind::ClassBody)
            .map(|body| {
                body.children()
                    .filter(|child| {
                        matches!(
                            child.kind(),
                            SyntaxKind::FieldDeclaration
                                | SyntaxKind::MethodDeclaration
                                | SyntaxKind::ClassDeclaration
                        )
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Nested class declarations
    pub fn nested_classes(&self) -> Vec<ClassDeclaration> {
        self.members()
            .into_iter()
            .filter_map(ClassDeclaration::cast)
            .collect()
    }
}

/// `( params )`
#[derive(Debug, Clone)]
pub struct ParameterListData {
    pub lparen: Span,
    pub parameters: Vec<(Option<Span>, ParameterData)>,
    pub rparen: Span,
}

#[derive(Debug, Clone)]
pub enum MethodBody {
    Block(BlockData),
    Abstract(Span),
}

/// A method or constructor; constructors have no return type
#[derive(Debug, Clone)]
pub struct MethodData {
    pub modifiers: Vec<(Token, Span)>,
    pub return_ty: Option<TyVariant>,
    pub name: Span,
    pub parameters: ParameterListData,
    pub body: MethodBody,
}

#[derive(Debug, Clone)]
pub enum MemberData {
    Field(LocalVariableData, Span),
    Method(MethodData),
    Class(ClassData),
}

/// Raw parsed data for a class declaration
#[derive(Debug, Clone)]
pub struct ClassData {
    pub modifiers: Vec<(Token, Span)>,
    pub class_kw: Span,
    pub name: Span,
    pub type_parameters: Option<TypeArgumentsData>,
    pub extends: Option<(Span, TyVariant)>,
    pub implements: Option<(Span, Vec<(Option<Span>, TyVariant)>)>,
    pub lbrace: Span,
    pub members: Vec<MemberData>,
    pub rbrace: Span,
}

fn parameter_list_parser() -> impl Parser<Token, ParameterListData, Error = Simple<Token>> + Clone {
    token(Token::LParen)
        .then(comma_list(parameter_parser()).or_not())
        .then(token(Token::RParen))
        .map(|((lparen, parameters), rparen)| ParameterListData {
            lparen,
            parameters: parameters.unwrap_or_default(),
            rparen,
        })
}

fn method_body_parser() -> impl Parser<Token, MethodBody, Error = Simple<Token>> + Clone {
    block_parser()
        .map(MethodBody::Block)
        .or(token(Token::Semicolon).map(MethodBody::Abstract))
}

/// Parser for class declarations, including nested classes
pub fn class_parser() -> impl Parser<Token, ClassData, Error = Simple<Token>> + Clone {
    recursive(|class| {
        let method = modifiers_parser()
            .then(ty_parser())
            .then(identifier())
            .then(parameter_list_parser())
            .then(method_body_parser())
            .map(|((((modifiers, ty), name), parameters), body)| {
                MemberData::Method(MethodData {
                    modifiers,
                    return_ty: Some(ty),
                    name,
                    parameters,
                    body,
                })
            });

        let constructor = modifiers_parser()
            .then(identifier())
            .then(parameter_list_parser())
            .then(method_body_parser())
            .map(|(((modifiers, name), parameters), body)| {
                MemberData::Method(MethodData {
                    modifiers,
                    return_ty: None,
                    name,
                    parameters,
                    body,
                })
            });

        let field = local_variable_parser()
            .then(token(Token::Semicolon))
            .map(|(data, semi)| MemberData::Field(data, semi));

        let member = class
            .map(MemberData::Class)
            .or(method)
            .or(constructor)
            .or(field);

        modifiers_parser()
            .then(token(Token::Class))
            .then(identifier())
            .then(type_arguments_parser().or_not())
            .then(token(Token::Extends).then(ty_parser()).or_not())
            .then(token(Token::Implements).then(comma_list(ty_parser())).or_not())
            .then(token(Token::LBrace))
            .then(member.repeated())
            .then(token(Token::RBrace))
            .map(
                |((((((((modifiers, class_kw), name), type_parameters), extends), implements), lbrace), members), rbrace)| {
                    ClassData {
                        modifiers,
                        class_kw,
                        name,
                        type_parameters,
                        extends,
                        implements,
                        lbrace,
                        members,
                        rbrace,
                    }
                },
            )
    })
}

fn emit_method(sink: &mut EventSink, method: &MethodData) {
    sink.start_node(SyntaxKind::MethodDeclaration);
    emit_modifiers(sink, &method.modifiers);
    if let Some(ty) = &method.return_ty {
        emit_ty_variant(sink, ty);
    }
    sink.add_token(SyntaxKind::Identifier, method.name.clone());

    let list = &method.parameters;
    sink.start_node(SyntaxKind::ParameterList);
    sink.add_token(SyntaxKind::LParen, list.lparen.clone());
    emit_comma_list(sink, &list.parameters, emit_parameter);
    sink.add_token(SyntaxKind::RParen, list.rparen.clone());
    sink.finish_node();

    match &method.body {
        MethodBody::Block(block) => emit_block(sink, block),
        MethodBody::Abstract(semi) => sink.add_token(SyntaxKind::Semicolon, semi.clone()),
    }
    sink.finish_node();
}

/// Emit events for a class declaration
pub fn emit_class(sink: &mut EventSink, class: &ClassData) {
    sink.start_node(SyntaxKind::ClassDeclaration);
    emit_modifiers(sink, &class.modifiers);
    sink.add_token(SyntaxKind::Class, class.class_kw.clone());
    sink.add_token(SyntaxKind::Identifier, class.name.clone());
    if let Some(params) = &class.type_parameters {
        emit_type_arguments(sink, params);
    }
    if let Some((kw, ty)) = &class.extends {
        sink.add_token(SyntaxKind::Extends, kw.clone());
        emit_ty_variant(sink, ty);
    }
    if let Some((kw, types)) = &class.implements {
        sink.add_token(SyntaxKind::Implements, kw.clone());
        emit_comma_list(sink, types, emit_ty_variant);
    }

    sink.start_node(SyntaxKind::ClassBody);
    sink.add_token(SyntaxKind::LBrace, class.lbrace.clone());
    for member in &class.members {
        match member {
            MemberData::Field(data, semi) => {
                sink.start_node(SyntaxKind::FieldDeclaration);
                emit_declaration_parts(sink, data);
                sink.add_token(SyntaxKind::Semicolon, semi.clone());
                sink.finish_node();
            }
            MemberData::Method(method) => emit_method(sink, method),
            MemberData::Class(nested) => emit_class(sink, nested),
        }
    }
    sink.add_token(SyntaxKind::RBrace, class.rbrace.clone());
    sink.finish_node();

    sink.finish_node();
}

/// Parse a class declaration and emit events
pub fn parse_class_declaration<I>(source: &str, tokens: I, sink: &mut EventSink)
where
    I: Iterator<Item = (Token, Span)>,
{
    let end_pos = source.len();
    let stream = chumsky::Stream::from_iter(end_pos..end_pos, tokens);

    match class_parser().then_ignore(end()).parse(stream) {
        Ok(class) => emit_class(sink, &class),
        Err(errors) => {
            sink.start_node(SyntaxKind::ClassDeclaration);
            report_errors(sink, errors);
            sink.finish_node();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terse_lexer::significant_tokens;

    fn parse(source: &str) -> ClassDeclaration {
        let mut sink = EventSink::new();
        parse_class_declaration(source, significant_tokens(source).into_iter(), &mut sink);
        assert!(
            !sink.events().iter().any(|e| matches!(e, Event::Error { .. })),
            "{:?}",
            sink.events()
        );
        ClassDeclaration::from_events(source, sink.into_events(), 0..source.len())
    }

    #[test]
    fn test_class_members() {
        let class = parse(
            "public class Point extends Shape implements Comparable<Point> {
                private final int x;
                public Point(int x) { this.x = x; }
                public int getX() { return x; }
                abstract void draw();
                static class Inner { }
            }",
        );
        assert_eq!(class.name().as_deref(), Some("Point"));

        let kinds: Vec<_> = class.members().iter().map(|m| m.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::FieldDeclaration,
                SyntaxKind::MethodDeclaration,
                SyntaxKind::MethodDeclaration,
                SyntaxKind::MethodDeclaration,
                SyntaxKind::ClassDeclaration,
            ]
        );
        assert_eq!(class.nested_classes()[0].name().as_deref(), Some("Inner"));
    }

    #[test]
    fn test_constructor_has_no_type() {
        let class = parse("class A { A() { } }");
        let ctor = &class.members()[0];
        assert!(find_child(ctor, SyntaxKind::Type).is_none());
        assert_eq!(identifier_text(ctor).as_deref(), Some("A"));
    }

    #[test]
    fn test_generic_class() {
        let class = parse("class Box<T> { T value; }");
        assert!(find_child(&class.syntax, SyntaxKind::TypeArguments).is_some());
    }
}
