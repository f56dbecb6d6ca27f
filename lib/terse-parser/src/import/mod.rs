use chumsky::prelude::*;
use terse_lexer::Token;
use terse_span::Span;
use terse_syntax_tree::helpers::{find_child, find_token, type_text};
use terse_syntax_tree::{SyntaxKind, SyntaxNode};

use crate::common::{emit_qualified_name, qualified_name_parser, report_errors, token, QualifiedNameData};
use crate::event::EventSink;

/// Represents an import declaration
///
/// The declaration is stored as a lossless syntax tree. All data is derived
/// from the tree rather than stored separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    pub syntax: SyntaxNode,
    pub span: Span,
}

impl ImportDeclaration {
    /// Wrap an existing ImportDeclaration node
    pub fn cast(syntax: SyntaxNode) -> Option<Self> {
        if syntax.kind() != SyntaxKind::ImportDeclaration {
            return None;
        }
        let range = syntax.text_range();
        let span = range.start().into()..range.end().into();
        Some(Self { syntax, span })
    }

    /// Dotted path without the trailing `.*`, e.g. `java.util.List`
    pub fn path(&self) -> String {
        find_child(&self.syntax, SyntaxKind::QualifiedName)
            .map(|name| type_text(&name))
            .unwrap_or_default()
    }

    /// Check if this is an on-demand import (e.g., `import java.util.*;`)
    pub fn is_wildcard(&self) -> bool {
        find_token(&self.syntax, SyntaxKind::Star).is_some()
    }

    /// Check if this is a static import
    pub fn is_static(&self) -> bool {
        find_token(&self.syntax, SyntaxKind::Static).is_some()
    }
}

/// Raw parsed data for an import
#[derive(Debug, Clone)]
pub struct ImportData {
    pub import_kw: Span,
    pub static_kw: Option<Span>,
    pub path: QualifiedNameData,
    /// `.` and `*` of an on-demand import
    pub wildcard: Option<(Span, Span)>,
    pub semicolon: Span,
}

/// Raw parsed data for a package declaration
#[derive(Debug, Clone)]
pub struct PackageData {
    pub package_kw: Span,
    pub path: QualifiedNameData,
    pub semicolon: Span,
}

/// Parser for `import static? a.b.C(.*)?;`
pub fn import_parser() -> impl Parser<Token, ImportData, Error = Simple<Token>> + Clone {
    token(Token::Import)
        .then(token(Token::Static).or_not())
        .then(qualified_name_parser())
        .then(token(Token::Dot).then(token(Token::Star)).or_not())
        .then(token(Token::Semicolon))
        .map(|((((import_kw, static_kw), path), wildcard), semicolon)| ImportData {
            import_kw,
            static_kw,
            path,
            wildcard,
            semicolon,
        })
}

/// Parser for `package a.b;`
pub fn package_parser() -> impl Parser<Token, PackageData, Error = Simple<Token>> + Clone {
    token(Token::Package)
        .then(qualified_name_parser())
        .then(token(Token::Semicolon))
        .map(|((package_kw, path), semicolon)| PackageData {
            package_kw,
            path,
            semicolon,
        })
}

pub fn emit_import(sink: &mut EventSink, import: &ImportData) {
    sink.start_node(SyntaxKind::ImportDeclaration);
    sink.add_token(SyntaxKind::Import, import.import_kw.clone());
    if let Some(static_kw) = &import.static_kw {
        sink.add_token(SyntaxKind::Static, static_kw.clone());
    }
    emit_qualified_name(sink, &import.path);
    if let Some((dot, star)) = &import.wildcard {
        sink.add_token(SyntaxKind::Dot, dot.clone());
        sink.add_token(SyntaxKind::Star, star.clone());
    }
    sink.add_token(SyntaxKind::Semicolon, import.semicolon.clone());
    sink.finish_node();
}

pub fn emit_package(sink: &mut EventSink, package: &PackageData) {
    sink.start_node(SyntaxKind::PackageDeclaration);
    sink.add_token(SyntaxKind::Package, package.package_kw.clone());
    emit_qualified_name(sink, &package.path);
    sink.add_token(SyntaxKind::Semicolon, package.semicolon.clone());
    sink.finish_node();
}

/// Parse an import declaration and emit events
pub fn parse_import_declaration<I>(source: &str, tokens: I, sink: &mut EventSink)
where
    I: Iterator<Item = (Token, Span)>,
{
    let end_pos = source.len();
    let stream = chumsky::Stream::from_iter(end_pos..end_pos, tokens);

    match import_parser().then_ignore(end()).parse(stream) {
        Ok(import) => emit_import(sink, &import),
        Err(errors) => {
            sink.start_node(SyntaxKind::ImportDeclaration);
            report_errors(sink, errors);
            sink.finish_node();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::TreeBuilder;
    use terse_lexer::significant_tokens;

    fn parse(source: &str) -> ImportDeclaration {
        let mut sink = EventSink::new();
        parse_import_declaration(source, significant_tokens(source).into_iter(), &mut sink);
        let tree = TreeBuilder::new(source, sink.into_events()).build();
        ImportDeclaration::cast(tree).unwrap()
    }

    #[test]
    fn test_single_type_import() {
        let import = parse("import java.util.List;");
        assert_eq!(import.path(), "java.util.List");
        assert!(!import.is_wildcard());
        assert!(!import.is_static());
    }

    #[test]
    fn test_wildcard_and_static_imports() {
        let import = parse("import java.util.*;");
        assert_eq!(import.path(), "java.util");
        assert!(import.is_wildcard());

        let import = parse("import static java.lang.Math.abs;");
        assert!(import.is_static());
        assert_eq!(import.path(), "java.lang.Math.abs");
    }
}
