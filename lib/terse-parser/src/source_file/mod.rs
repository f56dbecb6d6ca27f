//! Compilation unit parsing: `package`, imports and top-level classes

use chumsky::prelude::*;
use terse_lexer::Token;
use terse_span::Span;
use terse_syntax_tree::SyntaxKind;

use crate::class::{class_parser, emit_class, ClassData};
use crate::common::report_errors;
use crate::event::EventSink;
use crate::import::{emit_import, emit_package, import_parser, package_parser, ImportData, PackageData};

#[derive(Debug, Clone)]
struct SourceFileData {
    package: Option<PackageData>,
    imports: Vec<ImportData>,
    classes: Vec<ClassData>,
}

fn source_file_parser() -> impl Parser<Token, SourceFileData, Error = Simple<Token>> + Clone {
    package_parser()
        .or_not()
        .then(import_parser().repeated())
        .then(class_parser().repeated())
        .then_ignore(end())
        .map(|((package, imports), classes)| SourceFileData {
            package,
            imports,
            classes,
        })
}

/// Parse a whole Java file and emit events
///
/// A `SourceFile` root is always emitted; on failure it holds the errors
/// and the tree builder keeps the unparsed text as error tokens.
pub fn parse_source_file<I>(source: &str, tokens: I, sink: &mut EventSink)
where
    I: Iterator<Item = (Token, Span)>,
{
    let end_pos = source.len();
    let stream = chumsky::Stream::from_iter(end_pos..end_pos, tokens);

    sink.start_node(SyntaxKind::SourceFile);
    match source_file_parser().parse(stream) {
        Ok(file) => {
            if let Some(package) = &file.package {
                emit_package(sink, package);
            }
            for import in &file.imports {
                emit_import(sink, import);
            }
            for class in &file.classes {
                emit_class(sink, class);
            }
        }
        Err(errors) => report_errors(sink, errors),
    }
    sink.finish_node();
}

#[cfg(test)]
mod tests {
    use crate::parse_source_file_from_source;
    use terse_lexer::significant_tokens;
    use terse_syntax_tree::SyntaxKind;

    #[test]
    fn test_full_file() {
        let source = "package demo;\n\nimport java.util.*;\n\n// entry\npublic class Main {\n    public static void main(String[] args) {\n        int x = 1;\n    }\n}\n";
        let result = parse_source_file_from_source(source, significant_tokens(source).into_iter());
        assert!(result.is_ok(), "{:?}", result.errors);
        assert_eq!(result.tree.kind(), SyntaxKind::SourceFile);
        assert_eq!(result.tree.text().to_string(), source);

        let kinds: Vec<_> = result.tree.children().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::PackageDeclaration,
                SyntaxKind::ImportDeclaration,
                SyntaxKind::ClassDeclaration
            ]
        );
    }

    #[test]
    fn test_empty_file() {
        let result = parse_source_file_from_source("", std::iter::empty());
        assert!(result.is_ok());
        assert_eq!(result.tree.kind(), SyntaxKind::SourceFile);
    }
}
