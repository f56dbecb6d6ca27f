//! Diagnostics for parse errors, folding errors and fold regions

use terse_fold::{FoldError, FoldRegion};
use terse_parser::ParseError;

use crate::{Diagnostic, IntoDiagnostic, Label};

impl IntoDiagnostic for ParseError {
    fn into_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        let diagnostic = Diagnostic::error().with_message(&self.message);
        match &self.span {
            Some(span) => diagnostic.with_labels(vec![
                Label::primary(file_id, span.clone()).with_message("syntax error here"),
            ]),
            None => diagnostic,
        }
    }
}

impl IntoDiagnostic for FoldError {
    fn into_diagnostic(&self, _file_id: usize) -> Diagnostic<usize> {
        match self {
            FoldError::IndexNotReady => Diagnostic::warning()
                .with_message("no folds computed: symbol index is not ready")
                .with_notes(vec!["the request can be retried once indexing finishes".to_string()]),
            FoldError::Internal(message) => {
                Diagnostic::bug().with_message(format!("internal folding error: {message}"))
            }
        }
    }
}

/// Explains where a region comes from, for `--explain`
impl IntoDiagnostic for FoldRegion {
    fn into_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        let mut notes = vec![format!("group: {}", self.group)];
        if self.collapsed {
            notes.push("collapsed by default".to_string());
        }
        Diagnostic::note()
            .with_message(format!("folds to `{}`", self.placeholder))
            .with_labels(vec![
                Label::primary(file_id, self.span.clone()).with_message(&self.placeholder),
            ])
            .with_notes(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiagnosticContext, Severity};
    use terse_lexer::significant_tokens;
    use terse_parser::parse_source_file_from_source;
    use terse_syntax_tree::SyntaxNodePtr;

    #[test]
    fn test_parse_errors_point_at_source() {
        let source = "class A { int x }";
        let result = parse_source_file_from_source(source, significant_tokens(source).into_iter());
        assert!(!result.is_ok());

        let mut ctx = DiagnosticContext::new();
        let file = ctx.add_file("A.java".to_string(), source.to_string());
        ctx.record_parse_errors(&result.errors, file);
        assert!(ctx.has_errors());
        assert_eq!(ctx.summary(file).map(|s| s.parse_errors), Some(result.errors.len()));
        let text = ctx.render().unwrap();
        assert!(text.contains("A.java"), "{text}");
    }

    #[test]
    fn test_fold_errors() {
        let warning = FoldError::IndexNotReady.into_diagnostic(0);
        assert_eq!(warning.severity, Severity::Warning);
        assert!(warning.labels.is_empty());

        let bug = FoldError::Internal("overlap".to_string()).into_diagnostic(0);
        assert_eq!(bug.severity, Severity::Bug);
        assert_eq!(bug.message, "internal folding error: overlap");
    }

    #[test]
    fn test_unspanned_parse_error() {
        let error = ParseError {
            message: "unexpected end of input".to_string(),
            span: None,
        };
        let diagnostic = error.into_diagnostic(0);
        assert_eq!(diagnostic.severity, Severity::Error);
        assert!(diagnostic.labels.is_empty());
    }

    #[test]
    fn test_explained_regions_show_their_placeholder() {
        let source = "class A { int f(int a, int b) { return a.add(b); } }";
        let result = parse_source_file_from_source(source, significant_tokens(source).into_iter());
        let start = source.find("a.add(b)").unwrap();
        let region = FoldRegion {
            span: start..start + "a.add(b)".len(),
            placeholder: "a + b".to_string(),
            group: format!("MethodCallExpr@{start}"),
            collapsed: true,
            node: SyntaxNodePtr::new(&result.tree),
        };

        let mut ctx = DiagnosticContext::new();
        let file = ctx.add_file("A.java".to_string(), source.to_string());
        ctx.record_regions(std::slice::from_ref(&region), file, false);
        assert!(ctx.is_empty());

        ctx.record_regions(std::slice::from_ref(&region), file, true);
        assert!(!ctx.has_errors());
        let summary = ctx.summary(file).copied().unwrap();
        assert_eq!((summary.regions, summary.collapsed), (2, 2));

        let text = ctx.render().unwrap();
        assert!(text.contains("note: folds to `a + b`"), "{text}");
        assert!(text.contains("collapsed by default"), "{text}");
    }
}
