//! # Terse Reporting
//!
//! Collects what happened while folding a batch of source files: parse
//! errors, aborted fold requests and, on request, an annotated snippet per
//! fold region. Everything is rendered through `codespan-reporting`.
//!
//! ```ignore
//! let mut report = DiagnosticContext::new();
//! let file = report.add_file("A.java".to_string(), source);
//! report.record_parse_errors(&result.errors, file);
//! match try_fold_regions(&result.tree, &source, &model, &settings) {
//!     Ok(regions) => report.record_regions(&regions, file, explain),
//!     Err(error) => report.record_fold_error(error, file),
//! }
//! report.emit()?;
//! ```

use std::collections::HashMap;
use std::fmt;

use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, NoColor, StandardStream, WriteColor};
use terse_fold::{FoldError, FoldRegion};
use terse_parser::ParseError;

mod diagnostics;

pub use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};

/// Anything that can be shown as an annotated source snippet
pub trait IntoDiagnostic {
    fn into_diagnostic(&self, file_id: usize) -> Diagnostic<usize>;
}

/// Per-file outcome of a fold request
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FileSummary {
    pub parse_errors: usize,
    pub regions: usize,
    pub collapsed: usize,
    /// The request was aborted and produced no regions
    pub aborted: bool,
}

impl FileSummary {
    fn absorb(&mut self, other: &FileSummary) {
        self.parse_errors += other.parse_errors;
        self.regions += other.regions;
        self.collapsed += other.collapsed;
        self.aborted |= other.aborted;
    }
}

impl fmt::Display for FileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} regions ({} collapsed)", self.regions, self.collapsed)?;
        if self.parse_errors > 0 {
            write!(f, ", {} parse errors", self.parse_errors)?;
        }
        if self.aborted {
            write!(f, ", aborted")?;
        }
        Ok(())
    }
}

/// Source files, their fold outcomes and the diagnostics raised for them
pub struct DiagnosticContext {
    files: SimpleFiles<String, String>,
    by_name: HashMap<String, usize>,
    summaries: Vec<FileSummary>,
    diagnostics: Vec<Diagnostic<usize>>,
}

impl DiagnosticContext {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            by_name: HashMap::new(),
            summaries: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Register a source file; a name seen before keeps its first id
    pub fn add_file(&mut self, name: String, source: String) -> usize {
        if let Some(&id) = self.by_name.get(&name) {
            return id;
        }
        let id = self.files.add(name.clone(), source);
        self.by_name.insert(name, id);
        if self.summaries.len() <= id {
            self.summaries.resize(id + 1, FileSummary::default());
        }
        id
    }

    pub fn file_id(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn throw<D: IntoDiagnostic>(&mut self, diagnostic: D, file_id: usize) {
        self.diagnostics.push(diagnostic.into_diagnostic(file_id));
    }

    pub fn throw_all<'d, D, I>(&mut self, items: I, file_id: usize)
    where
        D: IntoDiagnostic + 'd,
        I: IntoIterator<Item = &'d D>,
    {
        for item in items {
            self.diagnostics.push(item.into_diagnostic(file_id));
        }
    }

    pub fn record_parse_errors(&mut self, errors: &[ParseError], file_id: usize) {
        self.summary_mut(file_id).parse_errors += errors.len();
        self.throw_all(errors, file_id);
    }

    /// Count the regions of a file; `explain` also adds a note per region
    pub fn record_regions(&mut self, regions: &[FoldRegion], file_id: usize, explain: bool) {
        let summary = self.summary_mut(file_id);
        summary.regions += regions.len();
        summary.collapsed += regions.iter().filter(|r| r.collapsed).count();
        if explain {
            self.throw_all(regions, file_id);
        }
    }

    pub fn record_fold_error(&mut self, error: FoldError, file_id: usize) {
        self.summary_mut(file_id).aborted = true;
        self.throw(error, file_id);
    }

    fn summary_mut(&mut self, file_id: usize) -> &mut FileSummary {
        if self.summaries.len() <= file_id {
            self.summaries.resize(file_id + 1, FileSummary::default());
        }
        &mut self.summaries[file_id]
    }

    pub fn summary(&self, file_id: usize) -> Option<&FileSummary> {
        self.summaries.get(file_id)
    }

    /// All files added together
    pub fn totals(&self) -> FileSummary {
        let mut total = FileSummary::default();
        for summary in &self.summaries {
            total.absorb(summary);
        }
        total
    }

    /// Errors and bugs; an aborted fold request is only a warning
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d.severity, Severity::Error | Severity::Bug))
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic<usize>] {
        &self.diagnostics
    }

    /// Emit to stderr, colored when it is a terminal
    pub fn emit(&self) -> Result<(), codespan_reporting::files::Error> {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        self.emit_to(&mut writer.lock())
    }

    pub fn emit_to<W: WriteColor>(&self, writer: &mut W) -> Result<(), codespan_reporting::files::Error> {
        let config = term::Config::default();
        for diagnostic in &self.diagnostics {
            term::emit(writer, &config, &self.files, diagnostic)?;
        }
        Ok(())
    }

    /// Everything [`emit`](Self::emit) would print, without color
    pub fn render(&self) -> Result<String, codespan_reporting::files::Error> {
        let mut writer = NoColor::new(Vec::new());
        self.emit_to(&mut writer)?;
        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }
}

impl Default for DiagnosticContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_are_deduplicated_by_name() {
        let mut ctx = DiagnosticContext::new();
        let a = ctx.add_file("A.java".to_string(), "class A {}".to_string());
        let again = ctx.add_file("A.java".to_string(), "ignored".to_string());
        assert_eq!(a, again);
        assert_eq!(ctx.file_id("A.java"), Some(a));
        assert_eq!(ctx.file_id("B.java"), None);
        assert_eq!(ctx.summary(a), Some(&FileSummary::default()));
    }

    #[test]
    fn test_aborted_request_is_a_warning() {
        let mut ctx = DiagnosticContext::new();
        let file = ctx.add_file("A.java".to_string(), "class A {}".to_string());
        ctx.record_fold_error(FoldError::IndexNotReady, file);
        assert!(!ctx.has_errors());
        assert!(ctx.summary(file).is_some_and(|s| s.aborted));

        ctx.record_fold_error(FoldError::Internal("overlap".to_string()), file);
        assert!(ctx.has_errors());
    }

    #[test]
    fn test_totals_add_up_files() {
        let mut ctx = DiagnosticContext::new();
        let a = ctx.add_file("A.java".to_string(), "class A { int x }".to_string());
        let b = ctx.add_file("B.java".to_string(), "class B {}".to_string());
        ctx.record_parse_errors(
            &[ParseError {
                message: "expected `;`".to_string(),
                span: Some(16..17),
            }],
            a,
        );
        ctx.record_fold_error(FoldError::IndexNotReady, b);

        let totals = ctx.totals();
        assert_eq!(totals.parse_errors, 1);
        assert!(totals.aborted);
        assert_eq!(totals.to_string(), "0 regions (0 collapsed), 1 parse errors, aborted");
    }

    #[test]
    fn test_render_plain_text() {
        let mut ctx = DiagnosticContext::new();
        let file = ctx.add_file("A.java".to_string(), "class A { int x }".to_string());
        ctx.record_parse_errors(
            &[ParseError {
                message: "expected `;`".to_string(),
                span: Some(16..17),
            }],
            file,
        );
        let text = ctx.render().unwrap();
        assert!(text.contains("error: expected `;`"), "{text}");
        assert!(text.contains("A.java:1:17"), "{text}");
    }
}
