//! Terse Test Suite
//!
//! A fluent test API for running the whole folding pipeline (lex, parse,
//! bind, fold) over a Java source and checking the regions it produces.
//!
//! # Example
//!
//! ```ignore
//! use terse_test_suite::*;
//!
//! #[test]
//! fn test_decimal_sum() {
//!     Test::in_class("BigDecimal sum(BigDecimal a, BigDecimal b) { return a.add(b); }")
//!         .expect(ParsesCleanly)
//!         .expect(Region::at("a.add(b)").to("a + b").collapsed(true));
//! }
//! ```
//!
//! # Available Expectations
//!
//! - `ParsesCleanly`, `ParseFails`, `HasParseError("...")`
//! - `NoFolds`, `RegionCount(n)`, `Folds("placeholder")`, `NotFolded("text")`
//! - `Region::at("source text")` with `.to(..)` and `.collapsed(..)`
//! - `Collapsed("source text")` / `Expanded("source text")`
//! - `FoldFails` when the symbol index was unavailable

use terse_fold::{try_fold_regions, FoldError, FoldRegion};
use terse_lexer::significant_tokens;
use terse_parser::parse_source_file_from_source;
use terse_reporting::DiagnosticContext;
use terse_semantic::SemanticModel;
use terse_syntax_tree::SyntaxNode;
use tracing_subscriber::EnvFilter;

pub use terse_fold::{FoldCategory, FoldSettings};

/// Imports every `Test::in_class` source starts with
const PRELUDE: &str = "import java.math.BigDecimal;\nimport java.math.BigInteger;\nimport java.util.*;\nimport java.util.stream.*;\n\n";

/// Everything the pipeline produced for one test source
pub struct TestContext {
    pub source: String,
    pub tree: SyntaxNode,
    pub model: SemanticModel,
    pub regions: Vec<FoldRegion>,
    pub fold_error: Option<FoldError>,
    pub diagnostics: DiagnosticContext,
    pub has_errors: bool,
}

impl TestContext {
    /// Source text a region covers
    pub fn text(&self, region: &FoldRegion) -> &str {
        self.source.get(region.span.clone()).unwrap_or_default()
    }

    /// One line per region, for failure messages
    pub fn describe(&self) -> String {
        if self.regions.is_empty() {
            return "  (no regions)".to_string();
        }
        self.regions
            .iter()
            .map(|r| {
                format!(
                    "  {}..{} {:?} => {:?}{}",
                    r.span.start,
                    r.span.end,
                    self.text(r),
                    r.placeholder,
                    if r.collapsed { " [collapsed]" } else { "" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A Java source run through the folding pipeline
pub struct Test {
    source: String,
    settings: FoldSettings,
    index_ready: bool,
    context: Option<TestContext>,
}

impl Test {
    /// Create a test from a complete compilation unit
    pub fn new(source: &str) -> Self {
        Test {
            source: source.to_string(),
            settings: FoldSettings::default(),
            index_ready: true,
            context: None,
        }
    }

    /// Create a test from class members, wrapped in `class Test` with common imports
    pub fn in_class(members: &str) -> Self {
        Test::new(&format!("{PRELUDE}class Test {{\n{members}\n}}\n"))
    }

    pub fn with_settings(mut self, settings: FoldSettings) -> Self {
        self.settings = settings;
        self.context = None;
        self
    }

    /// Leave `category` expanded by default
    pub fn disable(self, category: FoldCategory) -> Self {
        let settings = self.settings.clone().without(category);
        self.with_settings(settings)
    }

    /// Run as if the host's symbol index were still being built
    pub fn index_not_ready(mut self) -> Self {
        self.index_ready = false;
        self.context = None;
        self
    }

    fn run(&mut self) -> &TestContext {
        init_logging();
        self.context.get_or_insert_with(|| {
            let result =
                parse_source_file_from_source(&self.source, significant_tokens(&self.source).into_iter());

            let mut diagnostics = DiagnosticContext::new();
            let file_id = diagnostics.add_file("Test.java".to_string(), self.source.clone());
            diagnostics.record_parse_errors(&result.errors, file_id);
            let has_errors = !result.errors.is_empty();

            let model = SemanticModel::build(&result.tree);
            model.set_index_ready(self.index_ready);
            let (regions, fold_error) =
                match try_fold_regions(&result.tree, &self.source, &model, &self.settings) {
                    Ok(regions) => {
                        diagnostics.record_regions(&regions, file_id, false);
                        (regions, None)
                    }
                    Err(error) => {
                        diagnostics.record_fold_error(error.clone(), file_id);
                        (Vec::new(), Some(error))
                    }
                };

            TestContext {
                source: self.source.clone(),
                tree: result.tree,
                model,
                regions,
                fold_error,
                diagnostics,
                has_errors,
            }
        })
    }

    /// Apply an expectation to this test
    pub fn expect<E: Expectable>(mut self, expectation: E) -> Self {
        let ctx = self.run();
        if let Err(e) = expectation.check(ctx) {
            if !ctx.diagnostics.is_empty() {
                eprintln!("\n--- Diagnostics ---");
                ctx.diagnostics.emit().ok();
            }
            panic!("Expectation failed: {}\nregions:\n{}", e, ctx.describe());
        }
        self
    }

    /// The regions produced, for checks no expectation covers
    pub fn regions(mut self) -> Vec<FoldRegion> {
        self.run();
        self.context.map(|ctx| ctx.regions).unwrap_or_default()
    }
}

/// Route pipeline logs through the test writer, filtered by `RUST_LOG`
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Trait for test expectations
pub trait Expectable {
    fn check(&self, ctx: &TestContext) -> Result<(), String>;
}

/// Expects the source to parse without errors
pub struct ParsesCleanly;

impl Expectable for ParsesCleanly {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        if ctx.has_errors {
            let messages: Vec<_> = ctx
                .diagnostics
                .diagnostics()
                .iter()
                .map(|d| d.message.as_str())
                .collect();
            Err(format!("Expected a clean parse, but got: {messages:?}"))
        } else {
            Ok(())
        }
    }
}

/// Expects at least one parse error
pub struct ParseFails;

impl Expectable for ParseFails {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        if ctx.has_errors {
            Ok(())
        } else {
            Err("Expected a parse error, but parsing succeeded".to_string())
        }
    }
}

/// Expects a parse error whose message contains the text
pub struct HasParseError(pub &'static str);

impl Expectable for HasParseError {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        if !ctx.has_errors {
            return Err("Expected a parse error, but parsing succeeded".to_string());
        }
        let matching = ctx
            .diagnostics
            .diagnostics()
            .iter()
            .any(|d| d.message.contains(self.0));
        if matching {
            Ok(())
        } else {
            Err(format!("Expected a parse error containing '{}'", self.0))
        }
    }
}

/// Expects no regions at all
pub struct NoFolds;

impl Expectable for NoFolds {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        if ctx.regions.is_empty() {
            Ok(())
        } else {
            Err(format!("Expected no regions, but got {}", ctx.regions.len()))
        }
    }
}

/// Expects exactly N regions
pub struct RegionCount(pub usize);

impl Expectable for RegionCount {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        let actual = ctx.regions.len();
        if actual == self.0 {
            Ok(())
        } else {
            Err(format!("Expected {} region(s), but got {}", self.0, actual))
        }
    }
}

/// Expects some region with this placeholder
pub struct Folds(pub &'static str);

impl Expectable for Folds {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        if ctx.regions.iter().any(|r| r.placeholder == self.0) {
            Ok(())
        } else {
            Err(format!("Expected a region folding to {:?}", self.0))
        }
    }
}

/// Expects no region to cover exactly this source text
pub struct NotFolded(pub &'static str);

impl Expectable for NotFolded {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        match ctx.regions.iter().find(|r| ctx.text(r) == self.0) {
            Some(region) => Err(format!(
                "Expected {:?} to stay unfolded, but it folds to {:?}",
                self.0, region.placeholder
            )),
            None => Ok(()),
        }
    }
}

/// Expects the fold request to fail because the index was not ready
pub struct FoldFails;

impl Expectable for FoldFails {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        match &ctx.fold_error {
            Some(FoldError::IndexNotReady) => Ok(()),
            Some(other) => Err(format!("Expected an unready index, but got: {other}")),
            None => Err("Expected folding to fail, but it succeeded".to_string()),
        }
    }
}

/// Expects the region covering this text to start collapsed
pub struct Collapsed(pub &'static str);

impl Expectable for Collapsed {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        Region::at(self.0).collapsed(true).check(ctx)
    }
}

/// Expects the region covering this text to start expanded
pub struct Expanded(pub &'static str);

impl Expectable for Expanded {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        Region::at(self.0).collapsed(false).check(ctx)
    }
}

/// Region expectation with chainable checks
///
/// The region is found by the exact source text it covers.
pub struct Region {
    text: String,
    placeholder: Option<String>,
    collapsed: Option<bool>,
}

impl Region {
    pub fn at(text: &str) -> Self {
        Region {
            text: text.to_string(),
            placeholder: None,
            collapsed: None,
        }
    }

    /// Assert the placeholder text
    pub fn to(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    /// Assert whether the region starts collapsed
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }
}

impl Expectable for Region {
    fn check(&self, ctx: &TestContext) -> Result<(), String> {
        let candidates: Vec<&FoldRegion> = ctx
            .regions
            .iter()
            .filter(|r| ctx.text(r) == self.text)
            .collect();
        if candidates.is_empty() {
            return Err(format!("No region covers {:?}", self.text));
        }

        let found = candidates.iter().find(|r| {
            self.placeholder.as_ref().is_none_or(|p| &r.placeholder == p)
                && self.collapsed.is_none_or(|c| r.collapsed == c)
        });
        match found {
            Some(_) => Ok(()),
            None => {
                let actual: Vec<_> = candidates
                    .iter()
                    .map(|r| format!("{:?} (collapsed: {})", r.placeholder, r.collapsed))
                    .collect();
                Err(format!(
                    "Region at {:?} expected {:?} (collapsed: {:?}), but got {}",
                    self.text,
                    self.placeholder,
                    self.collapsed,
                    actual.join(", ")
                ))
            }
        }
    }
}
