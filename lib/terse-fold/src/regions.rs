//! Turning recognized expressions into display regions

use terse_span::{overlaps, Span};
use terse_syntax_tree::helpers::{arguments, node_span, qualifier};
use terse_syntax_tree::{SyntaxNode, SyntaxNodePtr};
use tracing::{debug, trace, warn};

use crate::error::{FoldError, FoldResult};
use crate::expr::{Expr, ExprKind, ForEachParts};
use crate::format::format;
use crate::recognizer::Recognizer;
use crate::resolver::Resolver;
use crate::settings::{is_collapsed_by_default, FoldSettings};
use crate::simplify::simplify;

/// How far a chain segment may be widened looking for a `.`
const DOT_SCAN_LIMIT: isize = 100;

/// A range of source text that can be displayed as shorter text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldRegion {
    pub span: Span,
    pub placeholder: String,
    /// `"<kind>@<start>"` of the expression that produced the region
    pub group: String,
    pub collapsed: bool,
    /// The syntax node the expression was recognized at
    pub node: SyntaxNodePtr,
}

/// Walks a syntax tree and collects fold regions
pub struct RegionGenerator<'a> {
    source: &'a str,
    recognizer: Recognizer<'a>,
    settings: &'a FoldSettings,
}

impl<'a> RegionGenerator<'a> {
    pub fn new(source: &'a str, resolver: &'a dyn Resolver, settings: &'a FoldSettings) -> Self {
        Self {
            source,
            recognizer: Recognizer::new(source, resolver),
            settings,
        }
    }

    /// All regions under `root`, sorted by start offset
    pub fn generate(&self, root: &SyntaxNode) -> FoldResult<Vec<FoldRegion>> {
        let mut regions = Vec::new();
        self.visit(root, &mut regions)?;
        regions.sort_by_key(|r| (r.span.start, r.span.end));
        Ok(regions)
    }

    fn visit(&self, node: &SyntaxNode, out: &mut Vec<FoldRegion>) -> FoldResult<()> {
        let expr = self.recognizer.recognize(node, false)?.map(simplify);

        let mut recurse = true;
        if let Some(expr) = &expr {
            if let Some(span) = &expr.span {
                let text = format(expr);
                let source = self.source.get(span.clone()).unwrap_or_default();
                if !same_ignoring_whitespace(&text, source) {
                    self.emit(node, expr, span, text, out)?;
                    recurse = *span != node_span(node);
                }
            }
        }

        if recurse {
            for child in node.children() {
                self.visit(&child, out)?;
            }
        }
        Ok(())
    }

    fn emit(
        &self,
        node: &SyntaxNode,
        expr: &Expr,
        span: &Span,
        text: String,
        out: &mut Vec<FoldRegion>,
    ) -> FoldResult<()> {
        let region = |span: Span, placeholder: String| FoldRegion {
            group: format!("{}@{}", expr.kind_name(), span.start),
            collapsed: is_collapsed_by_default(expr, self.settings),
            node: SyntaxNodePtr::new(node),
            span,
            placeholder,
        };

        match &expr.kind {
            ExprKind::ForEachStatement(ForEachParts {
                header,
                declaration,
                ..
            })
            | ExprKind::ForEachIndexedStatement(ForEachParts {
                header,
                declaration,
                ..
            }) => {
                push(out, region(header.clone(), text));
                push(out, region(declaration.clone(), String::new()));
            }
            ExprKind::Getter {
                property, accessor, ..
            } => {
                push(out, region(accessor.clone(), property.clone()));
                if let Some(q) = qualifier(node) {
                    self.visit(&q, out)?;
                }
            }
            ExprKind::Setter {
                property,
                value,
                accessor,
                ..
            } => {
                let placeholder = format!("{property} = {}", format(value));
                push(out, region(accessor.clone(), placeholder));
                if let Some(q) = qualifier(node) {
                    self.visit(&q, out)?;
                }
            }
            ExprKind::StreamExpression => {
                let (segment, placeholder) = self.widen_to_dots(span);
                push(out, region(segment, placeholder));
            }
            ExprKind::Collect { collector_span, .. } => {
                push(out, region(span.start..collector_span.start, String::new()));
                push(out, region(collector_span.end..span.end, String::new()));
                // the collector's own argument may still fold
                for argument in arguments(node) {
                    self.visit(&argument, out)?;
                }
            }
            _ => push(out, region(span.clone(), text)),
        }
        Ok(())
    }

    /// Widen a chain segment to the `.` before and after it
    ///
    /// When the segment sits directly between two dots both are swallowed
    /// and the placeholder keeps one of them.
    fn widen_to_dots(&self, span: &Span) -> (Span, String) {
        let before = find_dot(self.source, span.start as isize, -1);
        let after = find_dot(self.source, span.end as isize, 1) + 1;
        let tight = after == 1;

        let start = (span.start as isize + before).max(0) as usize;
        let end = if tight { span.end + 1 } else { span.end };
        let placeholder = if tight { "." } else { "" };
        (start..end.min(self.source.len()), placeholder.to_string())
    }
}

/// Offset from `position` to the nearest `.` in direction `step`
fn find_dot(source: &str, mut position: isize, step: isize) -> isize {
    let bytes = source.as_bytes();
    let len = bytes.len() as isize;
    let mut offset: isize = 0;
    while offset.abs() < DOT_SCAN_LIMIT && position > 0 && position < len {
        if bytes[position as usize] == b'.' {
            break;
        }
        offset += step;
        position += step;
    }
    offset
}

fn same_ignoring_whitespace(a: &str, b: &str) -> bool {
    a.chars()
        .filter(|c| !c.is_whitespace())
        .eq(b.chars().filter(|c| !c.is_whitespace()))
}

fn push(out: &mut Vec<FoldRegion>, region: FoldRegion) {
    if region.span.is_empty() {
        return;
    }
    if out.iter().any(|r| overlaps(&r.span, &region.span)) {
        trace!(group = %region.group, "dropping overlapping region");
        return;
    }
    debug!(
        span = ?region.span,
        placeholder = %region.placeholder,
        group = %region.group,
        "emitting fold region"
    );
    out.push(region);
}

/// Fold regions for a whole tree
///
/// An index-not-ready condition anywhere yields no regions at all; the
/// caller may retry later.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn fold_regions(
    root: &SyntaxNode,
    source: &str,
    resolver: &dyn Resolver,
    settings: &FoldSettings,
) -> Vec<FoldRegion> {
    match try_fold_regions(root, source, resolver, settings) {
        Ok(regions) => regions,
        Err(FoldError::IndexNotReady) => {
            warn!("symbol index not ready, no fold regions produced");
            Vec::new()
        }
        Err(err) => {
            warn!(%err, "folding aborted");
            Vec::new()
        }
    }
}

/// Like [`fold_regions`], but reports why a request was aborted
#[tracing::instrument(skip_all)]
pub fn try_fold_regions(
    root: &SyntaxNode,
    source: &str,
    resolver: &dyn Resolver,
    settings: &FoldSettings,
) -> FoldResult<Vec<FoldRegion>> {
    RegionGenerator::new(source, resolver, settings).generate(root)
}
