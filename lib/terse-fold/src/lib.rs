//! # Terse Fold
//!
//! Recognizes verbose Java idioms in a syntax tree and computes fold
//! regions that display them in a compact mathematical notation:
//! `a.add(b).multiply(c)` reads as `(a + b) * c`, `list.get(list.size() - 1)`
//! as `list[-1]`, and a counted loop over a list as `s : list`.
//!
//! The pipeline is
//!
//! 1. [`Recognizer`] turns syntax nodes into [`Expr`]s, asking a host
//!    [`Resolver`] what names refer to and what types expressions have
//! 2. [`simplify`] rewrites the result locally
//! 3. [`format`] renders it to display text
//! 4. [`RegionGenerator`] walks the tree and turns expressions into
//!    [`FoldRegion`]s
//!
//! ## Example
//!
//! ```no_run
//! use terse_fold::{fold_regions, FoldSettings, Resolver};
//! use terse_syntax_tree::SyntaxNode;
//!
//! fn show(tree: &SyntaxNode, source: &str, resolver: &dyn Resolver) {
//!     for region in fold_regions(tree, source, resolver, &FoldSettings::default()) {
//!         println!("{:?} => {}", region.span, region.placeholder);
//!     }
//! }
//! ```

pub mod error;
pub mod expr;
pub mod format;
pub mod known;
pub mod recognizer;
pub mod regions;
pub mod resolver;
pub mod settings;
pub mod simplify;

pub use error::{FoldError, FoldResult};
pub use expr::{Expr, ExprKind, GetStyle, MathFunction, Number, Operator};
pub use format::{format, Formatter};
pub use recognizer::Recognizer;
pub use regions::{fold_regions, try_fold_regions, FoldRegion, RegionGenerator};
pub use resolver::{DeclId, DeclKind, Declaration, JavaType, Resolver};
pub use settings::{is_collapsed_by_default, FoldCategory, FoldSettings};
pub use simplify::simplify;
