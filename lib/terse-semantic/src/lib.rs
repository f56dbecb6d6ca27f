//! Semantic model for Java sources
//!
//! Binds a parsed file and answers the questions the folding core asks
//! through [`terse_fold::Resolver`]:
//!
//! - `resolve`: the declaration a name, field access, call or `new` refers to
//! - `declared`: the declaration a declarator or parameter introduces
//! - `type_of`: the static type of an expression
//!
//! Library types come from a built-in table of the JDK classes the
//! folding rules care about (`java.lang`, `java.math`, `java.util` and
//! the stream API). Anything outside that table and the file itself is
//! unknown, and questions about it are answered with `None`.
//!
//! ```ignore
//! let model = SemanticModel::build(&parse.tree);
//! let regions = terse_fold::fold_regions(&parse.tree, source, &model, &settings);
//! ```

pub mod binder;
pub mod jdk;
pub mod local_scope;
pub mod model;
pub mod ty;

pub use binder::{Binder, SymbolTable, UserClass};
pub use local_scope::LocalScope;
pub use model::SemanticModel;
pub use ty::TypeScope;
