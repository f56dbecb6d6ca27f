use std::collections::BTreeSet;
use std::fmt;

use crate::expr::{Expr, ExprKind, Operator};

/// Independent toggles deciding which folds start out collapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FoldCategory {
    Arithmetic,
    Comparing,
    Slicing,
    Concatenation,
    Range,
    Get,
    Check,
    Cast,
    VariableDeclaration,
    GettersSetters,
}

impl FoldCategory {
    pub const ALL: [FoldCategory; 10] = [
        FoldCategory::Arithmetic,
        FoldCategory::Comparing,
        FoldCategory::Slicing,
        FoldCategory::Concatenation,
        FoldCategory::Range,
        FoldCategory::Get,
        FoldCategory::Check,
        FoldCategory::Cast,
        FoldCategory::VariableDeclaration,
        FoldCategory::GettersSetters,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FoldCategory::Arithmetic => "arithmetic",
            FoldCategory::Comparing => "comparing",
            FoldCategory::Slicing => "slicing",
            FoldCategory::Concatenation => "concatenation",
            FoldCategory::Range => "range",
            FoldCategory::Get => "get",
            FoldCategory::Check => "check",
            FoldCategory::Cast => "cast",
            FoldCategory::VariableDeclaration => "variable-declaration",
            FoldCategory::GettersSetters => "getters-setters",
        }
    }

    /// Category an expression belongs to, if any
    pub fn of(expr: &Expr) -> Option<FoldCategory> {
        Some(match &expr.kind {
            ExprKind::Operation { op, .. } => match op {
                Operator::Equal
                | Operator::NotEqual
                | Operator::Less
                | Operator::LessEqual
                | Operator::Greater
                | Operator::GreaterEqual => FoldCategory::Comparing,
                Operator::Append => FoldCategory::Concatenation,
                _ => FoldCategory::Arithmetic,
            },
            ExprKind::Function { .. } => FoldCategory::Arithmetic,
            ExprKind::Slice { .. } => FoldCategory::Slicing,
            ExprKind::InterpolatedString(_)
            | ExprKind::AddAssignForCollection { .. }
            | ExprKind::RemoveAssignForCollection { .. } => FoldCategory::Concatenation,
            ExprKind::Range { .. }
            | ExprKind::ForStatement { .. }
            | ExprKind::ForEachStatement(_)
            | ExprKind::ForEachIndexedStatement(_) => FoldCategory::Range,
            ExprKind::Get { .. }
            | ExprKind::ArrayGet { .. }
            | ExprKind::Put { .. }
            | ExprKind::ListLiteral(_)
            | ExprKind::ArrayLiteral(_) => FoldCategory::Get,
            ExprKind::Elvis { .. } | ExprKind::ShortElvis { .. } => FoldCategory::Check,
            ExprKind::TypeCast { .. } => FoldCategory::Cast,
            ExprKind::VariableDeclaration { .. } => FoldCategory::VariableDeclaration,
            ExprKind::Getter { .. } | ExprKind::Setter { .. } => FoldCategory::GettersSetters,
            _ => return None,
        })
    }
}

impl fmt::Display for FoldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of categories whose folds start out collapsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldSettings {
    enabled: BTreeSet<FoldCategory>,
}

impl Default for FoldSettings {
    fn default() -> Self {
        Self {
            enabled: FoldCategory::ALL.into_iter().collect(),
        }
    }
}

impl FoldSettings {
    /// Every category disabled
    pub fn none() -> Self {
        Self {
            enabled: BTreeSet::new(),
        }
    }

    pub fn with(mut self, category: FoldCategory) -> Self {
        self.enabled.insert(category);
        self
    }

    pub fn without(mut self, category: FoldCategory) -> Self {
        self.enabled.remove(&category);
        self
    }

    pub fn is_enabled(&self, category: FoldCategory) -> bool {
        self.enabled.contains(&category)
    }
}

/// Whether a region for `expr` should start out collapsed
pub fn is_collapsed_by_default(expr: &Expr, settings: &FoldSettings) -> bool {
    expr.is_collapsible() && FoldCategory::of(expr).is_some_and(|c| settings.is_enabled(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Expr {
        Expr::detached(ExprKind::Variable {
            name: name.to_string(),
            copy: false,
        })
    }

    #[test]
    fn test_categories() {
        let add = Expr::detached(Expr::operation(Operator::Add, vec![var("a"), var("b")]));
        let less = Expr::detached(Expr::operation(Operator::Less, vec![var("a"), var("b")]));
        assert_eq!(FoldCategory::of(&add), Some(FoldCategory::Arithmetic));
        assert_eq!(FoldCategory::of(&less), Some(FoldCategory::Comparing));
        assert_eq!(FoldCategory::of(&var("a")), None);
    }

    #[test]
    fn test_collapse_follows_settings() {
        let add = Expr::detached(Expr::operation(Operator::Add, vec![var("a"), var("b")]));
        assert!(is_collapsed_by_default(&add, &FoldSettings::default()));
        assert!(!is_collapsed_by_default(
            &add,
            &FoldSettings::default().without(FoldCategory::Arithmetic)
        ));
        assert!(is_collapsed_by_default(
            &add,
            &FoldSettings::none().with(FoldCategory::Arithmetic)
        ));
    }

    #[test]
    fn test_synthetic_is_never_collapsed() {
        let synthetic = Expr::detached(ExprKind::Synthetic {
            text: "foo()".to_string(),
            children: vec![],
            precedence: crate::expr::ATOM,
        });
        assert!(!is_collapsed_by_default(&synthetic, &FoldSettings::default()));
    }
}
