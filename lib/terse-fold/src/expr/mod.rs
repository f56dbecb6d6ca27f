//! The symbolic expression model every recognizer rule produces

mod operator;

pub use operator::{java_binary_precedence, MathFunction, Operator, ASSIGNMENT, ATOM, CONDITIONAL, LAMBDA, UNARY};

use std::fmt;

use terse_span::Span;
use terse_syntax_tree::helpers::node_span;
use terse_syntax_tree::{SyntaxNode, SyntaxNodePtr};

/// A decoded numeric literal
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Integer(i64),
    Decimal(f64),
}

impl Number {
    pub fn is_integer(&self, value: i64) -> bool {
        matches!(self, Number::Integer(v) if *v == value)
    }

    pub fn negated(self) -> Number {
        match self {
            Number::Integer(v) => Number::Integer(v.wrapping_neg()),
            Number::Decimal(v) => Number::Decimal(-v),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Decimal(a), Number::Decimal(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(v) => write!(f, "{v}"),
            Number::Decimal(v) => write!(f, "{v}"),
        }
    }
}

/// How an element access was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GetStyle {
    Normal,
    First,
    Last,
}

/// Parts shared by the element and index+element counted-loop forms
#[derive(Debug, Clone)]
pub struct ForEachParts {
    pub index: String,
    pub element: String,
    pub collection: Box<Expr>,
    /// From the loop init to the closing parenthesis of the header
    pub header: Span,
    /// The element declaration statement at the top of the body
    pub declaration: Span,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Number(Number),
    String(String),
    Character(char),
    /// A name; `copy` marks a display-only copy that is not a binding site
    Variable {
        name: String,
        copy: bool,
    },
    Operation {
        op: Operator,
        operands: Vec<Expr>,
    },
    Function {
        func: MathFunction,
        operands: Vec<Expr>,
    },
    Get {
        target: Box<Expr>,
        index: Box<Expr>,
        style: GetStyle,
    },
    ArrayGet {
        target: Box<Expr>,
        style: GetStyle,
    },
    /// Target, then optional start and end positions
    Slice {
        operands: Vec<Expr>,
    },
    Put {
        target: Box<Expr>,
        key: Box<Expr>,
        value: Box<Expr>,
    },
    AddAssignForCollection {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    RemoveAssignForCollection {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    ListLiteral(Vec<Expr>),
    ArrayLiteral(Vec<Expr>),
    Range {
        subject: Box<Expr>,
        start: Box<Expr>,
        start_inclusive: bool,
        end: Box<Expr>,
        end_inclusive: bool,
    },
    ForStatement {
        variable: Box<Expr>,
        start: Box<Expr>,
        end: Box<Expr>,
        end_inclusive: bool,
        /// The body never reads the loop variable
        bounds_only: bool,
    },
    ForEachStatement(ForEachParts),
    ForEachIndexedStatement(ForEachParts),
    Elvis {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
        elided: Vec<Span>,
    },
    ShortElvis {
        condition: Box<Expr>,
        body: Box<Expr>,
        elided: Vec<Span>,
    },
    VariableDeclaration {
        is_final: bool,
    },
    Getter {
        qualifier: Option<Box<Expr>>,
        property: String,
        /// From the method identifier to the end of the call
        accessor: Span,
    },
    Setter {
        qualifier: Option<Box<Expr>>,
        property: String,
        value: Box<Expr>,
        accessor: Span,
    },
    TypeCast {
        object: Box<Expr>,
    },
    InterpolatedString(Vec<Expr>),
    Collect {
        /// Source text of the collector call, e.g. `toList()`
        collector: String,
        collector_span: Span,
    },
    ArrayStream {
        array: Box<Expr>,
    },
    StreamExpression,
    /// A node with no symbolic meaning of its own
    ///
    /// Renders as its verbatim text with the formatted text of `children`
    /// substituted at their ranges.
    Synthetic {
        text: String,
        children: Vec<Expr>,
        precedence: u8,
    },
}

/// A recognized expression with the source range it replaces
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Option<Span>,
    pub element: Option<SyntaxNodePtr>,
}

impl Expr {
    /// An expression covering all of `node`
    pub fn new(kind: ExprKind, node: &SyntaxNode) -> Self {
        Self {
            kind,
            span: Some(node_span(node)),
            element: Some(SyntaxNodePtr::new(node)),
        }
    }

    /// An expression originating at `node` but covering only `span`
    pub fn spanned(kind: ExprKind, span: Span, node: &SyntaxNode) -> Self {
        Self {
            kind,
            span: Some(span),
            element: Some(SyntaxNodePtr::new(node)),
        }
    }

    /// A helper expression with no source of its own, e.g. the `10` of `10ⁿ`
    pub fn detached(kind: ExprKind) -> Self {
        Self {
            kind,
            span: None,
            element: None,
        }
    }

    pub fn number(value: i64) -> Self {
        Self::detached(ExprKind::Number(Number::Integer(value)))
    }

    pub fn operation(op: Operator, operands: Vec<Expr>) -> ExprKind {
        ExprKind::Operation { op, operands }
    }

    pub fn function(func: MathFunction, operands: Vec<Expr>) -> ExprKind {
        ExprKind::Function { func, operands }
    }

    /// The same expression over another source range
    pub fn respanned(mut self, span: Option<Span>, element: Option<SyntaxNodePtr>) -> Self {
        self.span = span;
        self.element = element;
        self
    }

    pub fn as_number(&self) -> Option<Number> {
        match &self.kind {
            ExprKind::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self.kind, ExprKind::Variable { .. })
    }

    pub fn is_operation(&self, op: Operator) -> bool {
        matches!(&self.kind, ExprKind::Operation { op: o, .. } if *o == op)
    }

    /// Variant name used in region group keys and diagnostics
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            ExprKind::Number(_) => "NumberLiteral",
            ExprKind::String(_) => "StringLiteral",
            ExprKind::Character(_) => "CharacterLiteral",
            ExprKind::Variable { .. } => "Variable",
            ExprKind::Operation { .. } => "Operation",
            ExprKind::Function { .. } => "Function",
            ExprKind::Get { .. } => "Get",
            ExprKind::ArrayGet { .. } => "ArrayGet",
            ExprKind::Slice { .. } => "Slice",
            ExprKind::Put { .. } => "Put",
            ExprKind::AddAssignForCollection { .. } => "AddAssignForCollection",
            ExprKind::RemoveAssignForCollection { .. } => "RemoveAssignForCollection",
            ExprKind::ListLiteral(_) => "ListLiteral",
            ExprKind::ArrayLiteral(_) => "ArrayLiteral",
            ExprKind::Range { .. } => "Range",
            ExprKind::ForStatement { .. } => "ForStatement",
            ExprKind::ForEachStatement(_) => "ForEachStatement",
            ExprKind::ForEachIndexedStatement(_) => "ForEachIndexedStatement",
            ExprKind::Elvis { .. } => "ElvisExpression",
            ExprKind::ShortElvis { .. } => "ShortElvisExpression",
            ExprKind::VariableDeclaration { .. } => "VariableDeclaration",
            ExprKind::Getter { .. } => "Getter",
            ExprKind::Setter { .. } => "Setter",
            ExprKind::TypeCast { .. } => "TypeCast",
            ExprKind::InterpolatedString(_) => "InterpolatedString",
            ExprKind::Collect { .. } => "Collect",
            ExprKind::ArrayStream { .. } => "ArrayStream",
            ExprKind::StreamExpression => "StreamExpression",
            ExprKind::Synthetic { .. } => "Synthetic",
        }
    }

    /// Binding strength of the rendered text
    pub fn precedence(&self) -> u8 {
        match &self.kind {
            ExprKind::Operation { op, .. } => op.precedence(),
            ExprKind::Function {
                func: MathFunction::Negate | MathFunction::Not,
                ..
            } => UNARY,
            ExprKind::Number(n) if matches!(n, Number::Integer(v) if *v < 0) => UNARY,
            ExprKind::TypeCast { object } => object.precedence(),
            ExprKind::Range { .. } => Operator::Less.precedence(),
            ExprKind::Elvis { .. } => CONDITIONAL,
            ExprKind::Put { .. }
            | ExprKind::Setter { .. }
            | ExprKind::AddAssignForCollection { .. }
            | ExprKind::RemoveAssignForCollection { .. } => ASSIGNMENT,
            ExprKind::Synthetic { precedence, .. } => *precedence,
            _ => ATOM,
        }
    }

    /// Whether a region showing this expression may start out collapsed
    pub fn is_collapsible(&self) -> bool {
        !matches!(
            self.kind,
            ExprKind::Synthetic { .. }
                | ExprKind::Variable { .. }
                | ExprKind::StreamExpression
                | ExprKind::Collect { .. }
                | ExprKind::ArrayStream { .. }
        )
    }

    /// Direct sub-expressions in source order
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::Number(_)
            | ExprKind::String(_)
            | ExprKind::Character(_)
            | ExprKind::Variable { .. }
            | ExprKind::VariableDeclaration { .. }
            | ExprKind::Collect { .. }
            | ExprKind::StreamExpression => Vec::new(),
            ExprKind::Operation { operands, .. }
            | ExprKind::Function { operands, .. }
            | ExprKind::Slice { operands }
            | ExprKind::ListLiteral(operands)
            | ExprKind::ArrayLiteral(operands)
            | ExprKind::InterpolatedString(operands)
            | ExprKind::Synthetic {
                children: operands, ..
            } => operands.iter().collect(),
            ExprKind::Get { target, index, .. } => vec![target, index],
            ExprKind::ArrayGet { target, .. } => vec![target],
            ExprKind::Put { target, key, value } => vec![target, key, value],
            ExprKind::AddAssignForCollection { target, value }
            | ExprKind::RemoveAssignForCollection { target, value } => vec![target, value],
            ExprKind::Range {
                subject, start, end, ..
            } => vec![start, subject, end],
            ExprKind::ForStatement {
                variable, start, end, ..
            } => vec![variable, start, end],
            ExprKind::ForEachStatement(parts) | ExprKind::ForEachIndexedStatement(parts) => {
                vec![&parts.collection]
            }
            ExprKind::Elvis {
                condition,
                then_branch,
                else_branch,
                ..
            } => vec![condition, then_branch, else_branch],
            ExprKind::ShortElvis { condition, body, .. } => vec![condition, body],
            ExprKind::Getter { qualifier, .. } => qualifier.iter().map(|q| q.as_ref()).collect(),
            ExprKind::Setter {
                qualifier, value, ..
            } => qualifier
                .iter()
                .map(|q| q.as_ref())
                .chain(std::iter::once(value.as_ref()))
                .collect(),
            ExprKind::TypeCast { object } => vec![object],
            ExprKind::ArrayStream { array } => vec![array],
        }
    }

    /// Rebuild with every direct sub-expression passed through `f`
    pub fn map_children(self, f: &mut impl FnMut(Expr) -> Expr) -> Expr {
        let Expr {
            kind,
            span,
            element,
        } = self;
        let kind = match kind {
            ExprKind::Operation { op, operands } => ExprKind::Operation {
                op,
                operands: operands.into_iter().map(&mut *f).collect(),
            },
            ExprKind::Function { func, operands } => ExprKind::Function {
                func,
                operands: operands.into_iter().map(&mut *f).collect(),
            },
            ExprKind::Slice { operands } => ExprKind::Slice {
                operands: operands.into_iter().map(&mut *f).collect(),
            },
            ExprKind::ListLiteral(items) => {
                ExprKind::ListLiteral(items.into_iter().map(&mut *f).collect())
            }
            ExprKind::ArrayLiteral(items) => {
                ExprKind::ArrayLiteral(items.into_iter().map(&mut *f).collect())
            }
            ExprKind::InterpolatedString(parts) => {
                ExprKind::InterpolatedString(parts.into_iter().map(&mut *f).collect())
            }
            ExprKind::Synthetic {
                text,
                children,
                precedence,
            } => ExprKind::Synthetic {
                text,
                children: children.into_iter().map(&mut *f).collect(),
                precedence,
            },
            ExprKind::Get {
                target,
                index,
                style,
            } => ExprKind::Get {
                target: map_box(target, f),
                index: map_box(index, f),
                style,
            },
            ExprKind::ArrayGet { target, style } => ExprKind::ArrayGet {
                target: map_box(target, f),
                style,
            },
            ExprKind::Put { target, key, value } => ExprKind::Put {
                target: map_box(target, f),
                key: map_box(key, f),
                value: map_box(value, f),
            },
            ExprKind::AddAssignForCollection { target, value } => {
                ExprKind::AddAssignForCollection {
                    target: map_box(target, f),
                    value: map_box(value, f),
                }
            }
            ExprKind::RemoveAssignForCollection { target, value } => {
                ExprKind::RemoveAssignForCollection {
                    target: map_box(target, f),
                    value: map_box(value, f),
                }
            }
            ExprKind::Range {
                subject,
                start,
                start_inclusive,
                end,
                end_inclusive,
            } => ExprKind::Range {
                subject: map_box(subject, f),
                start: map_box(start, f),
                start_inclusive,
                end: map_box(end, f),
                end_inclusive,
            },
            ExprKind::ForStatement {
                variable,
                start,
                end,
                end_inclusive,
                bounds_only,
            } => ExprKind::ForStatement {
                variable: map_box(variable, f),
                start: map_box(start, f),
                end: map_box(end, f),
                end_inclusive,
                bounds_only,
            },
            ExprKind::ForEachStatement(parts) => ExprKind::ForEachStatement(ForEachParts {
                collection: map_box(parts.collection, f),
                ..parts
            }),
            ExprKind::ForEachIndexedStatement(parts) => {
                ExprKind::ForEachIndexedStatement(ForEachParts {
                    collection: map_box(parts.collection, f),
                    ..parts
                })
            }
            ExprKind::Elvis {
                condition,
                then_branch,
                else_branch,
                elided,
            } => ExprKind::Elvis {
                condition: map_box(condition, f),
                then_branch: map_box(then_branch, f),
                else_branch: map_box(else_branch, f),
                elided,
            },
            ExprKind::ShortElvis {
                condition,
                body,
                elided,
            } => ExprKind::ShortElvis {
                condition: map_box(condition, f),
                body: map_box(body, f),
                elided,
            },
            ExprKind::Getter {
                qualifier,
                property,
                accessor,
            } => ExprKind::Getter {
                qualifier: qualifier.map(|q| map_box(q, f)),
                property,
                accessor,
            },
            ExprKind::Setter {
                qualifier,
                property,
                value,
                accessor,
            } => ExprKind::Setter {
                qualifier: qualifier.map(|q| map_box(q, f)),
                property,
                value: map_box(value, f),
                accessor,
            },
            ExprKind::TypeCast { object } => ExprKind::TypeCast {
                object: map_box(object, f),
            },
            ExprKind::ArrayStream { array } => ExprKind::ArrayStream {
                array: map_box(array, f),
            },
            leaf => leaf,
        };
        Expr {
            kind,
            span,
            element,
        }
    }

    /// Copy of an Operation or Function over a new operand list
    pub fn with_operands(&self, operands: Vec<Expr>) -> Option<Expr> {
        let kind = match &self.kind {
            ExprKind::Operation { op, .. } => ExprKind::Operation { op: *op, operands },
            ExprKind::Function { func, .. } => ExprKind::Function {
                func: *func,
                operands,
            },
            _ => return None,
        };
        Some(Expr {
            kind,
            span: self.span.clone(),
            element: self.element.clone(),
        })
    }
}

fn map_box(e: Box<Expr>, f: &mut impl FnMut(Expr) -> Expr) -> Box<Expr> {
    Box::new(f(*e))
}

fn all_eq(a: &[Expr], b: &[Expr]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}

/// Structural equality: same variant and equal operands, ignoring source ranges
///
/// Variables compare by name. Rules that need declaration identity, such
/// as the null guard and the for-each loop, compare resolved declarations.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        use ExprKind as K;
        match (&self.kind, &other.kind) {
            (K::Number(a), K::Number(b)) => a == b,
            (K::String(a), K::String(b)) => a == b,
            (K::Character(a), K::Character(b)) => a == b,
            // by name only, so a shadowing local equals the binding it hides
            (K::Variable { name: a, .. }, K::Variable { name: b, .. }) => a == b,
            (K::Operation { op: a, operands: x }, K::Operation { op: b, operands: y }) => {
                a == b && all_eq(x, y)
            }
            (K::Function { func: a, operands: x }, K::Function { func: b, operands: y }) => {
                a == b && all_eq(x, y)
            }
            (K::Synthetic { text: a, .. }, K::Synthetic { text: b, .. }) => {
                a.split_whitespace().eq(b.split_whitespace())
            }
            (K::VariableDeclaration { is_final: a }, K::VariableDeclaration { is_final: b }) => a == b,
            (K::StreamExpression, K::StreamExpression) => true,
            (K::Collect { collector: a, .. }, K::Collect { collector: b, .. }) => a == b,
            (
                K::Getter {
                    property: a,
                    ..
                },
                K::Getter {
                    property: b,
                    ..
                },
            ) => a == b && self.children() == other.children(),
            (
                K::Setter {
                    property: a,
                    ..
                },
                K::Setter {
                    property: b,
                    ..
                },
            ) => a == b && self.children() == other.children(),
            (K::Get { style: a, .. }, K::Get { style: b, .. })
            | (K::ArrayGet { style: a, .. }, K::ArrayGet { style: b, .. }) => {
                a == b && self.children() == other.children()
            }
            (
                K::Range {
                    start_inclusive: a1,
                    end_inclusive: a2,
                    ..
                },
                K::Range {
                    start_inclusive: b1,
                    end_inclusive: b2,
                    ..
                },
            ) => a1 == b1 && a2 == b2 && self.children() == other.children(),
            (
                K::ForStatement {
                    end_inclusive: a1,
                    bounds_only: a2,
                    ..
                },
                K::ForStatement {
                    end_inclusive: b1,
                    bounds_only: b2,
                    ..
                },
            ) => a1 == b1 && a2 == b2 && self.children() == other.children(),
            (K::ForEachStatement(a), K::ForEachStatement(b))
            | (K::ForEachIndexedStatement(a), K::ForEachIndexedStatement(b)) => {
                a.index == b.index && a.element == b.element && a.collection == b.collection
            }
            (a, b) if std::mem::discriminant(a) == std::mem::discriminant(b) => {
                self.children() == other.children()
            }
            _ => false,
        }
    }
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
    fn test_equality_ignores_spans() {
        let mut a = var("x");
        a.span = Some(3..4);
        let b = var("x");
        assert_eq!(a, b);
        assert_ne!(var("x"), var("y"));
    }

    #[test]
    fn test_variables_compare_by_name() {
        let copied = Expr::detached(ExprKind::Variable {
            name: "x".to_string(),
            copy: true,
        });
        assert_eq!(copied, var("x"));
        assert_ne!(copied, var("y"));
    }

    #[test]
    fn test_equality_is_structural() {
        let sum = |l: &str, r: &str| Expr::detached(Expr::operation(Operator::Add, vec![var(l), var(r)]));
        assert_eq!(sum("a", "b"), sum("a", "b"));
        assert_ne!(sum("a", "b"), sum("b", "a"));
        assert_ne!(
            sum("a", "b"),
            Expr::detached(Expr::operation(Operator::Subtract, vec![var("a"), var("b")]))
        );
    }

    #[test]
    fn test_integer_and_decimal_numbers_differ() {
        assert_ne!(Number::Integer(1), Number::Decimal(1.0));
        assert!(Number::Integer(0).is_integer(0));
        assert!(!Number::Decimal(0.0).is_integer(0));
        assert_eq!(Number::Integer(2).negated(), Number::Integer(-2));
    }

    #[test]
    fn test_with_operands_keeps_the_operator() {
        let sum = Expr::detached(Expr::operation(Operator::Add, vec![var("a"), var("b")]));
        let rebuilt = sum.with_operands(vec![var("c"), var("d")]).unwrap();
        assert!(rebuilt.is_operation(Operator::Add));
        assert_eq!(rebuilt.children().len(), 2);
        assert!(var("a").with_operands(vec![]).is_none());
    }
}
