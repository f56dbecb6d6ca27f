//! Local rewrites applied to a recognized expression before formatting

use terse_span::cover;

use crate::expr::{Expr, ExprKind, Operator};

/// Simplify an expression bottom-up
///
/// Idempotent: simplifying a simplified expression changes nothing.
pub fn simplify(expr: Expr) -> Expr {
    let expr = expr.map_children(&mut simplify);
    let Expr {
        kind,
        span,
        element,
    } = expr;

    match kind {
        // a single-operand operation is its operand
        ExprKind::Operation { mut operands, .. } if operands.len() == 1 => {
            let only = operands.remove(0);
            match span {
                Some(_) => only.respanned(span, element),
                None => only,
            }
        }
        ExprKind::Operation { op, operands } if operands.len() >= 3 => match op.tail() {
            Some(tail) => collapse_assignment(op, tail, operands, span, element),
            None => Expr {
                kind: Expr::operation(op, operands),
                span,
                element,
            },
        },
        ExprKind::ForStatement {
            variable,
            start,
            end,
            end_inclusive,
            bounds_only,
        } => {
            let (end, end_inclusive) = normalize_bound(*end, end_inclusive);
            let header = Expr {
                kind: ExprKind::ForStatement {
                    variable,
                    start,
                    end: Box::new(end),
                    end_inclusive,
                    bounds_only,
                },
                span,
                element,
            };
            // a body that ignores the index only needs the bound pair
            match header.bounds() {
                Some(range) if bounds_only => range,
                _ => header,
            }
        }
        kind => Expr {
            kind,
            span,
            element,
        },
    }
}

/// `x OP= a, b, c` becomes `x OP= (a TAIL b TAIL c)`
fn collapse_assignment(
    op: Operator,
    tail: Operator,
    mut operands: Vec<Expr>,
    span: Option<terse_span::Span>,
    element: Option<terse_syntax_tree::SyntaxNodePtr>,
) -> Expr {
    let target = operands.remove(0);
    let tail_span = operands
        .iter()
        .map(|e| e.span.clone())
        .reduce(|a, b| match (a, b) {
            (Some(a), Some(b)) => Some(cover(&a, &b)),
            _ => None,
        })
        .flatten();

    let tail = Expr {
        kind: Expr::operation(tail, operands),
        span: tail_span,
        element: None,
    };

    Expr {
        kind: Expr::operation(op, vec![target, tail]),
        span,
        element,
    }
}

/// `i < n + 1` is `i <= n`, and `i <= n - 1` is `i < n`
fn normalize_bound(end: Expr, inclusive: bool) -> (Expr, bool) {
    let shifted = |op: Operator| match &end.kind {
        ExprKind::Operation { op: o, operands }
            if *o == op
                && operands.len() == 2
                && operands[1].as_number().is_some_and(|n| n.is_integer(1)) =>
        {
            Some(operands[0].clone())
        }
        _ => None,
    };

    if !inclusive {
        if let Some(bound) = shifted(Operator::Add) {
            return (bound, true);
        }
    } else if let Some(bound) = shifted(Operator::Subtract) {
        return (bound, false);
    }
    (end, inclusive)
}

impl Expr {
    /// The `start ≤ i < end` bounds of a counted loop
    pub fn bounds(&self) -> Option<Expr> {
        match &self.kind {
            ExprKind::ForStatement {
                variable,
                start,
                end,
                end_inclusive,
                ..
            } => Some(Expr {
                kind: ExprKind::Range {
                    subject: variable.clone(),
                    start: start.clone(),
                    start_inclusive: true,
                    end: end.clone(),
                    end_inclusive: *end_inclusive,
                },
                span: self.span.clone(),
                element: self.element.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::MathFunction;
    use crate::format::format;

    fn var(name: &str) -> Expr {
        Expr::detached(ExprKind::Variable {
            name: name.to_string(),
            copy: false,
        })
    }

    fn op(op: Operator, operands: Vec<Expr>) -> Expr {
        Expr::detached(Expr::operation(op, operands))
    }

    #[test]
    fn test_assignment_tail_is_rewrapped() {
        let e = op(Operator::AddAssign, vec![var("x"), var("y"), var("z")]);
        let simplified = simplify(e);
        assert_eq!(format(&simplified), "x += y + z");

        let e = op(Operator::SubtractAssign, vec![var("x"), var("y"), var("z")]);
        assert_eq!(format(&simplify(e)), "x -= y + z");

        let e = op(Operator::DivideAssign, vec![var("x"), var("y"), var("z")]);
        assert_eq!(format(&simplify(e)), "x /= y * z");
    }

    #[test]
    fn test_single_operand_collapses_and_keeps_the_range() {
        let mut e = op(
            Operator::Add,
            vec![Expr::detached(Expr::function(MathFunction::Sqrt, vec![var("x")]))],
        );
        e.span = Some(4..20);
        let simplified = simplify(e);
        assert_eq!(simplified.span, Some(4..20));
        assert_eq!(format(&simplified), "√x");
    }

    #[test]
    fn test_for_bounds_are_normalized() {
        let header = |end, end_inclusive| {
            Expr::detached(ExprKind::ForStatement {
                variable: Box::new(var("i")),
                start: Box::new(Expr::number(0)),
                end: Box::new(end),
                end_inclusive,
                bounds_only: false,
            })
        };
        let plus_one = op(Operator::Add, vec![var("n"), Expr::number(1)]);
        assert_eq!(format(&simplify(header(plus_one, false))), "i ∈ [0, n]");

        let minus_one = op(Operator::Subtract, vec![var("n"), Expr::number(1)]);
        assert_eq!(format(&simplify(header(minus_one, true))), "i ∈ [0, n)");

        let bounds = simplify(header(var("n"), false)).bounds().unwrap();
        assert_eq!(format(&bounds), "0 ≤ i < n");
    }

    #[test]
    fn test_loop_that_ignores_its_index_becomes_a_range() {
        let mut header = Expr::detached(ExprKind::ForStatement {
            variable: Box::new(var("i")),
            start: Box::new(Expr::number(0)),
            end: Box::new(op(Operator::Add, vec![var("n"), Expr::number(1)])),
            end_inclusive: false,
            bounds_only: true,
        });
        header.span = Some(5..25);
        let simplified = simplify(header);
        assert_eq!(simplified.kind_name(), "Range");
        assert_eq!(simplified.span, Some(5..25));
        assert_eq!(format(&simplified), "0 ≤ i ≤ n");
        assert_eq!(simplify(simplified.clone()), simplified);
    }

    #[test]
    fn test_idempotent() {
        let samples = vec![
            op(Operator::AddAssign, vec![var("x"), var("y"), var("z")]),
            op(
                Operator::Multiply,
                vec![op(Operator::Add, vec![var("a")]), var("b")],
            ),
            Expr::detached(ExprKind::ForStatement {
                variable: Box::new(var("i")),
                start: Box::new(Expr::number(0)),
                end: Box::new(op(
                    Operator::Add,
                    vec![op(Operator::Add, vec![var("n"), Expr::number(1)]), Expr::number(1)],
                )),
                end_inclusive: false,
                bounds_only: false,
            }),
        ];
        for e in samples {
            let once = simplify(e);
            let twice = simplify(once.clone());
            assert_eq!(format(&once), format(&twice));
            assert_eq!(once, twice);
        }
    }
}
