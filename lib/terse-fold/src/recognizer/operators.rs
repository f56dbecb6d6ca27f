use terse_syntax_tree::helpers::{
    arguments, member_name_text, node_span, operand, operands, operator, operator_kind, qualifier,
    sides, token_span,
};
use terse_syntax_tree::{SyntaxKind, SyntaxNode, SyntaxNodePtr};

use super::Recognizer;
use crate::error::FoldResult;
use crate::expr::{Expr, ExprKind, GetStyle, MathFunction, Number, Operator};
use crate::known::{is_supported_class, CLASS_INDEPENDENT_METHODS};

impl Recognizer<'_> {
    /// Polyadic and binary expressions
    pub(super) fn binary(&self, node: &SyntaxNode) -> FoldResult<Option<Expr>> {
        let Some(op) = operator_kind(node) else {
            return Ok(None);
        };
        let parts = operands(node);

        if op == SyntaxKind::AmpAmp {
            for pair in parts.windows(2) {
                if let Some(range) = self.range(node, &pair[0], &pair[1])? {
                    return Ok(Some(range));
                }
            }
            return Ok(None);
        }
        if op == SyntaxKind::Plus {
            if let Some(interpolated) = self.interpolated(node, &parts)? {
                return Ok(Some(interpolated));
            }
        }
        if parts.len() == 2 {
            if let Some(comparison) = self.compare_to(node, op, &parts[0], &parts[1])? {
                return Ok(Some(comparison));
            }
        }

        let Some(op) = Operator::from_arithmetic_token(op) else {
            return Ok(None);
        };
        let operands = parts
            .iter()
            .map(|part| self.operand(part))
            .collect::<FoldResult<Vec<_>>>()?;
        Ok(Some(Expr::new(Expr::operation(op, operands), node)))
    }

    /// `"a" + b + "c"` as one string with holes
    fn interpolated(&self, node: &SyntaxNode, parts: &[SyntaxNode]) -> FoldResult<Option<Expr>> {
        let operands = parts
            .iter()
            .map(|part| self.operand(part))
            .collect::<FoldResult<Vec<_>>>()?;
        let mut first_string = None;
        for (index, (part, expr)) in parts.iter().zip(&operands).enumerate() {
            if self.is_string(part, expr)? {
                first_string = Some(index);
                break;
            }
        }
        // `1 + 2 + "a"` adds numbers before concatenating
        match first_string {
            Some(index) if index <= 1 => Ok(Some(Expr::new(
                ExprKind::InterpolatedString(operands),
                node,
            ))),
            _ => Ok(None),
        }
    }

    /// A string literal, or an operand whose static type is `String`
    fn is_string(&self, part: &SyntaxNode, expr: &Expr) -> FoldResult<bool> {
        if matches!(expr.kind, ExprKind::String(_)) {
            return Ok(true);
        }
        Ok(self
            .resolver
            .type_of(part)?
            .is_some_and(|ty| ty.erasure() == "java.lang.String"))
    }

    /// Two comparisons on the same variable joined by `&&`
    fn range(
        &self,
        parent: &SyntaxNode,
        a: &SyntaxNode,
        b: &SyntaxNode,
    ) -> FoldResult<Option<Expr>> {
        let (Some(first), Some(second)) = (comparison(a), comparison(b)) else {
            return Ok(None);
        };
        let (a_left, a_right) = (self.operand(&first.left)?, self.operand(&first.right)?);
        let (b_left, b_right) = (self.operand(&second.left)?, self.operand(&second.right)?);
        let span = node_span(a).start..node_span(b).end;

        let build = |subject: Expr, start: Expr, start_inclusive, end: Expr, end_inclusive| {
            Expr::spanned(
                ExprKind::Range {
                    subject: Box::new(subject),
                    start: Box::new(start),
                    start_inclusive,
                    end: Box::new(end),
                    end_inclusive,
                },
                span.clone(),
                parent,
            )
        };
        let same_subject = |x: &Expr, y: &Expr| x.is_variable() && x == y;

        Ok(match (first.op, second.op) {
            // x < hi && x > lo
            (Bound::Upper(end_inc), Bound::Lower(start_inc)) if same_subject(&a_left, &b_left) => {
                Some(build(a_left, b_right, start_inc, a_right, end_inc))
            }
            // x > lo && x < hi
            (Bound::Lower(start_inc), Bound::Upper(end_inc)) if same_subject(&a_left, &b_left) => {
                Some(build(a_left, a_right, start_inc, b_right, end_inc))
            }
            // lo < x && x < hi
            (Bound::Upper(start_inc), Bound::Upper(end_inc))
                if same_subject(&a_right, &b_left) =>
            {
                Some(build(b_left, a_left, start_inc, b_right, end_inc))
            }
            _ => None,
        })
    }

    /// `a.compareTo(b) OP literal` as a plain comparison
    fn compare_to(
        &self,
        node: &SyntaxNode,
        op: SyntaxKind,
        left: &SyntaxNode,
        right: &SyntaxNode,
    ) -> FoldResult<Option<Expr>> {
        let (call, sign, op) = if let Some(sign) = sign_literal(right) {
            (left, sign, op)
        } else if let Some(sign) = sign_literal(left) {
            (right, sign, mirror(op))
        } else {
            return Ok(None);
        };
        if call.kind() != SyntaxKind::MethodCallExpr
            || member_name_text(call).as_deref() != Some("compareTo")
        {
            return Ok(None);
        }
        let args = arguments(call);
        let [argument] = args.as_slice() else {
            return Ok(None);
        };
        let Some(q) = qualifier(call) else {
            return Ok(None);
        };
        let Some(method) = self.resolve(call)? else {
            return Ok(None);
        };
        let gated = CLASS_INDEPENDENT_METHODS.contains(method.name.as_str())
            || method.container.as_deref().is_some_and(is_supported_class);
        if !gated {
            return Ok(None);
        }

        let result = match (op, sign) {
            (SyntaxKind::EqEq, -1) => Operator::Less,
            (SyntaxKind::EqEq, 0) => Operator::Equal,
            (SyntaxKind::EqEq, 1) => Operator::Greater,
            (SyntaxKind::BangEq, 1) => Operator::LessEqual,
            (SyntaxKind::BangEq, 0) => Operator::NotEqual,
            (SyntaxKind::BangEq, -1) => Operator::GreaterEqual,
            (SyntaxKind::Lt, 0) => Operator::Less,
            (SyntaxKind::Lt, 1) => Operator::LessEqual,
            (SyntaxKind::LtEq, 0) => Operator::LessEqual,
            (SyntaxKind::LtEq, -1) => Operator::Less,
            (SyntaxKind::Gt, 0) => Operator::Greater,
            (SyntaxKind::Gt, -1) => Operator::GreaterEqual,
            (SyntaxKind::GtEq, 0) => Operator::GreaterEqual,
            (SyntaxKind::GtEq, 1) => Operator::Greater,
            _ => return Ok(None),
        };
        let operands = vec![self.operand(&q)?, self.operand(argument)?];
        Ok(Some(Expr::new(Expr::operation(result, operands), node)))
    }

    /// `x = x OP y` as `x OP= y`
    pub(super) fn assignment(&self, node: &SyntaxNode) -> FoldResult<Option<Expr>> {
        if operator_kind(node) != Some(SyntaxKind::Eq) {
            return Ok(None);
        }
        let Some((target, value)) = sides(node) else {
            return Ok(None);
        };
        let Some(variable) = self.variable(&target, false)? else {
            return Ok(None);
        };
        let value = self.operand(&value)?;
        let ExprKind::Operation { op, operands } = value.kind else {
            return Ok(None);
        };
        if operands.len() < 2 || operands[0] != variable {
            return Ok(None);
        }
        let Some(compound) = op.compound() else {
            return Ok(None);
        };
        // shifts and remainders only fold in their two-operand form
        if compound.tail().is_none() && operands.len() > 2 {
            return Ok(None);
        }

        let mut folded = vec![variable];
        folded.extend(operands.into_iter().skip(1));
        Ok(Some(Expr::new(Expr::operation(compound, folded), node)))
    }

    /// `!(a == b)` and `-x`
    pub(super) fn prefix(&self, node: &SyntaxNode) -> FoldResult<Option<Expr>> {
        let Some(inner) = operand(node) else {
            return Ok(None);
        };
        match operator_kind(node) {
            Some(SyntaxKind::Bang) => {
                let inner = self.operand(&inner)?;
                Ok(match inner.kind {
                    ExprKind::Operation {
                        op: Operator::Equal,
                        operands,
                    } => Some(Expr::new(Expr::operation(Operator::NotEqual, operands), node)),
                    _ => None,
                })
            }
            Some(SyntaxKind::Minus) => {
                let inner = self.operand(&inner)?;
                Ok(Some(Expr::new(
                    Expr::function(MathFunction::Negate, vec![inner]),
                    node,
                )))
            }
            _ => Ok(None),
        }
    }

    /// Parentheses unwrap to their content; a parenthesized cast stays one cast
    pub(super) fn paren(&self, node: &SyntaxNode, synthetic: bool) -> FoldResult<Option<Expr>> {
        let Some(inner) = operand(node) else {
            return Ok(None);
        };
        if inner.kind() == SyntaxKind::CastExpr {
            if let Some(cast) = self.cast(&inner)? {
                return Ok(Some(cast.respanned(Some(node_span(node)), Some(ptr(node)))));
            }
        }
        self.recognize(&inner, synthetic)
    }

    pub(super) fn cast(&self, node: &SyntaxNode) -> FoldResult<Option<Expr>> {
        let Some(inner) = operand(node) else {
            return Ok(None);
        };
        let object = self.operand(&inner)?;
        Ok(Some(Expr::new(
            ExprKind::TypeCast {
                object: Box::new(object),
            },
            node,
        )))
    }

    /// `a[0]` and `a[a.length - 1]`, outside assignment targets
    pub(super) fn array_access(&self, node: &SyntaxNode) -> FoldResult<Option<Expr>> {
        let is_target = node.parent().is_some_and(|parent| {
            parent.kind() == SyntaxKind::AssignmentExpr
                && sides(&parent).is_some_and(|(target, _)| target == *node)
        });
        if is_target {
            return Ok(None);
        }
        let Some((array, index)) = sides(node) else {
            return Ok(None);
        };

        let index_expr = self.recognize(&index, false)?;
        let target = self.operand(&array)?;
        let style = if index_expr.is_some_and(|e| e.as_number().is_some_and(|n| n.is_integer(0))) {
            GetStyle::First
        } else if index.kind() == SyntaxKind::BinaryExpr
            && self
                .slice_position(&target, &index)?
                .is_some_and(|p| p.as_number().is_some_and(|n| n.is_integer(-1)))
        {
            GetStyle::Last
        } else {
            return Ok(None);
        };

        Ok(Some(Expr::new(
            ExprKind::ArrayGet {
                target: Box::new(target),
                style,
            },
            node,
        )))
    }

    /// `q.length() - k` or `q.size() - k` over the same `q`, as the position `-k`
    pub(super) fn slice_position(
        &self,
        target: &Expr,
        binary: &SyntaxNode,
    ) -> FoldResult<Option<Expr>> {
        if binary.kind() != SyntaxKind::BinaryExpr || operator_kind(binary) != Some(SyntaxKind::Minus)
        {
            return Ok(None);
        }
        let Some((size, offset)) = sides(binary) else {
            return Ok(None);
        };
        if operands(binary).len() != 2 {
            return Ok(None);
        }
        if !matches!(
            size.kind(),
            SyntaxKind::MethodCallExpr | SyntaxKind::FieldAccessExpr
        ) || !matches!(member_name_text(&size).as_deref(), Some("length" | "size"))
        {
            return Ok(None);
        }
        let Some(Number::Integer(k)) = self.operand(&offset)?.as_number() else {
            return Ok(None);
        };
        let Some(q) = qualifier(&size) else {
            return Ok(None);
        };
        if self.operand(&q)? != *target {
            return Ok(None);
        }
        let Some(minus) = operator(binary) else {
            return Ok(None);
        };

        let span = token_span(&minus).start..node_span(binary).end;
        Ok(Some(Expr::spanned(
            ExprKind::Number(Number::Integer(-k)),
            span,
            binary,
        )))
    }
}

fn ptr(node: &SyntaxNode) -> SyntaxNodePtr {
    SyntaxNodePtr::new(node)
}

#[derive(Clone, Copy)]
enum Bound {
    /// `<` or `<=`; the flag is inclusivity
    Upper(bool),
    /// `>` or `>=`
    Lower(bool),
}

struct Comparison {
    op: Bound,
    left: SyntaxNode,
    right: SyntaxNode,
}

fn comparison(node: &SyntaxNode) -> Option<Comparison> {
    if node.kind() != SyntaxKind::BinaryExpr || operands(node).len() != 2 {
        return None;
    }
    let op = match operator_kind(node)? {
        SyntaxKind::Lt => Bound::Upper(false),
        SyntaxKind::LtEq => Bound::Upper(true),
        SyntaxKind::Gt => Bound::Lower(false),
        SyntaxKind::GtEq => Bound::Lower(true),
        _ => return None,
    };
    let (left, right) = sides(node)?;
    Some(Comparison { op, left, right })
}

/// `0`, `1` or `-1` written as a literal
fn sign_literal(node: &SyntaxNode) -> Option<i64> {
    let text: String = node
        .text()
        .to_string()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let literal_shape = match node.kind() {
        SyntaxKind::Literal => true,
        SyntaxKind::PrefixExpr => {
            operator_kind(node) == Some(SyntaxKind::Minus)
                && operand(node).is_some_and(|o| o.kind() == SyntaxKind::Literal)
        }
        _ => false,
    };
    if !literal_shape {
        return None;
    }
    match text.as_str() {
        "0" => Some(0),
        "1" => Some(1),
        "-1" => Some(-1),
        _ => None,
    }
}

/// The operator that keeps the meaning when both sides swap
fn mirror(op: SyntaxKind) -> SyntaxKind {
    match op {
        SyntaxKind::Lt => SyntaxKind::Gt,
        SyntaxKind::LtEq => SyntaxKind::GtEq,
        SyntaxKind::Gt => SyntaxKind::Lt,
        SyntaxKind::GtEq => SyntaxKind::LtEq,
        other => other,
    }
}
