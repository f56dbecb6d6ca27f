//! Rendering expressions to display text

use terse_span::{contains, Span};

use crate::expr::{Expr, ExprKind, ForEachParts, GetStyle, MathFunction, Operator, ATOM};

/// Render an expression to its display text
pub fn format(expr: &Expr) -> String {
    Formatter::default().format(expr)
}

/// Precedence-aware renderer
///
/// Carries the source ranges whose following `.` becomes a safe call `?.`
/// while rendering the guarded part of a null check.
#[derive(Debug, Default, Clone)]
pub struct Formatter<'a> {
    safe_calls: &'a [Span],
}

impl<'a> Formatter<'a> {
    pub fn with_safe_calls(safe_calls: &'a [Span]) -> Self {
        Self { safe_calls }
    }

    pub fn format(&self, expr: &Expr) -> String {
        match &expr.kind {
            ExprKind::Number(n) => n.to_string(),
            ExprKind::String(s) => format!("\"{}\"", escape(s, '"')),
            ExprKind::Character(c) => format!("'{}'", escape(&c.to_string(), '\'')),
            ExprKind::Variable { name, .. } => name.clone(),
            ExprKind::Operation { op, operands } => self.operation(*op, operands),
            ExprKind::Function { func, operands } => self.function(*func, operands),
            ExprKind::Get {
                target,
                index,
                style,
            } => match style {
                GetStyle::Last => format!("{}[-1]", self.postfix_target(target)),
                GetStyle::First => format!("{}[0]", self.postfix_target(target)),
                GetStyle::Normal => {
                    format!("{}[{}]", self.postfix_target(target), self.format(index))
                }
            },
            ExprKind::ArrayGet { target, style } => match style {
                GetStyle::Last => format!("{}[-1]", self.postfix_target(target)),
                _ => format!("{}[0]", self.postfix_target(target)),
            },
            ExprKind::Slice { operands } => self.slice(operands),
            ExprKind::Put { target, key, value } => format!(
                "{}[{}] = {}",
                self.postfix_target(target),
                self.format(key),
                self.format(value)
            ),
            ExprKind::AddAssignForCollection { target, value } => {
                format!("{} += {}", self.format(target), self.format(value))
            }
            ExprKind::RemoveAssignForCollection { target, value } => {
                format!("{} -= {}", self.format(target), self.format(value))
            }
            ExprKind::ListLiteral(items) | ExprKind::ArrayLiteral(items) => {
                format!("[{}]", self.join(items))
            }
            ExprKind::Range {
                subject,
                start,
                start_inclusive,
                end,
                end_inclusive,
            } => format!(
                "{} {} {} {} {}",
                self.format(start),
                if *start_inclusive { "≤" } else { "<" },
                self.format(subject),
                if *end_inclusive { "≤" } else { "<" },
                self.format(end)
            ),
            ExprKind::ForStatement {
                variable,
                start,
                end,
                end_inclusive,
                ..
            } => format!(
                "{} ∈ [{}, {}{}",
                self.format(variable),
                self.format(start),
                self.format(end),
                if *end_inclusive { "]" } else { ")" }
            ),
            ExprKind::ForEachStatement(parts) => self.for_each_header(parts, false),
            ExprKind::ForEachIndexedStatement(parts) => self.for_each_header(parts, true),
            ExprKind::Elvis {
                then_branch,
                else_branch,
                elided,
                ..
            } => {
                let guarded = Formatter::with_safe_calls(elided).format(then_branch);
                format!("{guarded} ?: {}", self.format(else_branch))
            }
            ExprKind::ShortElvis { body, elided, .. } => {
                Formatter::with_safe_calls(elided).format(body)
            }
            ExprKind::VariableDeclaration { is_final } => {
                if *is_final { "val" } else { "var" }.to_string()
            }
            ExprKind::Getter {
                qualifier,
                property,
                ..
            } => match qualifier {
                Some(q) => format!("{}{}", self.qualifier_prefix(q), property),
                None => property.clone(),
            },
            ExprKind::Setter {
                qualifier,
                property,
                value,
                ..
            } => {
                let prefix = qualifier
                    .as_ref()
                    .map(|q| self.qualifier_prefix(q))
                    .unwrap_or_default();
                format!("{prefix}{property} = {}", self.format(value))
            }
            ExprKind::TypeCast { object } => self.format(object),
            ExprKind::InterpolatedString(parts) => self.interpolated(parts),
            ExprKind::Collect { collector, .. } => collector.clone(),
            ExprKind::ArrayStream { array } => self.format(array),
            ExprKind::StreamExpression => String::new(),
            ExprKind::Synthetic { text, children, .. } => {
                self.synthetic(expr.span.as_ref(), text, children)
            }
        }
    }

    fn join(&self, items: &[Expr]) -> String {
        items
            .iter()
            .map(|item| self.format(item))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn operation(&self, op: Operator, operands: &[Expr]) -> String {
        let rank = op.precedence();
        operands
            .iter()
            .enumerate()
            .map(|(i, operand)| {
                let inner = operand.precedence();
                let text = self.format(operand);
                if inner < rank || (i > 0 && inner == rank) {
                    format!("({text})")
                } else {
                    text
                }
            })
            .collect::<Vec<_>>()
            .join(&format!(" {} ", op.symbol()))
    }

    fn function(&self, func: MathFunction, operands: &[Expr]) -> String {
        let first = operands.first();
        match (func, first) {
            (MathFunction::Negate, Some(x)) => format!("-{}", self.tight(x)),
            (MathFunction::Not, Some(x)) => format!("~{}", self.tight(x)),
            (MathFunction::Abs, Some(x)) => format!("|{}|", self.format(x)),
            (MathFunction::Sqrt, Some(x)) => format!("√{}", self.tight(x)),
            (MathFunction::Cbrt, Some(x)) => format!("∛{}", self.tight(x)),
            (MathFunction::Pow, Some(base)) if operands.len() == 2 => {
                let exponent = self.format(&operands[1]);
                match superscript(&exponent) {
                    Some(sup) => format!("{}{sup}", self.tight(base)),
                    None => format!("pow({}, {exponent})", self.format(base)),
                }
            }
            _ => format!("{}({})", func.name(), self.join(operands)),
        }
    }

    /// Operand of a prefix glyph, parenthesized unless atomic
    fn tight(&self, expr: &Expr) -> String {
        let text = self.format(expr);
        if expr.precedence() < ATOM {
            format!("({text})")
        } else {
            text
        }
    }

    fn postfix_target(&self, target: &Expr) -> String {
        self.tight(target)
    }

    fn slice(&self, operands: &[Expr]) -> String {
        match operands {
            [target] => self.format(target),
            [target, start] => format!("{}[{}:]", self.postfix_target(target), self.format(start)),
            [target, start, end, ..] => {
                if start.as_number().is_some_and(|n| n.is_integer(0)) {
                    format!("{}[:{}]", self.postfix_target(target), self.format(end))
                } else {
                    format!(
                        "{}[{}:{}]",
                        self.postfix_target(target),
                        self.format(start),
                        self.format(end)
                    )
                }
            }
            [] => String::new(),
        }
    }

    fn for_each_header(&self, parts: &ForEachParts, indexed: bool) -> String {
        let collection = self.format(&parts.collection);
        if indexed {
            format!("({}, {}) : {collection}", parts.index, parts.element)
        } else {
            format!("{} : {collection}", parts.element)
        }
    }

    fn qualifier_prefix(&self, qualifier: &Expr) -> String {
        let text = self.tight(qualifier);
        if self.is_safe_call(qualifier) {
            format!("{text}?.")
        } else {
            format!("{text}.")
        }
    }

    fn is_safe_call(&self, expr: &Expr) -> bool {
        expr.span
            .as_ref()
            .is_some_and(|span| self.safe_calls.contains(span))
    }

    fn interpolated(&self, parts: &[Expr]) -> String {
        let mut out = String::from("\"");
        for part in parts {
            match &part.kind {
                // a literal `$` would read as the start of a hole
                ExprKind::String(s) => out.push_str(&escape(s, '"').replace('$', "\\$")),
                ExprKind::Character(c) => {
                    out.push_str(&escape(&c.to_string(), '"').replace('$', "\\$"))
                }
                ExprKind::Variable { name, .. } => {
                    out.push('$');
                    out.push_str(name);
                }
                _ => {
                    out.push_str("${");
                    out.push_str(&self.format(part));
                    out.push('}');
                }
            }
        }
        out.push('"');
        out
    }

    /// Verbatim text with formatted children and safe calls spliced in
    fn synthetic(&self, base: Option<&Span>, text: &str, children: &[Expr]) -> String {
        let Some(base) = base else {
            return text.to_string();
        };

        let mut edits: Vec<(Span, String)> = children
            .iter()
            .filter_map(|child| {
                let span = child.span.clone()?;
                contains(base, &span).then(|| (span, self.format(child)))
            })
            .collect();
        for elided in self.safe_calls {
            if !contains(base, elided) {
                continue;
            }
            let follows_dot = text
                .get(elided.end - base.start..)
                .is_some_and(|rest| rest.starts_with('.'));
            if follows_dot {
                edits.push((elided.end..elided.end, "?".to_string()));
            }
        }
        // insertions before replacements that start at the same offset, wider replacements first
        edits.sort_by_key(|(span, _)| (span.start, span.start != span.end, std::cmp::Reverse(span.end)));

        let mut out = String::with_capacity(text.len());
        let mut cursor = base.start;
        for (span, replacement) in edits {
            if span.start < cursor {
                continue;
            }
            out.push_str(text.get(cursor - base.start..span.start - base.start).unwrap_or_default());
            out.push_str(&replacement);
            cursor = span.end;
        }
        out.push_str(text.get(cursor - base.start..).unwrap_or_default());
        out
    }
}

fn escape(s: &str, quote: char) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// Superscript form of `text`, if every character has one
pub fn superscript(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    text.chars()
        .map(|c| {
            Some(match c {
                '0' => '⁰',
                '1' => '¹',
                '2' => '²',
                '3' => '³',
                '4' => '⁴',
                '5' => '⁵',
                '6' => '⁶',
                '7' => '⁷',
                '8' => '⁸',
                '9' => '⁹',
                '-' => '⁻',
                '+' => '⁺',
                '=' => '⁼',
                '(' => '⁽',
                ')' => '⁾',
                'a' => 'ᵃ',
                'b' => 'ᵇ',
                'c' => 'ᶜ',
                'd' => 'ᵈ',
                'e' => 'ᵉ',
                'f' => 'ᶠ',
                'g' => 'ᵍ',
                'h' => 'ʰ',
                'i' => 'ⁱ',
                'j' => 'ʲ',
                'k' => 'ᵏ',
                'l' => 'ˡ',
                'm' => 'ᵐ',
                'n' => 'ⁿ',
                'o' => 'ᵒ',
                'p' => 'ᵖ',
                'r' => 'ʳ',
                's' => 'ˢ',
                't' => 'ᵗ',
                'u' => 'ᵘ',
                'v' => 'ᵛ',
                'w' => 'ʷ',
                'x' => 'ˣ',
                'y' => 'ʸ',
                'z' => 'ᶻ',
                '𝑒' => 'ᵉ',
                _ => return None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Number, Operator};

    fn var(name: &str) -> Expr {
        Expr::detached(ExprKind::Variable {
            name: name.to_string(),
            copy: false,
        })
    }

    fn op(op: Operator, operands: Vec<Expr>) -> Expr {
        Expr::detached(Expr::operation(op, operands))
    }

    fn func(func: MathFunction, operands: Vec<Expr>) -> Expr {
        Expr::detached(Expr::function(func, operands))
    }

    #[test]
    fn test_lower_precedence_operand_is_parenthesized() {
        let e = op(
            Operator::Multiply,
            vec![op(Operator::Add, vec![var("a"), var("b")]), var("c")],
        );
        assert_eq!(format(&e), "(a + b) * c");

        let e = op(
            Operator::Add,
            vec![op(Operator::Multiply, vec![var("a"), var("b")]), var("c")],
        );
        assert_eq!(format(&e), "a * b + c");
    }

    #[test]
    fn test_ties_parenthesize_only_later_operands() {
        let left = op(
            Operator::Subtract,
            vec![op(Operator::Subtract, vec![var("a"), var("b")]), var("c")],
        );
        assert_eq!(format(&left), "a - b - c");

        let right = op(
            Operator::Subtract,
            vec![var("a"), op(Operator::Subtract, vec![var("b"), var("c")])],
        );
        assert_eq!(format(&right), "a - (b - c)");
    }

    #[test]
    fn test_comparison_glyphs() {
        assert_eq!(format(&op(Operator::LessEqual, vec![var("a"), var("b")])), "a ≤ b");
        assert_eq!(format(&op(Operator::NotEqual, vec![var("a"), var("b")])), "a ≠ b");
        assert_eq!(format(&op(Operator::Equal, vec![var("a"), var("b")])), "a == b");
    }

    #[test]
    fn test_functions() {
        assert_eq!(format(&func(MathFunction::Sin, vec![var("x")])), "sin(x)");
        assert_eq!(format(&func(MathFunction::Abs, vec![var("x")])), "|x|");
        assert_eq!(format(&func(MathFunction::Negate, vec![var("x")])), "-x");
        assert_eq!(
            format(&func(
                MathFunction::Not,
                vec![op(Operator::And, vec![var("a"), var("b")])]
            )),
            "~(a & b)"
        );
        assert_eq!(
            format(&func(
                MathFunction::Sqrt,
                vec![op(Operator::Add, vec![var("a"), var("b")])]
            )),
            "√(a + b)"
        );
        assert_eq!(
            format(&func(MathFunction::Max, vec![var("a"), var("b")])),
            "max(a, b)"
        );
    }

    #[test]
    fn test_pow_uses_superscript_when_possible() {
        assert_eq!(
            format(&func(MathFunction::Pow, vec![var("x"), Expr::number(2)])),
            "x²"
        );
        assert_eq!(
            format(&func(MathFunction::Pow, vec![var("x"), Expr::number(-1)])),
            "x⁻¹"
        );
        assert_eq!(
            format(&func(MathFunction::Pow, vec![Expr::number(10), var("n")])),
            "10ⁿ"
        );
        assert_eq!(
            format(&func(
                MathFunction::Pow,
                vec![var("x"), op(Operator::Add, vec![var("a"), var("b")])]
            )),
            "pow(x, a + b)"
        );
    }

    #[test]
    fn test_slices() {
        let slice = |operands| Expr::detached(ExprKind::Slice { operands });
        assert_eq!(format(&slice(vec![var("s"), Expr::number(1)])), "s[1:]");
        assert_eq!(
            format(&slice(vec![var("s"), Expr::number(0), Expr::number(-2)])),
            "s[:-2]"
        );
        assert_eq!(
            format(&slice(vec![var("s"), var("i"), var("j")])),
            "s[i:j]"
        );
    }

    #[test]
    fn test_numbers_drop_suffixes_and_integral_fractions() {
        let n = |v| Expr::detached(ExprKind::Number(v));
        assert_eq!(format(&n(Number::Integer(10))), "10");
        assert_eq!(format(&n(Number::Decimal(1.0))), "1");
        assert_eq!(format(&n(Number::Decimal(2.5))), "2.5");
    }

    #[test]
    fn test_interpolated_string() {
        let parts = vec![
            Expr::detached(ExprKind::String("Hello, ".to_string())),
            var("name"),
            Expr::detached(ExprKind::String("! You are ".to_string())),
            op(Operator::Add, vec![var("age"), Expr::number(1)]),
        ];
        assert_eq!(
            format(&Expr::detached(ExprKind::InterpolatedString(parts))),
            "\"Hello, $name! You are ${age + 1}\""
        );
    }

    #[test]
    fn test_interpolated_dollar_is_escaped() {
        let parts = vec![
            Expr::detached(ExprKind::String("cost $".to_string())),
            var("x"),
        ];
        assert_eq!(
            format(&Expr::detached(ExprKind::InterpolatedString(parts))),
            r#""cost \$$x""#
        );
    }

    #[test]
    fn test_synthetic_splices_children() {
        let child = Expr {
            kind: Expr::operation(Operator::Add, vec![var("a"), var("b")]),
            span: Some(4..12),
            element: None,
        };
        let synthetic = Expr {
            kind: ExprKind::Synthetic {
                text: "foo(a.add(b))".to_string(),
                children: vec![child],
                precedence: ATOM,
            },
            span: Some(0..13),
            element: None,
        };
        assert_eq!(format(&synthetic), "foo(a + b)");
    }

    #[test]
    fn test_synthetic_without_children_is_verbatim() {
        let synthetic = Expr {
            kind: ExprKind::Synthetic {
                text: "a  .  b()".to_string(),
                children: vec![],
                precedence: ATOM,
            },
            span: Some(7..16),
            element: None,
        };
        assert_eq!(format(&synthetic), "a  .  b()");
    }

    #[test]
    fn test_safe_calls_follow_elided_ranges() {
        let mut qualifier = var("a");
        qualifier.span = Some(10..11);
        let synthetic = Expr {
            kind: ExprKind::Synthetic {
                text: "a.length()".to_string(),
                children: vec![qualifier],
                precedence: ATOM,
            },
            span: Some(10..20),
            element: None,
        };
        let elided = vec![10..11];
        assert_eq!(
            Formatter::with_safe_calls(&elided).format(&synthetic),
            "a?.length()"
        );
    }

    #[test]
    fn test_range_and_for_headers() {
        let range = Expr::detached(ExprKind::Range {
            subject: Box::new(var("x")),
            start: Box::new(Expr::number(0)),
            start_inclusive: true,
            end: Box::new(var("n")),
            end_inclusive: false,
        });
        assert_eq!(format(&range), "0 ≤ x < n");

        let header = Expr::detached(ExprKind::ForStatement {
            variable: Box::new(var("i")),
            start: Box::new(Expr::number(0)),
            end: Box::new(var("n")),
            end_inclusive: true,
            bounds_only: false,
        });
        assert_eq!(format(&header), "i ∈ [0, n]");
    }
}
