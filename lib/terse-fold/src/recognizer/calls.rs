use terse_syntax_tree::helpers::{
    arguments, expr_children, find_child, has_argument_list, is_statement_expression, member_name,
    member_name_text, node_span, qualifier, token_span,
};
use terse_syntax_tree::{SyntaxKind, SyntaxNode, SyntaxNodePtr};

use super::{is_qualifier, literals, Recognizer};
use crate::error::FoldResult;
use crate::expr::{Expr, ExprKind, GetStyle, MathFunction, Number, Operator};
use crate::known::{is_supported_class, CLASS_INDEPENDENT_METHODS, COLLECTION_CLASSES, SUPPORTED_METHODS};
use crate::resolver::{DeclKind, Declaration, JavaType};

/// Euler's number as rendered in folded text
const EULER: &str = "𝑒";

impl Recognizer<'_> {
    pub(super) fn method_call(&self, node: &SyntaxNode) -> FoldResult<Option<Expr>> {
        let Some(name) = member_name_text(node) else {
            return Ok(None);
        };
        if !SUPPORTED_METHODS.contains(name.as_str()) {
            return self.accessor(node, &name);
        }

        let Some(method) = self.resolve(node)? else {
            return Ok(None);
        };
        if method.kind != DeclKind::Method {
            return Ok(None);
        }
        let class = method
            .container
            .as_deref()
            .map(|c| JavaType::new(c).erasure())
            .unwrap_or_default();
        if !is_supported_class(&class) && !CLASS_INDEPENDENT_METHODS.contains(name.as_str()) {
            return Ok(None);
        }

        let args = arguments(node);
        let receiver = qualifier(node);
        if let Some(q) = &receiver {
            if name == "collect" {
                return self.collect(node, &args);
            }
            if let Some(expr) = self.instance_call(node, &name, &class, &method, q, &args)? {
                return Ok(Some(expr));
            }
        }
        if self.is_static_receiver(receiver.as_ref())? {
            return self.static_call(node, &name, &class, &args);
        }
        Ok(None)
    }

    fn instance_call(
        &self,
        node: &SyntaxNode,
        name: &str,
        class: &str,
        method: &Declaration,
        q: &SyntaxNode,
        args: &[SyntaxNode],
    ) -> FoldResult<Option<Expr>> {
        if matches!(name, "asList" | "singletonList") {
            if name == "asList" && args.len() == 1 {
                // `Arrays.asList(array)` is a view, not a literal
                let spread = self
                    .resolver
                    .type_of(&args[0])?
                    .is_some_and(|ty| ty.is_array());
                if spread {
                    return Ok(None);
                }
            }
            let items = self.operands(args)?;
            return Ok(Some(Expr::new(ExprKind::ListLiteral(items), node)));
        }

        let target = self.operand(q)?;
        let kind = match args {
            [] => match name {
                "plus" => {
                    return Ok(Some(
                        target.respanned(Some(node_span(node)), Some(SyntaxNodePtr::new(node))),
                    ));
                }
                "negate" => Expr::function(MathFunction::Negate, vec![target]),
                "not" => Expr::function(MathFunction::Not, vec![target]),
                "abs" => Expr::function(MathFunction::Abs, vec![target]),
                "signum" => Expr::function(MathFunction::Signum, vec![target]),
                "stream" if is_qualifier(node) => {
                    let Some(ident) = member_name(node) else {
                        return Ok(None);
                    };
                    let span = token_span(&ident).start..node_span(node).end;
                    return Ok(Some(Expr::spanned(ExprKind::StreamExpression, span, node)));
                }
                _ => return Ok(None),
            },
            [arg] => {
                let value = self.operand(arg)?;
                match name {
                    "add" if COLLECTION_CLASSES.contains(class) => {
                        ExprKind::AddAssignForCollection {
                            target: Box::new(target),
                            value: Box::new(value),
                        }
                    }
                    "add" => Expr::operation(Operator::Add, vec![target, value]),
                    "remove" if COLLECTION_CLASSES.contains(class) => {
                        // `list.remove(int)` removes by position
                        let by_index = method.params.first().is_some_and(|p| p.as_str() == "int");
                        if by_index || method.params.len() != 1 {
                            return Ok(None);
                        }
                        ExprKind::RemoveAssignForCollection {
                            target: Box::new(target),
                            value: Box::new(value),
                        }
                    }
                    "subtract" => Expr::operation(Operator::Subtract, vec![target, value]),
                    "multiply" => Expr::operation(Operator::Multiply, vec![target, value]),
                    "divide" => Expr::operation(Operator::Divide, vec![target, value]),
                    "remainder" | "mod" => Expr::operation(Operator::Remainder, vec![target, value]),
                    "scaleByPowerOfTen" => {
                        let power = Expr::detached(Expr::function(
                            MathFunction::Pow,
                            vec![Expr::number(10), value],
                        ));
                        Expr::operation(Operator::Multiply, vec![target, power])
                    }
                    "andNot" => {
                        let inverted = Expr::detached(Expr::function(MathFunction::Not, vec![value]));
                        Expr::operation(Operator::And, vec![target, inverted])
                    }
                    "modInverse" => {
                        let inverse = Expr::detached(Expr::function(
                            MathFunction::Pow,
                            vec![target, Expr::number(-1)],
                        ));
                        Expr::operation(Operator::Remainder, vec![inverse, value])
                    }
                    "pow" => Expr::function(MathFunction::Pow, vec![target, value]),
                    "min" => Expr::function(MathFunction::Min, vec![target, value]),
                    "max" => Expr::function(MathFunction::Max, vec![target, value]),
                    "gcd" => Expr::function(MathFunction::Gcd, vec![target, value]),
                    "and" => Expr::operation(Operator::And, vec![target, value]),
                    "or" => Expr::operation(Operator::Or, vec![target, value]),
                    "xor" => Expr::operation(Operator::Xor, vec![target, value]),
                    "shiftLeft" => Expr::operation(Operator::ShiftLeft, vec![target, value]),
                    "shiftRight" => Expr::operation(Operator::ShiftRight, vec![target, value]),
                    "equals" => Expr::operation(Operator::Equal, vec![target, value]),
                    "append" => Expr::operation(Operator::Append, vec![target, value]),
                    "charAt" => ExprKind::Get {
                        target: Box::new(target),
                        index: Box::new(value),
                        style: GetStyle::Normal,
                    },
                    "get" => {
                        let style = if value.as_number().is_some_and(|n| n.is_integer(0)) {
                            GetStyle::First
                        } else if self.is_last_position(&target, arg)? {
                            GetStyle::Last
                        } else {
                            GetStyle::Normal
                        };
                        ExprKind::Get {
                            target: Box::new(target),
                            index: Box::new(value),
                            style,
                        }
                    }
                    "subList" | "substring" => {
                        let start = self.slice_position(&target, arg)?.unwrap_or(value);
                        ExprKind::Slice {
                            operands: vec![target, start],
                        }
                    }
                    "addAll" => ExprKind::AddAssignForCollection {
                        target: Box::new(target),
                        value: Box::new(value),
                    },
                    "removeAll" => ExprKind::RemoveAssignForCollection {
                        target: Box::new(target),
                        value: Box::new(value),
                    },
                    "stream" if is_qualifier(node) => ExprKind::ArrayStream {
                        array: Box::new(value),
                    },
                    _ => return Ok(None),
                }
            }
            [first, second] => match name {
                "put" | "set" => ExprKind::Put {
                    target: Box::new(target),
                    key: Box::new(self.operand(first)?),
                    value: Box::new(self.operand(second)?),
                },
                "modPow" => {
                    let power = Expr::detached(Expr::function(
                        MathFunction::Pow,
                        vec![target, self.operand(first)?],
                    ));
                    Expr::operation(Operator::Remainder, vec![power, self.operand(second)?])
                }
                "substring" | "subList" => {
                    let start = match self.slice_position(&target, first)? {
                        Some(position) => position,
                        None => self.operand(first)?,
                    };
                    let mut operands = vec![target.clone(), start];
                    if !self.is_full_length(&target, second)? {
                        let end = match self.slice_position(&target, second)? {
                            Some(position) => position,
                            None => self.operand(second)?,
                        };
                        operands.push(end);
                    }
                    ExprKind::Slice { operands }
                }
                _ => return Ok(None),
            },
            _ => return Ok(None),
        };
        Ok(Some(Expr::new(kind, node)))
    }

    fn static_call(
        &self,
        node: &SyntaxNode,
        name: &str,
        class: &str,
        args: &[SyntaxNode],
    ) -> FoldResult<Option<Expr>> {
        let euler = || {
            Expr::detached(ExprKind::Variable {
                name: EULER.to_string(),
                copy: true,
            })
        };

        let kind = match args {
            [] if name == "random" => Expr::function(MathFunction::Random, Vec::new()),
            [arg] if name == "valueOf" => {
                let value = match arg.kind() {
                    SyntaxKind::Literal => constructor_expression(class, arg),
                    SyntaxKind::NameRef | SyntaxKind::FieldAccessExpr => self.reference(arg, true)?,
                    _ => None,
                };
                return Ok(value.map(|v| respan_to(v, node)));
            }
            [arg] => {
                let value = self.operand(arg)?;
                match name {
                    "exp" => Expr::function(MathFunction::Pow, vec![euler(), value]),
                    "expm1" => {
                        let power =
                            Expr::detached(Expr::function(MathFunction::Pow, vec![euler(), value]));
                        Expr::operation(Operator::Subtract, vec![power, Expr::number(1)])
                    }
                    "log1p" => {
                        let shifted = Expr::detached(Expr::operation(
                            Operator::Add,
                            vec![value, Expr::number(1)],
                        ));
                        Expr::function(MathFunction::Log, vec![shifted])
                    }
                    _ => match MathFunction::from_unary_math(name) {
                        Some(func) => Expr::function(func, vec![value]),
                        None => return Ok(None),
                    },
                }
            }
            [first, second] => {
                let (a, b) = (self.operand(first)?, self.operand(second)?);
                match name {
                    "min" => Expr::function(MathFunction::Min, vec![a, b]),
                    "max" => Expr::function(MathFunction::Max, vec![a, b]),
                    "pow" => Expr::function(MathFunction::Pow, vec![a, b]),
                    "atan2" => Expr::function(MathFunction::Atan2, vec![a, b]),
                    "hypot" => {
                        let square =
                            |x| Expr::detached(Expr::function(MathFunction::Pow, vec![x, Expr::number(2)]));
                        let sum = Expr::detached(Expr::operation(
                            Operator::Add,
                            vec![square(a), square(b)],
                        ));
                        Expr::function(MathFunction::Sqrt, vec![sum])
                    }
                    "addAll" => ExprKind::AddAssignForCollection {
                        target: Box::new(a),
                        value: Box::new(b),
                    },
                    "equals" => Expr::operation(Operator::Equal, vec![a, b]),
                    _ => return Ok(None),
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(Expr::new(kind, node)))
    }

    /// `stream.collect(Collectors.toX(...))`, shown as just the collector
    fn collect(&self, node: &SyntaxNode, args: &[SyntaxNode]) -> FoldResult<Option<Expr>> {
        let [collector] = args else {
            return Ok(None);
        };
        if collector.kind() != SyntaxKind::MethodCallExpr {
            return Ok(None);
        }
        let (Some(collect_ident), Some(to_ident)) = (member_name(node), member_name(collector))
        else {
            return Ok(None);
        };
        let from_collectors = qualifier(collector).is_some_and(|q| {
            q.kind() == SyntaxKind::NameRef && self.text(&q) == "Collectors"
        });
        if !to_ident.text().starts_with("to") || !from_collectors {
            return Ok(None);
        }

        let collector_span = token_span(&to_ident).start..node_span(collector).end;
        let span = token_span(&collect_ident).start..node_span(node).end;
        let text = self.source.get(collector_span.clone()).unwrap_or_default();
        Ok(Some(Expr::spanned(
            ExprKind::Collect {
                collector: text.to_string(),
                collector_span,
            },
            span,
            node,
        )))
    }

    /// `getX()`, `isX()` and `setX(v)` in statement position
    fn accessor(&self, node: &SyntaxNode, name: &str) -> FoldResult<Option<Expr>> {
        if !has_argument_list(node) {
            return Ok(None);
        }
        let Some(ident) = member_name(node) else {
            return Ok(None);
        };
        let args = arguments(node);
        let receiver = qualifier(node);
        let accessor = token_span(&ident).start..node_span(node).end;

        let is_getter = args.is_empty()
            && (capitalized_after(name, "get") || capitalized_after(name, "is"));
        let is_setter = args.len() == 1
            && capitalized_after(name, "set")
            && is_statement_expression(node)
            && receiver.as_ref().is_none_or(|q| {
                q.kind() != SyntaxKind::MethodCallExpr
                    || !member_name_text(q).is_some_and(|n| n.starts_with("set"))
            });
        if !is_getter && !is_setter {
            return Ok(None);
        }

        let qualifier = match &receiver {
            Some(q) => Some(Box::new(self.operand(q)?)),
            None => None,
        };
        let property = guess_property_name(name);
        let kind = if is_getter {
            ExprKind::Getter {
                qualifier,
                property,
                accessor,
            }
        } else {
            ExprKind::Setter {
                qualifier,
                property,
                value: Box::new(self.operand(&args[0])?),
                accessor,
            }
        };
        Ok(Some(Expr::new(kind, node)))
    }

    /// Object creation with a literal or copied argument
    pub(super) fn new_expr(&self, node: &SyntaxNode) -> FoldResult<Option<Expr>> {
        if let Some(initializer) = find_child(node, SyntaxKind::ArrayInitializer) {
            let items: Vec<_> = expr_children(&initializer).collect();
            let items = self.operands(&items)?;
            return Ok(Some(Expr::new(ExprKind::ArrayLiteral(items), node)));
        }
        if !has_argument_list(node) {
            return Ok(None);
        }
        let Some(ty) = self.resolver.type_of(node)? else {
            return Ok(None);
        };
        let class = ty.erasure();
        if !is_supported_class(&class) {
            return Ok(None);
        }

        let value = match arguments(node).as_slice() {
            [] => match class.as_str() {
                "java.lang.String" | "java.lang.StringBuilder" => {
                    Some(Expr::new(ExprKind::String(String::new()), node))
                }
                "java.util.ArrayList" => Some(Expr::new(ExprKind::ListLiteral(Vec::new()), node)),
                _ => None,
            },
            [arg] if arg.kind() == SyntaxKind::Literal => constructor_expression(&class, arg),
            [arg] if matches!(arg.kind(), SyntaxKind::NameRef | SyntaxKind::FieldAccessExpr) => {
                self.reference(arg, true)?
            }
            _ => None,
        };
        Ok(value.map(|v| respan_to(v, node)))
    }

    fn operands(&self, nodes: &[SyntaxNode]) -> FoldResult<Vec<Expr>> {
        nodes.iter().map(|n| self.operand(n)).collect()
    }

    /// A receiver that names a class rather than an instance
    fn is_static_receiver(&self, receiver: Option<&SyntaxNode>) -> FoldResult<bool> {
        let Some(q) = receiver else {
            return Ok(true);
        };
        if !matches!(q.kind(), SyntaxKind::NameRef | SyntaxKind::FieldAccessExpr) {
            return Ok(false);
        }
        Ok(!self.resolve(q)?.is_some_and(|d| d.kind.is_variable()))
    }

    fn is_last_position(&self, target: &Expr, index: &SyntaxNode) -> FoldResult<bool> {
        Ok(self
            .slice_position(target, index)?
            .and_then(|p| p.as_number())
            .is_some_and(|n| n.is_integer(-1)))
    }

    /// `q.length()`, `q.size()` or `q.length` of the same `q`
    fn is_full_length(&self, target: &Expr, node: &SyntaxNode) -> FoldResult<bool> {
        if !matches!(
            node.kind(),
            SyntaxKind::MethodCallExpr | SyntaxKind::FieldAccessExpr
        ) || !matches!(member_name_text(node).as_deref(), Some("length" | "size"))
            || !arguments(node).is_empty()
        {
            return Ok(false);
        }
        match qualifier(node) {
            Some(q) => Ok(self.operand(&q)? == *target),
            None => Ok(false),
        }
    }
}

/// A boxed value or string built from one literal argument
///
/// Numbers stand for themselves; a string is parsed the way the class's
/// constructor would parse it.
fn constructor_expression(class: &str, literal: &SyntaxNode) -> Option<Expr> {
    let value = literals::literal(literal)?;
    if value.as_number().is_some() {
        return Some(value);
    }
    let ExprKind::String(text) = &value.kind else {
        return None;
    };
    let text = text.trim();
    let kind = match class {
        "java.lang.Long" | "java.lang.Integer" | "java.math.BigInteger" => {
            ExprKind::Number(Number::Integer(text.parse().ok()?))
        }
        "java.lang.Float" | "java.lang.Double" => {
            ExprKind::Number(Number::Decimal(text.parse().ok()?))
        }
        "java.math.BigDecimal" => match text.parse::<i64>() {
            Ok(n) => ExprKind::Number(Number::Integer(n)),
            Err(_) => ExprKind::Number(Number::Decimal(text.parse().ok()?)),
        },
        "java.lang.String" | "java.lang.StringBuilder" => ExprKind::String(text.to_string()),
        _ => return None,
    };
    Some(Expr {
        kind,
        ..value
    })
}

fn respan_to(expr: Expr, node: &SyntaxNode) -> Expr {
    expr.respanned(Some(node_span(node)), Some(SyntaxNodePtr::new(node)))
}

fn capitalized_after(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_uppercase())
}

/// Property name behind an accessor: `getURLPath` is `urlPath`, `isOpen` is `open`
pub fn guess_property_name(method: &str) -> String {
    let stripped = ["get", "set", "is"]
        .iter()
        .find_map(|prefix| method.strip_prefix(prefix))
        .unwrap_or(method);
    let chars: Vec<char> = stripped.chars().collect();

    let mut out = String::with_capacity(stripped.len());
    let mut lowering = true;
    for (i, c) in chars.iter().enumerate() {
        let next_upper = chars.get(i + 1).is_none_or(|n| n.is_uppercase());
        if lowering && c.is_uppercase() && (i == 0 || next_upper) {
            out.extend(c.to_lowercase());
        } else {
            lowering = false;
            out.push(*c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::super::testing::{expr, stmt, StubResolver};
    use super::*;
    use crate::format::format;
    use crate::simplify::simplify;

    const DECIMAL: &str = "java.math.BigDecimal";

    fn fold_node(source: &str, node: &SyntaxNode, resolver: &StubResolver) -> Option<String> {
        Recognizer::new(source, resolver)
            .recognize(node, false)
            .unwrap()
            .map(|e| format(&simplify(e)))
    }

    fn fold(source: &str, resolver: &StubResolver) -> Option<String> {
        fold_node(source, &expr(source), resolver)
    }

    fn decimals() -> StubResolver {
        StubResolver::default()
            .local("a", DECIMAL)
            .local("b", DECIMAL)
            .local("c", DECIMAL)
            .local("n", "int")
    }

    #[test]
    fn test_property_names() {
        assert_eq!(guess_property_name("getURLPath"), "urlPath");
        assert_eq!(guess_property_name("isOpen"), "open");
        assert_eq!(guess_property_name("getX"), "x");
        assert_eq!(guess_property_name("setFirstName"), "firstName");
        assert_eq!(guess_property_name("getURL"), "url");
    }

    #[test]
    fn test_decimal_arithmetic() {
        let resolver = decimals()
            .method("add", DECIMAL, &[DECIMAL], DECIMAL)
            .method("multiply", DECIMAL, &[DECIMAL], DECIMAL);
        assert_eq!(fold("a.add(b)", &resolver).as_deref(), Some("a + b"));
        assert_eq!(
            fold("a.add(b).multiply(c)", &resolver).as_deref(),
            Some("(a + b) * c")
        );
    }

    #[test]
    fn test_derived_operations() {
        let resolver = decimals().method("scaleByPowerOfTen", DECIMAL, &["int"], DECIMAL);
        assert_eq!(fold("a.scaleByPowerOfTen(n)", &resolver).as_deref(), Some("a * 10ⁿ"));

        let resolver = decimals().method("negate", DECIMAL, &[], DECIMAL);
        assert_eq!(fold("a.negate()", &resolver).as_deref(), Some("-a"));

        let resolver = decimals().method("plus", DECIMAL, &[], DECIMAL);
        assert_eq!(fold("a.plus()", &resolver).as_deref(), Some("a"));
    }

    #[test]
    fn test_unsupported_class_is_left_alone() {
        let resolver = StubResolver::default()
            .local("w", "com.example.Widget")
            .local("x", "int")
            .method("add", "com.example.Widget", &["int"], "void");
        assert_eq!(fold("w.add(x)", &resolver), None);
    }

    #[test]
    fn test_collections() {
        let list = "java.util.List<java.lang.String>";
        let resolver = StubResolver::default()
            .local("list", list)
            .local("s", "java.lang.String")
            .local("i", "int")
            .method("add", "java.util.List", &["E"], "boolean")
            .method("get", "java.util.List", &["int"], "E");
        assert_eq!(fold("list.add(s)", &resolver).as_deref(), Some("list += s"));
        assert_eq!(fold("list.get(0)", &resolver).as_deref(), Some("list[0]"));
        assert_eq!(fold("list.get(i)", &resolver).as_deref(), Some("list[i]"));
        assert_eq!(
            fold("list.get(list.size() - 1)", &resolver).as_deref(),
            Some("list[-1]")
        );
    }

    #[test]
    fn test_remove_by_index_is_not_a_collection_removal() {
        let resolver = StubResolver::default()
            .local("list", "java.util.List<java.lang.String>")
            .method("remove", "java.util.List", &["int"], "E");
        assert_eq!(fold("list.remove(0)", &resolver), None);

        let resolver = StubResolver::default()
            .local("list", "java.util.List<java.lang.String>")
            .local("s", "java.lang.String")
            .method("remove", "java.util.List", &["java.lang.Object"], "boolean");
        assert_eq!(fold("list.remove(s)", &resolver).as_deref(), Some("list -= s"));
    }

    #[test]
    fn test_substrings() {
        let resolver = StubResolver::default()
            .local("s", "java.lang.String")
            .local("i", "int")
            .method("substring", "java.lang.String", &["int", "int"], "java.lang.String");
        assert_eq!(fold("s.substring(1)", &resolver).as_deref(), Some("s[1:]"));
        assert_eq!(
            fold("s.substring(0, s.length() - 2)", &resolver).as_deref(),
            Some("s[:-2]")
        );
        assert_eq!(fold("s.substring(i, s.length())", &resolver).as_deref(), Some("s[i:]"));
        assert_eq!(fold("s.substring(i, 4)", &resolver).as_deref(), Some("s[i:4]"));
    }

    #[test]
    fn test_math_functions() {
        let math = "java.lang.Math";
        let vars = || StubResolver::default().local("x", "double").local("y", "double");

        let resolver = vars().method("sqrt", math, &["double"], "double");
        assert_eq!(fold("Math.sqrt(x)", &resolver).as_deref(), Some("√x"));

        let resolver = vars().method("hypot", math, &["double", "double"], "double");
        assert_eq!(fold("Math.hypot(x, y)", &resolver).as_deref(), Some("√(x² + y²)"));

        let resolver = vars().method("exp", math, &["double"], "double");
        assert_eq!(fold("Math.exp(x)", &resolver).as_deref(), Some("𝑒ˣ"));

        let resolver = vars().method("atan2", math, &["double", "double"], "double");
        assert_eq!(fold("Math.atan2(y, x)", &resolver).as_deref(), Some("atan2(y, x)"));

        let resolver = vars().method("random", math, &[], "double");
        assert_eq!(fold("Math.random()", &resolver).as_deref(), Some("random()"));
    }

    #[test]
    fn test_static_math_names_on_instances_are_ignored() {
        let resolver = decimals().method("round", DECIMAL, &["java.math.MathContext"], DECIMAL);
        assert_eq!(fold("a.round(n)", &resolver), None);
    }

    #[test]
    fn test_value_of() {
        let resolver = StubResolver::default().method("valueOf", DECIMAL, &["long"], DECIMAL);
        assert_eq!(fold("BigDecimal.valueOf(2)", &resolver).as_deref(), Some("2"));

        let resolver = StubResolver::default().method(
            "valueOf",
            "java.lang.Integer",
            &["java.lang.String"],
            "java.lang.Integer",
        );
        assert_eq!(fold(r#"Integer.valueOf("12")"#, &resolver).as_deref(), Some("12"));
    }

    #[test]
    fn test_constructors() {
        let source = r#"new BigDecimal("1.5")"#;
        let resolver = StubResolver::default().typed(source, DECIMAL);
        assert_eq!(fold(source, &resolver).as_deref(), Some("1.5"));

        let source = "new ArrayList<>()";
        let resolver = StubResolver::default().typed(source, "java.util.ArrayList<java.lang.String>");
        assert_eq!(fold(source, &resolver).as_deref(), Some("[]"));

        let source = "new StringBuilder()";
        let resolver = StubResolver::default().typed(source, "java.lang.StringBuilder");
        assert_eq!(fold(source, &resolver).as_deref(), Some(r#""""#));

        let resolver = StubResolver::default();
        assert_eq!(fold("new int[] {1, 2}", &resolver).as_deref(), Some("[1, 2]"));

        let source = "new Widget()";
        let resolver = StubResolver::default().typed(source, "com.example.Widget");
        assert_eq!(fold(source, &resolver), None);
    }

    #[test]
    fn test_list_literals() {
        let resolver = StubResolver::default()
            .local("x", "int")
            .method("asList", "java.util.Arrays", &["T[]"], "java.util.List<T>");
        assert_eq!(fold("Arrays.asList(x, 2)", &resolver).as_deref(), Some("[x, 2]"));

        let resolver = StubResolver::default()
            .local("arr", "int[]")
            .typed("arr", "int[]")
            .method("asList", "java.util.Arrays", &["T[]"], "java.util.List<T>");
        assert_eq!(fold("Arrays.asList(arr)", &resolver), None);
    }

    #[test]
    fn test_getters_and_setters() {
        let resolver = StubResolver::default().local("n", "java.lang.String");
        assert_eq!(fold("person.getName()", &resolver).as_deref(), Some("person.name"));
        assert_eq!(fold("isOpen()", &resolver).as_deref(), Some("open"));
        assert_eq!(fold("person.getaway()", &resolver), None);

        // setters only fold as whole statements
        assert_eq!(fold("person.setName(n)", &resolver), None);
        let source = "person.setName(n);";
        let tree = stmt(source);
        let call = tree.children().next().unwrap();
        assert_eq!(
            fold_node(source, &call, &resolver).as_deref(),
            Some("person.name = n")
        );
    }

    #[test]
    fn test_stream_collect() {
        let source = "names.stream().collect(Collectors.toList())";
        let resolver = StubResolver::default()
            .method("collect", "java.util.stream.Stream", &["java.util.stream.Collector"], "R")
            .method("stream", "java.util.Collection", &[], "java.util.stream.Stream<E>");
        let tree = expr(source);
        let recognizer = Recognizer::new(source, &resolver);

        let collect = recognizer.recognize(&tree, false).unwrap().unwrap();
        assert_eq!(format(&collect), "toList()");
        // from `collect` to the end of the call
        assert_eq!(collect.span, Some(15..source.len()));

        let stream_call = tree.children().next().unwrap();
        let stream = recognizer.recognize(&stream_call, false).unwrap().unwrap();
        assert_eq!(stream.kind_name(), "StreamExpression");
        assert_eq!(stream.span, Some(6..14));
    }
}
