//! Matching syntax nodes against the known verbose idioms
//!
//! Each rule inspects node kinds and resolved symbols, never raw text
//! patterns. The first rule that matches wins; when none does and the
//! caller asked for a synthetic result, the node is wrapped verbatim with
//! whatever its descendants matched.

mod calls;
mod control;
mod literals;
mod operators;

use terse_syntax_tree::helpers::{member_name_text, node_span, operator_kind, qualifier};
use terse_syntax_tree::{SyntaxKind, SyntaxNode};
use tracing::trace;

use crate::error::FoldResult;
use crate::expr::{
    java_binary_precedence, Expr, ExprKind, Number, ASSIGNMENT, ATOM, CONDITIONAL, LAMBDA, UNARY,
};
use crate::known::{is_supported_class, is_supported_type, Constant, CONSTANTS};
use crate::resolver::{DeclKind, Declaration, Resolver};

pub use calls::guess_property_name;
pub use literals::{decode_char, decode_float, decode_integer, decode_string};

/// Turns syntax nodes into [`Expr`]s with the help of a host [`Resolver`]
pub struct Recognizer<'a> {
    source: &'a str,
    resolver: &'a dyn Resolver,
}

impl<'a> Recognizer<'a> {
    pub fn new(source: &'a str, resolver: &'a dyn Resolver) -> Self {
        Self { source, resolver }
    }

    /// Recognize `node`
    ///
    /// With `synthetic` set a node no rule matches still yields a
    /// `Synthetic` expression, so operand positions always produce
    /// something whose descendants can fold.
    pub fn recognize(&self, node: &SyntaxNode, synthetic: bool) -> FoldResult<Option<Expr>> {
        let matched = match node.kind() {
            SyntaxKind::ForStatement => self.for_statement(node)?,
            SyntaxKind::IfStatement => self.short_elvis(node)?,
            SyntaxKind::ArrayAccessExpr => self.array_access(node)?,
            SyntaxKind::MethodCallExpr => self.method_call(node)?,
            SyntaxKind::NameRef | SyntaxKind::FieldAccessExpr => self.reference(node, false)?,
            SyntaxKind::NewExpr => self.new_expr(node)?,
            SyntaxKind::Literal => literals::literal(node),
            SyntaxKind::AssignmentExpr => self.assignment(node)?,
            SyntaxKind::BinaryExpr => self.binary(node)?,
            SyntaxKind::ConditionalExpr => self.elvis(node)?,
            SyntaxKind::PrefixExpr => self.prefix(node)?,
            SyntaxKind::ParenExpr => self.paren(node, synthetic)?,
            SyntaxKind::CastExpr => self.cast(node)?,
            SyntaxKind::LocalVariableDeclaration | SyntaxKind::Parameter => {
                self.variable_declaration(node)?
            }
            _ => None,
        };

        match matched {
            Some(expr) => {
                trace!(rule = expr.kind_name(), span = ?expr.span, "recognized");
                Ok(Some(expr))
            }
            None if synthetic => self.synthetic(node).map(Some),
            None => Ok(None),
        }
    }

    /// Recognize in operand position, where a result always exists
    fn operand(&self, node: &SyntaxNode) -> FoldResult<Expr> {
        match self.recognize(node, true)? {
            Some(expr) => Ok(expr),
            None => self.synthetic(node),
        }
    }

    fn synthetic(&self, node: &SyntaxNode) -> FoldResult<Expr> {
        let mut children = Vec::new();
        self.collect_children(node, &mut children)?;
        Ok(Expr::new(
            ExprKind::Synthetic {
                text: self.text(node).to_string(),
                children,
                precedence: synthetic_precedence(node),
            },
            node,
        ))
    }

    /// Matches among the descendants of `node`, outermost first
    fn collect_children(&self, node: &SyntaxNode, out: &mut Vec<Expr>) -> FoldResult<()> {
        for child in node.children() {
            let expr = self.recognize(&child, false)?;
            let covers_child = expr
                .as_ref()
                .is_some_and(|e| e.span.as_ref() == Some(&node_span(&child)));
            if let Some(expr) = expr {
                out.push(expr);
            }
            if !covers_child {
                self.collect_children(&child, out)?;
            }
        }
        Ok(())
    }

    fn text(&self, node: &SyntaxNode) -> &'a str {
        self.source.get(node_span(node)).unwrap_or_default()
    }

    fn resolve(&self, node: &SyntaxNode) -> FoldResult<Option<Declaration>> {
        self.resolver.resolve(node)
    }

    /// Whether both nodes resolve to the same declaration
    fn same_declaration(&self, a: &SyntaxNode, b: &SyntaxNode) -> FoldResult<bool> {
        let (Some(a), Some(b)) = (self.resolve(a)?, self.resolve(b)?) else {
            return Ok(false);
        };
        Ok(a.id == b.id)
    }

    /// Whether `node` refers to the declaration `target`
    fn refers_to(&self, node: &SyntaxNode, target: &Declaration) -> FoldResult<bool> {
        Ok(self.resolve(node)?.is_some_and(|d| d.id == target.id))
    }

    /// A name or field access, folding well-known constants
    fn reference(&self, node: &SyntaxNode, copy: bool) -> FoldResult<Option<Expr>> {
        let Some(name) = member_name_text(node) else {
            return Ok(None);
        };
        if let Some(constant) = CONSTANTS.get(name.as_str()) {
            let declared_by_supported = self.resolve(node)?.is_some_and(|d| {
                d.kind == DeclKind::Field && d.container.as_deref().is_some_and(is_supported_class)
            });
            if !declared_by_supported {
                return Ok(None);
            }
            let kind = match constant {
                Constant::Number(n) => ExprKind::Number(Number::Integer(*n)),
                Constant::Symbol(symbol) => ExprKind::Variable {
                    name: symbol.to_string(),
                    copy,
                },
            };
            return Ok(Some(Expr::new(kind, node)));
        }
        self.variable(node, copy)
    }

    /// A name of a supported type that reads exactly as its declaration
    fn variable(&self, node: &SyntaxNode, copy: bool) -> FoldResult<Option<Expr>> {
        if !matches!(node.kind(), SyntaxKind::NameRef | SyntaxKind::FieldAccessExpr) {
            return Ok(None);
        }
        let Some(decl) = self.resolve(node)? else {
            return Ok(None);
        };
        let supported = decl
            .ty
            .as_ref()
            .is_some_and(|ty| is_supported_type(&ty.erasure()));
        if !decl.is_variable() || decl.name != self.text(node) || !supported {
            return Ok(None);
        }
        Ok(Some(Expr::new(
            ExprKind::Variable {
                name: decl.name,
                copy,
            },
            node,
        )))
    }
}

/// Whether `node` is the qualifier of its parent call or field access
fn is_qualifier(node: &SyntaxNode) -> bool {
    node.parent()
        .and_then(|parent| qualifier(&parent))
        .is_some_and(|q| q == *node)
}

fn is_null(node: &SyntaxNode) -> bool {
    node.kind() == SyntaxKind::Literal
        && node
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .any(|t| t.kind() == SyntaxKind::Null)
}

fn synthetic_precedence(node: &SyntaxNode) -> u8 {
    match node.kind() {
        SyntaxKind::BinaryExpr => operator_kind(node).map_or(ATOM, java_binary_precedence),
        SyntaxKind::ConditionalExpr => CONDITIONAL,
        SyntaxKind::AssignmentExpr => ASSIGNMENT,
        SyntaxKind::LambdaExpr => LAMBDA,
        SyntaxKind::CastExpr | SyntaxKind::PrefixExpr => UNARY,
        _ => ATOM,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! A resolver stub keyed by node text, enough to drive single rules

    use std::collections::HashMap;

    use terse_lexer::significant_tokens;
    use terse_parser::{parse_expr_from_source, parse_stmt_from_source};
    use terse_syntax_tree::SyntaxNode;

    use crate::error::{FoldError, FoldResult};
    use crate::resolver::{DeclId, DeclKind, Declaration, JavaType, Resolver};

    #[derive(Default)]
    pub struct StubResolver {
        names: HashMap<String, Declaration>,
        methods: HashMap<String, Declaration>,
        types: HashMap<String, JavaType>,
        not_ready: bool,
    }

    impl StubResolver {
        /// A local variable `name` of type `ty`
        pub fn local(mut self, name: &str, ty: &str) -> Self {
            let id = DeclId(self.names.len() as u32 + 1);
            self.types.insert(name.to_string(), JavaType::new(ty));
            self.names.insert(
                name.to_string(),
                Declaration {
                    id,
                    kind: DeclKind::Local,
                    name: name.to_string(),
                    ty: Some(JavaType::new(ty)),
                    container: None,
                    params: Vec::new(),
                    is_final: false,
                },
            );
            self
        }

        /// A static field `name` declared by `class`
        pub fn constant(mut self, name: &str, class: &str, ty: &str) -> Self {
            let id = DeclId(1000 + self.names.len() as u32);
            self.names.insert(
                name.to_string(),
                Declaration {
                    id,
                    kind: DeclKind::Field,
                    name: name.to_string(),
                    ty: Some(JavaType::new(ty)),
                    container: Some(class.to_string()),
                    params: Vec::new(),
                    is_final: true,
                },
            );
            self
        }

        /// A method `name` declared by `class`
        pub fn method(mut self, name: &str, class: &str, params: &[&str], ret: &str) -> Self {
            let id = DeclId(2000 + self.methods.len() as u32);
            self.methods.insert(
                name.to_string(),
                Declaration {
                    id,
                    kind: DeclKind::Method,
                    name: name.to_string(),
                    ty: Some(JavaType::new(ret)),
                    container: Some(class.to_string()),
                    params: params.iter().map(|p| JavaType::new(*p)).collect(),
                    is_final: false,
                },
            );
            self
        }

        /// Every query fails as if the index were still building
        pub fn unavailable(mut self) -> Self {
            self.not_ready = true;
            self
        }

        pub fn typed(mut self, text: &str, ty: &str) -> Self {
            self.types.insert(text.to_string(), JavaType::new(ty));
            self
        }

        fn ready(&self) -> FoldResult<()> {
            if self.not_ready {
                Err(FoldError::IndexNotReady)
            } else {
                Ok(())
            }
        }
    }

    impl Resolver for StubResolver {
        fn resolve(&self, node: &SyntaxNode) -> FoldResult<Option<Declaration>> {
            use terse_syntax_tree::helpers::member_name_text;
            use terse_syntax_tree::SyntaxKind;
            self.ready()?;
            let Some(name) = member_name_text(node) else {
                return Ok(None);
            };
            Ok(match node.kind() {
                SyntaxKind::MethodCallExpr => self.methods.get(&name).cloned(),
                _ => self.names.get(&name).cloned(),
            })
        }

        fn declared(&self, node: &SyntaxNode) -> FoldResult<Option<Declaration>> {
            use terse_syntax_tree::helpers::identifier_text;
            self.ready()?;
            Ok(identifier_text(node).and_then(|name| self.names.get(&name).cloned()))
        }

        fn type_of(&self, node: &SyntaxNode) -> FoldResult<Option<JavaType>> {
            self.ready()?;
            Ok(self.types.get(&node.text().to_string()).cloned())
        }
    }

    pub fn expr(source: &str) -> SyntaxNode {
        let result = parse_expr_from_source(source, significant_tokens(source).into_iter());
        assert!(result.is_ok(), "{source}: {:?}", result.errors);
        result.tree
    }

    pub fn stmt(source: &str) -> SyntaxNode {
        let result = parse_stmt_from_source(source, significant_tokens(source).into_iter());
        assert!(result.is_ok(), "{source}: {:?}", result.errors);
        result.tree
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{expr, StubResolver};
    use super::*;
    use crate::format::format;

    #[test]
    fn test_unmatched_node_is_synthetic_only_on_request() {
        let source = "foo(a)";
        let tree = expr(source);
        let resolver = StubResolver::default();
        let recognizer = Recognizer::new(source, &resolver);

        assert!(recognizer.recognize(&tree, false).unwrap().is_none());
        let synthetic = recognizer.recognize(&tree, true).unwrap().unwrap();
        assert_eq!(synthetic.kind_name(), "Synthetic");
        assert_eq!(format(&synthetic), "foo(a)");
    }

    #[test]
    fn test_synthetic_carries_matched_descendants() {
        let source = "foo(a.add(b))";
        let tree = expr(source);
        let resolver = StubResolver::default()
            .local("a", "java.math.BigDecimal")
            .local("b", "java.math.BigDecimal")
            .method("add", "java.math.BigDecimal", &["java.math.BigDecimal"], "java.math.BigDecimal");
        let recognizer = Recognizer::new(source, &resolver);

        let synthetic = recognizer.recognize(&tree, true).unwrap().unwrap();
        assert_eq!(format(&synthetic), "foo(a + b)");
    }

    #[test]
    fn test_variables_need_a_supported_type() {
        let source = "a";
        let tree = expr(source);
        let resolver = StubResolver::default().local("a", "int");
        let recognizer = Recognizer::new(source, &resolver);
        assert!(recognizer.recognize(&tree, false).unwrap().unwrap().is_variable());

        let resolver = StubResolver::default().local("a", "com.example.Widget");
        let recognizer = Recognizer::new(source, &resolver);
        assert!(recognizer.recognize(&tree, false).unwrap().is_none());
    }

    #[test]
    fn test_constants_need_a_supported_declaring_class() {
        let source = "BigDecimal.ONE";
        let tree = expr(source);
        let resolver =
            StubResolver::default().constant("ONE", "java.math.BigDecimal", "java.math.BigDecimal");
        let recognizer = Recognizer::new(source, &resolver);
        let one = recognizer.recognize(&tree, false).unwrap().unwrap();
        assert_eq!(format(&one), "1");

        let source = "Math.PI";
        let tree = expr(source);
        let resolver = StubResolver::default().constant("PI", "java.lang.Math", "double");
        let recognizer = Recognizer::new(source, &resolver);
        assert_eq!(format(&recognizer.recognize(&tree, false).unwrap().unwrap()), "π");

        let resolver = StubResolver::default().constant("PI", "com.example.Circle", "double");
        let recognizer = Recognizer::new(source, &resolver);
        assert!(recognizer.recognize(&tree, false).unwrap().is_none());
    }

    #[test]
    fn test_index_not_ready_propagates() {
        let source = "a + b";
        let tree = expr(source);
        let resolver = StubResolver::default().unavailable();
        let recognizer = Recognizer::new(source, &resolver);
        assert_eq!(
            recognizer.recognize(&tree, true),
            Err(crate::error::FoldError::IndexNotReady)
        );
    }
}
