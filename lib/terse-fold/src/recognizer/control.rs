//! Loops, null checks and local declarations

use terse_span::cover;
use terse_syntax_tree::helpers::{
    arguments, conditional_parts, declarators, expr_children, find_child, find_token,
    has_final_modifier, identifier, if_parts, initializer, loop_body, member_name_text, node_span,
    operand, operands, operator_kind, qualifier, sides, skip_parens, stmt_children, token_span,
    type_node,
};
use terse_syntax_tree::{SyntaxKind, SyntaxNode};

use super::{is_null, Recognizer};
use crate::error::FoldResult;
use crate::expr::{Expr, ExprKind, ForEachParts};
use crate::resolver::Declaration;

/// The pieces of `for (T i = start; i < end; i++)` the loop rules look at
struct CountedLoop {
    declaration: Declaration,
    variable: Expr,
    start: Expr,
    end: Expr,
    bound: SyntaxNode,
    end_inclusive: bool,
}

impl Recognizer<'_> {
    pub(super) fn for_statement(&self, node: &SyntaxNode) -> FoldResult<Option<Expr>> {
        let Some(counted) = self.counted_loop(node)? else {
            return Ok(None);
        };
        if let Some(for_each) = self.for_each(node, &counted)? {
            return Ok(Some(for_each));
        }

        let (Some(lparen), Some(rparen)) = (
            find_token(node, SyntaxKind::LParen),
            find_token(node, SyntaxKind::RParen),
        ) else {
            return Ok(None);
        };
        let mut reads_index = false;
        if let Some(body) = loop_body(node) {
            for name in body.descendants().filter(|n| n.kind() == SyntaxKind::NameRef) {
                if self.refers_to(&name, &counted.declaration)? {
                    reads_index = true;
                    break;
                }
            }
        }

        let span = token_span(&lparen).end..token_span(&rparen).start;
        Ok(Some(Expr::spanned(
            ExprKind::ForStatement {
                variable: Box::new(counted.variable),
                start: Box::new(counted.start),
                end: Box::new(counted.end),
                end_inclusive: counted.end_inclusive,
                bounds_only: !reads_index,
            },
            span,
            node,
        )))
    }

    fn counted_loop(&self, node: &SyntaxNode) -> FoldResult<Option<CountedLoop>> {
        let Some(local) = find_child(node, SyntaxKind::ForInit)
            .and_then(|init| find_child(&init, SyntaxKind::LocalVariableDeclaration))
        else {
            return Ok(None);
        };
        let declared = declarators(&local);
        let [declarator] = declared.as_slice() else {
            return Ok(None);
        };
        let Some(start) = initializer(declarator) else {
            return Ok(None);
        };

        let Some(update) = find_child(node, SyntaxKind::ForUpdate) else {
            return Ok(None);
        };
        let steps: Vec<_> = expr_children(&update).collect();
        let [step] = steps.as_slice() else {
            return Ok(None);
        };
        if step.kind() != SyntaxKind::PostfixExpr || operator_kind(step) != Some(SyntaxKind::PlusPlus)
        {
            return Ok(None);
        }
        let Some(stepped) = operand(step).filter(|n| n.kind() == SyntaxKind::NameRef) else {
            return Ok(None);
        };

        let Some(condition) = find_child(node, SyntaxKind::ForCondition)
            .and_then(|c| expr_children(&c).next())
            .filter(|c| c.kind() == SyntaxKind::BinaryExpr && operands(c).len() == 2)
        else {
            return Ok(None);
        };
        let end_inclusive = match operator_kind(&condition) {
            Some(SyntaxKind::Lt) => false,
            Some(SyntaxKind::LtEq) => true,
            _ => return Ok(None),
        };
        let Some((tested, bound)) = sides(&condition) else {
            return Ok(None);
        };
        if tested.kind() != SyntaxKind::NameRef {
            return Ok(None);
        }

        let Some(declaration) = self.resolver.declared(declarator)? else {
            return Ok(None);
        };
        if !self.refers_to(&stepped, &declaration)? || !self.refers_to(&tested, &declaration)? {
            return Ok(None);
        }
        let integral = declaration
            .ty
            .as_ref()
            .is_some_and(|ty| matches!(ty.as_str(), "int" | "long"));
        let Some(ident) = identifier(declarator).filter(|_| integral) else {
            return Ok(None);
        };

        let variable = Expr::spanned(
            ExprKind::Variable {
                name: declaration.name.clone(),
                copy: false,
            },
            token_span(&ident),
            declarator,
        );
        Ok(Some(CountedLoop {
            variable,
            start: self.operand(&start)?,
            end: self.operand(&bound)?,
            declaration,
            bound,
            end_inclusive,
        }))
    }

    /// A counted loop whose body starts by fetching element `i` of the bound collection
    fn for_each(&self, node: &SyntaxNode, counted: &CountedLoop) -> FoldResult<Option<Expr>> {
        if counted.end_inclusive || !counted.start.as_number().is_some_and(|n| n.is_integer(0)) {
            return Ok(None);
        }
        let Some(body) = loop_body(node).filter(|b| b.kind() == SyntaxKind::Block) else {
            return Ok(None);
        };
        // a body that moves the index skips elements
        if self.is_reassigned(&body, std::slice::from_ref(&counted.declaration))? {
            return Ok(None);
        }
        let Some(first) =
            stmt_children(&body).next().filter(|s| s.kind() == SyntaxKind::LocalVariableStatement)
        else {
            return Ok(None);
        };
        let declared = declarators(&first);
        let [element] = declared.as_slice() else {
            return Ok(None);
        };
        let (Some(fetch), Some(element_name)) = (
            initializer(element),
            identifier(element).map(|t| t.text().to_string()),
        ) else {
            return Ok(None);
        };

        let Some(collection) = self.fetched_collection(&fetch, counted)? else {
            return Ok(None);
        };

        let mut uses = 0;
        for name in body.descendants().filter(|n| n.kind() == SyntaxKind::NameRef) {
            if self.refers_to(&name, &counted.declaration)? {
                uses += 1;
            }
        }

        let (Some(init), Some(rparen)) = (
            find_child(node, SyntaxKind::ForInit),
            find_token(node, SyntaxKind::RParen),
        ) else {
            return Ok(None);
        };
        let header = node_span(&init).start..token_span(&rparen).start;
        let declaration = node_span(&first);
        let parts = ForEachParts {
            index: counted.declaration.name.clone(),
            element: element_name,
            collection: Box::new(collection),
            header: header.clone(),
            declaration: declaration.clone(),
        };
        let kind = if uses == 1 {
            ExprKind::ForEachStatement(parts)
        } else {
            ExprKind::ForEachIndexedStatement(parts)
        };
        Ok(Some(Expr::spanned(kind, cover(&header, &declaration), node)))
    }

    /// The collection `fetch` reads at the loop index, when the loop bound is its length
    fn fetched_collection(
        &self,
        fetch: &SyntaxNode,
        counted: &CountedLoop,
    ) -> FoldResult<Option<Expr>> {
        let bound = &counted.bound;
        let (collection, index, bound_owner) = match fetch.kind() {
            // T x = array[i]; with i < array.length
            SyntaxKind::ArrayAccessExpr => {
                let Some((array, index)) = sides(fetch) else {
                    return Ok(None);
                };
                let is_length = bound.kind() == SyntaxKind::FieldAccessExpr
                    && member_name_text(bound).as_deref() == Some("length");
                if !is_length {
                    return Ok(None);
                }
                (array, index, qualifier(bound))
            }
            // T x = list.get(i); with i < list.size()
            SyntaxKind::MethodCallExpr => {
                let args = arguments(fetch);
                let ([index], Some(list)) = (args.as_slice(), qualifier(fetch)) else {
                    return Ok(None);
                };
                let is_size = bound.kind() == SyntaxKind::MethodCallExpr
                    && member_name_text(bound).as_deref() == Some("size")
                    && member_name_text(fetch).as_deref() == Some("get");
                if !is_size {
                    return Ok(None);
                }
                (list, index.clone(), qualifier(bound))
            }
            _ => return Ok(None),
        };

        if index.kind() != SyntaxKind::NameRef || !self.refers_to(&index, &counted.declaration)? {
            return Ok(None);
        }
        let Some(owner) = bound_owner else {
            return Ok(None);
        };
        if !self.same_declaration(&collection, &owner)? {
            return Ok(None);
        }
        self.operand(&collection).map(Some)
    }

    /// `if (x != null) x.call();` as `x?.call();`
    pub(super) fn short_elvis(&self, node: &SyntaxNode) -> FoldResult<Option<Expr>> {
        let Some((condition, then_branch, None)) = if_parts(node) else {
            return Ok(None);
        };
        let Some(checked) = null_checked(&condition) else {
            return Ok(None);
        };
        if !is_guardable(&checked) {
            return Ok(None);
        }

        let statement = if then_branch.kind() == SyntaxKind::Block {
            let statements: Vec<_> = stmt_children(&then_branch).collect();
            let [only] = statements.as_slice() else {
                return Ok(None);
            };
            only.clone()
        } else {
            then_branch
        };
        let Some(found) = self.find_same_qualifier(&statement, &checked)? else {
            return Ok(None);
        };
        // any other use would read as null-safe too
        let mut uses = 0;
        for reference in statement.descendants().filter(|n| {
            matches!(
                n.kind(),
                SyntaxKind::NameRef | SyntaxKind::FieldAccessExpr | SyntaxKind::MethodCallExpr
            )
        }) {
            if self.same_reference(&reference, &checked)? {
                uses += 1;
            }
        }
        if uses != 1 {
            return Ok(None);
        }

        Ok(Some(Expr::new(
            ExprKind::ShortElvis {
                condition: Box::new(self.operand(&condition)?),
                body: Box::new(self.operand(&statement)?),
                elided: vec![node_span(&found)],
            },
            node,
        )))
    }

    /// `x != null ? x.call() : other` as `x?.call() ?: other`
    pub(super) fn elvis(&self, node: &SyntaxNode) -> FoldResult<Option<Expr>> {
        let Some((condition, then_branch, else_branch)) = conditional_parts(node) else {
            return Ok(None);
        };
        let Some(checked) = null_checked(&condition) else {
            return Ok(None);
        };
        if !is_guardable(&checked) {
            return Ok(None);
        }
        let Some(target) = self.resolve(&checked)? else {
            return Ok(None);
        };

        let mut elided = Vec::new();
        for reference in then_branch.descendants().filter(|n| {
            matches!(
                n.kind(),
                SyntaxKind::NameRef | SyntaxKind::FieldAccessExpr | SyntaxKind::MethodCallExpr
            )
        }) {
            if self.refers_to(&reference, &target)? {
                elided.push(node_span(&reference));
            }
        }
        if elided.is_empty() {
            return Ok(None);
        }

        Ok(Some(Expr::new(
            ExprKind::Elvis {
                condition: Box::new(self.operand(&condition)?),
                then_branch: Box::new(self.operand(&then_branch)?),
                else_branch: Box::new(self.operand(&else_branch)?),
                elided,
            },
            node,
        )))
    }

    /// The leading receiver of `node` that reads the same as `checked`
    fn find_same_qualifier(
        &self,
        node: &SyntaxNode,
        checked: &SyntaxNode,
    ) -> FoldResult<Option<SyntaxNode>> {
        if node.kind().is_statement() {
            return match node.first_child() {
                Some(child) => self.find_same_qualifier(&child, checked),
                None => Ok(None),
            };
        }
        if self.same_reference(node, checked)? {
            return Ok(Some(node.clone()));
        }
        match qualifier(node) {
            Some(q) => self.find_same_qualifier(&q, checked),
            None => Ok(None),
        }
    }

    /// Whether two references or getter chains name the same thing
    fn same_reference(&self, a: &SyntaxNode, b: &SyntaxNode) -> FoldResult<bool> {
        let is_ref = |n: &SyntaxNode| {
            matches!(n.kind(), SyntaxKind::NameRef | SyntaxKind::FieldAccessExpr)
        };
        if is_ref(a) && is_ref(b) {
            return Ok(member_name_text(a) == member_name_text(b) && self.same_declaration(a, b)?);
        }
        if a.kind() != SyntaxKind::MethodCallExpr || b.kind() != SyntaxKind::MethodCallExpr {
            return Ok(false);
        }
        if member_name_text(a) != member_name_text(b) || !self.same_declaration(a, b)? {
            return Ok(false);
        }
        match (qualifier(a), qualifier(b)) {
            (None, None) => Ok(true),
            (Some(qa), Some(qb)) => self.same_reference(&qa, &qb),
            _ => Ok(false),
        }
    }

    /// `var`/`val` over the type of a local declaration or for-each parameter
    pub(super) fn variable_declaration(&self, node: &SyntaxNode) -> FoldResult<Option<Expr>> {
        let Some(parent) = node.parent() else {
            return Ok(None);
        };
        let (scope, declared) = match (node.kind(), parent.kind()) {
            // a loop variable's scope includes the update clause
            (
                SyntaxKind::LocalVariableDeclaration,
                SyntaxKind::LocalVariableStatement | SyntaxKind::ForInit,
            ) => (parent.parent(), declarators(node)),
            (SyntaxKind::Parameter, SyntaxKind::ForEachStatement) => {
                (loop_body(&parent), vec![node.clone()])
            }
            _ => return Ok(None),
        };
        if node.kind() == SyntaxKind::LocalVariableDeclaration
            && (declared.is_empty() || declared.iter().any(|d| initializer(d).is_none()))
        {
            return Ok(None);
        }
        let Some(ty) = type_node(node) else {
            return Ok(None);
        };

        let mut declarations = Vec::with_capacity(declared.len());
        for declarator in &declared {
            match self.resolver.declared(declarator)? {
                Some(declaration) => declarations.push(declaration),
                None => return Ok(None),
            }
        }
        let reassigned = match &scope {
            Some(scope) => self.is_reassigned(scope, &declarations)?,
            None => false,
        };

        let span = node_span(node).start..node_span(&ty).end;
        Ok(Some(Expr::spanned(
            ExprKind::VariableDeclaration {
                is_final: has_final_modifier(node) || !reassigned,
            },
            span,
            node,
        )))
    }

    /// Whether any of `declarations` is assigned, incremented or decremented under `scope`
    fn is_reassigned(&self, scope: &SyntaxNode, declarations: &[Declaration]) -> FoldResult<bool> {
        for node in scope.descendants() {
            let target = match node.kind() {
                SyntaxKind::AssignmentExpr => node.first_child(),
                SyntaxKind::PostfixExpr | SyntaxKind::PrefixExpr
                    if matches!(
                        operator_kind(&node),
                        Some(SyntaxKind::PlusPlus | SyntaxKind::MinusMinus)
                    ) =>
                {
                    operand(&node)
                }
                _ => None,
            };
            let Some(target) = target.filter(|t| t.kind() == SyntaxKind::NameRef) else {
                continue;
            };
            for declaration in declarations {
                if self.refers_to(&target, declaration)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

/// The operand compared against `null` in `x != null` or `null != x`
fn null_checked(condition: &SyntaxNode) -> Option<SyntaxNode> {
    let condition = skip_parens(condition);
    if condition.kind() != SyntaxKind::BinaryExpr
        || operator_kind(&condition) != Some(SyntaxKind::BangEq)
    {
        return None;
    }
    let (left, right) = sides(&condition)?;
    if is_null(&right) {
        Some(left)
    } else if is_null(&left) {
        Some(right)
    } else {
        None
    }
}

/// Names, field accesses and argument-less getters
fn is_guardable(node: &SyntaxNode) -> bool {
    match node.kind() {
        SyntaxKind::NameRef | SyntaxKind::FieldAccessExpr => true,
        SyntaxKind::MethodCallExpr => {
            arguments(node).is_empty()
                && member_name_text(node).is_some_and(|name| name.starts_with("get"))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{expr, stmt, StubResolver};
    use super::*;
    use crate::format::format;
    use crate::simplify::simplify;

    fn recognize(source: &str, node: &SyntaxNode, resolver: &StubResolver) -> Option<Expr> {
        Recognizer::new(source, resolver)
            .recognize(node, false)
            .unwrap()
            .map(simplify)
    }

    fn fold_stmt(source: &str, resolver: &StubResolver) -> Option<String> {
        recognize(source, &stmt(source), resolver).map(|e| format(&e))
    }

    fn declaration(source: &str, resolver: &StubResolver) -> Option<String> {
        let tree = stmt(source);
        let node = tree
            .descendants()
            .find(|n| {
                matches!(
                    n.kind(),
                    SyntaxKind::LocalVariableDeclaration | SyntaxKind::Parameter
                )
            })
            .unwrap();
        recognize(source, &node, resolver).map(|e| format(&e))
    }

    fn loop_vars() -> StubResolver {
        StubResolver::default()
            .local("i", "int")
            .local("n", "int")
            .local("list", "java.util.List<java.lang.String>")
            .local("arr", "int[]")
    }

    #[test]
    fn test_counted_loop_header() {
        let resolver = loop_vars();
        let source = "for (int i = 0; i < n; i++) { foo(i); }";
        let folded = recognize(source, &stmt(source), &resolver).unwrap();
        assert_eq!(format(&folded), "i ∈ [0, n)");
        assert_eq!(folded.span, Some(5..source.find(')').unwrap()));

        assert_eq!(
            fold_stmt("for (int i = 1; i <= n - 1; i++) foo(i);", &resolver).as_deref(),
            Some("i ∈ [1, n)")
        );
        assert_eq!(
            fold_stmt("for (int i = 0; i < n + 1; i++) foo(i);", &resolver).as_deref(),
            Some("i ∈ [0, n]")
        );
    }

    #[test]
    fn test_loops_that_are_not_counted() {
        let resolver = loop_vars();
        assert_eq!(fold_stmt("for (int i = 0; i < n; i += 2) foo(i);", &resolver), None);
        assert_eq!(fold_stmt("for (int i = 0; i > n; i++) foo(i);", &resolver), None);
        assert_eq!(fold_stmt("for (int i = 0; n > i; i++) foo(i);", &resolver), None);

        let resolver = StubResolver::default().local("i", "double").local("n", "int");
        assert_eq!(fold_stmt("for (double i = 0; i < n; i++) foo(i);", &resolver), None);
    }

    #[test]
    fn test_for_each_over_a_list() {
        let resolver = loop_vars();
        let source = "for (int i = 0; i < list.size(); i++) { String s = list.get(i); print(s); }";
        let folded = recognize(source, &stmt(source), &resolver).unwrap();
        assert_eq!(format(&folded), "s : list");
        let ExprKind::ForEachStatement(parts) = &folded.kind else {
            panic!("expected a for-each, got {}", folded.kind_name());
        };
        assert_eq!(parts.header, source.find("int").unwrap()..source.find(") {").unwrap());
        let declaration_start = source.find("String").unwrap();
        let declaration_end = source.find("; print").unwrap() + 1;
        assert_eq!(parts.declaration, declaration_start..declaration_end);
    }

    #[test]
    fn test_for_each_with_index() {
        let resolver = loop_vars();
        let source = "for (int i = 0; i < list.size(); i++) { String s = list.get(i); print(i, s); }";
        assert_eq!(fold_stmt(source, &resolver).as_deref(), Some("(i, s) : list"));
    }

    #[test]
    fn test_index_moved_in_the_body_keeps_the_counted_header() {
        let resolver = loop_vars();
        let source = "for (int i = 0; i < list.size(); i++) { String s = list.get(i); i++; print(s); }";
        assert_eq!(
            fold_stmt(source, &resolver).as_deref(),
            Some("i ∈ [0, list.size())")
        );
        let source = "for (int i = 0; i < arr.length; i++) { int x = arr[i]; i += 1; sum(x); }";
        assert_eq!(
            fold_stmt(source, &resolver).as_deref(),
            Some("i ∈ [0, arr.length)")
        );
    }

    #[test]
    fn test_for_each_over_an_array() {
        let resolver = loop_vars();
        let source = "for (int i = 0; i < arr.length; i++) { int x = arr[i]; sum(x); }";
        assert_eq!(fold_stmt(source, &resolver).as_deref(), Some("x : arr"));

        // a different array than the one bounding the loop
        let resolver = loop_vars().local("other", "int[]");
        let source = "for (int i = 0; i < other.length; i++) { int x = arr[i]; sum(x); }";
        assert_eq!(fold_stmt(source, &resolver).as_deref(), Some("i ∈ [0, other.length)"));
    }

    #[test]
    fn test_short_elvis() {
        let resolver = StubResolver::default()
            .local("a", "java.lang.String")
            .local("b", "java.lang.String");
        assert_eq!(
            fold_stmt("if (a != null) a.foo();", &resolver).as_deref(),
            Some("a?.foo();")
        );
        assert_eq!(
            fold_stmt("if (null != a) { a.foo(); }", &resolver).as_deref(),
            Some("a?.foo();")
        );
        assert_eq!(fold_stmt("if (a != null) b.foo();", &resolver), None);
        assert_eq!(fold_stmt("if (a != null) a.foo(); else b.foo();", &resolver), None);
        assert_eq!(fold_stmt("if (a != null) { a.foo(); a.bar(); }", &resolver), None);
        assert_eq!(fold_stmt("if (a == null) a.foo();", &resolver), None);
    }

    #[test]
    fn test_short_elvis_needs_a_single_use() {
        let resolver = StubResolver::default()
            .local("a", "java.lang.String")
            .local("b", "java.lang.String");
        assert_eq!(fold_stmt("if (a != null) a.concat(a);", &resolver), None);
        assert_eq!(fold_stmt("if (a != null) a.concat(a.trim());", &resolver), None);
        assert_eq!(
            fold_stmt("if (a != null) a.concat(b);", &resolver).as_deref(),
            Some("a?.concat(b);")
        );
    }

    #[test]
    fn test_elvis() {
        let resolver = StubResolver::default()
            .local("a", "java.lang.String")
            .local("b", "java.lang.String");
        let source = "a != null ? a.length() : 0";
        let folded = recognize(source, &expr(source), &resolver).unwrap();
        assert_eq!(format(&folded), "a?.length() ?: 0");

        let source = "a != null ? a : b";
        assert_eq!(
            recognize(source, &expr(source), &resolver).map(|e| format(&e)).as_deref(),
            Some("a ?: b")
        );

        let source = "a != null ? b.length() : 0";
        assert!(recognize(source, &expr(source), &resolver).is_none());
    }

    #[test]
    fn test_local_declarations() {
        let resolver = StubResolver::default().local("x", "int").local("y", "int");
        assert_eq!(declaration("{ int x = 1; foo(x); }", &resolver).as_deref(), Some("val"));
        assert_eq!(declaration("{ int x = 1; x++; }", &resolver).as_deref(), Some("var"));
        assert_eq!(declaration("{ int x = 1; x = 2; }", &resolver).as_deref(), Some("var"));
        assert_eq!(declaration("{ int x = 1; x += y; }", &resolver).as_deref(), Some("var"));
        assert_eq!(declaration("{ int x; x = 1; }", &resolver), None);
        assert_eq!(declaration("{ int x = 1, y = 2; y--; }", &resolver).as_deref(), Some("var"));
    }

    #[test]
    fn test_declaration_covers_modifiers_and_type() {
        let resolver = StubResolver::default().local("x", "int");
        let source = "{ final int x = 1; }";
        let tree = stmt(source);
        let node = tree
            .descendants()
            .find(|n| n.kind() == SyntaxKind::LocalVariableDeclaration)
            .unwrap();
        let folded = recognize(source, &node, &resolver).unwrap();
        assert_eq!(format(&folded), "val");
        assert_eq!(folded.span, Some(2..11));
    }

    #[test]
    fn test_loop_variables() {
        let resolver = loop_vars().local("s", "java.lang.String");
        assert_eq!(
            declaration("for (int i = 0; i < n; i++) {}", &resolver).as_deref(),
            Some("var")
        );
        assert_eq!(
            declaration("for (String s : list) { print(s); }", &resolver).as_deref(),
            Some("val")
        );
    }
}
