//! Syntax node helper functions
//!
//! Utilities for extracting information from syntax nodes. The parser emits
//! a fixed shape per node kind (see the parser crate), and these helpers are
//! the only place that knows which child sits where.

use terse_span::Span;

use crate::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Find a child node with the specified kind
pub fn find_child(syntax: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    syntax.children().find(|n| n.kind() == kind)
}

/// Find a direct child token with the specified kind
pub fn find_token(syntax: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    syntax
        .children_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .find(|tok| tok.kind() == kind)
}

/// First direct identifier token of a node
pub fn identifier(syntax: &SyntaxNode) -> Option<SyntaxToken> {
    find_token(syntax, SyntaxKind::Identifier)
}

/// Identifier text of a node, e.g. the name of a NameRef or VariableDeclarator
pub fn identifier_text(syntax: &SyntaxNode) -> Option<String> {
    identifier(syntax).map(|tok| tok.text().to_string())
}

/// Direct children that are expressions, in source order
pub fn expr_children(syntax: &SyntaxNode) -> impl Iterator<Item = SyntaxNode> {
    syntax.children().filter(|n| n.kind().is_expression())
}

/// Direct children that are statements, in source order
pub fn stmt_children(syntax: &SyntaxNode) -> impl Iterator<Item = SyntaxNode> {
    syntax.children().filter(|n| n.kind().is_statement())
}

/// The first direct operator token of a node
pub fn operator(syntax: &SyntaxNode) -> Option<SyntaxToken> {
    syntax
        .children_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .find(|tok| tok.kind().is_operator())
}

/// The operator kind of a binary, prefix, postfix or assignment node
pub fn operator_kind(syntax: &SyntaxNode) -> Option<SyntaxKind> {
    operator(syntax).map(|tok| tok.kind())
}

/// Byte span of a node
///
/// The tree builder attaches leading trivia outside of nodes, so this is
/// the span of the node's first to last significant token.
pub fn node_span(node: &SyntaxNode) -> Span {
    let range = node.text_range();
    range.start().into()..range.end().into()
}

/// Byte span of a token
pub fn token_span(token: &SyntaxToken) -> Span {
    let range = token.text_range();
    range.start().into()..range.end().into()
}

/// Qualifier of a FieldAccessExpr or MethodCallExpr, if present
pub fn qualifier(syntax: &SyntaxNode) -> Option<SyntaxNode> {
    match syntax.kind() {
        SyntaxKind::FieldAccessExpr | SyntaxKind::MethodCallExpr => expr_children(syntax).next(),
        _ => None,
    }
}

/// Member name token of a NameRef, FieldAccessExpr or MethodCallExpr
pub fn member_name(syntax: &SyntaxNode) -> Option<SyntaxToken> {
    match syntax.kind() {
        SyntaxKind::NameRef | SyntaxKind::FieldAccessExpr | SyntaxKind::MethodCallExpr => {
            identifier(syntax)
        }
        _ => None,
    }
}

/// Member name text, see [`member_name`]
pub fn member_name_text(syntax: &SyntaxNode) -> Option<String> {
    member_name(syntax).map(|tok| tok.text().to_string())
}

/// Argument expressions of a MethodCallExpr or NewExpr
pub fn arguments(syntax: &SyntaxNode) -> Vec<SyntaxNode> {
    find_child(syntax, SyntaxKind::ArgumentList)
        .map(|list| expr_children(&list).collect())
        .unwrap_or_default()
}

/// Whether a MethodCallExpr or NewExpr carries an argument list
pub fn has_argument_list(syntax: &SyntaxNode) -> bool {
    find_child(syntax, SyntaxKind::ArgumentList).is_some()
}

/// Operands of a BinaryExpr (two or more for polyadic chains)
pub fn operands(syntax: &SyntaxNode) -> Vec<SyntaxNode> {
    expr_children(syntax).collect()
}

/// Single operand of a PrefixExpr, PostfixExpr, ParenExpr or CastExpr
pub fn operand(syntax: &SyntaxNode) -> Option<SyntaxNode> {
    expr_children(syntax).next()
}

/// Left and right sides of an AssignmentExpr or two-operand BinaryExpr
pub fn sides(syntax: &SyntaxNode) -> Option<(SyntaxNode, SyntaxNode)> {
    let mut exprs = expr_children(syntax);
    let left = exprs.next()?;
    let right = exprs.next()?;
    Some((left, right))
}

/// The Type child of a declaration, cast or new expression
pub fn type_node(syntax: &SyntaxNode) -> Option<SyntaxNode> {
    find_child(syntax, SyntaxKind::Type)
}

/// Whether a Modifiers child contains `final`
pub fn has_final_modifier(syntax: &SyntaxNode) -> bool {
    find_child(syntax, SyntaxKind::Modifiers)
        .and_then(|mods| find_token(&mods, SyntaxKind::Final))
        .is_some()
}

/// Initializer expression of a VariableDeclarator
pub fn initializer(declarator: &SyntaxNode) -> Option<SyntaxNode> {
    find_token(declarator, SyntaxKind::Eq)?;
    expr_children(declarator).next()
}

/// Declarators of a LocalVariableDeclaration, FieldDeclaration or LocalVariableStatement
pub fn declarators(syntax: &SyntaxNode) -> Vec<SyntaxNode> {
    let holder = match syntax.kind() {
        SyntaxKind::LocalVariableStatement => {
            find_child(syntax, SyntaxKind::LocalVariableDeclaration)
        }
        _ => Some(syntax.clone()),
    };
    holder
        .map(|h| {
            h.children()
                .filter(|n| n.kind() == SyntaxKind::VariableDeclarator)
                .collect()
        })
        .unwrap_or_default()
}

/// Body statement of a loop
pub fn loop_body(syntax: &SyntaxNode) -> Option<SyntaxNode> {
    match syntax.kind() {
        SyntaxKind::ForStatement
        | SyntaxKind::ForEachStatement
        | SyntaxKind::WhileStatement => stmt_children(syntax).last(),
        _ => None,
    }
}

/// Condition, then-branch and optional else-branch of an IfStatement
pub fn if_parts(syntax: &SyntaxNode) -> Option<(SyntaxNode, SyntaxNode, Option<SyntaxNode>)> {
    let condition = expr_children(syntax).next()?;
    let mut branches = stmt_children(syntax);
    let then_branch = branches.next()?;
    Some((condition, then_branch, branches.next()))
}

/// Condition, then-expression and else-expression of a ConditionalExpr
pub fn conditional_parts(syntax: &SyntaxNode) -> Option<(SyntaxNode, SyntaxNode, SyntaxNode)> {
    let mut exprs = expr_children(syntax);
    Some((exprs.next()?, exprs.next()?, exprs.next()?))
}

/// Text of a Type node with trivia removed, e.g. `List<String>` or `int[]`
pub fn type_text(ty: &SyntaxNode) -> String {
    ty.descendants_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .filter(|tok| !tok.kind().is_trivia())
        .map(|tok| tok.text().to_string())
        .collect()
}

/// Whether `node` sits directly in statement position (its parent is a statement)
pub fn is_statement_expression(node: &SyntaxNode) -> bool {
    node.parent()
        .is_some_and(|p| p.kind() == SyntaxKind::ExpressionStatement)
}

/// Strip redundant parentheses around an expression
pub fn skip_parens(node: &SyntaxNode) -> SyntaxNode {
    let mut current = node.clone();
    while current.kind() == SyntaxKind::ParenExpr {
        match operand(&current) {
            Some(inner) => current = inner,
            None => break,
        }
    }
    current
}
