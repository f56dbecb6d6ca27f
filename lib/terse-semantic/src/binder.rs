//! Declaration binding
//!
//! The binder makes two passes over a file. The first declares every class
//! with its fields and methods, so members are visible regardless of the
//! order they are written in. The second walks field initializers and
//! method bodies with a [`LocalScope`] and records which local or
//! parameter each `NameRef` refers to. Names the scope does not know
//! (fields, classes, static imports) are left for the model to resolve.

use std::collections::HashMap;

use terse_fold::{DeclId, DeclKind, Declaration, JavaType};
use terse_syntax_tree::helpers::{
    declarators, expr_children, find_child, has_final_modifier, identifier_text, stmt_children,
    type_node,
};
use terse_syntax_tree::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodePtr};
use tracing::trace;

use crate::local_scope::LocalScope;
use crate::ty::TypeScope;

/// A class declared in the bound file
#[derive(Debug, Clone)]
pub struct UserClass {
    pub decl: DeclId,
    pub fqn: String,
    /// `extends` and `implements` types, in source order
    pub supertypes: Vec<JavaType>,
    pub fields: Vec<DeclId>,
    pub methods: Vec<DeclId>,
}

/// Everything the binder learned about one file
#[derive(Debug, Default)]
pub struct SymbolTable {
    decls: Vec<Declaration>,
    /// Declarators, parameters, methods and classes to what they declare
    declared: HashMap<SyntaxNodePtr, DeclId>,
    /// `NameRef`s bound to a local or parameter
    references: HashMap<SyntaxNodePtr, DeclId>,
    classes: Vec<UserClass>,
    class_nodes: HashMap<SyntaxNodePtr, usize>,
    by_fqn: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn get(&self, id: DeclId) -> Option<&Declaration> {
        self.decls.get(id.0 as usize)
    }

    /// Declaration introduced by a declarator, parameter, method or class node
    pub fn declared_by(&self, node: &SyntaxNode) -> Option<&Declaration> {
        let id = self.declared.get(&SyntaxNodePtr::new(node))?;
        self.get(*id)
    }

    /// Local or parameter a `NameRef` is bound to
    pub fn local_reference(&self, name_ref: &SyntaxNode) -> Option<&Declaration> {
        let id = self.references.get(&SyntaxNodePtr::new(name_ref))?;
        self.get(*id)
    }

    pub fn class(&self, index: usize) -> Option<&UserClass> {
        self.classes.get(index)
    }

    /// Index of the class a `ClassDeclaration` node declares
    pub fn class_of_node(&self, class: &SyntaxNode) -> Option<usize> {
        self.class_nodes.get(&SyntaxNodePtr::new(class)).copied()
    }

    pub fn class_named(&self, fqn: &str) -> Option<usize> {
        self.by_fqn.get(fqn).copied()
    }

    /// Number of declarations
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

pub struct Binder<'a> {
    types: &'a TypeScope,
    table: SymbolTable,
    locals: LocalScope,
}

impl<'a> Binder<'a> {
    pub fn new(types: &'a TypeScope) -> Self {
        Binder {
            types,
            table: SymbolTable::default(),
            locals: LocalScope::new(),
        }
    }

    /// Bind a `SourceFile`
    pub fn bind(mut self, root: &SyntaxNode) -> SymbolTable {
        let classes: Vec<SyntaxNode> = root
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::ClassDeclaration)
            .collect();
        for class in &classes {
            self.declare_class(class);
        }
        for class in &classes {
            self.bind_bodies(class);
        }
        trace!(decls = self.table.len(), classes = classes.len(), "bound file");
        self.table
    }

    fn declare(&mut self, node: Option<&SyntaxNode>, decl: Declaration) -> DeclId {
        let id = decl.id;
        if let Some(node) = node {
            self.table.declared.insert(SyntaxNodePtr::new(node), id);
        }
        self.table.decls.push(decl);
        id
    }

    fn next_id(&self) -> DeclId {
        DeclId(self.table.decls.len() as u32)
    }

    fn declare_class(&mut self, class: &SyntaxNode) {
        let fqn = self.types.qualified_class_name(class);
        let name = identifier_text(class).unwrap_or_default();
        let supertypes = class
            .children()
            .filter(|n| n.kind() == SyntaxKind::Type)
            .map(|ty| self.types.of_type_node(&ty))
            .collect();

        let decl = self.declare(
            Some(class),
            Declaration {
                id: self.next_id(),
                kind: DeclKind::Class,
                name,
                ty: Some(JavaType::new(fqn.clone())),
                container: None,
                params: Vec::new(),
                is_final: has_final_modifier(class),
            },
        );

        let mut user_class = UserClass {
            decl,
            fqn: fqn.clone(),
            supertypes,
            fields: Vec::new(),
            methods: Vec::new(),
        };

        let members = find_child(class, SyntaxKind::ClassBody)
            .map(|body| body.children().collect::<Vec<_>>())
            .unwrap_or_default();
        for member in members {
            match member.kind() {
                SyntaxKind::FieldDeclaration => {
                    let ty = type_node(&member).map(|t| self.types.of_type_node(&t));
                    let is_final = has_final_modifier(&member);
                    for declarator in declarators(&member) {
                        let id = self.declare(
                            Some(&declarator),
                            Declaration {
                                id: self.next_id(),
                                kind: DeclKind::Field,
                                name: identifier_text(&declarator).unwrap_or_default(),
                                ty: ty.clone(),
                                container: Some(fqn.clone()),
                                params: Vec::new(),
                                is_final,
                            },
                        );
                        user_class.fields.push(id);
                    }
                }
                SyntaxKind::MethodDeclaration => {
                    // Constructors have no return type and evaluate to the class
                    let ty = match type_node(&member) {
                        Some(t) => self.types.of_type_node(&t),
                        None => JavaType::new(fqn.clone()),
                    };
                    let params = parameters(&member)
                        .iter()
                        .filter_map(type_node)
                        .map(|t| self.types.of_type_node(&t))
                        .collect();
                    let id = self.declare(
                        Some(&member),
                        Declaration {
                            id: self.next_id(),
                            kind: DeclKind::Method,
                            name: identifier_text(&member).unwrap_or_default(),
                            ty: Some(ty),
                            container: Some(fqn.clone()),
                            params,
                            is_final: has_final_modifier(&member),
                        },
                    );
                    user_class.methods.push(id);
                }
                _ => {}
            }
        }

        let index = self.table.classes.len();
        self.table.class_nodes.insert(SyntaxNodePtr::new(class), index);
        self.table.by_fqn.insert(fqn, index);
        self.table.classes.push(user_class);
    }

    fn bind_bodies(&mut self, class: &SyntaxNode) {
        let Some(body) = find_child(class, SyntaxKind::ClassBody) else {
            return;
        };
        for member in body.children() {
            self.locals = LocalScope::new();
            match member.kind() {
                SyntaxKind::FieldDeclaration => {
                    for declarator in declarators(&member) {
                        for init in expr_children(&declarator) {
                            self.walk(&init);
                        }
                    }
                }
                SyntaxKind::MethodDeclaration => {
                    for parameter in parameters(&member) {
                        self.declare_variable(&parameter, DeclKind::Parameter, type_node(&parameter));
                    }
                    if let Some(block) = find_child(&member, SyntaxKind::Block) {
                        self.walk(&block);
                    }
                }
                _ => {}
            }
        }
    }

    /// Declare a declarator or parameter and bring it into scope
    fn declare_variable(&mut self, node: &SyntaxNode, kind: DeclKind, ty: Option<SyntaxNode>) {
        let Some(name) = identifier_text(node) else {
            return;
        };
        let is_final = match node.kind() {
            SyntaxKind::VariableDeclarator => node
                .parent()
                .is_some_and(|holder| has_final_modifier(&holder)),
            _ => has_final_modifier(node),
        };
        let id = self.declare(
            Some(node),
            Declaration {
                id: self.next_id(),
                kind,
                name: name.clone(),
                ty: ty.map(|t| self.types.of_type_node(&t)),
                container: None,
                params: Vec::new(),
                is_final,
            },
        );
        self.locals.bind(name, id);
    }

    fn walk(&mut self, node: &SyntaxNode) {
        match node.kind() {
            // Bound on their own, with a fresh scope
            SyntaxKind::ClassDeclaration => {}
            SyntaxKind::Block | SyntaxKind::ForStatement => {
                self.locals.push_scope();
                self.walk_children(node);
                self.locals.pop_scope();
            }
            SyntaxKind::ForEachStatement => {
                self.locals.push_scope();
                for iterable in expr_children(node) {
                    self.walk(&iterable);
                }
                if let Some(parameter) = find_child(node, SyntaxKind::Parameter) {
                    self.declare_variable(&parameter, DeclKind::Local, type_node(&parameter));
                }
                for body in stmt_children(node) {
                    self.walk(&body);
                }
                self.locals.pop_scope();
            }
            SyntaxKind::LocalVariableDeclaration => {
                let ty = type_node(node);
                for declarator in declarators(node) {
                    for init in expr_children(&declarator) {
                        self.walk(&init);
                    }
                    self.declare_variable(&declarator, DeclKind::Local, ty.clone());
                }
            }
            SyntaxKind::LambdaExpr => {
                self.locals.push_scope();
                for name in lambda_parameters(node) {
                    let id = self.declare(
                        None,
                        Declaration {
                            id: self.next_id(),
                            kind: DeclKind::Parameter,
                            name: name.clone(),
                            ty: None,
                            container: None,
                            params: Vec::new(),
                            is_final: false,
                        },
                    );
                    self.locals.bind(name, id);
                }
                for body in expr_children(node) {
                    self.walk(&body);
                }
                self.locals.pop_scope();
            }
            SyntaxKind::NameRef => {
                let bound = identifier_text(node).and_then(|name| self.locals.lookup(&name));
                if let Some(id) = bound {
                    self.table.references.insert(SyntaxNodePtr::new(node), id);
                }
            }
            _ => self.walk_children(node),
        }
    }

    fn walk_children(&mut self, node: &SyntaxNode) {
        for child in node.children() {
            self.walk(&child);
        }
    }
}

fn parameters(method: &SyntaxNode) -> Vec<SyntaxNode> {
    find_child(method, SyntaxKind::ParameterList)
        .map(|list| {
            list.children()
                .filter(|n| n.kind() == SyntaxKind::Parameter)
                .collect()
        })
        .unwrap_or_default()
}

/// Names of `x -> ...` or `(a, b) -> ...`
fn lambda_parameters(lambda: &SyntaxNode) -> Vec<String> {
    let holder = find_child(lambda, SyntaxKind::LambdaParameters).unwrap_or_else(|| lambda.clone());
    holder
        .children_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .take_while(|tok| tok.kind() != SyntaxKind::Arrow)
        .filter(|tok| tok.kind() == SyntaxKind::Identifier)
        .map(|tok| tok.text().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use terse_lexer::significant_tokens;
    use terse_parser::parse_source_file_from_source;

    fn bind(source: &str) -> (SyntaxNode, SymbolTable) {
        let result = parse_source_file_from_source(source, significant_tokens(source).into_iter());
        assert!(result.is_ok(), "{:?}", result.errors);
        let types = TypeScope::from_file(&result.tree);
        let table = Binder::new(&types).bind(&result.tree);
        (result.tree, table)
    }

    fn name_refs<'a>(root: &'a SyntaxNode, name: &'a str) -> impl Iterator<Item = SyntaxNode> + 'a {
        root.descendants().filter(move |n| {
            n.kind() == SyntaxKind::NameRef && identifier_text(n).as_deref() == Some(name)
        })
    }

    #[test]
    fn test_class_members() {
        let (root, table) = bind(
            "package shop;\nimport java.math.BigDecimal;\nclass Cart { final BigDecimal total = BigDecimal.ZERO; int size() { return 0; } Cart() { } }",
        );
        let class = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::ClassDeclaration)
            .unwrap();
        let index = table.class_of_node(&class).unwrap();
        let cart = table.class(index).unwrap();
        assert_eq!(cart.fqn, "shop.Cart");
        assert_eq!(cart.fields.len(), 1);
        assert_eq!(cart.methods.len(), 2);

        let total = table.get(cart.fields[0]).unwrap();
        assert_eq!(total.kind, DeclKind::Field);
        assert_eq!(total.ty, Some(JavaType::new("java.math.BigDecimal")));
        assert_eq!(total.container.as_deref(), Some("shop.Cart"));
        assert!(total.is_final);

        let ctor = table.get(cart.methods[1]).unwrap();
        assert_eq!(ctor.ty, Some(JavaType::new("shop.Cart")));
        assert_eq!(table.class_named("shop.Cart"), Some(index));
    }

    #[test]
    fn test_locals_and_parameters() {
        let (root, table) = bind("class A { int f(int a) { int b = a + 1; return b; } }");
        let a = name_refs(&root, "a").next().unwrap();
        let decl = table.local_reference(&a).unwrap();
        assert_eq!(decl.kind, DeclKind::Parameter);
        assert_eq!(decl.ty, Some(JavaType::new("int")));

        let b = name_refs(&root, "b").next().unwrap();
        assert_eq!(table.local_reference(&b).unwrap().kind, DeclKind::Local);
    }

    #[test]
    fn test_block_scopes_end() {
        let (root, table) =
            bind("class A { int x; void f() { { int x = 1; x = 2; } x = 3; } }");
        let refs: Vec<_> = name_refs(&root, "x").collect();
        assert_eq!(refs.len(), 2);
        assert!(table.local_reference(&refs[0]).is_some());
        // the field is not a local
        assert!(table.local_reference(&refs[1]).is_none());
    }

    #[test]
    fn test_loops_and_lambdas() {
        let (root, table) = bind(
            "class A { void f(java.util.List<String> xs) { for (String s : xs) { s.length(); } for (int i = 0; i < 3; i++) { } xs.forEach(s -> s.trim()); } }",
        );
        let uses: Vec<_> = name_refs(&root, "s").collect();
        assert_eq!(uses.len(), 2);
        let loop_var = table.local_reference(&uses[0]).unwrap();
        assert_eq!(loop_var.kind, DeclKind::Local);
        assert_eq!(loop_var.ty, Some(JavaType::new("java.lang.String")));
        let lambda_param = table.local_reference(&uses[1]).unwrap();
        assert_eq!(lambda_param.kind, DeclKind::Parameter);
        assert_eq!(lambda_param.ty, None);
        assert_ne!(loop_var.id, lambda_param.id);

        let i = name_refs(&root, "i").next().unwrap();
        assert!(table.local_reference(&i).is_some());
    }

    #[test]
    fn test_declarators_are_recorded() {
        let (root, table) = bind("class A { void f() { final int a = 1, b = 2; } }");
        let declarators: Vec<_> = root
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::VariableDeclarator)
            .collect();
        assert_eq!(declarators.len(), 2);
        let b = table.declared_by(&declarators[1]).unwrap();
        assert_eq!(b.name, "b");
        assert!(b.is_final);
    }
}
