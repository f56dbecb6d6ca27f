//! The semantic model of one file
//!
//! `SemanticModel` answers the folding core's three questions (what does
//! this name refer to, what does this declarator declare, what type does
//! this expression have) from the bound [`SymbolTable`], the file's
//! [`TypeScope`] and the JDK table. Member lookups walk the class
//! hierarchy, user classes first, then the JDK, then `java.lang.Object`.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use terse_fold::{DeclId, DeclKind, Declaration, FoldError, FoldResult, JavaType, Resolver};
use terse_syntax_tree::helpers::{
    arguments, conditional_parts, identifier_text, member_name_text, operand, operands,
    operator_kind, qualifier, sides, type_node,
};
use terse_syntax_tree::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodePtr};
use tracing::{debug, instrument};

use crate::binder::{Binder, SymbolTable, UserClass};
use crate::jdk::{self, ClassRef, JdkMethod, OBJECT};
use crate::ty::{self, TypeScope};

const STRING: &str = "java.lang.String";

/// Hierarchy depth at which `java.lang.Object` members are offered
const OBJECT_DEPTH: usize = 64;

/// Deepest supertype chain followed by subtype checks
const MAX_HIERARCHY: usize = 32;

/// A method that might be the target of a call
#[derive(Debug, Clone)]
struct Candidate {
    decl: Declaration,
    varargs: bool,
    /// Distance from the receiver class in the hierarchy
    depth: usize,
}

impl Candidate {
    fn accepts(&self, count: usize) -> bool {
        let declared = self.decl.params.len();
        if self.varargs {
            count + 1 >= declared
        } else {
            count == declared
        }
    }

    fn param(&self, i: usize) -> Option<&JavaType> {
        match self.decl.params.get(i) {
            Some(param) => Some(param),
            None if self.varargs => self.decl.params.last(),
            None => None,
        }
    }
}

pub struct SemanticModel {
    types: TypeScope,
    table: SymbolTable,
    ready: AtomicBool,
    expr_types: RefCell<HashMap<SyntaxNodePtr, Option<JavaType>>>,
}

impl SemanticModel {
    /// Bind a parsed `SourceFile`
    #[instrument(skip_all)]
    pub fn build(root: &SyntaxNode) -> Self {
        let types = TypeScope::from_file(root);
        let table = Binder::new(&types).bind(root);
        debug!(declarations = table.len(), "semantic model built");
        SemanticModel {
            types,
            table,
            ready: AtomicBool::new(true),
            expr_types: RefCell::new(HashMap::new()),
        }
    }

    /// Make every query fail with `IndexNotReady` until set back
    pub fn set_index_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::Relaxed);
    }

    pub fn is_index_ready(&self) -> bool {
        self.ready.load(Ordering::Relaxed)
    }

    pub fn types(&self) -> &TypeScope {
        &self.types
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    fn check_ready(&self) -> FoldResult<()> {
        if self.is_index_ready() {
            Ok(())
        } else {
            Err(FoldError::IndexNotReady)
        }
    }

    // ===== Declarations =====

    fn resolve_node(&self, node: &SyntaxNode) -> Option<Declaration> {
        match node.kind() {
            SyntaxKind::NameRef => self.resolve_name(node),
            SyntaxKind::FieldAccessExpr => self.resolve_field_access(node),
            SyntaxKind::MethodCallExpr => self.resolve_call(node),
            SyntaxKind::NewExpr => self.resolve_new(node),
            _ => None,
        }
    }

    fn resolve_name(&self, node: &SyntaxNode) -> Option<Declaration> {
        if let Some(local) = self.table.local_reference(node) {
            return Some(local.clone());
        }
        let name = identifier_text(node)?;
        for class in self.enclosing_classes(node) {
            if let Some(field) = self.field_of(&JavaType::new(class.fqn.clone()), &name) {
                return Some(field);
            }
        }
        if let Some(class) = self
            .types
            .resolve_class(&name)
            .and_then(|fqn| self.class_decl(&fqn))
        {
            return Some(class);
        }
        self.types
            .static_imports()
            .iter()
            .filter(|import| import.provides(&name))
            .find_map(|import| self.field_of(&JavaType::new(import.class.clone()), &name))
    }

    fn resolve_field_access(&self, node: &SyntaxNode) -> Option<Declaration> {
        let name = member_name_text(node)?;
        let receiver = qualifier(node)?;

        if let Some(class) = self.resolve_node(&receiver).filter(|d| d.kind == DeclKind::Class) {
            let class_ty = class.ty?;
            return self
                .field_of(&class_ty, &name)
                .or_else(|| self.class_decl(&format!("{class_ty}.{name}")));
        }
        if let Some(ty) = self.infer(&receiver) {
            return self.field_of(&ty, &name);
        }
        // A package path followed by a class, e.g. `java.util.Collections`
        let path = dotted_path(node)?;
        self.class_decl(&path)
    }

    fn resolve_call(&self, node: &SyntaxNode) -> Option<Declaration> {
        let name = member_name_text(node)?;
        let args: Vec<Option<JavaType>> = arguments(node).iter().map(|a| self.infer(a)).collect();

        let candidates = match qualifier(node) {
            Some(receiver) => {
                let receiver_ty = match self.resolve_node(&receiver) {
                    Some(class) if class.kind == DeclKind::Class => class.ty?,
                    _ => self.infer(&receiver)?,
                };
                self.methods_of(&receiver_ty, &name)
            }
            None => self.unqualified_methods(node, &name),
        };
        select(self, candidates, &args)
    }

    /// Methods of the enclosing classes, innermost first, then static imports
    fn unqualified_methods(&self, node: &SyntaxNode, name: &str) -> Vec<Candidate> {
        for class in self.enclosing_classes(node) {
            let found = self.methods_of(&JavaType::new(class.fqn.clone()), name);
            if !found.is_empty() {
                return found;
            }
        }
        self.types
            .static_imports()
            .iter()
            .filter(|import| import.provides(name))
            .flat_map(|import| self.methods_of(&JavaType::new(import.class.clone()), name))
            .collect()
    }

    /// A user constructor when one matches, otherwise the instantiated class
    fn resolve_new(&self, node: &SyntaxNode) -> Option<Declaration> {
        let ty = self.types.of_type_node(&type_node(node)?);
        let erased = ty.erasure();
        if let Some(class) = self.table.class_named(&erased).and_then(|i| self.table.class(i)) {
            let simple = jdk::simple_name(&erased);
            let constructors = class
                .methods
                .iter()
                .filter_map(|id| self.table.get(*id))
                .filter(|m| m.name == simple && m.ty.as_ref() == Some(&JavaType::new(erased.clone())))
                .map(|m| Candidate {
                    decl: m.clone(),
                    varargs: false,
                    depth: 0,
                })
                .collect();
            let args: Vec<_> = arguments(node).iter().map(|a| self.infer(a)).collect();
            if let Some(constructor) = select(self, constructors, &args) {
                return Some(constructor);
            }
        }
        self.class_decl(&erased)
    }

    fn class_decl(&self, fqn: &str) -> Option<Declaration> {
        if let Some(class) = self.table.class_named(fqn).and_then(|i| self.table.class(i)) {
            return self.table.get(class.decl).cloned();
        }
        let class = jdk::class(fqn)?;
        Some(Declaration {
            id: class.id(),
            kind: DeclKind::Class,
            name: class.simple_name().to_string(),
            ty: Some(JavaType::new(fqn)),
            container: None,
            params: Vec::new(),
            is_final: false,
        })
    }

    /// User classes around `node`, innermost first
    fn enclosing_classes(&self, node: &SyntaxNode) -> Vec<&UserClass> {
        node.ancestors()
            .filter(|n| n.kind() == SyntaxKind::ClassDeclaration)
            .filter_map(|n| self.table.class_of_node(&n))
            .filter_map(|i| self.table.class(i))
            .collect()
    }

    // ===== Members =====

    fn field_of(&self, ty: &JavaType, name: &str) -> Option<Declaration> {
        let mut seen = HashSet::new();
        self.find_field(ty, name, &mut seen)
    }

    fn find_field(&self, ty: &JavaType, name: &str, seen: &mut HashSet<String>) -> Option<Declaration> {
        if ty.is_array() {
            return (name == "length").then(array_length);
        }
        let erased = ty.erasure();
        if ty.is_primitive() || !seen.insert(erased.clone()) {
            return None;
        }

        if let Some(class) = self.table.class_named(&erased).and_then(|i| self.table.class(i)) {
            let own = class
                .fields
                .iter()
                .filter_map(|id| self.table.get(*id))
                .find(|f| f.name == name);
            if let Some(field) = own {
                return Some(field.clone());
            }
            return class
                .supertypes
                .iter()
                .find_map(|sup| self.find_field(sup, name, seen));
        }

        let class = jdk::class(&erased)?;
        let bound = ty::bindings(class.class, ty);
        let own = class
            .class
            .fields
            .iter()
            .enumerate()
            .find(|(_, f)| f.name == name);
        if let Some((slot, field)) = own {
            return Some(Declaration {
                id: class.field_id(slot),
                kind: DeclKind::Field,
                name: field.name.to_string(),
                ty: Some(ty::substitute(field.ty, &bound)),
                container: Some(class.class.name.to_string()),
                params: Vec::new(),
                is_final: field.is_static,
            });
        }
        class
            .class
            .supertypes
            .iter()
            .find_map(|sup| self.find_field(&ty::substitute(sup, &bound), name, seen))
    }

    /// Every method called `name` visible on `receiver`
    fn methods_of(&self, receiver: &JavaType, name: &str) -> Vec<Candidate> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        if receiver.is_primitive() {
            return out;
        }
        self.collect_methods(receiver, name, 0, &mut out, &mut seen);
        self.collect_methods(&JavaType::new(OBJECT), name, OBJECT_DEPTH, &mut out, &mut seen);
        out
    }

    fn collect_methods(
        &self,
        ty: &JavaType,
        name: &str,
        depth: usize,
        out: &mut Vec<Candidate>,
        seen: &mut HashSet<String>,
    ) {
        let erased = ty.erasure();
        if ty.is_array() || ty.is_primitive() || !seen.insert(erased.clone()) {
            return;
        }

        if let Some(class) = self.table.class_named(&erased).and_then(|i| self.table.class(i)) {
            out.extend(
                class
                    .methods
                    .iter()
                    .filter_map(|id| self.table.get(*id))
                    .filter(|m| m.name == name)
                    .map(|m| Candidate {
                        decl: m.clone(),
                        varargs: false,
                        depth,
                    }),
            );
            for sup in &class.supertypes {
                self.collect_methods(sup, name, depth + 1, out, seen);
            }
            return;
        }

        let Some(class) = jdk::class(&erased) else {
            return;
        };
        let bound = ty::bindings(class.class, ty);
        for (slot, method) in class.class.methods.iter().enumerate() {
            if method.name == name {
                out.push(jdk_candidate(class, slot, method, &bound, depth));
            }
        }
        for sup in class.class.supertypes {
            self.collect_methods(&ty::substitute(sup, &bound), name, depth + 1, out, seen);
        }
    }

    fn direct_supertypes(&self, erased: &str) -> Vec<JavaType> {
        if let Some(class) = self.table.class_named(erased).and_then(|i| self.table.class(i)) {
            return class.supertypes.clone();
        }
        jdk::class(erased)
            .map(|c| c.class.supertypes.iter().map(|s| JavaType::new(*s)).collect())
            .unwrap_or_default()
    }

    /// Whether erased class `sub` is `sup` or inherits from it
    fn is_subclass(&self, sub: &str, sup: &str) -> bool {
        self.is_subclass_within(sub, sup, MAX_HIERARCHY)
    }

    fn is_subclass_within(&self, sub: &str, sup: &str, budget: usize) -> bool {
        if sub == sup || sup == OBJECT {
            return true;
        }
        budget > 0
            && self
                .direct_supertypes(sub)
                .iter()
                .any(|s| self.is_subclass_within(&s.erasure(), sup, budget - 1))
    }

    /// How well an argument of type `arg` fits `param`; `None` if it cannot be passed
    fn compatibility(&self, arg: Option<&JavaType>, param: &JavaType) -> Option<u32> {
        let Some(arg) = arg else {
            return Some(1);
        };
        if arg == param {
            return Some(5);
        }
        let (a, p) = (arg.erasure(), param.erasure());
        if a == p {
            return Some(4);
        }
        match (arg.is_primitive(), param.is_primitive()) {
            (true, true) => ty::widens(&a, &p).then_some(3),
            (true, false) => {
                let boxed = ty::boxed(&a)?;
                self.is_subclass(boxed, &p).then_some(1)
            }
            (false, true) => {
                let unboxed = ty::unboxed(&a)?;
                ty::widens(unboxed, &p).then_some(2)
            }
            (false, false) => {
                if p == OBJECT {
                    return Some(2);
                }
                match (arg.element_type(), param.element_type()) {
                    (Some(ae), Some(pe)) if ae.is_primitive() || pe.is_primitive() => {
                        (ae == pe).then_some(4)
                    }
                    (Some(ae), Some(pe)) => self.compatibility(Some(&ae), &pe),
                    (None, None) => self.is_subclass(&a, &p).then_some(3),
                    _ => None,
                }
            }
        }
    }

    // ===== Expression types =====

    fn infer(&self, node: &SyntaxNode) -> Option<JavaType> {
        let ptr = SyntaxNodePtr::new(node);
        if let Some(known) = self.expr_types.borrow().get(&ptr) {
            return known.clone();
        }
        let ty = self.compute_type(node);
        self.expr_types.borrow_mut().insert(ptr, ty.clone());
        ty
    }

    fn compute_type(&self, node: &SyntaxNode) -> Option<JavaType> {
        match node.kind() {
            SyntaxKind::Literal => literal_type(node),
            SyntaxKind::NameRef | SyntaxKind::FieldAccessExpr => self
                .resolve_node(node)
                .filter(Declaration::is_variable)
                .and_then(|d| d.ty),
            SyntaxKind::MethodCallExpr => self.resolve_call(node).and_then(|d| d.ty),
            SyntaxKind::NewExpr => self.new_type(node),
            SyntaxKind::ArrayInitializer => node
                .parent()
                .filter(|p| p.kind() == SyntaxKind::VariableDeclarator)
                .and_then(|d| self.table.declared_by(&d).and_then(|d| d.ty.clone())),
            SyntaxKind::ParenExpr | SyntaxKind::PostfixExpr => self.infer(&operand(node)?),
            SyntaxKind::CastExpr => Some(self.types.of_type_node(&type_node(node)?)),
            SyntaxKind::PrefixExpr => {
                let inner = self.infer(&operand(node)?);
                match operator_kind(node)? {
                    SyntaxKind::Bang => Some(JavaType::new("boolean")),
                    SyntaxKind::PlusPlus | SyntaxKind::MinusMinus => inner,
                    _ => inner.as_ref().and_then(ty::promote_unary),
                }
            }
            SyntaxKind::BinaryExpr => self.binary_type(node),
            SyntaxKind::ConditionalExpr => {
                let (_, then, otherwise) = conditional_parts(node)?;
                match (self.infer(&then), self.infer(&otherwise)) {
                    (Some(a), Some(b)) => ty::promote(&a, &b).or(Some(a)),
                    (a, b) => a.or(b),
                }
            }
            SyntaxKind::AssignmentExpr => self.infer(&sides(node)?.0),
            SyntaxKind::ArrayAccessExpr => self.infer(&operand(node)?)?.element_type(),
            SyntaxKind::ThisExpr => self
                .enclosing_classes(node)
                .first()
                .map(|class| JavaType::new(class.fqn.clone())),
            _ => None,
        }
    }

    fn binary_type(&self, node: &SyntaxNode) -> Option<JavaType> {
        let op = operator_kind(node)?;
        let types: Vec<Option<JavaType>> = operands(node).iter().map(|o| self.infer(o)).collect();
        let is = |t: &Option<JavaType>, name: &str| t.as_ref().is_some_and(|t| t.as_str() == name);

        match op {
            SyntaxKind::EqEq
            | SyntaxKind::BangEq
            | SyntaxKind::Lt
            | SyntaxKind::LtEq
            | SyntaxKind::Gt
            | SyntaxKind::GtEq
            | SyntaxKind::AmpAmp
            | SyntaxKind::PipePipe => Some(JavaType::new("boolean")),
            SyntaxKind::Plus if types.iter().any(|t| is(t, STRING)) => Some(JavaType::new(STRING)),
            SyntaxKind::Amp | SyntaxKind::Pipe | SyntaxKind::Caret
                if types.iter().all(|t| is(t, "boolean")) =>
            {
                Some(JavaType::new("boolean"))
            }
            SyntaxKind::LtLt | SyntaxKind::GtGt | SyntaxKind::GtGtGt => {
                types.first()?.as_ref().and_then(ty::promote_unary)
            }
            _ => {
                let mut types = types.into_iter();
                let first = types.next()??;
                types.try_fold(first, |acc, t| ty::promote(&acc, &t?))
            }
        }
    }

    fn new_type(&self, node: &SyntaxNode) -> Option<JavaType> {
        let base = self.types.of_type_node(&type_node(node)?);
        let sized = node
            .children()
            .filter(|n| n.kind() == SyntaxKind::ArrayDimension)
            .count();
        let bare = node
            .children_with_tokens()
            .filter_map(SyntaxElement::into_token)
            .filter(|t| t.kind() == SyntaxKind::LBracket)
            .count();
        let dims = sized + bare;
        Some(JavaType::new(format!("{base}{}", "[]".repeat(dims))))
    }
}

impl Resolver for SemanticModel {
    fn resolve(&self, node: &SyntaxNode) -> FoldResult<Option<Declaration>> {
        self.check_ready()?;
        Ok(self.resolve_node(node))
    }

    fn declared(&self, node: &SyntaxNode) -> FoldResult<Option<Declaration>> {
        self.check_ready()?;
        if !matches!(node.kind(), SyntaxKind::VariableDeclarator | SyntaxKind::Parameter) {
            return Ok(None);
        }
        Ok(self.table.declared_by(node).cloned())
    }

    fn type_of(&self, node: &SyntaxNode) -> FoldResult<Option<JavaType>> {
        self.check_ready()?;
        Ok(self.infer(node))
    }
}

/// The best-fitting candidate for a call with `args`
///
/// Higher compatibility wins, then the declaration closest to the
/// receiver, then source order. When no candidate fits, the first one
/// taking the right number of arguments is used.
fn select(model: &SemanticModel, candidates: Vec<Candidate>, args: &[Option<JavaType>]) -> Option<Declaration> {
    let applicable: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| c.accepts(args.len()))
        .collect();

    let mut best: Option<(u32, usize, &Candidate)> = None;
    for candidate in &applicable {
        let score = args.iter().enumerate().try_fold(0u32, |total, (i, arg)| {
            Some(total + model.compatibility(arg.as_ref(), candidate.param(i)?)?)
        });
        let Some(score) = score else {
            continue;
        };
        let better = match best {
            None => true,
            Some((s, depth, _)) => score > s || (score == s && candidate.depth < depth),
        };
        if better {
            best = Some((score, candidate.depth, candidate));
        }
    }

    best.map(|(_, _, c)| c)
        .or_else(|| applicable.first())
        .map(|c| c.decl.clone())
}

fn jdk_candidate(
    class: ClassRef,
    slot: usize,
    method: &JdkMethod,
    bound: &HashMap<&str, JavaType>,
    depth: usize,
) -> Candidate {
    Candidate {
        decl: Declaration {
            id: class.method_id(slot),
            kind: DeclKind::Method,
            name: method.name.to_string(),
            ty: Some(ty::substitute(method.ret, bound)),
            container: Some(class.class.name.to_string()),
            params: method
                .params
                .iter()
                .map(|p| ty::substitute(p.strip_suffix("...").unwrap_or(p), bound))
                .collect(),
            is_final: false,
        },
        varargs: method.is_varargs(),
        depth,
    }
}

fn array_length() -> Declaration {
    Declaration {
        id: jdk::ARRAY_LENGTH,
        kind: DeclKind::Field,
        name: "length".to_string(),
        ty: Some(JavaType::new("int")),
        container: None,
        params: Vec::new(),
        is_final: true,
    }
}

fn literal_type(node: &SyntaxNode) -> Option<JavaType> {
    let token = node
        .children_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .find(|t| !t.kind().is_trivia())?;
    let text = token.text();
    let name = match token.kind() {
        SyntaxKind::IntegerLiteral if text.ends_with(['l', 'L']) => "long",
        SyntaxKind::IntegerLiteral => "int",
        SyntaxKind::FloatLiteral if text.ends_with(['f', 'F']) => "float",
        SyntaxKind::FloatLiteral => "double",
        SyntaxKind::StringLiteral => STRING,
        SyntaxKind::CharLiteral => "char",
        SyntaxKind::True | SyntaxKind::False => "boolean",
        _ => return None,
    };
    Some(JavaType::new(name))
}

/// `a.b.C` of a chain made only of names and field accesses
fn dotted_path(node: &SyntaxNode) -> Option<String> {
    match node.kind() {
        SyntaxKind::NameRef => identifier_text(node),
        SyntaxKind::FieldAccessExpr => {
            let head = dotted_path(&qualifier(node)?)?;
            Some(format!("{head}.{}", member_name_text(node)?))
        }
        _ => None,
    }
}

/// Id a host may use to recognize the array `length` pseudo-field
pub fn is_array_length(id: DeclId) -> bool {
    id == jdk::ARRAY_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;
    use terse_lexer::significant_tokens;
    use terse_parser::parse_source_file_from_source;

    fn model(source: &str) -> (SyntaxNode, SemanticModel) {
        let result = parse_source_file_from_source(source, significant_tokens(source).into_iter());
        assert!(result.is_ok(), "{:?}", result.errors);
        let model = SemanticModel::build(&result.tree);
        (result.tree, model)
    }

    /// The first node of `kind` whose text is `text`
    fn node(root: &SyntaxNode, kind: SyntaxKind, text: &str) -> SyntaxNode {
        root.descendants()
            .find(|n| n.kind() == kind && n.text() == text)
            .unwrap_or_else(|| panic!("no {kind:?} `{text}`"))
    }

    fn type_of(model: &SemanticModel, node: &SyntaxNode) -> Option<String> {
        model
            .type_of(node)
            .unwrap()
            .map(|t| t.as_str().to_string())
    }

    const DECIMALS: &str = "import java.math.BigDecimal;\nclass Prices {\n  BigDecimal total;\n  BigDecimal sum(BigDecimal a, BigDecimal b) { return a.add(b).multiply(this.total); }\n}";

    #[test]
    fn test_instance_calls_resolve_to_jdk_methods() {
        let (root, model) = model(DECIMALS);
        let call = node(&root, SyntaxKind::MethodCallExpr, "a.add(b)");
        let add = model.resolve(&call).unwrap().unwrap();
        assert_eq!(add.kind, DeclKind::Method);
        assert_eq!(add.container.as_deref(), Some("java.math.BigDecimal"));
        assert_eq!(add.params, vec![JavaType::new("java.math.BigDecimal")]);
        assert_eq!(type_of(&model, &call).as_deref(), Some("java.math.BigDecimal"));

        let this_total = node(&root, SyntaxKind::FieldAccessExpr, "this.total");
        let field = model.resolve(&this_total).unwrap().unwrap();
        assert_eq!(field.kind, DeclKind::Field);
        assert_eq!(field.container.as_deref(), Some("Prices"));
    }

    #[test]
    fn test_parameters_and_declarators() {
        let (root, model) = model(DECIMALS);
        let a = node(&root, SyntaxKind::NameRef, "a");
        let decl = model.resolve(&a).unwrap().unwrap();
        assert_eq!(decl.kind, DeclKind::Parameter);

        let parameter = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::Parameter)
            .unwrap();
        assert_eq!(model.declared(&parameter).unwrap().map(|d| d.id), Some(decl.id));

        let method = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::MethodDeclaration)
            .unwrap();
        assert_eq!(model.declared(&method).unwrap(), None);
    }

    #[test]
    fn test_generic_receivers() {
        let (root, model) = model(
            "import java.util.*;\nclass A { void f(List<String> names, ArrayList<Integer> ids) { names.get(0); names.remove(0); names.remove(\"x\"); ids.add(1); } }",
        );
        let get = node(&root, SyntaxKind::MethodCallExpr, "names.get(0)");
        assert_eq!(type_of(&model, &get).as_deref(), Some("java.lang.String"));

        let by_index = model
            .resolve(&node(&root, SyntaxKind::MethodCallExpr, "names.remove(0)"))
            .unwrap()
            .unwrap();
        assert_eq!(by_index.params, vec![JavaType::new("int")]);
        assert_eq!(by_index.container.as_deref(), Some("java.util.List"));

        let by_value = model
            .resolve(&node(&root, SyntaxKind::MethodCallExpr, "names.remove(\"x\")"))
            .unwrap()
            .unwrap();
        assert_eq!(by_value.params, vec![JavaType::new("java.lang.Object")]);
        assert_eq!(by_value.container.as_deref(), Some("java.util.Collection"));

        let add = model
            .resolve(&node(&root, SyntaxKind::MethodCallExpr, "ids.add(1)"))
            .unwrap()
            .unwrap();
        assert_eq!(add.container.as_deref(), Some("java.util.Collection"));
        assert_eq!(add.params, vec![JavaType::new("java.lang.Integer")]);
    }

    #[test]
    fn test_static_members() {
        let (root, model) = model(
            "class A { double f(int a, int b) { return Math.max(a, b) + Math.PI + Math.sqrt(a); } }",
        );
        let max = model
            .resolve(&node(&root, SyntaxKind::MethodCallExpr, "Math.max(a, b)"))
            .unwrap()
            .unwrap();
        assert_eq!(max.container.as_deref(), Some("java.lang.Math"));
        assert_eq!(max.ty, Some(JavaType::new("int")));

        let math = model.resolve(&node(&root, SyntaxKind::NameRef, "Math")).unwrap().unwrap();
        assert_eq!(math.kind, DeclKind::Class);
        assert!(!math.is_variable());

        let pi = model
            .resolve(&node(&root, SyntaxKind::FieldAccessExpr, "Math.PI"))
            .unwrap()
            .unwrap();
        assert_eq!(pi.kind, DeclKind::Field);
        assert_eq!(pi.container.as_deref(), Some("java.lang.Math"));

        let sum = node(&root, SyntaxKind::BinaryExpr, "Math.max(a, b) + Math.PI + Math.sqrt(a)");
        assert_eq!(type_of(&model, &sum).as_deref(), Some("double"));
    }

    #[test]
    fn test_static_imports_and_qualified_classes() {
        let (root, model) = model(
            "import static java.lang.Math.max;\nclass A { Object f(int a) { max(a, 1); return java.util.Collections.emptyList(); } }",
        );
        let max = model
            .resolve(&node(&root, SyntaxKind::MethodCallExpr, "max(a, 1)"))
            .unwrap()
            .unwrap();
        assert_eq!(max.container.as_deref(), Some("java.lang.Math"));

        let empty = model
            .resolve(&node(&root, SyntaxKind::MethodCallExpr, "java.util.Collections.emptyList()"))
            .unwrap()
            .unwrap();
        assert_eq!(empty.container.as_deref(), Some("java.util.Collections"));
        let collections = node(&root, SyntaxKind::FieldAccessExpr, "java.util.Collections");
        assert_eq!(model.resolve(&collections).unwrap().unwrap().kind, DeclKind::Class);
    }

    #[test]
    fn test_expression_types() {
        let (root, model) = model(
            "class A { void f(int[] xs, long n, String s) { Object o = 1 + 2L; o = s + 1; o = xs[0]; o = xs.length; o = n > 1; o = (double) n; o = new int[3]; o = -'c'; o = 1.5f; } }",
        );
        let cases = [
            (SyntaxKind::BinaryExpr, "1 + 2L", "long"),
            (SyntaxKind::BinaryExpr, "s + 1", "java.lang.String"),
            (SyntaxKind::ArrayAccessExpr, "xs[0]", "int"),
            (SyntaxKind::FieldAccessExpr, "xs.length", "int"),
            (SyntaxKind::BinaryExpr, "n > 1", "boolean"),
            (SyntaxKind::CastExpr, "(double) n", "double"),
            (SyntaxKind::NewExpr, "new int[3]", "int[]"),
            (SyntaxKind::PrefixExpr, "-'c'", "int"),
            (SyntaxKind::Literal, "1.5f", "float"),
        ];
        for (kind, text, expected) in cases {
            assert_eq!(type_of(&model, &node(&root, kind, text)).as_deref(), Some(expected), "{text}");
        }
        let length = model
            .resolve(&node(&root, SyntaxKind::FieldAccessExpr, "xs.length"))
            .unwrap()
            .unwrap();
        assert!(is_array_length(length.id));
    }

    #[test]
    fn test_new_and_user_constructors() {
        let (root, model) = model(
            "import java.util.ArrayList;\nclass Point { Point(int x) { } void f() { Object p = new Point(1); Object l = new ArrayList<String>(); } }",
        );
        let point = model
            .resolve(&node(&root, SyntaxKind::NewExpr, "new Point(1)"))
            .unwrap()
            .unwrap();
        assert_eq!(point.kind, DeclKind::Method);
        assert_eq!(point.name, "Point");

        let list = node(&root, SyntaxKind::NewExpr, "new ArrayList<String>()");
        assert_eq!(
            type_of(&model, &list).as_deref(),
            Some("java.util.ArrayList<java.lang.String>")
        );
        assert_eq!(model.resolve(&list).unwrap().unwrap().kind, DeclKind::Class);
    }

    #[test]
    fn test_fields_shadowed_by_locals() {
        let (root, model) = model("class A { int x; void f() { x = 1; int x = 2; x = 3; } }");
        let refs: Vec<_> = root
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::NameRef)
            .collect();
        assert_eq!(model.resolve(&refs[0]).unwrap().unwrap().kind, DeclKind::Field);
        assert_eq!(model.resolve(&refs[1]).unwrap().unwrap().kind, DeclKind::Local);
    }

    #[test]
    fn test_equals_falls_back_to_object() {
        let (root, model) = model("class A { boolean f(A a, A b) { return a.equals(b); } }");
        let equals = model
            .resolve(&node(&root, SyntaxKind::MethodCallExpr, "a.equals(b)"))
            .unwrap()
            .unwrap();
        assert_eq!(equals.container.as_deref(), Some("java.lang.Object"));
    }

    #[test]
    fn test_index_not_ready() {
        let (root, model) = model(DECIMALS);
        let call = node(&root, SyntaxKind::MethodCallExpr, "a.add(b)");
        model.set_index_ready(false);
        assert_eq!(model.resolve(&call), Err(FoldError::IndexNotReady));
        assert_eq!(model.type_of(&call), Err(FoldError::IndexNotReady));
        model.set_index_ready(true);
        assert!(model.resolve(&call).unwrap().is_some());
    }
}
