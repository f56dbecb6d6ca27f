//! Type names and conversions
//!
//! `TypeScope` turns the type text written in a file (`List<String>`,
//! `Map.Entry`, `int[]`) into canonical [`JavaType`]s, following the
//! file's package, its imports and the implicit `java.lang.*`.

use std::collections::HashMap;

use terse_fold::JavaType;
use terse_syntax_tree::helpers::{find_child, find_token};
use terse_syntax_tree::{SyntaxElement, SyntaxKind, SyntaxNode};

use crate::jdk;

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

/// A `import static a.b.C.member;` or `import static a.b.C.*;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticImport {
    pub class: String,
    /// `None` for an on-demand import
    pub member: Option<String>,
}

impl StaticImport {
    pub fn provides(&self, member: &str) -> bool {
        self.member.as_deref().is_none_or(|m| m == member)
    }
}

/// The names visible at file level
#[derive(Debug, Default, Clone)]
pub struct TypeScope {
    package: Option<String>,
    /// Simple name to fully-qualified name, from single-type imports
    single: HashMap<String, String>,
    /// Packages imported on demand
    on_demand: Vec<String>,
    static_imports: Vec<StaticImport>,
    /// Simple name to fully-qualified name of classes declared in the file
    declared: HashMap<String, String>,
}

impl TypeScope {
    /// Collect the package, imports and class names of a `SourceFile`
    pub fn from_file(root: &SyntaxNode) -> Self {
        let mut scope = TypeScope {
            package: find_child(root, SyntaxKind::PackageDeclaration)
                .and_then(|p| find_child(&p, SyntaxKind::QualifiedName))
                .map(|name| dotted_text(&name)),
            ..Default::default()
        };

        for import in root
            .children()
            .filter(|n| n.kind() == SyntaxKind::ImportDeclaration)
        {
            let Some(path) = find_child(&import, SyntaxKind::QualifiedName).map(|n| dotted_text(&n))
            else {
                continue;
            };
            let is_static = find_token(&import, SyntaxKind::Static).is_some();
            let wildcard = find_token(&import, SyntaxKind::Star).is_some();
            scope.add_import(path, is_static, wildcard);
        }

        for class in root
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::ClassDeclaration)
        {
            let fqn = scope.qualified_class_name(&class);
            if let Some(simple) = class_simple_name(&class) {
                scope.declared.entry(simple).or_insert(fqn);
            }
        }
        scope
    }

    pub fn add_import(&mut self, path: String, is_static: bool, wildcard: bool) {
        match (is_static, wildcard) {
            (false, false) => {
                let simple = jdk::simple_name(&path).to_string();
                self.single.insert(simple, path);
            }
            (false, true) => self.on_demand.push(path),
            (true, true) => self.static_imports.push(StaticImport {
                class: path,
                member: None,
            }),
            (true, false) => {
                if let Some((class, member)) = path.rsplit_once('.') {
                    self.static_imports.push(StaticImport {
                        class: class.to_string(),
                        member: Some(member.to_string()),
                    });
                }
            }
        }
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn static_imports(&self) -> &[StaticImport] {
        &self.static_imports
    }

    /// Fully-qualified name of a class declaration, nesting included
    pub fn qualified_class_name(&self, class: &SyntaxNode) -> String {
        let mut names: Vec<String> = class
            .ancestors()
            .filter(|n| n.kind() == SyntaxKind::ClassDeclaration)
            .filter_map(|n| class_simple_name(&n))
            .collect();
        names.reverse();
        let path = names.join(".");
        match &self.package {
            Some(package) => format!("{package}.{path}"),
            None => path,
        }
    }

    /// Fully-qualified name of a simple class name, when the name is known
    pub fn resolve_class(&self, simple: &str) -> Option<String> {
        if let Some(fqn) = self.declared.get(simple) {
            return Some(fqn.clone());
        }
        if let Some(fqn) = self.single.get(simple) {
            return Some(fqn.clone());
        }
        if let Some(class) = jdk::in_package("java.lang", simple) {
            return Some(class.class.name.to_string());
        }
        self.on_demand
            .iter()
            .find_map(|package| jdk::in_package(package, simple))
            .map(|class| class.class.name.to_string())
    }

    /// Whether `fqn` names a class declared in this file
    pub fn is_declared(&self, fqn: &str) -> bool {
        self.declared.values().any(|declared| declared == fqn)
    }

    /// Canonical form of a (possibly dotted) class name
    fn class_name(&self, name: &str) -> String {
        if PRIMITIVES.contains(&name) {
            return name.to_string();
        }
        match name.split_once('.') {
            None => self.resolve_class(name).unwrap_or_else(|| name.to_string()),
            Some((first, rest)) => match self.resolve_class(first) {
                Some(outer) => format!("{outer}.{rest}"),
                None => name.to_string(),
            },
        }
    }

    /// Canonical type of written type text
    ///
    /// Whitespace is dropped, names are qualified and the diamond `<>`
    /// disappears, so `Map<String, List<Integer>>` becomes
    /// `java.util.Map<java.lang.String,java.util.List<java.lang.Integer>>`.
    pub fn canonical(&self, text: &str) -> JavaType {
        let out = map_names(text, |name| self.class_name(name));
        JavaType::new(out.replace("<>", ""))
    }

    /// Canonical type of a `Type` node
    pub fn of_type_node(&self, ty: &SyntaxNode) -> JavaType {
        self.canonical(&terse_syntax_tree::helpers::type_text(ty))
    }
}

/// Rewrite every name in type text, dropping whitespace
fn map_names(text: &str, mut f: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut name = String::new();
    let mut flush = |name: &mut String, out: &mut String| {
        if !name.is_empty() {
            // `...` of a variable-arity parameter is not a name
            if name.chars().all(|c| c == '.') {
                out.push_str(name);
            } else {
                out.push_str(&f(name));
            }
            name.clear();
        }
    };
    for c in text.chars() {
        if c.is_alphanumeric() || matches!(c, '_' | '$' | '.') {
            name.push(c);
        } else {
            flush(&mut name, &mut out);
            if !c.is_whitespace() {
                out.push(c);
            }
        }
    }
    flush(&mut name, &mut out);
    out
}

/// Replace bound type variables; unbound ones erase to `java.lang.Object`
pub fn substitute(ty: &str, bindings: &HashMap<&str, JavaType>) -> JavaType {
    JavaType::new(map_names(ty, |name| match bindings.get(name) {
        Some(bound) => bound.as_str().to_string(),
        None if jdk::is_type_variable(name) => jdk::OBJECT.to_string(),
        None => name.to_string(),
    }))
}

/// Bind a generic class's parameters to the type arguments of `receiver`
pub fn bindings(class: &jdk::JdkClass, receiver: &JavaType) -> HashMap<&'static str, JavaType> {
    class
        .type_params
        .iter()
        .copied()
        .zip(receiver.type_arguments())
        .collect()
}

fn class_simple_name(class: &SyntaxNode) -> Option<String> {
    terse_syntax_tree::helpers::identifier_text(class)
}

/// Identifier and dot tokens of a node, concatenated
fn dotted_text(node: &SyntaxNode) -> String {
    node.children_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .filter(|tok| matches!(tok.kind(), SyntaxKind::Identifier | SyntaxKind::Dot))
        .map(|tok| tok.text().to_string())
        .collect()
}

/// Rank of a numeric primitive in the widening order
fn numeric_rank(ty: &str) -> Option<u8> {
    Some(match ty {
        "byte" => 1,
        "short" | "char" => 2,
        "int" => 3,
        "long" => 4,
        "float" => 5,
        "double" => 6,
        _ => return None,
    })
}

pub fn boxed(primitive: &str) -> Option<&'static str> {
    Some(match primitive {
        "boolean" => "java.lang.Boolean",
        "byte" => "java.lang.Byte",
        "char" => "java.lang.Character",
        "short" => "java.lang.Short",
        "int" => "java.lang.Integer",
        "long" => "java.lang.Long",
        "float" => "java.lang.Float",
        "double" => "java.lang.Double",
        _ => return None,
    })
}

pub fn unboxed(class: &str) -> Option<&'static str> {
    Some(match class {
        "java.lang.Boolean" => "boolean",
        "java.lang.Byte" => "byte",
        "java.lang.Character" => "char",
        "java.lang.Short" => "short",
        "java.lang.Integer" => "int",
        "java.lang.Long" => "long",
        "java.lang.Float" => "float",
        "java.lang.Double" => "double",
        _ => return None,
    })
}

/// A primitive numeric type, unboxing wrappers
pub fn numeric(ty: &JavaType) -> Option<&str> {
    let name = if ty.is_primitive() {
        ty.as_str()
    } else {
        unboxed(ty.as_str())?
    };
    numeric_rank(name).map(|_| name)
}

/// Whether a primitive widens to another without a cast
pub fn widens(from: &str, to: &str) -> bool {
    match (numeric_rank(from), numeric_rank(to)) {
        // char and short do not widen into each other
        (Some(2), Some(2)) => from == to,
        (Some(a), Some(b)) => a <= b && !(to == "char" && from != "char"),
        _ => from == to,
    }
}

/// Binary numeric promotion of two operand types
pub fn promote(a: &JavaType, b: &JavaType) -> Option<JavaType> {
    let (a, b) = (numeric(a)?, numeric(b)?);
    let widest = [a, b, "int"]
        .into_iter()
        .max_by_key(|t| numeric_rank(t).unwrap_or(0))?;
    Some(JavaType::new(widest))
}

/// Unary numeric promotion
pub fn promote_unary(ty: &JavaType) -> Option<JavaType> {
    promote(ty, &JavaType::new("int"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use terse_lexer::significant_tokens;
    use terse_parser::parse_source_file_from_source;

    fn scope(source: &str) -> TypeScope {
        let result = parse_source_file_from_source(source, significant_tokens(source).into_iter());
        assert!(result.is_ok(), "{:?}", result.errors);
        TypeScope::from_file(&result.tree)
    }

    #[test]
    fn test_imports_qualify_names() {
        let scope = scope(
            "package app;\nimport java.util.*;\nimport java.math.BigDecimal;\nclass Order { }",
        );
        assert_eq!(scope.package(), Some("app"));
        assert_eq!(
            scope.canonical("Map<String, List<BigDecimal>>").as_str(),
            "java.util.Map<java.lang.String,java.util.List<java.math.BigDecimal>>"
        );
        assert_eq!(scope.canonical("Order[]").as_str(), "app.Order[]");
        assert_eq!(scope.canonical("int").as_str(), "int");
    }

    #[test]
    fn test_diamond_and_unknown_names() {
        let scope = scope("import java.util.ArrayList;\nclass A { }");
        assert_eq!(scope.canonical("ArrayList<>").as_str(), "java.util.ArrayList");
        assert_eq!(scope.canonical("Widget").as_str(), "Widget");
        assert_eq!(scope.canonical("java.util.List<T>").as_str(), "java.util.List<T>");
        assert_eq!(scope.resolve_class("Math").as_deref(), Some("java.lang.Math"));
        assert_eq!(scope.resolve_class("List"), None);
    }

    #[test]
    fn test_nested_classes() {
        let scope = scope("package p;\nclass Outer { class Inner { } }");
        assert_eq!(scope.resolve_class("Inner").as_deref(), Some("p.Outer.Inner"));
        assert_eq!(scope.canonical("Outer.Inner").as_str(), "p.Outer.Inner");
        assert!(scope.is_declared("p.Outer"));
    }

    #[test]
    fn test_static_imports() {
        let scope = scope("import static java.lang.Math.max;\nimport static java.util.Collections.*;\nclass A { }");
        let imports = scope.static_imports();
        assert_eq!(imports.len(), 2);
        assert_eq!(imports[0].class, "java.lang.Math");
        assert!(imports[0].provides("max"));
        assert!(!imports[0].provides("min"));
        assert!(imports[1].provides("singletonList"));
    }

    #[test]
    fn test_substitution() {
        let list = jdk::class("java.util.List").unwrap();
        let receiver = JavaType::new("java.util.List<java.lang.String>");
        let bound = bindings(list.class, &receiver);
        assert_eq!(substitute("E", &bound).as_str(), "java.lang.String");
        assert_eq!(
            substitute("java.util.stream.Stream<R>", &bound).as_str(),
            "java.util.stream.Stream<java.lang.Object>"
        );
    }

    #[test]
    fn test_numeric_promotion() {
        let int = JavaType::new("int");
        let long = JavaType::new("long");
        let boxed_double = JavaType::new("java.lang.Double");
        assert_eq!(promote(&int, &long), Some(long.clone()));
        assert_eq!(promote(&int, &boxed_double), Some(JavaType::new("double")));
        assert_eq!(promote_unary(&JavaType::new("char")), Some(int.clone()));
        assert_eq!(promote(&int, &JavaType::new("java.lang.String")), None);
        assert!(widens("int", "double"));
        assert!(!widens("long", "int"));
        assert!(!widens("char", "short"));
        assert!(!widens("byte", "char"));
    }
}
