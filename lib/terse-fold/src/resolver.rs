//! The host collaborator the recognizer asks about names and types
//!
//! The folding core never resolves symbols itself. A host (see the
//! `terse-semantic` crate) answers three questions about syntax nodes:
//! what a reference points at, what a declarator declares, and what static
//! type an expression has.

use std::fmt;

use terse_syntax_tree::SyntaxNode;

use crate::error::FoldResult;

/// Stable identity of a declaration within one host model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Local,
    Parameter,
    Field,
    Method,
    Class,
}

impl DeclKind {
    /// Locals, parameters and fields
    pub fn is_variable(self) -> bool {
        matches!(self, DeclKind::Local | DeclKind::Parameter | DeclKind::Field)
    }
}

/// A canonical Java type name such as `java.util.List<java.lang.String>` or `int[]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JavaType(String);

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

impl JavaType {
    pub fn new(canonical: impl Into<String>) -> Self {
        Self(canonical.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The type with all type arguments removed, e.g. `java.util.List`
    pub fn erasure(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut depth = 0usize;
        for c in self.0.chars() {
            match c {
                '<' => depth += 1,
                '>' => depth = depth.saturating_sub(1),
                _ if depth == 0 => out.push(c),
                _ => {}
            }
        }
        out
    }

    pub fn is_array(&self) -> bool {
        self.0.ends_with("[]")
    }

    pub fn is_primitive(&self) -> bool {
        PRIMITIVES.contains(&self.0.as_str())
    }

    /// Component type of an array type
    pub fn element_type(&self) -> Option<JavaType> {
        self.0.strip_suffix("[]").map(JavaType::new)
    }

    /// Top-level type arguments, e.g. `[K, V]` for `java.util.Map<K,V>`
    pub fn type_arguments(&self) -> Vec<JavaType> {
        let Some(open) = self.0.find('<') else {
            return Vec::new();
        };
        let Some(close) = self.0.rfind('>') else {
            return Vec::new();
        };
        if close <= open {
            return Vec::new();
        }

        let inner = &self.0[open + 1..close];
        let mut args = Vec::new();
        let mut depth = 0usize;
        let mut start = 0;
        for (i, c) in inner.char_indices() {
            match c {
                '<' => depth += 1,
                '>' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    args.push(JavaType::new(inner[start..i].trim()));
                    start = i + 1;
                }
                _ => {}
            }
        }
        let last = inner[start..].trim();
        if !last.is_empty() {
            args.push(JavaType::new(last));
        }
        args
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a reference, call or declarator resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub id: DeclId,
    pub kind: DeclKind,
    pub name: String,
    /// Variable type, method return type, or the class type itself
    pub ty: Option<JavaType>,
    /// Fully-qualified name of the declaring class, for members
    pub container: Option<String>,
    /// Parameter types of a method
    pub params: Vec<JavaType>,
    pub is_final: bool,
}

impl Declaration {
    pub fn is_variable(&self) -> bool {
        self.kind.is_variable()
    }
}

/// Symbol and type information supplied by the host
///
/// Every method may fail with [`FoldError::IndexNotReady`](crate::FoldError::IndexNotReady),
/// which aborts the whole request. Absent information is `Ok(None)`.
pub trait Resolver {
    /// Declaration a `NameRef`, `FieldAccessExpr`, `MethodCallExpr` or `NewExpr` refers to
    fn resolve(&self, node: &SyntaxNode) -> FoldResult<Option<Declaration>>;

    /// Declaration introduced by a `VariableDeclarator` or `Parameter`
    fn declared(&self, node: &SyntaxNode) -> FoldResult<Option<Declaration>>;

    /// Static type of an expression node
    fn type_of(&self, node: &SyntaxNode) -> FoldResult<Option<JavaType>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erasure() {
        let ty = JavaType::new("java.util.Map<java.lang.String,java.util.List<java.lang.Integer>>");
        assert_eq!(ty.erasure(), "java.util.Map");
        assert_eq!(JavaType::new("int[]").erasure(), "int[]");
    }

    #[test]
    fn test_type_arguments_split_at_top_level() {
        let ty = JavaType::new("java.util.Map<java.lang.String,java.util.List<java.lang.Integer>>");
        let args = ty.type_arguments();
        assert_eq!(args.len(), 2);
        assert_eq!(args[1].as_str(), "java.util.List<java.lang.Integer>");
        assert!(JavaType::new("java.lang.String").type_arguments().is_empty());
    }

    #[test]
    fn test_arrays_and_primitives() {
        let ty = JavaType::new("java.lang.String[]");
        assert!(ty.is_array());
        assert!(!ty.is_primitive());
        assert_eq!(ty.element_type(), Some(JavaType::new("java.lang.String")));
        assert!(JavaType::new("long").is_primitive());
    }
}
