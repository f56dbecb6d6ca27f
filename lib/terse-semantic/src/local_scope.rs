//! Local scope management for method bodies
//!
//! This module provides a scope stack for tracking local variable and
//! parameter bindings. It supports shadowing: a lambda parameter or a
//! local in a nested class body may reuse an outer name, and the outer
//! binding comes back when the inner scope closes.

use std::collections::HashMap;

use terse_fold::DeclId;

/// Manages lexical scopes within a method body.
///
/// The scope stack supports:
/// - Nested scopes (blocks, loops, lambdas)
/// - Variable shadowing (same name can be rebound)
/// - O(1) lookup of current binding for a name
///
/// # Example
/// ```ignore
/// void example(int x) {
///     int y = x + 1;          // y binds to the first declaration
///     for (int i = 0; i < y; i++) {
///         int z = i * 2;      // z is visible until the loop body closes
///     }
///     // z and i are gone again here
/// }
/// ```
#[derive(Debug, Default)]
pub struct LocalScope {
    /// Fast lookup: name -> current DeclId (accounts for shadowing)
    current_bindings: HashMap<String, DeclId>,
    /// Shadowed bindings per level, restored when the level is popped
    shadow_stack: Vec<Vec<(String, Option<DeclId>)>>,
}

impl LocalScope {
    /// Create a scope stack with one open level
    pub fn new() -> Self {
        LocalScope {
            current_bindings: HashMap::new(),
            shadow_stack: vec![Vec::new()],
        }
    }

    /// Push a new scope level (entering a block, loop or lambda)
    pub fn push_scope(&mut self) {
        self.shadow_stack.push(Vec::new());
    }

    /// Pop the current scope level, restoring any shadowed bindings
    pub fn pop_scope(&mut self) {
        let Some(shadows) = self.shadow_stack.pop() else {
            return;
        };
        // Restore in reverse order so a name bound twice in one level
        // ends up with its oldest previous binding
        for (name, prev_id) in shadows.into_iter().rev() {
            match prev_id {
                Some(id) => {
                    self.current_bindings.insert(name, id);
                }
                None => {
                    self.current_bindings.remove(&name);
                }
            }
        }
    }

    /// Bind a declaration in the current scope
    pub fn bind(&mut self, name: String, id: DeclId) {
        let prev = self.current_bindings.get(&name).copied();
        if let Some(shadows) = self.shadow_stack.last_mut() {
            shadows.push((name.clone(), prev));
        }
        self.current_bindings.insert(name, id);
    }

    /// Look up a name in the current scope
    pub fn lookup(&self, name: &str) -> Option<DeclId> {
        self.current_bindings.get(name).copied()
    }

    /// Get the current scope depth (for debugging)
    pub fn depth(&self) -> usize {
        self.shadow_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_binding() {
        let mut scope = LocalScope::new();
        scope.bind("x".to_string(), DeclId(1));
        assert_eq!(scope.lookup("x"), Some(DeclId(1)));
        assert_eq!(scope.lookup("y"), None);
    }

    #[test]
    fn test_shadowing() {
        let mut scope = LocalScope::new();
        scope.bind("x".to_string(), DeclId(1));

        scope.push_scope();
        scope.bind("x".to_string(), DeclId(2));
        assert_eq!(scope.lookup("x"), Some(DeclId(2)));

        scope.pop_scope();
        assert_eq!(scope.lookup("x"), Some(DeclId(1)));
    }

    #[test]
    fn test_nested_scopes() {
        let mut scope = LocalScope::new();
        scope.bind("a".to_string(), DeclId(1));

        scope.push_scope();
        scope.bind("b".to_string(), DeclId(2));

        scope.push_scope();
        scope.bind("c".to_string(), DeclId(3));
        assert_eq!(scope.depth(), 3);

        assert_eq!(scope.lookup("a"), Some(DeclId(1)));
        assert_eq!(scope.lookup("b"), Some(DeclId(2)));
        assert_eq!(scope.lookup("c"), Some(DeclId(3)));

        scope.pop_scope();
        assert_eq!(scope.lookup("b"), Some(DeclId(2)));
        assert_eq!(scope.lookup("c"), None);

        scope.pop_scope();
        assert_eq!(scope.lookup("a"), Some(DeclId(1)));
        assert_eq!(scope.lookup("b"), None);
    }

    #[test]
    fn test_rebinding_in_one_level() {
        let mut scope = LocalScope::new();
        scope.push_scope();
        scope.bind("x".to_string(), DeclId(1));
        scope.bind("x".to_string(), DeclId(2));
        scope.pop_scope();
        assert_eq!(scope.lookup("x"), None);
    }
}
