//! Allow-lists of library classes, methods and constants the recognizer understands
//!
//! Loaded once and never mutated.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Classes whose methods may be folded into operators and functions
pub static SUPPORTED_CLASSES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "java.math.BigDecimal",
        "java.math.BigInteger",
        "java.lang.Math",
        "java.lang.Long",
        "java.lang.Integer",
        "java.lang.Float",
        "java.lang.Double",
        "java.lang.Character",
        "java.lang.String",
        "java.lang.StringBuilder",
        "java.lang.AbstractStringBuilder",
        "java.lang.Object",
        "java.util.List",
        "java.util.ArrayList",
        "java.util.Map",
        "java.util.HashMap",
        "java.util.Set",
        "java.util.HashSet",
        "java.util.Arrays",
        "java.util.Optional",
        "java.util.Collection",
        "java.util.Collections",
        "java.util.Objects",
        "java.util.stream.Stream",
    ]
    .into_iter()
    .collect()
});

/// Method names any rule may fold
pub static SUPPORTED_METHODS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // arithmetic
        "add", "subtract", "multiply", "divide", "remainder", "mod", "pow", "min", "max",
        "gcd", "negate", "plus", "abs", "signum", "scaleByPowerOfTen", "modInverse",
        "modPow",
        // bits
        "and", "or", "xor", "not", "andNot", "shiftLeft", "shiftRight",
        // comparison
        "equals", "compareTo",
        // strings and collections
        "append", "charAt", "get", "set", "put", "remove", "removeAll", "addAll", "subList",
        "substring", "asList", "singletonList", "valueOf", "collect", "stream",
        // java.lang.Math
        "acos", "asin", "atan", "atan2", "cbrt", "ceil", "cos", "cosh", "floor", "log",
        "log10", "log1p", "rint", "round", "sin", "sinh", "sqrt", "tan", "tanh",
        "toDegrees", "toRadians", "ulp", "exp", "expm1", "hypot", "random",
    ]
    .into_iter()
    .collect()
});

/// Methods that fold whatever class declares them
pub static CLASS_INDEPENDENT_METHODS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ["equals", "compareTo"].into_iter().collect());

/// Classes where `add`, `addAll`, `remove` mutate a collection
pub static COLLECTION_CLASSES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "java.util.List",
        "java.util.ArrayList",
        "java.util.Set",
        "java.util.HashSet",
        "java.util.Map",
        "java.util.HashMap",
        "java.util.Collection",
    ]
    .into_iter()
    .collect()
});

/// Types a literal or variable may have to take part in a fold
pub static SUPPORTED_PRIMITIVES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["int", "long", "float", "double", "char", "java.lang.String"]
        .into_iter()
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constant {
    Number(i64),
    Symbol(&'static str),
}

/// Well-known static fields of the supported classes
pub static CONSTANTS: LazyLock<HashMap<&'static str, Constant>> = LazyLock::new(|| {
    [
        ("ZERO", Constant::Number(0)),
        ("ONE", Constant::Number(1)),
        ("TEN", Constant::Number(10)),
        ("PI", Constant::Symbol("π")),
        ("E", Constant::Symbol("𝑒")),
    ]
    .into_iter()
    .collect()
});

pub fn is_supported_class(fqn: &str) -> bool {
    SUPPORTED_CLASSES.contains(fqn)
}

pub fn is_supported_type(erased: &str) -> bool {
    SUPPORTED_CLASSES.contains(erased) || SUPPORTED_PRIMITIVES.contains(erased)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_are_disjoint_where_they_should_be() {
        assert!(SUPPORTED_METHODS.contains("scaleByPowerOfTen"));
        assert!(!SUPPORTED_METHODS.contains("getName"));
        assert!(COLLECTION_CLASSES.iter().all(|c| SUPPORTED_CLASSES.contains(c)));
        assert!(CLASS_INDEPENDENT_METHODS.iter().all(|m| SUPPORTED_METHODS.contains(m)));
    }

    #[test]
    fn test_supported_types() {
        assert!(is_supported_type("java.math.BigDecimal"));
        assert!(is_supported_type("long"));
        assert!(!is_supported_type("boolean"));
        assert!(!is_supported_type("java.lang.String[]"));
        assert_eq!(CONSTANTS.get("PI"), Some(&Constant::Symbol("π")));
    }
}
