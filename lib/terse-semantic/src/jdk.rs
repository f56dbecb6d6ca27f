//! Read-only table of the JDK classes the folding rules ask about
//!
//! Types are written in canonical form. A type variable is a single
//! uppercase letter; it is bound from the receiver's type arguments and
//! erased to `java.lang.Object` when nothing binds it. A trailing `...`
//! marks a variable-arity parameter.

use std::collections::HashMap;
use std::sync::LazyLock;

use terse_fold::DeclId;

#[derive(Debug)]
pub struct JdkClass {
    pub name: &'static str,
    pub type_params: &'static [&'static str],
    /// Direct supertypes, written in terms of `type_params`
    pub supertypes: &'static [&'static str],
    pub methods: &'static [JdkMethod],
    pub fields: &'static [JdkField],
}

#[derive(Debug)]
pub struct JdkMethod {
    pub name: &'static str,
    pub params: &'static [&'static str],
    pub ret: &'static str,
    pub is_static: bool,
}

#[derive(Debug)]
pub struct JdkField {
    pub name: &'static str,
    pub ty: &'static str,
    pub is_static: bool,
}

impl JdkMethod {
    pub fn is_varargs(&self) -> bool {
        self.params.last().is_some_and(|p| p.ends_with("..."))
    }

    /// Whether `count` arguments can be passed
    pub fn accepts(&self, count: usize) -> bool {
        if self.is_varargs() {
            count + 1 >= self.params.len()
        } else {
            count == self.params.len()
        }
    }

    /// Declared type of the parameter receiving argument `i`
    pub fn param_for(&self, i: usize) -> Option<&'static str> {
        match self.params.get(i) {
            Some(p) if i + 1 == self.params.len() && self.is_varargs() => {
                p.strip_suffix("...")
            }
            Some(p) => Some(p),
            None if self.is_varargs() => self.params.last().and_then(|p| p.strip_suffix("...")),
            None => None,
        }
    }
}

const fn method(name: &'static str, params: &'static [&'static str], ret: &'static str) -> JdkMethod {
    JdkMethod {
        name,
        params,
        ret,
        is_static: false,
    }
}

const fn function(name: &'static str, params: &'static [&'static str], ret: &'static str) -> JdkMethod {
    JdkMethod {
        name,
        params,
        ret,
        is_static: true,
    }
}

const fn constant(name: &'static str, ty: &'static str) -> JdkField {
    JdkField {
        name,
        ty,
        is_static: true,
    }
}

pub const OBJECT: &str = "java.lang.Object";
const STRING: &str = "java.lang.String";
const CHAR_SEQUENCE: &str = "java.lang.CharSequence";
const STRING_BUILDER: &str = "java.lang.StringBuilder";
const BIG_DECIMAL: &str = "java.math.BigDecimal";
const BIG_INTEGER: &str = "java.math.BigInteger";
const MATH_CONTEXT: &str = "java.math.MathContext";
const ROUNDING_MODE: &str = "java.math.RoundingMode";

const NONE: &[&str] = &[];
const INT: &[&str] = &["int"];
const INT_INT: &[&str] = &["int", "int"];
const LONG_LONG: &[&str] = &["long", "long"];
const FLOAT_FLOAT: &[&str] = &["float", "float"];
const DOUBLE: &[&str] = &["double"];
const DOUBLE_DOUBLE: &[&str] = &["double", "double"];
const CHAR: &[&str] = &["char"];
const OBJ: &[&str] = &[OBJECT];
const OBJ_OBJ: &[&str] = &[OBJECT, OBJECT];
const STR: &[&str] = &[STRING];
const DEC: &[&str] = &[BIG_DECIMAL];
const BIG: &[&str] = &[BIG_INTEGER];

const MATH_METHODS: &[JdkMethod] = &[
    function("abs", DOUBLE, "double"),
    function("abs", &["float"], "float"),
    function("abs", &["long"], "long"),
    function("abs", INT, "int"),
    function("max", DOUBLE_DOUBLE, "double"),
    function("max", FLOAT_FLOAT, "float"),
    function("max", LONG_LONG, "long"),
    function("max", INT_INT, "int"),
    function("min", DOUBLE_DOUBLE, "double"),
    function("min", FLOAT_FLOAT, "float"),
    function("min", LONG_LONG, "long"),
    function("min", INT_INT, "int"),
    function("pow", DOUBLE_DOUBLE, "double"),
    function("atan2", DOUBLE_DOUBLE, "double"),
    function("hypot", DOUBLE_DOUBLE, "double"),
    function("round", DOUBLE, "long"),
    function("round", &["float"], "int"),
    function("random", NONE, "double"),
    function("floorDiv", INT_INT, "int"),
    function("floorMod", INT_INT, "int"),
    function("sqrt", DOUBLE, "double"),
    function("cbrt", DOUBLE, "double"),
    function("exp", DOUBLE, "double"),
    function("expm1", DOUBLE, "double"),
    function("log", DOUBLE, "double"),
    function("log10", DOUBLE, "double"),
    function("log1p", DOUBLE, "double"),
    function("sin", DOUBLE, "double"),
    function("cos", DOUBLE, "double"),
    function("tan", DOUBLE, "double"),
    function("asin", DOUBLE, "double"),
    function("acos", DOUBLE, "double"),
    function("atan", DOUBLE, "double"),
    function("sinh", DOUBLE, "double"),
    function("cosh", DOUBLE, "double"),
    function("tanh", DOUBLE, "double"),
    function("ceil", DOUBLE, "double"),
    function("floor", DOUBLE, "double"),
    function("rint", DOUBLE, "double"),
    function("toDegrees", DOUBLE, "double"),
    function("toRadians", DOUBLE, "double"),
    function("ulp", DOUBLE, "double"),
    function("signum", DOUBLE, "double"),
];

/// Instance and static members of a boxed numeric class
macro_rules! boxed {
    ($name:literal, $prim:literal, $parse:literal) => {
        JdkClass {
            name: $name,
            type_params: &[],
            supertypes: &["java.lang.Number", concat!("java.lang.Comparable<", $name, ">")],
            methods: &[
                function("valueOf", &[$prim], $name),
                function("valueOf", STR, $name),
                function($parse, STR, $prim),
                function("max", &[$prim, $prim], $prim),
                function("min", &[$prim, $prim], $prim),
                function("sum", &[$prim, $prim], $prim),
                function("toString", &[$prim], STRING),
                function("compare", &[$prim, $prim], "int"),
            ],
            fields: &[constant("MAX_VALUE", $prim), constant("MIN_VALUE", $prim)],
        }
    };
}

static CLASSES: &[JdkClass] = &[
    JdkClass {
        name: OBJECT,
        type_params: &[],
        supertypes: &[],
        methods: &[
            method("equals", OBJ, "boolean"),
            method("hashCode", NONE, "int"),
            method("toString", NONE, STRING),
        ],
        fields: &[],
    },
    JdkClass {
        name: "java.lang.Comparable",
        type_params: &["T"],
        supertypes: &[],
        methods: &[method("compareTo", &["T"], "int")],
        fields: &[],
    },
    JdkClass {
        name: CHAR_SEQUENCE,
        type_params: &[],
        supertypes: &[],
        methods: &[method("length", NONE, "int"), method("charAt", INT, "char")],
        fields: &[],
    },
    JdkClass {
        name: "java.lang.Number",
        type_params: &[],
        supertypes: &[],
        methods: &[
            method("intValue", NONE, "int"),
            method("longValue", NONE, "long"),
            method("floatValue", NONE, "float"),
            method("doubleValue", NONE, "double"),
        ],
        fields: &[],
    },
    JdkClass {
        name: "java.lang.Iterable",
        type_params: &["T"],
        supertypes: &[],
        methods: &[
            method("iterator", NONE, "java.util.Iterator<T>"),
            method("forEach", &["java.util.function.Consumer<T>"], "void"),
        ],
        fields: &[],
    },
    JdkClass {
        name: STRING,
        type_params: &[],
        supertypes: &["java.lang.Comparable<java.lang.String>", CHAR_SEQUENCE],
        methods: &[
            method("length", NONE, "int"),
            method("charAt", INT, "char"),
            method("substring", INT, STRING),
            method("substring", INT_INT, STRING),
            method("isEmpty", NONE, "boolean"),
            method("equalsIgnoreCase", STR, "boolean"),
            method("compareTo", STR, "int"),
            method("contains", &[CHAR_SEQUENCE], "boolean"),
            method("startsWith", STR, "boolean"),
            method("endsWith", STR, "boolean"),
            method("indexOf", STR, "int"),
            method("trim", NONE, STRING),
            method("toUpperCase", NONE, STRING),
            method("toLowerCase", NONE, STRING),
            method("concat", STR, STRING),
            method("split", STR, "java.lang.String[]"),
            method("replace", &[CHAR_SEQUENCE, CHAR_SEQUENCE], STRING),
            function("valueOf", OBJ, STRING),
            function("valueOf", INT, STRING),
            function("valueOf", &["long"], STRING),
            function("valueOf", DOUBLE, STRING),
            function("valueOf", CHAR, STRING),
            function("format", &[STRING, "java.lang.Object..."], STRING),
            function("join", &[CHAR_SEQUENCE, "java.lang.CharSequence..."], STRING),
        ],
        fields: &[],
    },
    JdkClass {
        name: "java.lang.AbstractStringBuilder",
        type_params: &[],
        supertypes: &[CHAR_SEQUENCE],
        methods: &[
            method("length", NONE, "int"),
            method("charAt", INT, "char"),
            method("setLength", INT, "void"),
        ],
        fields: &[],
    },
    JdkClass {
        name: STRING_BUILDER,
        type_params: &[],
        supertypes: &["java.lang.AbstractStringBuilder"],
        methods: &[
            method("append", STR, STRING_BUILDER),
            method("append", CHAR, STRING_BUILDER),
            method("append", INT, STRING_BUILDER),
            method("append", &["long"], STRING_BUILDER),
            method("append", DOUBLE, STRING_BUILDER),
            method("append", OBJ, STRING_BUILDER),
            method("insert", &["int", STRING], STRING_BUILDER),
            method("reverse", NONE, STRING_BUILDER),
            method("deleteCharAt", INT, STRING_BUILDER),
            method("toString", NONE, STRING),
        ],
        fields: &[],
    },
    JdkClass {
        name: "java.lang.Math",
        type_params: &[],
        supertypes: &[],
        methods: MATH_METHODS,
        fields: &[constant("PI", "double"), constant("E", "double")],
    },
    boxed!("java.lang.Integer", "int", "parseInt"),
    boxed!("java.lang.Long", "long", "parseLong"),
    boxed!("java.lang.Float", "float", "parseFloat"),
    boxed!("java.lang.Double", "double", "parseDouble"),
    JdkClass {
        name: "java.lang.Character",
        type_params: &[],
        supertypes: &["java.lang.Comparable<java.lang.Character>"],
        methods: &[
            function("valueOf", CHAR, "java.lang.Character"),
            function("isDigit", CHAR, "boolean"),
            function("isLetter", CHAR, "boolean"),
            function("isWhitespace", CHAR, "boolean"),
            function("toUpperCase", CHAR, "char"),
            function("toLowerCase", CHAR, "char"),
        ],
        fields: &[],
    },
    JdkClass {
        name: "java.lang.Boolean",
        type_params: &[],
        supertypes: &["java.lang.Comparable<java.lang.Boolean>"],
        methods: &[
            function("valueOf", &["boolean"], "java.lang.Boolean"),
            function("parseBoolean", STR, "boolean"),
            method("booleanValue", NONE, "boolean"),
        ],
        fields: &[
            constant("TRUE", "java.lang.Boolean"),
            constant("FALSE", "java.lang.Boolean"),
        ],
    },
    JdkClass {
        name: "java.lang.System",
        type_params: &[],
        supertypes: &[],
        methods: &[
            function("currentTimeMillis", NONE, "long"),
            function("nanoTime", NONE, "long"),
            function("lineSeparator", NONE, STRING),
        ],
        fields: &[
            constant("out", "java.io.PrintStream"),
            constant("err", "java.io.PrintStream"),
        ],
    },
    JdkClass {
        name: "java.io.PrintStream",
        type_params: &[],
        supertypes: &[],
        methods: &[
            method("println", NONE, "void"),
            method("println", STR, "void"),
            method("println", OBJ, "void"),
            method("print", STR, "void"),
            method("print", OBJ, "void"),
            method("printf", &[STRING, "java.lang.Object..."], "java.io.PrintStream"),
        ],
        fields: &[],
    },
    JdkClass {
        name: BIG_DECIMAL,
        type_params: &[],
        supertypes: &["java.lang.Number", "java.lang.Comparable<java.math.BigDecimal>"],
        methods: &[
            method("add", DEC, BIG_DECIMAL),
            method("subtract", DEC, BIG_DECIMAL),
            method("multiply", DEC, BIG_DECIMAL),
            method("divide", DEC, BIG_DECIMAL),
            method("divide", &[BIG_DECIMAL, MATH_CONTEXT], BIG_DECIMAL),
            method("divide", &[BIG_DECIMAL, "int", ROUNDING_MODE], BIG_DECIMAL),
            method("remainder", DEC, BIG_DECIMAL),
            method("pow", INT, BIG_DECIMAL),
            method("negate", NONE, BIG_DECIMAL),
            method("plus", NONE, BIG_DECIMAL),
            method("abs", NONE, BIG_DECIMAL),
            method("signum", NONE, "int"),
            method("min", DEC, BIG_DECIMAL),
            method("max", DEC, BIG_DECIMAL),
            method("scaleByPowerOfTen", INT, BIG_DECIMAL),
            method("setScale", &["int", ROUNDING_MODE], BIG_DECIMAL),
            method("round", &[MATH_CONTEXT], BIG_DECIMAL),
            method("precision", NONE, "int"),
            method("scale", NONE, "int"),
            method("stripTrailingZeros", NONE, BIG_DECIMAL),
            method("toBigInteger", NONE, BIG_INTEGER),
            method("toPlainString", NONE, STRING),
            function("valueOf", &["long"], BIG_DECIMAL),
            function("valueOf", DOUBLE, BIG_DECIMAL),
            function("valueOf", &["long", "int"], BIG_DECIMAL),
        ],
        fields: &[
            constant("ZERO", BIG_DECIMAL),
            constant("ONE", BIG_DECIMAL),
            constant("TEN", BIG_DECIMAL),
        ],
    },
    JdkClass {
        name: BIG_INTEGER,
        type_params: &[],
        supertypes: &["java.lang.Number", "java.lang.Comparable<java.math.BigInteger>"],
        methods: &[
            method("add", BIG, BIG_INTEGER),
            method("subtract", BIG, BIG_INTEGER),
            method("multiply", BIG, BIG_INTEGER),
            method("divide", BIG, BIG_INTEGER),
            method("mod", BIG, BIG_INTEGER),
            method("remainder", BIG, BIG_INTEGER),
            method("pow", INT, BIG_INTEGER),
            method("negate", NONE, BIG_INTEGER),
            method("abs", NONE, BIG_INTEGER),
            method("signum", NONE, "int"),
            method("gcd", BIG, BIG_INTEGER),
            method("min", BIG, BIG_INTEGER),
            method("max", BIG, BIG_INTEGER),
            method("modInverse", BIG, BIG_INTEGER),
            method("modPow", &[BIG_INTEGER, BIG_INTEGER], BIG_INTEGER),
            method("and", BIG, BIG_INTEGER),
            method("or", BIG, BIG_INTEGER),
            method("xor", BIG, BIG_INTEGER),
            method("not", NONE, BIG_INTEGER),
            method("andNot", BIG, BIG_INTEGER),
            method("shiftLeft", INT, BIG_INTEGER),
            method("shiftRight", INT, BIG_INTEGER),
            method("testBit", INT, "boolean"),
            method("bitLength", NONE, "int"),
            function("valueOf", &["long"], BIG_INTEGER),
        ],
        fields: &[
            constant("ZERO", BIG_INTEGER),
            constant("ONE", BIG_INTEGER),
            constant("TWO", BIG_INTEGER),
            constant("TEN", BIG_INTEGER),
        ],
    },
    JdkClass {
        name: MATH_CONTEXT,
        type_params: &[],
        supertypes: &[],
        methods: &[method("getPrecision", NONE, "int")],
        fields: &[
            constant("DECIMAL32", MATH_CONTEXT),
            constant("DECIMAL64", MATH_CONTEXT),
            constant("DECIMAL128", MATH_CONTEXT),
            constant("UNLIMITED", MATH_CONTEXT),
        ],
    },
    JdkClass {
        name: ROUNDING_MODE,
        type_params: &[],
        supertypes: &[],
        methods: &[],
        fields: &[
            constant("UP", ROUNDING_MODE),
            constant("DOWN", ROUNDING_MODE),
            constant("CEILING", ROUNDING_MODE),
            constant("FLOOR", ROUNDING_MODE),
            constant("HALF_UP", ROUNDING_MODE),
            constant("HALF_DOWN", ROUNDING_MODE),
            constant("HALF_EVEN", ROUNDING_MODE),
        ],
    },
    JdkClass {
        name: "java.util.Iterator",
        type_params: &["E"],
        supertypes: &[],
        methods: &[method("hasNext", NONE, "boolean"), method("next", NONE, "E")],
        fields: &[],
    },
    JdkClass {
        name: "java.util.Collection",
        type_params: &["E"],
        supertypes: &["java.lang.Iterable<E>"],
        methods: &[
            method("size", NONE, "int"),
            method("isEmpty", NONE, "boolean"),
            method("contains", OBJ, "boolean"),
            method("add", &["E"], "boolean"),
            method("remove", OBJ, "boolean"),
            method("addAll", &["java.util.Collection<E>"], "boolean"),
            method("removeAll", &["java.util.Collection<java.lang.Object>"], "boolean"),
            method("clear", NONE, "void"),
            method("stream", NONE, "java.util.stream.Stream<E>"),
            method("toArray", NONE, "java.lang.Object[]"),
        ],
        fields: &[],
    },
    JdkClass {
        name: "java.util.List",
        type_params: &["E"],
        supertypes: &["java.util.Collection<E>"],
        methods: &[
            method("get", INT, "E"),
            method("set", &["int", "E"], "E"),
            method("add", &["int", "E"], "void"),
            method("remove", INT, "E"),
            method("indexOf", OBJ, "int"),
            method("subList", INT_INT, "java.util.List<E>"),
            method("sort", &["java.util.Comparator<E>"], "void"),
            function("of", &["E..."], "java.util.List<E>"),
        ],
        fields: &[],
    },
    JdkClass {
        name: "java.util.ArrayList",
        type_params: &["E"],
        supertypes: &["java.util.List<E>"],
        methods: &[method("ensureCapacity", INT, "void"), method("trimToSize", NONE, "void")],
        fields: &[],
    },
    JdkClass {
        name: "java.util.LinkedList",
        type_params: &["E"],
        supertypes: &["java.util.List<E>"],
        methods: &[
            method("addFirst", &["E"], "void"),
            method("getFirst", NONE, "E"),
            method("getLast", NONE, "E"),
        ],
        fields: &[],
    },
    JdkClass {
        name: "java.util.Set",
        type_params: &["E"],
        supertypes: &["java.util.Collection<E>"],
        methods: &[function("of", &["E..."], "java.util.Set<E>")],
        fields: &[],
    },
    JdkClass {
        name: "java.util.HashSet",
        type_params: &["E"],
        supertypes: &["java.util.Set<E>"],
        methods: &[],
        fields: &[],
    },
    JdkClass {
        name: "java.util.TreeSet",
        type_params: &["E"],
        supertypes: &["java.util.Set<E>"],
        methods: &[method("first", NONE, "E"), method("last", NONE, "E")],
        fields: &[],
    },
    JdkClass {
        name: "java.util.Map",
        type_params: &["K", "V"],
        supertypes: &[],
        methods: &[
            method("get", OBJ, "V"),
            method("put", &["K", "V"], "V"),
            method("remove", OBJ, "V"),
            method("containsKey", OBJ, "boolean"),
            method("containsValue", OBJ, "boolean"),
            method("getOrDefault", &[OBJECT, "V"], "V"),
            method("putAll", &["java.util.Map<K,V>"], "void"),
            method("keySet", NONE, "java.util.Set<K>"),
            method("values", NONE, "java.util.Collection<V>"),
            method("size", NONE, "int"),
            method("isEmpty", NONE, "boolean"),
            method("clear", NONE, "void"),
        ],
        fields: &[],
    },
    JdkClass {
        name: "java.util.HashMap",
        type_params: &["K", "V"],
        supertypes: &["java.util.Map<K,V>"],
        methods: &[],
        fields: &[],
    },
    JdkClass {
        name: "java.util.TreeMap",
        type_params: &["K", "V"],
        supertypes: &["java.util.Map<K,V>"],
        methods: &[method("firstKey", NONE, "K"), method("lastKey", NONE, "K")],
        fields: &[],
    },
    JdkClass {
        name: "java.util.Optional",
        type_params: &["T"],
        supertypes: &[],
        methods: &[
            method("get", NONE, "T"),
            method("isPresent", NONE, "boolean"),
            method("isEmpty", NONE, "boolean"),
            method("orElse", &["T"], "T"),
            function("of", &["T"], "java.util.Optional<T>"),
            function("ofNullable", &["T"], "java.util.Optional<T>"),
            function("empty", NONE, "java.util.Optional<T>"),
        ],
        fields: &[],
    },
    JdkClass {
        name: "java.util.Arrays",
        type_params: &[],
        supertypes: &[],
        methods: &[
            function("asList", &["T..."], "java.util.List<T>"),
            function("stream", &["T[]"], "java.util.stream.Stream<T>"),
            function("sort", &["java.lang.Object[]"], "void"),
            function("fill", &["java.lang.Object[]", OBJECT], "void"),
            function("toString", &["java.lang.Object[]"], STRING),
            function("copyOf", &["T[]", "int"], "T[]"),
            function("equals", &["java.lang.Object[]", "java.lang.Object[]"], "boolean"),
        ],
        fields: &[],
    },
    JdkClass {
        name: "java.util.Collections",
        type_params: &[],
        supertypes: &[],
        methods: &[
            function("singletonList", &["T"], "java.util.List<T>"),
            function("emptyList", NONE, "java.util.List<T>"),
            function("addAll", &["java.util.Collection<T>", "T..."], "boolean"),
            function("sort", &["java.util.List<T>"], "void"),
            function("reverse", &["java.util.List<T>"], "void"),
            function("max", &["java.util.Collection<T>"], "T"),
            function("min", &["java.util.Collection<T>"], "T"),
            function("unmodifiableList", &["java.util.List<T>"], "java.util.List<T>"),
            function("nCopies", &["int", "T"], "java.util.List<T>"),
        ],
        fields: &[],
    },
    JdkClass {
        name: "java.util.Objects",
        type_params: &[],
        supertypes: &[],
        methods: &[
            function("equals", OBJ_OBJ, "boolean"),
            function("isNull", OBJ, "boolean"),
            function("nonNull", OBJ, "boolean"),
            function("requireNonNull", &["T"], "T"),
            function("hash", &["java.lang.Object..."], "int"),
            function("toString", OBJ, STRING),
        ],
        fields: &[],
    },
    JdkClass {
        name: "java.util.Comparator",
        type_params: &["T"],
        supertypes: &[],
        methods: &[method("compare", &["T", "T"], "int")],
        fields: &[],
    },
    JdkClass {
        name: "java.util.function.Function",
        type_params: &["T", "R"],
        supertypes: &[],
        methods: &[method("apply", &["T"], "R")],
        fields: &[],
    },
    JdkClass {
        name: "java.util.function.Predicate",
        type_params: &["T"],
        supertypes: &[],
        methods: &[method("test", &["T"], "boolean")],
        fields: &[],
    },
    JdkClass {
        name: "java.util.function.Consumer",
        type_params: &["T"],
        supertypes: &[],
        methods: &[method("accept", &["T"], "void")],
        fields: &[],
    },
    JdkClass {
        name: "java.util.stream.Stream",
        type_params: &["T"],
        supertypes: &[],
        methods: &[
            method("filter", &["java.util.function.Predicate<T>"], "java.util.stream.Stream<T>"),
            method("map", &["java.util.function.Function<T,R>"], "java.util.stream.Stream<R>"),
            method("collect", &["java.util.stream.Collector<T,A,R>"], "R"),
            method("count", NONE, "long"),
            method("forEach", &["java.util.function.Consumer<T>"], "void"),
            method("toList", NONE, "java.util.List<T>"),
            method("sorted", NONE, "java.util.stream.Stream<T>"),
            method("distinct", NONE, "java.util.stream.Stream<T>"),
            method("limit", &["long"], "java.util.stream.Stream<T>"),
            method("findFirst", NONE, "java.util.Optional<T>"),
            method("anyMatch", &["java.util.function.Predicate<T>"], "boolean"),
            function("of", &["T..."], "java.util.stream.Stream<T>"),
        ],
        fields: &[],
    },
    JdkClass {
        name: "java.util.stream.Collector",
        type_params: &["T", "A", "R"],
        supertypes: &[],
        methods: &[],
        fields: &[],
    },
    JdkClass {
        name: "java.util.stream.Collectors",
        type_params: &[],
        supertypes: &[],
        methods: &[
            function("toList", NONE, "java.util.stream.Collector<T,java.lang.Object,java.util.List<T>>"),
            function("toSet", NONE, "java.util.stream.Collector<T,java.lang.Object,java.util.Set<T>>"),
            function("joining", NONE, "java.util.stream.Collector<java.lang.CharSequence,java.lang.Object,java.lang.String>"),
            function("joining", &[CHAR_SEQUENCE], "java.util.stream.Collector<java.lang.CharSequence,java.lang.Object,java.lang.String>"),
            function("counting", NONE, "java.util.stream.Collector<T,java.lang.Object,java.lang.Long>"),
            function("toMap", &["java.util.function.Function<T,K>", "java.util.function.Function<T,U>"], "java.util.stream.Collector<T,java.lang.Object,java.util.Map<K,U>>"),
            function("groupingBy", &["java.util.function.Function<T,K>"], "java.util.stream.Collector<T,java.lang.Object,java.util.Map<K,java.util.List<T>>>"),
        ],
        fields: &[],
    },
];

static INDEX: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    CLASSES
        .iter()
        .enumerate()
        .map(|(i, class)| (class.name, i))
        .collect()
});

/// Ids at and above this value name JDK entries; the model numbers user
/// declarations from zero
pub const JDK_BASE: u32 = 1 << 24;

/// Member slots per class. Methods come first, fields start at `FIELD_SLOT`.
const SLOTS: u32 = 256;
const FIELD_SLOT: u32 = 160;
const CLASS_SLOT: u32 = SLOTS - 1;

/// The `length` pseudo-field of every array type
pub const ARRAY_LENGTH: DeclId = DeclId(JDK_BASE - 1);

/// A class of the table together with its position
#[derive(Debug, Clone, Copy)]
pub struct ClassRef {
    pub index: usize,
    pub class: &'static JdkClass,
}

impl ClassRef {
    pub fn id(&self) -> DeclId {
        DeclId(JDK_BASE + self.index as u32 * SLOTS + CLASS_SLOT)
    }

    pub fn method_id(&self, slot: usize) -> DeclId {
        DeclId(JDK_BASE + self.index as u32 * SLOTS + slot as u32)
    }

    pub fn field_id(&self, slot: usize) -> DeclId {
        DeclId(JDK_BASE + self.index as u32 * SLOTS + FIELD_SLOT + slot as u32)
    }

    /// Simple name, e.g. `BigDecimal`
    pub fn simple_name(&self) -> &'static str {
        simple_name(self.class.name)
    }
}

/// Look up a class by fully-qualified name
pub fn class(name: &str) -> Option<ClassRef> {
    let index = *INDEX.get(name)?;
    Some(ClassRef {
        index,
        class: &CLASSES[index],
    })
}

pub fn classes() -> impl Iterator<Item = ClassRef> {
    CLASSES
        .iter()
        .enumerate()
        .map(|(index, class)| ClassRef { index, class })
}

/// Class `simple` in `package`, if the table knows it
pub fn in_package(package: &str, simple: &str) -> Option<ClassRef> {
    class(&format!("{package}.{simple}"))
}

pub fn simple_name(fqn: &str) -> &str {
    fqn.rsplit('.').next().unwrap_or(fqn)
}

pub fn is_type_variable(name: &str) -> bool {
    let mut chars = name.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_uppercase())
}
