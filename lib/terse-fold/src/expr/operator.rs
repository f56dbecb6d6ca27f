use terse_syntax_tree::SyntaxKind;

/// Precedence of atoms: names, literals, calls, functions
pub const ATOM: u8 = 14;
/// Precedence of prefix operators and casts
pub const UNARY: u8 = 13;
pub const CONDITIONAL: u8 = 2;
pub const ASSIGNMENT: u8 = 1;
pub const LAMBDA: u8 = 0;

/// Binary operators with a fixed symbol and precedence rank
///
/// Ranks follow Java: a higher rank binds tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    And,
    Or,
    Xor,
    ShiftLeft,
    ShiftRight,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Append,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    RemainderAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShiftLeftAssign,
    ShiftRightAssign,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Remainder => "%",
            Operator::And => "&",
            Operator::Or => "|",
            Operator::Xor => "^",
            Operator::ShiftLeft => "<<",
            Operator::ShiftRight => ">>",
            Operator::Equal => "==",
            Operator::NotEqual => "≠",
            Operator::Less => "<",
            Operator::LessEqual => "≤",
            Operator::Greater => ">",
            Operator::GreaterEqual => "≥",
            Operator::Append | Operator::AddAssign => "+=",
            Operator::SubtractAssign => "-=",
            Operator::MultiplyAssign => "*=",
            Operator::DivideAssign => "/=",
            Operator::RemainderAssign => "%=",
            Operator::AndAssign => "&=",
            Operator::OrAssign => "|=",
            Operator::XorAssign => "^=",
            Operator::ShiftLeftAssign => "<<=",
            Operator::ShiftRightAssign => ">>=",
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            Operator::Or => 5,
            Operator::Xor => 6,
            Operator::And => 7,
            Operator::Equal | Operator::NotEqual => 8,
            Operator::Less | Operator::LessEqual | Operator::Greater | Operator::GreaterEqual => 9,
            Operator::ShiftLeft | Operator::ShiftRight => 10,
            Operator::Add | Operator::Subtract => 11,
            Operator::Multiply | Operator::Divide | Operator::Remainder => 12,
            _ => ASSIGNMENT,
        }
    }

    pub fn is_assignment(self) -> bool {
        self.precedence() == ASSIGNMENT
    }

    /// The compound form `x OP= y` of `x = x OP y`
    pub fn compound(self) -> Option<Operator> {
        Some(match self {
            Operator::Add => Operator::AddAssign,
            Operator::Subtract => Operator::SubtractAssign,
            Operator::Multiply => Operator::MultiplyAssign,
            Operator::Divide => Operator::DivideAssign,
            Operator::Remainder => Operator::RemainderAssign,
            Operator::And => Operator::AndAssign,
            Operator::Or => Operator::OrAssign,
            Operator::Xor => Operator::XorAssign,
            Operator::ShiftLeft => Operator::ShiftLeftAssign,
            Operator::ShiftRight => Operator::ShiftRightAssign,
            _ => return None,
        })
    }

    /// Operator joining the tail of `x OP= a, b, ...`
    ///
    /// `x = x - a - b` is `x -= a + b`, `x = x / a / b` is `x /= a * b`.
    /// Shifts and remainders have no tail form.
    pub fn tail(self) -> Option<Operator> {
        Some(match self {
            Operator::AddAssign | Operator::SubtractAssign => Operator::Add,
            Operator::MultiplyAssign | Operator::DivideAssign => Operator::Multiply,
            Operator::AndAssign => Operator::And,
            Operator::OrAssign => Operator::Or,
            Operator::XorAssign => Operator::Xor,
            _ => return None,
        })
    }

    /// Operator for a Java binary token of the recognized arithmetic subset
    pub fn from_arithmetic_token(kind: SyntaxKind) -> Option<Operator> {
        Some(match kind {
            SyntaxKind::Plus => Operator::Add,
            SyntaxKind::Minus => Operator::Subtract,
            SyntaxKind::Star => Operator::Multiply,
            SyntaxKind::Slash => Operator::Divide,
            _ => return None,
        })
    }
}

/// Named mathematical functions, always rendered in prefix form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathFunction {
    Abs,
    Signum,
    Negate,
    Not,
    Min,
    Max,
    Gcd,
    Pow,
    Sqrt,
    Cbrt,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Atan2,
    Sinh,
    Cosh,
    Tanh,
    Ceil,
    Floor,
    Rint,
    Round,
    Log,
    Log10,
    ToDegrees,
    ToRadians,
    Ulp,
    Random,
}

impl MathFunction {
    pub fn name(self) -> &'static str {
        match self {
            MathFunction::Abs => "abs",
            MathFunction::Signum => "signum",
            MathFunction::Negate => "negate",
            MathFunction::Not => "not",
            MathFunction::Min => "min",
            MathFunction::Max => "max",
            MathFunction::Gcd => "gcd",
            MathFunction::Pow => "pow",
            MathFunction::Sqrt => "sqrt",
            MathFunction::Cbrt => "cbrt",
            MathFunction::Sin => "sin",
            MathFunction::Cos => "cos",
            MathFunction::Tan => "tan",
            MathFunction::Asin => "asin",
            MathFunction::Acos => "acos",
            MathFunction::Atan => "atan",
            MathFunction::Atan2 => "atan2",
            MathFunction::Sinh => "sinh",
            MathFunction::Cosh => "cosh",
            MathFunction::Tanh => "tanh",
            MathFunction::Ceil => "ceil",
            MathFunction::Floor => "floor",
            MathFunction::Rint => "rint",
            MathFunction::Round => "round",
            MathFunction::Log => "ln",
            MathFunction::Log10 => "log10",
            MathFunction::ToDegrees => "toDegrees",
            MathFunction::ToRadians => "toRadians",
            MathFunction::Ulp => "ulp",
            MathFunction::Random => "random",
        }
    }

    /// One-argument `java.lang.Math` functions that map one to one
    pub fn from_unary_math(name: &str) -> Option<MathFunction> {
        Some(match name {
            "abs" => MathFunction::Abs,
            "acos" => MathFunction::Acos,
            "asin" => MathFunction::Asin,
            "atan" => MathFunction::Atan,
            "cbrt" => MathFunction::Cbrt,
            "ceil" => MathFunction::Ceil,
            "cos" => MathFunction::Cos,
            "cosh" => MathFunction::Cosh,
            "floor" => MathFunction::Floor,
            "log" => MathFunction::Log,
            "log10" => MathFunction::Log10,
            "rint" => MathFunction::Rint,
            "round" => MathFunction::Round,
            "signum" => MathFunction::Signum,
            "sin" => MathFunction::Sin,
            "sinh" => MathFunction::Sinh,
            "sqrt" => MathFunction::Sqrt,
            "tan" => MathFunction::Tan,
            "tanh" => MathFunction::Tanh,
            "toDegrees" => MathFunction::ToDegrees,
            "toRadians" => MathFunction::ToRadians,
            "ulp" => MathFunction::Ulp,
            _ => return None,
        })
    }
}

/// Java precedence of a binary operator token
pub fn java_binary_precedence(kind: SyntaxKind) -> u8 {
    match kind {
        SyntaxKind::PipePipe => 3,
        SyntaxKind::AmpAmp => 4,
        SyntaxKind::Pipe => 5,
        SyntaxKind::Caret => 6,
        SyntaxKind::Amp => 7,
        SyntaxKind::EqEq | SyntaxKind::BangEq => 8,
        SyntaxKind::Lt | SyntaxKind::LtEq | SyntaxKind::Gt | SyntaxKind::GtEq => 9,
        SyntaxKind::LtLt | SyntaxKind::GtGt | SyntaxKind::GtGtGt => 10,
        SyntaxKind::Plus | SyntaxKind::Minus => 11,
        SyntaxKind::Star | SyntaxKind::Slash | SyntaxKind::Percent => 12,
        _ => ATOM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_and_tail() {
        assert_eq!(Operator::Subtract.compound(), Some(Operator::SubtractAssign));
        assert_eq!(Operator::SubtractAssign.tail(), Some(Operator::Add));
        assert_eq!(Operator::DivideAssign.tail(), Some(Operator::Multiply));
        assert_eq!(Operator::OrAssign.tail(), Some(Operator::Or));
        assert_eq!(Operator::ShiftLeftAssign.tail(), None);
        assert_eq!(Operator::Equal.compound(), None);
    }

    #[test]
    fn test_precedence_ladder() {
        assert!(Operator::Multiply.precedence() > Operator::Add.precedence());
        assert!(Operator::Add.precedence() > Operator::ShiftLeft.precedence());
        assert!(Operator::Less.precedence() > Operator::Equal.precedence());
        assert!(Operator::And.precedence() > Operator::Xor.precedence());
        assert!(Operator::Append.is_assignment());
        assert_eq!(
            java_binary_precedence(SyntaxKind::Star),
            Operator::Multiply.precedence()
        );
    }
}
