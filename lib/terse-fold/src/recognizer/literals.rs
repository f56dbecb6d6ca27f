//! Decoding Java literal tokens

use terse_syntax_tree::{SyntaxKind, SyntaxNode};

use crate::expr::{Expr, ExprKind, Number};

/// Number, string and character literals; `true`, `false` and `null` are not folded
pub(super) fn literal(node: &SyntaxNode) -> Option<Expr> {
    let token = node
        .children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| !t.kind().is_trivia())?;
    let text = token.text();

    let kind = match token.kind() {
        SyntaxKind::IntegerLiteral => ExprKind::Number(Number::Integer(decode_integer(text)?)),
        SyntaxKind::FloatLiteral => ExprKind::Number(Number::Decimal(decode_float(text)?)),
        SyntaxKind::StringLiteral => ExprKind::String(decode_string(text)?),
        SyntaxKind::CharLiteral => ExprKind::Character(decode_char(text)?),
        _ => return None,
    };
    Some(Expr::new(kind, node))
}

/// Value of an integer literal: decimal, hex, octal or binary, with `_` and `L`
///
/// Literals without the `L` suffix wrap like Java `int`s, so `0xFFFFFFFF` is `-1`.
pub fn decode_integer(text: &str) -> Option<i64> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    let (digits, long) = match cleaned.strip_suffix(['l', 'L']) {
        Some(digits) => (digits, true),
        None => (cleaned.as_str(), false),
    };

    let (radix, body) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, hex)
    } else if let Some(bin) = digits
        .strip_prefix("0b")
        .or_else(|| digits.strip_prefix("0B"))
    {
        (2, bin)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };

    let value = u64::from_str_radix(body, radix).ok()?;
    Some(match (long, radix) {
        (true, _) => value as i64,
        (false, 10) => i32::try_from(value).ok()? as i64,
        (false, _) => u32::try_from(value).ok()? as i32 as i64,
    })
}

/// Value of a decimal floating-point literal, dropping `f`/`d` suffixes
pub fn decode_float(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    if cleaned.starts_with("0x") || cleaned.starts_with("0X") {
        return None;
    }
    let digits = cleaned
        .strip_suffix(['f', 'F', 'd', 'D'])
        .unwrap_or(&cleaned);
    digits.parse().ok()
}

/// Contents of a quoted string literal with escapes resolved
pub fn decode_string(text: &str) -> Option<String> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    unescape(inner)
}

/// The single character of a quoted character literal
pub fn decode_char(text: &str) -> Option<char> {
    let inner = text.strip_prefix('\'')?.strip_suffix('\'')?;
    let decoded = unescape(inner)?;
    let mut chars = decoded.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

fn unescape(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            's' => out.push(' '),
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'u' => {
                while chars.peek() == Some(&'u') {
                    chars.next();
                }
                let hex: String = chars.by_ref().take(4).collect();
                let code = u32::from_str_radix(&hex, 16).ok()?;
                out.push(char::from_u32(code)?);
            }
            d @ '0'..='7' => {
                // up to three octal digits, at most \377
                let mut value = d.to_digit(8)?;
                let max_digits = if d <= '3' { 2 } else { 1 };
                for _ in 0..max_digits {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(value)?);
            }
            _ => return None,
        }
    }
    Some(out)
}
