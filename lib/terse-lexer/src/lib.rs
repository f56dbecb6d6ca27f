use logos::Logos;
use unicode_xid::UnicodeXID;
pub use terse_span::{Span, Spanned};

/// Check if a string is a valid Java identifier
fn is_valid_identifier(lex: &mut logos::Lexer<Token>) -> bool {
    let slice = lex.slice();
    let mut chars = slice.chars();

    // First character must be XID_Start, underscore or dollar
    match chars.next() {
        Some(first) if first.is_xid_start() || first == '_' || first == '$' => {}
        _ => return false,
    }

    chars.all(|c| c.is_xid_continue() || c == '$')
}

/// Consume a block comment up to and including the closing `*/`
///
/// Java block comments do not nest, an unclosed comment runs to the end of input.
fn parse_block_comment(lex: &mut logos::Lexer<Token>) -> bool {
    let remainder = lex.remainder();
    match remainder.find("*/") {
        Some(end) => lex.bump(end + 2),
        None => lex.bump(remainder.len()),
    }
    true
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    // ===== Trivia =====
    // Whitespace and comments are emitted as tokens so rowan can keep
    // the tree lossless. The parser treats these as trivia.
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*", parse_block_comment)]
    BlockComment,

    // ===== Literals =====
    #[regex(r"[\p{L}_$][\p{L}\p{N}_$]*", is_valid_identifier)]
    Identifier,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    StringLiteral,

    #[regex(r"'([^'\\\n]|\\.)+'")]
    CharLiteral,

    #[regex(r"[0-9][0-9_]*[lL]?")]
    #[regex(r"0[xX][0-9a-fA-F_]+[lL]?")]
    IntegerLiteral,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdD]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+[fFdD]?")]
    #[regex(r"[0-9][0-9_]*[fFdD]")]
    FloatLiteral,

    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("null")]
    Null,

    // ===== Declaration Keywords =====
    #[token("abstract")]
    Abstract,

    #[token("class")]
    Class,

    #[token("extends")]
    Extends,

    #[token("final")]
    Final,

    #[token("implements")]
    Implements,

    #[token("import")]
    Import,

    #[token("package")]
    Package,

    #[token("private")]
    Private,

    #[token("protected")]
    Protected,

    #[token("public")]
    Public,

    #[token("static")]
    Static,

    // ===== Primitive Types =====
    #[token("boolean")]
    Boolean,

    #[token("byte")]
    Byte,

    #[token("char")]
    Char,

    #[token("double")]
    Double,

    #[token("float")]
    Float,

    #[token("int")]
    Int,

    #[token("long")]
    Long,

    #[token("short")]
    Short,

    #[token("void")]
    Void,

    // ===== Statement / Expression Keywords =====
    #[token("break")]
    Break,

    #[token("continue")]
    Continue,

    #[token("else")]
    Else,

    #[token("for")]
    For,

    #[token("if")]
    If,

    #[token("new")]
    New,

    #[token("return")]
    Return,

    #[token("this")]
    This,

    #[token("while")]
    While,

    // ===== Braces =====
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    // ===== Punctuation =====
    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token(":")]
    Colon,

    #[token("?")]
    Question,

    #[token("->")]
    Arrow,

    // ===== Operators =====
    // `>` is never merged here: `>>` and `>>=` are reassembled by the parser
    // so that nested type arguments like `List<List<T>>` still close.
    #[token("=")]
    Eq,

    #[token("==")]
    EqEq,

    #[token("!")]
    Bang,

    #[token("!=")]
    BangEq,

    #[token("<")]
    Lt,

    #[token("<=")]
    LtEq,

    #[token(">")]
    Gt,

    #[token(">=")]
    GtEq,

    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("&")]
    Amp,

    #[token("|")]
    Pipe,

    #[token("^")]
    Caret,

    #[token("~")]
    Tilde,

    #[token("++")]
    PlusPlus,

    #[token("--")]
    MinusMinus,

    #[token("<<")]
    LtLt,

    #[token("+=")]
    PlusEq,

    #[token("-=")]
    MinusEq,

    #[token("*=")]
    StarEq,

    #[token("/=")]
    SlashEq,

    #[token("%=")]
    PercentEq,

    #[token("&=")]
    AmpEq,

    #[token("|=")]
    PipeEq,

    #[token("^=")]
    CaretEq,

    #[token("<<=")]
    LtLtEq,
}

impl Token {
    /// Whitespace and comments
    pub fn is_trivia(&self) -> bool {
        matches!(self, Token::Whitespace | Token::LineComment | Token::BlockComment)
    }

    /// Keywords naming a primitive type
    pub fn is_primitive_type(&self) -> bool {
        matches!(
            self,
            Token::Boolean
                | Token::Byte
                | Token::Char
                | Token::Double
                | Token::Float
                | Token::Int
                | Token::Long
                | Token::Short
        )
    }

    /// Keywords allowed in a modifier list
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Token::Public
                | Token::Private
                | Token::Protected
                | Token::Static
                | Token::Final
                | Token::Abstract
        )
    }
}

pub type SpannedToken = Spanned<Token>;

/// Lex source code and return an iterator of tokens with their spans
pub fn lex(source: &str) -> impl Iterator<Item = Result<SpannedToken, Spanned<()>>> + '_ {
    Token::lexer(source).spanned().map(|(token, span)| {
        token
            .map(|t| Spanned::new(t, span.clone()))
            .map_err(|_| Spanned::new((), span))
    })
}

/// Lex source code, dropping trivia and invalid tokens, in the shape the parser consumes
pub fn significant_tokens(source: &str) -> Vec<(Token, Span)> {
    lex(source)
        .filter_map(|t| t.ok())
        .filter(|t| !t.value.is_trivia())
        .map(|spanned| (spanned.value, spanned.span))
        .collect()
}
