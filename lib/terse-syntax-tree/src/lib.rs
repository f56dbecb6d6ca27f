//! Terse Syntax Tree
//!
//! This crate defines the syntax tree representation for the Java subset
//! that the folding engine inspects, using the `rowan` library for a
//! lossless, resilient syntax tree implementation.
//!
//! # Overview
//!
//! The syntax tree uses `rowan`, which provides:
//! - **Lossless**: Preserves all source text including whitespace and comments
//! - **Immutable**: Syntax trees are immutable and can be safely shared
//! - **Cheap identity**: Nodes can be compared and hashed by position
//!
//! # Example
//!
//! ```
//! use terse_syntax_tree::{GreenNodeBuilder, SyntaxKind, SyntaxNode};
//!
//! let mut builder = GreenNodeBuilder::new();
//! builder.start_node(SyntaxKind::NameRef.into());
//! builder.token(SyntaxKind::Identifier.into(), "total");
//! builder.finish_node();
//!
//! let green = builder.finish();
//! let syntax = SyntaxNode::new_root(green);
//!
//! assert_eq!(syntax.kind(), SyntaxKind::NameRef);
//! ```

pub mod helpers;

use rowan::Language;
use terse_lexer::Token;

// Re-export for use by parsers
pub use rowan::GreenNodeBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SyntaxKind {
    // ===== Syntax Nodes (Non-terminals) =====
    SourceFile,
    PackageDeclaration,
    ImportDeclaration,
    QualifiedName,
    ClassDeclaration,
    ClassBody,
    FieldDeclaration,
    MethodDeclaration,
    ParameterList,
    Parameter,
    Modifiers,
    Type,
    TypeArguments,

    // Statement nodes
    Block,
    LocalVariableStatement,
    LocalVariableDeclaration,
    VariableDeclarator,
    ExpressionStatement,
    IfStatement,
    ForStatement,
    ForInit,
    ForCondition,
    ForUpdate,
    ForEachStatement,
    WhileStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    EmptyStatement,

    // Expression nodes
    Literal,
    NameRef,
    ThisExpr,
    FieldAccessExpr,
    MethodCallExpr,
    ArgumentList,
    ArrayAccessExpr,
    NewExpr,
    ArrayDimension,
    ArrayInitializer,
    ParenExpr,
    CastExpr,
    PrefixExpr,
    PostfixExpr,
    BinaryExpr,
    ConditionalExpr,
    AssignmentExpr,
    LambdaExpr,
    LambdaParameters,

    // ===== Tokens (Terminals) =====
    // Literals
    Identifier,
    StringLiteral,
    CharLiteral,
    IntegerLiteral,
    FloatLiteral,
    True,
    False,
    Null,

    // Declaration keywords
    Abstract,
    Class,
    Extends,
    Final,
    Implements,
    Import,
    Package,
    Private,
    Protected,
    Public,
    Static,

    // Primitive types
    Boolean,
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Void,

    // Statement / expression keywords
    Break,
    Continue,
    Else,
    For,
    If,
    New,
    Return,
    This,
    While,

    // Braces
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Punctuation
    Semicolon,
    Comma,
    Dot,
    Colon,
    Question,
    Arrow,

    // Operators
    Eq,
    EqEq,
    Bang,
    BangEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    AmpAmp,
    PipePipe,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Tilde,
    PlusPlus,
    MinusMinus,
    LtLt,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AmpEq,
    PipeEq,
    CaretEq,
    LtLtEq,

    // Shift operators reassembled from adjacent `>` tokens by the parser
    GtGt,
    GtGtGt,
    GtGtEq,
    GtGtGtEq,

    // Trivia (whitespace and comments)
    Whitespace,
    LineComment,
    BlockComment,

    // Special
    Error,
}

impl SyntaxKind {
    /// Whitespace and comments
    pub fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::Whitespace | SyntaxKind::LineComment | SyntaxKind::BlockComment)
    }

    /// Nodes that can appear in expression position
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            SyntaxKind::Literal
                | SyntaxKind::NameRef
                | SyntaxKind::ThisExpr
                | SyntaxKind::FieldAccessExpr
                | SyntaxKind::MethodCallExpr
                | SyntaxKind::ArrayAccessExpr
                | SyntaxKind::NewExpr
                | SyntaxKind::ArrayInitializer
                | SyntaxKind::ParenExpr
                | SyntaxKind::CastExpr
                | SyntaxKind::PrefixExpr
                | SyntaxKind::PostfixExpr
                | SyntaxKind::BinaryExpr
                | SyntaxKind::ConditionalExpr
                | SyntaxKind::AssignmentExpr
                | SyntaxKind::LambdaExpr
        )
    }

    /// Nodes that can appear in statement position
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            SyntaxKind::Block
                | SyntaxKind::LocalVariableStatement
                | SyntaxKind::ExpressionStatement
                | SyntaxKind::IfStatement
                | SyntaxKind::ForStatement
                | SyntaxKind::ForEachStatement
                | SyntaxKind::WhileStatement
                | SyntaxKind::ReturnStatement
                | SyntaxKind::BreakStatement
                | SyntaxKind::ContinueStatement
                | SyntaxKind::EmptyStatement
        )
    }

    /// Operator tokens, including the reassembled shift forms
    pub fn is_operator(self) -> bool {
        (SyntaxKind::Eq as u16..=SyntaxKind::GtGtGtEq as u16).contains(&(self as u16))
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<Token> for SyntaxKind {
    fn from(token: Token) -> Self {
        match token {
            // Trivia
            Token::Whitespace => SyntaxKind::Whitespace,
            Token::LineComment => SyntaxKind::LineComment,
            Token::BlockComment => SyntaxKind::BlockComment,
            // Literals
            Token::Identifier => SyntaxKind::Identifier,
            Token::StringLiteral => SyntaxKind::StringLiteral,
            Token::CharLiteral => SyntaxKind::CharLiteral,
            Token::IntegerLiteral => SyntaxKind::IntegerLiteral,
            Token::FloatLiteral => SyntaxKind::FloatLiteral,
            Token::True => SyntaxKind::True,
            Token::False => SyntaxKind::False,
            Token::Null => SyntaxKind::Null,
            // Declaration keywords
            Token::Abstract => SyntaxKind::Abstract,
            Token::Class => SyntaxKind::Class,
            Token::Extends => SyntaxKind::Extends,
            Token::Final => SyntaxKind::Final,
            Token::Implements => SyntaxKind::Implements,
            Token::Import => SyntaxKind::Import,
            Token::Package => SyntaxKind::Package,
            Token::Private => SyntaxKind::Private,
            Token::Protected => SyntaxKind::Protected,
            Token::Public => SyntaxKind::Public,
            Token::Static => SyntaxKind::Static,
            // Primitive types
            Token::Boolean => SyntaxKind::Boolean,
            Token::Byte => SyntaxKind::Byte,
            Token::Char => SyntaxKind::Char,
            Token::Double => SyntaxKind::Double,
            Token::Float => SyntaxKind::Float,
            Token::Int => SyntaxKind::Int,
            Token::Long => SyntaxKind::Long,
            Token::Short => SyntaxKind::Short,
            Token::Void => SyntaxKind::Void,
            // Statement / expression keywords
            Token::Break => SyntaxKind::Break,
            Token::Continue => SyntaxKind::Continue,
            Token::Else => SyntaxKind::Else,
            Token::For => SyntaxKind::For,
            Token::If => SyntaxKind::If,
            Token::New => SyntaxKind::New,
            Token::Return => SyntaxKind::Return,
            Token::This => SyntaxKind::This,
            Token::While => SyntaxKind::While,
            // Braces
            Token::LParen => SyntaxKind::LParen,
            Token::RParen => SyntaxKind::RParen,
            Token::LBrace => SyntaxKind::LBrace,
            Token::RBrace => SyntaxKind::RBrace,
            Token::LBracket => SyntaxKind::LBracket,
            Token::RBracket => SyntaxKind::RBracket,
            // Punctuation
            Token::Semicolon => SyntaxKind::Semicolon,
            Token::Comma => SyntaxKind::Comma,
            Token::Dot => SyntaxKind::Dot,
            Token::Colon => SyntaxKind::Colon,
            Token::Question => SyntaxKind::Question,
            Token::Arrow => SyntaxKind::Arrow,
            // Operators
            Token::Eq => SyntaxKind::Eq,
            Token::EqEq => SyntaxKind::EqEq,
            Token::Bang => SyntaxKind::Bang,
            Token::BangEq => SyntaxKind::BangEq,
            Token::Lt => SyntaxKind::Lt,
            Token::LtEq => SyntaxKind::LtEq,
            Token::Gt => SyntaxKind::Gt,
            Token::GtEq => SyntaxKind::GtEq,
            Token::AmpAmp => SyntaxKind::AmpAmp,
            Token::PipePipe => SyntaxKind::PipePipe,
            Token::Plus => SyntaxKind::Plus,
            Token::Minus => SyntaxKind::Minus,
            Token::Star => SyntaxKind::Star,
            Token::Slash => SyntaxKind::Slash,
            Token::Percent => SyntaxKind::Percent,
            Token::Amp => SyntaxKind::Amp,
            Token::Pipe => SyntaxKind::Pipe,
            Token::Caret => SyntaxKind::Caret,
            Token::Tilde => SyntaxKind::Tilde,
            Token::PlusPlus => SyntaxKind::PlusPlus,
            Token::MinusMinus => SyntaxKind::MinusMinus,
            Token::LtLt => SyntaxKind::LtLt,
            Token::PlusEq => SyntaxKind::PlusEq,
            Token::MinusEq => SyntaxKind::MinusEq,
            Token::StarEq => SyntaxKind::StarEq,
            Token::SlashEq => SyntaxKind::SlashEq,
            Token::PercentEq => SyntaxKind::PercentEq,
            Token::AmpEq => SyntaxKind::AmpEq,
            Token::PipeEq => SyntaxKind::PipeEq,
            Token::CaretEq => SyntaxKind::CaretEq,
            Token::LtLtEq => SyntaxKind::LtLtEq,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JavaLanguage;

impl Language for JavaLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        // Constants for pattern matching - suppress naming warnings
        const SOURCE_FILE: u16 = SyntaxKind::SourceFile as u16;
        const PACKAGE_DECLARATION: u16 = SyntaxKind::PackageDeclaration as u16;
        const IMPORT_DECLARATION: u16 = SyntaxKind::ImportDeclaration as u16;
        const QUALIFIED_NAME: u16 = SyntaxKind::QualifiedName as u16;
        const CLASS_DECLARATION: u16 = SyntaxKind::ClassDeclaration as u16;
        const CLASS_BODY: u16 = SyntaxKind::ClassBody as u16;
        const FIELD_DECLARATION: u16 = SyntaxKind::FieldDeclaration as u16;
        const METHOD_DECLARATION: u16 = SyntaxKind::MethodDeclaration as u16;
        const PARAMETER_LIST: u16 = SyntaxKind::ParameterList as u16;
        const PARAMETER: u16 = SyntaxKind::Parameter as u16;
        const MODIFIERS: u16 = SyntaxKind::Modifiers as u16;
        const TYPE: u16 = SyntaxKind::Type as u16;
        const TYPE_ARGUMENTS: u16 = SyntaxKind::TypeArguments as u16;
        const BLOCK: u16 = SyntaxKind::Block as u16;
        const LOCAL_VARIABLE_STATEMENT: u16 = SyntaxKind::LocalVariableStatement as u16;
        const LOCAL_VARIABLE_DECLARATION: u16 = SyntaxKind::LocalVariableDeclaration as u16;
        const VARIABLE_DECLARATOR: u16 = SyntaxKind::VariableDeclarator as u16;
        const EXPRESSION_STATEMENT: u16 = SyntaxKind::ExpressionStatement as u16;
        const IF_STATEMENT: u16 = SyntaxKind::IfStatement as u16;
        const FOR_STATEMENT: u16 = SyntaxKind::ForStatement as u16;
        const FOR_INIT: u16 = SyntaxKind::ForInit as u16;
        const FOR_CONDITION: u16 = SyntaxKind::ForCondition as u16;
        const FOR_UPDATE: u16 = SyntaxKind::ForUpdate as u16;
        const FOR_EACH_STATEMENT: u16 = SyntaxKind::ForEachStatement as u16;
        const WHILE_STATEMENT: u16 = SyntaxKind::WhileStatement as u16;
        const RETURN_STATEMENT: u16 = SyntaxKind::ReturnStatement as u16;
        const BREAK_STATEMENT: u16 = SyntaxKind::BreakStatement as u16;
        const CONTINUE_STATEMENT: u16 = SyntaxKind::ContinueStatement as u16;
        const EMPTY_STATEMENT: u16 = SyntaxKind::EmptyStatement as u16;
        const LITERAL: u16 = SyntaxKind::Literal as u16;
        const NAME_REF: u16 = SyntaxKind::NameRef as u16;
        const THIS_EXPR: u16 = SyntaxKind::ThisExpr as u16;
        const FIELD_ACCESS_EXPR: u16 = SyntaxKind::FieldAccessExpr as u16;
        const METHOD_CALL_EXPR: u16 = SyntaxKind::MethodCallExpr as u16;
        const ARGUMENT_LIST: u16 = SyntaxKind::ArgumentList as u16;
        const ARRAY_ACCESS_EXPR: u16 = SyntaxKind::ArrayAccessExpr as u16;
        const NEW_EXPR: u16 = SyntaxKind::NewExpr as u16;
        const ARRAY_DIMENSION: u16 = SyntaxKind::ArrayDimension as u16;
        const ARRAY_INITIALIZER: u16 = SyntaxKind::ArrayInitializer as u16;
        const PAREN_EXPR: u16 = SyntaxKind::ParenExpr as u16;
        const CAST_EXPR: u16 = SyntaxKind::CastExpr as u16;
        const PREFIX_EXPR: u16 = SyntaxKind::PrefixExpr as u16;
        const POSTFIX_EXPR: u16 = SyntaxKind::PostfixExpr as u16;
        const BINARY_EXPR: u16 = SyntaxKind::BinaryExpr as u16;
        const CONDITIONAL_EXPR: u16 = SyntaxKind::ConditionalExpr as u16;
        const ASSIGNMENT_EXPR: u16 = SyntaxKind::AssignmentExpr as u16;
        const LAMBDA_EXPR: u16 = SyntaxKind::LambdaExpr as u16;
        const LAMBDA_PARAMETERS: u16 = SyntaxKind::LambdaParameters as u16;
        const IDENTIFIER: u16 = SyntaxKind::Identifier as u16;
        const STRING_LITERAL: u16 = SyntaxKind::StringLiteral as u16;
        const CHAR_LITERAL: u16 = SyntaxKind::CharLiteral as u16;
        const INTEGER_LITERAL: u16 = SyntaxKind::IntegerLiteral as u16;
        const FLOAT_LITERAL: u16 = SyntaxKind::FloatLiteral as u16;
        const TRUE: u16 = SyntaxKind::True as u16;
        const FALSE: u16 = SyntaxKind::False as u16;
        const NULL: u16 = SyntaxKind::Null as u16;
        const ABSTRACT: u16 = SyntaxKind::Abstract as u16;
        const CLASS: u16 = SyntaxKind::Class as u16;
        const EXTENDS: u16 = SyntaxKind::Extends as u16;
        const FINAL: u16 = SyntaxKind::Final as u16;
        const IMPLEMENTS: u16 = SyntaxKind::Implements as u16;
        const IMPORT: u16 = SyntaxKind::Import as u16;
        const PACKAGE: u16 = SyntaxKind::Package as u16;
        const PRIVATE: u16 = SyntaxKind::Private as u16;
        const PROTECTED: u16 = SyntaxKind::Protected as u16;
        const PUBLIC: u16 = SyntaxKind::Public as u16;
        const STATIC: u16 = SyntaxKind::Static as u16;
        const BOOLEAN: u16 = SyntaxKind::Boolean as u16;
        const BYTE: u16 = SyntaxKind::Byte as u16;
        const CHAR: u16 = SyntaxKind::Char as u16;
        const DOUBLE: u16 = SyntaxKind::Double as u16;
        const FLOAT: u16 = SyntaxKind::Float as u16;
        const INT: u16 = SyntaxKind::Int as u16;
        const LONG: u16 = SyntaxKind::Long as u16;
        const SHORT: u16 = SyntaxKind::Short as u16;
        const VOID: u16 = SyntaxKind::Void as u16;
        const BREAK: u16 = SyntaxKind::Break as u16;
        const CONTINUE: u16 = SyntaxKind::Continue as u16;
        const ELSE: u16 = SyntaxKind::Else as u16;
        const FOR: u16 = SyntaxKind::For as u16;
        const IF: u16 = SyntaxKind::If as u16;
        const NEW: u16 = SyntaxKind::New as u16;
        const RETURN: u16 = SyntaxKind::Return as u16;
        const THIS: u16 = SyntaxKind::This as u16;
        const WHILE: u16 = SyntaxKind::While as u16;
        const L_PAREN: u16 = SyntaxKind::LParen as u16;
        const R_PAREN: u16 = SyntaxKind::RParen as u16;
        const L_BRACE: u16 = SyntaxKind::LBrace as u16;
        const R_BRACE: u16 = SyntaxKind::RBrace as u16;
        const L_BRACKET: u16 = SyntaxKind::LBracket as u16;
        const R_BRACKET: u16 = SyntaxKind::RBracket as u16;
        const SEMICOLON: u16 = SyntaxKind::Semicolon as u16;
        const COMMA: u16 = SyntaxKind::Comma as u16;
        const DOT: u16 = SyntaxKind::Dot as u16;
        const COLON: u16 = SyntaxKind::Colon as u16;
        const QUESTION: u16 = SyntaxKind::Question as u16;
        const ARROW: u16 = SyntaxKind::Arrow as u16;
        const EQ: u16 = SyntaxKind::Eq as u16;
        const EQ_EQ: u16 = SyntaxKind::EqEq as u16;
        const BANG: u16 = SyntaxKind::Bang as u16;
        const BANG_EQ: u16 = SyntaxKind::BangEq as u16;
        const LT: u16 = SyntaxKind::Lt as u16;
        const LT_EQ: u16 = SyntaxKind::LtEq as u16;
        const GT: u16 = SyntaxKind::Gt as u16;
        const GT_EQ: u16 = SyntaxKind::GtEq as u16;
        const AMP_AMP: u16 = SyntaxKind::AmpAmp as u16;
        const PIPE_PIPE: u16 = SyntaxKind::PipePipe as u16;
        const PLUS: u16 = SyntaxKind::Plus as u16;
        const MINUS: u16 = SyntaxKind::Minus as u16;
        const STAR: u16 = SyntaxKind::Star as u16;
        const SLASH: u16 = SyntaxKind::Slash as u16;
        const PERCENT: u16 = SyntaxKind::Percent as u16;
        const AMP: u16 = SyntaxKind::Amp as u16;
        const PIPE: u16 = SyntaxKind::Pipe as u16;
        const CARET: u16 = SyntaxKind::Caret as u16;
        const TILDE: u16 = SyntaxKind::Tilde as u16;
        const PLUS_PLUS: u16 = SyntaxKind::PlusPlus as u16;
        const MINUS_MINUS: u16 = SyntaxKind::MinusMinus as u16;
        const LT_LT: u16 = SyntaxKind::LtLt as u16;
        const PLUS_EQ: u16 = SyntaxKind::PlusEq as u16;
        const MINUS_EQ: u16 = SyntaxKind::MinusEq as u16;
        const STAR_EQ: u16 = SyntaxKind::StarEq as u16;
        const SLASH_EQ: u16 = SyntaxKind::SlashEq as u16;
        const PERCENT_EQ: u16 = SyntaxKind::PercentEq as u16;
        const AMP_EQ: u16 = SyntaxKind::AmpEq as u16;
        const PIPE_EQ: u16 = SyntaxKind::PipeEq as u16;
        const CARET_EQ: u16 = SyntaxKind::CaretEq as u16;
        const LT_LT_EQ: u16 = SyntaxKind::LtLtEq as u16;
        const GT_GT: u16 = SyntaxKind::GtGt as u16;
        const GT_GT_GT: u16 = SyntaxKind::GtGtGt as u16;
        const GT_GT_EQ: u16 = SyntaxKind::GtGtEq as u16;
        const GT_GT_GT_EQ: u16 = SyntaxKind::GtGtGtEq as u16;
        const WHITESPACE: u16 = SyntaxKind::Whitespace as u16;
        const LINE_COMMENT: u16 = SyntaxKind::LineComment as u16;
        const BLOCK_COMMENT: u16 = SyntaxKind::BlockComment as u16;

        match raw.0 {
            SOURCE_FILE => SyntaxKind::SourceFile,
            PACKAGE_DECLARATION => SyntaxKind::PackageDeclaration,
            IMPORT_DECLARATION => SyntaxKind::ImportDeclaration,
            QUALIFIED_NAME => SyntaxKind::QualifiedName,
            CLASS_DECLARATION => SyntaxKind::ClassDeclaration,
            CLASS_BODY => SyntaxKind::ClassBody,
            FIELD_DECLARATION => SyntaxKind::FieldDeclaration,
            METHOD_DECLARATION => SyntaxKind::MethodDeclaration,
            PARAMETER_LIST => SyntaxKind::ParameterList,
            PARAMETER => SyntaxKind::Parameter,
            MODIFIERS => SyntaxKind::Modifiers,
            TYPE => SyntaxKind::Type,
            TYPE_ARGUMENTS => SyntaxKind::TypeArguments,
            BLOCK => SyntaxKind::Block,
            LOCAL_VARIABLE_STATEMENT => SyntaxKind::LocalVariableStatement,
            LOCAL_VARIABLE_DECLARATION => SyntaxKind::LocalVariableDeclaration,
            VARIABLE_DECLARATOR => SyntaxKind::VariableDeclarator,
            EXPRESSION_STATEMENT => SyntaxKind::ExpressionStatement,
            IF_STATEMENT => SyntaxKind::IfStatement,
            FOR_STATEMENT => SyntaxKind::ForStatement,
            FOR_INIT => SyntaxKind::ForInit,
            FOR_CONDITION => SyntaxKind::ForCondition,
            FOR_UPDATE => SyntaxKind::ForUpdate,
            FOR_EACH_STATEMENT => SyntaxKind::ForEachStatement,
            WHILE_STATEMENT => SyntaxKind::WhileStatement,
            RETURN_STATEMENT => SyntaxKind::ReturnStatement,
            BREAK_STATEMENT => SyntaxKind::BreakStatement,
            CONTINUE_STATEMENT => SyntaxKind::ContinueStatement,
            EMPTY_STATEMENT => SyntaxKind::EmptyStatement,
            LITERAL => SyntaxKind::Literal,
            NAME_REF => SyntaxKind::NameRef,
            THIS_EXPR => SyntaxKind::ThisExpr,
            FIELD_ACCESS_EXPR => SyntaxKind::FieldAccessExpr,
            METHOD_CALL_EXPR => SyntaxKind::MethodCallExpr,
            ARGUMENT_LIST => SyntaxKind::ArgumentList,
            ARRAY_ACCESS_EXPR => SyntaxKind::ArrayAccessExpr,
            NEW_EXPR => SyntaxKind::NewExpr,
            ARRAY_DIMENSION => SyntaxKind::ArrayDimension,
            ARRAY_INITIALIZER => SyntaxKind::ArrayInitializer,
            PAREN_EXPR => SyntaxKind::ParenExpr,
            CAST_EXPR => SyntaxKind::CastExpr,
            PREFIX_EXPR => SyntaxKind::PrefixExpr,
            POSTFIX_EXPR => SyntaxKind::PostfixExpr,
            BINARY_EXPR => SyntaxKind::BinaryExpr,
            CONDITIONAL_EXPR => SyntaxKind::ConditionalExpr,
            ASSIGNMENT_EXPR => SyntaxKind::AssignmentExpr,
            LAMBDA_EXPR => SyntaxKind::LambdaExpr,
            LAMBDA_PARAMETERS => SyntaxKind::LambdaParameters,
            IDENTIFIER => SyntaxKind::Identifier,
            STRING_LITERAL => SyntaxKind::StringLiteral,
            CHAR_LITERAL => SyntaxKind::CharLiteral,
            INTEGER_LITERAL => SyntaxKind::IntegerLiteral,
            FLOAT_LITERAL => SyntaxKind::FloatLiteral,
            TRUE => SyntaxKind::True,
            FALSE => SyntaxKind::False,
            NULL => SyntaxKind::Null,
            ABSTRACT => SyntaxKind::Abstract,
            CLASS => SyntaxKind::Class,
            EXTENDS => SyntaxKind::Extends,
            FINAL => SyntaxKind::Final,
            IMPLEMENTS => SyntaxKind::Implements,
            IMPORT => SyntaxKind::Import,
            PACKAGE => SyntaxKind::Package,
            PRIVATE => SyntaxKind::Private,
            PROTECTED => SyntaxKind::Protected,
            PUBLIC => SyntaxKind::Public,
            STATIC => SyntaxKind::Static,
            BOOLEAN => SyntaxKind::Boolean,
            BYTE => SyntaxKind::Byte,
            CHAR => SyntaxKind::Char,
            DOUBLE => SyntaxKind::Double,
            FLOAT => SyntaxKind::Float,
            INT => SyntaxKind::Int,
            LONG => SyntaxKind::Long,
            SHORT => SyntaxKind::Short,
            VOID => SyntaxKind::Void,
            BREAK => SyntaxKind::Break,
            CONTINUE => SyntaxKind::Continue,
            ELSE => SyntaxKind::Else,
            FOR => SyntaxKind::For,
            IF => SyntaxKind::If,
            NEW => SyntaxKind::New,
            RETURN => SyntaxKind::Return,
            THIS => SyntaxKind::This,
            WHILE => SyntaxKind::While,
            L_PAREN => SyntaxKind::LParen,
            R_PAREN => SyntaxKind::RParen,
            L_BRACE => SyntaxKind::LBrace,
            R_BRACE => SyntaxKind::RBrace,
            L_BRACKET => SyntaxKind::LBracket,
            R_BRACKET => SyntaxKind::RBracket,
            SEMICOLON => SyntaxKind::Semicolon,
            COMMA => SyntaxKind::Comma,
            DOT => SyntaxKind::Dot,
            COLON => SyntaxKind::Colon,
            QUESTION => SyntaxKind::Question,
            ARROW => SyntaxKind::Arrow,
            EQ => SyntaxKind::Eq,
            EQ_EQ => SyntaxKind::EqEq,
            BANG => SyntaxKind::Bang,
            BANG_EQ => SyntaxKind::BangEq,
            LT => SyntaxKind::Lt,
            LT_EQ => SyntaxKind::LtEq,
            GT => SyntaxKind::Gt,
            GT_EQ => SyntaxKind::GtEq,
            AMP_AMP => SyntaxKind::AmpAmp,
            PIPE_PIPE => SyntaxKind::PipePipe,
            PLUS => SyntaxKind::Plus,
            MINUS => SyntaxKind::Minus,
            STAR => SyntaxKind::Star,
            SLASH => SyntaxKind::Slash,
            PERCENT => SyntaxKind::Percent,
            AMP => SyntaxKind::Amp,
            PIPE => SyntaxKind::Pipe,
            CARET => SyntaxKind::Caret,
            TILDE => SyntaxKind::Tilde,
            PLUS_PLUS => SyntaxKind::PlusPlus,
            MINUS_MINUS => SyntaxKind::MinusMinus,
            LT_LT => SyntaxKind::LtLt,
            PLUS_EQ => SyntaxKind::PlusEq,
            MINUS_EQ => SyntaxKind::MinusEq,
            STAR_EQ => SyntaxKind::StarEq,
            SLASH_EQ => SyntaxKind::SlashEq,
            PERCENT_EQ => SyntaxKind::PercentEq,
            AMP_EQ => SyntaxKind::AmpEq,
            PIPE_EQ => SyntaxKind::PipeEq,
            CARET_EQ => SyntaxKind::CaretEq,
            LT_LT_EQ => SyntaxKind::LtLtEq,
            GT_GT => SyntaxKind::GtGt,
            GT_GT_GT => SyntaxKind::GtGtGt,
            GT_GT_EQ => SyntaxKind::GtGtEq,
            GT_GT_GT_EQ => SyntaxKind::GtGtGtEq,
            WHITESPACE => SyntaxKind::Whitespace,
            LINE_COMMENT => SyntaxKind::LineComment,
            BLOCK_COMMENT => SyntaxKind::BlockComment,
            _ => SyntaxKind::Error,
        }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<JavaLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<JavaLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<JavaLanguage>;
pub type SyntaxNodePtr = rowan::ast::SyntaxNodePtr<JavaLanguage>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_kind_conversion() {
        assert_eq!(SyntaxKind::from(Token::For), SyntaxKind::For);
        assert_eq!(SyntaxKind::from(Token::Identifier), SyntaxKind::Identifier);
        assert_eq!(SyntaxKind::from(Token::LtLtEq), SyntaxKind::LtLtEq);
    }

    #[test]
    fn test_raw_round_trip_for_every_kind_boundary() {
        for kind in [SyntaxKind::SourceFile, SyntaxKind::LambdaParameters, SyntaxKind::GtGtGtEq, SyntaxKind::BlockComment] {
            let raw: rowan::SyntaxKind = kind.into();
            assert_eq!(JavaLanguage::kind_from_raw(raw), kind);
        }
        assert_eq!(JavaLanguage::kind_from_raw(rowan::SyntaxKind(u16::MAX)), SyntaxKind::Error);
    }

    #[test]
    fn test_kind_classes() {
        assert!(SyntaxKind::MethodCallExpr.is_expression());
        assert!(!SyntaxKind::ArgumentList.is_expression());
        assert!(SyntaxKind::ForEachStatement.is_statement());
        assert!(SyntaxKind::GtGtEq.is_operator());
        assert!(SyntaxKind::AmpAmp.is_operator());
        assert!(!SyntaxKind::Dot.is_operator());
        assert!(SyntaxKind::LineComment.is_trivia());
    }

    #[test]
    fn test_basic_tree() {
        let mut builder = GreenNodeBuilder::new();
        builder.start_node(SyntaxKind::ExpressionStatement.into());
        builder.start_node(SyntaxKind::NameRef.into());
        builder.token(SyntaxKind::Identifier.into(), "x");
        builder.finish_node();
        builder.token(SyntaxKind::Semicolon.into(), ";");
        builder.finish_node();

        let green = builder.finish();
        let root = SyntaxNode::new_root(green);

        assert_eq!(root.kind(), SyntaxKind::ExpressionStatement);
        assert_eq!(root.first_child().map(|c| c.kind()), Some(SyntaxKind::NameRef));
        assert_eq!(root.text().to_string(), "x;");
    }
}
