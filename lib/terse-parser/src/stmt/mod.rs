//! Statement parsing
//!
//! Supports the statements found inside method bodies:
//! - Blocks: `{ ... }`
//! - Local variables: `final int a = 1, b[] = {2};`
//! - Expression statements: `list.add(x);`
//! - `if`/`else`, `while`, `for` and enhanced `for`
//! - `return`, `break`, `continue` and the empty statement

use chumsky::prelude::*;
use terse_lexer::Token;
use terse_span::Span;
use terse_syntax_tree::SyntaxKind;

use crate::common::{comma_list, emit_comma_list, emit_modifiers, identifier, modifiers_parser, report_errors, token};
use crate::event::EventSink;
use crate::expr::{emit_expr_variant, expr_parser, ExprVariant};
use crate::ty::{dims_parser, emit_dims, emit_ty_variant, ty_parser, TyVariant};

/// `name[] = value`
#[derive(Debug, Clone)]
pub struct DeclaratorData {
    pub name: Span,
    pub dims: Vec<(Span, Span)>,
    pub initializer: Option<(Span, ExprVariant)>,
}

/// Modifiers, type and declarators shared by locals and fields
#[derive(Debug, Clone)]
pub struct LocalVariableData {
    pub modifiers: Vec<(Token, Span)>,
    pub ty: TyVariant,
    pub declarators: Vec<(Option<Span>, DeclaratorData)>,
}

/// A formal parameter: `final String name`
#[derive(Debug, Clone)]
pub struct ParameterData {
    pub modifiers: Vec<(Token, Span)>,
    pub ty: TyVariant,
    pub name: Span,
}

#[derive(Debug, Clone)]
pub struct BlockData {
    pub lbrace: Span,
    pub statements: Vec<StmtVariant>,
    pub rbrace: Span,
}

#[derive(Debug, Clone)]
pub enum ForInitData {
    Declaration(LocalVariableData),
    Expressions(Vec<(Option<Span>, ExprVariant)>),
}

#[derive(Debug, Clone)]
pub struct ForData {
    pub for_kw: Span,
    pub lparen: Span,
    pub init: Option<ForInitData>,
    pub first_semi: Span,
    pub condition: Option<ExprVariant>,
    pub second_semi: Span,
    pub update: Option<Vec<(Option<Span>, ExprVariant)>>,
    pub rparen: Span,
    pub body: Box<StmtVariant>,
}

#[derive(Debug, Clone)]
pub struct ForEachData {
    pub for_kw: Span,
    pub lparen: Span,
    pub parameter: ParameterData,
    pub colon: Span,
    pub iterable: ExprVariant,
    pub rparen: Span,
    pub body: Box<StmtVariant>,
}

/// Internal enum to distinguish between statement variants during parsing
#[derive(Debug, Clone)]
pub enum StmtVariant {
    Block(BlockData),
    /// Local variable declaration and its semicolon
    LocalVariable(LocalVariableData, Span),
    /// Expression and its semicolon
    Expression(ExprVariant, Span),
    If {
        if_kw: Span,
        lparen: Span,
        condition: ExprVariant,
        rparen: Span,
        then_branch: Box<StmtVariant>,
        else_branch: Option<(Span, Box<StmtVariant>)>,
    },
    For(ForData),
    ForEach(ForEachData),
    While {
        while_kw: Span,
        lparen: Span,
        condition: ExprVariant,
        rparen: Span,
        body: Box<StmtVariant>,
    },
    Return {
        return_kw: Span,
        value: Option<ExprVariant>,
        semicolon: Span,
    },
    Break(Span, Span),
    Continue(Span, Span),
    Empty(Span),
}

/// Parser for a single variable declarator
pub fn declarator_parser() -> impl Parser<Token, DeclaratorData, Error = Simple<Token>> + Clone {
    identifier()
        .then(dims_parser())
        .then(token(Token::Eq).then(expr_parser()).or_not())
        .map(|((name, dims), initializer)| DeclaratorData {
            name,
            dims,
            initializer,
        })
}

/// Parser for `modifiers Type a = 1, b`
pub fn local_variable_parser() -> impl Parser<Token, LocalVariableData, Error = Simple<Token>> + Clone {
    modifiers_parser()
        .then(ty_parser())
        .then(comma_list(declarator_parser()))
        .map(|((modifiers, ty), declarators)| LocalVariableData {
            modifiers,
            ty,
            declarators,
        })
}

/// Parser for a formal parameter
pub fn parameter_parser() -> impl Parser<Token, ParameterData, Error = Simple<Token>> + Clone {
    modifiers_parser()
        .then(ty_parser())
        .then(identifier())
        .map(|((modifiers, ty), name)| ParameterData {
            modifiers,
            ty,
            name,
        })
}

/// Parser for statements
pub fn stmt_parser() -> impl Parser<Token, StmtVariant, Error = Simple<Token>> + Clone {
    recursive(|stmt| {
        let expr = expr_parser();
        let paren_expr = token(Token::LParen)
            .then(expr.clone())
            .then(token(Token::RParen))
            .map(|((l, e), r)| (l, e, r));

        let block = token(Token::LBrace)
            .then(stmt.clone().repeated())
            .then(token(Token::RBrace))
            .map(|((lbrace, statements), rbrace)| {
                StmtVariant::Block(BlockData {
                    lbrace,
                    statements,
                    rbrace,
                })
            });

        let local_variable = local_variable_parser()
            .then(token(Token::Semicolon))
            .map(|(data, semi)| StmtVariant::LocalVariable(data, semi));

        let expression = expr
            .clone()
            .then(token(Token::Semicolon))
            .map(|(e, semi)| StmtVariant::Expression(e, semi));

        let if_stmt = token(Token::If)
            .then(paren_expr.clone())
            .then(stmt.clone())
            .then(token(Token::Else).then(stmt.clone()).or_not())
            .map(|(((if_kw, (lparen, condition, rparen)), then_branch), else_branch)| {
                StmtVariant::If {
                    if_kw,
                    lparen,
                    condition,
                    rparen,
                    then_branch: Box::new(then_branch),
                    else_branch: else_branch.map(|(kw, s)| (kw, Box::new(s))),
                }
            });

        let while_stmt = token(Token::While)
            .then(paren_expr)
            .then(stmt.clone())
            .map(|((while_kw, (lparen, condition, rparen)), body)| StmtVariant::While {
                while_kw,
                lparen,
                condition,
                rparen,
                body: Box::new(body),
            });

        let for_each = token(Token::For)
            .then(token(Token::LParen))
            .then(parameter_parser())
            .then(token(Token::Colon))
            .then(expr.clone())
            .then(token(Token::RParen))
            .then(stmt.clone())
            .map(
                |((((((for_kw, lparen), parameter), colon), iterable), rparen), body)| {
                    StmtVariant::ForEach(ForEachData {
                        for_kw,
                        lparen,
                        parameter,
                        colon,
                        iterable,
                        rparen,
                        body: Box::new(body),
                    })
                },
            );

        let for_init = local_variable_parser()
            .map(ForInitData::Declaration)
            .or(comma_list(expr.clone()).map(ForInitData::Expressions));

        let for_stmt = token(Token::For)
            .then(token(Token::LParen))
            .then(for_init.or_not())
            .then(token(Token::Semicolon))
            .then(expr.clone().or_not())
            .then(token(Token::Semicolon))
            .then(comma_list(expr.clone()).or_not())
            .then(token(Token::RParen))
            .then(stmt)
            .map(
                |((((((((for_kw, lparen), init), first_semi), condition), second_semi), update), rparen), body)| {
                    StmtVariant::For(ForData {
                        for_kw,
                        lparen,
                        init,
                        first_semi,
                        condition,
                        second_semi,
                        update,
                        rparen,
                        body: Box::new(body),
                    })
                },
            );

        let return_stmt = token(Token::Return)
            .then(expr.or_not())
            .then(token(Token::Semicolon))
            .map(|((return_kw, value), semicolon)| StmtVariant::Return {
                return_kw,
                value,
                semicolon,
            });

        let break_stmt = token(Token::Break)
            .then(token(Token::Semicolon))
            .map(|(kw, semi)| StmtVariant::Break(kw, semi));
        let continue_stmt = token(Token::Continue)
            .then(token(Token::Semicolon))
            .map(|(kw, semi)| StmtVariant::Continue(kw, semi));
        let empty = token(Token::Semicolon).map(StmtVariant::Empty);

        choice((
            block,
            if_stmt,
            while_stmt,
            for_each,
            for_stmt,
            return_stmt,
            break_stmt,
            continue_stmt,
            empty,
            local_variable,
            expression,
        ))
    })
}

/// Parser for a `{ ... }` block
pub fn block_parser() -> impl Parser<Token, BlockData, Error = Simple<Token>> + Clone {
    token(Token::LBrace)
        .then(stmt_parser().repeated())
        .then(token(Token::RBrace))
        .map(|((lbrace, statements), rbrace)| BlockData {
            lbrace,
            statements,
            rbrace,
        })
}

fn emit_declarator(sink: &mut EventSink, declarator: &DeclaratorData) {
    sink.start_node(SyntaxKind::VariableDeclarator);
    sink.add_token(SyntaxKind::Identifier, declarator.name.clone());
    emit_dims(sink, &declarator.dims);
    if let Some((eq, value)) = &declarator.initializer {
        sink.add_token(SyntaxKind::Eq, eq.clone());
        emit_expr_variant(sink, value);
    }
    sink.finish_node();
}

/// Emit modifiers, type and declarators without a wrapping node
pub fn emit_declaration_parts(sink: &mut EventSink, data: &LocalVariableData) {
    emit_modifiers(sink, &data.modifiers);
    emit_ty_variant(sink, &data.ty);
    emit_comma_list(sink, &data.declarators, emit_declarator);
}

fn emit_local_variable(sink: &mut EventSink, data: &LocalVariableData) {
    sink.start_node(SyntaxKind::LocalVariableDeclaration);
    emit_declaration_parts(sink, data);
    sink.finish_node();
}

/// Emit a Parameter node
pub fn emit_parameter(sink: &mut EventSink, parameter: &ParameterData) {
    sink.start_node(SyntaxKind::Parameter);
    emit_modifiers(sink, &parameter.modifiers);
    emit_ty_variant(sink, &parameter.ty);
    sink.add_token(SyntaxKind::Identifier, parameter.name.clone());
    sink.finish_node();
}

/// Emit a Block node
pub fn emit_block(sink: &mut EventSink, block: &BlockData) {
    sink.start_node(SyntaxKind::Block);
    sink.add_token(SyntaxKind::LBrace, block.lbrace.clone());
    for statement in &block.statements {
        emit_stmt_variant(sink, statement);
    }
    sink.add_token(SyntaxKind::RBrace, block.rbrace.clone());
    sink.finish_node();
}

/// Emit events for any statement variant
pub fn emit_stmt_variant(sink: &mut EventSink, variant: &StmtVariant) {
    match variant {
        StmtVariant::Block(block) => emit_block(sink, block),
        StmtVariant::LocalVariable(data, semi) => {
            sink.start_node(SyntaxKind::LocalVariableStatement);
            emit_local_variable(sink, data);
            sink.add_token(SyntaxKind::Semicolon, semi.clone());
            sink.finish_node();
        }
        StmtVariant::Expression(expr, semi) => {
            sink.start_node(SyntaxKind::ExpressionStatement);
            emit_expr_variant(sink, expr);
            sink.add_token(SyntaxKind::Semicolon, semi.clone());
            sink.finish_node();
        }
        StmtVariant::If {
            if_kw,
            lparen,
            condition,
            rparen,
            then_branch,
            else_branch,
        } => {
            sink.start_node(SyntaxKind::IfStatement);
            sink.add_token(SyntaxKind::If, if_kw.clone());
            sink.add_token(SyntaxKind::LParen, lparen.clone());
            emit_expr_variant(sink, condition);
            sink.add_token(SyntaxKind::RParen, rparen.clone());
            emit_stmt_variant(sink, then_branch);
            if let Some((else_kw, else_branch)) = else_branch {
                sink.add_token(SyntaxKind::Else, else_kw.clone());
                emit_stmt_variant(sink, else_branch);
            }
            sink.finish_node();
        }
        StmtVariant::For(data) => emit_for(sink, data),
        StmtVariant::ForEach(data) => {
            sink.start_node(SyntaxKind::ForEachStatement);
            sink.add_token(SyntaxKind::For, data.for_kw.clone());
            sink.add_token(SyntaxKind::LParen, data.lparen.clone());
            emit_parameter(sink, &data.parameter);
            sink.add_token(SyntaxKind::Colon, data.colon.clone());
            emit_expr_variant(sink, &data.iterable);
            sink.add_token(SyntaxKind::RParen, data.rparen.clone());
            emit_stmt_variant(sink, &data.body);
            sink.finish_node();
        }
        StmtVariant::While {
            while_kw,
            lparen,
            condition,
            rparen,
            body,
        } => {
            sink.start_node(SyntaxKind::WhileStatement);
            sink.add_token(SyntaxKind::While, while_kw.clone());
            sink.add_token(SyntaxKind::LParen, lparen.clone());
            emit_expr_variant(sink, condition);
            sink.add_token(SyntaxKind::RParen, rparen.clone());
            emit_stmt_variant(sink, body);
            sink.finish_node();
        }
        StmtVariant::Return {
            return_kw,
            value,
            semicolon,
        } => {
            sink.start_node(SyntaxKind::ReturnStatement);
            sink.add_token(SyntaxKind::Return, return_kw.clone());
            if let Some(value) = value {
                emit_expr_variant(sink, value);
            }
            sink.add_token(SyntaxKind::Semicolon, semicolon.clone());
            sink.finish_node();
        }
        StmtVariant::Break(kw, semi) => {
            sink.start_node(SyntaxKind::BreakStatement);
            sink.add_token(SyntaxKind::Break, kw.clone());
            sink.add_token(SyntaxKind::Semicolon, semi.clone());
            sink.finish_node();
        }
        StmtVariant::Continue(kw, semi) => {
            sink.start_node(SyntaxKind::ContinueStatement);
            sink.add_token(SyntaxKind::Continue, kw.clone());
            sink.add_token(SyntaxKind::Semicolon, semi.clone());
            sink.finish_node();
        }
        StmtVariant::Empty(semi) => {
            sink.start_node(SyntaxKind::EmptyStatement);
            sink.add_token(SyntaxKind::Semicolon, semi.clone());
            sink.finish_node();
        }
    }
}

fn emit_for(sink: &mut EventSink, data: &ForData) {
    sink.start_node(SyntaxKind::ForStatement);
    sink.add_token(SyntaxKind::For, data.for_kw.clone());
    sink.add_token(SyntaxKind::LParen, data.lparen.clone());
    if let Some(init) = &data.init {
        sink.start_node(SyntaxKind::ForInit);
        match init {
            ForInitData::Declaration(local) => emit_local_variable(sink, local),
            ForInitData::Expressions(exprs) => emit_comma_list(sink, exprs, emit_expr_variant),
        }
        sink.finish_node();
    }
    sink.add_token(SyntaxKind::Semicolon, data.first_semi.clone());
    if let Some(condition) = &data.condition {
        sink.start_node(SyntaxKind::ForCondition);
        emit_expr_variant(sink, condition);
        sink.finish_node();
    }
    sink.add_token(SyntaxKind::Semicolon, data.second_semi.clone());
    if let Some(update) = &data.update {
        sink.start_node(SyntaxKind::ForUpdate);
        emit_comma_list(sink, update, emit_expr_variant);
        sink.finish_node();
    }
    sink.add_token(SyntaxKind::RParen, data.rparen.clone());
    emit_stmt_variant(sink, &data.body);
    sink.finish_node();
}

/// Parse a single statement and emit events
pub fn parse_stmt<I>(source: &str, tokens: I, sink: &mut EventSink)
where
    I: Iterator<Item = (Token, Span)>,
{
    let end_pos = source.len();
    let stream = chumsky::Stream::from_iter(end_pos..end_pos, tokens);

    match stmt_parser().then_ignore(end()).parse(stream) {
        Ok(variant) => emit_stmt_variant(sink, &variant),
        Err(errors) => {
            sink.start_node(SyntaxKind::Error);
            report_errors(sink, errors);
            sink.finish_node();
        }
    }
}
