//! Expression parsing
//!
//! Java expressions with the usual precedence ladder, lowest first:
//! - Lambda: `x -> x * 2`, `(a, b) -> a + b`
//! - Assignment (right associative): `=`, `+=`, ..., `>>>=`
//! - Conditional: `c ? a : b`
//! - Binary levels: `||`, `&&`, `|`, `^`, `&`, equality, relational, shift, additive, multiplicative
//! - Unary: prefix operators and casts
//! - Postfix: member access, calls, indexing, `++`/`--`
//!
//! A run of the same binary operator at one level is kept as a single
//! polyadic `BinaryExpr`: `a + b + c` has three operands, while `a + b - c`
//! nests.

use chumsky::prelude::*;
use terse_lexer::Token;
use terse_span::Span;
use terse_syntax_tree::SyntaxKind;

use crate::common::{comma_list, emit_comma_list, identifier, one_of_tokens, report_errors, token};
use crate::event::EventSink;
use crate::ty::{dims_parser, emit_dims, emit_ty_variant, ty_parser, TyVariant};

/// An operator token, possibly reassembled from several lexer tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Op {
    pub kind: SyntaxKind,
    pub span: Span,
}

impl Op {
    fn new(token: Token, span: Span) -> Self {
        Op {
            kind: SyntaxKind::from(token),
            span,
        }
    }
}

/// `( a, b )`
#[derive(Debug, Clone)]
pub struct ArgumentsData {
    pub lparen: Span,
    pub args: Vec<(Option<Span>, ExprVariant)>,
    pub rparen: Span,
}

/// `{ a, b, }`
#[derive(Debug, Clone)]
pub struct ArrayInitData {
    pub lbrace: Span,
    pub elements: Vec<(Option<Span>, ExprVariant)>,
    pub trailing_comma: Option<Span>,
    pub rbrace: Span,
}

/// What follows the type in a `new` expression
#[derive(Debug, Clone)]
pub enum NewBody {
    Arguments(ArgumentsData),
    /// `[n][m]` followed by empty `[]` pairs
    Dimensions(Vec<(Span, ExprVariant, Span)>, Vec<(Span, Span)>),
    Initializer(ArrayInitData),
}

/// Lambda parameter forms
#[derive(Debug, Clone)]
pub enum LambdaParams {
    Single(Span),
    List {
        lparen: Span,
        names: Vec<(Option<Span>, Span)>,
        rparen: Span,
    },
}

/// Internal enum to distinguish between expression variants during parsing
#[derive(Debug, Clone)]
pub enum ExprVariant {
    Literal(Token, Span),
    Name(Span),
    This(Span),
    FieldAccess {
        target: Box<ExprVariant>,
        dot: Span,
        name: Span,
    },
    Call {
        target: Option<(Box<ExprVariant>, Span)>,
        name: Span,
        arguments: ArgumentsData,
    },
    Index {
        target: Box<ExprVariant>,
        lbracket: Span,
        index: Box<ExprVariant>,
        rbracket: Span,
    },
    New {
        new: Span,
        ty: TyVariant,
        body: NewBody,
    },
    ArrayInit(ArrayInitData),
    Paren {
        lparen: Span,
        inner: Box<ExprVariant>,
        rparen: Span,
    },
    Cast {
        lparen: Span,
        ty: TyVariant,
        rparen: Span,
        operand: Box<ExprVariant>,
    },
    Prefix {
        op: Op,
        operand: Box<ExprVariant>,
    },
    Postfix {
        operand: Box<ExprVariant>,
        op: Op,
    },
    Binary {
        first: Box<ExprVariant>,
        rest: Vec<(Op, ExprVariant)>,
    },
    Conditional {
        condition: Box<ExprVariant>,
        question: Span,
        then_branch: Box<ExprVariant>,
        colon: Span,
        else_branch: Box<ExprVariant>,
    },
    Assignment {
        target: Box<ExprVariant>,
        op: Op,
        value: Box<ExprVariant>,
    },
    Lambda {
        params: LambdaParams,
        arrow: Span,
        body: Box<ExprVariant>,
    },
}

/// Member access or indexing applied to a primary
#[derive(Debug, Clone)]
enum Selector {
    Member(Span, Span, Option<ArgumentsData>),
    Index(Span, ExprVariant, Span),
}

fn apply_selector(target: ExprVariant, selector: Selector) -> ExprVariant {
    match selector {
        Selector::Member(dot, name, Some(arguments)) => ExprVariant::Call {
            target: Some((Box::new(target), dot)),
            name,
            arguments,
        },
        Selector::Member(dot, name, None) => ExprVariant::FieldAccess {
            target: Box::new(target),
            dot,
            name,
        },
        Selector::Index(lbracket, index, rbracket) => ExprVariant::Index {
            target: Box::new(target),
            lbracket,
            index: Box::new(index),
            rbracket,
        },
    }
}

/// Extend a polyadic chain when the operator repeats, otherwise nest
fn fold_binary(lhs: ExprVariant, (op, rhs): (Op, ExprVariant)) -> ExprVariant {
    match lhs {
        ExprVariant::Binary { first, mut rest }
            if rest.last().map(|(last, _)| last.kind) == Some(op.kind) =>
        {
            rest.push((op, rhs));
            ExprVariant::Binary { first, rest }
        }
        other => ExprVariant::Binary {
            first: Box::new(other),
            rest: vec![(op, rhs)],
        },
    }
}

fn binary_level<P, O>(operand: P, op: O) -> BoxedParser<'static, Token, ExprVariant, Simple<Token>>
where
    P: Parser<Token, ExprVariant, Error = Simple<Token>> + Clone + 'static,
    O: Parser<Token, Op, Error = Simple<Token>> + Clone + 'static,
{
    operand
        .clone()
        .then(op.then(operand).repeated())
        .foldl(fold_binary)
        .boxed()
}

fn ops(tokens: &'static [Token]) -> impl Parser<Token, Op, Error = Simple<Token>> + Clone {
    one_of_tokens(tokens).map(|(t, span)| Op::new(t, span))
}

/// `>>` and `>>>`, from adjacent `>` tokens
fn shift_right_op() -> impl Parser<Token, Op, Error = Simple<Token>> + Clone {
    token(Token::Gt)
        .then(token(Token::Gt))
        .then(token(Token::Gt).or_not())
        .try_map(|((a, b), c), span| {
            let adjacent = a.end == b.start && c.as_ref().is_none_or(|c| b.end == c.start);
            if !adjacent {
                return Err(Simple::custom(span, "shift operator must not contain spaces"));
            }
            Ok(match c {
                Some(c) => Op {
                    kind: SyntaxKind::GtGtGt,
                    span: a.start..c.end,
                },
                None => Op {
                    kind: SyntaxKind::GtGt,
                    span: a.start..b.end,
                },
            })
        })
}

/// `>>=` and `>>>=`, from `>` tokens followed by `>=`
fn shift_right_assign_op() -> impl Parser<Token, Op, Error = Simple<Token>> + Clone {
    token(Token::Gt)
        .then(token(Token::Gt).or_not())
        .then(token(Token::GtEq))
        .try_map(|((a, b), c), span| {
            let adjacent = match &b {
                Some(b) => a.end == b.start && b.end == c.start,
                None => a.end == c.start,
            };
            if !adjacent {
                return Err(Simple::custom(span, "shift operator must not contain spaces"));
            }
            let kind = if b.is_some() {
                SyntaxKind::GtGtGtEq
            } else {
                SyntaxKind::GtGtEq
            };
            Ok(Op {
                kind,
                span: a.start..c.end,
            })
        })
}

const ASSIGN_OPS: &[Token] = &[
    Token::Eq,
    Token::PlusEq,
    Token::MinusEq,
    Token::StarEq,
    Token::SlashEq,
    Token::PercentEq,
    Token::AmpEq,
    Token::PipeEq,
    Token::CaretEq,
    Token::LtLtEq,
];

/// Parser for expressions
pub fn expr_parser() -> impl Parser<Token, ExprVariant, Error = Simple<Token>> + Clone {
    recursive(|expr| {
        let arguments = token(Token::LParen)
            .then(comma_list(expr.clone()).or_not())
            .then(token(Token::RParen))
            .map(|((lparen, args), rparen)| ArgumentsData {
                lparen,
                args: args.unwrap_or_default(),
                rparen,
            });

        let array_init = recursive(|init| {
            let element = init.map(ExprVariant::ArrayInit).or(expr.clone());
            token(Token::LBrace)
                .then(comma_list(element).or_not())
                .then(token(Token::Comma).or_not())
                .then(token(Token::RBrace))
                .map(|(((lbrace, elements), trailing_comma), rbrace)| ArrayInitData {
                    lbrace,
                    elements: elements.unwrap_or_default(),
                    trailing_comma,
                    rbrace,
                })
        });

        let literal = filter_map(|span, token| match token {
            Token::IntegerLiteral
            | Token::FloatLiteral
            | Token::StringLiteral
            | Token::CharLiteral
            | Token::True
            | Token::False
            | Token::Null => Ok(ExprVariant::Literal(token, span)),
            _ => Err(Simple::expected_input_found(span, vec![], Some(token))),
        });

        let this = token(Token::This).map(ExprVariant::This);

        let name_or_call = identifier()
            .then(arguments.clone().or_not())
            .map(|(name, arguments)| match arguments {
                Some(arguments) => ExprVariant::Call {
                    target: None,
                    name,
                    arguments,
                },
                None => ExprVariant::Name(name),
            });

        let dimension = token(Token::LBracket)
            .then(expr.clone())
            .then(token(Token::RBracket))
            .map(|((l, e), r)| (l, e, r));

        let new_body = arguments
            .clone()
            .map(NewBody::Arguments)
            .or(dimension
                .repeated()
                .at_least(1)
                .then(dims_parser())
                .map(|(sized, empty)| NewBody::Dimensions(sized, empty)))
            .or(array_init.clone().map(NewBody::Initializer));

        let new_expr = token(Token::New)
            .then(ty_parser())
            .then(new_body)
            .map(|((new, ty), body)| ExprVariant::New { new, ty, body });

        let paren = token(Token::LParen)
            .then(expr.clone())
            .then(token(Token::RParen))
            .map(|((lparen, inner), rparen)| ExprVariant::Paren {
                lparen,
                inner: Box::new(inner),
                rparen,
            });

        let primary = choice((
            literal,
            this,
            new_expr,
            paren,
            name_or_call,
            array_init.map(ExprVariant::ArrayInit),
        ));

        let selector = token(Token::Dot)
            .then(identifier())
            .then(arguments.or_not())
            .map(|((dot, name), args)| Selector::Member(dot, name, args))
            .or(token(Token::LBracket)
                .then(expr.clone())
                .then(token(Token::RBracket))
                .map(|((l, index), r)| Selector::Index(l, index, r)));

        let postfix = primary
            .then(selector.repeated())
            .foldl(apply_selector)
            .then(ops(&[Token::PlusPlus, Token::MinusMinus]).repeated())
            .foldl(|operand, op| ExprVariant::Postfix {
                operand: Box::new(operand),
                op,
            })
            .boxed();

        let unary = recursive(|unary| {
            let prefix = ops(&[
                Token::Plus,
                Token::Minus,
                Token::PlusPlus,
                Token::MinusMinus,
                Token::Bang,
                Token::Tilde,
            ])
            .then(unary.clone())
            .map(|(op, operand)| ExprVariant::Prefix {
                op,
                operand: Box::new(operand),
            });

            let cast_head = token(Token::LParen)
                .then(ty_parser())
                .then(token(Token::RParen));

            // `(int) -x` is a cast, `(a) - x` is a subtraction
            let primitive_cast = cast_head
                .clone()
                .then(unary.clone())
                .try_map(|(((lparen, ty), rparen), operand), span| {
                    if ty.is_primitive() {
                        Ok(ExprVariant::Cast {
                            lparen,
                            ty,
                            rparen,
                            operand: Box::new(operand),
                        })
                    } else {
                        Err(Simple::custom(span, "not a primitive cast"))
                    }
                });

            let not_plus_minus = ops(&[Token::Bang, Token::Tilde])
                .then(unary)
                .map(|(op, operand)| ExprVariant::Prefix {
                    op,
                    operand: Box::new(operand),
                })
                .or(postfix.clone());

            let reference_cast = cast_head
                .then(not_plus_minus)
                .map(|(((lparen, ty), rparen), operand)| ExprVariant::Cast {
                    lparen,
                    ty,
                    rparen,
                    operand: Box::new(operand),
                });

            choice((prefix, primitive_cast, reference_cast, postfix))
        })
        .boxed();

        let multiplicative = binary_level(unary, ops(&[Token::Star, Token::Slash, Token::Percent]));
        let additive = binary_level(multiplicative, ops(&[Token::Plus, Token::Minus]));
        let shift = binary_level(additive, ops(&[Token::LtLt]).or(shift_right_op()));
        let relational = binary_level(
            shift,
            ops(&[Token::Lt, Token::LtEq, Token::Gt, Token::GtEq]),
        );
        let equality = binary_level(relational, ops(&[Token::EqEq, Token::BangEq]));
        let bit_and = binary_level(equality, ops(&[Token::Amp]));
        let bit_xor = binary_level(bit_and, ops(&[Token::Caret]));
        let bit_or = binary_level(bit_xor, ops(&[Token::Pipe]));
        let and = binary_level(bit_or, ops(&[Token::AmpAmp]));
        let or = binary_level(and, ops(&[Token::PipePipe]));

        let conditional = recursive(|conditional| {
            or.clone()
                .then(
                    token(Token::Question)
                        .then(expr.clone())
                        .then(token(Token::Colon))
                        .then(conditional)
                        .or_not(),
                )
                .map(|(condition, branches)| match branches {
                    Some((((question, then_branch), colon), else_branch)) => {
                        ExprVariant::Conditional {
                            condition: Box::new(condition),
                            question,
                            then_branch: Box::new(then_branch),
                            colon,
                            else_branch: Box::new(else_branch),
                        }
                    }
                    None => condition,
                })
        });

        let assign_op = ops(ASSIGN_OPS).or(shift_right_assign_op());
        let assignment = conditional
            .then(assign_op.then(expr.clone()).or_not())
            .map(|(target, value)| match value {
                Some((op, value)) => ExprVariant::Assignment {
                    target: Box::new(target),
                    op,
                    value: Box::new(value),
                },
                None => target,
            });

        let lambda_params = identifier().map(LambdaParams::Single).or(token(Token::LParen)
            .then(comma_list(identifier()).or_not())
            .then(token(Token::RParen))
            .map(|((lparen, names), rparen)| LambdaParams::List {
                lparen,
                names: names.unwrap_or_default(),
                rparen,
            }));

        let lambda = lambda_params
            .then(token(Token::Arrow))
            .then(expr)
            .map(|((params, arrow), body)| ExprVariant::Lambda {
                params,
                arrow,
                body: Box::new(body),
            });

        lambda.or(assignment)
    })
}

/// Emit events for any expression variant
pub fn emit_expr_variant(sink: &mut EventSink, variant: &ExprVariant) {
    match variant {
        ExprVariant::Literal(token, span) => {
            sink.start_node(SyntaxKind::Literal);
            sink.add_token(SyntaxKind::from(*token), span.clone());
            sink.finish_node();
        }
        ExprVariant::Name(span) => {
            sink.start_node(SyntaxKind::NameRef);
            sink.add_token(SyntaxKind::Identifier, span.clone());
            sink.finish_node();
        }
        ExprVariant::This(span) => {
            sink.start_node(SyntaxKind::ThisExpr);
            sink.add_token(SyntaxKind::This, span.clone());
            sink.finish_node();
        }
        ExprVariant::FieldAccess { target, dot, name } => {
            sink.start_node(SyntaxKind::FieldAccessExpr);
            emit_expr_variant(sink, target);
            sink.add_token(SyntaxKind::Dot, dot.clone());
            sink.add_token(SyntaxKind::Identifier, name.clone());
            sink.finish_node();
        }
        ExprVariant::Call {
            target,
            name,
            arguments,
        } => {
            sink.start_node(SyntaxKind::MethodCallExpr);
            if let Some((target, dot)) = target {
                emit_expr_variant(sink, target);
                sink.add_token(SyntaxKind::Dot, dot.clone());
            }
            sink.add_token(SyntaxKind::Identifier, name.clone());
            emit_arguments(sink, arguments);
            sink.finish_node();
        }
        ExprVariant::Index {
            target,
            lbracket,
            index,
            rbracket,
        } => {
            sink.start_node(SyntaxKind::ArrayAccessExpr);
            emit_expr_variant(sink, target);
            sink.add_token(SyntaxKind::LBracket, lbracket.clone());
            emit_expr_variant(sink, index);
            sink.add_token(SyntaxKind::RBracket, rbracket.clone());
            sink.finish_node();
        }
        ExprVariant::New { new, ty, body } => {
            sink.start_node(SyntaxKind::NewExpr);
            sink.add_token(SyntaxKind::New, new.clone());
            emit_ty_variant(sink, ty);
            match body {
                NewBody::Arguments(arguments) => emit_arguments(sink, arguments),
                NewBody::Dimensions(sized, empty) => {
                    for (l, e, r) in sized {
                        sink.start_node(SyntaxKind::ArrayDimension);
                        sink.add_token(SyntaxKind::LBracket, l.clone());
                        emit_expr_variant(sink, e);
                        sink.add_token(SyntaxKind::RBracket, r.clone());
                        sink.finish_node();
                    }
                    emit_dims(sink, empty);
                }
                NewBody::Initializer(init) => emit_array_init(sink, init),
            }
            sink.finish_node();
        }
        ExprVariant::ArrayInit(init) => emit_array_init(sink, init),
        ExprVariant::Paren {
            lparen,
            inner,
            rparen,
        } => {
            sink.start_node(SyntaxKind::ParenExpr);
            sink.add_token(SyntaxKind::LParen, lparen.clone());
            emit_expr_variant(sink, inner);
            sink.add_token(SyntaxKind::RParen, rparen.clone());
            sink.finish_node();
        }
        ExprVariant::Cast {
            lparen,
            ty,
            rparen,
            operand,
        } => {
            sink.start_node(SyntaxKind::CastExpr);
            sink.add_token(SyntaxKind::LParen, lparen.clone());
            emit_ty_variant(sink, ty);
            sink.add_token(SyntaxKind::RParen, rparen.clone());
            emit_expr_variant(sink, operand);
            sink.finish_node();
        }
        ExprVariant::Prefix { op, operand } => {
            sink.start_node(SyntaxKind::PrefixExpr);
            sink.add_token(op.kind, op.span.clone());
            emit_expr_variant(sink, operand);
            sink.finish_node();
        }
        ExprVariant::Postfix { operand, op } => {
            sink.start_node(SyntaxKind::PostfixExpr);
            emit_expr_variant(sink, operand);
            sink.add_token(op.kind, op.span.clone());
            sink.finish_node();
        }
        ExprVariant::Binary { first, rest } => {
            sink.start_node(SyntaxKind::BinaryExpr);
            emit_expr_variant(sink, first);
            for (op, operand) in rest {
                sink.add_token(op.kind, op.span.clone());
                emit_expr_variant(sink, operand);
            }
            sink.finish_node();
        }
        ExprVariant::Conditional {
            condition,
            question,
            then_branch,
            colon,
            else_branch,
        } => {
            sink.start_node(SyntaxKind::ConditionalExpr);
            emit_expr_variant(sink, condition);
            sink.add_token(SyntaxKind::Question, question.clone());
            emit_expr_variant(sink, then_branch);
            sink.add_token(SyntaxKind::Colon, colon.clone());
            emit_expr_variant(sink, else_branch);
            sink.finish_node();
        }
        ExprVariant::Assignment { target, op, value } => {
            sink.start_node(SyntaxKind::AssignmentExpr);
            emit_expr_variant(sink, target);
            sink.add_token(op.kind, op.span.clone());
            emit_expr_variant(sink, value);
            sink.finish_node();
        }
        ExprVariant::Lambda {
            params,
            arrow,
            body,
        } => {
            sink.start_node(SyntaxKind::LambdaExpr);
            match params {
                LambdaParams::Single(name) => {
                    sink.add_token(SyntaxKind::Identifier, name.clone());
                }
                LambdaParams::List {
                    lparen,
                    names,
                    rparen,
                } => {
                    sink.start_node(SyntaxKind::LambdaParameters);
                    sink.add_token(SyntaxKind::LParen, lparen.clone());
                    emit_comma_list(sink, names, |sink, name| {
                        sink.add_token(SyntaxKind::Identifier, name.clone())
                    });
                    sink.add_token(SyntaxKind::RParen, rparen.clone());
                    sink.finish_node();
                }
            }
            sink.add_token(SyntaxKind::Arrow, arrow.clone());
            emit_expr_variant(sink, body);
            sink.finish_node();
        }
    }
}

/// Emit an ArgumentList node
pub fn emit_arguments(sink: &mut EventSink, arguments: &ArgumentsData) {
    sink.start_node(SyntaxKind::ArgumentList);
    sink.add_token(SyntaxKind::LParen, arguments.lparen.clone());
    emit_comma_list(sink, &arguments.args, emit_expr_variant);
    sink.add_token(SyntaxKind::RParen, arguments.rparen.clone());
    sink.finish_node();
}

/// Emit an ArrayInitializer node
pub fn emit_array_init(sink: &mut EventSink, init: &ArrayInitData) {
    sink.start_node(SyntaxKind::ArrayInitializer);
    sink.add_token(SyntaxKind::LBrace, init.lbrace.clone());
    emit_comma_list(sink, &init.elements, emit_expr_variant);
    if let Some(comma) = &init.trailing_comma {
        sink.add_token(SyntaxKind::Comma, comma.clone());
    }
    sink.add_token(SyntaxKind::RBrace, init.rbrace.clone());
    sink.finish_node();
}

/// Parse an expression and emit events
pub fn parse_expr<I>(source: &str, tokens: I, sink: &mut EventSink)
where
    I: Iterator<Item = (Token, Span)>,
{
    let end_pos = source.len();
    let stream = chumsky::Stream::from_iter(end_pos..end_pos, tokens);

    match expr_parser().then_ignore(end()).parse(stream) {
        Ok(variant) => emit_expr_variant(sink, &variant),
        Err(errors) => {
            sink.start_node(SyntaxKind::Error);
            report_errors(sink, errors);
            sink.finish_node();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser as TreeParser;
    use terse_lexer::significant_tokens;
    use terse_syntax_tree::helpers::{arguments, member_name_text, operands, operator_kind, qualifier};
    use terse_syntax_tree::SyntaxNode;

    fn parse(source: &str) -> SyntaxNode {
        let result = TreeParser::parse(source, significant_tokens(source).into_iter(), parse_expr);
        assert!(result.is_ok(), "{}: {:?}", source, result.errors);
        assert_eq!(result.tree.text().to_string(), source);
        result.tree
    }

    #[test]
    fn test_precedence() {
        let tree = parse("a + b * c");
        assert_eq!(tree.kind(), SyntaxKind::BinaryExpr);
        assert_eq!(operator_kind(&tree), Some(SyntaxKind::Plus));
        let rhs = &operands(&tree)[1];
        assert_eq!(operator_kind(rhs), Some(SyntaxKind::Star));
    }

    #[test]
    fn test_same_operator_is_polyadic() {
        let tree = parse("a + b + c");
        assert_eq!(operands(&tree).len(), 3);

        let mixed = parse("a + b - c");
        assert_eq!(operands(&mixed).len(), 2);
        assert_eq!(operator_kind(&mixed), Some(SyntaxKind::Minus));
        assert_eq!(operator_kind(&operands(&mixed)[0]), Some(SyntaxKind::Plus));
    }

    #[test]
    fn test_method_chain() {
        let tree = parse("a.add(b).multiply(c)");
        assert_eq!(tree.kind(), SyntaxKind::MethodCallExpr);
        assert_eq!(member_name_text(&tree).as_deref(), Some("multiply"));
        let inner = qualifier(&tree).unwrap();
        assert_eq!(member_name_text(&inner).as_deref(), Some("add"));
        assert_eq!(arguments(&inner).len(), 1);
    }

    #[test]
    fn test_shift_operators_are_reassembled() {
        let tree = parse("a >> 2");
        assert_eq!(operator_kind(&tree), Some(SyntaxKind::GtGt));
        let tree = parse("a >>> 2");
        assert_eq!(operator_kind(&tree), Some(SyntaxKind::GtGtGt));
        let tree = parse("a >>= 2");
        assert_eq!(tree.kind(), SyntaxKind::AssignmentExpr);
        assert_eq!(operator_kind(&tree), Some(SyntaxKind::GtGtEq));
        let tree = parse("a > b");
        assert_eq!(operator_kind(&tree), Some(SyntaxKind::Gt));
    }

    #[test]
    fn test_casts_and_parens() {
        assert_eq!(parse("(int) x").kind(), SyntaxKind::CastExpr);
        assert_eq!(parse("(String) list.get(0)").kind(), SyntaxKind::CastExpr);
        assert_eq!(parse("(a) - b").kind(), SyntaxKind::BinaryExpr);
        assert_eq!(parse("(a + b)").kind(), SyntaxKind::ParenExpr);
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let tree = parse("a = b += 1");
        assert_eq!(operator_kind(&tree), Some(SyntaxKind::Eq));
        assert_eq!(operands(&tree)[1].kind(), SyntaxKind::AssignmentExpr);
    }

    #[test]
    fn test_new_forms() {
        assert_eq!(parse("new ArrayList<>()").kind(), SyntaxKind::NewExpr);
        let array = parse("new int[]{1, 2, 3}");
        assert!(array.children().any(|c| c.kind() == SyntaxKind::ArrayInitializer));
        let sized = parse("new int[n]");
        assert!(sized.children().any(|c| c.kind() == SyntaxKind::ArrayDimension));
    }

    #[test]
    fn test_conditional_and_lambda() {
        assert_eq!(parse("a != null ? a.b() : c").kind(), SyntaxKind::ConditionalExpr);
        assert_eq!(parse("x -> x * 2").kind(), SyntaxKind::LambdaExpr);
        assert_eq!(parse("(a, b) -> a + b").kind(), SyntaxKind::LambdaExpr);
    }

    #[test]
    fn test_prefix_and_postfix() {
        assert_eq!(parse("-1").kind(), SyntaxKind::PrefixExpr);
        assert_eq!(parse("!a.equals(b)").kind(), SyntaxKind::PrefixExpr);
        assert_eq!(parse("i++").kind(), SyntaxKind::PostfixExpr);
    }
}
