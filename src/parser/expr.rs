use crate::{
    ast::{
        ast::{Expr, Node},
        expressions::{
            ArrayLiteralExpr, AssignOp, AssignmentExpr, BinaryExpr, BinaryOp, BoolExpr, CallExpr,
            CharExpr, EnumLiteralExpr, FieldInit, FloatExpr, IndexExpr, IntExpr, MemberExpr,
            PrefixExpr, StringExpr, StructInitExpr, SymbolExpr, TupleLiteralExpr, UnaryOp,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    lookups::{get_rule, Precedence},
    parser::Parser,
    stmt::parse_brace_block,
};

/// Parses an expression whose operators all bind at least as tightly as
/// `min`.
///
/// Runs the prefix rule of the current token, then keeps folding the left
/// operand into infix rules while the next token's precedence is `>= min`.
pub fn parse_expr(parser: &mut Parser, min: Precedence) -> Result<Expr, Error> {
    let token = parser.current_token();
    let Some(prefix) = get_rule(token.kind).prefix else {
        return Err(Error::new(
            ErrorImpl::ExpectedExpression {
                token: token.describe(),
            },
            token.span.start,
        ));
    };

    let mut left = prefix(parser)?;

    loop {
        let token = parser.current_token();
        let rule = get_rule(token.kind);
        if rule.precedence == Precedence::None || rule.precedence < min {
            break;
        }

        // `if x { ... }`: the brace opens the body, not a struct literal.
        if token.kind == TokenKind::OpenCurly
            && (parser.no_struct() || !matches!(left, Expr::Ident(_)))
        {
            break;
        }

        let Some(infix) = rule.infix else {
            return Err(Error::new(
                ErrorImpl::MissingInfixRule {
                    token: token.describe(),
                },
                token.span.start,
            ));
        };

        left = infix(parser, left, rule.precedence)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();
    let span = token.span;

    let expr = match token.kind {
        TokenKind::Int => match token.value().parse() {
            Ok(value) => Expr::Int(IntExpr { value, span }),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value().to_string(),
                    },
                    span.start,
                ))
            }
        },
        TokenKind::Float => match token.value().parse() {
            Ok(value) => Expr::Float(FloatExpr { value, span }),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value().to_string(),
                    },
                    span.start,
                ))
            }
        },
        TokenKind::Bool => Expr::Bool(BoolExpr {
            value: token.value() == "true",
            span,
        }),
        TokenKind::String => Expr::String(StringExpr {
            value: token.value().to_string(),
            span,
        }),
        TokenKind::Char => match token.value().chars().next() {
            Some(value) => Expr::Char(CharExpr { value, span }),
            None => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: token.describe(),
                    },
                    span.start,
                ))
            }
        },
        TokenKind::Symbol => Expr::Ident(SymbolExpr {
            value: token.value().to_string(),
            span,
        }),
        _ => {
            return Err(Error::new(
                ErrorImpl::ExpectedExpression {
                    token: token.describe(),
                },
                span.start,
            ))
        }
    };

    Ok(expr)
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let Some(operator) = UnaryOp::from_token(operator_token.kind) else {
        return Err(Error::new(
            ErrorImpl::ExpectedExpression {
                token: operator_token.describe(),
            },
            operator_token.span.start,
        ));
    };

    let operand = parse_expr(parser, Precedence::Unary)?;

    Ok(Expr::Unary(PrefixExpr {
        span: operator_token.span.to(operand.get_span()),
        operator,
        operand: Box::new(operand),
    }))
}

/// Binary operators recurse one level tighter, so chains of the same
/// operator group to the left.
pub fn parse_binary_expr(parser: &mut Parser, left: Expr, precedence: Precedence) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let Some(operator) = BinaryOp::from_token(operator_token.kind) else {
        return Err(Error::new(
            ErrorImpl::MissingInfixRule {
                token: operator_token.describe(),
            },
            operator_token.span.start,
        ));
    };

    let right = parse_expr(parser, precedence.increment())?;

    Ok(Expr::Binary(BinaryExpr {
        span: left.get_span().to(right.get_span()),
        operator,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

/// Assignment recurses at its own level, so `a = b = c` is `a = (b = c)`.
pub fn parse_assignment_expr(parser: &mut Parser, left: Expr, precedence: Precedence) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let Some(operator) = AssignOp::from_token(operator_token.kind) else {
        return Err(Error::new(
            ErrorImpl::MissingInfixRule {
                token: operator_token.describe(),
            },
            operator_token.span.start,
        ));
    };

    let value = parse_expr(parser, precedence)?;

    Ok(Expr::Assign(AssignmentExpr {
        span: left.get_span().to(value.get_span()),
        operator,
        assignee: Box::new(left),
        value: Box::new(value),
    }))
}

/// Parses `expr, expr, ...` up to (not including) `close`. A trailing comma
/// is allowed. Returns the elements and whether any comma was seen.
fn parse_expr_list(parser: &mut Parser, close: TokenKind) -> Result<(Vec<Expr>, bool), Error> {
    let mut elements = vec![];
    let mut saw_comma = false;

    while !parser.check(close) {
        elements.push(parse_expr(parser, Precedence::Assignment)?);

        if parser.match_token(TokenKind::Comma).is_some() {
            saw_comma = true;
        } else if !parser.check(close) {
            return Err(parser.unexpected(&format!("expected `,` or `{}`", close)));
        }
    }

    Ok((elements, saw_comma))
}

/// `(expr)` groups, `()`, `(a,)` and `(a, b)` are tuples.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let open = parser.advance();

    let (mut elements, saw_comma) = parser.with_no_struct(false, |parser| {
        parse_expr_list(parser, TokenKind::CloseParen)
    })?;
    let close = parser.expect(TokenKind::CloseParen)?;
    let span = open.span.to(&close.span);

    if elements.len() == 1 && !saw_comma {
        if let Some(mut inner) = elements.pop() {
            *inner.span_mut() = span;
            return Ok(inner);
        }
    }

    Ok(Expr::TupleLit(TupleLiteralExpr { elements, span }))
}

pub fn parse_array_literal_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let open = parser.advance();

    let (elements, _) = parser.with_no_struct(false, |parser| {
        parse_expr_list(parser, TokenKind::CloseBracket)
    })?;
    let close = parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::ArrayLit(ArrayLiteralExpr {
        elements,
        span: open.span.to(&close.span),
    }))
}

pub fn parse_block_expr(parser: &mut Parser) -> Result<Expr, Error> {
    Ok(Expr::Block(parse_brace_block(parser)?))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _precedence: Precedence) -> Result<Expr, Error> {
    parser.advance();

    let (arguments, _) = parser.with_no_struct(false, |parser| {
        parse_expr_list(parser, TokenKind::CloseParen)
    })?;
    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Call(CallExpr {
        span: left.get_span().to(&close.span),
        callee: Box::new(left),
        arguments,
    }))
}

pub fn parse_index_expr(parser: &mut Parser, left: Expr, _precedence: Precedence) -> Result<Expr, Error> {
    parser.advance();

    let index = parser.with_no_struct(false, |parser| parse_expr(parser, Precedence::Assignment))?;
    let close = parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::IndexAccess(IndexExpr {
        span: left.get_span().to(&close.span),
        target: Box::new(left),
        index: Box::new(index),
    }))
}

/// `target.name` or, for tuples, `target.0`.
pub fn parse_member_expr(parser: &mut Parser, left: Expr, _precedence: Precedence) -> Result<Expr, Error> {
    parser.advance();

    if !parser.check(TokenKind::Symbol) && !parser.check(TokenKind::Int) {
        return Err(parser.unexpected("expected field name after `.`"));
    }
    let field = parser.advance();

    Ok(Expr::FieldAccess(MemberExpr {
        span: left.get_span().to(&field.span),
        target: Box::new(left),
        field: field.value().to_string(),
    }))
}

/// `Name::Variant`
pub fn parse_enum_literal_expr(parser: &mut Parser, left: Expr, _precedence: Precedence) -> Result<Expr, Error> {
    let Expr::Ident(name) = left else {
        return Err(parser.unexpected("expected an enum name before `::`"));
    };
    parser.advance();

    let variant = parser.expect_error(TokenKind::Symbol, "expected variant name after `::`")?;

    Ok(Expr::EnumLit(EnumLiteralExpr {
        span: name.span.to(&variant.span),
        name: name.value,
        variant: variant.value().to_string(),
    }))
}

/// `Name { field: expr, shorthand }`
pub fn parse_struct_literal_expr(parser: &mut Parser, left: Expr, _precedence: Precedence) -> Result<Expr, Error> {
    let Expr::Ident(name) = left else {
        return Err(parser.unexpected("expected a struct name before `{`"));
    };
    parser.advance();

    let fields = parser.with_no_struct(false, parse_field_inits)?;
    let close = parser.expect(TokenKind::CloseCurly)?;

    Ok(Expr::StructLit(StructInitExpr {
        span: name.span.to(&close.span),
        name: name.value,
        fields,
    }))
}

fn parse_field_inits(parser: &mut Parser) -> Result<Vec<FieldInit>, Error> {
    let mut fields = vec![];

    loop {
        parser.skip_layout();
        if parser.check(TokenKind::CloseCurly) {
            break;
        }

        let name = parser.expect_error(TokenKind::Symbol, "expected field name in struct literal")?;
        let value = if parser.match_token(TokenKind::Colon).is_some() {
            parse_expr(parser, Precedence::Assignment)?
        } else {
            Expr::Ident(SymbolExpr {
                value: name.value().to_string(),
                span: name.span,
            })
        };

        fields.push(FieldInit {
            name: name.value().to_string(),
            span: Span::new(name.span.start, value.get_span().end),
            value,
        });

        parser.skip_layout();
        if parser.match_token(TokenKind::Comma).is_none() {
            break;
        }
    }

    parser.skip_layout();
    Ok(fields)
}
