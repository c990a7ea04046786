//! Type parsing implementation.
//!
//! Type annotations are parsed by plain recursive descent. It supports:
//!
//! - Sized numeric types (`i8`..`i64`, `u8`..`u64`, `f32`, `f64`), recognised
//!   from identifier text
//! - The `bool` and `str` built-ins
//! - Sized arrays `[T: N]` and tuples `(T, U)`
//! - Function types `fn(T, U) -> R`
//! - Named types with optional generic arguments `Name<T, U>`

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    ast::types::{FloatWidth, IntWidth, TypeExpr, TypeKind},
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Span,
};

use super::{expr::parse_expr, lookups::Precedence, parser::Parser};

lazy_static! {
    static ref NUMERIC_TYPE: Regex = Regex::new(r"^(?:([iu])(8|16|32|64)|f(32|64))$").unwrap();
}

/// Maps built-in type names to their kind.
fn builtin_type(name: &str) -> Option<TypeKind> {
    match name {
        "bool" => return Some(TypeKind::Bool),
        "str" => return Some(TypeKind::Str),
        _ => {}
    }

    let captures = NUMERIC_TYPE.captures(name)?;
    if let (Some(sign), Some(bits)) = (captures.get(1), captures.get(2)) {
        return Some(TypeKind::Int {
            signed: sign.as_str() == "i",
            width: IntWidth::from_bits(bits.as_str())?,
        });
    }

    let bits = captures.get(3)?;
    Some(TypeKind::Float {
        width: FloatWidth::from_bits(bits.as_str())?,
    })
}

pub fn parse_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    match parser.current_token_kind() {
        TokenKind::Symbol => parse_symbol_type(parser),
        TokenKind::OpenBracket => parse_array_type(parser),
        TokenKind::OpenParen => parse_tuple_type(parser),
        TokenKind::Fn => parse_fn_type(parser),
        _ => Err(parser.unexpected("expected a type")),
    }
}

/// Parses `T, U, ...` up to (not including) `close`.
fn parse_type_list(parser: &mut Parser, close: TokenKind) -> Result<(Vec<TypeExpr>, bool), Error> {
    let mut types = vec![];
    let mut saw_comma = false;

    while !parser.check(close) {
        types.push(parse_type(parser)?);

        if parser.match_token(TokenKind::Comma).is_some() {
            saw_comma = true;
        } else {
            break;
        }
    }

    Ok((types, saw_comma))
}

pub fn parse_symbol_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let token = parser.expect(TokenKind::Symbol)?;

    if let Some(kind) = builtin_type(token.value()) {
        return Ok(TypeExpr::new(kind, token.span));
    }

    let args = parse_generic_args(parser)?;
    Ok(TypeExpr::new(
        TypeKind::Named {
            name: token.value().to_string(),
            args,
        },
        Span::new(token.span.start, parser.previous_end()),
    ))
}

/// `<T, U>` after a type name; empty when absent.
fn parse_generic_args(parser: &mut Parser) -> Result<Vec<TypeExpr>, Error> {
    if parser.match_token(TokenKind::Less).is_none() {
        return Ok(vec![]);
    }

    let mut args = vec![];
    loop {
        args.push(parse_type(parser)?);
        if parser.match_token(TokenKind::Comma).is_none() {
            break;
        }
    }

    // `Map<K, Vec<V>>` closes two lists with one token.
    parser.split_shift_right();
    parser.expect(TokenKind::Greater)?;
    Ok(args)
}

/// `[T: N]`
pub fn parse_array_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let open = parser.expect(TokenKind::OpenBracket)?;
    let element = parse_type(parser)?;

    parser.expect_error(TokenKind::Colon, "expected `:` and a size in array type")?;
    let size = parser.with_no_struct(false, |parser| parse_expr(parser, Precedence::Assignment))?;
    let close = parser.expect(TokenKind::CloseBracket)?;

    Ok(TypeExpr::new(
        TypeKind::Array {
            element: Box::new(element),
            size: Box::new(size),
        },
        open.span.to(&close.span),
    ))
}

/// `(T, U)`; a single parenthesised type without a comma is just that type.
pub fn parse_tuple_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let open = parser.expect(TokenKind::OpenParen)?;
    let (mut elements, saw_comma) = parse_type_list(parser, TokenKind::CloseParen)?;
    let close = parser.expect(TokenKind::CloseParen)?;
    let span = open.span.to(&close.span);

    if elements.len() == 1 && !saw_comma {
        if let Some(mut inner) = elements.pop() {
            inner.span = span;
            return Ok(inner);
        }
    }

    Ok(TypeExpr::new(TypeKind::Tuple(elements), span))
}

/// `fn(T, U) -> R`; the return type is optional.
pub fn parse_fn_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let start = parser.expect(TokenKind::Fn)?.span.start;

    parser.expect(TokenKind::OpenParen)?;
    let (params, _) = parse_type_list(parser, TokenKind::CloseParen)?;
    parser.expect(TokenKind::CloseParen)?;

    let return_type = if parser.match_token(TokenKind::Arrow).is_some() {
        Some(Box::new(parse_type(parser)?))
    } else {
        None
    };

    Ok(TypeExpr::new(
        TypeKind::Fn {
            params,
            return_type,
        },
        Span::new(start, parser.previous_end()),
    ))
}
