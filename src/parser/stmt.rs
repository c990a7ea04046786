use crate::{
    ast::{
        ast::{Node, Stmt},
        statements::{
            BlockBuilder, BlockStmt, BreakStmt, ContinueStmt, ElseBranch, EnumDeclStmt,
            EnumVariant, ExpressionStmt, Field, FnDeclStmt, ForStmt, IfStmt, ImplDeclStmt,
            ImportPath, ImportStmt, MatchArm, MatchStmt, ReturnStmt, StructDeclStmt,
            TraitDeclStmt, TraitMethod, TypeDeclStmt, VarDeclStmt, VariantKind, WhileStmt,
        },
        types::TypeExpr,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Loc, Span,
};

use super::{
    expr::parse_expr,
    lookups::{Precedence, STMT_LOOKUP},
    parser::{parse_stmt_recovering, Parser},
    types::parse_type,
};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = STMT_LOOKUP.get(&parser.current_token_kind()) {
        return handler(parser);
    }

    let expression = parse_expr(parser, Precedence::Assignment)?;

    Ok(Stmt::Expression(ExpressionStmt {
        span: *expression.get_span(),
        expression,
    }))
}

/// The body after a header: a brace block or an indented suite.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    if parser.check(TokenKind::OpenCurly) {
        parse_brace_block(parser)
    } else if parser.indented_suite_follows() {
        parse_indented_block(parser)
    } else {
        Err(parser.unexpected("expected `{` or an indented block"))
    }
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let block = if parser.check(TokenKind::OpenCurly) {
        parse_brace_block(parser)?
    } else {
        parse_indented_block(parser)?
    };

    Ok(Stmt::Block(block))
}

/// `{ stmt* }`. Layout tokens and `;` inside the braces only separate
/// statements.
pub fn parse_brace_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let open = parser.expect(TokenKind::OpenCurly)?;
    let mut builder = BlockBuilder::new(open.span.start);

    parser.with_no_struct(false, |parser| {
        loop {
            parser.skip_layout();
            if parser.check(TokenKind::CloseCurly) || parser.check(TokenKind::EOF) {
                break;
            }

            if let Some(stmt) = parse_stmt_recovering(parser) {
                builder.push(stmt);
            }
        }
        Ok(())
    })?;

    let close = parser.expect(TokenKind::CloseCurly)?;
    Ok(builder.finish(close.span.end))
}

/// `NEWLINE+ INDENT stmt* DEDENT`. A bare INDENT is accepted too, for a
/// stray indented line.
pub fn parse_indented_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    parser.skip_newlines();
    let indent = parser.expect_error(TokenKind::Indent, "expected an indented block")?;
    let mut builder = BlockBuilder::new(indent.span.start);

    loop {
        parser.skip_separators();
        if parser.check(TokenKind::Dedent) || parser.check(TokenKind::EOF) {
            break;
        }

        if let Some(stmt) = parse_stmt_recovering(parser) {
            builder.push(stmt);
        }
    }

    parser.expect_error(TokenKind::Dedent, "expected end of indented block")?;
    Ok(builder.finish(parser.previous_end()))
}

/// Parses the members of a declaration body, in braces or as an indented
/// suite. Members are separated by `,`, `;` or newlines.
fn parse_member_list<T>(
    parser: &mut Parser,
    mut parse_member: impl FnMut(&mut Parser) -> Result<T, Error>,
) -> Result<Vec<T>, Error> {
    let (close, braced) = if parser.check(TokenKind::OpenCurly) {
        parser.advance();
        (TokenKind::CloseCurly, true)
    } else if parser.indented_suite_follows() {
        parser.skip_newlines();
        parser.advance();
        (TokenKind::Dedent, false)
    } else {
        return Err(parser.unexpected("expected `{` or an indented block"));
    };

    let separators: &[TokenKind] = if braced {
        &[
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Newline,
            TokenKind::Indent,
            TokenKind::Dedent,
        ]
    } else {
        &[TokenKind::Comma, TokenKind::Semicolon, TokenKind::Newline]
    };

    let mut members = vec![];
    loop {
        while parser.current_token().is_one_of_many(separators) {
            parser.advance();
        }
        if parser.check(close) || parser.check(TokenKind::EOF) {
            break;
        }

        members.push(parse_member(parser)?);

        let ended = parser.previous_kind() == Some(TokenKind::CloseCurly)
            || parser.previous_kind() == Some(TokenKind::Dedent);
        if !ended && !parser.check(close) && !parser.current_token().is_one_of_many(separators) {
            return Err(parser.unexpected("expected `,` or newline between members"));
        }
    }

    parser.expect(close)?;
    Ok(members)
}

/// `<T, U>` after a declaration name; empty when absent.
fn parse_generic_params(parser: &mut Parser) -> Result<Vec<String>, Error> {
    let mut generics = vec![];
    if parser.match_token(TokenKind::Less).is_none() {
        return Ok(generics);
    }

    loop {
        generics.push(parser.expect_symbol("expected generic parameter name")?);
        if parser.match_token(TokenKind::Comma).is_none() {
            break;
        }
    }

    parser.expect(TokenKind::Greater)?;
    Ok(generics)
}

fn parse_field(parser: &mut Parser) -> Result<Field, Error> {
    let name = parser.expect_error(TokenKind::Symbol, "expected field name")?;
    parser.expect(TokenKind::Colon)?;
    let ty = parse_type(parser)?;

    Ok(Field {
        name: name.value().to_string(),
        span: Span::new(name.span.start, ty.span.end),
        ty,
    })
}

struct FnSignature {
    start: Loc,
    name: String,
    generics: Vec<String>,
    params: Vec<Field>,
    return_type: Option<TypeExpr>,
}

/// `fn name<T>(a: T, ...) -> R`
fn parse_fn_signature(parser: &mut Parser) -> Result<FnSignature, Error> {
    let start = parser.expect(TokenKind::Fn)?.span.start;
    let name = parser.expect_symbol("expected function name")?;
    let generics = parse_generic_params(parser)?;

    parser.expect(TokenKind::OpenParen)?;
    let mut params = Vec::new();
    while !parser.check(TokenKind::CloseParen) {
        params.push(parse_field(parser)?);

        if parser.match_token(TokenKind::Comma).is_none() {
            break;
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    let return_type = if parser.match_token(TokenKind::Arrow).is_some() {
        Some(parse_type(parser)?)
    } else {
        None
    };

    Ok(FnSignature {
        start,
        name,
        generics,
        params,
        return_type,
    })
}

fn parse_fn_decl(parser: &mut Parser) -> Result<FnDeclStmt, Error> {
    let signature = parse_fn_signature(parser)?;
    let body = parse_block(parser)?;

    Ok(FnDeclStmt {
        name: signature.name,
        generics: signature.generics,
        params: signature.params,
        return_type: signature.return_type,
        body,
        span: Span::new(signature.start, parser.previous_end()),
    })
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::FnDecl(parse_fn_decl(parser)?))
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.advance();
    let is_constant = start_token.kind == TokenKind::Const;

    let identifier = parser.expect_symbol("expected identifier during variable declaration")?;

    let explicit_type = if parser.match_token(TokenKind::Colon).is_some() {
        Some(parse_type(parser)?)
    } else {
        None
    };

    parser.expect_error(TokenKind::Assignment, "expected `=` in variable declaration")?;
    let assigned_value = parse_expr(parser, Precedence::Assignment)?;

    let decl = VarDeclStmt {
        identifier,
        is_constant,
        explicit_type,
        assigned_value,
        span: Span::new(start_token.span.start, parser.previous_end()),
    };

    if is_constant {
        Ok(Stmt::ConstDecl(decl))
    } else {
        Ok(Stmt::LetDecl(decl))
    }
}

pub fn parse_struct_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    let name = parser.expect_symbol("expected struct name")?;
    let generics = parse_generic_params(parser)?;
    let fields = parse_member_list(parser, parse_field)?;

    Ok(Stmt::StructDecl(StructDeclStmt {
        name,
        generics,
        fields,
        span: Span::new(start, parser.previous_end()),
    }))
}

fn parse_enum_variant(parser: &mut Parser) -> Result<EnumVariant, Error> {
    let name = parser.expect_error(TokenKind::Symbol, "expected variant name")?;

    let kind = if parser.match_token(TokenKind::OpenParen).is_some() {
        let mut types = vec![];
        while !parser.check(TokenKind::CloseParen) {
            types.push(parse_type(parser)?);
            if parser.match_token(TokenKind::Comma).is_none() {
                break;
            }
        }
        parser.expect(TokenKind::CloseParen)?;
        VariantKind::Tuple(types)
    } else if parser.check(TokenKind::OpenCurly) {
        VariantKind::Struct(parse_member_list(parser, parse_field)?)
    } else {
        VariantKind::Unit
    };

    Ok(EnumVariant {
        name: name.value().to_string(),
        kind,
        span: Span::new(name.span.start, parser.previous_end()),
    })
}

pub fn parse_enum_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    let name = parser.expect_symbol("expected enum name")?;
    let generics = parse_generic_params(parser)?;
    let variants = parse_member_list(parser, parse_enum_variant)?;

    Ok(Stmt::EnumDecl(EnumDeclStmt {
        name,
        generics,
        variants,
        span: Span::new(start, parser.previous_end()),
    }))
}

pub fn parse_type_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    let name = parser.expect_symbol("expected type name")?;
    let generics = parse_generic_params(parser)?;

    parser.expect_error(TokenKind::Assignment, "expected `=` in type declaration")?;
    let aliased_type = parse_type(parser)?;

    Ok(Stmt::TypeDecl(TypeDeclStmt {
        name,
        generics,
        aliased_type,
        span: Span::new(start, parser.previous_end()),
    }))
}

fn parse_trait_method(parser: &mut Parser) -> Result<TraitMethod, Error> {
    let signature = parse_fn_signature(parser)?;

    let default_body = if parser.check(TokenKind::OpenCurly) || parser.indented_suite_follows() {
        Some(parse_block(parser)?)
    } else {
        None
    };

    Ok(TraitMethod {
        name: signature.name,
        generics: signature.generics,
        params: signature.params,
        return_type: signature.return_type,
        default_body,
        span: Span::new(signature.start, parser.previous_end()),
    })
}

pub fn parse_trait_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    let name = parser.expect_symbol("expected trait name")?;
    let generics = parse_generic_params(parser)?;
    let methods = parse_member_list(parser, parse_trait_method)?;

    Ok(Stmt::TraitDecl(TraitDeclStmt {
        name,
        generics,
        methods,
        span: Span::new(start, parser.previous_end()),
    }))
}

/// `impl<T> Target { ... }` or `impl Trait for Target { ... }`
pub fn parse_impl_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    let generics = parse_generic_params(parser)?;

    let first = parse_type(parser)?;
    let (trait_type, target) = if parser.match_token(TokenKind::For).is_some() {
        (Some(first), parse_type(parser)?)
    } else {
        (None, first)
    };

    let methods = parse_member_list(parser, |parser| {
        if !parser.check(TokenKind::Fn) {
            return Err(parser.unexpected("expected `fn` inside impl block"));
        }
        parse_fn_decl(parser)
    })?;

    Ok(Stmt::ImplDecl(ImplDeclStmt {
        generics,
        trait_type,
        target,
        methods,
        span: Span::new(start, parser.previous_end()),
    }))
}

fn parse_if(parser: &mut Parser) -> Result<IfStmt, Error> {
    let start = parser.expect(TokenKind::If)?.span.start;

    let condition = parser.with_no_struct(true, |parser| parse_expr(parser, Precedence::Assignment))?;
    let then_body = parse_block(parser)?;

    let else_body = if parser.next_after_newlines_is(TokenKind::Else) {
        parser.skip_newlines();
        parser.advance();

        if parser.check(TokenKind::If) {
            Some(ElseBranch::If(Box::new(parse_if(parser)?)))
        } else {
            Some(ElseBranch::Block(parse_block(parser)?))
        }
    } else {
        None
    };

    Ok(IfStmt {
        condition,
        then_body,
        else_body,
        span: Span::new(start, parser.previous_end()),
    })
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::If(parse_if(parser)?))
}

fn parse_match_arm(parser: &mut Parser) -> Result<MatchArm, Error> {
    let start = parser.current_token().span.start;

    let is_default = parser.check(TokenKind::Symbol)
        && parser.current_token().value() == "_"
        && parser.peek(1).kind == TokenKind::FatArrow;
    let pattern = if is_default {
        parser.advance();
        None
    } else {
        Some(parse_expr(parser, Precedence::Assignment)?)
    };

    parser.expect(TokenKind::FatArrow)?;

    let body = if parser.check(TokenKind::OpenCurly) || parser.indented_suite_follows() {
        parse_block(parser)?
    } else {
        let stmt = parse_stmt(parser)?;
        let span = *stmt.get_span();
        let mut builder = BlockBuilder::new(span.start);
        builder.push(stmt);
        builder.finish(span.end)
    };

    Ok(MatchArm {
        pattern,
        body,
        span: Span::new(start, parser.previous_end()),
    })
}

pub fn parse_match_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let scrutinee = parser.with_no_struct(true, |parser| parse_expr(parser, Precedence::Assignment))?;
    let arms = parser.with_no_struct(false, |parser| parse_member_list(parser, parse_match_arm))?;

    Ok(Stmt::Match(MatchStmt {
        scrutinee,
        arms,
        span: Span::new(start, parser.previous_end()),
    }))
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let binder = parser.expect_symbol("expected loop variable after `for`")?;
    parser.expect(TokenKind::In)?;
    let iterable = parser.with_no_struct(true, |parser| parse_expr(parser, Precedence::Assignment))?;
    let body = parse_block(parser)?;

    Ok(Stmt::For(ForStmt {
        binder,
        iterable,
        body,
        span: Span::new(start, parser.previous_end()),
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let condition = parser.with_no_struct(true, |parser| parse_expr(parser, Precedence::Assignment))?;
    let body = parse_block(parser)?;

    Ok(Stmt::While(WhileStmt {
        condition,
        body,
        span: Span::new(start, parser.previous_end()),
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    // A match arm body ends at `,` as well.
    let value = if parser.at_statement_end() || parser.check(TokenKind::Comma) {
        None
    } else {
        Some(parse_expr(parser, Precedence::Assignment)?)
    };

    Ok(Stmt::Return(ReturnStmt {
        value,
        span: Span::new(start, parser.previous_end()),
    }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let span = parser.advance().span;
    Ok(Stmt::Break(BreakStmt { span }))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let span = parser.advance().span;
    Ok(Stmt::Continue(ContinueStmt { span }))
}

/// `a.b.c` or `"path"`
fn parse_import_path(parser: &mut Parser) -> Result<ImportPath, Error> {
    if let Some(file) = parser.match_token(TokenKind::String) {
        return Ok(ImportPath::File(file.value().to_string()));
    }

    let mut segments = vec![parser.expect_symbol("expected module path")?];
    while parser.match_token(TokenKind::Dot).is_some() {
        segments.push(parser.expect_symbol("expected module name after `.`")?);
    }

    Ok(ImportPath::Module(segments))
}

pub fn parse_import_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    let path = parse_import_path(parser)?;

    let alias = if parser.match_token(TokenKind::As).is_some() {
        Some(parser.expect_symbol("expected alias after `as`")?)
    } else {
        None
    };

    Ok(Stmt::Import(ImportStmt {
        names: vec![],
        path,
        alias,
        span: Span::new(start, parser.previous_end()),
    }))
}

/// `from a.b import x, y`
pub fn parse_from_import_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    let path = parse_import_path(parser)?;
    parser.expect(TokenKind::Import)?;

    let mut names = vec![parser.expect_symbol("expected name to import")?];
    while parser.match_token(TokenKind::Comma).is_some() {
        names.push(parser.expect_symbol("expected name to import")?);
    }

    Ok(Stmt::Import(ImportStmt {
        names,
        path,
        alias: None,
        span: Span::new(start, parser.previous_end()),
    }))
}
