//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the `Parser` cursor and the `parse` entry point.
//! Statements are parsed by recursive descent in `stmt.rs`, expressions by
//! the precedence-climbing engine in `expr.rs`, both dispatching through the
//! static tables in `lookups.rs`.
//!
//! Errors are plain `Result`s propagated with `?` up to the nearest
//! statement loop, which records them and resynchronises (panic mode).

use crate::{
    ast::{ast::Program, ast::Stmt},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Loc, Span, MK_TOKEN,
};

use super::{lookups::STMT_LOOKUP, stmt::parse_stmt};

/// The parser state for one token stream.
///
/// Holds the tokens, the cursor position, the diagnostics recorded so far and
/// the small amount of context the grammar needs (panic mode and whether a
/// `{` may start a struct literal).
pub struct Parser {
    /// The list of tokens to parse, always terminated by `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Span of the last consumed token
    previous_span: Span,
    previous_kind: Option<TokenKind>,
    /// Number of `{` and INDENT tokens consumed but not yet closed
    depth: usize,
    /// Set after an error until the next statement boundary
    panic_mode: bool,
    /// Set while parsing `if`/`while`/`for`/`match` headers
    no_struct: bool,
    errors: Vec<Error>,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens.last().map(|token| token.span.end).unwrap_or(Loc::start());
            tokens.push(MK_TOKEN!(TokenKind::EOF, Span::new(end, end)));
        }

        let start = tokens[0].span.start;
        Parser {
            tokens,
            pos: 0,
            previous_span: Span::new(start, start),
            previous_kind: None,
            depth: 0,
            panic_mode: false,
            no_struct: false,
            errors: vec![],
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Looks `offset` tokens ahead, saturating at `EOF`.
    pub fn peek(&self, offset: usize) -> &Token {
        let index = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Advances to the next token and returns the consumed one. The cursor
    /// never moves past `EOF`.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();

        match token.kind {
            TokenKind::EOF => return token,
            TokenKind::OpenCurly | TokenKind::Indent => self.depth += 1,
            TokenKind::CloseCurly | TokenKind::Dedent => {
                self.depth = self.depth.saturating_sub(1)
            }
            _ => {}
        }

        self.pos += 1;
        self.previous_span = token.span;
        self.previous_kind = Some(token.kind);
        token
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_token_kind() == kind
    }

    /// Consumes the current token only if it has the given kind.
    pub fn match_token(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Expects a token of the specified kind with the default error.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.check(expected_kind) {
            return Ok(self.advance());
        }

        let token = self.current_token();
        Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.describe(),
                message: format!("expected `{}`", expected_kind),
            },
            token.span.start,
        ))
    }

    /// Expects a token of the specified kind, failing with `message`.
    pub fn expect_error(&mut self, expected_kind: TokenKind, message: &str) -> Result<Token, Error> {
        if self.check(expected_kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(message))
        }
    }

    /// Builds an error located at the current token.
    pub fn unexpected(&self, message: &str) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.describe(),
                message: message.to_string(),
            },
            token.span.start,
        )
    }

    /// Expects an identifier and returns its text.
    pub fn expect_symbol(&mut self, message: &str) -> Result<String, Error> {
        let token = self.expect_error(TokenKind::Symbol, message)?;
        Ok(token.value().to_string())
    }

    pub fn previous_span(&self) -> Span {
        self.previous_span
    }

    /// End of the last consumed token; node spans end here.
    pub fn previous_end(&self) -> Loc {
        self.previous_span.end
    }

    pub fn previous_kind(&self) -> Option<TokenKind> {
        self.previous_kind
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn skip_newlines(&mut self) {
        while self.check(TokenKind::Newline) {
            self.advance();
        }
    }

    /// Skips statement separators (`NEWLINE` and `;`).
    pub fn skip_separators(&mut self) {
        while self.check(TokenKind::Newline) || self.check(TokenKind::Semicolon) {
            self.advance();
        }
    }

    /// Inside braces, layout tokens are only separators.
    pub fn skip_layout(&mut self) {
        while self.current_token().is_one_of_many(&[
            TokenKind::Newline,
            TokenKind::Semicolon,
            TokenKind::Indent,
            TokenKind::Dedent,
        ]) {
            self.advance();
        }
    }

    /// Whether the cursor sits on `NEWLINE+ INDENT`, the start of an
    /// indented suite.
    pub fn indented_suite_follows(&self) -> bool {
        let mut offset = 0;
        while self.peek(offset).kind == TokenKind::Newline {
            offset += 1;
        }
        offset > 0 && self.peek(offset).kind == TokenKind::Indent
    }

    /// Whether `kind` is the next token once newlines are skipped.
    pub fn next_after_newlines_is(&self, kind: TokenKind) -> bool {
        let mut offset = 0;
        while self.peek(offset).kind == TokenKind::Newline {
            offset += 1;
        }
        self.peek(offset).kind == kind
    }

    /// A statement is complete when it ended with a block or is followed by
    /// a separator or a closing token. A token on a later line also ends it,
    /// since an unclosed `(` or `[` leaves the lexer without layout tokens.
    pub fn at_statement_end(&self) -> bool {
        if matches!(
            self.previous_kind,
            Some(TokenKind::CloseCurly) | Some(TokenKind::Dedent)
        ) {
            return true;
        }

        if self.previous_kind.is_some()
            && self.current_token().span.start.line > self.previous_end().line
        {
            return true;
        }

        self.current_token().is_one_of_many(&[
            TokenKind::Newline,
            TokenKind::Semicolon,
            TokenKind::CloseCurly,
            TokenKind::Dedent,
            TokenKind::EOF,
        ])
    }

    pub fn no_struct(&self) -> bool {
        self.no_struct
    }

    /// Runs `parse` with struct literals enabled or disabled, restoring the
    /// previous setting afterwards.
    pub fn with_no_struct<T>(
        &mut self,
        no_struct: bool,
        parse: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let previous = std::mem::replace(&mut self.no_struct, no_struct);
        let result = parse(self);
        self.no_struct = previous;
        result
    }

    /// Replaces a `>>` at the cursor with two `>` tokens, so nested generic
    /// argument lists can each close on one.
    pub fn split_shift_right(&mut self) {
        if !self.check(TokenKind::ShiftRight) {
            return;
        }

        let span = self.current_token().span;
        let middle = Loc::new(span.start.line, span.start.col + 1);
        self.tokens[self.pos] = MK_TOKEN!(TokenKind::Greater, Span::new(span.start, middle));
        self.tokens
            .insert(self.pos + 1, MK_TOKEN!(TokenKind::Greater, Span::new(middle, span.end)));
    }

    pub fn in_panic_mode(&self) -> bool {
        self.panic_mode
    }

    /// Records a diagnostic unless one is already pending for this statement
    /// or the lexer already reported the offending token, then enters panic
    /// mode.
    pub fn record(&mut self, error: Error) {
        if self.panic_mode || self.check(TokenKind::Error) {
            tracing::trace!(%error, "suppressed diagnostic");
        } else {
            tracing::debug!(%error, "recorded diagnostic");
            self.errors.push(error);
        }
        self.panic_mode = true;
    }

    /// Skips to the next statement boundary of the statement that started at
    /// `start` with nesting `depth`, and leaves panic mode.
    ///
    /// A `NEWLINE` or `;` boundary is consumed; a statement keyword, `}`,
    /// DEDENT or `EOF` is left for the enclosing loop.
    pub fn synchronize(&mut self, start: usize, depth: usize) {
        let from = self.pos;
        if self.pos == start {
            self.advance();
        }

        while !self.check(TokenKind::EOF) {
            let kind = self.current_token_kind();

            if self.depth <= depth {
                match kind {
                    TokenKind::Newline | TokenKind::Semicolon => {
                        self.advance();
                        break;
                    }
                    TokenKind::CloseCurly | TokenKind::Dedent => break,
                    kind if kind.is_keyword() && STMT_LOOKUP.contains_key(&kind) => break,
                    _ => {}
                }
            }

            self.advance();
        }

        tracing::trace!(skipped = self.pos - from, "synchronized");
        self.panic_mode = false;
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }
}

/// Parses one statement and checks that it is properly terminated,
/// recording and recovering from any error on the way.
///
/// Returns `None` when the statement itself could not be built.
pub fn parse_stmt_recovering(parser: &mut Parser) -> Option<Stmt> {
    let start = parser.position();
    let depth = parser.depth();

    let stmt = match parse_stmt(parser) {
        Ok(stmt) => stmt,
        Err(error) => {
            parser.record(error);
            parser.synchronize(start, depth);
            return None;
        }
    };

    if !parser.at_statement_end() {
        let error = parser.unexpected("expected newline or `;` after statement");
        parser.record(error);
        parser.synchronize(start, depth);
    }

    Some(stmt)
}

/// Parses a stream of tokens into a `Program`.
///
/// This is the main entry point for parsing. It never fails: malformed
/// statements are reported in the returned diagnostics and skipped, and
/// every well-formed statement still ends up in the program.
#[tracing::instrument(skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: Vec<Token>) -> (Program, Vec<Error>) {
    let mut parser = Parser::new(tokens);
    let start = parser.current_token().span.start;

    let mut body = vec![];
    loop {
        parser.skip_separators();
        if parser.check(TokenKind::EOF) {
            break;
        }

        if let Some(stmt) = parse_stmt_recovering(&mut parser) {
            body.push(stmt);
        }
    }

    let end = parser.current_token().span.end;
    tracing::debug!(
        statements = body.len(),
        errors = parser.errors.len(),
        "parsed program"
    );

    let program = Program {
        body,
        span: Span::new(start, end),
    };
    (program, parser.errors)
}
