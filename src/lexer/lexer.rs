use crate::{
    errors::errors::{Error, ErrorImpl},
    Loc, Span, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Knobs for a single lexing pass.
#[derive(Debug, Clone, Copy)]
pub struct LexerOptions {
    /// Columns a tab advances by; also its weight when measuring indentation.
    pub tab_width: u32,
    /// Lets `?` and `!` continue a symbol (`empty?`, `push!`). A suffix
    /// directly followed by `=` is still lexed as an operator.
    pub symbol_suffixes: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        LexerOptions {
            tab_width: 4,
            symbol_suffixes: false,
        }
    }
}

pub struct Lexer {
    source: Vec<char>,
    pos: usize,
    line: u32,
    col: u32,
    options: LexerOptions,
    indent_stack: Vec<u32>,
    /// Open `(`, `[` and `{` delimiters, innermost last.
    delimiters: Vec<TokenKind>,
    at_line_start: bool,
    tokens: Vec<Token>,
    errors: Vec<Error>,
}

impl Lexer {
    pub fn new(source: &str, options: LexerOptions) -> Lexer {
        Lexer {
            source: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
            options,
            indent_stack: vec![0],
            delimiters: vec![],
            at_line_start: true,
            tokens: vec![],
            errors: vec![],
        }
    }

    /// Consumes the lexer, returning the token stream (always terminated by
    /// `EOF`) and the lexical errors found along the way.
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<Error>) {
        while !self.at_eof() {
            if self.at_line_start {
                self.handle_indentation();
            } else {
                self.scan_token();
            }
        }

        let end = self.loc();
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.tokens.push(MK_TOKEN!(TokenKind::Dedent, Span::new(end, end)));
        }
        self.tokens.push(MK_TOKEN!(TokenKind::EOF, Span::new(end, end)));

        (self.tokens, self.errors)
    }

    pub fn at(&self) -> Option<char> {
        self.peek(0)
    }

    pub fn peek(&self, offset: usize) -> Option<char> {
        self.source.get(self.pos + offset).copied()
    }

    pub fn advance(&mut self) -> Option<char> {
        let c = self.at()?;
        self.pos += 1;

        match c {
            '\n' => {
                self.line += 1;
                self.col = 1;
            }
            '\t' => self.col += self.options.tab_width,
            _ => self.col += 1,
        }

        Some(c)
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn loc(&self) -> Loc {
        Loc::new(self.line, self.col)
    }

    fn push(&mut self, kind: TokenKind, lexeme: Option<String>, start: Loc) {
        let span = Span::new(start, self.loc());
        self.tokens.push(MK_TOKEN!(kind, lexeme, span));
    }

    fn error(&mut self, error_impl: ErrorImpl, start: Loc) {
        let error = Error::new(error_impl, start);
        self.push(TokenKind::Error, Some(error.message()), start);
        self.errors.push(error);
    }

    /// Layout is only significant outside `(...)` and `[...]`.
    fn layout_active(&self) -> bool {
        !matches!(
            self.delimiters.last(),
            Some(TokenKind::OpenParen) | Some(TokenKind::OpenBracket)
        )
    }

    fn handle_indentation(&mut self) {
        self.at_line_start = false;

        let start = self.loc();
        let mut depth = 0;
        while let Some(c) = self.at() {
            match c {
                ' ' => depth += 1,
                '\t' => depth += self.options.tab_width,
                _ => break,
            }
            self.advance();
        }

        // Blank and comment-only lines leave the indent stack alone.
        match (self.at(), self.peek(1)) {
            (None, _) | (Some('\n'), _) | (Some('\r'), _) | (Some('#'), _) => return,
            (Some('/'), Some('/')) => return,
            _ => {}
        }

        let here = self.loc();
        let top = self.indent_stack.last().copied().unwrap_or(0);

        if depth > top {
            self.indent_stack.push(depth);
            self.tokens.push(MK_TOKEN!(TokenKind::Indent, Span::new(start, here)));
            return;
        }

        while self.indent_stack.len() > 1 && depth < self.indent_stack.last().copied().unwrap_or(0) {
            self.indent_stack.pop();
            self.tokens.push(MK_TOKEN!(TokenKind::Dedent, Span::new(here, here)));
        }
    }

    fn scan_token(&mut self) {
        let start = self.loc();
        let Some(c) = self.advance() else {
            return;
        };

        match c {
            ' ' | '\t' | '\r' => {}
            '\n' => {
                if self.layout_active() {
                    self.push(TokenKind::Newline, None, start);
                    self.at_line_start = true;
                }
            }
            '#' => self.skip_comment(),
            '/' if self.at() == Some('/') => self.skip_comment(),

            '(' => self.open_delimiter(TokenKind::OpenParen, start),
            '[' => self.open_delimiter(TokenKind::OpenBracket, start),
            '{' => self.open_delimiter(TokenKind::OpenCurly, start),
            ')' => self.close_delimiter(TokenKind::OpenParen, TokenKind::CloseParen, start),
            ']' => self.close_delimiter(TokenKind::OpenBracket, TokenKind::CloseBracket, start),
            '}' => self.close_delimiter(TokenKind::OpenCurly, TokenKind::CloseCurly, start),
            ',' => self.push(TokenKind::Comma, None, start),
            ';' => self.push(TokenKind::Semicolon, None, start),

            ':' => self.munch(start, TokenKind::Colon, &[(':', TokenKind::ColonColon)]),
            '.' => {
                if self.at() == Some('.') && self.peek(1) == Some('.') {
                    self.advance();
                    self.advance();
                    self.push(TokenKind::Ellipsis, None, start);
                } else {
                    self.push(TokenKind::Dot, None, start);
                }
            }
            '=' => self.munch(
                start,
                TokenKind::Assignment,
                &[('=', TokenKind::Equals), ('>', TokenKind::FatArrow)],
            ),
            '+' => self.munch(start, TokenKind::Plus, &[('=', TokenKind::PlusEquals)]),
            '-' => self.munch(
                start,
                TokenKind::Dash,
                &[('=', TokenKind::MinusEquals), ('>', TokenKind::Arrow)],
            ),
            '*' => self.munch(start, TokenKind::Star, &[('=', TokenKind::StarEquals)]),
            '/' => self.munch(start, TokenKind::Slash, &[('=', TokenKind::SlashEquals)]),
            '%' => self.munch(start, TokenKind::Percent, &[('=', TokenKind::PercentEquals)]),
            '&' => self.munch(
                start,
                TokenKind::Amper,
                &[('&', TokenKind::And), ('=', TokenKind::AmperEquals)],
            ),
            '|' => self.munch(
                start,
                TokenKind::Pipe,
                &[('|', TokenKind::Or), ('=', TokenKind::PipeEquals)],
            ),
            '^' => self.push(TokenKind::Caret, None, start),
            '~' => self.push(TokenKind::Tilde, None, start),
            '!' => self.munch(start, TokenKind::Not, &[('=', TokenKind::NotEquals)]),
            '<' => self.munch(
                start,
                TokenKind::Less,
                &[('=', TokenKind::LessEquals), ('<', TokenKind::ShiftLeft)],
            ),
            '>' => self.munch(
                start,
                TokenKind::Greater,
                &[('=', TokenKind::GreaterEquals), ('>', TokenKind::ShiftRight)],
            ),

            '"' => self.lex_string(start),
            '\'' => self.lex_char(start),
            c if c.is_ascii_alphabetic() || c == '_' => self.lex_symbol(c, start),
            c if c.is_ascii_digit() => self.lex_number(c, start),
            c => self.error(ErrorImpl::UnrecognisedCharacter { character: c }, start),
        }
    }

    /// Skips to the end of the line, leaving the newline in place.
    fn skip_comment(&mut self) {
        while let Some(c) = self.at() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Emits the first two-character operator whose second character is next
    /// in the input, falling back to the single-character token.
    fn munch(&mut self, start: Loc, single: TokenKind, longer: &[(char, TokenKind)]) {
        for (next, kind) in longer {
            if self.at() == Some(*next) {
                self.advance();
                self.push(*kind, None, start);
                return;
            }
        }
        self.push(single, None, start);
    }

    fn open_delimiter(&mut self, kind: TokenKind, start: Loc) {
        self.delimiters.push(kind);
        self.push(kind, None, start);
    }

    fn close_delimiter(&mut self, opener: TokenKind, kind: TokenKind, start: Loc) {
        // Unbalanced closers are left for the parser to report.
        if let Some(index) = self.delimiters.iter().rposition(|open| *open == opener) {
            self.delimiters.truncate(index);
        }
        self.push(kind, None, start);
    }

    fn lex_symbol(&mut self, first: char, start: Loc) {
        let mut symbol = String::from(first);

        while let Some(c) = self.at() {
            let suffix = self.options.symbol_suffixes
                && (c == '?' || c == '!')
                && self.peek(1) != Some('=');

            if c.is_ascii_alphanumeric() || c == '_' || suffix {
                symbol.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let kind = RESERVED_LOOKUP
            .get(symbol.as_str())
            .copied()
            .unwrap_or(TokenKind::Symbol);
        self.push(kind, Some(symbol), start);
    }

    fn lex_number(&mut self, first: char, start: Loc) {
        let mut number = String::from(first);
        self.take_digits(&mut number);

        let is_float = self.at() == Some('.') && self.peek(1).is_some_and(|c| c.is_ascii_digit());
        if is_float {
            number.push('.');
            self.advance();
            self.take_digits(&mut number);
            self.push(TokenKind::Float, Some(number), start);
        } else {
            self.push(TokenKind::Int, Some(number), start);
        }
    }

    fn take_digits(&mut self, into: &mut String) {
        while let Some(c) = self.at().filter(|c| c.is_ascii_digit()) {
            into.push(c);
            self.advance();
        }
    }

    /// Decodes one escape sequence; the backslash is already consumed.
    fn escape(&mut self, into: &mut String) -> bool {
        let Some(c) = self.advance() else {
            return false;
        };

        match c {
            'n' => into.push('\n'),
            't' => into.push('\t'),
            'r' => into.push('\r'),
            '0' => into.push('\0'),
            '\\' => into.push('\\'),
            '"' => into.push('"'),
            '\'' => into.push('\''),
            other => {
                into.push('\\');
                into.push(other);
            }
        }
        true
    }

    fn lex_string(&mut self, start: Loc) {
        let mut value = String::new();

        loop {
            match self.advance() {
                None => return self.error(ErrorImpl::UnterminatedString, start),
                Some('"') => break,
                Some('\\') => {
                    if !self.escape(&mut value) {
                        return self.error(ErrorImpl::UnterminatedString, start);
                    }
                }
                Some(c) => value.push(c),
            }
        }

        self.push(TokenKind::String, Some(value), start);
    }

    fn lex_char(&mut self, start: Loc) {
        let mut value = String::new();

        match self.advance() {
            None | Some('\n') => {
                let reason = String::from("unterminated char literal");
                return self.error(ErrorImpl::InvalidCharLiteral { reason }, start);
            }
            Some('\'') => {
                let reason = String::from("empty char literal");
                return self.error(ErrorImpl::InvalidCharLiteral { reason }, start);
            }
            Some('\\') => {
                self.escape(&mut value);
            }
            Some(c) => value.push(c),
        }

        if self.at() != Some('\'') {
            let reason = String::from("expected closing `'`");
            return self.error(ErrorImpl::InvalidCharLiteral { reason }, start);
        }
        self.advance();

        // Unknown escapes keep their backslash, which is two characters.
        if value.chars().count() == 1 {
            self.push(TokenKind::Char, Some(value), start);
        } else {
            let reason = format!("unknown escape sequence `{}`", value);
            self.error(ErrorImpl::InvalidCharLiteral { reason }, start);
        }
    }
}

/// Tokenizes `source` with default options. Lexical errors show up as
/// `TokenKind::Error` tokens whose lexeme is the diagnostic message.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn tokenize(source: &str) -> Vec<Token> {
    let (tokens, errors) = Lexer::new(source, LexerOptions::default()).tokenize();
    tracing::debug!(tokens = tokens.len(), errors = errors.len(), "tokenized source");
    tokens
}
