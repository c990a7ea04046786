use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("fn", TokenKind::Fn);
        map.insert("struct", TokenKind::Struct);
        map.insert("enum", TokenKind::Enum);
        map.insert("trait", TokenKind::Trait);
        map.insert("impl", TokenKind::Impl);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("match", TokenKind::Match);
        map.insert("return", TokenKind::Return);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("const", TokenKind::Const);
        map.insert("let", TokenKind::Let);
        map.insert("type", TokenKind::Type);
        map.insert("import", TokenKind::Import);
        map.insert("from", TokenKind::From);
        map.insert("as", TokenKind::As);
        map.insert("in", TokenKind::In);
        map.insert("true", TokenKind::Bool);
        map.insert("false", TokenKind::Bool);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Error,

    // Layout
    Newline,
    Indent,
    Dedent,

    // Literals
    Symbol,
    Int,
    Float,
    String,
    Char,
    Bool,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    FatArrow,   // =>
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    ShiftLeft,
    Greater,
    GreaterEquals,
    ShiftRight,

    Or,          // ||
    Pipe,        // |
    PipeEquals,  // |=
    And,         // &&
    Amper,       // &
    AmperEquals, // &=
    Caret,       // ^
    Tilde,       // ~

    Dot,
    Ellipsis,
    Semicolon,
    Colon,
    ColonColon,
    Comma,
    Arrow,

    PlusEquals,
    MinusEquals,
    SlashEquals,
    StarEquals,
    PercentEquals,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Fn,
    Struct,
    Enum,
    Trait,
    Impl,
    If,
    Else,
    Match,
    Return,
    While,
    For,
    Break,
    Continue,
    Const,
    Let,
    Type,
    Import,
    From,
    As,
    In,
}

impl TokenKind {
    /// Source text of fixed tokens; `None` for literals and layout.
    pub fn symbol(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Assignment => "=",
            TokenKind::Equals => "==",
            TokenKind::FatArrow => "=>",
            TokenKind::Not => "!",
            TokenKind::NotEquals => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEquals => "<=",
            TokenKind::ShiftLeft => "<<",
            TokenKind::Greater => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::ShiftRight => ">>",
            TokenKind::Or => "||",
            TokenKind::Pipe => "|",
            TokenKind::PipeEquals => "|=",
            TokenKind::And => "&&",
            TokenKind::Amper => "&",
            TokenKind::AmperEquals => "&=",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            TokenKind::Dot => ".",
            TokenKind::Ellipsis => "...",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::ColonColon => "::",
            TokenKind::Comma => ",",
            TokenKind::Arrow => "->",
            TokenKind::PlusEquals => "+=",
            TokenKind::MinusEquals => "-=",
            TokenKind::SlashEquals => "/=",
            TokenKind::StarEquals => "*=",
            TokenKind::PercentEquals => "%=",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Percent => "%",
            TokenKind::Fn => "fn",
            TokenKind::Struct => "struct",
            TokenKind::Enum => "enum",
            TokenKind::Trait => "trait",
            TokenKind::Impl => "impl",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Match => "match",
            TokenKind::Return => "return",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Const => "const",
            TokenKind::Let => "let",
            TokenKind::Type => "type",
            TokenKind::Import => "import",
            TokenKind::From => "from",
            TokenKind::As => "as",
            TokenKind::In => "in",
            _ => return None,
        };
        Some(text)
    }

    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Fn
                | TokenKind::Struct
                | TokenKind::Enum
                | TokenKind::Trait
                | TokenKind::Impl
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::Match
                | TokenKind::Return
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Const
                | TokenKind::Let
                | TokenKind::Type
                | TokenKind::Import
                | TokenKind::From
                | TokenKind::As
                | TokenKind::In
        )
    }

    pub fn is_layout(&self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.symbol() {
            Some(symbol) => write!(f, "{}", symbol),
            None => write!(f, "{:?}", self),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Identifier/keyword text, decoded literal value, or the diagnostic
    /// message of an `Error` token. `None` for punctuation and layout.
    pub lexeme: Option<String>,
    pub span: Span,
}

impl Token {
    pub fn value(&self) -> &str {
        self.lexeme.as_deref().unwrap_or("")
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// What the token looked like in the source, for diagnostics.
    pub fn describe(&self) -> String {
        match (&self.kind, &self.lexeme) {
            (TokenKind::EOF, _) => String::from("end of file"),
            (TokenKind::Newline, _) => String::from("newline"),
            (TokenKind::Indent, _) => String::from("indent"),
            (TokenKind::Dedent, _) => String::from("dedent"),
            (TokenKind::String, Some(value)) => format!("\"{}\"", value),
            (TokenKind::Char, Some(value)) => format!("'{}'", value),
            (TokenKind::Error, _) => String::from("invalid token"),
            (_, Some(value)) => value.clone(),
            (kind, None) => kind.to_string(),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.lexeme {
            Some(lexeme) => write!(f, "{:?}({}) at {}", self.kind, lexeme, self.span.start),
            None => write!(f, "{:?} at {}", self.kind, self.span.start),
        }
    }
}
