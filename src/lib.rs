#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::{
    ast::ast::Program,
    errors::errors::{Diagnostic, Error, ErrorTip},
    lexer::lexer::{Lexer, LexerOptions},
    parser::parser::parse,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A 1-based position in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Loc {
    pub line: u32,
    pub col: u32,
}

impl Loc {
    pub fn new(line: u32, col: u32) -> Self {
        Loc { line, col }
    }

    pub fn start() -> Self {
        Loc { line: 1, col: 1 }
    }
}

impl Display for Loc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Half-open extent `[start, end)` of a token or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Loc,
    pub end: Loc,
}

impl Span {
    pub fn new(start: Loc, end: Loc) -> Self {
        Span { start, end }
    }

    /// Joins two spans into one running from `self.start` to `other.end`.
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start,
            end: other.end,
        }
    }

    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Output of a full front-end pass over one source unit.
#[derive(Debug)]
pub struct ParseOutput {
    pub program: Program,
    /// Diagnostics in discovery order: every lexical error, then the
    /// syntax errors in the order the parser hit them.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The diagnostics sorted by position. Errors at the same location keep
    /// their discovery order.
    pub fn diagnostics_by_position(&self) -> Vec<&Diagnostic> {
        let mut sorted: Vec<&Diagnostic> = self.diagnostics.iter().collect();
        sorted.sort_by_key(|error| *error.get_position());
        sorted
    }
}

/// Lexes and parses `source`, collecting every diagnostic along the way.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse_source(source: &str) -> ParseOutput {
    let (tokens, mut diagnostics) = Lexer::new(source, LexerOptions::default()).tokenize();
    let (program, syntax_errors) = parse(tokens);

    diagnostics.extend(syntax_errors);

    ParseOutput {
        program,
        diagnostics,
    }
}

/// Returns the text of line `loc.line` (without its newline) and the
/// 0-based character offset of `loc.col` inside it.
pub fn get_line_at_position(source: &str, loc: Loc) -> Option<(String, usize)> {
    let line = source.split('\n').nth(loc.line.checked_sub(1)? as usize)?;
    let line = line.strip_suffix('\r').unwrap_or(line);

    Some((line.to_string(), loc.col.saturating_sub(1) as usize))
}

/// Formats an error the way the compiler prints it:
///
/// ```text
/// Error: UnexpectedToken (expected `=`, found `42`)
/// -> main.qt
///    |
///  2 | let x 42
///    | ------^
/// ```
pub fn display_error(error: &Error, source: &str, file: Option<&str>) -> String {
    display_error_with_tab_width(error, source, file, LexerOptions::default().tab_width)
}

/// [`display_error`] for source lexed with a custom `tab_width`. Tabs are
/// expanded so the caret lines up with the error column.
pub fn display_error_with_tab_width(
    error: &Error,
    source: &str,
    file: Option<&str>,
    tab_width: u32,
) -> String {
    let position = error.get_position();
    let line_str = position.line.to_string();
    let padding = line_str.len() + 2;

    let mut out = String::new();
    match error.get_tip() {
        ErrorTip::None => out.push_str(&format!("Error: {}\n", error.get_error_name())),
        tip => out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), tip)),
    }
    out.push_str(&format!("-> {}\n", file.unwrap_or("shell")));
    out.push_str(&format!("{:>padding$}\n", "|"));

    if let Some((line_text, line_pos)) = get_line_at_position(source, *position) {
        let line_text = line_text.replace('\t', &" ".repeat(tab_width as usize));
        let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
        out.push_str(&format!("{} | {}\n", line_str, line_text_removed.trim_end()));

        let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
        out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    }

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ' || *c == '\t').count();

    (string.chars().skip(start).collect(), start)
}
