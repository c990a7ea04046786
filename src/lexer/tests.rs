//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (integers and floats)
//! - String and char literals with escape sequences
//! - Operators and punctuation, including maximal munch
//! - Indentation and layout tokens
//! - Error cases

use super::{
    lexer::{tokenize, Lexer, LexerOptions},
    tokens::TokenKind,
};
use crate::Loc;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).iter().map(|token| token.kind).collect()
}

fn count(source: &str, kind: TokenKind) -> usize {
    tokenize(source).iter().filter(|token| token.kind == kind).count()
}

#[test]
fn test_tokenize_keywords() {
    let source = "fn struct enum trait impl if else match return while for break continue const let type import from as in";
    let tokens = tokenize(source);

    assert_eq!(tokens[0].kind, TokenKind::Fn);
    assert_eq!(tokens[1].kind, TokenKind::Struct);
    assert_eq!(tokens[2].kind, TokenKind::Enum);
    assert_eq!(tokens[3].kind, TokenKind::Trait);
    assert_eq!(tokens[4].kind, TokenKind::Impl);
    assert_eq!(tokens[5].kind, TokenKind::If);
    assert_eq!(tokens[6].kind, TokenKind::Else);
    assert_eq!(tokens[7].kind, TokenKind::Match);
    assert_eq!(tokens[8].kind, TokenKind::Return);
    assert_eq!(tokens[9].kind, TokenKind::While);
    assert_eq!(tokens[10].kind, TokenKind::For);
    assert_eq!(tokens[11].kind, TokenKind::Break);
    assert_eq!(tokens[12].kind, TokenKind::Continue);
    assert_eq!(tokens[13].kind, TokenKind::Const);
    assert_eq!(tokens[14].kind, TokenKind::Let);
    assert_eq!(tokens[15].kind, TokenKind::Type);
    assert_eq!(tokens[16].kind, TokenKind::Import);
    assert_eq!(tokens[17].kind, TokenKind::From);
    assert_eq!(tokens[18].kind, TokenKind::As);
    assert_eq!(tokens[19].kind, TokenKind::In);
    assert_eq!(tokens[20].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar baz_123 _underscore CamelCase");

    assert_eq!(tokens[0].kind, TokenKind::Symbol);
    assert_eq!(tokens[0].value(), "foo");
    assert_eq!(tokens[1].value(), "bar");
    assert_eq!(tokens[2].value(), "baz_123");
    assert_eq!(tokens[3].value(), "_underscore");
    assert_eq!(tokens[4].kind, TokenKind::Symbol);
    assert_eq!(tokens[4].value(), "CamelCase");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_booleans() {
    let tokens = tokenize("true false truthy");

    assert_eq!(tokens[0].kind, TokenKind::Bool);
    assert_eq!(tokens[0].value(), "true");
    assert_eq!(tokens[1].kind, TokenKind::Bool);
    assert_eq!(tokens[1].value(), "false");
    assert_eq!(tokens[2].kind, TokenKind::Symbol);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0 100.5");

    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[0].value(), "42");
    assert_eq!(tokens[1].kind, TokenKind::Float);
    assert_eq!(tokens[1].value(), "3.14");
    assert_eq!(tokens[2].kind, TokenKind::Int);
    assert_eq!(tokens[2].value(), "0");
    assert_eq!(tokens[3].kind, TokenKind::Float);
    assert_eq!(tokens[3].value(), "100.5");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_number_followed_by_dot() {
    // No digit after the dot, so this is a field access on an integer.
    assert_eq!(
        kinds("1.foo"),
        vec![TokenKind::Int, TokenKind::Dot, TokenKind::Symbol, TokenKind::EOF]
    );
}

#[test]
fn test_tokenize_strings() {
    let tokens = tokenize(r#""hello" "world" "multiple words""#);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value(), "hello");
    assert_eq!(tokens[1].value(), "world");
    assert_eq!(tokens[2].value(), "multiple words");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_string_escapes() {
    let tokens = tokenize(r#""a\nb" "tab\there" "backslash\\" "quote\"test" "keep\q""#);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value(), "a\nb");
    assert!(tokens[0].value().contains('\n'));
    assert_eq!(tokens[1].value(), "tab\there");
    assert_eq!(tokens[2].value(), "backslash\\");
    assert_eq!(tokens[3].value(), "quote\"test");
    assert_eq!(tokens[4].value(), "keep\\q");
}

#[test]
fn test_tokenize_empty_string() {
    let tokens = tokenize(r#""""#);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value(), "");
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[test]
fn test_unterminated_string_reports_opening_location() {
    let (tokens, errors) = Lexer::new("let s = \"never closed", LexerOptions::default()).tokenize();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "UnterminatedString");
    assert_eq!(*errors[0].get_position(), Loc::new(1, 9));

    assert_eq!(tokens[3].kind, TokenKind::Error);
    assert_eq!(tokens[3].span.start, Loc::new(1, 9));
    assert_eq!(tokens[3].value(), "unterminated string literal");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_chars() {
    let (tokens, errors) = Lexer::new(r"'a' '\n' ''", LexerOptions::default()).tokenize();

    assert_eq!(tokens[0].kind, TokenKind::Char);
    assert_eq!(tokens[0].value(), "a");
    assert_eq!(tokens[1].kind, TokenKind::Char);
    assert_eq!(tokens[1].value(), "\n");
    assert_eq!(tokens[2].kind, TokenKind::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "InvalidCharLiteral");
}

#[test]
fn test_tokenize_operators() {
    let source = "+ - * / % == != < > <= >= = && || & | << >> !";

    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Amper,
            TokenKind::Pipe,
            TokenKind::ShiftLeft,
            TokenKind::ShiftRight,
            TokenKind::Not,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } [ ] . , ; : :: -> => ..."),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::ColonColon,
            TokenKind::Arrow,
            TokenKind::FatArrow,
            TokenKind::Ellipsis,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_compound_assignment_operators() {
    assert_eq!(
        kinds("+= -= *= /= %= &= |="),
        vec![
            TokenKind::PlusEquals,
            TokenKind::MinusEquals,
            TokenKind::StarEquals,
            TokenKind::SlashEquals,
            TokenKind::PercentEquals,
            TokenKind::AmperEquals,
            TokenKind::PipeEquals,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_maximal_munch_without_spaces() {
    assert_eq!(kinds("->"), vec![TokenKind::Arrow, TokenKind::EOF]);
    assert_eq!(kinds("=="), vec![TokenKind::Equals, TokenKind::EOF]);
    assert_eq!(
        kinds("a->b==c=>d::e"),
        vec![
            TokenKind::Symbol,
            TokenKind::Arrow,
            TokenKind::Symbol,
            TokenKind::Equals,
            TokenKind::Symbol,
            TokenKind::FatArrow,
            TokenKind::Symbol,
            TokenKind::ColonColon,
            TokenKind::Symbol,
            TokenKind::EOF,
        ]
    );
    // Two dots are not an ellipsis.
    assert_eq!(kinds(".."), vec![TokenKind::Dot, TokenKind::Dot, TokenKind::EOF]);
    assert_eq!(kinds("-=-"), vec![TokenKind::MinusEquals, TokenKind::Dash, TokenKind::EOF]);
}

#[test]
fn test_tokenize_comments() {
    let tokens = tokenize("let x = 5 // this is a comment\nlet y = 10");

    assert_eq!(tokens[3].kind, TokenKind::Int);
    assert_eq!(tokens[3].value(), "5");
    assert_eq!(tokens[4].kind, TokenKind::Newline);
    assert_eq!(tokens[5].kind, TokenKind::Let);
    assert_eq!(tokens[6].value(), "y");
}

#[test]
fn test_tokenize_unrecognized_character() {
    let (tokens, errors) = Lexer::new("let x = @ + $", LexerOptions::default()).tokenize();

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].get_error_name(), "UnrecognisedCharacter");
    assert_eq!(*errors[0].get_position(), Loc::new(1, 9));

    // Scanning resumes after each bad character.
    assert_eq!(tokens[3].kind, TokenKind::Error);
    assert_eq!(tokens[4].kind, TokenKind::Plus);
    assert_eq!(tokens[5].kind, TokenKind::Error);
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_token_locations() {
    let tokens = tokenize("let x\n  = 42");

    assert_eq!(tokens[0].span.start, Loc::new(1, 1));
    assert_eq!(tokens[0].span.end, Loc::new(1, 4));
    assert_eq!(tokens[1].span.start, Loc::new(1, 5));
    assert_eq!(tokens[2].kind, TokenKind::Newline);
    assert_eq!(tokens[3].kind, TokenKind::Indent);
    assert_eq!(tokens[4].kind, TokenKind::Assignment);
    assert_eq!(tokens[4].span.start, Loc::new(2, 3));
    assert_eq!(tokens[5].span.start, Loc::new(2, 5));
    assert_eq!(tokens[5].span.end, Loc::new(2, 7));
}

#[test]
fn test_same_depth_lines_have_no_indentation_tokens() {
    let source = "let a = 1\nlet b = 2\nlet c = 3\n";

    assert_eq!(count(source, TokenKind::Indent), 0);
    assert_eq!(count(source, TokenKind::Dedent), 0);
    assert_eq!(count(source, TokenKind::Newline), 3);
}

#[test]
fn test_nested_indentation_balances() {
    let source = "fn f()\n    if x\n        a\n    b\nc\n";

    assert_eq!(count(source, TokenKind::Indent), 2);
    assert_eq!(count(source, TokenKind::Dedent), 2);
}

#[test]
fn test_multiple_dedents_in_one_step() {
    let source = "a\n  b\n    c\nd";

    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Symbol,
            TokenKind::Newline,
            TokenKind::Indent,
            TokenKind::Symbol,
            TokenKind::Newline,
            TokenKind::Indent,
            TokenKind::Symbol,
            TokenKind::Newline,
            TokenKind::Dedent,
            TokenKind::Dedent,
            TokenKind::Symbol,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_dedents_flushed_at_end_of_input() {
    let tokens = tokenize("a\n    b");
    let len = tokens.len();

    assert_eq!(tokens[len - 2].kind, TokenKind::Dedent);
    assert_eq!(tokens[len - 1].kind, TokenKind::EOF);
    assert_eq!(count("a\n    b", TokenKind::Indent), 1);
}

#[test]
fn test_tab_counts_as_four_spaces() {
    // A tab and four spaces are the same depth.
    let source = "a\n\tb\n    c\n";

    assert_eq!(count(source, TokenKind::Indent), 1);
    assert_eq!(count(source, TokenKind::Dedent), 1);
}

#[test]
fn test_custom_tab_width() {
    let options = LexerOptions {
        tab_width: 2,
        ..LexerOptions::default()
    };
    let (tokens, _) = Lexer::new("a\n\tb\n  c\n", options).tokenize();
    let indents = tokens.iter().filter(|t| t.kind == TokenKind::Indent).count();

    assert_eq!(indents, 1);
}

#[test]
fn test_blank_and_comment_lines_do_not_change_indentation() {
    let source = "a\n    b\n\n  // note\n    c\n";

    assert_eq!(count(source, TokenKind::Indent), 1);
    assert_eq!(count(source, TokenKind::Dedent), 1);
}

#[test]
fn test_no_layout_inside_parens_and_brackets() {
    let source = "foo(1,\n      2,\n  [3,\n4])\nbar";

    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Symbol,
            TokenKind::OpenParen,
            TokenKind::Int,
            TokenKind::Comma,
            TokenKind::Int,
            TokenKind::Comma,
            TokenKind::OpenBracket,
            TokenKind::Int,
            TokenKind::Comma,
            TokenKind::Int,
            TokenKind::CloseBracket,
            TokenKind::CloseParen,
            TokenKind::Newline,
            TokenKind::Symbol,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_layout_inside_braces() {
    let source = "fn f() {\n    a\n}\n";

    assert_eq!(count(source, TokenKind::Newline), 3);
    assert_eq!(count(source, TokenKind::Indent), 1);
    assert_eq!(count(source, TokenKind::Dedent), 1);
}

#[test]
fn test_symbol_suffixes_dialect() {
    let options = LexerOptions {
        symbol_suffixes: true,
        ..LexerOptions::default()
    };
    let (tokens, _) = Lexer::new("empty? push! a!=b", options).tokenize();

    assert_eq!(tokens[0].value(), "empty?");
    assert_eq!(tokens[1].value(), "push!");
    assert_eq!(tokens[2].value(), "a");
    assert_eq!(tokens[3].kind, TokenKind::NotEquals);

    // Off by default.
    assert_eq!(
        kinds("empty?"),
        vec![TokenKind::Symbol, TokenKind::Error, TokenKind::EOF]
    );
}

#[test]
fn test_tokenize_function_declaration() {
    let tokens = tokenize("fn add(a: i32, b: i32) -> i32 { return a + b }");

    assert_eq!(tokens[0].kind, TokenKind::Fn);
    assert_eq!(tokens[1].kind, TokenKind::Symbol);
    assert_eq!(tokens[1].value(), "add");
    assert_eq!(tokens[2].kind, TokenKind::OpenParen);
    assert_eq!(tokens[3].value(), "a");
    assert_eq!(tokens[4].kind, TokenKind::Colon);
    assert_eq!(tokens[5].value(), "i32");
    assert_eq!(tokens[11].kind, TokenKind::Arrow);
    assert_eq!(tokens[13].kind, TokenKind::OpenCurly);
}

#[test]
fn test_tokenize_caret_and_tilde() {
    let (tokens, errors) = Lexer::new("a ^ b\n~c\n", LexerOptions::default()).tokenize();

    assert!(errors.is_empty());
    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Symbol,
            TokenKind::Caret,
            TokenKind::Symbol,
            TokenKind::Newline,
            TokenKind::Tilde,
            TokenKind::Symbol,
            TokenKind::Newline,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_hash_comments() {
    let (tokens, errors) =
        Lexer::new("# header\nlet x = 5 # trailing\n", LexerOptions::default()).tokenize();

    assert!(errors.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::Newline);
    assert_eq!(tokens[1].kind, TokenKind::Let);
    assert_eq!(tokens[4].value(), "5");
    assert_eq!(tokens[5].kind, TokenKind::Newline);
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_hash_comment_lines_do_not_change_indentation() {
    let source = "a\n    b\n# flush left\n        # deep\n    c\n";

    assert_eq!(count(source, TokenKind::Indent), 1);
    assert_eq!(count(source, TokenKind::Dedent), 1);
}

#[test]
fn test_identifiers_are_ascii() {
    let (tokens, errors) = Lexer::new("let café = 1", LexerOptions::default()).tokenize();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "UnrecognisedCharacter");
    assert_eq!(*errors[0].get_position(), Loc::new(1, 8));
    assert_eq!(tokens[1].value(), "caf");
    assert_eq!(tokens[2].kind, TokenKind::Error);
}
