//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Loc;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedCharacter { character: '@' },
        Loc::new(1, 10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedCharacter");
    assert!(error.is_lexical());
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        Loc::new(3, 42),
    );

    assert_eq!(error.get_position().line, 3);
    assert_eq!(error.get_position().col, 42);
    assert!(!error.is_lexical());
}

#[test]
fn test_error_display_is_message_at_location() {
    let error = Error::new(
        ErrorImpl::ExpectedExpression {
            token: "}".to_string(),
        },
        Loc::new(2, 5),
    );

    assert_eq!(error.message(), "expected expression, found `}`");
    assert_eq!(error.to_string(), "expected expression, found `}` at 2:5");
}

#[test]
fn test_detailed_message() {
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: "42".to_string(),
            message: "expected `=` in variable declaration".to_string(),
        },
        Loc::new(1, 7),
    );

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(
        error.message(),
        "expected `=` in variable declaration, found `42`"
    );
}

#[test]
fn test_unterminated_string_error() {
    let error = Error::new(ErrorImpl::UnterminatedString, Loc::new(4, 1));

    assert_eq!(error.get_error_name(), "UnterminatedString");
    assert!(error.is_lexical());
    assert_eq!(error.to_string(), "unterminated string literal at 4:1");
}

#[test]
fn test_number_parse_error() {
    let error = Error::new(
        ErrorImpl::NumberParseError {
            token: "99999999999999999999999".to_string(),
        },
        Loc::start(),
    );

    assert_eq!(error.get_error_name(), "NumberParseError");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedCharacter { character: '$' },
        Loc::start(),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
        },
        Loc::start(),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_render_defaults_to_shell() {
    let error = Error::new(
        ErrorImpl::UnrecognisedCharacter { character: '@' },
        Loc::new(1, 9),
    );
    let rendered = error.render("let x = @", None);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "Error: UnrecognisedCharacter");
    assert_eq!(lines[1], "-> shell");
    assert_eq!(lines[2], "  |");
    assert_eq!(lines[3], "1 | let x = @");
    assert_eq!(lines[4], "  | --------^");
}
