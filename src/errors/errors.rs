use std::fmt::Display;

use thiserror::Error;

use crate::Loc;

/// A located diagnostic raised while lexing or parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Loc,
}

/// The diagnostic record handed to callers.
pub type Diagnostic = Error;

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Loc) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Loc {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// The human readable message, without location.
    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    /// The caret-underlined excerpt printed for this error, see
    /// [`crate::display_error`].
    pub fn render(&self, source: &str, file: Option<&str>) -> String {
        crate::display_error(self, source, file)
    }

    pub fn is_lexical(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::UnrecognisedCharacter { .. }
                | ErrorImpl::UnterminatedString
                | ErrorImpl::InvalidCharLiteral { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. } => "UnrecognisedCharacter",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::InvalidCharLiteral { .. } => "InvalidCharLiteral",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ErrorImpl::MissingInfixRule { .. } => "MissingInfixRule",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("add a closing `\"` to the string literal"))
            }
            ErrorImpl::InvalidCharLiteral { .. } => ErrorTip::Suggestion(String::from(
                "a char literal holds exactly one character, use a string for more",
            )),
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a newline or `;`?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("{}, found `{}`", message, token))
            }
            ErrorImpl::ExpectedExpression { token } => {
                ErrorTip::Suggestion(format!("`{}` cannot start an expression", token))
            }
            ErrorImpl::MissingInfixRule { token } => {
                ErrorTip::Suggestion(format!("`{}` cannot continue an expression", token))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised character {character:?}")]
    UnrecognisedCharacter { character: char },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("invalid char literal: {reason}")]
    InvalidCharLiteral { reason: String },
    #[error("unexpected token `{token}`")]
    UnexpectedToken { token: String },
    #[error("{message}, found `{token}`")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("expected expression, found `{token}`")]
    ExpectedExpression { token: String },
    #[error("no infix rule for `{token}`")]
    MissingInfixRule { token: String },
    #[error("error parsing number `{token}`")]
    NumberParseError { token: String },
}
