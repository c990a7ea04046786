//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `IMPL_NODE!` - Implements the `Node` span accessor for AST structs
//!
//! These macros reduce boilerplate in the lexer and the AST definitions.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$lexeme` - The token's optional text (`Option<String>`)
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Int, Some("42".to_string()), span);
/// let comma = MK_TOKEN!(TokenKind::Comma, span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $span:expr) => {
        Token {
            kind: $kind,
            lexeme: None,
            span: $span,
        }
    };
    ($kind:expr, $lexeme:expr, $span:expr) => {
        Token {
            kind: $kind,
            lexeme: $lexeme,
            span: $span,
        }
    };
}

/// Implements `Node` for structs that carry a `span: Span` field.
///
/// # Example
///
/// ```ignore
/// IMPL_NODE!(BlockStmt, IfStmt, WhileStmt);
/// ```
#[macro_export]
macro_rules! IMPL_NODE {
    ($($node:ty),+ $(,)?) => {
        $(
            impl $crate::ast::ast::Node for $node {
                fn get_span(&self) -> &$crate::Span {
                    &self.span
                }
            }
        )+
    };
}
