//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - A hand-written character cursor with line/column tracking
//! - Indentation tracking (NEWLINE/INDENT/DEDENT layout tokens)
//! - Recognition of keywords, identifiers, literals, and operators
//! - Maximal-munch disambiguation of multi-character operators
//! - Non-fatal error tokens for malformed input

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
