//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into a `Program`. It uses a Pratt parser for expressions with proper
//! operator precedence and handles:
//!
//! - Statement parsing (declarations, control flow, imports, blocks)
//! - Expression parsing (binary ops, calls, literals, postfix access)
//! - Type parsing for type annotations
//! - Error recovery and reporting (panic mode)
//!
//! Expressions are driven by the static `PARSE_RULES` table, mapping each
//! token to its NUD (prefix) and LED (infix) handler and precedence.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
