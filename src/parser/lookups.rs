use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::ast::{Expr, Stmt},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Binding strength of infix operators, weakest first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Default)]
pub enum Precedence {
    #[default]
    None,
    Assignment,
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Equality,
    Comparison,
    Shift,
    Term,
    Factor,
    Unary,
    Call,
    Primary,
}

impl Precedence {
    /// The next tighter level; `Primary` is the ceiling.
    pub fn increment(self) -> Precedence {
        match self {
            Precedence::None => Precedence::Assignment,
            Precedence::Assignment => Precedence::Or,
            Precedence::Or => Precedence::And,
            Precedence::And => Precedence::BitOr,
            Precedence::BitOr => Precedence::BitXor,
            Precedence::BitXor => Precedence::BitAnd,
            Precedence::BitAnd => Precedence::Equality,
            Precedence::Equality => Precedence::Comparison,
            Precedence::Comparison => Precedence::Shift,
            Precedence::Shift => Precedence::Term,
            Precedence::Term => Precedence::Factor,
            Precedence::Factor => Precedence::Unary,
            Precedence::Unary => Precedence::Call,
            Precedence::Call | Precedence::Primary => Precedence::Primary,
        }
    }
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type PrefixHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type InfixHandler = fn(&mut Parser, Expr, Precedence) -> Result<Expr, Error>;

/// How a token behaves at the start of an expression (`prefix`) and after
/// a complete left operand (`infix`, binding at `precedence`).
#[derive(Clone, Copy, Default)]
pub struct ParseRule {
    pub prefix: Option<PrefixHandler>,
    pub infix: Option<InfixHandler>,
    pub precedence: Precedence,
}

pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type RuleLookup = HashMap<TokenKind, ParseRule>;

#[derive(Default)]
struct RuleBuilder {
    rules: RuleLookup,
}

impl RuleBuilder {
    /// Registers a left denotation (infix) handler for a token.
    fn led(&mut self, kind: TokenKind, precedence: Precedence, led_fn: InfixHandler) {
        let rule = self.rules.entry(kind).or_default();
        rule.infix = Some(led_fn);
        rule.precedence = precedence;
    }

    /// Registers a null denotation (prefix) handler for a token.
    fn nud(&mut self, kind: TokenKind, nud_fn: PrefixHandler) {
        self.rules.entry(kind).or_default().prefix = Some(nud_fn);
    }
}

fn create_parse_rules() -> RuleLookup {
    let mut builder = RuleBuilder::default();

    // Assignment
    for kind in [
        TokenKind::Assignment,
        TokenKind::PlusEquals,
        TokenKind::MinusEquals,
        TokenKind::StarEquals,
        TokenKind::SlashEquals,
        TokenKind::PercentEquals,
        TokenKind::AmperEquals,
        TokenKind::PipeEquals,
    ] {
        builder.led(kind, Precedence::Assignment, parse_assignment_expr);
    }

    // Logical and bitwise
    builder.led(TokenKind::Or, Precedence::Or, parse_binary_expr);
    builder.led(TokenKind::And, Precedence::And, parse_binary_expr);
    builder.led(TokenKind::Pipe, Precedence::BitOr, parse_binary_expr);
    builder.led(TokenKind::Caret, Precedence::BitXor, parse_binary_expr);
    builder.led(TokenKind::Amper, Precedence::BitAnd, parse_binary_expr);

    // Equality and comparison
    builder.led(TokenKind::Equals, Precedence::Equality, parse_binary_expr);
    builder.led(TokenKind::NotEquals, Precedence::Equality, parse_binary_expr);
    builder.led(TokenKind::Less, Precedence::Comparison, parse_binary_expr);
    builder.led(TokenKind::LessEquals, Precedence::Comparison, parse_binary_expr);
    builder.led(TokenKind::Greater, Precedence::Comparison, parse_binary_expr);
    builder.led(TokenKind::GreaterEquals, Precedence::Comparison, parse_binary_expr);

    // Shifts, terms and factors
    builder.led(TokenKind::ShiftLeft, Precedence::Shift, parse_binary_expr);
    builder.led(TokenKind::ShiftRight, Precedence::Shift, parse_binary_expr);
    builder.led(TokenKind::Plus, Precedence::Term, parse_binary_expr);
    builder.led(TokenKind::Dash, Precedence::Term, parse_binary_expr);
    builder.led(TokenKind::Star, Precedence::Factor, parse_binary_expr);
    builder.led(TokenKind::Slash, Precedence::Factor, parse_binary_expr);
    builder.led(TokenKind::Percent, Precedence::Factor, parse_binary_expr);

    // Postfix
    builder.led(TokenKind::OpenParen, Precedence::Call, parse_call_expr);
    builder.led(TokenKind::OpenBracket, Precedence::Call, parse_index_expr);
    builder.led(TokenKind::Dot, Precedence::Call, parse_member_expr);
    builder.led(TokenKind::ColonColon, Precedence::Call, parse_enum_literal_expr);
    builder.led(TokenKind::OpenCurly, Precedence::Call, parse_struct_literal_expr);

    // Literals and symbols
    builder.nud(TokenKind::Int, parse_primary_expr);
    builder.nud(TokenKind::Float, parse_primary_expr);
    builder.nud(TokenKind::String, parse_primary_expr);
    builder.nud(TokenKind::Char, parse_primary_expr);
    builder.nud(TokenKind::Bool, parse_primary_expr);
    builder.nud(TokenKind::Symbol, parse_primary_expr);

    builder.nud(TokenKind::Dash, parse_prefix_expr);
    builder.nud(TokenKind::Not, parse_prefix_expr);
    builder.nud(TokenKind::Tilde, parse_prefix_expr);
    builder.nud(TokenKind::OpenParen, parse_grouping_expr);
    builder.nud(TokenKind::OpenBracket, parse_array_literal_expr);
    builder.nud(TokenKind::OpenCurly, parse_block_expr);

    builder.rules
}

fn create_stmt_lookup() -> StmtLookup {
    let mut lookup: StmtLookup = HashMap::new();

    lookup.insert(TokenKind::Fn, parse_fn_decl_stmt);
    lookup.insert(TokenKind::Const, parse_var_decl_stmt);
    lookup.insert(TokenKind::Let, parse_var_decl_stmt);
    lookup.insert(TokenKind::Struct, parse_struct_decl_stmt);
    lookup.insert(TokenKind::Enum, parse_enum_decl_stmt);
    lookup.insert(TokenKind::Type, parse_type_decl_stmt);
    lookup.insert(TokenKind::Trait, parse_trait_decl_stmt);
    lookup.insert(TokenKind::Impl, parse_impl_decl_stmt);
    lookup.insert(TokenKind::If, parse_if_stmt);
    lookup.insert(TokenKind::Match, parse_match_stmt);
    lookup.insert(TokenKind::For, parse_for_stmt);
    lookup.insert(TokenKind::While, parse_while_stmt);
    lookup.insert(TokenKind::Return, parse_return_stmt);
    lookup.insert(TokenKind::Break, parse_break_stmt);
    lookup.insert(TokenKind::Continue, parse_continue_stmt);
    lookup.insert(TokenKind::Import, parse_import_stmt);
    lookup.insert(TokenKind::From, parse_from_import_stmt);
    lookup.insert(TokenKind::OpenCurly, parse_block_stmt);
    lookup.insert(TokenKind::Indent, parse_block_stmt);

    lookup
}

lazy_static! {
    /// Pratt table: prefix/infix handlers and precedence per token kind.
    pub static ref PARSE_RULES: RuleLookup = create_parse_rules();
    /// Statement handlers keyed on the leading token.
    pub static ref STMT_LOOKUP: StmtLookup = create_stmt_lookup();
}

/// The rule for `kind`, or an empty rule with `Precedence::None`.
pub fn get_rule(kind: TokenKind) -> ParseRule {
    PARSE_RULES.get(&kind).copied().unwrap_or_default()
}
