use std::fmt::Display;

use crate::{Span, IMPL_NODE};

use super::{
    expressions::{
        ArrayLiteralExpr, AssignmentExpr, BinaryExpr, BoolExpr, CallExpr, CharExpr,
        EnumLiteralExpr, FloatExpr, IndexExpr, IntExpr, MemberExpr, PrefixExpr, StringExpr,
        StructInitExpr, SymbolExpr, TupleLiteralExpr,
    },
    statements::{
        BlockStmt, BreakStmt, ContinueStmt, EnumDeclStmt, ExpressionStmt, FnDeclStmt,
        ForStmt, IfStmt, ImplDeclStmt, ImportStmt, MatchStmt, ReturnStmt, StructDeclStmt,
        TraitDeclStmt, TypeDeclStmt, VarDeclStmt, WhileStmt,
    },
};

/// Anything that occupies a stretch of source text.
pub trait Node {
    fn get_span(&self) -> &Span;
}

/// The root of the tree: every top-level statement of one source unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}

IMPL_NODE!(Program);

/// Statements and declarations.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    FnDecl(FnDeclStmt),
    ConstDecl(VarDeclStmt),
    LetDecl(VarDeclStmt),
    StructDecl(StructDeclStmt),
    EnumDecl(EnumDeclStmt),
    TypeDecl(TypeDeclStmt),
    TraitDecl(TraitDeclStmt),
    ImplDecl(ImplDeclStmt),
    If(IfStmt),
    Match(MatchStmt),
    For(ForStmt),
    While(WhileStmt),
    Return(ReturnStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    Import(ImportStmt),
    Expression(ExpressionStmt),
    Block(BlockStmt),
}

impl Node for Stmt {
    fn get_span(&self) -> &Span {
        match self {
            Stmt::FnDecl(stmt) => &stmt.span,
            Stmt::ConstDecl(stmt) | Stmt::LetDecl(stmt) => &stmt.span,
            Stmt::StructDecl(stmt) => &stmt.span,
            Stmt::EnumDecl(stmt) => &stmt.span,
            Stmt::TypeDecl(stmt) => &stmt.span,
            Stmt::TraitDecl(stmt) => &stmt.span,
            Stmt::ImplDecl(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::Match(stmt) => &stmt.span,
            Stmt::For(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::Break(stmt) => &stmt.span,
            Stmt::Continue(stmt) => &stmt.span,
            Stmt::Import(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::Block(stmt) => &stmt.span,
        }
    }
}

/// Expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(IntExpr),
    Float(FloatExpr),
    Bool(BoolExpr),
    String(StringExpr),
    Char(CharExpr),
    Ident(SymbolExpr),
    Unary(PrefixExpr),
    Binary(BinaryExpr),
    Assign(AssignmentExpr),
    Call(CallExpr),
    FieldAccess(MemberExpr),
    IndexAccess(IndexExpr),
    ArrayLit(ArrayLiteralExpr),
    TupleLit(TupleLiteralExpr),
    StructLit(StructInitExpr),
    EnumLit(EnumLiteralExpr),
    Block(BlockStmt),
}

impl Expr {
    /// Parenthesised sub-expressions take over the span of their parentheses
    /// while the parser is still building them.
    pub(crate) fn span_mut(&mut self) -> &mut Span {
        match self {
            Expr::Int(expr) => &mut expr.span,
            Expr::Float(expr) => &mut expr.span,
            Expr::Bool(expr) => &mut expr.span,
            Expr::String(expr) => &mut expr.span,
            Expr::Char(expr) => &mut expr.span,
            Expr::Ident(expr) => &mut expr.span,
            Expr::Unary(expr) => &mut expr.span,
            Expr::Binary(expr) => &mut expr.span,
            Expr::Assign(expr) => &mut expr.span,
            Expr::Call(expr) => &mut expr.span,
            Expr::FieldAccess(expr) => &mut expr.span,
            Expr::IndexAccess(expr) => &mut expr.span,
            Expr::ArrayLit(expr) => &mut expr.span,
            Expr::TupleLit(expr) => &mut expr.span,
            Expr::StructLit(expr) => &mut expr.span,
            Expr::EnumLit(expr) => &mut expr.span,
            Expr::Block(expr) => &mut expr.span,
        }
    }
}

impl Node for Expr {
    fn get_span(&self) -> &Span {
        match self {
            Expr::Int(expr) => &expr.span,
            Expr::Float(expr) => &expr.span,
            Expr::Bool(expr) => &expr.span,
            Expr::String(expr) => &expr.span,
            Expr::Char(expr) => &expr.span,
            Expr::Ident(expr) => &expr.span,
            Expr::Unary(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Assign(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
            Expr::FieldAccess(expr) => &expr.span,
            Expr::IndexAccess(expr) => &expr.span,
            Expr::ArrayLit(expr) => &expr.span,
            Expr::TupleLit(expr) => &expr.span,
            Expr::StructLit(expr) => &expr.span,
            Expr::EnumLit(expr) => &expr.span,
            Expr::Block(expr) => &expr.span,
        }
    }
}

fn write_list(f: &mut std::fmt::Formatter<'_>, items: &[Expr]) -> std::fmt::Result {
    for item in items {
        write!(f, " {}", item)?;
    }
    Ok(())
}

/// Fully parenthesised prefix form, e.g. `(+ 1 (* 2 3))`.
impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Int(expr) => write!(f, "{}", expr.value),
            Expr::Float(expr) => write!(f, "{:?}", expr.value),
            Expr::Bool(expr) => write!(f, "{}", expr.value),
            Expr::String(expr) => write!(f, "{:?}", expr.value),
            Expr::Char(expr) => write!(f, "{:?}", expr.value),
            Expr::Ident(expr) => write!(f, "{}", expr.value),
            Expr::Unary(expr) => write!(f, "({} {})", expr.operator, expr.operand),
            Expr::Binary(expr) => write!(f, "({} {} {})", expr.operator, expr.left, expr.right),
            Expr::Assign(expr) => write!(f, "({} {} {})", expr.operator, expr.assignee, expr.value),
            Expr::Call(expr) => {
                write!(f, "(call {}", expr.callee)?;
                write_list(f, &expr.arguments)?;
                write!(f, ")")
            }
            Expr::FieldAccess(expr) => write!(f, "(. {} {})", expr.target, expr.field),
            Expr::IndexAccess(expr) => write!(f, "(index {} {})", expr.target, expr.index),
            Expr::ArrayLit(expr) => {
                write!(f, "(array")?;
                write_list(f, &expr.elements)?;
                write!(f, ")")
            }
            Expr::TupleLit(expr) => {
                write!(f, "(tuple")?;
                write_list(f, &expr.elements)?;
                write!(f, ")")
            }
            Expr::StructLit(expr) => {
                write!(f, "(struct {}", expr.name)?;
                for field in &expr.fields {
                    write!(f, " ({} {})", field.name, field.value)?;
                }
                write!(f, ")")
            }
            Expr::EnumLit(expr) => write!(f, "{}::{}", expr.name, expr.variant),
            Expr::Block(block) => match block.trailing_expr() {
                Some(value) => write!(f, "(block {})", value),
                None => write!(f, "(block)"),
            },
        }
    }
}
