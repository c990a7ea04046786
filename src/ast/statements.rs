use std::slice::Iter;

use crate::{Loc, Span, IMPL_NODE};

use super::{
    ast::{Expr, Node, Stmt},
    types::TypeExpr,
};

/// An ordered statement list, from a brace block or an indented suite.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// The value of the block when used as an expression: its last
    /// statement, if that is an expression statement.
    pub fn trailing_expr(&self) -> Option<&Expr> {
        match self.body.last() {
            Some(Stmt::Expression(stmt)) => Some(&stmt.expression),
            _ => None,
        }
    }
}

/// Accumulates statements while a block is open. The block only exists as a
/// `BlockStmt` once its closing delimiter has been consumed.
#[derive(Debug)]
pub struct BlockBuilder {
    body: Vec<Stmt>,
    start: Loc,
}

impl BlockBuilder {
    pub fn new(start: Loc) -> Self {
        BlockBuilder {
            body: vec![],
            start,
        }
    }

    pub fn push(&mut self, stmt: Stmt) {
        self.body.push(stmt);
    }

    pub fn finish(self, end: Loc) -> BlockStmt {
        BlockStmt {
            body: self.body,
            span: Span::new(self.start, end),
        }
    }
}

/// `name: Type`, used by parameters, struct fields and struct variants.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: TypeExpr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

/// `let` and `const` bindings. The binding kind is carried by the
/// `Stmt::LetDecl` / `Stmt::ConstDecl` variant as well as `is_constant`.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub identifier: String,
    pub is_constant: bool,
    pub explicit_type: Option<TypeExpr>,
    pub assigned_value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub name: String,
    pub generics: Vec<String>,
    pub params: Vec<Field>,
    pub return_type: Option<TypeExpr>,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDeclStmt {
    pub name: String,
    pub generics: Vec<String>,
    pub fields: Vec<Field>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VariantKind {
    Unit,
    Tuple(Vec<TypeExpr>),
    Struct(Vec<Field>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumVariant {
    pub name: String,
    pub kind: VariantKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDeclStmt {
    pub name: String,
    pub generics: Vec<String>,
    pub variants: Vec<EnumVariant>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDeclStmt {
    pub name: String,
    pub generics: Vec<String>,
    pub aliased_type: TypeExpr,
    pub span: Span,
}

/// A trait method signature, optionally with a default body.
#[derive(Debug, Clone, PartialEq)]
pub struct TraitMethod {
    pub name: String,
    pub generics: Vec<String>,
    pub params: Vec<Field>,
    pub return_type: Option<TypeExpr>,
    pub default_body: Option<BlockStmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraitDeclStmt {
    pub name: String,
    pub generics: Vec<String>,
    pub methods: Vec<TraitMethod>,
    pub span: Span,
}

/// `impl<T> Target { ... }` or `impl Trait for Target { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImplDeclStmt {
    pub generics: Vec<String>,
    pub trait_type: Option<TypeExpr>,
    pub target: TypeExpr,
    pub methods: Vec<FnDeclStmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    If(Box<IfStmt>),
    Block(BlockStmt),
}

impl Node for ElseBranch {
    fn get_span(&self) -> &Span {
        match self {
            ElseBranch::If(stmt) => &stmt.span,
            ElseBranch::Block(block) => &block.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: BlockStmt,
    pub else_body: Option<ElseBranch>,
    pub span: Span,
}

/// One `pattern => body` arm. A `None` pattern is the `_` default arm.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchArm {
    pub pattern: Option<Expr>,
    pub body: BlockStmt,
    pub span: Span,
}

/// Arms are kept in source order; the first matching arm wins.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchStmt {
    pub scrutinee: Expr,
    pub arms: Vec<MatchArm>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub binder: String,
    pub iterable: Expr,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStmt {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStmt {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportPath {
    /// `a.b.c`
    Module(Vec<String>),
    /// `"path/to/file"`
    File(String),
}

/// `import a.b (as x)`, `import "file" (as x)` or `from a.b import x, y`.
/// `names` is empty unless the `from` form was used.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportStmt {
    pub names: Vec<String>,
    pub path: ImportPath,
    pub alias: Option<String>,
    pub span: Span,
}

IMPL_NODE!(
    BlockStmt,
    Field,
    ExpressionStmt,
    VarDeclStmt,
    FnDeclStmt,
    StructDeclStmt,
    EnumVariant,
    EnumDeclStmt,
    TypeDeclStmt,
    TraitMethod,
    TraitDeclStmt,
    ImplDeclStmt,
    IfStmt,
    MatchArm,
    MatchStmt,
    ForStmt,
    WhileStmt,
    ReturnStmt,
    BreakStmt,
    ContinueStmt,
    ImportStmt,
);
