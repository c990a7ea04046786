/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The `Program` root, the `Stmt` and `Expr` sum types and the `Node` trait
/// - expressions: Node structs for each expression variant
/// - statements: Node structs for statements and declarations, plus `BlockBuilder`
/// - types: Type annotations (`TypeExpr`)
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
