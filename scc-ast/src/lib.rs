//! Slate C Compiler - Typed AST Definitions
//!
//! This crate defines the abstract syntax tree handed to the lowering
//! engine. The tree is the output of the type checker: every construct in
//! it has already been validated, constants carry their types, and
//! type-dependent rewrites (integer promotion, pointer decay) are left
//! explicit for lowering to perform.

pub mod expressions;
pub mod ops;
pub mod statements;
pub mod translation_unit;
pub mod types;

// Re-export commonly used types at crate level
pub use expressions::{Expr, ExprKind};
pub use ops::{BinaryOp, UnaryOp};
pub use statements::{Initializer, InitializerKind, Stmt, StmtKind};
pub use translation_unit::{FunctionDefinition, Prototype, TopLevelItem, TranslationUnit};
pub use types::Type;
