//! Expression AST nodes
//!
//! Expressions arrive type-checked. Only constants carry their type in
//! the tree; every other node's type is recomputed during lowering from
//! the types of its lowered operands.

use super::ops::{BinaryOp, UnaryOp};
use crate::types::Type;
use scc_common::source_loc::HasSpan;
use scc_common::SourceSpan;
use serde::{Deserialize, Serialize};

/// AST expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    /// Integer literal with its checked type
    IntLiteral { value: i64, literal_type: Type },

    /// Variable reference
    Variable(String),

    /// Binary operation (includes assignment and indexing forms)
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Unary operation
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Direct function call
    Call { function: String, arguments: Vec<Expr> },

    /// Explicit type cast
    Cast { target_type: Type, operand: Box<Expr> },

    /// Ternary conditional operator (condition ? then_expr : else_expr)
    Conditional {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },

    /// Sizeof applied to a type name
    SizeofType(Type),
}

impl Expr {
    pub fn new(kind: ExprKind, span: SourceSpan) -> Self {
        Self { kind, span }
    }
}

impl HasSpan for Expr {
    fn span(&self) -> SourceSpan {
        self.span.clone()
    }
}
