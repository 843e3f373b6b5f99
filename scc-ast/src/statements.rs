//! Statement AST nodes
//!
//! This module defines statement nodes and variable initializers.

use crate::expressions::Expr;
use crate::types::Type;
use scc_common::source_loc::HasSpan;
use scc_common::SourceSpan;
use serde::{Deserialize, Serialize};

/// AST statement node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StmtKind {
    /// Expression statement
    Expression(Expr),

    /// Compound statement (block)
    Compound(Vec<Stmt>),

    /// Local variable declaration
    Declaration {
        name: String,
        decl_type: Type,
        initializer: Option<Initializer>,
    },

    /// If statement
    If {
        condition: Expr,
        then_stmt: Option<Box<Stmt>>,
        else_stmt: Option<Box<Stmt>>,
    },

    /// While loop
    While { condition: Expr, body: Box<Stmt> },

    /// Do-while loop
    DoWhile { body: Box<Stmt>, condition: Expr },

    /// For loop
    For {
        init: Option<Box<Stmt>>, // Declaration or expression statement
        condition: Option<Expr>,
        update: Option<Expr>,
        body: Box<Stmt>,
    },

    /// Return statement
    Return(Option<Expr>),

    /// Break statement
    Break,

    /// Continue statement
    Continue,

    /// Empty statement (just semicolon)
    Empty,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: SourceSpan) -> Self {
        Self { kind, span }
    }
}

impl HasSpan for Stmt {
    fn span(&self) -> SourceSpan {
        self.span.clone()
    }
}

/// Initializer for variables and arrays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Initializer {
    pub kind: InitializerKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InitializerKind {
    /// Single expression
    Expression(Expr),

    /// Brace-enclosed initializer list (for arrays)
    List(Vec<Initializer>),
}

impl HasSpan for Initializer {
    fn span(&self) -> SourceSpan {
        self.span.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expressions::ExprKind;

    #[test]
    fn test_compound_statement() {
        let span = SourceSpan::dummy();
        let ret = Stmt::new(StmtKind::Return(None), span.clone());
        let block = Stmt::new(StmtKind::Compound(vec![ret]), span);

        match block.kind {
            StmtKind::Compound(stmts) => assert_eq!(stmts.len(), 1),
            _ => panic!("Expected Compound"),
        }
    }

    #[test]
    fn test_declaration_with_list_initializer() {
        let span = SourceSpan::dummy();
        let elem = Initializer {
            kind: InitializerKind::Expression(Expr::new(
                ExprKind::IntLiteral {
                    value: 7,
                    literal_type: Type::Int,
                },
                span.clone(),
            )),
            span: span.clone(),
        };
        let decl = Stmt::new(
            StmtKind::Declaration {
                name: "a".to_string(),
                decl_type: Type::Array {
                    element_type: Box::new(Type::Int),
                    size: 3,
                },
                initializer: Some(Initializer {
                    kind: InitializerKind::List(vec![elem]),
                    span: span.clone(),
                }),
            },
            span,
        );

        match decl.kind {
            StmtKind::Declaration { name, initializer, .. } => {
                assert_eq!(name, "a");
                assert!(matches!(
                    initializer.map(|i| i.kind),
                    Some(InitializerKind::List(_))
                ));
            }
            _ => panic!("Expected Declaration"),
        }
    }
}
