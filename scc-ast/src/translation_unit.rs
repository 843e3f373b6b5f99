//! Translation unit and top-level definitions
//!
//! This module defines the top-level structure of a checked program.

use crate::statements::{Initializer, Stmt};
use crate::types::Type;
use scc_common::source_loc::HasSpan;
use scc_common::SourceSpan;
use serde::{Deserialize, Serialize};

/// Function definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub return_type: Type,
    pub parameters: Vec<(String, Type)>,
    pub body: Stmt,
    pub span: SourceSpan,
}

impl HasSpan for FunctionDefinition {
    fn span(&self) -> SourceSpan {
        self.span.clone()
    }
}

/// Function prototype without a body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prototype {
    pub name: String,
    pub return_type: Type,
    pub parameters: Vec<Type>,
    pub span: SourceSpan,
}

/// Top-level item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TopLevelItem {
    /// Function definition
    Function(FunctionDefinition),

    /// Function prototype
    Prototype(Prototype),

    /// Global variable definition
    Global {
        name: String,
        var_type: Type,
        initializer: Option<Initializer>,
        span: SourceSpan,
    },
}

/// Top-level compilation unit (entire program)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationUnit {
    pub items: Vec<TopLevelItem>,
}

impl TranslationUnit {
    pub fn new(items: Vec<TopLevelItem>) -> Self {
        Self { items }
    }

    /// Iterate over the function definitions in declaration order
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDefinition> {
        self.items.iter().filter_map(|item| match item {
            TopLevelItem::Function(func) => Some(func),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::StmtKind;

    fn empty_function(name: &str) -> FunctionDefinition {
        FunctionDefinition {
            name: name.to_string(),
            return_type: Type::Void,
            parameters: Vec::new(),
            body: Stmt::new(StmtKind::Compound(Vec::new()), SourceSpan::dummy()),
            span: SourceSpan::dummy(),
        }
    }

    #[test]
    fn test_functions_iterator() {
        let unit = TranslationUnit::new(vec![
            TopLevelItem::Function(empty_function("first")),
            TopLevelItem::Global {
                name: "g".to_string(),
                var_type: Type::Int,
                initializer: None,
                span: SourceSpan::dummy(),
            },
            TopLevelItem::Function(empty_function("second")),
        ]);

        let names: Vec<_> = unit.functions().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
