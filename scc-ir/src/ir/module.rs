//! Lowered translation units

use super::function::Function;
use super::instructions::Instruction;
use super::types::IrType;
use scc_common::CompilerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// Signature of a function that is called in this unit but defined
/// elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    pub return_type: IrType,
    pub param_types: Vec<IrType>,
}

/// Everything lowering produces for one translation unit: global
/// initializer instructions, external declarations for functions that
/// were called but never defined, and every lowered function body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Code {
    pub globals: Vec<Instruction>,
    pub declarations: Vec<FunctionDecl>,
    pub functions: Vec<Function>,
}

impl Code {
    pub fn new() -> Self {
        Code::default()
    }

    pub fn get_function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|func| func.name == name)
    }

    /// Serializes the unit for hand-off to the next stage.
    pub fn to_json(&self) -> Result<String, CompilerError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CompilerError::internal_error(format!("IR serialization failed: {}", e)))
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), CompilerError> {
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| CompilerError::internal_error(format!("IR serialization failed: {}", e)))
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for global in &self.globals {
            writeln!(f, "{}", global)?;
        }
        for decl in &self.declarations {
            let params = decl
                .param_types
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "declare @{}({}) -> {}", decl.name, params, decl.return_type)?;
        }
        for function in &self.functions {
            writeln!(f, "{}", function)?;
        }
        Ok(())
    }
}
