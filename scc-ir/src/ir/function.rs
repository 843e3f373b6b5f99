//! Lowered functions

use super::blocks::BasicBlock;
use super::types::IrType;
use scc_common::{LabelId, NamedId, TempId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stack slot behind one source variable.
///
/// The register's type carries one more indirection level than the values
/// stored in it, so the slot size is the type's pointee size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedReg {
    pub id: NamedId,
    /// Source-level variable name, for diagnostics only. Shadowed
    /// variables produce several registers with the same name.
    pub name: String,
    pub ty: IrType,
}

/// A lowered function: signature, registers and the finished block graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub return_type: IrType,
    /// Argument registers: temporaries `0..n` in declaration order, typed
    /// with the parameter value types.
    pub parameters: Vec<(TempId, IrType)>,
    pub named_regs: Vec<NamedReg>,
    /// Blocks indexed by id; ids are assigned densely at creation.
    pub blocks: Vec<BasicBlock>,
    pub entry_block: LabelId,
}

impl Function {
    pub fn get_block(&self, id: LabelId) -> Option<&BasicBlock> {
        self.blocks.get(id as usize)
    }

    pub fn entry(&self) -> Option<&BasicBlock> {
        self.get_block(self.entry_block)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self
            .parameters
            .iter()
            .map(|(id, ty)| format!("%{}: {}", id, ty))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "fn @{}({}) -> {} {{", self.name, params, self.return_type)?;
        for reg in &self.named_regs {
            writeln!(f, "  ; slot ${} '{}': {}", reg.id, reg.name, reg.ty)?;
        }
        for block in &self.blocks {
            write!(f, "{}", block)?;
        }
        writeln!(f, "}}")
    }
}
