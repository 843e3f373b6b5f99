//! IR operands and registers

use super::types::IrType;
use scc_common::{GlobalId, LabelId, NamedId, TempId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A register: a namespace plus a number, or a name for functions.
///
/// Temporaries hold single computed values, named registers are the stack
/// slots behind source variables, globals address static storage. All ids
/// are function-local except globals, which are unit-wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Reg {
    Temp(TempId),
    Named(NamedId),
    Global(GlobalId),
    Func(String),
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reg::Temp(id) => write!(f, "%{}", id),
            Reg::Named(id) => write!(f, "${}", id),
            Reg::Global(id) => write!(f, "@{}", id),
            Reg::Func(name) => write!(f, "@{}", name),
        }
    }
}

/// Operand of an instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    Register { reg: Reg, ty: IrType },
    Immediate { value: i64, ty: IrType },
    /// Basic-block reference used by jump, branch and merge.
    Label(LabelId),
    /// Absence of a value: void returns and void call results.
    Void,
}

impl Operand {
    pub fn temp(id: TempId, ty: IrType) -> Self {
        Operand::Register {
            reg: Reg::Temp(id),
            ty,
        }
    }

    pub fn named(id: NamedId, ty: IrType) -> Self {
        Operand::Register {
            reg: Reg::Named(id),
            ty,
        }
    }

    pub fn global(id: GlobalId, ty: IrType) -> Self {
        Operand::Register {
            reg: Reg::Global(id),
            ty,
        }
    }

    pub fn immediate(value: i64, ty: IrType) -> Self {
        Operand::Immediate { value, ty }
    }

    /// The operand's type, if it carries one.
    pub fn ty(&self) -> Option<&IrType> {
        match self {
            Operand::Register { ty, .. } | Operand::Immediate { ty, .. } => Some(ty),
            Operand::Label(_) | Operand::Void => None,
        }
    }

    /// True for the immediate constant zero, whatever its type.
    pub fn is_zero_literal(&self) -> bool {
        matches!(self, Operand::Immediate { value: 0, .. })
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register { reg, .. } => write!(f, "{}", reg),
            Operand::Immediate { value, .. } => write!(f, "{}", value),
            Operand::Label(id) => write!(f, "L{}", id),
            Operand::Void => write!(f, "void"),
        }
    }
}
