//! IR instructions

use super::ops::Opcode;
use super::values::Operand;
use scc_common::{CompilerError, LabelId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One instruction: an opcode plus its operand list.
///
/// The operand roles are fixed per opcode and documented on [`Opcode`].
/// The uniform shape keeps downstream passes free of per-instruction
/// pattern matching; they index operands by role instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operands: Vec<Operand>,
}

impl Instruction {
    pub fn new(opcode: Opcode, operands: Vec<Operand>) -> Self {
        Instruction { opcode, operands }
    }

    /// Operand at `index`, or an internal error naming the opcode when
    /// the index is out of range for this instruction.
    pub fn operand(&self, index: usize) -> Result<&Operand, CompilerError> {
        self.operands.get(index).ok_or_else(|| {
            CompilerError::internal_error(format!(
                "operand index {} out of range for '{}' instruction with {} operands",
                index,
                self.opcode,
                self.operands.len()
            ))
        })
    }

    pub fn is_terminator(&self) -> bool {
        self.opcode.is_terminator()
    }

    /// Block labels this instruction transfers control to. Empty for
    /// non-terminators.
    pub fn branch_targets(&self) -> Vec<LabelId> {
        match self.opcode {
            Opcode::Jump | Opcode::Branch => self
                .operands
                .iter()
                .filter_map(|operand| match operand {
                    Operand::Label(id) => Some(*id),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = |index: usize| -> String {
            self.operands
                .get(index)
                .map_or_else(|| "?".to_string(), ToString::to_string)
        };
        let from = |index: usize| -> String {
            self.operands[index.min(self.operands.len())..]
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        match self.opcode {
            Opcode::Load => write!(f, "{} = load {}", at(0), at(1)),
            Opcode::Store => write!(f, "store {}, {}", at(0), at(1)),
            Opcode::IndexAt => write!(f, "{} = index_at {}", at(0), from(1)),
            Opcode::Widen | Opcode::Narrow | Opcode::Bitcast | Opcode::PtrToInt => {
                let ty = self
                    .operands
                    .first()
                    .and_then(Operand::ty)
                    .map_or_else(|| "?".to_string(), ToString::to_string);
                write!(f, "{} = {} {} to {}", at(0), self.opcode, at(1), ty)
            }
            Opcode::Jump => write!(f, "jump {}", at(0)),
            Opcode::Branch => write!(f, "branch {}, {}, {}", at(0), at(1), at(2)),
            Opcode::Merge => write!(
                f,
                "{} = merge [{}, {}], [{}, {}]",
                at(0),
                at(1),
                at(2),
                at(3),
                at(4)
            ),
            Opcode::Call => {
                if matches!(self.operands.first(), Some(Operand::Void)) {
                    write!(f, "call {}({})", at(1), from(2))
                } else {
                    write!(f, "{} = call {}({})", at(0), at(1), from(2))
                }
            }
            Opcode::Return => write!(f, "return {}", at(0)),
            Opcode::Alloc => write!(f, "{} = alloc", at(0)),
            Opcode::Global => {
                if self.operands.len() > 1 {
                    write!(f, "{} = global {}", at(0), from(1))
                } else {
                    write!(f, "{} = global", at(0))
                }
            }
            _ => write!(f, "{} = {} {}", at(0), self.opcode, from(1)),
        }
    }
}
