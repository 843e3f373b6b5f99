//! Instruction opcodes
//!
//! Each opcode fixes the count and roles of its operands; the shapes are
//! documented per variant with the destination first wherever one exists.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Opcode {
    /// `{dest, addr}`: read the value `addr` points at.
    Load,
    /// `{value, addr}`: write `value` into the storage `addr` points at.
    Store,
    /// `{dest, base, index..}`: address arithmetic. Each index is scaled
    /// by the size of the element it steps over; a leading zero index
    /// steps into an array without advancing past the whole aggregate.
    IndexAt,
    /// `{dest, lhs, rhs}`: wrapping addition.
    Add,
    /// `{dest, lhs, rhs}`: wrapping subtraction.
    Sub,
    /// `{dest, lhs, rhs}`: wrapping multiplication.
    Mul,
    /// `{dest, lhs, rhs}`: division, signedness per the operand types.
    Div,
    /// `{dest, lhs, rhs}`: remainder, signedness per the operand types.
    Rem,
    /// `{dest, lhs, rhs}`: bitwise and.
    And,
    /// `{dest, lhs, rhs}`: bitwise or.
    Or,
    /// `{dest, lhs, rhs}`: bitwise xor.
    Xor,
    /// `{dest, lhs, rhs}`: shift left.
    Shl,
    /// `{dest, lhs, rhs}`: shift right, arithmetic for signed operands.
    Shr,
    /// `{dest, lhs, rhs}`: equality compare yielding 0 or 1.
    Eq,
    /// `{dest, lhs, rhs}`: inequality compare yielding 0 or 1.
    Ne,
    /// `{dest, lhs, rhs}`: less-than compare yielding 0 or 1.
    Lt,
    /// `{dest, lhs, rhs}`: less-or-equal compare yielding 0 or 1.
    Le,
    /// `{dest, lhs, rhs}`: greater-than compare yielding 0 or 1.
    Gt,
    /// `{dest, lhs, rhs}`: greater-or-equal compare yielding 0 or 1.
    Ge,
    /// `{dest, value}`: zero-extend to the destination width.
    Widen,
    /// `{dest, value}`: truncate to the destination width.
    Narrow,
    /// `{dest, value}`: same bits reinterpreted at the destination type.
    Bitcast,
    /// `{dest, value}`: pointer value as an integer of the destination
    /// width.
    PtrToInt,
    /// `{target}`: unconditional transfer. Closes the block.
    Jump,
    /// `{condition, true_target, false_target}`: transfer on nonzero
    /// condition. Closes the block.
    Branch,
    /// `{dest, value_a, label_a, value_b, label_b}`: select the value
    /// whose label names the block control arrived from.
    Merge,
    /// `{dest, callee, arg..}`: direct call. `dest` is the void operand
    /// for void functions.
    Call,
    /// `{value}`: return to the caller, `value` possibly void. Closes the
    /// block.
    Return,
    /// `{dest}`: reserve stack storage for a named register; the
    /// register's type determines the slot.
    Alloc,
    /// `{dest, init..}`: static storage with optional constant
    /// initializers, element-by-element for arrays.
    Global,
}

impl Opcode {
    /// Terminators close their block; anything appended after one is
    /// dropped.
    pub fn is_terminator(self) -> bool {
        matches!(self, Opcode::Jump | Opcode::Branch | Opcode::Return)
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Opcode::Eq | Opcode::Ne | Opcode::Lt | Opcode::Le | Opcode::Gt | Opcode::Ge
        )
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Opcode::Load => "load",
            Opcode::Store => "store",
            Opcode::IndexAt => "index_at",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Div => "div",
            Opcode::Rem => "rem",
            Opcode::And => "and",
            Opcode::Or => "or",
            Opcode::Xor => "xor",
            Opcode::Shl => "shl",
            Opcode::Shr => "shr",
            Opcode::Eq => "eq",
            Opcode::Ne => "ne",
            Opcode::Lt => "lt",
            Opcode::Le => "le",
            Opcode::Gt => "gt",
            Opcode::Ge => "ge",
            Opcode::Widen => "widen",
            Opcode::Narrow => "narrow",
            Opcode::Bitcast => "bitcast",
            Opcode::PtrToInt => "ptr_to_int",
            Opcode::Jump => "jump",
            Opcode::Branch => "branch",
            Opcode::Merge => "merge",
            Opcode::Call => "call",
            Opcode::Return => "return",
            Opcode::Alloc => "alloc",
            Opcode::Global => "global",
        };
        write!(f, "{}", name)
    }
}
