//! Intermediate representation
//!
//! The IR is a graph of basic blocks per function. Every instruction is an
//! opcode plus a flat operand list with per-opcode roles, every operand
//! carries its type, and blocks close themselves after a terminator so the
//! lowering engine can drop unreachable tails without special cases.

pub use blocks::BasicBlock;
pub use builder::FunctionBuilder;
pub use function::{Function, NamedReg};
pub use instructions::Instruction;
pub use module::{Code, FunctionDecl};
pub use ops::Opcode;
pub use types::{IrType, TypeRank};
pub use values::{Operand, Reg};

pub mod blocks;
pub mod builder;
pub mod function;
pub mod instructions;
pub mod module;
pub mod ops;
pub mod types;
pub mod values;

#[cfg(test)]
mod tests;
