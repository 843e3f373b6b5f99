//! Middle-end for the scc compiler
//!
//! Takes the type-checked AST from `scc-ast` and lowers it into a
//! control-flow graph of basic blocks holding three-address instructions.
//! The resulting [`Code`] bundle carries global initializers, external
//! declarations for called-but-undefined functions, and every lowered
//! function body, ready for register allocation and emission.

pub mod ir;
pub mod lower;

pub use ir::{
    BasicBlock, Code, Function, FunctionBuilder, FunctionDecl, Instruction, IrType, NamedReg,
    Opcode, Operand, Reg, TypeRank,
};
pub use lower::{lower_translation_unit, CodegenError, Lowering};
