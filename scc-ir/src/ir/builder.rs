//! Function graph construction

use super::blocks::BasicBlock;
use super::function::{Function, NamedReg};
use super::instructions::Instruction;
use super::ops::Opcode;
use super::types::IrType;
use super::values::{Operand, Reg};
use scc_common::{LabelId, NamedId, TempId};

/// Builds one [`Function`]'s control-flow graph.
///
/// Blocks are allocated explicitly and instructions append to the
/// currently selected block. Appending to a closed block is a no-op that
/// reports itself, so call sites register predecessor edges only for
/// terminators that were actually kept. The builder never registers an
/// edge on its own; every join is wired explicitly by the lowering
/// engine.
#[derive(Debug)]
pub struct FunctionBuilder {
    name: String,
    return_type: IrType,
    parameters: Vec<(TempId, IrType)>,
    named_regs: Vec<NamedReg>,
    blocks: Vec<BasicBlock>,
    current: LabelId,
    next_temp: TempId,
    next_named: NamedId,
}

impl FunctionBuilder {
    /// Starts a function with an empty, selected entry block.
    pub fn new(name: &str, return_type: IrType) -> Self {
        FunctionBuilder {
            name: name.to_string(),
            return_type,
            parameters: Vec::new(),
            named_regs: Vec::new(),
            blocks: vec![BasicBlock::with_name(0, "entry")],
            current: 0,
            next_temp: 0,
            next_named: 0,
        }
    }

    /// Registers the next parameter and returns its argument register.
    /// Parameters claim the first temporary ids, in declaration order.
    pub fn add_parameter(&mut self, ty: IrType) -> Operand {
        let id = self.next_temp;
        self.next_temp += 1;
        self.parameters.push((id, ty.clone()));
        Operand::temp(id, ty)
    }

    /// Creates the stack register for a source variable. The register's
    /// type gains one indirection level over the stored value type.
    pub fn add_named(&mut self, name: &str, value_ty: &IrType) -> Operand {
        let id = self.next_named;
        self.next_named += 1;
        let ty = value_ty.pointer_to();
        self.named_regs.push(NamedReg {
            id,
            name: name.to_string(),
            ty: ty.clone(),
        });
        Operand::named(id, ty)
    }

    pub fn new_temp(&mut self, ty: IrType) -> Operand {
        let id = self.next_temp;
        self.next_temp += 1;
        Operand::temp(id, ty)
    }

    /// Allocates a new empty block and returns its id without selecting
    /// it.
    pub fn add_block(&mut self, name: &str) -> LabelId {
        let id = self.blocks.len() as LabelId;
        self.blocks.push(BasicBlock::with_name(id, name));
        id
    }

    /// Makes `id` the insertion target for subsequent instructions.
    pub fn select_block(&mut self, id: LabelId) {
        self.current = id;
    }

    pub fn current_block(&self) -> LabelId {
        self.current
    }

    pub fn current_is_closed(&self) -> bool {
        self.blocks
            .get(self.current as usize)
            .is_some_and(BasicBlock::is_closed)
    }

    /// Appends to the selected block. Reports false when the block was
    /// already closed and the instruction dropped.
    pub fn emit(&mut self, instruction: Instruction) -> bool {
        let Some(block) = self.blocks.get_mut(self.current as usize) else {
            return false;
        };
        block.add_instruction(instruction)
    }

    /// Records a predecessor edge. Call sites do this exactly when a
    /// terminator naming `block` was kept, so the sets stay in step with
    /// the instructions that exist.
    pub fn add_predecessor(&mut self, block: LabelId, pred: LabelId) {
        if let Some(b) = self.blocks.get_mut(block as usize) {
            b.add_predecessor(pred);
        }
    }

    /// Emits a three-operand instruction into a fresh temporary.
    pub fn build_binary(
        &mut self,
        opcode: Opcode,
        lhs: Operand,
        rhs: Operand,
        ty: IrType,
    ) -> Operand {
        let dest = self.new_temp(ty);
        self.emit(Instruction::new(opcode, vec![dest.clone(), lhs, rhs]));
        dest
    }

    pub fn build_load(&mut self, addr: Operand, ty: IrType) -> Operand {
        let dest = self.new_temp(ty);
        self.emit(Instruction::new(Opcode::Load, vec![dest.clone(), addr]));
        dest
    }

    pub fn build_store(&mut self, value: Operand, addr: Operand) {
        self.emit(Instruction::new(Opcode::Store, vec![value, addr]));
    }

    pub fn build_index_at(&mut self, base: Operand, indices: Vec<Operand>, ty: IrType) -> Operand {
        let dest = self.new_temp(ty);
        let mut operands = Vec::with_capacity(indices.len() + 2);
        operands.push(dest.clone());
        operands.push(base);
        operands.extend(indices);
        self.emit(Instruction::new(Opcode::IndexAt, operands));
        dest
    }

    /// Emits a conversion (`Widen`, `Narrow`, `Bitcast` or `PtrToInt`)
    /// into a fresh temporary of the destination type.
    pub fn build_cast(&mut self, opcode: Opcode, value: Operand, ty: IrType) -> Operand {
        let dest = self.new_temp(ty);
        self.emit(Instruction::new(opcode, vec![dest.clone(), value]));
        dest
    }

    /// Emits a two-way merge keyed by the blocks each value arrives from.
    pub fn build_merge(
        &mut self,
        a: (Operand, LabelId),
        b: (Operand, LabelId),
        ty: IrType,
    ) -> Operand {
        let dest = self.new_temp(ty);
        self.emit(Instruction::new(
            Opcode::Merge,
            vec![dest.clone(), a.0, Operand::Label(a.1), b.0, Operand::Label(b.1)],
        ));
        dest
    }

    /// Emits a direct call. The destination is a fresh temporary unless
    /// `return_type` is void, in which case the void operand stands in.
    pub fn build_call(&mut self, callee: &str, args: Vec<Operand>, return_type: IrType) -> Operand {
        let dest = if return_type.is_void() {
            Operand::Void
        } else {
            self.new_temp(return_type.clone())
        };
        let mut operands = Vec::with_capacity(args.len() + 2);
        operands.push(dest.clone());
        operands.push(Operand::Register {
            reg: Reg::Func(callee.to_string()),
            ty: return_type,
        });
        operands.extend(args);
        self.emit(Instruction::new(Opcode::Call, operands));
        dest
    }

    pub fn build_alloc(&mut self, slot: Operand) {
        self.emit(Instruction::new(Opcode::Alloc, vec![slot]));
    }

    /// Appends a jump. Reports whether it was kept.
    pub fn build_jump(&mut self, target: LabelId) -> bool {
        self.emit(Instruction::new(Opcode::Jump, vec![Operand::Label(target)]))
    }

    /// Appends a conditional branch. Reports whether it was kept.
    pub fn build_branch(
        &mut self,
        condition: Operand,
        true_target: LabelId,
        false_target: LabelId,
    ) -> bool {
        self.emit(Instruction::new(
            Opcode::Branch,
            vec![
                condition,
                Operand::Label(true_target),
                Operand::Label(false_target),
            ],
        ))
    }

    /// Appends a return. Reports whether it was kept.
    pub fn build_return(&mut self, value: Operand) -> bool {
        self.emit(Instruction::new(Opcode::Return, vec![value]))
    }

    pub fn finish(self) -> Function {
        Function {
            name: self.name,
            return_type: self.return_type,
            parameters: self.parameters,
            named_regs: self.named_regs,
            blocks: self.blocks,
            entry_block: 0,
        }
    }
}
