//! Unit tests for the IR data model

use super::*;
use scc_common::CompilerError;

#[test]
fn rank_classification() {
    assert_eq!(IrType::I32.rank(), TypeRank::Elementary);
    assert_eq!(IrType::I32.pointer_to().rank(), TypeRank::Pointer);

    let array = IrType {
        bits: 32,
        signed: true,
        indirection: 0,
        dims: vec![4],
    };
    assert_eq!(array.rank(), TypeRank::Array);
    // Dimensions outrank indirection: a pointer to an array is still
    // array-shaped for cast and indexing purposes.
    assert_eq!(array.pointer_to().rank(), TypeRank::Array);
}

#[test]
fn type_sizes() {
    assert_eq!(IrType::I32.size_in_bytes(), Some(4));
    assert_eq!(IrType::U8.size_in_bytes(), Some(1));
    assert_eq!(IrType::VOID.size_in_bytes(), None);
    assert_eq!(IrType::I32.pointer_to().size_in_bytes(), Some(8));

    let matrix = IrType {
        bits: 32,
        signed: true,
        indirection: 0,
        dims: vec![2, 3],
    };
    assert_eq!(matrix.size_in_bytes(), Some(24));
    assert_eq!(matrix.pointer_to().size_in_bytes(), Some(8));
}

#[test]
fn type_algebra() {
    let matrix = IrType {
        bits: 32,
        signed: true,
        indirection: 0,
        dims: vec![2, 3],
    };
    let slot = matrix.pointer_to();
    assert_eq!(slot.indirection, 1);
    assert_eq!(slot.dereferenced(), Some(matrix.clone()));
    assert_eq!(
        slot.without_outer_dim(),
        Some(IrType {
            bits: 32,
            signed: true,
            indirection: 1,
            dims: vec![3],
        })
    );
    assert_eq!(IrType::I32.without_outer_dim(), None);
    assert_eq!(IrType::I32.dereferenced(), None);
}

#[test]
fn type_display() {
    assert_eq!(IrType::I32.to_string(), "i32");
    assert_eq!(IrType::U8.to_string(), "u8");
    assert_eq!(IrType::VOID.to_string(), "void");
    assert_eq!(IrType::I64.pointer_to().pointer_to().to_string(), "i64**");

    let matrix = IrType {
        bits: 64,
        signed: true,
        indirection: 1,
        dims: vec![2, 3],
    };
    assert_eq!(matrix.to_string(), "[2 x [3 x i64]]*");
}

#[test]
fn operand_display() {
    assert_eq!(Operand::temp(0, IrType::I32).to_string(), "%0");
    assert_eq!(Operand::named(1, IrType::I32.pointer_to()).to_string(), "$1");
    assert_eq!(Operand::global(2, IrType::I32.pointer_to()).to_string(), "@2");
    assert_eq!(Operand::immediate(42, IrType::I32).to_string(), "42");
    assert_eq!(Operand::Label(7).to_string(), "L7");
    assert_eq!(Operand::Void.to_string(), "void");

    let callee = Operand::Register {
        reg: Reg::Func("main".to_string()),
        ty: IrType::I32,
    };
    assert_eq!(callee.to_string(), "@main");
}

#[test]
fn zero_literal_detection() {
    assert!(Operand::immediate(0, IrType::I32).is_zero_literal());
    assert!(Operand::immediate(0, IrType::U64).is_zero_literal());
    assert!(!Operand::immediate(1, IrType::I32).is_zero_literal());
    assert!(!Operand::temp(0, IrType::I32).is_zero_literal());
}

#[test]
fn closed_block_drops_appends() {
    let mut block = BasicBlock::new(0);
    assert!(!block.is_closed());
    assert!(block.add_instruction(Instruction::new(Opcode::Jump, vec![Operand::Label(1)])));
    assert!(block.is_closed());

    let kept = block.add_instruction(Instruction::new(
        Opcode::Return,
        vec![Operand::immediate(0, IrType::I32)],
    ));
    assert!(!kept);
    assert_eq!(block.instructions.len(), 1);
}

#[test]
fn predecessors_stay_deduplicated() {
    let mut block = BasicBlock::new(3);
    block.add_predecessor(1);
    block.add_predecessor(2);
    block.add_predecessor(1);
    assert_eq!(block.predecessors, vec![1, 2]);
}

#[test]
fn successors_come_from_the_terminator() {
    let mut block = BasicBlock::new(0);
    assert_eq!(block.successors(), Vec::<u32>::new());

    block.add_instruction(Instruction::new(
        Opcode::Branch,
        vec![
            Operand::immediate(1, IrType::I32),
            Operand::Label(4),
            Operand::Label(5),
        ],
    ));
    assert_eq!(block.successors(), vec![4, 5]);
}

#[test]
fn operand_accessor_reports_range_errors() {
    let instruction = Instruction::new(Opcode::Load, vec![Operand::temp(0, IrType::I32)]);
    assert!(instruction.operand(0).is_ok());

    let err = instruction.operand(1).unwrap_err();
    match err {
        CompilerError::InternalError { message } => {
            assert!(message.contains("load"));
            assert!(message.contains("out of range"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn builder_assigns_dense_ids() {
    let mut builder = FunctionBuilder::new("f", IrType::I32);
    let a = builder.add_parameter(IrType::I32);
    let b = builder.add_parameter(IrType::I64);
    assert_eq!(a.to_string(), "%0");
    assert_eq!(b.to_string(), "%1");
    assert_eq!(builder.new_temp(IrType::I32).to_string(), "%2");

    assert_eq!(builder.current_block(), 0);
    let next = builder.add_block("next");
    assert_eq!(next, 1);
    // Allocation does not select.
    assert_eq!(builder.current_block(), 0);
    builder.select_block(next);
    assert_eq!(builder.current_block(), 1);
}

#[test]
fn builder_drops_terminators_in_closed_blocks() {
    let mut builder = FunctionBuilder::new("f", IrType::VOID);
    let target = builder.add_block("target");
    assert!(builder.build_jump(target));
    assert!(!builder.build_jump(target));
    assert!(!builder.build_return(Operand::Void));
    assert!(builder.current_is_closed());

    let function = builder.finish();
    assert_eq!(function.blocks[0].instructions.len(), 1);
}

#[test]
fn builder_produces_a_complete_function() {
    let mut builder = FunctionBuilder::new("answer", IrType::I32);
    let slot = builder.add_named("x", &IrType::I32);
    assert_eq!(slot.ty(), Some(&IrType::I32.pointer_to()));
    builder.build_alloc(slot.clone());
    builder.build_store(Operand::immediate(42, IrType::I32), slot.clone());
    let value = builder.build_load(slot, IrType::I32);
    builder.build_return(value);

    let function = builder.finish();
    assert_eq!(function.name, "answer");
    assert_eq!(function.entry_block, 0);
    assert_eq!(function.named_regs.len(), 1);
    assert_eq!(function.named_regs[0].name, "x");

    let entry = function.entry().unwrap();
    assert!(entry.is_closed());
    assert_eq!(entry.instructions.len(), 4);
    assert_eq!(entry.instructions[0].opcode, Opcode::Alloc);
    assert_eq!(entry.instructions[3].opcode, Opcode::Return);
}

#[test]
fn merge_operands_carry_arrival_labels() {
    let mut builder = FunctionBuilder::new("f", IrType::I32);
    let merged = builder.build_merge(
        (Operand::immediate(1, IrType::I32), 4),
        (Operand::immediate(2, IrType::I32), 5),
        IrType::I32,
    );
    let function = builder.finish();
    let instruction = &function.blocks[0].instructions[0];
    assert_eq!(instruction.opcode, Opcode::Merge);
    assert_eq!(instruction.operands[0], merged);
    assert_eq!(instruction.operands[2], Operand::Label(4));
    assert_eq!(instruction.operands[4], Operand::Label(5));
}

#[test]
fn instruction_display_forms() {
    let load = Instruction::new(
        Opcode::Load,
        vec![
            Operand::temp(0, IrType::I32),
            Operand::named(0, IrType::I32.pointer_to()),
        ],
    );
    assert_eq!(load.to_string(), "%0 = load $0");

    let add = Instruction::new(
        Opcode::Add,
        vec![
            Operand::temp(2, IrType::I32),
            Operand::temp(0, IrType::I32),
            Operand::immediate(1, IrType::I32),
        ],
    );
    assert_eq!(add.to_string(), "%2 = add %0, 1");

    let widen = Instruction::new(
        Opcode::Widen,
        vec![Operand::temp(1, IrType::I64), Operand::temp(0, IrType::I8)],
    );
    assert_eq!(widen.to_string(), "%1 = widen %0 to i64");

    let call = Instruction::new(
        Opcode::Call,
        vec![
            Operand::Void,
            Operand::Register {
                reg: Reg::Func("puts".to_string()),
                ty: IrType::VOID,
            },
            Operand::temp(0, IrType::I32),
        ],
    );
    assert_eq!(call.to_string(), "call @puts(%0)");

    let zero_init = Instruction::new(
        Opcode::Global,
        vec![Operand::global(0, IrType::I32.pointer_to())],
    );
    assert_eq!(zero_init.to_string(), "@0 = global");
}

#[test]
fn code_serializes_to_json() {
    let mut builder = FunctionBuilder::new("main", IrType::I32);
    builder.build_return(Operand::immediate(0, IrType::I32));

    let mut code = Code::new();
    code.functions.push(builder.finish());
    code.declarations.push(FunctionDecl {
        name: "getchar".to_string(),
        return_type: IrType::I32,
        param_types: vec![],
    });

    assert!(code.get_function("main").is_some());
    assert!(code.get_function("missing").is_none());

    let json = code.to_json().unwrap();
    assert!(json.contains("\"main\""));
    assert!(json.contains("\"getchar\""));

    let parsed: Code = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, code);
}
