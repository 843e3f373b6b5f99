//! Binary operator lowering
//!
//! The source operator set splits four ways: plain arithmetic and
//! comparisons map to opcodes after unification, assignment forms write
//! through an address, indexing computes an address, and the logical
//! operators lower to control flow.

use super::casts::retype;
use super::errors::CodegenError;
use super::expressions::{operand_type, require_value, AccessMode};
use super::FuncLowering;
use crate::ir::{IrType, Opcode, Operand, TypeRank};
use scc_ast::{BinaryOp, Expr};
use scc_common::{CompilerError, SourceSpan};
use std::cmp::Ordering;

/// Maps a source operator to its opcode. Assignment, logical, and index
/// forms have no direct opcode and lower structurally instead.
fn arith_opcode(op: BinaryOp) -> Option<Opcode> {
    match op {
        BinaryOp::Add => Some(Opcode::Add),
        BinaryOp::Sub => Some(Opcode::Sub),
        BinaryOp::Mul => Some(Opcode::Mul),
        BinaryOp::Div => Some(Opcode::Div),
        BinaryOp::Mod => Some(Opcode::Rem),
        BinaryOp::BitAnd => Some(Opcode::And),
        BinaryOp::BitOr => Some(Opcode::Or),
        BinaryOp::BitXor => Some(Opcode::Xor),
        BinaryOp::LeftShift => Some(Opcode::Shl),
        BinaryOp::RightShift => Some(Opcode::Shr),
        BinaryOp::Equal => Some(Opcode::Eq),
        BinaryOp::NotEqual => Some(Opcode::Ne),
        BinaryOp::Less => Some(Opcode::Lt),
        BinaryOp::LessEqual => Some(Opcode::Le),
        BinaryOp::Greater => Some(Opcode::Gt),
        BinaryOp::GreaterEqual => Some(Opcode::Ge),
        _ => None,
    }
}

impl FuncLowering<'_> {
    pub(crate) fn lower_binary(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        mode: AccessMode,
        span: &SourceSpan,
    ) -> Result<Operand, CompilerError> {
        match op {
            BinaryOp::Assign => {
                require_value(mode, span)?;
                self.lower_assignment(left, right, span)
            }
            BinaryOp::Index => self.lower_index(left, right, mode, span),
            BinaryOp::LogicalAnd | BinaryOp::LogicalOr => {
                require_value(mode, span)?;
                self.lower_short_circuit(op, left, right)
            }
            _ => {
                require_value(mode, span)?;
                if let Some(base) = op.compound_base() {
                    self.lower_compound_assignment(base, left, right, span)
                } else {
                    self.lower_arithmetic(op, left, right, span)
                }
            }
        }
    }

    fn lower_arithmetic(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        span: &SourceSpan,
    ) -> Result<Operand, CompilerError> {
        let lhs = self.lower_expr(left, AccessMode::Load)?;
        let lhs = self.decay_if_array(lhs);
        let rhs = self.lower_expr(right, AccessMode::Load)?;
        let rhs = self.decay_if_array(rhs);
        let Some(opcode) = arith_opcode(op) else {
            return Err(CodegenError::internal(
                format!("'{}' is not an arithmetic operator", op),
                span.start.clone(),
            )
            .into());
        };

        let lhs_ptr = lhs.ty().is_some_and(IrType::is_pointer);
        let rhs_ptr = rhs.ty().is_some_and(IrType::is_pointer);
        if lhs_ptr || rhs_ptr {
            return self.lower_pointer_arithmetic(opcode, lhs, rhs, span);
        }
        let (lhs, rhs, ty) = self.unify(lhs, rhs, span)?;
        let result_ty = if opcode.is_comparison() {
            IrType::I32
        } else {
            ty
        };
        Ok(self.builder.build_binary(opcode, lhs, rhs, result_ty))
    }

    /// Pointer operands restrict the operator menu. Add and subtract
    /// move by whole elements through index-at, pointer minus pointer
    /// compares addresses as 64-bit integers, and comparisons admit a
    /// literal zero on the other side. Everything else is malformed
    /// input.
    fn lower_pointer_arithmetic(
        &mut self,
        opcode: Opcode,
        lhs: Operand,
        rhs: Operand,
        span: &SourceSpan,
    ) -> Result<Operand, CompilerError> {
        let lhs_ty = operand_type(&lhs, span)?;
        let rhs_ty = operand_type(&rhs, span)?;
        match opcode {
            Opcode::Add => {
                if lhs_ty.is_pointer() && rhs_ty.is_pointer() {
                    return Err(CodegenError::internal(
                        "cannot add two pointers".to_string(),
                        span.start.clone(),
                    )
                    .into());
                }
                let (ptr, ptr_ty, offset) = if lhs_ty.is_pointer() {
                    (lhs, lhs_ty, rhs)
                } else {
                    (rhs, rhs_ty, lhs)
                };
                Ok(self.builder.build_index_at(ptr, vec![offset], ptr_ty))
            }
            Opcode::Sub => {
                if lhs_ty.is_pointer() && rhs_ty.is_pointer() {
                    let a = self.builder.build_cast(Opcode::PtrToInt, lhs, IrType::I64);
                    let b = self.builder.build_cast(Opcode::PtrToInt, rhs, IrType::I64);
                    return Ok(self.builder.build_binary(Opcode::Sub, a, b, IrType::I64));
                }
                if !lhs_ty.is_pointer() {
                    return Err(CodegenError::internal(
                        "cannot subtract a pointer from an integer".to_string(),
                        span.start.clone(),
                    )
                    .into());
                }
                let negated = self.builder.build_binary(
                    Opcode::Sub,
                    Operand::immediate(0, rhs_ty.clone()),
                    rhs,
                    rhs_ty,
                );
                Ok(self.builder.build_index_at(lhs, vec![negated], lhs_ty))
            }
            _ if opcode.is_comparison() => {
                let lhs = if lhs_ty.is_pointer() {
                    lhs
                } else {
                    self.implicit_cast(lhs, &rhs_ty, span)?
                };
                let rhs = if rhs_ty.is_pointer() {
                    rhs
                } else {
                    self.implicit_cast(rhs, &lhs_ty, span)?
                };
                Ok(self.builder.build_binary(opcode, lhs, rhs, IrType::I32))
            }
            _ => Err(CodegenError::internal(
                format!("'{}' requires integer operands", opcode),
                span.start.clone(),
            )
            .into()),
        }
    }

    /// Brings two elementary operands to one width. The narrower side
    /// is zero-extended to the wider; at equal widths a mixed
    /// signedness pair retypes the signed side as unsigned without an
    /// instruction.
    fn unify(
        &mut self,
        lhs: Operand,
        rhs: Operand,
        span: &SourceSpan,
    ) -> Result<(Operand, Operand, IrType), CompilerError> {
        let lt = operand_type(&lhs, span)?;
        let rt = operand_type(&rhs, span)?;
        if !lt.is_elementary() || !rt.is_elementary() {
            return Err(CodegenError::internal(
                "unification requires elementary operands".to_string(),
                span.start.clone(),
            )
            .into());
        }
        match lt.bits.cmp(&rt.bits) {
            Ordering::Less => {
                let widened = self.builder.build_cast(Opcode::Widen, lhs, rt.clone());
                Ok((widened, rhs, rt))
            }
            Ordering::Greater => {
                let widened = self.builder.build_cast(Opcode::Widen, rhs, lt.clone());
                Ok((lhs, widened, lt))
            }
            Ordering::Equal => {
                if lt == rt {
                    Ok((lhs, rhs, lt))
                } else {
                    let unsigned = IrType { signed: false, ..lt };
                    let lhs = retype(lhs, &unsigned);
                    let rhs = retype(rhs, &unsigned);
                    Ok((lhs, rhs, unsigned))
                }
            }
        }
    }

    /// Short-circuit operators lower to a conditional jump around the
    /// right operand and merge the two arriving values. No
    /// booleanization is applied; the result carries the left operand's
    /// type.
    fn lower_short_circuit(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
    ) -> Result<Operand, CompilerError> {
        let (rhs_name, join_name) = match op {
            BinaryOp::LogicalAnd => ("land.rhs", "land.end"),
            _ => ("lor.rhs", "lor.end"),
        };
        let lhs = self.lower_expr(left, AccessMode::Load)?;
        let lhs_end = self.builder.current_block();
        let rhs_block = self.builder.add_block(rhs_name);
        let join = self.builder.add_block(join_name);
        let (on_true, on_false) = match op {
            BinaryOp::LogicalAnd => (rhs_block, join),
            _ => (join, rhs_block),
        };
        if self.builder.build_branch(lhs.clone(), on_true, on_false) {
            self.builder.add_predecessor(rhs_block, lhs_end);
            self.builder.add_predecessor(join, lhs_end);
        }

        self.builder.select_block(rhs_block);
        let rhs = self.lower_expr(right, AccessMode::Load)?;
        let rhs_end = self.builder.current_block();
        if self.builder.build_jump(join) {
            self.builder.add_predecessor(join, rhs_end);
        }

        self.builder.select_block(join);
        let ty = operand_type(&lhs, &left.span)?;
        Ok(self.builder.build_merge((lhs, lhs_end), (rhs, rhs_end), ty))
    }

    /// Plain assignment stores the converted right-hand value and
    /// yields it, so assignments chain right to left.
    fn lower_assignment(
        &mut self,
        left: &Expr,
        right: &Expr,
        span: &SourceSpan,
    ) -> Result<Operand, CompilerError> {
        let addr = self.lower_expr(left, AccessMode::Store)?;
        let value = self.lower_expr(right, AccessMode::Load)?;
        let Some(target_ty) = addr.ty().and_then(IrType::dereferenced) else {
            return Err(CodegenError::InvalidLvalue {
                location: span.start.clone(),
            }
            .into());
        };
        if !target_ty.dims.is_empty() {
            // Whole arrays are not assignable.
            return Err(CodegenError::InvalidLvalue {
                location: span.start.clone(),
            }
            .into());
        }
        let value = self.decay_if_array(value);
        let value = self.implicit_cast(value, &target_ty, span)?;
        self.builder.build_store(value.clone(), addr);
        Ok(value)
    }

    /// Compound assignment reads the place once, applies the base
    /// operator, converts back to the place's type, and stores.
    fn lower_compound_assignment(
        &mut self,
        base: BinaryOp,
        left: &Expr,
        right: &Expr,
        span: &SourceSpan,
    ) -> Result<Operand, CompilerError> {
        let addr = self.lower_expr(left, AccessMode::Store)?;
        let Some(value_ty) = addr.ty().and_then(IrType::dereferenced) else {
            return Err(CodegenError::InvalidLvalue {
                location: span.start.clone(),
            }
            .into());
        };
        if !value_ty.dims.is_empty() {
            return Err(CodegenError::InvalidLvalue {
                location: span.start.clone(),
            }
            .into());
        }
        let old = self.builder.build_load(addr.clone(), value_ty.clone());
        let rhs = self.lower_expr(right, AccessMode::Load)?;
        let rhs = self.decay_if_array(rhs);
        let Some(opcode) = arith_opcode(base) else {
            return Err(CodegenError::internal(
                format!("'{}' is not a compound assignment base", base),
                span.start.clone(),
            )
            .into());
        };

        let rhs_ptr = rhs.ty().is_some_and(IrType::is_pointer);
        let result = if value_ty.is_pointer() || rhs_ptr {
            self.lower_pointer_arithmetic(opcode, old, rhs, span)?
        } else {
            let (lhs, rhs, ty) = self.unify(old, rhs, span)?;
            self.builder.build_binary(opcode, lhs, rhs, ty)
        };
        let result = self.implicit_cast(result, &value_ty, span)?;
        self.builder.build_store(result.clone(), addr);
        Ok(result)
    }

    /// Indexing an array keeps the aggregate address and steps inside
    /// it behind a leading zero; indexing a pointer steps from the
    /// loaded address itself.
    fn lower_index(
        &mut self,
        left: &Expr,
        right: &Expr,
        mode: AccessMode,
        span: &SourceSpan,
    ) -> Result<Operand, CompilerError> {
        let base = self.lower_expr(left, AccessMode::Load)?;
        let index = self.lower_expr(right, AccessMode::Load)?;
        let base_ty = operand_type(&base, span)?;
        let addr = match base_ty.rank() {
            TypeRank::Array => {
                let Some(element_ty) = base_ty.without_outer_dim() else {
                    return Err(CodegenError::internal(
                        "array type lost its dimensions".to_string(),
                        span.start.clone(),
                    )
                    .into());
                };
                self.builder.build_index_at(
                    base,
                    vec![Operand::immediate(0, IrType::I64), index],
                    element_ty,
                )
            }
            TypeRank::Pointer => self.builder.build_index_at(base, vec![index], base_ty),
            TypeRank::Elementary => {
                return Err(CodegenError::internal(
                    "indexing a non-pointer value".to_string(),
                    span.start.clone(),
                )
                .into());
            }
        };
        match mode {
            AccessMode::Store => Ok(addr),
            AccessMode::Load => Ok(self.load_if_scalar(addr)),
        }
    }
}
