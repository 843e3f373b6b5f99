//! Unary operator lowering

use super::errors::CodegenError;
use super::expressions::{operand_type, require_value, AccessMode};
use super::FuncLowering;
use crate::ir::{IrType, Opcode, Operand};
use scc_ast::{Expr, UnaryOp};
use scc_common::{CompilerError, SourceSpan};

impl FuncLowering<'_> {
    pub(crate) fn lower_unary(
        &mut self,
        op: UnaryOp,
        operand: &Expr,
        mode: AccessMode,
        span: &SourceSpan,
    ) -> Result<Operand, CompilerError> {
        match op {
            UnaryOp::Plus => {
                require_value(mode, span)?;
                self.lower_expr(operand, AccessMode::Load)
            }
            UnaryOp::Minus => {
                require_value(mode, span)?;
                let value = self.lower_expr(operand, AccessMode::Load)?;
                let ty = operand_type(&value, span)?;
                if !ty.is_elementary() {
                    return Err(CodegenError::internal(
                        "negation requires an integer operand".to_string(),
                        span.start.clone(),
                    )
                    .into());
                }
                let zero = Operand::immediate(0, ty.clone());
                Ok(self.builder.build_binary(Opcode::Sub, zero, value, ty))
            }
            UnaryOp::BitNot => {
                require_value(mode, span)?;
                let value = self.lower_expr(operand, AccessMode::Load)?;
                let ty = operand_type(&value, span)?;
                if !ty.is_elementary() {
                    return Err(CodegenError::internal(
                        "bitwise complement requires an integer operand".to_string(),
                        span.start.clone(),
                    )
                    .into());
                }
                let ones = Operand::immediate(-1, ty.clone());
                Ok(self.builder.build_binary(Opcode::Xor, value, ones, ty))
            }
            UnaryOp::LogicalNot => {
                require_value(mode, span)?;
                let value = self.lower_expr(operand, AccessMode::Load)?;
                let value = self.decay_if_array(value);
                let ty = operand_type(&value, span)?;
                // Truth is a comparison against zero of the operand's
                // own type, so null pointers test false too.
                let zero = Operand::immediate(0, ty);
                Ok(self
                    .builder
                    .build_binary(Opcode::Eq, value, zero, IrType::I32))
            }
            UnaryOp::Dereference => self.lower_deref(operand, mode, span),
            UnaryOp::AddressOf => {
                require_value(mode, span)?;
                self.lower_expr(operand, AccessMode::Store)
            }
            UnaryOp::PreIncrement => self.lower_incdec(operand, Opcode::Add, true, mode, span),
            UnaryOp::PostIncrement => self.lower_incdec(operand, Opcode::Add, false, mode, span),
            UnaryOp::PreDecrement => self.lower_incdec(operand, Opcode::Sub, true, mode, span),
            UnaryOp::PostDecrement => self.lower_incdec(operand, Opcode::Sub, false, mode, span),
        }
    }

    /// The operand's value is the address of the named place, so
    /// `Store` hands it back as is and `Load` reads through it. Arrays
    /// decay first, making `*a` the front element.
    fn lower_deref(
        &mut self,
        operand: &Expr,
        mode: AccessMode,
        span: &SourceSpan,
    ) -> Result<Operand, CompilerError> {
        let value = self.lower_expr(operand, AccessMode::Load)?;
        let pointer = self.decay_if_array(value);
        let ty = operand_type(&pointer, span)?;
        if !ty.is_pointer() {
            return Err(CodegenError::internal(
                "dereferencing a non-pointer value".to_string(),
                span.start.clone(),
            )
            .into());
        }
        match mode {
            AccessMode::Store => Ok(pointer),
            AccessMode::Load => Ok(self.load_if_scalar(pointer)),
        }
    }

    /// Increments and decrements read the place, step it, and store
    /// back. Pointers step by one element through index-at; integers
    /// step by a one of their own width. Prefix forms yield the new
    /// value, postfix forms the old.
    fn lower_incdec(
        &mut self,
        operand: &Expr,
        opcode: Opcode,
        prefix: bool,
        mode: AccessMode,
        span: &SourceSpan,
    ) -> Result<Operand, CompilerError> {
        require_value(mode, span)?;
        let addr = self.lower_expr(operand, AccessMode::Store)?;
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
        let new = if value_ty.is_pointer() {
            let step = match opcode {
                Opcode::Sub => -1,
                _ => 1,
            };
            self.builder.build_index_at(
                old.clone(),
                vec![Operand::immediate(step, IrType::I64)],
                value_ty,
            )
        } else {
            let one = Operand::immediate(1, value_ty.clone());
            self.builder.build_binary(opcode, old.clone(), one, value_ty)
        };
        self.builder.build_store(new.clone(), addr);
        Ok(if prefix { new } else { old })
    }
}
