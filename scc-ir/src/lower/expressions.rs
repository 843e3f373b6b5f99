//! Expression lowering
//!
//! Expressions lower in one of two access modes. `Load` produces the
//! expression's value; `Store` produces the address of the place the
//! expression names. Only variables, indexing, and dereferences have
//! addresses; everything else rejects `Store` as an invalid lvalue.

use super::errors::CodegenError;
use super::types::lower_type;
use super::FuncLowering;
use crate::ir::{IrType, Operand};
use log::trace;
use scc_ast::{Expr, ExprKind};
use scc_common::{CompilerError, SourceSpan};

/// What the context wants from an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AccessMode {
    /// The expression's value.
    Load,
    /// The address of the place the expression names.
    Store,
}

/// Rejects `Store` for expressions that have no address.
pub(crate) fn require_value(mode: AccessMode, span: &SourceSpan) -> Result<(), CompilerError> {
    match mode {
        AccessMode::Load => Ok(()),
        AccessMode::Store => Err(CodegenError::InvalidLvalue {
            location: span.start.clone(),
        }
        .into()),
    }
}

/// Reads the type an operand carries, treating a bare `Void` as
/// malformed input.
pub(crate) fn operand_type(operand: &Operand, span: &SourceSpan) -> Result<IrType, CompilerError> {
    operand.ty().cloned().ok_or_else(|| {
        CodegenError::internal("operand carries no type".to_string(), span.start.clone()).into()
    })
}

impl FuncLowering<'_> {
    pub(crate) fn lower_expr(
        &mut self,
        expr: &Expr,
        mode: AccessMode,
    ) -> Result<Operand, CompilerError> {
        match &expr.kind {
            ExprKind::IntLiteral {
                value,
                literal_type,
            } => {
                require_value(mode, &expr.span)?;
                let ty = lower_type(literal_type, &expr.span)?;
                Ok(Operand::immediate(*value, ty))
            }
            ExprKind::Variable(name) => self.lower_variable(name, mode, &expr.span),
            ExprKind::Binary { op, left, right } => {
                self.lower_binary(*op, left, right, mode, &expr.span)
            }
            ExprKind::Unary { op, operand } => self.lower_unary(*op, operand, mode, &expr.span),
            ExprKind::Call {
                function,
                arguments,
            } => {
                require_value(mode, &expr.span)?;
                self.lower_call(function, arguments, &expr.span)
            }
            ExprKind::Cast {
                target_type,
                operand,
            } => {
                require_value(mode, &expr.span)?;
                let value = self.lower_expr(operand, AccessMode::Load)?;
                let target = lower_type(target_type, &expr.span)?;
                self.explicit_cast(value, &target, &expr.span)
            }
            ExprKind::Conditional {
                condition,
                then_expr,
                else_expr,
            } => {
                require_value(mode, &expr.span)?;
                self.lower_conditional(condition, then_expr, else_expr)
            }
            ExprKind::SizeofType(ty) => {
                require_value(mode, &expr.span)?;
                let Some(size) = ty.size_in_bytes() else {
                    return Err(CodegenError::InvalidType {
                        ast_type: ty.clone(),
                        message: "void has no size".to_string(),
                        location: expr.span.start.clone(),
                    }
                    .into());
                };
                Ok(Operand::immediate(size as i64, IrType::U64))
            }
        }
    }

    fn lower_variable(
        &mut self,
        name: &str,
        mode: AccessMode,
        span: &SourceSpan,
    ) -> Result<Operand, CompilerError> {
        let Some(slot) = self.scopes.lookup(name) else {
            return Err(CodegenError::UndefinedVariable {
                name: name.to_string(),
                location: span.start.clone(),
            }
            .into());
        };
        let slot = slot.clone();
        match mode {
            AccessMode::Store => Ok(slot),
            AccessMode::Load => Ok(self.load_if_scalar(slot)),
        }
    }

    /// Loads through `addr` unless the pointee is an array. Arrays are
    /// used by address and never loaded whole.
    pub(crate) fn load_if_scalar(&mut self, addr: Operand) -> Operand {
        let Some(pointee) = addr.ty().and_then(IrType::dereferenced) else {
            return addr;
        };
        if !pointee.dims.is_empty() {
            return addr;
        }
        self.builder.build_load(addr, pointee)
    }

    fn lower_call(
        &mut self,
        name: &str,
        arguments: &[Expr],
        span: &SourceSpan,
    ) -> Result<Operand, CompilerError> {
        let Some(signature) = self.signatures.get(name) else {
            return Err(CodegenError::UndefinedFunction {
                name: name.to_string(),
                location: span.start.clone(),
            }
            .into());
        };
        let signature = signature.clone();
        if arguments.len() != signature.param_types.len() {
            return Err(CodegenError::internal(
                format!(
                    "call to '{}' passes {} arguments for {} parameters",
                    name,
                    arguments.len(),
                    signature.param_types.len()
                ),
                span.start.clone(),
            )
            .into());
        }
        if !self.called.iter().any(|called| called == name) {
            self.called.push(name.to_string());
        }

        let mut args = Vec::with_capacity(arguments.len());
        for (argument, param_type) in arguments.iter().zip(&signature.param_types) {
            let value = self.lower_expr(argument, AccessMode::Load)?;
            args.push(self.implicit_cast(value, param_type, &argument.span)?);
        }
        trace!("Lowering call to '{}' with {} arguments", name, args.len());
        Ok(self.builder.build_call(name, args, signature.return_type))
    }

    /// A conditional keeps both arms in their own blocks and merges the
    /// arriving values. The merged type is the first arm's; void arms
    /// produce no value.
    fn lower_conditional(
        &mut self,
        condition: &Expr,
        then_expr: &Expr,
        else_expr: &Expr,
    ) -> Result<Operand, CompilerError> {
        let cond = self.lower_expr(condition, AccessMode::Load)?;
        let then_block = self.builder.add_block("cond.true");
        let else_block = self.builder.add_block("cond.false");
        let join = self.builder.add_block("cond.end");
        let from = self.builder.current_block();
        if self.builder.build_branch(cond, then_block, else_block) {
            self.builder.add_predecessor(then_block, from);
            self.builder.add_predecessor(else_block, from);
        }

        self.builder.select_block(then_block);
        let then_value = self.lower_expr(then_expr, AccessMode::Load)?;
        let then_end = self.builder.current_block();
        if self.builder.build_jump(join) {
            self.builder.add_predecessor(join, then_end);
        }

        self.builder.select_block(else_block);
        let else_value = self.lower_expr(else_expr, AccessMode::Load)?;
        let else_end = self.builder.current_block();
        if self.builder.build_jump(join) {
            self.builder.add_predecessor(join, else_end);
        }

        self.builder.select_block(join);
        let Some(ty) = then_value.ty().cloned() else {
            return Ok(Operand::Void);
        };
        Ok(self
            .builder
            .build_merge((then_value, then_end), (else_value, else_end), ty))
    }
}
