//! Cast lowering
//!
//! One matrix covers both implicit conversions and explicit cast
//! expressions, keyed by the ranks of the source and target types.
//! Explicit casts unlock the reinterpreting entries; everything the
//! matrix leaves blank is an illegal cast.

use super::errors::CodegenError;
use super::FuncLowering;
use crate::ir::{IrType, Opcode, Operand, TypeRank};
use scc_common::{CompilerError, SourceSpan};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CastKind {
    Implicit,
    Explicit,
}

/// Re-tags a value with a new type without emitting an instruction.
pub(crate) fn retype(value: Operand, target: &IrType) -> Operand {
    match value {
        Operand::Register { reg, .. } => Operand::Register {
            reg,
            ty: target.clone(),
        },
        Operand::Immediate { value, .. } => Operand::Immediate {
            value,
            ty: target.clone(),
        },
        other => other,
    }
}

fn illegal(from: IrType, to: IrType, span: &SourceSpan) -> CompilerError {
    CodegenError::IllegalCast {
        from,
        to,
        location: span.start.clone(),
    }
    .into()
}

impl FuncLowering<'_> {
    pub(crate) fn implicit_cast(
        &mut self,
        value: Operand,
        target: &IrType,
        span: &SourceSpan,
    ) -> Result<Operand, CompilerError> {
        self.cast(value, target, CastKind::Implicit, span)
    }

    pub(crate) fn explicit_cast(
        &mut self,
        value: Operand,
        target: &IrType,
        span: &SourceSpan,
    ) -> Result<Operand, CompilerError> {
        self.cast(value, target, CastKind::Explicit, span)
    }

    /// Drops the outermost dimension of an array-ranked value, turning
    /// it into a pointer to the front element. Other values pass
    /// through untouched.
    pub(crate) fn decay_if_array(&mut self, value: Operand) -> Operand {
        let Some(ty) = value.ty() else {
            return value;
        };
        if !ty.is_array() {
            return value;
        }
        let Some(decayed) = ty.without_outer_dim() else {
            return value;
        };
        self.builder.build_cast(Opcode::Bitcast, value, decayed)
    }

    fn cast(
        &mut self,
        value: Operand,
        target: &IrType,
        kind: CastKind,
        span: &SourceSpan,
    ) -> Result<Operand, CompilerError> {
        if target.is_void() {
            return Ok(Operand::Void);
        }
        let Some(source) = value.ty().cloned() else {
            return Err(illegal(IrType::VOID, target.clone(), span));
        };
        if source == *target {
            return Ok(value);
        }
        match (source.rank(), target.rank()) {
            (TypeRank::Elementary, TypeRank::Elementary) => {
                Ok(self.elementary_cast(value, &source, target))
            }
            (TypeRank::Elementary, TypeRank::Pointer) => {
                if value.is_zero_literal() {
                    // The null pointer is a zero immediate of pointer
                    // type; no instruction needed.
                    Ok(Operand::immediate(0, target.clone()))
                } else {
                    Err(illegal(source, target.clone(), span))
                }
            }
            (TypeRank::Array, TypeRank::Pointer) => {
                let Some(decayed) = source.without_outer_dim() else {
                    return Err(illegal(source, target.clone(), span));
                };
                let allowed = match kind {
                    CastKind::Implicit => decayed == *target,
                    CastKind::Explicit => true,
                };
                if allowed {
                    Ok(self
                        .builder
                        .build_cast(Opcode::Bitcast, value, target.clone()))
                } else {
                    Err(illegal(source, target.clone(), span))
                }
            }
            (TypeRank::Pointer, TypeRank::Pointer) => {
                if kind == CastKind::Explicit {
                    Ok(self
                        .builder
                        .build_cast(Opcode::Bitcast, value, target.clone()))
                } else {
                    Err(illegal(source, target.clone(), span))
                }
            }
            (TypeRank::Pointer, TypeRank::Elementary) => {
                if kind == CastKind::Explicit {
                    Ok(self
                        .builder
                        .build_cast(Opcode::PtrToInt, value, target.clone()))
                } else {
                    Err(illegal(source, target.clone(), span))
                }
            }
            _ => Err(illegal(source, target.clone(), span)),
        }
    }

    /// Width decides the instruction between integers: widen up, narrow
    /// down, and a pure signedness change re-tags in place.
    fn elementary_cast(&mut self, value: Operand, source: &IrType, target: &IrType) -> Operand {
        match source.bits.cmp(&target.bits) {
            Ordering::Less => self.builder.build_cast(Opcode::Widen, value, target.clone()),
            Ordering::Greater => self
                .builder
                .build_cast(Opcode::Narrow, value, target.clone()),
            Ordering::Equal => retype(value, target),
        }
    }
}
