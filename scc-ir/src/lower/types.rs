//! Source type lowering

use super::errors::CodegenError;
use crate::ir::IrType;
use scc_ast::Type;
use scc_common::SourceSpan;

/// Lowers a source type by peeling array dimensions outermost-first,
/// then pointer indirections, down to an elementary terminal.
///
/// Pointer-to-array source types have no flat encoding and are rejected;
/// the checker never produces them.
pub(crate) fn lower_type(ty: &Type, span: &SourceSpan) -> Result<IrType, CodegenError> {
    let mut dims = Vec::new();
    let mut node = ty;
    while let Type::Array { element_type, size } = node {
        dims.push(*size);
        node = element_type;
    }
    let mut indirection = 0;
    while let Type::Pointer { target } = node {
        indirection += 1;
        node = target;
    }
    let (bits, signed) = match node {
        Type::Void => (0, false),
        Type::Char => (8, true),
        Type::UnsignedChar => (8, false),
        Type::Short => (16, true),
        Type::UnsignedShort => (16, false),
        Type::Int => (32, true),
        Type::UnsignedInt => (32, false),
        Type::Long => (64, true),
        Type::UnsignedLong => (64, false),
        Type::Pointer { .. } | Type::Array { .. } => {
            return Err(CodegenError::InvalidType {
                ast_type: ty.clone(),
                message: "pointer-to-array types cannot be lowered".to_string(),
                location: span.start.clone(),
            });
        }
    };
    if bits == 0 && indirection == 0 && !dims.is_empty() {
        return Err(CodegenError::InvalidType {
            ast_type: ty.clone(),
            message: "arrays of void cannot be lowered".to_string(),
            location: span.start.clone(),
        });
    }
    Ok(IrType {
        bits,
        signed,
        indirection,
        dims,
    })
}

/// Lowers a parameter type: void is rejected and arrays decay to a
/// pointer to their element, as the caller never passes an aggregate by
/// value. A multidimensional array would decay to a pointer-to-array,
/// which has no flat encoding, so those are rejected too.
pub(crate) fn lower_param_type(ty: &Type, span: &SourceSpan) -> Result<IrType, CodegenError> {
    let lowered = lower_type(ty, span)?;
    if lowered.is_void() {
        return Err(CodegenError::InvalidType {
            ast_type: ty.clone(),
            message: "parameters cannot have void type".to_string(),
            location: span.start.clone(),
        });
    }
    if let Some(element) = lowered.without_outer_dim() {
        if !element.dims.is_empty() {
            return Err(CodegenError::InvalidType {
                ast_type: ty.clone(),
                message: "multidimensional arrays cannot be parameters".to_string(),
                location: span.start.clone(),
            });
        }
        return Ok(element.pointer_to());
    }
    Ok(lowered)
}
