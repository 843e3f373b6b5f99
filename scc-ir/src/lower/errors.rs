//! Lowering errors

use crate::ir::IrType;
use scc_ast::Type;
use scc_common::{CompilerError, SourceLocation};
use thiserror::Error;

/// Errors raised while lowering the AST to IR.
///
/// The type checker runs before this stage, so most variants mark
/// malformed input that slipped past it rather than diagnostics a user
/// should ever see.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("Invalid type '{ast_type}': {message}")]
    InvalidType {
        ast_type: Type,
        message: String,
        location: SourceLocation,
    },

    #[error("Undefined variable '{name}'")]
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },

    #[error("Undefined function '{name}'")]
    UndefinedFunction {
        name: String,
        location: SourceLocation,
    },

    #[error("Break outside of loop")]
    InvalidBreak { location: SourceLocation },

    #[error("Continue outside of loop")]
    InvalidContinue { location: SourceLocation },

    #[error("Expression is not assignable")]
    InvalidLvalue { location: SourceLocation },

    #[error("Illegal cast from '{from}' to '{to}'")]
    IllegalCast {
        from: IrType,
        to: IrType,
        location: SourceLocation,
    },

    #[error("Global initializers must be integer constants")]
    NonConstantGlobalInitializer { location: SourceLocation },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        location: SourceLocation,
    },
}

impl CodegenError {
    pub fn internal(message: String, location: SourceLocation) -> Self {
        CodegenError::InternalError { message, location }
    }
}

/// Lowering reports through the shared compiler error type; the source
/// location folds into the rendered message.
impl From<CodegenError> for CompilerError {
    fn from(err: CodegenError) -> Self {
        match err {
            CodegenError::InvalidType {
                ast_type,
                message,
                location,
            } => CompilerError::codegen_error(
                format!("invalid type '{}': {}", ast_type, message),
                location,
            ),
            CodegenError::UndefinedVariable { name, location } => {
                CompilerError::codegen_error(format!("undefined variable '{}'", name), location)
            }
            CodegenError::UndefinedFunction { name, location } => {
                CompilerError::codegen_error(format!("undefined function '{}'", name), location)
            }
            CodegenError::InvalidBreak { location } => {
                CompilerError::codegen_error("break outside of loop".to_string(), location)
            }
            CodegenError::InvalidContinue { location } => {
                CompilerError::codegen_error("continue outside of loop".to_string(), location)
            }
            CodegenError::InvalidLvalue { location } => {
                CompilerError::codegen_error("expression is not assignable".to_string(), location)
            }
            CodegenError::IllegalCast { from, to, location } => CompilerError::codegen_error(
                format!("illegal cast from '{}' to '{}'", from, to),
                location,
            ),
            CodegenError::NonConstantGlobalInitializer { location } => CompilerError::codegen_error(
                "global initializers must be integer constants".to_string(),
                location,
            ),
            CodegenError::InternalError { message, location } => {
                CompilerError::codegen_error(format!("internal error: {}", message), location)
            }
        }
    }
}
