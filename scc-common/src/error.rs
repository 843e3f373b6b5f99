//! Error handling for the Slate C compiler
//!
//! This module defines the umbrella error type shared by all compiler
//! stages. Stage-local error enums convert into it at the stage boundary.

use crate::source_loc::SourceLocation;
use thiserror::Error;

/// Main compiler error type that encompasses all phases of compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Code generation error at {location}: {message}")]
    CodegenError {
        location: SourceLocation,
        message: String,
    },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Internal compiler error: {message}")]
    InternalError { message: String },
}

impl CompilerError {
    /// Create a codegen error
    pub fn codegen_error(message: String, location: SourceLocation) -> Self {
        CompilerError::CodegenError { location, message }
    }

    /// Create an internal error
    pub fn internal_error(message: String) -> Self {
        CompilerError::InternalError { message }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IoError {
            message: err.to_string(),
        }
    }
}

/// Convert from String (for simple error cases)
impl From<String> for CompilerError {
    fn from(message: String) -> Self {
        CompilerError::InternalError { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codegen_error_display() {
        let err = CompilerError::codegen_error(
            "cannot take address of constant".to_string(),
            SourceLocation::new("main.c", 4, 12),
        );
        assert_eq!(
            format!("{}", err),
            "Code generation error at main.c:4:12: cannot take address of constant"
        );
    }

    #[test]
    fn test_internal_error_display() {
        let err = CompilerError::internal_error("operand index out of range".to_string());
        assert_eq!(
            format!("{}", err),
            "Internal compiler error: operand index out of range"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CompilerError = io.into();
        assert!(matches!(err, CompilerError::IoError { .. }));
    }

    #[test]
    fn test_from_string() {
        let err: CompilerError = "walked off the AST".to_string().into();
        assert_eq!(
            err,
            CompilerError::InternalError {
                message: "walked off the AST".to_string()
            }
        );
    }
}
