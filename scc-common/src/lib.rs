//! Slate C Compiler - Common Types and Utilities
//!
//! This crate contains shared types, error definitions, and utilities
//! used by the middle-end crates of the Slate C compiler.

pub mod error;
pub mod source_loc;
pub mod types;

pub use error::CompilerError;
pub use source_loc::{SourceLocation, SourceSpan};
pub use types::*;
