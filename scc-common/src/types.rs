//! Common identifier types used throughout the compiler
//!
//! Labels, temporaries, and named slots draw from independent counters
//! that reset per function; globals count per translation unit.

/// Basic block label identifier
pub type LabelId = u32;

/// Virtual register identifier for expression temporaries
pub type TempId = u32;

/// Identifier for the named register backing a local variable
pub type NamedId = u32;

/// Identifier for a module-level global storage slot
pub type GlobalId = u32;
