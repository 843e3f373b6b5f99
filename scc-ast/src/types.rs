//! Source-level type syntax
//!
//! The input language has elementary integer types of four widths, void,
//! and derived pointer and array types. Structs, unions, enums, and
//! function types are not part of the language.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source-level types as written in declarations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Type {
    /// Void type
    Void,

    /// Character types (8 bits)
    Char,
    UnsignedChar,

    /// Short integer types (16 bits)
    Short,
    UnsignedShort,

    /// Integer types (32 bits)
    Int,
    UnsignedInt,

    /// Long integer types (64 bits)
    Long,
    UnsignedLong,

    /// Pointer to another type
    Pointer { target: Box<Type> },

    /// Array type with a known element count
    Array { element_type: Box<Type>, size: u64 },
}

impl Type {
    /// Get the size of this type in bytes (None for void)
    pub fn size_in_bytes(&self) -> Option<u64> {
        match self {
            Type::Void => None,
            Type::Char | Type::UnsignedChar => Some(1),
            Type::Short | Type::UnsignedShort => Some(2),
            Type::Int | Type::UnsignedInt => Some(4),
            Type::Long | Type::UnsignedLong => Some(8),
            Type::Pointer { .. } => Some(8),
            Type::Array { element_type, size } => {
                element_type.size_in_bytes().map(|elem| elem * size)
            }
        }
    }

    /// Check if this is an elementary integer type
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Type::Char
                | Type::UnsignedChar
                | Type::Short
                | Type::UnsignedShort
                | Type::Int
                | Type::UnsignedInt
                | Type::Long
                | Type::UnsignedLong
        )
    }

    /// Check if this is a signed integer type
    pub fn is_signed_integer(&self) -> bool {
        matches!(self, Type::Char | Type::Short | Type::Int | Type::Long)
    }

    /// Check if this is a pointer type
    pub fn is_pointer(&self) -> bool {
        matches!(self, Type::Pointer { .. })
    }

    /// Check if this is an array type
    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array { .. })
    }

    /// Check if this is void
    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    /// Get the pointed-to or element type
    pub fn pointer_target(&self) -> Option<&Type> {
        match self {
            Type::Pointer { target } => Some(target),
            Type::Array { element_type, .. } => Some(element_type),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::Char => write!(f, "char"),
            Type::UnsignedChar => write!(f, "unsigned char"),
            Type::Short => write!(f, "short"),
            Type::UnsignedShort => write!(f, "unsigned short"),
            Type::Int => write!(f, "int"),
            Type::UnsignedInt => write!(f, "unsigned int"),
            Type::Long => write!(f, "long"),
            Type::UnsignedLong => write!(f, "unsigned long"),
            Type::Pointer { target } => write!(f, "{target}*"),
            Type::Array { element_type, size } => write!(f, "{element_type}[{size}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_sizes() {
        assert_eq!(Type::Void.size_in_bytes(), None);
        assert_eq!(Type::Char.size_in_bytes(), Some(1));
        assert_eq!(Type::Int.size_in_bytes(), Some(4));
        assert_eq!(Type::Long.size_in_bytes(), Some(8));
        assert_eq!(
            Type::Pointer { target: Box::new(Type::Char) }.size_in_bytes(),
            Some(8)
        );

        let array_type = Type::Array {
            element_type: Box::new(Type::Int),
            size: 10,
        };
        assert_eq!(array_type.size_in_bytes(), Some(40));
    }

    #[test]
    fn test_nested_array_size() {
        let matrix = Type::Array {
            element_type: Box::new(Type::Array {
                element_type: Box::new(Type::Short),
                size: 3,
            }),
            size: 2,
        };
        assert_eq!(matrix.size_in_bytes(), Some(12));
    }

    #[test]
    fn test_type_properties() {
        assert!(Type::Int.is_integer());
        assert!(Type::Int.is_signed_integer());
        assert!(!Type::UnsignedInt.is_signed_integer());
        assert!(Type::Pointer { target: Box::new(Type::Int) }.is_pointer());
        assert!(!Type::Int.is_pointer());
        assert!(Type::Array { element_type: Box::new(Type::Int), size: 4 }.is_array());
    }

    #[test]
    fn test_type_display() {
        assert_eq!(format!("{}", Type::Int), "int");
        assert_eq!(
            format!("{}", Type::Pointer { target: Box::new(Type::Char) }),
            "char*"
        );
        assert_eq!(
            format!(
                "{}",
                Type::Array { element_type: Box::new(Type::Int), size: 10 }
            ),
            "int[10]"
        );
    }
}
