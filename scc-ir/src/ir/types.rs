//! IR operand types
//!
//! Every operand carries an [`IrType`]: an elementary bit width and
//! signedness, a pointer indirection count, and array dimensions. The
//! indirection applies outside the dimensions, so nonzero `indirection`
//! together with nonempty `dims` reads as "pointer to array". That is the
//! shape named registers take for array variables, since a named register
//! always carries one more indirection level than the value it stores.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape classification driving cast legality and pointer arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeRank {
    Elementary,
    Array,
    Pointer,
}

/// Type of an IR operand.
///
/// `bits == 0` encodes `void`. `dims` lists array dimensions outermost
/// first; an empty list means the type is not an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrType {
    pub bits: u32,
    pub signed: bool,
    pub indirection: u32,
    pub dims: Vec<u64>,
}

impl IrType {
    pub const VOID: IrType = IrType {
        bits: 0,
        signed: false,
        indirection: 0,
        dims: Vec::new(),
    };
    pub const I8: IrType = IrType {
        bits: 8,
        signed: true,
        indirection: 0,
        dims: Vec::new(),
    };
    pub const U8: IrType = IrType {
        bits: 8,
        signed: false,
        indirection: 0,
        dims: Vec::new(),
    };
    pub const I16: IrType = IrType {
        bits: 16,
        signed: true,
        indirection: 0,
        dims: Vec::new(),
    };
    pub const U16: IrType = IrType {
        bits: 16,
        signed: false,
        indirection: 0,
        dims: Vec::new(),
    };
    pub const I32: IrType = IrType {
        bits: 32,
        signed: true,
        indirection: 0,
        dims: Vec::new(),
    };
    pub const U32: IrType = IrType {
        bits: 32,
        signed: false,
        indirection: 0,
        dims: Vec::new(),
    };
    pub const I64: IrType = IrType {
        bits: 64,
        signed: true,
        indirection: 0,
        dims: Vec::new(),
    };
    pub const U64: IrType = IrType {
        bits: 64,
        signed: false,
        indirection: 0,
        dims: Vec::new(),
    };

    /// Width of a pointer value on the target.
    pub const POINTER_BYTES: u64 = 8;

    pub fn scalar(bits: u32, signed: bool) -> Self {
        IrType {
            bits,
            signed,
            indirection: 0,
            dims: Vec::new(),
        }
    }

    /// One more indirection level: the type of an address holding `self`.
    pub fn pointer_to(&self) -> Self {
        IrType {
            indirection: self.indirection + 1,
            dims: self.dims.clone(),
            ..*self
        }
    }

    /// One indirection level removed, or `None` for non-pointers.
    pub fn dereferenced(&self) -> Option<Self> {
        if self.indirection == 0 {
            return None;
        }
        Some(IrType {
            indirection: self.indirection - 1,
            dims: self.dims.clone(),
            ..*self
        })
    }

    /// The type with the outermost array dimension dropped, or `None` if
    /// there are no dimensions.
    pub fn without_outer_dim(&self) -> Option<Self> {
        if self.dims.is_empty() {
            return None;
        }
        Some(IrType {
            dims: self.dims[1..].to_vec(),
            ..*self
        })
    }

    /// Dimensions take precedence over indirection, so a pointer to an
    /// array ranks as an array.
    pub fn rank(&self) -> TypeRank {
        if !self.dims.is_empty() {
            TypeRank::Array
        } else if self.indirection > 0 {
            TypeRank::Pointer
        } else {
            TypeRank::Elementary
        }
    }

    pub fn is_void(&self) -> bool {
        self.bits == 0 && self.indirection == 0 && self.dims.is_empty()
    }

    pub fn is_elementary(&self) -> bool {
        self.rank() == TypeRank::Elementary
    }

    pub fn is_pointer(&self) -> bool {
        self.rank() == TypeRank::Pointer
    }

    pub fn is_array(&self) -> bool {
        self.rank() == TypeRank::Array
    }

    /// Storage size of a value of this type. Pointer values are
    /// [`IrType::POINTER_BYTES`] wide regardless of pointee; `void` has no
    /// size.
    pub fn size_in_bytes(&self) -> Option<u64> {
        if self.indirection > 0 {
            return Some(Self::POINTER_BYTES);
        }
        if self.bits == 0 {
            return None;
        }
        let element = u64::from(self.bits) / 8;
        Some(self.dims.iter().product::<u64>() * element)
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rendered = if self.bits == 0 {
            "void".to_string()
        } else if self.signed {
            format!("i{}", self.bits)
        } else {
            format!("u{}", self.bits)
        };
        for dim in self.dims.iter().rev() {
            rendered = format!("[{} x {}]", dim, rendered);
        }
        for _ in 0..self.indirection {
            rendered.push('*');
        }
        write!(f, "{}", rendered)
    }
}
