//! Type kind tag for tag-driven dispatch.
//!
//! Every type node carries a `Tag` identifying its kind. The tag decides
//! how the node's payload is interpreted, which destructor path applies,
//! and, for categorical value sets, the cross-kind sort order.
//!
//! # Tag Categories
//!
//! Tags are organized into semantic ranges:
//! - 0-15: Abstract kind markers (no payload, always abstract)
//! - 16-31: Dimension kinds (one element child)
//! - 32-47: Aggregates (member sequences)
//! - 48-63: Wrappers and named types
//! - 64-95: Scalars
//! - 96-111: Text and byte kinds

use std::fmt;

/// Type kind discriminant (u8 = 256 possible kinds).
///
/// `Ord` is derived from the discriminant; categorical sets sort their
/// entries by `(tag, value)` using exactly this order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Tag {
    // === Abstract kind markers (0-15) ===
    /// The top kind: matches any type.
    AnyKind = 0,
    /// Any scalar.
    ScalarKind = 1,
    /// Any signed integer.
    SignedKind = 2,
    /// Any unsigned integer.
    UnsignedKind = 3,
    /// Any floating point type.
    FloatKind = 4,
    /// Any complex type.
    ComplexKind = 5,
    /// Any fixed string.
    FixedStringKind = 6,
    /// Any fixed bytes block.
    FixedBytesKind = 7,

    // Reserved: 8-15 for future kind markers

    // === Dimension kinds (16-31) ===
    /// Dimension with a fixed shape.
    FixedDim = 16,
    /// Dimension with per-row shapes.
    VarDim = 17,
    /// Named dimension placeholder.
    SymbolicDim = 18,
    /// "Rest of the dimensions" marker.
    EllipsisDim = 19,

    // Reserved: 20-31 for future dimension kinds

    // === Aggregates (32-47) ===
    /// Tuple with positional members.
    Tuple = 32,
    /// Record with named members.
    Record = 33,
    /// Function with return, positional and keyword types.
    Function = 34,

    // Reserved: 35-47 for future aggregates

    // === Wrappers and named types (48-63) ===
    /// Optional value or dimension.
    Option = 48,
    /// Optional item inside a dimension.
    OptionItem = 49,
    /// Reference to a registered typedef.
    Nominal = 50,
    /// Named type constructor application.
    Constr = 51,
    /// Type variable.
    Typevar = 52,
    /// Sorted set of typed literal values.
    Categorical = 53,
    /// Pointer to a value of the child type.
    Pointer = 54,

    // Reserved: 55-63 for future wrappers

    // === Scalars (64-95) ===
    /// The empty type.
    Void = 64,
    /// Boolean.
    Bool = 65,
    /// 8-bit signed integer.
    Int8 = 66,
    /// 16-bit signed integer.
    Int16 = 67,
    /// 32-bit signed integer.
    Int32 = 68,
    /// 64-bit signed integer.
    Int64 = 69,
    /// 8-bit unsigned integer.
    Uint8 = 70,
    /// 16-bit unsigned integer.
    Uint16 = 71,
    /// 32-bit unsigned integer.
    Uint32 = 72,
    /// 64-bit unsigned integer.
    Uint64 = 73,
    /// 16-bit floating point.
    Float16 = 74,
    /// 32-bit floating point.
    Float32 = 75,
    /// 64-bit floating point.
    Float64 = 76,
    /// Complex number of two 16-bit halves.
    Complex32 = 77,
    /// Complex number of two 32-bit floats.
    Complex64 = 78,
    /// Complex number of two 64-bit floats.
    Complex128 = 79,

    // Reserved: 80-95 for future scalars

    // === Text and byte kinds (96-111) ===
    /// Single character in a declared encoding.
    Char = 96,
    /// Variable-length string reference.
    String = 97,
    /// Fixed-length string.
    FixedString = 98,
    /// Variable-length bytes reference.
    Bytes = 99,
    /// Fixed-length bytes block.
    FixedBytes = 100,
}

impl Tag {
    /// Check if this tag is an abstract kind marker.
    #[inline]
    pub const fn is_kind(self) -> bool {
        (self as u8) < 16
    }

    /// Check if this tag is a dimension kind.
    #[inline]
    pub const fn is_dimension(self) -> bool {
        let v = self as u8;
        v >= 16 && v < 32
    }

    /// Check if this tag is a tuple, record or function.
    #[inline]
    pub const fn is_aggregate(self) -> bool {
        let v = self as u8;
        v >= 32 && v < 48
    }

    /// Check if this tag is a signed integer scalar.
    #[inline]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    /// Check if this tag is an unsigned integer scalar.
    #[inline]
    pub const fn is_unsigned(self) -> bool {
        matches!(
            self,
            Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64
        )
    }

    /// Check if this tag is a floating point scalar.
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float16 | Self::Float32 | Self::Float64)
    }

    /// Check if this tag is a complex scalar.
    #[inline]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex32 | Self::Complex64 | Self::Complex128)
    }

    /// Get the name of this tag as a static string.
    pub const fn name(self) -> &'static str {
        match self {
            Self::AnyKind => "Any",
            Self::ScalarKind => "ScalarKind",
            Self::SignedKind => "SignedKind",
            Self::UnsignedKind => "UnsignedKind",
            Self::FloatKind => "FloatKind",
            Self::ComplexKind => "ComplexKind",
            Self::FixedStringKind => "FixedStringKind",
            Self::FixedBytesKind => "FixedBytesKind",
            Self::FixedDim => "fixed_dim",
            Self::VarDim => "var_dim",
            Self::SymbolicDim => "symbolic_dim",
            Self::EllipsisDim => "ellipsis_dim",
            Self::Tuple => "tuple",
            Self::Record => "record",
            Self::Function => "function",
            Self::Option => "option",
            Self::OptionItem => "option_item",
            Self::Nominal => "nominal",
            Self::Constr => "constr",
            Self::Typevar => "typevar",
            Self::Categorical => "categorical",
            Self::Pointer => "pointer",
            Self::Void => "void",
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float16 => "float16",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Complex32 => "complex32",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
            Self::Char => "char",
            Self::String => "string",
            Self::FixedString => "FixedString",
            Self::Bytes => "bytes",
            Self::FixedBytes => "FixedBytes",
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag::{}", self.name())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Compile-time size assertion: Tag must be exactly 1 byte
const _: () = assert!(std::mem::size_of::<Tag>() == 1);
