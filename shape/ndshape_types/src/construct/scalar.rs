//! Scalar, text and byte type constructors.
//!
//! All scalar types are concrete on construction. Sizes and alignments
//! come from the corresponding native representations; the text and
//! byte reference types use the pointer-plus-length repr structs.

use ndshape_diagnostic::{ErrorKind, ShapeError, ShapeResult};

use crate::align::get_align;
use crate::node::{BytesRepr, Complex128Repr, Complex64Repr, DataLayout, SizedStringRepr};
use crate::{Encoding, Tag, Type, TypeKind};

use super::size_align;

fn scalar(kind: TypeKind, size: i64, align: u16) -> Type {
    Type::concrete_node(
        kind,
        0,
        DataLayout {
            size,
            align,
            meta: 0,
        },
    )
}

/// Platform-sized integer aliases.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Alias {
    /// `size_t`: unsigned, pointer-sized.
    Size,
    /// `intptr_t`: signed, pointer-sized.
    Intptr,
    /// `uintptr_t`: unsigned, pointer-sized.
    Uintptr,
}

impl Type {
    /// Create a primitive scalar from its tag.
    ///
    /// Rejects non-primitive tags with a `ValueError`.
    pub fn primitive(tag: Tag) -> ShapeResult<Type> {
        match tag {
            Tag::Void => Ok(Type::void()),
            Tag::Bool => Ok(Type::bool()),
            Tag::Int8 => Ok(Type::int8()),
            Tag::Int16 => Ok(Type::int16()),
            Tag::Int32 => Ok(Type::int32()),
            Tag::Int64 => Ok(Type::int64()),
            Tag::Uint8 => Ok(Type::uint8()),
            Tag::Uint16 => Ok(Type::uint16()),
            Tag::Uint32 => Ok(Type::uint32()),
            Tag::Uint64 => Ok(Type::uint64()),
            Tag::Float16 => Ok(Type::float16()),
            Tag::Float32 => Ok(Type::float32()),
            Tag::Float64 => Ok(Type::float64()),
            Tag::Complex32 => Ok(Type::complex32()),
            Tag::Complex64 => Ok(Type::complex64()),
            Tag::Complex128 => Ok(Type::complex128()),
            _ => Err(ShapeError::formatted(
                ErrorKind::Value,
                format!("invalid tag: '{}'", tag.name()),
            )),
        }
    }

    /// The empty type: size 0, alignment 1.
    pub fn void() -> Type {
        scalar(TypeKind::Void, 0, 1)
    }

    /// Boolean.
    pub fn bool() -> Type {
        let (size, align) = size_align::<bool>();
        scalar(TypeKind::Bool, size, align)
    }

    /// 8-bit signed integer.
    pub fn int8() -> Type {
        let (size, align) = size_align::<i8>();
        scalar(TypeKind::Int8, size, align)
    }

    /// 16-bit signed integer.
    pub fn int16() -> Type {
        let (size, align) = size_align::<i16>();
        scalar(TypeKind::Int16, size, align)
    }

    /// 32-bit signed integer.
    pub fn int32() -> Type {
        let (size, align) = size_align::<i32>();
        scalar(TypeKind::Int32, size, align)
    }

    /// 64-bit signed integer.
    pub fn int64() -> Type {
        let (size, align) = size_align::<i64>();
        scalar(TypeKind::Int64, size, align)
    }

    /// 8-bit unsigned integer.
    pub fn uint8() -> Type {
        let (size, align) = size_align::<u8>();
        scalar(TypeKind::Uint8, size, align)
    }

    /// 16-bit unsigned integer.
    pub fn uint16() -> Type {
        let (size, align) = size_align::<u16>();
        scalar(TypeKind::Uint16, size, align)
    }

    /// 32-bit unsigned integer.
    pub fn uint32() -> Type {
        let (size, align) = size_align::<u32>();
        scalar(TypeKind::Uint32, size, align)
    }

    /// 64-bit unsigned integer.
    pub fn uint64() -> Type {
        let (size, align) = size_align::<u64>();
        scalar(TypeKind::Uint64, size, align)
    }

    /// 16-bit float. No native representation: 2 bytes, 2-aligned.
    pub fn float16() -> Type {
        scalar(TypeKind::Float16, 2, 2)
    }

    /// 32-bit float.
    pub fn float32() -> Type {
        let (size, align) = size_align::<f32>();
        scalar(TypeKind::Float32, size, align)
    }

    /// 64-bit float.
    pub fn float64() -> Type {
        let (size, align) = size_align::<f64>();
        scalar(TypeKind::Float64, size, align)
    }

    /// Complex of two 16-bit halves: 4 bytes, 2-aligned.
    pub fn complex32() -> Type {
        scalar(TypeKind::Complex32, 4, 2)
    }

    /// Complex of two 32-bit floats.
    pub fn complex64() -> Type {
        let (size, align) = size_align::<Complex64Repr>();
        scalar(TypeKind::Complex64, size, align)
    }

    /// Complex of two 64-bit floats.
    pub fn complex128() -> Type {
        let (size, align) = size_align::<Complex128Repr>();
        scalar(TypeKind::Complex128, size, align)
    }

    /// Signed integer of the given byte width.
    pub fn signed(size: i64) -> ShapeResult<Type> {
        match size {
            1 => Ok(Type::int8()),
            2 => Ok(Type::int16()),
            4 => Ok(Type::int32()),
            8 => Ok(Type::int64()),
            _ => Err(ShapeError::formatted(
                ErrorKind::Value,
                format!("invalid size for signed integer: '{size}'"),
            )),
        }
    }

    /// Unsigned integer of the given byte width.
    pub fn unsigned(size: i64) -> ShapeResult<Type> {
        match size {
            1 => Ok(Type::uint8()),
            2 => Ok(Type::uint16()),
            4 => Ok(Type::uint32()),
            8 => Ok(Type::uint64()),
            _ => Err(ShapeError::formatted(
                ErrorKind::Value,
                format!("invalid size for unsigned integer: '{size}'"),
            )),
        }
    }

    /// Resolve a platform-sized integer alias.
    pub fn from_alias(alias: Alias) -> Type {
        let pointer_width = std::mem::size_of::<usize>();
        match alias {
            Alias::Size | Alias::Uintptr => {
                if pointer_width == 4 {
                    Type::uint32()
                } else {
                    Type::uint64()
                }
            }
            Alias::Intptr => {
                if pointer_width == 4 {
                    Type::int32()
                } else {
                    Type::int64()
                }
            }
        }
    }

    /// Single character in the given encoding.
    pub fn char(encoding: Encoding) -> Type {
        scalar(TypeKind::Char(encoding), encoding.size(), encoding.align())
    }

    /// Variable-length string reference.
    pub fn string() -> Type {
        let (size, align) = size_align::<SizedStringRepr>();
        scalar(TypeKind::String, size, align)
    }

    /// Fixed-length string of `size` code units.
    pub fn fixed_string(size: i64, encoding: Encoding) -> Type {
        scalar(
            TypeKind::FixedString { size, encoding },
            encoding.size() * size,
            encoding.align(),
        )
    }

    /// Variable-length bytes reference.
    ///
    /// `target_align` is the minimum alignment of the pointed-to bytes;
    /// a non-power-of-two is a `ValueError`.
    pub fn bytes(target_align: Option<u16>) -> ShapeResult<Type> {
        let target_align = get_align(target_align, 1)?;
        let (size, align) = size_align::<BytesRepr>();
        Ok(scalar(TypeKind::Bytes { target_align }, size, align))
    }

    /// Fixed-length bytes block with an optional explicit alignment.
    pub fn fixed_bytes(size: i64, align: Option<u16>) -> ShapeResult<Type> {
        let align = get_align(align, 1)?;
        Ok(scalar(TypeKind::FixedBytes { size, align }, size, align))
    }
}
