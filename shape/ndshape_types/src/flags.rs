//! Dimension flag bits and dimension-size classification.
//!
//! Every dimension wrapper carries a `DimFlags` word. The low four bits
//! classify the width of the integers used for variable-dimension metadata
//! tables; the remaining bits track optionality, the ellipsis marker and
//! contiguity.
//!
//! Flags accumulate from the element type outward: a wrapper inherits its
//! child's flags through [`DimFlags::common`] and adds its own bit. The
//! option bit never propagates; optionality belongs to exactly one
//! dimension.

use bitflags::bitflags;

bitflags! {
    /// Flag bits carried by dimension wrappers.
    ///
    /// The four size bits are mutually exclusive and double as the metadata
    /// integer width in bytes.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct DimFlags: u32 {
        /// Variable-dimension metadata fits in `u8`.
        const SIZE_UINT8 = 1;
        /// Variable-dimension metadata fits in `u16`.
        const SIZE_UINT16 = 2;
        /// Variable-dimension metadata fits in `u32`.
        const SIZE_UINT32 = 4;
        /// Variable-dimension metadata needs `i64`.
        const SIZE_INT64 = 8;
        /// The dimension admits missing rows.
        const OPTION = 1 << 4;
        /// An ellipsis dimension occurs in the enclosed type.
        const ELLIPSIS = 1 << 5;
        /// Row-major contiguous.
        const C_CONTIGUOUS = 1 << 6;
        /// Column-major contiguous.
        const F_CONTIGUOUS = 1 << 7;
        /// The dimension chain forms a plain ndarray.
        const NDARRAY = 1 << 8;
    }
}

impl DimFlags {
    /// Mask selecting the metadata-width classification bits.
    pub const SIZE_MASK: Self =
        Self::from_bits_truncate(Self::SIZE_UINT8.bits() | Self::SIZE_UINT16.bits()
            | Self::SIZE_UINT32.bits() | Self::SIZE_INT64.bits());

    /// Flags a wrapper inherits from its element type.
    ///
    /// Everything except the option bit propagates.
    #[inline]
    pub const fn common(self) -> Self {
        Self::from_bits_truncate(self.bits() & !Self::OPTION.bits())
    }

    /// Metadata integer width in bytes, `0` if unclassified.
    #[inline]
    pub const fn dim_size(self) -> u32 {
        self.bits() & Self::SIZE_MASK.bits()
    }

    /// Check if the option bit is set.
    #[inline]
    pub const fn is_optional(self) -> bool {
        self.contains(Self::OPTION)
    }

    /// Check if an ellipsis dimension occurs in the enclosed type.
    #[inline]
    pub const fn has_ellipsis(self) -> bool {
        self.contains(Self::ELLIPSIS)
    }
}

/// Width class for variable-dimension metadata integers.
///
/// Selected as the narrowest unsigned width that can index the row count,
/// with a signed 64-bit fallback.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DimSize {
    /// No metadata.
    None,
    /// 8-bit rows.
    Uint8,
    /// 16-bit rows.
    Uint16,
    /// 32-bit rows.
    Uint32,
    /// 64-bit rows.
    Int64,
}

impl DimSize {
    /// Select the narrowest class that can index `n` rows.
    pub fn select(n: i64) -> Self {
        if n <= i64::from(u8::MAX) {
            DimSize::Uint8
        } else if n <= i64::from(u16::MAX) {
            DimSize::Uint16
        } else if n <= i64::from(u32::MAX) {
            DimSize::Uint32
        } else {
            DimSize::Int64
        }
    }

    /// Recover the class from a flag word.
    pub fn from_flags(flags: DimFlags) -> Self {
        match flags.dim_size() {
            0 => DimSize::None,
            1 => DimSize::Uint8,
            2 => DimSize::Uint16,
            4 => DimSize::Uint32,
            8 => DimSize::Int64,
            _ => unreachable!("size bits are mutually exclusive"),
        }
    }

    /// Width in bytes, `0` for `None`.
    #[inline]
    pub const fn width(self) -> i64 {
        match self {
            DimSize::None => 0,
            DimSize::Uint8 => 1,
            DimSize::Uint16 => 2,
            DimSize::Uint32 => 4,
            DimSize::Int64 => 8,
        }
    }

    /// Alignment of the metadata integers, `1` for `None`.
    #[inline]
    pub const fn align(self) -> u16 {
        match self {
            DimSize::None => 1,
            DimSize::Uint8 => 1,
            DimSize::Uint16 => 2,
            DimSize::Uint32 => 4,
            DimSize::Int64 => 8,
        }
    }

    /// The flag bit for this class.
    #[inline]
    pub const fn flag(self) -> DimFlags {
        match self {
            DimSize::None => DimFlags::empty(),
            DimSize::Uint8 => DimFlags::SIZE_UINT8,
            DimSize::Uint16 => DimFlags::SIZE_UINT16,
            DimSize::Uint32 => DimFlags::SIZE_UINT32,
            DimSize::Int64 => DimFlags::SIZE_INT64,
        }
    }

    /// Canonical name of this class.
    pub const fn name(self) -> &'static str {
        match self {
            DimSize::None => "none",
            DimSize::Uint8 => "uint8",
            DimSize::Uint16 => "uint16",
            DimSize::Uint32 => "uint32",
            DimSize::Int64 => "int64",
        }
    }
}

/// Storage order requested for a fixed dimension.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Order {
    /// Row-major.
    C,
    /// Column-major.
    F,
    /// Either.
    A,
}

// Compile-time size assertion: DimFlags must be exactly 4 bytes
const _: () = assert!(std::mem::size_of::<DimFlags>() == 4);
