//! Character encodings for char and string types.

use ndshape_diagnostic::{ErrorKind, ShapeError, ShapeResult};

/// Encoding of a char, fixed string or string type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Encoding {
    /// 7-bit ASCII.
    Ascii,
    /// UTF-8.
    Utf8,
    /// UTF-16.
    Utf16,
    /// UTF-32.
    Utf32,
    /// UCS-2.
    Ucs2,
}

impl Encoding {
    /// Parse an encoding from its accepted spellings.
    pub fn from_str(s: &str) -> ShapeResult<Self> {
        match s {
            "A" | "ascii" | "us-ascii" => Ok(Encoding::Ascii),
            "U8" | "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "U16" | "utf16" | "utf-16" => Ok(Encoding::Utf16),
            "U32" | "utf32" | "utf-32" => Ok(Encoding::Utf32),
            "ucs2" | "ucs-2" | "ucs_2" => Ok(Encoding::Ucs2),
            _ => Err(ShapeError::formatted(
                ErrorKind::Value,
                format!("invalid encoding: '{s}'"),
            )),
        }
    }

    /// Code unit size in bytes.
    #[inline]
    pub const fn size(self) -> i64 {
        match self {
            Encoding::Ascii | Encoding::Utf8 => 1,
            Encoding::Utf16 | Encoding::Ucs2 => 2,
            Encoding::Utf32 => 4,
        }
    }

    /// Code unit alignment in bytes.
    #[inline]
    pub const fn align(self) -> u16 {
        match self {
            Encoding::Ascii | Encoding::Utf8 => 1,
            Encoding::Utf16 | Encoding::Ucs2 => 2,
            Encoding::Utf32 => 4,
        }
    }

    /// Canonical quoted name.
    pub const fn name(self) -> &'static str {
        match self {
            Encoding::Ascii => "'ascii'",
            Encoding::Utf8 => "'utf8'",
            Encoding::Utf16 => "'utf16'",
            Encoding::Utf32 => "'utf32'",
            Encoding::Ucs2 => "'ucs2'",
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
