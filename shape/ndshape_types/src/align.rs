//! Alignment and offset primitives.
//!
//! These functions back the layout engine: power-of-two validation,
//! offset rounding, and the resolution of explicit `align`/`pack`
//! attributes against a field's natural alignment.

use ndshape_diagnostic::{ErrorKind, ShapeError, ShapeResult};

/// Check if `n` is a power of two.
#[inline]
pub const fn is_power_of_two(n: u16) -> bool {
    n != 0 && n & (n - 1) == 0
}

/// Round `offset` up to the next multiple of `align`.
#[inline]
pub const fn round_up(offset: i64, align: u16) -> i64 {
    let align = align as i64;
    ((offset + align - 1) / align) * align
}

/// Validate that an alignment value is a power of two.
fn check_align(align: u16) -> ShapeResult<u16> {
    if is_power_of_two(align) {
        Ok(align)
    } else {
        Err(ShapeError::formatted(
            ErrorKind::Value,
            format!("'align' must be a power of two, got {align}"),
        ))
    }
}

/// Extract and validate an optional explicit alignment.
///
/// Falls back to `default` when the attribute is absent.
pub(crate) fn get_align(align: Option<u16>, default: u16) -> ShapeResult<u16> {
    match align {
        Some(value) => check_align(value),
        None => Ok(default),
    }
}

/// Resolve a field's alignment from its natural alignment and the
/// `align`/`pack` attributes.
///
/// `natural` is `None` for an abstract field; explicit attributes are
/// rejected there because alignment is only meaningful once the size is
/// known. `align` raises the result to at least the natural alignment;
/// `pack` is taken verbatim and may lower it.
pub(crate) fn field_align(
    natural: Option<u16>,
    align: Option<u16>,
    pack: Option<u16>,
) -> ShapeResult<u16> {
    let resolved = match (align, pack) {
        (Some(_), Some(_)) => {
            return Err(ShapeError::invalid_argument(
                "field has both 'align' and 'pack' attributes",
            ));
        }
        (Some(align), None) => match natural {
            Some(natural) => align.max(natural),
            None => {
                return Err(ShapeError::invalid_argument(
                    "'align' or 'pack' attribute given for abstract type",
                ));
            }
        },
        (None, Some(pack)) => match natural {
            Some(_) => pack,
            None => {
                return Err(ShapeError::invalid_argument(
                    "'align' or 'pack' attribute given for abstract type",
                ));
            }
        },
        (None, None) => natural.unwrap_or(1),
    };

    check_align(resolved)
}
