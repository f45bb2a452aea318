//! Struct packing for tuples and records.
//!
//! Fields are laid out in declaration order with no reordering for
//! minimal padding, so the computed layout is a pure function of the
//! field sequence and the aggregate's own `align`/`pack` attributes.

use ndshape_diagnostic::{ShapeError, ShapeResult};

use crate::align::{get_align, round_up};
use crate::field::Field;

/// Parallel per-field tables of a concrete aggregate.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct PackedLayout {
    /// Byte offset of each member.
    pub offsets: Vec<i64>,
    /// Resolved alignment of each member.
    pub aligns: Vec<u16>,
    /// Trailing padding of each member.
    pub pads: Vec<u16>,
}

/// Result of packing a concrete field sequence.
#[derive(Debug)]
pub(crate) struct PackedFields {
    /// The per-field tables.
    pub layout: PackedLayout,
    /// Total aggregate size.
    pub size: i64,
    /// Aggregate alignment.
    pub align: u16,
}

/// Lay out a sequence of concrete fields.
///
/// Walks the fields in declaration order tracking a running offset:
/// each field is aligned to its effective alignment (the aggregate
/// `pack` value if given, its own resolved alignment otherwise), the
/// gap introduced by the rounding is recorded as the previous field's
/// padding, and the final size is the offset rounded up to the largest
/// member alignment.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn pack_fields(
    fields: &[Field],
    align: Option<u16>,
    pack: Option<u16>,
) -> ShapeResult<PackedFields> {
    let mut maxalign = get_align(align, 1)?;
    get_align(pack, 1)?;

    let shape = fields.len();
    let mut layout = PackedLayout {
        offsets: Vec::with_capacity(shape),
        aligns: Vec::with_capacity(shape),
        pads: vec![0; shape],
    };

    let mut offset: i64 = 0;
    for (i, field) in fields.iter().enumerate() {
        assert!(field.is_concrete(), "packing an abstract field");

        let field_align = match pack {
            Some(pack) => {
                if field.explicit_align() {
                    return Err(ShapeError::invalid_argument(
                        "cannot have aggregate 'pack' attribute and field attributes",
                    ));
                }
                pack
            }
            None => field.data_align(),
        };

        maxalign = maxalign.max(field_align);

        if i > 0 {
            let unaligned = offset;
            offset = round_up(offset, field_align);
            layout.pads[i - 1] = (offset - unaligned) as u16;
        }

        layout.offsets.push(offset);
        layout.aligns.push(field_align);
        offset += field.ty().data_size();
    }

    let size = round_up(offset, maxalign);

    if shape > 0 {
        let last = shape - 1;
        layout.pads[last] =
            ((size - layout.offsets[last]) - fields[last].ty().data_size()) as u16;
    }

    tracing::trace!(fields = shape, size, align = maxalign, "packed aggregate");

    Ok(PackedFields {
        layout,
        size,
        align: maxalign,
    })
}
