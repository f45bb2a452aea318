//! Categorical type constructor.

use ndshape_diagnostic::{ShapeError, ShapeResult};

use crate::node::DataLayout;
use crate::value::MemValue;
use crate::{Type, TypeKind};

impl Type {
    /// A finite, sorted, deduplicated set of typed literal values.
    ///
    /// Values are sorted by `(tag, value)`; an adjacent equal pair after
    /// sorting is a `ValueError`. The result is always concrete: stored
    /// data is one value slot.
    pub fn categorical(mut values: Vec<MemValue>) -> ShapeResult<Type> {
        values.sort();

        for pair in values.windows(2) {
            if pair[0] == pair[1] {
                return Err(ShapeError::value("duplicate category entries"));
            }
        }

        let (size, align) = super::size_align::<MemValue>();
        Ok(Type::concrete_node(
            TypeKind::Categorical(values),
            0,
            DataLayout {
                size,
                align,
                meta: 0,
            },
        ))
    }
}
