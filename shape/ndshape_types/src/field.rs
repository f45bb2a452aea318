//! Aggregate members under construction.
//!
//! A [`Field`] pairs an optional member name with an owned child type.
//! For a concrete child the field also records the resolved alignment
//! and whether it was explicitly requested via `align`/`pack`; the
//! layout engine needs that distinction to reject per-field overrides
//! under an aggregate-level `pack`.

use ndshape_diagnostic::ShapeResult;

use crate::align::field_align;
use crate::Type;

/// Resolved alignment of a concrete field.
#[derive(Copy, Clone, Debug)]
pub(crate) struct FieldLayout {
    /// Resolved member alignment.
    pub align: u16,
    /// The alignment was requested via `align` or `pack`.
    pub explicit: bool,
}

/// One member of a tuple or record under construction.
#[derive(Debug)]
pub struct Field {
    name: Option<String>,
    ty: Type,
    layout: Option<FieldLayout>,
}

impl Field {
    /// Create a field, resolving `align`/`pack` against the child's
    /// natural alignment.
    ///
    /// `name` is `None` for a tuple member. `align` raises the member
    /// alignment to at least the natural alignment; `pack` is taken
    /// verbatim and may lower it. Supplying both, or supplying either
    /// for an abstract child, is an `InvalidArgumentError`.
    pub fn new(
        name: Option<String>,
        ty: Type,
        align: Option<u16>,
        pack: Option<u16>,
    ) -> ShapeResult<Self> {
        let resolved = field_align(ty.natural_align(), align, pack)?;
        let layout = if ty.is_concrete() {
            Some(FieldLayout {
                align: resolved,
                explicit: align.is_some() || pack.is_some(),
            })
        } else {
            None
        };

        Ok(Field { name, ty, layout })
    }

    /// Create an unnamed member with no explicit alignment.
    pub fn unnamed(ty: Type) -> ShapeResult<Self> {
        Field::new(None, ty, None, None)
    }

    /// Create a named member with no explicit alignment.
    pub fn named(name: impl Into<String>, ty: Type) -> ShapeResult<Self> {
        Field::new(Some(name.into()), ty, None, None)
    }

    /// The member name, `None` for a tuple member.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The member type.
    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Check if the member type is concrete.
    #[inline]
    pub fn is_concrete(&self) -> bool {
        self.layout.is_some()
    }

    /// Resolved member alignment. Defined only for concrete members.
    pub(crate) fn data_align(&self) -> u16 {
        match self.layout {
            Some(layout) => layout.align,
            None => panic!("alignment of an abstract field"),
        }
    }

    /// Check if the alignment was explicitly requested.
    pub(crate) fn explicit_align(&self) -> bool {
        self.layout.is_some_and(|layout| layout.explicit)
    }

    /// Consume the field into its name and type.
    pub(crate) fn into_parts(self) -> (Option<String>, Type) {
        (self.name, self.ty)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ndshape_diagnostic::ErrorKind;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn concrete_field_records_natural_alignment() {
        let field = Field::unnamed(Type::int32()).unwrap();
        assert!(field.is_concrete());
        assert_eq!(field.data_align(), 4);
        assert!(!field.explicit_align());
    }

    #[test]
    fn explicit_align_raises_to_natural() {
        let field = Field::new(None, Type::int32(), Some(8), None).unwrap();
        assert_eq!(field.data_align(), 8);
        assert!(field.explicit_align());
    }

    #[test]
    fn pack_lowers_below_natural() {
        let field = Field::new(None, Type::int64(), None, Some(2)).unwrap();
        assert_eq!(field.data_align(), 2);
        assert!(field.explicit_align());
    }

    #[test]
    fn both_attributes_fail() {
        let err = Field::new(None, Type::int32(), Some(4), Some(4)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn abstract_field_rejects_attributes() {
        let abstract_ty = Type::typevar("T");
        let err = Field::new(None, abstract_ty, Some(4), None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);

        let abstract_ty = Type::typevar("T");
        let field = Field::unnamed(abstract_ty).unwrap();
        assert!(!field.is_concrete());
        assert!(!field.explicit_align());
    }
}
