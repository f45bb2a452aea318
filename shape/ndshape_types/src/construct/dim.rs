//! Dimension wrapper constructors.
//!
//! All four wrappers enclose exactly one element type and increment
//! `ndim` by one. Flags accumulate from the element outward; the option
//! bit never propagates.

use ndshape_diagnostic::{ErrorKind, ShapeError, ShapeResult};

use crate::flags::{DimFlags, DimSize, Order};
use crate::node::{DataLayout, FixedDimMeta, VarDimData, VarDimMeta, MAX_DIM};
use crate::{Tag, Type, TypeKind};

/// Reject elements that would push the wrapper past the nesting bound.
fn check_ndim(element: &Type) -> ShapeResult<()> {
    if element.ndim() >= MAX_DIM {
        return Err(ShapeError::formatted(
            ErrorKind::Value,
            format!("ndim > {MAX_DIM}"),
        ));
    }
    Ok(())
}

impl Type {
    /// A dimension with a fixed number of elements.
    ///
    /// Fixed dimensions may not contain variable dimensions, and the
    /// requested order must not contradict contiguity flags already
    /// accumulated from the element type.
    pub fn fixed_dim(shape: i64, element: Type, order: Order) -> ShapeResult<Type> {
        if element.tag() == Tag::VarDim {
            return Err(ShapeError::value(
                "fixed dimensions cannot contain variable dimensions",
            ));
        }
        check_ndim(&element)?;

        let flags = element.common_flags();
        match order {
            Order::C => {
                if flags.contains(DimFlags::F_CONTIGUOUS) {
                    return Err(ShapeError::value("mixed C and Fortran order"));
                }
            }
            Order::F => {
                if flags.contains(DimFlags::C_CONTIGUOUS) {
                    return Err(ShapeError::value("mixed C and Fortran order"));
                }
            }
            Order::A => {}
        }

        let ndim = element.ndim() + 1;
        if element.is_concrete() {
            let itemsize = element.data_size();
            let layout = DataLayout {
                size: shape * itemsize,
                align: element.data_align(),
                meta: super::size_align::<FixedDimMeta>().0,
            };
            let kind = TypeKind::FixedDim {
                flags,
                shape,
                element: Box::new(element),
                meta: Some(FixedDimMeta {
                    itemsize,
                    stride: itemsize,
                }),
            };
            Ok(Type::concrete_node(kind, ndim, layout))
        } else {
            let kind = TypeKind::FixedDim {
                flags,
                shape,
                element: Box::new(element),
                meta: None,
            };
            Ok(Type::abstract_node(kind, ndim))
        }
    }

    /// A dimension with per-row element counts.
    ///
    /// Metadata must be supplied for a concrete element type and must be
    /// absent for an abstract one; the node owns the supplied arrays.
    /// For `n` rows, `shapes` has `n` entries, `offsets` has `n + 1`
    /// cumulative entries, and `bitmap` (when present) has `ceil(n / 8)`
    /// bytes.
    #[allow(clippy::cast_possible_wrap)]
    pub fn var_dim(element: Type, meta: Option<VarDimData>) -> ShapeResult<Type> {
        check_ndim(&element)?;

        let meta = match (meta, element.is_concrete()) {
            (Some(meta), true) => meta,
            (Some(_), false) => {
                return Err(ShapeError::invalid_argument(
                    "var dimension: metadata given for abstract type",
                ));
            }
            (None, true) => {
                return Err(ShapeError::invalid_argument(
                    "var dimension: missing metadata for concrete type",
                ));
            }
            (None, false) => {
                let ndim = element.ndim() + 1;
                let kind = TypeKind::VarDim {
                    flags: element.common_flags(),
                    element: Box::new(element),
                    meta: None,
                };
                return Ok(Type::abstract_node(kind, ndim));
            }
        };

        let nshapes = meta.shapes.len() as i64;
        if nshapes == 0 || meta.offsets.len() != meta.shapes.len() + 1 {
            return Err(ShapeError::invalid_argument("incomplete meta information"));
        }
        if let Some(bitmap) = &meta.bitmap {
            if bitmap.len() as i64 != (nshapes + 7) / 8 {
                return Err(ShapeError::invalid_argument(
                    "invalid bitmap size for var-dim metadata",
                ));
            }
        }

        let rows = meta.offsets[meta.offsets.len() - 1];

        // Nested inside another var dimension the data size is inherited;
        // the outer offsets must then cover the inner row count.
        let (size, itemsize) = match element.kind() {
            TypeKind::VarDim {
                meta: Some(inner), ..
            } => {
                if rows != inner.nshapes {
                    return Err(ShapeError::value(
                        "missing or invalid number of var-dim shape arguments",
                    ));
                }
                (element.data_size(), inner.itemsize)
            }
            _ => (rows * element.data_size(), element.data_size()),
        };

        let class = DimSize::select(nshapes);
        let flags = element.common_flags() | class.flag();
        let meta_bytes = super::size_align::<VarDimMeta>().0
            + (2 * nshapes + 1) * class.width()
            + (nshapes + 7) / 8;

        let layout = DataLayout {
            size,
            align: element.data_align(),
            meta: meta_bytes,
        };
        let ndim = element.ndim() + 1;
        let kind = TypeKind::VarDim {
            flags,
            element: Box::new(element),
            meta: Some(VarDimMeta {
                nshapes,
                shapes: meta.shapes,
                offsets: meta.offsets,
                bitmap: meta.bitmap,
                itemsize,
                stride: 0,
                suboffset: 0,
            }),
        };
        Ok(Type::concrete_node(kind, ndim, layout))
    }

    /// A named dimension placeholder. Always abstract.
    pub fn symbolic_dim(name: impl Into<String>, element: Type) -> ShapeResult<Type> {
        if element.tag() == Tag::VarDim {
            return Err(ShapeError::value(
                "symbolic dimensions cannot contain variable dimensions",
            ));
        }
        check_ndim(&element)?;
        if element.dim_size() != 0 {
            return Err(ShapeError::invalid_argument(
                "var-shapes given for abstract type",
            ));
        }

        let ndim = element.ndim() + 1;
        let kind = TypeKind::SymbolicDim {
            flags: element.common_flags(),
            name: name.into(),
            element: Box::new(element),
        };
        Ok(Type::abstract_node(kind, ndim))
    }

    /// A "rest of the dimensions" marker. Always abstract.
    ///
    /// At most one ellipsis may occur in a type.
    pub fn ellipsis_dim(name: Option<String>, element: Type) -> ShapeResult<Type> {
        if element.tag() == Tag::VarDim {
            return Err(ShapeError::value(
                "ellipsis dimensions cannot contain variable dimensions",
            ));
        }
        check_ndim(&element)?;
        if element.dim_size() != 0 {
            return Err(ShapeError::invalid_argument(
                "var-shapes given for abstract type",
            ));
        }

        let flags = element.common_flags();
        if flags.has_ellipsis() {
            return Err(ShapeError::value("more than one ellipsis"));
        }

        let ndim = element.ndim() + 1;
        let kind = TypeKind::EllipsisDim {
            flags: flags | DimFlags::ELLIPSIS,
            name,
            element: Box::new(element),
        };
        Ok(Type::abstract_node(kind, ndim))
    }

    /// Mark the outermost dimension as optional.
    ///
    /// Only variable dimensions support this; the flag is set in place.
    pub fn dim_option(mut ty: Type) -> ShapeResult<Type> {
        match ty.kind_mut() {
            TypeKind::VarDim { flags, .. } => {
                flags.insert(DimFlags::OPTION);
                Ok(ty)
            }
            TypeKind::FixedDim { .. } | TypeKind::SymbolicDim { .. } => {
                Err(ShapeError::not_implemented(
                    "semantics for optional fixed dimensions need to be defined",
                ))
            }
            TypeKind::EllipsisDim { .. } => Err(ShapeError::invalid_argument(
                "ellipsis dimension cannot be optional",
            )),
            _ => Err(ShapeError::invalid_argument("not a dimension")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn var_meta(shapes: Vec<i64>, offsets: Vec<i64>) -> VarDimData {
        VarDimData {
            shapes,
            offsets,
            bitmap: None,
        }
    }

    #[test]
    fn fixed_dim_over_int32() {
        let t = Type::fixed_dim(3, Type::int32(), Order::A).unwrap();
        assert!(t.is_concrete());
        assert_eq!(t.ndim(), 1);
        assert_eq!(t.data_size(), 12);
        assert_eq!(t.data_align(), 4);
        assert_eq!(t.dim_stride(), 4);
    }

    #[test]
    fn fixed_dim_nests() {
        let inner = Type::fixed_dim(4, Type::float64(), Order::A).unwrap();
        let outer = Type::fixed_dim(2, inner, Order::A).unwrap();
        assert_eq!(outer.ndim(), 2);
        assert_eq!(outer.data_size(), 64);
        assert_eq!(outer.dim_stride(), 32);
    }

    #[test]
    fn fixed_dim_rejects_var_dim_element() {
        let var = Type::var_dim(Type::typevar("T"), None).unwrap();
        let err = Type::fixed_dim(2, var, Order::A).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Value);
    }

    #[test]
    fn fixed_dim_over_abstract_element_is_abstract() {
        let t = Type::fixed_dim(3, Type::typevar("T"), Order::A).unwrap();
        assert!(t.is_abstract());
        assert_eq!(t.ndim(), 1);
    }

    #[test]
    fn var_dim_concrete_layout() {
        let meta = var_meta(vec![2, 3], vec![0, 2, 5]);
        let t = Type::var_dim(Type::int32(), Some(meta)).unwrap();
        assert!(t.is_concrete());
        assert_eq!(t.ndim(), 1);
        // 5 total elements of 4 bytes
        assert_eq!(t.data_size(), 20);
        assert_eq!(t.data_align(), 4);
        assert_eq!(t.dim_size(), 1);
    }

    #[test]
    fn var_dim_abstract_without_metadata() {
        let t = Type::var_dim(Type::typevar("T"), None).unwrap();
        assert!(t.is_abstract());
        assert_eq!(t.ndim(), 1);
    }

    #[test]
    fn var_dim_rejects_mismatched_modes() {
        let meta = var_meta(vec![1], vec![0, 1]);
        let err = Type::var_dim(Type::typevar("T"), Some(meta)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);

        let err = Type::var_dim(Type::int32(), None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn var_dim_rejects_ragged_metadata() {
        let err = Type::var_dim(Type::int32(), Some(var_meta(vec![], vec![0]))).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);

        let err =
            Type::var_dim(Type::int32(), Some(var_meta(vec![2, 3], vec![0, 2]))).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);

        let bad_bitmap = VarDimData {
            shapes: vec![2, 3],
            offsets: vec![0, 2, 5],
            bitmap: Some(vec![0, 0]),
        };
        let err = Type::var_dim(Type::int32(), Some(bad_bitmap)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn var_in_var_inherits_size() {
        let inner = Type::var_dim(Type::int32(), Some(var_meta(vec![2, 3], vec![0, 2, 5])))
            .unwrap();
        let inner_size = inner.data_size();

        // Outer offsets must cover the inner row count (2 rows).
        let outer =
            Type::var_dim(inner, Some(var_meta(vec![1, 1], vec![0, 1, 2]))).unwrap();
        assert_eq!(outer.data_size(), inner_size);
        assert_eq!(outer.ndim(), 2);
    }

    #[test]
    fn var_in_var_validates_row_count() {
        let inner = Type::var_dim(Type::int32(), Some(var_meta(vec![2, 3], vec![0, 2, 5])))
            .unwrap();
        let err =
            Type::var_dim(inner, Some(var_meta(vec![1, 1], vec![0, 1, 3]))).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Value);
    }

    #[test]
    fn symbolic_dim_is_abstract() {
        let t = Type::symbolic_dim("N", Type::int32()).unwrap();
        assert!(t.is_abstract());
        assert_eq!(t.ndim(), 1);
        assert_eq!(t.tag(), Tag::SymbolicDim);
    }

    #[test]
    fn symbolic_dim_rejects_var_shapes() {
        let var = Type::var_dim(Type::int32(), Some(var_meta(vec![1], vec![0, 1]))).unwrap();
        let err = Type::symbolic_dim("N", var).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Value);
    }

    #[test]
    fn single_ellipsis_is_allowed() {
        let t = Type::ellipsis_dim(None, Type::float32()).unwrap();
        assert!(t.is_abstract());
        assert!(t.dim_flags().has_ellipsis());
    }

    #[test]
    fn second_ellipsis_is_rejected() {
        let inner = Type::ellipsis_dim(None, Type::float32()).unwrap();
        let err = Type::ellipsis_dim(Some("Rest".into()), inner).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Value);
        assert_eq!(err.message(), "more than one ellipsis");
    }

    #[test]
    fn dim_option_only_for_var_dims() {
        let var = Type::var_dim(Type::typevar("T"), None).unwrap();
        let optional = Type::dim_option(var).unwrap();
        assert!(optional.is_optional());

        let fixed = Type::fixed_dim(2, Type::int32(), Order::A).unwrap();
        let err = Type::dim_option(fixed).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotImplemented);

        let sym = Type::symbolic_dim("N", Type::int32()).unwrap();
        let err = Type::dim_option(sym).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotImplemented);

        let ellipsis = Type::ellipsis_dim(None, Type::int32()).unwrap();
        let err = Type::dim_option(ellipsis).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);

        let err = Type::dim_option(Type::int32()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn option_bit_does_not_propagate() {
        let var = Type::var_dim(Type::typevar("T"), None).unwrap();
        let optional = Type::dim_option(var).unwrap();
        let outer = Type::var_dim(optional, None).unwrap();
        assert!(!outer.dim_flags().is_optional());
    }

    #[test]
    fn nesting_depth_is_bounded() {
        let mut t = Type::typevar("T");
        for _ in 0..MAX_DIM {
            t = Type::fixed_dim(1, t, Order::A).unwrap();
        }
        let err = Type::fixed_dim(1, t, Order::A).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Value);
    }
}
