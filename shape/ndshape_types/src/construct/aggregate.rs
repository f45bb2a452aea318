//! Tuple and record constructors.

use ndshape_diagnostic::{ShapeError, ShapeResult};

use crate::field::Field;
use crate::layout::pack_fields;
use crate::node::DataLayout;
use crate::{Type, TypeKind};

/// Reject explicit per-field alignment in an abstract aggregate.
///
/// Explicit alignment only has meaning once the whole layout resolves.
fn check_abstract_fields(fields: &[Field], kind: &'static str) -> ShapeResult<()> {
    for field in fields {
        if field.explicit_align() {
            return Err(ShapeError::formatted(
                ndshape_diagnostic::ErrorKind::InvalidArgument,
                format!("explicit field alignment in abstract {kind}"),
            ));
        }
    }
    Ok(())
}

impl Type {
    /// A tuple of positional members.
    ///
    /// The tuple is abstract if `variadic` is set or any member is
    /// abstract; otherwise the members are packed in declaration order.
    /// Members must be unnamed.
    pub fn tuple(
        variadic: bool,
        fields: Vec<Field>,
        align: Option<u16>,
        pack: Option<u16>,
    ) -> ShapeResult<Type> {
        let concrete = !variadic && fields.iter().all(Field::is_concrete);

        if !concrete {
            check_abstract_fields(&fields, "tuple")?;
            let types = consume_unnamed(fields);
            return Ok(Type::abstract_node(
                TypeKind::Tuple {
                    variadic,
                    types,
                    layout: None,
                },
                0,
            ));
        }

        let packed = pack_fields(&fields, align, pack)?;
        let types = consume_unnamed(fields);
        Ok(Type::concrete_node(
            TypeKind::Tuple {
                variadic,
                types,
                layout: Some(packed.layout),
            },
            0,
            DataLayout {
                size: packed.size,
                align: packed.align,
                meta: 0,
            },
        ))
    }

    /// A record of named members.
    ///
    /// Same layout rules as [`Type::tuple`]; every member must be named.
    pub fn record(
        variadic: bool,
        fields: Vec<Field>,
        align: Option<u16>,
        pack: Option<u16>,
    ) -> ShapeResult<Type> {
        let concrete = !variadic && fields.iter().all(Field::is_concrete);

        if !concrete {
            check_abstract_fields(&fields, "record")?;
            let (names, types) = consume_named(fields);
            return Ok(Type::abstract_node(
                TypeKind::Record {
                    variadic,
                    names,
                    types,
                    layout: None,
                },
                0,
            ));
        }

        let packed = pack_fields(&fields, align, pack)?;
        let (names, types) = consume_named(fields);
        Ok(Type::concrete_node(
            TypeKind::Record {
                variadic,
                names,
                types,
                layout: Some(packed.layout),
            },
            0,
            DataLayout {
                size: packed.size,
                align: packed.align,
                meta: 0,
            },
        ))
    }
}

fn consume_unnamed(fields: Vec<Field>) -> Vec<Type> {
    fields
        .into_iter()
        .map(|field| {
            let (name, ty) = field.into_parts();
            assert!(name.is_none(), "named field in a tuple");
            ty
        })
        .collect()
}

fn consume_named(fields: Vec<Field>) -> (Vec<String>, Vec<Type>) {
    let mut names = Vec::with_capacity(fields.len());
    let mut types = Vec::with_capacity(fields.len());
    for field in fields {
        let (name, ty) = field.into_parts();
        match name {
            Some(name) => names.push(name),
            None => panic!("unnamed field in a record"),
        }
        types.push(ty);
    }
    (names, types)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ndshape_diagnostic::ErrorKind;
    use pretty_assertions::assert_eq;

    use super::*;

    fn unnamed(types: Vec<Type>) -> Vec<Field> {
        types
            .into_iter()
            .map(|ty| Field::unnamed(ty).unwrap())
            .collect()
    }

    #[test]
    fn concrete_tuple_layout() {
        let t = Type::tuple(
            false,
            unnamed(vec![Type::int8(), Type::int32(), Type::int8()]),
            None,
            None,
        )
        .unwrap();

        assert!(t.is_concrete());
        assert_eq!(t.data_size(), 12);
        assert_eq!(t.data_align(), 4);

        match t.kind() {
            TypeKind::Tuple {
                layout: Some(layout),
                ..
            } => {
                assert_eq!(layout.offsets, vec![0, 4, 8]);
                assert_eq!(layout.pads, vec![3, 0, 3]);
            }
            _ => panic!("expected a concrete tuple"),
        }
    }

    #[test]
    fn empty_tuple_is_concrete_and_empty() {
        let t = Type::tuple(false, vec![], None, None).unwrap();
        assert!(t.is_concrete());
        assert_eq!(t.data_size(), 0);
        assert_eq!(t.data_align(), 1);
    }

    #[test]
    fn variadic_tuple_is_abstract() {
        let t = Type::tuple(true, unnamed(vec![Type::int32()]), None, None).unwrap();
        assert!(t.is_abstract());
    }

    #[test]
    fn abstract_member_makes_tuple_abstract() {
        let t = Type::tuple(
            false,
            unnamed(vec![Type::int32(), Type::typevar("T")]),
            None,
            None,
        )
        .unwrap();
        assert!(t.is_abstract());
    }

    #[test]
    fn abstract_tuple_rejects_explicit_alignment() {
        let fields = vec![
            Field::new(None, Type::int32(), Some(8), None).unwrap(),
            Field::unnamed(Type::typevar("T")).unwrap(),
        ];
        let err = Type::tuple(false, fields, None, None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn record_names_are_kept_in_order() {
        let fields = vec![
            Field::named("x", Type::int8()).unwrap(),
            Field::named("y", Type::int64()).unwrap(),
        ];
        let t = Type::record(false, fields, None, None).unwrap();

        assert!(t.is_concrete());
        assert_eq!(t.data_size(), 16);
        match t.kind() {
            TypeKind::Record { names, .. } => {
                assert_eq!(names, &["x".to_string(), "y".to_string()]);
            }
            _ => panic!("expected a record"),
        }
    }

    #[test]
    fn record_pack_conflicts_with_field_attributes() {
        let fields = vec![Field::new(Some("x".into()), Type::int32(), Some(8), None).unwrap()];
        let err = Type::record(false, fields, None, Some(2)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }
}
