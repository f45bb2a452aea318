//! Property-based tests for the layout primitives.
//!
//! These complement the example-based tests by generating random
//! alignments, offsets and field sequences.

#![allow(clippy::unwrap_used, reason = "tests can panic")]

use ndshape_types::{round_up, ErrorKind, Field, Type, TypeKind};
use proptest::prelude::*;

/// Powers of two that fit a u16.
fn pow2_strategy() -> impl Strategy<Value = u16> {
    (0u32..16).prop_map(|shift| 1u16 << shift)
}

/// A small scalar type with its expected size.
fn scalar_strategy() -> impl Strategy<Value = Type> {
    prop_oneof![
        Just(()).prop_map(|()| Type::int8()),
        Just(()).prop_map(|()| Type::int16()),
        Just(()).prop_map(|()| Type::int32()),
        Just(()).prop_map(|()| Type::int64()),
        Just(()).prop_map(|()| Type::float32()),
        Just(()).prop_map(|()| Type::float64()),
        Just(()).prop_map(|()| Type::uint8()),
    ]
}

proptest! {
    #[test]
    fn round_up_is_idempotent(offset in 0i64..1_000_000, align in pow2_strategy()) {
        let once = round_up(offset, align);
        prop_assert_eq!(round_up(once, align), once);
        prop_assert!(once >= offset);
        prop_assert_eq!(once % i64::from(align), 0);
    }

    #[test]
    fn explicit_align_is_max_of_natural_and_requested(align in pow2_strategy()) {
        // int32 has natural alignment 4.
        let field = Field::new(None, Type::int32(), Some(align), None).unwrap();
        let t = Type::tuple(false, vec![field], None, None).unwrap();
        prop_assert_eq!(t.data_align(), align.max(4));
    }

    #[test]
    fn align_and_pack_always_conflict(align in pow2_strategy(), pack in pow2_strategy()) {
        let err = Field::new(None, Type::int32(), Some(align), Some(pack)).unwrap_err();
        prop_assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn non_power_of_two_alignments_fail(align in 2u16..1024) {
        prop_assume!(align & (align - 1) != 0);
        let result = Field::new(None, Type::int8(), Some(align), None);
        prop_assert!(result.is_err());
    }

    #[test]
    fn layout_is_deterministic(types in prop::collection::vec(scalar_strategy(), 0..8)) {
        let build = |types: &[Type]| {
            let fields = types
                .iter()
                .map(|t| {
                    Field::unnamed(Type::primitive(t.tag()).unwrap()).unwrap()
                })
                .collect();
            Type::tuple(false, fields, None, None).unwrap()
        };

        let a = build(&types);
        let b = build(&types);

        prop_assert_eq!(a.data_size(), b.data_size());
        prop_assert_eq!(a.data_align(), b.data_align());
        match (a.kind(), b.kind()) {
            (
                TypeKind::Tuple { layout: Some(la), .. },
                TypeKind::Tuple { layout: Some(lb), .. },
            ) => prop_assert_eq!(la, lb),
            _ => prop_assert!(false, "expected concrete tuples"),
        }
    }

    #[test]
    fn offsets_are_aligned_and_non_overlapping(
        types in prop::collection::vec(scalar_strategy(), 1..8),
    ) {
        let fields = types
            .iter()
            .map(|t| Field::unnamed(Type::primitive(t.tag()).unwrap()).unwrap())
            .collect();
        let t = Type::tuple(false, fields, None, None).unwrap();

        let sizes: Vec<i64> = types.iter().map(Type::data_size).collect();
        match t.kind() {
            TypeKind::Tuple { layout: Some(layout), .. } => {
                let mut end = 0i64;
                for (i, &offset) in layout.offsets.iter().enumerate() {
                    prop_assert!(offset >= end);
                    prop_assert_eq!(offset % i64::from(layout.aligns[i]), 0);
                    end = offset + sizes[i];
                }
                prop_assert!(t.data_size() >= end);
            }
            _ => prop_assert!(false, "expected a concrete tuple"),
        }
    }
}
