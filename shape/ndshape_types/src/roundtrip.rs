//! Hashing and copying through the string round trip.
//!
//! The canonical printer/parser is an external collaborator behind the
//! [`Notation`] trait. Hashing and deep copy are defined in terms of it:
//! hash the canonical string form, copy by printing and re-parsing.
//!
//! This is the intentionally unoptimized baseline. It is not equivalent
//! to a structural hash for every concrete variant: two types whose
//! canonical strings coincide hash alike even if their layout metadata
//! differs. Any structural fast path must keep this implementation
//! available for cross-checking.

use ndshape_diagnostic::ShapeResult;

use crate::Type;

/// The canonical string form collaborator.
pub trait Notation {
    /// Print a type to its unique canonical string.
    fn print(&self, ty: &Type) -> ShapeResult<String>;

    /// Parse a canonical string back into a type.
    fn parse(&self, input: &str) -> ShapeResult<Type>;
}

impl Type {
    /// The 64-bit hash of this type's canonical string form, memoized
    /// on the node.
    ///
    /// The hash is a multiplicative rolling hash seeded by the first
    /// byte and XORed with the string length; `-1` is remapped to `-2`
    /// so the value domain never collides with an uncomputed slot.
    #[allow(clippy::cast_possible_wrap)]
    pub fn hash_with(&self, notation: &dyn Notation) -> ShapeResult<i64> {
        if let Some(hash) = self.cached_hash() {
            return Ok(hash);
        }

        let s = notation.print(self)?;
        let bytes = s.as_bytes();

        let mut x: i64 = i64::from(bytes.first().copied().unwrap_or(0)) << 7;
        for &byte in bytes {
            x = x.wrapping_mul(1_000_003) ^ i64::from(byte);
        }
        x ^= bytes.len() as i64;
        if x == -1 {
            x = -2;
        }

        self.set_cached_hash(x);
        Ok(x)
    }

    /// Deep copy through the canonical string form.
    pub fn copy_with(&self, notation: &dyn Notation) -> ShapeResult<Type> {
        let s = notation.print(self)?;
        notation.parse(&s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use ndshape_diagnostic::{ErrorKind, ShapeError};
    use pretty_assertions::assert_eq;

    use super::*;

    /// Fixed-output notation that counts print calls.
    struct FixedNotation {
        output: &'static str,
        prints: RefCell<usize>,
    }

    impl FixedNotation {
        fn new(output: &'static str) -> Self {
            FixedNotation {
                output,
                prints: RefCell::new(0),
            }
        }
    }

    impl Notation for FixedNotation {
        fn print(&self, _ty: &Type) -> ShapeResult<String> {
            *self.prints.borrow_mut() += 1;
            Ok(self.output.to_string())
        }

        fn parse(&self, input: &str) -> ShapeResult<Type> {
            match input {
                "int32" => Ok(Type::int32()),
                _ => Err(ShapeError::new(ErrorKind::Parse, "unknown type")),
            }
        }
    }

    fn reference_hash(s: &str) -> i64 {
        let bytes = s.as_bytes();
        let mut x: i64 = i64::from(bytes.first().copied().unwrap_or(0)) << 7;
        for &byte in bytes {
            x = x.wrapping_mul(1_000_003) ^ i64::from(byte);
        }
        x ^= bytes.len() as i64;
        if x == -1 {
            x = -2;
        }
        x
    }

    #[test]
    fn hash_matches_the_rolling_formula() {
        let notation = FixedNotation::new("int32");
        let t = Type::int32();
        assert_eq!(t.hash_with(&notation).unwrap(), reference_hash("int32"));
    }

    #[test]
    fn hash_is_memoized() {
        let notation = FixedNotation::new("int32");
        let t = Type::int32();

        let first = t.hash_with(&notation).unwrap();
        let second = t.hash_with(&notation).unwrap();
        assert_eq!(first, second);
        assert_eq!(*notation.prints.borrow(), 1);
    }

    #[test]
    fn equal_strings_hash_alike() {
        let notation = FixedNotation::new("3 * int32");
        let a = Type::fixed_dim(3, Type::int32(), crate::Order::A).unwrap();
        let b = Type::fixed_dim(3, Type::int32(), crate::Order::A).unwrap();
        assert_eq!(
            a.hash_with(&notation).unwrap(),
            b.hash_with(&notation).unwrap()
        );
    }

    #[test]
    fn copy_goes_through_parse() {
        let notation = FixedNotation::new("int32");
        let t = Type::int32();
        let copy = t.copy_with(&notation).unwrap();
        assert_eq!(copy.tag(), t.tag());
        assert_eq!(copy.data_size(), 4);
    }

    #[test]
    fn copy_propagates_parse_errors() {
        let notation = FixedNotation::new("no such type");
        let t = Type::int32();
        let err = t.copy_with(&notation).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
    }
}
