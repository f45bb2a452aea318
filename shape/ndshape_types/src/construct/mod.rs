//! Type constructors.
//!
//! Every public constructor either returns a fully formed node or
//! consumes its inputs and returns an error; a failed call leaves
//! nothing for the caller to clean up.

mod aggregate;
mod categorical;
mod dim;
mod option;
mod scalar;
mod special;

pub use scalar::Alias;

/// Size/alignment pair of a native representation.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) const fn size_align<T>() -> (i64, u16) {
    (
        std::mem::size_of::<T>() as i64,
        std::mem::align_of::<T>() as u16,
    )
}
