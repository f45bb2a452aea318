//! Datashape type descriptors for array and tensor data.
//!
//! This crate builds, validates, and computes the binary memory layout
//! of structural type descriptors: dimensions, tuples, records, scalars,
//! strings, categoricals, pointers, option wrappers and type variables.
//! It describes *how* memory for a described type must be arranged and
//! *whether* a description is concrete enough to do so; it never touches
//! actual data buffers.
//!
//! # Abstract and concrete types
//!
//! Every [`Type`] is either *abstract* (layout not yet determined: it
//! contains a type variable, an unconstrained kind, or an open-ended
//! aggregate) or *concrete* (size, alignment and metadata footprint are
//! fully resolved). Constructors compute the distinction; layout
//! accessors are defined only for concrete nodes.
//!
//! # Ownership
//!
//! Types form strict ownership trees: a parent owns its children, no
//! node is ever aliased by two owners. Constructors take children by
//! value and consume them even on failure, so error paths never leave
//! the caller holding a partially owned structure.

mod align;
mod construct;
mod encoding;
mod field;
mod flags;
mod layout;
mod node;
mod registry;
mod roundtrip;
mod tag;
mod value;

pub use align::{is_power_of_two, round_up};
pub use construct::Alias;
pub use encoding::Encoding;
pub use field::Field;
pub use flags::{DimFlags, DimSize, Order};
pub use layout::PackedLayout;
pub use node::{
    Access, BytesRepr, Complex128Repr, Complex64Repr, DataLayout, FixedDimMeta, SizedStringRepr,
    Type, TypeKind, VarDimData, VarDimMeta, MAX_DIM,
};
pub use registry::{SharedTypedefRegistry, TypedefRegistry};
pub use roundtrip::Notation;
pub use tag::Tag;
pub use value::MemValue;

// Error types live in their own crate; re-exported here so callers can
// match on kinds without a second import.
pub use ndshape_diagnostic::{ErrorKind, ShapeError, ShapeResult};
