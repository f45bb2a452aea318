//! The type node tree.
//!
//! A [`Type`] is an owned recursive tree: one tagged variant plus the
//! abstract/concrete access state. Concrete nodes carry a [`DataLayout`]
//! (size, alignment, metadata footprint); abstract nodes carry nothing,
//! and reading layout information from an abstract node is a contract
//! violation that panics.
//!
//! Parents own their children exclusively. Constructors take children by
//! value; on a failed construction the moved-in children simply drop, so
//! a caller never frees inputs after an error.

use std::cell::Cell;

use smallvec::SmallVec;

use crate::flags::{DimFlags, Order};
use crate::layout::PackedLayout;
use crate::value::MemValue;
use crate::{Encoding, Tag};

/// Maximum number of dimension wrappers around an element type.
pub const MAX_DIM: u32 = 128;

/// Size, alignment and metadata footprint of a concrete type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct DataLayout {
    /// Data size in bytes.
    pub size: i64,
    /// Power-of-two byte alignment.
    pub align: u16,
    /// Bytes of per-instance auxiliary metadata.
    pub meta: i64,
}

/// Abstract/concrete access state of a type node.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Access {
    /// Layout not yet determined.
    Abstract,
    /// Fully laid out.
    Concrete(DataLayout),
}

/// Concrete metadata of a fixed dimension.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FixedDimMeta {
    /// Element size in bytes.
    pub itemsize: i64,
    /// Distance between consecutive elements in bytes.
    pub stride: i64,
}

/// Concrete metadata of a variable dimension.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct VarDimMeta {
    /// Number of logical rows.
    pub nshapes: i64,
    /// Per-row element counts, `nshapes` entries.
    pub shapes: Vec<i64>,
    /// Cumulative row offsets, `nshapes + 1` entries.
    pub offsets: Vec<i64>,
    /// Validity bitmap for missing rows, `ceil(nshapes / 8)` bytes.
    pub bitmap: Option<Vec<u8>>,
    /// Element size in bytes.
    pub itemsize: i64,
    /// Reserved, `0` until strided access is assigned.
    pub stride: i64,
    /// Reserved, `0` until strided access is assigned.
    pub suboffset: i64,
}

/// Owned metadata supplied to the variable-dimension constructor.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct VarDimData {
    /// Per-row element counts.
    pub shapes: Vec<i64>,
    /// Cumulative row offsets, one entry more than `shapes`.
    pub offsets: Vec<i64>,
    /// Optional validity bitmap.
    pub bitmap: Option<Vec<u8>>,
}

/// In-memory representation of a string value: pointer plus length.
#[repr(C)]
pub struct SizedStringRepr {
    /// The code units.
    pub data: *const u8,
    /// Length in code units.
    pub size: i64,
}

/// In-memory representation of a bytes value: pointer plus length.
#[repr(C)]
pub struct BytesRepr {
    /// The bytes.
    pub data: *const u8,
    /// Length in bytes.
    pub size: i64,
}

/// In-memory representation of a 64-bit complex number.
#[repr(C)]
pub struct Complex64Repr {
    /// Real part.
    pub re: f32,
    /// Imaginary part.
    pub im: f32,
}

/// In-memory representation of a 128-bit complex number.
#[repr(C)]
pub struct Complex128Repr {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

/// The tagged variant of a type node.
///
/// Variable-length payloads (member sequences, variable-dimension
/// metadata, categorical value sets) are owned vectors inside the
/// variant.
#[derive(Debug)]
pub enum TypeKind {
    // Abstract kind markers
    /// Matches any type.
    AnyKind,
    /// Matches any scalar.
    ScalarKind,
    /// Matches any signed integer.
    SignedKind,
    /// Matches any unsigned integer.
    UnsignedKind,
    /// Matches any float.
    FloatKind,
    /// Matches any complex number.
    ComplexKind,
    /// Matches any fixed string.
    FixedStringKind,
    /// Matches any fixed bytes block.
    FixedBytesKind,

    // Dimensions
    /// Dimension with a fixed shape.
    FixedDim {
        /// Accumulated dimension flags.
        flags: DimFlags,
        /// Number of elements along this axis.
        shape: i64,
        /// The enclosed element type.
        element: Box<Type>,
        /// Concrete metadata, present iff the node is concrete.
        meta: Option<FixedDimMeta>,
    },
    /// Dimension with per-row shapes.
    VarDim {
        /// Accumulated dimension flags.
        flags: DimFlags,
        /// The enclosed element type.
        element: Box<Type>,
        /// Concrete metadata, present iff the node is concrete.
        meta: Option<VarDimMeta>,
    },
    /// Named dimension placeholder.
    SymbolicDim {
        /// Accumulated dimension flags.
        flags: DimFlags,
        /// The placeholder name.
        name: String,
        /// The enclosed element type.
        element: Box<Type>,
    },
    /// "Rest of the dimensions" marker.
    EllipsisDim {
        /// Accumulated dimension flags.
        flags: DimFlags,
        /// Optional marker name.
        name: Option<String>,
        /// The enclosed element type.
        element: Box<Type>,
    },

    // Aggregates
    /// Tuple with positional members.
    Tuple {
        /// Member count is open-ended.
        variadic: bool,
        /// Member types in declaration order.
        types: Vec<Type>,
        /// Offset/align/pad tables, present iff the node is concrete.
        layout: Option<PackedLayout>,
    },
    /// Record with named members.
    Record {
        /// Member count is open-ended.
        variadic: bool,
        /// Member names, parallel to `types`.
        names: Vec<String>,
        /// Member types in declaration order.
        types: Vec<Type>,
        /// Offset/align/pad tables, present iff the node is concrete.
        layout: Option<PackedLayout>,
    },
    /// Function with return, positional and keyword types.
    Function {
        /// Return type.
        ret: Box<Type>,
        /// Positional argument tuple.
        pos: Box<Type>,
        /// Keyword argument record.
        kwds: Box<Type>,
    },

    // Wrappers and named types
    /// Optional value.
    Option(Box<Type>),
    /// Optional item inside a dimension.
    OptionItem(Box<Type>),
    /// Reference to a registered typedef.
    Nominal(String),
    /// Named type constructor application.
    Constr {
        /// Constructor name.
        name: String,
        /// Argument type.
        arg: Box<Type>,
    },
    /// Type variable.
    Typevar(String),
    /// Sorted, deduplicated set of typed literal values.
    Categorical(Vec<MemValue>),
    /// Pointer to a value of the child type.
    Pointer(Box<Type>),

    // Scalars
    /// The empty type.
    Void,
    /// Boolean.
    Bool,
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 8-bit unsigned integer.
    Uint8,
    /// 16-bit unsigned integer.
    Uint16,
    /// 32-bit unsigned integer.
    Uint32,
    /// 64-bit unsigned integer.
    Uint64,
    /// 16-bit float.
    Float16,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
    /// Complex number of two 16-bit halves.
    Complex32,
    /// Complex number of two 32-bit floats.
    Complex64,
    /// Complex number of two 64-bit floats.
    Complex128,

    // Text and bytes
    /// Single character in a declared encoding.
    Char(Encoding),
    /// Variable-length string reference.
    String,
    /// Fixed-length string.
    FixedString {
        /// Length in code units.
        size: i64,
        /// Code unit encoding.
        encoding: Encoding,
    },
    /// Variable-length bytes reference.
    Bytes {
        /// Minimum alignment of the pointed-to bytes.
        target_align: u16,
    },
    /// Fixed-length bytes block.
    FixedBytes {
        /// Length in bytes.
        size: i64,
        /// Explicit alignment of the block.
        align: u16,
    },
}

impl TypeKind {
    /// The tag of this variant.
    pub const fn tag(&self) -> Tag {
        match self {
            TypeKind::AnyKind => Tag::AnyKind,
            TypeKind::ScalarKind => Tag::ScalarKind,
            TypeKind::SignedKind => Tag::SignedKind,
            TypeKind::UnsignedKind => Tag::UnsignedKind,
            TypeKind::FloatKind => Tag::FloatKind,
            TypeKind::ComplexKind => Tag::ComplexKind,
            TypeKind::FixedStringKind => Tag::FixedStringKind,
            TypeKind::FixedBytesKind => Tag::FixedBytesKind,
            TypeKind::FixedDim { .. } => Tag::FixedDim,
            TypeKind::VarDim { .. } => Tag::VarDim,
            TypeKind::SymbolicDim { .. } => Tag::SymbolicDim,
            TypeKind::EllipsisDim { .. } => Tag::EllipsisDim,
            TypeKind::Tuple { .. } => Tag::Tuple,
            TypeKind::Record { .. } => Tag::Record,
            TypeKind::Function { .. } => Tag::Function,
            TypeKind::Option(_) => Tag::Option,
            TypeKind::OptionItem(_) => Tag::OptionItem,
            TypeKind::Nominal(_) => Tag::Nominal,
            TypeKind::Constr { .. } => Tag::Constr,
            TypeKind::Typevar(_) => Tag::Typevar,
            TypeKind::Categorical(_) => Tag::Categorical,
            TypeKind::Pointer(_) => Tag::Pointer,
            TypeKind::Void => Tag::Void,
            TypeKind::Bool => Tag::Bool,
            TypeKind::Int8 => Tag::Int8,
            TypeKind::Int16 => Tag::Int16,
            TypeKind::Int32 => Tag::Int32,
            TypeKind::Int64 => Tag::Int64,
            TypeKind::Uint8 => Tag::Uint8,
            TypeKind::Uint16 => Tag::Uint16,
            TypeKind::Uint32 => Tag::Uint32,
            TypeKind::Uint64 => Tag::Uint64,
            TypeKind::Float16 => Tag::Float16,
            TypeKind::Float32 => Tag::Float32,
            TypeKind::Float64 => Tag::Float64,
            TypeKind::Complex32 => Tag::Complex32,
            TypeKind::Complex64 => Tag::Complex64,
            TypeKind::Complex128 => Tag::Complex128,
            TypeKind::Char(_) => Tag::Char,
            TypeKind::String => Tag::String,
            TypeKind::FixedString { .. } => Tag::FixedString,
            TypeKind::Bytes { .. } => Tag::Bytes,
            TypeKind::FixedBytes { .. } => Tag::FixedBytes,
        }
    }
}

/// A datashape type descriptor.
#[derive(Debug)]
pub struct Type {
    kind: TypeKind,
    access: Access,
    ndim: u32,
    hash: Cell<Option<i64>>,
}

impl Type {
    /// Build an abstract node.
    pub(crate) fn abstract_node(kind: TypeKind, ndim: u32) -> Self {
        Type {
            kind,
            access: Access::Abstract,
            ndim,
            hash: Cell::new(None),
        }
    }

    /// Build a concrete node.
    pub(crate) fn concrete_node(kind: TypeKind, ndim: u32, layout: DataLayout) -> Self {
        Type {
            kind,
            access: Access::Concrete(layout),
            ndim,
            hash: Cell::new(None),
        }
    }

    /// The tagged variant.
    #[inline]
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Mutable access for in-place flag updates.
    #[inline]
    pub(crate) fn kind_mut(&mut self) -> &mut TypeKind {
        &mut self.kind
    }

    /// The tag of this node.
    #[inline]
    pub fn tag(&self) -> Tag {
        self.kind.tag()
    }

    /// The access state.
    #[inline]
    pub fn access(&self) -> &Access {
        &self.access
    }

    /// Number of dimension wrappers enclosing the element type.
    #[inline]
    pub fn ndim(&self) -> u32 {
        self.ndim
    }

    /// Check if the layout is not yet determined.
    #[inline]
    pub fn is_abstract(&self) -> bool {
        matches!(self.access, Access::Abstract)
    }

    /// Check if the layout is fully determined.
    #[inline]
    pub fn is_concrete(&self) -> bool {
        matches!(self.access, Access::Concrete(_))
    }

    /// The concrete layout of this node.
    ///
    /// # Panics
    /// Panics on an abstract node: layout is defined only for concrete
    /// types.
    #[inline]
    pub fn layout(&self) -> DataLayout {
        match self.access {
            Access::Concrete(layout) => layout,
            Access::Abstract => panic!("layout of an abstract type"),
        }
    }

    /// Data size in bytes. Defined only for concrete nodes.
    #[inline]
    pub fn data_size(&self) -> i64 {
        self.layout().size
    }

    /// Data alignment in bytes. Defined only for concrete nodes.
    #[inline]
    pub fn data_align(&self) -> u16 {
        self.layout().align
    }

    /// Metadata footprint in bytes. Defined only for concrete nodes.
    #[inline]
    pub fn meta_size(&self) -> i64 {
        self.layout().meta
    }

    /// Natural alignment as seen by the field-alignment resolver:
    /// `Some` for concrete nodes, `None` for abstract ones.
    #[inline]
    pub(crate) fn natural_align(&self) -> Option<u16> {
        match self.access {
            Access::Concrete(layout) => Some(layout.align),
            Access::Abstract => None,
        }
    }

    /// The memoized round-trip hash, if computed.
    #[inline]
    pub(crate) fn cached_hash(&self) -> Option<i64> {
        self.hash.get()
    }

    /// Memoize a computed round-trip hash.
    #[inline]
    pub(crate) fn set_cached_hash(&self, hash: i64) {
        self.hash.set(Some(hash));
    }

    /// Dimension flags of this node; empty for non-dimension kinds.
    pub fn dim_flags(&self) -> DimFlags {
        match &self.kind {
            TypeKind::FixedDim { flags, .. }
            | TypeKind::VarDim { flags, .. }
            | TypeKind::SymbolicDim { flags, .. }
            | TypeKind::EllipsisDim { flags, .. } => *flags,
            _ => DimFlags::empty(),
        }
    }

    /// Dimension flags that propagate to an enclosing wrapper.
    #[inline]
    pub fn common_flags(&self) -> DimFlags {
        self.dim_flags().common()
    }

    /// Storage order implied by the contiguity flags.
    pub fn order(&self) -> Order {
        let flags = self.dim_flags();
        if flags.contains(DimFlags::C_CONTIGUOUS) {
            Order::C
        } else if flags.contains(DimFlags::F_CONTIGUOUS) {
            Order::F
        } else {
            Order::A
        }
    }

    /// Metadata integer width recorded in the flags, `0` if unclassified.
    #[inline]
    pub fn dim_size(&self) -> u32 {
        self.dim_flags().dim_size()
    }

    /// Stride of the outermost dimension. Defined only for concrete
    /// nodes.
    pub fn dim_stride(&self) -> i64 {
        assert!(self.is_concrete(), "dim_stride of an abstract type");
        match &self.kind {
            TypeKind::FixedDim {
                meta: Some(meta), ..
            } => meta.stride,
            _ => self.data_size(),
        }
    }

    /// Check if this node or its outermost dimension is optional.
    pub fn is_optional(&self) -> bool {
        match &self.kind {
            TypeKind::Option(_) | TypeKind::OptionItem(_) => true,
            _ => self.dim_flags().is_optional(),
        }
    }

    /// Check if this is a fixed dimension chain marked as a plain
    /// ndarray.
    pub fn is_ndarray(&self) -> bool {
        match &self.kind {
            TypeKind::FixedDim { flags, .. } => flags.contains(DimFlags::NDARRAY),
            _ => false,
        }
    }

    /// The element type of the outermost dimension.
    ///
    /// # Panics
    /// Panics if this node is not a dimension.
    pub fn next_dim(&self) -> &Type {
        assert!(self.ndim > 0, "next_dim of a non-dimension type");
        match &self.kind {
            TypeKind::FixedDim { element, .. }
            | TypeKind::VarDim { element, .. }
            | TypeKind::SymbolicDim { element, .. }
            | TypeKind::EllipsisDim { element, .. } => element,
            _ => unreachable!("ndim > 0 implies a dimension kind"),
        }
    }

    /// Collect the dimension chain and the enclosed element type.
    pub fn dims_dtype(&self) -> (SmallVec<[&Type; 8]>, &Type) {
        let mut dims = SmallVec::new();
        let mut t = self;
        while t.ndim() > 0 {
            dims.push(t);
            t = t.next_dim();
        }
        (dims, t)
    }

    /// Check if this is a signed integer scalar.
    #[inline]
    pub fn is_signed(&self) -> bool {
        self.tag().is_signed()
    }

    /// Check if this is an unsigned integer scalar.
    #[inline]
    pub fn is_unsigned(&self) -> bool {
        self.tag().is_unsigned()
    }

    /// Check if this is a floating point scalar.
    #[inline]
    pub fn is_float(&self) -> bool {
        self.tag().is_float()
    }

    /// Check if this is a complex scalar.
    #[inline]
    pub fn is_complex(&self) -> bool {
        self.tag().is_complex()
    }

    /// Check if this is a dimension wrapper.
    #[inline]
    pub fn is_array(&self) -> bool {
        self.tag().is_dimension()
    }

    /// Check if this is a concrete fixed or variable dimension.
    pub fn is_concrete_array(&self) -> bool {
        matches!(self.tag(), Tag::FixedDim | Tag::VarDim) && self.is_concrete()
    }

    /// Check if this is a scalar value type.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self.tag(),
            Tag::Void
                | Tag::Bool
                | Tag::Int8
                | Tag::Int16
                | Tag::Int32
                | Tag::Int64
                | Tag::Uint8
                | Tag::Uint16
                | Tag::Uint32
                | Tag::Uint64
                | Tag::Float16
                | Tag::Float32
                | Tag::Float64
                | Tag::Complex32
                | Tag::Complex64
                | Tag::Complex128
                | Tag::String
                | Tag::FixedString
                | Tag::FixedBytes
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn abstract_node_has_no_layout() {
        let t = Type::abstract_node(TypeKind::AnyKind, 0);
        assert!(t.is_abstract());
        assert!(!t.is_concrete());
        assert_eq!(t.tag(), Tag::AnyKind);
        assert_eq!(t.ndim(), 0);
    }

    #[test]
    #[should_panic(expected = "layout of an abstract type")]
    fn layout_of_abstract_node_panics() {
        let t = Type::abstract_node(TypeKind::Typevar("T".into()), 0);
        let _ = t.data_size();
    }

    #[test]
    fn concrete_node_exposes_layout() {
        let t = Type::concrete_node(
            TypeKind::Int32,
            0,
            DataLayout {
                size: 4,
                align: 4,
                meta: 0,
            },
        );
        assert!(t.is_concrete());
        assert_eq!(t.data_size(), 4);
        assert_eq!(t.data_align(), 4);
        assert_eq!(t.meta_size(), 0);
    }

    #[test]
    fn non_dimension_has_empty_dim_flags() {
        let t = Type::concrete_node(
            TypeKind::Bool,
            0,
            DataLayout {
                size: 1,
                align: 1,
                meta: 0,
            },
        );
        assert_eq!(t.dim_flags(), DimFlags::empty());
        assert_eq!(t.order(), Order::A);
        assert!(!t.is_optional());
        assert!(!t.is_array());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn repr_struct_sizes() {
        assert_eq!(std::mem::size_of::<SizedStringRepr>(), 16);
        assert_eq!(std::mem::size_of::<BytesRepr>(), 16);
        assert_eq!(std::mem::size_of::<Complex64Repr>(), 8);
        assert_eq!(std::mem::align_of::<Complex64Repr>(), 4);
        assert_eq!(std::mem::size_of::<Complex128Repr>(), 16);
        assert_eq!(std::mem::align_of::<Complex128Repr>(), 8);
    }
}
