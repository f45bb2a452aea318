//! Kind markers, type variables, named types, functions and pointers.

use ndshape_diagnostic::{ErrorKind, ShapeError, ShapeResult};

use crate::node::{Access, DataLayout};
use crate::registry::TypedefRegistry;
use crate::{Type, TypeKind};

impl Type {
    /// The top kind: matches any type.
    pub fn any_kind() -> Type {
        Type::abstract_node(TypeKind::AnyKind, 0)
    }

    /// Matches any scalar.
    pub fn scalar_kind() -> Type {
        Type::abstract_node(TypeKind::ScalarKind, 0)
    }

    /// Matches any signed integer.
    pub fn signed_kind() -> Type {
        Type::abstract_node(TypeKind::SignedKind, 0)
    }

    /// Matches any unsigned integer.
    pub fn unsigned_kind() -> Type {
        Type::abstract_node(TypeKind::UnsignedKind, 0)
    }

    /// Matches any float.
    pub fn float_kind() -> Type {
        Type::abstract_node(TypeKind::FloatKind, 0)
    }

    /// Matches any complex number.
    pub fn complex_kind() -> Type {
        Type::abstract_node(TypeKind::ComplexKind, 0)
    }

    /// Matches any fixed string.
    pub fn fixed_string_kind() -> Type {
        Type::abstract_node(TypeKind::FixedStringKind, 0)
    }

    /// Matches any fixed bytes block.
    pub fn fixed_bytes_kind() -> Type {
        Type::abstract_node(TypeKind::FixedBytesKind, 0)
    }

    /// A type variable. Always abstract.
    pub fn typevar(name: impl Into<String>) -> Type {
        Type::abstract_node(TypeKind::Typevar(name.into()), 0)
    }

    /// A named type constructor applied to one argument.
    ///
    /// Copies the argument's concreteness; a concrete constructor has
    /// the argument's size and alignment and no metadata of its own.
    pub fn constr(name: impl Into<String>, arg: Type) -> Type {
        let access = match arg.access() {
            Access::Concrete(layout) => Access::Concrete(DataLayout {
                size: layout.size,
                align: layout.align,
                meta: 0,
            }),
            Access::Abstract => Access::Abstract,
        };

        let kind = TypeKind::Constr {
            name: name.into(),
            arg: Box::new(arg),
        };
        match access {
            Access::Concrete(layout) => Type::concrete_node(kind, 0, layout),
            Access::Abstract => Type::abstract_node(kind, 0),
        }
    }

    /// A function type. Always abstract.
    ///
    /// `pos` is the positional-argument tuple, `kwds` the
    /// keyword-argument record.
    pub fn function(ret: Type, pos: Type, kwds: Type) -> Type {
        Type::abstract_node(
            TypeKind::Function {
                ret: Box::new(ret),
                pos: Box::new(pos),
                kwds: Box::new(kwds),
            },
            0,
        )
    }

    /// A pointer to a value of the child type.
    ///
    /// Always concrete: the stored representation is one pointer,
    /// whatever the child is.
    pub fn pointer(ty: Type) -> Type {
        let (size, align) = super::size_align::<*const u8>();
        Type::concrete_node(
            TypeKind::Pointer(Box::new(ty)),
            0,
            DataLayout {
                size,
                align,
                meta: 0,
            },
        )
    }

    /// A reference to a registered typedef.
    ///
    /// The registry only stores concrete types, so a successful lookup
    /// always yields a concrete nominal node carrying the target's size
    /// and alignment.
    pub fn nominal(name: impl Into<String>, registry: &TypedefRegistry) -> ShapeResult<Type> {
        let name = name.into();
        let Some(target) = registry.lookup(&name) else {
            return Err(ShapeError::formatted(
                ErrorKind::Value,
                format!("typedef '{name}' not found"),
            ));
        };

        let layout = DataLayout {
            size: target.data_size(),
            align: target.data_align(),
            meta: 0,
        };
        Ok(Type::concrete_node(TypeKind::Nominal(name), 0, layout))
    }
}
