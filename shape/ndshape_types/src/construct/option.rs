//! Option wrappers for items.
//!
//! Optionality of dimensions goes through [`Type::dim_option`]; the
//! wrappers here apply to items only and never nest.

use ndshape_diagnostic::{ShapeError, ShapeResult};

use crate::node::{Access, DataLayout};
use crate::{Tag, Type, TypeKind};

fn check_item(ty: &Type) -> ShapeResult<()> {
    match ty.tag() {
        Tag::FixedDim | Tag::VarDim | Tag::SymbolicDim | Tag::EllipsisDim => {
            Err(ShapeError::invalid_argument("not an item"))
        }
        Tag::Option | Tag::OptionItem => Err(ShapeError::invalid_argument(
            "cannot create an option option",
        )),
        _ => Ok(()),
    }
}

fn wrap(ty: Type, make: fn(Box<Type>) -> TypeKind) -> ShapeResult<Type> {
    check_item(&ty)?;

    match *ty.access() {
        Access::Concrete(layout) => {
            let layout = DataLayout {
                size: layout.size,
                align: layout.align,
                meta: 0,
            };
            Ok(Type::concrete_node(make(Box::new(ty)), 0, layout))
        }
        Access::Abstract => Ok(Type::abstract_node(make(Box::new(ty)), 0)),
    }
}

impl Type {
    /// Wrap an item type as optional.
    pub fn option(ty: Type) -> ShapeResult<Type> {
        wrap(ty, TypeKind::Option)
    }

    /// Wrap an item inside a dimension as optional.
    pub fn option_item(ty: Type) -> ShapeResult<Type> {
        wrap(ty, TypeKind::OptionItem)
    }
}
