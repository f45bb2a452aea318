//! Typedef registry for nominal types.
//!
//! The registry maps names to concrete types. It is dependency-injected:
//! [`crate::Type::nominal`] takes a registry reference instead of
//! consulting process-wide state. Callers that want one shared table use
//! [`SharedTypedefRegistry`], which guards the registry with a
//! `parking_lot` lock; the lock is held only for the duration of a
//! single `register`/`read` call.

use std::sync::Arc;

use ndshape_diagnostic::{ErrorKind, ShapeError, ShapeResult};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Type;

/// Registry of named concrete types.
#[derive(Debug, Default)]
pub struct TypedefRegistry {
    table: FxHashMap<String, Type>,
}

impl TypedefRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        TypedefRegistry::default()
    }

    /// Register a concrete type under a name.
    ///
    /// Abstract types are rejected (a nominal type must have a layout),
    /// as are duplicate names. On failure the type is consumed.
    pub fn register(&mut self, name: impl Into<String>, ty: Type) -> ShapeResult<()> {
        let name = name.into();

        if ty.is_abstract() {
            return Err(ShapeError::value("nominal type must be a concrete type"));
        }
        if self.table.contains_key(&name) {
            return Err(ShapeError::formatted(
                ErrorKind::Value,
                format!("duplicate typedef '{name}'"),
            ));
        }

        tracing::debug!(name = %name, tag = %ty.tag(), "registered typedef");
        self.table.insert(name, ty);
        Ok(())
    }

    /// Look up a registered type.
    pub fn lookup(&self, name: &str) -> Option<&Type> {
        let found = self.table.get(name);
        if found.is_none() {
            tracing::trace!(name = %name, "typedef lookup miss");
        }
        found
    }

    /// Number of registered typedefs.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// A typedef registry shared between owners.
///
/// Cloning is cheap and refers to the same table.
#[derive(Clone, Debug, Default)]
pub struct SharedTypedefRegistry {
    inner: Arc<RwLock<TypedefRegistry>>,
}

impl SharedTypedefRegistry {
    /// Create an empty shared registry.
    pub fn new() -> Self {
        SharedTypedefRegistry::default()
    }

    /// Register a concrete type under a name.
    pub fn register(&self, name: impl Into<String>, ty: Type) -> ShapeResult<()> {
        self.inner.write().register(name, ty)
    }

    /// Run `f` with read access to the underlying registry.
    ///
    /// The lock is held for the duration of the call; do not register
    /// from inside `f`.
    pub fn with<R>(&self, f: impl FnOnce(&TypedefRegistry) -> R) -> R {
        f(&self.inner.read())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn register_and_lookup() {
        let mut registry = TypedefRegistry::new();
        registry
            .register("pixel", Type::fixed_bytes(4, None).unwrap())
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.lookup("pixel").is_some());
        assert!(registry.lookup("voxel").is_none());
    }

    #[test]
    fn abstract_types_are_rejected() {
        let mut registry = TypedefRegistry::new();
        let err = registry.register("t", Type::typevar("T")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Value);
        assert!(registry.is_empty());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = TypedefRegistry::new();
        registry.register("pixel", Type::uint32()).unwrap();
        let err = registry.register("pixel", Type::uint32()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Value);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn shared_registry_clones_refer_to_one_table() {
        let shared = SharedTypedefRegistry::new();
        let clone = shared.clone();
        shared.register("pixel", Type::uint32()).unwrap();

        let found = clone.with(|registry| registry.lookup("pixel").is_some());
        assert!(found);

        let t = clone
            .with(|registry| Type::nominal("pixel", registry))
            .unwrap();
        assert_eq!(t.data_size(), 4);
    }
}
