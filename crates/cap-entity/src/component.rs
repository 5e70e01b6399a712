//! Type-erased, heterogeneous per-entity component storage.
//!
//! # Design
//!
//! Each entity owns one [`ComponentMap`]: at most one value per component
//! type, stored as `Box<dyn ComponentSlot>` in a map keyed by `TypeId`.
//! Components are plain data holders; behavior lives in capabilities.
//!
//! # Usage
//!
//! ```rust
//! use cap_entity::ComponentMap;
//!
//! struct Health(f32);
//!
//! let mut map = ComponentMap::new();
//! assert!(map.insert(Health(100.0)).is_none());
//! assert!(map.contains::<Health>());
//! assert_eq!(map.get::<Health>().map(|h| h.0), Some(100.0));
//! ```

use std::any::{Any, TypeId};

use cap_core::collections::Map;
use cap_core::short_type_name;

// ── Trait object ──────────────────────────────────────────────────────────────

/// Type-erased interface for one stored component value.
///
/// Sealed via the private `Sealed` supertrait: the only implementation is
/// [`TypedComponent<T>`], which keeps the `TypeId` key and the stored type
/// in agreement.
pub trait ComponentSlot: Send + Sync + 'static + sealed::Sealed {
    /// Short type name of the stored value, for diagnostics.
    fn type_name(&self) -> &'static str;

    #[doc(hidden)]
    fn as_any(&self) -> &dyn Any;

    #[doc(hidden)]
    fn as_any_mut(&mut self) -> &mut dyn Any;

    #[doc(hidden)]
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

mod sealed {
    pub trait Sealed {}
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// A component value wrapped so it can be stored as `Box<dyn ComponentSlot>`.
pub struct TypedComponent<T: Send + Sync + 'static>(pub T);

impl<T: Send + Sync + 'static> sealed::Sealed for TypedComponent<T> {}

impl<T: Send + Sync + 'static> ComponentSlot for TypedComponent<T> {
    fn type_name(&self) -> &'static str {
        short_type_name(std::any::type_name::<T>())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

// ── ComponentMap ──────────────────────────────────────────────────────────────

/// One entity's components, at most one value per type.
#[derive(Default)]
pub struct ComponentMap {
    map: Map<TypeId, Box<dyn ComponentSlot>>,
}

impl ComponentMap {
    pub fn new() -> Self {
        Self { map: Map::default() }
    }

    /// Store `value`, returning the previous value of the same type if any.
    pub fn insert<T: Send + Sync + 'static>(&mut self, value: T) -> Option<T> {
        let previous = self.remove::<T>();
        self.map.insert(TypeId::of::<T>(), Box::new(TypedComponent(value)));
        previous
    }

    /// Remove and return the component of type `T`.
    pub fn remove<T: Send + Sync + 'static>(&mut self) -> Option<T> {
        self.map
            .remove(&TypeId::of::<T>())?
            .into_any()
            .downcast::<TypedComponent<T>>()
            .ok()
            .map(|c| c.0)
    }

    // ── Read access ───────────────────────────────────────────────────────

    /// Shared reference to component `T`, `None` if absent.
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.map
            .get(&TypeId::of::<T>())
            .and_then(|c| c.as_any().downcast_ref::<TypedComponent<T>>())
            .map(|c| &c.0)
    }

    /// Mutable reference to component `T`, `None` if absent.
    pub fn get_mut<T: Send + Sync + 'static>(&mut self) -> Option<&mut T> {
        self.map
            .get_mut(&TypeId::of::<T>())
            .and_then(|c| c.as_any_mut().downcast_mut::<TypedComponent<T>>())
            .map(|c| &mut c.0)
    }

    // ── Metadata ──────────────────────────────────────────────────────────

    /// Number of distinct component types attached.
    pub fn type_count(&self) -> usize {
        self.map.len()
    }

    /// `true` if a component of type `T` is attached.
    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        self.map.contains_key(&TypeId::of::<T>())
    }

    /// Short type names of all attached components, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.map.values().map(|c| c.type_name()).collect();
        names.sort_unstable();
        names
    }
}
