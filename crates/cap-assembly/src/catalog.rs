//! Name → constructor registry.
//!
//! Sheets refer to components and capabilities by name.  The catalog maps
//! those names to monomorphized attach functions and capability factories,
//! so nothing is looked up by runtime type information.

use cap_capability::Capability;
use cap_core::EntityId;
use cap_core::collections::Map;
use cap_entity::{EntityError, EntityResult, EntityStore};

use crate::{AssemblyReport, ComponentSpec, Configurable, Diagnostic};

type AttachFn = fn(&mut EntityStore, EntityId, &ComponentSpec, &mut AssemblyReport) -> EntityResult<()>;
type CapabilityFactory = Box<dyn Fn() -> Box<dyn Capability>>;

/// Every component and capability a sheet may name.
#[derive(Default)]
pub struct Catalog {
    components:   Map<String, AttachFn>,
    capabilities: Map<String, CapabilityFactory>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make component `T` available under `name`.  A later registration
    /// under the same name replaces the earlier one.
    pub fn register_component<T>(&mut self, name: &str) -> &mut Self
    where
        T: Configurable + Default + Send + Sync + 'static,
    {
        if self.components.insert(name.to_string(), attach::<T>).is_some() {
            tracing::debug!(name, "component registration replaced");
        }
        self
    }

    /// Make a capability available under `name`.  `factory` is called once
    /// per entity that lists it.
    pub fn register_capability<F>(&mut self, name: &str, factory: F) -> &mut Self
    where
        F: Fn() -> Box<dyn Capability> + 'static,
    {
        if self.capabilities.insert(name.to_string(), Box::new(factory)).is_some() {
            tracing::debug!(name, "capability registration replaced");
        }
        self
    }

    /// Shorthand for capabilities built with `Default`.
    pub fn register_capability_default<C>(&mut self, name: &str) -> &mut Self
    where
        C: Capability + Default,
    {
        self.register_capability(name, || Box::new(C::default()))
    }

    pub fn has_component(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    pub fn has_capability(&self, name: &str) -> bool {
        self.capabilities.contains_key(name)
    }

    /// Registered component names, sorted.
    pub fn component_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.components.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered capability names, sorted.
    pub fn capability_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.capabilities.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub(crate) fn attach_fn(&self, name: &str) -> Option<AttachFn> {
        self.components.get(name).copied()
    }

    pub(crate) fn instantiate(&self, name: &str) -> Option<Box<dyn Capability>> {
        self.capabilities.get(name).map(|factory| factory())
    }
}

/// Attach a default `T` unless one is present, then apply `spec`'s
/// properties to it in order.
fn attach<T>(
    entities: &mut EntityStore,
    entity: EntityId,
    spec: &ComponentSpec,
    report: &mut AssemblyReport,
) -> EntityResult<()>
where
    T: Configurable + Default + Send + Sync + 'static,
{
    let existed = entities.has_component::<T>(entity);
    if !existed {
        entities.insert_component(entity, T::default())?;
    }
    let component = entities
        .component_mut::<T>(entity)
        .ok_or(EntityError::NotFound(entity))?;

    for prop in &spec.properties {
        match component.set_field(&prop.field, &prop.value) {
            Ok(()) => {
                report.properties_applied += 1;
                tracing::trace!(component = %spec.name, field = %prop.field, value = %prop.value, "property set");
            }
            Err(error) => report.warn(Diagnostic::Field {
                component: spec.name.clone(),
                field:     prop.field.clone(),
                error,
            }),
        }
    }

    if existed {
        report.components_updated.push(spec.name.clone());
        report.warn(Diagnostic::ComponentExisted(spec.name.clone()));
    } else {
        report.components_added.push(spec.name.clone());
    }
    Ok(())
}
