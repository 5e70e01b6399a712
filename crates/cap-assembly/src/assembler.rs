//! Turns a [`Sheet`] into a live entity.

use cap_core::EntityId;
use cap_entity::{EntityError, EntityStore};
use cap_schedule::Scheduler;

use crate::{AssemblyReport, AssemblyResult, Catalog, Diagnostic, Sheet};

/// Applies sheets using the constructors in a [`Catalog`].
///
/// Assembly runs in two passes, mirroring how entities come up: every
/// component is attached and configured first, then every capability is
/// created and registered.  A capability's first tick therefore already
/// sees all of its owner's components.
///
/// Names the catalog does not know, and properties that fail to apply, are
/// reported as [`Diagnostic`]s and skipped; they never abort assembly.
pub struct Assembler<'c> {
    catalog: &'c Catalog,
}

impl<'c> Assembler<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Spawn an entity called `name` and apply `sheet` to it.
    pub fn assemble(
        &self,
        scheduler: &mut Scheduler,
        entities:  &mut EntityStore,
        name:      &str,
        sheet:     &Sheet,
    ) -> AssemblyResult<(EntityId, AssemblyReport)> {
        let entity = entities.spawn(name);
        let report = self.apply(scheduler, entities, entity, sheet)?;
        Ok((entity, report))
    }

    /// Apply `sheet` to an existing entity.
    ///
    /// Components the entity already has are kept and only have the
    /// sheet's properties applied to them.  Capabilities are always
    /// registered afresh, so applying the same sheet twice gives the entity
    /// two of each.
    pub fn apply(
        &self,
        scheduler: &mut Scheduler,
        entities:  &mut EntityStore,
        entity:    EntityId,
        sheet:     &Sheet,
    ) -> AssemblyResult<AssemblyReport> {
        if !entities.is_alive(entity) {
            return Err(EntityError::NotFound(entity).into());
        }
        let mut report = AssemblyReport::new(entity);

        // ── Components ────────────────────────────────────────────────────
        for spec in &sheet.components {
            match self.catalog.attach_fn(&spec.name) {
                Some(attach) => attach(entities, entity, spec, &mut report)?,
                None => report.warn(Diagnostic::UnknownComponent(spec.name.clone())),
            }
        }

        // ── Capabilities ──────────────────────────────────────────────────
        for name in &sheet.capabilities {
            match self.catalog.instantiate(name) {
                Some(capability) => {
                    let id = scheduler.register_capability(Some(entity), capability);
                    report.capabilities.push(id);
                }
                None => report.warn(Diagnostic::UnknownCapability(name.clone())),
            }
        }

        tracing::debug!(
            %entity,
            added = report.components_added.len(),
            updated = report.components_updated.len(),
            properties = report.properties_applied,
            capabilities = report.capabilities.len(),
            diagnostics = report.diagnostics.len(),
            "sheet applied"
        );
        Ok(report)
    }
}
