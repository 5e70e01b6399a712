//! Fluent builder for constructing a [`World`].

use cap_assembly::Catalog;
use cap_core::{FrameClock, FrameConfig};
use cap_schedule::Scheduler;

use crate::{World, WorldResult};

/// Fluent builder for [`World`].
///
/// | Method        | Default            |
/// |---------------|--------------------|
/// | `.catalog(c)` | Empty `Catalog`    |
///
/// # Example
///
/// ```rust,ignore
/// let mut world = WorldBuilder::new(FrameConfig::default())
///     .catalog(catalog)
///     .build()?;
/// world.run(&mut NoopObserver);
/// ```
pub struct WorldBuilder {
    config:  FrameConfig,
    catalog: Option<Catalog>,
}

impl WorldBuilder {
    pub fn new(config: FrameConfig) -> Self {
        Self { config, catalog: None }
    }

    /// Supply the constructors [`World::assemble`] resolves sheet names
    /// against.
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Validate the configuration and return an empty world at frame 0.
    pub fn build(self) -> WorldResult<World> {
        self.config.validate()?;

        let scheduler = Scheduler::new();
        let entities = scheduler.new_entity_store();
        tracing::debug!(
            scheduler = %scheduler.id(),
            fixed_dt = self.config.fixed_dt,
            total_frames = self.config.total_frames,
            "world built"
        );

        Ok(World {
            clock:   FrameClock::new(),
            config:  self.config,
            catalog: self.catalog.unwrap_or_default(),
            scheduler,
            entities,
        })
    }
}
