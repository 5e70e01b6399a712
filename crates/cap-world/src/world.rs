//! The `World` struct and its frame loop.

use cap_assembly::{Assembler, AssemblyReport, Catalog, Sheet};
use cap_capability::Capability;
use cap_core::{CapabilityId, EntityId, FrameClock, FrameConfig};
use cap_entity::{EntityError, EntityStore};
use cap_schedule::{CapabilityView, FrameStats, Scheduler};

use crate::{WorldObserver, WorldResult};

/// Everything one simulation owns: the scheduler, the entity table and the
/// clock that timestamps frames.
///
/// Frames can be driven two ways:
///
/// - [`step`](Self::step) with a caller-chosen delta, for hosts that own
///   their own loop;
/// - [`run`](Self::run) / [`run_frames`](Self::run_frames) at
///   `config.fixed_dt`, with observer callbacks.
///
/// Create via [`WorldBuilder`][crate::WorldBuilder].
pub struct World {
    /// Run configuration (fixed delta, frame count, snapshot interval).
    pub config: FrameConfig,

    /// Frame counter and accumulated simulated seconds.
    pub clock: FrameClock,

    /// Constructors used by [`assemble`](Self::assemble).
    pub catalog: Catalog,

    /// Owns and ticks every registered capability.
    pub scheduler: Scheduler,

    /// Every entity, its components and its tag blocks.
    ///
    /// Despawn through [`destroy_entity`](Self::destroy_entity).  An entity
    /// despawned directly here loses its capabilities on the next frame
    /// instead of immediately.
    pub entities: EntityStore,
}

impl World {
    // ── Entities ──────────────────────────────────────────────────────────

    pub fn spawn_entity(&mut self, name: &str) -> EntityId {
        self.entities.spawn(name)
    }

    /// Deregister every capability `entity` owns, then despawn it.  Returns
    /// how many capabilities were removed; destroying a dead entity is a
    /// no-op returning 0.
    pub fn destroy_entity(&mut self, entity: EntityId) -> usize {
        self.scheduler.destroy_entity(&mut self.entities, entity)
    }

    /// Spawn an entity called `name` built from `sheet`.
    pub fn assemble(&mut self, name: &str, sheet: &Sheet) -> WorldResult<(EntityId, AssemblyReport)> {
        let assembled = Assembler::new(&self.catalog).assemble(
            &mut self.scheduler,
            &mut self.entities,
            name,
            sheet,
        )?;
        Ok(assembled)
    }

    /// Apply `sheet` to an entity that already exists.
    pub fn apply_sheet(&mut self, entity: EntityId, sheet: &Sheet) -> WorldResult<AssemblyReport> {
        let report = Assembler::new(&self.catalog).apply(
            &mut self.scheduler,
            &mut self.entities,
            entity,
            sheet,
        )?;
        Ok(report)
    }

    // ── Capabilities ──────────────────────────────────────────────────────

    /// Register `capability`, owned by `owner`.  Fails if `owner` is given
    /// but not alive.
    pub fn add_capability(
        &mut self,
        owner:      Option<EntityId>,
        capability: Box<dyn Capability>,
    ) -> WorldResult<CapabilityId> {
        if let Some(entity) = owner
            && !self.entities.is_alive(entity)
        {
            return Err(EntityError::NotFound(entity).into());
        }
        Ok(self.scheduler.register_capability(owner, capability))
    }

    /// Deregister a capability.  `false` if it was not registered.
    pub fn remove_capability(&mut self, id: CapabilityId) -> bool {
        self.scheduler.remove_capability(id)
    }

    /// Every registered capability, in tick order.
    pub fn views(&self) -> Vec<CapabilityView> {
        self.scheduler.views()
    }

    // ── Frame loop ────────────────────────────────────────────────────────

    /// Run one frame lasting `dt` seconds.
    pub fn step(&mut self, dt: f32) -> FrameStats {
        let stats = self.scheduler.update(dt, &mut self.entities);
        self.clock.advance(dt);
        stats
    }

    /// Run fixed-step frames from the current frame to `config.end_frame()`.
    ///
    /// Calls observer hooks at every frame boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: WorldObserver>(&mut self, observer: &mut O) {
        let end = self.config.end_frame();
        let remaining = end.0.saturating_sub(self.clock.current_frame.0);
        self.run_frames(remaining, observer);
        observer.on_run_end(self.clock.current_frame);
        tracing::debug!(clock = %self.clock, "run complete");
    }

    /// Run exactly `n` fixed-step frames from the current position (ignores
    /// `end_frame`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_frames<O: WorldObserver>(&mut self, n: u64, observer: &mut O) {
        let dt = self.config.fixed_dt;
        let interval = self.config.snapshot_interval_frames;
        for _ in 0..n {
            let now = self.clock.current_frame;
            observer.on_frame_start(now);
            let stats = self.step(dt);
            observer.on_frame_end(now, &stats);
            if interval > 0 && now.0.is_multiple_of(interval) {
                let views = self.scheduler.views();
                observer.on_snapshot(now, self.clock.elapsed_secs, &views, &self.entities);
            }
        }
    }
}
