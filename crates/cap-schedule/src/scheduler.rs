//! The `Scheduler` and its per-frame traversal.

use std::sync::atomic::{AtomicU32, Ordering};

use cap_capability::{ActivationState, Capability, CapabilityContext, Command, CommandQueue, Transition, run_tick};
use cap_core::collections::Map;
use cap_core::{CapabilityId, EntityId, Frame, Instigator, Phase, SchedulerId, Tag};
use cap_entity::EntityStore;

use crate::CapabilityView;

static NEXT_SCHEDULER_ID: AtomicU32 = AtomicU32::new(0);

// ── Internal storage ──────────────────────────────────────────────────────────

/// A registered capability and everything fixed at registration.
struct Slot {
    owner:       Option<EntityId>,
    phase:       Phase,
    phase_order: i32,
    tags:        Vec<Tag>,
    type_name:   &'static str,
    state:       ActivationState,
    /// Taken out for the duration of the capability's own tick.
    capability:  Option<Box<dyn Capability>>,
}

#[derive(Copy, Clone, Debug)]
struct BucketEntry {
    id:    CapabilityId,
    order: i32,
}

// ── FrameStats ────────────────────────────────────────────────────────────────

/// What one [`Scheduler::update`] call did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frame:       Frame,
    /// Capabilities whose state machine ran this frame.
    pub ticked:      usize,
    pub activated:   usize,
    pub deactivated: usize,
}

impl FrameStats {
    fn record(&mut self, transition: Transition) {
        self.ticked += 1;
        match transition {
            Transition::Activated => self.activated += 1,
            Transition::Deactivated => self.deactivated += 1,
            Transition::None => {}
        }
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// Owns every registered capability and ticks them phase by phase.
///
/// # Ordering
///
/// [`update`](Self::update) visits phases in [`Phase::ALL`] order.  Within a
/// phase, capabilities run by ascending `phase_order`, ties in registration
/// order.  No phase starts before the previous one has finished.
///
/// # Mutation during a frame
///
/// Each bucket is copied before it is walked.  Structural changes a
/// capability requests are applied right after its hooks return:
///
/// - a capability removed mid-frame is skipped when its snapshot entry comes
///   up, so it is never ticked again;
/// - a capability registered into the phase being walked is not in that
///   phase's snapshot and first ticks next frame;
/// - a capability registered into a later phase ticks when that phase is
///   reached this frame;
/// - a capability spawned for an owner that is no longer alive when the
///   request is applied is dropped without being registered.
///
/// # Dead owners
///
/// A capability whose owner has been despawned without going through
/// [`destroy_entity`](Self::destroy_entity) is torn down the next time its
/// bucket is walked, before any of its hooks run.
///
/// # Misuse
///
/// Removing an unknown or already removed capability is a silent no-op, as
/// is tearing down an entity twice.  `update` never fails.
pub struct Scheduler {
    id:       SchedulerId,
    slots:    Map<CapabilityId, Slot>,
    buckets:  Map<Phase, Vec<BucketEntry>>,
    commands: CommandQueue,
    frame:    Frame,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Create a scheduler with a process-unique [`SchedulerId`].
    ///
    /// Ids come from a process-wide counter; hosts that need reproducible
    /// ids should use [`with_id`](Self::with_id).
    pub fn new() -> Self {
        Self::with_id(SchedulerId(NEXT_SCHEDULER_ID.fetch_add(1, Ordering::Relaxed)))
    }

    /// Create a scheduler with a caller-chosen id.  The caller keeps ids
    /// distinct between schedulers whose instigators may meet.
    pub fn with_id(id: SchedulerId) -> Self {
        tracing::debug!(scheduler = %id, "scheduler created");
        Self {
            id,
            slots:    Map::default(),
            buckets:  Map::default(),
            commands: CommandQueue::new(),
            frame:    Frame::ZERO,
        }
    }

    #[inline]
    pub fn id(&self) -> SchedulerId {
        self.id
    }

    /// The system instigator: the default for tag blocks requested without
    /// an explicit instigator.
    #[inline]
    pub fn instigator(&self) -> Instigator {
        Instigator::Scheduler(self.id)
    }

    /// An empty entity table whose registries are seeded with this
    /// scheduler's instigator.
    pub fn new_entity_store(&self) -> EntityStore {
        EntityStore::new(self.instigator())
    }

    /// The frame the next `update` will run.
    #[inline]
    pub fn frame(&self) -> Frame {
        self.frame
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Set up `capability`: give it an id (and so an instigator) and insert
    /// it into the bucket for its phase, creating the bucket if needed.
    pub fn register_capability(
        &mut self,
        owner: Option<EntityId>,
        capability: Box<dyn Capability>,
    ) -> CapabilityId {
        let id = self.commands.allocate_id();
        self.insert(id, owner, capability);
        id
    }

    fn insert(&mut self, id: CapabilityId, owner: Option<EntityId>, capability: Box<dyn Capability>) {
        let phase = capability.phase();
        let order = capability.phase_order();
        let type_name = capability.type_name();

        let bucket = self.buckets.entry(phase).or_default();
        let pos = bucket.partition_point(|e| e.order <= order);
        bucket.insert(pos, BucketEntry { id, order });

        self.slots.insert(id, Slot {
            owner,
            phase,
            phase_order: order,
            tags: capability.tags().to_vec(),
            type_name,
            state: ActivationState::default(),
            capability: Some(capability),
        });
        tracing::debug!(capability = %id, kind = type_name, %phase, ?owner, "capability registered");
    }

    /// Remove a capability from its bucket.  Returns `false` if it was not
    /// registered; that is not an error.
    pub fn remove_capability(&mut self, id: CapabilityId) -> bool {
        let Some(slot) = self.slots.remove(&id) else {
            return false;
        };
        if let Some(bucket) = self.buckets.get_mut(&slot.phase) {
            bucket.retain(|e| e.id != id);
        }
        tracing::debug!(capability = %id, kind = slot.type_name, "capability removed");
        true
    }

    /// Teardown hook for one capability whose owner is being destroyed.
    /// Safe to call any number of times.
    pub fn on_owner_destroyed(&mut self, id: CapabilityId) -> bool {
        self.remove_capability(id)
    }

    /// Call [`on_owner_destroyed`](Self::on_owner_destroyed) for every
    /// capability owned by `entity`.  Returns how many were removed.
    pub fn teardown_owner(&mut self, entity: EntityId) -> usize {
        let owned = self.owned_by(entity);
        owned.iter().filter(|&&id| self.on_owner_destroyed(id)).count()
    }

    /// Tear down `entity`'s capabilities and despawn it.
    pub fn destroy_entity(&mut self, entities: &mut EntityStore, entity: EntityId) -> usize {
        let removed = self.teardown_owner(entity);
        entities.despawn(entity);
        removed
    }

    // ── Frame ─────────────────────────────────────────────────────────────

    /// Advance every registered capability by `dt` seconds.
    pub fn update(&mut self, dt: f32, entities: &mut EntityStore) -> FrameStats {
        let frame = self.frame;
        let mut stats = FrameStats { frame, ..FrameStats::default() };

        for phase in Phase::ALL {
            let snapshot: Vec<CapabilityId> = self
                .buckets
                .entry(phase)
                .or_default()
                .iter()
                .map(|e| e.id)
                .collect();

            for id in snapshot {
                if let Some(transition) = self.tick_one(id, phase, frame, dt, entities) {
                    stats.record(transition);
                }
            }
        }

        self.frame = frame + 1;
        tracing::trace!(
            %frame,
            ticked = stats.ticked,
            activated = stats.activated,
            deactivated = stats.deactivated,
            "frame complete"
        );
        stats
    }

    /// Run one capability's state machine, then apply whatever it queued.
    /// `None` if the capability was removed earlier in the frame.
    fn tick_one(
        &mut self,
        id: CapabilityId,
        phase: Phase,
        frame: Frame,
        dt: f32,
        entities: &mut EntityStore,
    ) -> Option<Transition> {
        let slot = self.slots.get_mut(&id)?;
        if let Some(entity) = slot.owner
            && !entities.is_alive(entity)
        {
            tracing::debug!(capability = %id, owner = %entity, "owner gone, tearing down");
            self.on_owner_destroyed(id);
            return None;
        }
        let mut capability = slot.capability.take()?;
        let owner = slot.owner;
        let state = slot.state;

        let mut ctx = CapabilityContext::new(
            id, owner, phase, frame, dt, state, entities, &mut self.commands,
        );
        let transition = run_tick(capability.as_mut(), &mut ctx);
        let state = ctx.state();

        if let Some(slot) = self.slots.get_mut(&id) {
            slot.state = state;
            slot.capability = Some(capability);
        }
        self.apply_commands(entities);
        Some(transition)
    }

    fn apply_commands(&mut self, entities: &mut EntityStore) {
        for command in self.commands.take_pending() {
            match command {
                Command::Register { id, owner: Some(entity), capability }
                    if !entities.is_alive(entity) =>
                {
                    tracing::debug!(
                        capability = %id,
                        kind = capability.type_name(),
                        owner = %entity,
                        "owner gone, registration dropped"
                    );
                }
                Command::Register { id, owner, capability } => self.insert(id, owner, capability),
                Command::Remove(id) => {
                    self.remove_capability(id);
                }
                Command::DestroyEntity(entity) => {
                    self.destroy_entity(entities, entity);
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Number of registered capabilities.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_registered(&self, id: CapabilityId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn state(&self, id: CapabilityId) -> Option<ActivationState> {
        self.slots.get(&id).map(|s| s.state)
    }

    pub fn owner(&self, id: CapabilityId) -> Option<EntityId> {
        self.slots.get(&id).and_then(|s| s.owner)
    }

    /// Ids in `phase`'s bucket, in tick order.  Empty if the bucket does
    /// not exist yet.
    pub fn bucket(&self, phase: Phase) -> Vec<CapabilityId> {
        self.buckets
            .get(&phase)
            .map(|b| b.iter().map(|e| e.id).collect())
            .unwrap_or_default()
    }

    /// Capabilities owned by `entity`, in tick order.
    pub fn owned_by(&self, entity: EntityId) -> Vec<CapabilityId> {
        self.ids_in_tick_order()
            .filter(|id| self.owner(*id) == Some(entity))
            .collect()
    }

    /// Snapshot of one capability.
    pub fn view(&self, id: CapabilityId) -> Option<CapabilityView> {
        self.slots.get(&id).map(|slot| CapabilityView {
            id,
            owner:            slot.owner,
            type_name:        slot.type_name,
            phase:            slot.phase,
            phase_order:      slot.phase_order,
            tags:             slot.tags.clone(),
            active:           slot.state.active,
            active_elapsed:   slot.state.active_elapsed,
            inactive_elapsed: slot.state.inactive_elapsed,
        })
    }

    /// Snapshot of every registered capability, in tick order.
    pub fn views(&self) -> Vec<CapabilityView> {
        self.ids_in_tick_order().filter_map(|id| self.view(id)).collect()
    }

    fn ids_in_tick_order(&self) -> impl Iterator<Item = CapabilityId> + '_ {
        Phase::ALL
            .into_iter()
            .filter_map(|phase| self.buckets.get(&phase))
            .flat_map(|bucket| bucket.iter().map(|e| e.id))
    }
}
