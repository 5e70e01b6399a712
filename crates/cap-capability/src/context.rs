//! Per-tick context handed to every capability hook.

use cap_core::{CapabilityId, EntityId, Frame, Instigator, Phase, Tag};
use cap_entity::{EntityStore, TagBlockRegistry};

use crate::{ActivationState, Capability, CommandQueue};

/// What a capability can see and touch while it is being ticked.
///
/// Built by the scheduler for one capability at a time.  Entity state
/// (components, tag blocks) is borrowed mutably and writes are visible to
/// every capability ticked afterwards in the same frame.  Structural
/// changes to the scheduler go through the command queue.
///
/// # Missing owner
///
/// Capabilities registered without an owner (or whose owner has already
/// been despawned) get `None` from every owner accessor, and the owner
/// tag-block helpers become no-ops.
pub struct CapabilityContext<'a> {
    /// The capability being ticked.
    pub id: CapabilityId,

    /// Owning entity, if any.
    pub owner: Option<EntityId>,

    /// The phase currently being ticked.
    pub phase: Phase,

    /// The frame currently being ticked.
    pub frame: Frame,

    /// Seconds this frame advances by.
    pub dt: f32,

    /// Every entity in the simulation.
    ///
    /// Tear entities down with [`destroy_entity`](Self::destroy_entity).
    /// Despawning one directly here leaves its capabilities registered until
    /// the scheduler next reaches them.
    pub entities: &'a mut EntityStore,

    state:    ActivationState,
    commands: &'a mut CommandQueue,
}

impl<'a> CapabilityContext<'a> {
    /// Build a context for one capability's tick.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id:       CapabilityId,
        owner:    Option<EntityId>,
        phase:    Phase,
        frame:    Frame,
        dt:       f32,
        state:    ActivationState,
        entities: &'a mut EntityStore,
        commands: &'a mut CommandQueue,
    ) -> Self {
        Self { id, owner, phase, frame, dt, entities, state, commands }
    }

    /// The capability's activation state as of this point in the tick.
    #[inline]
    pub fn state(&self) -> ActivationState {
        self.state
    }

    #[inline]
    pub(crate) fn state_mut(&mut self) -> &mut ActivationState {
        &mut self.state
    }

    /// This capability as a tag-block instigator.
    #[inline]
    pub fn instigator(&self) -> Instigator {
        Instigator::Capability(self.id)
    }

    // ── Owner access ──────────────────────────────────────────────────────

    /// The owner, if it is set and still alive.
    pub fn live_owner(&self) -> Option<EntityId> {
        self.owner.filter(|&e| self.entities.is_alive(e))
    }

    pub fn owner_component<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.entities.component::<T>(self.owner?)
    }

    pub fn owner_component_mut<T: Send + Sync + 'static>(&mut self) -> Option<&mut T> {
        self.entities.component_mut::<T>(self.owner?)
    }

    pub fn owner_tag_blocks(&self) -> Option<&TagBlockRegistry> {
        self.entities.tag_blocks(self.owner?)
    }

    /// Query the owner's registry.  `instigator = None` asks about the
    /// system instigator.  `false` when there is no live owner.
    pub fn is_owner_tag_blocked(&self, tag: Tag, instigator: Option<Instigator>) -> bool {
        self.owner_tag_blocks()
            .is_some_and(|reg| reg.is_tag_blocked(tag, instigator))
    }

    /// Block `tags` on the owner under this capability's instigator.
    pub fn block_owner_tags<I: IntoIterator<Item = Tag>>(&mut self, tags: I) {
        let me = self.instigator();
        if let Some(reg) = self.owner.and_then(|e| self.entities.tag_blocks_mut(e)) {
            reg.block_tags(tags, Some(me));
        }
    }

    /// Unblock `tags` on the owner under this capability's instigator.
    pub fn unblock_owner_tags<I: IntoIterator<Item = Tag>>(&mut self, tags: I) {
        let me = self.instigator();
        if let Some(reg) = self.owner.and_then(|e| self.entities.tag_blocks_mut(e)) {
            reg.unblock_tags(tags, Some(me));
        }
    }

    // ── Structural requests ───────────────────────────────────────────────

    /// Register another capability.  It joins its phase's bucket as soon as
    /// the current hook returns.
    pub fn spawn_capability(
        &mut self,
        owner: Option<EntityId>,
        capability: Box<dyn Capability>,
    ) -> CapabilityId {
        self.commands.spawn(owner, capability)
    }

    /// Deregister a capability (possibly this one).  Unknown ids are ignored.
    pub fn remove_capability(&mut self, id: CapabilityId) {
        self.commands.remove(id);
    }

    /// Deregister this capability.
    pub fn remove_self(&mut self) {
        let id = self.id;
        self.commands.remove(id);
    }

    /// Tear down an entity: every capability it owns is deregistered, then
    /// the entity is despawned.
    pub fn destroy_entity(&mut self, entity: EntityId) {
        self.commands.destroy_entity(entity);
    }
}
