//! Structural changes a capability requests from inside its own tick.
//!
//! A capability cannot borrow the scheduler that is ticking it, so
//! registrations, removals and entity teardown are queued here and applied
//! by the scheduler as soon as the requesting hook returns, before the
//! next capability is visited.  Ids for spawned capabilities are handed out
//! at request time so the requester can keep them.

use std::fmt;

use cap_core::{CapabilityId, EntityId};

use crate::Capability;

/// One queued structural change.
pub enum Command {
    /// Register `capability` under the pre-allocated `id`.
    Register {
        id:         CapabilityId,
        owner:      Option<EntityId>,
        capability: Box<dyn Capability>,
    },

    /// Deregister a capability.  No-op if it is not registered.
    Remove(CapabilityId),

    /// Deregister every capability owned by the entity, then despawn it.
    DestroyEntity(EntityId),
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Register { id, owner, capability } => f
                .debug_struct("Register")
                .field("id", id)
                .field("owner", owner)
                .field("capability", &capability.type_name())
                .finish(),
            Command::Remove(id) => f.debug_tuple("Remove").field(id).finish(),
            Command::DestroyEntity(e) => f.debug_tuple("DestroyEntity").field(e).finish(),
        }
    }
}

/// Pending commands plus the capability id allocator.
///
/// The scheduler owns one of these and uses the same allocator for
/// registrations made from outside a tick, so ids are unique per scheduler
/// regardless of who asked.
#[derive(Debug, Default)]
pub struct CommandQueue {
    next_id: u32,
    pending: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next unused capability id.
    ///
    /// # Panics
    ///
    /// Ids are never reused, so one queue can hand out `u32::MAX` ids
    /// (`0..INVALID`).  Asking for more panics rather than returning
    /// [`CapabilityId::INVALID`] or wrapping onto a live id.
    pub fn allocate_id(&mut self) -> CapabilityId {
        assert!(
            self.next_id < CapabilityId::INVALID.0,
            "capability id space exhausted"
        );
        let id = CapabilityId(self.next_id);
        self.next_id += 1;
        id
    }

    #[cfg(test)]
    pub(crate) fn starting_at(next_id: u32) -> Self {
        Self { next_id, pending: Vec::new() }
    }

    /// Queue registration of `capability`; returns its id immediately.
    pub fn spawn(
        &mut self,
        owner: Option<EntityId>,
        capability: Box<dyn Capability>,
    ) -> CapabilityId {
        let id = self.allocate_id();
        self.pending.push(Command::Register { id, owner, capability });
        id
    }

    pub fn remove(&mut self, id: CapabilityId) {
        self.pending.push(Command::Remove(id));
    }

    pub fn destroy_entity(&mut self, entity: EntityId) {
        self.pending.push(Command::DestroyEntity(entity));
    }

    /// Take every pending command, in request order.
    pub fn take_pending(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
