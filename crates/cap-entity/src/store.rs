//! Generational entity table.
//!
//! # Why handles
//!
//! Capabilities hold their owner as an [`EntityId`], never a reference.
//! Despawning bumps the slot generation, so every handle to the old entity
//! stops resolving at once; nothing has to chase back-pointers.  Freed
//! slots are recycled with the bumped generation.

use cap_core::{EntityId, Instigator};

use crate::component::ComponentMap;
use crate::tag_block::TagBlockRegistry;
use crate::{EntityError, EntityResult};

// ── EntityRecord ──────────────────────────────────────────────────────────────

/// Everything the table keeps for one live entity.
pub struct EntityRecord {
    /// Display name (assembly sheets and the monitor group by it).
    pub name: String,

    /// Who blocks which tags on this entity.
    pub tag_blocks: TagBlockRegistry,

    components: ComponentMap,
}

impl EntityRecord {
    pub fn components(&self) -> &ComponentMap {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut ComponentMap {
        &mut self.components
    }
}

struct EntitySlot {
    generation: u32,
    record:     Option<EntityRecord>,
}

// ── EntityStore ───────────────────────────────────────────────────────────────

/// Table of all entities in one simulation.
///
/// Every lookup takes an `EntityId` and returns `None` for stale or foreign
/// handles; only insertion reports [`EntityError::NotFound`], because
/// silently dropping a component is more surprising than a failed read.
pub struct EntityStore {
    slots:  Vec<EntitySlot>,
    free:   Vec<u32>,
    live:   usize,
    /// Seeded into every new entity's tag-block registry.
    system: Instigator,
}

impl EntityStore {
    /// Create an empty table whose entities default to `system` for tag
    /// blocks requested without an instigator.
    pub fn new(system: Instigator) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            system,
        }
    }

    /// The instigator seeded into every entity's registry.
    #[inline]
    pub fn system_instigator(&self) -> Instigator {
        self.system
    }

    /// Number of live entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Create an entity with an empty component map and a tag-block registry
    /// seeded with the system instigator.
    pub fn spawn(&mut self, name: impl Into<String>) -> EntityId {
        let record = EntityRecord {
            name:       name.into(),
            tag_blocks: TagBlockRegistry::new(self.system),
            components: ComponentMap::new(),
        };
        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.record = Some(record);
            let id = EntityId::new(index, slot.generation);
            tracing::debug!(entity = %id, "entity spawned (recycled slot)");
            return id;
        }

        let index = self.slots.len() as u32;
        self.slots.push(EntitySlot { generation: 0, record: Some(record) });
        let id = EntityId::new(index, 0);
        tracing::debug!(entity = %id, "entity spawned");
        id
    }

    /// Destroy an entity and invalidate every handle to it.
    ///
    /// Returns `false` (and does nothing) for stale or unknown handles, so
    /// repeated or out-of-order teardown is harmless.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let Some(slot) = self.slots.get_mut(id.index()) else {
            return false;
        };
        if slot.generation != id.generation || slot.record.is_none() {
            return false;
        }
        slot.record = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        tracing::debug!(entity = %id, "entity despawned");
        true
    }

    /// `true` while `id` refers to a live entity.
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Iterator over live entity handles in slot order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.record
                .as_ref()
                .map(|_| EntityId::new(i as u32, slot.generation))
        })
    }

    // ── Record access ─────────────────────────────────────────────────────

    pub fn get(&self, id: EntityId) -> Option<&EntityRecord> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.record.as_ref())
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut EntityRecord> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.record.as_mut())
    }

    pub fn name(&self, id: EntityId) -> Option<&str> {
        self.get(id).map(|r| r.name.as_str())
    }

    /// Find the first live entity called `name`.
    pub fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.ids().find(|&id| self.name(id) == Some(name))
    }

    pub fn tag_blocks(&self, id: EntityId) -> Option<&TagBlockRegistry> {
        self.get(id).map(|r| &r.tag_blocks)
    }

    pub fn tag_blocks_mut(&mut self, id: EntityId) -> Option<&mut TagBlockRegistry> {
        self.get_mut(id).map(|r| &mut r.tag_blocks)
    }

    // ── Component access ──────────────────────────────────────────────────

    /// Attach `value` to `id`, returning the replaced value of the same type.
    pub fn insert_component<T: Send + Sync + 'static>(
        &mut self,
        id: EntityId,
        value: T,
    ) -> EntityResult<Option<T>> {
        let record = self.get_mut(id).ok_or(EntityError::NotFound(id))?;
        Ok(record.components.insert(value))
    }

    pub fn remove_component<T: Send + Sync + 'static>(&mut self, id: EntityId) -> Option<T> {
        self.get_mut(id).and_then(|r| r.components.remove::<T>())
    }

    pub fn component<T: Send + Sync + 'static>(&self, id: EntityId) -> Option<&T> {
        self.get(id).and_then(|r| r.components.get::<T>())
    }

    pub fn component_mut<T: Send + Sync + 'static>(&mut self, id: EntityId) -> Option<&mut T> {
        self.get_mut(id).and_then(|r| r.components.get_mut::<T>())
    }

    pub fn has_component<T: Send + Sync + 'static>(&self, id: EntityId) -> bool {
        self.get(id).is_some_and(|r| r.components.contains::<T>())
    }
}
