//! Per-entity tag blocking, keyed by instigator.
//!
//! A capability suppresses categories of behavior on its entity by blocking
//! tags under its own instigator.  Blocks are scoped per (entity,
//! instigator): the same tag may be blocked independently by several
//! instigators, and unblocking by one never touches another's block.

use cap_core::collections::{Map, Set};
use cap_core::{Instigator, Tag};

/// `Instigator → {Tag}` for one entity.
///
/// An absent key means the instigator blocks nothing.  A present key with an
/// empty set means the same thing but is kept as-is; entries are never
/// cleaned up automatically.
///
/// Every operation takes `Option<Instigator>`; `None` resolves to the
/// scheduler's system instigator the registry was created with.
#[derive(Clone, Debug)]
pub struct TagBlockRegistry {
    system:  Instigator,
    blocked: Map<Instigator, Set<Tag>>,
}

impl TagBlockRegistry {
    /// Create a registry seeded with `system → {}`.
    pub fn new(system: Instigator) -> Self {
        let mut blocked = Map::default();
        blocked.insert(system, Set::default());
        Self { system, blocked }
    }

    /// The instigator used when a caller passes `None`.
    #[inline]
    pub fn system_instigator(&self) -> Instigator {
        self.system
    }

    #[inline]
    fn resolve(&self, instigator: Option<Instigator>) -> Instigator {
        instigator.unwrap_or(self.system)
    }

    /// `true` iff `instigator` has a block entry on this entity.
    ///
    /// Only the presence of the entry is checked; `tag` is not looked up in
    /// the set.  Because the registry is seeded with the system instigator,
    /// `is_tag_blocked(_, None)` is therefore always `true`, and a capability
    /// that blocked and then fully unblocked its tags still reads as
    /// blocking.  This matches the established behavior that existing
    /// capabilities are tuned against.
    ///
    /// TODO: confirm with gameplay whether `tag` should be a set-membership
    /// check; switching is a one-line change plus the pinned tests.
    pub fn is_tag_blocked(&self, _tag: Tag, instigator: Option<Instigator>) -> bool {
        self.blocked.contains_key(&self.resolve(instigator))
    }

    /// `true` if any instigator's set contains `tag`.  Unlike
    /// [`is_tag_blocked`](Self::is_tag_blocked) this is a membership test.
    pub fn is_blocked_by_any(&self, tag: Tag) -> bool {
        self.blocked.values().any(|set| set.contains(&tag))
    }

    /// Union `tags` into the set for `instigator`, creating the entry.
    pub fn block_tags<I>(&mut self, tags: I, instigator: Option<Instigator>)
    where
        I: IntoIterator<Item = Tag>,
    {
        let key = self.resolve(instigator);
        self.blocked.entry(key).or_default().extend(tags);
    }

    /// Remove `tags` from `instigator`'s set.  No-op if it has no entry.
    pub fn unblock_tags<I>(&mut self, tags: I, instigator: Option<Instigator>)
    where
        I: IntoIterator<Item = Tag>,
    {
        let key = self.resolve(instigator);
        if let Some(set) = self.blocked.get_mut(&key) {
            for tag in tags {
                set.remove(&tag);
            }
        }
    }

    /// The tags `instigator` currently blocks, `None` if it has no entry.
    pub fn blocked_tags(&self, instigator: Option<Instigator>) -> Option<&Set<Tag>> {
        self.blocked.get(&self.resolve(instigator))
    }

    /// Every instigator holding an entry, in unspecified order.
    pub fn instigators(&self) -> impl Iterator<Item = Instigator> + '_ {
        self.blocked.keys().copied()
    }

    /// Number of instigators holding an entry (including empty ones).
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }
}
