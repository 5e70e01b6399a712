//! Strongly typed identifier wrappers.
//!
//! `CapabilityId` and `SchedulerId` are plain counters handed out by their
//! owners and never reused.  `EntityId` is a generational handle into the
//! entity table: despawning bumps the slot's generation so stale handles
//! stop resolving instead of aliasing the next entity in that slot.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Identity of one registered capability.  Allocated by the scheduler at
    /// setup time; a retired id is never handed out again.
    pub struct CapabilityId(u32);
}

typed_id! {
    /// Identity of one scheduler instance.  Several schedulers may coexist in
    /// a process (e.g. one per test), each with its own system instigator.
    pub struct SchedulerId(u32);
}

// ── EntityId ──────────────────────────────────────────────────────────────────

/// Generational handle to an entity in an `EntityStore`.
///
/// The handle owns nothing.  It resolves only while `generation` matches the
/// slot's current generation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId {
    pub index:      u32,
    pub generation: u32,
}

impl EntityId {
    /// Sentinel that never resolves.
    pub const INVALID: EntityId = EntityId { index: u32::MAX, generation: u32::MAX };

    #[inline]
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index for direct use into the entity table.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl Default for EntityId {
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({}v{})", self.index, self.generation)
    }
}
