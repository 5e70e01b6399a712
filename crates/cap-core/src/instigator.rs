//! Instigators — identity of whoever requests a tag block.

use std::fmt;

use crate::{CapabilityId, SchedulerId};

/// "Who is asking": either one capability or a scheduler itself.
///
/// An instigator is a lookup key and nothing else.  Two instigators are
/// equal iff they name the same source.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Instigator {
    /// The scheduler's own identity.  Used whenever a caller omits the
    /// instigator.
    Scheduler(SchedulerId),
    Capability(CapabilityId),
}

impl Instigator {
    #[inline]
    pub fn is_scheduler(self) -> bool {
        matches!(self, Instigator::Scheduler(_))
    }

    /// The wrapped capability, if this instigator is one.
    #[inline]
    pub fn capability(self) -> Option<CapabilityId> {
        match self {
            Instigator::Capability(id) => Some(id),
            Instigator::Scheduler(_) => None,
        }
    }
}

impl From<CapabilityId> for Instigator {
    fn from(id: CapabilityId) -> Self {
        Instigator::Capability(id)
    }
}

impl From<SchedulerId> for Instigator {
    fn from(id: SchedulerId) -> Self {
        Instigator::Scheduler(id)
    }
}

impl fmt::Display for Instigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instigator::Scheduler(id) => write!(f, "Instigator({id})"),
            Instigator::Capability(id) => write!(f, "Instigator({id})"),
        }
    }
}
