//! Read-only snapshots of scheduler state for monitors.

use cap_core::{CapabilityId, EntityId, Phase, Tag};

/// Everything a monitor may know about one registered capability.
///
/// Views are owned copies: holding one never borrows the scheduler, and
/// nothing done with a view can reach back into capability state.
#[derive(Clone, Debug, PartialEq)]
pub struct CapabilityView {
    pub id:               CapabilityId,
    pub owner:            Option<EntityId>,
    pub type_name:        &'static str,
    pub phase:            Phase,
    pub phase_order:      i32,
    pub tags:             Vec<Tag>,
    pub active:           bool,
    pub active_elapsed:   f32,
    pub inactive_elapsed: f32,
}
