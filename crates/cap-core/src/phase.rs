//! Ticking phases.
//!
//! The declaration order below *is* the frame order.  Every capability in a
//! phase finishes its tick before any capability in the next phase starts,
//! so an earlier phase always observes the previous frame's state of later
//! phases, and a later phase observes this frame's writes from earlier ones.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// A named, totally ordered stage of the per-frame update.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Phase {
    /// Runs ahead of everything else.  Capabilities that never set a phase
    /// land here.
    #[default]
    Separated = 0,
    Input = 1,
    BeforeMovement = 2,
    InfluenceMovement = 3,
    ActionMovement = 4,
    Movement = 5,
    LastMovement = 6,
    BeforeGameplay = 7,
    Gameplay = 8,
    AfterGameplay = 9,
    AfterPhysics = 10,
    Audio = 11,
    PostWork = 12,
}

impl Phase {
    /// Every phase in frame order.
    pub const ALL: [Phase; 13] = [
        Phase::Separated,
        Phase::Input,
        Phase::BeforeMovement,
        Phase::InfluenceMovement,
        Phase::ActionMovement,
        Phase::Movement,
        Phase::LastMovement,
        Phase::BeforeGameplay,
        Phase::Gameplay,
        Phase::AfterGameplay,
        Phase::AfterPhysics,
        Phase::Audio,
        Phase::PostWork,
    ];

    /// Position in frame order (`0` runs first).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`index`](Self::index).  Used when a phase arrives as a
    /// raw enumeration value from a sheet.
    pub fn from_index(index: usize) -> Option<Phase> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Separated => "Separated",
            Phase::Input => "Input",
            Phase::BeforeMovement => "BeforeMovement",
            Phase::InfluenceMovement => "InfluenceMovement",
            Phase::ActionMovement => "ActionMovement",
            Phase::Movement => "Movement",
            Phase::LastMovement => "LastMovement",
            Phase::BeforeGameplay => "BeforeGameplay",
            Phase::Gameplay => "Gameplay",
            Phase::AfterGameplay => "AfterGameplay",
            Phase::AfterPhysics => "AfterPhysics",
            Phase::Audio => "Audio",
            Phase::PostWork => "PostWork",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Phase {
    type Err = CoreError;

    /// Case-insensitive match on the phase name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownPhase(s.to_string()))
    }
}
