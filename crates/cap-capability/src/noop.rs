//! A no-op capability — activates on its first tick and does nothing else.

use cap_core::Phase;

use crate::Capability;

/// A [`Capability`] with every hook left at its default.
///
/// Useful as a placeholder in tests or as a marker that only exists to be
/// seen by monitors.
#[derive(Default, Debug, Clone, Copy)]
pub struct NoopCapability {
    pub phase: Phase,
}

impl NoopCapability {
    pub fn new(phase: Phase) -> Self {
        Self { phase }
    }
}

impl Capability for NoopCapability {
    fn phase(&self) -> Phase {
        self.phase
    }
}
