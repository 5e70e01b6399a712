//! Activation state and its time-in-state counters.

/// Whether a capability is active, and for how long it has been in its
/// current state.
///
/// Exactly one counter advances per tick, picked by `active`.  Both reset
/// to zero on every transition.  The scheduler owns this value; capability
/// hooks only ever see a read-only copy through their context.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ActivationState {
    pub active:           bool,
    pub active_elapsed:   f32,
    pub inactive_elapsed: f32,
}

impl ActivationState {
    /// Enter `Active` and zero both counters.
    #[inline]
    pub fn activate(&mut self) {
        self.active = true;
        self.reset_counters();
    }

    /// Enter `Inactive` and zero both counters.
    #[inline]
    pub fn deactivate(&mut self) {
        self.active = false;
        self.reset_counters();
    }

    /// Add `dt` to the counter for the current state.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        if self.active {
            self.active_elapsed += dt;
        } else {
            self.inactive_elapsed += dt;
        }
    }

    /// Seconds spent in the current state.
    #[inline]
    pub fn time_in_state(&self) -> f32 {
        if self.active { self.active_elapsed } else { self.inactive_elapsed }
    }

    fn reset_counters(&mut self) {
        self.active_elapsed = 0.0;
        self.inactive_elapsed = 0.0;
    }
}
