//! The `Capability` trait — the main extension point for user code.

use cap_core::{Phase, Tag, short_type_name};

use crate::CapabilityContext;

/// One independently activatable unit of per-frame behavior.
///
/// Implementors decide *when* they are active through the two predicates
/// and react through the three hooks.  The activation flag and the elapsed
/// counters are kept by the framework, not by the implementor: by the time
/// [`on_activated`](Self::on_activated) runs the state is already `Active`
/// with both counters at zero, and by the time
/// [`tick_active`](Self::tick_active) runs the counter for the current
/// state already includes `dt`.  Overriding a hook can therefore never skip
/// the bookkeeping.
///
/// # Construction
///
/// Capabilities are built with no arguments (usually `Default`), handed an
/// owner, and registered exactly once with a scheduler.  Registration is
/// what gives them a `CapabilityId` and an instigator.
///
/// # Threading
///
/// Every hook runs on the frame-loop thread, one capability at a time, so
/// there is no `Send`/`Sync` bound.  Hooks must not block.
///
/// # Example
///
/// ```rust
/// use cap_capability::{Capability, CapabilityContext};
/// use cap_core::Phase;
///
/// #[derive(Default)]
/// struct Sprint { stamina: f32 }
///
/// impl Capability for Sprint {
///     fn phase(&self) -> Phase {
///         Phase::Movement
///     }
///
///     fn should_deactivate(&self, _ctx: &CapabilityContext<'_>) -> bool {
///         self.stamina <= 0.0
///     }
///
///     fn tick_active(&mut self, dt: f32, ctx: &mut CapabilityContext<'_>) {
///         if ctx.state().active {
///             self.stamina -= dt;
///         }
///     }
/// }
/// ```
pub trait Capability: 'static {
    /// The phase this capability ticks in.  Read once at registration; the
    /// value is fixed for the capability's lifetime.
    fn phase(&self) -> Phase;

    /// Position within the phase: lower runs first, ties run in
    /// registration order.  Read once at registration.
    fn phase_order(&self) -> i32 {
        0
    }

    /// Static classification of this capability.
    fn tags(&self) -> &[Tag] {
        &[Tag::NONE]
    }

    /// Short type name shown by monitors.
    fn type_name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Asked each tick while `Inactive`.  Default: always activate.
    fn should_activate(&self, _ctx: &CapabilityContext<'_>) -> bool {
        true
    }

    /// Asked each tick while `Active`.  Default: never deactivate.
    fn should_deactivate(&self, _ctx: &CapabilityContext<'_>) -> bool {
        false
    }

    /// Runs right after the transition to `Active`.
    fn on_activated(&mut self, _ctx: &mut CapabilityContext<'_>) {}

    /// Runs right after the transition to `Inactive`.
    fn on_deactivated(&mut self, _ctx: &mut CapabilityContext<'_>) {}

    /// Runs every tick in either state, after any transition and after the
    /// elapsed counter for the current state has advanced by `dt`.
    fn tick_active(&mut self, _dt: f32, _ctx: &mut CapabilityContext<'_>) {}
}
