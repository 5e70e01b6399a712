//! The per-tick activation state machine.
//!
//! ```text
//!            should_activate
//!   Inactive ───────────────▶ Active
//!            ◀───────────────
//!            should_deactivate
//! ```
//!
//! At most one transition per tick; `tick_active` runs every tick.

use crate::{Capability, CapabilityContext};

/// What happened to the activation state during one tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    None,
    Activated,
    Deactivated,
}

/// Run one tick of `capability` against the state held in `ctx`.
///
/// 1. `Inactive` and `should_activate` → state becomes `Active` with zeroed
///    counters, then `on_activated`.
/// 2. otherwise `Active` and `should_deactivate` → state becomes `Inactive`
///    with zeroed counters, then `on_deactivated`.
/// 3. always: the current state's counter advances by `dt`, then
///    `tick_active`.
///
/// A capability that activates on a tick therefore ends it with
/// `active_elapsed == dt`.
pub fn run_tick(
    capability: &mut dyn Capability,
    ctx: &mut CapabilityContext<'_>,
) -> Transition {
    let dt = ctx.dt;
    let active = ctx.state().active;

    let transition = if !active && capability.should_activate(ctx) {
        ctx.state_mut().activate();
        capability.on_activated(ctx);
        Transition::Activated
    } else if active && capability.should_deactivate(ctx) {
        ctx.state_mut().deactivate();
        capability.on_deactivated(ctx);
        Transition::Deactivated
    } else {
        Transition::None
    };

    ctx.state_mut().advance(dt);
    capability.tick_active(dt, ctx);

    if transition != Transition::None {
        tracing::trace!(
            capability = %ctx.id,
            kind = capability.type_name(),
            ?transition,
            "activation changed"
        );
    }
    transition
}
