//! The arena's capabilities.

use cap_capability::{Capability, CapabilityContext};
use cap_core::{Phase, Tag};
use rand::Rng;

use crate::components::{Body, Dice, Stamina, Vitals};

pub const MOVEMENT: Tag = Tag(1);
pub const DAMAGE: Tag = Tag(2);

fn movement_blocked(ctx: &CapabilityContext<'_>) -> bool {
    ctx.owner_tag_blocks().is_some_and(|reg| reg.is_blocked_by_any(MOVEMENT))
}

fn stamina(ctx: &CapabilityContext<'_>) -> f32 {
    ctx.owner_component::<Stamina>().map_or(0.0, |s| s.value)
}

// ── Wander ────────────────────────────────────────────────────────────────────

/// Drifts the body around while there is stamina to spend.
#[derive(Default)]
pub struct Wander;

impl Capability for Wander {
    fn phase(&self) -> Phase {
        Phase::Movement
    }

    fn tags(&self) -> &[Tag] {
        &[MOVEMENT]
    }

    fn should_activate(&self, ctx: &CapabilityContext<'_>) -> bool {
        stamina(ctx) > 0.0 && !movement_blocked(ctx)
    }

    fn should_deactivate(&self, ctx: &CapabilityContext<'_>) -> bool {
        stamina(ctx) <= 0.0 || movement_blocked(ctx)
    }

    fn tick_active(&mut self, dt: f32, ctx: &mut CapabilityContext<'_>) {
        if !ctx.state().active {
            return;
        }
        let (dx, dz) = match ctx.owner_component_mut::<Dice>() {
            Some(dice) => (dice.0.gen_range(-1.0..=1.0f32), dice.0.gen_range(-1.0..=1.0f32)),
            None => (0.0, 0.0),
        };
        if let Some(body) = ctx.owner_component_mut::<Body>() {
            body.position[0] += dx * body.speed * dt;
            body.position[2] += dz * body.speed * dt;
        }
        if let Some(stamina) = ctx.owner_component_mut::<Stamina>() {
            stamina.value = (stamina.value - stamina.drain * dt).max(0.0);
        }
    }
}

// ── Rest ──────────────────────────────────────────────────────────────────────

/// Blocks movement until stamina is back to full.
#[derive(Default)]
pub struct Rest;

impl Capability for Rest {
    fn phase(&self) -> Phase {
        Phase::BeforeGameplay
    }

    fn should_activate(&self, ctx: &CapabilityContext<'_>) -> bool {
        stamina(ctx) <= 0.0
    }

    fn should_deactivate(&self, ctx: &CapabilityContext<'_>) -> bool {
        ctx.owner_component::<Stamina>().is_some_and(|s| s.value >= s.max)
    }

    fn on_activated(&mut self, ctx: &mut CapabilityContext<'_>) {
        ctx.block_owner_tags([MOVEMENT]);
    }

    fn on_deactivated(&mut self, ctx: &mut CapabilityContext<'_>) {
        ctx.unblock_owner_tags([MOVEMENT]);
    }

    fn tick_active(&mut self, dt: f32, ctx: &mut CapabilityContext<'_>) {
        if !ctx.state().active {
            return;
        }
        if let Some(stamina) = ctx.owner_component_mut::<Stamina>() {
            stamina.value = (stamina.value + stamina.recover * dt).min(stamina.max);
        }
    }
}

// ── Regenerate ────────────────────────────────────────────────────────────────

/// Heals while below maximum health.
#[derive(Default)]
pub struct Regenerate;

impl Capability for Regenerate {
    fn phase(&self) -> Phase {
        Phase::AfterGameplay
    }

    fn should_activate(&self, ctx: &CapabilityContext<'_>) -> bool {
        ctx.owner_component::<Vitals>().is_some_and(|v| v.health < v.max_health)
    }

    fn should_deactivate(&self, ctx: &CapabilityContext<'_>) -> bool {
        !self.should_activate(ctx)
    }

    fn tick_active(&mut self, dt: f32, ctx: &mut CapabilityContext<'_>) {
        if !ctx.state().active {
            return;
        }
        if let Some(vitals) = ctx.owner_component_mut::<Vitals>() {
            vitals.health = (vitals.health + vitals.regen_rate * dt).min(vitals.max_health);
        }
    }
}

// ── Hazard ────────────────────────────────────────────────────────────────────

/// Chance per second of being hit.
const HIT_RATE: f64 = 1.2;

/// Random hits from the arena floor.  Destroys its owner at zero health.
#[derive(Default)]
pub struct Hazard;

impl Capability for Hazard {
    fn phase(&self) -> Phase {
        Phase::Gameplay
    }

    fn tags(&self) -> &[Tag] {
        &[DAMAGE]
    }

    fn tick_active(&mut self, dt: f32, ctx: &mut CapabilityContext<'_>) {
        let Some(owner) = ctx.live_owner() else {
            return;
        };
        let hit = match ctx.owner_component_mut::<Dice>() {
            Some(dice) => {
                if dice.0.gen_bool((HIT_RATE * f64::from(dt)).min(1.0)) {
                    dice.0.gen_range(5.0..25.0f32)
                } else {
                    return;
                }
            }
            None => return,
        };
        let Some(vitals) = ctx.owner_component_mut::<Vitals>() else {
            return;
        };
        vitals.health -= hit;
        tracing::debug!(%owner, hit, health = vitals.health, "hit");
        if vitals.health <= 0.0 {
            let name = ctx.entities.name(owner).unwrap_or_default().to_string();
            tracing::info!(%owner, name = %name, frame = %ctx.frame, "knocked out");
            ctx.destroy_entity(owner);
        }
    }
}
