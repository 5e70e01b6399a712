//! Components the arena sheets configure.

use cap_assembly::{Configurable, FieldError, PropertyValue};
use cap_core::EntityId;
use rand::SeedableRng;
use rand::rngs::SmallRng;

// ── Vitals ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Vitals {
    pub max_health: f32,
    pub health:     f32,
    /// Health per second while `Regenerate` is active.
    pub regen_rate: f32,
}

impl Configurable for Vitals {
    fn set_field(&mut self, field: &str, value: &PropertyValue) -> Result<(), FieldError> {
        match field {
            // Entities start at full health.
            "max_health" => {
                self.max_health = value.as_float()?;
                self.health = self.max_health;
            }
            "regen_rate" => self.regen_rate = value.as_float()?,
            _ => return Err(FieldError::UnknownField),
        }
        Ok(())
    }
}

// ── Stamina ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Stamina {
    pub max:     f32,
    pub value:   f32,
    /// Per second while wandering.
    pub drain:   f32,
    /// Per second while resting.
    pub recover: f32,
}

impl Configurable for Stamina {
    fn set_field(&mut self, field: &str, value: &PropertyValue) -> Result<(), FieldError> {
        match field {
            "max" => {
                self.max = value.as_float()?;
                self.value = self.max;
            }
            "drain" => self.drain = value.as_float()?,
            "recover" => self.recover = value.as_float()?,
            _ => return Err(FieldError::UnknownField),
        }
        Ok(())
    }
}

// ── Body ──────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Stance {
    #[default]
    Idle,
    Light,
    Heavy,
}

impl TryFrom<i64> for Stance {
    type Error = FieldError;

    fn try_from(v: i64) -> Result<Self, FieldError> {
        match v {
            0 => Ok(Stance::Idle),
            1 => Ok(Stance::Light),
            2 => Ok(Stance::Heavy),
            n => Err(FieldError::Invalid(format!("no stance with discriminant {n}"))),
        }
    }
}

#[derive(Debug, Default)]
pub struct Body {
    pub position: [f32; 3],
    /// Units per second.
    pub speed:    f32,
    pub tint:     [f32; 4],
    pub stance:   Stance,
}

impl Configurable for Body {
    fn set_field(&mut self, field: &str, value: &PropertyValue) -> Result<(), FieldError> {
        match field {
            "position" => self.position = value.as_vector3()?,
            "speed" => self.speed = value.as_float()?,
            "tint" => self.tint = value.as_color()?,
            "stance" => self.stance = Stance::try_from(value.as_enum()?)?,
            _ => return Err(FieldError::UnknownField),
        }
        Ok(())
    }
}

// ── Dice ──────────────────────────────────────────────────────────────────────

/// Per-entity RNG, so each entity's rolls are reproducible on their own.
pub struct Dice(pub SmallRng);

impl Dice {
    pub fn seeded(global_seed: u64, entity: EntityId) -> Self {
        let seed = global_seed ^ u64::from(entity.index).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Dice(SmallRng::seed_from_u64(seed))
    }
}
