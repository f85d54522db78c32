//! Resistance effect and protection enchantments
//!
//! Both run after armor and are skipped entirely for unblockable causes.
//!
//! Formula:
//! - Resistance: `damage * (25 - (amplifier + 1) * 5) / 25`, floored at 0
//! - Protection: `damage * (1 - clamp(level, 0, 20) / 25)`

use crate::damage::DamageCause;
use crate::types::{ActorId, StatusEffectKind};
use crate::world::{CombatState, Enchantments, Equipment};

/// Summed protection beyond this has no further effect
pub const MAX_PROTECTION: u32 = 20;
const REDUCTION_DIVISOR: f32 = 25.0;
const RESISTANCE_PER_LEVEL: f32 = 5.0;

/// Damage left after a resistance effect of the given amplifier
pub fn damage_after_resistance_effect(damage: f32, amplifier: u8) -> f32 {
    let blocked = (f32::from(amplifier) + 1.0) * RESISTANCE_PER_LEVEL;
    (damage * (REDUCTION_DIVISOR - blocked) / REDUCTION_DIVISOR).max(0.0)
}

/// Damage left after a summed protection level
pub fn damage_after_protection(damage: f32, protection: u32) -> f32 {
    let level = protection.min(MAX_PROTECTION) as f32;
    damage * (1.0 - level / REDUCTION_DIVISOR)
}

/// Apply the resistance effect and armor enchantments of the victim
pub fn apply_enchantments_and_resistance<W>(world: &W, victim: ActorId, cause: &DamageCause, amount: f32) -> f32
where
    W: CombatState + Equipment + Enchantments + ?Sized,
{
    if cause.is_unblockable() {
        return amount;
    }

    let mut amount = amount;
    if let Some(resistance) = world.effect(victim, StatusEffectKind::Resistance) {
        amount = damage_after_resistance_effect(amount, resistance.amplifier);
    }

    if amount <= 0.0 {
        return 0.0;
    }

    let protection = world.protection_level(&world.armor_items(victim), cause);
    if protection > 0 {
        amount = damage_after_protection(amount, protection);
    }
    amount
}
