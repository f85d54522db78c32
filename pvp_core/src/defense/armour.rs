//! Armor - Damage reduction with diminishing returns
//!
//! Each armor point blocks 4% of a hit, but big hits punch through part of
//! the armor. Toughness slows that punch-through down:
//!
//! `effective = clamp(armor - damage / (2 + toughness / 4), armor * 0.2, 20)`
//! `damage_taken = damage * (1 - effective / 25)`

use crate::damage::DamageCause;
use crate::types::ActorId;
use crate::world::AttackStats;

/// Armor points beyond this have no further effect
pub const MAX_EFFECTIVE_ARMOR: f32 = 20.0;
/// Share of armor that always applies however large the hit
pub const MIN_ARMOR_RATIO: f32 = 0.2;
const ARMOR_DIVISOR: f32 = 25.0;

/// Calculate damage after armor reduction
///
/// # Arguments
/// * `damage` - The incoming damage
/// * `armor` - The defender's armor value (whole points)
/// * `toughness` - The defender's armor toughness
pub fn damage_after_armor(damage: f32, armor: f32, toughness: f32) -> f32 {
    if damage <= 0.0 {
        return 0.0;
    }
    if armor <= 0.0 {
        return damage;
    }

    let effective = effective_armor(damage, armor, toughness);
    (damage * (1.0 - effective / ARMOR_DIVISOR)).max(0.0)
}

/// Armor points that actually apply against a hit of this size
pub fn effective_armor(damage: f32, armor: f32, toughness: f32) -> f32 {
    let toughness_factor = 2.0 + toughness.max(0.0) / 4.0;
    let min = (armor * MIN_ARMOR_RATIO).min(MAX_EFFECTIVE_ARMOR);
    (armor - damage / toughness_factor).clamp(min, MAX_EFFECTIVE_ARMOR)
}

/// Percentage of a hit removed by armor
pub fn armor_reduction_percent(damage: f32, armor: f32, toughness: f32) -> f32 {
    if damage <= 0.0 || armor <= 0.0 {
        return 0.0;
    }
    (effective_armor(damage, armor, toughness) / ARMOR_DIVISOR * 100.0).clamp(0.0, 100.0)
}

/// Apply the victim's armor attributes unless the cause bypasses armor
pub fn apply_armor<W: AttackStats + ?Sized>(world: &W, victim: ActorId, cause: &DamageCause, amount: f32) -> f32 {
    if cause.bypasses_armor() {
        return amount;
    }
    damage_after_armor(amount, world.armor(victim).floor(), world.armor_toughness(victim))
}
