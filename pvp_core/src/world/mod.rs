//! Capability interfaces the pipeline reads and writes actors through
//!
//! The combat core owns no entity state besides its own cooldown and
//! invulnerability maps. Everything else is reached through these narrow
//! traits, keyed by [`ActorId`]. Lookups for an actor the world does not
//! know return neutral values (zero, `false`, air) rather than failing.

mod memory;
mod notify;

pub use memory::{MemoryActor, MemoryWorld, Notification};
pub use notify::{Animation, EntityStatus, Notifier, Particle, SoundCategory, SoundEvent};

use crate::damage::DamageCause;
use crate::types::{ActiveStatusEffect, ActorId, EntityGroup, EntityKind, EquipmentSlot, GameMode, ItemStack, StatusEffectKind, Vec3};

/// Attribute values
pub trait AttackStats {
    fn attack_damage(&self, actor: ActorId) -> f32;

    /// Swings per second
    fn attack_speed(&self, actor: ActorId) -> f32;

    fn armor(&self, actor: ActorId) -> f32;

    fn armor_toughness(&self, actor: ActorId) -> f32;

    /// Share of incoming knockback ignored, in `[0, 1]`
    fn knockback_resistance(&self, _actor: ActorId) -> f32 {
        0.0
    }
}

/// Mutable per-actor state: health, motion, flags and status effects
pub trait CombatState {
    /// `None` when the actor does not exist
    fn kind(&self, actor: ActorId) -> Option<EntityKind>;

    fn is_dead(&self, actor: ActorId) -> bool;

    fn game_mode(&self, actor: ActorId) -> GameMode;

    fn entity_group(&self, _actor: ActorId) -> EntityGroup {
        EntityGroup::Default
    }

    fn position(&self, actor: ActorId) -> Vec3;

    /// Bounding box height, used to place particles at body height
    fn height(&self, _actor: ActorId) -> f64 {
        1.8
    }

    /// Facing in degrees
    fn yaw(&self, actor: ActorId) -> f32;

    fn velocity(&self, actor: ActorId) -> Vec3;

    fn set_velocity(&mut self, actor: ActorId, velocity: Vec3);

    fn health(&self, actor: ActorId) -> f32;

    fn set_health(&mut self, actor: ActorId, health: f32);

    /// Temporary bonus health consumed before regular health
    fn absorption(&self, _actor: ActorId) -> f32 {
        0.0
    }

    fn set_absorption(&mut self, _actor: ActorId, _absorption: f32) {}

    fn is_sprinting(&self, actor: ActorId) -> bool;

    fn set_sprinting(&mut self, actor: ActorId, sprinting: bool);

    fn is_on_ground(&self, actor: ActorId) -> bool;

    /// Moving downwards since the last tick
    fn is_falling(&self, actor: ActorId) -> bool;

    fn is_climbing(&self, actor: ActorId) -> bool;

    fn is_mounted(&self, actor: ActorId) -> bool;

    /// Holding a raised shield
    fn is_blocking(&self, _actor: ActorId) -> bool {
        false
    }

    fn fire_ticks(&self, actor: ActorId) -> u32;

    fn set_fire_ticks(&mut self, actor: ActorId, ticks: u32);

    fn is_on_fire(&self, actor: ActorId) -> bool {
        self.fire_ticks(actor) > 0
    }

    fn effect(&self, actor: ActorId, kind: StatusEffectKind) -> Option<ActiveStatusEffect>;

    fn has_effect(&self, actor: ActorId, kind: StatusEffectKind) -> bool {
        self.effect(actor, kind).is_some()
    }

    fn add_effect(&mut self, actor: ActorId, effect: ActiveStatusEffect);

    fn clear_effects(&mut self, actor: ActorId);

    fn add_exhaustion(&mut self, actor: ActorId, amount: f32);

    /// Drop the actor's connection
    fn disconnect(&mut self, actor: ActorId, reason: &str);

    /// Switch a spectating actor's camera onto the target
    fn spectate(&mut self, actor: ActorId, target: ActorId);

    /// Damage a non-living entity; returns whether the hit had any effect
    fn hurt_object(&mut self, _target: ActorId, _cause: &DamageCause, _amount: f32) -> bool {
        false
    }
}

/// Worn and held items
pub trait Equipment {
    /// Air when the slot is empty
    fn item(&self, actor: ActorId, slot: EquipmentSlot) -> ItemStack;

    fn set_item(&mut self, actor: ActorId, slot: EquipmentSlot, item: ItemStack);

    fn armor_items(&self, actor: ActorId) -> Vec<ItemStack> {
        EquipmentSlot::armor()
            .iter()
            .map(|slot| self.item(actor, *slot))
            .filter(|item| !item.is_air())
            .collect()
    }

    /// Wear down an item by a hit; durability formulas live outside the core
    fn damage_item(&mut self, _actor: ActorId, _slot: EquipmentSlot, _amount: f32) {}
}

/// Enchantment tables and post-hit enchantment effects
pub trait Enchantments {
    /// Extra melee damage from the weapon against a damage group
    fn attack_bonus(&self, weapon: &ItemStack, group: EntityGroup) -> f32;

    fn knockback_bonus(&self, attacker: ActorId) -> u32;

    fn fire_aspect_level(&self, attacker: ActorId) -> u32;

    /// Summed protection level of the armor pieces against a cause
    fn protection_level(&self, armor: &[ItemStack], cause: &DamageCause) -> u32;

    /// Victim-side effects such as thorns
    fn on_victim_damaged(&mut self, _victim: ActorId, _attacker: ActorId) {}

    /// Attacker-side effects such as bane of arthropods slowness
    fn on_attacker_dealt_damage(&mut self, _attacker: ActorId, _target: ActorId) {}
}

/// Everything the pipeline needs from the surrounding simulation
pub trait CombatWorld: AttackStats + CombatState + Equipment + Enchantments + Notifier {}

impl<T> CombatWorld for T where T: AttackStats + CombatState + Equipment + Enchantments + Notifier + ?Sized {}
