//! MemoryWorld - a self-contained world backing every capability trait
//!
//! Useful for headless simulations and as a test fixture: every cosmetic
//! notification is recorded so callers can inspect what would have been
//! broadcast.

use super::notify::{Animation, EntityStatus, Notifier, Particle, SoundCategory, SoundEvent};
use super::{AttackStats, CombatState, Enchantments, Equipment};
use crate::damage::DamageCause;
use crate::types::{
    ActiveStatusEffect, ActorId, Enchantment, EntityGroup, EntityKind, EquipmentSlot, GameMode, ItemStack,
    StatusEffectKind, Vec3,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete state of one actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryActor {
    pub kind: EntityKind,
    pub game_mode: GameMode,
    pub group: EntityGroup,
    pub dead: bool,

    // === Motion ===
    pub position: Vec3,
    pub yaw: f32,
    pub velocity: Vec3,
    pub height: f64,

    // === Resources ===
    pub health: f32,
    pub absorption: f32,
    pub exhaustion: f32,

    // === Flags ===
    pub sprinting: bool,
    pub on_ground: bool,
    pub falling: bool,
    pub climbing: bool,
    pub mounted: bool,
    pub blocking: bool,
    pub fire_ticks: u32,

    // === Attributes ===
    pub attack_damage: f32,
    pub attack_speed: f32,
    pub armor: f32,
    pub armor_toughness: f32,
    pub knockback_resistance: f32,

    #[serde(default)]
    pub effects: Vec<ActiveStatusEffect>,
    #[serde(default)]
    pub equipment: HashMap<EquipmentSlot, ItemStack>,
}

impl MemoryActor {
    fn base(kind: EntityKind) -> Self {
        MemoryActor {
            kind,
            game_mode: GameMode::Survival,
            group: EntityGroup::Default,
            dead: false,
            position: Vec3::ZERO,
            yaw: 0.0,
            velocity: Vec3::ZERO,
            height: 1.8,
            health: 20.0,
            absorption: 0.0,
            exhaustion: 0.0,
            sprinting: false,
            on_ground: true,
            falling: false,
            climbing: false,
            mounted: false,
            blocking: false,
            fire_ticks: 0,
            attack_damage: 1.0,
            attack_speed: 4.0,
            armor: 0.0,
            armor_toughness: 0.0,
            knockback_resistance: 0.0,
            effects: Vec::new(),
            equipment: HashMap::new(),
        }
    }

    /// Unarmed player with 20 health
    pub fn player() -> Self {
        Self::base(EntityKind::Player)
    }

    pub fn mob() -> Self {
        Self::base(EntityKind::Mob)
    }

    /// Non-player entity of any kind (objects, projectiles, items...)
    pub fn entity(kind: EntityKind) -> Self {
        let mut actor = Self::base(kind);
        if !kind.is_living() {
            actor.height = 0.5;
        }
        actor
    }

    pub fn at(mut self, x: f64, y: f64, z: f64) -> Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    pub fn facing(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    pub fn with_health(mut self, health: f32) -> Self {
        self.health = health;
        self
    }

    pub fn with_armor(mut self, armor: f32, toughness: f32) -> Self {
        self.armor = armor;
        self.armor_toughness = toughness;
        self
    }

    pub fn with_attack(mut self, damage: f32, speed: f32) -> Self {
        self.attack_damage = damage;
        self.attack_speed = speed;
        self
    }

    pub fn with_effect(mut self, effect: ActiveStatusEffect) -> Self {
        self.effects.retain(|e| e.kind != effect.kind);
        self.effects.push(effect);
        self
    }

    pub fn holding(mut self, slot: EquipmentSlot, item: ItemStack) -> Self {
        self.equipment.insert(slot, item);
        self
    }

    /// Mid-jump, on the way down
    pub fn falling(mut self) -> Self {
        self.on_ground = false;
        self.falling = true;
        self
    }

    pub fn sprinting(mut self) -> Self {
        self.sprinting = true;
        self
    }

    pub fn in_group(mut self, group: EntityGroup) -> Self {
        self.group = group;
        self
    }
}

/// One recorded cosmetic broadcast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Notification {
    Sound {
        sound: SoundEvent,
        category: SoundCategory,
        position: Vec3,
        volume: f32,
        pitch: f32,
    },
    Status {
        actor: ActorId,
        status: EntityStatus,
    },
    Animation {
        actor: ActorId,
        animation: Animation,
    },
    Particles {
        particle: Particle,
        position: Vec3,
        count: u32,
    },
}

/// In-memory world
#[derive(Debug, Clone, Default)]
pub struct MemoryWorld {
    actors: HashMap<ActorId, MemoryActor>,
    next_id: u32,
    /// Every broadcast, in emission order
    pub notifications: Vec<Notification>,
    /// Actors kicked, with the reason
    pub disconnected: Vec<(ActorId, String)>,
    /// Spectator -> spectated actor
    pub spectating: HashMap<ActorId, ActorId>,
    /// (victim, attacker) pairs passed to victim-side enchantment effects
    pub victim_effect_calls: Vec<(ActorId, ActorId)>,
    /// (attacker, target) pairs passed to attacker-side enchantment effects
    pub attacker_effect_calls: Vec<(ActorId, ActorId)>,
    /// Hits delivered to non-living entities
    pub object_hits: Vec<(ActorId, f32)>,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an actor and return its id
    pub fn spawn(&mut self, actor: MemoryActor) -> ActorId {
        self.next_id += 1;
        let id = ActorId(self.next_id);
        self.actors.insert(id, actor);
        id
    }

    pub fn actor(&self, id: ActorId) -> Option<&MemoryActor> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut MemoryActor> {
        self.actors.get_mut(&id)
    }

    /// Sounds played so far, in order
    pub fn sounds(&self) -> Vec<SoundEvent> {
        self.notifications
            .iter()
            .filter_map(|n| match n {
                Notification::Sound { sound, .. } => Some(*sound),
                _ => None,
            })
            .collect()
    }

    /// Statuses triggered on one actor, in order
    pub fn statuses(&self, actor: ActorId) -> Vec<EntityStatus> {
        self.notifications
            .iter()
            .filter_map(|n| match n {
                Notification::Status { actor: a, status } if *a == actor => Some(*status),
                _ => None,
            })
            .collect()
    }

    pub fn animations(&self, actor: ActorId) -> Vec<Animation> {
        self.notifications
            .iter()
            .filter_map(|n| match n {
                Notification::Animation { actor: a, animation } if *a == actor => Some(*animation),
                _ => None,
            })
            .collect()
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }

    fn main_hand(&self, actor: ActorId) -> ItemStack {
        self.item(actor, EquipmentSlot::MainHand)
    }
}

impl AttackStats for MemoryWorld {
    fn attack_damage(&self, actor: ActorId) -> f32 {
        self.actor(actor).map_or(0.0, |a| a.attack_damage)
    }

    fn attack_speed(&self, actor: ActorId) -> f32 {
        self.actor(actor).map_or(0.0, |a| a.attack_speed)
    }

    fn armor(&self, actor: ActorId) -> f32 {
        self.actor(actor).map_or(0.0, |a| a.armor)
    }

    fn armor_toughness(&self, actor: ActorId) -> f32 {
        self.actor(actor).map_or(0.0, |a| a.armor_toughness)
    }

    fn knockback_resistance(&self, actor: ActorId) -> f32 {
        self.actor(actor).map_or(0.0, |a| a.knockback_resistance)
    }
}

impl CombatState for MemoryWorld {
    fn kind(&self, actor: ActorId) -> Option<EntityKind> {
        self.actor(actor).map(|a| a.kind)
    }

    fn is_dead(&self, actor: ActorId) -> bool {
        self.actor(actor).map_or(true, |a| a.dead)
    }

    fn game_mode(&self, actor: ActorId) -> GameMode {
        self.actor(actor).map_or(GameMode::Survival, |a| a.game_mode)
    }

    fn entity_group(&self, actor: ActorId) -> EntityGroup {
        self.actor(actor).map_or(EntityGroup::Default, |a| a.group)
    }

    fn position(&self, actor: ActorId) -> Vec3 {
        self.actor(actor).map_or(Vec3::ZERO, |a| a.position)
    }

    fn height(&self, actor: ActorId) -> f64 {
        self.actor(actor).map_or(0.0, |a| a.height)
    }

    fn yaw(&self, actor: ActorId) -> f32 {
        self.actor(actor).map_or(0.0, |a| a.yaw)
    }

    fn velocity(&self, actor: ActorId) -> Vec3 {
        self.actor(actor).map_or(Vec3::ZERO, |a| a.velocity)
    }

    fn set_velocity(&mut self, actor: ActorId, velocity: Vec3) {
        if let Some(a) = self.actor_mut(actor) {
            a.velocity = velocity;
        }
    }

    fn health(&self, actor: ActorId) -> f32 {
        self.actor(actor).map_or(0.0, |a| a.health)
    }

    fn set_health(&mut self, actor: ActorId, health: f32) {
        if let Some(a) = self.actor_mut(actor) {
            a.health = health.max(0.0);
            if a.health <= 0.0 {
                a.dead = true;
            }
        }
    }

    fn absorption(&self, actor: ActorId) -> f32 {
        self.actor(actor).map_or(0.0, |a| a.absorption)
    }

    fn set_absorption(&mut self, actor: ActorId, absorption: f32) {
        if let Some(a) = self.actor_mut(actor) {
            a.absorption = absorption.max(0.0);
        }
    }

    fn is_sprinting(&self, actor: ActorId) -> bool {
        self.actor(actor).is_some_and(|a| a.sprinting)
    }

    fn set_sprinting(&mut self, actor: ActorId, sprinting: bool) {
        if let Some(a) = self.actor_mut(actor) {
            a.sprinting = sprinting;
        }
    }

    fn is_on_ground(&self, actor: ActorId) -> bool {
        self.actor(actor).is_some_and(|a| a.on_ground)
    }

    fn is_falling(&self, actor: ActorId) -> bool {
        self.actor(actor).is_some_and(|a| a.falling)
    }

    fn is_climbing(&self, actor: ActorId) -> bool {
        self.actor(actor).is_some_and(|a| a.climbing)
    }

    fn is_mounted(&self, actor: ActorId) -> bool {
        self.actor(actor).is_some_and(|a| a.mounted)
    }

    fn is_blocking(&self, actor: ActorId) -> bool {
        self.actor(actor).is_some_and(|a| a.blocking)
    }

    fn fire_ticks(&self, actor: ActorId) -> u32 {
        self.actor(actor).map_or(0, |a| a.fire_ticks)
    }

    fn set_fire_ticks(&mut self, actor: ActorId, ticks: u32) {
        if let Some(a) = self.actor_mut(actor) {
            a.fire_ticks = ticks;
        }
    }

    fn effect(&self, actor: ActorId, kind: StatusEffectKind) -> Option<ActiveStatusEffect> {
        self.actor(actor)?.effects.iter().find(|e| e.kind == kind).copied()
    }

    fn add_effect(&mut self, actor: ActorId, effect: ActiveStatusEffect) {
        if let Some(a) = self.actor_mut(actor) {
            a.effects.retain(|e| e.kind != effect.kind);
            a.effects.push(effect);
        }
    }

    fn clear_effects(&mut self, actor: ActorId) {
        if let Some(a) = self.actor_mut(actor) {
            a.effects.clear();
        }
    }

    fn add_exhaustion(&mut self, actor: ActorId, amount: f32) {
        if let Some(a) = self.actor_mut(actor) {
            a.exhaustion += amount;
        }
    }

    fn disconnect(&mut self, actor: ActorId, reason: &str) {
        self.disconnected.push((actor, reason.to_string()));
    }

    fn spectate(&mut self, actor: ActorId, target: ActorId) {
        self.spectating.insert(actor, target);
    }

    fn hurt_object(&mut self, target: ActorId, _cause: &DamageCause, amount: f32) -> bool {
        if amount <= 0.0 || self.actor(target).is_none() {
            return false;
        }
        self.object_hits.push((target, amount));
        true
    }
}

impl Equipment for MemoryWorld {
    fn item(&self, actor: ActorId, slot: EquipmentSlot) -> ItemStack {
        self.actor(actor)
            .and_then(|a| a.equipment.get(&slot))
            .cloned()
            .unwrap_or_default()
    }

    fn set_item(&mut self, actor: ActorId, slot: EquipmentSlot, item: ItemStack) {
        if let Some(a) = self.actor_mut(actor) {
            if item.is_air() {
                a.equipment.remove(&slot);
            } else {
                a.equipment.insert(slot, item);
            }
        }
    }
}

impl Enchantments for MemoryWorld {
    fn attack_bonus(&self, weapon: &ItemStack, group: EntityGroup) -> f32 {
        let mut bonus = 0.0;

        let sharpness = weapon.enchantment_level(Enchantment::Sharpness);
        if sharpness > 0 {
            bonus += 1.0 + (sharpness - 1) as f32 * 0.5;
        }
        if group == EntityGroup::Undead {
            bonus += weapon.enchantment_level(Enchantment::Smite) as f32 * 2.5;
        }
        if group == EntityGroup::Arthropod {
            bonus += weapon.enchantment_level(Enchantment::BaneOfArthropods) as f32 * 2.5;
        }
        bonus
    }

    fn knockback_bonus(&self, attacker: ActorId) -> u32 {
        self.main_hand(attacker).enchantment_level(Enchantment::Knockback)
    }

    fn fire_aspect_level(&self, attacker: ActorId) -> u32 {
        self.main_hand(attacker).enchantment_level(Enchantment::FireAspect)
    }

    fn protection_level(&self, armor: &[ItemStack], cause: &DamageCause) -> u32 {
        if cause.is_out_of_world() {
            return 0;
        }
        armor
            .iter()
            .map(|item| {
                let mut level = item.enchantment_level(Enchantment::Protection);
                if cause.is_fire() {
                    level += item.enchantment_level(Enchantment::FireProtection) * 2;
                }
                if matches!(cause, DamageCause::Fall) {
                    level += item.enchantment_level(Enchantment::FeatherFalling) * 3;
                }
                if cause.is_projectile() {
                    level += item.enchantment_level(Enchantment::ProjectileProtection) * 2;
                }
                level
            })
            .sum()
    }

    fn on_victim_damaged(&mut self, victim: ActorId, attacker: ActorId) {
        self.victim_effect_calls.push((victim, attacker));
    }

    fn on_attacker_dealt_damage(&mut self, attacker: ActorId, target: ActorId) {
        self.attacker_effect_calls.push((attacker, target));
    }
}

impl Notifier for MemoryWorld {
    fn play_sound(&mut self, sound: SoundEvent, category: SoundCategory, position: Vec3, volume: f32, pitch: f32) {
        self.notifications.push(Notification::Sound {
            sound,
            category,
            position,
            volume,
            pitch,
        });
    }

    fn trigger_status(&mut self, actor: ActorId, status: EntityStatus) {
        self.notifications.push(Notification::Status { actor, status });
    }

    fn play_animation(&mut self, actor: ActorId, animation: Animation) {
        self.notifications.push(Notification::Animation { actor, animation });
    }

    fn spawn_particles(&mut self, particle: Particle, position: Vec3, count: u32) {
        self.notifications.push(Notification::Particles {
            particle,
            position,
            count,
        });
    }
}
