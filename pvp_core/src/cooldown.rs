//! Attack cooldown tracking
//!
//! Every attacker has a tick counter that grows once per simulation tick and
//! resets whenever the attacker swings. Swing strength is the counter
//! normalised against the attacker's attack speed:
//!
//! `strength = clamp((ticks + offset) / (20 / attack_speed), 0, 1)`

use crate::types::{ActorId, ItemStack};
use std::collections::HashMap;

/// Simulation ticks per second
pub const TICKS_PER_SECOND: f32 = 20.0;

/// Ticks needed for a full-strength swing at the given attack speed
pub fn progress_per_tick(attack_speed: f32) -> f32 {
    if attack_speed <= 0.0 {
        return f32::INFINITY;
    }
    TICKS_PER_SECOND / attack_speed
}

/// Per-attacker swing counters
#[derive(Debug, Clone, Default)]
pub struct AttackCooldownTracker {
    ticks_since_last_attack: HashMap<ActorId, u32>,
}

impl AttackCooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks since the attacker last swung (an untracked attacker reads 0)
    pub fn ticks_since_last_attack(&self, attacker: ActorId) -> u32 {
        self.ticks_since_last_attack.get(&attacker).copied().unwrap_or(0)
    }

    pub fn is_tracked(&self, attacker: ActorId) -> bool {
        self.ticks_since_last_attack.contains_key(&attacker)
    }

    /// Overwrite the counter, e.g. when restoring a saved actor
    pub fn set_ticks(&mut self, attacker: ActorId, ticks: u32) {
        self.ticks_since_last_attack.insert(attacker, ticks);
    }

    /// Swing strength in `[0, 1]`
    pub fn cooldown_progress(&mut self, attacker: ActorId, attack_speed: f32, base_offset: f32) -> f32 {
        let ticks = *self.ticks_since_last_attack.entry(attacker).or_insert(0) as f32;
        let progress = (ticks + base_offset) / progress_per_tick(attack_speed);
        if progress.is_nan() {
            return 0.0;
        }
        progress.clamp(0.0, 1.0)
    }

    pub fn reset_on_swing(&mut self, attacker: ActorId) {
        self.ticks_since_last_attack.insert(attacker, 0);
    }

    /// Arm-swing animation without a hit
    pub fn on_hand_animation(&mut self, attacker: ActorId) {
        self.reset_on_swing(attacker);
    }

    /// Held slot switched; only a different item restarts the swing
    pub fn on_held_item_change(&mut self, attacker: ActorId, current: &ItemStack, next: &ItemStack) {
        if !current.is_similar(next) {
            self.reset_on_swing(attacker);
        }
    }

    /// Advance every tracked attacker by one tick
    pub fn tick(&mut self) {
        for ticks in self.ticks_since_last_attack.values_mut() {
            *ticks = ticks.saturating_add(1);
        }
    }

    pub fn forget(&mut self, attacker: ActorId) {
        self.ticks_since_last_attack.remove(&attacker);
    }
}

/// Per-actor, per-material item-use cooldowns (ender pearls, shields...)
#[derive(Debug, Clone, Default)]
pub struct ItemCooldowns {
    remaining: HashMap<(ActorId, String), u32>,
}

impl ItemCooldowns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_cooldown(&mut self, actor: ActorId, material: &str, ticks: u32) {
        if ticks == 0 {
            self.remaining.remove(&(actor, material.to_string()));
        } else {
            self.remaining.insert((actor, material.to_string()), ticks);
        }
    }

    pub fn has_cooldown(&self, actor: ActorId, material: &str) -> bool {
        self.remaining
            .get(&(actor, material.to_string()))
            .is_some_and(|ticks| *ticks > 0)
    }

    pub fn remaining(&self, actor: ActorId, material: &str) -> u32 {
        self.remaining
            .get(&(actor, material.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn forget(&mut self, actor: ActorId) {
        self.remaining.retain(|(owner, _), _| *owner != actor);
    }

    /// Count every cooldown down and drop the finished ones
    pub fn tick(&mut self) {
        self.remaining.retain(|_, ticks| {
            *ticks = ticks.saturating_sub(1);
            *ticks > 0
        });
    }
}
