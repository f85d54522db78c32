//! Extension points raised while resolving a hit
//!
//! Hooks observe typed events and may veto them or, for final damage,
//! replace the amount. They run synchronously, in priority order (lower
//! priority values run first), and the publisher reads the event back once
//! every hook has seen it.

use crate::damage::DamageCause;
use crate::types::{ActorId, Hand};
use std::sync::Arc;

/// A shield is about to absorb a hit
#[derive(Debug, Clone, PartialEq)]
pub struct BlockEvent {
    pub victim: ActorId,
    pub cause: DamageCause,
    /// Whether a melee attacker is pushed back by the shield
    pub knockback_attacker: bool,
    cancelled: bool,
}

impl BlockEvent {
    pub fn new(victim: ActorId, cause: DamageCause) -> Self {
        BlockEvent {
            victim,
            cause,
            knockback_attacker: true,
            cancelled: false,
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Fully mitigated damage, just before it is committed
#[derive(Debug, Clone, PartialEq)]
pub struct FinalDamageEvent {
    pub victim: ActorId,
    pub cause: DamageCause,
    amount: f32,
    cancelled: bool,
}

impl FinalDamageEvent {
    pub fn new(victim: ActorId, cause: DamageCause, amount: f32) -> Self {
        FinalDamageEvent {
            victim,
            cause,
            amount,
            cancelled: false,
        }
    }

    pub fn amount(&self) -> f32 {
        self.amount
    }

    pub fn set_amount(&mut self, amount: f32) {
        self.amount = amount;
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// A totem of undying is about to save the victim
#[derive(Debug, Clone, PartialEq)]
pub struct TotemUseEvent {
    pub victim: ActorId,
    pub hand: Hand,
    cancelled: bool,
}

impl TotemUseEvent {
    pub fn new(victim: ActorId, hand: Hand) -> Self {
        TotemUseEvent {
            victim,
            hand,
            cancelled: false,
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Observer of combat extension points
///
/// Every method has a no-op default; implement only what you need.
pub trait CombatHook: Send + Sync {
    /// Lower values run first. Default priority is 0.
    fn priority(&self) -> i32 {
        0
    }

    fn on_block(&self, _event: &mut BlockEvent) {}

    fn on_final_damage(&self, _event: &mut FinalDamageEvent) {}

    fn on_totem_use(&self, _event: &mut TotemUseEvent) {}

    /// Extra damage dealt to entities around a melee target.
    ///
    /// Sweeping attacks are not modelled yet; the pipeline records the sum
    /// of these values on the attack outcome and applies nothing.
    fn sweep_damage(&self, _attacker: ActorId, _target: ActorId, _damage: f32) -> f32 {
        0.0
    }
}

/// Priority-ordered set of hooks
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: Vec<Arc<dyn CombatHook>>,
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry").field("hooks", &self.hooks.len()).finish()
    }
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hook, keeping the registry sorted by priority
    pub fn register(&mut self, hook: Arc<dyn CombatHook>) {
        self.hooks.push(hook);
        // stable: equal priorities keep registration order
        self.hooks.sort_by_key(|h| h.priority());
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn dispatch_block(&self, event: &mut BlockEvent) {
        for hook in &self.hooks {
            hook.on_block(event);
        }
    }

    pub fn dispatch_final_damage(&self, event: &mut FinalDamageEvent) {
        for hook in &self.hooks {
            hook.on_final_damage(event);
        }
    }

    pub fn dispatch_totem_use(&self, event: &mut TotemUseEvent) {
        for hook in &self.hooks {
            hook.on_totem_use(event);
        }
    }

    pub fn sweep_damage(&self, attacker: ActorId, target: ActorId, damage: f32) -> f32 {
        self.hooks
            .iter()
            .map(|h| h.sweep_damage(attacker, target, damage))
            .sum()
    }
}
