//! CombatSystem - owns per-actor combat state and drives both pipelines
//!
//! The system holds only what the combat rules themselves track: swing
//! counters, item-use cooldowns, invulnerability windows and the hook
//! registry. Every other piece of actor state is reached through a
//! [`CombatWorld`]. All operations take `&mut self`; a host that shares one
//! world across threads wraps the system in a single lock so hits on one
//! victim stay in arrival order.

use super::result::{DamageReport, RejectReason};
use crate::config::{CombatConfig, ConfigError};
use crate::cooldown::{AttackCooldownTracker, ItemCooldowns};
use crate::damage::PendingDamage;
use crate::defense::InvulnerabilityTracker;
use crate::hooks::{CombatHook, HookRegistry};
use crate::types::{ActorId, ItemStack};
use crate::world::CombatWorld;
use rand::Rng;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CombatSystem {
    pub(crate) config: CombatConfig,
    pub(crate) cooldowns: AttackCooldownTracker,
    pub(crate) item_cooldowns: ItemCooldowns,
    pub(crate) invulnerability: InvulnerabilityTracker,
    pub(crate) hooks: HookRegistry,
}

impl Default for CombatSystem {
    fn default() -> Self {
        Self::new(CombatConfig::default())
    }
}

impl CombatSystem {
    /// Build a system from an already validated config
    pub fn new(config: CombatConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "combat config failed validation");
        let invulnerability =
            InvulnerabilityTracker::new(config.damage.invulnerability_ticks, config.damage.merge_threshold_ticks);
        CombatSystem {
            config,
            cooldowns: AttackCooldownTracker::new(),
            item_cooldowns: ItemCooldowns::new(),
            invulnerability,
            hooks: HookRegistry::new(),
        }
    }

    /// Validate the config first
    pub fn try_new(config: CombatConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn register_hook(&mut self, hook: Arc<dyn CombatHook>) {
        self.hooks.register(hook);
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    pub fn cooldowns(&self) -> &AttackCooldownTracker {
        &self.cooldowns
    }

    pub fn cooldowns_mut(&mut self) -> &mut AttackCooldownTracker {
        &mut self.cooldowns
    }

    pub fn invulnerability(&self) -> &InvulnerabilityTracker {
        &self.invulnerability
    }

    pub fn invulnerability_mut(&mut self) -> &mut InvulnerabilityTracker {
        &mut self.invulnerability
    }

    pub fn item_cooldowns(&self) -> &ItemCooldowns {
        &self.item_cooldowns
    }

    /// Advance every counter by one simulation tick
    pub fn tick(&mut self) {
        self.cooldowns.tick();
        self.item_cooldowns.tick();
        self.invulnerability.tick();
    }

    /// The actor swung its arm without hitting anything
    pub fn on_hand_animation(&mut self, actor: ActorId) {
        self.cooldowns.on_hand_animation(actor);
    }

    pub fn on_held_item_change(&mut self, actor: ActorId, current: &ItemStack, next: &ItemStack) {
        self.cooldowns.on_held_item_change(actor, current, next);
    }

    /// Item use is refused while the item kind is cooling down
    pub fn can_use_item(&self, actor: ActorId, item: &ItemStack) -> bool {
        if self.item_cooldowns.has_cooldown(actor, &item.material) {
            tracing::trace!(%actor, material = %item.material, "item use refused, on cooldown");
            return false;
        }
        true
    }

    pub fn set_item_cooldown(&mut self, actor: ActorId, item: &ItemStack, ticks: u32) {
        self.item_cooldowns.set_cooldown(actor, &item.material, ticks);
    }

    /// Drop all per-actor state of an actor leaving the world
    pub fn forget(&mut self, actor: ActorId) {
        self.cooldowns.forget(actor);
        self.item_cooldowns.forget(actor);
        self.invulnerability.clear(actor);
    }

    /// Resolve a hit and subtract it from the victim
    pub fn damage<W: CombatWorld + ?Sized>(&mut self, world: &mut W, pending: &mut PendingDamage) -> DamageReport {
        let mut rng = rand::thread_rng();
        self.damage_with_rng(world, pending, &mut rng)
    }

    /// Resolve and apply a hit with a provided RNG (for deterministic testing)
    ///
    /// Non-living victims skip resolution and are handed to
    /// [`crate::world::CombatState::hurt_object`]. Living victims lose
    /// absorption first, then health.
    pub fn damage_with_rng<W: CombatWorld + ?Sized>(
        &mut self,
        world: &mut W,
        pending: &mut PendingDamage,
        rng: &mut impl Rng,
    ) -> DamageReport {
        let victim = pending.victim;
        if world.kind(victim).is_some_and(|kind| !kind.is_living()) {
            return Self::hurt_object(world, pending);
        }

        let health_before = world.health(victim) + world.absorption(victim);
        let mut report = self.resolve_damage_with_rng(world, pending, rng);
        report.health_before = health_before;

        if report.applied() {
            let amount = pending.applicable_amount();
            let absorption = world.absorption(victim);
            let from_absorption = amount.min(absorption);
            if from_absorption > 0.0 {
                world.set_absorption(victim, absorption - from_absorption);
            }
            let remaining = amount - from_absorption;
            world.set_health(victim, (world.health(victim) - remaining).max(0.0));
        }

        report.health_after = world.health(victim) + world.absorption(victim);
        report
    }

    fn hurt_object<W: CombatWorld + ?Sized>(world: &mut W, pending: &mut PendingDamage) -> DamageReport {
        let mut report = DamageReport::new(pending.victim, pending.cause.clone(), pending.amount);
        if pending.is_cancelled() {
            return report.rejected(RejectReason::CancelledUpstream);
        }

        if !world.hurt_object(pending.victim, &pending.cause, pending.amount) {
            pending.cancel();
            return report.rejected(RejectReason::NoDamage);
        }
        report.final_amount = pending.amount;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::DamageCause;
    use crate::types::EntityKind;
    use crate::world::{CombatState, MemoryActor, MemoryWorld};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_absorption_consumed_first() {
        let mut system = CombatSystem::default();
        let mut world = MemoryWorld::new();
        let mut actor = MemoryActor::mob();
        actor.absorption = 2.0;
        let victim = world.spawn(actor);
        let mut rng = StdRng::seed_from_u64(1);

        let mut pending = PendingDamage::new(victim, DamageCause::Magic, 5.0);
        let report = system.damage_with_rng(&mut world, &mut pending, &mut rng);

        assert!(report.applied());
        assert!(world.absorption(victim).abs() < f32::EPSILON);
        assert!((world.health(victim) - 17.0).abs() < 1e-5);
        assert!((report.health_lost() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_objects_bypass_resolution() {
        let mut system = CombatSystem::default();
        let mut world = MemoryWorld::new();
        let boat = world.spawn(MemoryActor::entity(EntityKind::Object));
        let mut rng = StdRng::seed_from_u64(1);

        let mut pending = PendingDamage::new(boat, DamageCause::Fall, 3.0);
        let report = system.damage_with_rng(&mut world, &mut pending, &mut rng);

        assert!(report.applied());
        assert_eq!(world.object_hits, vec![(boat, 3.0)]);
        assert_eq!(system.invulnerability().tracked(), 0);
    }

    #[test]
    fn test_tick_expires_windows() {
        let mut system = CombatSystem::default();
        let mut world = MemoryWorld::new();
        let victim = world.spawn(MemoryActor::mob());
        let mut rng = StdRng::seed_from_u64(1);

        system.damage_with_rng(&mut world, &mut PendingDamage::new(victim, DamageCause::Magic, 1.0), &mut rng);
        assert_eq!(system.invulnerability().tracked(), 1);
        for _ in 0..20 {
            system.tick();
        }
        assert_eq!(system.invulnerability().tracked(), 0);
    }

    #[test]
    fn test_item_cooldown_blocks_use() {
        let mut system = CombatSystem::default();
        let pearl = ItemStack::new("ender_pearl", 16);
        let actor = ActorId(1);

        assert!(system.can_use_item(actor, &pearl));
        system.set_item_cooldown(actor, &pearl, 2);
        assert!(!system.can_use_item(actor, &pearl));
        system.tick();
        system.tick();
        assert!(system.can_use_item(actor, &pearl));
    }

    #[test]
    fn test_forget_drops_every_counter() {
        let mut system = CombatSystem::default();
        let mut world = MemoryWorld::new();
        let actor = world.spawn(MemoryActor::player());
        let pearl = ItemStack::new("ender_pearl", 16);
        let mut rng = StdRng::seed_from_u64(1);

        system.cooldowns_mut().set_ticks(actor, 12);
        system.set_item_cooldown(actor, &pearl, 20);
        system.damage_with_rng(&mut world, &mut PendingDamage::new(actor, DamageCause::Magic, 1.0), &mut rng);

        system.forget(actor);
        assert!(!system.cooldowns().is_tracked(actor));
        assert!(system.can_use_item(actor, &pearl));
        assert!(system.invulnerability().state(actor).is_none());
    }

    #[test]
    fn test_try_new_rejects_overlapping_merge_window() {
        let mut config = CombatConfig::default();
        config.damage.merge_threshold_ticks = config.damage.invulnerability_ticks;
        assert!(matches!(CombatSystem::try_new(config), Err(ConfigError::ValidationError(_))));

        assert!(CombatSystem::try_new(CombatConfig::default()).is_ok());
    }
}
