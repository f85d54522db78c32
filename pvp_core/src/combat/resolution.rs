//! Damage resolution - mitigate a pending hit and pick its cosmetics
//!
//! Stages run in a fixed order and any of them can stop the hit:
//! 1. Upstream cancellation, liveness and game mode
//! 2. Fire immunity
//! 3. Helmet against falling blocks
//! 4. Shield block
//! 5. Invulnerability window (merge or absorb)
//! 6. Armor, then resistance and protection enchantments
//! 7. Final damage hooks
//! 8. Hurt status and knockback (fresh hits only)
//! 9. Lethality: totem of undying or death sound
//!
//! The resolved amount is written back onto the [`PendingDamage`]; health is
//! left for the caller to update.

use super::result::{DamageReport, RejectReason};
use super::system::CombatSystem;
use crate::damage::PendingDamage;
use crate::defense::{
    apply_armor, apply_enchantments_and_resistance, blocked_by_shield, knockback_direction, take_knockback,
    try_last_stand, MergeDecision,
};
use crate::hooks::{BlockEvent, FinalDamageEvent};
use crate::types::{EntityKind, EquipmentSlot, GameMode, Hand, ItemStack, StatusEffectKind};
use crate::world::{CombatWorld, EntityStatus, SoundCategory};
use rand::Rng;

impl CombatSystem {
    /// Resolve a pending hit without applying it
    pub fn resolve_damage<W: CombatWorld + ?Sized>(&mut self, world: &mut W, pending: &mut PendingDamage) -> DamageReport {
        let mut rng = rand::thread_rng();
        self.resolve_damage_with_rng(world, pending, &mut rng)
    }

    /// Resolve damage with a provided RNG (for deterministic testing)
    ///
    /// The RNG only feeds the knockback jitter used when attacker and victim
    /// share a position.
    pub fn resolve_damage_with_rng<W: CombatWorld + ?Sized>(
        &mut self,
        world: &mut W,
        pending: &mut PendingDamage,
        rng: &mut impl Rng,
    ) -> DamageReport {
        let victim = pending.victim;
        let cause = pending.cause.clone();
        let mut report = DamageReport::new(victim, cause.clone(), pending.amount);
        report.health_before = world.health(victim) + world.absorption(victim);
        report.health_after = report.health_before;

        // Step 1: upstream cancellation and victim eligibility
        if pending.is_cancelled() {
            return report.rejected(RejectReason::CancelledUpstream);
        }
        let Some(kind) = world.kind(victim).filter(|kind| kind.is_living()) else {
            pending.cancel();
            return report.rejected(RejectReason::NotLiving);
        };
        if world.is_dead(victim) {
            pending.cancel();
            return report.rejected(RejectReason::VictimDead);
        }
        let is_player = kind == EntityKind::Player;
        if is_player
            && matches!(world.game_mode(victim), GameMode::Creative | GameMode::Spectator)
            && !cause.is_out_of_world()
        {
            pending.cancel();
            return report.rejected(RejectReason::Invulnerable);
        }

        // Step 2: fire immunity
        if cause.is_fire() && world.has_effect(victim, StatusEffectKind::FireResistance) {
            pending.cancel();
            return report.rejected(RejectReason::FireImmune);
        }

        let mut amount = pending.amount;

        // Step 3: helmet
        if cause.damages_helmet() && !world.item(victim, EquipmentSlot::Helmet).is_air() {
            world.damage_item(victim, EquipmentSlot::Helmet, amount);
            amount *= self.config.damage.helmet_factor;
        }

        // Step 4: shield
        if amount > 0.0 && blocked_by_shield(world, victim, &cause) {
            let mut event = BlockEvent::new(victim, cause.clone());
            self.hooks.dispatch_block(&mut event);

            if event.is_cancelled() {
                tracing::debug!(%victim, "shield block vetoed");
            } else {
                if let Some(hand) = Hand::all()
                    .iter()
                    .find(|hand| world.item(victim, hand.slot()).is(ItemStack::SHIELD))
                {
                    world.damage_item(victim, hand.slot(), amount);
                }

                if event.knockback_attacker && !cause.is_projectile() {
                    if let Some(attacker) = cause.source().filter(|a| world.kind(*a).is_some_and(|k| k.is_living())) {
                        let offset = world.position(victim) - world.position(attacker);
                        take_knockback(world, attacker, self.config.damage.shield_knockback, offset.x, offset.z);
                    }
                }

                amount = 0.0;
                report.shielded = true;
            }
        }

        // Step 5: invulnerability window
        let decision = self.invulnerability.check(victim, amount);
        match decision {
            MergeDecision::Absorbed => {
                tracing::debug!(%victim, amount, "hit absorbed by invulnerability window");
                pending.cancel();
                return report.rejected(RejectReason::AbsorbedByInvulnerability);
            }
            MergeDecision::Merged { marginal } => {
                report.merged = true;
                amount = marginal;
            }
            MergeDecision::Fresh { amount: fresh } => {
                report.fresh_hit = true;
                amount = fresh;
            }
        }

        // Step 6: mitigation
        amount = apply_armor(world, victim, &cause, amount);
        amount = apply_enchantments_and_resistance(world, victim, &cause, amount);
        if amount != 0.0 && is_player {
            world.add_exhaustion(victim, cause.exhaustion());
        }

        // Step 7: final damage hooks
        let mut event = FinalDamageEvent::new(victim, cause.clone(), amount);
        self.hooks.dispatch_final_damage(&mut event);
        if event.is_cancelled() {
            tracing::debug!(%victim, "final damage vetoed");
            pending.cancel();
            return report.rejected(RejectReason::Vetoed);
        }
        amount = event.amount();
        // Shielded hits carry on with zero so the block status still plays
        if amount <= 0.0 && !report.shielded {
            pending.cancel();
            return report.rejected(RejectReason::NoDamage);
        }

        tracing::trace!(%victim, raw = pending.amount, amount, cause = %cause, "damage mitigated");

        // Step 8: hurt status and knockback
        if decision.plays_cosmetics() {
            let status = if report.shielded {
                EntityStatus::ShieldBlock
            } else if cause.is_thorns() {
                EntityStatus::ThornsHurt
            } else {
                cause.hurt_status()
            };
            world.trigger_status(victim, status);
            report.status = Some(status);

            if !report.shielded {
                if let Some(attacker) = cause.source().filter(|a| world.kind(*a).is_some()) {
                    let (x, z) = knockback_direction(
                        world.position(attacker),
                        world.position(victim),
                        self.config.damage.jitter_attempts,
                        rng,
                    );
                    take_knockback(world, victim, self.config.damage.hurt_knockback, x, z);
                }
            }
        }

        // Step 9: shields never let damage through
        if report.shielded {
            pending.cancel();
            return report.rejected(RejectReason::Shielded);
        }

        // Step 10: lethality
        let mut sound = None;
        if world.health(victim) + world.absorption(victim) - amount <= 0.0 {
            if try_last_stand(world, &self.hooks, &self.config.totem, victim, &cause) {
                pending.cancel();
                report.totem_used = true;
                report.health_after = world.health(victim) + world.absorption(victim);
                return report.rejected(RejectReason::TotemOfUndying);
            }
            report.killing_blow = true;
            if decision.plays_cosmetics() {
                sound = Some(cause.death_sound(is_player));
            }
        } else if decision.plays_cosmetics() {
            sound = Some(cause.hurt_sound(is_player));
        }

        // Step 11: broadcast
        if let Some(sound) = sound {
            let position = world.position(victim);
            world.play_sound(sound, SoundCategory::for_kind(Some(kind)), position, 1.0, 1.0);
            report.sound = Some(sound);
        }

        // Step 12: commit
        pending.amount = amount;
        report.final_amount = amount;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::DamageCause;
    use crate::hooks::CombatHook;
    use crate::types::{ActiveStatusEffect, ActorId, Enchantment};
    use crate::world::{CombatState, MemoryActor, MemoryWorld, SoundEvent};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn resolve(system: &mut CombatSystem, world: &mut MemoryWorld, victim: ActorId, cause: DamageCause, amount: f32) -> (PendingDamage, DamageReport) {
        let mut rng = StdRng::seed_from_u64(42);
        let mut pending = PendingDamage::new(victim, cause, amount);
        let report = system.resolve_damage_with_rng(world, &mut pending, &mut rng);
        (pending, report)
    }

    struct Doubler;

    impl CombatHook for Doubler {
        fn on_final_damage(&self, event: &mut FinalDamageEvent) {
            event.set_amount(event.amount() * 2.0);
        }
    }

    struct VetoAll;

    impl CombatHook for VetoAll {
        fn on_final_damage(&self, event: &mut FinalDamageEvent) {
            event.cancel();
        }

        fn on_block(&self, event: &mut BlockEvent) {
            event.cancel();
        }
    }

    #[test]
    fn test_basic_hit() {
        let mut system = CombatSystem::default();
        let mut world = MemoryWorld::new();
        let victim = world.spawn(MemoryActor::player());

        let (pending, report) = resolve(&mut system, &mut world, victim, DamageCause::Generic("cactus".into()), 4.0);

        assert!(report.applied());
        assert!(report.fresh_hit);
        assert!((pending.amount - 4.0).abs() < f32::EPSILON);
        assert_eq!(report.status, Some(EntityStatus::Hurt));
        assert_eq!(world.sounds(), vec![SoundEvent::PlayerHurt]);
        // resolution leaves health alone
        assert!((world.health(victim) - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_cancelled_upstream() {
        let mut system = CombatSystem::default();
        let mut world = MemoryWorld::new();
        let victim = world.spawn(MemoryActor::player());
        let mut rng = StdRng::seed_from_u64(1);

        let mut pending = PendingDamage::new(victim, DamageCause::Fall, 4.0);
        pending.cancel();
        let report = system.resolve_damage_with_rng(&mut world, &mut pending, &mut rng);

        assert_eq!(report.rejection, Some(RejectReason::CancelledUpstream));
        assert_eq!(system.invulnerability().tracked(), 0);
        assert!(world.notifications.is_empty());
    }

    #[test]
    fn test_fire_resistance_cancels_fire() {
        let mut system = CombatSystem::default();
        let mut world = MemoryWorld::new();
        let victim = world.spawn(
            MemoryActor::player().with_effect(ActiveStatusEffect::new(StatusEffectKind::FireResistance, 0, 100)),
        );

        let (pending, report) = resolve(&mut system, &mut world, victim, DamageCause::Fire, 1.0);
        assert!(pending.is_cancelled());
        assert_eq!(report.rejection, Some(RejectReason::FireImmune));
        assert!(world.notifications.is_empty());

        // other causes still hurt
        let (_, report) = resolve(&mut system, &mut world, victim, DamageCause::Fall, 1.0);
        assert!(report.applied());
    }

    #[test]
    fn test_creative_players_only_take_void_damage() {
        let mut system = CombatSystem::default();
        let mut world = MemoryWorld::new();
        let mut actor = MemoryActor::player();
        actor.game_mode = GameMode::Creative;
        let victim = world.spawn(actor);

        let (_, report) = resolve(&mut system, &mut world, victim, DamageCause::Fall, 5.0);
        assert_eq!(report.rejection, Some(RejectReason::Invulnerable));

        let (_, report) = resolve(&mut system, &mut world, victim, DamageCause::OutOfWorld, 5.0);
        assert!(report.applied());
    }

    #[test]
    fn test_helmet_softens_falling_blocks() {
        let mut system = CombatSystem::default();
        let mut world = MemoryWorld::new();
        let victim = world.spawn(MemoryActor::mob().holding(EquipmentSlot::Helmet, ItemStack::new("iron_helmet", 1)));

        let (pending, _) = resolve(&mut system, &mut world, victim, DamageCause::FallingBlock, 8.0);
        assert!((pending.amount - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_armor_then_protection() {
        let mut system = CombatSystem::default();
        let mut world = MemoryWorld::new();
        let victim = world.spawn(
            MemoryActor::mob()
                .with_armor(10.0, 0.0)
                .holding(
                    EquipmentSlot::Chestplate,
                    ItemStack::new("iron_chestplate", 1).with_enchantment(Enchantment::Protection, 5),
                ),
        );
        let attacker = world.spawn(MemoryActor::player().at(1.0, 0.0, 0.0));

        // 10 -> 8 after armor -> 6.4 after protection 5
        let (pending, _) = resolve(&mut system, &mut world, victim, DamageCause::MeleeAttack(attacker), 10.0);
        assert!((pending.amount - 6.4).abs() < 1e-4);
    }

    #[test]
    fn test_exhaustion_for_players() {
        let mut system = CombatSystem::default();
        let mut world = MemoryWorld::new();
        let victim = world.spawn(MemoryActor::player());

        resolve(&mut system, &mut world, victim, DamageCause::Generic("cactus".into()), 1.0);
        assert!((world.actor(victim).unwrap().exhaustion - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_final_damage_hook_replaces_amount() {
        let mut system = CombatSystem::default();
        system.register_hook(Arc::new(Doubler));
        let mut world = MemoryWorld::new();
        let victim = world.spawn(MemoryActor::mob());

        let (pending, report) = resolve(&mut system, &mut world, victim, DamageCause::Magic, 3.0);
        assert!((pending.amount - 6.0).abs() < f32::EPSILON);
        assert!((report.final_amount - 6.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_final_damage_veto() {
        let mut system = CombatSystem::default();
        system.register_hook(Arc::new(VetoAll));
        let mut world = MemoryWorld::new();
        let victim = world.spawn(MemoryActor::mob());

        let (pending, report) = resolve(&mut system, &mut world, victim, DamageCause::Magic, 3.0);
        assert!(pending.is_cancelled());
        assert_eq!(report.rejection, Some(RejectReason::Vetoed));
        assert!(world.sounds().is_empty());
    }

    #[test]
    fn test_shield_blocks_and_pushes_attacker() {
        let mut system = CombatSystem::default();
        let mut world = MemoryWorld::new();
        let mut actor = MemoryActor::player().holding(EquipmentSlot::OffHand, ItemStack::new(ItemStack::SHIELD, 1));
        actor.blocking = true;
        let victim = world.spawn(actor);
        let attacker = world.spawn(MemoryActor::player().at(0.0, 0.0, 2.0));

        let (pending, report) = resolve(&mut system, &mut world, victim, DamageCause::MeleeAttack(attacker), 6.0);

        assert!(pending.is_cancelled());
        assert!(report.shielded);
        assert_eq!(report.rejection, Some(RejectReason::Shielded));
        assert_eq!(world.statuses(victim), vec![EntityStatus::ShieldBlock]);
        // attacker pushed further along +z, victim untouched
        assert!(world.velocity(attacker).z > 0.0);
        assert_eq!(world.velocity(victim), crate::types::Vec3::ZERO);
        assert!(world.sounds().is_empty());
    }

    #[test]
    fn test_vetoed_block_lets_damage_through() {
        let mut system = CombatSystem::default();
        system.register_hook(Arc::new(VetoAll));
        let mut world = MemoryWorld::new();
        let mut actor = MemoryActor::player();
        actor.blocking = true;
        let victim = world.spawn(actor);
        let attacker = world.spawn(MemoryActor::player().at(0.0, 0.0, 2.0));

        let (_, report) = resolve(&mut system, &mut world, victim, DamageCause::MeleeAttack(attacker), 6.0);
        assert!(!report.shielded);
        // the same hook also vetoes final damage
        assert_eq!(report.rejection, Some(RejectReason::Vetoed));
    }

    #[test]
    fn test_merged_hit_is_silent() {
        let mut system = CombatSystem::default();
        let mut world = MemoryWorld::new();
        let victim = world.spawn(MemoryActor::mob());

        resolve(&mut system, &mut world, victim, DamageCause::Magic, 3.0);
        world.clear_notifications();

        let (pending, report) = resolve(&mut system, &mut world, victim, DamageCause::Magic, 5.0);
        assert!(report.merged);
        assert!((pending.amount - 2.0).abs() < f32::EPSILON);
        assert!(world.notifications.is_empty());

        let (_, report) = resolve(&mut system, &mut world, victim, DamageCause::Magic, 4.0);
        assert_eq!(report.rejection, Some(RejectReason::AbsorbedByInvulnerability));
    }

    #[test]
    fn test_hurt_knockback_away_from_attacker() {
        let mut system = CombatSystem::default();
        let mut world = MemoryWorld::new();
        let victim = world.spawn(MemoryActor::mob());
        let attacker = world.spawn(MemoryActor::player().at(-2.0, 0.0, 0.0));

        resolve(&mut system, &mut world, victim, DamageCause::MeleeAttack(attacker), 1.0);
        assert!(world.velocity(victim).x > 0.0);
    }

    #[test]
    fn test_lethal_hit_plays_death_sound() {
        let mut system = CombatSystem::default();
        let mut world = MemoryWorld::new();
        let victim = world.spawn(MemoryActor::mob().with_health(2.0));

        let (_, report) = resolve(&mut system, &mut world, victim, DamageCause::Magic, 5.0);
        assert!(report.killing_blow);
        assert_eq!(report.sound, Some(SoundEvent::EntityDeath));
        assert_eq!(world.sounds(), vec![SoundEvent::EntityDeath]);
    }

    #[test]
    fn test_thorns_hit_survived_on_absorption() {
        let mut system = CombatSystem::default();
        let mut world = MemoryWorld::new();
        let attacker = world.spawn(MemoryActor::player().at(-2.0, 0.0, 0.0));
        let mut actor = MemoryActor::mob().with_health(2.0);
        actor.absorption = 4.0;
        let victim = world.spawn(actor);

        let mut rng = StdRng::seed_from_u64(42);
        let mut pending = PendingDamage::new(victim, DamageCause::Thorns(attacker), 3.0);
        let report = system.damage_with_rng(&mut world, &mut pending, &mut rng);

        // 3 damage against 2 health would kill without the absorption hearts
        assert_eq!(report.status, Some(EntityStatus::ThornsHurt));
        assert!(!report.killing_blow);
        assert!(!world.is_dead(victim));
        assert!((world.health(victim) - 2.0).abs() < f32::EPSILON);
        assert!((world.absorption(victim) - 1.0).abs() < 1e-5);
        assert!(world.statuses(victim).contains(&EntityStatus::ThornsHurt));
    }

    #[test]
    fn test_objects_are_not_resolved() {
        let mut system = CombatSystem::default();
        let mut world = MemoryWorld::new();
        let boat = world.spawn(MemoryActor::entity(EntityKind::Object));

        let (pending, report) = resolve(&mut system, &mut world, boat, DamageCause::Fall, 1.0);
        assert!(pending.is_cancelled());
        assert_eq!(report.rejection, Some(RejectReason::NotLiving));
    }
}
