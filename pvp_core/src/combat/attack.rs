//! Attack resolution - turn "A attacks B" into a hit
//!
//! Swing strength scales both the base damage (quadratically) and the
//! enchantment bonus (linearly). A full-strength swing while sprinting adds a
//! knockback level; one while falling is a critical hit instead.

use super::result::{AttackOutcome, AttackResolution, IgnoreReason};
use super::system::CombatSystem;
use crate::cooldown::TICKS_PER_SECOND;
use crate::damage::{DamageCause, PendingDamage};
use crate::defense::take_knockback;
use crate::error::{CombatError, Result, INVALID_ENTITY_ATTACKED};
use crate::types::{ActorId, EntityGroup, EquipmentSlot, GameMode, StatusEffectKind, Vec3};
use crate::world::{Animation, CombatWorld, Particle, SoundCategory, SoundEvent};
use rand::Rng;

impl CombatSystem {
    /// Resolve an attack intent
    pub fn attack<W: CombatWorld + ?Sized>(&mut self, world: &mut W, attacker: ActorId, target: ActorId) -> Result<AttackResolution> {
        let mut rng = rand::thread_rng();
        self.attack_with_rng(world, attacker, target, &mut rng)
    }

    /// Resolve an attack with a provided RNG (for deterministic testing)
    ///
    /// Returns `Err` only for protocol violations (attacking yourself or an
    /// entity that can never be attacked); the attacker has been
    /// disconnected by then. Every other early exit is an
    /// [`AttackResolution::Ignored`] that leaves all state untouched.
    pub fn attack_with_rng<W: CombatWorld + ?Sized>(
        &mut self,
        world: &mut W,
        attacker: ActorId,
        target: ActorId,
        rng: &mut impl Rng,
    ) -> Result<AttackResolution> {
        if world.kind(attacker).is_none() {
            return Err(CombatError::UnknownActor(attacker));
        }
        let Some(target_kind) = world.kind(target) else {
            return Ok(AttackResolution::Ignored(IgnoreReason::TargetMissing));
        };
        if world.is_dead(attacker) {
            return Ok(AttackResolution::Ignored(IgnoreReason::AttackerDead));
        }
        let attacker_position = world.position(attacker);
        if attacker_position.distance_squared(world.position(target)) >= self.config.attack.max_reach_squared {
            return Ok(AttackResolution::Ignored(IgnoreReason::OutOfReach));
        }
        if target == attacker || !target_kind.is_attackable() {
            tracing::error!(%attacker, %target, kind = ?target_kind, "attacked an invalid entity, disconnecting");
            world.disconnect(attacker, INVALID_ENTITY_ATTACKED);
            return Err(CombatError::InvalidTarget {
                attacker,
                target,
                kind: target_kind,
            });
        }

        if world.game_mode(attacker) == GameMode::Spectator {
            world.spectate(attacker, target);
            return Ok(AttackResolution::Spectated);
        }

        let constants = self.config.attack.clone();
        let target_living = target_kind.is_living();
        let category = SoundCategory::for_kind(world.kind(attacker));

        // Step 1: swing strength
        let strength = self
            .cooldowns
            .cooldown_progress(attacker, world.attack_speed(attacker), constants.cooldown_base_offset);

        // Step 2-3: damage scaled by strength
        let group = if target_living {
            world.entity_group(target)
        } else {
            EntityGroup::Default
        };
        let weapon = world.item(attacker, EquipmentSlot::MainHand);
        let mut raw = world.attack_damage(attacker) * (0.2 + strength * strength * 0.8);
        let bonus = world.attack_bonus(&weapon, group) * strength;

        // Step 4: the swing counts whatever happens next
        self.cooldowns.reset_on_swing(attacker);

        // Step 5: sprint knockback
        let mut knockback_level = world.knockback_bonus(attacker);
        let strong_swing = strength > constants.strong_swing_threshold;
        let sprinting = world.is_sprinting(attacker);
        let sprint_bonus = sprinting && strong_swing;
        if sprint_bonus {
            world.play_sound(SoundEvent::AttackKnockback, category, attacker_position, 1.0, 1.0);
            knockback_level += 1;
        }

        // Step 6: critical hit
        let critical = strong_swing
            && world.is_falling(attacker)
            && !world.is_on_ground(attacker)
            && !world.is_climbing(attacker)
            && !world.has_effect(attacker, StatusEffectKind::Blindness)
            && !world.is_mounted(attacker)
            && target_living
            && !sprinting;
        if critical {
            raw *= constants.critical_multiplier;
        }

        // Step 7
        let final_damage = raw + bonus;
        let sweep_damage = self.hooks.sweep_damage(attacker, target, final_damage);

        // Step 8: speculative fire aspect, rolled back if the hit is rejected
        let fire_aspect = world.fire_aspect_level(attacker);
        let fire_aspect_pending = target_living && !world.is_on_fire(target) && fire_aspect > 0;
        if fire_aspect_pending {
            world.set_fire_ticks(target, constants.speculative_fire_ticks);
        }

        let mut outcome = AttackOutcome {
            attacker,
            target,
            strength,
            final_damage,
            enchanted_bonus: bonus,
            critical,
            strong_swing,
            knockback_level,
            sprint_bonus,
            fire_aspect_pending,
            sweep_damage,
            landed: false,
            health_delta: 0.0,
        };

        tracing::trace!(%attacker, %target, strength, final_damage, critical, knockback_level, "swing resolved");

        // Step 9: damage resolution
        let health_before = world.health(target);
        let mut pending = PendingDamage::new(target, DamageCause::MeleeAttack(attacker), final_damage);
        let report = self.damage_with_rng(world, &mut pending, rng);
        if !report.applied() {
            world.play_sound(SoundEvent::AttackNoDamage, category, attacker_position, 1.0, 1.0);
            if fire_aspect_pending {
                world.set_fire_ticks(target, 0);
            }
            tracing::debug!(%attacker, %target, reason = ?report.rejection, "attack rejected");
            return Ok(AttackResolution::Resolved(outcome));
        }
        outcome.landed = true;

        // Step 10: knockback
        if knockback_level > 0 {
            let radians = f64::from(world.yaw(attacker)).to_radians();
            let push = knockback_level as f32 * constants.knockback_per_level;
            if target_living {
                take_knockback(world, target, push, radians.sin(), -radians.cos());
            } else {
                let push = f64::from(push);
                let nudge = Vec3::new(-radians.sin() * push, constants.object_knockback_lift, radians.cos() * push);
                let velocity = world.velocity(target);
                world.set_velocity(target, velocity + nudge);
            }

            let damping = constants.attacker_velocity_damping;
            let velocity = world.velocity(attacker);
            world.set_velocity(attacker, velocity.scale(Vec3::new(damping, 1.0, damping)));
            world.set_sprinting(attacker, false);
        }

        // Step 11: cosmetics
        if critical {
            world.play_sound(SoundEvent::AttackCrit, category, attacker_position, 1.0, 1.0);
            world.play_animation(target, Animation::CriticalEffect);
        } else {
            let sound = if strong_swing {
                SoundEvent::AttackStrong
            } else {
                SoundEvent::AttackWeak
            };
            world.play_sound(sound, category, attacker_position, 1.0, 1.0);
        }
        if bonus > 0.0 {
            world.play_animation(target, Animation::MagicalCriticalEffect);
        }

        // Step 12: enchantment post-processing
        if target_living {
            world.on_victim_damaged(target, attacker);
        }
        world.on_attacker_dealt_damage(attacker, target);

        // Step 13: fire aspect and damage indicators
        if target_living {
            let delta = health_before - world.health(target);
            outcome.health_delta = delta;

            if fire_aspect_pending {
                let seconds = fire_aspect * constants.fire_aspect_seconds_per_level;
                world.set_fire_ticks(target, seconds * TICKS_PER_SECOND as u32);
            }

            if delta > constants.damage_indicator_threshold {
                let count = (delta * constants.damage_indicator_ratio).floor() as u32;
                let position = world.position(target) + Vec3::new(0.0, world.height(target) * 0.5, 0.0);
                world.spawn_particles(Particle::DamageIndicator, position, count);
            }
        }

        // Step 14
        world.add_exhaustion(attacker, constants.exhaustion);

        Ok(AttackResolution::Resolved(outcome))
    }
}
