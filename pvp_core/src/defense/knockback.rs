//! Knockback - pushing actors around after a hit

use crate::types::{ActorId, Vec3};
use crate::world::{AttackStats, CombatState};
use rand::Rng;

/// Squared horizontal distance under which two actors count as colocated
const DEGENERATE_DISTANCE_SQUARED: f64 = 1.0e-4;
const JITTER_SCALE: f64 = 0.01;
/// Cap on the vertical boost given to a grounded actor
const MAX_VERTICAL_KNOCKBACK: f64 = 0.4;

/// Push an actor away from direction `(x, z)`.
///
/// The actor moves towards `(-x, -z)`: half its horizontal velocity is kept,
/// and a grounded actor also gets a small upward boost.
pub fn take_knockback<W>(world: &mut W, actor: ActorId, strength: f32, x: f64, z: f64)
where
    W: AttackStats + CombatState + ?Sized,
{
    let resistance = world.knockback_resistance(actor).clamp(0.0, 1.0);
    let strength = f64::from(strength * (1.0 - resistance));
    if strength <= 0.0 {
        return;
    }

    let push = Vec3::new(x, 0.0, z).normalize() * strength;
    let velocity = world.velocity(actor);
    let y = if world.is_on_ground(actor) {
        (velocity.y / 2.0 + strength).min(MAX_VERTICAL_KNOCKBACK)
    } else {
        velocity.y
    };

    world.set_velocity(
        actor,
        Vec3::new(velocity.x / 2.0 - push.x, y, velocity.z / 2.0 - push.z),
    );
}

/// Horizontal direction from `victim` to `attacker`.
///
/// When the two are (nearly) on top of each other, random jitter is tried
/// up to `max_attempts` times; if every attempt stays degenerate a fixed
/// minimal direction is used.
pub fn knockback_direction(attacker: Vec3, victim: Vec3, max_attempts: u32, rng: &mut impl Rng) -> (f64, f64) {
    let mut x = attacker.x - victim.x;
    let mut z = attacker.z - victim.z;

    let mut attempts = 0;
    while x * x + z * z < DEGENERATE_DISTANCE_SQUARED {
        if attempts >= max_attempts {
            return (JITTER_SCALE, 0.0);
        }
        x = (rng.gen::<f64>() - rng.gen::<f64>()) * JITTER_SCALE;
        z = (rng.gen::<f64>() - rng.gen::<f64>()) * JITTER_SCALE;
        attempts += 1;
    }
    (x, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{MemoryActor, MemoryWorld};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_direction_between_separate_actors() {
        let mut rng = StdRng::seed_from_u64(1);
        let (x, z) = knockback_direction(Vec3::new(3.0, 0.0, 4.0), Vec3::ZERO, 64, &mut rng);
        assert!((x - 3.0).abs() < f64::EPSILON);
        assert!((z - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_colocated_actors_get_bounded_nonzero_direction() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let here = Vec3::new(10.0, 64.0, -3.0);
            let (x, z) = knockback_direction(here, here, 64, &mut rng);
            let len_sq = x * x + z * z;
            assert!(len_sq >= DEGENERATE_DISTANCE_SQUARED);
            assert!(x.abs() <= JITTER_SCALE && z.abs() <= JITTER_SCALE);
        }
    }

    #[test]
    fn test_zero_attempts_falls_back_to_fixed_direction() {
        let mut rng = StdRng::seed_from_u64(3);
        let (x, z) = knockback_direction(Vec3::ZERO, Vec3::ZERO, 0, &mut rng);
        assert!((x - JITTER_SCALE).abs() < f64::EPSILON);
        assert!(z.abs() < f64::EPSILON);
    }

    #[test]
    fn test_knockback_pushes_away_from_direction() {
        let mut world = MemoryWorld::new();
        let id = world.spawn(MemoryActor::mob());

        // attacker sits at +x, so the victim flies towards -x
        take_knockback(&mut world, id, 0.4, 1.0, 0.0);
        let velocity = world.velocity(id);
        assert!((velocity.x + 0.4).abs() < 1e-6);
        assert!(velocity.z.abs() < 1e-9);
        assert!((velocity.y - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_airborne_keeps_vertical_velocity() {
        let mut world = MemoryWorld::new();
        let id = world.spawn(MemoryActor::mob().falling());
        world.set_velocity(id, Vec3::new(0.2, -0.3, 0.0));

        take_knockback(&mut world, id, 0.5, 0.0, -1.0);
        let velocity = world.velocity(id);
        assert!((velocity.x - 0.1).abs() < 1e-9);
        assert!((velocity.y + 0.3).abs() < 1e-9);
        assert!((velocity.z - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_full_resistance_ignores_knockback() {
        let mut world = MemoryWorld::new();
        let mut actor = MemoryActor::mob();
        actor.knockback_resistance = 1.0;
        actor.velocity = Vec3::new(1.0, 0.0, 1.0);
        let id = world.spawn(actor);

        take_knockback(&mut world, id, 2.0, 1.0, 0.0);
        assert_eq!(world.velocity(id), Vec3::new(1.0, 0.0, 1.0));
    }
}
