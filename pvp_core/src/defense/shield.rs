//! Shield coverage

use crate::damage::DamageCause;
use crate::types::{ActorId, Vec3};
use crate::world::CombatState;

/// Whether a raised shield covers a hit from this cause.
///
/// Only hits with a responsible entity in front of the victim are covered;
/// causes that ignore armor go straight through.
pub fn blocked_by_shield<W: CombatState + ?Sized>(world: &W, victim: ActorId, cause: &DamageCause) -> bool {
    if cause.bypasses_armor() || !world.is_blocking(victim) {
        return false;
    }
    let Some(source) = cause.source() else {
        return false;
    };
    if world.kind(source).is_none() {
        return false;
    }

    let offset = world.position(victim) - world.position(source);
    let towards_victim = Vec3::new(offset.x, 0.0, offset.z).normalize();
    let facing = Vec3::from_yaw(world.yaw(victim));
    towards_victim.dot(facing) < 0.0
}
