//! Cosmetic notifications broadcast to nearby observers

use crate::types::{ActorId, EntityKind, Vec3};
use serde::{Deserialize, Serialize};

/// Sounds emitted by the combat pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundEvent {
    AttackKnockback,
    AttackNoDamage,
    AttackCrit,
    AttackStrong,
    AttackWeak,
    PlayerHurt,
    PlayerHurtDrown,
    PlayerHurtOnFire,
    PlayerHurtSweetBerryBush,
    PlayerHurtFreeze,
    PlayerDeath,
    EntityHurt,
    EntityDeath,
}

/// Mixer category a sound is played in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCategory {
    Player,
    Hostile,
}

impl SoundCategory {
    /// Category for sounds centred on an actor of this kind
    pub fn for_kind(kind: Option<EntityKind>) -> Self {
        match kind {
            Some(EntityKind::Player) => SoundCategory::Player,
            _ => SoundCategory::Hostile,
        }
    }
}

/// Entity status byte triggering a client-side sound/animation combo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityStatus {
    Hurt,
    ShieldBlock,
    ThornsHurt,
    TotemOfUndying,
    DrownHurt,
    BurnHurt,
    SweetBerryBushHurt,
    FreezeHurt,
}

impl EntityStatus {
    /// Wire value of the status
    pub fn code(self) -> u8 {
        match self {
            EntityStatus::Hurt => 2,
            EntityStatus::ShieldBlock => 29,
            EntityStatus::ThornsHurt => 33,
            EntityStatus::TotemOfUndying => 35,
            EntityStatus::DrownHurt => 36,
            EntityStatus::BurnHurt => 37,
            EntityStatus::SweetBerryBushHurt => 44,
            EntityStatus::FreezeHurt => 57,
        }
    }
}

/// Animations played on an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Animation {
    CriticalEffect,
    MagicalCriticalEffect,
}

/// Particle effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Particle {
    DamageIndicator,
}

/// Fire-and-forget cosmetic sink
///
/// Implementations forward to whatever delivers packets to viewers; the
/// pipeline never reads anything back.
pub trait Notifier {
    fn play_sound(&mut self, sound: SoundEvent, category: SoundCategory, position: Vec3, volume: f32, pitch: f32);

    fn trigger_status(&mut self, actor: ActorId, status: EntityStatus);

    fn play_animation(&mut self, actor: ActorId, animation: Animation);

    fn spawn_particles(&mut self, particle: Particle, position: Vec3, count: u32);
}
