//! DamageCause - where a hit came from

use crate::types::ActorId;
use crate::world::{EntityStatus, SoundEvent};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hunger cost of taking a hit from a cause that respects armor
const DEFAULT_EXHAUSTION: f32 = 0.1;

/// Classification of incoming damage
///
/// Variants carrying an [`ActorId`] have a responsible entity that can be
/// knocked back by shields and that victims get pushed away from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageCause {
    MeleeAttack(ActorId),
    Projectile(ActorId),
    Fall,
    Fire,
    OutOfWorld,
    Thorns(ActorId),
    Drown,
    Freeze,
    SweetBerryBush,
    Starve,
    Magic,
    FallingBlock,
    Generic(String),
}

impl DamageCause {
    /// Entity responsible for the hit, if any
    pub fn source(&self) -> Option<ActorId> {
        match self {
            DamageCause::MeleeAttack(id) | DamageCause::Projectile(id) | DamageCause::Thorns(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_fire(&self) -> bool {
        matches!(self, DamageCause::Fire)
    }

    pub fn is_projectile(&self) -> bool {
        matches!(self, DamageCause::Projectile(_))
    }

    pub fn is_thorns(&self) -> bool {
        matches!(self, DamageCause::Thorns(_))
    }

    pub fn is_out_of_world(&self) -> bool {
        matches!(self, DamageCause::OutOfWorld)
    }

    /// Skips armor value and toughness
    pub fn bypasses_armor(&self) -> bool {
        matches!(
            self,
            DamageCause::Fall
                | DamageCause::Fire
                | DamageCause::OutOfWorld
                | DamageCause::Drown
                | DamageCause::Freeze
                | DamageCause::Starve
                | DamageCause::Magic
        )
    }

    /// Skips resistance effects and protection enchantments
    pub fn is_unblockable(&self) -> bool {
        matches!(self, DamageCause::Starve)
    }

    /// Lands on the head, so a worn helmet softens it
    pub fn damages_helmet(&self) -> bool {
        matches!(self, DamageCause::FallingBlock)
    }

    /// Exhaustion charged to a player victim
    pub fn exhaustion(&self) -> f32 {
        if self.bypasses_armor() {
            0.0
        } else {
            DEFAULT_EXHAUSTION
        }
    }

    /// Status played on the victim for a fresh hit
    pub fn hurt_status(&self) -> EntityStatus {
        match self {
            DamageCause::Drown => EntityStatus::DrownHurt,
            DamageCause::SweetBerryBush => EntityStatus::SweetBerryBushHurt,
            DamageCause::Freeze => EntityStatus::FreezeHurt,
            _ if self.is_fire() => EntityStatus::BurnHurt,
            _ => EntityStatus::Hurt,
        }
    }

    pub fn hurt_sound(&self, victim_is_player: bool) -> SoundEvent {
        if !victim_is_player {
            return SoundEvent::EntityHurt;
        }
        match self {
            DamageCause::Drown => SoundEvent::PlayerHurtDrown,
            DamageCause::SweetBerryBush => SoundEvent::PlayerHurtSweetBerryBush,
            DamageCause::Freeze => SoundEvent::PlayerHurtFreeze,
            _ if self.is_fire() => SoundEvent::PlayerHurtOnFire,
            _ => SoundEvent::PlayerHurt,
        }
    }

    pub fn death_sound(&self, victim_is_player: bool) -> SoundEvent {
        if victim_is_player {
            SoundEvent::PlayerDeath
        } else {
            SoundEvent::EntityDeath
        }
    }

    /// Message id, as used in death messages and logs
    pub fn name(&self) -> &str {
        match self {
            DamageCause::MeleeAttack(_) => "player",
            DamageCause::Projectile(_) => "arrow",
            DamageCause::Fall => "fall",
            DamageCause::Fire => "onFire",
            DamageCause::OutOfWorld => "outOfWorld",
            DamageCause::Thorns(_) => "thorns",
            DamageCause::Drown => "drown",
            DamageCause::Freeze => "freeze",
            DamageCause::SweetBerryBush => "sweetBerryBush",
            DamageCause::Starve => "starve",
            DamageCause::Magic => "magic",
            DamageCause::FallingBlock => "fallingBlock",
            DamageCause::Generic(label) => label,
        }
    }
}

impl fmt::Display for DamageCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source() {
            Some(source) => write!(f, "{} ({})", self.name(), source),
            None => f.write_str(self.name()),
        }
    }
}
