//! Error types for combat resolution

use crate::types::{ActorId, EntityKind};
use thiserror::Error;

/// Result type alias using [`CombatError`]
pub type Result<T> = std::result::Result<T, CombatError>;

/// Failures that abort an attack before any state is touched
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CombatError {
    /// The attacker tried to hit something that can never be attacked.
    /// The attacker has already been disconnected when this is returned.
    #[error("{attacker} tried to attack invalid entity {target} ({kind:?})")]
    InvalidTarget {
        attacker: ActorId,
        target: ActorId,
        kind: EntityKind,
    },

    /// The acting actor does not exist in the world
    #[error("Unknown actor: {0}")]
    UnknownActor(ActorId),
}

/// Disconnect reason sent to an actor that attacked an invalid entity
pub const INVALID_ENTITY_ATTACKED: &str = "multiplayer.disconnect.invalid_entity_attacked";
