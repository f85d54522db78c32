//! pvp_core - Melee attack and damage resolution for tick-based games
//!
//! This library provides:
//! - CombatSystem: attack resolution (swing strength, criticals, knockback,
//!   fire aspect) and damage resolution (shields, invulnerability windows,
//!   armor, resistance, totems of undying)
//! - Capability traits the host world implements, plus MemoryWorld
//! - CombatHook: typed extension points that may veto or rewrite hits
//! - CombatConfig: TOML-loadable tunables

pub mod combat;
pub mod config;
pub mod cooldown;
pub mod damage;
pub mod defense;
pub mod error;
pub mod hooks;
pub mod prelude;
pub mod types;
pub mod world;

// Re-export core types for convenience
pub use combat::{AttackOutcome, AttackResolution, CombatSystem, DamageReport, IgnoreReason, RejectReason};
pub use config::{load_combat_config, CombatConfig, ConfigError};
pub use cooldown::{AttackCooldownTracker, ItemCooldowns};
pub use damage::{DamageCause, PendingDamage};
pub use error::{CombatError, Result};
pub use hooks::{BlockEvent, CombatHook, FinalDamageEvent, HookRegistry, TotemUseEvent};
pub use types::{ActiveStatusEffect, ActorId, EntityKind, EquipmentSlot, Hand, ItemStack, StatusEffectKind, Vec3};
pub use world::{CombatWorld, MemoryActor, MemoryWorld};
