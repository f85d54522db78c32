//! Prelude module for convenient imports
//!
//! ```rust
//! use pvp_core::prelude::*;
//! ```

// Core types
pub use crate::types::{
    ActiveStatusEffect, ActorId, Enchantment, EntityGroup, EntityKind, EquipmentSlot, GameMode, Hand, ItemStack,
    StatusEffectKind, Vec3,
};

// Pipeline
pub use crate::combat::{AttackOutcome, AttackResolution, CombatSystem, DamageReport, RejectReason};
pub use crate::damage::{DamageCause, PendingDamage};
pub use crate::hooks::{BlockEvent, CombatHook, FinalDamageEvent, TotemUseEvent};

// World capabilities
pub use crate::world::{
    AttackStats, CombatState, CombatWorld, Enchantments, Equipment, MemoryActor, MemoryWorld, Notifier,
};

// Config
pub use crate::config::CombatConfig;
