//! Defense system - armor, resistance, shields, invulnerability, last stand

mod armour;
mod invulnerability;
mod knockback;
mod resistance;
mod shield;
mod totem;

pub use armour::{apply_armor, armor_reduction_percent, damage_after_armor, effective_armor};
pub use invulnerability::{InvulnerabilityState, InvulnerabilityTracker, MergeDecision};
pub use knockback::{knockback_direction, take_knockback};
pub use resistance::{apply_enchantments_and_resistance, damage_after_protection, damage_after_resistance_effect};
pub use shield::blocked_by_shield;
pub use totem::try_last_stand;
