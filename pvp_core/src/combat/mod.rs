//! Combat resolution - attack intents and incoming damage

mod attack;
mod resolution;
mod result;
mod system;

pub use result::{AttackOutcome, AttackResolution, DamageReport, IgnoreReason, RejectReason};
pub use system::CombatSystem;
