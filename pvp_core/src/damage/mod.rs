//! Damage taxonomy - causes and in-flight damage

mod cause;
mod packet;

pub use cause::DamageCause;
pub use packet::PendingDamage;
