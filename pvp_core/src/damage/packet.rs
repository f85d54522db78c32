//! PendingDamage - a hit travelling through the mitigation stages

use super::cause::DamageCause;
use crate::types::ActorId;
use serde::{Deserialize, Serialize};

/// Raw damage waiting to be resolved against a victim
///
/// Every stage may lower `amount` or cancel the hit. Once resolution
/// finishes, an uncancelled packet carries the amount the caller subtracts
/// from the victim's health.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingDamage {
    pub victim: ActorId,
    pub cause: DamageCause,
    pub amount: f32,
    #[serde(default)]
    cancelled: bool,
}

impl PendingDamage {
    pub fn new(victim: ActorId, cause: DamageCause, amount: f32) -> Self {
        PendingDamage {
            victim,
            cause,
            amount,
            cancelled: false,
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Amount safe to subtract from health
    pub fn applicable_amount(&self) -> f32 {
        if self.cancelled {
            0.0
        } else {
            self.amount.max(0.0)
        }
    }
}
