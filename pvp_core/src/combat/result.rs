//! Combat results - what an attack or a hit ended up doing

use crate::damage::DamageCause;
use crate::types::ActorId;
use crate::world::{EntityStatus, SoundEvent};
use serde::{Deserialize, Serialize};

/// Why damage resolution stopped without touching health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The damage was cancelled before it reached the pipeline
    CancelledUpstream,
    /// The victim does not exist or is not a living entity
    NotLiving,
    VictimDead,
    /// Creative and spectator players only take out-of-world damage
    Invulnerable,
    /// Fire damage against a fire resistant victim
    FireImmune,
    /// A raised shield took the hit
    Shielded,
    /// Not stronger than the strongest hit of the current window
    AbsorbedByInvulnerability,
    /// A final damage hook cancelled the hit
    Vetoed,
    /// Mitigated down to nothing
    NoDamage,
    /// Lethal hit cheated by a totem of undying
    TotemOfUndying,
}

/// Outcome of resolving one [`crate::damage::PendingDamage`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageReport {
    pub victim: ActorId,
    pub cause: DamageCause,
    /// Amount as submitted
    pub raw_amount: f32,
    /// Amount after every mitigation stage and hook
    pub final_amount: f32,
    pub rejection: Option<RejectReason>,

    // === Stages ===
    pub shielded: bool,
    /// Stacked onto an earlier hit of the same window
    pub merged: bool,
    /// First hit of a new window; only these play hurt cosmetics
    pub fresh_hit: bool,
    pub totem_used: bool,
    pub killing_blow: bool,

    // === Cosmetics ===
    pub status: Option<EntityStatus>,
    pub sound: Option<SoundEvent>,

    // === State Changes ===
    pub health_before: f32,
    pub health_after: f32,
}

impl DamageReport {
    pub fn new(victim: ActorId, cause: DamageCause, raw_amount: f32) -> Self {
        DamageReport {
            victim,
            cause,
            raw_amount,
            final_amount: 0.0,
            rejection: None,
            shielded: false,
            merged: false,
            fresh_hit: false,
            totem_used: false,
            killing_blow: false,
            status: None,
            sound: None,
            health_before: 0.0,
            health_after: 0.0,
        }
    }

    pub(crate) fn rejected(mut self, reason: RejectReason) -> Self {
        self.rejection = Some(reason);
        self.final_amount = 0.0;
        self
    }

    /// Whether the hit went through to the victim
    pub fn applied(&self) -> bool {
        self.rejection.is_none()
    }

    /// Health actually lost, including absorption
    pub fn health_lost(&self) -> f32 {
        self.health_before - self.health_after
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        if let Some(reason) = self.rejection {
            return match reason {
                RejectReason::Shielded => "Blocked by shield".to_string(),
                RejectReason::TotemOfUndying => "Saved by totem of undying".to_string(),
                RejectReason::AbsorbedByInvulnerability => "Absorbed by invulnerability".to_string(),
                other => format!("No damage ({other:?})"),
            };
        }

        let mut parts = vec![format!("{:.1} {} damage", self.final_amount, self.cause)];
        let mitigated = self.raw_amount - self.final_amount;
        if mitigated > 0.0 {
            parts.push(format!("{mitigated:.1} mitigated"));
        }
        if self.merged {
            parts.push("merged".to_string());
        }
        if self.killing_blow {
            parts.push("FATAL".to_string());
        }
        parts.join(", ")
    }
}

/// Why an attack intent was dropped without any effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    TargetMissing,
    AttackerDead,
    OutOfReach,
}

/// Numbers and flags of one resolved swing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub attacker: ActorId,
    pub target: ActorId,
    /// Swing strength in `[0, 1]`
    pub strength: f32,
    /// Damage submitted to damage resolution
    pub final_damage: f32,
    pub enchanted_bonus: f32,
    pub critical: bool,
    pub strong_swing: bool,
    pub knockback_level: u32,
    pub sprint_bonus: bool,
    pub fire_aspect_pending: bool,
    /// Extra damage reported by sweep hooks; never applied
    pub sweep_damage: f32,
    /// Whether damage resolution accepted the hit
    pub landed: bool,
    /// Health the target lost, for living targets
    pub health_delta: f32,
}

impl AttackOutcome {
    pub fn summary(&self) -> String {
        if !self.landed {
            return format!("{} missed {}", self.attacker, self.target);
        }

        let mut parts = vec![format!(
            "{} hit {} for {:.1} ({:.0}%)",
            self.attacker,
            self.target,
            self.final_damage,
            self.strength * 100.0
        )];
        if self.critical {
            parts.push("critical".to_string());
        }
        if self.knockback_level > 0 {
            parts.push(format!("knockback {}", self.knockback_level));
        }
        parts.join(", ")
    }
}

/// Result of an attack intent that was not a protocol violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackResolution {
    Ignored(IgnoreReason),
    /// A spectating attacker started following the target instead
    Spectated,
    Resolved(AttackOutcome),
}

impl AttackResolution {
    pub fn outcome(&self) -> Option<&AttackOutcome> {
        match self {
            AttackResolution::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Whether damage resolution accepted the swing
    pub fn landed(&self) -> bool {
        self.outcome().is_some_and(|o| o.landed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_applied() {
        let report = DamageReport::new(ActorId(1), DamageCause::Fall, 4.0);
        assert!(report.applied());

        let report = report.rejected(RejectReason::Vetoed);
        assert!(!report.applied());
        assert!(report.final_amount.abs() < f32::EPSILON);
    }

    #[test]
    fn test_report_summary() {
        let mut report = DamageReport::new(ActorId(1), DamageCause::MeleeAttack(ActorId(2)), 10.0);
        report.final_amount = 8.0;
        report.killing_blow = true;
        let summary = report.summary();
        assert!(summary.contains("8.0"));
        assert!(summary.contains("2.0 mitigated"));
        assert!(summary.contains("FATAL"));

        let shielded = DamageReport::new(ActorId(1), DamageCause::Fall, 3.0).rejected(RejectReason::Shielded);
        assert_eq!(shielded.summary(), "Blocked by shield");
    }

    #[test]
    fn test_resolution_outcome() {
        assert!(!AttackResolution::Spectated.landed());
        assert!(AttackResolution::Ignored(IgnoreReason::OutOfReach).outcome().is_none());
    }
}
