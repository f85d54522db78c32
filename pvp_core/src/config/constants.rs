//! Tunable combat constants

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Every number the attack and damage pipelines read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatConfig {
    #[serde(default)]
    pub attack: AttackConstants,
    #[serde(default)]
    pub damage: DamageConstants,
    #[serde(default)]
    pub totem: TotemConstants,
}

impl CombatConfig {
    /// Reject values that would break pipeline invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attack.max_reach_squared <= 0.0 {
            return Err(ConfigError::ValidationError(
                "attack.max_reach_squared must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.attack.strong_swing_threshold) {
            return Err(ConfigError::ValidationError(
                "attack.strong_swing_threshold must be within [0, 1]".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.damage.helmet_factor) {
            return Err(ConfigError::ValidationError(
                "damage.helmet_factor must be within [0, 1]".to_string(),
            ));
        }
        if self.damage.merge_threshold_ticks >= self.damage.invulnerability_ticks {
            return Err(ConfigError::ValidationError(format!(
                "damage.merge_threshold_ticks ({}) must be below damage.invulnerability_ticks ({})",
                self.damage.merge_threshold_ticks, self.damage.invulnerability_ticks
            )));
        }
        if self.damage.jitter_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "damage.jitter_attempts must be at least 1".to_string(),
            ));
        }
        if self.totem.revival_health <= 0.0 {
            return Err(ConfigError::ValidationError(
                "totem.revival_health must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackConstants {
    /// Attacks at or beyond this squared distance are ignored
    pub max_reach_squared: f64,
    /// Offset added to the tick counter when sampling swing strength
    pub cooldown_base_offset: f32,
    /// Swing strength above which a swing counts as strong
    pub strong_swing_threshold: f32,
    pub critical_multiplier: f32,
    /// Knockback strength per knockback level
    pub knockback_per_level: f32,
    /// Horizontal velocity factor applied to an attacker that dealt knockback
    pub attacker_velocity_damping: f64,
    /// Upward velocity given to non-living targets that are knocked back
    pub object_knockback_lift: f64,
    /// Health delta above which damage-indicator particles are shown
    pub damage_indicator_threshold: f32,
    pub damage_indicator_ratio: f32,
    /// Burn time granted by a confirmed fire-aspect hit, per level
    pub fire_aspect_seconds_per_level: u32,
    /// Burn applied before the hit is confirmed, rolled back on rejection
    pub speculative_fire_ticks: u32,
    pub exhaustion: f32,
}

impl Default for AttackConstants {
    fn default() -> Self {
        AttackConstants {
            max_reach_squared: 36.0,
            cooldown_base_offset: 0.5,
            strong_swing_threshold: 0.9,
            critical_multiplier: 1.5,
            knockback_per_level: 0.5,
            attacker_velocity_damping: 0.6,
            object_knockback_lift: 0.1,
            damage_indicator_threshold: 2.0,
            damage_indicator_ratio: 0.5,
            fire_aspect_seconds_per_level: 4,
            speculative_fire_ticks: 20,
            exhaustion: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageConstants {
    /// Damage multiplier for head-hitting causes against a worn helmet
    pub helmet_factor: f32,
    /// Knockback dealt back to a melee attacker whose hit was shield-blocked
    pub shield_knockback: f32,
    /// Knockback dealt to a victim away from its attacker
    pub hurt_knockback: f32,
    /// Length of the invulnerability window opened by a fresh hit
    pub invulnerability_ticks: u32,
    /// Above this many remaining ticks, new hits merge into the current one
    pub merge_threshold_ticks: u32,
    /// Random retries when attacker and victim share a position
    pub jitter_attempts: u32,
}

impl Default for DamageConstants {
    fn default() -> Self {
        DamageConstants {
            helmet_factor: 0.75,
            shield_knockback: 0.5,
            hurt_knockback: 0.4,
            invulnerability_ticks: 20,
            merge_threshold_ticks: 10,
            jitter_attempts: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TotemConstants {
    pub revival_health: f32,
    pub regeneration_amplifier: u8,
    pub regeneration_ticks: u32,
    pub absorption_amplifier: u8,
    pub absorption_ticks: u32,
    pub fire_resistance_amplifier: u8,
    pub fire_resistance_ticks: u32,
}

impl Default for TotemConstants {
    fn default() -> Self {
        TotemConstants {
            revival_health: 1.0,
            regeneration_amplifier: 1,
            regeneration_ticks: 900,
            absorption_amplifier: 1,
            absorption_ticks: 100,
            fire_resistance_amplifier: 0,
            fire_resistance_ticks: 800,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = CombatConfig::default();
        assert!((config.attack.max_reach_squared - 36.0).abs() < f64::EPSILON);
        assert!((config.attack.critical_multiplier - 1.5).abs() < f32::EPSILON);
        assert_eq!(config.damage.invulnerability_ticks, 20);
        assert_eq!(config.damage.merge_threshold_ticks, 10);
        assert!((config.totem.revival_health - 1.0).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_constants() {
        let toml = r#"
[attack]
critical_multiplier = 2.0

[damage]
invulnerability_ticks = 30
"#;

        let config: CombatConfig = toml::from_str(toml).unwrap();
        assert!((config.attack.critical_multiplier - 2.0).abs() < f32::EPSILON);
        // Unspecified fields keep their defaults
        assert!((config.attack.exhaustion - 0.1).abs() < f32::EPSILON);
        assert_eq!(config.damage.invulnerability_ticks, 30);
        assert_eq!(config.damage.merge_threshold_ticks, 10);
        assert_eq!(config.totem.regeneration_ticks, 900);
    }

    #[test]
    fn test_validate_rejects_inverted_window() {
        let mut config = CombatConfig::default();
        config.damage.merge_threshold_ticks = 20;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("merge_threshold_ticks"));
    }

    #[test]
    fn test_validate_rejects_zero_jitter() {
        let mut config = CombatConfig::default();
        config.damage.jitter_attempts = 0;
        assert!(config.validate().is_err());
    }
}
