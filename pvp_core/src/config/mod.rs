//! Configuration loading from TOML files

mod constants;

pub use constants::{AttackConstants, CombatConfig, DamageConstants, TotemConstants};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load and validate a combat configuration file
pub fn load_combat_config(path: &Path) -> Result<CombatConfig, ConfigError> {
    let config: CombatConfig = load_toml(path)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: CombatConfig = parse_toml(
            r#"
            [totem]
            regeneration_ticks = 400
            "#,
        )
        .unwrap();

        assert_eq!(config.totem.regeneration_ticks, 400);
        assert_eq!(config.totem.absorption_ticks, 100);
        assert_eq!(config.damage, DamageConstants::default());
    }

    #[test]
    fn test_parse_error() {
        let result: Result<CombatConfig, ConfigError> = parse_toml("[attack\nmax_reach_squared = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_rejects_invalid_windows() {
        let path = std::env::temp_dir().join(format!("pvp_core_config_{}.toml", std::process::id()));
        fs::write(
            &path,
            "[damage]\ninvulnerability_ticks = 10\nmerge_threshold_ticks = 10\n",
        )
        .unwrap();

        let result = load_combat_config(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_combat_config(Path::new("/nonexistent/pvp_core/combat.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
