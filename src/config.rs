//! JSON config loading
//!
//! A page may embed `{"tuning": {...}, "settings": {...}}`; any omitted field
//! keeps its default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::Settings;
use crate::tuning::Tuning;

/// Errors produced while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

/// Combined gameplay tuning and presentation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tuning: Tuning,
    pub settings: Settings,
}

impl GameConfig {
    /// Parse and validate a config document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.tuning.validate()?;
        Ok(config)
    }

    /// Parse a config document, falling back to defaults on any error
    ///
    /// A missing or blank document is not an error.
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        let Some(json) = json.filter(|j| !j.trim().is_empty()) else {
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(config) => {
                log::info!("Loaded game config");
                config
            }
            Err(e) => {
                log::warn!("Ignoring game config: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::QualityPreset;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config =
            GameConfig::from_json(r#"{"tuning": {"player_speed": 9.0}, "settings": {"quality": "High"}}"#)
                .unwrap();
        assert_eq!(config.tuning.player_speed, 9.0);
        assert_eq!(config.tuning.bullet_speed, 8.0);
        assert_eq!(config.settings.quality, QualityPreset::High);
        assert!(config.settings.particles);
    }

    #[test]
    fn test_malformed_json() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let err = GameConfig::from_json(r#"{"tuning": {"starting_lives": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_effects_that_never_expire_rejected() {
        let json = r#"{"tuning": {"particle_decay": 0.0, "bullet_speed": 0.0, "explosion_fade": 0.0, "explosion_growth": 0.0}}"#;
        assert!(matches!(
            GameConfig::from_json(json),
            Err(ConfigError::Invalid(_))
        ));
        let config = GameConfig::from_json_or_default(Some(json));
        assert_eq!(config.tuning, Tuning::default());
    }

    #[test]
    fn test_fallback_to_default() {
        let config = GameConfig::from_json_or_default(Some("[]"));
        assert_eq!(config.tuning, Tuning::default());
        let config = GameConfig::from_json_or_default(None);
        assert_eq!(config.tuning.starting_lives, 3);
        let config = GameConfig::from_json_or_default(Some("  \n"));
        assert_eq!(config.settings, Settings::default());
    }
}
