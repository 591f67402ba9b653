//! Generator settings for lipcut
//!
//! Holds the machine-facing constants of the lip toolpath: the clearance
//! height used for approach and retract, the padding added past the end of
//! the lip, and the two feed rates. The defaults reproduce the canonical
//! output; a JSON or TOML file may override any subset of them.

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Height above the stock surface for approach and retract (mm)
pub const DEFAULT_CLEARANCE_HEIGHT: f64 = 50.0;
/// Distance travelled past the end of the lip on every pass (mm)
pub const DEFAULT_LENGTH_PADDING: f64 = 5.0;
/// Feed rate for cutting and traverse moves (mm/min)
pub const DEFAULT_FEED_RATE: f64 = 3000.0;
/// Feed rate for the initial approach and plunge (mm/min)
pub const DEFAULT_APPROACH_FEED_RATE: f64 = 300.0;

/// Settings consumed by the lip toolpath generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorSettings {
    /// Height above the stock surface for approach and retract (mm)
    pub clearance_height: f64,
    /// Padding added to the lip length to get the X stop (mm)
    pub length_padding: f64,
    /// Default feed rate (mm/min)
    pub feed_rate: f64,
    /// Feed rate of the approach moves (mm/min)
    pub approach_feed_rate: f64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            clearance_height: DEFAULT_CLEARANCE_HEIGHT,
            length_padding: DEFAULT_LENGTH_PADDING,
            feed_rate: DEFAULT_FEED_RATE,
            approach_feed_rate: DEFAULT_APPROACH_FEED_RATE,
        }
    }
}

impl GeneratorSettings {
    /// Create settings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let settings: Self = match Format::from_path(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        settings.validate()?;
        debug!(path = %path.display(), ?settings, "Loaded generator settings");
        Ok(settings)
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate settings
    pub fn validate(&self) -> SettingsResult<()> {
        let checks = [
            ("clearance_height", self.clearance_height, false),
            ("length_padding", self.length_padding, true),
            ("feed_rate", self.feed_rate, false),
            ("approach_feed_rate", self.approach_feed_rate, false),
        ];

        for (key, value, zero_allowed) in checks {
            let in_range = if zero_allowed {
                value >= 0.0
            } else {
                value > 0.0
            };
            if !value.is_finite() || !in_range {
                return Err(ConfigError::ValueOutOfRange {
                    key: key.to_string(),
                    value: value.to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = GeneratorSettings::default();
        assert_eq!(settings.clearance_height, 50.0);
        assert_eq!(settings.length_padding, 5.0);
        assert_eq!(settings.feed_rate, 3000.0);
        assert_eq!(settings.approach_feed_rate, 300.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = GeneratorSettings::new();
        settings.feed_rate = 0.0;
        match settings.validate() {
            Err(SettingsError::Config(ConfigError::ValueOutOfRange { key, .. })) => {
                assert_eq!(key, "feed_rate");
            }
            other => panic!("expected out of range error, got {:?}", other),
        }

        let mut settings = GeneratorSettings::new();
        settings.clearance_height = f64::NAN;
        assert!(settings.validate().is_err());

        let mut settings = GeneratorSettings::new();
        settings.length_padding = -1.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_padding_allowed() {
        let settings = GeneratorSettings {
            length_padding: 0.0,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: GeneratorSettings = toml::from_str("feed_rate = 1200.0").unwrap();
        assert_eq!(settings.feed_rate, 1200.0);
        assert_eq!(settings.clearance_height, DEFAULT_CLEARANCE_HEIGHT);
        assert_eq!(settings.approach_feed_rate, DEFAULT_APPROACH_FEED_RATE);
    }

    #[test]
    fn test_misspelled_key_is_rejected() {
        let result: Result<GeneratorSettings, _> = toml::from_str("feedrate = 1200.0");
        assert!(result.is_err());

        let result: Result<GeneratorSettings, _> =
            serde_json::from_str(r#"{"clearance": 20.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("a.json")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("a.toml")).unwrap(), Format::Toml);
        assert!(Format::from_path(Path::new("a.yaml")).is_err());
        assert!(Format::from_path(Path::new("noext")).is_err());
    }
}
