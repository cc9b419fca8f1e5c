//! Loading the picker baseline from TOML.
//!
//! ```toml
//! initial_color = "#80FF0000"   # AARRGGBB, or RRGGBB for opaque
//! transparency = true
//! ```
//!
//! Missing keys fall back to opaque red without transparency.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::color::ArgbColor;
use crate::state::InitialConfig;

/// Errors that can occur while loading picker configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid picker configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid color '{0}': expected AARRGGBB or RRGGBB hex")]
    InvalidColor(String),
}

fn color_from_hex<'de, D>(deserializer: D) -> Result<ArgbColor, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    ArgbColor::from_hex(&raw)
        .ok_or_else(|| serde::de::Error::custom(ConfigError::InvalidColor(raw)))
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawConfig {
    #[serde(deserialize_with = "color_from_hex")]
    initial_color: ArgbColor,
    transparency: bool,
}

impl Default for RawConfig {
    fn default() -> Self {
        let InitialConfig {
            initial_color,
            transparency,
        } = InitialConfig::default();
        Self {
            initial_color,
            transparency,
        }
    }
}

impl InitialConfig {
    /// Parse a baseline from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text)?;
        log::debug!(
            "loaded picker config: #{} transparency={}",
            raw.initial_color.to_hex(),
            raw.transparency
        );
        Ok(Self {
            initial_color: raw.initial_color,
            transparency: raw.transparency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = InitialConfig::from_toml_str("").unwrap();
        assert_eq!(config, InitialConfig::default());
        assert_eq!(config.initial_color.argb(), 0xFFFF_0000);
        assert!(!config.transparency);
    }

    #[test]
    fn reads_color_and_transparency() {
        let config = InitialConfig::from_toml_str(
            "initial_color = \"#8000FF00\"\ntransparency = true\n",
        )
        .unwrap();
        assert_eq!(config.initial_color.argb(), 0x8000_FF00);
        assert!(config.transparency);
    }

    #[test]
    fn six_digit_color_is_opaque() {
        let config = InitialConfig::from_toml_str("initial_color = \"336699\"").unwrap();
        assert_eq!(config.initial_color.argb(), 0xFF33_6699);
    }

    #[test]
    fn bad_color_is_rejected() {
        let err = InitialConfig::from_toml_str("initial_color = \"blue\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
        assert!(err.to_string().contains("blue"));
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(InitialConfig::from_toml_str("transparency = \"yes\"").is_err());
    }
}
