//! TOML application configuration.
//!
//! ```toml
//! profile = "current"
//! theme = "dark"
//!
//! [engine]
//! electricity_rate = 0.35
//! base_system_cost = 11000
//! ```
//!
//! Every key is optional. `[engine]` entries override the matching field of
//! the selected profile.

use std::fs;
use std::path::Path;

use roi_core::EngineConfig;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::themes::ThemeMode;

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"engine.electricity_rate"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

/// Top-level application configuration parsed from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Deployment profile name, one of [`EngineConfig::PROFILES`].
    pub profile: Option<String>,
    /// Appearance; the platform preference applies when absent.
    pub theme: Option<ThemeMode>,
    /// Per-field overrides of the selected profile.
    #[serde(default)]
    pub engine: EngineOverrides,
}

/// Optional replacements for [`EngineConfig`] fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineOverrides {
    pub usable_roof_fraction: Option<Decimal>,
    pub panel_efficiency: Option<Decimal>,
    pub performance_ratio: Option<Decimal>,
    pub electricity_rate: Option<Decimal>,
    pub base_system_cost: Option<Decimal>,
    pub battery_cost_per_kwh: Option<Decimal>,
    pub co2_factor_kg_per_kwh: Option<Decimal>,
    pub base_self_consumption_ratio: Option<Decimal>,
    pub battery_boost_factor: Option<Decimal>,
    pub battery_boost_divisor: Option<Decimal>,
    pub max_self_consumption_ratio: Option<Decimal>,
    pub high_payback_alert_years: Option<Decimal>,
    pub battery_logic: Option<bool>,
}

impl EngineOverrides {
    /// Returns `config` with every present override applied.
    pub fn apply(
        &self,
        config: EngineConfig,
    ) -> EngineConfig {
        EngineConfig {
            usable_roof_fraction: self.usable_roof_fraction.unwrap_or(config.usable_roof_fraction),
            panel_efficiency: self.panel_efficiency.unwrap_or(config.panel_efficiency),
            performance_ratio: self.performance_ratio.unwrap_or(config.performance_ratio),
            electricity_rate: self.electricity_rate.unwrap_or(config.electricity_rate),
            base_system_cost: self.base_system_cost.unwrap_or(config.base_system_cost),
            battery_cost_per_kwh: self.battery_cost_per_kwh.unwrap_or(config.battery_cost_per_kwh),
            co2_factor_kg_per_kwh: self
                .co2_factor_kg_per_kwh
                .unwrap_or(config.co2_factor_kg_per_kwh),
            base_self_consumption_ratio: self
                .base_self_consumption_ratio
                .unwrap_or(config.base_self_consumption_ratio),
            battery_boost_factor: self.battery_boost_factor.unwrap_or(config.battery_boost_factor),
            battery_boost_divisor: self
                .battery_boost_divisor
                .unwrap_or(config.battery_boost_divisor),
            max_self_consumption_ratio: self
                .max_self_consumption_ratio
                .unwrap_or(config.max_self_consumption_ratio),
            high_payback_alert_years: self
                .high_payback_alert_years
                .unwrap_or(config.high_payback_alert_years),
            battery_logic: self.battery_logic.unwrap_or(config.battery_logic),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl AppConfig {
    /// Parses the configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses the configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert!(config.engine.is_empty());
    }

    #[test]
    fn parses_profile_theme_and_overrides() {
        let toml = r#"
profile = "baseline"
theme = "dark"

[engine]
electricity_rate = 0.35
base_system_cost = 11000
battery_logic = true
"#;

        let config = AppConfig::from_toml_str(toml).unwrap();

        assert_eq!(config.profile.as_deref(), Some("baseline"));
        assert_eq!(config.theme, Some(ThemeMode::Dark));
        assert_eq!(config.engine.electricity_rate, Some(dec!(0.35)));
        assert_eq!(config.engine.base_system_cost, Some(dec!(11000)));
        assert_eq!(config.engine.battery_logic, Some(true));
        assert_eq!(config.engine.panel_efficiency, None);
    }

    #[test]
    fn overrides_replace_only_present_fields() {
        let overrides = EngineOverrides {
            electricity_rate: Some(dec!(0.30)),
            high_payback_alert_years: Some(dec!(15)),
            ..EngineOverrides::default()
        };

        let config = overrides.apply(EngineConfig::current());

        assert_eq!(
            config,
            EngineConfig {
                electricity_rate: dec!(0.30),
                high_payback_alert_years: dec!(15),
                ..EngineConfig::current()
            }
        );
    }

    #[test]
    fn unknown_top_level_key_is_rejected() {
        let error = AppConfig::from_toml_str("colour = \"blue\"").unwrap_err();

        assert_eq!(error.field, "toml");
        assert!(error.message.contains("colour"));
    }

    #[test]
    fn unknown_engine_key_is_rejected() {
        let error = AppConfig::from_toml_str("[engine]\npanel_count = 12").unwrap_err();

        assert!(error.message.contains("panel_count"));
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let result = AppConfig::from_toml_str("theme = \"sepia\"");

        assert!(result.is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let error = AppConfig::from_toml_file(Path::new("no/such/solar-roi.toml")).unwrap_err();

        assert_eq!(error.field, "config");
        assert!(error.message.contains("no/such/solar-roi.toml"));
    }
}
