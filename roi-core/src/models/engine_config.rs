use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when an [`EngineConfig`] holds values outside their valid range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineConfigError {
    /// A fraction or ratio must lie in [0, 1].
    #[error("{field} must be between 0 and 1, got {value}")]
    FractionOutOfRange { field: &'static str, value: Decimal },

    /// Rates, costs and emission factors cannot be negative.
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: Decimal },

    /// The battery boost curve divides by this value.
    #[error("battery boost divisor must be positive, got {0}")]
    InvalidBoostDivisor(Decimal),

    /// The base self-consumption ratio cannot exceed its own ceiling.
    #[error("base self-consumption ratio {base} exceeds maximum {max}")]
    BaseRatioAboveMax { base: Decimal, max: Decimal },

    /// The payback alert threshold must be a positive number of years.
    #[error("high payback alert threshold must be positive, got {0}")]
    InvalidAlertThreshold(Decimal),

    /// The requested profile name is not one of [`EngineConfig::PROFILES`].
    #[error("unknown profile \"{name}\", available: {available}")]
    UnknownProfile { name: String, available: String },
}

/// Named constants driving the ROI calculation.
///
/// Two deployments of the estimator exist with different tariffs, system
/// costs and alert thresholds. Each is available as a complete profile
/// ([`EngineConfig::baseline`], [`EngineConfig::current`]); pick one by name
/// with [`EngineConfig::from_profile`] rather than mixing their values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Fraction of the home footprint usable for panels.
    pub usable_roof_fraction: Decimal,

    /// Panel conversion efficiency, expressed as kW of capacity per m².
    pub panel_efficiency: Decimal,

    /// Derating for wiring, temperature and inverter losses.
    pub performance_ratio: Decimal,

    /// Price of grid electricity per kWh.
    pub electricity_rate: Decimal,

    /// Installed cost of the reference system, before any battery.
    pub base_system_cost: Decimal,

    /// Battery cost per kWh of storage capacity.
    pub battery_cost_per_kwh: Decimal,

    /// Grid emissions avoided per kWh produced.
    pub co2_factor_kg_per_kwh: Decimal,

    /// Fraction of production consumed on-site without a battery.
    pub base_self_consumption_ratio: Decimal,

    /// Weight of the battery boost on the self-consumption ratio.
    pub battery_boost_factor: Decimal,

    /// Battery capacity (kWh) giving the full boost factor.
    pub battery_boost_divisor: Decimal,

    /// Ceiling of the self-consumption ratio.
    pub max_self_consumption_ratio: Decimal,

    /// Payback period above which callers warn the user.
    pub high_payback_alert_years: Decimal,

    /// Whether this deployment models self-consumption and batteries.
    ///
    /// When `false`, every produced kWh is valued at the full electricity
    /// rate and battery inputs are ignored.
    pub battery_logic: bool,
}

impl EngineConfig {
    /// Available profile names.
    pub const PROFILES: &[&str] = &["baseline", "current"];

    /// The original deployment: full system cost, older tariff, no battery model.
    pub fn baseline() -> Self {
        Self {
            usable_roof_fraction: dec!(0.30),
            panel_efficiency: dec!(0.15),
            performance_ratio: dec!(0.75),
            electricity_rate: dec!(0.17),
            base_system_cost: dec!(15000),
            battery_cost_per_kwh: dec!(800),
            co2_factor_kg_per_kwh: dec!(0.4),
            base_self_consumption_ratio: dec!(0.5),
            battery_boost_factor: dec!(0.4),
            battery_boost_divisor: dec!(20),
            max_self_consumption_ratio: dec!(0.9),
            high_payback_alert_years: dec!(20),
            battery_logic: false,
        }
    }

    /// The current deployment: subsidized system cost, current tariff and
    /// battery-aware self-consumption.
    pub fn current() -> Self {
        Self {
            electricity_rate: dec!(0.37),
            base_system_cost: dec!(10500),
            high_payback_alert_years: dec!(12),
            battery_logic: true,
            ..Self::baseline()
        }
    }

    /// Looks up a profile by name.
    ///
    /// # Errors
    ///
    /// Returns [`EngineConfigError::UnknownProfile`] if `name` is not one of
    /// [`EngineConfig::PROFILES`].
    pub fn from_profile(name: &str) -> Result<Self, EngineConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "current" => Ok(Self::current()),
            _ => Err(EngineConfigError::UnknownProfile {
                name: name.to_string(),
                available: Self::PROFILES.join(", "),
            }),
        }
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns the first [`EngineConfigError`] found, checking fractions
    /// first, then monetary and emission values, then the boost curve.
    pub fn validate(&self) -> Result<(), EngineConfigError> {
        let fractions = [
            ("usable roof fraction", self.usable_roof_fraction),
            ("panel efficiency", self.panel_efficiency),
            ("performance ratio", self.performance_ratio),
            ("base self-consumption ratio", self.base_self_consumption_ratio),
            ("battery boost factor", self.battery_boost_factor),
            ("max self-consumption ratio", self.max_self_consumption_ratio),
        ];
        for (field, value) in fractions {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(EngineConfigError::FractionOutOfRange { field, value });
            }
        }

        let non_negative = [
            ("electricity rate", self.electricity_rate),
            ("base system cost", self.base_system_cost),
            ("battery cost per kWh", self.battery_cost_per_kwh),
            ("CO2 factor", self.co2_factor_kg_per_kwh),
        ];
        for (field, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(EngineConfigError::Negative { field, value });
            }
        }

        if self.battery_boost_divisor <= Decimal::ZERO {
            return Err(EngineConfigError::InvalidBoostDivisor(
                self.battery_boost_divisor,
            ));
        }
        if self.base_self_consumption_ratio > self.max_self_consumption_ratio {
            return Err(EngineConfigError::BaseRatioAboveMax {
                base: self.base_self_consumption_ratio,
                max: self.max_self_consumption_ratio,
            });
        }
        if self.high_payback_alert_years <= Decimal::ZERO {
            return Err(EngineConfigError::InvalidAlertThreshold(
                self.high_payback_alert_years,
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::current()
    }
}
