use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sun hours assumed when the user leaves the field blank.
pub const DEFAULT_ANNUAL_SUN_HOURS: Decimal = dec!(1200);

/// Accepted range of monthly consumption, in kWh.
pub const MONTHLY_CONSUMPTION_RANGE: (Decimal, Decimal) = (dec!(0), dec!(2000));

/// Accepted range of home size, in m².
pub const HOME_SIZE_RANGE: (Decimal, Decimal) = (dec!(50), dec!(500));

/// Accepted range of annual sun hours; a year has 8760 hours.
pub const SUN_HOURS_RANGE: (Decimal, Decimal) = (dec!(0), dec!(8760));

/// Accepted range of battery capacity when a battery is enabled, in kWh.
pub const BATTERY_CAPACITY_RANGE: (Decimal, Decimal) = (dec!(1), dec!(20));

/// A single violated input constraint.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("monthly consumption must be between {min} and {max} kWh, got {value}")]
    MonthlyConsumptionOutOfRange {
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error("home size must be between {min} and {max} m², got {value}")]
    HomeSizeOutOfRange {
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error("annual sun hours must be between {min} and {max}, got {value}")]
    SunHoursOutOfRange {
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error("battery capacity must be between {min} and {max} kWh, got {value}")]
    BatteryCapacityOutOfRange {
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },
}

/// Household values entered by the user for one calculation.
///
/// Built fresh per request by the form layer (or the scenario loader) and
/// validated with [`RoiInput::validate`] before it reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiInput {
    /// Average monthly electricity consumption (kWh).
    pub monthly_consumption_kwh: Decimal,

    /// Home footprint (m²).
    pub home_size_sqm: Decimal,

    /// Yearly hours of full sun.
    pub annual_sun_hours: Decimal,

    /// Whether a home battery is part of the installation.
    pub battery_enabled: bool,

    /// Battery storage capacity (kWh). Ignored unless `battery_enabled`.
    pub battery_capacity_kwh: Decimal,
}

impl RoiInput {
    /// Creates an input without a battery, using the default sun hours.
    pub fn new(
        monthly_consumption_kwh: Decimal,
        home_size_sqm: Decimal,
    ) -> Self {
        Self {
            monthly_consumption_kwh,
            home_size_sqm,
            annual_sun_hours: DEFAULT_ANNUAL_SUN_HOURS,
            battery_enabled: false,
            battery_capacity_kwh: Decimal::ZERO,
        }
    }

    /// Replaces the sun-hour assumption.
    pub fn with_sun_hours(
        mut self,
        annual_sun_hours: Decimal,
    ) -> Self {
        self.annual_sun_hours = annual_sun_hours;
        self
    }

    /// Enables a battery of the given capacity.
    pub fn with_battery(
        mut self,
        capacity_kwh: Decimal,
    ) -> Self {
        self.battery_enabled = true;
        self.battery_capacity_kwh = capacity_kwh;
        self
    }

    /// Battery capacity that takes part in the calculation: zero when the
    /// battery is disabled, whatever the capacity field holds.
    pub fn effective_battery_capacity(&self) -> Decimal {
        if self.battery_enabled {
            self.battery_capacity_kwh
        } else {
            Decimal::ZERO
        }
    }

    /// Checks every field against its accepted range.
    ///
    /// All violations are collected so a form can flag each field at once.
    pub fn validate(&self) -> Result<(), Vec<InputError>> {
        let mut errors = Vec::new();

        let (min, max) = MONTHLY_CONSUMPTION_RANGE;
        if self.monthly_consumption_kwh < min || self.monthly_consumption_kwh > max {
            errors.push(InputError::MonthlyConsumptionOutOfRange {
                value: self.monthly_consumption_kwh,
                min,
                max,
            });
        }

        let (min, max) = HOME_SIZE_RANGE;
        if self.home_size_sqm < min || self.home_size_sqm > max {
            errors.push(InputError::HomeSizeOutOfRange {
                value: self.home_size_sqm,
                min,
                max,
            });
        }

        let (min, max) = SUN_HOURS_RANGE;
        if self.annual_sun_hours < min || self.annual_sun_hours > max {
            errors.push(InputError::SunHoursOutOfRange {
                value: self.annual_sun_hours,
                min,
                max,
            });
        }

        let (min, max) = BATTERY_CAPACITY_RANGE;
        if self.battery_enabled
            && (self.battery_capacity_kwh < min || self.battery_capacity_kwh > max)
        {
            errors.push(InputError::BatteryCapacityOutOfRange {
                value: self.battery_capacity_kwh,
                min,
                max,
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
