//! Solar return-on-investment calculation.
//!
//! Turns a validated [`RoiInput`] into a [`RoiResult`] with closed-form
//! formulas parameterised by an [`EngineConfig`].
//!
//! # Calculation Steps
//!
//! | Step | Quantity | Formula |
//! |------|----------|---------|
//! | 1    | Roof area | home size × usable roof fraction |
//! | 2    | Capacity | roof area × panel efficiency |
//! | 3    | Production | capacity × sun hours × performance ratio |
//! | 4    | Self-consumption | base ratio, or min(max, base + capacity / divisor × boost) with a battery |
//! | 5    | Savings | production × rate (× self-consumption when the battery model applies) |
//! | 6    | Total cost | base system cost + battery capacity × battery cost |
//! | 7    | Payback | total cost / savings, or 0 without savings |
//! | 8    | CO2 reduction | production × CO2 factor |
//!
//! Production, savings and CO2 are rounded half-up to whole units and payback
//! to two decimals. Payback is computed from the unrounded savings.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use roi_core::{EngineConfig, RoiInput, calculations::compute_roi};
//!
//! let input = RoiInput::new(dec!(400), dec!(150));
//! let result = compute_roi(&input, &EngineConfig::baseline());
//!
//! assert_eq!(result.annual_production_kwh, dec!(6075));
//! assert_eq!(result.annual_savings, dec!(1033));
//! assert_eq!(result.payback_years, dec!(14.52));
//! assert_eq!(result.co2_reduction_kg_per_year, dec!(2430));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{round_half_up, round_whole};
use crate::{EngineConfig, EngineConfigError, RoiInput, RoiResult};

/// Computes the ROI of `input` under `config`.
///
/// Total and free of side effects for any input that passed
/// [`RoiInput::validate`]. The configuration is used as given; call
/// [`EngineConfig::validate`] or build a [`RoiCalculator`] to check it first.
pub fn compute_roi(
    input: &RoiInput,
    config: &EngineConfig,
) -> RoiResult {
    RoiCalculator {
        config: config.clone(),
    }
    .calculate(input)
}

/// Calculator bound to one validated [`EngineConfig`].
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use roi_core::{EngineConfig, RoiInput, calculations::RoiCalculator};
///
/// let calculator = RoiCalculator::new(EngineConfig::current()).unwrap();
/// let input = RoiInput::new(dec!(400), dec!(150)).with_battery(dec!(10));
///
/// let result = calculator.calculate(&input);
///
/// assert_eq!(result.self_consumption_ratio, dec!(0.7));
/// assert_eq!(result.annual_savings, dec!(1573));
/// assert_eq!(result.total_system_cost, dec!(18500));
/// assert_eq!(result.payback_years, dec!(11.76));
/// ```
#[derive(Debug, Clone)]
pub struct RoiCalculator {
    config: EngineConfig,
}

impl RoiCalculator {
    /// Creates a calculator after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineConfigError`] if any configuration value is out of range.
    pub fn new(config: EngineConfig) -> Result<Self, EngineConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this calculator applies.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs every calculation step and returns the rounded result.
    pub fn calculate(
        &self,
        input: &RoiInput,
    ) -> RoiResult {
        // Step 1-3: physical yield
        let roof_area = self.roof_area(input.home_size_sqm);
        let capacity_kw = self.system_capacity(roof_area);
        let production = self.annual_production(capacity_kw, input.annual_sun_hours);

        // Step 4: on-site share of production
        let self_consumption = self.self_consumption_ratio(input);

        // Step 5-7: economics
        let savings = self.annual_savings(production, self_consumption);
        let total_cost = self.total_system_cost(input);
        let payback = self.payback_years(total_cost, savings);

        // Step 8: emissions
        let co2 = self.co2_reduction(production);

        let result = RoiResult {
            roof_area_sqm: roof_area,
            system_capacity_kw: capacity_kw,
            annual_production_kwh: round_whole(production),
            annual_savings: round_whole(savings),
            total_system_cost: total_cost,
            payback_years: round_half_up(payback, 2),
            co2_reduction_kg_per_year: round_whole(co2),
            self_consumption_ratio: self_consumption,
        };

        debug!(
            home_size_sqm = %input.home_size_sqm,
            annual_sun_hours = %input.annual_sun_hours,
            battery_kwh = %input.effective_battery_capacity(),
            production_kwh = %result.annual_production_kwh,
            savings = %result.annual_savings,
            payback_years = %result.payback_years,
            "ROI calculated"
        );

        result
    }

    fn roof_area(
        &self,
        home_size_sqm: Decimal,
    ) -> Decimal {
        home_size_sqm * self.config.usable_roof_fraction
    }

    fn system_capacity(
        &self,
        roof_area: Decimal,
    ) -> Decimal {
        roof_area * self.config.panel_efficiency
    }

    fn annual_production(
        &self,
        capacity_kw: Decimal,
        annual_sun_hours: Decimal,
    ) -> Decimal {
        capacity_kw * annual_sun_hours * self.config.performance_ratio
    }

    /// Whether the battery takes part in this calculation at all.
    fn battery_applies(
        &self,
        input: &RoiInput,
    ) -> bool {
        self.config.battery_logic && input.effective_battery_capacity() > Decimal::ZERO
    }

    /// Self-consumption rises linearly with battery capacity up to the ceiling.
    fn self_consumption_ratio(
        &self,
        input: &RoiInput,
    ) -> Decimal {
        let base = self.config.base_self_consumption_ratio;
        if !self.battery_applies(input) {
            return base;
        }

        let boost = input.effective_battery_capacity() / self.config.battery_boost_divisor
            * self.config.battery_boost_factor;
        (base + boost).min(self.config.max_self_consumption_ratio)
    }

    /// Without the battery model every produced kWh offsets the full rate.
    fn annual_savings(
        &self,
        production: Decimal,
        self_consumption: Decimal,
    ) -> Decimal {
        let gross = production * self.config.electricity_rate;
        if self.config.battery_logic {
            gross * self_consumption
        } else {
            gross
        }
    }

    fn total_system_cost(
        &self,
        input: &RoiInput,
    ) -> Decimal {
        let battery_cost = if self.battery_applies(input) {
            input.effective_battery_capacity() * self.config.battery_cost_per_kwh
        } else {
            Decimal::ZERO
        };
        self.config.base_system_cost + battery_cost
    }

    fn payback_years(
        &self,
        total_cost: Decimal,
        savings: Decimal,
    ) -> Decimal {
        if savings <= Decimal::ZERO {
            warn!(
                savings = %savings,
                total_cost = %total_cost,
                "No annual savings; payback period reported as 0"
            );
            return Decimal::ZERO;
        }
        total_cost / savings
    }

    fn co2_reduction(
        &self,
        production: Decimal,
    ) -> Decimal {
        production * self.config.co2_factor_kg_per_kwh
    }
}
