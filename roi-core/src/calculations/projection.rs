//! Presentation-side quantities derived from a [`RoiResult`].
//!
//! None of these are stored in the result itself; display and export layers
//! compute them on demand.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_whole;
use crate::{EngineConfig, RoiInput, RoiResult};

/// Upper bound on the number of years charted.
pub const MAX_PROJECTION_YEARS: u32 = 10;

/// Cumulative savings at the end of a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsPoint {
    /// 1-based year since installation.
    pub year: u32,
    /// Savings accumulated by the end of `year`.
    pub cumulative: Decimal,
}

/// How the payback period compares with the alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaybackStatus {
    /// No savings, so the system never pays for itself.
    NoSavings,
    /// Pays back within the threshold.
    WithinThreshold,
    /// Pays back, but only after more years than the threshold.
    ExceedsThreshold,
}

impl PaybackStatus {
    /// Whether the user should be warned about this outcome.
    pub fn needs_warning(self) -> bool {
        !matches!(self, Self::WithinThreshold)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoSavings => "no_savings",
            Self::WithinThreshold => "within_threshold",
            Self::ExceedsThreshold => "exceeds_threshold",
        }
    }
}

/// Number of years to chart: one past the payback year, at most
/// [`MAX_PROJECTION_YEARS`].
fn projection_years(payback_years: Decimal) -> u32 {
    let past_payback = payback_years
        .ceil()
        .try_into()
        .map_or(MAX_PROJECTION_YEARS, |years: u32| years.saturating_add(1));
    past_payback.min(MAX_PROJECTION_YEARS)
}

/// Builds the cumulative savings series for the bar chart.
///
/// Covers years `1..=n` with `n = min(10, ceil(payback) + 1)`, so a zero
/// payback still yields a single bar.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use roi_core::{EngineConfig, RoiInput};
/// use roi_core::calculations::{compute_roi, cumulative_savings};
///
/// let input = RoiInput::new(dec!(400), dec!(150));
/// let result = compute_roi(&input, &EngineConfig::baseline());
/// let points = cumulative_savings(&result);
///
/// assert_eq!(points.len(), 10);
/// assert_eq!(points[2].cumulative, dec!(3099));
/// ```
pub fn cumulative_savings(result: &RoiResult) -> Vec<SavingsPoint> {
    (1..=projection_years(result.payback_years))
        .map(|year| SavingsPoint {
            year,
            cumulative: Decimal::from(year) * result.annual_savings,
        })
        .collect()
}

/// Extra yearly savings attributable to the battery, for display.
///
/// `annual_savings × (ratio - base) / ratio`, rounded to whole units. `None`
/// when the battery model does not apply or the ratio is zero.
pub fn boosted_savings(
    result: &RoiResult,
    input: &RoiInput,
    config: &EngineConfig,
) -> Option<Decimal> {
    let ratio = result.self_consumption_ratio;
    if !config.battery_logic || !input.battery_enabled || ratio.is_zero() {
        return None;
    }

    let boost = result.annual_savings * (ratio - config.base_self_consumption_ratio) / ratio;
    Some(round_whole(boost))
}

/// Classifies the payback period against `threshold_years`.
///
/// A zero payback together with zero savings is the "never pays back"
/// sentinel and maps to [`PaybackStatus::NoSavings`]. The threshold itself
/// still counts as within.
pub fn assess_payback(
    result: &RoiResult,
    threshold_years: Decimal,
) -> PaybackStatus {
    if result.payback_years.is_zero() && !result.has_savings() {
        PaybackStatus::NoSavings
    } else if result.payback_years > threshold_years {
        PaybackStatus::ExceedsThreshold
    } else {
        PaybackStatus::WithinThreshold
    }
}

/// Share of yearly consumption covered by production, for display.
///
/// `None` when the household reports no consumption.
pub fn consumption_coverage(
    result: &RoiResult,
    input: &RoiInput,
) -> Option<Decimal> {
    let yearly_consumption = input.monthly_consumption_kwh * Decimal::from(12);
    if yearly_consumption.is_zero() {
        return None;
    }
    Some(result.annual_production_kwh / yearly_consumption)
}
