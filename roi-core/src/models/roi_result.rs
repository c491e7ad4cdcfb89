use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of one ROI calculation.
///
/// Produced once per successful calculation and never modified afterwards.
/// Production, savings and CO2 are rounded to whole units; payback to two
/// decimals. Intermediate values are kept unrounded for transparency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiResult {
    /// Roof area available for panels (m²).
    pub roof_area_sqm: Decimal,

    /// Installed nameplate capacity (kW).
    pub system_capacity_kw: Decimal,

    /// Estimated yearly energy yield (kWh).
    pub annual_production_kwh: Decimal,

    /// Estimated yearly savings on the electricity bill.
    pub annual_savings: Decimal,

    /// Panels plus battery, when a battery applies.
    pub total_system_cost: Decimal,

    /// Years until cumulative savings cover the system cost.
    ///
    /// Zero when there are no savings. That value is a sentinel for "never
    /// pays back", not "nothing to pay back"; see
    /// [`assess_payback`](crate::calculations::assess_payback).
    pub payback_years: Decimal,

    /// Emissions avoided per year (kg CO2).
    pub co2_reduction_kg_per_year: Decimal,

    /// Fraction of production consumed on-site.
    pub self_consumption_ratio: Decimal,
}

impl RoiResult {
    /// Whether the installation produces any savings at all.
    pub fn has_savings(&self) -> bool {
        self.annual_savings > Decimal::ZERO
    }
}
