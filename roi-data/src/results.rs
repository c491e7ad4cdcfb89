//! Batch evaluation of scenarios and CSV output of their results.

use std::io::Write;

use roi_core::calculations::assess_payback;
use roi_core::{PaybackStatus, RoiCalculator, RoiResult};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::Scenario;

/// A scenario together with its calculated result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: RoiResult,
    pub payback_status: PaybackStatus,
}

/// Calculates every scenario with the same calculator, in order.
pub fn run_scenarios(
    calculator: &RoiCalculator,
    scenarios: &[Scenario],
) -> Vec<ScenarioOutcome> {
    let threshold = calculator.config().high_payback_alert_years;

    let outcomes: Vec<ScenarioOutcome> = scenarios
        .iter()
        .map(|scenario| {
            let result = calculator.calculate(&scenario.input);
            let payback_status = assess_payback(&result, threshold);
            if payback_status.needs_warning() {
                warn!(
                    scenario = %scenario.name,
                    payback_years = %result.payback_years,
                    status = payback_status.as_str(),
                    "Scenario payback needs attention"
                );
            }
            ScenarioOutcome {
                name: scenario.name.clone(),
                result,
                payback_status,
            }
        })
        .collect();

    info!(count = outcomes.len(), "Scenarios calculated");
    outcomes
}

/// Output header; must follow the field order of [`ResultRow`].
const RESULT_COLUMNS: [&str; 8] = [
    "name",
    "annual_production_kwh",
    "annual_savings",
    "total_system_cost",
    "payback_years",
    "co2_reduction_kg_per_year",
    "self_consumption_ratio",
    "payback_status",
];

/// One output row; field order is the column order.
#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    name: &'a str,
    annual_production_kwh: Decimal,
    annual_savings: Decimal,
    total_system_cost: Decimal,
    payback_years: Decimal,
    co2_reduction_kg_per_year: Decimal,
    self_consumption_ratio: Decimal,
    payback_status: &'static str,
}

impl<'a> From<&'a ScenarioOutcome> for ResultRow<'a> {
    fn from(outcome: &'a ScenarioOutcome) -> Self {
        let r = &outcome.result;
        Self {
            name: &outcome.name,
            annual_production_kwh: r.annual_production_kwh,
            annual_savings: r.annual_savings,
            total_system_cost: r.total_system_cost,
            payback_years: r.payback_years,
            co2_reduction_kg_per_year: r.co2_reduction_kg_per_year,
            self_consumption_ratio: r.self_consumption_ratio,
            payback_status: outcome.payback_status.as_str(),
        }
    }
}

/// Writes outcomes as CSV with a header row, even when there are none.
///
/// # Errors
///
/// Returns a [`csv::Error`] if serialisation or the underlying write fails.
pub fn write_results<W: Write>(
    writer: W,
    outcomes: &[ScenarioOutcome],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(RESULT_COLUMNS)?;
    for outcome in outcomes {
        csv_writer.serialize(ResultRow::from(outcome))?;
    }
    csv_writer.flush()?;
    Ok(())
}
