//! Text rendering and file export of a calculation outcome.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use roi_core::calculations::SavingsPoint;
use roi_core::calculations::common::round_half_up;
use roi_core::{EngineConfig, PaybackStatus};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;
use tracing::info;

use crate::state::CalculationOutcome;
use crate::themes::{Palette, ThemeMode};
use crate::utils::{group_thousands, percent_display};

/// Width of the longest bar, in characters.
pub const CHART_WIDTH: usize = 40;

const BAR: char = '█';
const PAID_BACK_MARKER: &str = "◀ paid back";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot write report \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write CSV report: {0}")]
    Csv(#[from] csv::Error),
}

/// Renders the headline figures and, when needed, the payback advisory.
///
/// With `ansi` the advisory uses the theme's warning color.
pub fn render_summary(
    outcome: &CalculationOutcome,
    config: &EngineConfig,
    theme: ThemeMode,
    ansi: bool,
) -> String {
    let r = &outcome.result;

    let payback = match outcome.payback_status {
        PaybackStatus::NoSavings => "never".to_string(),
        _ => format!("{} years", r.payback_years),
    };

    let mut lines = vec![
        format!("Roof area:            {} m²", round_half_up(r.roof_area_sqm, 1)),
        format!("System capacity:      {} kW", round_half_up(r.system_capacity_kw, 2)),
        format!(
            "Annual production:    {} kWh",
            group_thousands(r.annual_production_kwh)
        ),
        format!("Annual savings:       {}", group_thousands(r.annual_savings)),
        format!("Total system cost:    {}", group_thousands(r.total_system_cost)),
        format!("Payback period:       {payback}"),
        format!(
            "CO2 reduction:        {} kg/year",
            group_thousands(r.co2_reduction_kg_per_year)
        ),
        format!(
            "Self-consumption:     {}",
            percent_display(r.self_consumption_ratio)
        ),
        format!(
            "Consumption covered:  {}",
            outcome
                .consumption_coverage
                .map_or_else(|| "—".to_string(), percent_display)
        ),
    ];

    if let Some(boost) = outcome.boosted_savings {
        lines.push(format!("Battery boost:        {} / year", group_thousands(boost)));
    }

    if let Some(advisory) = payback_advisory(outcome, config) {
        lines.push(String::new());
        if ansi {
            lines.push(format!("{}{advisory}{}", theme.palette().warning, Palette::RESET));
        } else {
            lines.push(advisory);
        }
    }

    lines.join("\n")
}

fn payback_advisory(
    outcome: &CalculationOutcome,
    config: &EngineConfig,
) -> Option<String> {
    match outcome.payback_status {
        PaybackStatus::NoSavings => {
            Some("Warning: this system produces no savings and never pays back.".to_string())
        }
        PaybackStatus::ExceedsThreshold => Some(format!(
            "Warning: payback of {} years exceeds the {}-year alert threshold.",
            outcome.result.payback_years, config.high_payback_alert_years
        )),
        PaybackStatus::WithinThreshold => None,
    }
}

/// Renders cumulative savings as one horizontal bar per year.
///
/// Bars are scaled so the largest value spans [`CHART_WIDTH`]. Years whose
/// savings cover `total_system_cost` use the paid-back color, and the first
/// of them is marked. Without `ansi` the output is plain text.
pub fn render_chart(
    points: &[SavingsPoint],
    total_system_cost: Decimal,
    theme: ThemeMode,
    ansi: bool,
) -> String {
    let palette = theme.palette();
    let max = points
        .iter()
        .map(|p| p.cumulative)
        .max()
        .unwrap_or(Decimal::ZERO);
    let payback_year = points
        .iter()
        .find(|p| p.cumulative > Decimal::ZERO && p.cumulative >= total_system_cost)
        .map(|p| p.year);

    let mut lines = vec!["Cumulative savings".to_string()];
    for point in points {
        let paid_back = payback_year.is_some_and(|year| point.year >= year);
        let filled = BAR.to_string().repeat(bar_length(point.cumulative, max));
        let bar = format!("{filled:<CHART_WIDTH$}");
        let value = group_thousands(point.cumulative);
        let marker = if payback_year == Some(point.year) {
            format!(" {PAID_BACK_MARKER}")
        } else {
            String::new()
        };

        let line = if ansi {
            let color = if paid_back { palette.paid_back } else { palette.bar };
            format!(
                "{muted}Year {year:>2} │{reset}{color}{bar}{reset} {value}{color}{marker}{reset}",
                muted = palette.muted,
                year = point.year,
                reset = Palette::RESET,
            )
        } else {
            format!("Year {:>2} │{bar} {value}{marker}", point.year)
        };
        lines.push(line);
    }

    lines.join("\n")
}

fn bar_length(
    value: Decimal,
    max: Decimal,
) -> usize {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return 0;
    }
    let scaled = (value / max * Decimal::from(CHART_WIDTH)).round();
    scaled.to_usize().unwrap_or(0).min(CHART_WIDTH)
}

/// Writes the outcome to `path`.
///
/// A `.csv` extension produces `metric,value` rows; anything else gets the
/// text summary followed by the chart.
///
/// # Errors
///
/// Returns [`ReportError`] if the file cannot be created or written.
pub fn export_report(
    path: &Path,
    outcome: &CalculationOutcome,
    config: &EngineConfig,
) -> Result<(), ReportError> {
    let io_error = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let file = File::create(path).map_err(io_error)?;

    if is_csv {
        write_csv(file, outcome)?;
    } else {
        let mut writer = BufWriter::new(file);
        writeln!(
            writer,
            "Solar ROI report, generated {}\n\n{}\n\n{}",
            Local::now().format("%Y-%m-%d %H:%M"),
            render_summary(outcome, config, ThemeMode::default(), false),
            render_chart(
                &outcome.savings_by_year,
                outcome.result.total_system_cost,
                ThemeMode::default(),
                false,
            )
        )
        .and_then(|()| writer.flush())
        .map_err(io_error)?;
    }

    info!(
        path = %path.display(),
        format = if is_csv { "csv" } else { "text" },
        "Report exported"
    );
    Ok(())
}

fn write_csv<W: Write>(
    writer: W,
    outcome: &CalculationOutcome,
) -> Result<(), csv::Error> {
    let r = &outcome.result;
    let mut rows: Vec<(String, String)> = vec![
        ("monthly_consumption_kwh".into(), outcome.input.monthly_consumption_kwh.to_string()),
        ("home_size_sqm".into(), outcome.input.home_size_sqm.to_string()),
        ("annual_sun_hours".into(), outcome.input.annual_sun_hours.to_string()),
        (
            "battery_capacity_kwh".into(),
            outcome.input.effective_battery_capacity().to_string(),
        ),
        ("annual_production_kwh".into(), r.annual_production_kwh.to_string()),
        ("annual_savings".into(), r.annual_savings.to_string()),
        ("total_system_cost".into(), r.total_system_cost.to_string()),
        ("payback_years".into(), r.payback_years.to_string()),
        ("co2_reduction_kg_per_year".into(), r.co2_reduction_kg_per_year.to_string()),
        ("self_consumption_ratio".into(), r.self_consumption_ratio.to_string()),
        ("payback_status".into(), outcome.payback_status.as_str().to_string()),
    ];
    if let Some(boost) = outcome.boosted_savings {
        rows.push(("boosted_savings".into(), boost.to_string()));
    }
    rows.extend(outcome.savings_by_year.iter().map(|p| {
        (format!("cumulative_savings_year_{}", p.year), p.cumulative.to_string())
    }));

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["metric", "value"])?;
    for (metric, value) in &rows {
        csv_writer.write_record([metric.as_str(), value.as_str()])?;
    }
    csv_writer.flush()?;
    Ok(())
}
