use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use rust_decimal::Decimal;
use tracing::{debug, info};

use roi_app::config::AppConfig;
use roi_app::models::RoiForm;
use roi_app::report::{render_chart, render_summary};
use roi_app::state::AppState;
use roi_app::themes::ThemeMode;
use roi_app::{app, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Solar panel return-on-investment estimator.
///
/// Estimates yearly production, savings, payback period and CO2 reduction
/// for a home installation and charts cumulative savings.
#[derive(Debug, Parser)]
#[command(name = "solar-roi", version)]
struct Cli {
    /// Average monthly electricity consumption (kWh, 0-2000).
    #[arg(long)]
    monthly_consumption: String,

    /// Home footprint (m², 50-500).
    #[arg(long)]
    home_size: String,

    /// Annual sun hours; defaults to 1200, or a latitude-based suggestion.
    #[arg(long)]
    sun_hours: Option<String>,

    /// Latitude in degrees, used to suggest sun hours when none are given.
    #[arg(long, allow_negative_numbers = true)]
    latitude: Option<Decimal>,

    /// Battery storage capacity (kWh, 1-20). Omit for no battery.
    #[arg(long)]
    battery_capacity: Option<String>,

    /// Engine profile: "baseline" or "current".
    #[arg(long)]
    profile: Option<String>,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Color theme for the chart: "light" or "dark".
    #[arg(long)]
    theme: Option<ThemeMode>,

    /// Write the report to this file (CSV when the extension is .csv).
    #[arg(long)]
    export: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "roi_core=trace".
    #[arg(long)]
    log_level: Option<String>,

    /// Append log records to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Suppress log output on stderr.
    #[arg(long)]
    quiet: bool,
}

impl Cli {
    fn to_form(&self) -> RoiForm {
        RoiForm {
            monthly_consumption: self.monthly_consumption.clone(),
            home_size: self.home_size.clone(),
            sun_hours: self.sun_hours.clone().unwrap_or_default(),
            battery_enabled: self.battery_capacity.is_some(),
            battery_capacity: self.battery_capacity.clone().unwrap_or_default(),
        }
    }
}

// ─── logging ─────────────────────────────────────────────────────────────────

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    logging::init_logging();
    if let Some(level) = &cli.log_level {
        logging::set_log_level(level)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }
    if cli.quiet {
        logging::set_console_enabled(false)?;
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let app_config = match &cli.config {
        Some(path) => AppConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };
    let engine_config = app::resolve_engine_config(&app_config, cli.profile.as_deref())
        .context("invalid engine configuration")?;

    let mut state = cli
        .theme
        .or(app_config.theme)
        .map_or_else(AppState::from_platform, AppState::new);
    let theme = state.theme;

    let mut form = cli.to_form();
    if let Some(latitude) = cli.latitude {
        let suggested = form
            .apply_location(latitude)
            .context("cannot suggest sun hours")?;
        info!(%latitude, %suggested, "Sun hours suggested from location");
    }
    debug!("Form:\n{form}");

    let outcome = match app::calculate(&mut state, &form, &engine_config) {
        Ok(outcome) => outcome,
        Err(errors) => {
            for error in &errors {
                eprintln!("{error}");
            }
            bail!("{} invalid field(s)", errors.len());
        }
    };

    let ansi = io::stdout().is_terminal();
    println!("{}", render_summary(outcome, &engine_config, theme, ansi));
    println!();
    println!(
        "{}",
        render_chart(
            &outcome.savings_by_year,
            outcome.result.total_system_cost,
            theme,
            ansi,
        )
    );

    // Printed outside the log filter; --quiet silences logs only.
    if let Some(path) = &cli.export {
        if let Some(advisory) = app::export_outcome(path, outcome, &engine_config) {
            eprintln!("{advisory}");
        }
    }

    Ok(())
}
