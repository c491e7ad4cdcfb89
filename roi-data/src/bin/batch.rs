use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use roi_core::{EngineConfig, RoiCalculator};
use roi_data::{ScenarioLoader, run_scenarios, write_results};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Calculate solar ROI for every household in a CSV file.
///
/// The CSV file should have the following columns:
/// - name: Label for the household
/// - monthly_consumption_kwh: Average monthly consumption (0 to 2000)
/// - home_size_sqm: Home footprint in m² (50 to 500)
/// - annual_sun_hours: Optional yearly sun hours (default 1200)
/// - latitude: Optional latitude used to suggest sun hours
/// - battery_capacity_kwh: Optional battery capacity (1 to 20)
#[derive(Parser, Debug)]
#[command(name = "roi-batch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing scenarios
    #[arg(short, long)]
    file: PathBuf,

    /// Deployment profile supplying rates and costs
    #[arg(short, long, default_value = "current")]
    profile: String,

    /// Write results to this CSV file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Logs go to stderr so results on stdout stay machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let config = EngineConfig::from_profile(&args.profile)?;
    let calculator = RoiCalculator::new(config)
        .with_context(|| format!("Invalid engine profile: {}", args.profile))?;

    info!("Loading scenarios from: {}", args.file.display());
    let scenarios = ScenarioLoader::load_file(&args.file)
        .with_context(|| format!("Failed to load scenarios: {}", args.file.display()))?;
    info!("Parsed {} scenarios from CSV", scenarios.len());

    let outcomes = run_scenarios(&calculator, &scenarios);

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create: {}", path.display()))?;
            write_results(file, &outcomes)
                .with_context(|| format!("Failed to write results: {}", path.display()))?;
            info!("Wrote {} results to {}", outcomes.len(), path.display());
        }
        None => write_results(io::stdout().lock(), &outcomes)
            .context("Failed to write results to stdout")?,
    }

    Ok(())
}
