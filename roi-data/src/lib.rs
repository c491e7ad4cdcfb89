//! Batch scenario support: CSV input of households, CSV output of results.

pub mod loader;
pub mod results;

pub use loader::{Scenario, ScenarioLoadError, ScenarioLoader};
pub use results::{ScenarioOutcome, run_scenarios, write_results};
