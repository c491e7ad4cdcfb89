//! Event handlers tying the form, the engine and the application state together.

use roi_core::calculations::{
    assess_payback, boosted_savings, consumption_coverage, cumulative_savings,
};
use std::path::Path;

use roi_core::{EngineConfig, EngineConfigError, compute_roi};
use tracing::{debug, info, instrument, warn};

use crate::config::AppConfig;
use crate::models::{FieldError, RoiForm};
use crate::report::export_report;
use crate::state::{AppState, CalculationOutcome};

/// Profile used when neither the command line nor the config file names one.
pub const DEFAULT_PROFILE: &str = "current";

/// Picks the engine profile and applies the config file's overrides.
///
/// `profile_override` (from the command line) wins over the file's `profile`.
///
/// # Errors
///
/// Returns [`EngineConfigError`] for an unknown profile name or when the
/// overridden configuration is out of range.
pub fn resolve_engine_config(
    app_config: &AppConfig,
    profile_override: Option<&str>,
) -> Result<EngineConfig, EngineConfigError> {
    let profile = profile_override
        .or(app_config.profile.as_deref())
        .unwrap_or(DEFAULT_PROFILE);

    let mut config = EngineConfig::from_profile(profile)?;
    if !app_config.engine.is_empty() {
        debug!(profile, overrides = ?app_config.engine, "Applying engine overrides");
        config = app_config.engine.apply(config);
    }
    config.validate()?;

    info!(profile, "Engine configuration resolved");
    Ok(config)
}

/// Handles a "calculate" request.
///
/// Validates the form, runs the engine and derives the chart series, payback
/// status and battery figures. On success the outcome replaces any previous
/// one in `state`; on failure `state` is left untouched.
///
/// # Errors
///
/// Returns one [`FieldError`] per offending form field.
#[instrument(level = "debug", skip_all)]
pub fn calculate<'a>(
    state: &'a mut AppState,
    form: &RoiForm,
    config: &EngineConfig,
) -> Result<&'a CalculationOutcome, Vec<FieldError>> {
    let input = form.to_input().inspect_err(|errors| {
        warn!(count = errors.len(), "Form rejected");
    })?;

    let result = compute_roi(&input, config);
    let payback_status = assess_payback(&result, config.high_payback_alert_years);
    if payback_status.needs_warning() {
        warn!(
            payback_years = %result.payback_years,
            threshold = %config.high_payback_alert_years,
            status = payback_status.as_str(),
            "Payback advisory"
        );
    }

    let outcome = CalculationOutcome {
        savings_by_year: cumulative_savings(&result),
        boosted_savings: boosted_savings(&result, &input, config),
        consumption_coverage: consumption_coverage(&result, &input),
        payback_status,
        input,
        result,
    };

    Ok(state.record_outcome(outcome))
}

/// Handles an "export" request.
///
/// A failed export never invalidates the calculation; it comes back as an
/// advisory line for the user instead of an error.
pub fn export_outcome(
    path: &Path,
    outcome: &CalculationOutcome,
    config: &EngineConfig,
) -> Option<String> {
    match export_report(path, outcome, config) {
        Ok(()) => None,
        Err(error) => {
            warn!(%error, "Report export failed");
            Some(format!("Warning: report not exported: {error}"))
        }
    }
}
