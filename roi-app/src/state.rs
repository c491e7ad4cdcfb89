//! Application state for the solar ROI estimator.
//!
//! Holds the appearance preference and the most recent calculation. Nothing
//! here outlives the process.

use roi_core::calculations::SavingsPoint;
use roi_core::{PaybackStatus, RoiInput, RoiResult};
use rust_decimal::Decimal;

use crate::themes::ThemeMode;

/// Everything the display and export layers need from one calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationOutcome {
    pub input: RoiInput,
    pub result: RoiResult,
    /// Cumulative savings per year for the bar chart.
    pub savings_by_year: Vec<SavingsPoint>,
    pub payback_status: PaybackStatus,
    /// Extra yearly savings attributable to the battery.
    pub boosted_savings: Option<Decimal>,
    /// Production as a share of yearly consumption.
    pub consumption_coverage: Option<Decimal>,
}

/// Application-wide state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub theme: ThemeMode,

    /// Latest calculation; replaced by every successful calculation.
    results: Option<CalculationOutcome>,
}

impl AppState {
    /// Create a new application state with the given appearance.
    pub fn new(theme: ThemeMode) -> Self {
        Self {
            theme,
            results: None,
        }
    }

    /// Create a new application state following the platform preference.
    pub fn from_platform() -> Self {
        Self::new(ThemeMode::detect())
    }

    /// Switch between light and dark appearance.
    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn results(&self) -> Option<&CalculationOutcome> {
        self.results.as_ref()
    }

    /// Store a new outcome, dropping any previous one.
    pub fn record_outcome(
        &mut self,
        outcome: CalculationOutcome,
    ) -> &CalculationOutcome {
        self.results.insert(outcome)
    }

    /// Clear results for starting fresh.
    pub fn clear_results(&mut self) {
        self.results = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use roi_core::{EngineConfig, compute_roi};
    use rust_decimal_macros::dec;

    use super::*;

    fn outcome(home_size: Decimal) -> CalculationOutcome {
        let input = RoiInput::new(dec!(400), home_size);
        let result = compute_roi(&input, &EngineConfig::current());
        CalculationOutcome {
            input,
            result,
            savings_by_year: Vec::new(),
            payback_status: PaybackStatus::WithinThreshold,
            boosted_savings: None,
            consumption_coverage: None,
        }
    }

    #[test]
    fn new_state_has_no_results() {
        let state = AppState::new(ThemeMode::Dark);

        assert_eq!(state.theme, ThemeMode::Dark);
        assert!(state.results().is_none());
    }

    #[test]
    fn record_outcome_replaces_previous() {
        let mut state = AppState::default();

        state.record_outcome(outcome(dec!(150)));
        state.record_outcome(outcome(dec!(300)));

        assert_eq!(state.results().unwrap().input.home_size_sqm, dec!(300));
    }

    #[test]
    fn clear_results_resets() {
        let mut state = AppState::default();
        state.record_outcome(outcome(dec!(150)));

        state.clear_results();

        assert!(state.results().is_none());
    }

    #[test]
    fn toggle_theme_flips_and_returns_mode() {
        let mut state = AppState::new(ThemeMode::Light);

        assert_eq!(state.toggle_theme(), ThemeMode::Dark);
        assert_eq!(state.toggle_theme(), ThemeMode::Light);
    }
}
