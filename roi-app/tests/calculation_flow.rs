//! End-to-end flow: config file on disk, form, calculation, report.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use roi_app::app::{calculate, export_outcome, resolve_engine_config};
use roi_app::config::AppConfig;
use roi_app::models::{FormField, RoiForm};
use roi_app::report::{render_chart, render_summary};
use roi_app::state::AppState;
use roi_app::themes::ThemeMode;
use roi_core::{EngineConfig, EngineConfigError, PaybackStatus};
use rust_decimal_macros::dec;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load(name: &str) -> AppConfig {
    AppConfig::from_toml_file(&fixture_path(name)).expect("fixture should parse")
}

fn reference_form() -> RoiForm {
    RoiForm {
        monthly_consumption: "400".to_string(),
        home_size: "150".to_string(),
        ..RoiForm::default()
    }
}

#[test]
fn baseline_fixture_reproduces_reference_estimate() {
    let app_config = load("baseline.toml");
    let engine_config = resolve_engine_config(&app_config, None).unwrap();
    let mut state = AppState::new(app_config.theme.unwrap_or_default());

    let outcome = calculate(&mut state, &reference_form(), &engine_config).unwrap();

    assert_eq!(engine_config, EngineConfig::baseline());
    assert_eq!(outcome.result.annual_production_kwh, dec!(6075));
    assert_eq!(outcome.result.annual_savings, dec!(1033));
    assert_eq!(outcome.result.payback_years, dec!(14.52));
    assert_eq!(outcome.result.co2_reduction_kg_per_year, dec!(2430));
    assert_eq!(state.theme, ThemeMode::Dark);
}

#[test]
fn tariff_override_changes_economics_only() {
    let engine_config = resolve_engine_config(&load("tariff_override.toml"), None).unwrap();
    let mut state = AppState::default();

    let outcome = calculate(&mut state, &reference_form(), &engine_config).unwrap();

    // 6075 kWh × 0.30 × 0.5 = 911.25
    assert_eq!(outcome.result.annual_production_kwh, dec!(6075));
    assert_eq!(outcome.result.annual_savings, dec!(911));
    assert_eq!(outcome.result.total_system_cost, dec!(9000));
    assert_eq!(outcome.result.payback_years, dec!(9.88));
    assert_eq!(outcome.payback_status, PaybackStatus::WithinThreshold);
}

#[test]
fn command_line_profile_overrides_fixture() {
    let engine_config =
        resolve_engine_config(&load("baseline.toml"), Some("current")).unwrap();

    assert_eq!(engine_config, EngineConfig::current());
}

#[test]
fn invalid_override_fixture_is_rejected() {
    let result = resolve_engine_config(&load("invalid_override.toml"), None);

    assert_eq!(
        result,
        Err(EngineConfigError::BaseRatioAboveMax {
            base: dec!(0.5),
            max: dec!(0.4),
        })
    );
}

#[test]
fn location_then_battery_flow_renders_report() {
    let engine_config = EngineConfig::current();
    let mut state = AppState::new(ThemeMode::Light);
    let mut form = RoiForm {
        battery_enabled: true,
        battery_capacity: "10".to_string(),
        ..reference_form()
    };
    form.apply_location(dec!(40)).unwrap();

    let outcome = calculate(&mut state, &form, &engine_config).unwrap();
    let summary = render_summary(outcome, &engine_config, ThemeMode::Light, false);
    let chart = render_chart(
        &outcome.savings_by_year,
        outcome.result.total_system_cost,
        ThemeMode::Light,
        false,
    );

    assert_eq!(outcome.input.annual_sun_hours, dec!(1255));
    assert!(outcome.boosted_savings.is_some());
    assert!(summary.contains("Self-consumption:     70%"));
    assert!(summary.contains("Battery boost:"));
    assert_eq!(chart.lines().count(), 1 + outcome.savings_by_year.len());
}

#[test]
fn rejected_form_reports_every_field() {
    let mut state = AppState::new(ThemeMode::Light);
    let form = RoiForm {
        monthly_consumption: "2500".to_string(),
        home_size: "".to_string(),
        battery_enabled: true,
        ..RoiForm::default()
    };

    let errors = calculate(&mut state, &form, &EngineConfig::current()).unwrap_err();

    let fields: Vec<FormField> = errors.iter().map(|e| e.field).collect();
    assert_eq!(fields, vec![FormField::HomeSize, FormField::BatteryCapacity]);
    assert!(state.results().is_none());
}

#[test]
fn export_to_missing_directory_is_surfaced_as_advisory() {
    let engine_config = EngineConfig::current();
    let mut state = AppState::new(ThemeMode::Light);
    let outcome = calculate(&mut state, &reference_form(), &engine_config).unwrap();
    let path = fixture_path("no_such_dir").join("report.txt");

    let advisory = export_outcome(&path, outcome, &engine_config);

    assert!(advisory.is_some_and(|text| text.contains("report not exported")));
    assert!(state.results().is_some());
}
