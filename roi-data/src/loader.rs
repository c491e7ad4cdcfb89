//! CSV loader for batch ROI scenarios.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Values are
//! trimmed of surrounding whitespace.
//!
//! | Column | Required | Type | Notes |
//! |---------------------------|----------|---------|------------------------------------------------|
//! | `name` | yes | string | Label carried into the results |
//! | `monthly_consumption_kwh` | yes | decimal | 0 to 2000 |
//! | `home_size_sqm` | yes | decimal | 50 to 500 |
//! | `annual_sun_hours` | no | decimal | Empty: suggested from `latitude`, else 1200 |
//! | `latitude` | no | decimal | Degrees north, used only without sun hours |
//! | `battery_capacity_kwh` | no | decimal | Present enables the battery; 1 to 20 |
//!
//! ### Example
//!
//! ```csv
//! name,monthly_consumption_kwh,home_size_sqm,annual_sun_hours,latitude,battery_capacity_kwh
//! terrace,400,150,1200,,
//! villa,650,320,,40.4,10
//! ```

use std::io::Read;
use std::path::Path;

use roi_core::calculations::{LocationError, suggest_sun_hours};
use roi_core::{InputError, RoiInput};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading scenario data.
#[derive(Debug, Error)]
pub enum ScenarioLoadError {
    /// The file could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The CSV is structurally invalid or a cell has the wrong type.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// The `latitude` cell is outside [-90, 90]. `row` is 1-based.
    #[error("row {row}: {source}")]
    Location {
        row: usize,
        #[source]
        source: LocationError,
    },

    /// One or more values are outside their accepted range. `row` is 1-based.
    #[error("row {row} ('{name}'): {}", join_errors(.errors))]
    InvalidInput {
        row: usize,
        name: String,
        errors: Vec<InputError>,
    },
}

fn join_errors(errors: &[InputError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A named household ready for calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub input: RoiInput,
}

/// A single record from the scenarios CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
struct ScenarioRecord {
    name: String,
    monthly_consumption_kwh: Decimal,
    home_size_sqm: Decimal,
    annual_sun_hours: Option<Decimal>,
    latitude: Option<Decimal>,
    battery_capacity_kwh: Option<Decimal>,
}

/// Loader for scenario data from CSV.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Parse and validate scenarios from a CSV reader.
    ///
    /// Rows are returned in file order. Parsing stops at the first invalid row.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<Scenario>, ScenarioLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(false)
            .from_reader(reader);

        csv_reader
            .deserialize::<ScenarioRecord>()
            .enumerate()
            .map(|(idx, result)| {
                let record = result?;
                Self::convert(record, idx + 1)
            })
            .collect()
    }

    /// Read a file from disk and delegate to [`ScenarioLoader::parse`].
    pub fn load_file(path: &Path) -> Result<Vec<Scenario>, ScenarioLoadError> {
        let file = std::fs::File::open(path).map_err(|source| ScenarioLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(file)
    }

    fn convert(
        record: ScenarioRecord,
        row: usize,
    ) -> Result<Scenario, ScenarioLoadError> {
        let mut input = RoiInput::new(record.monthly_consumption_kwh, record.home_size_sqm);

        match (record.annual_sun_hours, record.latitude) {
            (Some(hours), _) => input = input.with_sun_hours(hours),
            (None, Some(latitude)) => {
                let hours = suggest_sun_hours(latitude)
                    .map_err(|source| ScenarioLoadError::Location { row, source })?;
                debug!(
                    row,
                    name = %record.name,
                    sun_hours = %hours,
                    "Sun hours taken from latitude"
                );
                input = input.with_sun_hours(hours);
            }
            (None, None) => {}
        }

        if let Some(capacity) = record.battery_capacity_kwh {
            input = input.with_battery(capacity);
        }

        input
            .validate()
            .map_err(|errors| ScenarioLoadError::InvalidInput {
                row,
                name: record.name.clone(),
                errors,
            })?;

        Ok(Scenario {
            name: record.name,
            input,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const MINIMAL_CSV: &str = "\
name,monthly_consumption_kwh,home_size_sqm
terrace,400,150
";

    const FULL_CSV: &str = "\
name,monthly_consumption_kwh,home_size_sqm,annual_sun_hours,latitude,battery_capacity_kwh
terrace,400,150,1200,,
villa,650,320,,40.4,10
cabin,120,60,,,
";

    #[test]
    fn minimal_csv_uses_defaults() {
        let scenarios = ScenarioLoader::parse(MINIMAL_CSV.as_bytes()).unwrap();

        assert_eq!(
            scenarios,
            vec![Scenario {
                name: "terrace".to_string(),
                input: RoiInput::new(dec!(400), dec!(150)),
            }]
        );
    }

    #[test]
    fn full_csv_preserves_order() {
        let scenarios = ScenarioLoader::parse(FULL_CSV.as_bytes()).unwrap();

        let names: Vec<&str> = scenarios.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["terrace", "villa", "cabin"]);
    }

    #[test]
    fn latitude_fills_missing_sun_hours() {
        let scenarios = ScenarioLoader::parse(FULL_CSV.as_bytes()).unwrap();

        assert_eq!(scenarios[1].input.annual_sun_hours, dec!(1253));
    }

    #[test]
    fn explicit_sun_hours_win_over_latitude() {
        let csv = "\
name,monthly_consumption_kwh,home_size_sqm,annual_sun_hours,latitude
loft,300,90,1100,10
";
        let scenarios = ScenarioLoader::parse(csv.as_bytes()).unwrap();

        assert_eq!(scenarios[0].input.annual_sun_hours, dec!(1100));
    }

    #[test]
    fn battery_column_enables_battery() {
        let scenarios = ScenarioLoader::parse(FULL_CSV.as_bytes()).unwrap();

        assert!(!scenarios[0].input.battery_enabled);
        assert!(scenarios[1].input.battery_enabled);
        assert_eq!(scenarios[1].input.battery_capacity_kwh, dec!(10));
    }

    #[test]
    fn whitespace_and_column_order_are_tolerated() {
        let csv = "\
home_size_sqm , name , monthly_consumption_kwh
 200 , flat , 350
";
        let scenarios = ScenarioLoader::parse(csv.as_bytes()).unwrap();

        assert_eq!(scenarios[0].name, "flat");
        assert_eq!(scenarios[0].input.home_size_sqm, dec!(200));
        assert_eq!(scenarios[0].input.monthly_consumption_kwh, dec!(350));
    }

    #[test]
    fn header_only_yields_no_scenarios() {
        let csv = "name,monthly_consumption_kwh,home_size_sqm\n";

        let scenarios = ScenarioLoader::parse(csv.as_bytes()).unwrap();

        assert!(scenarios.is_empty());
    }

    #[test]
    fn out_of_range_row_reports_row_and_errors() {
        let csv = "\
name,monthly_consumption_kwh,home_size_sqm,battery_capacity_kwh
ok,400,150,
bad,400,20,30
";
        let result = ScenarioLoader::parse(csv.as_bytes());

        match result.unwrap_err() {
            ScenarioLoadError::InvalidInput { row, name, errors } => {
                assert_eq!(row, 2);
                assert_eq!(name, "bad");
                assert_eq!(errors.len(), 2);
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn invalid_input_message_lists_every_error() {
        let csv = "name,monthly_consumption_kwh,home_size_sqm\nbad,2500,20\n";

        let message = ScenarioLoader::parse(csv.as_bytes())
            .unwrap_err()
            .to_string();

        assert_eq!(
            message,
            "row 1 ('bad'): monthly consumption must be between 0 and 2000 kWh, got 2500; \
             home size must be between 50 and 500 m², got 20"
        );
    }

    #[test]
    fn invalid_latitude_reports_row() {
        let csv = "name,monthly_consumption_kwh,home_size_sqm,latitude\npole,400,150,95\n";

        match ScenarioLoader::parse(csv.as_bytes()).unwrap_err() {
            ScenarioLoadError::Location { row, source } => {
                assert_eq!(row, 1);
                assert_eq!(source, LocationError::InvalidLatitude(dec!(95)));
            }
            other => panic!("expected Location, got {:?}", other),
        }
    }

    #[test]
    fn missing_required_column_is_parse_error() {
        let csv = "name,home_size_sqm\nflat,150\n";

        match ScenarioLoader::parse(csv.as_bytes()).unwrap_err() {
            ScenarioLoadError::Parse(_) => {}
            other => panic!("expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn non_numeric_value_is_parse_error() {
        let csv = "name,monthly_consumption_kwh,home_size_sqm\nflat,lots,150\n";

        match ScenarioLoader::parse(csv.as_bytes()).unwrap_err() {
            ScenarioLoadError::Parse(_) => {}
            other => panic!("expected Parse, got {:?}", other),
        }
    }
}
