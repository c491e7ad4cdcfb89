use std::fmt;

use roi_core::calculations::{LocationError, suggest_sun_hours};
use roi_core::{DEFAULT_ANNUAL_SUN_HOURS, InputError, RoiInput};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::utils::parse_decimal;

/// Input fields of the ROI form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    MonthlyConsumption,
    HomeSize,
    SunHours,
    BatteryCapacity,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            Self::MonthlyConsumption => "Monthly consumption",
            Self::HomeSize => "Home size",
            Self::SunHours => "Annual sun hours",
            Self::BatteryCapacity => "Battery capacity",
        }
    }
}

/// An inline error attached to one form field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}: {message}", .field.label())]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    fn new(
        field: FormField,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl From<InputError> for FieldError {
    fn from(error: InputError) -> Self {
        let field = match error {
            InputError::MonthlyConsumptionOutOfRange { .. } => FormField::MonthlyConsumption,
            InputError::HomeSizeOutOfRange { .. } => FormField::HomeSize,
            InputError::SunHoursOutOfRange { .. } => FormField::SunHours,
            InputError::BatteryCapacityOutOfRange { .. } => FormField::BatteryCapacity,
        };
        Self::new(field, error.to_string())
    }
}

/// Raw values typed into the ROI form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoiForm {
    pub monthly_consumption: String,
    pub home_size: String,
    /// Blank means the default of 1200 hours.
    pub sun_hours: String,
    pub battery_enabled: bool,
    pub battery_capacity: String,
}

impl RoiForm {
    /// Pre-fills the sun-hours field from a latitude when the user left it blank.
    ///
    /// Returns the suggestion whether or not it was applied.
    pub fn apply_location(
        &mut self,
        latitude: Decimal,
    ) -> Result<Decimal, LocationError> {
        let suggested = suggest_sun_hours(latitude)?;
        if self.sun_hours.trim().is_empty() {
            self.sun_hours = suggested.to_string();
        } else {
            debug!(
                entered = %self.sun_hours,
                suggested = %suggested,
                "Keeping user-entered sun hours"
            );
        }
        Ok(suggested)
    }

    /// Converts the form into a validated [`RoiInput`].
    ///
    /// Rules:
    /// - monthly consumption and home size are required
    /// - blank sun hours use the default
    /// - battery capacity is required only when the battery is enabled
    ///
    /// Unparseable or missing values are reported first; range checks run
    /// once every field holds a number.
    pub fn to_input(&self) -> Result<RoiInput, Vec<FieldError>> {
        let mut errors = Vec::new();

        let monthly_consumption =
            required(FormField::MonthlyConsumption, &self.monthly_consumption, &mut errors);
        let home_size = required(FormField::HomeSize, &self.home_size, &mut errors);
        let sun_hours = optional(FormField::SunHours, &self.sun_hours, &mut errors)
            .unwrap_or(DEFAULT_ANNUAL_SUN_HOURS);
        let battery_capacity = if self.battery_enabled {
            required(FormField::BatteryCapacity, &self.battery_capacity, &mut errors)
        } else {
            None
        };

        let (Some(monthly_consumption), Some(home_size)) = (monthly_consumption, home_size) else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut input = RoiInput::new(monthly_consumption, home_size).with_sun_hours(sun_hours);
        if let Some(capacity) = battery_capacity {
            input = input.with_battery(capacity);
        }

        input
            .validate()
            .map_err(|errors| errors.into_iter().map(FieldError::from).collect::<Vec<_>>())?;
        Ok(input)
    }
}

fn optional(
    field: FormField,
    raw: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Decimal> {
    match parse_decimal(raw) {
        Ok(value) => value,
        Err(e) => {
            errors.push(FieldError::new(field, e.to_string()));
            None
        }
    }
}

fn required(
    field: FormField,
    raw: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Decimal> {
    let is_blank = raw.trim().is_empty();
    let value = optional(field, raw, errors);
    if is_blank {
        errors.push(FieldError::new(field, "is required"));
    }
    value
}

impl fmt::Display for RoiForm {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        fn or_dash(value: &str) -> &str {
            if value.trim().is_empty() { "—" } else { value }
        }

        writeln!(f, "Monthly consumption: {}", or_dash(&self.monthly_consumption))?;
        writeln!(f, "Home size:           {}", or_dash(&self.home_size))?;
        writeln!(f, "Sun hours:           {}", or_dash(&self.sun_hours))?;
        write!(
            f,
            "Battery:             {}",
            if self.battery_enabled {
                or_dash(&self.battery_capacity)
            } else {
                "none"
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn filled_form() -> RoiForm {
        RoiForm {
            monthly_consumption: "400".to_string(),
            home_size: "150".to_string(),
            ..RoiForm::default()
        }
    }

    #[test]
    fn blank_sun_hours_use_default() {
        let input = filled_form().to_input().unwrap();

        assert_eq!(input, RoiInput::new(dec!(400), dec!(150)));
    }

    #[test]
    fn thousands_separators_are_accepted() {
        let form = RoiForm {
            monthly_consumption: "1,200".to_string(),
            sun_hours: " 1,350 ".to_string(),
            ..filled_form()
        };

        let input = form.to_input().unwrap();

        assert_eq!(input.monthly_consumption_kwh, dec!(1200));
        assert_eq!(input.annual_sun_hours, dec!(1350));
    }

    #[test]
    fn enabled_battery_carries_capacity() {
        let form = RoiForm {
            battery_enabled: true,
            battery_capacity: "10".to_string(),
            ..filled_form()
        };

        let input = form.to_input().unwrap();

        assert!(input.battery_enabled);
        assert_eq!(input.battery_capacity_kwh, dec!(10));
    }

    #[test]
    fn disabled_battery_ignores_capacity_text() {
        let form = RoiForm {
            battery_capacity: "not a number".to_string(),
            ..filled_form()
        };

        let input = form.to_input().unwrap();

        assert!(!input.battery_enabled);
        assert_eq!(input.battery_capacity_kwh, Decimal::ZERO);
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let form = RoiForm {
            battery_enabled: true,
            ..RoiForm::default()
        };

        let errors = form.to_input().unwrap_err();

        let fields: Vec<FormField> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                FormField::MonthlyConsumption,
                FormField::HomeSize,
                FormField::BatteryCapacity,
            ]
        );
        assert_eq!(errors[0].to_string(), "Monthly consumption: is required");
    }

    #[test]
    fn unparseable_values_are_reported_per_field() {
        let form = RoiForm {
            home_size: "big".to_string(),
            sun_hours: "lots".to_string(),
            ..filled_form()
        };

        let errors = form.to_input().unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, FormField::HomeSize);
        assert_eq!(errors[1].field, FormField::SunHours);
    }

    #[test]
    fn out_of_range_values_map_to_fields() {
        let form = RoiForm {
            monthly_consumption: "2001".to_string(),
            home_size: "501".to_string(),
            battery_enabled: true,
            battery_capacity: "0.5".to_string(),
            ..RoiForm::default()
        };

        let errors = form.to_input().unwrap_err();

        assert_eq!(
            errors,
            vec![
                FieldError::new(
                    FormField::MonthlyConsumption,
                    "monthly consumption must be between 0 and 2000 kWh, got 2001",
                ),
                FieldError::new(
                    FormField::HomeSize,
                    "home size must be between 50 and 500 m², got 501",
                ),
                FieldError::new(
                    FormField::BatteryCapacity,
                    "battery capacity must be between 1 and 20 kWh, got 0.5",
                ),
            ]
        );
    }

    #[test]
    fn sun_hours_beyond_a_year_are_rejected() {
        let form = RoiForm {
            home_size: "500".to_string(),
            sun_hours: "10000000000000000000000000000".to_string(),
            ..filled_form()
        };

        let errors = form.to_input().unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, FormField::SunHours);
        assert_eq!(
            errors[0].to_string(),
            "Annual sun hours: annual sun hours must be between 0 and 8760, \
             got 10000000000000000000000000000"
        );
    }

    #[test]
    fn apply_location_fills_blank_sun_hours() {
        let mut form = filled_form();

        let suggested = form.apply_location(dec!(40)).unwrap();

        assert_eq!(suggested, dec!(1255));
        assert_eq!(form.sun_hours, "1255");
        assert_eq!(form.to_input().unwrap().annual_sun_hours, dec!(1255));
    }

    #[test]
    fn apply_location_keeps_entered_sun_hours() {
        let mut form = RoiForm {
            sun_hours: "1100".to_string(),
            ..filled_form()
        };

        form.apply_location(dec!(40)).unwrap();

        assert_eq!(form.sun_hours, "1100");
    }

    #[test]
    fn apply_location_rejects_invalid_latitude() {
        let mut form = filled_form();

        let result = form.apply_location(dec!(120));

        assert_eq!(result, Err(LocationError::InvalidLatitude(dec!(120))));
        assert!(form.sun_hours.is_empty());
    }

    #[test]
    fn display_lists_fields() {
        let text = filled_form().to_string();

        assert_eq!(
            text,
            "Monthly consumption: 400\n\
             Home size:           150\n\
             Sun hours:           —\n\
             Battery:             none"
        );
    }
}
