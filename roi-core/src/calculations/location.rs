//! Sun-hour suggestion from geographic latitude.
//!
//! A coarse linear approximation used to pre-fill the sun-hours field when
//! the user's location is known: each degree south of the reference latitude
//! adds five hours of sun per year, bounded to a plausible band.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{clamp, round_whole};

/// Latitude at which the approximation yields [`BASE_SUN_HOURS`].
pub const REFERENCE_LATITUDE: Decimal = dec!(51);

/// Annual sun hours at the reference latitude.
pub const BASE_SUN_HOURS: Decimal = dec!(1200);

/// Sun hours gained per degree closer to the equator.
pub const HOURS_PER_DEGREE: Decimal = dec!(5);

/// Lowest suggestion ever returned.
pub const MIN_SUGGESTED_SUN_HOURS: Decimal = dec!(1000);

/// Highest suggestion ever returned.
pub const MAX_SUGGESTED_SUN_HOURS: Decimal = dec!(1400);

/// Errors from the location approximation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("latitude must be between -90 and 90 degrees, got {0}")]
    InvalidLatitude(Decimal),
}

/// Suggests yearly sun hours for a latitude in degrees (north positive).
///
/// Computes `clamp(1200 + (51 - latitude) × 5, 1000, 1400)` and rounds to
/// whole hours.
///
/// # Errors
///
/// Returns [`LocationError::InvalidLatitude`] outside [-90, 90].
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use roi_core::calculations::suggest_sun_hours;
///
/// assert_eq!(suggest_sun_hours(dec!(51)).unwrap(), dec!(1200));
/// assert_eq!(suggest_sun_hours(dec!(40.4)).unwrap(), dec!(1253));
/// assert_eq!(suggest_sun_hours(dec!(10)).unwrap(), dec!(1400));
/// ```
pub fn suggest_sun_hours(latitude: Decimal) -> Result<Decimal, LocationError> {
    if latitude < dec!(-90) || latitude > dec!(90) {
        return Err(LocationError::InvalidLatitude(latitude));
    }

    let estimate = BASE_SUN_HOURS + (REFERENCE_LATITUDE - latitude) * HOURS_PER_DEGREE;
    let suggested = round_whole(clamp(
        estimate,
        MIN_SUGGESTED_SUN_HOURS,
        MAX_SUGGESTED_SUN_HOURS,
    ));

    debug!(latitude = %latitude, sun_hours = %suggested, "Suggested sun hours for location");
    Ok(suggested)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn reference_latitude_gives_base_hours() {
        assert_eq!(suggest_sun_hours(dec!(51)).unwrap(), dec!(1200));
    }

    #[test]
    fn southern_latitude_adds_hours() {
        // 1200 + 11 × 5
        assert_eq!(suggest_sun_hours(dec!(40)).unwrap(), dec!(1255));
    }

    #[test]
    fn northern_latitude_removes_hours() {
        // 1200 - 9 × 5
        assert_eq!(suggest_sun_hours(dec!(60)).unwrap(), dec!(1155));
    }

    #[test]
    fn result_is_clamped_to_band() {
        assert_eq!(suggest_sun_hours(dec!(0)).unwrap(), dec!(1400));
        assert_eq!(suggest_sun_hours(dec!(-45)).unwrap(), dec!(1400));
        assert_eq!(suggest_sun_hours(dec!(90)).unwrap(), dec!(1005));
    }

    #[test]
    fn clamp_bounds_are_reached_exactly() {
        assert_eq!(suggest_sun_hours(dec!(11)).unwrap(), dec!(1400));
        assert_eq!(suggest_sun_hours(dec!(12)).unwrap(), dec!(1395));
    }

    #[test]
    fn fractional_latitude_rounds_to_whole_hours() {
        // 1200 + 0.3 × 5 = 1201.5
        assert_eq!(suggest_sun_hours(dec!(50.7)).unwrap(), dec!(1202));
    }

    #[test]
    fn out_of_range_latitude_is_rejected() {
        assert_eq!(
            suggest_sun_hours(dec!(91)),
            Err(LocationError::InvalidLatitude(dec!(91)))
        );
        assert_eq!(
            suggest_sun_hours(dec!(-90.5)),
            Err(LocationError::InvalidLatitude(dec!(-90.5)))
        );
    }
}
