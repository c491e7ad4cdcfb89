//! Common utility functions for ROI calculations.
//!
//! This module provides the rounding and bounding helpers shared by the
//! engine, the location approximation and the savings projection.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to `dp` decimal places using half-up rounding.
///
/// Values at exactly the midpoint are rounded away from zero, so 0.005 becomes
/// 0.01 at two places and 2.5 becomes 3 at zero places. Every rounded figure in
/// a [`RoiResult`](crate::RoiResult) goes through this function.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use roi_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(14.5243), 2), dec!(14.52));
/// assert_eq!(round_half_up(dec!(11.755), 2), dec!(11.76));
/// assert_eq!(round_half_up(dec!(1032.75), 0), dec!(1033));
/// assert_eq!(round_half_up(dec!(1573.425), 0), dec!(1573));
/// ```
pub fn round_half_up(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a decimal value to the nearest whole unit using half-up rounding.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use roi_core::calculations::common::round_whole;
///
/// assert_eq!(round_whole(dec!(6075.000)), dec!(6075));
/// assert_eq!(round_whole(dec!(2429.5)), dec!(2430));
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    round_half_up(value, 0)
}

/// Restricts `value` to the closed interval `[lower, upper]`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use roi_core::calculations::common::clamp;
///
/// assert_eq!(clamp(dec!(1455), dec!(1000), dec!(1400)), dec!(1400));
/// assert_eq!(clamp(dec!(950), dec!(1000), dec!(1400)), dec!(1000));
/// assert_eq!(clamp(dec!(1255), dec!(1000), dec!(1400)), dec!(1255));
/// ```
pub fn clamp(
    value: Decimal,
    lower: Decimal,
    upper: Decimal,
) -> Decimal {
    if value < lower {
        lower
    } else if value > upper {
        upper
    } else {
        value
    }
}
