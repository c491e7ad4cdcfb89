//! ROI calculation modules.
//!
//! This module provides the calculation engine and the helpers that derive
//! display values and input suggestions from it.

pub mod common;
pub mod location;
pub mod projection;
pub mod roi;

pub use location::{LocationError, suggest_sun_hours};
pub use projection::{
    MAX_PROJECTION_YEARS, PaybackStatus, SavingsPoint, assess_payback, boosted_savings,
    consumption_coverage, cumulative_savings,
};
pub use roi::{RoiCalculator, compute_roi};
