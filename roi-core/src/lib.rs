pub mod calculations;
pub mod models;

pub use calculations::{PaybackStatus, RoiCalculator, compute_roi};
pub use models::*;
