mod engine_config;
mod roi_input;
mod roi_result;

pub use engine_config::{EngineConfig, EngineConfigError};
pub use roi_input::{
    BATTERY_CAPACITY_RANGE, DEFAULT_ANNUAL_SUN_HOURS, HOME_SIZE_RANGE, InputError,
    MONTHLY_CONSUMPTION_RANGE, RoiInput, SUN_HOURS_RANGE,
};
pub use roi_result::RoiResult;
