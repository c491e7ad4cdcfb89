pub mod app;
pub mod config;
pub mod logging;
pub mod models;
pub mod report;
pub mod state;
pub mod themes;
pub mod utils;
