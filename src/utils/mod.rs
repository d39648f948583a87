//! Utilities module
//!
//! Configuration loading and logging setup.

mod config;
mod logging;

pub use config::{
    load_config, parse_config, AnalysisSettings, AppConfig, ConfigError, LoggingSettings,
    PlotSettings,
};
pub use logging::setup_logging;
