//! Configuration management
//!
//! Handles loading and validation of application configuration.

use crate::analysis::histogram::HistogramOptions;
use crate::analysis::normality::SIGNIFICANCE_LEVELS;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Statistical test settings
    #[serde(default)]
    pub analysis: AnalysisSettings,

    /// Histogram settings
    #[serde(default)]
    pub plot: PlotSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.analysis.confidence_level;
        if !(level > 0.0 && level < 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "confidence_level must be in (0, 1), got {}",
                level
            )));
        }

        let significance = self.analysis.significance_level;
        if !SIGNIFICANCE_LEVELS
            .iter()
            .any(|l| (l - significance).abs() < 1e-9)
        {
            return Err(ConfigError::ValidationError(format!(
                "significance_level must be one of {:?} (percent), got {}",
                SIGNIFICANCE_LEVELS, significance
            )));
        }

        if !(self.analysis.tolerance >= 0.0) {
            return Err(ConfigError::ValidationError(
                "tolerance must be non-negative".to_string(),
            ));
        }

        if self.plot.bins == 0 || self.plot.width == 0 {
            return Err(ConfigError::ValidationError(
                "plot bins and width must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Statistical test settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Confidence level of the mean difference interval
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,

    /// Anderson-Darling significance level, in percent
    #[serde(default = "default_significance_level")]
    pub significance_level: f64,

    /// Allowed gap between the manual and library t-statistics
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_confidence_level() -> f64 {
    0.95
}

fn default_significance_level() -> f64 {
    5.0
}

fn default_tolerance() -> f64 {
    crate::analysis::ttest::T_STAT_TOLERANCE
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            confidence_level: default_confidence_level(),
            significance_level: default_significance_level(),
            tolerance: default_tolerance(),
        }
    }
}

/// Histogram settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotSettings {
    #[serde(default = "default_bins")]
    pub bins: usize,

    /// Width of the longest bar in characters
    #[serde(default = "default_width")]
    pub width: usize,

    #[serde(default = "default_true")]
    pub sharex: bool,

    #[serde(default = "default_true")]
    pub sharey: bool,
}

fn default_bins() -> usize {
    crate::analysis::histogram::DEFAULT_BINS
}

fn default_width() -> usize {
    40
}

fn default_true() -> bool {
    true
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            bins: default_bins(),
            width: default_width(),
            sharex: true,
            sharey: true,
        }
    }
}

impl From<&PlotSettings> for HistogramOptions {
    fn from(settings: &PlotSettings) -> Self {
        Self {
            bins: settings.bins,
            width: settings.width,
            sharex: settings.sharex,
            sharey: settings.sharey,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Load configuration from file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse configuration text, detecting the format from its content
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    if content.trim().starts_with('{') {
        // JSON
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    } else if content.contains(':') && !content.contains('=') {
        // YAML
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    } else {
        // TOML
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
