//! Error types for the Stroop analysis library

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, StroopError>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum StroopError {
    /// The input could not be read or decoded into records
    #[error("Failed to parse {location}: {message}")]
    Parse {
        location: String,
        line: Option<u64>,
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Not enough observations for the requested statistic
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Paired samples of different length
    #[error("Paired samples differ in length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Invalid argument passed to a routine
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl StroopError {
    /// Build a parse error for a whole source (no line information)
    pub fn parse(location: impl Into<String>, message: impl Into<String>) -> Self {
        StroopError::Parse {
            location: location.into(),
            line: None,
            message: message.into(),
        }
    }

    /// Line of the input the error refers to, if known
    pub fn line(&self) -> Option<u64> {
        match self {
            StroopError::Parse { line, .. } => *line,
            _ => None,
        }
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, StroopError::Parse { .. })
    }
}
