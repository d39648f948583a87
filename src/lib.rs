//! # Stroop Effect Analysis
//!
//! Statistical analysis of the Stroop experiment: each subject names ink
//! colors for a list of congruent words (word and ink agree) and for a list
//! of incongruent words (they conflict), and the reaction time of both runs
//! is recorded.
//!
//! ## Features
//!
//! - CSV loading with the derived `Difference = Incongruent - Congruent` column
//! - Descriptive statistics (mean, sample variance, std, standard error, quartiles)
//! - Text histograms with shared axes
//! - Anderson-Darling normality test with critical values and p-value
//! - Paired t-test, cross-checked against a manually computed statistic
//!
//! ## Example
//!
//! ```rust,no_run
//! use stroop_analysis::{AnalysisSettings, DataLoader, StroopAnalysis};
//!
//! fn main() -> anyhow::Result<()> {
//!     let dataset = DataLoader::load_csv("data/stroopdata.csv")?;
//!     let report = StroopAnalysis::new(AnalysisSettings::default()).run(&dataset)?;
//!
//!     println!(
//!         "t({}) = {:.3}, p = {:.2e}",
//!         report.t_test.df, report.t_test.statistic, report.t_test.p_value
//!     );
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod data;
pub mod error;
pub mod report;
pub mod utils;

// Re-export main types for convenience
pub use analysis::{
    anderson_darling, manual_t_statistic, paired_t_test, AndersonDarlingResult,
    DescriptiveStats, Histogram, HistogramOptions, PairedTTest, SummaryStats,
};
pub use data::{Column, DataLoader, StroopDataset, StroopRecord};
pub use error::{Result, StroopError};
pub use report::{AnalysisReport, ColumnReport, StroopAnalysis};
pub use utils::{load_config, setup_logging, AnalysisSettings, AppConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Dataset bundled with the repository
pub const DEFAULT_DATA_PATH: &str = "data/stroopdata.csv";
