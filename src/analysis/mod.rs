//! # Statistical analysis
//!
//! Descriptive statistics, histograms, the Anderson-Darling normality test
//! and the paired t-test.

pub mod histogram;
pub mod normality;
pub mod statistics;
pub mod ttest;

pub use histogram::{render_histograms, Histogram, HistogramOptions, DEFAULT_BINS};
pub use normality::{anderson_darling, AndersonDarlingResult, CriticalValue, SIGNIFICANCE_LEVELS};
pub use statistics::{
    mean, quantile_sorted, standard_error, std_dev, variance, DescriptiveStats, SummaryStats,
};
pub use ttest::{
    cross_check, manual_t_statistic, paired_t_test, paired_t_test_with_confidence, CrossCheck,
    PairedTTest, T_STAT_TOLERANCE,
};
