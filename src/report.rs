//! Analysis pipeline and report rendering

use crate::analysis::{
    anderson_darling, cross_check, manual_t_statistic, paired_t_test_with_confidence,
    render_histograms, AndersonDarlingResult, CrossCheck, DescriptiveStats, HistogramOptions,
    PairedTTest, SummaryStats, SIGNIFICANCE_LEVELS,
};
use crate::data::{Column, StroopDataset};
use crate::error::{Result, StroopError};
use crate::utils::AnalysisSettings;
use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing::{debug, info, warn};

/// Statistics and normality check of one column
#[derive(Debug, Clone, Serialize)]
pub struct ColumnReport {
    pub column: Column,
    pub summary: SummaryStats,
    pub describe: DescriptiveStats,
    /// `None` when the test cannot be computed for this column
    pub normality: Option<AndersonDarlingResult>,
    /// Why the normality test was skipped
    pub normality_skipped: Option<String>,
}

impl ColumnReport {
    /// Normality verdict at a level (percent); `None` if the test was skipped
    pub fn rejects_normality_at(&self, significance_level: f64) -> Option<bool> {
        self.normality
            .as_ref()
            .and_then(|n| n.rejects_normality_at(significance_level))
    }
}

/// Everything computed for one dataset
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub n_subjects: usize,
    /// Anderson-Darling significance level used for verdicts, in percent
    pub significance_level: f64,
    pub columns: Vec<ColumnReport>,
    /// Incongruent against congruent
    pub t_test: PairedTTest,
    pub cross_check: CrossCheck,
}

/// Runs the full analysis over a dataset
pub struct StroopAnalysis {
    settings: AnalysisSettings,
}

impl StroopAnalysis {
    pub fn new(settings: AnalysisSettings) -> Self {
        Self { settings }
    }

    pub fn run(&self, dataset: &StroopDataset) -> Result<AnalysisReport> {
        let level = self.settings.significance_level;
        if !SIGNIFICANCE_LEVELS.iter().any(|l| (l - level).abs() < 1e-9) {
            return Err(StroopError::InvalidParameter(format!(
                "significance level must be one of {:?} (percent), got {}",
                SIGNIFICANCE_LEVELS, level
            )));
        }

        info!("Analyzing {} subjects", dataset.len());

        let columns = Column::ALL
            .iter()
            .map(|&column| self.analyze_column(dataset, column))
            .collect::<Result<Vec<_>>>()?;

        let difference = dataset.difference();
        let manual = manual_t_statistic(&difference)?;
        let t_test = paired_t_test_with_confidence(
            &dataset.incongruent(),
            &dataset.congruent(),
            self.settings.confidence_level,
        )?;
        info!(
            "Paired t-test: t({}) = {:.4}, p = {:.3e}",
            t_test.df, t_test.statistic, t_test.p_value
        );

        let check = cross_check(manual, &t_test, self.settings.tolerance);
        if check.agrees {
            debug!("Manual t-statistic agrees with library (|diff| = {:.2e})", check.abs_diff);
        } else {
            warn!(
                "Manual t-statistic {} differs from library value {} by {:.2e}",
                check.manual, check.library, check.abs_diff
            );
        }

        Ok(AnalysisReport {
            n_subjects: dataset.len(),
            significance_level: self.settings.significance_level,
            columns,
            t_test,
            cross_check: check,
        })
    }

    fn analyze_column(&self, dataset: &StroopDataset, column: Column) -> Result<ColumnReport> {
        let values = dataset.column(column);

        let (normality, normality_skipped) = match anderson_darling(&values) {
            Ok(result) => (Some(result), None),
            Err(StroopError::InsufficientData(reason)) => {
                warn!("{}: normality test skipped: {}", column, reason);
                (None, Some(reason))
            }
            Err(e) => return Err(e),
        };

        if let Some(result) = &normality {
            if result.rejects_normality_at(self.settings.significance_level) == Some(true) {
                warn!(
                    "{}: normality rejected at {}% (A² = {:.3})",
                    column, self.settings.significance_level, result.statistic
                );
            }
        }

        Ok(ColumnReport {
            column,
            summary: SummaryStats::new(&values),
            describe: DescriptiveStats::new(&values),
            normality,
            normality_skipped,
        })
    }
}

/// Table cell for values that could not be computed
const NOT_AVAILABLE: &str = "n/a";

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Column")]
    column: String,
    #[tabled(rename = "N")]
    count: usize,
    #[tabled(rename = "Mean")]
    mean: String,
    #[tabled(rename = "Variance")]
    variance: String,
    #[tabled(rename = "Std")]
    std_dev: String,
    #[tabled(rename = "SE")]
    standard_error: String,
}

#[derive(Tabled)]
struct DescribeRow {
    #[tabled(rename = "Column")]
    column: String,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "25%")]
    q25: String,
    #[tabled(rename = "50%")]
    median: String,
    #[tabled(rename = "75%")]
    q75: String,
    #[tabled(rename = "Max")]
    max: String,
}

#[derive(Tabled)]
struct NormalityRow {
    #[tabled(rename = "Column")]
    column: String,
    #[tabled(rename = "A²")]
    statistic: String,
    #[tabled(rename = "Critical (15/10/5/2.5/1%)")]
    critical: String,
    #[tabled(rename = "P-Value")]
    p_value: String,
    #[tabled(rename = "Result")]
    result: String,
}

impl AnalysisReport {
    pub fn column(&self, column: Column) -> Option<&ColumnReport> {
        self.columns.iter().find(|c| c.column == column)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Histograms of all columns
    pub fn render_histograms(
        &self,
        dataset: &StroopDataset,
        options: &HistogramOptions,
    ) -> Result<String> {
        let data: Vec<(Column, Vec<f64>)> = self
            .columns
            .iter()
            .map(|c| (c.column, dataset.column(c.column)))
            .collect();
        let panels: Vec<(&str, &[f64])> = data
            .iter()
            .map(|(column, values)| (column.name(), values.as_slice()))
            .collect();
        render_histograms(&panels, options)
    }

    /// Render the report as tables plus a t-test summary
    pub fn render_tables(&self) -> String {
        let summary_rows: Vec<SummaryRow> = self
            .columns
            .iter()
            .map(|c| SummaryRow {
                column: c.column.to_string(),
                count: c.summary.count,
                mean: format!("{:.4}", c.summary.mean),
                variance: format!("{:.4}", c.summary.variance),
                std_dev: format!("{:.4}", c.summary.std_dev),
                standard_error: format!("{:.4}", c.summary.standard_error),
            })
            .collect();

        let describe_rows: Vec<DescribeRow> = self
            .columns
            .iter()
            .map(|c| DescribeRow {
                column: c.column.to_string(),
                min: format!("{:.3}", c.describe.min),
                q25: format!("{:.3}", c.describe.q25),
                median: format!("{:.3}", c.describe.median),
                q75: format!("{:.3}", c.describe.q75),
                max: format!("{:.3}", c.describe.max),
            })
            .collect();

        let normality_rows: Vec<NormalityRow> = self
            .columns
            .iter()
            .map(|c| match &c.normality {
                Some(normality) => NormalityRow {
                    column: c.column.to_string(),
                    statistic: format!("{:.4}", normality.statistic),
                    critical: normality
                        .critical_values
                        .iter()
                        .map(|cv| format!("{:.3}", cv.value))
                        .collect::<Vec<_>>()
                        .join(" / "),
                    p_value: format!("{:.4}", normality.p_value),
                    result: match normality.rejects_normality_at(self.significance_level) {
                        Some(true) => "Non-normal".red().to_string(),
                        Some(false) => "Normal".green().to_string(),
                        None => NOT_AVAILABLE.yellow().to_string(),
                    },
                },
                None => NormalityRow {
                    column: c.column.to_string(),
                    statistic: NOT_AVAILABLE.to_string(),
                    critical: NOT_AVAILABLE.to_string(),
                    p_value: NOT_AVAILABLE.to_string(),
                    result: NOT_AVAILABLE.yellow().to_string(),
                },
            })
            .collect();

        let mut out = String::new();
        out.push_str(&format!("{}\n", "Descriptive Statistics".bold()));
        out.push_str(&format!("{}\n\n", Table::new(summary_rows)));
        out.push_str(&format!("{}\n\n", Table::new(describe_rows)));

        out.push_str(&format!(
            "{} (levels {:?}%, verdict at {}%)\n",
            "Anderson-Darling Normality Test".bold(),
            SIGNIFICANCE_LEVELS,
            self.significance_level
        ));
        out.push_str(&format!("{}\n\n", Table::new(normality_rows)));

        let t = &self.t_test;
        out.push_str(&format!("{}\n", "Paired t-test (Incongruent - Congruent)".bold()));
        out.push_str(&format!("  Mean difference: {:.4}\n", t.mean_difference));
        out.push_str(&format!("  Standard error:  {:.4}\n", t.standard_error));
        out.push_str(&format!(
            "  t({}) = {:.4}, p = {:.3e}\n",
            t.df, t.statistic, t.p_value
        ));
        out.push_str(&format!(
            "  {:.0}% CI: [{:.4}, {:.4}]\n",
            t.confidence_level * 100.0,
            t.confidence_interval.0,
            t.confidence_interval.1
        ));
        out.push_str(&format!("  Effect size (d_z): {:.4}\n", t.effect_size));

        let check = &self.cross_check;
        let verdict = if check.agrees {
            "agrees".green()
        } else {
            "DISAGREES".red()
        };
        out.push_str(&format!(
            "  Manual t = {:.6} {} with library t = {:.6} (|diff| = {:.1e})\n",
            check.manual, verdict, check.library, check.abs_diff
        ));

        out
    }
}
