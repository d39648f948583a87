//! Descriptive statistics
//!
//! Sample statistics use the `n - 1` denominator throughout.

use serde::Serialize;

/// Arithmetic mean, NaN for an empty sample
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Sample variance (n - 1 denominator), NaN for fewer than two values
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(data);
    data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (n - 1) as f64
}

/// Sample standard deviation
pub fn std_dev(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Standard error of the mean: std / sqrt(n)
pub fn standard_error(data: &[f64]) -> f64 {
    std_dev(data) / (data.len() as f64).sqrt()
}

/// Quantile of an already sorted sample with linear interpolation
///
/// Uses the position `h = (n - 1) * q`, the default of numpy and pandas.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return f64::NAN;
    }
    let h = (sorted.len() - 1) as f64 * q;
    let lower = h.floor() as usize;
    let upper = h.ceil() as usize;
    sorted[lower] + (h - lower as f64) * (sorted[upper] - sorted[lower])
}

/// Count, mean, variance, standard deviation and standard error of a column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub standard_error: f64,
}

impl SummaryStats {
    pub fn new(data: &[f64]) -> Self {
        let variance = variance(data);
        let std_dev = variance.sqrt();
        Self {
            count: data.len(),
            mean: mean(data),
            variance,
            std_dev,
            standard_error: std_dev / (data.len() as f64).sqrt(),
        }
    }
}

/// Five-number summary plus count, mean and std
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl DescriptiveStats {
    pub fn new(data: &[f64]) -> Self {
        let mut sorted = data.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Self {
            count: data.len(),
            mean: mean(data),
            std: std_dev(data),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q25: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q75: quantile_sorted(&sorted, 0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }

    /// Multi-line text rendering, one statistic per line
    pub fn display(&self) -> String {
        format!(
            "  count: {}\n  mean:  {:.4}\n  std:   {:.4}\n  min:   {:.4}\n  25%:   {:.4}\n  50%:   {:.4}\n  75%:   {:.4}\n  max:   {:.4}",
            self.count, self.mean, self.std, self.min, self.q25, self.median, self.q75, self.max
        )
    }
}
