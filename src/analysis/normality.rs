//! Anderson-Darling normality test
//!
//! The reference normal distribution takes its mean and standard deviation
//! from the sample itself (case 3 of Stephens, 1974), so the critical values
//! are the small-sample corrected ones for estimated parameters.
//!
//! H0: the sample comes from a normal distribution.

use crate::analysis::statistics::{mean, std_dev};
use crate::error::{Result, StroopError};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

/// Significance levels (percent) of the tabulated critical values
pub const SIGNIFICANCE_LEVELS: [f64; 5] = [15.0, 10.0, 5.0, 2.5, 1.0];

/// Asymptotic critical values for the normal case
const NORMAL_CRITICAL_VALUES: [f64; 5] = [0.576, 0.656, 0.787, 0.918, 1.092];

/// Below this size the critical value table does not apply
pub const MIN_OBSERVATIONS: usize = 8;

/// Critical value of the statistic at one significance level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalValue {
    /// Significance level in percent
    pub significance_level: f64,
    pub value: f64,
}

/// Result of the Anderson-Darling test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AndersonDarlingResult {
    pub n: usize,
    /// A² statistic
    pub statistic: f64,
    /// A² with the D'Agostino-Stephens small-sample adjustment
    pub adjusted_statistic: f64,
    /// Approximate p-value derived from the adjusted statistic
    pub p_value: f64,
    pub critical_values: Vec<CriticalValue>,
}

impl AndersonDarlingResult {
    /// Critical value at a tabulated level (percent)
    pub fn critical_value(&self, significance_level: f64) -> Option<f64> {
        self.critical_values
            .iter()
            .find(|cv| (cv.significance_level - significance_level).abs() < 1e-9)
            .map(|cv| cv.value)
    }

    /// Whether normality is rejected at the given level (percent)
    ///
    /// Returns `None` if the level is not one of [`SIGNIFICANCE_LEVELS`].
    pub fn rejects_normality_at(&self, significance_level: f64) -> Option<bool> {
        self.critical_value(significance_level)
            .map(|critical| self.statistic > critical)
    }
}

/// Anderson-Darling test against a normal distribution
pub fn anderson_darling(data: &[f64]) -> Result<AndersonDarlingResult> {
    let n = data.len();
    if n < MIN_OBSERVATIONS {
        return Err(StroopError::InsufficientData(format!(
            "Anderson-Darling test needs at least {} observations, got {}",
            MIN_OBSERVATIONS, n
        )));
    }

    let m = mean(data);
    let s = std_dev(data);
    if !(s > 0.0) {
        return Err(StroopError::InsufficientData(
            "Anderson-Darling test is undefined for a constant sample".to_string(),
        ));
    }

    let normal =
        Normal::new(0.0, 1.0).map_err(|e| StroopError::InvalidParameter(e.to_string()))?;

    let mut w: Vec<f64> = data.iter().map(|x| (x - m) / s).collect();
    w.sort_by(|a, b| a.total_cmp(b));

    let log_cdf: Vec<f64> = w.iter().map(|&z| log_norm_cdf(&normal, z)).collect();
    let log_sf: Vec<f64> = w.iter().map(|&z| log_norm_cdf(&normal, -z)).collect();

    let nf = n as f64;
    let sum: f64 = (0..n)
        .map(|i| (2 * i + 1) as f64 / nf * (log_cdf[i] + log_sf[n - 1 - i]))
        .sum();
    let statistic = -nf - sum;

    let correction = 1.0 + 4.0 / nf - 25.0 / (nf * nf);
    let critical_values = SIGNIFICANCE_LEVELS
        .iter()
        .zip(NORMAL_CRITICAL_VALUES.iter())
        .map(|(&level, &base)| CriticalValue {
            significance_level: level,
            value: round_to(base / correction, 3),
        })
        .collect();

    let adjusted_statistic = statistic * (1.0 + 0.75 / nf + 2.25 / (nf * nf));

    Ok(AndersonDarlingResult {
        n,
        statistic,
        adjusted_statistic,
        p_value: adjusted_p_value(adjusted_statistic),
        critical_values,
    })
}

/// Below this the standard normal CDF is taken from its asymptotic series
const LOG_CDF_TAIL: f64 = -30.0;

/// ln Φ(z), finite far into the lower tail where Φ(z) underflows
fn log_norm_cdf(normal: &Normal, z: f64) -> f64 {
    if z >= LOG_CDF_TAIL {
        return normal.cdf(z).ln();
    }
    // Mills ratio: Φ(z) ≈ φ(z)/|z| · (1 - 1/z² + 3/z⁴ - 15/z⁶)
    let z2 = z * z;
    let series = 1.0 - 1.0 / z2 + 3.0 / (z2 * z2) - 15.0 / (z2 * z2 * z2);
    -0.5 * z2 - (-z).ln() - 0.5 * (2.0 * std::f64::consts::PI).ln() + series.ln()
}

/// Past this the first branch of the approximation turns upwards again
const P_VALUE_FLOOR_STATISTIC: f64 = 153.0;

/// D'Agostino & Stephens (1986) approximation, table 4.9
fn adjusted_p_value(a: f64) -> f64 {
    if a.is_nan() {
        return f64::NAN;
    }
    if a >= P_VALUE_FLOOR_STATISTIC {
        return 0.0;
    }
    let p = if a >= 0.6 {
        (1.2937 - 5.709 * a + 0.0186 * a * a).exp()
    } else if a >= 0.34 {
        (0.9177 - 4.279 * a - 1.38 * a * a).exp()
    } else if a > 0.2 {
        1.0 - (-8.318 + 42.796 * a - 59.938 * a * a).exp()
    } else {
        1.0 - (-13.436 + 101.14 * a - 223.73 * a * a).exp()
    };
    p.clamp(0.0, 1.0)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const CONGRUENT: [f64; 24] = [
        12.079, 16.791, 9.564, 8.630, 14.669, 12.238, 14.692, 8.987, 9.401, 14.480, 22.328,
        15.298, 15.073, 16.929, 18.200, 12.130, 18.495, 10.639, 11.344, 12.369, 12.944, 14.233,
        19.710, 16.004,
    ];

    #[test]
    fn test_statistic_on_congruent_times() {
        let result = anderson_darling(&CONGRUENT).unwrap();

        assert_eq!(result.n, 24);
        assert_relative_eq!(result.statistic, 0.2096749183076767, epsilon = 1e-9);
        assert_relative_eq!(result.p_value, 0.8432199679354877, epsilon = 1e-6);
        assert_eq!(result.rejects_normality_at(5.0), Some(false));
    }

    #[test]
    fn test_critical_values_for_n_24() {
        let result = anderson_darling(&CONGRUENT).unwrap();
        let values: Vec<f64> = result.critical_values.iter().map(|cv| cv.value).collect();

        assert_eq!(values, vec![0.513, 0.584, 0.701, 0.817, 0.972]);
        assert_eq!(result.critical_value(2.5), Some(0.817));
        assert_eq!(result.critical_value(3.0), None);
        assert_eq!(result.rejects_normality_at(3.0), None);
    }

    #[test]
    fn test_skewed_sample_rejects_normality() {
        let data = [0.1, 0.1, 0.1, 0.2, 0.2, 0.3, 0.5, 0.8, 1.5, 3.0, 6.0, 12.0];
        let result = anderson_darling(&data).unwrap();

        assert_relative_eq!(result.statistic, 1.8820040681457844, epsilon = 1e-9);
        assert_eq!(result.rejects_normality_at(1.0), Some(true));
        assert!(result.p_value < 1e-3);
    }

    #[test]
    fn test_p_value_decreases_for_huge_statistics() {
        assert!(adjusted_p_value(100.0) < 1e-100);
        assert_eq!(adjusted_p_value(153.0), 0.0);
        assert_eq!(adjusted_p_value(400.0), 0.0);
        assert_eq!(adjusted_p_value(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_log_cdf_in_far_tail() {
        let normal = Normal::new(0.0, 1.0).unwrap();

        assert_relative_eq!(log_norm_cdf(&normal, -5.0), normal.cdf(-5.0).ln(), epsilon = 1e-12);
        assert_relative_eq!(
            log_norm_cdf(&normal, -29.9),
            log_norm_cdf(&normal, -30.1) + 0.5 * (30.1f64.powi(2) - 29.9f64.powi(2))
                + (30.1f64 / 29.9).ln(),
            epsilon = 1e-3
        );
        assert_relative_eq!(log_norm_cdf(&normal, -40.0), -804.6084, epsilon = 1e-3);
        assert_eq!(log_norm_cdf(&normal, 40.0), 0.0);
    }

    #[test]
    fn test_gross_outlier_gives_finite_statistic() {
        let mut data: Vec<f64> = (0..1999).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        data.push(1.0e6);

        let result = anderson_darling(&data).unwrap();
        assert!(result.statistic.is_finite());
        assert!(result.statistic > 100.0);
        assert_eq!(result.p_value, 0.0);
        assert_eq!(result.rejects_normality_at(1.0), Some(true));
    }

    #[test]
    fn test_small_or_constant_samples_fail() {
        assert!(matches!(
            anderson_darling(&[1.0, 2.0, 3.0]),
            Err(StroopError::InsufficientData(_))
        ));
        assert!(matches!(
            anderson_darling(&[5.0; 10]),
            Err(StroopError::InsufficientData(_))
        ));
    }
}
