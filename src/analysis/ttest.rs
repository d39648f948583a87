//! Paired t-test
//!
//! Two independent computations of the same statistic:
//! - [`manual_t_statistic`]: mean(d) / SE(d), built on this crate's own
//!   descriptive statistics
//! - [`paired_t_test`]: the full test over two related samples, computed
//!   with `statrs`, including the two-sided p-value
//!
//! [`cross_check`] compares the two.

use crate::analysis::statistics::{mean, standard_error};
use crate::error::{Result, StroopError};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::Statistics;

/// Agreement required between the manual and library statistics
pub const T_STAT_TOLERANCE: f64 = 1e-9;

/// Default confidence level for the mean difference interval
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// t = mean(d) / (std(d) / sqrt(n))
pub fn manual_t_statistic(difference: &[f64]) -> Result<f64> {
    if difference.len() < 2 {
        return Err(StroopError::InsufficientData(format!(
            "t-statistic needs at least 2 differences, got {}",
            difference.len()
        )));
    }

    let se = standard_error(difference);
    if !(se > 0.0) {
        return Err(StroopError::InsufficientData(
            "differences have zero variance".to_string(),
        ));
    }

    Ok(mean(difference) / se)
}

/// Result of a paired two-sided t-test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairedTTest {
    pub n: usize,
    /// Degrees of freedom, n - 1
    pub df: f64,
    pub mean_difference: f64,
    pub std_difference: f64,
    pub standard_error: f64,
    pub statistic: f64,
    /// Two-sided p-value
    pub p_value: f64,
    pub confidence_level: f64,
    /// Confidence interval for the mean difference
    pub confidence_interval: (f64, f64),
    /// Cohen's d_z: mean difference over its standard deviation
    pub effect_size: f64,
}

impl PairedTTest {
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Paired t-test of `a` against `b` (differences taken as `a - b`)
pub fn paired_t_test(a: &[f64], b: &[f64]) -> Result<PairedTTest> {
    paired_t_test_with_confidence(a, b, DEFAULT_CONFIDENCE)
}

/// Paired t-test with a custom confidence level for the interval
pub fn paired_t_test_with_confidence(
    a: &[f64],
    b: &[f64],
    confidence_level: f64,
) -> Result<PairedTTest> {
    if a.len() != b.len() {
        return Err(StroopError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(StroopError::InvalidParameter(format!(
            "confidence level must be in (0, 1), got {}",
            confidence_level
        )));
    }

    let n = a.len();
    if n < 2 {
        return Err(StroopError::InsufficientData(format!(
            "paired t-test needs at least 2 pairs, got {}",
            n
        )));
    }

    let d: Vec<f64> = a.iter().zip(b.iter()).map(|(x, y)| x - y).collect();
    let mean_difference = d.iter().mean();
    let std_difference = d.iter().std_dev();
    if !(std_difference > 0.0) {
        return Err(StroopError::InsufficientData(
            "differences have zero variance".to_string(),
        ));
    }

    let nf = n as f64;
    let df = nf - 1.0;
    let se = (d.iter().variance() / nf).sqrt();
    let statistic = mean_difference / se;

    let dist =
        StudentsT::new(0.0, 1.0, df).map_err(|e| StroopError::InvalidParameter(e.to_string()))?;
    let p_value = (2.0 * dist.sf(statistic.abs())).min(1.0);

    let t_critical = dist.inverse_cdf(1.0 - (1.0 - confidence_level) / 2.0);
    let margin = t_critical * se;

    Ok(PairedTTest {
        n,
        df,
        mean_difference,
        std_difference,
        standard_error: se,
        statistic,
        p_value,
        confidence_level,
        confidence_interval: (mean_difference - margin, mean_difference + margin),
        effect_size: mean_difference / std_difference,
    })
}

/// Comparison of the manual statistic with the library test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrossCheck {
    pub manual: f64,
    pub library: f64,
    pub abs_diff: f64,
    pub tolerance: f64,
    pub agrees: bool,
}

pub fn cross_check(manual: f64, test: &PairedTTest, tolerance: f64) -> CrossCheck {
    let abs_diff = (manual - test.statistic).abs();
    CrossCheck {
        manual,
        library: test.statistic,
        abs_diff,
        tolerance,
        agrees: abs_diff <= tolerance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_manual_statistic_small_example() {
        let t = manual_t_statistic(&[1.0, 2.0, 3.0]).unwrap();
        assert_relative_eq!(t, 3.464101615137754, epsilon = 1e-12);
    }

    #[test]
    fn test_paired_test_small_example() {
        let after = [11.0, 12.0, 13.0];
        let before = [10.0, 10.0, 10.0];
        let result = paired_t_test(&after, &before).unwrap();

        assert_eq!(result.n, 3);
        assert_relative_eq!(result.df, 2.0);
        assert_relative_eq!(result.mean_difference, 2.0, epsilon = 1e-12);
        assert_relative_eq!(result.std_difference, 1.0, epsilon = 1e-12);
        assert_relative_eq!(result.standard_error, 0.5773502691896258, epsilon = 1e-12);
        assert_relative_eq!(result.statistic, 3.464101615137754, epsilon = 1e-9);
        // df = 2 has a closed form: p = 1 - |t| / sqrt(t^2 + 2)
        assert_relative_eq!(result.p_value, 1.0 - 3.4641016151 / 14f64.sqrt(), epsilon = 1e-6);
        assert_relative_eq!(result.effect_size, 2.0, epsilon = 1e-12);

        let (lo, hi) = result.confidence_interval;
        assert_relative_eq!(lo, -0.48414, epsilon = 1e-4);
        assert_relative_eq!(hi, 4.48414, epsilon = 1e-4);
    }

    #[test]
    fn test_manual_matches_library() {
        let a = [19.278, 18.741, 21.214, 15.687, 22.803, 20.878];
        let b = [12.079, 16.791, 9.564, 8.630, 14.669, 12.238];
        let d: Vec<f64> = a.iter().zip(b.iter()).map(|(x, y)| x - y).collect();

        let manual = manual_t_statistic(&d).unwrap();
        let test = paired_t_test(&a, &b).unwrap();
        let check = cross_check(manual, &test, T_STAT_TOLERANCE);

        assert!(check.agrees, "manual {} vs library {}", manual, test.statistic);
    }

    #[test]
    fn test_swapping_samples_flips_sign() {
        let a = [5.0, 7.0, 6.5, 8.0];
        let b = [4.0, 5.5, 6.0, 6.0];
        let forward = paired_t_test(&a, &b).unwrap();
        let backward = paired_t_test(&b, &a).unwrap();

        assert_relative_eq!(forward.statistic, -backward.statistic, epsilon = 1e-12);
        assert_relative_eq!(forward.p_value, backward.p_value, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            paired_t_test(&[1.0, 2.0], &[1.0]),
            Err(StroopError::LengthMismatch { left: 2, right: 1 })
        ));
        assert!(matches!(
            paired_t_test(&[1.0], &[0.0]),
            Err(StroopError::InsufficientData(_))
        ));
        assert!(matches!(
            paired_t_test(&[2.0, 3.0, 4.0], &[1.0, 2.0, 3.0]),
            Err(StroopError::InsufficientData(_))
        ));
        assert!(matches!(
            paired_t_test_with_confidence(&[2.0, 3.0], &[1.0, 1.0], 1.5),
            Err(StroopError::InvalidParameter(_))
        ));
        assert!(manual_t_statistic(&[4.0, 4.0, 4.0]).is_err());
    }
}
