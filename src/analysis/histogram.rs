//! Text histograms
//!
//! Bins follow the numpy convention: `bins` equal-width intervals over
//! `[lo, hi]`, each half-open except the last, which also includes `hi`.

use crate::error::{Result, StroopError};
use serde::{Deserialize, Serialize};

/// Default number of bins, same as numpy and pandas
pub const DEFAULT_BINS: usize = 10;

/// Equal-width histogram of a sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub lo: f64,
    pub hi: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Histogram over the sample's own range
    pub fn new(data: &[f64], bins: usize) -> Result<Self> {
        let (lo, hi) = value_range(data)?;
        Self::with_range(data, bins, lo, hi)
    }

    /// Histogram over a fixed range; values outside it are not counted
    pub fn with_range(data: &[f64], bins: usize, lo: f64, hi: f64) -> Result<Self> {
        if bins == 0 {
            return Err(StroopError::InvalidParameter(
                "histogram needs at least one bin".to_string(),
            ));
        }
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(StroopError::InvalidParameter(format!(
                "invalid histogram range [{}, {}]",
                lo, hi
            )));
        }

        let width = (hi - lo) / bins as f64;
        let mut counts = vec![0; bins];
        for &x in data.iter().filter(|x| (lo..=hi).contains(*x)) {
            let idx = if x == hi {
                bins - 1
            } else {
                (((x - lo) / width) as usize).min(bins - 1)
            };
            counts[idx] += 1;
        }

        Ok(Self { lo, hi, counts })
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn bin_width(&self) -> f64 {
        (self.hi - self.lo) / self.bins() as f64
    }

    /// Bin edges, `bins + 1` values from `lo` to `hi`
    pub fn edges(&self) -> Vec<f64> {
        let width = self.bin_width();
        (0..=self.bins())
            .map(|i| {
                if i == self.bins() {
                    self.hi
                } else {
                    self.lo + i as f64 * width
                }
            })
            .collect()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Render as text, bars scaled so that `scale_max` fills `width` columns
    pub fn render(&self, name: &str, width: usize, scale_max: usize) -> String {
        let mut result = format!("\n{} (n={}):\n", name, self.total());
        result.push_str(&"-".repeat(width + 28));
        result.push('\n');

        let scale_max = scale_max.max(1);
        let edges = self.edges();
        for (i, &count) in self.counts.iter().enumerate() {
            let bar_len = (count as f64 / scale_max as f64 * width as f64).round() as usize;
            result.push_str(&format!(
                "{:>8.2} - {:>8.2} | {:>3} |{}\n",
                edges[i],
                edges[i + 1],
                count,
                "#".repeat(bar_len)
            ));
        }

        result
    }
}

/// Layout options for a set of histogram panels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramOptions {
    pub bins: usize,
    /// Width of the longest bar in characters
    pub width: usize,
    /// Use one common range for all panels
    pub sharex: bool,
    /// Scale all panels to one common maximum count
    pub sharey: bool,
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            width: 40,
            sharex: true,
            sharey: true,
        }
    }
}

/// Build and render one histogram panel per named sample
pub fn render_histograms(panels: &[(&str, &[f64])], options: &HistogramOptions) -> Result<String> {
    let shared_range = if options.sharex {
        let all: Vec<f64> = panels.iter().flat_map(|(_, d)| d.iter().copied()).collect();
        Some(value_range(&all)?)
    } else {
        None
    };

    let histograms = panels
        .iter()
        .map(|(name, data)| {
            let hist = match shared_range {
                Some((lo, hi)) => Histogram::with_range(data, options.bins, lo, hi)?,
                None => Histogram::new(data, options.bins)?,
            };
            Ok((*name, hist))
        })
        .collect::<Result<Vec<_>>>()?;

    let shared_max = histograms.iter().map(|(_, h)| h.max_count()).max().unwrap_or(0);

    Ok(histograms
        .iter()
        .map(|(name, hist)| {
            let scale = if options.sharey {
                shared_max
            } else {
                hist.max_count()
            };
            hist.render(name, options.width, scale)
        })
        .collect())
}

/// Range of a sample; a constant sample gets a unit-wide range around it
fn value_range(data: &[f64]) -> Result<(f64, f64)> {
    let finite = data.iter().copied().filter(|x| x.is_finite());
    let (lo, hi) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
        (lo.min(x), hi.max(x))
    });

    if lo > hi {
        return Err(StroopError::InsufficientData(
            "histogram of an empty sample".to_string(),
        ));
    }
    if lo == hi {
        return Ok((lo - 0.5, hi + 0.5));
    }
    Ok((lo, hi))
}
