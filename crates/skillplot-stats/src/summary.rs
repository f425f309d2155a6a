//! Summary statistics for rating columns
//!
//! Rating tables may hold NaN where a cell failed to parse. Every statistic
//! here is computed over the finite values only; the rest are counted as
//! missing.

use serde::{Deserialize, Serialize};

/// Summary statistics for a numeric column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of finite values
    pub count: usize,
    /// Number of missing/NaN values
    pub missing: usize,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Mean (average)
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Median (50th percentile)
    pub median: f64,
}

impl SummaryStats {
    /// Compute summary statistics from data
    pub fn from_data(data: &[f64]) -> Self {
        let mut finite: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
        let missing = data.len() - finite.len();

        if finite.is_empty() {
            return Self::empty(missing);
        }

        let count = finite.len();
        let mean = finite.iter().sum::<f64>() / count as f64;
        let variance = finite.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count as f64;

        finite.sort_by(f64::total_cmp);
        let min = finite[0];
        let max = finite[count - 1];
        let median = if count % 2 == 0 {
            (finite[count / 2 - 1] + finite[count / 2]) / 2.0
        } else {
            finite[count / 2]
        };

        Self {
            count,
            missing,
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
            median,
        }
    }

    /// Create empty statistics (all NaN)
    fn empty(missing: usize) -> Self {
        Self {
            count: 0,
            missing,
            min: f64::NAN,
            max: f64::NAN,
            mean: f64::NAN,
            std_dev: f64::NAN,
            median: f64::NAN,
        }
    }

    /// True when no finite value was seen
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `(min, max)` over finite values, if any
    pub fn extent(&self) -> Option<(f64, f64)> {
        (!self.is_empty()).then_some((self.min, self.max))
    }
}

/// Maximum over finite values
pub fn finite_max(data: &[f64]) -> Option<f64> {
    data.iter().copied().filter(|x| x.is_finite()).reduce(f64::max)
}
