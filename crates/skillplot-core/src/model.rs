//! Interpretation of a record's `sigma` column
//!
//! Rating exports disagree on whether `sigma` holds a standard deviation or a
//! variance. The chart historically fed `sigma` straight into the density as
//! its variance; `SigmaIsStdDev` squares it first.

use serde::{Deserialize, Serialize};
use skillplot_io::RatingRecord;
use skillplot_stats::{DomainError, Gaussian, Rating};

/// How `sigma` maps onto a distribution's variance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceMode {
    /// `variance = sigma`
    #[default]
    SigmaIsVariance,
    /// `variance = sigma²`
    SigmaIsStdDev,
}

impl VarianceMode {
    /// Variance for a positive `sigma`
    pub fn variance(&self, sigma: f64) -> Result<f64, DomainError> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(DomainError::InvalidVariance(sigma));
        }
        Ok(match self {
            VarianceMode::SigmaIsVariance => sigma,
            VarianceMode::SigmaIsStdDev => sigma * sigma,
        })
    }

    /// Density model for a record
    pub fn gaussian(&self, record: &RatingRecord) -> Result<Gaussian, DomainError> {
        Gaussian::new(record.mu, self.variance(record.sigma)?)
    }

    /// Predictor rating for a record
    pub fn rating(&self, record: &RatingRecord) -> Result<Rating, DomainError> {
        let g = self.gaussian(record)?;
        Ok(Rating::new(g.mean(), g.variance()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            VarianceMode::SigmaIsVariance => "σ as variance",
            VarianceMode::SigmaIsStdDev => "σ as std dev",
        }
    }
}
