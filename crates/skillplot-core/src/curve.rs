//! Density curves for matched records

use serde::{Deserialize, Serialize};

use crate::model::VarianceMode;
use crate::scale::Scale;
use skillplot_io::RatingRecord;
use skillplot_stats::{sample_density, DomainError};

/// Parameters for sampling a record's density
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveOptions {
    /// Step between samples, in μ units
    pub resolution: f64,
    /// Half-width of the sampled window, in multiples of `sigma`
    pub tail_width: f64,
    pub variance_mode: VarianceMode,
}

impl Default for CurveOptions {
    fn default() -> Self {
        Self {
            resolution: 0.1,
            tail_width: 4.0,
            variance_mode: VarianceMode::default(),
        }
    }
}

/// Sample the density of `record` inside the scale's x domain
///
/// The window is `mu ± tail_width · sigma` whatever the variance mode; only
/// the density follows the mode. An absent record yields an empty curve. So
/// does a window that the domain clips away entirely. Invalid σ is reported
/// as a `DomainError`.
pub fn sample_curve(
    record: Option<&RatingRecord>,
    scale: &Scale,
    options: &CurveOptions,
) -> Result<Vec<(f64, f64)>, DomainError> {
    let Some(record) = record else {
        return Ok(Vec::new());
    };
    let g = options.variance_mode.gaussian(record)?;
    let half_width = options.tail_width * record.sigma;
    sample_density(&g, scale.x.domain(), half_width, options.resolution)
}

/// Map data-space samples to pixels
pub fn to_pixels(samples: &[(f64, f64)], scale: &Scale) -> Vec<(f64, f64)> {
    samples
        .iter()
        .map(|&(x, y)| scale.to_pixel(x, y))
        .collect()
}
