//! Normal probability density and curve sampling
//!
//! The density is evaluated in closed form:
//!
//! ```text
//! f(x) = 1 / sqrt(2π·v) · exp(−(x − m)² / (2·v))
//! ```
//!
//! Curves are sampled eagerly on a fixed step inside a window around the
//! mean, clipped to the caller's visible domain. The window's half-width is
//! supplied by the caller and need not match the density's spread.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use thiserror::Error;

/// Upper bound on samples produced for a single curve
pub const MAX_CURVE_SAMPLES: usize = 1_000_000;

/// Rejected inputs to the density evaluator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("variance must be positive and finite, got {0}")]
    InvalidVariance(f64),

    #[error("mean must be finite, got {0}")]
    InvalidMean(f64),

    #[error("sampling resolution must be positive and finite, got {0}")]
    InvalidResolution(f64),

    #[error("resolution {resolution} would produce {samples} samples (max {MAX_CURVE_SAMPLES})")]
    ResolutionTooFine { resolution: f64, samples: usize },
}

/// A normal distribution parameterized by mean and variance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gaussian {
    mean: f64,
    variance: f64,
    /// 1 / sqrt(2π·variance), independent of x
    norm: f64,
}

impl Gaussian {
    /// Create a distribution, rejecting non-positive or non-finite variance
    pub fn new(mean: f64, variance: f64) -> Result<Self, DomainError> {
        if !mean.is_finite() {
            return Err(DomainError::InvalidMean(mean));
        }
        if !(variance.is_finite() && variance > 0.0) {
            return Err(DomainError::InvalidVariance(variance));
        }
        Ok(Self {
            mean,
            variance,
            norm: 1.0 / (2.0 * PI * variance).sqrt(),
        })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Density at `x`
    pub fn pdf(&self, x: f64) -> f64 {
        let d = x - self.mean;
        self.norm * (-(d * d) / (2.0 * self.variance)).exp()
    }

    /// Density at the mean, the curve's maximum
    pub fn peak(&self) -> f64 {
        self.norm
    }

    /// Interval of `half_width` either side of the mean, intersected with
    /// `clip`
    pub fn window(&self, half_width: f64, clip: (f64, f64)) -> (f64, f64) {
        (
            (self.mean - half_width).max(clip.0),
            (self.mean + half_width).min(clip.1),
        )
    }
}

/// Build a density function for `(mean, variance)`
pub fn density(mean: f64, variance: f64) -> Result<impl Fn(f64) -> f64, DomainError> {
    let g = Gaussian::new(mean, variance)?;
    Ok(move |x| g.pdf(x))
}

/// Peak density for a given variance, NaN-free
pub fn peak_density(variance: f64) -> Result<f64, DomainError> {
    Gaussian::new(0.0, variance).map(|g| g.peak())
}

/// Sample `g` on `[lower, upper)` with a fixed step
///
/// The window is `half_width` either side of the mean clipped to `clip`. An
/// empty or inverted window yields an empty curve. Samples are strictly
/// ascending in x.
pub fn sample_density(
    g: &Gaussian,
    clip: (f64, f64),
    half_width: f64,
    resolution: f64,
) -> Result<Vec<(f64, f64)>, DomainError> {
    if !(resolution.is_finite() && resolution > 0.0) {
        return Err(DomainError::InvalidResolution(resolution));
    }

    let (lower, upper) = g.window(half_width, clip);
    if !(lower < upper) {
        return Ok(Vec::new());
    }

    let steps = ((upper - lower) / resolution).ceil();
    if steps > MAX_CURVE_SAMPLES as f64 {
        return Err(DomainError::ResolutionTooFine {
            resolution,
            samples: steps as usize,
        });
    }

    let mut samples: Vec<(f64, f64)> = Vec::with_capacity(steps as usize);
    for i in 0..steps as usize {
        let x = lower + i as f64 * resolution;
        if x >= upper {
            break;
        }
        if samples.last().is_some_and(|&(prev, _)| x <= prev) {
            continue;
        }
        samples.push((x, g.pdf(x)));
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_peak_matches_analytic() {
        let g = Gaussian::new(1500.0, 200.0 * 200.0).unwrap();
        let expected = 1.0 / (2.0 * PI * 40_000.0).sqrt();
        assert!((g.pdf(1500.0) - expected).abs() < 1e-15);
        assert_eq!(g.peak(), g.pdf(1500.0));
    }

    #[test]
    fn test_integrates_to_one() {
        let (mean, sd) = (1500.0, 200.0);
        let f = density(mean, sd * sd).unwrap();

        // Trapezoid rule over ±10σ
        let n = 20_000;
        let (a, b) = (mean - 10.0 * sd, mean + 10.0 * sd);
        let h = (b - a) / n as f64;
        let inner: f64 = (1..n).map(|i| f(a + i as f64 * h)).sum();
        let integral = h * (0.5 * (f(a) + f(b)) + inner);

        assert!((integral - 1.0).abs() < 1e-6, "integral = {}", integral);
    }

    #[test]
    fn test_rejects_bad_variance() {
        assert_eq!(
            Gaussian::new(0.0, 0.0).unwrap_err(),
            DomainError::InvalidVariance(0.0)
        );
        assert!(Gaussian::new(0.0, -1.0).is_err());
        assert!(Gaussian::new(0.0, f64::NAN).is_err());
        assert!(Gaussian::new(f64::INFINITY, 1.0).is_err());
        assert!(density(1.0, -4.0).is_err());
        assert!(peak_density(0.0).is_err());
    }

    #[test]
    fn test_window_is_clipped() {
        let g = Gaussian::new(0.0, 1.0).unwrap();
        assert_eq!(g.window(4.0, (-10.0, 10.0)), (-4.0, 4.0));
        assert_eq!(g.window(4.0, (-1.0, 2.0)), (-1.0, 2.0));
    }

    #[test]
    fn test_window_width_independent_of_variance() {
        // variance 200 with a half-width of 4·200
        let g = Gaussian::new(1500.0, 200.0).unwrap();
        assert_eq!(g.window(800.0, (500.0, 2600.0)), (700.0, 2300.0));
    }

    #[test]
    fn test_sample_empty_window() {
        let g = Gaussian::new(100.0, 1.0).unwrap();
        // Entire window lies outside the visible domain
        let samples = sample_density(&g, (0.0, 10.0), 4.0, 0.1).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn test_sample_count_and_bounds() {
        let g = Gaussian::new(0.0, 1.0).unwrap();
        let samples = sample_density(&g, (-100.0, 100.0), 4.0, 0.5).unwrap();
        // -4.0, -3.5, ..., 3.5
        assert_eq!(samples.len(), 16);
        assert_eq!(samples[0].0, -4.0);
        assert_eq!(samples[15].0, 3.5);
    }

    #[test]
    fn test_sample_rejects_bad_resolution() {
        let g = Gaussian::new(0.0, 1.0).unwrap();
        assert!(matches!(
            sample_density(&g, (-1.0, 1.0), 4.0, 0.0),
            Err(DomainError::InvalidResolution(_))
        ));
        assert!(matches!(
            sample_density(&g, (-1.0, 1.0), 4.0, 1e-9),
            Err(DomainError::ResolutionTooFine { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_peak_is_analytic(mean in -1e4f64..1e4, variance in 1e-3f64..1e6) {
            let g = Gaussian::new(mean, variance).unwrap();
            let expected = 1.0 / (2.0 * PI * variance).sqrt();
            prop_assert!((g.pdf(mean) - expected).abs() <= expected * 1e-12);
        }

        #[test]
        fn prop_samples_ordered_within_window(
            mean in -1e3f64..1e3,
            variance in 0.01f64..1e4,
            clip_lo in -2e3f64..0.0,
            clip_width in 1.0f64..4e3,
            resolution in 0.05f64..5.0,
        ) {
            let g = Gaussian::new(mean, variance).unwrap();
            let clip = (clip_lo, clip_lo + clip_width);
            let (lower, upper) = g.window(4.0, clip);
            let samples = sample_density(&g, clip, 4.0, resolution).unwrap();

            for pair in samples.windows(2) {
                prop_assert!(pair[0].0 < pair[1].0);
            }
            for &(x, y) in &samples {
                prop_assert!(x >= lower && x <= upper);
                prop_assert!(y.is_finite() && y >= 0.0);
            }
        }
    }
}
