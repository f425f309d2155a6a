//! Head-to-head predictions from Gaussian skill ratings
//!
//! Each side is an alliance of one or more ratings. Performance of a member
//! is its skill plus Gaussian noise with variance `β²`, so an alliance's
//! performance is normal with mean `Σμ` and variance `Σ(β² + v)`.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Default performance noise for ratings on the 25 ± 25/3 scale
pub const DEFAULT_BETA: f64 = 25.0 / 6.0;

/// A skill estimate as used by the predictors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub mu: f64,
    pub variance: f64,
}

impl Rating {
    pub fn new(mu: f64, variance: f64) -> Self {
        Self { mu, variance }
    }

    fn is_valid(&self) -> bool {
        self.mu.is_finite() && self.variance.is_finite() && self.variance >= 0.0
    }
}

/// Standard normal cumulative distribution function
pub fn standard_normal_cdf(x: f64) -> f64 {
    Normal::standard().cdf(x)
}

/// Probability that `left` outperforms `right`
///
/// Returns `None` when either side is empty or holds a non-finite rating.
pub fn win_probability(left: &[Rating], right: &[Rating], beta: f64) -> Option<f64> {
    let (mu_l, var_l) = alliance(left, beta)?;
    let (mu_r, var_r) = alliance(right, beta)?;

    let spread = (var_l + var_r).sqrt();
    if !(spread > 0.0 && spread.is_finite()) {
        return None;
    }
    Some(standard_normal_cdf((mu_l - mu_r) / spread))
}

/// Draw quality of a one-on-one match, in (0, 1]
///
/// Higher means the outcome is less predictable.
pub fn match_quality(left: Rating, right: Rating, beta: f64) -> Option<f64> {
    if !(left.is_valid() && right.is_valid() && beta.is_finite()) {
        return None;
    }
    let two_beta_sq = 2.0 * beta * beta;
    let c_sq = two_beta_sq + left.variance + right.variance;
    if c_sq <= 0.0 {
        return None;
    }
    let diff = left.mu - right.mu;
    Some((two_beta_sq / c_sq).sqrt() * (-(diff * diff) / (2.0 * c_sq)).exp())
}

fn alliance(members: &[Rating], beta: f64) -> Option<(f64, f64)> {
    if members.is_empty() || !beta.is_finite() || members.iter().any(|r| !r.is_valid()) {
        return None;
    }
    let mu = members.iter().map(|r| r.mu).sum();
    let variance = members.iter().map(|r| beta * beta + r.variance).sum();
    Some((mu, variance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_normal_cdf() {
        assert!((standard_normal_cdf(0.0) - 0.5).abs() < 1e-15);
        assert!((standard_normal_cdf(1.96) - 0.975).abs() < 1e-4);
        assert!((standard_normal_cdf(-1.0) + standard_normal_cdf(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_equal_ratings_are_even() {
        let r = Rating::new(25.0, 8.0);
        let p = win_probability(&[r], &[r], DEFAULT_BETA).unwrap();
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_stronger_side_favored_and_symmetric() {
        let a = Rating::new(30.0, 4.0);
        let b = Rating::new(25.0, 4.0);
        let p_ab = win_probability(&[a], &[b], DEFAULT_BETA).unwrap();
        let p_ba = win_probability(&[b], &[a], DEFAULT_BETA).unwrap();
        assert!(p_ab > 0.5);
        assert!((p_ab + p_ba - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_alliance_sums() {
        let blue = [Rating::new(10.0, 1.0), Rating::new(10.0, 1.0), Rating::new(10.0, 1.0)];
        let red = [Rating::new(10.0, 1.0), Rating::new(10.0, 1.0), Rating::new(12.0, 1.0)];
        // x = (30 - 32) / sqrt(6 * (1 + 1)) with beta = 1
        let expected = standard_normal_cdf(-2.0 / 12.0_f64.sqrt());
        let p = win_probability(&blue, &red, 1.0).unwrap();
        assert!((p - expected).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_inputs() {
        let r = Rating::new(25.0, 8.0);
        assert_eq!(win_probability(&[], &[r], DEFAULT_BETA), None);
        assert_eq!(
            win_probability(&[Rating::new(f64::NAN, 1.0)], &[r], DEFAULT_BETA),
            None
        );
        assert_eq!(win_probability(&[Rating::new(1.0, 0.0)], &[Rating::new(1.0, 0.0)], 0.0), None);
        assert_eq!(match_quality(r, Rating::new(1.0, -1.0), DEFAULT_BETA), None);
    }

    #[test]
    fn test_match_quality() {
        let r = Rating::new(25.0, 0.0);
        // Identical, certain ratings are a perfect match
        assert!((match_quality(r, r, DEFAULT_BETA).unwrap() - 1.0).abs() < 1e-12);

        let far = Rating::new(60.0, 0.0);
        let q = match_quality(r, far, DEFAULT_BETA).unwrap();
        assert!(q > 0.0 && q < 0.01);
    }
}
