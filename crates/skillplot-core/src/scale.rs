//! Linear scales for both charts
//!
//! Domains are derived once from the rating table when a chart becomes
//! ready. The x domain pads the μ range by the largest σ so every curve
//! and point fits; the y domain depends on the chart.

use serde::{Deserialize, Serialize};

use crate::format::format_tick;
use crate::model::VarianceMode;
use skillplot_io::RatingTable;
use skillplot_stats::{finite_max, peak_density, SummaryStats};

/// Domain used when the table gives nothing to derive from
pub const FALLBACK_DOMAIN: (f64, f64) = (0.0, 1.0);

/// Default number of ticks requested per axis
pub const DEFAULT_TICK_COUNT: usize = 10;

/// Upper bound on ticks returned, as a multiple of the requested count
const MAX_TICKS_PER_REQUEST: usize = 10;

/// A monotonic linear mapping from a value domain to a pixel range
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Create a scale; a degenerate domain is repaired first
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain: sanitize_domain(domain),
            range,
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a domain value to a pixel coordinate
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Map a pixel coordinate back to the domain
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + (pixel - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Nicely spaced ticks (1, 2 or 5 × 10ⁿ) inside the domain
    pub fn ticks(&self, count: usize) -> Vec<Tick> {
        let (lo, hi) = self.domain;
        let span = hi - lo;
        if !(span > 0.0) || count == 0 {
            return vec![];
        }

        let step = nice_step(span / count as f64);
        let start = (lo / step).ceil();
        let stop = (hi / step).floor();
        let n = stop - start + 1.0;
        if !(n >= 1.0) {
            return vec![];
        }
        // far from zero, start + i stops being exact; bound the count instead
        let n = n.min((count * MAX_TICKS_PER_REQUEST) as f64) as usize;

        let mut ticks: Vec<Tick> = Vec::with_capacity(n);
        for i in 0..n {
            let value = (start + i as f64) * step;
            if ticks.last().is_some_and(|t| value <= t.value) {
                continue;
            }
            ticks.push(Tick {
                value,
                position: self.map(value),
                label: format_tick(value, step),
            });
        }
        ticks
    }
}

/// A tick mark placed on an axis
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Position in data coordinates
    pub value: f64,
    /// Position in pixels along the axis
    pub position: f64,
    /// Label text
    pub label: String,
}

/// Paired x and y scales for one chart
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl Scale {
    /// Map a data point to pixels
    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        (self.x.map(x), self.y.map(y))
    }
}

/// How a chart's y domain is derived
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum YDomain {
    /// `[0, max σ]`
    Spread,
    /// `[0, max peak density]` over all records
    PeakDensity(VarianceMode),
    /// `[0, ceiling]`
    Fixed(f64),
}

/// Derive a chart's scales from the table
pub fn build_scale(
    table: &RatingTable,
    y: YDomain,
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> Scale {
    let y_domain = match y {
        YDomain::Spread => spread_domain(table),
        YDomain::PeakDensity(mode) => peak_density_domain(table, mode),
        YDomain::Fixed(ceiling) => (0.0, ceiling),
    };
    Scale {
        x: LinearScale::new(mean_domain(table), x_range),
        y: LinearScale::new(y_domain, y_range),
    }
}

/// `[min μ − max σ, max μ + max σ]` over finite values
pub fn mean_domain(table: &RatingTable) -> (f64, f64) {
    let mu = SummaryStats::from_data(&table.mus());
    let pad = finite_max(&table.sigmas()).unwrap_or(0.0);
    match mu.extent() {
        Some((lo, hi)) => (lo - pad, hi + pad),
        None => FALLBACK_DOMAIN,
    }
}

/// `[0, max σ]`
pub fn spread_domain(table: &RatingTable) -> (f64, f64) {
    finite_max(&table.sigmas()).map_or(FALLBACK_DOMAIN, |max| (0.0, max))
}

/// `[0, tallest curve peak]`; records with invalid σ are skipped
pub fn peak_density_domain(table: &RatingTable, mode: VarianceMode) -> (f64, f64) {
    let peaks: Vec<f64> = table
        .records()
        .iter()
        .filter_map(|r| mode.variance(r.sigma).ok())
        .filter_map(|v| peak_density(v).ok())
        .collect();
    finite_max(&peaks).map_or(FALLBACK_DOMAIN, |max| (0.0, max))
}

/// Replace NaN, infinite or inverted domains with a usable one
pub fn sanitize_domain((lo, hi): (f64, f64)) -> (f64, f64) {
    if !(lo.is_finite() && hi.is_finite()) || hi < lo {
        return FALLBACK_DOMAIN;
    }
    if hi == lo {
        return if lo == 0.0 {
            FALLBACK_DOMAIN
        } else {
            (lo - 0.5, lo + 0.5)
        };
    }
    (lo, hi)
}

fn nice_step(rough: f64) -> f64 {
    let magnitude = 10.0_f64.powf(rough.log10().floor());
    let residual = rough / magnitude;
    let nice = if residual <= 1.5 {
        1.0
    } else if residual <= 3.0 {
        2.0
    } else if residual <= 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use skillplot_io::RatingRecord;

    fn table() -> RatingTable {
        RatingTable::new(vec![
            RatingRecord::new("A", 1500.0, 200.0, 2.0),
            RatingRecord::new("B", 1600.0, 150.0, 1.0),
            RatingRecord::new("C", f64::NAN, f64::NAN, 3.0),
        ])
    }

    #[test]
    fn test_mean_domain_padded_by_max_sigma() {
        assert_eq!(mean_domain(&table()), (1300.0, 1800.0));
    }

    #[test]
    fn test_spread_domain() {
        assert_eq!(spread_domain(&table()), (0.0, 200.0));
    }

    #[test]
    fn test_peak_density_domain_uses_smallest_variance() {
        let (lo, hi) = peak_density_domain(&table(), VarianceMode::SigmaIsStdDev);
        assert_eq!(lo, 0.0);
        let expected = 1.0 / (2.0 * std::f64::consts::PI * 150.0 * 150.0).sqrt();
        assert!((hi - expected).abs() < 1e-15);
    }

    #[test]
    fn test_empty_table_falls_back() {
        let empty = RatingTable::default();
        let scale = build_scale(&empty, YDomain::Spread, (40.0, 780.0), (560.0, 20.0));
        assert_eq!(scale.x.domain(), FALLBACK_DOMAIN);
        assert_eq!(scale.y.domain(), FALLBACK_DOMAIN);
        assert!(scale.x.map(0.5).is_finite());
        assert_eq!(
            peak_density_domain(&empty, VarianceMode::SigmaIsVariance),
            FALLBACK_DOMAIN
        );
    }

    #[test]
    fn test_sanitize_domain() {
        assert_eq!(sanitize_domain((f64::NAN, 1.0)), FALLBACK_DOMAIN);
        assert_eq!(sanitize_domain((2.0, 1.0)), FALLBACK_DOMAIN);
        assert_eq!(sanitize_domain((0.0, 0.0)), FALLBACK_DOMAIN);
        assert_eq!(sanitize_domain((10.0, 10.0)), (9.5, 10.5));
        assert_eq!(sanitize_domain((1.0, 2.0)), (1.0, 2.0));
    }

    #[test]
    fn test_map_flipped_range() {
        let y = LinearScale::new((0.0, 200.0), (560.0, 20.0));
        assert_eq!(y.map(0.0), 560.0);
        assert_eq!(y.map(200.0), 20.0);
        assert_eq!(y.map(100.0), 290.0);
    }

    #[test]
    fn test_fixed_y_domain() {
        let scale = build_scale(&table(), YDomain::Fixed(0.4), (20.0, 780.0), (180.0, 20.0));
        assert_eq!(scale.y.domain(), (0.0, 0.4));
        assert_eq!(scale.to_pixel(1300.0, 0.0), (20.0, 180.0));
    }

    #[test]
    fn test_ticks() {
        let scale = LinearScale::new((1300.0, 1800.0), (0.0, 500.0));
        let ticks = scale.ticks(10);
        let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
        assert_eq!(values.first(), Some(&1300.0));
        assert_eq!(values.last(), Some(&1800.0));
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[1].label, "1350");
        assert_eq!(ticks[1].position, 50.0);
    }

    #[test]
    fn test_ticks_fractional() {
        let scale = LinearScale::new((0.0, 0.4), (180.0, 20.0));
        let labels: Vec<String> = scale.ticks(5).into_iter().map(|t| t.label).collect();
        assert_eq!(labels.first().map(String::as_str), Some("0"));
        assert!(labels.iter().any(|l| l == "0.1" || l == "0.05"));
    }

    #[test]
    fn test_ticks_far_from_zero_are_bounded() {
        let scale = LinearScale::new((1e18 - 500.0, 1e18 + 500.0), (0.0, 100.0));
        let ticks = scale.ticks(10);
        assert!(!ticks.is_empty());
        assert!(ticks.len() <= 100);
        assert!(ticks.windows(2).all(|w| w[0].value < w[1].value));
    }

    proptest! {
        #[test]
        fn prop_invert_round_trips(
            lo in -1e4f64..1e4,
            width in 1e-3f64..1e4,
            value in 0.0f64..1.0,
        ) {
            let scale = LinearScale::new((lo, lo + width), (40.0, 780.0));
            let v = lo + value * width;
            let back = scale.invert(scale.map(v));
            prop_assert!((back - v).abs() <= 1e-6 * (1.0 + v.abs()));
        }

        #[test]
        fn prop_ticks_inside_domain(lo in -1e4f64..1e4, width in 1e-2f64..1e4) {
            let scale = LinearScale::new((lo, lo + width), (0.0, 100.0));
            for tick in scale.ticks(DEFAULT_TICK_COUNT) {
                prop_assert!(tick.value >= lo - 1e-9 * width.max(1.0));
                prop_assert!(tick.value <= lo + width + 1e-9 * width.max(1.0));
            }
        }
    }
}
