//! Number rounding and formatting for display

/// Round to `decimals` places, ties away from zero
///
/// The shift is done on the shortest decimal representation of `value`, so
/// `1500.005` rounds to `1500.01` even though its binary value sits slightly
/// below the tie. Non-finite values are returned unchanged.
pub fn round_half_away(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let shifted = match format!("{}e{}", value, decimals).parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return value,
    };
    format!("{}e-{}", shifted.round(), decimals)
        .parse::<f64>()
        .unwrap_or(value)
}

/// Round to 2 decimal places, ties away from zero
pub fn round2(value: f64) -> f64 {
    round_half_away(value, 2)
}

/// Shortest text for a value rounded to 2 places (`1500`, `1500.01`)
pub fn display2(value: f64) -> String {
    format!("{}", round2(value))
}

/// Format an axis tick label
pub fn format_tick(value: f64, step: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.abs() >= 1e6 || value.abs() < 1e-4 {
        return format!("{:.1e}", value);
    }
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10() - 1e-9).ceil().max(0.0) as usize
    };
    format!("{:.prec$}", value, prec = decimals)
}

/// Format a probability as a percentage with one decimal, ties away from zero
pub fn format_percent(p: f64) -> String {
    // round before scaling; 0.8765 * 100.0 is already below the tie
    format!("{:.1}%", round_half_away(p, 3) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_decimal_ties() {
        assert_eq!(round2(1500.005), 1500.01);
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(2.675), 2.68);
        assert_eq!(round2(0.125), 0.13);
    }

    #[test]
    fn test_round_away_from_zero() {
        assert_eq!(round2(-1.005), -1.01);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round_half_away(2.5, 0), 3.0);
        assert_eq!(round_half_away(-2.5, 0), -3.0);
    }

    #[test]
    fn test_round_non_ties() {
        assert_eq!(round2(31.4159), 31.42);
        assert_eq!(round2(1500.0), 1500.0);
        assert_eq!(round2(1e-9), 0.0);
        assert!(round2(f64::NAN).is_nan());
        assert_eq!(round2(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_display2() {
        assert_eq!(display2(1500.0), "1500");
        assert_eq!(display2(1500.005), "1500.01");
        assert_eq!(display2(8.333333), "8.33");
        assert_eq!(display2(f64::NAN), "NaN");
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(0.0, 0.1), "0");
        assert_eq!(format_tick(1500.0, 100.0), "1500");
        assert_eq!(format_tick(0.15, 0.05), "0.15");
        assert_eq!(format_tick(0.2, 0.1), "0.2");
        assert!(format_tick(2e7, 1e6).contains('e'));
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.5), "50.0%");
        assert_eq!(format_percent(0.8765), "87.7%");
        assert_eq!(format_percent(0.0125), "1.3%");
        assert_eq!(format_percent(1.0), "100.0%");
    }
}
