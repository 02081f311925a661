//! Small summary statistics.

/// Median of `values`, or `None` for an empty slice.
///
/// Even-length input averages the two middle values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    let mid = n / 2;
    if n % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Round to `decimals` places, exact halves to even.
///
/// Scale readings in quarter pounds make exact ties common (`150.125`), so
/// the tie rule is visible in reports.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let rounded = (value * scale).round_ties_even() / scale;
    // Keep `-0.0` out of reports.
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_odd_even_and_empty() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[7.5]), Some(7.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn round_to_places() {
        assert_eq!(round_to(-1.39999, 3), -1.4);
        assert_eq!(round_to(150.004, 2), 150.0);
        assert_eq!(round_to(-0.0001, 2), 0.0);
        assert!(round_to(-0.0001, 2).is_sign_positive());
    }

    #[test]
    fn exact_ties_round_to_even() {
        assert_eq!(round_to(150.125, 2), 150.12);
        assert_eq!(round_to(150.375, 2), 150.38);
        assert_eq!(round_to(-0.125, 2), -0.12);
        assert_eq!(round_to(0.0625, 3), 0.062);
    }
}
