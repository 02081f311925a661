//! Noise suppression ahead of the trend fit.
//!
//! Both smoothers work on sample positions, not calendar days, so irregular
//! spacing is tolerated.

/// Trailing mean over `window` consecutive samples.
///
/// Output has the same length as the input; the first `window - 1` positions
/// are `None`. A zero window yields all `None`.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }
    for i in (window - 1)..values.len() {
        let chunk = &values[i + 1 - window..=i];
        out[i] = Some(chunk.iter().sum::<f64>() / window as f64);
    }
    out
}

/// Exponentially weighted moving average with `alpha = 2 / (span + 1)`.
///
/// Seeded with the first raw value; aligned one-to-one with the input.
pub fn ewma(values: &[f64], span: usize) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    out.push(first);
    let mut prev = first;
    for &v in &values[1..] {
        prev = alpha * v + (1.0 - alpha) * prev;
        out.push(prev);
    }
    out
}
