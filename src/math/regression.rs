//! Least-squares slope.
//!
//! Only the slope of `y = a + b x` is needed, so we use the centered closed
//! form `b = Σ(x-x̄)(y-ȳ) / Σ(x-x̄)²` on `nalgebra` vectors rather than a full
//! design-matrix solve.

use nalgebra::DVector;

/// Slope of the OLS line through `(xs[i], ys[i])`.
///
/// Returns `0.0` for fewer than two points, mismatched lengths, or zero
/// variance in `x`.
pub fn linear_regression_slope(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len();
    if n < 2 || ys.len() != n {
        return 0.0;
    }
    let x = DVector::from_column_slice(xs);
    let y = DVector::from_column_slice(ys);

    let dx = x.add_scalar(-x.mean());
    let dy = y.add_scalar(-y.mean());

    let den = dx.dot(&dx);
    if den == 0.0 {
        return 0.0;
    }
    dx.dot(&dy) / den
}
