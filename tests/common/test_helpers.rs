//! Helper functions for integration tests

use ndarray::ArrayView1;
use pdenclose_rs::domain::Numeric;

/// Assert that a computed real row matches `expected` element-wise
pub fn assert_rows_close(actual: ArrayView1<'_, f64>, expected: &[f64], tolerance: f64, message: &str) {
    assert_eq!(actual.len(), expected.len(), "{}: Dimension mismatch", message);

    for (i, (v1, v2)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (v1 - v2).abs();
        assert!(
            diff < tolerance,
            "{}: Element {} differs by {} (tolerance {})",
            message, i, diff, tolerance
        );
    }
}

/// Assert that the enclosure of `set` contains `value` (up to rounding)
pub fn assert_encloses<T: Numeric>(set: &T, value: f64, message: &str) {
    let (lo, hi) = set.enclosure();
    let slack = 1e-9 * (1.0 + value.abs());
    assert!(
        lo - slack <= value && value <= hi + slack,
        "{}: {} escapes [{}, {}]",
        message, value, lo, hi
    );
}

/// Maximum absolute difference between a row and a reference
pub fn max_error(actual: ArrayView1<'_, f64>, expected: &[f64]) -> f64 {
    actual
        .iter()
        .zip(expected)
        .map(|(a, e)| (a - e).abs())
        .fold(0.0, f64::max)
}

/// `Σ wᵢ·uᵢ`
pub fn row_mass(row: ArrayView1<'_, f64>, widths: &[f64]) -> f64 {
    row.iter().zip(widths).map(|(u, w)| u * w).sum()
}

/// `sin(2πx)` sampled on `n` cells of the unit interval
pub fn sine_profile(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| (2.0 * std::f64::consts::PI * i as f64 / n as f64).sin())
        .collect()
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_error() {
        assert!((relative_error(1.0, 1.0) - 0.0).abs() < 1e-10);
        assert!((relative_error(1.1, 1.0) - 0.1).abs() < 1e-10);
        assert!((relative_error(0.9, 1.0) - 0.1).abs() < 1e-10);
    }
}
