//! Assertions for floating-point totals.

/// Asserts that two totals agree within a relative tolerance of 1e-9.
///
/// # Panics
///
/// Panics when the totals differ by more than the tolerance.
pub fn assert_total_eq(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected total {expected}, got {actual}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_rounding_noise() {
        assert_total_eq(100.0 * 1.1 + 50.0 * 1.1, 165.0);
    }

    #[test]
    #[should_panic(expected = "expected total 165")]
    fn test_rejects_real_difference() {
        assert_total_eq(164.0, 165.0);
    }
}
