//! Shared numeric assertions.
//!
//! All comparisons use |actual - expected| <= atol + rtol * |expected|, the
//! `numpy.testing.assert_allclose` rule.

use num_complex::Complex64;

#[must_use]
pub fn within_tolerance(actual: f64, expected: f64, atol: f64, rtol: f64) -> bool {
    let tol = atol + rtol * expected.abs();
    (actual - expected).abs() <= tol
}

pub fn assert_close(actual: f64, expected: f64, atol: f64, rtol: f64) {
    let tol = atol + rtol * expected.abs();
    assert!(
        (actual - expected).abs() <= tol,
        "assert_close failed: actual={actual} expected={expected} diff={} tol={tol} (atol={atol}, rtol={rtol})",
        (actual - expected).abs()
    );
}

pub fn assert_close_slice(actual: &[f64], expected: &[f64], atol: f64, rtol: f64) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "assert_close_slice: length mismatch: actual={} expected={}",
        actual.len(),
        expected.len()
    );
    for (idx, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let tol = atol + rtol * e.abs();
        assert!(
            (a - e).abs() <= tol,
            "assert_close_slice[{idx}]: actual={a} expected={e} diff={} tol={tol}",
            (a - e).abs()
        );
    }
}

/// Complex variant; the tolerance is applied to the modulus of the difference.
pub fn assert_close_complex_slice(
    actual: &[Complex64],
    expected: &[Complex64],
    atol: f64,
    rtol: f64,
) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "assert_close_complex_slice: length mismatch: actual={} expected={}",
        actual.len(),
        expected.len()
    );
    for (idx, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let tol = atol + rtol * e.norm();
        let diff = (a - e).norm();
        assert!(
            diff <= tol,
            "assert_close_complex_slice[{idx}]: actual={a} expected={e} diff={diff} tol={tol}"
        );
    }
}

pub fn assert_close_matrix(
    actual: &[Vec<Complex64>],
    expected: &[Vec<Complex64>],
    atol: f64,
    rtol: f64,
) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "assert_close_matrix: row count mismatch: actual={} expected={}",
        actual.len(),
        expected.len()
    );
    for (row_idx, (a_row, e_row)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a_row.len(),
            e_row.len(),
            "assert_close_matrix: column count mismatch at row {row_idx}"
        );
        for (col_idx, (a, e)) in a_row.iter().zip(e_row.iter()).enumerate() {
            let tol = atol + rtol * e.norm();
            let diff = (a - e).norm();
            assert!(
                diff <= tol,
                "assert_close_matrix[{row_idx},{col_idx}]: actual={a} expected={e} diff={diff} tol={tol}"
            );
        }
    }
}
