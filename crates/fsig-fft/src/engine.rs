//! FFT convolution and cross-correlation.
//!
//! Both share one pipeline: pad to `2 * next_power_of_two(max(len_h, len_x))`,
//! transform, combine pointwise, inverse-transform, divide by the transform
//! length, keep the first `len_h + len_x - 1` samples. Every stage writes a
//! fresh buffer.

use std::time::Instant;

use num_complex::Complex64;

use crate::OperationKind;
use crate::error::SignalError;
use crate::helpers::{
    complex_to_real, next_power_of_two, real_to_complex, zero_padded, zeroed_buffer,
};
use crate::kernel::{Direction, root_of_unity};
use crate::transforms::{SignalOptions, log_completion, scaled, transform_1d};

/// Frequency-domain combination step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combine {
    /// `H * X`
    Product,
    /// `conj(H) * X`
    ConjugateProduct,
}

/// Transform length used for inputs of lengths `len_h` and `len_x`.
pub fn padded_len(len_h: usize, len_x: usize) -> Result<usize, SignalError> {
    let longest = len_h.max(len_x);
    next_power_of_two(longest)?
        .checked_mul(2)
        .ok_or(SignalError::AllocationFailure { requested: longest })
}

/// Linear convolution of filter `h` with signal `x`, `len_h + len_x - 1` samples.
pub fn convolve(
    h: &[Complex64],
    x: &[Complex64],
    options: &SignalOptions,
) -> Result<Vec<Complex64>, SignalError> {
    run_pipeline(OperationKind::Convolve, h, x, Combine::Product, options)
}

/// Cross-correlation `y[d] = sum_i conj(h[i]) * x[i + d]` via the correlation theorem.
///
/// Indices `d < x.len()` hold non-negative lags. The remaining tail holds
/// the wrapped negative lags `d - padded_len(h.len(), x.len())` produced by
/// the circular pipeline.
pub fn correlate(
    h: &[Complex64],
    x: &[Complex64],
    options: &SignalOptions,
) -> Result<Vec<Complex64>, SignalError> {
    run_pipeline(
        OperationKind::Correlate,
        h,
        x,
        Combine::ConjugateProduct,
        options,
    )
}

/// [`convolve`] over real inputs; the residual imaginary part is dropped.
pub fn convolve_real(
    h: &[f64],
    x: &[f64],
    options: &SignalOptions,
) -> Result<Vec<f64>, SignalError> {
    let y = convolve(&real_to_complex(h)?, &real_to_complex(x)?, options)?;
    complex_to_real(&y)
}

/// [`correlate`] over real inputs; the residual imaginary part is dropped.
pub fn correlate_real(
    h: &[f64],
    x: &[f64],
    options: &SignalOptions,
) -> Result<Vec<f64>, SignalError> {
    let y = correlate(&real_to_complex(h)?, &real_to_complex(x)?, options)?;
    complex_to_real(&y)
}

fn run_pipeline(
    operation: OperationKind,
    h: &[Complex64],
    x: &[Complex64],
    combine: Combine,
    options: &SignalOptions,
) -> Result<Vec<Complex64>, SignalError> {
    let started = Instant::now();
    if h.is_empty() || x.is_empty() {
        return Err(SignalError::InvalidLength {
            len: 0,
            detail: "convolution inputs must be non-empty",
        });
    }
    let output_len = h.len() + x.len() - 1;
    let n = padded_len(h.len(), x.len())?;

    let h_spectrum = transform_1d(
        &zero_padded(h, n)?,
        root_of_unity(n, Direction::Forward),
        options,
    )?;
    let x_spectrum = transform_1d(
        &zero_padded(x, n)?,
        root_of_unity(n, Direction::Forward),
        options,
    )?;

    let mut combined = zeroed_buffer(n)?;
    for ((slot, hk), xk) in combined.iter_mut().zip(&h_spectrum).zip(&x_spectrum) {
        *slot = match combine {
            Combine::Product => hk * xk,
            Combine::ConjugateProduct => hk.conj() * xk,
        };
    }

    let unscaled = transform_1d(&combined, root_of_unity(n, Direction::Inverse), options)?;
    let output = scaled(&unscaled[..output_len], n)?;

    log_completion(operation, n, options, started);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use num_complex::Complex64;

    use super::{convolve, convolve_real, correlate, correlate_real, padded_len};
    use crate::SignalError;
    use crate::kernel::KernelKind;
    use crate::transforms::SignalOptions;

    fn assert_close_slice(actual: &[f64], expected: &[f64], tol: f64) {
        assert_eq!(actual.len(), expected.len(), "length mismatch");
        for (idx, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() <= tol, "[{idx}] {a} !~= {e}");
        }
    }

    #[test]
    fn padded_len_doubles_next_power_of_two() {
        assert_eq!(padded_len(1, 1), Ok(2));
        assert_eq!(padded_len(2, 3), Ok(8));
        assert_eq!(padded_len(4, 4), Ok(8));
        assert_eq!(padded_len(5, 2), Ok(16));
    }

    #[test]
    fn convolve_small_example() {
        let y = convolve_real(&[1.0, 2.0], &[1.0, 1.0, 1.0], &SignalOptions::default())
            .expect("convolve");
        assert_close_slice(&y, &[1.0, 3.0, 3.0, 2.0], 1e-12);
    }

    #[test]
    fn convolve_matches_direct_sum_for_every_kernel() {
        let h = [0.5, -1.0, 2.0];
        let x = [1.0, 4.0, -2.0, 0.0, 3.0];
        let mut direct = vec![0.0; h.len() + x.len() - 1];
        for (i, hi) in h.iter().enumerate() {
            for (j, xj) in x.iter().enumerate() {
                direct[i + j] += hi * xj;
            }
        }
        for kernel in KernelKind::ALL {
            let opts = SignalOptions::default().with_kernel(kernel);
            let y = convolve_real(&h, &x, &opts).expect("convolve");
            assert_close_slice(&y, &direct, 1e-12);
        }
    }

    #[test]
    fn correlate_small_example() {
        let y = correlate_real(&[1.0, 2.0], &[1.0, 2.0, 3.0], &SignalOptions::default())
            .expect("correlate");
        assert_close_slice(&y, &[5.0, 8.0, 3.0, 0.0], 1e-12);
    }

    #[test]
    fn correlate_tail_holds_wrapped_negative_lags() {
        // n = 8: index 6 is lag -2 (h[2]x[0] + h[3]x[1]), index 5 is lag -3.
        let h = [1.0, 2.0, 3.0, 4.0];
        let x = [1.0, 10.0, 100.0, 1000.0];
        let y = correlate_real(&h, &x, &SignalOptions::default()).expect("correlate");
        assert_eq!(y.len(), 7);
        assert_close_slice(&y[..4], &[4321.0, 3210.0, 2100.0, 1000.0], 1e-9);
        assert_close_slice(&y[4..], &[0.0, 4.0, 43.0], 1e-9);
    }

    #[test]
    fn complex_correlate_conjugates_template() {
        let h = [Complex64::new(0.0, 1.0)];
        let x = [Complex64::new(1.0, 0.0), Complex64::new(0.0, 1.0)];
        let y = correlate(&h, &x, &SignalOptions::default()).expect("correlate");
        // conj(i) * 1 = -i, conj(i) * i = 1
        assert!((y[0] - Complex64::new(0.0, -1.0)).norm() < 1e-12);
        assert!((y[1] - Complex64::new(1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let opts = SignalOptions::default();
        let one = [Complex64::new(1.0, 0.0)];
        assert!(matches!(
            convolve(&[], &one, &opts),
            Err(SignalError::InvalidLength { .. })
        ));
        assert!(matches!(
            correlate(&one, &[], &opts),
            Err(SignalError::InvalidLength { .. })
        ));
    }

    #[test]
    fn single_sample_inputs_multiply() {
        let y = convolve_real(&[3.0], &[-2.0], &SignalOptions::default()).expect("convolve");
        assert_close_slice(&y, &[-6.0], 1e-12);
    }
}
