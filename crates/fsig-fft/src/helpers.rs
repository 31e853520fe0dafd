use num_complex::Complex64;

use crate::error::SignalError;

/// Zero-initialised buffer of `len` elements.
///
/// Allocation failure is reported instead of aborting the process.
pub fn zeroed_buffer<T: Clone + Default>(len: usize) -> Result<Vec<T>, SignalError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| SignalError::AllocationFailure { requested: len })?;
    buffer.resize(len, T::default());
    Ok(buffer)
}

/// Smallest power of two that is `>= n`; `0` rounds up to `1`.
pub fn next_power_of_two(n: usize) -> Result<usize, SignalError> {
    n.max(1)
        .checked_next_power_of_two()
        .ok_or(SignalError::AllocationFailure { requested: n })
}

#[must_use]
pub fn is_power_of_two(n: usize) -> bool {
    n.is_power_of_two()
}

/// Copy of `signal` extended with zeros to `len` samples.
pub fn zero_padded(signal: &[Complex64], len: usize) -> Result<Vec<Complex64>, SignalError> {
    if signal.len() > len {
        return Err(SignalError::InvalidLength {
            len: signal.len(),
            detail: "signal is longer than the padded length",
        });
    }
    let mut padded = zeroed_buffer(len)?;
    padded[..signal.len()].copy_from_slice(signal);
    Ok(padded)
}

/// Arithmetic mean; `NaN` for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean of `x[offset..offset + len]`.
pub fn window_mean(x: &[f64], offset: usize, len: usize) -> Result<f64, SignalError> {
    let end = offset
        .checked_add(len)
        .filter(|&end| end <= x.len() && len > 0)
        .ok_or(SignalError::InvalidLength {
            len,
            detail: "window does not fit inside the signal",
        })?;
    Ok(mean(&x[offset..end]))
}

pub fn real_to_complex(values: &[f64]) -> Result<Vec<Complex64>, SignalError> {
    let mut out = zeroed_buffer(values.len())?;
    for (slot, &re) in out.iter_mut().zip(values) {
        *slot = Complex64::new(re, 0.0);
    }
    Ok(out)
}

pub fn int_to_real(values: &[i64]) -> Result<Vec<f64>, SignalError> {
    let mut out = zeroed_buffer(values.len())?;
    for (slot, &value) in out.iter_mut().zip(values) {
        *slot = value as f64;
    }
    Ok(out)
}

pub fn int_to_complex(values: &[i64]) -> Result<Vec<Complex64>, SignalError> {
    let mut out = zeroed_buffer(values.len())?;
    for (slot, &value) in out.iter_mut().zip(values) {
        *slot = Complex64::new(value as f64, 0.0);
    }
    Ok(out)
}

/// Real parts of `values`; the imaginary parts are discarded.
pub fn complex_to_real(values: &[Complex64]) -> Result<Vec<f64>, SignalError> {
    let mut out = zeroed_buffer(values.len())?;
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = value.re;
    }
    Ok(out)
}

/// Truncates toward zero; saturates at the `i64` range and maps `NaN` to 0.
pub fn real_to_int(values: &[f64]) -> Result<Vec<i64>, SignalError> {
    let mut out = zeroed_buffer(values.len())?;
    for (slot, &value) in out.iter_mut().zip(values) {
        *slot = value as i64;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use num_complex::Complex64;

    use super::{
        complex_to_real, int_to_complex, int_to_real, is_power_of_two, mean, next_power_of_two,
        real_to_complex, real_to_int, window_mean, zero_padded, zeroed_buffer,
    };
    use crate::SignalError;

    #[test]
    fn next_power_of_two_rounds_up() {
        assert_eq!(next_power_of_two(0), Ok(1));
        assert_eq!(next_power_of_two(1), Ok(1));
        assert_eq!(next_power_of_two(3), Ok(4));
        assert_eq!(next_power_of_two(64), Ok(64));
        assert_eq!(next_power_of_two(65), Ok(128));
    }

    #[test]
    fn next_power_of_two_reports_overflow() {
        let n = usize::MAX / 2 + 2;
        assert_eq!(
            next_power_of_two(n),
            Err(SignalError::AllocationFailure { requested: n })
        );
    }

    #[test]
    fn power_of_two_check_rejects_zero_and_odd() {
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(1024));
        assert!(!is_power_of_two(0));
        assert!(!is_power_of_two(3));
        assert!(!is_power_of_two(12));
    }

    #[test]
    fn zeroed_buffer_is_zero_filled() {
        let buffer: Vec<Complex64> = zeroed_buffer(4).expect("small allocation");
        assert!(buffer.iter().all(|value| *value == Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn huge_allocation_is_reported() {
        let requested = usize::MAX / 4;
        let err = zeroed_buffer::<Complex64>(requested).expect_err("cannot allocate");
        assert_eq!(err, SignalError::AllocationFailure { requested });
    }

    #[test]
    fn zero_padding_keeps_prefix() {
        let padded = zero_padded(&[Complex64::new(1.0, 2.0)], 4).expect("pad");
        assert_eq!(padded.len(), 4);
        assert_eq!(padded[0], Complex64::new(1.0, 2.0));
        assert_eq!(padded[3], Complex64::new(0.0, 0.0));
        assert!(zero_padded(&[Complex64::new(0.0, 0.0); 3], 2).is_err());
    }

    #[test]
    fn window_mean_uses_offset() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(mean(&x), 3.0);
        assert_eq!(window_mean(&x, 2, 3), Ok(4.0));
        assert!(window_mean(&x, 3, 3).is_err());
        assert!(window_mean(&x, 0, 0).is_err());
    }

    #[test]
    fn conversions_preserve_values() {
        assert_eq!(int_to_real(&[-2, 5]).expect("convert"), vec![-2.0, 5.0]);
        assert_eq!(
            int_to_complex(&[3]).expect("convert"),
            vec![Complex64::new(3.0, 0.0)]
        );
        assert_eq!(
            real_to_complex(&[0.5]).expect("convert"),
            vec![Complex64::new(0.5, 0.0)]
        );
        assert_eq!(
            complex_to_real(&[Complex64::new(1.5, 9.0)]).expect("convert"),
            vec![1.5]
        );
        assert_eq!(real_to_int(&[2.9, -2.9]).expect("convert"), vec![2, -2]);
    }
}
