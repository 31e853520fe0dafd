use std::time::Instant;

use crate::OperationKind;
use crate::engine::correlate_real;
use crate::error::SignalError;
use crate::helpers::{mean, window_mean, zeroed_buffer};
use crate::transforms::{SignalOptions, log_completion};

/// Windowed Pearson correlation coefficient of template `h` against `x`.
///
/// Returns `x.len() - h.len() + 1` coefficients, one per alignment offset
/// `d`, each comparing `h` with `x[d..d + h.len()]`. The cross term comes from
/// the FFT cross-correlation and is corrected into a covariance with the
/// window and template means:
///
/// ```text
/// y[d] = (cor[d] - sum_i(x[i+d]*h_bar + x_bar*h[i] - x_bar*h_bar))
///        / (sqrt(sum_i (x[i+d]-x_bar)^2) * sqrt(sum_i (h[i]-h_bar)^2))
/// ```
///
/// A constant template or window fails with [`SignalError::DegenerateWindow`]
/// rather than producing a non-finite coefficient.
pub fn pearson_correlate(
    h: &[f64],
    x: &[f64],
    options: &SignalOptions,
) -> Result<Vec<f64>, SignalError> {
    let started = Instant::now();
    let len_h = h.len();
    if len_h == 0 {
        return Err(SignalError::InvalidLength {
            len: 0,
            detail: "template must be non-empty",
        });
    }
    if len_h > x.len() {
        return Err(SignalError::InvalidLength {
            len: len_h,
            detail: "template must not be longer than the signal",
        });
    }
    let len_y = x.len() - len_h + 1;

    let h_bar = mean(h);
    let sum_h = centred_sum_of_squares(h, h_bar);
    if is_degenerate(sum_h, h, options.degenerate_rtol) {
        tracing::warn!(len_h, "pearson template has zero variance");
        return Err(SignalError::DegenerateWindow { offset: None });
    }
    let sum_h = sum_h.sqrt();

    let cor = correlate_real(h, x, options)?;
    let mut y = zeroed_buffer(len_y)?;
    for (d, out) in y.iter_mut().enumerate() {
        let window = &x[d..d + len_h];
        let x_bar = window_mean(x, d, len_h)?;

        let mut sum_x = 0.0;
        let mut sum_num = 0.0;
        for (&xi, &hi) in window.iter().zip(h) {
            sum_x += (xi - x_bar).powi(2);
            sum_num += (xi * h_bar) + (x_bar * hi) - (x_bar * h_bar);
        }
        if is_degenerate(sum_x, window, options.degenerate_rtol) {
            tracing::warn!(offset = d, len_h, "pearson window has zero variance");
            return Err(SignalError::DegenerateWindow { offset: Some(d) });
        }

        let denom = sum_h * sum_x.sqrt();
        *out = (cor[d] - sum_num) / denom;
    }

    log_completion(OperationKind::Pearson, x.len(), options, started);
    Ok(y)
}

fn centred_sum_of_squares(values: &[f64], centre: f64) -> f64 {
    values.iter().map(|v| (v - centre).powi(2)).sum()
}

fn is_degenerate(sum_of_squares: f64, values: &[f64], rtol: f64) -> bool {
    let energy = values.iter().map(|v| v * v).sum::<f64>();
    sum_of_squares.is_nan() || sum_of_squares <= rtol * energy
}
