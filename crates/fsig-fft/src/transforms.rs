use std::time::Instant;

use num_complex::Complex64;

use crate::OperationKind;
use crate::error::SignalError;
use crate::helpers::{is_power_of_two, zeroed_buffer};
use crate::kernel::{Direction, KernelKind, resolve_kernel, root_of_unity};

/// Default relative floor under which a centred sum of squares counts as zero.
pub const DEFAULT_DEGENERATE_RTOL: f64 = 1e-24;

/// Row-major complex matrix; every row has the same length.
pub type ComplexMatrix = Vec<Vec<Complex64>>;

/// Per-call configuration shared by every entrypoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalOptions {
    pub kernel: KernelKind,
    /// A Pearson window whose centred sum of squares is at most
    /// `degenerate_rtol` times its raw energy is rejected as zero-variance.
    pub degenerate_rtol: f64,
}

impl Default for SignalOptions {
    fn default() -> Self {
        Self {
            kernel: KernelKind::Iterative,
            degenerate_rtol: DEFAULT_DEGENERATE_RTOL,
        }
    }
}

impl SignalOptions {
    #[must_use]
    pub fn with_kernel(mut self, kernel: KernelKind) -> Self {
        self.kernel = kernel;
        self
    }

    #[must_use]
    pub fn with_degenerate_rtol(mut self, degenerate_rtol: f64) -> Self {
        self.degenerate_rtol = degenerate_rtol;
        self
    }
}

/// Unnormalised transform of `signal` driven by the root of unity `omega`.
///
/// The sign of `omega`'s angle selects the direction (see [`root_of_unity`]).
/// `signal.len()` must be a power of two.
pub fn fft(
    signal: &[Complex64],
    omega: Complex64,
    options: &SignalOptions,
) -> Result<Vec<Complex64>, SignalError> {
    let started = Instant::now();
    let output = transform_1d(signal, omega, options)?;
    log_completion(OperationKind::Fft, signal.len(), options, started);
    Ok(output)
}

/// Forward transform with the primitive root `e^(+i*2*pi/n)`.
pub fn fft_forward(
    signal: &[Complex64],
    options: &SignalOptions,
) -> Result<Vec<Complex64>, SignalError> {
    fft(
        signal,
        root_of_unity(signal.len(), Direction::Forward),
        options,
    )
}

/// Inverse of [`fft_forward`], including the division by `n`.
pub fn ifft(
    spectrum: &[Complex64],
    options: &SignalOptions,
) -> Result<Vec<Complex64>, SignalError> {
    let started = Instant::now();
    let n = spectrum.len();
    let unscaled = transform_1d(spectrum, root_of_unity(n, Direction::Inverse), options)?;
    let output = scaled(&unscaled, n)?;
    log_completion(OperationKind::Ifft, n, options, started);
    Ok(output)
}

/// Separable 2-D transform: every row, then every column of the result.
///
/// `omega` is the root for the row length. Square matrices use it for the
/// column pass too. Otherwise the column pass uses the primitive root for the
/// height in the direction of `omega` (see [`Direction::of_root`]); a real
/// `omega` such as the width-1 or width-2 root counts as forward. The input is
/// left untouched.
pub fn fft2d(
    matrix: &[Vec<Complex64>],
    omega: Complex64,
    options: &SignalOptions,
) -> Result<ComplexMatrix, SignalError> {
    let started = Instant::now();
    let (width, height) = validate_matrix(matrix)?;
    let column_omega = if width == height {
        omega
    } else {
        root_of_unity(height, Direction::of_root(omega))
    };
    let output = transform_2d(matrix, width, height, omega, column_omega, options)?;
    log_completion(OperationKind::Fft2d, width * height, options, started);
    Ok(output)
}

/// Forward 2-D transform with primitive roots for each axis.
pub fn fft2d_forward(
    matrix: &[Vec<Complex64>],
    options: &SignalOptions,
) -> Result<ComplexMatrix, SignalError> {
    let started = Instant::now();
    let (width, height) = validate_matrix(matrix)?;
    let output = transform_2d(
        matrix,
        width,
        height,
        root_of_unity(width, Direction::Forward),
        root_of_unity(height, Direction::Forward),
        options,
    )?;
    log_completion(OperationKind::Fft2d, width * height, options, started);
    Ok(output)
}

/// Inverse of [`fft2d_forward`], normalised by `width * height`.
pub fn ifft2d(
    matrix: &[Vec<Complex64>],
    options: &SignalOptions,
) -> Result<ComplexMatrix, SignalError> {
    let started = Instant::now();
    let (width, height) = validate_matrix(matrix)?;
    let unscaled = transform_2d(
        matrix,
        width,
        height,
        root_of_unity(width, Direction::Inverse),
        root_of_unity(height, Direction::Inverse),
        options,
    )?;
    let mut output = Vec::new();
    output
        .try_reserve_exact(height)
        .map_err(|_| SignalError::AllocationFailure { requested: height })?;
    for row in &unscaled {
        output.push(scaled(row, width * height)?);
    }
    log_completion(OperationKind::Ifft2d, width * height, options, started);
    Ok(output)
}

pub(crate) fn transform_1d(
    signal: &[Complex64],
    omega: Complex64,
    options: &SignalOptions,
) -> Result<Vec<Complex64>, SignalError> {
    resolve_kernel(options.kernel).transform(signal, omega)
}

/// Element-wise division by `n`, into a new buffer.
pub(crate) fn scaled(values: &[Complex64], n: usize) -> Result<Vec<Complex64>, SignalError> {
    let mut output = zeroed_buffer(values.len())?;
    let divisor = n as f64;
    for (slot, value) in output.iter_mut().zip(values) {
        *slot = *value / divisor;
    }
    Ok(output)
}

fn transform_2d(
    matrix: &[Vec<Complex64>],
    width: usize,
    height: usize,
    row_omega: Complex64,
    column_omega: Complex64,
    options: &SignalOptions,
) -> Result<ComplexMatrix, SignalError> {
    let kernel = resolve_kernel(options.kernel);

    let mut rows = Vec::new();
    rows.try_reserve_exact(height)
        .map_err(|_| SignalError::AllocationFailure { requested: height })?;
    for row in matrix {
        rows.push(kernel.transform(row, row_omega)?);
    }

    let mut column = zeroed_buffer(height)?;
    for col in 0..width {
        for (slot, row) in column.iter_mut().zip(&rows) {
            *slot = row[col];
        }
        let transformed = kernel.transform(&column, column_omega)?;
        for (row, value) in rows.iter_mut().zip(transformed) {
            row[col] = value;
        }
    }
    Ok(rows)
}

fn validate_matrix(matrix: &[Vec<Complex64>]) -> Result<(usize, usize), SignalError> {
    let height = matrix.len();
    if !is_power_of_two(height) {
        return Err(SignalError::InvalidLength {
            len: height,
            detail: "matrix height must be a power of two",
        });
    }
    let width = matrix[0].len();
    if !is_power_of_two(width) {
        return Err(SignalError::InvalidLength {
            len: width,
            detail: "matrix width must be a power of two",
        });
    }
    if let Some(ragged) = matrix.iter().find(|row| row.len() != width) {
        return Err(SignalError::InvalidLength {
            len: ragged.len(),
            detail: "matrix rows must all have the same length",
        });
    }
    Ok((width, height))
}

pub(crate) fn log_completion(
    operation: OperationKind,
    n: usize,
    options: &SignalOptions,
    started: Instant,
) {
    tracing::debug!(
        operation = operation.name(),
        n,
        kernel = options.kernel.name(),
        elapsed_ns = started.elapsed().as_nanos() as u64,
        "signal operation complete"
    );
}
