#![forbid(unsafe_code)]

//! Radix-2 FFT kernel and the transforms built on it.
//!
//! - `kernel`: recursive, iterative and naive kernels behind [`TransformKernel`]
//! - `transforms`: 1-D and separable 2-D entrypoints, [`SignalOptions`]
//! - `engine`: FFT convolution and cross-correlation
//! - `pearson`: windowed Pearson correlation coefficient
//! - `helpers`: fallible zeroed buffers, padding and conversions
//!
//! Every entrypoint is value-in/value-out: inputs are borrowed, a new buffer
//! is returned, and failures surface as [`SignalError`].

pub mod engine;
pub mod error;
pub mod helpers;
pub mod kernel;
pub mod pearson;
pub mod transforms;

pub use engine::{convolve, convolve_real, correlate, correlate_real, padded_len};
pub use error::SignalError;
pub use helpers::{
    complex_to_real, int_to_complex, int_to_real, is_power_of_two, mean, next_power_of_two,
    real_to_complex, real_to_int, window_mean, zero_padded, zeroed_buffer,
};
pub use kernel::{
    Direction, IterativeRadix2, KernelKind, NaiveDft, RecursiveRadix2, TransformKernel,
    resolve_kernel, root_of_unity,
};
pub use num_complex::Complex64;
pub use pearson::pearson_correlate;
pub use transforms::{
    ComplexMatrix, DEFAULT_DEGENERATE_RTOL, SignalOptions, fft, fft_forward, fft2d, fft2d_forward,
    ifft, ifft2d,
};

/// Top-level operations, as named in log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationKind {
    Fft,
    Ifft,
    Fft2d,
    Ifft2d,
    Convolve,
    Correlate,
    Pearson,
}

impl OperationKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Fft => "fft",
            Self::Ifft => "ifft",
            Self::Fft2d => "fft2d",
            Self::Ifft2d => "ifft2d",
            Self::Convolve => "convolve",
            Self::Correlate => "correlate",
            Self::Pearson => "pearson",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{KernelKind, OperationKind, SignalOptions};

    #[test]
    fn default_kernel_is_iterative() {
        assert_eq!(SignalOptions::default().kernel, KernelKind::Iterative);
    }

    #[test]
    fn operation_names_are_distinct() {
        let all = [
            OperationKind::Fft,
            OperationKind::Ifft,
            OperationKind::Fft2d,
            OperationKind::Ifft2d,
            OperationKind::Convolve,
            OperationKind::Correlate,
            OperationKind::Pearson,
        ];
        let mut names = all.iter().map(|op| op.name()).collect::<Vec<_>>();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn kernel_kind_serializes_snake_case() {
        let raw = serde_json::to_string(&KernelKind::NaiveDft).expect("serialize");
        assert_eq!(raw, "\"naive_dft\"");
    }
}
