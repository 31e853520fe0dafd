#![forbid(unsafe_code)]

//! Front end for the fsig kernel: reads signals in the `<len>: [..]` text
//! format, runs one operation, and renders the result in the same format.

pub mod signal_io;

use std::io::Read as _;
use std::path::{Path, PathBuf};

use fsig_fft::{
    SignalError, SignalOptions, complex_to_real, convolve_real, correlate_real, fft_forward, ifft,
    pearson_correlate, real_to_complex, real_to_int,
};
use thiserror::Error;

pub use signal_io::{
    DEFAULT_PRECISION, FormatError, format_int_signal, format_signal, parse_signal, parse_signals,
};

/// Operation selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Forward transform of one signal (inverse when `inverse` is set).
    Fft { inverse: bool },
    Convolve,
    Correlate,
    Pearson,
}

impl Operation {
    /// Number of input signals consumed.
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            Self::Fft { .. } => 1,
            Self::Convolve | Self::Correlate | Self::Pearson => 2,
        }
    }
}

/// How output samples are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendering {
    /// Fixed number of decimals per sample.
    Decimal { precision: usize },
    /// Samples rounded to the nearest integer and printed without decimals.
    Integer,
}

impl Default for Rendering {
    fn default() -> Self {
        Self::Decimal {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl Rendering {
    fn render(self, samples: &[f64]) -> Result<String, CliError> {
        Ok(match self {
            Self::Decimal { precision } => format_signal(samples, precision),
            Self::Integer => {
                let rounded = samples.iter().map(|v| v.round()).collect::<Vec<_>>();
                format_int_signal(&real_to_int(&rounded)?)
            }
        })
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read input '{}': {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read standard input: {0}")]
    ReadStdin(#[source] std::io::Error),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Signal(#[from] SignalError),
    #[error("expected {expected} input signal(s), found {found}")]
    SignalCount { expected: usize, found: usize },
}

/// Read the whole input stream from `path`, or from stdin when absent.
pub fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(CliError::ReadStdin)?;
            Ok(text)
        }
    }
}

/// Parse `input`, run `operation`, and render the output signals, one per line.
///
/// Real-valued results are one line. A transform prints its real parts on the
/// first line and its imaginary parts on the second.
pub fn execute(
    operation: Operation,
    input: &str,
    options: &SignalOptions,
    rendering: Rendering,
) -> Result<String, CliError> {
    let signals = parse_signals(input)?;
    if signals.len() != operation.arity() {
        return Err(CliError::SignalCount {
            expected: operation.arity(),
            found: signals.len(),
        });
    }
    let lengths = signals.iter().map(Vec::len).collect::<Vec<_>>();
    tracing::debug!(?operation, ?lengths, "executing");

    let rendered = match operation {
        Operation::Fft { inverse } => {
            let signal = real_to_complex(&signals[0])?;
            let spectrum = if inverse {
                ifft(&signal, options)?
            } else {
                fft_forward(&signal, options)?
            };
            let re = complex_to_real(&spectrum)?;
            let im = spectrum.iter().map(|value| value.im).collect::<Vec<_>>();
            format!("{}\n{}", rendering.render(&re)?, rendering.render(&im)?)
        }
        Operation::Convolve => {
            rendering.render(&convolve_real(&signals[0], &signals[1], options)?)?
        }
        Operation::Correlate => {
            rendering.render(&correlate_real(&signals[0], &signals[1], options)?)?
        }
        Operation::Pearson => {
            rendering.render(&pearson_correlate(&signals[0], &signals[1], options)?)?
        }
    };
    Ok(rendered)
}
