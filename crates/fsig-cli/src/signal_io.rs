//! Text format for signals: `<len>: [v0,v1,...]`.
//!
//! Several signals may follow each other in one stream. Whitespace between
//! tokens is ignored; integer and real samples are both accepted.

use std::fmt::Write as _;

use thiserror::Error;

/// Samples printed after the decimal point unless configured otherwise.
pub const DEFAULT_PRECISION: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("expected a signal header `<len>:` but found `{found}`")]
    MissingHeader { found: String },
    #[error("invalid signal length `{token}`")]
    InvalidLength { token: String },
    #[error("expected `[` after the signal header")]
    MissingOpenBracket,
    #[error("unterminated signal: expected `]`")]
    MissingCloseBracket,
    #[error("invalid sample `{token}` at index {index}")]
    InvalidSample { index: usize, token: String },
    #[error("signal declares {declared} samples but lists {actual}")]
    LengthMismatch { declared: usize, actual: usize },
}

/// Parse one signal from the front of `input`, returning it with the rest of
/// the stream.
pub fn parse_signal(input: &str) -> Result<(Vec<f64>, &str), FormatError> {
    let trimmed = input.trim_start();
    let Some((header, rest)) = trimmed.split_once(':') else {
        return Err(FormatError::MissingHeader {
            found: preview(trimmed),
        });
    };
    let header = header.trim();
    let declared = header
        .parse::<usize>()
        .map_err(|_| FormatError::InvalidLength {
            token: header.to_owned(),
        })?;

    let rest = rest
        .trim_start()
        .strip_prefix('[')
        .ok_or(FormatError::MissingOpenBracket)?;
    let (body, rest) = rest
        .split_once(']')
        .ok_or(FormatError::MissingCloseBracket)?;

    let samples = if body.trim().is_empty() {
        Vec::new()
    } else {
        body.split(',')
            .enumerate()
            .map(|(index, token)| {
                let token = token.trim();
                token.parse::<f64>().map_err(|_| FormatError::InvalidSample {
                    index,
                    token: token.to_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    if samples.len() != declared {
        return Err(FormatError::LengthMismatch {
            declared,
            actual: samples.len(),
        });
    }
    Ok((samples, rest))
}

/// Parse every signal in `input`.
pub fn parse_signals(input: &str) -> Result<Vec<Vec<f64>>, FormatError> {
    let mut signals = Vec::new();
    let mut rest = input;
    while !rest.trim().is_empty() {
        let (signal, tail) = parse_signal(rest)?;
        signals.push(signal);
        rest = tail;
    }
    Ok(signals)
}

/// Render real samples with `precision` decimals.
#[must_use]
pub fn format_signal(samples: &[f64], precision: usize) -> String {
    let mut out = format!("{}: [", samples.len());
    for (idx, value) in samples.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        let _ = write!(out, "{value:.precision$}");
    }
    out.push(']');
    out
}

#[must_use]
pub fn format_int_signal(samples: &[i64]) -> String {
    let body = samples
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("{}: [{body}]", samples.len())
}

fn preview(text: &str) -> String {
    text.chars().take(16).collect()
}
