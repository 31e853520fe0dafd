use thiserror::Error;

/// Failure kinds shared by every entrypoint of the crate.
///
/// No operation returns a partially filled buffer alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    /// A transform length, matrix dimension, or input length the operation
    /// cannot accept.
    #[error("invalid length {len}: {detail}")]
    InvalidLength { len: usize, detail: &'static str },
    /// A zero-variance window in the Pearson correlator. `offset` is `None`
    /// when the template itself is constant.
    #[error("{}", degenerate_message(.offset))]
    DegenerateWindow { offset: Option<usize> },
    /// A working buffer could not be allocated.
    #[error("failed to allocate a buffer of {requested} elements")]
    AllocationFailure { requested: usize },
}

fn degenerate_message(offset: &Option<usize>) -> String {
    match offset {
        Some(offset) => format!("zero-variance signal window at offset {offset}"),
        None => String::from("zero-variance template"),
    }
}

impl SignalError {
    pub(crate) fn not_power_of_two(len: usize) -> Self {
        Self::InvalidLength {
            len,
            detail: "transform length must be a power of two",
        }
    }
}
