#![forbid(unsafe_code)]

//! fsig runtime: ambient support shared by the signal-processing crates.
//!
//! ## Module layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | `logging`   | [`LogConfig`], [`init_logging`] over `tracing-subscriber`  |
//! | `testlog`   | [`TestLogEntry`] JSON lines for differential test runs     |
//! | `tolerance` | [`assert_close`] family with atol + rtol semantics         |

pub mod logging;
pub mod testlog;
pub mod tolerance;

// ── Re-exports: preserve the flat public API ────────────────────────
pub use logging::{LogConfig, LogFormat, LogLevel, init_logging};
pub use testlog::{TestLogEntry, TestLogLevel, TestResult, now_unix_ms};
pub use tolerance::{
    assert_close, assert_close_complex_slice, assert_close_matrix, assert_close_slice,
    within_tolerance,
};
