//! Structured test log entries for forensic comparison across runs.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch, or 0 if the clock is before it.
#[must_use]
pub fn now_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestLogEntry {
    pub test_id: String,
    pub timestamp_ms: u64,
    pub level: TestLogLevel,
    pub module: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kernel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform_len: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_abs_error: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TestResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestLogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestResult {
    Pass,
    Fail,
    Skip,
}

impl TestResult {
    #[must_use]
    pub fn from_pass(pass: bool) -> Self {
        if pass { Self::Pass } else { Self::Fail }
    }
}

impl TestLogEntry {
    #[must_use]
    pub fn new(
        test_id: impl Into<String>,
        module: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            test_id: test_id.into(),
            timestamp_ms: now_unix_ms(),
            level: TestLogLevel::Info,
            module: module.into(),
            message: message.into(),
            seed: None,
            kernel: None,
            transform_len: None,
            max_abs_error: None,
            result: None,
        }
    }

    #[must_use]
    pub fn with_result(mut self, result: TestResult) -> Self {
        if result == TestResult::Fail {
            self.level = TestLogLevel::Error;
        }
        self.result = Some(result);
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_kernel(mut self, kernel: impl Into<String>) -> Self {
        self.kernel = Some(kernel.into());
        self
    }

    #[must_use]
    pub fn with_transform_len(mut self, n: usize) -> Self {
        self.transform_len = Some(n);
        self
    }

    #[must_use]
    pub fn with_max_abs_error(mut self, error: f64) -> Self {
        self.max_abs_error = Some(error);
        self
    }

    /// Serialize to a single JSON line.
    #[must_use]
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

#[cfg(test)]
mod tests {
    use super::{TestLogEntry, TestLogLevel, TestResult};

    #[test]
    fn json_line_omits_unset_optionals() {
        let line = TestLogEntry::new("t-1", "fsig_fft::tests", "roundtrip").to_json_line();
        assert!(line.contains("\"test_id\":\"t-1\""));
        assert!(!line.contains("seed"));
        assert!(!line.contains("kernel"));
    }

    #[test]
    fn failing_result_escalates_level() {
        let entry = TestLogEntry::new("t-2", "m", "x").with_result(TestResult::from_pass(false));
        assert_eq!(entry.level, TestLogLevel::Error);
        assert_eq!(entry.result, Some(TestResult::Fail));
    }

    #[test]
    fn builder_fields_serialize() {
        let line = TestLogEntry::new("t-3", "m", "x")
            .with_seed(7)
            .with_kernel("iterative")
            .with_transform_len(64)
            .with_max_abs_error(1e-12)
            .to_json_line();
        let value: serde_json::Value = serde_json::from_str(&line).expect("valid json");
        assert_eq!(value["seed"], 7);
        assert_eq!(value["kernel"], "iterative");
        assert_eq!(value["transform_len"], 64);
    }
}
