//! Test assertion helpers
//!
//! Utilities for asserting on command output: JSON documents printed with
//! `--json` and floating-point fields inside them.

use serde_json::Value;

/// Assert that two floating-point values are approximately equal
///
/// Use this instead of `assert_eq!` for f64 comparisons to avoid
/// floating-point precision issues.
#[allow(dead_code)]
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff < epsilon,
        "Float values not approximately equal:\n  actual: {}\n  expected: {}\n  \
         diff: {} (epsilon: {})",
        actual, expected, diff, epsilon
    );
}

/// Parse command stdout as JSON, failing with the raw output on error
#[allow(dead_code)]
pub fn parse_json_output(stdout: &[u8]) -> Value {
    let text = String::from_utf8_lossy(stdout);
    serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("stdout is not valid JSON ({}):\n{}", e, text))
}
