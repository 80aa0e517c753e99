//! Scoring of predicted configurations against baselines
//!
//! This module provides:
//! - Measured metrics for a compiled configuration
//! - Percentage and absolute deltas with a fixed sign convention
//! - Win-rate aggregation across baselines
//! - Per-metric champions

pub mod champion;
pub mod metrics;
pub mod scorer;

pub use champion::{Champion, Champions};
pub use metrics::MetricSample;
pub use scorer::{BaselineScore, Improvement, ImprovementScorer, Scorecard, WinSummary, Winner};
