//! Rendering of results
//!
//! This module provides:
//! - Console views for health, predictions, comparisons and sessions
//! - Text bar charts with the per-metric champion highlighted
//! - Serializable JSON reports

pub mod chart;
pub mod display;
pub mod json;

pub use json::{to_json, write_report, ComparisonReport, OptimizeReport, PREDICTED_LABEL};
