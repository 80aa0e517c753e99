#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! iris-cli library
//!
//! This library provides the client side of the IRis ML-guided compiler
//! optimization service: talking to the backend, handing a prediction over to
//! the comparison step, and turning the returned metrics into something a
//! person can read. It can be used programmatically in addition to the CLI.
//!
//! # Basic Example
//!
//! Classifying a predicted pass sequence against the built-in LLVM levels:
//!
//! ```
//! use iris_cli::passes::{catalog, PassList, PassSetComparator};
//!
//! let predicted = PassList::from_names(["MEM2REG", "instcombine", "gvn"]);
//! let analysis = PassSetComparator::classify(&predicted, &catalog::reference_set());
//!
//! // Case-folded membership: "MEM2REG" is a standard -O2 pass
//! assert_eq!(analysis.common_to("O2").unwrap().len(), 2);
//! assert_eq!(analysis.unique_to_predicted().names(), vec!["instcombine"]);
//! ```
//!
//! # Advanced Example: Scoring Against Baselines
//!
//! ```
//! use iris_cli::scoring::{ImprovementScorer, MetricSample, Winner};
//!
//! let predicted = MetricSample::new(100, 1.0);
//! let o2 = MetricSample::new(200, 2.0);
//! let o3 = MetricSample::new(50, 0.5);
//!
//! let vs_o2 = ImprovementScorer::score(&predicted, &o2);
//! assert_eq!(vs_o2.binary_size_delta_pct, -50.0);
//!
//! // Wins both metrics against -O2, loses both against -O3: a tie
//! let summary = ImprovementScorer::aggregate(&[vs_o2, ImprovementScorer::score(&predicted, &o3)]);
//! assert_eq!(summary.win_rate, 50.0);
//! assert_eq!(summary.winner, Winner::Predicted);
//! ```
//!
//! # Advanced Example: Session Handoff
//!
//! ```
//! use iris_cli::session::{HandoffContext, SessionRecord};
//! use iris_cli::passes::PassList;
//! use chrono::{Duration, Utc};
//!
//! let now = Utc::now();
//! let mut record = SessionRecord::builder("int main() { return 0; }", "main.c")
//!     .passes(PassList::from_names(["mem2reg"]))
//!     .model("transformer")
//!     .build(now);
//!
//! assert!(HandoffContext::from_record(record.clone(), now).is_ok());
//!
//! // Anything older than a day is rejected at construction time
//! record.timestamp = now - Duration::hours(25);
//! assert!(HandoffContext::from_record(record, now).is_err());
//! ```

/// Backend API client and typed request/response models
pub mod client;
/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file loading and resolution
pub mod config;
/// Error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for filesystem access
pub mod infra;
/// Pass identifiers, reference catalog, and set comparison
pub mod passes;
/// Console and JSON rendering of results
pub mod report;
/// Metric deltas, win-rate and champions
pub mod scoring;
/// Prediction-to-comparison session handoff
pub mod session;
