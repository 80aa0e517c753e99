//! Improvement scoring against baseline configurations
//!
//! Sign convention: every delta is `predicted - baseline`, so a negative value
//! means the predicted configuration is smaller or faster. Display code picks
//! arrow direction and colour from the sign, so it must not be flipped.

use super::metrics::MetricSample;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Points awarded per metric the prediction wins on one baseline
const POINTS_PER_METRIC: f64 = 0.5;

/// Win-rate at or above which the prediction is declared the winner
const WIN_THRESHOLD_PERCENT: f64 = 50.0;

/// Deltas of the prediction against one baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    /// Binary size change in percent of the baseline (negative = smaller)
    pub binary_size_delta_pct: f64,
    /// Runtime change in percent of the baseline (negative = faster)
    pub runtime_delta_pct: f64,
    /// Binary size change in bytes
    pub binary_size_delta_abs: i64,
    /// Runtime change in seconds
    pub runtime_delta_abs: f64,
}

impl Improvement {
    /// Prediction produced a smaller binary
    pub fn improves_binary_size(&self) -> bool {
        self.binary_size_delta_pct < 0.0
    }

    /// Prediction ran faster
    pub fn improves_runtime(&self) -> bool {
        self.runtime_delta_pct < 0.0
    }

    /// Points earned on this baseline: 0.5 per improved metric
    pub fn points(&self) -> f64 {
        let mut points = 0.0;
        if self.improves_binary_size() {
            points += POINTS_PER_METRIC;
        }
        if self.improves_runtime() {
            points += POINTS_PER_METRIC;
        }
        points
    }
}

/// Overall winner of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    /// The ML-predicted configuration
    Predicted,
    /// The standard optimization levels
    Baseline,
}

impl Winner {
    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Self::Predicted => "ML-Predicted",
            Self::Baseline => "LLVM",
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregate result across all baselines
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinSummary {
    /// Total points (max 1.0 per baseline)
    pub score: f64,
    /// Number of baselines scored
    pub baselines: usize,
    /// Score as a percentage of the maximum
    pub win_rate: f64,
    /// Overall winner
    pub winner: Winner,
}

/// Improvement against one named baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineScore {
    /// Baseline name, e.g. `O2`
    pub name: String,
    /// Deltas against that baseline
    pub improvement: Improvement,
}

/// Per-baseline deltas plus the aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    /// Deltas in baseline order
    pub baselines: Vec<BaselineScore>,
    /// Aggregate win classification
    pub summary: WinSummary,
}

/// Computes deltas and win classification
pub struct ImprovementScorer;

impl ImprovementScorer {
    /// Compare `predicted` against one `baseline`
    ///
    /// A zero baseline metric is degenerate input; its percentage delta is
    /// defined as 0 rather than dividing by zero.
    ///
    /// ```
    /// use iris_cli::scoring::{ImprovementScorer, MetricSample};
    ///
    /// let predicted = MetricSample::new(100, 1.0);
    /// let delta = ImprovementScorer::score(&predicted, &MetricSample::new(0, 2.0));
    /// assert_eq!(delta.binary_size_delta_pct, 0.0);
    /// assert_eq!(delta.runtime_delta_pct, -50.0);
    /// ```
    pub fn score(predicted: &MetricSample, baseline: &MetricSample) -> Improvement {
        Improvement {
            binary_size_delta_pct: delta_percent(
                predicted.binary_size as f64,
                baseline.binary_size as f64,
            ),
            runtime_delta_pct: delta_percent(predicted.runtime_mean, baseline.runtime_mean),
            binary_size_delta_abs: predicted.binary_size as i64 - baseline.binary_size as i64,
            runtime_delta_abs: predicted.runtime_mean - baseline.runtime_mean,
        }
    }

    /// Aggregate win classification across baselines
    ///
    /// `win_rate >= 50` names the prediction the winner, so an exact tie goes
    /// to the prediction. With no baselines there is nothing to win: the rate
    /// is 0 and the baseline side is reported.
    pub fn aggregate(improvements: &[Improvement]) -> WinSummary {
        let score: f64 = improvements.iter().map(Improvement::points).sum();
        let baselines = improvements.len();

        let win_rate = if baselines == 0 {
            0.0
        } else {
            score / baselines as f64 * 100.0
        };

        let winner = if baselines > 0 && win_rate >= WIN_THRESHOLD_PERCENT {
            Winner::Predicted
        } else {
            Winner::Baseline
        };

        WinSummary {
            score,
            baselines,
            win_rate,
            winner,
        }
    }

    /// Score against every named baseline and aggregate
    pub fn score_all<'a, I>(predicted: &MetricSample, baselines: I) -> Scorecard
    where
        I: IntoIterator<Item = (&'a str, &'a MetricSample)>,
    {
        let baselines: Vec<BaselineScore> = baselines
            .into_iter()
            .map(|(name, sample)| BaselineScore {
                name: name.to_string(),
                improvement: Self::score(predicted, sample),
            })
            .collect();

        let improvements: Vec<Improvement> = baselines.iter().map(|b| b.improvement).collect();
        let summary = Self::aggregate(&improvements);

        Scorecard { baselines, summary }
    }
}

fn delta_percent(predicted: f64, baseline: f64) -> f64 {
    if baseline == 0.0 {
        return 0.0;
    }
    (predicted - baseline) / baseline * 100.0
}
