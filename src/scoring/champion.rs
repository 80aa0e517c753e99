//! Best configuration per metric

use super::metrics::MetricSample;
use serde::Serialize;

/// Configuration holding the best value of one metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Champion {
    /// Configuration name
    pub name: String,
    /// The winning value (bytes or seconds)
    pub value: f64,
}

/// Champions for binary size and runtime
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Champions {
    /// Smallest binary
    pub binary_size: Option<Champion>,
    /// Fastest mean runtime
    pub runtime: Option<Champion>,
}

impl Champions {
    /// Pick the minimum of each metric across `entries`.
    ///
    /// Ties go to the earlier entry, so callers list the predicted
    /// configuration first to let it keep a shared title.
    ///
    /// ```
    /// use iris_cli::scoring::{Champions, MetricSample};
    ///
    /// let ml = MetricSample::new(100, 1.0);
    /// let o3 = MetricSample::new(100, 0.5);
    /// let champions = Champions::find([("ML", &ml), ("O3", &o3)]);
    ///
    /// assert_eq!(champions.binary_size.unwrap().name, "ML");
    /// assert_eq!(champions.runtime.unwrap().name, "O3");
    /// ```
    pub fn find<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a MetricSample)>,
    {
        let entries: Vec<(&str, &MetricSample)> = entries.into_iter().collect();

        Self {
            binary_size: min_by(&entries, |sample| sample.binary_size as f64),
            runtime: min_by(&entries, |sample| sample.runtime_mean),
        }
    }
}

fn min_by(
    entries: &[(&str, &MetricSample)],
    metric: impl Fn(&MetricSample) -> f64,
) -> Option<Champion> {
    let mut best: Option<Champion> = None;
    for (name, sample) in entries {
        let value = metric(sample);
        // Strict comparison keeps the earlier entry on ties
        if best.as_ref().is_none_or(|current| value < current.value) {
            best = Some(Champion {
                name: (*name).to_string(),
                value,
            });
        }
    }
    best
}
