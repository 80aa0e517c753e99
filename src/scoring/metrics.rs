//! Measured metrics for one compiled configuration

use serde::{Deserialize, Serialize};

/// Binary size and runtime measured for one configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    /// Binary size in bytes
    pub binary_size: u64,
    /// Mean runtime in seconds
    pub runtime_mean: f64,
    /// Runtime standard deviation in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_std: Option<f64>,
    /// Number of passes applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_passes: Option<u32>,
}

impl MetricSample {
    /// Create a sample from the two required measurements
    pub fn new(binary_size: u64, runtime_mean: f64) -> Self {
        Self {
            binary_size,
            runtime_mean,
            runtime_std: None,
            num_passes: None,
        }
    }

    /// Attach a runtime standard deviation
    pub fn with_runtime_std(mut self, runtime_std: f64) -> Self {
        self.runtime_std = Some(runtime_std);
        self
    }

    /// Attach the number of applied passes
    pub fn with_num_passes(mut self, num_passes: u32) -> Self {
        self.num_passes = Some(num_passes);
        self
    }
}
