//! Typed, validated responses from the optimization backend
//!
//! The backend wraps payloads in `{success, data, error, metadata}`; some
//! deployments answer with the payload fields at the top level instead. Both
//! shapes are accepted. Everything is checked here so the rest of the crate
//! never sees untyped JSON.

use crate::error::IrisError;
use crate::passes::{OptLevel, PassList};
use crate::scoring::MetricSample;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Message used when the backend reports failure without saying why
const UNKNOWN_FAILURE: &str = "An unknown error occurred on the backend.";

/// Unwrap the response envelope, turning `success: false` into an error.
///
/// Returns the payload and the envelope metadata (empty when absent).
pub(crate) fn unwrap_envelope(endpoint: &str, body: Value) -> Result<(Value, Value), IrisError> {
    let Value::Object(mut map) = body else {
        return Err(IrisError::MalformedResponse {
            endpoint: endpoint.to_string(),
            detail: "expected a JSON object".to_string(),
        });
    };

    let metadata = map.remove("metadata").unwrap_or(Value::Null);

    match map.get("success").and_then(Value::as_bool) {
        Some(false) => {
            let message = map
                .get("error")
                .and_then(Value::as_str)
                .filter(|msg| !msg.is_empty())
                .unwrap_or(UNKNOWN_FAILURE)
                .to_string();
            Err(IrisError::BackendRejected {
                endpoint: endpoint.to_string(),
                message,
            })
        }
        _ => match map.remove("data") {
            Some(data @ Value::Object(_)) => Ok((data, metadata)),
            _ => Ok((Value::Object(map), metadata)),
        },
    }
}

fn malformed(endpoint: &str, detail: impl Into<String>) -> IrisError {
    IrisError::MalformedResponse {
        endpoint: endpoint.to_string(),
        detail: detail.into(),
    }
}

/// Result of `GET /api/health`. Never an error: an unreachable backend is
/// simply reported as unavailable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStatus {
    /// Whether the backend answered and reported itself healthy
    pub available: bool,
    /// Status text or the reason the backend is unavailable
    pub detail: String,
    /// Service name, if reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// API version, if reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl HealthStatus {
    /// Backend could not be reached or reported a failure
    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self {
            available: false,
            detail: detail.into(),
            service: None,
            version: None,
        }
    }

    /// Interpret a health response body
    pub fn from_json(body: Value) -> Self {
        match unwrap_envelope("/api/health", body) {
            Ok((data, _)) => {
                let text = |key: &str| data.get(key).and_then(Value::as_str).map(str::to_string);
                let status = text("status").unwrap_or_else(|| "healthy".to_string());
                Self {
                    available: status.eq_ignore_ascii_case("healthy"),
                    detail: status,
                    service: text("service"),
                    version: text("version"),
                }
            }
            Err(e) => Self::unavailable(e.to_string()),
        }
    }
}

/// Prediction returned by `POST /api/optimize`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizeResponse {
    /// Predicted pass sequence
    pub predicted_passes: PassList,
    /// Extracted program features
    pub features: BTreeMap<String, f64>,
    /// Model the backend actually used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
    /// Backend processing time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<f64>,
}

impl OptimizeResponse {
    const ENDPOINT: &'static str = "/api/optimize";

    /// Parse and validate an optimize response body
    pub fn from_json(body: Value) -> Result<Self, IrisError> {
        let (data, metadata) = unwrap_envelope(Self::ENDPOINT, body)?;

        let passes = data
            .get("predicted_passes")
            .ok_or_else(|| malformed(Self::ENDPOINT, "missing field 'predicted_passes'"))?;
        if !passes.is_array() {
            return Err(malformed(Self::ENDPOINT, "'predicted_passes' is not a list"));
        }

        let features = data
            .get("features")
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(name, value)| value.as_f64().map(|v| (name.clone(), v)))
                    .collect()
            })
            .unwrap_or_default();

        let processing_time_ms = data
            .get("processing_time_ms")
            .or_else(|| metadata.get("processing_time_ms"))
            .and_then(Value::as_f64);

        Ok(Self {
            predicted_passes: PassList::from_json(passes),
            features,
            model_used: data
                .get("model_used")
                .and_then(Value::as_str)
                .map(str::to_string),
            processing_time_ms,
        })
    }
}

/// Measurements for one successfully compiled configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodMetrics {
    /// Size and runtime
    pub sample: MetricSample,
    /// Passes the backend applied
    pub passes_used: PassList,
    /// Backend-formatted size, e.g. `12.4 KB`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary_size_human: Option<String>,
}

/// Outcome of one configuration in a comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodOutcome {
    /// Compiled and measured
    Measured(MethodMetrics),
    /// The backend could not build or run this configuration
    Failed {
        /// Backend error text
        error: String,
    },
}

impl MethodOutcome {
    /// Metrics, if the configuration was measured
    pub fn metrics(&self) -> Option<&MethodMetrics> {
        match self {
            Self::Measured(metrics) => Some(metrics),
            Self::Failed { .. } => None,
        }
    }
}

#[derive(Deserialize)]
struct RawMethodResult {
    #[serde(default)]
    success: bool,
    binary_size: Option<u64>,
    binary_size_human: Option<String>,
    runtime_mean: Option<f64>,
    runtime_std: Option<f64>,
    #[serde(default)]
    passes_used: Value,
    num_passes: Option<u32>,
    error: Option<String>,
}

impl RawMethodResult {
    fn validate(self, endpoint: &str, key: &str) -> Result<MethodOutcome, IrisError> {
        if !self.success {
            return Ok(MethodOutcome::Failed {
                error: self
                    .error
                    .unwrap_or_else(|| UNKNOWN_FAILURE.to_string()),
            });
        }

        let binary_size = self
            .binary_size
            .ok_or_else(|| malformed(endpoint, format!("'{key}' is missing 'binary_size'")))?;
        let runtime_mean = self
            .runtime_mean
            .ok_or_else(|| malformed(endpoint, format!("'{key}' is missing 'runtime_mean'")))?;
        if !runtime_mean.is_finite() || runtime_mean < 0.0 {
            return Err(malformed(
                endpoint,
                format!("'{key}' has invalid runtime_mean {runtime_mean}"),
            ));
        }

        let mut sample = MetricSample::new(binary_size, runtime_mean);
        if let Some(std) = self.runtime_std.filter(|s| s.is_finite() && *s >= 0.0) {
            sample = sample.with_runtime_std(std);
        }
        let passes_used = PassList::from_json(&self.passes_used);
        let num_passes = self
            .num_passes
            .or_else(|| (!passes_used.is_empty()).then_some(passes_used.len() as u32));
        if let Some(count) = num_passes {
            sample = sample.with_num_passes(count);
        }

        Ok(MethodOutcome::Measured(MethodMetrics {
            sample,
            passes_used,
            binary_size_human: self.binary_size_human,
        }))
    }
}

/// Baseline improvement as computed by the backend, kept for reports
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportedImprovement {
    /// Size reduction in percent (positive = predicted smaller)
    pub binary_size_reduction_percent: f64,
    /// Size reduction in bytes
    pub binary_size_reduction_bytes: i64,
    /// Runtime reduction in percent (positive = predicted faster)
    pub runtime_reduction_percent: f64,
    /// Runtime reduction in seconds
    pub runtime_reduction_seconds: f64,
    /// Backend's binary-size winner label
    pub winner_binary: String,
    /// Backend's runtime winner label
    pub winner_runtime: String,
}

/// One measured baseline level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineOutcome {
    /// Level that was compiled
    pub level: OptLevel,
    /// What happened
    pub outcome: MethodOutcome,
}

/// Result of `POST /api/compare`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareResponse {
    /// Predicted configuration metrics
    pub predicted: MethodMetrics,
    /// Baselines in ascending level order
    pub baselines: Vec<BaselineOutcome>,
    /// Backend-side improvements keyed like `vs_o2`
    pub reported_improvements: BTreeMap<String, ReportedImprovement>,
    /// Total backend processing time in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_processing_time: Option<f64>,
}

impl CompareResponse {
    const ENDPOINT: &'static str = "/api/compare";

    /// Parse and validate a compare response body.
    ///
    /// A failed predicted configuration is reported as the backend's own
    /// error; failed baselines are kept as [`MethodOutcome::Failed`].
    pub fn from_json(body: Value) -> Result<Self, IrisError> {
        let (data, _) = unwrap_envelope(Self::ENDPOINT, body)?;

        let predicted = Self::method(&data, "ml_predicted")?
            .ok_or_else(|| malformed(Self::ENDPOINT, "missing field 'ml_predicted'"))?;
        let predicted = match predicted {
            MethodOutcome::Measured(metrics) => metrics,
            MethodOutcome::Failed { error } => {
                return Err(IrisError::BackendRejected {
                    endpoint: Self::ENDPOINT.to_string(),
                    message: error,
                });
            }
        };

        let mut baselines = Vec::new();
        for level in OptLevel::ALL {
            if let Some(outcome) = Self::method(&data, level.response_key())? {
                baselines.push(BaselineOutcome { level, outcome });
            }
        }

        let reported_improvements = data
            .get("improvements")
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(key, value)| {
                        match serde_json::from_value::<ReportedImprovement>(value.clone()) {
                            Ok(improvement) => Some((key.clone(), improvement)),
                            Err(e) => {
                                log::debug!("Ignoring improvement entry '{}': {}", key, e);
                                None
                            }
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            predicted,
            baselines,
            reported_improvements,
            total_processing_time: data.get("total_processing_time").and_then(Value::as_f64),
        })
    }

    fn method(data: &Value, key: &str) -> Result<Option<MethodOutcome>, IrisError> {
        let Some(value) = data.get(key).filter(|v| !v.is_null()) else {
            return Ok(None);
        };
        let raw: RawMethodResult = serde_json::from_value(value.clone())
            .map_err(|e| malformed(Self::ENDPOINT, format!("'{key}': {e}")))?;
        raw.validate(Self::ENDPOINT, key).map(Some)
    }

    /// Baselines that were measured successfully, with their metrics
    pub fn measured_baselines(&self) -> impl Iterator<Item = (OptLevel, &MethodMetrics)> {
        self.baselines
            .iter()
            .filter_map(|b| b.outcome.metrics().map(|m| (b.level, m)))
    }

    /// Baselines the backend failed to build or run
    pub fn failed_baselines(&self) -> impl Iterator<Item = (OptLevel, &str)> {
        self.baselines.iter().filter_map(|b| match &b.outcome {
            MethodOutcome::Failed { error } => Some((b.level, error.as_str())),
            MethodOutcome::Measured(_) => None,
        })
    }
}
