//! Serializable reports for `--json` and `--report`

use crate::client::{
    BaselineOutcome, CompareResponse, MethodMetrics, OptimizeResponse, ReportedImprovement,
};
use crate::error::IrisError;
use crate::infra::{FileSystem, RealFileSystem};
use crate::passes::{catalog, PassClassification, PassList, PassSetComparator};
use crate::scoring::{Champions, ImprovementScorer, MetricSample, Scorecard};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use uuid::Uuid;

/// Label of the predicted configuration in reports
pub const PREDICTED_LABEL: &str = "ML-Predicted";

/// Outcome of `iris optimize`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizeReport {
    /// Session the prediction was stored under
    pub session_id: Uuid,
    /// Analysed file
    pub file_name: String,
    /// Model that made the prediction
    pub model_used: String,
    /// Predicted pass sequence
    pub predicted_passes: PassList,
    /// Extracted program features
    pub features: BTreeMap<String, f64>,
    /// Backend processing time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<f64>,
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
}

impl OptimizeReport {
    /// Build from a backend response
    pub fn new(
        session_id: Uuid,
        file_name: &str,
        model: &str,
        response: &OptimizeResponse,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id,
            file_name: file_name.to_string(),
            model_used: response.model_used.clone().unwrap_or_else(|| model.to_string()),
            predicted_passes: response.predicted_passes.clone(),
            features: response.features.clone(),
            processing_time_ms: response.processing_time_ms,
            generated_at,
        }
    }

    /// Up to `limit` features, largest magnitude first
    pub fn top_features(&self, limit: usize) -> Vec<(&str, f64)> {
        let mut features: Vec<(&str, f64)> = self
            .features
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();
        features.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
        features.truncate(limit);
        features
    }
}

/// Outcome of `iris compare`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// Compared file
    pub file_name: String,
    /// Model that made the prediction
    pub model_used: String,
    /// Predicted configuration metrics
    pub predicted: MethodMetrics,
    /// Baselines, measured and failed
    pub baselines: Vec<BaselineOutcome>,
    /// Deltas and win classification, computed locally
    pub scores: Scorecard,
    /// Best configuration per metric
    pub champions: Champions,
    /// Predicted passes against the catalogued LLVM levels
    pub pass_analysis: PassClassification,
    /// Improvements as the backend computed them
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub reported_improvements: BTreeMap<String, ReportedImprovement>,
    /// Total backend processing time in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_processing_time: Option<f64>,
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
}

impl ComparisonReport {
    /// Score a compare response and classify its passes
    pub fn new(
        file_name: &str,
        model_used: &str,
        predicted_passes: &PassList,
        response: CompareResponse,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let measured: Vec<(&str, &MetricSample)> = response
            .measured_baselines()
            .map(|(level, metrics)| (level.name(), &metrics.sample))
            .collect();

        let scores =
            ImprovementScorer::score_all(&response.predicted.sample, measured.iter().copied());

        let labels: Vec<String> = response
            .measured_baselines()
            .map(|(level, _)| level.label())
            .collect();
        let champions = Champions::find(
            std::iter::once((PREDICTED_LABEL, &response.predicted.sample)).chain(
                labels
                    .iter()
                    .zip(&measured)
                    .map(|(label, (_, sample))| (label.as_str(), *sample)),
            ),
        );

        // Prefer what the backend says it applied; fall back to the prediction
        let passes = if response.predicted.passes_used.is_empty() {
            predicted_passes
        } else {
            &response.predicted.passes_used
        };
        let pass_analysis = PassSetComparator::classify(passes, &catalog::reference_set());

        Self {
            file_name: file_name.to_string(),
            model_used: model_used.to_string(),
            scores,
            champions,
            pass_analysis,
            predicted: response.predicted,
            baselines: response.baselines,
            reported_improvements: response.reported_improvements,
            total_processing_time: response.total_processing_time,
            generated_at,
        }
    }
}

/// Serialize `report` as pretty JSON
pub fn to_json<T: Serialize>(report: &T) -> Result<String, IrisError> {
    serde_json::to_string_pretty(report).map_err(|e| IrisError::Io {
        context: "serializing report".to_string(),
        source: io::Error::other(e),
    })
}

/// Write `report` as pretty JSON to `path`
pub fn write_report<T: Serialize>(report: &T, path: &Path) -> Result<(), IrisError> {
    write_report_with_fs(report, path, &RealFileSystem)
}

/// Write `report` with a custom filesystem implementation
pub fn write_report_with_fs<T: Serialize, FS: FileSystem>(
    report: &T,
    path: &Path,
    fs: &FS,
) -> Result<(), IrisError> {
    let contents = to_json(report)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs.create_dir_all(parent).map_err(|source| IrisError::Io {
            context: format!("creating {}", parent.display()),
            source,
        })?;
    }
    fs.write(path, contents).map_err(|source| IrisError::Io {
        context: format!("writing report {}", path.display()),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MemoryFileSystem;
    use crate::scoring::Winner;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 2, 9, 15, 0).unwrap()
    }

    fn compare_response() -> CompareResponse {
        CompareResponse::from_json(json!({
            "ml_predicted": {
                "success": true, "binary_size": 800, "runtime_mean": 0.010,
                "passes_used": ["mem2reg", "instcombine", "gvn"]
            },
            "llvm_o2": {"success": true, "binary_size": 1000, "runtime_mean": 0.012},
            "llvm_o3": {"success": true, "binary_size": 1200, "runtime_mean": 0.008},
            "llvm_o1": {"success": false, "error": "link failed"}
        }))
        .unwrap()
    }

    fn report_for(model: &str) -> ComparisonReport {
        ComparisonReport::new("a.c", model, &PassList::new(), compare_response(), now())
    }

    #[test]
    fn test_comparison_report_scores_measured_baselines_only() {
        let report = report_for("transformer");

        let names: Vec<&str> = report.scores.baselines.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["O2", "O3"]);
        // O2: both better (1.0); O3: smaller only (0.5)
        assert_eq!(report.scores.summary.score, 1.5);
        assert_eq!(report.scores.summary.win_rate, 75.0);
        assert_eq!(report.scores.summary.winner, Winner::Predicted);
        assert_eq!(report.baselines.len(), 3);
    }

    #[test]
    fn test_comparison_report_champions() {
        let report = report_for("transformer");
        assert_eq!(report.champions.binary_size.as_ref().unwrap().name, PREDICTED_LABEL);
        assert_eq!(report.champions.runtime.as_ref().unwrap().name, "LLVM -O3");
    }

    #[test]
    fn test_pass_analysis_uses_applied_passes() {
        let report = ComparisonReport::new(
            "a.c",
            "transformer",
            &PassList::from_names(["ignored"]),
            compare_response(),
            now(),
        );
        assert_eq!(report.pass_analysis.predicted().len(), 3);
        assert_eq!(report.pass_analysis.unique_to_predicted().names(), vec!["instcombine"]);
    }

    #[test]
    fn test_top_features_by_magnitude() {
        let mut features = BTreeMap::new();
        features.insert("a".to_string(), 1.0);
        features.insert("b".to_string(), -9.0);
        features.insert("c".to_string(), 4.0);
        let report = OptimizeReport {
            session_id: Uuid::nil(),
            file_name: "a.c".to_string(),
            model_used: "transformer".to_string(),
            predicted_passes: PassList::new(),
            features,
            processing_time_ms: None,
            generated_at: now(),
        };
        let top: Vec<&str> = report.top_features(2).into_iter().map(|(n, _)| n).collect();
        assert_eq!(top, vec!["b", "c"]);
    }

    #[test]
    fn test_report_json_shape() {
        let report = report_for("xgboost");
        let value: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();

        assert_eq!(value["file_name"], "a.c");
        assert_eq!(value["scores"]["summary"]["winner"], "predicted");
        assert_eq!(value["baselines"][0]["level"], "O1");
        assert_eq!(value["baselines"][0]["outcome"]["status"], "failed");
        assert_eq!(value["generated_at"], "2025-04-02T09:15:00Z");
    }

    #[test]
    fn test_write_report_creates_parent() {
        let fs = MemoryFileSystem::new();
        let path = Path::new("/out/reports/run.json");
        write_report_with_fs(&json!({"ok": true}), path, &fs).unwrap();
        assert!(fs.contains(path));
    }
}
