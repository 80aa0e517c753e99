//! Persisted prediction record

use crate::passes::PassList;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Maximum age of a prediction before `compare` refuses it
pub const SESSION_MAX_AGE_HOURS: i64 = 24;

/// One prediction, as written by `optimize` and read back by `compare`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Unique id of this prediction
    pub session_id: Uuid,
    /// Full source text that was analysed
    pub source_code: String,
    /// Original file name, used for display and upload
    pub file_name: String,
    /// Predicted pass sequence
    pub predicted_passes: PassList,
    /// Extracted program features
    #[serde(default)]
    pub features: BTreeMap<String, f64>,
    /// Model that produced the prediction
    pub model_used: String,
    /// Backend processing time in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<f64>,
    /// When the prediction was made
    pub timestamp: DateTime<Utc>,
}

impl SessionRecord {
    /// Start building a record for `source_code` read from `file_name`
    pub fn builder(
        source_code: impl Into<String>,
        file_name: impl Into<String>,
    ) -> SessionRecordBuilder {
        SessionRecordBuilder {
            source_code: source_code.into(),
            file_name: file_name.into(),
            predicted_passes: PassList::new(),
            features: BTreeMap::new(),
            model_used: String::new(),
            processing_time_ms: None,
        }
    }

    /// Hours elapsed between the record's timestamp and `now`
    pub fn age_hours(&self, now: DateTime<Utc>) -> f64 {
        (now - self.timestamp).num_milliseconds() as f64 / 3_600_000.0
    }

    /// Whether the record is older than [`SESSION_MAX_AGE_HOURS`] at `now`.
    ///
    /// Exactly 24 hours is still fresh; future timestamps are never expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.timestamp > Duration::hours(SESSION_MAX_AGE_HOURS)
    }
}

/// Builder for [`SessionRecord`]
#[derive(Debug, Clone)]
pub struct SessionRecordBuilder {
    source_code: String,
    file_name: String,
    predicted_passes: PassList,
    features: BTreeMap<String, f64>,
    model_used: String,
    processing_time_ms: Option<f64>,
}

impl SessionRecordBuilder {
    /// Predicted pass sequence
    pub fn passes(mut self, passes: PassList) -> Self {
        self.predicted_passes = passes;
        self
    }

    /// Extracted features
    pub fn features(mut self, features: BTreeMap<String, f64>) -> Self {
        self.features = features;
        self
    }

    /// Model name
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model_used = model.into();
        self
    }

    /// Backend processing time in milliseconds
    pub fn processing_time_ms(mut self, millis: f64) -> Self {
        self.processing_time_ms = Some(millis);
        self
    }

    /// Finish the record, stamping it with `timestamp` and a fresh id
    pub fn build(self, timestamp: DateTime<Utc>) -> SessionRecord {
        SessionRecord {
            session_id: Uuid::new_v4(),
            source_code: self.source_code,
            file_name: self.file_name,
            predicted_passes: self.predicted_passes,
            features: self.features,
            model_used: self.model_used,
            processing_time_ms: self.processing_time_ms,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_builder_populates_fields() {
        let mut features = BTreeMap::new();
        features.insert("num_loops".to_string(), 3.0);

        let record = SessionRecord::builder("int main(){}", "main.c")
            .passes(PassList::from_names(["mem2reg", "gvn"]))
            .features(features)
            .model("xgboost")
            .processing_time_ms(812.5)
            .build(fixed_now());

        assert_eq!(record.file_name, "main.c");
        assert_eq!(record.predicted_passes.len(), 2);
        assert_eq!(record.features["num_loops"], 3.0);
        assert_eq!(record.model_used, "xgboost");
        assert_eq!(record.processing_time_ms, Some(812.5));
        assert_eq!(record.timestamp, fixed_now());
    }

    #[test]
    fn test_each_build_gets_new_id() {
        let a = SessionRecord::builder("x", "a.c").build(fixed_now());
        let b = SessionRecord::builder("x", "a.c").build(fixed_now());
        assert_ne!(a.session_id, b.session_id);
    }

    #[test]
    fn test_age_hours() {
        let record = SessionRecord::builder("x", "a.c").build(fixed_now() - Duration::minutes(90));
        assert_eq!(record.age_hours(fixed_now()), 1.5);
    }

    #[test]
    fn test_expiry_boundary_is_exact() {
        let at_limit = SessionRecord::builder("x", "a.c").build(fixed_now() - Duration::hours(24));
        assert!(!at_limit.is_expired(fixed_now()));

        let just_past = SessionRecord::builder("x", "a.c")
            .build(fixed_now() - Duration::hours(24) - Duration::milliseconds(500));
        assert!(just_past.is_expired(fixed_now()));

        let future = SessionRecord::builder("x", "a.c").build(fixed_now() + Duration::hours(1));
        assert!(!future.is_expired(fixed_now()));
    }

    #[test]
    fn test_serde_roundtrip_uses_rfc3339_timestamp() {
        let record = SessionRecord::builder("int x;", "x.c")
            .passes(PassList::from_names(["sroa"]))
            .model("transformer")
            .build(fixed_now());

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("2025-03-14T12:00:00Z"));
        assert!(!json.contains("processing_time_ms"));

        let back: SessionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
