//! Validated handoff from `optimize` to `compare`

use super::record::{SessionRecord, SESSION_MAX_AGE_HOURS};
use crate::error::IrisError;
use crate::passes::PassList;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// A prediction that is known to be fresh enough to compare.
///
/// The only way to obtain one is [`HandoffContext::from_record`], so holding a
/// context means the expiry check has already passed.
#[derive(Debug, Clone, PartialEq)]
pub struct HandoffContext {
    record: SessionRecord,
}

impl HandoffContext {
    /// Wrap `record`, rejecting it if it is older than 24 hours at `now`.
    ///
    /// A record exactly 24 hours old is still accepted. Timestamps in the
    /// future (clock skew between machines) are accepted as well.
    pub fn from_record(record: SessionRecord, now: DateTime<Utc>) -> Result<Self, IrisError> {
        if record.is_expired(now) {
            return Err(IrisError::SessionExpired {
                age_hours: record.age_hours(now),
                max_age_hours: SESSION_MAX_AGE_HOURS,
            });
        }

        log::debug!(
            "Accepted session {} ({:.2}h old)",
            record.session_id,
            record.age_hours(now)
        );
        Ok(Self { record })
    }

    /// Source text to compile
    pub fn source_code(&self) -> &str {
        &self.record.source_code
    }

    /// File name the source came from
    pub fn file_name(&self) -> &str {
        &self.record.file_name
    }

    /// Predicted pass sequence
    pub fn predicted_passes(&self) -> &PassList {
        &self.record.predicted_passes
    }

    /// Model that made the prediction
    pub fn model_used(&self) -> &str {
        &self.record.model_used
    }

    /// Extracted features
    pub fn features(&self) -> &BTreeMap<String, f64> {
        &self.record.features
    }

    /// The underlying record
    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    /// Consume the context, returning the record
    pub fn into_record(self) -> SessionRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap()
    }

    fn record_aged(age: Duration) -> SessionRecord {
        SessionRecord::builder("int main(void) { return 0; }", "main.c")
            .passes(PassList::from_names(["mem2reg", "licm"]))
            .model("transformer")
            .build(now() - age)
    }

    #[test]
    fn test_fresh_record_accepted() {
        let ctx = HandoffContext::from_record(record_aged(Duration::minutes(5)), now()).unwrap();
        assert_eq!(ctx.file_name(), "main.c");
        assert_eq!(ctx.predicted_passes().names(), vec!["mem2reg", "licm"]);
        assert_eq!(ctx.model_used(), "transformer");
    }

    #[test]
    fn test_just_under_limit_accepted() {
        let age = Duration::hours(23) + Duration::minutes(59);
        assert!(HandoffContext::from_record(record_aged(age), now()).is_ok());
    }

    #[test]
    fn test_exactly_at_limit_accepted() {
        assert!(HandoffContext::from_record(record_aged(Duration::hours(24)), now()).is_ok());
    }

    #[test]
    fn test_over_limit_rejected() {
        let age = Duration::hours(24) + Duration::seconds(1);
        let err = HandoffContext::from_record(record_aged(age), now()).unwrap_err();
        assert!(matches!(
            err,
            IrisError::SessionExpired {
                max_age_hours: 24,
                ..
            }
        ));
    }

    #[test]
    fn test_expired_reports_age() {
        let err =
            HandoffContext::from_record(record_aged(Duration::hours(30)), now()).unwrap_err();
        match err {
            IrisError::SessionExpired { age_hours, .. } => assert_eq!(age_hours, 30.0),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_future_timestamp_accepted() {
        assert!(HandoffContext::from_record(record_aged(Duration::minutes(-10)), now()).is_ok());
    }
}
