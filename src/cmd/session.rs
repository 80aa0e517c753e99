//! Session command implementation
//!
//! Handles `iris session show` and `iris session clear`, which inspect or
//! discard the prediction handed from `optimize` to `compare`.

use super::CommandContext;
use crate::fmt::{CHECKMARK, INFO};
use crate::infra::FileSystem;
use crate::report::{display, to_json};
use crate::session::{SessionRecord, SessionStore};
use anyhow::Result;
use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;

/// Stored record plus its freshness at the time it was inspected
#[derive(Debug, Serialize)]
pub struct SessionView {
    /// The stored record
    #[serde(flatten)]
    pub record: SessionRecord,
    /// Age in hours
    pub age_hours: f64,
    /// Whether `compare` would refuse this record
    pub expired: bool,
}

impl SessionView {
    fn new(record: SessionRecord, now: DateTime<Utc>) -> Self {
        let age_hours = record.age_hours(now);
        Self {
            expired: record.is_expired(now),
            record,
            age_hours,
        }
    }
}

/// Show the stored prediction, including expired ones
pub fn cmd_session_show(ctx: &CommandContext, json: bool) -> Result<()> {
    let now = Utc::now();
    let view = session_show_impl(&ctx.session_store(), now)?;

    if json {
        println!("{}", to_json(&view)?);
    } else {
        display::print_session(&view.record, now);
    }
    Ok(())
}

/// Load the stored record without enforcing expiry
pub fn session_show_impl<FS: FileSystem>(
    store: &SessionStore<FS>,
    now: DateTime<Utc>,
) -> Result<SessionView> {
    let record = store.load_record()?;
    Ok(SessionView::new(record, now))
}

/// Discard the stored prediction
pub fn cmd_session_clear(ctx: &CommandContext) -> Result<()> {
    let store = ctx.session_store();
    if store.invalidate()? {
        println!(
            "{} Cleared stored prediction at {}",
            CHECKMARK,
            style(store.path().display()).cyan()
        );
    } else {
        println!("{}  No stored prediction to clear", INFO);
    }
    Ok(())
}
