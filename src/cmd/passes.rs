//! Passes command implementation
//!
//! Handles `iris passes`, which breaks a pass sequence down against the
//! catalogued `-O2` / `-O3` pipelines without contacting the backend.

use super::CommandContext;
use crate::infra::FileSystem;
use crate::passes::{catalog, PassClassification, PassList, PassSetComparator};
use crate::report::{display, to_json};
use crate::session::SessionStore;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

/// Analyse `explicit` passes, or the stored prediction when none are given
pub fn cmd_passes(ctx: &CommandContext, explicit: &[String], json: bool) -> Result<()> {
    let classification = cmd_passes_impl(&ctx.session_store(), explicit, Utc::now())?;

    if json {
        println!("{}", to_json(&classification)?);
    } else {
        display::print_pass_analysis(&classification, true);
    }
    Ok(())
}

/// Classify passes against the catalog
///
/// Explicit entries may be comma separated (`mem2reg,gvn`).
pub fn cmd_passes_impl<FS: FileSystem>(
    store: &SessionStore<FS>,
    explicit: &[String],
    now: DateTime<Utc>,
) -> Result<PassClassification> {
    let passes = if explicit.is_empty() {
        let context = store
            .load_context(now)
            .context("No passes given and no stored prediction")?;
        context.predicted_passes().clone()
    } else {
        PassList::from_names(explicit.iter().flat_map(|arg| arg.split(',')).map(str::trim))
    };

    Ok(PassSetComparator::classify(&passes, &catalog::reference_set()))
}
