//! Compare command implementation
//!
//! Handles `iris compare`: takes the prediction stored by `iris optimize`,
//! has the backend compile and time it next to the standard LLVM levels, and
//! shows who won.

use super::{spinner, CommandContext, OutputOptions};
use crate::client::{Backend, CompareRequest, SourceFile};
use crate::config::resolver::{parse_levels, validate_num_runs};
use crate::infra::FileSystem;
use crate::passes::OptLevel;
use crate::report::{display, ComparisonReport};
use crate::session::SessionStore;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

/// Options for `iris compare`
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    /// Baseline levels; configured defaults when empty
    pub levels: Vec<String>,
    /// Timed runs per configuration; configured default when unset
    pub num_runs: Option<u32>,
    /// Show the full pass breakdown
    pub pass_detail: bool,
}

/// Compare the stored prediction against LLVM baselines
pub fn cmd_compare(
    ctx: &CommandContext,
    options: &CompareOptions,
    output: &OutputOptions,
) -> Result<()> {
    let levels = if options.levels.is_empty() {
        ctx.settings.opt_levels.clone()
    } else {
        parse_levels(&options.levels)?
    };
    let num_runs = match options.num_runs {
        Some(runs) => validate_num_runs(runs)?,
        None => ctx.settings.num_runs,
    };

    let backend = ctx.backend()?;
    let store = ctx.session_store();
    let report = cmd_compare_impl(&backend, &store, levels, num_runs, !output.json, Utc::now())?;

    if output.emit(&report)? {
        display::print_comparison(&report, options.pass_detail);
    }
    Ok(())
}

/// Load the handoff, run the comparison and score it
pub fn cmd_compare_impl<B: Backend, FS: FileSystem>(
    backend: &B,
    store: &SessionStore<FS>,
    levels: Vec<OptLevel>,
    num_runs: u32,
    show_progress: bool,
    now: DateTime<Utc>,
) -> Result<ComparisonReport> {
    let context = store
        .load_context(now)
        .context("No usable prediction to compare")?;

    let source = SourceFile::from_parts(context.file_name(), context.source_code())
        .context("Stored source no longer passes validation")?;

    log::info!(
        "Comparing {} predicted passes for {} against {:?} ({} runs)",
        context.predicted_passes().len(),
        context.file_name(),
        levels,
        num_runs
    );

    let request = CompareRequest {
        source,
        passes: context.predicted_passes().clone(),
        opt_levels: levels,
        num_runs,
    };

    let progress = spinner(
        "Compiling and benchmarking (this can take a minute)...",
        show_progress,
    );
    let result = backend.compare(&request);
    progress.finish_and_clear();
    let response = result.context("Comparison failed")?;

    Ok(ComparisonReport::new(
        context.file_name(),
        context.model_used(),
        context.predicted_passes(),
        response,
        now,
    ))
}
