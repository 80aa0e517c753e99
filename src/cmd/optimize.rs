//! Optimize command implementation
//!
//! Handles `iris optimize <FILE>`: uploads a source file, shows the predicted
//! pass sequence and stores it so `iris compare` can pick it up.

use super::{spinner, CommandContext, OutputOptions};
use crate::client::{Backend, ModelKind, OptimizeRequest, SourceFile};
use crate::infra::FileSystem;
use crate::report::{display, OptimizeReport};
use crate::session::{SessionRecord, SessionStore};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

/// Predict passes for `file` and store the prediction
///
/// # Examples
///
/// ```no_run
/// use iris_cli::cmd::{cmd_optimize, CommandContext, OutputOptions};
/// use std::path::Path;
///
/// let ctx = CommandContext::load(None)?;
/// cmd_optimize(&ctx, Path::new("matrix.c"), Some("xgboost"), &OutputOptions::default())?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_optimize(
    ctx: &CommandContext,
    file: &Path,
    model: Option<&str>,
    output: &OutputOptions,
) -> Result<()> {
    let model = match model {
        Some(name) => name.parse::<ModelKind>()?,
        None => ctx.settings.model,
    };
    let source = SourceFile::load(file)?;
    let backend = ctx.backend()?;
    let store = ctx.session_store();

    let report = cmd_optimize_impl(&backend, &store, source, model, !output.json, Utc::now())?;

    if output.emit(&report)? {
        display::print_optimize(&report);
    }
    Ok(())
}

/// Run the prediction and persist it; no console output besides the spinner
pub fn cmd_optimize_impl<B: Backend, FS: FileSystem>(
    backend: &B,
    store: &SessionStore<FS>,
    source: SourceFile,
    model: ModelKind,
    show_progress: bool,
    now: DateTime<Utc>,
) -> Result<OptimizeReport> {
    log::info!(
        "Predicting passes for {} ({} bytes) with {}",
        source.file_name(),
        source.len(),
        model
    );

    // A new upload replaces the handoff even if the prediction fails
    store
        .invalidate()
        .context("Failed to discard the previous prediction")?;

    let request = OptimizeRequest { source, model };
    let progress = spinner(
        &format!("Predicting passes with the {} model...", model),
        show_progress,
    );
    let result = backend.optimize(&request);
    progress.finish_and_clear();
    let response = result.context("Prediction failed")?;

    let model_used = response
        .model_used
        .clone()
        .unwrap_or_else(|| model.as_str().to_string());
    let mut builder = SessionRecord::builder(request.source.contents(), request.source.file_name())
        .passes(response.predicted_passes.clone())
        .features(response.features.clone())
        .model(&model_used);
    if let Some(ms) = response.processing_time_ms {
        builder = builder.processing_time_ms(ms);
    }
    let record = builder.build(now);

    store
        .save(&record)
        .context("Failed to store prediction for 'iris compare'")?;

    Ok(OptimizeReport::new(
        record.session_id,
        request.source.file_name(),
        &model_used,
        &response,
        now,
    ))
}
