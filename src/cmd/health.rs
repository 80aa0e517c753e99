//! Health command implementation
//!
//! Handles `iris health`, which checks whether the optimization backend is
//! reachable before any work is uploaded.

use super::{spinner, CommandContext};
use crate::client::{Backend, HealthStatus};
use crate::error::IrisError;
use crate::report::{display, to_json};
use anyhow::Result;

/// Check the backend and report its status
///
/// Exits with the unavailable status (69) when the backend is down so the
/// command can gate scripts.
pub fn cmd_health(ctx: &CommandContext, json: bool) -> Result<()> {
    let backend = ctx.backend()?;
    let status = cmd_health_impl(&backend, json);
    report_health(&status, &ctx.settings.backend_url, json)
}

/// Query the backend with a spinner
pub fn cmd_health_impl<B: Backend>(backend: &B, json: bool) -> HealthStatus {
    let progress = spinner("Contacting backend...", !json);
    let status = backend.health();
    progress.finish_and_clear();
    status
}

fn report_health(status: &HealthStatus, url: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", to_json(status)?);
    } else {
        display::print_health(status, url);
    }

    if !status.available {
        return Err(IrisError::BackendUnavailable {
            url: url.to_string(),
            reason: status.detail.clone(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockBackend;
    use crate::error::ErrorFormatter;
    use serde_json::json;

    #[test]
    fn test_healthy_backend() {
        let backend = MockBackend {
            health: Some(json!({"success": true, "data": {"status": "healthy", "version": "1.0"}})),
            ..Default::default()
        };
        let status = cmd_health_impl(&backend, true);
        assert!(status.available);
        assert!(report_health(&status, "http://mock", true).is_ok());
    }

    #[test]
    fn test_unreachable_backend_exits_unavailable() {
        let status = cmd_health_impl(&MockBackend::unreachable(), true);
        assert!(!status.available);

        let err = report_health(&status, "http://mock", true).unwrap_err();
        assert_eq!(ErrorFormatter::exit_code(&err), 69);
    }
}
