//! Command handlers for the iris CLI
//!
//! Each submodule handles one subcommand. Handlers take a [`CommandContext`]
//! with resolved settings; the work itself lives in `*_impl` functions that are
//! generic over [`Backend`](crate::client::Backend) and the filesystem so they
//! can be tested without a network or a disk.

pub mod compare;
pub mod completions;
pub mod health;
pub mod init;
pub mod optimize;
pub mod passes;
pub mod session;

pub use compare::cmd_compare;
pub use completions::cmd_completions;
pub use health::cmd_health;
pub use init::cmd_init;
pub use optimize::cmd_optimize;
pub use passes::cmd_passes;
pub use session::{cmd_session_clear, cmd_session_show};

use crate::client::HttpBackend;
use crate::config::{ConfigLoader, Overrides, Settings, SettingsResolver};
use crate::report;
use crate::session::SessionStore;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolved settings plus the directory commands operate in
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Resolved settings
    pub settings: Settings,
    /// Working directory
    pub cwd: PathBuf,
}

impl CommandContext {
    /// Load `.iris.toml` from the working directory and apply overrides
    pub fn load(backend_flag: Option<String>) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to determine working directory")?;
        Self::load_in(&cwd, Overrides::from_env(backend_flag))
    }

    /// Load settings for `cwd` with explicit overrides
    pub fn load_in(cwd: &Path, overrides: Overrides) -> Result<Self> {
        let config = ConfigLoader::load(cwd).context("Failed to load configuration")?;
        let settings =
            SettingsResolver::resolve(&config, &overrides).context("Failed to resolve settings")?;
        log::debug!("Resolved settings: {:?}", settings);

        Ok(Self {
            settings,
            cwd: cwd.to_path_buf(),
        })
    }

    /// HTTP backend for the configured URL
    pub fn backend(&self) -> Result<HttpBackend> {
        Ok(HttpBackend::new(
            &self.settings.backend_url,
            self.settings.timeout,
        )?)
    }

    /// Session store for the configured directory
    pub fn session_store(&self) -> SessionStore {
        SessionStore::new(self.settings.session_dir_in(&self.cwd))
    }
}

/// Where results go
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// Print JSON to stdout instead of the console view
    pub json: bool,
    /// Also write a JSON report to this file
    pub report: Option<PathBuf>,
}

impl OutputOptions {
    /// Write the optional report file and, in JSON mode, print to stdout.
    ///
    /// Returns true when the console view should still be printed.
    pub(crate) fn emit<T: Serialize>(&self, value: &T) -> Result<bool> {
        if let Some(path) = &self.report {
            report::write_report(value, path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !self.json {
                println!(
                    "{} Report saved to {}",
                    crate::fmt::CHECKMARK,
                    console::style(path.display()).cyan()
                );
            }
        }

        if self.json {
            println!("{}", report::to_json(value)?);
            return Ok(false);
        }
        Ok(true)
    }
}

/// Spinner shown while a backend request is outstanding; hidden in JSON mode
pub(crate) fn spinner(message: &str, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
