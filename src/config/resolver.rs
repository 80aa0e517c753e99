//! Settings resolution
//!
//! Precedence, highest first: `--backend` flag, `IRIS_BACKEND_URL`,
//! `.iris.toml`, built-in defaults.

use super::file::{ConfigFile, DEFAULT_BACKEND_URL, DEFAULT_NUM_RUNS, DEFAULT_TIMEOUT_SECS};
use crate::client::ModelKind;
use crate::error::IrisError;
use crate::passes::OptLevel;
use crate::session::DEFAULT_SESSION_DIR;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the backend URL
pub const BACKEND_URL_ENV: &str = "IRIS_BACKEND_URL";

/// Upper bound on timed runs per configuration
pub const MAX_NUM_RUNS: u32 = 10;

/// Values that override the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--backend` flag
    pub backend_url: Option<String>,
    /// `IRIS_BACKEND_URL`
    pub env_backend_url: Option<String>,
}

impl Overrides {
    /// Overrides from the flag value and the process environment
    pub fn from_env(backend_flag: Option<String>) -> Self {
        Self {
            backend_url: backend_flag,
            env_backend_url: std::env::var(BACKEND_URL_ENV)
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }
}

/// Fully resolved and validated settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Backend base URL
    pub backend_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Default prediction model
    pub model: ModelKind,
    /// Default baseline levels
    pub opt_levels: Vec<OptLevel>,
    /// Default timed runs per configuration
    pub num_runs: u32,
    /// Session directory, relative paths taken from the working directory
    pub session_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            model: ModelKind::Transformer,
            opt_levels: vec![OptLevel::O2, OptLevel::O3],
            num_runs: DEFAULT_NUM_RUNS,
            session_dir: PathBuf::from(DEFAULT_SESSION_DIR),
        }
    }
}

/// Merges config file values with overrides and validates the result
pub struct SettingsResolver;

impl SettingsResolver {
    /// Resolve settings
    ///
    /// # Examples
    ///
    /// ```
    /// use iris_cli::config::{ConfigFile, Overrides, SettingsResolver};
    ///
    /// let overrides = Overrides {
    ///     backend_url: Some("http://gpu-box:5001".to_string()),
    ///     env_backend_url: None,
    /// };
    /// let settings = SettingsResolver::resolve(&ConfigFile::default(), &overrides)?;
    ///
    /// assert_eq!(settings.backend_url, "http://gpu-box:5001");
    /// assert_eq!(settings.num_runs, 3);
    /// # Ok::<(), iris_cli::error::IrisError>(())
    /// ```
    pub fn resolve(config: &ConfigFile, overrides: &Overrides) -> Result<Settings, IrisError> {
        let mut settings = Settings::default();

        if let Some(backend) = &config.backend {
            if let Some(url) = &backend.url {
                settings.backend_url = url.clone();
            }
            if let Some(secs) = backend.timeout_secs {
                if secs == 0 {
                    return Err(invalid("backend.timeout-secs must be greater than 0"));
                }
                settings.timeout = Duration::from_secs(secs);
            }
        }

        if let Some(url) = overrides
            .backend_url
            .as_ref()
            .or(overrides.env_backend_url.as_ref())
        {
            settings.backend_url = url.clone();
        }
        validate_url(&settings.backend_url)?;

        if let Some(defaults) = &config.defaults {
            if let Some(model) = &defaults.model {
                settings.model = model.parse()?;
            }
            if let Some(levels) = &defaults.opt_levels {
                settings.opt_levels = parse_levels(levels)?;
            }
            if let Some(runs) = defaults.num_runs {
                settings.num_runs = validate_num_runs(runs)?;
            }
        }

        if let Some(dir) = config.session.as_ref().and_then(|s| s.dir.as_ref()) {
            if dir.trim().is_empty() {
                return Err(invalid("session.dir must not be empty"));
            }
            settings.session_dir = PathBuf::from(dir);
        }

        Ok(settings)
    }
}

impl Settings {
    /// Session directory resolved against `cwd`
    pub fn session_dir_in(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.session_dir)
    }
}

/// Parse a list of level names in ascending order, collapsing duplicates
pub fn parse_levels<S: AsRef<str>>(names: &[S]) -> Result<Vec<OptLevel>, IrisError> {
    let mut levels = Vec::with_capacity(names.len());
    for name in names {
        let level: OptLevel = name.as_ref().parse()?;
        if !levels.contains(&level) {
            levels.push(level);
        }
    }
    levels.sort();
    Ok(levels)
}

/// Check that `runs` lies in `1..=10`
pub fn validate_num_runs(runs: u32) -> Result<u32, IrisError> {
    if runs == 0 || runs > MAX_NUM_RUNS {
        return Err(invalid(format!(
            "num-runs must be between 1 and {} (got {})",
            MAX_NUM_RUNS, runs
        )));
    }
    Ok(runs)
}

fn validate_url(url: &str) -> Result<(), IrisError> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| invalid(format!("backend url '{}' is not a valid URL: {}", url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(invalid(format!(
            "backend url '{}' must be an http(s) URL with a host",
            url
        )));
    }
    Ok(())
}

fn invalid(detail: impl Into<String>) -> IrisError {
    IrisError::InvalidConfig {
        detail: detail.into(),
    }
}
