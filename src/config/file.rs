//! Configuration file data structures

use serde::{Deserialize, Serialize};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".iris.toml";

/// Default backend address
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5001";

/// Default request timeout; compilation plus timed runs can take a while
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default timed runs per configuration
pub const DEFAULT_NUM_RUNS: u32 = 3;

/// `.iris.toml` structure. Every key is optional; missing keys fall back to
/// the built-in defaults when settings are resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Backend connection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendSettings>,

    /// Defaults for `optimize` and `compare`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultSettings>,

    /// Session handoff storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionSettings>,
}

/// `[backend]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BackendSettings {
    /// Base URL, e.g. `http://localhost:5001`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// `[defaults]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DefaultSettings {
    /// Prediction model (`transformer` or `xgboost`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Baseline levels for `compare`, e.g. `["O2", "O3"]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opt_levels: Option<Vec<String>>,

    /// Timed runs per configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_runs: Option<u32>,
}

/// `[session]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SessionSettings {
    /// Directory holding `session.json`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

impl ConfigFile {
    /// A file with every key set to its default, as written by `iris init`
    pub fn with_defaults() -> Self {
        Self {
            backend: Some(BackendSettings {
                url: Some(DEFAULT_BACKEND_URL.to_string()),
                timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            }),
            defaults: Some(DefaultSettings {
                model: Some("transformer".to_string()),
                opt_levels: Some(vec!["O2".to_string(), "O3".to_string()]),
                num_runs: Some(DEFAULT_NUM_RUNS),
            }),
            session: Some(SessionSettings {
                dir: Some(crate::session::DEFAULT_SESSION_DIR.to_string()),
            }),
        }
    }
}
