//! Error types with contextual suggestions
//!
//! Every failure the client can hit falls into one of a few categories:
//! - the backend could not be reached (retry by hand once it is up)
//! - the prediction handed over to `compare` is missing, stale, or unreadable
//! - the backend answered but reported a failure (its text is shown as-is)
//! - the backend answered with something that does not match the API
//! - local input or configuration is invalid
//!
//! # Examples
//!
//! ```
//! use iris_cli::error::{ErrorCategory, IrisError};
//!
//! let err = IrisError::BackendUnavailable {
//!     url: "http://localhost:5001/api/optimize".to_string(),
//!     reason: "connection refused".to_string(),
//! };
//!
//! assert_eq!(err.category(), ErrorCategory::Transport);
//! assert!(err.is_retryable());
//! assert_eq!(err.exit_code(), 69);
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Broad classes of failure, used to pick wording and exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Backend unreachable or timed out
    Transport,
    /// Session handoff between `optimize` and `compare` is unusable
    Handoff,
    /// Backend reported `success: false`
    Backend,
    /// Backend response did not match the expected shape
    Protocol,
    /// Invalid user input or configuration
    Input,
    /// Local filesystem failure
    Io,
}

/// IRis client errors with contextual suggestions
#[derive(Error, Debug)]
pub enum IrisError {
    /// Backend could not be reached
    #[error("Failed to connect to the optimization backend at {url}: {reason}")]
    BackendUnavailable {
        /// Endpoint URL that was requested
        url: String,
        /// Transport-level reason
        reason: String,
    },

    /// Backend answered with `success: false`
    #[error("{message}")]
    BackendRejected {
        /// Endpoint path, e.g. `/api/optimize`
        endpoint: String,
        /// Error text reported by the backend
        message: String,
    },

    /// Backend answered with a payload we cannot interpret
    #[error("Malformed response from {endpoint}: {detail}")]
    MalformedResponse {
        /// Endpoint path
        endpoint: String,
        /// What was wrong with the payload
        detail: String,
    },

    /// No prediction has been handed over yet
    #[error("No prediction session found at {}", path.display())]
    SessionMissing {
        /// Expected session file
        path: PathBuf,
    },

    /// Prediction handoff is older than the allowed age
    #[error(
        "Prediction session expired ({age_hours:.1} hours old, limit is {max_age_hours} hours)"
    )]
    SessionExpired {
        /// Age of the record in hours
        age_hours: f64,
        /// Maximum allowed age in hours
        max_age_hours: i64,
    },

    /// Prediction handoff exists but cannot be read
    #[error("Prediction session data is unreadable: {detail}")]
    SessionCorrupt {
        /// Session file
        path: PathBuf,
        /// Parse failure description
        detail: String,
    },

    /// Source file rejected before upload
    #[error("Invalid source file {}: {reason}", path.display())]
    InvalidSourceFile {
        /// Offending file
        path: PathBuf,
        /// Why it was rejected
        reason: String,
    },

    /// Unknown prediction model
    #[error("Unsupported model: '{name}'")]
    UnsupportedModel {
        /// Requested model name
        name: String,
        /// Models the backend serves
        available: Vec<String>,
    },

    /// Unknown optimization level
    #[error("Unknown optimization level: '{level}'")]
    InvalidOptLevel {
        /// Requested level
        level: String,
        /// Valid level names
        valid: Vec<String>,
    },

    /// Configuration value out of range or unparseable
    #[error("Invalid configuration: {detail}")]
    InvalidConfig {
        /// Description of the problem
        detail: String,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl IrisError {
    /// Category this error belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::BackendUnavailable { .. } => ErrorCategory::Transport,
            Self::BackendRejected { .. } => ErrorCategory::Backend,
            Self::MalformedResponse { .. } => ErrorCategory::Protocol,
            Self::SessionMissing { .. }
            | Self::SessionExpired { .. }
            | Self::SessionCorrupt { .. } => ErrorCategory::Handoff,
            Self::InvalidSourceFile { .. }
            | Self::UnsupportedModel { .. }
            | Self::InvalidOptLevel { .. }
            | Self::InvalidConfig { .. } => ErrorCategory::Input,
            Self::Io { .. } => ErrorCategory::Io,
        }
    }

    /// Whether re-running the same command may succeed without changes
    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Transport
    }

    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use iris_cli::error::IrisError;
    /// use std::path::PathBuf;
    ///
    /// let error = IrisError::SessionMissing {
    ///     path: PathBuf::from(".iris/session.json"),
    /// };
    ///
    /// assert!(error.suggestion().unwrap().contains("iris optimize"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::BackendUnavailable { .. } => Some(
                "Ensure the backend is running and accessible, then re-run the command.\n  \
                 Check it with: iris health"
                    .to_string(),
            ),
            Self::BackendRejected { .. } => Some(
                "The backend reported this failure; adjust the input and try again".to_string(),
            ),
            Self::MalformedResponse { .. } => Some(
                "The backend version may not match this client. \
                 Run 'iris health' to see which service answered"
                    .to_string(),
            ),
            Self::SessionMissing { .. } => Some(
                "Run 'iris optimize <FILE>' first to predict passes for a source file".to_string(),
            ),
            Self::SessionExpired { .. } => Some(
                "Predictions are kept for 24 hours. Run 'iris optimize <FILE>' again".to_string(),
            ),
            Self::SessionCorrupt { path, .. } => Some(format!(
                "Run 'iris session clear' to discard {} and 'iris optimize <FILE>' to start over",
                path.display()
            )),
            Self::InvalidSourceFile { .. } => Some(
                "Provide a C/C++ source file (.c, .cpp, .cc, .cxx) between 10 bytes and 1 MB"
                    .to_string(),
            ),
            Self::UnsupportedModel { available, .. } => {
                Some(format!("Available models: {}", available.join(", ")))
            }
            Self::InvalidOptLevel { valid, .. } => {
                Some(format!("Valid levels: {}", valid.join(", ")))
            }
            Self::InvalidConfig { .. } => Some(
                "Fix .iris.toml or run 'iris init --force' to regenerate the defaults".to_string(),
            ),
            Self::Io { context, .. } => Some(format!(
                "Failed while {}; check file permissions and free disk space",
                context
            )),
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Follows sysexits.h conventions where one applies.
    ///
    /// ```
    /// use iris_cli::error::IrisError;
    ///
    /// let err = IrisError::SessionExpired { age_hours: 30.0, max_age_hours: 24 };
    /// assert_eq!(err.exit_code(), 65); // EX_DATAERR
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::BackendUnavailable { .. } => 69, // EX_UNAVAILABLE
            Self::BackendRejected { .. } => 1,     // Generic error
            Self::MalformedResponse { .. } => 76,  // EX_PROTOCOL
            Self::SessionMissing { .. } => 66,     // EX_NOINPUT
            Self::SessionExpired { .. } => 65,     // EX_DATAERR
            Self::SessionCorrupt { .. } => 65,     // EX_DATAERR
            Self::InvalidSourceFile { .. } => 65,  // EX_DATAERR
            Self::UnsupportedModel { .. } => 64,   // EX_USAGE
            Self::InvalidOptLevel { .. } => 64,    // EX_USAGE
            Self::InvalidConfig { .. } => 78,      // EX_CONFIG
            Self::Io { .. } => 74,                 // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and suggestions
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(iris_error) = Self::find(error) {
            if let Some(suggestion) = iris_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        Self::find(error).map(IrisError::exit_code).unwrap_or(1)
    }

    /// Locate the first `IrisError` anywhere in the chain.
    ///
    /// Command handlers wrap library errors with `.context(...)`, which moves
    /// the typed error off the top of the chain.
    fn find(error: &anyhow::Error) -> Option<&IrisError> {
        error.chain().find_map(|e| e.downcast_ref::<IrisError>())
    }
}
