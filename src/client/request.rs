//! Typed requests for the optimization backend

use crate::error::IrisError;
use crate::passes::{OptLevel, PassList};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File extensions the backend can compile
pub const ALLOWED_EXTENSIONS: &[&str] = &["c", "cpp", "cc", "cxx"];

/// Smallest accepted source file in bytes
pub const MIN_SOURCE_BYTES: usize = 10;

/// Largest accepted source file in bytes (1 MiB)
pub const MAX_SOURCE_BYTES: usize = 1024 * 1024;

/// A C/C++ source file that passed local validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    file_name: String,
    contents: String,
}

impl SourceFile {
    /// Read and validate a source file from disk
    pub fn load(path: &Path) -> Result<Self, IrisError> {
        let contents = std::fs::read_to_string(path).map_err(|e| IrisError::InvalidSourceFile {
            path: path.to_path_buf(),
            reason: format!("cannot be read: {}", e),
        })?;

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| IrisError::InvalidSourceFile {
                path: path.to_path_buf(),
                reason: "path has no file name".to_string(),
            })?;

        Self::from_parts(file_name, contents)
    }

    /// Validate in-memory source text under `file_name`
    ///
    /// ```
    /// use iris_cli::client::SourceFile;
    ///
    /// assert!(SourceFile::from_parts("main.c", "int main(void) { return 0; }").is_ok());
    /// assert!(SourceFile::from_parts("main.rs", "fn main() { }").is_err());
    /// assert!(SourceFile::from_parts("tiny.c", "int x;").is_err());
    /// ```
    pub fn from_parts(
        file_name: impl Into<String>,
        contents: impl Into<String>,
    ) -> Result<Self, IrisError> {
        let file_name = file_name.into();
        let contents = contents.into();
        let reject = |reason: String| IrisError::InvalidSourceFile {
            path: PathBuf::from(&file_name),
            reason,
        };

        let extension = Path::new(&file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(reject(format!(
                "unsupported extension '{}' (expected one of: {})",
                extension,
                ALLOWED_EXTENSIONS.join(", ")
            )));
        }

        let size = contents.len();
        if size < MIN_SOURCE_BYTES {
            return Err(reject(format!(
                "file is too small ({} bytes, minimum {})",
                size, MIN_SOURCE_BYTES
            )));
        }
        if size > MAX_SOURCE_BYTES {
            return Err(reject(format!(
                "file is too large ({} bytes, maximum {})",
                size, MAX_SOURCE_BYTES
            )));
        }

        Ok(Self {
            file_name,
            contents,
        })
    }

    /// File name sent with the upload
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Source text
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Always false for a validated file; provided alongside `len`
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

/// Prediction model served by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Sequence-generating transformer
    #[default]
    Transformer,
    /// Gradient-boosted trees
    Xgboost,
}

impl ModelKind {
    /// Every model the backend serves
    pub const ALL: [ModelKind; 2] = [ModelKind::Transformer, ModelKind::Xgboost];

    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transformer => "transformer",
            Self::Xgboost => "xgboost",
        }
    }

    fn names() -> Vec<String> {
        Self::ALL.iter().map(|m| m.as_str().to_string()).collect()
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = IrisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "transformer" => Ok(Self::Transformer),
            "xgboost" => Ok(Self::Xgboost),
            _ => Err(IrisError::UnsupportedModel {
                name: s.to_string(),
                available: Self::names(),
            }),
        }
    }
}

/// Request to predict a pass sequence for one source file
#[derive(Debug, Clone)]
pub struct OptimizeRequest {
    /// Source to analyse
    pub source: SourceFile,
    /// Model to predict with
    pub model: ModelKind,
}

/// Request to compile and measure predicted passes against standard levels
#[derive(Debug, Clone)]
pub struct CompareRequest {
    /// Source to compile
    pub source: SourceFile,
    /// Predicted pass sequence
    pub passes: PassList,
    /// Baseline levels to measure
    pub opt_levels: Vec<OptLevel>,
    /// Timed runs per configuration
    pub num_runs: u32,
}

impl CompareRequest {
    /// `ir_passes` form value: a JSON array of pass names
    pub fn ir_passes_json(&self) -> String {
        serde_json::Value::from(self.passes.names()).to_string()
    }

    /// `opt_levels` form value: a JSON array of level names
    pub fn opt_levels_json(&self) -> String {
        let names: Vec<&str> = self.opt_levels.iter().map(|level| level.name()).collect();
        serde_json::Value::from(names).to_string()
    }
}
