//! Test fixture helpers for creating project directories
//!
//! Provides utilities for setting up a working directory with source files,
//! an `.iris.toml`, and a stored prediction of a chosen age.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use iris_cli::config::CONFIG_FILE_NAME;
use iris_cli::passes::PassList;
use iris_cli::session::{SessionRecord, SessionStore, DEFAULT_SESSION_DIR};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Re-export anyhow for convenience
pub use anyhow;

/// Small but valid C program
pub const SAMPLE_C: &str = r#"#include <stdio.h>

int main(void) {
    int sum = 0;
    for (int i = 0; i < 100; i++) {
        sum += i * i;
    }
    printf("%d\n", sum);
    return 0;
}
"#;

/// Temporary working directory; removed when dropped
pub struct Project {
    dir: TempDir,
}

impl Project {
    /// Create an empty project directory
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// Root of the project
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a source file and return its path
    pub fn write_source(&self, name: &str, contents: &str) -> anyhow::Result<PathBuf> {
        let path = self.path().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Write `.iris.toml`
    pub fn write_config(&self, contents: &str) -> anyhow::Result<()> {
        fs::write(self.path().join(CONFIG_FILE_NAME), contents)?;
        Ok(())
    }

    /// Session store at the default location
    pub fn store(&self) -> SessionStore {
        SessionStore::new(self.path().join(DEFAULT_SESSION_DIR))
    }

    /// Store a prediction made `age` ago
    pub fn store_session(&self, age: Duration) -> anyhow::Result<SessionRecord> {
        let record = SessionRecord::builder(SAMPLE_C, "squares.c")
            .passes(PassList::from_names(["mem2reg", "licm", "loop-unroll"]))
            .model("transformer")
            .build(Utc::now() - age);
        self.store().save(&record)?;
        Ok(record)
    }

    /// Path of the stored session file
    pub fn session_file(&self) -> PathBuf {
        self.store().path()
    }
}
