//! Session persistence
//!
//! Stores the latest prediction in `<session dir>/session.json` so that a
//! later `compare` can pick it up. Only one prediction is kept; `optimize`
//! overwrites it and `session clear` removes it.

use super::context::HandoffContext;
use super::record::SessionRecord;
use crate::error::IrisError;
use crate::infra::{FileSystem, RealFileSystem};
use chrono::{DateTime, Utc};
use std::io;
use std::path::{Path, PathBuf};

/// Default session directory, relative to the working directory
pub const DEFAULT_SESSION_DIR: &str = ".iris";

/// Reads and writes the handed-over prediction
pub struct SessionStore<FS: FileSystem = RealFileSystem> {
    dir: PathBuf,
    fs: FS,
}

impl SessionStore<RealFileSystem> {
    /// Store rooted at `dir` on the real filesystem
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_fs(dir, RealFileSystem)
    }
}

impl<FS: FileSystem> SessionStore<FS> {
    const SESSION_FILE: &'static str = "session.json";

    /// Store rooted at `dir` with a custom filesystem implementation
    pub fn with_fs(dir: impl Into<PathBuf>, fs: FS) -> Self {
        Self {
            dir: dir.into(),
            fs,
        }
    }

    /// Path of the session file
    pub fn path(&self) -> PathBuf {
        self.dir.join(Self::SESSION_FILE)
    }

    /// Directory holding the session file
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist `record`, replacing any earlier prediction
    pub fn save(&self, record: &SessionRecord) -> Result<(), IrisError> {
        let path = self.path();

        self.fs
            .create_dir_all(&self.dir)
            .map_err(|source| IrisError::Io {
                context: format!("creating session directory {}", self.dir.display()),
                source,
            })?;

        let contents = serde_json::to_string_pretty(record).map_err(|e| IrisError::Io {
            context: "serializing session".to_string(),
            source: io::Error::other(e),
        })?;

        self.fs
            .write(&path, contents)
            .map_err(|source| IrisError::Io {
                context: format!("writing {}", path.display()),
                source,
            })?;

        log::debug!("Saved session {} to {}", record.session_id, path.display());
        Ok(())
    }

    /// Load the stored record without checking its age
    pub fn load_record(&self) -> Result<SessionRecord, IrisError> {
        let path = self.path();

        let contents = match self.fs.read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(IrisError::SessionMissing { path });
            }
            Err(source) => {
                return Err(IrisError::Io {
                    context: format!("reading {}", path.display()),
                    source,
                });
            }
        };

        serde_json::from_str(&contents).map_err(|e| IrisError::SessionCorrupt {
            path,
            detail: e.to_string(),
        })
    }

    /// Load the stored record as a handoff context, enforcing expiry at `now`
    pub fn load_context(&self, now: DateTime<Utc>) -> Result<HandoffContext, IrisError> {
        let record = self.load_record()?;
        HandoffContext::from_record(record, now)
    }

    /// Discard the stored prediction
    ///
    /// Returns whether a record was actually removed; clearing an empty store
    /// is not an error.
    pub fn invalidate(&self) -> Result<bool, IrisError> {
        let path = self.path();
        match self.fs.remove_file(&path) {
            Ok(()) => {
                log::debug!("Removed session {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(IrisError::Io {
                context: format!("removing {}", path.display()),
                source,
            }),
        }
    }
}
