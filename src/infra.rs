//! Infrastructure traits for abstracting I/O operations.
//!
//! The session store and the config loader only ever touch a handful of files,
//! so the abstraction is kept to the operations they need. Tests swap in an
//! in-memory implementation.

use std::io;
use std::path::Path;

/// Trait for abstracting filesystem operations.
pub trait FileSystem {
    /// Create a directory and all missing parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write a slice of bytes to a file.
    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()>;

    /// Remove a file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// Real filesystem implementation that delegates to std::fs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}

/// In-memory filesystem for unit tests.
///
/// Directories are implicit; `create_dir_all` only records failures when
/// `fail_writes` is set.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub(crate) struct MemoryFileSystem {
    files: std::sync::Arc<std::sync::Mutex<std::collections::HashMap<std::path::PathBuf, Vec<u8>>>>,
    fail_writes: bool,
}

#[cfg(test)]
impl MemoryFileSystem {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub(crate) fn insert(&self, path: &Path, contents: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), contents.as_bytes().to_vec());
    }

    pub(crate) fn contains(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}

#[cfg(test)]
impl FileSystem for MemoryFileSystem {
    fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "read-only filesystem",
            ));
        }
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let files = self.files.lock().unwrap();
        let bytes = files
            .get(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))?;
        String::from_utf8(bytes.clone())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "read-only filesystem",
            ));
        }
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), contents.as_ref().to_vec());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }
}
