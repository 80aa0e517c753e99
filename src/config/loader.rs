//! Configuration file loading and saving

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use crate::error::IrisError;
use crate::infra::{FileSystem, RealFileSystem};
use std::io;
use std::path::Path;

/// Handles loading and saving configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from `.iris.toml` in the given directory
    ///
    /// A missing file is not an error; it yields the empty config.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use iris_cli::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Backend section present: {}", config.backend.is_some());
    /// # Ok::<(), iris_cli::error::IrisError>(())
    /// ```
    pub fn load(dir: &Path) -> Result<ConfigFile, IrisError> {
        Self::load_with_fs(dir, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(dir: &Path, fs: &FS) -> Result<ConfigFile, IrisError> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        let contents = match fs.read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No {} found, using defaults", config_path.display());
                return Ok(ConfigFile::default());
            }
            Err(source) => {
                return Err(IrisError::Io {
                    context: format!("reading {}", config_path.display()),
                    source,
                });
            }
        };

        toml_edit::de::from_str(&contents).map_err(|e| IrisError::InvalidConfig {
            detail: format!("failed to parse {}: {}", CONFIG_FILE_NAME, e),
        })
    }

    /// Save config to `.iris.toml` in the given directory
    pub fn save(config: &ConfigFile, dir: &Path) -> Result<(), IrisError> {
        Self::save_with_fs(config, dir, &RealFileSystem)
    }

    /// Save config with a custom filesystem implementation
    pub fn save_with_fs<FS: FileSystem>(
        config: &ConfigFile,
        dir: &Path,
        fs: &FS,
    ) -> Result<(), IrisError> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        let contents =
            toml_edit::ser::to_string_pretty(config).map_err(|e| IrisError::InvalidConfig {
                detail: format!("failed to serialize config: {}", e),
            })?;

        fs.write(&config_path, contents)
            .map_err(|source| IrisError::Io {
                context: format!("writing {}", config_path.display()),
                source,
            })
    }

    /// Check if a config file exists in `dir`
    pub fn exists(dir: &Path) -> bool {
        dir.join(CONFIG_FILE_NAME).exists()
    }
}
