//! Init command implementation
//!
//! Handles `iris init`, which writes a `.iris.toml` with the default backend
//! and comparison settings spelled out.

use crate::config::{ConfigFile, ConfigLoader, CONFIG_FILE_NAME};
use crate::fmt::{CHECKMARK, ROCKET, WARNING};
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::Result;
use console::style;
use std::env;
use std::path::Path;

/// Outcome of writing the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// A new file was written
    Created,
    /// An existing file was replaced
    Overwritten,
    /// A file exists and was left alone
    Skipped,
}

/// Create `.iris.toml` in the working directory
///
/// # Examples
///
/// ```no_run
/// use iris_cli::cmd::init::cmd_init;
///
/// // Keep an existing file
/// cmd_init(false)?;
///
/// // Regenerate defaults
/// cmd_init(true)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_init(force: bool) -> Result<()> {
    println!("{} {} Initializing iris", ROCKET, style("iris init").bold());
    println!();

    let project_root = env::current_dir()?;
    match init_impl(&project_root, force, &RealFileSystem)? {
        InitOutcome::Skipped => {
            println!(
                "{} Config file already exists: {}",
                WARNING,
                style(CONFIG_FILE_NAME).cyan()
            );
            println!("   Use --force to overwrite it with the defaults.");
        }
        outcome => {
            let verb = if outcome == InitOutcome::Overwritten {
                "Overwrote"
            } else {
                "Created"
            };
            println!(
                "{} {} {}",
                CHECKMARK,
                verb,
                style(CONFIG_FILE_NAME).cyan().bold()
            );
            println!();
            println!("{}  Next Steps:", style("💡").bold());
            println!("   1. Point backend.url at your IRis service if it is not local");
            println!("   2. Run {} to check it is up", style("iris health").cyan());
            println!(
                "   3. Run {} to predict passes",
                style("iris optimize <FILE>").cyan()
            );
        }
    }
    Ok(())
}

/// Write the default config into `dir` unless one exists and `force` is off
pub fn init_impl<FS: FileSystem>(dir: &Path, force: bool, fs: &FS) -> Result<InitOutcome> {
    let exists = fs.read_to_string(&dir.join(CONFIG_FILE_NAME)).is_ok();
    if exists && !force {
        return Ok(InitOutcome::Skipped);
    }

    ConfigLoader::save_with_fs(&ConfigFile::with_defaults(), dir, fs)?;
    log::info!("Wrote {}", dir.join(CONFIG_FILE_NAME).display());

    Ok(if exists {
        InitOutcome::Overwritten
    } else {
        InitOutcome::Created
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MemoryFileSystem;
    use std::path::PathBuf;

    fn dir() -> PathBuf {
        PathBuf::from("/project")
    }

    #[test]
    fn test_init_creates_loadable_defaults() {
        let fs = MemoryFileSystem::new();
        assert_eq!(init_impl(&dir(), false, &fs).unwrap(), InitOutcome::Created);

        let loaded = ConfigLoader::load_with_fs(&dir(), &fs).unwrap();
        assert_eq!(loaded, ConfigFile::with_defaults());
    }

    #[test]
    fn test_init_keeps_existing_without_force() {
        let fs = MemoryFileSystem::new();
        fs.insert(&dir().join(CONFIG_FILE_NAME), "[backend]\nurl = \"http://iris:9000\"\n");

        assert_eq!(init_impl(&dir(), false, &fs).unwrap(), InitOutcome::Skipped);
        let loaded = ConfigLoader::load_with_fs(&dir(), &fs).unwrap();
        assert_eq!(
            loaded.backend.unwrap().url.as_deref(),
            Some("http://iris:9000")
        );
    }

    #[test]
    fn test_init_force_overwrites() {
        let fs = MemoryFileSystem::new();
        fs.insert(&dir().join(CONFIG_FILE_NAME), "[backend]\nurl = \"http://iris:9000\"\n");

        assert_eq!(
            init_impl(&dir(), true, &fs).unwrap(),
            InitOutcome::Overwritten
        );
        assert_eq!(
            ConfigLoader::load_with_fs(&dir(), &fs).unwrap(),
            ConfigFile::with_defaults()
        );
    }
}
