//! Configuration management for iris
//!
//! This module provides:
//! - `.iris.toml` config file support
//! - Resolution of file values, environment and flags into [`Settings`]

pub mod file;
pub mod loader;
pub mod resolver;

pub use file::{BackendSettings, ConfigFile, DefaultSettings, SessionSettings, CONFIG_FILE_NAME};
pub use loader::ConfigLoader;
pub use resolver::{Overrides, Settings, SettingsResolver, BACKEND_URL_ENV};
