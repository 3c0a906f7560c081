//! Configuration for filekv
//!
//! The file backend takes a single required option, `path`: the root
//! directory that mirrors the logical key hierarchy.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{FileKvError, Result};

/// Name of the root directory option in a generic backend option map
pub const PATH_OPTION: &str = "path";

/// Main configuration for a file backend instance
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory for all entry files.
    /// Internal structure mirrors the keys:
    ///   {path}/
    ///     ├── _eA==            (leaf "x")
    ///     └── a/
    ///         └── _Yg==        (leaf "a/b")
    pub path: PathBuf,
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Build a config from a generic string option map
    ///
    /// Fails if `path` is absent or empty.
    pub fn from_map(conf: &HashMap<String, String>) -> Result<Self> {
        match conf.get(PATH_OPTION) {
            Some(path) if !path.is_empty() => Ok(Self {
                path: PathBuf::from(path),
            }),
            _ => Err(FileKvError::Config(format!(
                "'{}' must be set",
                PATH_OPTION
            ))),
        }
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    path: Option<PathBuf>,
}

impl ConfigBuilder {
    /// Set the root directory
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Finish the builder; the root directory is required
    pub fn build(self) -> Result<Config> {
        match self.path {
            Some(path) if !path.as_os_str().is_empty() => Ok(Config { path }),
            _ => Err(FileKvError::Config(format!(
                "'{}' must be set",
                PATH_OPTION
            ))),
        }
    }
}
