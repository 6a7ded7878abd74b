//! Platform paths for atg configuration and state.

use std::path::PathBuf;

use atg_core::AtgConfig;
use atg_core::error::{AtgError, Result};

/// Resolves where atg keeps its files.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/atg/              # dirs::config_dir() on Linux
/// ├── config.toml             # AtgConfig
/// └── corrections.toml        # reviewer corrections
/// ```
pub struct AtgPaths;

impl AtgPaths {
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("atg"))
            .ok_or_else(|| AtgError::io("Cannot find config directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn corrections_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("corrections.toml"))
    }

    /// The corrections store location configured in `config`, falling back
    /// to the platform default.
    pub fn corrections_file_for(config: &AtgConfig) -> Result<PathBuf> {
        match &config.corrections_path {
            Some(path) => Ok(path.clone()),
            None => Self::corrections_file(),
        }
    }
}
