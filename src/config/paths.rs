//! Path management for cashflow-cli
//!
//! ## Path Resolution Order
//!
//! 1. `CASHFLOW_CLI_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory joined with `cashflow-cli`
//!    (`~/.config/cashflow-cli` on Linux, `%APPDATA%\cashflow-cli` on Windows)

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::CashflowError;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "CASHFLOW_CLI_CONFIG_DIR";

/// Manages the paths used by cashflow-cli
#[derive(Debug, Clone)]
pub struct CashflowPaths {
    base_dir: PathBuf,
}

impl CashflowPaths {
    /// Resolve the configuration directory
    ///
    /// # Errors
    ///
    /// Returns a config error if no home directory can be determined.
    pub fn new() -> Result<Self, CashflowError> {
        let base_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the configuration directory exists
    pub fn ensure_directories(&self) -> Result<(), CashflowError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            CashflowError::Io(format!("Failed to create config directory: {}", e))
        })
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, CashflowError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| CashflowError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("cashflow-cli"))
}
