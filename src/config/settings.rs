//! User settings for cashflow-cli
//!
//! Display preferences and forecast defaults, persisted as JSON in the
//! configuration directory. Every field has a default so older or partial
//! files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::CashflowPaths;
use crate::error::CashflowError;
use crate::forecast::RoundingPolicy;

/// User settings for cashflow-cli
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Projection horizon when `--months` is not given
    #[serde(default = "default_horizon")]
    pub default_horizon_months: u32,

    /// Ledger delimiter; detected from the file when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_delimiter: Option<char>,

    /// How runway months are shown
    #[serde(default)]
    pub runway_rounding: RoundingPolicy,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_horizon() -> u32 {
    12
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            default_horizon_months: default_horizon(),
            default_delimiter: None,
            runway_rounding: RoundingPolicy::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &CashflowPaths) -> Result<Self, CashflowError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                CashflowError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                CashflowError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            log::debug!("loaded settings from {}", settings_path.display());
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CashflowPaths) -> Result<(), CashflowError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            CashflowError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            CashflowError::Io(format!("Failed to write settings file: {}", e))
        })?;

        log::info!("wrote settings to {}", settings_path.display());
        Ok(())
    }

    /// Delimiter as a byte, if one is configured and it is ASCII
    pub fn delimiter_byte(&self) -> Option<u8> {
        self.default_delimiter
            .filter(char::is_ascii)
            .map(|c| c as u8)
    }
}
