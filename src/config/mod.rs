//! Configuration module for cashflow-cli
//!
//! Path resolution for the configuration directory and persisted user
//! settings.

pub mod paths;
pub mod settings;

pub use paths::CashflowPaths;
pub use settings::Settings;
