//! Service layer for cashflow-cli
//!
//! Services sit between raw input and the forecast engine: loading the
//! ledger from CSV and turning it into monthly aggregates and baseline
//! statistics.

pub mod aggregate;
pub mod import;

pub use aggregate::{baseline_from_months, AggregateService};
pub use import::{
    ColumnMapping, ColumnOverrides, ImportOptions, ImportResult, ImportService, TextEncoding,
};
