//! Core data models for cashflow-cli
//!
//! This module contains the data structures shared by the ledger loader,
//! the aggregator and the forecast engine: money, month keys, transactions
//! and aggregated statistics.

pub mod aggregate;
pub mod money;
pub mod month;
pub mod transaction;

pub use aggregate::{BaselineStats, MonthlyAggregate};
pub use money::{Money, MoneyParseError};
pub use month::{MonthParseError, YearMonth};
pub use transaction::Transaction;
