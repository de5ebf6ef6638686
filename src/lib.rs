//! cashflow-cli - personal cash flow analyzer
//!
//! Reads a ledger of dated, categorized transactions and answers three
//! questions about it: how many months current savings would last (runway),
//! how savings evolve under a hypothetical change in income or spending
//! (scenario projection), and whether a savings goal is reachable by a
//! deadline (goal feasibility).
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Money, calendar months, transactions and aggregates
//! - `services`: Ledger import and monthly aggregation
//! - `forecast`: Runway, projection, goal feasibility and what-if scenarios
//! - `reports`: Terminal and CSV reports
//! - `export`: Projection export (CSV, JSON, YAML)
//! - `display`: Formatting helpers
//! - `cli`: Command handlers and the interactive menu
//!
//! # Example
//!
//! ```rust
//! use cashflow_cli::forecast::{evaluate_goal, project_scenario, ScenarioParameters};
//! use cashflow_cli::models::{BaselineStats, Money};
//!
//! let baseline = BaselineStats::new(
//!     Money::from_dollars(1200),
//!     Money::from_dollars(900),
//!     Money::from_dollars(300),
//! );
//! let projection = project_scenario(baseline, &ScenarioParameters::unchanged(3))?;
//! let verdict = evaluate_goal(&projection, Money::from_dollars(2000), 3)?;
//!
//! assert!(!verdict.is_achievable);
//! assert_eq!(verdict.required_monthly_savings, Money::from_cents(26667));
//! # Ok::<(), cashflow_cli::CashflowError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod forecast;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{CashflowError, CashflowResult};
