//! Reports module for cashflow-cli
//!
//! Monthly cash flow summaries, category spending breakdowns and the
//! rendering of forecast results.

pub mod cashflow;
pub mod forecast;
pub mod spending;

pub use cashflow::CashflowReport;
pub use forecast::{
    format_baseline, format_comparison, format_goal_plan, format_projection, format_runway,
    format_savings,
};
pub use spending::{SpendingByCategory, SpendingReport};
