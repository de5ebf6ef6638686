//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the report and forecast layers.

pub mod forecast;
pub mod ledger;
pub mod menu;
pub mod report;

pub use forecast::{
    handle_goal, handle_project, handle_what_if, DeltaArgs, GoalArgs, ProjectArgs, ScenarioKind,
    WhatIfArgs,
};
pub use ledger::{LedgerArgs, Session};
pub use menu::{run_menu, MenuCommand};
pub use report::{handle_categories, handle_runway, handle_savings, handle_summary};
