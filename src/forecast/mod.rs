//! Forecast engine
//!
//! Pure computations over baseline statistics: emergency-fund runway,
//! month-by-month scenario projection, savings goal feasibility and what-if
//! comparisons. Nothing here performs I/O or keeps state between calls.

pub mod feasibility;
pub mod projector;
pub mod runway;
pub mod scenario;

pub use feasibility::{evaluate_goal, plan_goal, FeasibilityResult, GoalPlan};
pub use projector::{
    project_scenario, Projection, ProjectionIter, ProjectionPoint, SavingsGoal, ScenarioParameters,
};
pub use runway::{compute_runway, MonthRatio, RoundingPolicy, Runway, RunwayMonths};
pub use scenario::{compare_what_if, ScenarioComparison, WhatIf};
