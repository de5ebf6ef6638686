//! Goal feasibility
//!
//! Decides whether a projection reaches a savings goal by a deadline and,
//! if it does not, how much extra net savings per month would close the gap.
//!
//! The required amount is rounded up to the cent, so feeding it back into
//! the projector as an expense reduction always reaches the goal.

use serde::{Deserialize, Serialize};

use super::projector::{deadline_from, project_scenario, Projection, ScenarioParameters};
use crate::error::{CashflowError, CashflowResult};
use crate::models::{BaselineStats, Money};

/// Verdict for a savings goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeasibilityResult {
    /// Projected savings at the deadline meet or exceed the goal
    pub is_achievable: bool,

    /// How far the projection falls short (zero when achievable)
    pub shortfall_amount: Money,

    /// Additional net savings needed every month until the deadline
    pub required_monthly_savings: Money,

    pub goal_amount: Money,
    pub goal_deadline_months: u32,

    /// Cumulative savings the unadjusted projection reaches at the deadline
    pub projected_savings_at_deadline: Money,
}

/// Evaluate a savings goal against a projection
///
/// A deadline past the projection horizon is evaluated on the same scenario
/// extended to the deadline. A deadline of zero months or a negative goal is
/// an invalid parameter.
pub fn evaluate_goal(
    projection: &Projection,
    goal_amount: Money,
    goal_deadline_months: i64,
) -> CashflowResult<FeasibilityResult> {
    if goal_amount.is_negative() {
        return Err(CashflowError::invalid_parameter(
            "goal_amount",
            format!("must not be negative, got {}", goal_amount),
        ));
    }
    let deadline = deadline_from(goal_deadline_months)?;

    let covering = if deadline > projection.horizon_months() {
        log::debug!(
            "goal deadline {} beyond horizon {}, extending projection",
            deadline,
            projection.horizon_months()
        );
        projection.extended_to(deadline).map_err(|_| {
            CashflowError::invalid_parameter(
                "goal_deadline_months",
                format!("projected savings at month {} exceed the supported range", deadline),
            )
        })?
    } else {
        *projection
    };
    let target = covering.point_at(deadline).ok_or_else(|| {
        CashflowError::invalid_parameter(
            "goal_deadline_months",
            format!("no projected month {}", deadline),
        )
    })?;

    let is_achievable = target.cumulative_savings >= goal_amount;
    let shortfall_amount = goal_amount
        .checked_sub(target.cumulative_savings)
        .ok_or_else(|| {
            CashflowError::invalid_parameter(
                "goal_amount",
                "shortfall exceeds the supported range",
            )
        })?
        .max(Money::zero());
    let required_monthly_savings = if is_achievable {
        Money::zero()
    } else {
        shortfall_amount.div_ceil(i64::from(deadline)).ok_or_else(|| {
            CashflowError::invalid_parameter("goal_deadline_months", "must be at least 1")
        })?
    };

    log::debug!(
        "goal {} by month {}: projected {}, achievable={}, required/month={}",
        goal_amount,
        deadline,
        target.cumulative_savings,
        is_achievable,
        required_monthly_savings
    );

    Ok(FeasibilityResult {
        is_achievable,
        shortfall_amount,
        required_monthly_savings,
        goal_amount,
        goal_deadline_months: deadline,
        projected_savings_at_deadline: target.cumulative_savings,
    })
}

/// A goal evaluation together with the projection that meets it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalPlan {
    pub feasibility: FeasibilityResult,

    /// The original projection
    pub projection: Projection,

    /// The scenario with the required monthly savings taken out of expenses,
    /// carried at least to the deadline
    pub adjusted: Projection,
}

impl GoalPlan {
    /// Savings the adjusted projection reaches at the deadline
    pub fn adjusted_savings_at_deadline(&self) -> Money {
        self.adjusted
            .point_at(self.feasibility.goal_deadline_months)
            .map(|p| p.cumulative_savings)
            .unwrap_or(self.adjusted.baseline().current_savings)
    }

    /// Whether the adjusted projection reaches the goal by the deadline
    pub fn reaches_goal(&self) -> bool {
        self.adjusted_savings_at_deadline() >= self.feasibility.goal_amount
    }
}

/// Project a scenario, evaluate its goal, and re-project with the required
/// monthly savings applied as an expense reduction
pub fn plan_goal(baseline: BaselineStats, params: &ScenarioParameters) -> CashflowResult<GoalPlan> {
    let goal = params.goal.ok_or_else(|| {
        CashflowError::invalid_parameter("goal_amount", "a savings goal is required for planning")
    })?;

    let projection = project_scenario(baseline, params)?;
    let feasibility = evaluate_goal(&projection, goal.amount, i64::from(goal.deadline_months))?;

    // Required savings come out of whatever expense delta the scenario had.
    let expense_delta = params
        .expense_delta
        .checked_sub(feasibility.required_monthly_savings)
        .ok_or_else(|| {
            CashflowError::invalid_parameter(
                "expense_delta",
                "adjusted expense delta exceeds the supported range",
            )
        })?;
    let adjusted = projection
        .with_expense_delta(expense_delta)?
        .extended_to(params.horizon_months.max(goal.deadline_months))?;

    let plan = GoalPlan {
        feasibility,
        projection,
        adjusted,
    };
    if !plan.reaches_goal() {
        log::warn!(
            "adjusted projection misses goal: {} < {}",
            plan.adjusted_savings_at_deadline(),
            goal.amount
        );
    }

    Ok(plan)
}
