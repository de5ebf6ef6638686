//! What-if scenarios
//!
//! Named adjustments a user can try without thinking in deltas, and a
//! comparison of the resulting projection against leaving things unchanged.

use serde::Serialize;
use std::fmt;

use super::projector::{project_scenario, Projection, ScenarioParameters};
use crate::error::{CashflowError, CashflowResult};
use crate::models::{BaselineStats, Money};

/// A named what-if adjustment
///
/// `IncreaseIncome` raises income by the amount. An "increase savings"
/// preset that added the amount to expenses would lower savings, so the
/// preset is expressed as an income raise instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum WhatIf {
    /// Spend this much less each month
    DecreaseSpending(Money),
    /// Earn this much more each month
    IncreaseIncome(Money),
    /// Split the amount between more income and less spending
    Balanced(Money),
}

impl WhatIf {
    /// The amount the scenario moves each month
    pub fn amount(&self) -> Money {
        match *self {
            Self::DecreaseSpending(amount)
            | Self::IncreaseIncome(amount)
            | Self::Balanced(amount) => amount,
        }
    }

    /// (income_delta, expense_delta) for this scenario
    ///
    /// A balanced split gives the odd cent to the spending cut so the two
    /// halves always add up to the full amount.
    pub fn deltas(&self) -> (Money, Money) {
        match *self {
            Self::DecreaseSpending(amount) => (Money::zero(), -amount),
            Self::IncreaseIncome(amount) => (amount, Money::zero()),
            Self::Balanced(amount) => {
                let income_part = Money::from_cents(amount.cents() / 2);
                let expense_part = amount - income_part;
                (income_part, -expense_part)
            }
        }
    }

    /// Scenario parameters over a horizon
    pub fn parameters(&self, horizon_months: i64) -> CashflowResult<ScenarioParameters> {
        let (income_delta, expense_delta) = self.deltas();
        ScenarioParameters::new(income_delta, expense_delta, horizon_months)
    }
}

impl fmt::Display for WhatIf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DecreaseSpending(amount) => write!(f, "Decrease spending by {}", amount),
            Self::IncreaseIncome(amount) => write!(f, "Increase income by {}", amount),
            Self::Balanced(_) => {
                let (income, expense) = self.deltas();
                write!(
                    f,
                    "Balanced adjustment: +{} income, -{} expenses",
                    income,
                    expense.abs()
                )
            }
        }
    }
}

/// A what-if projection side by side with the unchanged projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioComparison {
    pub what_if: WhatIf,
    pub baseline: Projection,
    pub scenario: Projection,
    difference: Money,
}

impl ScenarioComparison {
    /// Savings at the horizon with no changes
    pub fn baseline_final(&self) -> Money {
        self.baseline.final_savings()
    }

    /// Savings at the horizon under the scenario
    pub fn scenario_final(&self) -> Money {
        self.scenario.final_savings()
    }

    /// How much better (or worse) the scenario ends up
    pub fn difference(&self) -> Money {
        self.difference
    }

    /// Difference as a percentage of the baseline's final savings.
    ///
    /// `None` when the baseline ends at exactly zero.
    pub fn difference_pct(&self) -> Option<f64> {
        let base = self.baseline_final();
        if base.is_zero() {
            None
        } else {
            Some(self.difference().as_f64() / base.as_f64().abs() * 100.0)
        }
    }
}

/// Project a what-if scenario and the unchanged baseline over the same horizon
pub fn compare_what_if(
    baseline: BaselineStats,
    horizon_months: i64,
    what_if: WhatIf,
) -> CashflowResult<ScenarioComparison> {
    if what_if.amount().is_negative() {
        return Err(CashflowError::invalid_parameter(
            "scenario_amount",
            format!("must not be negative, got {}", what_if.amount()),
        ));
    }

    let scenario_params = what_if.parameters(horizon_months)?;
    let unchanged = project_scenario(
        baseline,
        &ScenarioParameters::unchanged(scenario_params.horizon_months),
    )?;
    let scenario = project_scenario(baseline, &scenario_params)?;

    let difference = scenario
        .final_savings()
        .checked_sub(unchanged.final_savings())
        .ok_or_else(|| {
            CashflowError::invalid_parameter(
                "scenario_amount",
                "difference from the baseline exceeds the supported range",
            )
        })?;

    Ok(ScenarioComparison {
        what_if,
        baseline: unchanged,
        scenario,
        difference,
    })
}
