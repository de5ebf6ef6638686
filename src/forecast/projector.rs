//! Scenario projector
//!
//! Evolves savings forward month by month from a baseline under uniform
//! income and expense deltas. The model is additive: no interest, no
//! compounding, the same net flow every month.
//!
//! A [`Projection`] is a description of the scenario, not a buffer of
//! points. Iterating it computes points on demand, and it can be iterated
//! any number of times with identical results.

use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

use crate::error::{CashflowError, CashflowResult};
use crate::models::{BaselineStats, Money};

/// A savings target and the month by which it should be reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsGoal {
    /// Target cumulative savings
    pub amount: Money,

    /// Months from now, at least 1
    pub deadline_months: u32,
}

impl SavingsGoal {
    /// Create a goal, rejecting a negative amount or a deadline below one month
    pub fn new(amount: Money, deadline_months: i64) -> CashflowResult<Self> {
        if amount.is_negative() {
            return Err(CashflowError::invalid_parameter(
                "goal_amount",
                format!("must not be negative, got {}", amount),
            ));
        }
        Ok(Self {
            amount,
            deadline_months: deadline_from(deadline_months)?,
        })
    }
}

/// User-supplied what-if parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioParameters {
    /// Added to the average income every projected month
    pub income_delta: Money,

    /// Added to the average expense every projected month
    pub expense_delta: Money,

    /// Number of months to project
    pub horizon_months: u32,

    /// Optional savings goal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<SavingsGoal>,
}

impl ScenarioParameters {
    /// Create parameters; a negative horizon is an invalid parameter
    pub fn new(
        income_delta: Money,
        expense_delta: Money,
        horizon_months: i64,
    ) -> CashflowResult<Self> {
        let horizon_months = u32::try_from(horizon_months).map_err(|_| {
            CashflowError::invalid_parameter(
                "horizon_months",
                format!("must be between 0 and {}, got {}", u32::MAX, horizon_months),
            )
        })?;

        Ok(Self {
            income_delta,
            expense_delta,
            horizon_months,
            goal: None,
        })
    }

    /// No changes to income or expense
    pub fn unchanged(horizon_months: u32) -> Self {
        Self {
            income_delta: Money::zero(),
            expense_delta: Money::zero(),
            horizon_months,
            goal: None,
        }
    }

    /// Attach a savings goal
    pub fn with_goal(mut self, goal: SavingsGoal) -> Self {
        self.goal = Some(goal);
        self
    }
}

/// One projected month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// 1-based month number
    pub month_index: u32,
    pub projected_income: Money,
    /// Not clamped at zero; a negative value acts as extra income
    pub projected_expense: Money,
    pub projected_net: Money,
    /// Savings at the end of this month
    pub cumulative_savings: Money,
}

/// A scenario ready to be iterated month by month
///
/// Every month out to the horizon is known to be representable: building a
/// projection whose flows or cumulative savings would overflow fails instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    baseline: BaselineStats,
    income_delta: Money,
    expense_delta: Money,
    horizon_months: u32,
    monthly_income: Money,
    monthly_expense: Money,
    monthly_net: Money,
}

impl Projection {
    fn build(
        baseline: BaselineStats,
        income_delta: Money,
        expense_delta: Money,
        horizon_months: u32,
    ) -> CashflowResult<Self> {
        let out_of_range = |name: &'static str| {
            CashflowError::invalid_parameter(name, "projected amounts exceed the supported range")
        };

        let monthly_income = baseline
            .avg_monthly_income
            .checked_add(income_delta)
            .ok_or_else(|| out_of_range("income_delta"))?;
        let monthly_expense = baseline
            .avg_monthly_expense
            .checked_add(expense_delta)
            .ok_or_else(|| out_of_range("expense_delta"))?;
        let monthly_net = monthly_income
            .checked_sub(monthly_expense)
            .ok_or_else(|| out_of_range("expense_delta"))?;

        let projection = Self {
            baseline,
            income_delta,
            expense_delta,
            horizon_months,
            monthly_income,
            monthly_expense,
            monthly_net,
        };

        // Savings move linearly, so the horizon bounds every earlier month.
        if projection.savings_at(horizon_months).is_none() {
            return Err(out_of_range("horizon_months"));
        }
        Ok(projection)
    }

    fn savings_at(&self, month_index: u32) -> Option<Money> {
        self.monthly_net
            .checked_mul(i64::from(month_index))
            .and_then(|total| self.baseline.current_savings.checked_add(total))
    }

    pub fn baseline(&self) -> &BaselineStats {
        &self.baseline
    }

    pub fn income_delta(&self) -> Money {
        self.income_delta
    }

    pub fn expense_delta(&self) -> Money {
        self.expense_delta
    }

    pub fn horizon_months(&self) -> u32 {
        self.horizon_months
    }

    pub fn is_empty(&self) -> bool {
        self.horizon_months == 0
    }

    /// Income for every projected month
    pub fn monthly_income(&self) -> Money {
        self.monthly_income
    }

    /// Expense for every projected month
    pub fn monthly_expense(&self) -> Money {
        self.monthly_expense
    }

    /// Net flow for every projected month
    pub fn monthly_net(&self) -> Money {
        self.monthly_net
    }

    /// The point for a 1-based month, or `None` outside 1..=horizon
    pub fn point_at(&self, month_index: u32) -> Option<ProjectionPoint> {
        if month_index == 0 || month_index > self.horizon_months {
            return None;
        }

        Some(ProjectionPoint {
            month_index,
            projected_income: self.monthly_income,
            projected_expense: self.monthly_expense,
            projected_net: self.monthly_net,
            cumulative_savings: self.savings_at(month_index)?,
        })
    }

    /// The last projected month, if any
    pub fn final_point(&self) -> Option<ProjectionPoint> {
        self.point_at(self.horizon_months)
    }

    /// Savings at the end of the horizon (current savings for an empty projection)
    pub fn final_savings(&self) -> Money {
        self.final_point()
            .map(|p| p.cumulative_savings)
            .unwrap_or(self.baseline.current_savings)
    }

    /// The same scenario carried out to a different horizon
    pub fn extended_to(&self, horizon_months: u32) -> CashflowResult<Self> {
        Self::build(
            self.baseline,
            self.income_delta,
            self.expense_delta,
            horizon_months,
        )
    }

    /// The same scenario cut off at `horizon_months` if that is shorter
    pub fn truncated_to(&self, horizon_months: u32) -> Self {
        Self {
            horizon_months: horizon_months.min(self.horizon_months),
            ..*self
        }
    }

    /// The same scenario with a different expense delta
    pub fn with_expense_delta(&self, expense_delta: Money) -> CashflowResult<Self> {
        Self::build(
            self.baseline,
            self.income_delta,
            expense_delta,
            self.horizon_months,
        )
    }

    /// Iterate the projected months in order
    pub fn iter(&self) -> ProjectionIter {
        ProjectionIter {
            projection: *self,
            next_index: 1,
        }
    }

    /// Collect all points
    pub fn points(&self) -> Vec<ProjectionPoint> {
        self.iter().collect()
    }
}

impl IntoIterator for &Projection {
    type Item = ProjectionPoint;
    type IntoIter = ProjectionIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the months of a [`Projection`]
#[derive(Debug, Clone)]
pub struct ProjectionIter {
    projection: Projection,
    next_index: u32,
}

impl Iterator for ProjectionIter {
    type Item = ProjectionPoint;

    fn next(&mut self) -> Option<Self::Item> {
        let point = self.projection.point_at(self.next_index)?;
        self.next_index += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.projection.horizon_months as usize + 1)
            .saturating_sub(self.next_index as usize);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProjectionIter {}

impl FusedIterator for ProjectionIter {}

/// Build the projection for a baseline and a set of scenario parameters
///
/// A negative average expense is rejected; expense averages are magnitudes.
/// Deltas are taken as given, but a scenario whose monthly flows or savings
/// out to the horizon would overflow is an invalid parameter.
pub fn project_scenario(
    baseline: BaselineStats,
    params: &ScenarioParameters,
) -> CashflowResult<Projection> {
    if baseline.avg_monthly_expense.is_negative() {
        return Err(CashflowError::invalid_parameter(
            "avg_monthly_expense",
            format!("must not be negative, got {}", baseline.avg_monthly_expense),
        ));
    }

    let projection = Projection::build(
        baseline,
        params.income_delta,
        params.expense_delta,
        params.horizon_months,
    )?;

    log::debug!(
        "projecting {} months: income {} ({:+}), expense {} ({:+}), start {}",
        projection.horizon_months,
        projection.monthly_income(),
        params.income_delta.cents(),
        projection.monthly_expense(),
        params.expense_delta.cents(),
        baseline.current_savings
    );
    if projection.monthly_expense().is_negative() {
        log::warn!(
            "projected expense is negative ({}); treated as additional income",
            projection.monthly_expense()
        );
    }

    Ok(projection)
}

pub(crate) fn deadline_from(months: i64) -> CashflowResult<u32> {
    if months < 1 {
        return Err(CashflowError::invalid_parameter(
            "goal_deadline_months",
            format!("must be at least 1, got {}", months),
        ));
    }
    u32::try_from(months).map_err(|_| {
        CashflowError::invalid_parameter(
            "goal_deadline_months",
            format!("must not exceed {}, got {}", u32::MAX, months),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn baseline() -> BaselineStats {
        BaselineStats::new(
            Money::from_dollars(1200),
            Money::from_dollars(900),
            Money::from_dollars(300),
        )
    }

    #[test]
    fn test_unchanged_scenario_accumulates_net() {
        let projection = project_scenario(baseline(), &ScenarioParameters::unchanged(3)).unwrap();
        let savings: Vec<Money> = projection.iter().map(|p| p.cumulative_savings).collect();
        assert_eq!(
            savings,
            vec![
                Money::from_dollars(600),
                Money::from_dollars(900),
                Money::from_dollars(1200)
            ]
        );

        let first = projection.point_at(1).unwrap();
        assert_eq!(first.projected_income, Money::from_dollars(1200));
        assert_eq!(first.projected_expense, Money::from_dollars(900));
        assert_eq!(first.projected_net, Money::from_dollars(300));
    }

    #[test]
    fn test_zero_horizon_is_empty() {
        let projection = project_scenario(baseline(), &ScenarioParameters::unchanged(0)).unwrap();
        assert!(projection.is_empty());
        assert_eq!(projection.iter().count(), 0);
        assert_eq!(projection.final_point(), None);
        assert_eq!(projection.final_savings(), Money::from_dollars(300));
    }

    #[test]
    fn test_negative_horizon_rejected() {
        let err = ScenarioParameters::new(Money::zero(), Money::zero(), -1).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_negative_expense_baseline_rejected() {
        let bad =
            BaselineStats::new(Money::from_dollars(10), Money::from_dollars(-5), Money::zero());
        let err = project_scenario(bad, &ScenarioParameters::unchanged(2)).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_large_expense_cut_goes_negative_unclamped() {
        let params = ScenarioParameters::new(Money::zero(), Money::from_dollars(-1000), 2).unwrap();
        let projection = project_scenario(baseline(), &params).unwrap();
        let point = projection.point_at(1).unwrap();
        assert_eq!(point.projected_expense, Money::from_dollars(-100));
        assert_eq!(point.projected_net, Money::from_dollars(1300));
        assert_eq!(projection.final_savings(), Money::from_dollars(2900));
    }

    #[test]
    fn test_deltas_applied_every_month() {
        let params =
            ScenarioParameters::new(Money::from_dollars(100), Money::from_dollars(50), 4).unwrap();
        let projection = project_scenario(baseline(), &params).unwrap();
        for point in &projection {
            assert_eq!(point.projected_income, Money::from_dollars(1300));
            assert_eq!(point.projected_expense, Money::from_dollars(950));
            assert_eq!(point.projected_net, Money::from_dollars(350));
        }
        assert_eq!(projection.final_savings(), Money::from_dollars(300 + 4 * 350));
    }

    #[test]
    fn test_extended_projection_continues_same_net() {
        let projection = project_scenario(baseline(), &ScenarioParameters::unchanged(2)).unwrap();
        let longer = projection.extended_to(5).unwrap();
        assert_eq!(longer.point_at(2), projection.point_at(2));
        assert_eq!(longer.point_at(5).unwrap().cumulative_savings, Money::from_dollars(1800));
        assert_eq!(projection.point_at(5), None);
    }

    #[test]
    fn test_truncated_projection_stops_early() {
        let projection = project_scenario(baseline(), &ScenarioParameters::unchanged(6)).unwrap();
        assert_eq!(projection.truncated_to(2).final_savings(), Money::from_dollars(900));
        assert_eq!(projection.truncated_to(10).horizon_months(), 6);
    }

    #[test]
    fn test_savings_overflow_at_horizon_rejected() {
        let base =
            BaselineStats::new(Money::from_dollars(1200), Money::from_dollars(900), Money::zero());
        let income_delta = Money::from_dollars(1_000_000_000_000);
        let params = ScenarioParameters::new(income_delta, Money::zero(), 100_000).unwrap();
        let err = project_scenario(base, &params).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(err.to_string().contains("horizon_months"));

        // the same deltas over a short horizon are fine
        let short = ScenarioParameters { horizon_months: 3, ..params };
        let projection = project_scenario(base, &short).unwrap();
        assert_eq!(
            projection.final_savings(),
            Money::from_dollars(3 * (1_000_000_000_000 + 300))
        );
    }

    #[test]
    fn test_monthly_flow_overflow_rejected() {
        let params =
            ScenarioParameters::new(Money::from_cents(i64::MAX), Money::zero(), 1).unwrap();
        let err = project_scenario(baseline(), &params).unwrap_err();
        assert!(err.to_string().contains("income_delta"));

        let params =
            ScenarioParameters::new(Money::zero(), Money::from_cents(i64::MIN), 1).unwrap();
        let err = project_scenario(baseline(), &params).unwrap_err();
        assert!(err.to_string().contains("expense_delta"));
    }

    #[test]
    fn test_extension_past_representable_range_fails() {
        let base =
            BaselineStats::new(Money::from_cents(i64::MAX / 4), Money::zero(), Money::zero());
        let projection = project_scenario(base, &ScenarioParameters::unchanged(2)).unwrap();
        assert!(projection.extended_to(3).is_ok());
        assert!(projection.extended_to(5).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_iterator_is_exact_size_and_restartable() {
        let projection = project_scenario(baseline(), &ScenarioParameters::unchanged(6)).unwrap();
        let mut iter = projection.iter();
        assert_eq!(iter.len(), 6);
        iter.next();
        assert_eq!(iter.len(), 5);
        assert_eq!(projection.points(), projection.iter().collect::<Vec<_>>());
    }

    proptest! {
        #[test]
        fn prop_length_matches_horizon(
            horizon in 0u32..240,
            income in 0i64..10_000_000,
            expense in 0i64..10_000_000,
        ) {
            let base = BaselineStats::new(
                Money::from_cents(income),
                Money::from_cents(expense),
                Money::zero(),
            );
            let projection =
                project_scenario(base, &ScenarioParameters::unchanged(horizon)).unwrap();
            let points = projection.points();
            prop_assert_eq!(points.len(), horizon as usize);
            for (i, point) in points.iter().enumerate() {
                prop_assert_eq!(point.month_index, i as u32 + 1);
            }
        }

        #[test]
        fn prop_projection_is_idempotent(
            horizon in 0u32..120,
            income_delta in -1_000_000i64..1_000_000,
            expense_delta in -1_000_000i64..1_000_000,
        ) {
            let params = ScenarioParameters::new(
                Money::from_cents(income_delta),
                Money::from_cents(expense_delta),
                horizon as i64,
            ).unwrap();
            let first = project_scenario(baseline(), &params).unwrap().points();
            let second = project_scenario(baseline(), &params).unwrap().points();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_more_income_never_lowers_savings(
            horizon in 1u32..120,
            income_delta in -1_000_000i64..1_000_000,
            raise in 0i64..1_000_000,
        ) {
            let horizon = horizon as i64;
            let low =
                ScenarioParameters::new(Money::from_cents(income_delta), Money::zero(), horizon)
                    .unwrap();
            let high = ScenarioParameters::new(
                Money::from_cents(income_delta + raise),
                Money::zero(),
                horizon,
            )
            .unwrap();
            let low = project_scenario(baseline(), &low).unwrap();
            let high = project_scenario(baseline(), &high).unwrap();
            for (a, b) in low.iter().zip(high.iter()) {
                prop_assert!(b.cumulative_savings >= a.cumulative_savings);
            }
        }
    }
}
