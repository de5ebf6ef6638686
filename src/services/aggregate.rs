//! Monthly aggregation
//!
//! Groups a validated ledger by calendar month and derives the baseline
//! statistics the forecast engine starts from.

use std::collections::BTreeMap;

use crate::error::{CashflowError, CashflowResult};
use crate::models::{BaselineStats, Money, MonthlyAggregate, Transaction, YearMonth};

/// Service for aggregating a ledger
pub struct AggregateService<'a> {
    transactions: &'a [Transaction],
}

impl<'a> AggregateService<'a> {
    /// Create a new aggregate service over a ledger
    pub fn new(transactions: &'a [Transaction]) -> Self {
        Self { transactions }
    }

    /// Per-month income, expense and net flow, in chronological order
    ///
    /// Only months that have at least one transaction appear.
    pub fn monthly_cashflow(&self) -> Vec<MonthlyAggregate> {
        let mut by_month: BTreeMap<YearMonth, (Money, Money)> = BTreeMap::new();

        for txn in self.transactions {
            let entry = by_month
                .entry(txn.month())
                .or_insert((Money::zero(), Money::zero()));
            if txn.is_income() {
                entry.0 += txn.amount;
            } else if txn.is_expense() {
                entry.1 += txn.amount.abs();
            }
        }

        let months: Vec<MonthlyAggregate> = by_month
            .into_iter()
            .map(|(month, (income, expense))| MonthlyAggregate::new(month, income, expense))
            .collect();

        log::debug!(
            "aggregated {} transactions into {} months",
            self.transactions.len(),
            months.len()
        );
        months
    }

    /// Cumulative net flow across the whole ledger (may be negative)
    pub fn total_savings(&self) -> Money {
        self.transactions.iter().map(|t| t.amount).sum()
    }

    /// Baseline statistics for projections
    pub fn baseline(&self) -> CashflowResult<BaselineStats> {
        baseline_from_months(&self.monthly_cashflow())
    }
}

/// Derive baseline statistics from monthly aggregates
///
/// Averages are taken over the months present and rounded to the nearest
/// cent. An empty history has no meaningful average and is reported as
/// [`CashflowError::NoData`].
pub fn baseline_from_months(months: &[MonthlyAggregate]) -> CashflowResult<BaselineStats> {
    let count = months.len() as i64;
    let no_data = || CashflowError::NoData("ledger has no months of history".into());
    if count == 0 {
        return Err(no_data());
    }

    let total_income: Money = months.iter().map(|m| m.income_total).sum();
    let total_expense: Money = months.iter().map(|m| m.expense_total).sum();
    let current_savings: Money = months.iter().map(|m| m.net_flow).sum();

    let baseline = BaselineStats::new(
        total_income.div_round(count).ok_or_else(no_data)?,
        total_expense.div_round(count).ok_or_else(no_data)?,
        current_savings,
    );

    log::debug!(
        "baseline over {} months: income {}, expense {}, savings {}",
        count,
        baseline.avg_monthly_income,
        baseline.avg_monthly_expense,
        baseline.current_savings
    );

    Ok(baseline)
}
