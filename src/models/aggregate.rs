//! Aggregated ledger data
//!
//! Per-month totals and the baseline statistics the forecast engine consumes.

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::month::YearMonth;

/// Income and expense totals for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    /// The month these totals cover
    pub month: YearMonth,

    /// Sum of positive amounts
    pub income_total: Money,

    /// Sum of negative amounts, stored as a positive magnitude
    pub expense_total: Money,

    /// income_total - expense_total
    pub net_flow: Money,
}

impl MonthlyAggregate {
    /// Create an aggregate; net flow is derived
    pub fn new(month: YearMonth, income_total: Money, expense_total: Money) -> Self {
        Self {
            month,
            income_total,
            expense_total,
            net_flow: income_total - expense_total,
        }
    }
}

/// Historical averages plus the savings balance a projection starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineStats {
    /// Mean monthly income over the history
    pub avg_monthly_income: Money,

    /// Mean monthly expense over the history (positive magnitude)
    pub avg_monthly_expense: Money,

    /// Cumulative net flow; negative means overdraft
    pub current_savings: Money,
}

impl BaselineStats {
    pub fn new(
        avg_monthly_income: Money,
        avg_monthly_expense: Money,
        current_savings: Money,
    ) -> Self {
        Self {
            avg_monthly_income,
            avg_monthly_expense,
            current_savings,
        }
    }

    /// Average monthly net flow
    pub fn avg_monthly_net(&self) -> Money {
        self.avg_monthly_income - self.avg_monthly_expense
    }
}
