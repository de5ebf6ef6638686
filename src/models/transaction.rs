//! Transaction model
//!
//! A single ledger entry as loaded from the user's CSV. The sign of the
//! amount carries its meaning: positive for income, negative for expense.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::month::YearMonth;

/// A ledger transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction date
    pub date: NaiveDate,

    /// Free-form category label (e.g. "Rent", "Part-time Job")
    pub category: String,

    /// Amount (positive for income, negative for expense)
    pub amount: Money,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(date: NaiveDate, category: impl Into<String>, amount: Money) -> Self {
        Self {
            date,
            category: category.into(),
            amount,
        }
    }

    /// Check if this is income
    pub fn is_income(&self) -> bool {
        self.amount.is_positive()
    }

    /// Check if this is an expense
    pub fn is_expense(&self) -> bool {
        self.amount.is_negative()
    }

    /// The calendar month this transaction belongs to
    pub fn month(&self) -> YearMonth {
        YearMonth::from_date(self.date)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.category, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_convention() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let pay = Transaction::new(date, "Salary", Money::from_cents(120000));
        let rent = Transaction::new(date, "Rent", Money::from_cents(-90000));
        let zero = Transaction::new(date, "Adjustment", Money::zero());

        assert!(pay.is_income());
        assert!(!pay.is_expense());
        assert!(rent.is_expense());
        assert!(!zero.is_income() && !zero.is_expense());
    }

    #[test]
    fn test_month_key() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        let txn = Transaction::new(date, "Food", Money::from_cents(-1250));
        assert_eq!(txn.month().to_string(), "2025-02");
    }

    #[test]
    fn test_display() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let txn = Transaction::new(date, "Food", Money::from_cents(-1250));
        assert_eq!(txn.to_string(), "2025-01-15 Food -$12.50");
    }
}
