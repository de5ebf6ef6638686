//! Monthly Cash Flow Report
//!
//! Income, expenses and net cash flow per month, with ledger-wide totals.

use crate::error::{CashflowError, CashflowResult};
use crate::models::{Money, MonthlyAggregate, Transaction};
use crate::services::AggregateService;
use std::io::Write;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Net Cash Flow")]
    net: String,
}

/// Monthly Cash Flow Report
#[derive(Debug, Clone)]
pub struct CashflowReport {
    /// One row per month with activity, chronological
    pub months: Vec<MonthlyAggregate>,
    /// Total income across the ledger
    pub total_income: Money,
    /// Total expenses across the ledger (positive magnitude)
    pub total_expenses: Money,
    /// Cumulative net flow
    pub total_savings: Money,
}

impl CashflowReport {
    /// Generate the report for a ledger
    pub fn generate(transactions: &[Transaction]) -> Self {
        let service = AggregateService::new(transactions);
        let months = service.monthly_cashflow();

        Self {
            total_income: months.iter().map(|m| m.income_total).sum(),
            total_expenses: months.iter().map(|m| m.expense_total).sum(),
            total_savings: service.total_savings(),
            months,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();
        output.push_str("Monthly Cash Flow Summary\n");

        if self.months.is_empty() {
            output.push_str("No transactions in ledger.\n");
            return output;
        }

        let rows: Vec<MonthRow> = self
            .months
            .iter()
            .map(|m| MonthRow {
                month: m.month.to_string(),
                income: m.income_total.format_with_symbol(symbol),
                expenses: m.expense_total.format_with_symbol(symbol),
                net: m.net_flow.format_with_symbol(symbol),
            })
            .collect();

        let table = Table::new(rows)
            .with(Style::modern())
            .modify(Columns::new(1..), Alignment::right())
            .to_string();
        output.push_str(&table);
        output.push('\n');

        output.push_str(&format!(
            "Total income: {}  Total expenses: {}  Total savings: {}\n",
            self.total_income.format_with_symbol(symbol),
            self.total_expenses.format_with_symbol(symbol),
            self.total_savings.format_with_symbol(symbol)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> CashflowResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer
            .write_record(["month", "income", "expenses", "net_cashflow"])
            .map_err(|e| CashflowError::Export(e.to_string()))?;

        for m in &self.months {
            csv_writer
                .write_record([
                    m.month.to_string(),
                    m.income_total.to_decimal_string(),
                    m.expense_total.to_decimal_string(),
                    m.net_flow.to_decimal_string(),
                ])
                .map_err(|e| CashflowError::Export(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| CashflowError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ledger() -> Vec<Transaction> {
        let d = |m: u32, day: u32| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
        vec![
            Transaction::new(d(1, 1), "Salary", Money::from_dollars(1200)),
            Transaction::new(d(1, 2), "Rent", Money::from_dollars(-900)),
            Transaction::new(d(2, 1), "Salary", Money::from_dollars(1200)),
            Transaction::new(d(2, 2), "Rent", Money::from_dollars(-1300)),
        ]
    }

    #[test]
    fn test_generate() {
        let report = CashflowReport::generate(&ledger());
        assert_eq!(report.months.len(), 2);
        assert_eq!(report.total_income, Money::from_dollars(2400));
        assert_eq!(report.total_expenses, Money::from_dollars(2200));
        assert_eq!(report.total_savings, Money::from_dollars(200));
    }

    #[test]
    fn test_format_terminal() {
        let text = CashflowReport::generate(&ledger()).format_terminal("$");
        assert!(text.contains("2025-01"));
        assert!(text.contains("-$100.00"));
        assert!(text.contains("Total savings: $200.00"));
    }

    #[test]
    fn test_empty_ledger() {
        let text = CashflowReport::generate(&[]).format_terminal("$");
        assert!(text.contains("No transactions"));
    }

    #[test]
    fn test_export_csv() {
        let mut out = Vec::new();
        CashflowReport::generate(&ledger()).export_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "month,income,expenses,net_cashflow\n\
             2025-01,1200.00,900.00,300.00\n\
             2025-02,1200.00,1300.00,-100.00\n"
        );
    }
}
