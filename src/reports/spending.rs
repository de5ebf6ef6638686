//! Spending Report
//!
//! Breaks spending down by category with each category's share of the total.
//! A category counts as spending when its transactions net to an outflow.

use crate::display::report::{format_bar, separator, truncate};
use crate::error::{CashflowError, CashflowResult};
use crate::models::{Money, Transaction};
use std::collections::HashMap;
use std::io::Write;

const WIDTH: usize = 60;
const BAR_WIDTH: usize = 10;

/// Spending for one category
#[derive(Debug, Clone)]
pub struct SpendingByCategory {
    /// Category name
    pub category: String,
    /// Total spending (positive magnitude)
    pub total_spending: Money,
    /// Number of transactions
    pub transaction_count: usize,
    /// Percentage of total spending, rounded to two decimals
    pub percentage: f64,
}

/// Spending Report
#[derive(Debug, Clone)]
pub struct SpendingReport {
    /// Categories, most spending first
    pub categories: Vec<SpendingByCategory>,
    /// Total spending across all categories (positive magnitude)
    pub total_spending: Money,
    /// Total transaction count across spending categories
    pub total_transactions: usize,
}

impl SpendingReport {
    /// Generate a spending report for a ledger
    pub fn generate(transactions: &[Transaction]) -> Self {
        let mut by_category: HashMap<&str, (Money, usize)> = HashMap::new();
        for txn in transactions {
            let entry = by_category
                .entry(txn.category.as_str())
                .or_insert((Money::zero(), 0));
            entry.0 += txn.amount;
            entry.1 += 1;
        }

        let mut categories: Vec<SpendingByCategory> = by_category
            .into_iter()
            .filter(|(_, (net, _))| net.is_negative())
            .map(|(category, (net, count))| SpendingByCategory {
                category: category.to_string(),
                total_spending: net.abs(),
                transaction_count: count,
                percentage: 0.0,
            })
            .collect();

        let total_spending: Money = categories.iter().map(|c| c.total_spending).sum();
        for category in &mut categories {
            category.percentage = if total_spending.is_zero() {
                0.0
            } else {
                let pct =
                    category.total_spending.cents() as f64 / total_spending.cents() as f64 * 100.0;
                (pct * 100.0).round() / 100.0
            };
        }

        // Most spending first, then by name for a stable order
        categories.sort_by(|a, b| {
            b.total_spending
                .cmp(&a.total_spending)
                .then_with(|| a.category.cmp(&b.category))
        });

        let total_transactions = categories.iter().map(|c| c.transaction_count).sum();

        Self {
            categories,
            total_spending,
            total_transactions,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        self.format_rows(&self.categories)
    }

    /// Format only the `limit` largest categories, with a share bar
    pub fn format_top(&self, limit: usize) -> String {
        self.format_rows(self.top_categories(limit))
    }

    fn format_rows(&self, rows: &[SpendingByCategory]) -> String {
        let mut output = String::new();

        output.push_str("Category Spending Breakdown\n");
        output.push_str(&separator(WIDTH));
        output.push('\n');

        if rows.is_empty() {
            output.push_str("No spending recorded.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<25} {:>12} {:>8}  {}\n",
            "Category", "Amount", "%", "Share"
        ));
        output.push_str(&separator(WIDTH));
        output.push('\n');

        for category in rows {
            output.push_str(&format!(
                "{:<25} {:>12} {:>7.2}%  {}\n",
                truncate(&category.category, 25),
                category.total_spending,
                category.percentage,
                format_bar(category.percentage, 100.0, BAR_WIDTH)
            ));
        }

        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:<25} {:>12}\n",
            "TOTAL EXPENSES", self.total_spending
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> CashflowResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer
            .write_record(["Category", "Amount", "Transaction Count", "Percentage"])
            .map_err(|e| CashflowError::Export(e.to_string()))?;

        for category in &self.categories {
            csv_writer
                .write_record([
                    category.category.clone(),
                    category.total_spending.to_decimal_string(),
                    category.transaction_count.to_string(),
                    format!("{:.2}", category.percentage),
                ])
                .map_err(|e| CashflowError::Export(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| CashflowError::Export(e.to_string()))?;
        Ok(())
    }

    /// Get top spending categories
    pub fn top_categories(&self, limit: usize) -> &[SpendingByCategory] {
        &self.categories[..limit.min(self.categories.len())]
    }
}
