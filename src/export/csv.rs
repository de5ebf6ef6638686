//! CSV Export functionality
//!
//! One row per projected month, amounts as decimal strings, ready for a
//! spreadsheet.

use crate::error::{CashflowError, CashflowResult};
use crate::export::json::ProjectionExport;
use std::io::Write;

/// Export projected months to CSV
pub fn export_projection_csv<W: Write>(
    export: &ProjectionExport,
    writer: &mut W,
) -> CashflowResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record([
            "month_index",
            "month",
            "projected_income",
            "projected_expense",
            "projected_net",
            "cumulative_savings",
        ])
        .map_err(|e| CashflowError::Export(e.to_string()))?;

    for entry in &export.months {
        let p = &entry.point;
        csv_writer
            .write_record([
                p.month_index.to_string(),
                entry.month.to_string(),
                p.projected_income.to_decimal_string(),
                p.projected_expense.to_decimal_string(),
                p.projected_net.to_decimal_string(),
                p.cumulative_savings.to_decimal_string(),
            ])
            .map_err(|e| CashflowError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| CashflowError::Export(e.to_string()))?;
    Ok(())
}
