//! CLI handlers for ledger reports
//!
//! Monthly summary, total savings, runway and category breakdown. Handlers
//! write to any `Write` so the interactive menu and tests can capture them.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::cli::ledger::Session;
use crate::error::{CashflowError, CashflowResult};
use crate::forecast::compute_runway;
use crate::reports::{format_runway, format_savings, CashflowReport, SpendingReport};
use crate::services::AggregateService;

/// Monthly cash flow table, optionally exported to CSV
pub fn handle_summary<W: Write + ?Sized>(
    session: &Session,
    output: Option<&Path>,
    out: &mut W,
) -> CashflowResult<()> {
    let report = CashflowReport::generate(session.transactions());

    if let Some(path) = output {
        let mut writer = create_output(path)?;
        report.export_csv(&mut writer)?;
        writer.flush()?;
        writeln!(out, "Monthly summary exported to: {}", path.display())?;
    } else {
        write!(out, "{}", report.format_terminal(session.symbol()))?;
    }

    Ok(())
}

/// Cumulative net flow across the ledger
pub fn handle_savings<W: Write + ?Sized>(session: &Session, out: &mut W) -> CashflowResult<()> {
    let total = AggregateService::new(session.transactions()).total_savings();
    write!(out, "{}", format_savings(total, session.symbol()))?;
    Ok(())
}

/// Emergency-fund runway from the ledger's baseline
pub fn handle_runway<W: Write + ?Sized>(session: &Session, out: &mut W) -> CashflowResult<()> {
    let baseline = session.baseline()?;
    let runway = compute_runway(baseline.current_savings, baseline.avg_monthly_expense)?;

    write!(
        out,
        "{}",
        format_runway(
            &runway,
            &baseline,
            session.settings.runway_rounding,
            session.symbol()
        )
    )?;
    Ok(())
}

/// Category spending breakdown
pub fn handle_categories<W: Write + ?Sized>(
    session: &Session,
    top: Option<usize>,
    output: Option<&Path>,
    out: &mut W,
) -> CashflowResult<()> {
    let report = SpendingReport::generate(session.transactions());

    if let Some(path) = output {
        let mut writer = create_output(path)?;
        report.export_csv(&mut writer)?;
        writer.flush()?;
        writeln!(out, "Category breakdown exported to: {}", path.display())?;
        return Ok(());
    }

    let text = match top {
        Some(limit) => report.format_top(limit),
        None => report.format_terminal(),
    };
    write!(out, "{}", text)?;
    Ok(())
}

/// Create an output file wrapped in a buffered writer
pub(crate) fn create_output(path: &Path) -> CashflowResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        CashflowError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
