//! CLI handlers for forecasts
//!
//! Projection, savings goal planning and what-if comparison. Each handler
//! recomputes the baseline from the loaded ledger.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::cli::ledger::Session;
use crate::cli::report::create_output;
use crate::error::{CashflowError, CashflowResult};
use crate::export::{write_projection, ExportFormat, ProjectionExport};
use crate::forecast::{
    compare_what_if, plan_goal, project_scenario, SavingsGoal, ScenarioParameters, WhatIf,
};
use crate::models::{Money, YearMonth};
use crate::reports::{format_baseline, format_comparison, format_goal_plan, format_projection};

/// Income and expense changes applied to every projected month
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct DeltaArgs {
    /// Change to monthly income, e.g. 150 or -75.50
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub income_delta: Money,

    /// Change to monthly expenses, e.g. -100 to spend less
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub expense_delta: Money,
}

impl DeltaArgs {
    pub fn is_unchanged(&self) -> bool {
        self.income_delta.is_zero() && self.expense_delta.is_zero()
    }

    fn parameters(&self, horizon_months: i64) -> CashflowResult<ScenarioParameters> {
        ScenarioParameters::new(self.income_delta, self.expense_delta, horizon_months)
    }

    fn describe<W: Write + ?Sized>(&self, symbol: &str, out: &mut W) -> CashflowResult<()> {
        if !self.is_unchanged() {
            writeln!(
                out,
                "Adjustments: income {}, expenses {}",
                signed(self.income_delta, symbol),
                signed(self.expense_delta, symbol)
            )?;
        }
        Ok(())
    }
}

/// Arguments for `project`
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Months to project (defaults to the configured horizon)
    #[arg(short, long, allow_hyphen_values = true)]
    pub months: Option<i64>,

    #[command(flatten)]
    pub deltas: DeltaArgs,

    /// Write the projection to a file instead of the terminal
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export format (inferred from the file extension, else CSV)
    #[arg(short, long, value_enum, requires = "output")]
    pub format: Option<ExportFormat>,
}

/// Arguments for `goal`
#[derive(Args, Debug, Clone)]
pub struct GoalArgs {
    /// Savings goal amount
    #[arg(short, long, allow_hyphen_values = true)]
    pub amount: Money,

    /// Months from now until the deadline
    #[arg(short, long, allow_hyphen_values = true)]
    pub months: Option<i64>,

    /// Target month (YYYY-MM)
    #[arg(
        long,
        value_name = "YYYY-MM",
        conflicts_with = "months",
        required_unless_present = "months"
    )]
    pub by: Option<YearMonth>,

    #[command(flatten)]
    pub deltas: DeltaArgs,
}

/// Named what-if presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioKind {
    /// Cut monthly expenses by the amount
    DecreaseSpending,
    /// Raise monthly income by the amount
    IncreaseIncome,
    /// Split the amount between more income and less spending
    Balanced,
}

impl ScenarioKind {
    pub fn with_amount(self, amount: Money) -> WhatIf {
        match self {
            ScenarioKind::DecreaseSpending => WhatIf::DecreaseSpending(amount),
            ScenarioKind::IncreaseIncome => WhatIf::IncreaseIncome(amount),
            ScenarioKind::Balanced => WhatIf::Balanced(amount),
        }
    }
}

/// Arguments for `what-if`
#[derive(Args, Debug, Clone)]
pub struct WhatIfArgs {
    /// Months to project (defaults to the configured horizon)
    #[arg(short, long, allow_hyphen_values = true)]
    pub months: Option<i64>,

    /// Scenario preset
    #[arg(short, long, value_enum)]
    pub scenario: ScenarioKind,

    /// Monthly amount the scenario adjusts by
    #[arg(short, long, allow_hyphen_values = true)]
    pub amount: Money,
}

/// Project savings under the given deltas
pub fn handle_project<W: Write + ?Sized>(
    session: &Session,
    args: &ProjectArgs,
    out: &mut W,
) -> CashflowResult<()> {
    let baseline = session.baseline()?;
    let horizon = horizon_or_default(session, args.months);
    let params = args.deltas.parameters(horizon)?;
    let projection = project_scenario(baseline, &params)?;

    if let Some(path) = &args.output {
        let format = args
            .format
            .or_else(|| ExportFormat::from_path(path))
            .unwrap_or(ExportFormat::Csv);
        let export = ProjectionExport::new(&projection, &params, session.start_month, None);
        let mut writer = create_output(path)?;
        write_projection(&export, format, &mut writer)?;
        writer.flush()?;
        writeln!(out, "Projection exported to: {}", path.display())?;
        return Ok(());
    }

    writeln!(out, "Projected Cash Flow")?;
    write!(out, "{}", format_baseline(&baseline, session.symbol()))?;
    args.deltas.describe(session.symbol(), out)?;
    write!(
        out,
        "{}",
        format_projection(&projection, session.start_month, session.symbol())
    )?;
    Ok(())
}

/// Evaluate a savings goal under the given deltas and show the plan that
/// reaches it
pub fn handle_goal<W: Write + ?Sized>(
    session: &Session,
    args: &GoalArgs,
    out: &mut W,
) -> CashflowResult<()> {
    let deadline = match (args.months, args.by) {
        (Some(months), _) => months,
        (None, Some(target)) => months_until_target(session.start_month, target)?,
        (None, None) => {
            return Err(CashflowError::Validation(
                "Either --months or --by is required".into(),
            ))
        }
    };

    let baseline = session.baseline()?;
    let goal = SavingsGoal::new(args.amount, deadline)?;
    let params = args
        .deltas
        .parameters(i64::from(goal.deadline_months))?
        .with_goal(goal);
    let plan = plan_goal(baseline, &params)?;

    args.deltas.describe(session.symbol(), out)?;
    write!(
        out,
        "{}",
        format_goal_plan(&plan, session.start_month, session.symbol())
    )?;
    Ok(())
}

/// Compare a what-if preset against the no-change baseline
pub fn handle_what_if<W: Write + ?Sized>(
    session: &Session,
    args: &WhatIfArgs,
    out: &mut W,
) -> CashflowResult<()> {
    let baseline = session.baseline()?;
    let horizon = horizon_or_default(session, args.months);
    let what_if = args.scenario.with_amount(args.amount);
    let comparison = compare_what_if(baseline, horizon, what_if)?;

    write!(
        out,
        "{}",
        format_comparison(&comparison, session.start_month, session.symbol())
    )?;
    Ok(())
}

/// Months from `current` to `target`, which must be in the future
pub fn months_until_target(current: YearMonth, target: YearMonth) -> CashflowResult<i64> {
    let months = current.months_until(&target);
    if months < 1 {
        return Err(CashflowError::invalid_parameter(
            "goal_deadline_months",
            format!("target month {} must be after {}", target, current),
        ));
    }
    Ok(months)
}

fn horizon_or_default(session: &Session, months: Option<i64>) -> i64 {
    months.unwrap_or_else(|| i64::from(session.settings.default_horizon_months))
}

fn signed(amount: Money, symbol: &str) -> String {
    if amount.is_negative() {
        amount.format_with_symbol(symbol)
    } else {
        format!("+{}", amount.format_with_symbol(symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::export::import_projection_json;
    use crate::services::ImportService;
    use tempfile::TempDir;

    // Baseline: income 1200, expense 900, savings 300 (one month of history)
    const LEDGER: &str = "date,category,amount\n\
                          2025-05-01,Salary,1200\n\
                          2025-05-02,Rent,-900\n";

    fn session() -> Session {
        Session {
            settings: Settings::default(),
            ledger: ImportService::default().load_str(LEDGER).unwrap(),
            start_month: YearMonth::new(2025, 6).unwrap(),
        }
    }

    fn capture<F>(f: F) -> CashflowResult<String>
    where
        F: FnOnce(&mut Vec<u8>) -> CashflowResult<()>,
    {
        let mut out = Vec::new();
        f(&mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_project_unchanged() {
        let s = session();
        let args = ProjectArgs {
            months: Some(3),
            ..ProjectArgs::default()
        };
        let text = capture(|out| handle_project(&s, &args, out)).unwrap();
        assert!(text.contains("2025-07"));
        assert!(text.contains("2025-09"));
        assert!(text.contains("Final cumulative savings after 3 months: $1200.00"));
        assert!(!text.contains("Adjustments"));
    }

    #[test]
    fn test_project_uses_default_horizon() {
        let mut s = session();
        s.settings.default_horizon_months = 2;
        let text = capture(|out| handle_project(&s, &ProjectArgs::default(), out)).unwrap();
        assert!(text.contains("after 2 months: $900.00"));
    }

    #[test]
    fn test_project_negative_horizon_rejected() {
        let s = session();
        let args = ProjectArgs {
            months: Some(-1),
            ..ProjectArgs::default()
        };
        let err = capture(|out| handle_project(&s, &args, out)).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_project_export_json() {
        let s = session();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.json");
        let args = ProjectArgs {
            months: Some(2),
            deltas: DeltaArgs {
                expense_delta: Money::from_dollars(-100),
                ..DeltaArgs::default()
            },
            output: Some(path.clone()),
            ..ProjectArgs::default()
        };
        capture(|out| handle_project(&s, &args, out)).unwrap();

        let export = import_projection_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(export.months.len(), 2);
        assert_eq!(export.months[1].point.cumulative_savings, Money::from_dollars(1100));
    }

    #[test]
    fn test_goal_not_achievable() {
        let s = session();
        let args = GoalArgs {
            amount: Money::from_dollars(2000),
            months: Some(3),
            by: None,
            deltas: DeltaArgs::default(),
        };
        let text = capture(|out| handle_goal(&s, &args, out)).unwrap();
        assert!(text.contains("Achievable: No"));
        assert!(text.contains("Shortfall: $800.00"));
        assert!(text.contains("$266.67"));
        assert!(!text.contains("Adjustments"));
    }

    #[test]
    fn test_goal_with_income_delta() {
        let s = session();
        let args = GoalArgs {
            amount: Money::from_dollars(2000),
            months: Some(3),
            by: None,
            deltas: DeltaArgs {
                income_delta: Money::from_dollars(100),
                ..DeltaArgs::default()
            },
        };
        let text = capture(|out| handle_goal(&s, &args, out)).unwrap();
        // 300 + 3 * 400 = 1500
        assert!(text.contains("Adjustments: income +$100.00, expenses +$0.00"));
        assert!(text.contains("Projected savings at target: $1500.00"));
        assert!(text.contains("Shortfall: $500.00"));
        assert!(text.contains("Required additional monthly savings: $166.67"));
        assert!(text.contains("$2000.01"));
    }

    #[test]
    fn test_project_overflow_is_invalid_parameter() {
        let s = session();
        let args = ProjectArgs {
            months: Some(100_000),
            deltas: DeltaArgs {
                income_delta: Money::from_dollars(1_000_000_000_000),
                ..DeltaArgs::default()
            },
            ..ProjectArgs::default()
        };
        let err = capture(|out| handle_project(&s, &args, out)).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_goal_by_month() {
        let s = session();
        let args = GoalArgs {
            amount: Money::from_dollars(500),
            months: None,
            by: Some(YearMonth::new(2025, 8).unwrap()),
            deltas: DeltaArgs::default(),
        };
        let text = capture(|out| handle_goal(&s, &args, out)).unwrap();
        assert!(text.contains("Target: 2025-08 (2 months)"));
        assert!(text.contains("Achievable: Yes"));
    }

    #[test]
    fn test_goal_past_month_rejected() {
        let s = session();
        let args = GoalArgs {
            amount: Money::from_dollars(500),
            months: None,
            by: Some(YearMonth::new(2025, 6).unwrap()),
            deltas: DeltaArgs::default(),
        };
        assert!(capture(|out| handle_goal(&s, &args, out))
            .unwrap_err()
            .is_invalid_parameter());
    }

    #[test]
    fn test_what_if_balanced() {
        let s = session();
        let args = WhatIfArgs {
            months: Some(2),
            scenario: ScenarioKind::Balanced,
            amount: Money::from_dollars(100),
        };
        let text = capture(|out| handle_what_if(&s, &args, out)).unwrap();
        assert!(text.contains("Balanced adjustment"));
        assert!(text.contains("$900.00"));
        assert!(text.contains("$1100.00"));
    }

    #[test]
    fn test_months_until_target() {
        let now = YearMonth::new(2025, 11).unwrap();
        assert_eq!(months_until_target(now, YearMonth::new(2026, 2).unwrap()).unwrap(), 3);
        assert!(months_until_target(now, now).is_err());
    }
}
