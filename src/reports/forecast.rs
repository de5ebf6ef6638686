//! Forecast reports
//!
//! Terminal rendering of projections, runway, goal plans and what-if
//! comparisons. Projected months are labelled with calendar months counted
//! from a start month, normally the current one.

use crate::display::report::{format_header, format_percentage, separator};
use crate::forecast::{GoalPlan, Projection, Runway, RoundingPolicy, ScenarioComparison};
use crate::models::{BaselineStats, Money, YearMonth};
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

const WIDTH: usize = 60;

#[derive(Tabled)]
struct ProjectionRow {
    #[tabled(rename = "#")]
    index: u32,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Net")]
    net: String,
    #[tabled(rename = "Cumulative Savings")]
    cumulative: String,
}

/// Render a projection as a table
pub fn format_projection(projection: &Projection, start: YearMonth, symbol: &str) -> String {
    if projection.is_empty() {
        return "No months to project.\n".to_string();
    }

    let rows: Vec<ProjectionRow> = projection
        .iter()
        .map(|p| ProjectionRow {
            index: p.month_index,
            month: start.plus_months(p.month_index).to_string(),
            income: p.projected_income.format_with_symbol(symbol),
            expenses: p.projected_expense.format_with_symbol(symbol),
            net: p.projected_net.format_with_symbol(symbol),
            cumulative: p.cumulative_savings.format_with_symbol(symbol),
        })
        .collect();

    let mut output = Table::new(rows)
        .with(Style::modern())
        .modify(Columns::new(2..), Alignment::right())
        .to_string();
    output.push('\n');
    output.push_str(&format!(
        "Final cumulative savings after {} months: {}\n",
        projection.horizon_months(),
        projection.final_savings().format_with_symbol(symbol)
    ));
    if projection.monthly_expense().is_negative() {
        output.push_str("Note: projected expenses are negative and count as additional income.\n");
    }
    output
}

/// Render the baseline the projections start from
pub fn format_baseline(baseline: &BaselineStats, symbol: &str) -> String {
    format!(
        "Avg monthly income: {}  Avg monthly expenses: {}  Avg monthly net: {}\n\
         Current savings: {}\n",
        baseline.avg_monthly_income.format_with_symbol(symbol),
        baseline.avg_monthly_expense.format_with_symbol(symbol),
        baseline.avg_monthly_net().format_with_symbol(symbol),
        baseline.current_savings.format_with_symbol(symbol)
    )
}

/// Render an emergency-fund runway
pub fn format_runway(
    runway: &Runway,
    baseline: &BaselineStats,
    policy: RoundingPolicy,
    symbol: &str,
) -> String {
    let mut output = String::new();
    output.push_str(&format_header("Emergency Fund Runway", WIDTH));
    output.push('\n');
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!("Runway: {}\n", runway.describe(policy)));
    if let Some(ratio) = runway.months.ratio() {
        if !runway.insolvent && policy == RoundingPolicy::Floor {
            output.push_str(&format!("Exact: {:.2} months\n", ratio.as_f64()));
        }
    }
    if runway.insolvent {
        output.push_str("Status: currently insolvent (savings are negative)\n");
    }
    output.push_str(&format!(
        "Savings: {}\n",
        baseline.current_savings.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Avg monthly expenses: {}\n",
        baseline.avg_monthly_expense.format_with_symbol(symbol)
    ));
    output
}

/// Render a goal plan: verdict, shortfall and the adjusted projection
pub fn format_goal_plan(plan: &GoalPlan, start: YearMonth, symbol: &str) -> String {
    let f = &plan.feasibility;
    let mut output = String::new();

    output.push_str(&format_header("Savings Goal Plan", WIDTH));
    output.push('\n');
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "Goal amount: {}\n",
        f.goal_amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Target: {} ({} months)\n",
        start.plus_months(f.goal_deadline_months),
        f.goal_deadline_months
    ));
    output.push_str(&format!(
        "Projected savings at target: {}\n",
        f.projected_savings_at_deadline.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Achievable: {}\n",
        if f.is_achievable { "Yes" } else { "No" }
    ));

    if !f.is_achievable {
        output.push_str(&format!(
            "Shortfall: {}\n",
            f.shortfall_amount.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Required additional monthly savings: {}\n",
            f.required_monthly_savings.format_with_symbol(symbol)
        ));
        output.push('\n');
        output.push_str("Projected cash flow with required savings applied:\n");
        output.push_str(&format_projection(
            &plan.adjusted.truncated_to(f.goal_deadline_months),
            start,
            symbol,
        ));
    }

    output
}

/// Render a what-if comparison
pub fn format_comparison(
    comparison: &ScenarioComparison,
    start: YearMonth,
    symbol: &str,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("What-If Scenario: {}\n", comparison.what_if));
    output.push_str(&format_projection(&comparison.scenario, start, symbol));
    output.push('\n');
    output.push_str("Comparison:\n");
    output.push_str(&format!(
        "  Baseline final savings (no changes): {}\n",
        comparison.baseline_final().format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Scenario final savings:              {}\n",
        comparison.scenario_final().format_with_symbol(symbol)
    ));
    let pct = comparison
        .difference_pct()
        .map(|p| format!(" ({})", format_signed_percentage(p)))
        .unwrap_or_default();
    output.push_str(&format!(
        "  Difference:                          {}{}\n",
        comparison.difference().format_with_symbol(symbol),
        pct
    ));
    output
}

/// Render total savings
pub fn format_savings(total: Money, symbol: &str) -> String {
    let mut output = format!("Total savings from data: {}\n", total.format_with_symbol(symbol));
    if total.is_negative() {
        output.push_str("Spending exceeds income over the ledger (overdraft).\n");
    }
    output
}

fn format_signed_percentage(pct: f64) -> String {
    if pct < 0.0 {
        format!("-{}", format_percentage(-pct))
    } else {
        format!("+{}", format_percentage(pct))
    }
}
