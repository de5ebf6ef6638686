//! Interactive menu
//!
//! A fixed set of numbered commands, each bound to a handler through
//! [`DISPATCH`]. Errors from a handler are reported and the menu is shown
//! again; end of input leaves the menu.

use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::cli::forecast::{
    handle_goal, handle_project, handle_what_if, DeltaArgs, GoalArgs, ProjectArgs, ScenarioKind,
    WhatIfArgs,
};
use crate::cli::ledger::Session;
use crate::cli::report::{handle_categories, handle_runway, handle_savings, handle_summary};
use crate::error::{CashflowError, CashflowResult};
use crate::models::{Money, YearMonth};
use crate::services::import::parse_date;

/// Menu entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Summary,
    Savings,
    Runway,
    GoalPlanner,
    Projection,
    WhatIf,
    Categories,
    Exit,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 8] = [
        MenuCommand::Summary,
        MenuCommand::Savings,
        MenuCommand::Runway,
        MenuCommand::GoalPlanner,
        MenuCommand::Projection,
        MenuCommand::WhatIf,
        MenuCommand::Categories,
        MenuCommand::Exit,
    ];

    /// Number typed to select the command
    pub fn key(self) -> u8 {
        match self {
            MenuCommand::Summary => 1,
            MenuCommand::Savings => 2,
            MenuCommand::Runway => 3,
            MenuCommand::GoalPlanner => 4,
            MenuCommand::Projection => 5,
            MenuCommand::WhatIf => 6,
            MenuCommand::Categories => 7,
            MenuCommand::Exit => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuCommand::Summary => "Monthly Cash Flow Summary",
            MenuCommand::Savings => "Total Savings",
            MenuCommand::Runway => "Emergency Fund Runway",
            MenuCommand::GoalPlanner => "Savings Goal Planner",
            MenuCommand::Projection => "Future Cash Flow Projection (No Changes)",
            MenuCommand::WhatIf => "What-If Scenario Analysis",
            MenuCommand::Categories => "Category Spending Breakdown",
            MenuCommand::Exit => "Exit",
        }
    }

    /// Parse a menu choice such as "3"
    pub fn from_choice(choice: &str) -> Option<Self> {
        let key: u8 = choice.trim().parse().ok()?;
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

/// Line-oriented prompt over the menu's input and output
pub struct Prompter<'a> {
    input: &'a mut dyn BufRead,
    out: &'a mut dyn Write,
}

impl<'a> Prompter<'a> {
    pub fn new(input: &'a mut dyn BufRead, out: &'a mut dyn Write) -> Self {
        Self { input, out }
    }

    pub fn out(&mut self) -> &mut dyn Write {
        &mut *self.out
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input
    pub fn read_line(&mut self, prompt: &str) -> CashflowResult<Option<String>> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Read a line, treating end of input as an error
    pub fn ask(&mut self, prompt: &str) -> CashflowResult<String> {
        self.read_line(prompt)?
            .ok_or_else(|| CashflowError::Io("unexpected end of input".into()))
    }

    /// Read and parse a value
    pub fn ask_parsed<T: FromStr>(&mut self, prompt: &str) -> CashflowResult<T> {
        let answer = self.ask(prompt)?;
        answer
            .parse()
            .map_err(|_| CashflowError::Validation(format!("Invalid input '{}'", answer)))
    }
}

/// Handler run for a menu entry
pub type MenuHandler = fn(&Session, &mut Prompter<'_>) -> CashflowResult<()>;

/// Command dispatch table
pub const DISPATCH: [(MenuCommand, MenuHandler); 7] = [
    (MenuCommand::Summary, menu_summary),
    (MenuCommand::Savings, menu_savings),
    (MenuCommand::Runway, menu_runway),
    (MenuCommand::GoalPlanner, menu_goal),
    (MenuCommand::Projection, menu_projection),
    (MenuCommand::WhatIf, menu_what_if),
    (MenuCommand::Categories, menu_categories),
];

fn handler_for(command: MenuCommand) -> Option<MenuHandler> {
    DISPATCH
        .iter()
        .find(|(c, _)| *c == command)
        .map(|(_, handler)| *handler)
}

/// Run the menu until the user exits or input ends
pub fn run_menu<R: BufRead, W: Write>(
    session: &Session,
    mut input: R,
    mut out: W,
) -> CashflowResult<()> {
    let mut prompter = Prompter::new(&mut input, &mut out);

    writeln!(prompter.out(), "{}", "=".repeat(50))?;
    writeln!(prompter.out(), "     PERSONAL FINANCE ANALYZER - MAIN MENU")?;
    writeln!(prompter.out(), "{}", "=".repeat(50))?;

    loop {
        writeln!(prompter.out())?;
        writeln!(prompter.out(), "Choose an option:")?;
        for command in MenuCommand::ALL {
            writeln!(prompter.out(), "{}. {}", command.key(), command.label())?;
        }

        let Some(choice) = prompter.read_line("\nEnter your choice (0-7): ")? else {
            log::debug!("menu input closed");
            break;
        };

        let command = match MenuCommand::from_choice(&choice) {
            Some(MenuCommand::Exit) => {
                writeln!(prompter.out(), "\nGoodbye!")?;
                break;
            }
            Some(command) => command,
            None => {
                writeln!(prompter.out(), "Invalid choice. Please enter 0-7.")?;
                continue;
            }
        };

        let Some(handler) = handler_for(command) else {
            continue;
        };

        writeln!(prompter.out(), "\n--- {} ---", command.label())?;
        if let Err(e) = handler(session, &mut prompter) {
            log::debug!("menu command {:?} failed: {}", command, e);
            writeln!(prompter.out(), "Error: {}", e)?;
        }
    }

    Ok(())
}

fn menu_summary(session: &Session, p: &mut Prompter<'_>) -> CashflowResult<()> {
    handle_summary(session, None, p.out())
}

fn menu_savings(session: &Session, p: &mut Prompter<'_>) -> CashflowResult<()> {
    handle_savings(session, p.out())
}

fn menu_runway(session: &Session, p: &mut Prompter<'_>) -> CashflowResult<()> {
    handle_runway(session, p.out())
}

fn menu_goal(session: &Session, p: &mut Prompter<'_>) -> CashflowResult<()> {
    let amount: Money = p.ask_parsed("Enter your savings goal amount: $")?;
    let target = p.ask("Enter your target month (YYYY-MM or YYYY-MM-DD): ")?;
    let target = parse_target_month(&target)?;

    let args = GoalArgs {
        amount,
        months: None,
        by: Some(target),
        deltas: DeltaArgs::default(),
    };
    handle_goal(session, &args, p.out())
}

fn menu_projection(session: &Session, p: &mut Prompter<'_>) -> CashflowResult<()> {
    let months: i64 = p.ask_parsed("How many months to project? ")?;
    let args = ProjectArgs {
        months: Some(months),
        ..ProjectArgs::default()
    };
    handle_project(session, &args, p.out())
}

fn menu_what_if(session: &Session, p: &mut Prompter<'_>) -> CashflowResult<()> {
    let months: i64 = p.ask_parsed("How many months to project? ")?;

    writeln!(p.out(), "\nScenario Types:")?;
    writeln!(p.out(), "1. Decrease Spending")?;
    writeln!(p.out(), "2. Increase Income")?;
    writeln!(p.out(), "3. Both (balanced approach)")?;
    let (scenario, prompt) = match p.ask("Choose scenario (1-3): ")?.as_str() {
        "1" => (ScenarioKind::DecreaseSpending, "Enter amount to decrease spending by: $"),
        "2" => (ScenarioKind::IncreaseIncome, "Enter amount to increase income by: $"),
        "3" => (
            ScenarioKind::Balanced,
            "Enter total amount to adjust (split between income/expenses): $",
        ),
        other => {
            return Err(CashflowError::Validation(format!(
                "Invalid scenario '{}'. Please enter 1-3.",
                other
            )))
        }
    };
    let amount: Money = p.ask_parsed(prompt)?;

    let args = WhatIfArgs {
        months: Some(months),
        scenario,
        amount,
    };
    handle_what_if(session, &args, p.out())
}

fn menu_categories(session: &Session, p: &mut Prompter<'_>) -> CashflowResult<()> {
    handle_categories(session, None, None, p.out())
}

/// Accept a month ("2026-03") or a full date ("2026-03-15")
fn parse_target_month(input: &str) -> CashflowResult<YearMonth> {
    if let Ok(month) = YearMonth::parse(input) {
        return Ok(month);
    }
    parse_date(input)
        .map(YearMonth::from_date)
        .map_err(|_| CashflowError::Validation(format!("Invalid target date '{}'", input)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::services::ImportService;

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

    fn run_script(script: &str) -> String {
        let mut out = Vec::new();
        run_menu(&session(), script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_menu_choice_parsing() {
        assert_eq!(MenuCommand::from_choice(" 3 "), Some(MenuCommand::Runway));
        assert_eq!(MenuCommand::from_choice("0"), Some(MenuCommand::Exit));
        assert_eq!(MenuCommand::from_choice("8"), None);
        assert_eq!(MenuCommand::from_choice("abc"), None);
    }

    #[test]
    fn test_every_command_but_exit_has_a_handler() {
        for command in MenuCommand::ALL {
            assert_eq!(handler_for(command).is_some(), command != MenuCommand::Exit);
        }
    }

    #[test]
    fn test_exit() {
        let text = run_script("0\n");
        assert!(text.contains("MAIN MENU"));
        assert!(text.contains("Goodbye!"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let text = run_script("2\n");
        assert!(text.contains("Total savings from data: $300.00"));
        assert!(!text.contains("Goodbye!"));
    }

    #[test]
    fn test_invalid_choice_reprompts() {
        let text = run_script("9\n0\n");
        assert!(text.contains("Invalid choice. Please enter 0-7."));
        assert!(text.contains("Goodbye!"));
    }

    #[test]
    fn test_projection() {
        let text = run_script("5\n3\n0\n");
        assert!(text.contains("Final cumulative savings after 3 months: $1200.00"));
    }

    #[test]
    fn test_goal_planner_with_full_date() {
        let text = run_script("4\n2000\n2025-09-15\n0\n");
        assert!(text.contains("Target: 2025-09 (3 months)"));
        assert!(text.contains("Required additional monthly savings: $266.67"));
    }

    #[test]
    fn test_errors_are_reported_and_menu_continues() {
        let text = run_script("5\nlots\n4\n100\n2025-06\n0\n");
        assert!(text.contains("Error: Validation error: Invalid input 'lots'"));
        assert!(text.contains("Invalid parameter 'goal_deadline_months'"));
        assert!(text.contains("Goodbye!"));
    }

    #[test]
    fn test_what_if_increase_income() {
        let text = run_script("6\n2\n2\n100\n0\n");
        assert!(text.contains("Increase income by $100.00"));
        assert!(text.contains("$1100.00"));
    }

    #[test]
    fn test_what_if_rejects_unknown_scenario() {
        let text = run_script("6\n2\n7\n0\n");
        assert!(text.contains("Invalid scenario '7'"));
    }
}
