use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use cashflow_cli::cli::{
    handle_categories, handle_goal, handle_project, handle_runway, handle_savings, handle_summary,
    handle_what_if, run_menu, GoalArgs, LedgerArgs, ProjectArgs, Session, WhatIfArgs,
};
use cashflow_cli::config::paths::CONFIG_DIR_ENV;
use cashflow_cli::config::{CashflowPaths, Settings};

#[derive(Parser)]
#[command(
    name = "cashflow",
    version,
    about = "Personal cash flow analyzer",
    long_about = "Reads a ledger of dated, categorized transactions and answers \
                  three questions: how long savings last, where savings go under \
                  a hypothetical change, and whether a savings goal is reachable \
                  by a deadline."
)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Configuration directory
    #[arg(long, global = true, env = CONFIG_DIR_ENV, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly income, expenses and net cash flow
    Summary {
        #[command(flatten)]
        ledger: LedgerArgs,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Total savings (cumulative net flow)
    Savings {
        #[command(flatten)]
        ledger: LedgerArgs,
    },

    /// Emergency-fund runway in months
    Runway {
        #[command(flatten)]
        ledger: LedgerArgs,
    },

    /// Project savings forward under optional income/expense changes
    Project {
        #[command(flatten)]
        ledger: LedgerArgs,

        #[command(flatten)]
        args: ProjectArgs,
    },

    /// Check whether a savings goal is reachable and what it takes
    Goal {
        #[command(flatten)]
        ledger: LedgerArgs,

        #[command(flatten)]
        args: GoalArgs,
    },

    /// Compare a what-if scenario against no changes
    WhatIf {
        #[command(flatten)]
        ledger: LedgerArgs,

        #[command(flatten)]
        args: WhatIfArgs,
    },

    /// Spending breakdown by category
    Categories {
        #[command(flatten)]
        ledger: LedgerArgs,

        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive menu over a ledger
    Menu {
        #[command(flatten)]
        ledger: LedgerArgs,
    },

    /// Show configuration paths and settings
    Config {
        /// Write default settings if none exist
        #[arg(long)]
        init: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("CASHFLOW_LOG", level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = match cli.config_dir {
        Some(dir) => CashflowPaths::with_base_dir(dir),
        None => CashflowPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    log::debug!("config directory: {}", paths.base_dir().display());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(Commands::Summary { ledger, output }) => {
            let session = Session::load(&ledger, settings)?;
            handle_summary(&session, output.as_deref(), &mut out)?;
        }
        Some(Commands::Savings { ledger }) => {
            let session = Session::load(&ledger, settings)?;
            handle_savings(&session, &mut out)?;
        }
        Some(Commands::Runway { ledger }) => {
            let session = Session::load(&ledger, settings)?;
            handle_runway(&session, &mut out)?;
        }
        Some(Commands::Project { ledger, args }) => {
            let session = Session::load(&ledger, settings)?;
            handle_project(&session, &args, &mut out)?;
        }
        Some(Commands::Goal { ledger, args }) => {
            let session = Session::load(&ledger, settings)?;
            handle_goal(&session, &args, &mut out)?;
        }
        Some(Commands::WhatIf { ledger, args }) => {
            let session = Session::load(&ledger, settings)?;
            handle_what_if(&session, &args, &mut out)?;
        }
        Some(Commands::Categories {
            ledger,
            top,
            output,
        }) => {
            let session = Session::load(&ledger, settings)?;
            handle_categories(&session, top, output.as_deref(), &mut out)?;
        }
        Some(Commands::Menu { ledger }) => {
            let session = Session::load(&ledger, settings)?;
            let stdin = io::stdin();
            run_menu(&session, stdin.lock(), &mut out)?;
        }
        Some(Commands::Config { init }) => {
            if init {
                if paths.is_initialized() {
                    writeln!(out, "Settings already exist; leaving them unchanged.")?;
                } else {
                    settings.save(&paths)?;
                    writeln!(out, "Wrote default settings.")?;
                }
            }
            writeln!(out, "cashflow-cli Configuration")?;
            writeln!(out, "==========================")?;
            writeln!(out, "Config directory: {}", paths.base_dir().display())?;
            writeln!(out, "Settings file:    {}", paths.settings_file().display())?;
            writeln!(out)?;
            writeln!(out, "Settings:")?;
            writeln!(out, "  Currency symbol:   {}", settings.currency_symbol)?;
            writeln!(out, "  Default horizon:   {} months", settings.default_horizon_months)?;
            match settings.default_delimiter {
                Some(c) => writeln!(out, "  Default delimiter: {:?}", c)?,
                None => writeln!(out, "  Default delimiter: auto-detect")?,
            }
            writeln!(out, "  Runway rounding:   {:?}", settings.runway_rounding)?;
        }
        None => {
            writeln!(out, "cashflow - personal cash flow analyzer")?;
            writeln!(out)?;
            writeln!(out, "Run 'cashflow --help' for usage information.")?;
            writeln!(out, "Run 'cashflow menu <FILE>' for the interactive menu.")?;
        }
    }

    out.flush()?;
    Ok(())
}
