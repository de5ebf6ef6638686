//! Ledger loading shared by every command
//!
//! Each command takes the CSV path plus optional loader overrides, loads the
//! ledger once and hands the result to the report or forecast handler.

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::error::{CashflowError, CashflowResult};
use crate::models::{BaselineStats, Transaction, YearMonth};
use crate::services::{
    AggregateService, ColumnOverrides, ImportOptions, ImportResult, ImportService,
};

/// Ledger file and loader overrides
#[derive(Args, Debug, Clone)]
pub struct LedgerArgs {
    /// Path to the transactions CSV file
    pub file: PathBuf,

    /// Field delimiter (detected from the file when omitted)
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Column holding the transaction date
    #[arg(long, value_name = "NAME")]
    pub date_column: Option<String>,

    /// Column holding the category
    #[arg(long, value_name = "NAME")]
    pub category_column: Option<String>,

    /// Column holding the signed amount
    #[arg(long, value_name = "NAME")]
    pub amount_column: Option<String>,
}

impl LedgerArgs {
    /// Loader options: command-line flags win over settings
    pub fn import_options(&self, settings: &Settings) -> CashflowResult<ImportOptions> {
        let delimiter = match self.delimiter {
            Some(c) if c.is_ascii() => Some(c as u8),
            Some(c) => {
                return Err(CashflowError::Validation(format!(
                    "Delimiter must be a single ASCII character, got '{}'",
                    c
                )))
            }
            None => settings.delimiter_byte(),
        };

        Ok(ImportOptions {
            delimiter,
            overrides: ColumnOverrides {
                date: self.date_column.clone(),
                category: self.category_column.clone(),
                amount: self.amount_column.clone(),
            },
        })
    }
}

/// A loaded ledger with the settings it is reported under
#[derive(Debug)]
pub struct Session {
    pub settings: Settings,
    pub ledger: ImportResult,
    /// Month projections count forward from
    pub start_month: YearMonth,
}

impl Session {
    /// Load the ledger named by `args`
    pub fn load(args: &LedgerArgs, settings: Settings) -> CashflowResult<Self> {
        let options = args.import_options(&settings)?;
        let ledger = ImportService::new(options).load_file(&args.file)?;

        log::info!(
            "loaded {} transactions from {}",
            ledger.transactions.len(),
            args.file.display()
        );

        Ok(Self {
            settings,
            ledger,
            start_month: YearMonth::current(),
        })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.ledger.transactions
    }

    /// Baseline statistics, recomputed from the ledger
    pub fn baseline(&self) -> CashflowResult<BaselineStats> {
        AggregateService::new(self.transactions()).baseline()
    }

    pub fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }
}
