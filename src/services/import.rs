//! CSV ledger import
//!
//! Reads a transaction ledger (date, category, amount) from CSV. Handles
//! the usual mess of hand-exported files: unknown delimiter, Latin-1 text,
//! header names in any case with common aliases, accounting-style negative
//! amounts and several date formats. The output is a time-ordered list of
//! validated transactions; nothing downstream sees raw rows.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};

use crate::error::{CashflowError, CashflowResult};
use crate::models::{Money, Transaction};

/// Delimiters tried, in order, when none is configured
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Accepted header names for the date column
pub const DATE_ALIASES: [&str; 3] = ["date", "transaction_date", "trans_date"];

/// Accepted header names for the category column
pub const CATEGORY_ALIASES: [&str; 4] = ["category", "description", "type", "transaction_type"];

/// Accepted header names for the amount column
pub const AMOUNT_ALIASES: [&str; 3] = ["amount", "value", "transaction_amount"];

/// Text encoding the file was decoded with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    /// Latin-1, also used for CP1252 exports
    Latin1,
}

/// Explicit column names that override alias detection
#[derive(Debug, Clone, Default)]
pub struct ColumnOverrides {
    pub date: Option<String>,
    pub category: Option<String>,
    pub amount: Option<String>,
}

/// Options for loading a ledger
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Fixed delimiter; detected when `None`
    pub delimiter: Option<u8>,
    pub overrides: ColumnOverrides,
}

/// Resolved column indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date_column: usize,
    pub category_column: usize,
    pub amount_column: usize,
}

/// A successfully loaded ledger
#[derive(Debug, Clone)]
pub struct ImportResult {
    /// Transactions sorted by date
    pub transactions: Vec<Transaction>,
    /// Normalized header names
    pub columns: Vec<String>,
    pub delimiter: u8,
    pub encoding: TextEncoding,
    /// Blank rows that were skipped
    pub skipped_rows: usize,
}

/// Service for ledger import
pub struct ImportService {
    options: ImportOptions,
}

impl ImportService {
    /// Create a new import service
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    /// Load a ledger from a file
    pub fn load_file(&self, path: &Path) -> CashflowResult<ImportResult> {
        if !path.exists() {
            return Err(CashflowError::Import(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| CashflowError::Import(format!("Failed to read file: {}", e)))?;

        log::info!("loading ledger from {}", path.display());
        self.load_bytes(&bytes)
    }

    /// Load a ledger from raw bytes
    pub fn load_bytes(&self, bytes: &[u8]) -> CashflowResult<ImportResult> {
        let (content, encoding) = decode_text(bytes);
        if encoding == TextEncoding::Latin1 {
            log::warn!("ledger is not valid UTF-8, decoded as Latin-1");
        }
        let mut result = self.load_str(&content)?;
        result.encoding = encoding;
        Ok(result)
    }

    /// Load a ledger from already-decoded text
    pub fn load_str(&self, content: &str) -> CashflowResult<ImportResult> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        if content.trim().is_empty() {
            return Err(CashflowError::Import("File is empty".into()));
        }

        let delimiter = match self.options.delimiter {
            Some(d) => d,
            None => self.detect_delimiter(content),
        };
        log::debug!("using delimiter {:?}", delimiter as char);

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .has_headers(true)
            .from_reader(content.as_bytes());

        let columns = normalize_headers(reader.headers()?);
        let mapping = self.resolve_mapping(&columns)?;
        log::debug!("column mapping {:?} for headers {:?}", mapping, columns);

        let mut transactions = Vec::new();
        let mut skipped_rows = 0;
        for (idx, record) in reader.records().enumerate() {
            // Row numbers as a user sees them in a spreadsheet: header is row 1
            let row = idx + 2;
            let record = record
                .map_err(|e| CashflowError::Import(format!("Error reading row {}: {}", row, e)))?;

            if record.iter().all(|field| field.trim().is_empty()) {
                skipped_rows += 1;
                continue;
            }

            let txn = parse_record(&record, &mapping)
                .map_err(|e| CashflowError::Validation(format!("Row {}: {}", row, e)))?;
            transactions.push(txn);
        }

        // Stable sort keeps file order within a day
        transactions.sort_by_key(|t| t.date);

        log::info!(
            "loaded {} transactions ({} blank rows skipped)",
            transactions.len(),
            skipped_rows
        );

        Ok(ImportResult {
            transactions,
            columns,
            delimiter,
            encoding: TextEncoding::Utf8,
            skipped_rows,
        })
    }

    /// Pick the first candidate delimiter whose header resolves every
    /// required column, else the one that splits the header into the most
    /// fields.
    fn detect_delimiter(&self, content: &str) -> u8 {
        let header_line = content.lines().next().unwrap_or("");
        let mut best = (CANDIDATE_DELIMITERS[0], 0usize);

        for delimiter in CANDIDATE_DELIMITERS {
            let mut reader = ReaderBuilder::new()
                .delimiter(delimiter)
                .has_headers(false)
                .from_reader(header_line.as_bytes());
            let Some(Ok(record)) = reader.records().next() else {
                continue;
            };
            let headers = normalize_headers(&record);
            if self.resolve_mapping(&headers).is_ok() {
                return delimiter;
            }
            if headers.len() > best.1 {
                best = (delimiter, headers.len());
            }
        }

        best.0
    }

    /// Map the required columns onto header positions
    pub fn resolve_mapping(&self, headers: &[String]) -> CashflowResult<ColumnMapping> {
        let overrides = &self.options.overrides;
        Ok(ColumnMapping {
            date_column: find_column(headers, "date", overrides.date.as_deref(), &DATE_ALIASES)?,
            category_column: find_column(
                headers,
                "category",
                overrides.category.as_deref(),
                &CATEGORY_ALIASES,
            )?,
            amount_column: find_column(
                headers,
                "amount",
                overrides.amount.as_deref(),
                &AMOUNT_ALIASES,
            )?,
        })
    }
}

impl Default for ImportService {
    fn default() -> Self {
        Self::new(ImportOptions::default())
    }
}

/// Decode bytes as UTF-8, falling back to Latin-1
pub fn decode_text(bytes: &[u8]) -> (String, TextEncoding) {
    match std::str::from_utf8(bytes) {
        Ok(s) => (s.to_string(), TextEncoding::Utf8),
        Err(_) => (
            bytes.iter().map(|&b| b as char).collect(),
            TextEncoding::Latin1,
        ),
    }
}

fn normalize_headers(record: &StringRecord) -> Vec<String> {
    record.iter().map(|h| h.trim().to_lowercase()).collect()
}

fn find_column(
    headers: &[String],
    column: &str,
    explicit: Option<&str>,
    aliases: &[&str],
) -> CashflowResult<usize> {
    if let Some(name) = explicit {
        let name = name.trim().to_lowercase();
        return headers
            .iter()
            .position(|h| *h == name)
            .ok_or_else(|| CashflowError::missing_column(&name, headers));
    }

    aliases
        .iter()
        .find_map(|alias| headers.iter().position(|h| h == alias))
        .ok_or_else(|| CashflowError::missing_column(column, headers))
}

fn parse_record(record: &StringRecord, mapping: &ColumnMapping) -> Result<Transaction, String> {
    let date_str = record
        .get(mapping.date_column)
        .ok_or_else(|| "Missing date value".to_string())?
        .trim();
    let date = parse_date(date_str)?;

    let category = record
        .get(mapping.category_column)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    let amount_str = record
        .get(mapping.amount_column)
        .ok_or_else(|| "Missing amount value".to_string())?
        .trim();
    let amount = parse_amount(amount_str)?;

    Ok(Transaction::new(date, category, amount))
}

/// Parse a date string using multiple format attempts
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    let date_formats = [
        "%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%d/%m/%Y", "%d/%m/%y", "%Y/%m/%d", "%m-%d-%Y",
        "%d-%m-%Y", "%d.%m.%Y",
    ];
    for format in date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date);
        }
    }

    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt.date());
        }
    }

    Err(format!("Could not parse date: '{}'", s))
}

/// Parse an amount string, handling currency symbols, thousands separators
/// and accounting-style parentheses
pub fn parse_amount(s: &str) -> Result<Money, String> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-' || *c == '(' || *c == ')')
        .collect();

    if cleaned.is_empty() {
        return Err(format!("Could not parse amount '{}'", s));
    }

    // Handle parentheses as negative (accounting format)
    let (is_negative, value) = if cleaned.starts_with('(') && cleaned.ends_with(')') {
        (true, &cleaned[1..cleaned.len() - 1])
    } else if let Some(stripped) = cleaned.strip_prefix('-') {
        (true, stripped)
    } else {
        (false, cleaned.as_str())
    };

    Money::parse(value)
        .map(|m| if is_negative { -m } else { m })
        .map_err(|e| format!("Could not parse amount '{}': {}", s, e))
}
