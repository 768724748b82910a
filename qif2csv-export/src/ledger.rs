//! Convert: one CSV ledger per Bank/CCard account.
//!
//! Output columns:
//! Date,Merchant,Category,Account,Original Statement,Notes,Amount,Tags
//!
//! Values are never quoted; commas are stripped from every field instead.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use qif2csv_core::{MappingTable, QifError, Result, prepare_field};
use qif2csv_ingest::{AccountBlock, Document, TransactionRecord, find_account_blocks, parse_transactions};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::load_input;

pub const CSV_HEADER: [&str; 8] = [
    "Date",
    "Merchant",
    "Category",
    "Account",
    "Original Statement",
    "Notes",
    "Amount",
    "Tags",
];

/// A normalized output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerRow {
    pub date: String,
    pub merchant: String,
    pub category: String,
    pub account: String,
    /// Same value as `merchant`.
    pub original_statement: String,
    pub notes: String,
    pub amount: String,
    pub tags: String,
}

impl LedgerRow {
    /// Build a row from a parsed transaction.
    ///
    /// The category mapping is applied to the split category path, not to the
    /// raw `L` value. `amount2` and the cleared flag are not exported.
    pub fn from_transaction(
        txn: &TransactionRecord,
        account: &str,
        category_map: Option<&MappingTable>,
        payee_map: Option<&MappingTable>,
    ) -> Self {
        let split = txn.category_tag();

        let payee = match payee_map {
            Some(map) => map.apply(&txn.payee),
            None => txn.payee.clone(),
        };
        let category = match category_map {
            Some(map) => map.apply(&split.category),
            None => split.category,
        };
        let merchant = prepare_field(&payee);

        Self {
            date: txn.date(),
            original_statement: merchant.clone(),
            merchant,
            category: prepare_field(&category),
            account: prepare_field(account),
            notes: prepare_field(txn.memo.as_deref().unwrap_or("")),
            amount: prepare_field(&txn.amount1),
            tags: prepare_field(&split.tag),
        }
    }

    pub fn fields(&self) -> [&str; 8] {
        [
            self.date.as_str(),
            self.merchant.as_str(),
            self.category.as_str(),
            self.account.as_str(),
            self.original_statement.as_str(),
            self.notes.as_str(),
            self.amount.as_str(),
            self.tags.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Directory the ledgers are written into.
    pub output_dir: PathBuf,
    /// Appended to the raw account name to form each file name.
    pub suffix: String,
    pub category_map: Option<MappingTable>,
    pub payee_map: Option<MappingTable>,
    /// Exact-name lookup for the Account column.
    pub account_map: Option<MappingTable>,
}

/// One ledger file written by a convert run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountExport {
    pub account: String,
    pub output_account: String,
    pub path: PathBuf,
    pub rows: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConvertReport {
    pub input_readable: bool,
    pub accounts: Vec<AccountExport>,
}

impl ConvertReport {
    pub fn total_rows(&self) -> usize {
        self.accounts.iter().map(|a| a.rows).sum()
    }
}

/// Convert `input` into one ledger per account under `opts.output_dir`.
///
/// An unreadable input yields an empty report. Any write failure stops the
/// run; files already written are left in place.
pub fn convert_file(input: &Path, opts: &ConvertOptions) -> Result<ConvertReport> {
    let (doc, input_readable) = load_input(input);
    let accounts = convert_document(&doc, opts)?;
    Ok(ConvertReport {
        input_readable,
        accounts,
    })
}

pub fn convert_document(doc: &Document, opts: &ConvertOptions) -> Result<Vec<AccountExport>> {
    let blocks = find_account_blocks(doc);
    if blocks.is_empty() {
        warn!("no Bank or CCard account blocks found");
    }

    blocks
        .iter()
        .map(|block| convert_account(doc, block, opts))
        .collect()
}

fn convert_account(doc: &Document, block: &AccountBlock, opts: &ConvertOptions) -> Result<AccountExport> {
    let output_account = opts
        .account_map
        .as_ref()
        .and_then(|map| map.lookup(&block.name))
        .unwrap_or(&block.name)
        .to_string();

    let rows: Vec<LedgerRow> = parse_transactions(doc.slice(block.span))
        .iter()
        .map(|txn| {
            LedgerRow::from_transaction(
                txn,
                &output_account,
                opts.category_map.as_ref(),
                opts.payee_map.as_ref(),
            )
        })
        .collect();

    for row in &rows {
        if NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").is_err() {
            warn!(account = %block.name, date = %row.date, payee = %row.merchant, "transaction has an impossible date");
        }
    }

    let path = opts.output_dir.join(format!("{}{}", block.name, opts.suffix));
    write_ledger(&path, &rows)?;
    info!(
        account = %block.name,
        kind = %block.kind,
        rows = rows.len(),
        path = %path.display(),
        "ledger written"
    );

    Ok(AccountExport {
        account: block.name.clone(),
        output_account,
        path,
        rows: rows.len(),
    })
}

/// Create (or truncate) `path` and write the header plus `rows`.
pub fn write_ledger(path: &Path, rows: &[LedgerRow]) -> Result<()> {
    let fail = |err: csv::Error| QifError::output(path, err.into());

    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)
        .map_err(fail)?;

    wtr.write_record(CSV_HEADER).map_err(fail)?;
    for row in rows {
        wtr.write_record(row.fields()).map_err(fail)?;
    }
    wtr.flush().map_err(|err| QifError::output(path, err))?;

    debug!(path = %path.display(), rows = rows.len(), "flushed ledger");
    Ok(())
}
