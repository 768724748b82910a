//! Extract: sorted, deduplicated name lists for building mapping files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use qif2csv_core::{QifError, Result, dedupe_sorted, prepare_field};
use qif2csv_ingest::{
    Document, TransactionRecord, find_account_blocks, find_named_block, parse_category_defs,
    parse_tag_defs, parse_transactions,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::load_input;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Categories,
    Payees,
    Tags,
    Accounts,
}

impl ListKind {
    pub const ALL: [ListKind; 4] = [
        ListKind::Categories,
        ListKind::Payees,
        ListKind::Tags,
        ListKind::Accounts,
    ];

    pub fn default_file_name(&self) -> &'static str {
        match self {
            ListKind::Categories => "categoryList.txt",
            ListKind::Payees => "payeeList.txt",
            ListKind::Tags => "tagsList.txt",
            ListKind::Accounts => "AccountsList.txt",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ListKind::Categories => "categories",
            ListKind::Payees => "payees",
            ListKind::Tags => "tags",
            ListKind::Accounts => "accounts",
        }
    }
}

/// The distinct values of one kind found in `doc`.
///
/// - categories: `!Type:Cat` names plus each transaction's category path
/// - payees: each transaction's payee
/// - tags: `!Type:Tag` names plus each transaction's trailing category segment
/// - accounts: each Bank/CCard account name
pub fn distinct_values(doc: &Document, kind: ListKind) -> Vec<String> {
    let values = match kind {
        ListKind::Categories => {
            let mut values = category_list_names(doc);
            values.extend(from_transactions(doc, kind, |t| t.category_tag().category));
            values
        }
        ListKind::Payees => from_transactions(doc, kind, |t| t.payee.clone()),
        ListKind::Tags => {
            let mut values = tag_list_names(doc);
            values.extend(from_transactions(doc, kind, |t| t.category_tag().tag));
            values
        }
        ListKind::Accounts => find_account_blocks(doc)
            .into_iter()
            .map(|block| prepare_field(&block.name))
            .collect(),
    };
    dedupe_sorted(values)
}

fn category_list_names(doc: &Document) -> Vec<String> {
    let Some(span) = find_named_block(doc, "Cat") else {
        info!("no category block found");
        return Vec::new();
    };
    let defs = parse_category_defs(doc.slice(span));
    info!(entries = defs.len(), "read category block");
    defs.iter().map(|d| prepare_field(&d.name)).collect()
}

fn tag_list_names(doc: &Document) -> Vec<String> {
    let Some(span) = find_named_block(doc, "Tag") else {
        info!("no tag block found");
        return Vec::new();
    };
    let defs = parse_tag_defs(doc.slice(span));
    info!(entries = defs.len(), "read tag block");
    defs.iter().map(|d| prepare_field(&d.name)).collect()
}

fn from_transactions(
    doc: &Document,
    kind: ListKind,
    value: impl Fn(&TransactionRecord) -> String,
) -> Vec<String> {
    let blocks = find_account_blocks(doc);
    if blocks.is_empty() {
        warn!("no Bank or CCard account blocks found");
    }

    let mut out = Vec::new();
    for block in &blocks {
        let txns = parse_transactions(doc.slice(block.span));
        info!(account = %block.name, count = txns.len(), "{} extracted from account", kind.label());
        out.extend(txns.iter().map(|t| prepare_field(&value(t))));
    }
    out
}

#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub output_dir: PathBuf,
    /// Selected kinds and the file each is written to, relative to `output_dir`.
    pub lists: Vec<(ListKind, PathBuf)>,
}

impl ExtractOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            lists: Vec::new(),
        }
    }

    /// Select `kind`, written to its default file name.
    pub fn select(self, kind: ListKind) -> Self {
        self.select_as(kind, kind.default_file_name())
    }

    pub fn select_as(mut self, kind: ListKind, file: impl Into<PathBuf>) -> Self {
        self.lists.push((kind, file.into()));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListExport {
    pub kind: ListKind,
    pub path: PathBuf,
    pub entries: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractReport {
    pub input_readable: bool,
    pub lists: Vec<ListExport>,
}

/// Write every selected list for `input`. The first write failure stops the run.
pub fn extract_file(input: &Path, opts: &ExtractOptions) -> Result<ExtractReport> {
    if opts.lists.is_empty() {
        warn!("no list kinds selected, nothing to extract");
    }

    let (doc, input_readable) = load_input(input);
    let mut lists = Vec::with_capacity(opts.lists.len());

    for (kind, file) in &opts.lists {
        let values = distinct_values(&doc, *kind);
        let path = opts.output_dir.join(file);
        write_list(&path, &values)?;
        info!(kind = kind.label(), entries = values.len(), path = %path.display(), "list written");

        lists.push(ListExport {
            kind: *kind,
            path,
            entries: values.len(),
        });
    }

    Ok(ExtractReport {
        input_readable,
        lists,
    })
}

/// Create (or truncate) `path` and write one value per line.
pub fn write_list(path: &Path, values: &[String]) -> Result<()> {
    let fail = |err: std::io::Error| QifError::output(path, err);

    let mut out = BufWriter::new(File::create(path).map_err(fail)?);
    for value in values {
        writeln!(out, "{value}").map_err(fail)?;
    }
    out.flush().map_err(fail)?;

    debug!(path = %path.display(), entries = values.len(), "flushed list");
    Ok(())
}
