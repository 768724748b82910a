//! qif2csv-export: per-account CSV ledgers and distinct name lists from a QIF file.

pub mod ledger;
pub mod lists;
pub mod mapping_file;

use std::path::Path;

use qif2csv_ingest::Document;
use tracing::{info, warn};

pub use ledger::{AccountExport, CSV_HEADER, ConvertOptions, ConvertReport, LedgerRow, convert_file};
pub use lists::{ExtractOptions, ExtractReport, ListExport, ListKind, distinct_values, extract_file};
pub use mapping_file::{load_mapping, load_optional_mapping};

/// Load the input document. An unreadable file is logged and read as empty.
///
/// The flag is `false` when the file could not be read.
pub fn load_input(path: &Path) -> (Document, bool) {
    match Document::load(path) {
        Ok(doc) => {
            info!(path = %path.display(), bytes = doc.len(), "input file opened");
            (doc, true)
        }
        Err(err) => {
            warn!(error = %err, "continuing with empty input");
            (Document::default(), false)
        }
    }
}
