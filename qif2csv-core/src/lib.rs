//! qif2csv-core: I/O-free building blocks shared by the QIF ingest and export crates

pub mod category;
pub mod distinct;
pub mod error;
pub mod mapping;
pub mod normalize;

pub use category::{CategoryTag, split_category_and_tag};
pub use distinct::dedupe_sorted;
pub use error::{ErrorKind, QifError, Result};
pub use mapping::MappingTable;
pub use normalize::{normalize_date, prepare_field, strip_commas};
