//! qif2csv-ingest: QIF document loading, block segmentation, and record parsers.

pub mod document;
pub mod parsers;
pub mod types;

pub use document::Document;
pub use parsers::{
    blocks::{find_account_blocks, find_named_block},
    lists::{parse_category_defs, parse_tag_defs},
    transactions::parse_transactions,
};
pub use types::{AccountBlock, AccountKind, BlockSpan, CategoryDef, TagDef, TransactionRecord};
