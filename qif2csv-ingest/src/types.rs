use std::fmt;

use qif2csv_core::{CategoryTag, normalize_date, split_category_and_tag};
use serde::{Deserialize, Serialize};

/// Register type named by an account's `!Type:` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    Bank,
    CCard,
}

impl AccountKind {
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "Bank" => Some(AccountKind::Bank),
            "CCard" => Some(AccountKind::CCard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Bank => "Bank",
            AccountKind::CCard => "CCard",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open byte range `[start, end)` into a [`crate::Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSpan {
    pub start: usize,
    pub end: usize,
}

impl BlockSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One `!Account` section followed by a Bank or CCard register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBlock {
    /// Name exactly as it appears on the header's `N` line.
    pub name: String,
    /// Value of the header's `T` line, kept for diagnostics.
    pub declared_type: String,
    pub kind: AccountKind,
    /// Register content: after the header, up to the next `!Type:` line.
    pub span: BlockSpan,
}

/// A Bank/CCard register entry. All values are trimmed; nothing else is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub month: String,
    pub day: String,
    pub year: String,
    pub amount1: String,
    pub amount2: String,
    pub cleared: String,
    pub number: Option<String>,
    pub payee: String,
    pub memo: Option<String>,
    /// Unsplit `L` value, e.g. `Food/Dining`.
    pub category: String,
}

impl TransactionRecord {
    /// `YYYY-MM-DD`
    pub fn date(&self) -> String {
        normalize_date(&self.month, &self.day, &self.year)
    }

    pub fn category_tag(&self) -> CategoryTag {
        split_category_and_tag(&self.category)
    }
}

/// Entry of the `!Type:Cat` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDef {
    pub name: String,
    pub description: String,
}

/// Entry of the `!Type:Tag` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDef {
    pub name: String,
    pub description: Option<String>,
}
