//! Block segmentation.
//!
//! An account block starts with five consecutive header lines:
//!
//! ```text
//! !Account
//! NChecking
//! TBank
//! ^
//! !Type:Bank
//! ```
//!
//! and its register runs until the next `!Type:` line (any case, leading
//! whitespace allowed) or the end of the document.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use super::field;
use crate::document::{Document, Line, lines};
use crate::types::{AccountBlock, AccountKind, BlockSpan};

fn type_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*!Type:").expect("invalid type line regex"))
}

fn register_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^!Type:(?P<kind>Bank|CCard)\s*$").expect("invalid register marker regex")
    })
}

/// Every Bank/CCard account block, in document order.
///
/// No headers is a normal outcome and yields an empty vector.
pub fn find_account_blocks(doc: &Document) -> Vec<AccountBlock> {
    let text = doc.text();
    let lines = lines(text);
    let mut blocks = Vec::new();

    let mut i = 0;
    while i + 5 <= lines.len() {
        let Some((name, declared_type, kind)) = match_account_header(&lines[i..i + 5]) else {
            i += 1;
            continue;
        };

        let start = lines[i + 4].next;
        let end = next_type_line(&lines[i + 5..]).unwrap_or(text.len());
        debug!(account = name, %kind, start, end, "found account block");

        blocks.push(AccountBlock {
            name: name.to_string(),
            declared_type: declared_type.to_string(),
            kind,
            span: BlockSpan { start, end },
        });
        i += 5;
    }

    blocks
}

/// Span of the first `!Type:<type_name>` section (e.g. `Cat`, `Tag`).
pub fn find_named_block(doc: &Document, type_name: &str) -> Option<BlockSpan> {
    let text = doc.text();
    let lines = lines(text);
    let header = format!("!Type:{type_name}");

    let idx = lines.iter().position(|l| l.text == header)?;
    let start = lines[idx].next;
    let end = next_type_line(&lines[idx + 1..]).unwrap_or(text.len());
    debug!(block = type_name, start, end, "found named block");

    Some(BlockSpan { start, end })
}

fn match_account_header<'a>(header: &[Line<'a>]) -> Option<(&'a str, &'a str, AccountKind)> {
    let [account, name, declared, caret, marker] = header else {
        return None;
    };
    if !account.text.starts_with("!Account") || caret.text != "^" {
        return None;
    }
    let name = field(name.text, 'N')?;
    let declared = field(declared.text, 'T')?;
    let caps = register_marker_re().captures(marker.text)?;
    let kind = AccountKind::from_marker(&caps["kind"])?;
    Some((name, declared, kind))
}

fn next_type_line(rest: &[Line<'_>]) -> Option<usize> {
    rest.iter()
        .find(|l| type_line_re().is_match(l.text))
        .map(|l| l.start)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ACCOUNTS: &str = "!Option:AutoSwitch
!Account
NChecking
TBank
^
!Type:Bank
D3/5'23
U-20.00
T-20.00
C*
PCoffee Shop
LFood/Dining
^
!Account
NVisa
TCCard
^
!Type:CCard
D4/1'23
U-5.00
T-5.00
C
PBookstore
LBooks/Gifts
^
";

    #[test]
    fn test_finds_both_accounts_in_order() {
        let doc = Document::from_text(TWO_ACCOUNTS);
        let blocks = find_account_blocks(&doc);
        assert_eq!(blocks.len(), 2);

        assert_eq!(blocks[0].name, "Checking");
        assert_eq!(blocks[0].declared_type, "Bank");
        assert_eq!(blocks[0].kind, AccountKind::Bank);
        assert!(doc.slice(blocks[0].span).starts_with("D3/5'23\n"));

        assert_eq!(blocks[1].name, "Visa");
        assert_eq!(blocks[1].kind, AccountKind::CCard);
        assert!(doc.slice(blocks[1].span).starts_with("D4/1'23\n"));
        assert_eq!(blocks[1].span.end, doc.len());
    }

    #[test]
    fn test_block_ends_at_next_type_line() {
        let doc = Document::from_text(TWO_ACCOUNTS);
        let blocks = find_account_blocks(&doc);
        let first = doc.slice(blocks[0].span);
        // the second header's `!Account` lines precede its `!Type:` line
        assert!(first.ends_with("!Account\nNVisa\nTCCard\n^\n"));
        assert!(!first.contains("!Type:"));
        assert!(blocks[0].span.end <= blocks[1].span.start);
    }

    #[test]
    fn test_type_line_match_is_case_insensitive_and_allows_indent() {
        let doc = Document::from_text("!Account\nNCash\nTBank\n^\n!Type:Bank\nD1/1'20\n  !type:memorized\nD2/2'20\n");
        let blocks = find_account_blocks(&doc);
        assert_eq!(blocks.len(), 1);
        assert_eq!(doc.slice(blocks[0].span), "D1/1'20\n");
    }

    #[test]
    fn test_header_must_be_contiguous() {
        let doc = Document::from_text("!Account\nNCash\n\nTBank\n^\n!Type:Bank\nD1/1'20\n");
        assert!(find_account_blocks(&doc).is_empty());
    }

    #[test]
    fn test_other_register_types_are_ignored() {
        let doc = Document::from_text("!Account\nNBrokerage\nTInvst\n^\n!Type:Invst\nD1/1'20\n");
        assert!(find_account_blocks(&doc).is_empty());
    }

    #[test]
    fn test_no_headers_is_empty() {
        let doc = Document::from_text("just some text\nwith lines\n");
        assert!(find_account_blocks(&doc).is_empty());
        assert!(find_account_blocks(&Document::default()).is_empty());
    }

    #[test]
    fn test_named_block_spans_to_next_type_line() {
        let doc = Document::from_text("!Type:Cat\nNFood\nDGroceries\n^\n!Type:Tag\nNVacation\n^\n");
        let cat = find_named_block(&doc, "Cat").unwrap();
        assert_eq!(doc.slice(cat), "NFood\nDGroceries\n^\n");
        let tag = find_named_block(&doc, "Tag").unwrap();
        assert_eq!(doc.slice(tag), "NVacation\n^\n");
        assert!(find_named_block(&doc, "Class").is_none());
    }

    #[test]
    fn test_only_first_named_block_is_used() {
        let doc = Document::from_text("!Type:Tag\nNOne\n^\n!Type:Tag\nNTwo\n^\n");
        let tag = find_named_block(&doc, "Tag").unwrap();
        assert_eq!(doc.slice(tag), "NOne\n^\n");
    }
}
