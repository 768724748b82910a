//! Line-oriented parsers for the QIF sections this tool understands.
//!
//! `blocks` finds section boundaries; `transactions` and `lists` turn the
//! text of one section into records. Every parser is a pure function of its
//! input text.

pub mod blocks;
pub mod lists;
pub mod transactions;

/// Value of a `<code><value>` field line, if `line` carries `code`.
pub(crate) fn field<'a>(line: &'a str, code: char) -> Option<&'a str> {
    line.strip_prefix(code)
}
