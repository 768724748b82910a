//! Bank/CCard register parser.
//!
//! Each record is a fixed sequence of field lines:
//!
//! ```text
//! D3/5'23          date, M/D'YY (one space allowed before the day)
//! U-20.00          amount
//! T-20.00          amount
//! C*               cleared flag
//! N1042            check number (optional)
//! PCoffee Shop     payee
//! Mlatte           memo (optional)
//! LFood/Dining     category
//! ```
//!
//! Blank lines between fields are tolerated. A record missing a required
//! field is dropped and parsing restarts at the next `D` line after its start.

use std::sync::OnceLock;

use regex::Regex;

use super::field;
use crate::document::{Line, lines};
use crate::types::TransactionRecord;

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^D(?P<month>\d{1,2})/\s?(?P<day>\d{1,2})'(?P<year>\d{2})$")
            .expect("invalid date line regex")
    })
}

/// All complete transaction records in `text`, in document order.
pub fn parse_transactions(text: &str) -> Vec<TransactionRecord> {
    let lines = lines(text);
    let mut out = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        match parse_record(&lines, i) {
            Some((record, next)) => {
                out.push(record);
                i = next;
            }
            None => i += 1,
        }
    }

    out
}

/// Forward-only cursor over field lines.
pub(crate) struct FieldCursor<'l, 'a> {
    lines: &'l [Line<'a>],
    pos: usize,
    skip_blank_lines: bool,
}

impl<'l, 'a> FieldCursor<'l, 'a> {
    /// Cursor that steps over blank lines between fields.
    pub(crate) fn new(lines: &'l [Line<'a>], pos: usize) -> Self {
        Self {
            lines,
            pos,
            skip_blank_lines: true,
        }
    }

    /// Cursor that requires fields on consecutive lines.
    pub(crate) fn strict(lines: &'l [Line<'a>], pos: usize) -> Self {
        Self {
            lines,
            pos,
            skip_blank_lines: false,
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    fn skip_blank(&mut self) {
        if !self.skip_blank_lines {
            return;
        }
        while self.lines.get(self.pos).is_some_and(|l| l.text.is_empty()) {
            self.pos += 1;
        }
    }

    /// Consume the next field line if it carries `code`.
    pub(crate) fn take(&mut self, code: char) -> Option<&'a str> {
        self.take_if(|text| field(text, code))
    }

    /// Consume the next field line if `accept` recognizes it.
    pub(crate) fn take_if<T>(&mut self, accept: impl FnOnce(&'a str) -> Option<T>) -> Option<T> {
        self.skip_blank();
        let value = accept(self.lines.get(self.pos)?.text)?;
        self.pos += 1;
        Some(value)
    }
}

fn parse_record(lines: &[Line<'_>], start: usize) -> Option<(TransactionRecord, usize)> {
    let caps = date_re().captures(lines[start].text)?;
    let mut cur = FieldCursor::new(lines, start + 1);

    let amount1 = cur.take('U')?;
    let amount2 = cur.take('T')?;
    let cleared = cur.take('C')?;
    let number = cur.take('N');
    let payee = cur.take('P')?;
    let memo = cur.take('M');
    let category = cur.take('L')?;

    let record = TransactionRecord {
        month: caps["month"].trim().to_string(),
        day: caps["day"].trim().to_string(),
        year: caps["year"].trim().to_string(),
        amount1: amount1.trim().to_string(),
        amount2: amount2.trim().to_string(),
        cleared: cleared.trim().to_string(),
        number: number.map(|n| n.trim().to_string()),
        payee: payee.trim().to_string(),
        memo: memo.map(|m| m.trim().to_string()),
        category: category.trim().to_string(),
    };
    Some((record, cur.position()))
}
