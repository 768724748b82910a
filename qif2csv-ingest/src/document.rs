//! The whole input file, held in memory with line endings normalized to `\n`.

use std::fs;
use std::path::Path;

use qif2csv_core::{QifError, Result};

use crate::types::BlockSpan;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn from_text(raw: &str) -> Self {
        Self {
            text: raw.replace("\r\n", "\n"),
        }
    }

    /// Read and normalize a QIF file. Invalid UTF-8 is replaced, not rejected.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| QifError::InputUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(&String::from_utf8_lossy(&bytes)))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn slice(&self, span: BlockSpan) -> &str {
        &self.text[span.start..span.end]
    }
}

/// One line of a `\n`-separated text and where it sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line<'a> {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset just past the terminating `\n` (or end of text).
    pub next: usize,
    /// Content without the terminator.
    pub text: &'a str,
}

pub(crate) fn lines(text: &str) -> Vec<Line<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let (content_end, next) = match text[start..].find('\n') {
            Some(i) => (start + i, start + i + 1),
            None => (text.len(), text.len()),
        };
        out.push(Line {
            start,
            next,
            text: &text[start..content_end],
        });
        start = next;
    }
    out
}
