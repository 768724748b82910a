use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, QifError>;

/// Failures a conversion or extraction run can hit.
///
/// Structural misses (no account headers, malformed records) are not errors;
/// they show up as empty collections.
#[derive(Debug, Error)]
pub enum QifError {
    #[error("reading input file {}: {source}", .path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("reading mapping file {}: {source}", .path.display())]
    MappingUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid line {line_number} in mapping file {}: {line}", .path.display())]
    MappingMalformed {
        path: PathBuf,
        line_number: usize,
        line: String,
    },
    #[error("writing output file {}: {source}", .path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Coarse classification of a [`QifError`], for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InputUnreadable,
    MappingUnreadable,
    MappingMalformed,
    OutputUnwritable,
}

impl QifError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QifError::InputUnreadable { .. } => ErrorKind::InputUnreadable,
            QifError::MappingUnreadable { .. } => ErrorKind::MappingUnreadable,
            QifError::MappingMalformed { .. } => ErrorKind::MappingMalformed,
            QifError::OutputUnwritable { .. } => ErrorKind::OutputUnwritable,
        }
    }

    /// Whether the run has to stop. Only an unreadable input degrades to empty output.
    pub fn is_fatal(&self) -> bool {
        !matches!(self.kind(), ErrorKind::InputUnreadable)
    }

    pub fn output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        QifError::OutputUnwritable {
            path: path.into(),
            source,
        }
    }
}
