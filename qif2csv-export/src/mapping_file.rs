use std::fs;
use std::path::Path;

use qif2csv_core::{MappingTable, QifError, Result};
use tracing::{debug, info, warn};

/// Read a `<old>,<new>` mapping file.
///
/// A file that does not exist loads as an empty table. A line without a comma
/// fails the whole load.
pub fn load_mapping(path: &Path) -> Result<MappingTable> {
    if !path.exists() {
        warn!(path = %path.display(), "mapping file not found, using no rules");
        return Ok(MappingTable::new());
    }

    let text = fs::read_to_string(path).map_err(|source| QifError::MappingUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let table = MappingTable::parse(&text, path)?;

    info!(path = %path.display(), rules = table.len(), "mapping loaded");
    for (old, new) in table.iter() {
        debug!("  {old} -> {new}");
    }
    Ok(table)
}

pub fn load_optional_mapping(path: Option<&Path>) -> Result<Option<MappingTable>> {
    path.map(load_mapping).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use qif2csv_core::ErrorKind;

    #[test]
    fn test_loads_rules_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payees.txt");
        fs::write(&path, "SBUX #123, Starbucks\r\n\r\nAMZN,Amazon\n").unwrap();

        let table = load_mapping(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("SBUX #123"), Some("Starbucks"));
        assert_eq!(table.apply("AMZN Mktp"), "Amazon Mktp");
    }

    #[test]
    fn test_missing_file_is_empty_and_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let table = load_mapping(&path).unwrap();
        assert!(table.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_malformed_line_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, "Food,Groceries\nno comma here\n").unwrap();
        let err = load_mapping(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MappingMalformed);
        assert!(err.is_fatal());
    }

    #[test]
    fn test_optional_none() {
        assert!(load_optional_mapping(None).unwrap().is_none());
    }
}
