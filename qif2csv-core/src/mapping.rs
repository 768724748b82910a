//! Old-value → new-value substitution tables.
//!
//! Mapping files hold one `<old>,<new>` rule per non-blank line; the first
//! comma separates the two sides and both are trimmed.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{QifError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    rules: BTreeMap<String, String>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse mapping file contents. `origin` is only used for error reporting.
    ///
    /// A later rule for the same key replaces the earlier one.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        let mut table = MappingTable::new();

        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let Some((old, new)) = line.split_once(',') else {
                return Err(QifError::MappingMalformed {
                    path: origin.to_path_buf(),
                    line_number: idx + 1,
                    line: line.to_string(),
                });
            };
            table.insert(old.trim(), new.trim());
        }

        Ok(table)
    }

    pub fn insert(&mut self, old: impl Into<String>, new: impl Into<String>) {
        self.rules.insert(old.into(), new.into());
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Exact-key lookup. An empty replacement counts as no mapping.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.rules
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Replace every occurrence of each key in `value` with its replacement.
    ///
    /// Rules run longest key first, ties in ascending key order, so the
    /// result does not depend on hash order. Each rule sees the output of the
    /// rules before it. Empty keys are ignored.
    pub fn apply(&self, value: &str) -> String {
        let mut ordered: Vec<(&String, &String)> =
            self.rules.iter().filter(|(k, _)| !k.is_empty()).collect();
        ordered.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut out = value.to_string();
        for (old, new) in ordered {
            if out.contains(old.as_str()) {
                out = out.replace(old.as_str(), new);
            }
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MappingTable {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = MappingTable::new();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn origin() -> &'static Path {
        Path::new("map.txt")
    }

    #[test]
    fn test_parse_splits_on_first_comma_and_trims() {
        let table = MappingTable::parse("  Amzn Mktp , Amazon, Inc \n\nSBUX,Starbucks\n", origin())
            .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("Amzn Mktp"), Some("Amazon, Inc"));
        assert_eq!(table.lookup("SBUX"), Some("Starbucks"));
    }

    #[test]
    fn test_parse_rejects_line_without_comma() {
        let err = MappingTable::parse("Good,Line\nbad line\n", origin()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MappingMalformed);
        match err {
            QifError::MappingMalformed { line_number, line, .. } => {
                assert_eq!(line_number, 2);
                assert_eq!(line, "bad line");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_later_rule_wins() {
        let table = MappingTable::parse("Gas,Fuel\nGas,Petrol\n", origin()).unwrap();
        assert_eq!(table.lookup("Gas"), Some("Petrol"));
    }

    #[test]
    fn test_lookup_ignores_empty_replacement() {
        let table: MappingTable = [("Checking", ""), ("Visa", "Credit Card")].into_iter().collect();
        assert_eq!(table.lookup("Checking"), None);
        assert_eq!(table.lookup("Visa"), Some("Credit Card"));
        assert_eq!(table.lookup("Savings"), None);
    }

    #[test]
    fn test_apply_replaces_substrings() {
        let table: MappingTable = [("Food", "Groceries")].into_iter().collect();
        assert_eq!(table.apply("Food"), "Groceries");
        assert_eq!(table.apply("Fast Food/Takeout"), "Fast Groceries/Takeout");
        assert_eq!(table.apply("Rent"), "Rent");
    }

    #[test]
    fn test_apply_runs_longest_key_first() {
        let table: MappingTable = [("Home", "House"), ("Home Depot", "Hardware")]
            .into_iter()
            .collect();
        assert_eq!(table.apply("Home Depot #42"), "Hardware #42");
        assert_eq!(table.apply("Home Insurance"), "House Insurance");
    }

    #[test]
    fn test_apply_ignores_empty_key() {
        let table: MappingTable = [("", "X")].into_iter().collect();
        assert_eq!(table.apply("abc"), "abc");
    }
}
