use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "qif2csv.toml";

pub const DEFAULT_SUFFIX: &str = ".csv";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where ledgers and lists are written (default: working directory).
    pub output_dir: Option<PathBuf>,
    pub convert: ConvertSection,
    pub extract: ExtractSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertSection {
    /// Appended to each account name to form its ledger file name.
    pub suffix: Option<String>,
    pub category_map: Option<PathBuf>,
    pub payee_map: Option<PathBuf>,
    pub account_map: Option<PathBuf>,
}

/// Output file names for the extracted lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractSection {
    pub categories: Option<PathBuf>,
    pub payees: Option<PathBuf>,
    pub tags: Option<PathBuf>,
    pub accounts: Option<PathBuf>,
}

/// Load `explicit` if given (it must exist), else `./qif2csv.toml` if present,
/// else built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let p = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !p.exists() {
                return Ok(Config::default());
            }
            p
        }
    };
    read_config(&path)
}

pub fn read_config(path: &Path) -> Result<Config> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg = toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qif2csv.toml");
        fs::write(
            &path,
            r#"
output_dir = "exports"

[convert]
suffix = "_ledger.csv"
payee_map = "maps/payees.txt"

[extract]
tags = "tags.txt"
"#,
        )
        .unwrap();

        let cfg = read_config(&path).unwrap();
        assert_eq!(cfg.output_dir, Some(PathBuf::from("exports")));
        assert_eq!(cfg.convert.suffix.as_deref(), Some("_ledger.csv"));
        assert_eq!(cfg.convert.payee_map, Some(PathBuf::from("maps/payees.txt")));
        assert_eq!(cfg.convert.category_map, None);
        assert_eq!(cfg.extract.tags, Some(PathBuf::from("tags.txt")));
        assert_eq!(cfg.extract.payees, None);
    }

    #[test]
    fn test_empty_config_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        fs::write(&path, "").unwrap();
        assert_eq!(read_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_explicit_missing_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn test_invalid_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[convert]\nsuffix = 12\n").unwrap();
        assert!(read_config(&path).is_err());
    }
}
