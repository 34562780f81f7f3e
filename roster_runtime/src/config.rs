//! Data layout configuration.
//!
//! Every path is relative to the data root. An absent file, or an absent
//! key, falls back to the stock layout:
//!
//! ```text
//! base/jury.json  base/spear.json  base/razor.json  base/academy.json
//! base/ota.json
//! logs/*.json
//! usernames.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use roster_engine::domain::Branch;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Directory holding the base snapshots.
    pub base_dir: PathBuf,
    /// CCA base snapshot stems, merged in this order.
    pub cca_base: Vec<String>,
    /// OTA base snapshot stems, merged in this order.
    pub ota_base: Vec<String>,
    /// Directory holding the event logs.
    pub logs_dir: PathBuf,
    /// Log file names in load order. Empty means every `*.json` in
    /// `logs_dir`, sorted by name.
    pub log_files: Vec<String>,
    /// Username history document.
    pub usernames: PathBuf,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("base"),
            cca_base: ["jury", "spear", "razor", "academy"]
                .map(String::from)
                .to_vec(),
            ota_base: vec!["ota".to_string()],
            logs_dir: PathBuf::from("logs"),
            log_files: Vec::new(),
            usernames: PathBuf::from("usernames.json"),
        }
    }
}

impl RosterConfig {
    /// Parse a TOML layout document.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a TOML layout file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Load `path` if it exists, otherwise use the stock layout.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn base_snapshots(&self, branch: Branch) -> &[String] {
        match branch {
            Branch::Cca => self.cca_base.as_slice(),
            Branch::Ota => self.ota_base.as_slice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_stock_layout() {
        let cfg = RosterConfig::from_toml("", Path::new("roster.toml")).unwrap();
        assert_eq!(cfg, RosterConfig::default());
        assert_eq!(
            cfg.base_snapshots(Branch::Cca),
            &["jury", "spear", "razor", "academy"]
        );
        assert_eq!(cfg.base_snapshots(Branch::Ota), &["ota"]);
    }

    #[test]
    fn keys_override_individually() {
        let cfg = RosterConfig::from_toml(
            "log_files = [\"2025_12.json\", \"2026_01.json\"]\nota_base = []\n",
            Path::new("roster.toml"),
        )
        .unwrap();
        assert_eq!(cfg.log_files, vec!["2025_12.json", "2026_01.json"]);
        assert!(cfg.ota_base.is_empty());
        assert_eq!(cfg.usernames, PathBuf::from("usernames.json"));
    }

    #[test]
    fn bad_toml_names_the_file() {
        let err = RosterConfig::from_toml("log_files = 3", Path::new("layout.toml")).unwrap_err();
        assert!(err.to_string().contains("layout.toml"));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = RosterConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, RosterConfig::default());
    }
}
