//! Data sources — where snapshots, logs and the username history come from.
//!
//! `DataSource` is the acquisition seam: the kernel only ever sees what a
//! source hands back. `DirectorySource` reads the stock on-disk layout.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use roster_engine::events::RosterEvent;
use roster_engine::history::IdentityHistory;
use roster_engine::state::BranchState;

use crate::config::RosterConfig;
use crate::snapshot_codec::{decode_history, decode_log, decode_snapshot, CodecError};

/// Failure to acquire one named source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to decode {}: {source}", .path.display())]
    Decode { path: PathBuf, source: CodecError },
}

/// Supplier of raw roster inputs.
pub trait DataSource {
    /// One base snapshot, by configured name.
    fn base_snapshot(&self, name: &str) -> Result<BranchState, SourceError>;

    /// Names of the logs to load, in load order.
    fn log_names(&self) -> Result<Vec<String>, SourceError>;

    /// One event log, records in file order.
    fn log(&self, name: &str) -> Result<Vec<RosterEvent>, SourceError>;

    fn identity_history(&self) -> Result<IdentityHistory, SourceError>;
}

/// Reads the roster layout below a data root directory.
pub struct DirectorySource {
    root: PathBuf,
    config: RosterConfig,
}

impl DirectorySource {
    pub fn new(root: &Path, config: RosterConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
        }
    }

    fn read<T>(
        &self,
        path: PathBuf,
        decode: impl FnOnce(&str) -> Result<T, CodecError>,
    ) -> Result<T, SourceError> {
        let text = fs::read_to_string(&path).map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?;
        decode(&text).map_err(|source| SourceError::Decode { path, source })
    }
}

impl DataSource for DirectorySource {
    fn base_snapshot(&self, name: &str) -> Result<BranchState, SourceError> {
        let path = self
            .root
            .join(&self.config.base_dir)
            .join(format!("{}.json", name));
        self.read(path, decode_snapshot)
    }

    fn log_names(&self) -> Result<Vec<String>, SourceError> {
        if !self.config.log_files.is_empty() {
            return Ok(self.config.log_files.clone());
        }

        let dir = self.root.join(&self.config.logs_dir);
        let entries = fs::read_dir(&dir).map_err(|source| SourceError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SourceError::Io {
                path: dir.clone(),
                source,
            })?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(".json") && entry.path().is_file() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn log(&self, name: &str) -> Result<Vec<RosterEvent>, SourceError> {
        let path = self.root.join(&self.config.logs_dir).join(name);
        self.read(path, decode_log)
    }

    fn identity_history(&self) -> Result<IdentityHistory, SourceError> {
        let path = self.root.join(&self.config.usernames);
        self.read(path, decode_history)
    }
}
