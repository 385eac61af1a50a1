//! Snapshot persistence.
//!
//! The artifact is a single JSON array replaced whole on every cycle. The
//! write goes to a sibling temp file first and is renamed over the target,
//! so a concurrent reader sees either the previous or the new complete
//! snapshot, never a partial one.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::RankedEntry;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct SnapshotWriter {
    path: PathBuf,
}

impl SnapshotWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the entry list, creating the parent directory on demand. An
    /// empty list is a valid snapshot and is written as an empty array.
    pub fn write(&self, entries: &[RankedEntry]) -> Result<(), SnapshotError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        let json = serde_json::to_vec_pretty(entries)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Read the current snapshot back. Used by tests and downstream
    /// consumers sharing the crate.
    pub fn read(&self) -> Result<Vec<RankedEntry>, SnapshotError> {
        let bytes = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    // Sibling path so the rename stays on one filesystem.
    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}
