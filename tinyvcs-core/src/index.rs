//! The staging index: an ordered, persisted list of pending adds.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::digest::Digest;
use crate::error::{Error, Result};

/// One staged file: the path as given to `add` and the digest of its content
/// at the time it was staged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingEntry {
    pub path: String,
    pub hash: Digest,
}

/// Ordered list of staged entries, persisted as a single JSON file.
///
/// Paths are not deduplicated: adding the same path twice keeps both entries,
/// each with the digest the content had when it was added. Every append
/// rewrites the whole file.
pub struct StagingIndex {
    path: PathBuf,
}

impl StagingIndex {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn append(&self, file_path: &str, digest: Digest) -> Result<()> {
        let mut entries = self.load()?;
        entries.push(StagingEntry {
            path: file_path.to_string(),
            hash: digest,
        });
        self.persist(&entries)
    }

    /// The current persisted list, in staging order.
    pub fn snapshot(&self) -> Result<Vec<StagingEntry>> {
        self.load()
    }

    /// Reset to an empty list. Called only as part of a successful commit.
    pub fn clear(&self) -> Result<()> {
        self.persist(&[])
    }

    fn load(&self) -> Result<Vec<StagingEntry>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // init creates this file, so a missing index is corruption,
                // not an empty stage
                return Err(Error::CorruptState(format!(
                    "staging index missing at {}",
                    self.path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::CorruptState(format!("staging index unreadable: {}", e)))
    }

    fn persist(&self, entries: &[StagingEntry]) -> Result<()> {
        fs::write(&self.path, serde_json::to_vec(entries)?)?;
        Ok(())
    }
}
