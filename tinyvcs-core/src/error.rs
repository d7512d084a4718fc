use std::path::PathBuf;

use thiserror::Error;

use crate::digest::Digest;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Object not found: {0}")]
    ObjectNotFound(Digest),

    #[error("Commit not found: {0}")]
    CommitNotFound(Digest),

    #[error("Invalid digest: {0}")]
    InvalidDigest(String),

    #[error("Corrupt repository state: {0}")]
    CorruptState(String),

    #[error("Commit chain cycle detected at {0}")]
    ChainCycle(Digest),

    #[error("Not a tinyvcs repository: {0}")]
    NotInitialized(PathBuf),
}
