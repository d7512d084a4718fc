//! # tinyvcs-core
//!
//! Core library for tinyvcs - a minimal content-addressed version control model.
//!
//! This crate provides the fundamental storage and history operations:
//! content-addressable object storage, the staging index, the singly-linked
//! commit chain, and a line-level diff engine.

pub mod commit;
pub mod diff;
pub mod digest;
pub mod error;
pub mod index;
pub mod object;
pub mod repo;

pub use commit::{Commit, CommitChain, History};
pub use diff::{CommitDiff, DiffKind, DiffPart, FileChange, FileDiff};
pub use digest::Digest;
pub use error::{Error, Result};
pub use index::{StagingEntry, StagingIndex};
pub use object::ObjectStore;
pub use repo::Repository;
