//! The repository facade composing the object store, staging index, and
//! commit chain behind one explicit handle.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::commit::{Commit, CommitChain, History};
use crate::diff::{self, CommitDiff, FileChange, FileDiff};
use crate::digest::Digest;
use crate::error::{Error, Result};
use crate::index::{StagingEntry, StagingIndex};
use crate::object::ObjectStore;

/// Default repository directory name, relative to the working directory.
pub const REPO_DIR: &str = ".tinyvcs";

const OBJECTS_DIR: &str = "objects";
const HEAD_FILE: &str = "HEAD";
const INDEX_FILE: &str = "index";

pub struct Repository {
    root: PathBuf,
    store: ObjectStore,
    index: StagingIndex,
    chain: CommitChain,
}

impl Repository {
    /// Bootstrap the on-disk layout at `root` and return a handle.
    ///
    /// Idempotent: existing files are left untouched, so re-running init on
    /// a live repository loses nothing.
    pub fn init(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join(OBJECTS_DIR))?;
        let head = root.join(HEAD_FILE);
        if !head.exists() {
            fs::write(&head, "")?;
        }
        let index = root.join(INDEX_FILE);
        if !index.exists() {
            fs::write(&index, "[]")?;
        }
        info!(root = %root.display(), "initialized repository");
        Ok(Self::assemble(root))
    }

    /// Whether the full repository layout exists at `root`.
    pub fn is_initialized(root: impl AsRef<Path>) -> bool {
        let root = root.as_ref();
        root.join(OBJECTS_DIR).is_dir()
            && root.join(HEAD_FILE).is_file()
            && root.join(INDEX_FILE).is_file()
    }

    /// Open an existing repository at `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !Self::is_initialized(&root) {
            return Err(Error::NotInitialized(root));
        }
        Ok(Self::assemble(root))
    }

    fn assemble(root: PathBuf) -> Self {
        Self {
            store: ObjectStore::new(root.join(OBJECTS_DIR)),
            index: StagingIndex::new(root.join(INDEX_FILE)),
            chain: CommitChain::new(root.join(HEAD_FILE)),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stage one file: store its content as a blob and append an index entry.
    ///
    /// A read failure aborts before any staging mutation.
    pub fn add(&self, file: impl AsRef<Path>) -> Result<Digest> {
        let file = file.as_ref();
        let content = fs::read(file).map_err(|source| Error::FileRead {
            path: file.to_path_buf(),
            source,
        })?;
        let digest = self.store.store(&content)?;
        self.index.append(&file.to_string_lossy(), digest.clone())?;
        debug!(path = %file.display(), %digest, "staged file");
        Ok(digest)
    }

    /// Commit the current stage. An empty stage produces a commit with an
    /// empty file list.
    pub fn commit(&self, message: &str) -> Result<Digest> {
        self.chain.commit(&self.store, &self.index, message)
    }

    /// The staged entries, in staging order.
    pub fn staged(&self) -> Result<Vec<StagingEntry>> {
        self.index.snapshot()
    }

    pub fn current_head(&self) -> Result<Option<Digest>> {
        self.chain.current_head()
    }

    /// Walk history from `HEAD` to the root commit, newest first.
    pub fn history(&self) -> Result<History<'_>> {
        self.chain.history(&self.store)
    }

    pub fn get_commit(&self, digest: &Digest) -> Result<Commit> {
        CommitChain::get_commit(&self.store, digest)
    }

    /// Build the per-file diff report of a commit against its parent.
    ///
    /// Files present in both commits get a line diff; files absent from the
    /// parent are reported as newly introduced; a parentless commit reports
    /// every file as part of the first commit.
    pub fn show_commit_diff(&self, digest: &Digest) -> Result<CommitDiff> {
        let commit = self.get_commit(digest)?;
        let parent = match &commit.parent {
            Some(parent) => Some(CommitChain::get_commit(&self.store, parent)?),
            None => None,
        };

        let mut files = Vec::with_capacity(commit.files.len());
        for entry in &commit.files {
            let content = self.read_text(&entry.hash)?;
            let change = match &parent {
                None => FileChange::FirstCommit,
                Some(parent) => match parent.files.iter().find(|f| f.path == entry.path) {
                    Some(old) => {
                        let old_content = self.read_text(&old.hash)?;
                        FileChange::Modified(diff::diff_lines(&old_content, &content))
                    }
                    None => FileChange::NewFile,
                },
            };
            files.push(FileDiff {
                path: entry.path.clone(),
                content,
                change,
            });
        }

        Ok(CommitDiff {
            digest: digest.clone(),
            commit,
            files,
        })
    }

    fn read_text(&self, digest: &Digest) -> Result<String> {
        Ok(String::from_utf8_lossy(&self.store.read(digest)?).into_owned())
    }
}
