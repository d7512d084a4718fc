//! Content-addressable object storage.
//!
//! Objects are written once under `objects/<hh>/<38-hex>` where `<hh>` is the
//! first two characters of the content digest. The store does not distinguish
//! blobs from serialized commit records, and never deletes anything.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use crate::digest::Digest;
use crate::error::{Error, Result};

pub struct ObjectStore {
    root: PathBuf,
}

impl ObjectStore {
    /// Create a handle over the `objects` directory of a repository.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Store content under its own digest and return that digest.
    ///
    /// Re-storing existing content overwrites with byte-identical data, so
    /// the operation is idempotent in effect.
    pub fn store(&self, content: &[u8]) -> Result<Digest> {
        let digest = Digest::of(content);
        let dir = self.root.join(digest.prefix());
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(digest.suffix()), content)?;
        debug!(%digest, bytes = content.len(), "stored object");
        Ok(digest)
    }

    /// Read back the content stored under `digest`.
    pub fn read(&self, digest: &Digest) -> Result<Vec<u8>> {
        match fs::read(self.object_path(digest)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(Error::ObjectNotFound(digest.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn contains(&self, digest: &Digest) -> bool {
        self.object_path(digest).is_file()
    }

    fn object_path(&self, digest: &Digest) -> PathBuf {
        self.root.join(digest.prefix()).join(digest.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, ObjectStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path().join("objects"));
        (dir, store)
    }

    #[test]
    fn test_store_and_read_roundtrip() {
        let (_dir, store) = store();

        let d1 = store.store(b"first content").unwrap();
        let d2 = store.store(b"second content").unwrap();

        assert_ne!(d1, d2);
        assert_eq!(store.read(&d1).unwrap(), b"first content");
        assert_eq!(store.read(&d2).unwrap(), b"second content");
    }

    #[test]
    fn test_store_is_idempotent() {
        let (_dir, store) = store();

        let d1 = store.store(b"same bytes").unwrap();
        let d2 = store.store(b"same bytes").unwrap();

        assert_eq!(d1, d2);
        assert_eq!(store.read(&d1).unwrap(), b"same bytes");
    }

    #[test]
    fn test_sharded_layout_on_disk() {
        let (dir, store) = store();

        let digest = store.store(b"laid out on disk").unwrap();
        let expected = dir
            .path()
            .join("objects")
            .join(digest.prefix())
            .join(digest.suffix());

        assert!(expected.is_file());
        assert!(store.contains(&digest));
    }

    #[test]
    fn test_read_missing_object() {
        let (_dir, store) = store();

        let absent = Digest::of(b"never stored");
        match store.read(&absent) {
            Err(Error::ObjectNotFound(d)) => assert_eq!(d, absent),
            other => panic!("expected ObjectNotFound, got {:?}", other.map(|_| ())),
        }
        assert!(!store.contains(&absent));
    }
}
