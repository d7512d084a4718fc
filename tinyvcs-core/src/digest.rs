//! SHA-1 content identity for stored objects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha1::{Digest as _, Sha1};

use crate::error::{Error, Result};

/// Length of a hex-encoded SHA-1 digest.
pub const DIGEST_HEX_LEN: usize = 40;

/// Number of leading hex characters used as the partition directory name.
pub const SHARD_LEN: usize = 2;

/// A lowercase hex-encoded SHA-1 digest identifying one stored object.
///
/// Deserialization routes through [`Digest::parse`], so a digest loaded from
/// a persisted index or commit record is always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest(String);

impl Digest {
    /// Compute the digest of arbitrary byte content. Pure and deterministic.
    pub fn of(content: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(content);
        Self(hex::encode(hasher.finalize()))
    }

    /// Parse a user-supplied digest string, normalizing to lowercase.
    pub fn parse(s: &str) -> Result<Self> {
        if s.len() != DIGEST_HEX_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidDigest(s.to_string()));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First two hex characters, naming the partition directory.
    pub fn prefix(&self) -> &str {
        &self.0[..SHARD_LEN]
    }

    /// Remaining 38 hex characters, naming the entry within the partition.
    pub fn suffix(&self) -> &str {
        &self.0[SHARD_LEN..]
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Digest {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}
