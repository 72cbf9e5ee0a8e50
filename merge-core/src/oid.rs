//! Object identifiers.
//!
//! An [`Oid`] is an opaque, fixed-width, content address. The core never
//! computes one itself outside of tests/the loose object store collaborator
//! in [`crate::odb`] — blobs, trees and commits are addressed by the values
//! the caller (or the object database) hands back.

use crate::error::BitResult;
use sha1::{Digest, Sha1};
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

pub const OID_SIZE: usize = 20;

#[derive(PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct Oid([u8; OID_SIZE]);

impl Oid {
    /// the distinguished "absent" oid
    pub const NULL: Self = Self([0; OID_SIZE]);

    /// `git hash-object -t tree /dev/null`, i.e. the tree with no entries.
    /// precomputed so callers never need to round-trip an empty tree
    /// through the object database just to name it.
    pub const EMPTY_TREE: Self = Self([
        0x4b, 0x82, 0x5d, 0xc6, 0x42, 0xcb, 0x6e, 0xb9, 0xa0, 0x60, 0xe5, 0x4b, 0xf8, 0xd6, 0x92,
        0x88, 0xfb, 0xee, 0x49, 0x04,
    ]);

    /// `git hash-object /dev/null`, i.e. the empty blob.
    pub const EMPTY_BLOB: Self = Self([
        0xe6, 0x9d, 0xe2, 0x9b, 0xb2, 0xd1, 0xd6, 0x43, 0x4b, 0x8b, 0x29, 0xae, 0x77, 0x5a, 0xd8,
        0xc2, 0xe4, 0x8c, 0x53, 0x91,
    ]);

    pub fn new(bytes: [u8; OID_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn is_null(self) -> bool {
        self == Self::NULL
    }

    pub fn as_bytes(&self) -> &[u8; OID_SIZE] {
        &self.0
    }

    pub fn hash_bytes(bytes: impl AsRef<[u8]>) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(bytes);
        Self(hasher.finalize().into())
    }

    /// hash as git does for a loose object: `"{kind} {len}\0{contents}"`
    pub fn hash_object(kind: &str, contents: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(kind.as_bytes());
        hasher.update(b" ");
        hasher.update(contents.len().to_string().as_bytes());
        hasher.update(b"\0");
        hasher.update(contents);
        Self(hasher.finalize().into())
    }

    pub fn short(&self) -> String {
        self.to_string()[..7].to_owned()
    }
}

impl Default for Oid {
    fn default() -> Self {
        Self::NULL
    }
}

impl FromStr for Oid {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> BitResult<Self> {
        let s = s.trim();
        ensure!(s.len() == 40, "invalid oid `{}`: expected 40 hex chars, got {}", s, s.len());
        let bytes = hex::decode(s)?;
        Ok(Self(bytes.try_into().map_err(|_| anyhow!("invalid oid `{}`", s))?))
    }
}

impl AsRef<[u8]> for Oid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for Oid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Debug for Oid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
impl From<&str> for Oid {
    fn from(s: &str) -> Self {
        Self::from_str(s).unwrap()
    }
}
