use crate::error::BitResult;
use crate::io::ReadExt;
use crate::mode::FileMode;
use crate::oid::Oid;
use crate::path::RepoPath;
use crate::serialize::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::io::prelude::*;

/// A tree object: an ordered list of `(mode, path, oid)` entries. Entries
/// are kept sorted the way git orders them on disk — by name, but as if
/// directory entries had a trailing `/`, so `foo.txt` sorts before `foo/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new(mut entries: Vec<TreeEntry>) -> Self {
        entries.sort_by(TreeEntry::cmp_by_sort_path);
        Self { entries }
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.path.as_str() == name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

impl Serialize for Tree {
    fn serialize(&self, writer: &mut dyn Write) -> BitResult<()> {
        for entry in &self.entries {
            entry.serialize(writer)?;
        }
        Ok(())
    }
}

impl Deserialize for Tree {
    fn deserialize(reader: &mut impl BufRead) -> BitResult<Self> {
        let mut entries = vec![];
        loop {
            let mut peek = [0u8; 1];
            if reader.read(&mut peek)? == 0 {
                break;
            }
            entries.push(TreeEntry::deserialize_after_first_byte(peek[0], reader)?);
        }
        // already in on-disk order; avoid resorting (and thus masking a
        // malformed tree) by constructing the struct directly
        Ok(Self { entries })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: FileMode,
    pub path: RepoPathName,
    pub oid: Oid,
}

/// a single path *component* (no slashes), as stored in a tree entry —
/// distinct from [`RepoPath`] which is a full, possibly multi-component,
/// repository-relative path.
pub type RepoPathName = crate::path::RepoPath;

impl TreeEntry {
    pub fn new(mode: FileMode, path: RepoPathName, oid: Oid) -> Self {
        Self { mode, path, oid }
    }

    fn sort_key(&self) -> String {
        if self.mode.is_tree() { format!("{}/", self.path) } else { self.path.to_string() }
    }

    fn cmp_by_sort_path(a: &Self, b: &Self) -> Ordering {
        a.sort_key().cmp(&b.sort_key())
    }
}

impl Display for TreeEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}\t{}", self.mode, self.oid, self.path)
    }
}

impl Serialize for TreeEntry {
    fn serialize(&self, writer: &mut dyn Write) -> BitResult<()> {
        write!(writer, "{:o}", self.mode.as_u32())?;
        writer.write_all(b" ")?;
        writer.write_all(self.path.as_str().as_bytes())?;
        writer.write_all(b"\0")?;
        writer.write_all(self.oid.as_ref())?;
        Ok(())
    }
}

impl TreeEntry {
    fn deserialize_after_first_byte(first: u8, reader: &mut impl BufRead) -> BitResult<Self> {
        let mut mode_buf = vec![first];
        reader.read_until(b' ', &mut mode_buf)?;
        mode_buf.pop(); // trailing space
        let mode_str = std::str::from_utf8(&mode_buf)?;
        let mode = FileMode::new(u32::from_str_radix(mode_str, 8)?)
            .ok_or_else(|| anyhow!("invalid mode `{}` in tree entry", mode_str))?;

        let mut path_buf = vec![];
        reader.read_until(0, &mut path_buf)?;
        path_buf.pop(); // trailing NUL
        let path = RepoPathName::verify(std::str::from_utf8(&path_buf)?)?;

        let oid = reader.read_oid()?;
        Ok(Self { mode, path, oid })
    }
}

impl Deserialize for TreeEntry {
    fn deserialize(reader: &mut impl BufRead) -> BitResult<Self> {
        let mut first = [0u8; 1];
        reader.read_exact(&mut first)?;
        Self::deserialize_after_first_byte(first[0], reader)
    }
}
