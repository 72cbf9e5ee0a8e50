//! Index primitives (component A): the four-stage staging area the merge
//! drivers read and write. Locked on-disk I/O for the index file itself is
//! an external collaborator ([`crate::lockfile::Filelock`]); this module
//! only defines what's stored and the operations that mutate it.

use crate::error::BitResult;
use crate::mode::FileMode;
use crate::obj::{Tree, TreeEntry};
use crate::odb::Odb;
use crate::oid::Oid;
use crate::path::RepoPath;
use crate::repo::Repo;
use crate::serialize::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Display, Formatter};
use std::io::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Stage {
    /// resolved, or never conflicted
    Merged = 0,
    /// common ancestor ("orig")
    Base = 1,
    /// our side
    Ours = 2,
    /// their side
    Theirs = 3,
}

impl Stage {
    fn from_u8(n: u8) -> BitResult<Self> {
        Ok(match n {
            0 => Self::Merged,
            1 => Self::Base,
            2 => Self::Ours,
            3 => Self::Theirs,
            _ => bail!("invalid index stage `{}`", n),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub path: RepoPath,
    pub mode: FileMode,
    pub oid: Oid,
    pub stage: Stage,
}

impl IndexEntry {
    pub fn new(path: RepoPath, mode: FileMode, oid: Oid, stage: Stage) -> Self {
        Self { path, mode, oid, stage }
    }

    fn key(&self) -> (RepoPath, Stage) {
        (self.path.clone(), self.stage)
    }
}

/// the set of paths left unresolved after a merge, surfaced to the caller
/// (and to `BitError::Conflict`) so a CLI front end can report them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conflicts(pub Vec<RepoPath>);

impl Display for Conflicts {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Automatic merge failed; fix conflicts and then commit the result.")?;
        for path in &self.0 {
            writeln!(f, "CONFLICT: {}", path)?;
        }
        Ok(())
    }
}

impl Conflicts {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

const INDEX_MAGIC: &[u8; 4] = b"MIDX";
const INDEX_VERSION: u32 = 1;

/// the four-stage staging area, ordered by `(path, stage)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    entries: BTreeMap<(RepoPath, Stage), IndexEntry>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn stage0_entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values().filter(|e| e.stage == Stage::Merged)
    }

    pub fn entries_for(&self, path: &RepoPath) -> Vec<&IndexEntry> {
        self.entries.values().filter(|e| &e.path == path).collect()
    }

    pub fn get(&self, path: &RepoPath, stage: Stage) -> Option<&IndexEntry> {
        self.entries.get(&(path.clone(), stage))
    }

    /// every path with at least one conflicted (non-merged) entry
    pub fn conflicted_paths(&self) -> Vec<RepoPath> {
        let mut paths: Vec<_> = self
            .entries
            .keys()
            .filter(|(_, stage)| *stage != Stage::Merged)
            .map(|(path, _)| path.clone())
            .collect();
        paths.dedup();
        paths
    }

    pub fn conflicts(&self) -> Conflicts {
        Conflicts(self.conflicted_paths())
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicted_paths().is_empty()
    }

    /// inserts a stage-0 entry for `path`, removing any stage 1..3 entries
    /// left over from a prior conflict at that path (spec invariant:
    /// "writing a stage-0 entry for a path supersedes all stage-1..3
    /// entries for that path").
    pub fn add_cacheinfo(&mut self, mode: FileMode, oid: Oid, path: RepoPath) -> BitResult<()> {
        self.remove_entry(&path);
        self.entries.insert((path.clone(), Stage::Merged), IndexEntry::new(path, mode, oid, Stage::Merged));
        Ok(())
    }

    /// removes all entries (any stage) for `path`
    pub fn remove_entry(&mut self, path: &RepoPath) {
        for stage in [Stage::Merged, Stage::Base, Stage::Ours, Stage::Theirs] {
            self.entries.remove(&(path.clone(), stage));
        }
    }

    /// records one side of an unresolved conflict at `path`; does not
    /// touch a coexisting stage-0 entry (the driver is responsible for
    /// removing it before calling this, per the supersede rule above).
    pub fn add_conflicted_entry(&mut self, entry: IndexEntry) {
        debug_assert_ne!(entry.stage, Stage::Merged);
        self.entries.insert(entry.key(), entry);
    }

    /// replaces whatever is at `path` (all stages) with a fresh stage-0
    /// entry — the "clean merge result" case.
    pub fn resolve(&mut self, path: RepoPath, mode: FileMode, oid: Oid) {
        self.remove_entry(&path);
        self.entries.insert((path.clone(), Stage::Merged), IndexEntry::new(path, mode, oid, Stage::Merged));
    }

    /// the "write-tree" collaborator component A leans on: folds every
    /// stage-0 entry into a nested tree hierarchy and writes it (and every
    /// intermediate subtree) to `repo`'s object database, returning the root
    /// tree's oid. Refuses outright if any path is still conflicted.
    pub fn write_tree(&self, repo: &Repo) -> BitResult<Oid> {
        if self.has_conflicts() {
            return Err(crate::error::BitError::Conflict(self.conflicts()).into());
        }
        let root = build_tree_node(self.stage0_entries());
        write_tree_node(repo, &root)
    }
}

/// an in-progress directory while folding flat index paths into a tree.
#[derive(Default)]
struct TreeNode {
    blobs: Vec<(String, FileMode, Oid)>,
    subdirs: HashMap<String, TreeNode>,
}

fn build_tree_node<'a>(entries: impl Iterator<Item = &'a IndexEntry>) -> TreeNode {
    let mut root = TreeNode::default();
    for entry in entries {
        let mut node = &mut root;
        let components: Vec<&str> = entry.path.as_str().split('/').collect();
        let (file_name, dirs) = components.split_last().expect("path has at least one component");
        for dir in dirs {
            node = node.subdirs.entry((*dir).to_owned()).or_default();
        }
        node.blobs.push((file_name.to_string(), entry.mode, entry.oid));
    }
    root
}

fn write_tree_node(repo: &Repo, node: &TreeNode) -> BitResult<Oid> {
    let mut entries = Vec::with_capacity(node.blobs.len() + node.subdirs.len());
    for (name, mode, oid) in &node.blobs {
        entries.push(TreeEntry::new(*mode, RepoPath::verify(name)?, *oid));
    }
    for (name, subdir) in &node.subdirs {
        let oid = write_tree_node(repo, subdir)?;
        entries.push(TreeEntry::new(FileMode::Tree, RepoPath::verify(name)?, oid));
    }
    repo.odb.write_tree(Tree::new(entries))
}

impl Serialize for Index {
    fn serialize(&self, writer: &mut dyn Write) -> BitResult<()> {
        writer.write_all(INDEX_MAGIC)?;
        writer.write_all(&INDEX_VERSION.to_be_bytes())?;
        writer.write_all(&(self.entries.len() as u32).to_be_bytes())?;
        for entry in self.entries.values() {
            let path_bytes = entry.path.as_str().as_bytes();
            writer.write_all(&(path_bytes.len() as u32).to_be_bytes())?;
            writer.write_all(path_bytes)?;
            writer.write_all(&entry.mode.as_u32().to_be_bytes())?;
            writer.write_all(entry.oid.as_ref())?;
            writer.write_all(&[entry.stage as u8])?;
        }
        Ok(())
    }
}

impl Deserialize for Index {
    fn deserialize(reader: &mut impl BufRead) -> BitResult<Self> {
        use crate::io::ReadExt;

        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        ensure_eq!(&magic, INDEX_MAGIC, "not an index file (bad magic)");
        let version = reader.read_u32()?;
        ensure_eq!(version, INDEX_VERSION, "unsupported index version `{}`", version);
        let count = reader.read_u32()?;

        let mut entries = BTreeMap::new();
        for _ in 0..count {
            let path_len = reader.read_u32()? as usize;
            let mut path_bytes = vec![0u8; path_len];
            reader.read_exact(&mut path_bytes)?;
            let path = RepoPath::verify(std::str::from_utf8(&path_bytes)?)?;
            let mode = FileMode::new(reader.read_u32()?)
                .ok_or_else(|| anyhow!("invalid mode in index entry for `{}`", path))?;
            let oid = reader.read_oid()?;
            let stage = Stage::from_u8(reader.read_u8()?)?;
            let entry = IndexEntry::new(path, mode, oid, stage);
            entries.insert(entry.key(), entry);
        }
        Ok(Self { entries })
    }
}
