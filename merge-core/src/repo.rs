//! The explicit repository context threaded through every strategy. The
//! teacher's `the_repository`/thread-local singleton is deliberately not
//! reproduced here: every function that needs object-store or index access
//! takes a `&Repo` explicitly.

use crate::error::BitResult;
use crate::index::Index;
use crate::lockfile::Filelock;
use crate::odb::{LooseOdb, Odb};
use crate::path::RepoPath;
use anyhow::Context;
use std::path::{Path, PathBuf};

pub const INDEX_FILE_NAME: &str = "index";
pub const OBJECTS_DIR_NAME: &str = "objects";

pub struct Repo {
    pub workdir: PathBuf,
    pub git_dir: PathBuf,
    pub odb: LooseOdb,
}

impl Repo {
    pub fn open(workdir: impl Into<PathBuf>, git_dir: impl Into<PathBuf>) -> Self {
        let git_dir = git_dir.into();
        let odb = LooseOdb::new(git_dir.join(OBJECTS_DIR_NAME));
        Self { workdir: workdir.into(), git_dir, odb }
    }

    /// `<workdir>` plus a repo-relative path
    pub fn to_absolute_path(&self, path: &RepoPath) -> PathBuf {
        self.workdir.join(path.as_path())
    }

    pub fn index_path(&self) -> PathBuf {
        self.git_dir.join(INDEX_FILE_NAME)
    }

    /// acquires the index lock for the duration of `f`; on `Ok`, the new
    /// index is committed atomically (lockfile renamed into place); on
    /// `Err`, the lock file is discarded and the prior index is untouched.
    pub fn with_index_locked<R>(
        &self,
        f: impl FnOnce(&mut Index) -> BitResult<R>,
    ) -> BitResult<R> {
        let mut filelock = Filelock::<Index>::lock(self.index_path())?;
        match f(&mut filelock) {
            Ok(r) => Ok(r),
            Err(err) => {
                filelock.rollback();
                Err(err)
            }
        }
    }

    /// resolves a commit oid down to the tree it records, the only part of
    /// a commit the merge core ever needs.
    pub fn commit_tree(&self, commit_oid: crate::oid::Oid) -> BitResult<crate::oid::Oid> {
        Ok(self.odb.read_commit(commit_oid)?.tree)
    }

    /// recursively searches `path` and its ancestors for a `.git` directory,
    /// the way every strategy's CLI front end locates the repository it is
    /// meant to operate on before doing anything else.
    pub fn find(path: impl AsRef<Path>) -> BitResult<Self> {
        let start = path
            .as_ref()
            .canonicalize()
            .with_context(|| format!("failed to find repository in nonexistent path `{}`", path.as_ref().display()))?;
        let mut dir = start.as_path();
        loop {
            let git_dir = dir.join(".git");
            if git_dir.is_dir() {
                return Ok(Self::open(dir, git_dir));
            }
            match dir.parent() {
                Some(parent) => dir = parent,
                None => bail!("not a merge-core repository (or any of the parent directories): {}", start.display()),
            }
        }
    }
}

/// looks up `GITHEAD_<oid-hex>` for a human-readable name to use in
/// progress messages, falling back to the oid itself.
pub fn githead_name(oid: crate::oid::Oid) -> String {
    std::env::var(format!("GITHEAD_{}", oid)).unwrap_or_else(|_| oid.to_string())
}
