//! Shared test fixture: a tempdir-backed [`Repo`] wired up the way the CLI
//! tools expect, with a handful of shorthand helpers so individual test
//! modules don't each reinvent "write a blob and get its oid back".

use crate::mode::FileMode;
use crate::obj::{Blob, Commit, Tree, TreeEntry};
use crate::odb::Odb;
use crate::oid::Oid;
use crate::path::RepoPath;
use crate::repo::Repo;
use std::fs;
use tempfile::TempDir;

pub struct TestRepo {
    pub repo: Repo,
    _workdir: TempDir,
    _gitdir: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        let workdir = tempfile::tempdir().unwrap();
        let gitdir = tempfile::tempdir().unwrap();
        let repo = Repo::open(workdir.path(), gitdir.path());
        Self { repo, _workdir: workdir, _gitdir: gitdir }
    }

    pub fn blob(&self, bytes: &[u8]) -> Oid {
        self.repo.odb.write_blob(Blob::new(bytes.to_vec())).unwrap()
    }

    pub fn tree(&self, entries: &[(&str, FileMode, Oid)]) -> Oid {
        let entries = entries
            .iter()
            .map(|(name, mode, oid)| TreeEntry::new(*mode, RepoPath::verify(*name).unwrap(), *oid))
            .collect();
        self.repo.odb.write_tree(Tree::new(entries)).unwrap()
    }

    pub fn commit(&self, tree: Oid, parents: Vec<Oid>) -> Oid {
        self.repo.odb.write(&crate::obj::Obj::Commit(Commit::new(tree, parents))).unwrap()
    }

    pub fn write_file(&self, path: &str, bytes: &[u8]) {
        let abs = self.repo.workdir.join(path);
        if let Some(parent) = abs.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(abs, bytes).unwrap();
    }

    pub fn read_file(&self, path: &str) -> Vec<u8> {
        fs::read(self.repo.workdir.join(path)).unwrap()
    }

    pub fn file_exists(&self, path: &str) -> bool {
        self.repo.workdir.join(path).exists()
    }
}
