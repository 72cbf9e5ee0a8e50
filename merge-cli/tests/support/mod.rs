//! Shared scaffolding for the CLI integration tests: a real `<workdir>/.git`
//! layout on disk (so `Repo::find` discovers it the way it would in a real
//! checkout) plus the handful of "write a blob/commit and hand back its oid"
//! helpers every test needs.

use assert_cmd::Command;
use merge_core::mode::FileMode;
use merge_core::obj::{Blob, Commit, Obj, Tree, TreeEntry};
use merge_core::odb::Odb;
use merge_core::oid::Oid;
use merge_core::path::RepoPath;
use merge_core::repo::Repo;
use std::fs;
use tempfile::TempDir;

pub struct Workdir {
    pub repo: Repo,
    _dir: TempDir,
}

impl Workdir {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let git_dir = dir.path().join(".git");
        fs::create_dir_all(git_dir.join("objects")).unwrap();
        let repo = Repo::open(dir.path(), git_dir);
        Self { repo, _dir: dir }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.repo.workdir
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
        self.repo.odb.write(&Obj::Commit(Commit::new(tree, parents))).unwrap()
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

    pub fn bin(&self, name: &str) -> Command {
        let mut cmd = Command::cargo_bin(name).unwrap();
        cmd.current_dir(&self.repo.workdir);
        cmd
    }
}

pub const EMPTY: &str = "";
