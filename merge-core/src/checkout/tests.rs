use super::*;
use crate::index::{IndexEntry, Stage};
use crate::odb::Odb;
use crate::path::RepoPath;

#[test]
fn checkout_writes_blob_contents_with_recorded_mode() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repo::open(dir.path(), dir.path().join(".git"));
    let oid = repo.odb.write_blob(crate::obj::Blob::new(b"hello\n".to_vec())).unwrap();
    let entry = IndexEntry::new(RepoPath::from("a.txt"), FileMode::Exec, oid, Stage::Merged);

    checkout_entry(&repo, &entry).unwrap();

    let path = dir.path().join("a.txt");
    assert_eq!(fs::read(&path).unwrap(), b"hello\n");
    assert_eq!(fs::metadata(&path).unwrap().permissions().mode() & 0o777, 0o755);
}

#[test]
fn checkout_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repo::open(dir.path(), dir.path().join(".git"));
    fs::write(dir.path().join("a.txt"), b"stale").unwrap();

    let oid = repo.odb.write_blob(crate::obj::Blob::new(b"fresh\n".to_vec())).unwrap();
    let entry = IndexEntry::new(RepoPath::from("a.txt"), FileMode::Reg, oid, Stage::Merged);
    checkout_entry(&repo, &entry).unwrap();

    assert_eq!(fs::read(dir.path().join("a.txt")).unwrap(), b"fresh\n");
}
