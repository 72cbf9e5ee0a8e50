use criterion::{criterion_group, criterion_main, Criterion};
use merge_core::index::Index;
use merge_core::mode::FileMode;
use merge_core::odb::Odb;
use merge_core::path::RepoPath;
use merge_core::repo::Repo;
use merge_core::xdiff::{self, ConflictStyle};

fn fixture_repo() -> Repo {
    let workdir = tempfile::tempdir().unwrap().into_path();
    let git_dir = workdir.join(".git");
    std::fs::create_dir_all(git_dir.join("objects")).unwrap();
    Repo::open(workdir, git_dir)
}

/// writing a tree with one blob per path, the hot path every strategy goes
/// through at least once (component A's `write_tree`).
pub fn bench_write_tree(c: &mut Criterion) {
    let repo = fixture_repo();
    let mut index = Index::new();
    for i in 0..1000 {
        let oid = repo.odb.write_blob(merge_core::obj::Blob::new(format!("{}\n", i).into_bytes())).unwrap();
        let path = RepoPath::verify(format!("dir{}/file{}.txt", i % 20, i)).unwrap();
        index.add_cacheinfo(FileMode::Reg, oid, path).unwrap();
    }
    c.bench_function("index_write_tree_1000_entries", |b| b.iter(|| index.write_tree(&repo).unwrap()));
}

/// the per-path content merge (component B's hot loop over a large file),
/// run on a file with interleaved non-conflicting edits on both sides.
pub fn bench_content_merge(c: &mut Criterion) {
    let base: Vec<u8> = (0..2000).map(|i| format!("line {}\n", i)).collect::<String>().into_bytes();
    let ours: Vec<u8> =
        (0..2000).map(|i| if i % 7 == 0 { format!("ours {}\n", i) } else { format!("line {}\n", i) }).collect::<String>().into_bytes();
    let theirs: Vec<u8> =
        (0..2000).map(|i| if i % 11 == 0 { format!("theirs {}\n", i) } else { format!("line {}\n", i) }).collect::<String>().into_bytes();

    c.bench_function("xdiff_merge_2000_lines", |b| {
        b.iter(|| xdiff::merge(ConflictStyle::Merge, "ours", "theirs", &base, &ours, &theirs))
    });
}

criterion_group!(benches, bench_write_tree, bench_content_merge);
criterion_main!(benches);
