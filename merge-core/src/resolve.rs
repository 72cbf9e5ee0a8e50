//! Component E: the resolve strategy — a three-way merge of one head
//! against one remote, relative to one or more bases.

use crate::error::{BitError, BitResult};
use crate::merge::{merge_all, MergeAllOptions};
use crate::oid::Oid;
use crate::repo::Repo;
use crate::unpack::{unpack_trees, UnpackOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    Clean,
    Conflicts,
}

impl ResolveOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            ResolveOutcome::Clean => 0,
            ResolveOutcome::Conflicts => 1,
        }
    }
}

/// `resolve(bases, head, remote)`: unpack `bases... head remote` into the
/// index, try a whole-tree write; if that fails because of conflicts, fall
/// back to the per-path merger over whatever's left.
pub fn resolve(repo: &Repo, bases: &[Oid], head: Oid, remote: Oid) -> BitResult<ResolveOutcome> {
    if bases.is_empty() {
        return Err(BitError::Refused("refusing to perform a baseless merge".into()).into());
    }

    let base_trees: Vec<Oid> =
        bases.iter().map(|&b| repo.commit_tree(b)).collect::<BitResult<_>>()?;
    let head_tree = repo.commit_tree(head)?;
    let remote_tree = repo.commit_tree(remote)?;

    let mut trees = base_trees;
    trees.push(head_tree);
    trees.push(remote_tree);

    let opts = UnpackOptions { merge: true, update: true, aggressive: true, initial_checkout: false };
    fast_forward_with_opts(repo, &trees, opts)?;

    info!("Trying simple merge.");

    let outcome = repo.with_index_locked(|index| {
        match index.write_tree(repo) {
            Ok(_tree) => Ok(ResolveOutcome::Clean),
            Err(_) => {
                info!("Simple merge failed, trying Automatic merge.");
                let conflicts = merge_all(repo, index, MergeAllOptions { oneshot: true, quiet: false })?;
                if conflicts > 0 {
                    Ok(ResolveOutcome::Conflicts)
                } else {
                    Ok(ResolveOutcome::Clean)
                }
            }
        }
    })?;

    Ok(outcome)
}

/// unpacks `trees` under the index lock and commits the result, same as
/// [`crate::unpack::fast_forward`] but not going through its own helper —
/// resolve's step 6/7 need a second, separate lock acquisition afterwards
/// to attempt the tree write, so there is no single call that covers both.
fn fast_forward_with_opts(repo: &Repo, trees: &[Oid], opts: UnpackOptions) -> BitResult<()> {
    repo.with_index_locked(|index| {
        unpack_trees(repo, index, trees, opts)
            .map_err(|err| anyhow::Error::from(BitError::Infrastructure(err.to_string())))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::FileMode;
    use crate::test_utils::TestRepo;

    #[test]
    fn baseless_merge_is_refused() {
        let t = TestRepo::new();
        let tree = t.tree(&[]);
        let head = t.commit(tree, vec![]);
        let remote = t.commit(tree, vec![]);

        let err = resolve(&t.repo, &[], head, remote).unwrap_err();
        assert!(err.to_string().contains("baseless"));
    }

    #[test]
    fn identical_head_and_remote_resolve_cleanly() {
        let t = TestRepo::new();
        let base_blob = t.blob(b"base\n");
        let base_tree = t.tree(&[("a.txt", FileMode::Reg, base_blob)]);
        let base = t.commit(base_tree, vec![]);
        let head = t.commit(base_tree, vec![base]);
        let remote = t.commit(base_tree, vec![base]);

        let outcome = resolve(&t.repo, &[base], head, remote).unwrap();
        assert_eq!(outcome, ResolveOutcome::Clean);
    }

    #[test]
    fn diverging_edits_yield_conflicts() {
        let t = TestRepo::new();
        let base_blob = t.blob(b"base\n");
        let base_tree = t.tree(&[("a.txt", FileMode::Reg, base_blob)]);
        let base = t.commit(base_tree, vec![]);

        let ours_blob = t.blob(b"ours change\n");
        let theirs_blob = t.blob(b"theirs change\n");
        let head_tree = t.tree(&[("a.txt", FileMode::Reg, ours_blob)]);
        let remote_tree = t.tree(&[("a.txt", FileMode::Reg, theirs_blob)]);
        let head = t.commit(head_tree, vec![base]);
        let remote = t.commit(remote_tree, vec![base]);
        t.write_file("a.txt", b"ours change\n");

        let outcome = resolve(&t.repo, &[base], head, remote).unwrap();
        assert_eq!(outcome, ResolveOutcome::Conflicts);
    }

    #[test]
    fn non_conflicting_edits_to_different_paths_resolve_cleanly() {
        let t = TestRepo::new();
        let base_a = t.blob(b"a\n");
        let base_b = t.blob(b"b\n");
        let base_tree = t.tree(&[("a.txt", FileMode::Reg, base_a), ("b.txt", FileMode::Reg, base_b)]);
        let base = t.commit(base_tree, vec![]);

        let ours_a = t.blob(b"a changed by us\n");
        let theirs_b = t.blob(b"b changed by them\n");
        let head_tree = t.tree(&[("a.txt", FileMode::Reg, ours_a), ("b.txt", FileMode::Reg, base_b)]);
        let remote_tree = t.tree(&[("a.txt", FileMode::Reg, base_a), ("b.txt", FileMode::Reg, theirs_b)]);
        let head = t.commit(head_tree, vec![base]);
        let remote = t.commit(remote_tree, vec![base]);
        t.write_file("a.txt", b"a changed by us\n");
        t.write_file("b.txt", b"b\n");

        let outcome = resolve(&t.repo, &[base], head, remote).unwrap();
        assert_eq!(outcome, ResolveOutcome::Clean);
        assert_eq!(t.read_file("a.txt"), b"a changed by us\n");
        assert_eq!(t.read_file("b.txt"), b"b changed by them\n");
    }
}
