//! Merge-base computation is an external collaborator here — real git's
//! version (`commit-reach.c`) computes generation-number-aware, potentially
//! multi-way "virtual" merge bases, machinery well beyond what octopus
//! folding needs (no recursive merge, no virtual merge bases).
//! [`MergeBaseFinder`] is the seam the octopus strategy calls through;
//! [`CommitGraphMergeBase`] is a plain BFS over `Commit::parents` — it
//! answers the single question octopus actually asks ("is this commit
//! already an ancestor of the folded set, and if not, where do the two
//! histories diverge") without attempting a general recursive merge.

use crate::error::BitResult;
use crate::odb::Odb;
use crate::oid::Oid;
use crate::repo::Repo;
use std::collections::{HashSet, VecDeque};

/// the merge-base collaborator octopus depends on. Kept as a trait so the
/// strategy code in [`crate::octopus`] doesn't hardcode a single traversal
/// algorithm.
pub trait MergeBaseFinder {
    /// every common ancestor of `a` and `b`, with no ancestor of another
    /// result in the set (git's "best common ancestors", simplified to a
    /// single shared base rather than the full virtual-merge-base set).
    fn merge_bases(&self, repo: &Repo, a: Oid, b: Oid) -> BitResult<Vec<Oid>>;
}

/// a simple BFS-based finder: walks both histories breadth-first and
/// returns the first commit reached by both, wrapped in a single-element
/// vec (or empty if the histories never converge).
pub struct CommitGraphMergeBase;

impl MergeBaseFinder for CommitGraphMergeBase {
    fn merge_bases(&self, repo: &Repo, a: Oid, b: Oid) -> BitResult<Vec<Oid>> {
        if a == b {
            return Ok(vec![a]);
        }

        let mut seen_from_a = HashSet::new();
        let mut seen_from_b = HashSet::new();
        let mut queue_a = VecDeque::from([a]);
        let mut queue_b = VecDeque::from([b]);
        seen_from_a.insert(a);
        seen_from_b.insert(b);

        while !queue_a.is_empty() || !queue_b.is_empty() {
            if let Some(found) = step(repo, &mut queue_a, &mut seen_from_a, &seen_from_b)? {
                return Ok(vec![found]);
            }
            if let Some(found) = step(repo, &mut queue_b, &mut seen_from_b, &seen_from_a)? {
                return Ok(vec![found]);
            }
        }
        Ok(vec![])
    }
}

fn step(
    repo: &Repo,
    queue: &mut VecDeque<Oid>,
    seen: &mut HashSet<Oid>,
    other_seen: &HashSet<Oid>,
) -> BitResult<Option<Oid>> {
    let Some(oid) = queue.pop_front() else {
        return Ok(None);
    };
    if other_seen.contains(&oid) {
        return Ok(Some(oid));
    }
    let commit = repo.odb.read_commit(oid)?;
    for parent in commit.parents {
        if seen.insert(parent) {
            if other_seen.contains(&parent) {
                return Ok(Some(parent));
            }
            queue.push_back(parent);
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestRepo;

    #[test]
    fn finds_shared_ancestor() {
        let t = TestRepo::new();
        let tree = t.tree(&[]);
        let root = t.commit(tree, vec![]);
        let a = t.commit(tree, vec![root]);
        let b = t.commit(tree, vec![root]);

        let bases = CommitGraphMergeBase.merge_bases(&t.repo, a, b).unwrap();
        assert_eq!(bases, vec![root]);
    }

    #[test]
    fn identical_commit_is_its_own_base() {
        let t = TestRepo::new();
        let tree = t.tree(&[]);
        let a = t.commit(tree, vec![]);

        let bases = CommitGraphMergeBase.merge_bases(&t.repo, a, a).unwrap();
        assert_eq!(bases, vec![a]);
    }

    #[test]
    fn one_is_ancestor_of_the_other() {
        let t = TestRepo::new();
        let tree = t.tree(&[]);
        let root = t.commit(tree, vec![]);
        let descendant = t.commit(tree, vec![root]);

        let bases = CommitGraphMergeBase.merge_bases(&t.repo, root, descendant).unwrap();
        assert_eq!(bases, vec![root]);
    }

    #[test]
    fn disconnected_histories_have_no_base() {
        let t = TestRepo::new();
        let tree = t.tree(&[]);
        let a = t.commit(tree, vec![]);
        let b = t.commit(tree, vec![]);

        let bases = CommitGraphMergeBase.merge_bases(&t.repo, a, b).unwrap();
        assert!(bases.is_empty());
    }
}
