//! Component C: the driver that walks an index populated by the unpack
//! collaborator ([`crate::unpack`]) looking for unresolved paths and
//! dispatching [`merge_one`] against each one's stage 1/2/3 triple.

use super::{merge_one, MergeOneOutcome, Triple};
use crate::error::BitResult;
use crate::index::{Index, Stage};
use crate::path::RepoPath;
use crate::repo::Repo;

/// options threaded through a whole-index merge (`git merge-index -o -a`'s
/// two flags).
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeAllOptions {
    /// `-o`/`--one-shot`: record a conflict and keep going instead of
    /// stopping at the first one.
    pub oneshot: bool,
    /// `-q`/`--quiet`: suppress the "merge program failed" diagnostic for
    /// each conflicted path.
    pub quiet: bool,
}

/// resolves the single `path`. If it is already at stage 0 this is a no-op
/// (treated as already merged). Otherwise collects whatever stage 1/2/3
/// entries exist for `path`, builds the triple, and invokes `merge_one`.
pub fn merge_path(repo: &Repo, index: &mut Index, path: &RepoPath) -> BitResult<MergeOneOutcome> {
    if index.get(path, Stage::Merged).is_some() {
        return Ok(MergeOneOutcome::Clean);
    }

    let triple = Triple {
        orig: index.get(path, Stage::Base).map(|e| (e.oid, e.mode)),
        ours: index.get(path, Stage::Ours).map(|e| (e.oid, e.mode)),
        theirs: index.get(path, Stage::Theirs).map(|e| (e.oid, e.mode)),
    };
    merge_one(repo, index, triple, path)
}

/// scans every path left with stage ≥ 1 entries and merges it, returning
/// the number of paths still conflicted afterwards. With `oneshot` unset
/// this stops and returns early as soon as one path conflicts; with it set,
/// every conflicted path is recorded and merging continues to the end.
pub fn merge_all(repo: &Repo, index: &mut Index, opts: MergeAllOptions) -> BitResult<usize> {
    let paths = index.conflicted_paths();
    let mut conflicts = 0usize;
    for path in paths {
        match merge_path(repo, index, &path)? {
            MergeOneOutcome::Clean => debug!("merged {path} cleanly"),
            MergeOneOutcome::Conflict(reason) => {
                if !opts.quiet {
                    warn!("merge program failed: {reason}");
                }
                conflicts += 1;
                if !opts.oneshot {
                    return Ok(conflicts);
                }
            }
        }
    }
    Ok(conflicts)
}
