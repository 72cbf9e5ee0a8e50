//! Component D: the tree-unpack collaborator. Materialises the union of
//! 1, 2 or 3+ trees into the index, doing the cheap, unambiguous
//! auto-resolutions itself (a path identical on every tree, a path only
//! ever present on one side) and leaving everything else as a stage 1/2/3
//! conflict for the merge driver to pick up.
//!
//! The spec treats this routine, and merge-base computation, as external
//! collaborators — real git delegates both to much larger subsystems
//! (`unpack-trees.c`, `commit-reach.c`). This module is a deliberately
//! compact stand-in, just enough for the strategies in [`crate::resolve`]
//! and [`crate::octopus`] to drive: no rename detection, no sparse-checkout,
//! no `.gitignore` handling (all explicit non-goals).

use crate::checkout::checkout_entry;
use crate::error::BitResult;
use crate::index::{Index, Stage};
use crate::mode::FileMode;
use crate::odb::Odb;
use crate::oid::Oid;
use crate::path::RepoPath;
use crate::repo::Repo;
use std::collections::BTreeMap;

/// options accepted by [`unpack_trees`], mirroring `unpack_trees_options`.
#[derive(Debug, Clone, Copy)]
pub struct UnpackOptions {
    /// merge with whatever is already in the index rather than clobbering
    /// it outright (always true for the strategies this crate implements).
    pub merge: bool,
    /// update the working tree to match the unpacked index.
    pub update: bool,
    /// allow more trivial auto-resolutions (e.g. adopting a side that
    /// matches one other tree even with three trees present).
    pub aggressive: bool,
    /// this is the repo's very first checkout: there is no prior committed
    /// state to treat as "locally modified".
    pub initial_checkout: bool,
}

impl Default for UnpackOptions {
    fn default() -> Self {
        Self { merge: true, update: true, aggressive: false, initial_checkout: false }
    }
}

/// flattens a tree into `path -> (oid, mode)`, recursing into subtrees.
/// blob-equivalent entries (everything but `FileMode::Tree`) become leaves.
pub fn flatten_tree(repo: &Repo, tree_oid: Oid) -> BitResult<BTreeMap<RepoPath, (Oid, FileMode)>> {
    let mut out = BTreeMap::new();
    flatten_into(repo, tree_oid, None, &mut out)?;
    Ok(out)
}

fn flatten_into(
    repo: &Repo,
    tree_oid: Oid,
    prefix: Option<&RepoPath>,
    out: &mut BTreeMap<RepoPath, (Oid, FileMode)>,
) -> BitResult<()> {
    if tree_oid == Oid::EMPTY_TREE {
        return Ok(());
    }
    let tree = repo.odb.read_tree(tree_oid)?;
    for entry in tree.entries() {
        let full = match prefix {
            Some(p) => RepoPath::verify(format!("{p}/{}", entry.path))?,
            None => RepoPath::verify(entry.path.as_str())?,
        };
        if entry.mode.is_tree() {
            flatten_into(repo, entry.oid, Some(&full), out)?;
        } else {
            out.insert(full, (entry.oid, entry.mode));
        }
    }
    Ok(())
}

/// dispatches on tree count, per §4.D: 1 tree is a one-way reset, 2 is a
/// two-way merge, 3+ a three-way merge against the last-but-one tree as
/// "head".
pub fn unpack_trees(repo: &Repo, index: &mut Index, trees: &[Oid], opts: UnpackOptions) -> BitResult<()> {
    match trees.len() {
        0 => bail!("unpack_trees called with no trees"),
        1 => unpack_one_way(repo, index, trees[0], opts),
        2 => unpack_two_way(repo, index, trees[0], trees[1], opts),
        _ => {
            let head_tree = trees[trees.len() - 2];
            let remote_tree = trees[trees.len() - 1];
            let base_trees = &trees[..trees.len() - 2];
            unpack_three_way(repo, index, base_trees, head_tree, remote_tree, opts)
        }
    }
}

/// `n = 1`: index becomes exactly the tree's contents, stage 0 throughout.
fn unpack_one_way(repo: &Repo, index: &mut Index, tree: Oid, opts: UnpackOptions) -> BitResult<()> {
    *index = Index::new();
    for (path, (oid, mode)) in flatten_tree(repo, tree)? {
        index.add_cacheinfo(mode, oid, path.clone())?;
        if opts.update {
            let entry = index
                .get(&path, Stage::Merged)
                .unwrap_or_else(|| bug!("{path} not present in the cache immediately after being staged"));
            checkout_entry(repo, entry)?;
        }
    }
    Ok(())
}

/// `n = 2`: a two-way merge from `old` to `new`. This core does not track
/// independently-dirty working-tree state (no `lstat` cache), so by the
/// time this is reached the caller (octopus's fast-forward branch) has
/// already established the working tree exactly matches `old` — adopting
/// `new` wholesale on every differing path is therefore both correct and
/// the simplest faithful rendition of git's "trivial" two-way merge.
fn unpack_two_way(repo: &Repo, index: &mut Index, old: Oid, new: Oid, opts: UnpackOptions) -> BitResult<()> {
    let old_entries = flatten_tree(repo, old)?;
    let new_entries = flatten_tree(repo, new)?;

    for path in old_entries.keys() {
        if !new_entries.contains_key(path) {
            index.remove_entry(path);
            if opts.update && !opts.initial_checkout {
                let abs = repo.to_absolute_path(path);
                let _ = std::fs::remove_file(abs);
            }
        }
    }

    for (path, (oid, mode)) in new_entries {
        let unchanged = old_entries.get(&path) == Some(&(oid, mode));
        if unchanged {
            index.add_cacheinfo(mode, oid, path)?;
            continue;
        }
        index.add_cacheinfo(mode, oid, path.clone())?;
        if opts.update {
            let entry = index
                .get(&path, Stage::Merged)
                .unwrap_or_else(|| bug!("{path} not present in the cache immediately after being staged"));
            checkout_entry(repo, entry)?;
        }
    }
    Ok(())
}

/// `n ≥ 3`: a three-way merge against a single base tree (the first of
/// `base_trees`; multiple simultaneous bases collapsing into one virtual
/// merge base is the "recursive merge"/"virtual ancestor" machinery the
/// spec explicitly excludes — this core only ever consults the first).
fn unpack_three_way(
    repo: &Repo,
    index: &mut Index,
    base_trees: &[Oid],
    head: Oid,
    remote: Oid,
    opts: UnpackOptions,
) -> BitResult<()> {
    let base = base_trees.first().copied().unwrap_or(Oid::EMPTY_TREE);
    let base_entries = flatten_tree(repo, base)?;
    let head_entries = flatten_tree(repo, head)?;
    let remote_entries = flatten_tree(repo, remote)?;

    *index = Index::new();

    let mut all_paths: Vec<&RepoPath> = base_entries.keys().collect();
    for path in head_entries.keys().chain(remote_entries.keys()) {
        if !all_paths.contains(&path) {
            all_paths.push(path);
        }
    }
    all_paths.sort();
    all_paths.dedup();

    for path in all_paths {
        let orig = base_entries.get(path).copied();
        let ours = head_entries.get(path).copied();
        let theirs = remote_entries.get(path).copied();

        if ours == theirs {
            // identical on both sides (including both absent): trivially
            // resolved, whichever is present (or neither).
            if let Some((oid, mode)) = ours {
                index.add_cacheinfo(mode, oid, path.clone())?;
            }
            continue;
        }

        if opts.aggressive {
            if ours == orig {
                // unchanged on our side: adopt theirs (including deletion).
                stage_trivial(repo, index, path, theirs, opts)?;
                continue;
            }
            if theirs == orig {
                // unchanged on their side: keep ours as-is.
                stage_trivial(repo, index, path, ours, opts)?;
                continue;
            }
        }

        if let Some((oid, mode)) = orig {
            index.add_conflicted_entry(crate::index::IndexEntry::new(path.clone(), mode, oid, Stage::Base));
        }
        if let Some((oid, mode)) = ours {
            index.add_conflicted_entry(crate::index::IndexEntry::new(path.clone(), mode, oid, Stage::Ours));
        }
        if let Some((oid, mode)) = theirs {
            index.add_conflicted_entry(crate::index::IndexEntry::new(path.clone(), mode, oid, Stage::Theirs));
        }
    }
    Ok(())
}

fn stage_trivial(
    repo: &Repo,
    index: &mut Index,
    path: &RepoPath,
    side: Option<(Oid, FileMode)>,
    opts: UnpackOptions,
) -> BitResult<()> {
    match side {
        Some((oid, mode)) => {
            index.add_cacheinfo(mode, oid, path.clone())?;
            if opts.update {
                let entry = index
                    .get(path, Stage::Merged)
                    .unwrap_or_else(|| bug!("{path} not present in the cache immediately after being staged"));
                checkout_entry(repo, entry)?;
            }
        }
        None => {
            index.remove_entry(path);
            if opts.update {
                let _ = std::fs::remove_file(repo.to_absolute_path(path));
            }
        }
    }
    Ok(())
}

/// `fast_forward(oids, aggressive)`: preloads the index, unpacks the given
/// trees per §4.D's n-way dispatch, and writes the result back under the
/// index lock. `oids[last]` doubles as the penultimate "head" tree when
/// three or more are given.
pub fn fast_forward(repo: &Repo, trees: &[Oid], aggressive: bool) -> BitResult<()> {
    ensure!(!trees.is_empty(), "fast_forward requires at least one tree");
    let opts = UnpackOptions { merge: true, update: true, aggressive, initial_checkout: false };

    repo.with_index_locked(|index| {
        unpack_trees(repo, index, trees, opts)
            .map_err(|err| anyhow::Error::from(crate::error::BitError::Infrastructure(err.to_string())))
    })
}
