//! Component B: the per-path three-way merger.
//!
//! `merge_one` is the single place the per-path case analysis lives. Every
//! caller — the CLI `merge-one-file` tool, the driver walking a whole index,
//! the resolve and octopus strategies via the driver — goes through here.
//! It never acquires the index lock itself; the caller is expected to be
//! holding one already.

use super::{MergeOneOutcome, Side, Triple};
use crate::checkout::write_worktree_file;
use crate::error::BitResult;
use crate::index::Index;
use crate::mode::FileMode;
use crate::obj::Blob;
use crate::odb::Odb;
use crate::path::RepoPath;
use crate::repo::Repo;
use crate::xdiff::{self, ConflictStyle};
use std::fs;

/// runs the case analysis of §4.B against a single path and mutates `index`
/// (and, where the case calls for it, the working tree) accordingly.
pub fn merge_one(
    repo: &Repo,
    index: &mut Index,
    triple: Triple,
    path: &RepoPath,
) -> BitResult<MergeOneOutcome> {
    let Triple { orig, ours, theirs } = triple;

    // case 1: trivial delete — orig present, one side absent, the surviving
    // side (if any) unchanged from orig.
    if let Some(orig) = orig {
        if ours.is_none() || theirs.is_none() {
            let surviving = if ours.is_none() { theirs } else { ours };
            let is_trivial = match surviving {
                None => true,
                Some((oid, _)) => oid == orig.0,
            };
            if is_trivial {
                if let Some((_, mode)) = surviving {
                    if mode != orig.1 {
                        return Ok(MergeOneOutcome::Conflict(format!(
                            "{path}: deleted on one branch, permissions changed on the other ({} -> {})",
                            orig.1, mode
                        )));
                    }
                }
                remove_worktree_file_if_exists(repo, path)?;
                index.remove_entry(path);
                return Ok(MergeOneOutcome::Clean);
            }
        }
    }

    match (orig, ours, theirs) {
        // case 2: added on our side only
        (None, Some((oid, mode)), None) => {
            index.add_cacheinfo(mode, oid, path.clone())?;
            Ok(MergeOneOutcome::Clean)
        }
        // case 3: added on their side only
        (None, None, Some((oid, mode))) => {
            if repo.to_absolute_path(path).exists() {
                return Ok(MergeOneOutcome::Conflict(format!(
                    "{path}: untracked working tree file would be overwritten by merge"
                )));
            }
            index.add_cacheinfo(mode, oid, path.clone())?;
            let entry = index
                .get(path, crate::index::Stage::Merged)
                .unwrap_or_else(|| bug!("{path} not present in the cache immediately after being staged"));
            crate::checkout::checkout_entry(repo, entry)?;
            Ok(MergeOneOutcome::Clean)
        }
        // case 4: added identically on both sides
        (None, Some((our_oid, our_mode)), Some((their_oid, their_mode))) if our_oid == their_oid => {
            if our_mode != their_mode {
                return Ok(MergeOneOutcome::Conflict(format!(
                    "{path}: added identically but permissions conflict ({our_mode} vs {their_mode})"
                )));
            }
            index.add_cacheinfo(our_mode, our_oid, path.clone())?;
            let entry = index
                .get(path, crate::index::Stage::Merged)
                .unwrap_or_else(|| bug!("{path} not present in the cache immediately after being staged"));
            crate::checkout::checkout_entry(repo, entry)?;
            Ok(MergeOneOutcome::Clean)
        }
        // case 5: both sides touched the content — three-way text merge
        (orig, Some(ours), Some(theirs)) => merge_content(repo, index, orig, ours, theirs, path),
        // case 6: anything else this core doesn't model
        _ => Ok(MergeOneOutcome::Conflict(format!(
            "{path}: not handling case {}->{}->{}",
            describe(orig),
            describe(ours),
            describe(theirs)
        ))),
    }
}

fn describe(side: Side) -> String {
    match side {
        Some((oid, mode)) => format!("{mode}:{oid}"),
        None => "-".to_owned(),
    }
}

fn remove_worktree_file_if_exists(repo: &Repo, path: &RepoPath) -> BitResult<()> {
    let abs = repo.to_absolute_path(path);
    match fs::remove_file(&abs) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn merge_content(
    repo: &Repo,
    index: &mut Index,
    orig: Option<(crate::oid::Oid, FileMode)>,
    ours: (crate::oid::Oid, FileMode),
    theirs: (crate::oid::Oid, FileMode),
    path: &RepoPath,
) -> BitResult<MergeOneOutcome> {
    if !ours.1.is_mergeable_blob() || !theirs.1.is_mergeable_blob() {
        return Ok(MergeOneOutcome::Conflict(format!(
            "{path}: refusing to merge symbolic link or submodule contents"
        )));
    }
    if ours.1 != theirs.1 {
        return Ok(MergeOneOutcome::Conflict(format!(
            "{path}: permission conflict {}->{},{}",
            orig.map(|o| o.1.to_string()).unwrap_or_else(|| "-".to_owned()),
            ours.1,
            theirs.1
        )));
    }

    let base_bytes = match orig {
        Some((oid, _)) => repo.odb.read_blob(oid)?.bytes,
        None => Vec::new(),
    };
    let ours_bytes = repo.odb.read_blob(ours.0)?.bytes;
    let theirs_bytes = repo.odb.read_blob(theirs.0)?.bytes;

    match xdiff::merge(ConflictStyle::Merge, "ours", "theirs", &base_bytes, &ours_bytes, &theirs_bytes) {
        // status == 0 and an ancestor existed: clean three-way merge.
        Ok(merged) if orig.is_some() => {
            write_worktree_file(&repo.to_absolute_path(path), ours.1, &merged)?;
            let oid = repo.odb.write_blob(Blob::new(merged))?;
            index.resolve(path.clone(), ours.1, oid);
            Ok(MergeOneOutcome::Clean)
        }
        // status == 0 but there was no common ancestor: per the newer variant
        // this core follows (see DESIGN.md), still reported as a conflict —
        // neither the working tree nor the index are touched.
        Ok(_) => Ok(MergeOneOutcome::Conflict(format!(
            "{path}: content conflict (no common ancestor to merge against)"
        ))),
        // the xdiff-style merge itself produced overlapping hunks. Leave the
        // working tree and index exactly as they were for the user to
        // inspect via the conflicted stages.
        Err(_) => Ok(MergeOneOutcome::Conflict(format!("{path}: content conflict"))),
    }
}
