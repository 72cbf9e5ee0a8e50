//! Component F: the octopus strategy — folds an ordered list of remotes
//! into a single head one at a time, fast-forwarding when possible and
//! falling back to (D)+(C) otherwise, refusing to carry a conflict past
//! the remote that produced it.

use crate::error::{BitError, BitResult};
use crate::merge::{merge_all, MergeAllOptions};
use crate::commit_graph::MergeBaseFinder;
use crate::oid::Oid;
use crate::repo::{githead_name, Repo};
use crate::unpack::{unpack_trees, UnpackOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OctopusOutcome {
    Clean,
    Conflicts,
}

impl OctopusOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            OctopusOutcome::Clean => 0,
            OctopusOutcome::Conflicts => 1,
        }
    }
}

/// `octopus(bases, head, remotes)`. `bases` is informational only (per the
/// spec it is "not consumed directly" — this core's merge-base computation
/// is performed fresh from `reference_commits` each iteration instead).
pub fn octopus(
    repo: &Repo,
    merge_base_finder: &dyn MergeBaseFinder,
    _bases: &[Oid],
    head: Oid,
    remotes: &[Oid],
) -> BitResult<OctopusOutcome> {
    if remotes.len() < 2 {
        return Err(BitError::Refused("octopus requires at least two remotes".into()).into());
    }

    let mut reference_commits = vec![head];
    let mut references = 1usize;
    let mut reference_tree = repo.commit_tree(head)?;
    let mut non_ff_merge = false;
    let mut ret = 0i32;

    for &remote in remotes {
        if ret != 0 {
            warn!("Automated merge did not work. Should not be doing an octopus.");
            return Err(refused_carrying_conflict());
        }

        let bases = merge_bases_against_folded(repo, merge_base_finder, remote, &reference_commits)?;
        if bases.is_empty() {
            bail!(BitError::Infrastructure("Unable to find common commit".into()));
        }
        if bases.contains(&remote) {
            info!("Already up to date with {}", githead_name(remote));
            continue;
        }

        let can_ff = !non_ff_merge && fast_forward_possible(&bases, &reference_commits, references);

        if can_ff {
            info!("Fast-forwarding to {}", githead_name(remote));
            let remote_tree = repo.commit_tree(remote)?;
            unpack_under_lock(repo, &[reference_tree, remote_tree], false)?;
            references = 0;
            reference_tree = write_index_tree_after_ff(repo)?;
        } else {
            non_ff_merge = true;
            info!("Trying simple merge with {}", githead_name(remote));

            let base_trees: Vec<Oid> = bases.iter().map(|&b| repo.commit_tree(b)).collect::<BitResult<_>>()?;
            let remote_tree = repo.commit_tree(remote)?;
            let mut trees = base_trees;
            trees.push(reference_tree);
            trees.push(remote_tree);
            unpack_under_lock(repo, &trees, true)?;

            ret = repo.with_index_locked(|index| {
                match index.write_tree(repo) {
                    Ok(tree) => {
                        reference_tree = tree;
                        Ok(0)
                    }
                    Err(_) => {
                        warn!("Simple merge did not work, trying automatic merge.");
                        let conflicts = merge_all(repo, index, MergeAllOptions { oneshot: true, quiet: false })?;
                        reference_tree = index.write_tree(repo).unwrap_or(reference_tree);
                        Ok(if conflicts > 0 { 1 } else { 0 })
                    }
                }
            })?;
        }

        reference_commits.push(remote);
        references += 1;
    }

    Ok(if ret == 0 { OctopusOutcome::Clean } else { OctopusOutcome::Conflicts })
}

fn refused_carrying_conflict() -> anyhow::Error {
    BitError::Refused("octopus: refusing to carry a conflict across remotes".into()).into()
}

fn merge_bases_against_folded(
    repo: &Repo,
    finder: &dyn MergeBaseFinder,
    remote: Oid,
    reference_commits: &[Oid],
) -> BitResult<Vec<Oid>> {
    let mut bases = vec![];
    for &reference in reference_commits {
        for base in finder.merge_bases(repo, reference, remote)? {
            if !bases.contains(&base) {
                bases.push(base);
            }
        }
    }
    Ok(bases)
}

fn fast_forward_possible(bases: &[Oid], reference_commits: &[Oid], references: usize) -> bool {
    if bases.len() < references {
        return false;
    }
    (0..references).all(|i| bases[i] == reference_commits[i])
}

fn unpack_under_lock(repo: &Repo, trees: &[Oid], aggressive: bool) -> BitResult<()> {
    let opts = UnpackOptions { merge: true, update: true, aggressive, initial_checkout: false };
    repo.with_index_locked(|index| {
        unpack_trees(repo, index, trees, opts).map_err(|err| anyhow::Error::from(BitError::Infrastructure(err.to_string())))
    })
}

fn write_index_tree_after_ff(repo: &Repo) -> BitResult<Oid> {
    repo.with_index_locked(|index| index.write_tree(repo))
}
