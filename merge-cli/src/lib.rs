//! Shared plumbing for the three strategy front ends in `src/bin/`: logger
//! setup, repository discovery, and the handful of argument-parsing helpers
//! (`<oid>`/`<mode>` octal parsing, empty string meaning "absent") that all
//! three binaries need. None of this lives in `merge-core` because it is
//! purely a CLI concern — argument parsing and front-ends are out of scope
//! of the core (see its crate-level docs).

#[macro_use]
extern crate anyhow;

use anyhow::Context;
use merge_core::error::BitResult;
use merge_core::mode::FileMode;
use merge_core::oid::Oid;
use merge_core::path::RepoPath;
use merge_core::repo::Repo;

/// initialises the logger the same way every strategy does: `MERGE_LOG`
/// controls verbosity, nothing is printed by default below `warn`.
pub fn init_logger() {
    env_logger::builder().parse_env("MERGE_LOG").init();
}

/// locates the repository the current process is running in, starting from
/// the working directory.
pub fn discover_repo() -> BitResult<Repo> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Repo::find(cwd)
}

/// parses a CLI positional that is either empty (absent) or a 40-hex-digit
/// oid.
pub fn parse_oid(s: &str) -> BitResult<Option<Oid>> {
    if s.is_empty() { Ok(None) } else { Ok(Some(s.parse()?)) }
}

/// parses a CLI positional that is either empty (absent) or an octal file
/// mode, rejecting anything that isn't regular/directory/symlink (gitlinks
/// are not accepted as a merge-one-file argument, matching the real tool).
pub fn parse_mode(s: &str) -> BitResult<Option<FileMode>> {
    if s.is_empty() {
        return Ok(None);
    }
    let mode: FileMode = s.parse()?;
    ensure!(mode.is_reg_dir_or_link(), "invalid mode `{}`: not a regular file, directory, or symlink", s);
    Ok(Some(mode))
}

/// combines a parsed oid and mode into one side of a per-path triple,
/// requiring that either both or neither are present.
pub fn parse_side(oid: &str, mode: &str, label: &str) -> BitResult<Option<(Oid, FileMode)>> {
    match (parse_oid(oid)?, parse_mode(mode)?) {
        (Some(oid), Some(mode)) => Ok(Some((oid, mode))),
        (None, None) => Ok(None),
        _ => bail!("`{}` blob and mode must either both be given or both be empty", label),
    }
}

/// validates a path argument the way every strategy does before touching
/// the index or working tree with it.
pub fn parse_path(s: &str) -> BitResult<RepoPath> {
    RepoPath::verify(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_oid_empty_is_absent() {
        assert!(parse_oid("").unwrap().is_none());
    }

    #[test]
    fn parse_mode_rejects_gitlink() {
        assert!(parse_mode("160000").is_err());
    }

    #[test]
    fn parse_mode_accepts_regular_dir_and_link() {
        assert!(parse_mode("100644").unwrap().is_some());
        assert!(parse_mode("040000").unwrap().is_some());
        assert!(parse_mode("120000").unwrap().is_some());
    }

    #[test]
    fn parse_side_requires_both_or_neither() {
        assert!(parse_side("", "", "orig").unwrap().is_none());
        assert!(parse_side("e69de29bb2d1d6434b8b29ae775ad8c2e48c5391", "", "orig").is_err());
    }
}
