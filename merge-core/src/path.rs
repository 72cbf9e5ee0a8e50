//! Repository-relative paths and the `verify_path` collaborator.
//!
//! The core never touches an absolute filesystem path directly: every index
//! entry and every merge side carries a [`RepoPath`], a validated,
//! forward-slash path relative to the worktree root.

use crate::error::BitResult;
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RepoPath(String);

impl RepoPath {
    /// validates and interns a path. This is the `verify_path` collaborator
    /// referenced throughout the index invariants in the spec: rejects `..`
    /// components, embedded NULs, empty segments and the handful of names
    /// that are unsafe across the platforms git supports.
    pub fn verify(path: impl AsRef<str>) -> BitResult<Self> {
        let s = path.as_ref();
        ensure!(!s.is_empty(), "invalid path: empty");
        ensure!(!s.contains('\0'), "invalid path `{}`: contains NUL", s);
        ensure!(!s.starts_with('/'), "invalid path `{}`: must be relative", s);

        for component in s.split('/') {
            ensure!(!component.is_empty(), "invalid path `{}`: empty component", s);
            ensure!(component != "..", "invalid path `{}`: contains `..`", s);
            ensure!(component != ".", "invalid path `{}`: contains `.`", s);
            ensure!(component != ".git", "invalid path `{}`: reserved name `.git`", s);
            let stem = component.split('.').next().unwrap_or(component).to_ascii_uppercase();
            ensure!(
                !RESERVED_WINDOWS_NAMES.contains(&stem.as_str()),
                "invalid path `{}`: `{}` is a platform-reserved name",
                s,
                component
            );
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// `true` if `self` is `other` or a descendant of `other` (used when a
    /// whole subtree is deleted, e.g. `4.B`'s directory-removal fast path).
    pub fn starts_with(&self, other: &RepoPath) -> bool {
        self.0 == other.0 || self.0.starts_with(&format!("{}/", other.0))
    }
}

// Windows reserves these regardless of extension; unpacking a tree that
// contains one would silently corrupt a checkout on that platform.
const RESERVED_WINDOWS_NAMES: &[&str] =
    &["CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "LPT1", "LPT2", "LPT3"];

impl Display for RepoPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RepoPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
impl From<&str> for RepoPath {
    fn from(s: &str) -> Self {
        Self::verify(s).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_dotdot_and_nul() {
        assert!(RepoPath::verify("a/../b").is_err());
        assert!(RepoPath::verify("a\0b").is_err());
        assert!(RepoPath::verify("/abs").is_err());
        assert!(RepoPath::verify("").is_err());
    }

    #[test]
    fn rejects_dotgit_and_reserved_names() {
        assert!(RepoPath::verify(".git/config").is_err());
        assert!(RepoPath::verify("src/CON").is_err());
        assert!(RepoPath::verify("src/con.txt").is_err());
    }

    #[test]
    fn accepts_ordinary_paths() {
        assert!(RepoPath::verify("src/main.rs").is_ok());
        assert!(RepoPath::verify("a.txt").is_ok());
    }

    #[test]
    fn starts_with_is_path_aware() {
        let dir = RepoPath::from("foo");
        assert!(RepoPath::from("foo/bar").starts_with(&dir));
        assert!(!RepoPath::from("foobar").starts_with(&dir));
        assert!(RepoPath::from("foo").starts_with(&dir));
    }
}
