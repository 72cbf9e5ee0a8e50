//! File modes, as recorded in tree and index entries.

use num_enum::TryFromPrimitive;
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, TryFromPrimitive)]
#[repr(u32)]
// variant order matters: `Tree` sorts after the blob variants, which keeps
// directory entries after files of the same name when an index is scanned
// in path order (mirrors git's tree-entry ordering rules).
pub enum FileMode {
    Reg     = 0o100644,
    Exec    = 0o100755,
    Link    = 0o120000,
    Tree    = 0o040000,
    Gitlink = 0o160000,
}

impl FileMode {
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    pub fn is_link(self) -> bool {
        matches!(self, Self::Link)
    }

    pub fn is_gitlink(self) -> bool {
        matches!(self, Self::Gitlink)
    }

    pub fn is_tree(self) -> bool {
        matches!(self, Self::Tree)
    }

    /// a mode the per-path merger is allowed to three-way-merge the contents of
    pub fn is_mergeable_blob(self) -> bool {
        matches!(self, Self::Reg | Self::Exec)
    }

    /// `S_ISREG || S_ISDIR || S_ISLNK`: the set of modes `merge-one-file`'s
    /// CLI argument validation accepts. A gitlink is none of these — it is
    /// rejected at the command line even though [`FileMode`] itself can
    /// represent it.
    pub fn is_reg_dir_or_link(self) -> bool {
        !matches!(self, Self::Gitlink)
    }

    pub fn new(bits: u32) -> Option<Self> {
        Self::try_from(bits).ok()
    }
}

impl Display for FileMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:06o}", self.as_u32())
    }
}

impl Debug for FileMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl FromStr for FileMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = u32::from_str_radix(s, 8).map_err(|_| anyhow!("invalid mode `{}`", s))?;
        Self::new(bits).ok_or_else(|| anyhow!("invalid mode `{}`", s))
    }
}
