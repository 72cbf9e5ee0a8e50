//! The object model: blobs, trees and commits, addressed by [`Oid`].
//!
//! Parsing commit metadata (author/committer/gpgsig), tags and delta objects
//! is not needed here: the merge core only ever reads a commit far enough to
//! find its `tree`, and never constructs one beyond that (creating a merge
//! commit from the result is left to the caller).

mod blob;
mod commit;
mod tree;

pub use blob::Blob;
pub use commit::Commit;
pub use tree::{Tree, TreeEntry};

use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjType {
    Blob,
    Tree,
    Commit,
}

impl Display for ObjType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            ObjType::Blob => "blob",
            ObjType::Tree => "tree",
            ObjType::Commit => "commit",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Obj {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl Obj {
    pub fn obj_type(&self) -> ObjType {
        match self {
            Obj::Blob(..) => ObjType::Blob,
            Obj::Tree(..) => ObjType::Tree,
            Obj::Commit(..) => ObjType::Commit,
        }
    }

    pub fn into_blob(self) -> Option<Blob> {
        match self {
            Obj::Blob(blob) => Some(blob),
            _ => None,
        }
    }

    pub fn into_tree(self) -> Option<Tree> {
        match self {
            Obj::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    pub fn into_commit(self) -> Option<Commit> {
        match self {
            Obj::Commit(commit) => Some(commit),
            _ => None,
        }
    }
}
