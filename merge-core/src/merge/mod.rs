//! Components B and C: the per-path three-way merger and the driver that
//! walks an index looking for unresolved paths to feed it.

mod driver;
mod one;

pub use driver::{merge_all, merge_path};
pub use one::merge_one;

use crate::mode::FileMode;
use crate::oid::Oid;

/// one side of a per-path triple: absent, or present with a content oid
/// and recorded mode.
pub type Side = Option<(Oid, FileMode)>;

/// the logical `(orig, ours, theirs)` triple the per-path merger operates
/// on. `None` means the path does not exist on that side.
#[derive(Debug, Clone, Copy)]
pub struct Triple {
    pub orig: Side,
    pub ours: Side,
    pub theirs: Side,
}

/// the outcome of `merge_one` for a single path. Unlike a hard `Err`, a
/// `Conflict` is a normal, expected result: the driver tallies these and
/// the strategy layer turns any into exit code 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOneOutcome {
    Clean,
    Conflict(String),
}

impl MergeOneOutcome {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(..))
    }
}
