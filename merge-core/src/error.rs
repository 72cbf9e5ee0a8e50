use crate::index::Conflicts;
use crate::oid::Oid;
use std::fmt::{self, Display, Formatter};

pub type BitResult<T> = Result<T, BitGenericError>;
pub type BitGenericError = anyhow::Error;

/// Taxonomy of the errors this crate can report, kept as a concrete enum
/// (rather than leaning entirely on `anyhow::Error`) so callers (in particular
/// the CLI front ends) can match on *kind* to pick an exit code.
#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub enum BitError {
    /// object `oid` is missing from the object database
    ObjectNotFound(Oid),
    /// a path failed `verify_path` validation
    InvalidPath(String),
    /// a malformed CLI argument: bad mode, bad oid, wrong arity, missing `--`
    InvalidInput(String),
    /// a merge that cannot proceed at all: baseless merge, wrong arity,
    /// local changes would be clobbered, octopus carrying a prior conflict, ...
    Refused(String),
    /// a per-path or whole-tree conflict that was left for the user to resolve
    Conflict(Conflicts),
    /// unpack-trees, index write, or blob read failed
    Infrastructure(String),
}

impl Display for BitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BitError::ObjectNotFound(oid) => write!(f, "object `{oid}` not found"),
            BitError::InvalidPath(path) => write!(f, "invalid path `{path}`"),
            BitError::InvalidInput(reason) => write!(f, "{reason}"),
            BitError::Refused(reason) => write!(f, "{reason}"),
            BitError::Conflict(conflicts) => write!(f, "{conflicts}"),
            BitError::Infrastructure(reason) => write!(f, "{reason}"),
        }
    }
}

impl std::error::Error for BitError {
}

pub trait BitErrorExt {
    /// `true` if this error is a deliberate refusal to attempt the merge at
    /// all (baseless, wrong arity, local changes would be clobbered, ...)
    /// rather than an infrastructure failure or a bug surfacing as an
    /// error. CLI front ends use this to choose a diagnostic prefix.
    fn is_refused(&self) -> bool;
}

impl BitErrorExt for BitGenericError {
    fn is_refused(&self) -> bool {
        matches!(self.downcast_ref::<BitError>(), Some(BitError::Refused(..)))
    }
}
