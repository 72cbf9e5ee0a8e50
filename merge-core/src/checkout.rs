//! Index primitives (component A continued): materialising a resolved
//! index entry into the working tree.

use crate::error::BitResult;
use crate::index::IndexEntry;
use crate::mode::FileMode;
use crate::odb::Odb;
use crate::repo::Repo;
use std::ffi::OsStr;
use std::fs::{self, Permissions};
use std::io::Write;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

/// materialises `entry`'s blob into the working tree at its recorded path,
/// forcibly overwriting anything already there, preserving the recorded
/// mode. The index itself is not touched — callers stage `entry`
/// separately (see [`crate::index::Index::add_cacheinfo`]).
pub fn checkout_entry(repo: &Repo, entry: &IndexEntry) -> BitResult<()> {
    let blob = repo.odb.read_blob(entry.oid)?;
    write_worktree_file(&repo.to_absolute_path(&entry.path), entry.mode, &blob.bytes)
}

pub fn write_worktree_file(abs_path: &Path, mode: FileMode, bytes: &[u8]) -> BitResult<()> {
    if let Some(parent) = abs_path.parent() {
        fs::create_dir_all(parent)?;
    }
    if abs_path.exists() || abs_path.symlink_metadata().is_ok() {
        fs::remove_file(abs_path)?;
    }

    if mode.is_link() {
        let target = OsStr::from_bytes(bytes);
        std::os::unix::fs::symlink(target, abs_path)?;
    } else {
        let mut file = fs::File::create(abs_path)?;
        file.write_all(bytes)?;
        file.set_permissions(Permissions::from_mode(mode.as_u32()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
