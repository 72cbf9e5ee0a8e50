//! Wrapper around the textual three-way merge collaborator. The core
//! specifies only how this is invoked (conflict style, marker labels) and
//! how its result is consumed (clean merge vs. conflict-marked buffer) — the
//! actual diff/merge algorithm lives in `diffy`.

pub type ConflictStyle = diffy::ConflictStyle;

/// three-way merges `a` and `b` against `base`. `Ok` carries the merged
/// bytes; `Err` carries a buffer with conflict markers (`<<<<<<<` /
/// `=======` / `>>>>>>>`) already written in using `ours_marker` /
/// `theirs_marker` as the branch labels.
pub fn merge(
    conflict_style: ConflictStyle,
    ours_marker: impl AsRef<str>,
    theirs_marker: impl AsRef<str>,
    base: &[u8],
    a: &[u8],
    b: &[u8],
) -> Result<Vec<u8>, Vec<u8>> {
    diffy::MergeOptions::new()
        .set_conflict_style(conflict_style)
        .set_ours_marker(ours_marker.as_ref().to_owned())
        .set_theirs_marker(theirs_marker.as_ref().to_owned())
        .merge_bytes(base, a, b)
}
