//! `merge-one-file <orig-blob> <our-blob> <their-blob> <path> <orig-mode>
//! <our-mode> <their-mode>` — the per-path merger (component B) exposed
//! directly, for the whole-index driver's "spawn a helper program" callback
//! and for direct invocation. Mirrors `git merge-one-file`'s argument order
//! and exit-code conventions.

use merge_core::index::Index;
use merge_core::merge::{merge_one, MergeOneOutcome, Triple};

const USAGE: &str = "usage: merge-one-file <orig-blob> <our-blob> <their-blob> <path> \
<orig-mode> <our-mode> <their-mode>\n\nblob ids and modes should be empty for missing files.";

fn main() {
    merge_cli::init_logger();
    std::process::exit(run());
}

fn run() -> i32 {
    // an empty string is a meaningful positional value here (a missing
    // side), so argv is walked directly instead of going through clap.
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 7 {
        eprintln!("{}", USAGE);
        return 1;
    }

    match run_inner(&args) {
        Ok(MergeOneOutcome::Clean) => 0,
        Ok(MergeOneOutcome::Conflict(reason)) => {
            eprintln!("error: {}", reason);
            1
        }
        Err(err) => {
            eprintln!("error: {}", err);
            1
        }
    }
}

fn run_inner(args: &[String]) -> merge_core::error::BitResult<MergeOneOutcome> {
    let orig = merge_cli::parse_side(&args[0], &args[4], "orig")?;
    let ours = merge_cli::parse_side(&args[1], &args[5], "our")?;
    let theirs = merge_cli::parse_side(&args[2], &args[6], "their")?;
    let path = merge_cli::parse_path(&args[3])?;

    let repo = merge_cli::discover_repo()?;
    repo.with_index_locked(|index: &mut Index| {
        merge_one(&repo, index, Triple { orig, ours, theirs }, &path)
    })
}
