//! `merge-octopus [<bases>...] -- <head> <remote1> <remote2> [<remotes>...]`
//! — the octopus strategy (component F) front end. A base or remote oid
//! that resolves to the empty tree is silently dropped, matching the
//! original tool's handling of a literal empty-tree argument.

use merge_core::commit_graph::CommitGraphMergeBase;
use merge_core::error::BitErrorExt;
use merge_core::octopus::octopus;
use merge_core::oid::Oid;

const USAGE: &str = "usage: merge-octopus [<bases>...] -- <head> <remote1> <remote2> [<remotes>...]";

fn main() {
    merge_cli::init_logger();
    std::process::exit(run());
}

fn run() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let sep = match args.iter().position(|a| a == "--") {
        Some(i) => i,
        None => {
            eprintln!("{}", USAGE);
            return 2;
        }
    };
    let (base_args, rest) = (&args[..sep], &args[sep + 1..]);

    // need at least a head and two remotes; fewer remotes is "not an
    // octopus" and the caller should have used merge-resolve instead.
    if rest.len() < 3 {
        eprintln!("{}", USAGE);
        return 2;
    }

    let parsed: Result<Vec<Oid>, _> =
        base_args.iter().chain(rest.iter()).map(|s| s.parse()).collect();
    let parsed = match parsed {
        Ok(oids) => oids,
        Err(_) => {
            eprintln!("error: invalid object id");
            return 2;
        }
    };
    let (base_oids, rest_oids) = parsed.split_at(base_args.len());
    let head = rest_oids[0];
    let remotes = &rest_oids[1..];

    let repo = match merge_cli::discover_repo() {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("error: {}", err);
            return 2;
        }
    };

    let bases = drop_empty_tree_oids(base_oids);
    let remotes: Vec<Oid> = drop_empty_tree_oids(remotes);

    match octopus(&repo, &CommitGraphMergeBase, &bases, head, &remotes) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            // same "error:"/"fatal:" split as merge-resolve: a deliberate
            // refusal (octopus carrying a conflict, too few remotes) reads
            // differently from unpack/index infrastructure failing outright.
            let prefix = if err.is_refused() { "error" } else { "fatal" };
            eprintln!("{}: {}", prefix, err);
            2
        }
    }
}

/// a base or remote argument naming the literal empty-tree oid is dropped
/// rather than resolved, matching the original tool.
fn drop_empty_tree_oids(oids: &[Oid]) -> Vec<Oid> {
    oids.iter().filter(|&&oid| oid != Oid::EMPTY_TREE).copied().collect()
}
