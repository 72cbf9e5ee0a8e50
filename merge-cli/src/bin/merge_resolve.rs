//! `merge-resolve <bases>... -- <head> <remote>` — the resolve strategy
//! (component E) front end. Accepts `--` as the bases/heads separator; the
//! historical `==` form some versions of this tool also accepted is not
//! supported.

use merge_core::error::BitErrorExt;
use merge_core::oid::Oid;
use merge_core::resolve::resolve;

const USAGE: &str = "usage: merge-resolve <bases>... -- <head> <remote>";

fn main() {
    merge_cli::init_logger();
    std::process::exit(run());
}

fn run() -> i32 {
    // `--` here is a literal positional separator, not clap's end-of-options
    // marker (clap would consume it rather than hand it back), so argv is
    // walked directly instead of going through a derived parser.
    let args: Vec<String> = std::env::args().skip(1).collect();

    let sep = match args.iter().position(|a| a == "--") {
        Some(i) => i,
        None => {
            eprintln!("{}", USAGE);
            return 2;
        }
    };
    let (base_args, rest) = (&args[..sep], &args[sep + 1..]);

    // refuse a baseless merge before doing anything else.
    if base_args.is_empty() {
        eprintln!("error: refusing to perform a baseless merge");
        return 2;
    }
    // exactly one head and one remote; two or more remotes is an octopus,
    // which this tool refuses outright.
    if rest.len() != 2 {
        eprintln!("{}", USAGE);
        return 2;
    }

    let bases: Result<Vec<Oid>, _> = base_args.iter().map(|s| s.parse()).collect();
    let (head, remote): (Result<Oid, _>, Result<Oid, _>) = (rest[0].parse(), rest[1].parse());

    let (bases, head, remote) = match (bases, head, remote) {
        (Ok(bases), Ok(head), Ok(remote)) => (bases, head, remote),
        _ => {
            eprintln!("error: invalid object id");
            return 2;
        }
    };

    let repo = match merge_cli::discover_repo() {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("error: {}", err);
            return 2;
        }
    };

    match resolve(&repo, &bases, head, remote) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            // a deliberate refusal gets the plain "error:" prefix every other
            // rejection in this binary uses; anything else (unpack/index
            // infrastructure failing) is a "fatal:" since it isn't something
            // the caller's arguments could have avoided.
            let prefix = if err.is_refused() { "error" } else { "fatal" };
            eprintln!("{}: {}", prefix, err);
            2
        }
    }
}
