//! # Main — CLI Entry Point
//!
//! Parses arguments and dispatches into [`cli::run`]. Structured logging is
//! installed here: a bare `tracing_subscriber::fmt` layer with no
//! timestamp/target/level decoration, writing to stdout, so the
//! core-observable diagnostic lines the library emits via `tracing::info!`
//! appear as the literal text the stdout contract requires — unconditional
//! for "Primes: "/"Seconds: ", gated on non-print-mode (not on any flag) for
//! "Sieving primes inside"/"Thread dist"/"Threads".
//!
//! ## Usage
//!
//! `psieve [OPTIONS] [START] STOP`
//!
//! - `-p`, `--print`: print primes instead of only counting them.
//! - `-t`, `--threads <N>`: number of worker threads (0 = auto-tune).
//! - `--verbose`: additionally print internal sieve parameters (delta/s/p/Lp).
//! - `-v`, `--version`: print version and exit.

mod cli;

use anyhow::Result;
use clap::Parser;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Sieve the primes inside `[START, STOP]` (`STOP` <= ~1.23e34) using J. P.
/// Sorenson's Pseudosquares Prime Sieve.
///
/// `-v`/`--version` is spec.md's own short-flag mapping (line 163); this
/// crate's own `--verbose` addition (SPEC_FULL.md §4.7) is deliberately
/// long-flag-only so it never shadows it.
#[derive(Parser)]
#[command(
    name = "psieve",
    version,
    about = "Sieve primes inside [START, STOP] using the Pseudosquares Prime Sieve",
    disable_version_flag = true
)]
pub struct Cli {
    /// Start of the range (defaults to 0 when only STOP is given)
    start: Option<u128>,

    /// End of the range (inclusive)
    stop: u128,

    /// Print primes to stdout instead of only counting them
    #[arg(short, long)]
    print: bool,

    /// Number of worker threads (0 = auto-tune from the range width)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Print internal sieve parameters (delta/s/p/Lp) to stdout
    #[arg(long)]
    verbose: bool,

    /// Print version and exit
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: (),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_level(false)
        .with_ansi(false)
        .with_writer(std::io::stdout)
        .init();

    let cli = Cli::parse();
    cli::run(&cli)
}
