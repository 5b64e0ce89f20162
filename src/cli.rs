//! # CLI Execution
//!
//! Extracted from `main.rs` to keep the entry point slim, following the
//! predecessor's separation between argument definition (`main.rs`) and
//! execution logic (`cli.rs`).

use anyhow::{Context, Result};

use crate::Cli;

/// Run the sieve for the parsed CLI arguments. All of the core-observable
/// stdout (the "Sieving primes inside"/"Thread dist"/"Threads" lines, gated
/// on print mode, and the unconditional "Primes"/"Seconds" lines) is emitted
/// by the library itself; `cli.verbose` only controls the extra internal
/// parameter dump (delta/s/p/Lp), this crate's own addition. This function
/// only resolves CLI defaults and maps the library's typed error onto
/// `anyhow` at the process boundary.
pub fn run(cli: &Cli) -> Result<()> {
    let start = cli.start.unwrap_or(0);
    let stop = cli.stop;
    let threads = cli.threads.unwrap_or(0);

    psieve::try_sieve(start, stop, threads, cli.print, cli.verbose)
        .context("sieve failed")
        .map(|_| ())
}
