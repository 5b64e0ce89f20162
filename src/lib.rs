//! # psieve — Pseudosquares Prime Sieve
//!
//! Counts (and optionally emits) the primes in a user-supplied interval
//! `[start, stop]` using J. P. Sorenson's pseudosquares prime sieve: a
//! segmented odd-only bit sieve fused with a pseudosquare-based
//! deterministic primality test for the survivors. Space is
//! `O((log n)^2)`; time is conjectured `O(n log n)`.
//!
//! ## Module organization
//!
//! - [`tables`] — the first 128 primes, a prime-counting prefix table, and
//!   the 74 tabulated pseudosquares (L2).
//! - [`modpow`] — Montgomery modular exponentiation over 64- and 128-bit
//!   moduli (L1).
//! - [`small_primes`] — a plain sieve of Eratosthenes, the collaborator
//!   `sieving_primes` enumerates candidates from.
//! - [`sieving_primes`] — the per-prime persistent cross-off cursor (L4).
//! - [`bitsieve`] — the odd-only bit array (L3).
//! - [`primality`] — Sorenson's pseudosquare primality test (L5).
//! - [`segment`] — the per-worker segment engine (L6).
//! - [`partition`] — parameter selection and thread fan-out (L7).
//! - [`error`] — the library-level error enum.
//!
//! All of L0 (128-bit integer arithmetic) is native `u128`; there is no
//! dedicated module for it.

pub mod bitsieve;
pub mod error;
pub mod modpow;
pub mod partition;
pub mod primality;
pub mod segment;
pub mod sieving_primes;
pub mod small_primes;
pub mod tables;

use error::{Result, SieveError};

/// Fallible form of [`sieve`]. Validates `stop` against the algorithm's
/// validity window before doing any work, then partitions `[start, stop]`
/// across `threads` workers (`0` auto-tunes) and sums their prime counts.
///
/// Matching the reference implementation's stdout contract exactly: the
/// "Sieving primes inside"/"Thread dist"/"Threads" lines print whenever the
/// run is not in print mode (not gated by `verbose` — there is no separate
/// flag for them), while "Primes: "/"Seconds: " print unconditionally, every
/// run. `verbose` controls only the extra internal-parameter dump
/// ([`segment::sieve_subrange`]'s delta/s/p/Lp lines), this crate's own
/// addition beyond spec.md.
pub fn try_sieve(start: u128, stop: u128, threads: usize, print_primes: bool, verbose: bool) -> Result<u64> {
    if !print_primes {
        tracing::info!("Sieving primes inside [{start}, {stop}]");
    }

    let started = std::time::Instant::now();
    let t = partition::choose_thread_count(start, stop, threads, print_primes);
    let report = partition::run(start, stop, t, print_primes, verbose)?;
    let elapsed = started.elapsed().as_secs_f64();

    tracing::info!("Primes: {}", report.count);
    tracing::info!("Seconds: {elapsed:.3}");

    Ok(report.count)
}

/// Count the primes in `[start, stop]` (auto-tuned thread count, matching
/// the documented entry-point contract of returning a plain count).
///
/// `stop` must not exceed the algorithm's validity bound (`stop / s <
/// L_373` for the runtime-selected segment parameters, roughly `1.73e33`).
/// A configuration error here is not recoverable mid-run — nothing has been
/// sieved yet — so this entry point panics with the error's message rather
/// than threading a `Result` through a signature committed to returning a
/// bare count; callers that want to handle the error instead of panicking
/// should use [`try_sieve`].
///
/// # Panics
///
/// Panics if `stop` exceeds the validity bound described above.
pub fn sieve(start: u128, stop: u128, print_primes: bool, verbose: bool) -> u64 {
    match try_sieve(start, stop, 0, print_primes, verbose) {
        Ok(count) => count,
        Err(err) => panic!("{err}"),
    }
}
