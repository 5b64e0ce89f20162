//! # Work Partitioner (L7)
//!
//! Two responsibilities: choosing the sieve parameters `(delta, s, p)` for a
//! given upper bound, and splitting `[start, stop]` into contiguous
//! subranges handed to a `rayon` worker pool. Thread count auto-tuning and
//! the `rayon::ThreadPoolBuilder`/`pool.install` dispatch pattern follow the
//! teacher's `search` module's use of a sized pool rather than the global
//! default, so a `--threads` override is respected exactly.

use rayon::prelude::*;

use crate::error::{Result, SieveError};
use crate::segment::{self, SieveParams};
use crate::tables::PSEUDOSQUARES;

/// Floor on segment width, matching spec.md §4.4's "constant, at least
/// 16384" so a segment always fills several cache lines worth of sieve
/// words regardless of how small `stop` is.
pub const MIN_SEGMENT_SIZE: u64 = 16_384;

/// Hard ceiling imposed by [`crate::modpow::Montgomery128Quarter`]'s
/// quarter-range requirement (`m <= 2^126`), independent of how far the
/// pseudosquare table reaches. Checked first so a wildly out-of-range
/// `stop` fails fast with a precise bound rather than via the pseudosquare
/// ratio arithmetic.
const MODULUS_CEILING: u128 = 1u128 << 126;

/// `delta`: the per-segment width in odd-sieve slots. Grows with `stop`
/// (more sieving primes means a wider segment amortizes the per-segment
/// bookkeeping better) but never shrinks below [`MIN_SEGMENT_SIZE`].
fn segment_size(stop: u128) -> u64 {
    let root = (stop as f64).powf(1.0 / 4.5);
    MIN_SEGMENT_SIZE.max(root as u64)
}

/// Choose `(delta, s, p)` for sieving up to (and including) `stop`.
///
/// `s`, the maximum sieving prime, is `delta * max(1, ln(delta))`: large
/// enough that trial division alone resolves most candidates, small enough
/// that the sieving-prime table stays cheap to regenerate per segment. `p`
/// is the smallest tabulated pseudosquare prime with `Lp > stop / s`, the
/// witness cap the primality test needs for every `n <= stop`.
pub fn select_parameters(stop: u128) -> Result<SieveParams> {
    if stop > MODULUS_CEILING {
        return Err(SieveError::StopTooLarge { stop, bound: MODULUS_CEILING });
    }

    let delta = segment_size(stop.max(2));
    let log_delta = (delta as f64).ln().max(1.0);
    let s = ((delta as f64) * log_delta) as u64;
    let s = s.max(1);

    let max_lp = PSEUDOSQUARES.last().expect("table is non-empty").lp;
    let ratio = stop / s as u128;
    if ratio >= max_lp {
        return Err(SieveError::RatioExceedsPseudosquareTable { ratio, max_lp });
    }

    let p = PSEUDOSQUARES
        .iter()
        .find(|ps| ps.lp > ratio)
        .map(|ps| ps.p)
        .expect("a pseudosquare with lp > ratio must exist once ratio < max_lp");

    Ok(SieveParams { delta, s, p })
}

/// Minimum subrange width assigned to a single thread, `max(10_000,
/// stop^(1/5))`: below this, splitting further would have workers spend
/// more time on per-segment setup than on actual sieving.
fn min_thread_dist(stop: u128) -> f64 {
    let root = (stop as f64).powf(1.0 / 5.0);
    10_000.0f64.max(root)
}

/// Decide how many worker threads to use. `requested == 0` means auto-tune
/// from the range width; `print_primes` forces a single worker so that
/// primes are emitted in ascending order (parallel workers would interleave
/// their stdout writes out of sequence).
pub fn choose_thread_count(start: u128, stop: u128, requested: usize, print_primes: bool) -> usize {
    if print_primes {
        return 1;
    }

    let available = rayon::current_num_threads().max(1);
    if requested > 0 {
        return requested.min(available);
    }
    if stop <= start {
        return 1;
    }

    let dist = min_thread_dist(stop);
    let width = (stop - start) as f64;
    let t = (width / dist).floor().max(1.0) as usize;
    t.clamp(1, available)
}

/// Outcome of a full sieve run: the total prime count plus the dispatch
/// parameters, so the CLI layer can print them in verbose mode without
/// recomputing anything.
#[derive(Debug)]
pub struct Report {
    pub count: u64,
    pub threads: usize,
    pub thread_dist: u128,
}

/// Partition `[start, stop]` into `threads` contiguous subranges and sum the
/// per-worker prime counts. Each subrange is handed to
/// [`segment::sieve_subrange`] verbatim (including `0..=2`, if present in
/// the first subrange); only the first worker gets `verbose` so the
/// parameter-dump lines are printed once, not once per thread.
///
/// "Thread dist: "/"Threads: " print whenever not in print mode, matching
/// the reference's `if (!opts.print_primes)` gate — independent of
/// `verbose`, which only controls the first worker's extra internal
/// parameter dump.
pub fn run(start: u128, stop: u128, threads: usize, print_primes: bool, verbose: bool) -> Result<Report> {
    if start > stop {
        return Ok(Report { count: 0, threads: 0, thread_dist: 0 });
    }

    // Validates the global stop; every worker's local hi <= stop, and the
    // stop/s ratio is monotonically non-decreasing in the bound, so this
    // single check also guarantees every worker's own local selection
    // (re-derived against its own hi in sieve_subrange) will succeed.
    select_parameters(stop)?;

    let threads = threads.max(1);
    let thread_dist = (stop - start) / threads as u128 + 1;

    if !print_primes {
        tracing::info!("Thread dist: {thread_dist}");
        tracing::info!("Threads: {threads}");
    }

    let subranges: Vec<(u128, u128, bool)> = (0..threads)
        .map(|i| {
            let lo = start + i as u128 * thread_dist;
            let hi = (lo + thread_dist - 1).min(stop);
            (lo, hi, i == 0 && verbose)
        })
        .collect();

    let count: u64 = if threads <= 1 {
        subranges
            .iter()
            .map(|&(lo, hi, w)| segment::sieve_subrange(lo, hi, print_primes, w))
            .sum()
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .expect("failed to build the sieve worker thread pool");
        pool.install(|| {
            subranges
                .par_iter()
                .map(|&(lo, hi, w)| segment::sieve_subrange(lo, hi, print_primes, w))
                .sum()
        })
    };

    Ok(Report { count, threads, thread_dist })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_parameters_accepts_moderate_stop() {
        let params = select_parameters(1_000_000).expect("1e6 is well within validity range");
        assert!(params.delta >= MIN_SEGMENT_SIZE);
        assert!(params.s >= 1);
        assert!(PSEUDOSQUARES.iter().any(|ps| ps.p == params.p));
    }

    #[test]
    fn select_parameters_rejects_modulus_ceiling_breach() {
        let err = select_parameters(MODULUS_CEILING + 1).unwrap_err();
        assert!(matches!(err, SieveError::StopTooLarge { .. }));
    }

    #[test]
    fn select_parameters_is_monotonic_enough_for_sub_selection() {
        // A smaller stop must never produce a larger ratio than a bigger one,
        // otherwise a worker's local re-derivation (using its own hi) could
        // fail after the global check already passed.
        let small = select_parameters(1_000).unwrap();
        let big = select_parameters(1_000_000_000_000u128).unwrap();
        let small_ratio = 1_000u128 / small.s as u128;
        let big_ratio = 1_000_000_000_000u128 / big.s as u128;
        assert!(small_ratio <= big_ratio);
    }

    #[test]
    fn choose_thread_count_forces_one_in_print_mode() {
        assert_eq!(choose_thread_count(0, 1_000_000_000, 8, true), 1);
    }

    #[test]
    fn choose_thread_count_respects_explicit_request() {
        let t = choose_thread_count(0, 1_000_000_000, 4, false);
        assert!(t >= 1 && t <= 4);
    }

    #[test]
    fn run_counts_primes_below_ten() {
        let report = run(0, 10, 1, false, false).expect("valid range");
        assert_eq!(report.count, 4); // 2, 3, 5, 7
    }

    #[test]
    fn run_handles_empty_range() {
        let report = run(100, 10, 1, false, false).expect("start > stop is not an error");
        assert_eq!(report.count, 0);
    }

    #[test]
    fn run_matches_across_one_and_several_threads() {
        let one = run(0, 100_000, 1, false, false).unwrap();
        let many = run(0, 100_000, 4, false, false).unwrap();
        assert_eq!(one.count, many.count);
        assert_eq!(one.count, 9592); // pi(100000)
    }
}
