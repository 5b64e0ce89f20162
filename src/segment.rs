//! # Segment Engine (L6)
//!
//! Drives one worker's assigned subrange `[lo, hi]` through repeated
//! segment-sized sweeps: reset the bit sieve, cross off multiples of every
//! sieving prime `<= min(s, sqrt(high))`, then resolve each surviving
//! candidate either by the fact that trial division alone already proved it
//! prime, or by invoking the pseudosquare test (L5).
//!
//! Each worker derives its own `(delta, s, p)` from *its own* `hi`, not the
//! global `stop` — a worker covering a low subrange has no need for sieving
//! primes or a witness cap sized for the whole run. This mirrors the
//! reference implementation, where every worker thread calls the parameter
//! selector with its own local upper bound.

use crate::bitsieve::BitSieve;
use crate::partition::select_parameters;
use crate::primality::pseudosquare_test;
use crate::sieving_primes::{generate, SievingPrime};

/// Everything a worker needs to sieve its assigned subrange: the segment
/// width, the maximum sieving prime, and the pseudosquare witness cap.
#[derive(Clone, Copy, Debug)]
pub struct SieveParams {
    pub delta: u64,
    pub s: u64,
    pub p: u32,
}

fn isqrt_u128(n: u128) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut x = (n as f64).sqrt() as u128;
    // Correct for floating-point error in either direction.
    while x > 0 && x * x > n {
        x -= 1;
    }
    while (x + 1) * (x + 1) <= n {
        x += 1;
    }
    x as u64
}

/// First odd multiple of `q` that is `>= low` and `>= q*q` (smaller
/// multiples are already eliminated by smaller sieving primes).
fn first_candidate_multiple(low: u128, q: u128) -> u128 {
    let mut n = (low / q) * q;
    if n < low {
        n += q;
    }
    if n % 2 == 0 {
        n += q; // q is odd, so one step flips parity back to odd
    }
    let qq = q * q;
    if n < qq {
        n = qq;
    }
    n
}

/// Count (and optionally emit) the primes in a worker's assigned subrange
/// `[lo, hi]`. `lo`/`hi` are raw (not yet odd-adjusted, may include `0..=2`);
/// this function handles the `2` special case and an empty (`lo > hi`)
/// subrange itself, matching spec.md §4.4 step 1's per-worker framing.
pub fn sieve_subrange(lo: u128, hi: u128, print_primes: bool, verbose: bool) -> u64 {
    if lo > hi {
        return 0;
    }

    let mut count = 0u64;
    let mut lo = lo;

    if lo <= 2 {
        count += 1;
        if print_primes {
            println!("2");
        }
        lo = 3;
        if lo > hi {
            return count;
        }
    }

    let params = select_parameters(hi)
        .expect("a subrange's own upper bound must be valid once the global stop passed validation");

    if verbose {
        let lp = crate::tables::PSEUDOSQUARES
            .iter()
            .find(|ps| ps.p == params.p)
            .map(|ps| ps.lp)
            .unwrap_or(0);
        tracing::info!("Sieve size: {} bytes", params.delta.div_ceil(8));
        tracing::info!("delta: {}", params.delta);
        tracing::info!("s: {}", params.s);
        tracing::info!("p: {}", params.p);
        tracing::info!("Lp: {}", lp);
    }

    let delta = params.delta as usize;
    let mut sieve = BitSieve::with_capacity(delta);

    let sqrt_hi_global = isqrt_u128(hi);
    let max_q_global = params.s.min(sqrt_hi_global as u64) as u32;
    let mut sieving_primes: Vec<SievingPrime> = generate(max_q_global);

    let mut low = lo;
    while low <= hi {
        let high = (low + 2 * params.delta as u128 - 1).min(hi);
        let odd_base = if low % 2 == 1 { low } else { low + 1 };
        let capacity = if odd_base > high {
            0usize
        } else {
            ((high - odd_base) / 2 + 1) as usize
        };

        sieve.set_all();

        let sqrt_high = isqrt_u128(high);
        let max_sieving_prime = params.s.min(sqrt_high);

        for sp in sieving_primes.iter_mut() {
            if sp.prime as u64 > max_sieving_prime {
                break;
            }
            let q = sp.prime as u128;

            let mut i: i64 = if sp.index < 0 {
                let m0 = first_candidate_multiple(low, q);
                ((m0 - odd_base) / 2) as i64
            } else {
                sp.index
            };

            let stride = sp.prime as i64;
            while (i as usize) < capacity {
                sieve.clear(i as usize);
                i += stride;
            }
            sp.index = i - capacity as i64;
        }

        if capacity > 0 {
            for i in 0..capacity {
                if sieve.test(i) {
                    let n = odd_base + 2 * i as u128;
                    let is_prime = if max_sieving_prime >= sqrt_high {
                        true
                    } else {
                        pseudosquare_test(n, params.p)
                    };
                    if is_prime {
                        count += 1;
                        if print_primes {
                            println!("{n}");
                        }
                    }
                }
            }
        }

        low = high + 1;
    }

    count
}
