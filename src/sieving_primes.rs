//! # Sieving Prime State Machine (L4)
//!
//! A [`SievingPrime`] pairs an odd prime `q <= s` with a persistent bit-index
//! cursor into the *next* segment's sieve, so that the cross-off stride for
//! `q` carries across segment boundaries without re-deriving it from
//! scratch. `index == SENTINEL` marks "not yet seeded" (first use).

use crate::small_primes::sieve_primes;

/// Marks a sieving prime that has not yet been seeded into any segment.
pub const SENTINEL: i64 = -1;

#[derive(Clone, Copy, Debug)]
pub struct SievingPrime {
    pub prime: u32,
    pub index: i64,
}

impl SievingPrime {
    fn new(prime: u32) -> Self {
        SievingPrime { prime, index: SENTINEL }
    }
}

/// Generate sieving-prime records for every odd prime `q <= max_q`. The
/// prime 2 is implicitly handled by the odd-only sieve representation and
/// must not appear here (spec.md §4.3).
///
/// Capacity is reserved up front using Dusart's bound
/// `pi(x) <= x / (ln(x) - 1.1) + 5` (valid for `x >= 4`) to avoid
/// reallocation while pushing.
pub fn generate(max_q: u32) -> Vec<SievingPrime> {
    if max_q < 3 {
        return Vec::new();
    }

    let x = (max_q as f64).max(4.0);
    let capacity_hint = (x / (x.ln() - 1.1) + 5.0).max(0.0) as usize;

    let mut primes = Vec::with_capacity(capacity_hint);
    for q in sieve_primes(max_q) {
        if q == 2 {
            continue;
        }
        primes.push(SievingPrime::new(q));
    }
    primes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excludes_two_and_is_ascending() {
        let sp = generate(30);
        let primes: Vec<u32> = sp.iter().map(|s| s.prime).collect();
        assert_eq!(primes, vec![3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(sp.iter().all(|s| s.index == SENTINEL));
    }

    #[test]
    fn small_bounds_yield_empty() {
        assert!(generate(0).is_empty());
        assert!(generate(2).is_empty());
    }

    #[test]
    fn capacity_reservation_does_not_undercount() {
        let sp = generate(100_000);
        // pi(100000) = 9592; just check the generator actually produced that many.
        assert_eq!(sp.len(), 9591); // 9592 primes <= 100000, minus the prime 2
    }
}
