// src/numeric/trial_division.rs
//
// Post-sieve verification: strip every factor-base prime out of a
// survivor's Q(t) value, tracking exponents. What remains is either 1
// (a full relation), a single prime below the large-prime bound (a
// partial relation), or something too big to use (discarded upstream).

use num::{BigInt, Integer, Zero};

/// Divides `n` by each prime in `primes`, recording `(prime, exponent)`
/// pairs for primes that actually divide it. Returns the pairs and the
/// leftover cofactor.
pub fn trial_divide(primes: &[u64], n: &BigInt) -> (Vec<(u64, u32)>, BigInt) {
    let mut remaining = n.abs();
    let mut factors = Vec::new();

    for &p in primes {
        if remaining.is_zero() {
            break;
        }
        let p_big = BigInt::from(p);
        let mut exponent = 0u32;
        while (&remaining).mod_floor(&p_big).is_zero() {
            remaining /= &p_big;
            exponent += 1;
        }
        if exponent > 0 {
            factors.push((p, exponent));
        }
    }

    (factors, remaining)
}
