// src/numeric/primes.rs
//
// Prime iteration primitives. Miller-Rabin with a fixed deterministic
// witness set is more than sufficient for the word-sized primes this
// sieve ever iterates.

use num::{BigInt, Zero};

const PRIME_CHECK_BASES: [i64; 15] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];

pub fn is_probable_prime(input: &BigInt) -> bool {
    if input == &BigInt::from(2) || input == &BigInt::from(3) {
        return true;
    }
    if input < &BigInt::from(2) || input % 2 == BigInt::zero() {
        return false;
    }

    let mut d = input - 1;
    let mut s = 0u32;
    while &d % 2 == BigInt::zero() {
        d /= 2;
        s += 1;
    }

    for &a in &PRIME_CHECK_BASES {
        if &BigInt::from(a) >= input {
            continue;
        }
        let mut x = BigInt::from(a).modpow(&d, input);
        if x == BigInt::from(1) || x == input - 1 {
            continue;
        }
        let mut composite = true;
        for _ in 1..s {
            x = x.modpow(&BigInt::from(2), input);
            if x == input - 1 {
                composite = false;
                break;
            }
        }
        if composite {
            return false;
        }
    }
    true
}

/// Smallest prime strictly greater than `from`.
pub fn next_prime(from: &BigInt) -> BigInt {
    let mut candidate = from + 1;
    if candidate > BigInt::from(2) && &candidate % 2 == BigInt::zero() {
        candidate += 1;
    }
    while !is_probable_prime(&candidate) {
        candidate += if candidate == BigInt::from(2) { 1 } else { 2 };
    }
    candidate
}

/// Largest prime strictly less than `from`. Panics if `from <= 2`
/// (no caller in this crate ever searches below the smallest prime).
pub fn prec_prime(from: &BigInt) -> BigInt {
    assert!(from > &BigInt::from(2), "no prime below 2");
    let mut candidate = from - 1;
    if candidate > BigInt::from(2) && &candidate % 2 == BigInt::zero() {
        candidate -= 1;
    }
    while candidate > BigInt::from(1) && !is_probable_prime(&candidate) {
        candidate -= if candidate == BigInt::from(3) { 1 } else { 2 };
    }
    candidate
}
