// src/numeric/jacobi.rs
//
// Jacobi symbol (a | n), n odd positive. Reduces to the Legendre symbol
// when n is prime; used both for factor-base admission (Legendre test)
// and for selecting primes of a's decomposition (Jacobi test, n need not
// be prime there since we test against small primes p, which are prime,
// so in this crate the two coincide in practice).

use num::{BigInt, Integer, Signed, Zero};

/// Returns -1, 0, or +1. Panics if `n` is not odd and positive, matching
/// the precondition every call site in this crate already guarantees.
pub fn jacobi(a: &BigInt, n: &BigInt) -> i32 {
    assert!(n > &BigInt::from(0) && n.is_odd(), "jacobi modulus must be odd and positive");

    let mut a = a.mod_floor(n);
    let mut n = n.clone();
    let mut result = 1;

    while !a.is_zero() {
        while a.is_even() {
            a >>= 1;
            let r = (&n).mod_floor(&BigInt::from(8));
            if r == BigInt::from(3) || r == BigInt::from(5) {
                result = -result;
            }
        }

        std::mem::swap(&mut a, &mut n);

        if a.mod_floor(&BigInt::from(4)) == BigInt::from(3)
            && n.mod_floor(&BigInt::from(4)) == BigInt::from(3)
        {
            result = -result;
        }

        a = a.mod_floor(&n);
    }

    if n == BigInt::from(1) {
        result
    } else {
        0
    }
}

/// Convenience wrapper for a small prime modulus, the common factor-base case.
pub fn jacobi_u64(a: &BigInt, p: u64) -> i32 {
    jacobi(a, &BigInt::from(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic_residues_mod_7() {
        // QRs mod 7: 1, 2, 4
        assert_eq!(jacobi(&BigInt::from(1), &BigInt::from(7)), 1);
        assert_eq!(jacobi(&BigInt::from(2), &BigInt::from(7)), 1);
        assert_eq!(jacobi(&BigInt::from(4), &BigInt::from(7)), 1);
        assert_eq!(jacobi(&BigInt::from(3), &BigInt::from(7)), -1);
        assert_eq!(jacobi(&BigInt::from(5), &BigInt::from(7)), -1);
        assert_eq!(jacobi(&BigInt::from(6), &BigInt::from(7)), -1);
    }

    #[test]
    fn zero_on_multiple() {
        assert_eq!(jacobi(&BigInt::from(14), &BigInt::from(7)), 0);
    }

    #[test]
    fn jacobi_over_composite_modulus() {
        // (1001 | 9907) relies on reciprocity over a composite bottom symbol mid-recursion;
        // spot check against a directly verifiable small case instead.
        assert_eq!(jacobi(&BigInt::from(8), &BigInt::from(15)), 1);
    }
}
