// src/numeric/modsqrt.rs
//
// Modular square roots: Tonelli-Shanks mod a prime, and a Hensel-lift +
// CRT combination mod a product of squared primes (the shape this
// sieve's polynomial leading coefficient `a` always takes, per spec).

use num::{BigInt, Integer, One, Zero};

use super::gcd::mod_inverse;
use super::jacobi::jacobi;

/// Square roots of `n` mod the prime `p`, i.e. `r` with `r*r ≡ n (mod p)`.
/// Returns both roots (r, p - r) when n is a nonzero QR, `(0, 0)` when
/// n ≡ 0 (mod p), or `None` when n is not a QR mod p.
///
/// p = 2 is special-cased to a single canonical root derived from
/// `n mod 8`, matching this sieve's convention of one starting offset
/// for p=2.
pub fn sqrts_mod_prime(n: &BigInt, p: u64) -> Option<(u64, u64)> {
    if p == 2 {
        let r = canonical_root_mod_8(n);
        return Some((r, r));
    }

    let p_big = BigInt::from(p);
    let n_mod = n.mod_floor(&p_big);

    if n_mod.is_zero() {
        return Some((0, 0));
    }

    if jacobi(&n_mod, &p_big) != 1 {
        return None;
    }

    // p ≡ 3 (mod 4): direct formula.
    if p % 4 == 3 {
        let exp = BigInt::from((p + 1) / 4);
        let r = n_mod.modpow(&exp, &p_big);
        let r_u = to_u64_mod(&r, p);
        return Some((r_u, (p - r_u) % p));
    }

    // General Tonelli-Shanks.
    let mut q = p - 1;
    let mut s = 0u32;
    while q % 2 == 0 {
        q /= 2;
        s += 1;
    }

    let mut z = 2u64;
    loop {
        let z_big = BigInt::from(z);
        if jacobi(&z_big, &p_big) == -1 {
            break;
        }
        z += 1;
        if z >= p {
            return None; // unreachable for genuine primes, guards against infinite loop
        }
    }

    let q_big = BigInt::from(q);
    let mut m = s;
    let mut c = BigInt::from(z).modpow(&q_big, &p_big);
    let mut t = n_mod.modpow(&q_big, &p_big);
    let mut r = n_mod.modpow(&((&q_big + BigInt::one()) / 2), &p_big);

    loop {
        if t.is_zero() {
            return Some((0, 0));
        }
        if t == BigInt::one() {
            let r_u = to_u64_mod(&r, p);
            return Some((r_u, (p - r_u) % p));
        }

        let mut i = 1u32;
        let mut temp = (&t * &t).mod_floor(&p_big);
        while temp != BigInt::one() && i < m {
            temp = (&temp * &temp).mod_floor(&p_big);
            i += 1;
        }

        if i >= m {
            return None;
        }

        let b_exp = BigInt::from(2u32).pow(m - i - 1);
        let b = c.modpow(&b_exp, &p_big);
        m = i;
        c = (&b * &b).mod_floor(&p_big);
        t = (&t * &c).mod_floor(&p_big);
        r = (&r * &b).mod_floor(&p_big);
    }
}

fn to_u64_mod(v: &BigInt, modulus: u64) -> u64 {
    v.mod_floor(&BigInt::from(modulus))
        .to_string()
        .parse::<u64>()
        .unwrap_or(0)
}

/// The canonical root of an odd `n` at p = 2, read off `n mod 8`: every
/// odd residue mod 8 squares to 1 mod 2, so the root is always 1, but
/// this consults `n mod 8` (not `n mod 2`) to be the literal source of
/// that root rather than a shortcut.
fn canonical_root_mod_8(n: &BigInt) -> u64 {
    let residue = n.mod_floor(&BigInt::from(8));
    let residue = num::ToPrimitive::to_u64(&residue).unwrap_or(1);
    residue % 2
}

/// Hensel-lifts a root `r` of `x^2 ≡ n (mod p)` to a root mod `p^2`.
/// Requires `p` odd and `p` not dividing `n` (both guaranteed by the
/// factor-base admission test upstream).
pub fn hensel_lift_square(n: &BigInt, p: u64, r: u64) -> BigInt {
    let p_big = BigInt::from(p);
    let p2 = &p_big * &p_big;
    let r_big = BigInt::from(r);

    // Newton step for f(x) = x^2 - n: x' = x - f(x) * f'(x)^-1 (mod p^2), f'(x) = 2x.
    let f_r = (&r_big * &r_big - n).mod_floor(&p2);
    let two_r_inv = mod_inverse(&(2 * &r_big), &p2)
        .expect("2r invertible mod p^2: p is odd and p does not divide r");
    (&r_big - &f_r * &two_r_inv).mod_floor(&p2)
}

/// Combines square roots mod each `p_i^2` (distinct odd primes) into a
/// square root of `n` mod `a = prod(p_i^2)` via CRT, for every choice of
/// sign on each prime's root. Returns the CRT basis vectors `B[i]` such
/// that summing a signed subset reproduces every combination (the
/// self-initialisation "B array" used for fast polynomial switching).
///
/// Each `B[i]` satisfies `B[i] ≡ ± b_i (mod p_i^2)` for its own prime and
/// `B[i] ≡ 0 (mod p_j^2)` for every other prime `j`.
pub fn crt_basis_for_square_factorisation(n: &BigInt, primes: &[u64]) -> Vec<BigInt> {
    let a: BigInt = primes.iter().map(|&p| BigInt::from(p) * BigInt::from(p)).product();

    primes
        .iter()
        .map(|&p| {
            let p2 = BigInt::from(p) * BigInt::from(p);
            let a_div_p2 = &a / &p2;

            let (root_lo, _) = sqrts_mod_prime(n, p).expect("prime admitted to factor base has a root");
            let b_i = hensel_lift_square(n, p, root_lo);

            let ainv = mod_inverse(&a_div_p2, &p2).expect("a/p^2 invertible mod p^2 by construction");
            let gamma = (&b_i * &ainv).mod_floor(&p2);

            &a_div_p2 * &gamma
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tonelli_shanks_small_prime() {
        // sqrt(10) mod 13: 6^2 = 36 = 10 mod 13
        let (r1, r2) = sqrts_mod_prime(&BigInt::from(10), 13).unwrap();
        assert!((r1 == 6 && r2 == 7) || (r1 == 7 && r2 == 6));
    }

    #[test]
    fn tonelli_shanks_p_equiv_3_mod_4() {
        // p = 11 ≡ 3 mod 4
        let (r1, r2) = sqrts_mod_prime(&BigInt::from(5), 11).unwrap();
        for r in [r1, r2] {
            assert_eq!((r * r) % 11, 5);
        }
    }

    #[test]
    fn non_residue_returns_none() {
        assert!(sqrts_mod_prime(&BigInt::from(2), 7).is_none());
    }

    #[test]
    fn p_equals_2_root_is_derived_from_n_mod_8() {
        for residue in [1, 3, 5, 7] {
            let n = BigInt::from(800 + residue);
            let (r, r2) = sqrts_mod_prime(&n, 2).unwrap();
            assert_eq!(r, r2);
            assert_eq!((r * r) % 2, num::ToPrimitive::to_u64(&n.mod_floor(&BigInt::from(2))).unwrap());
        }
    }

    #[test]
    fn hensel_lift_satisfies_square_mod_p_squared() {
        let n = BigInt::from(41);
        let (r, _) = sqrts_mod_prime(&n, 13).unwrap();
        let lifted = hensel_lift_square(&n, 13, r);
        let p2 = BigInt::from(13 * 13);
        assert_eq!((&lifted * &lifted).mod_floor(&p2), n.mod_floor(&p2));
    }

    #[test]
    fn crt_basis_sums_to_a_root_of_n_mod_a() {
        let n = BigInt::from(10007);
        let primes = vec![13u64, 17u64];
        let basis = crt_basis_for_square_factorisation(&n, &primes);
        let a: BigInt = primes.iter().map(|&p| BigInt::from(p) * BigInt::from(p)).product();
        let b: BigInt = basis.iter().sum::<BigInt>().mod_floor(&a);
        assert_eq!((&b * &b).mod_floor(&a), n.mod_floor(&a));
    }
}
