// src/numeric/root_utils.rs
//
// Integer root and logarithm helpers used by parameter tuning and by the
// perfect-square pre-check on the input.

use num::{BigInt, Signed, Zero};

/// Floor of the integer square root via Newton's method, the standard
/// approach for arbitrary-precision integers (no native float sqrt wide
/// enough to be trustworthy here).
pub fn integer_square_root(n: &BigInt) -> BigInt {
    integer_root(n, 2)
}

/// Floor of the integer k-th root of a non-negative `n`.
pub fn integer_root(n: &BigInt, k: u32) -> BigInt {
    assert!(!n.is_negative(), "integer_root requires a non-negative input");
    if n.is_zero() || k == 1 {
        return n.clone();
    }

    let k_big = BigInt::from(k);
    let mut x = approximate_root_start(n, k);
    if x.is_zero() {
        x = BigInt::from(1);
    }

    loop {
        let x_pow_k_minus_1 = x.pow(k - 1);
        let next = (&x * (&k_big - 1) + n / &x_pow_k_minus_1) / &k_big;
        if next >= x {
            break;
        }
        x = next;
    }

    while x.pow(k) > *n {
        x -= 1;
    }
    while (&x + 1).pow(k) <= *n {
        x += 1;
    }
    x
}

fn approximate_root_start(n: &BigInt, k: u32) -> BigInt {
    let bits = n.bits();
    let shift = (bits as u32 + k - 1) / k;
    BigInt::from(1) << shift
}

/// True if `n` is a perfect square, i.e. `floor(sqrt(n))^2 == n`.
pub fn is_perfect_square(n: &BigInt) -> bool {
    if n.is_negative() {
        return false;
    }
    let r = integer_square_root(n);
    &r * &r == *n
}

/// floor(log2(n)) for positive n.
pub fn integer_log_2(n: &BigInt) -> u32 {
    assert!(n > &BigInt::from(0), "log2 of a non-positive number");
    n.bits() as u32 - 1
}

/// floor(log10(n)) for positive n, used for digit-count-keyed parameter
/// lookups.
pub fn integer_log_10(n: &BigInt) -> u32 {
    assert!(n > &BigInt::from(0), "log10 of a non-positive number");
    n.to_string().len() as u32 - 1
}
