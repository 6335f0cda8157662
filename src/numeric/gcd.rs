// src/numeric/gcd.rs

use num::BigInt;
use num::Integer;
use num::Signed;

pub struct GCD;

impl GCD {
    pub fn find_gcd_pair(left: &BigInt, right: &BigInt) -> BigInt {
        left.gcd(right)
    }

    pub fn find_gcd(numbers: &[BigInt]) -> BigInt {
        numbers.iter().fold(BigInt::from(0), |acc, x| Self::find_gcd_pair(&acc, x))
    }

    pub fn are_coprime(numbers: &[BigInt]) -> bool {
        Self::find_gcd(numbers) == BigInt::from(1)
    }
}

/// Extended Euclidean algorithm. Returns (gcd, x, y) with a*x + b*y = gcd.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    if a.is_zero() {
        return (b.clone(), BigInt::from(0), BigInt::from(1));
    }

    let (gcd, x1, y1) = extended_gcd(&b.mod_floor(a), a);
    let x = &y1 - (b / a) * &x1;
    let y = x1;

    (gcd, x, y)
}

/// a^-1 mod m, for any modulus (not required prime). None if gcd(a, m) != 1.
pub fn mod_inverse(a: &BigInt, m: &BigInt) -> Option<BigInt> {
    if m == &BigInt::from(1) {
        return Some(BigInt::from(0));
    }

    let (gcd, x, _) = extended_gcd(&a.mod_floor(m), m);
    if gcd.abs() != BigInt::from(1) {
        return None;
    }

    Some(x.mod_floor(m))
}

/// a^-1 mod m for machine-word-sized values, used on the sieve's hot path.
pub fn mod_inverse_i64(a: i64, m: i64) -> Option<i64> {
    mod_inverse(&BigInt::from(a), &BigInt::from(m)).and_then(|v| num::ToPrimitive::to_i64(&v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_pair_basic() {
        assert_eq!(GCD::find_gcd_pair(&BigInt::from(48), &BigInt::from(18)), BigInt::from(6));
    }

    #[test]
    fn extended_gcd_identity_holds() {
        let a = BigInt::from(35);
        let b = BigInt::from(15);
        let (gcd, x, y) = extended_gcd(&a, &b);
        assert_eq!(gcd, BigInt::from(5));
        assert_eq!(&a * &x + &b * &y, gcd);
    }

    #[test]
    fn mod_inverse_matches_definition() {
        let inv = mod_inverse(&BigInt::from(3), &BigInt::from(7)).unwrap();
        assert_eq!((&BigInt::from(3) * &inv).mod_floor(&BigInt::from(7)), BigInt::from(1));
    }

    #[test]
    fn mod_inverse_none_when_not_coprime() {
        assert!(mod_inverse(&BigInt::from(4), &BigInt::from(8)).is_none());
    }
}
