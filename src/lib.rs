// src/lib.rs
//
// Self-initialising multiple-polynomial quadratic sieve with
// single-large-prime variation and logarithmic sieving. See the
// individual modules for each subsystem; `factor`/`factor_with_config`
// are the two entry points most callers need.

pub mod config;
pub mod error;
pub mod factor_base;
pub mod kernel;
pub mod matrix;
pub mod numeric;
pub mod orchestrator;
pub mod polynomial;
pub mod relation;
pub mod relation_store;
pub mod sieve;
pub mod trace;
pub mod tuner;

pub use config::MpqsConfig;
pub use error::{MpqsError, MpqsResult};
pub use orchestrator::Relations;
pub use trace::{Observer, SieveEvent};
pub use tuner::auto_config;

use num::{BigInt, Integer, Signed};

/// Factors `n` using parameters derived automatically from its size.
pub fn factor(n: &BigInt) -> MpqsResult<BigInt> {
    factor_with_config(n, auto_config(n))
}

/// Factors `n` with an explicit configuration. Pulls relations until
/// one yields gcd(x - y, n) that is neither 1 nor n.
pub fn factor_with_config(n: &BigInt, cfg: MpqsConfig) -> MpqsResult<BigInt> {
    for pair in relations(n, cfg) {
        let (x, y) = pair?;
        let diff = (&x - &y).mod_floor(n);
        let candidate = diff.gcd(n);
        if candidate.is_positive() && &candidate != n && candidate != BigInt::from(1) {
            return Ok(candidate);
        }
    }
    Err(MpqsError::ParametersTooSmall(
        "relation stream ended without producing a factor".to_string(),
    ))
}

/// The lazy sequence of (x, y) pairs with x^2 == y^2 (mod n) underlying
/// `factor`/`factor_with_config`.
pub fn relations(n: &BigInt, cfg: MpqsConfig) -> Relations {
    Relations::new(n, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_a_small_semiprime() {
        let n = BigInt::from(15);
        let f = factor(&n).unwrap();
        assert!(f == BigInt::from(3) || f == BigInt::from(5));
    }

    #[test]
    fn factors_8051() {
        let n = BigInt::from(8051);
        let f = factor(&n).unwrap();
        assert!(f == BigInt::from(83) || f == BigInt::from(97));
    }

    #[test]
    fn factors_product_of_two_nearby_primes() {
        let n = BigInt::from(104_729i64 * 104_723i64);
        let f = factor(&n).unwrap();
        assert!(f == BigInt::from(104_723i64) || f == BigInt::from(104_729i64));
    }

    #[test]
    fn zero_bound_config_raises_parameters_too_small() {
        let n = BigInt::from(15);
        let cfg = MpqsConfig {
            factor_base_bound: 0,
            sieving_half_width: 0,
            polynomial_exponent: 0,
            log_threshold: 0,
        };
        let err = factor_with_config(&n, cfg).unwrap_err();
        assert!(matches!(err, MpqsError::ParametersTooSmall(_)));
    }

    #[test]
    fn perfect_square_input_is_documented_as_rejected() {
        // n = 9 = 3^2: a prime-power input, out of scope. This crate
        // chooses to raise rather than guess a factor.
        let n = BigInt::from(9);
        let err = factor(&n).unwrap_err();
        assert!(matches!(err, MpqsError::InputNotComposite(_)));
    }

    #[test]
    #[ignore]
    fn factors_an_rsa_100_style_number() {
        let n = BigInt::parse_bytes(
            b"1522605027922533360535618378132637429718068114961380688657908494580122963258952897654000350692006139",
            10,
        )
        .unwrap();
        let f = factor(&n).unwrap();
        assert!(&f * (&n / &f) == n);
        assert!(f != BigInt::from(1) && &f != &n);
    }
}
