// src/numeric/mod.rs
//
// Number-theoretic primitives consumed by factor-base construction,
// self-initialisation and relation verification. Kept free of any
// sieve-specific types so it can be unit-tested in isolation.

pub mod gcd;
pub mod jacobi;
pub mod modsqrt;
pub mod primes;
pub mod root_utils;
pub mod trial_division;

pub use gcd::{extended_gcd, mod_inverse, mod_inverse_i64, GCD};
pub use jacobi::{jacobi, jacobi_u64};
pub use modsqrt::{crt_basis_for_square_factorisation, hensel_lift_square, sqrts_mod_prime};
pub use primes::{is_probable_prime, next_prime, prec_prime};
pub use root_utils::{integer_log_10, integer_log_2, integer_root, integer_square_root, is_perfect_square};
pub use trial_division::trial_divide;
