// tests/end_to_end_tests.rs
//
// Black-box scenarios against the public API: drive the whole pipeline
// through its entry points rather than poking at internals.

use mpqs::{auto_config, factor, factor_with_config, relations, MpqsConfig, MpqsError};
use num::BigInt;

fn init_logging() {
    let _ = env_logger::try_init();
}

#[test]
fn factors_15() {
    init_logging();
    let n = BigInt::from(15);
    let f = factor(&n).unwrap();
    assert!(f == BigInt::from(3) || f == BigInt::from(5));
}

#[test]
fn factors_8051() {
    init_logging();
    let n = BigInt::from(8051);
    let f = factor(&n).unwrap();
    assert!(f == BigInt::from(83) || f == BigInt::from(97));
}

#[test]
fn factors_product_of_two_nearby_primes() {
    // 104729 and 104723 are the two primes nearest 10^5.
    let n = BigInt::from(104_729i64) * BigInt::from(104_723i64);
    let f = factor(&n).unwrap();
    assert!(f == BigInt::from(104_723i64) || f == BigInt::from(104_729i64));
}

#[test]
fn zero_bound_config_raises_parameters_too_small() {
    let cfg = MpqsConfig {
        factor_base_bound: 0,
        sieving_half_width: 0,
        polynomial_exponent: 0,
        log_threshold: 0,
    };
    let err = factor_with_config(&BigInt::from(15), cfg).unwrap_err();
    assert!(matches!(err, MpqsError::ParametersTooSmall(_)));
}

#[test]
fn wide_half_width_collapsing_target_size_does_not_panic() {
    // A large sieving_half_width relative to n drives
    // target_prime_size's ratio to 0, collapsing the target a-prime
    // size to 3 and exercising the below-walk's floor case.
    let cfg = MpqsConfig {
        factor_base_bound: 50,
        sieving_half_width: 1_000_000,
        polynomial_exponent: 2,
        log_threshold: 12,
    };
    let _ = factor_with_config(&BigInt::from(8051), cfg);
}

#[test]
fn perfect_square_input_raises_input_not_composite() {
    // n = 9 = 3^2: prime-power input, documented as rejected rather
    // than guessed at.
    let err = factor(&BigInt::from(9)).unwrap_err();
    assert!(matches!(err, MpqsError::InputNotComposite(_)));
}

#[test]
fn auto_config_is_a_pure_function_of_n() {
    let n = BigInt::from(1_234_567_891i64);
    assert_eq!(auto_config(&n), auto_config(&n));
}

#[test]
fn relations_stream_emits_pairs_satisfying_x_squared_equiv_y_squared() {
    let n = BigInt::from(46_927i64); // 46927 = 167 * 281, an odd composite
    let cfg = auto_config(&n);
    let mut count = 0;
    for pair in relations(&n, cfg).take(2) {
        let (x, y) = pair.unwrap();
        let lhs = (&x * &x) % &n;
        let rhs = (&y * &y) % &n;
        assert_eq!(lhs, rhs);
        count += 1;
    }
    assert_eq!(count, 2);
}

#[test]
#[ignore] // slow: a ~100-digit semiprime, run explicitly with --ignored
fn factors_an_rsa_100_style_number() {
    init_logging();
    let n = BigInt::parse_bytes(
        b"1522605027922533360535618378132637429718068114961380688657908494580122963258952897654000350692006139",
        10,
    )
    .unwrap();
    let f = factor(&n).unwrap();
    assert!(&f * (&n / &f) == n);
    assert!(f != BigInt::from(1) && f != n);
}
