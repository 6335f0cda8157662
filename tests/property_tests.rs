// tests/property_tests.rs
//
// Integration-level checks for statistical and structural properties of
// the factoring pipeline, driven through the public API rather than
// crate internals (those get narrower unit coverage inside each module).

use mpqs::{auto_config, relations};
use num::{BigInt, Integer};

/// Over a prefix of emitted pairs for a composite n with two or more
/// distinct prime factors, at least one pair should yield a non-trivial
/// gcd(x-y, n). A handful of pairs is already enough in practice for
/// these test-sized n.
fn nontrivial_factor_found_within(n: &BigInt, attempts: usize) -> bool {
    let cfg = auto_config(n);
    for pair in relations(n, cfg).take(attempts) {
        let (x, y) = match pair {
            Ok(p) => p,
            Err(_) => continue,
        };
        let diff = (&x - &y).mod_floor(n);
        let g = diff.gcd(n);
        if g != BigInt::from(1) && &g != n {
            return true;
        }
    }
    false
}

#[test]
fn nontrivial_factor_surfaces_within_a_small_prefix() {
    for n in [BigInt::from(8051), BigInt::from(46_927i64), BigInt::from(15)] {
        assert!(
            nontrivial_factor_found_within(&n, 8),
            "expected a non-trivial factor for n = {} within 8 pairs",
            n
        );
    }
}

/// Relation correctness, observed across several pairs from a full run
/// rather than a single harvested block.
#[test]
fn emitted_pairs_satisfy_the_congruence() {
    let n = BigInt::from(8051);
    let cfg = auto_config(&n);

    for pair in relations(&n, cfg).take(5) {
        let (x, y) = pair.unwrap();
        let lhs = (&x * &x).mod_floor(&n);
        let rhs = (&y * &y).mod_floor(&n);
        assert_eq!(lhs, rhs);
    }
}

/// The relation store never holds two rows under the same x key, even
/// when the same x is inserted twice.
#[test]
fn relation_store_dedups_by_x_key() {
    use mpqs::relation_store::RelationStore;
    use mpqs::relation::Relation;

    let mut store = RelationStore::new();
    let first = Relation { x: BigInt::from(21), exponents: [(2, 1), (3, 1)].into_iter().collect() };
    let duplicate = Relation { x: BigInt::from(21), exponents: [(5, 1), (7, 1)].into_iter().collect() };

    assert_eq!(store.extend(vec![first]), 1);
    assert_eq!(store.extend(vec![duplicate]), 0);
    assert_eq!(store.len(), 1);
}
