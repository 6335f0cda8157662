// src/kernel.rs
//
// Kernel driver: invokes the GF(2) solver with successive seeds and
// reconstructs (x, y) pairs from the returned kernel vectors.

use std::collections::BTreeMap;

use num::{BigInt, Integer};

use crate::error::{MpqsError, MpqsResult};
use crate::matrix::{kernel_basis, seeded_kernel_vector};
use crate::relation_store::RelationStore;

/// Computes the null-space basis once, then tries up to `attempts`
/// seeded combinations, reconstructing one (x, y) pair per non-empty
/// combination. Returns an empty vector if the basis itself is empty
/// (store has no dependency at all yet) — the orchestrator takes that
/// as a signal to widen parameters.
pub fn extract_pairs(
    n: &BigInt,
    store: &RelationStore,
    seed_start: u64,
    attempts: u32,
) -> MpqsResult<Vec<(BigInt, BigInt)>> {
    let (matrix, keys) = store.build_matrix();
    let basis = kernel_basis(&matrix);
    if basis.is_empty() {
        return Ok(Vec::new());
    }

    let mut pairs = Vec::new();
    for offset in 0..attempts as u64 {
        let seed = seed_start + offset;
        let Some(vector) = seeded_kernel_vector(&basis, seed) else {
            continue;
        };
        if vector.is_empty() {
            continue;
        }
        pairs.push(reconstruct(n, store, &keys, &vector)?);
    }

    Ok(pairs)
}

fn reconstruct(
    n: &BigInt,
    store: &RelationStore,
    keys: &[BigInt],
    vector: &std::collections::BTreeSet<usize>,
) -> MpqsResult<(BigInt, BigInt)> {
    let mut x = BigInt::from(1);
    let mut exponent_sum: BTreeMap<i64, u32> = BTreeMap::new();

    for &col in vector {
        let key = &keys[col];
        x = (&x * key).mod_floor(n);

        let exponents = store.exponents_for(key).ok_or_else(|| {
            MpqsError::InternalInconsistency(
                "kernel vector referenced a column absent from the store".to_string(),
            )
        })?;
        for (&prime, &exp) in exponents {
            *exponent_sum.entry(prime).or_insert(0) += exp;
        }
    }

    let mut y = BigInt::from(1);
    for (&prime, &exp) in &exponent_sum {
        if exp % 2 != 0 {
            return Err(MpqsError::InternalInconsistency(format!(
                "kernel vector left prime {} with odd total exponent",
                prime
            )));
        }
        if prime == -1 {
            continue;
        }
        let half = BigInt::from(exp / 2);
        y = (&y * BigInt::from(prime).modpow(&half, n)).mod_floor(n);
    }

    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor_base::build_factor_base;
    use crate::polynomial::PolynomialFamily;
    use crate::relation::harvest_block;
    use crate::sieve::sieve_polynomial;

    #[test]
    fn reconstructs_pairs_satisfying_x_squared_equiv_y_squared() {
        let n = BigInt::from(8051);
        let fb = build_factor_base(&n, 60).unwrap();
        let fam = PolynomialFamily::trivial(&n);
        let poly = fam.polynomial(&n, 0).unwrap();
        let block = sieve_polynomial(&n, &poly, &fb, 80).unwrap();
        let survivors = block.survivors(14);
        let relations = harvest_block(&poly, &fam.a_factors, &fb, &survivors).unwrap();

        let mut store = RelationStore::new();
        store.extend(relations);
        store.prune_to_fixpoint();

        let pairs = extract_pairs(&n, &store, 0, 5).unwrap();
        for (x, y) in &pairs {
            let lhs = (x * x).mod_floor(&n);
            let rhs = (y * y).mod_floor(&n);
            assert_eq!(lhs, rhs);
        }
    }
}
