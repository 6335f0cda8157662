// src/relation.rs
//
// Relation extraction from sieve survivors: trial-divides each survivor
// by the factor base, classifies what's left over as smooth, a
// large-prime partial, or worthless, then pairs up partials that share
// a large prime into full relations.

use std::collections::BTreeMap;

use num::{BigInt, Signed, Zero};
use rayon::prelude::*;

use crate::error::{MpqsError, MpqsResult};
use crate::factor_base::FactorBase;
use crate::numeric::{is_probable_prime, trial_divide};
use crate::polynomial::Polynomial;

/// Maps a prime (or the `-1` sign sentinel) to its exponent in a
/// relation's factorisation. Only odd/even parity is significant for
/// the matrix, but exact exponents are kept so relation products can be
/// reconstructed exactly (needed to extract the square root y later).
pub type ExponentMap = BTreeMap<i64, u32>;

#[derive(Debug, Clone)]
pub struct Relation {
    pub x: BigInt,
    pub exponents: ExponentMap,
}

enum Harvest {
    Smooth(Relation),
    Partial { x: BigInt, exponents: ExponentMap, large_prime: u64 },
    Discard,
}

/// Classifies and harvests every survivor offset `t` (relative to the
/// sieve's own center) of one polynomial into full relations and
/// partial relations, then performs single-large-prime pairing within
/// this block.
///
/// Classification of distinct survivors is independent work, so it runs
/// over a rayon thread pool; the resulting order is preserved, keeping
/// relations emitted within one polynomial in ascending-t order.
pub fn harvest_block(
    poly: &Polynomial,
    a_factors: &[u64],
    fb: &FactorBase,
    survivors: &[i64],
) -> MpqsResult<Vec<Relation>> {
    let primes = fb.primes();
    let largest = fb.largest_prime();

    let harvested: MpqsResult<Vec<Harvest>> = survivors
        .par_iter()
        .map(|&t| classify(poly, a_factors, &primes, largest, t))
        .collect();

    let mut smooth = Vec::new();
    let mut partials: Vec<(BigInt, ExponentMap, u64)> = Vec::new();
    for harvest in harvested? {
        match harvest {
            Harvest::Smooth(r) => smooth.push(r),
            Harvest::Partial { x, exponents, large_prime } => {
                partials.push((x, exponents, large_prime))
            }
            Harvest::Discard => {}
        }
    }

    smooth.extend(pair_partials(partials));
    Ok(smooth)
}

fn classify(
    poly: &Polynomial,
    a_factors: &[u64],
    primes: &[u64],
    largest_fb_prime: u64,
    t: i64,
) -> MpqsResult<Harvest> {
    let t_big = BigInt::from(t);
    let x = &poly.a * &t_big + &poly.b;
    let q = poly.evaluate(&t_big);

    if q.is_zero() {
        return Err(MpqsError::InternalInconsistency(
            "Q(t) == 0: n is a perfect square, should have been pre-checked".to_string(),
        ));
    }

    let (factors, cofactor) = trial_divide(primes, &q);

    let mut exponents = ExponentMap::new();
    if q.is_negative() {
        exponents.insert(-1, 1);
    }
    for (p, e) in factors {
        exponents.insert(p as i64, e);
    }
    for &p in a_factors {
        *exponents.entry(p as i64).or_insert(0) += 2;
    }

    if cofactor == BigInt::from(1) {
        return Ok(Harvest::Smooth(Relation { x, exponents }));
    }

    let cofactor_u = match num::ToPrimitive::to_u64(&cofactor) {
        Some(v) => v,
        None => return Ok(Harvest::Discard),
    };

    if cofactor_u <= largest_fb_prime {
        // Would have been stripped by trial division already; a leftover
        // this small that isn't 1 means it shares no root with the base.
        return Ok(Harvest::Discard);
    }

    if is_probable_prime(&cofactor) {
        return Ok(Harvest::Partial {
            x,
            exponents,
            large_prime: cofactor_u,
        });
    }

    Ok(Harvest::Discard)
}

/// Pairs partials sharing the block's most frequent large prime,
/// emitting one combined relation per non-pivot partial. The pivot
/// itself is dropped (its large prime would stay odd).
fn pair_partials(partials: Vec<(BigInt, ExponentMap, u64)>) -> Vec<Relation> {
    if partials.len() < 2 {
        return Vec::new();
    }

    let mut counts: BTreeMap<u64, usize> = BTreeMap::new();
    for (_, _, lp) in &partials {
        *counts.entry(*lp).or_insert(0) += 1;
    }

    let best = counts
        .iter()
        .filter(|&(_, &count)| count >= 2)
        .max_by_key(|&(_, &count)| count)
        .map(|(&lp, _)| lp);

    let large_prime = match best {
        Some(lp) => lp,
        None => return Vec::new(),
    };

    let mut matching: Vec<usize> = partials
        .iter()
        .enumerate()
        .filter(|(_, (_, _, lp))| *lp == large_prime)
        .map(|(i, _)| i)
        .collect();

    let pivot_idx = matching.remove(0);
    let (pivot_x, pivot_exp, _) = &partials[pivot_idx];

    matching
        .into_iter()
        .map(|i| {
            let (x, exp, _) = &partials[i];
            let combined_x = pivot_x * x;
            let mut combined_exp = pivot_exp.clone();
            for (&prime, &e) in exp {
                *combined_exp.entry(prime).or_insert(0) += e;
            }
            Relation {
                x: combined_x,
                exponents: combined_exp,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor_base::build_factor_base;
    use crate::polynomial::PolynomialFamily;
    use crate::sieve::sieve_polynomial;

    #[test]
    fn relations_satisfy_x_squared_equiv_product_mod_n() {
        let n = BigInt::from(8051);
        let fb = build_factor_base(&n, 50).unwrap();
        let fam = PolynomialFamily::trivial(&n);
        let poly = fam.polynomial(&n, 0).unwrap();
        let block = sieve_polynomial(&n, &poly, &fb, 40).unwrap();
        let survivors = block.survivors(14);

        let relations = harvest_block(&poly, &fam.a_factors, &fb, &survivors).unwrap();
        assert!(!relations.is_empty());

        for rel in &relations {
            let mut product = BigInt::from(1);
            for (&prime, &exp) in &rel.exponents {
                if prime == -1 {
                    continue;
                }
                product *= BigInt::from(prime).pow(exp);
            }
            let lhs = (&rel.x * &rel.x) % &n;
            let rhs = &product % &n;
            assert_eq!(lhs, rhs);
        }
    }
}
