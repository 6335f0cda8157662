// src/sieve.rs
//
// Logarithmic sieve: per-prime starting offsets are derived once per
// polynomial (in the prime's own residue ring, avoiding a big-integer
// inverse per cell), then a strided subtraction pass walks the sieve
// array from each offset.

use num::{BigInt, Integer, Signed};

use crate::error::{MpqsError, MpqsResult};
use crate::factor_base::FactorBase;
use crate::numeric::{integer_log_2, mod_inverse_i64};
use crate::polynomial::Polynomial;

/// Result of sieving one polynomial: the log-residue array and the
/// half-width it was built over, needed to recover real indices.
pub struct SieveBlock {
    pub values: Vec<i32>,
    pub half_width: i64,
}

impl SieveBlock {
    pub fn survivors(&self, threshold: i32) -> Vec<i64> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, &v)| v <= threshold)
            .map(|(idx, _)| idx as i64 - self.half_width)
            .collect()
    }
}

/// Sieves Q(t) for t in [-m, m] against every factor-base prime,
/// returning the resulting log-residue array.
pub fn sieve_polynomial(
    n: &BigInt,
    poly: &Polynomial,
    fb: &FactorBase,
    half_width: i64,
) -> MpqsResult<SieveBlock> {
    let width = (2 * half_width + 1) as usize;
    let mut values = Vec::with_capacity(width);

    for i in 0..width {
        let t = BigInt::from(i as i64 - half_width);
        let q = poly.evaluate(&t);
        let magnitude = q.abs();
        let log = if magnitude.is_zero() {
            return Err(MpqsError::InternalInconsistency(
                "Q(t) == 0 during sieving: n is a perfect square and was not pre-checked"
                    .to_string(),
            ));
        } else {
            integer_log_2(&magnitude) as i32
        };
        values.push(log);
    }

    for entry in &fb.entries {
        let p = entry.p as i64;
        let log_p = entry.log2p as i32;

        // p = 2 is handled by the same branches below: `entry.roots` has
        // a single element for p=2, so the root loop below runs once.
        let a_mod_p = poly.a.mod_floor(&BigInt::from(p));
        let gcd_a_p = a_mod_p.gcd(&BigInt::from(p));

        if gcd_a_p == BigInt::from(1) {
            let a_mod_p_i = num::ToPrimitive::to_i64(&a_mod_p).unwrap_or(1);
            let a_inv = match mod_inverse_i64(a_mod_p_i, p) {
                Some(v) => v,
                None => {
                    return Err(MpqsError::InternalInconsistency(format!(
                        "a not invertible mod {} despite gcd check",
                        p
                    )))
                }
            };
            let b_mod_p = num::ToPrimitive::to_i64(&poly.b.mod_floor(&BigInt::from(p))).unwrap_or(0);

            for &r in &entry.roots {
                let r = r as i64;
                let offset = (half_width + (r - b_mod_p) * a_inv).rem_euclid(p);
                strike(&mut values, offset, p, log_p, width);
            }
        } else {
            // p | a: single offset via (2b)^-1 mod p.
            let two_b_mod_p = (2 * &poly.b).mod_floor(&BigInt::from(p));
            let two_b_i = num::ToPrimitive::to_i64(&two_b_mod_p).unwrap_or(0);
            let inv = match mod_inverse_i64(two_b_i, p) {
                Some(v) => v,
                None => {
                    return Err(MpqsError::InternalInconsistency(format!(
                        "p | a but 2b not invertible mod {}: implies p | n",
                        p
                    )))
                }
            };
            let c_mod_p = num::ToPrimitive::to_i64(&poly.c.mod_floor(&BigInt::from(p))).unwrap_or(0);
            let offset = (half_width - c_mod_p * inv).rem_euclid(p);
            strike(&mut values, offset, p, log_p, width);
        }
    }

    Ok(SieveBlock { values, half_width })
}

fn strike(values: &mut [i32], start: i64, p: i64, log_p: i32, width: usize) {
    let mut idx = start;
    while (idx as usize) < width {
        values[idx as usize] -= log_p;
        idx += p;
    }
}
