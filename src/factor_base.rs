// src/factor_base.rs
//
// Factor-base construction: enumerates primes p <= B admissible for n
// (p == 2, or n is a quadratic residue mod p), storing both modular
// roots of n per prime alongside the integer log the sieve subtracts.

use num::BigInt;

use crate::error::{MpqsError, MpqsResult};
use crate::numeric::{integer_log_2, jacobi_u64, next_prime, sqrts_mod_prime};

/// One admitted factor-base prime: its modular roots of `n` and the
/// integer log used by the sieve's subtraction step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorBaseEntry {
    pub p: u64,
    /// One root for p=2, two (possibly equal) roots otherwise.
    pub roots: Vec<u64>,
    pub log2p: u32,
}

/// The ordered factor base. The sign-tracking "-1" sentinel is understood
/// by every caller but not materialised here as an entry — callers that
/// need a row index for it reserve one themselves.
#[derive(Debug, Clone)]
pub struct FactorBase {
    pub entries: Vec<FactorBaseEntry>,
}

impl FactorBase {
    pub fn largest_prime(&self) -> u64 {
        self.entries.last().map(|e| e.p).unwrap_or(1)
    }

    pub fn primes(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.p).collect()
    }
}

/// Builds the factor base for `n` bounded by `bound`: every prime p <= bound
/// with p == 2 or Jacobi(n mod p, p) == 1.
pub fn build_factor_base(n: &BigInt, bound: u64) -> MpqsResult<FactorBase> {
    let mut entries = Vec::new();
    let mut candidate = BigInt::from(1);

    while candidate < BigInt::from(bound) {
        candidate = next_prime(&candidate);
        let p = match num::ToPrimitive::to_u64(&candidate) {
            Some(p) if p <= bound => p,
            _ => break,
        };

        if p == 2 {
            let (r, _) = sqrts_mod_prime(n, 2).expect("p=2 always admitted");
            entries.push(FactorBaseEntry {
                p: 2,
                roots: vec![r],
                log2p: 1,
            });
            continue;
        }

        if jacobi_u64(n, p) != 1 {
            continue;
        }

        let (r1, r2) = sqrts_mod_prime(n, p).expect("jacobi==1 implies a root exists");
        entries.push(FactorBaseEntry {
            p,
            roots: vec![r1, r2],
            log2p: integer_log_2(&BigInt::from(p)),
        });
    }

    if entries.is_empty() {
        return Err(MpqsError::ParametersTooSmall(format!(
            "no primes <= {} admitted to the factor base",
            bound
        )));
    }

    Ok(FactorBase { entries })
}
