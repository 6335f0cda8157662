// src/orchestrator.rs
//
// Orchestrator: drives the (a, {b}) loop and the relation store until a
// kernel vector is available, then streams (x, y) pairs lazily.
// Implemented as an `Iterator` (states: pick a polynomial family,
// enumerate its b values, sieve, harvest, solve, emit, widen on
// exhaustion) rather than an internal `loop { ... }`, so dropping the
// stream releases everything with no extra cleanup.

use std::collections::VecDeque;

use log::{debug, info, warn};
use num::BigInt;

use crate::config::MpqsConfig;
use crate::error::{MpqsError, MpqsResult};
use crate::factor_base::{build_factor_base, FactorBase};
use crate::kernel;
use crate::numeric::is_perfect_square;
use crate::polynomial::{select_a_primes, target_prime_size, PolynomialFamily};
use crate::relation::harvest_block;
use crate::relation_store::RelationStore;
use crate::sieve::sieve_polynomial;
use crate::trace::{Observer, SieveEvent};

const KERNEL_ATTEMPT_BUDGET: u32 = 5;
const MAX_WIDENINGS: u32 = 20;

/// Lazy sequence of (x, y) pairs with x^2 == y^2 (mod n). Advancing it
/// steps the orchestrator's state machine; dropping it releases the
/// sieve array and relation store with nothing further to clean up.
pub struct Relations {
    n: BigInt,
    cfg: MpqsConfig,
    fb: MpqsResult<FactorBase>,
    store: RelationStore,
    family: Option<PolynomialFamily>,
    poly_index: u32,
    seed_counter: u64,
    widenings: u32,
    pending: VecDeque<(BigInt, BigInt)>,
    observer: Option<Observer>,
    fatal: Option<MpqsError>,
}

impl Relations {
    pub fn new(n: &BigInt, cfg: MpqsConfig) -> Self {
        Self::with_observer(n, cfg, None)
    }

    pub fn with_observer(n: &BigInt, cfg: MpqsConfig, observer: Option<Observer>) -> Self {
        let fatal = precondition_error(n);
        let fb = build_factor_base(n, cfg.factor_base_bound);

        Relations {
            n: n.clone(),
            cfg,
            fb,
            store: RelationStore::new(),
            family: None,
            poly_index: 0,
            seed_counter: 0,
            widenings: 0,
            pending: VecDeque::new(),
            observer,
            fatal,
        }
    }

    fn emit(&self, event: SieveEvent) {
        if let Some(observer) = &self.observer {
            observer(&event);
        }
    }

    /// Extra columns beyond the row count before the matrix is handed to
    /// the solver, guarding against a solver that returns trivial
    /// (empty) kernel vectors when given no headroom.
    fn slack(&self) -> usize {
        3 * (self.cfg.polynomial_exponent as usize + 2)
    }

    fn advance_a(&mut self) -> MpqsResult<()> {
        let k = self.cfg.polynomial_exponent;
        let m = self.cfg.sieving_half_width as i64;

        let a_factors = match &self.family {
            None => {
                // First family. k=0 stays trivial; any k>0 picks fresh
                // primes around the target size.
                if k == 0 {
                    Vec::new()
                } else {
                    let target = target_prime_size(&self.n, m.max(1), k);
                    select_a_primes(&self.n, k, target)?
                }
            }
            Some(fam) if fam.a_factors.is_empty() => {
                // Exhausted the k=0 trivial family: jump to k=1.
                let target = target_prime_size(&self.n, m.max(1), 1);
                self.cfg.polynomial_exponent = 1;
                select_a_primes(&self.n, 1, target)?
            }
            Some(fam) => {
                // Drop the smallest factor, extend past the current max.
                let mut factors = fam.a_factors.clone();
                let max = *factors.iter().max().unwrap_or(&2);
                factors.remove(0);
                let mut candidate = crate::numeric::next_prime(&BigInt::from(max));
                loop {
                    let p = num::ToPrimitive::to_u64(&candidate).ok_or_else(|| {
                        MpqsError::ParametersTooSmall(
                            "a-prime extension exceeded machine word size".to_string(),
                        )
                    })?;
                    if !factors.contains(&p) && crate::numeric::jacobi_u64(&self.n, p) == 1 {
                        factors.push(p);
                        break;
                    }
                    candidate = crate::numeric::next_prime(&candidate);
                }
                factors.sort_unstable();
                factors
            }
        };

        let family = PolynomialFamily::from_primes(&self.n, a_factors)?;
        debug!(
            "switching polynomial family: a = {}, {} members",
            family.a, family.num_polynomials
        );
        self.family = Some(family);
        self.poly_index = 0;
        Ok(())
    }

    fn gather_one_polynomial(&mut self) -> MpqsResult<()> {
        if self.family.is_none() || self.poly_index >= self.family.as_ref().unwrap().num_polynomials {
            self.advance_a()?;
        }

        let (a, a_factors, poly) = {
            let family = self.family.as_ref().expect("just ensured by advance_a");
            let poly = family.polynomial(&self.n, self.poly_index)?;
            (family.a.clone(), family.a_factors.clone(), poly)
        };
        self.poly_index += 1;

        let fb = match &self.fb {
            Ok(fb) => fb.clone(),
            Err(e) => return Err(e.clone()),
        };
        let block = sieve_polynomial(&self.n, &poly, &fb, self.cfg.sieving_half_width as i64)?;
        let survivors = block.survivors(self.cfg.log_threshold as i32);
        let relations = harvest_block(&poly, &a_factors, &fb, &survivors)?;

        let added = self.store.extend(relations);
        if added > 0 {
            self.emit(SieveEvent::RelationsHarvested {
                total: self.store.len(),
            });
            debug!("relation store grew to {} rows", self.store.len());
        }
        self.emit(SieveEvent::PolynomialSwitched {
            a,
            poly_index: self.poly_index,
        });
        Ok(())
    }

    fn widen(&mut self) -> MpqsResult<()> {
        self.widenings += 1;
        if self.widenings > MAX_WIDENINGS {
            return Err(MpqsError::ParametersTooSmall(
                "relation stream could not be widened further".to_string(),
            ));
        }

        let k = self.cfg.polynomial_exponent as u64;
        self.cfg.factor_base_bound += 50 * (k + 1);
        self.cfg.sieving_half_width += 50 * (k + 1) * (k + 1);

        self.fb = build_factor_base(&self.n, self.cfg.factor_base_bound);
        self.fb.as_ref().map_err(|e| e.clone())?;

        warn!(
            "kernel driver exhausted its attempt budget; widened to B={}, m={}",
            self.cfg.factor_base_bound, self.cfg.sieving_half_width
        );
        self.emit(SieveEvent::Widened {
            new_bound: self.cfg.factor_base_bound,
            new_half_width: self.cfg.sieving_half_width,
        });
        Ok(())
    }

    fn step(&mut self) -> MpqsResult<()> {
        while !self.store.ready(self.slack()) {
            self.gather_one_polynomial()?;
        }

        self.store.prune_to_fixpoint();
        self.store.cap_columns(self.slack());

        let pairs = kernel::extract_pairs(&self.n, &self.store, self.seed_counter, KERNEL_ATTEMPT_BUDGET)?;
        self.seed_counter += KERNEL_ATTEMPT_BUDGET as u64;

        if pairs.is_empty() {
            self.widen()
        } else {
            info!("kernel driver produced {} candidate pair(s)", pairs.len());
            self.pending.extend(pairs);
            Ok(())
        }
    }
}

impl Iterator for Relations {
    type Item = MpqsResult<(BigInt, BigInt)>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.fatal.clone() {
            return Some(Err(err));
        }
        if let Err(e) = &self.fb {
            let e = e.clone();
            self.fatal = Some(e.clone());
            return Some(Err(e));
        }

        loop {
            if let Some(pair) = self.pending.pop_front() {
                return Some(Ok(pair));
            }
            if let Err(e) = self.step() {
                self.fatal = Some(e.clone());
                return Some(Err(e));
            }
        }
    }
}

fn precondition_error(n: &BigInt) -> Option<MpqsError> {
    use num::Integer;

    if n.is_even() {
        return Some(MpqsError::InputNotComposite(
            "n is even; the sieve requires an odd composite".to_string(),
        ));
    }
    if is_perfect_square(n) {
        return Some(MpqsError::InputNotComposite(
            "n is a perfect square; a prime-power input is out of scope".to_string(),
        ));
    }
    None
}
