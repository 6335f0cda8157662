// src/relation_store.rs
//
// Relation store and matrix assembler: accumulates harvested relations
// keyed by x, drops rows that can never help cancel (a prime whose odd
// exponent occurs in exactly one row), and renders the survivors as a
// dense-renumbered sparse GF(2) matrix on demand.

use std::collections::{BTreeMap, BTreeSet};

use num::BigInt;

use crate::matrix::SparseColumnMatrix;
use crate::relation::{ExponentMap, Relation};

/// Holds every distinct relation harvested so far, keyed by its `x`
/// value: no two stored relations may share an x key.
#[derive(Default)]
pub struct RelationStore {
    relations: BTreeMap<BigInt, ExponentMap>,
}

impl RelationStore {
    pub fn new() -> Self {
        RelationStore {
            relations: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Inserts a relation if its x key is new. Returns true if it grew
    /// the store.
    pub fn insert(&mut self, relation: Relation) -> bool {
        if self.relations.contains_key(&relation.x) {
            return false;
        }
        self.relations.insert(relation.x, relation.exponents);
        true
    }

    pub fn extend(&mut self, relations: Vec<Relation>) -> usize {
        relations.into_iter().filter(|r| self.relations.get(&r.x).is_none()).fold(0, |count, r| {
            self.relations.insert(r.x.clone(), r.exponents);
            count + 1
        })
    }

    /// Iteratively drops relations containing a prime whose odd-exponent
    /// occurrence count across the whole store is exactly one (such a
    /// prime can never cancel in a GF(2) sum). A no-op if run again once
    /// it reaches a fixpoint.
    pub fn prune_to_fixpoint(&mut self) {
        loop {
            let mut odd_occurrences: BTreeMap<i64, usize> = BTreeMap::new();
            for exponents in self.relations.values() {
                for (&prime, &exp) in exponents {
                    if exp % 2 == 1 {
                        *odd_occurrences.entry(prime).or_insert(0) += 1;
                    }
                }
            }

            let dead_primes: BTreeSet<i64> = odd_occurrences
                .into_iter()
                .filter(|&(_, count)| count == 1)
                .map(|(p, _)| p)
                .collect();

            if dead_primes.is_empty() {
                break;
            }

            let doomed: Vec<BigInt> = self
                .relations
                .iter()
                .filter(|(_, exponents)| {
                    exponents
                        .iter()
                        .any(|(prime, &exp)| exp % 2 == 1 && dead_primes.contains(prime))
                })
                .map(|(x, _)| x.clone())
                .collect();

            if doomed.is_empty() {
                break;
            }
            for x in doomed {
                self.relations.remove(&x);
            }
        }
    }

    /// True once the store has more columns than rows plus slack,
    /// i.e. it is safe to hand to the solver.
    pub fn ready(&self, slack: usize) -> bool {
        let distinct_primes = self.distinct_odd_primes();
        self.relations.len() > distinct_primes.len() + slack
    }

    fn distinct_odd_primes(&self) -> BTreeSet<i64> {
        let mut primes = BTreeSet::new();
        for exponents in self.relations.values() {
            for (&prime, &exp) in exponents {
                if exp % 2 == 1 {
                    primes.insert(prime);
                }
            }
        }
        primes
    }

    /// Caps the harvested column count at rows + slack, keeping the
    /// lowest-x relations (arbitrary but stable order), to bound solver
    /// cost.
    pub fn cap_columns(&mut self, slack: usize) {
        let distinct_primes = self.distinct_odd_primes().len();
        let cap = distinct_primes + slack;
        while self.relations.len() > cap {
            if let Some(last_key) = self.relations.keys().next_back().cloned() {
                self.relations.remove(&last_key);
            } else {
                break;
            }
        }
    }

    /// Builds the dense-renumbered sparse GF(2) matrix from the current
    /// store: rows are the distinct odd-exponent primes (plus the -1
    /// sentinel when present), columns are relations in x order.
    pub fn build_matrix(&self) -> (SparseColumnMatrix, Vec<BigInt>) {
        let row_primes: Vec<i64> = self.distinct_odd_primes().into_iter().collect();
        let row_index: BTreeMap<i64, usize> =
            row_primes.iter().enumerate().map(|(i, &p)| (p, i)).collect();

        let mut columns = Vec::with_capacity(self.relations.len());
        let mut keys = Vec::with_capacity(self.relations.len());

        for (x, exponents) in &self.relations {
            let mut rows: BTreeSet<usize> = BTreeSet::new();
            for (&prime, &exp) in exponents {
                if exp % 2 == 1 {
                    rows.insert(row_index[&prime]);
                }
            }
            columns.push(rows);
            keys.push(x.clone());
        }

        (
            SparseColumnMatrix {
                num_rows: row_primes.len(),
                columns,
            },
            keys,
        )
    }

    pub fn exponents_for(&self, x: &BigInt) -> Option<&ExponentMap> {
        self.relations.get(x)
    }
}
