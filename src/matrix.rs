// src/matrix.rs
//
// Sparse GF(2) linear system and its solver. Relations at this sieve's
// scale touch only a tiny fraction of the factor base each, so every
// column is stored as the sparse set of rows where its exponent is odd
// rather than a dense bit vector.

use std::collections::BTreeSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Columns are relations, rows are distinct odd-exponent primes (dense
/// indices assigned by the relation store). Each column is the sparse
/// set of rows where that relation's exponent is odd.
#[derive(Debug, Clone)]
pub struct SparseColumnMatrix {
    pub num_rows: usize,
    pub columns: Vec<BTreeSet<usize>>,
}

/// Computes a spanning set of the GF(2) null space of `matrix` via
/// column-reduction Gaussian elimination: each column is reduced
/// against the lowest-row pivot established so far; a column that
/// reduces to the zero vector records a dependency, i.e. the set of
/// original column indices whose sum is the zero vector: a kernel
/// vector.
pub fn kernel_basis(matrix: &SparseColumnMatrix) -> Vec<BTreeSet<usize>> {
    let mut vectors: Vec<BTreeSet<usize>> = matrix.columns.clone();
    let mut histories: Vec<BTreeSet<usize>> = (0..vectors.len())
        .map(|i| {
            let mut s = BTreeSet::new();
            s.insert(i);
            s
        })
        .collect();

    let mut pivot_col_for_row: std::collections::HashMap<usize, usize> =
        std::collections::HashMap::new();
    let mut kernel = Vec::new();

    for col in 0..vectors.len() {
        loop {
            let lowest_row = match vectors[col].iter().next() {
                Some(&r) => r,
                None => break,
            };

            match pivot_col_for_row.get(&lowest_row) {
                Some(&pivot_col) if pivot_col != col => {
                    let other_vec = vectors[pivot_col].clone();
                    xor_in_place(&mut vectors[col], &other_vec);
                    let other_hist = histories[pivot_col].clone();
                    xor_in_place(&mut histories[col], &other_hist);
                }
                _ => {
                    pivot_col_for_row.insert(lowest_row, col);
                    break;
                }
            }
        }

        if vectors[col].is_empty() {
            kernel.push(histories[col].clone());
        }
    }

    kernel
}

fn xor_in_place(a: &mut BTreeSet<usize>, b: &BTreeSet<usize>) {
    for &item in b {
        if !a.remove(&item) {
            a.insert(item);
        }
    }
}

/// Picks a pseudo-random non-empty subset of the kernel basis and XORs
/// it into one combined kernel vector, seeded so repeated calls with
/// the same seed return the same vector and different seeds are likely
/// to return different ones.
pub fn seeded_kernel_vector(basis: &[BTreeSet<usize>], seed: u64) -> Option<BTreeSet<usize>> {
    if basis.is_empty() {
        return None;
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut combined = BTreeSet::new();
    let mut picked_any = false;

    for vector in basis {
        if rng.gen_bool(0.5) {
            xor_in_place(&mut combined, vector);
            picked_any = true;
        }
    }

    if !picked_any {
        xor_in_place(&mut combined, &basis[(seed as usize) % basis.len()]);
    }

    Some(combined)
}
