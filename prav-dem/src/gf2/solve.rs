//! Gaussian elimination and linear-system solving over GF(2).
//!
//! Only row operations are used (swaps and row additions), never column
//! operations. With `skip_last_column = false` the reduced form looks like
//!
//! ```text
//! 100**0***0
//! 010**0***0
//! 001**0***0
//! 000001***0
//! 0000000001
//! 0000000000
//! ```
//!
//! and with `skip_last_column = true` the augmented column is left
//! unpivoted, which is what [`solve`] reads the solution from.

use std::collections::BTreeMap;

use super::matrix::Gf2Matrix;
use crate::error::{DemError, Result};

/// Row-reduce `a` in place and return the pivot columns in encounter order.
///
/// Pivot selection is deterministic: for each column left to right, the
/// first row at or below the current pivot row holding a 1 is swapped into
/// place and XOR-ed into every other row with a 1 in that column. Columns
/// without a pivot are skipped. Elimination stops once every row holds a
/// pivot.
pub(crate) fn reduce_rows_in_place(a: &mut Gf2Matrix, skip_last_column: bool) -> Vec<usize> {
    let n = a.rows();
    let m = if skip_last_column {
        a.cols().saturating_sub(1)
    } else {
        a.cols()
    };

    let mut pivots = Vec::new();
    let mut pivot_row = 0;
    for col in 0..m {
        if pivot_row == n {
            break;
        }

        let Some(row) = (pivot_row..n).find(|&row| a.get(row, col)) else {
            continue;
        };
        a.swap_rows(pivot_row, row);

        for other in 0..n {
            if other != pivot_row && a.get(other, col) {
                a.xor_row_into(pivot_row, other);
            }
        }

        pivots.push(col);
        pivot_row += 1;
    }
    pivots
}

/// Row-reduce a copy of `a` (see the module docs for the resulting shape).
///
/// If `skip_last_column` is set the last column is never used as a pivot
/// column; this is how the augmented system `[A|b]` is reduced.
#[must_use]
pub fn row_reduce(a: &Gf2Matrix, skip_last_column: bool) -> Gf2Matrix {
    let mut reduced = a.clone();
    reduce_rows_in_place(&mut reduced, skip_last_column);
    reduced
}

/// Return some `x` with `a · x = b (mod 2)`.
///
/// Free variables are fixed at 0, so the solution is the one dictated by
/// the pivot order and is not necessarily of minimum weight.
///
/// # Errors
///
/// - [`DemError::InvalidArgument`] if `b` does not have `a.rows()` binary entries.
/// - [`DemError::InfeasibleSystem`] if no solution exists.
pub fn solve(a: &Gf2Matrix, b: &[u8]) -> Result<Vec<u8>> {
    let mut aug = a.augment(b)?;
    let pivots = reduce_rows_in_place(&mut aug, true);

    let last = a.cols();
    // Rows below the rank have all-zero coefficients.
    if (pivots.len()..aug.rows()).any(|r| aug.get(r, last)) {
        return Err(DemError::InfeasibleSystem);
    }

    let mut x = vec![0u8; a.cols()];
    for (i, &col) in pivots.iter().enumerate() {
        x[col] = u8::from(aug.get(i, last));
    }
    Ok(x)
}

/// Express `vector` as a sum of the columns of `basis`.
///
/// Returns the coefficient vector `x` with `basis · x = vector`.
pub fn decompose_into_basis(vector: &[u8], basis: &Gf2Matrix) -> Result<Vec<u8>> {
    solve(basis, vector)
}

/// Express a set of labels as the symmetric difference of some labelled
/// basis sets.
///
/// Each basis element is a key with the labels it covers. The matrix rows
/// are the union of every label seen, in sorted order; the columns follow
/// `basis`. Returns the keys of the selected elements in basis order.
/// Labels are sets, so repeated labels count once.
///
/// ```ignore
/// let basis = [("Z1", vec!["D1", "D2"]), ("Z2", vec!["D2", "D3"]), ("Z3", vec!["D3", "D4"])];
/// let keys = decompose_labels_into_basis(&["D1", "D2", "D3", "D4"], &basis)?;
/// assert_eq!(keys, vec!["Z1", "Z3"]);
/// ```
pub fn decompose_labels_into_basis<K, L>(vector: &[L], basis: &[(K, Vec<L>)]) -> Result<Vec<K>>
where
    K: Clone,
    L: Ord + Clone,
{
    let mut rows: BTreeMap<L, usize> = BTreeMap::new();
    for label in vector.iter().chain(basis.iter().flat_map(|(_, ls)| ls.iter())) {
        rows.entry(label.clone()).or_insert(0);
    }
    for (i, row) in rows.values_mut().enumerate() {
        *row = i;
    }

    let mut matrix = Gf2Matrix::zeros(rows.len(), basis.len());
    for (c, (_, labels)) in basis.iter().enumerate() {
        for label in labels {
            matrix.set(rows[label], c, true);
        }
    }
    let mut b = vec![0u8; rows.len()];
    for label in vector {
        b[rows[label]] = 1;
    }

    let x = solve(&matrix, &b)?;
    Ok(basis
        .iter()
        .zip(x)
        .filter(|(_, selected)| *selected == 1)
        .map(|((key, _), _)| key.clone())
        .collect())
}
