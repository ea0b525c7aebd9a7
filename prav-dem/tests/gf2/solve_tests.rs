//! Integration tests for GF(2) row reduction and solving.
//!
//! - Row reduction shape with and without the augmented column
//! - Solutions satisfy `A·x = b`
//! - Infeasible and malformed systems are rejected
//! - Basis decomposition by columns and by labels

use prav_dem::{decompose_into_basis, decompose_labels_into_basis, row_reduce, solve, DemError, Gf2Matrix};

// =============================================================================
// row_reduce()
// =============================================================================

#[test]
fn test_row_reduce_identity_is_fixed_point() {
    let id = Gf2Matrix::from_rows(&[[1u8, 0, 0], [0, 1, 0], [0, 0, 1]]).unwrap();
    assert_eq!(row_reduce(&id, false), id);
}

#[test]
fn test_row_reduce_skips_columns_without_pivot() {
    let a = Gf2Matrix::from_rows(&[[0u8, 1, 1, 0], [0, 1, 0, 1], [0, 0, 1, 1]]).unwrap();
    let r = row_reduce(&a, false);
    assert_eq!(
        r.to_rows(),
        vec![vec![0, 1, 0, 1], vec![0, 0, 1, 1], vec![0, 0, 0, 0]]
    );
}

#[test]
fn test_row_reduce_augmented_keeps_last_column_unpivoted() {
    // [A|b] with A = [[1, 1], [1, 1]], b = [1, 0]: the inconsistency shows
    // up as a zero coefficient row with a 1 in the last column.
    let aug = Gf2Matrix::from_rows(&[[1u8, 1, 1], [1, 1, 0]]).unwrap();
    let r = row_reduce(&aug, true);
    assert_eq!(r.to_rows(), vec![vec![1, 1, 1], vec![0, 0, 1]]);
}

// =============================================================================
// solve()
// =============================================================================

#[test]
fn test_solve_upper_triangular() {
    let a = Gf2Matrix::from_rows(&[[1u8, 1], [0, 1]]).unwrap();
    let x = solve(&a, &[1, 1]).unwrap();
    assert_eq!(a.mul_vec(&x).unwrap(), vec![1, 1]);
}

#[test]
fn test_solve_non_square() {
    let a = Gf2Matrix::from_rows(&[[1u8, 0, 1, 1], [0, 1, 1, 0], [1, 1, 0, 1]]).unwrap();
    let b = [0u8, 1, 1];
    let x = solve(&a, &b).unwrap();
    assert_eq!(x.len(), 4);
    assert_eq!(a.mul_vec(&x).unwrap(), b.to_vec());
}

#[test]
fn test_solve_zero_row_with_nonzero_rhs_is_infeasible() {
    let a = Gf2Matrix::from_rows(&[[1u8, 0], [0, 0]]).unwrap();
    assert_eq!(solve(&a, &[0, 1]), Err(DemError::InfeasibleSystem));
}

#[test]
fn test_solve_rejects_malformed_inputs() {
    let a = Gf2Matrix::from_rows(&[[1u8, 0], [0, 1]]).unwrap();
    assert!(matches!(solve(&a, &[1]), Err(DemError::InvalidArgument(_))));
    assert!(matches!(solve(&a, &[1, 2]), Err(DemError::InvalidArgument(_))));
}

#[test]
fn test_solve_without_rows() {
    let a = Gf2Matrix::zeros(0, 3);
    assert_eq!(solve(&a, &[]).unwrap(), vec![0, 0, 0]);
}

// =============================================================================
// decompose_into_basis()
// =============================================================================

#[test]
fn test_decompose_into_basis_columns() {
    let basis = Gf2Matrix::from_columns(4, &[[1u8, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 1]]).unwrap();
    let x = decompose_into_basis(&[1, 1, 1, 1], &basis).unwrap();
    assert_eq!(x, vec![1, 0, 1]);
    assert_eq!(basis.mul_vec(&x).unwrap(), vec![1, 1, 1, 1]);

    assert_eq!(
        decompose_into_basis(&[1, 0, 0, 0], &basis),
        Err(DemError::InfeasibleSystem)
    );
}

#[test]
fn test_decompose_labels_by_position() {
    let basis: Vec<(usize, Vec<&str>)> = [vec!["D1", "D2"], vec!["D2", "D3"], vec!["D3", "D4"]]
        .into_iter()
        .enumerate()
        .collect();
    let x = decompose_labels_into_basis(&["D1", "D2", "D3", "D4"], &basis).unwrap();
    assert_eq!(x, vec![0, 2]);
}

#[test]
fn test_decompose_labels_by_name() {
    let basis = [
        ("Z1", vec!["D1", "D2"]),
        ("Z2", vec!["D2", "D3"]),
        ("Z3", vec!["D3", "D4"]),
    ];
    let x = decompose_labels_into_basis(&["D1", "D2", "D3", "D4"], &basis).unwrap();
    assert_eq!(x, vec!["Z1", "Z3"]);

    assert_eq!(
        decompose_labels_into_basis(&["D1"], &basis),
        Err(DemError::InfeasibleSystem)
    );
}
