//! Property-based tests for the GF(2) solver.

use prav_dem::{row_reduce, solve, DemError, Gf2Matrix};
use proptest::prelude::*;

fn arb_matrix(max_rows: usize, max_cols: usize) -> impl Strategy<Value = Vec<Vec<u8>>> {
    (1..=max_rows, 1..=max_cols).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec(0u8..=1, cols), rows)
    })
}

proptest! {
    /// Property: b = A·x0 is always solvable and the solution satisfies it.
    ///
    /// The returned x need not equal x0 when A has dependent columns.
    #[test]
    fn prop_solve_consistent_system(
        (rows, x0) in arb_matrix(8, 70).prop_flat_map(|rows| {
            let cols = rows[0].len();
            (Just(rows), prop::collection::vec(0u8..=1, cols))
        })
    ) {
        let a = Gf2Matrix::from_rows(&rows).unwrap();
        let b = a.mul_vec(&x0).unwrap();
        let x = solve(&a, &b).unwrap();
        prop_assert_eq!(a.mul_vec(&x).unwrap(), b);
    }

    /// Property: solve either satisfies A·x = b or reports infeasibility.
    #[test]
    fn prop_solve_is_sound(
        (rows, b) in arb_matrix(8, 8).prop_flat_map(|rows| {
            let n = rows.len();
            (Just(rows), prop::collection::vec(0u8..=1, n))
        })
    ) {
        let a = Gf2Matrix::from_rows(&rows).unwrap();
        match solve(&a, &b) {
            Ok(x) => {
                prop_assert_eq!(a.mul_vec(&x).unwrap(), b);
            }
            Err(e) => {
                prop_assert_eq!(e, DemError::InfeasibleSystem);
            }
        }
    }

    /// Property: row reduction is idempotent.
    #[test]
    fn prop_row_reduce_idempotent(rows in arb_matrix(8, 10), skip in any::<bool>()) {
        let a = Gf2Matrix::from_rows(&rows).unwrap();
        let once = row_reduce(&a, skip);
        prop_assert_eq!(row_reduce(&once, skip), once);
    }
}
