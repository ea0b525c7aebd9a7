//! Exact linear algebra over GF(2).
//!
//! Addition is XOR and multiplication is AND. Matrices are dense bit
//! buffers ([`Gf2Matrix`]); vectors are `0`/`1` byte slices.

// =============================================================================
// Submodules
// =============================================================================

/// Dense bit matrix storage.
pub mod matrix;

/// Row reduction, solving and basis decomposition.
pub mod solve;

// =============================================================================
// Public Re-exports
// =============================================================================

pub use matrix::Gf2Matrix;
pub use solve::{decompose_into_basis, decompose_labels_into_basis, row_reduce, solve};
