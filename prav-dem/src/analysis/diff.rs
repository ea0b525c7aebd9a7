//! Decomposition-insensitive comparison of models.

use std::collections::HashSet;

use crate::dem::{Dem, ErrorInstruction, Instruction, Target};
use crate::error::Result;

/// Exact identity of a canonical error: probability bits and ordered targets.
type CanonicalKey = (u64, Vec<Target>);

fn key(canonical: &ErrorInstruction) -> CanonicalKey {
    // 0.0 and -0.0 compare equal as floats; keep them equal here too.
    let p = if canonical.probability() == 0.0 {
        0.0
    } else {
        canonical.probability()
    };
    (p.to_bits(), canonical.targets().to_vec())
}

fn canonical_errors(dem: &Dem) -> Vec<ErrorInstruction> {
    dem.errors().map(ErrorInstruction::canonical_order).collect()
}

/// Error instructions of `a` absent from `b`, and of `b` absent from `a`.
///
/// Both models are canonicalized first, so decomposition and target order
/// do not matter. Matching is exact on probability. Non-error instructions
/// are ignored. The returned models hold canonical instructions in the
/// order of their source model.
#[must_use]
pub fn dem_difference(a: &Dem, b: &Dem) -> (Dem, Dem) {
    let a = canonical_errors(a);
    let b = canonical_errors(b);
    (only_in(&a, &b), only_in(&b, &a))
}

fn only_in(left: &[ErrorInstruction], right: &[ErrorInstruction]) -> Dem {
    let right: HashSet<CanonicalKey> = right.iter().map(key).collect();
    left.iter()
        .filter(|e| !right.contains(&key(e)))
        .cloned()
        .map(Instruction::Error)
        .collect()
}

/// True if some error instruction of `dem` has the same canonical form as
/// `instr`.
///
/// # Errors
///
/// [`DemError::InvalidArgument`](crate::DemError::InvalidArgument) if
/// `instr` is not an error.
pub fn is_instr_in_dem(instr: &Instruction, dem: &Dem) -> Result<bool> {
    let wanted = key(&instr.as_error()?.canonical_order());
    Ok(dem.errors().any(|e| key(&e.canonical_order()) == wanted))
}
