//! Operations on a single error instruction.
//!
//! These accept any [`Instruction`] and fail with
//! [`DemError::InvalidArgument`](crate::DemError::InvalidArgument) when it is
//! not an error. Callers that already hold an [`ErrorInstruction`] can use
//! its methods directly.

use super::types::{ErrorInstruction, FaultComponent, Instruction};
use crate::error::Result;

/// Components of the instruction, split at separators.
pub fn components(instr: &Instruction) -> Result<Vec<FaultComponent>> {
    Ok(instr.as_error()?.components())
}

/// Net detectors flipped by the instruction, sorted.
pub fn detectors(instr: &Instruction) -> Result<Vec<u32>> {
    Ok(instr.as_error()?.detectors())
}

/// Net observables flipped by the instruction, sorted.
pub fn observables(instr: &Instruction) -> Result<Vec<u32>> {
    Ok(instr.as_error()?.observables())
}

/// True if the instruction is decomposed into more than one component.
pub fn has_separator(instr: &Instruction) -> Result<bool> {
    Ok(instr.as_error()?.has_separator())
}

/// Drop the given detectors from every component of the instruction.
pub fn remove_detectors(instr: &Instruction, ids: &[u32]) -> Result<ErrorInstruction> {
    Ok(instr.as_error()?.remove_detectors(ids))
}

/// Decomposition-insensitive form of the instruction.
pub fn canonical_order(instr: &Instruction) -> Result<ErrorInstruction> {
    Ok(instr.as_error()?.canonical_order())
}
