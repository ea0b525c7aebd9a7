//! Weight and membership queries over a model.

use std::collections::{BTreeMap, BTreeSet};

use crate::dem::{Dem, ErrorInstruction, Instruction};
use crate::error::{DemError, Result};

/// The error instruction with the most net detectors, and that count.
///
/// Ties keep the first instruction. The instruction is returned as given,
/// not canonicalized. An empty model returns `(0, error(0))` with no
/// targets.
#[must_use]
pub fn get_max_weight_hyperedge(dem: &Dem) -> (usize, Instruction) {
    let mut best: Option<(usize, &ErrorInstruction)> = None;
    for error in dem.errors() {
        let weight = error.detector_weight();
        if best.map_or(true, |(max, _)| weight > max) {
            best = Some((weight, error));
        }
    }
    match best {
        Some((weight, error)) => (weight, Instruction::Error(error.clone())),
        None => (0, Instruction::Error(ErrorInstruction::from_parts(0.0, Vec::new()))),
    }
}

/// Detectors targeted by at least one error instruction.
///
/// Detectors that are only declared are not included.
#[must_use]
pub fn get_flippable_detectors(dem: &Dem) -> BTreeSet<u32> {
    dem.errors()
        .flat_map(|e| e.targets().iter().filter_map(|t| t.detector_id()))
        .collect()
}

/// Logical observables targeted by at least one error instruction.
#[must_use]
pub fn get_flippable_logicals(dem: &Dem) -> BTreeSet<u32> {
    dem.errors()
        .flat_map(|e| e.targets().iter().filter_map(|t| t.observable_id()))
        .collect()
}

/// True if no error instruction flips more than two detectors.
#[must_use]
pub fn contains_only_edges(dem: &Dem) -> bool {
    dem.errors().all(|e| e.detector_weight() <= 2)
}

/// For each queried detector, the positions of the error instructions that
/// flip it.
///
/// Positions count error instructions only, so structural instructions
/// interleaved in `dem` do not shift them. Every queried detector has an
/// entry, possibly empty.
///
/// # Errors
///
/// [`DemError::InvalidArgument`] if a queried detector is not below
/// `dem.num_detectors()`.
pub fn get_errors_triggering_detectors(
    dem: &Dem,
    detectors: &[u32],
) -> Result<BTreeMap<u32, Vec<usize>>> {
    let mut support: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for &id in detectors {
        if id as usize >= dem.num_detectors() {
            return Err(DemError::InvalidArgument(format!(
                "detector D{id} is out of range, num_detectors = {}",
                dem.num_detectors()
            )));
        }
        support.insert(id, Vec::new());
    }

    for (index, error) in dem.errors().enumerate() {
        for id in error.detectors() {
            if let Some(indices) = support.get_mut(&id) {
                indices.push(index);
            }
        }
    }
    Ok(support)
}

/// The error instructions of `dem`, in order.
#[must_use]
pub fn only_errors(dem: &Dem) -> Dem {
    dem.derive(
        dem.iter()
            .filter(|instr| instr.is_error())
            .cloned()
            .collect(),
    )
}
