//! Turning logical observables into detectors.
//!
//! Useful when a tool only understands detectors, e.g. to search for the
//! faults that flip an observable without triggering any detector.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use super::queries::get_flippable_logicals;
use crate::dem::{Dem, Instruction, Target};
use crate::error::{DemError, Result};

/// Replace observables by fresh detectors.
///
/// `obs_ids` defaults to the observables present in `dem`, either flipped by
/// an error or declared, in ascending order. `new_det_ids`
/// defaults to `num_detectors, num_detectors + 1, ...`. Each converted
/// observable is replaced by its detector in every error instruction, its
/// `logical_observable` declaration is dropped and a `detector` declaration
/// for the new id is appended.
///
/// # Errors
///
/// [`DemError::InvalidArgument`] if the two lists differ in length, an
/// observable is out of range or repeated, or a new detector id is repeated
/// or already referenced by `dem`.
pub fn convert_observables_to_detectors(
    dem: &Dem,
    obs_ids: Option<&[u32]>,
    new_det_ids: Option<&[u32]>,
) -> Result<Dem> {
    let obs_ids: Vec<u32> = match obs_ids {
        Some(ids) => ids.to_vec(),
        None => referenced_observables(dem).into_iter().collect(),
    };
    let new_det_ids: Vec<u32> = match new_det_ids {
        Some(ids) if ids.len() != obs_ids.len() => {
            return Err(DemError::InvalidArgument(format!(
                "{} observables but {} new detector ids were given",
                obs_ids.len(),
                ids.len()
            )));
        }
        Some(ids) => ids.to_vec(),
        None => {
            let first = dem.num_detectors();
            (0..obs_ids.len())
                .map(|i| to_id(first + i))
                .collect::<Result<_>>()?
        }
    };

    let mut mapping = HashMap::with_capacity(obs_ids.len());
    for (&obs, &det) in obs_ids.iter().zip(&new_det_ids) {
        if obs as usize >= dem.num_observables() {
            return Err(DemError::InvalidArgument(format!(
                "observable L{obs} is out of range, num_observables = {}",
                dem.num_observables()
            )));
        }
        if mapping.insert(obs, det).is_some() {
            return Err(DemError::InvalidArgument(format!(
                "observable L{obs} is listed more than once"
            )));
        }
    }

    let used = referenced_detectors(dem);
    let mut fresh = BTreeSet::new();
    for &det in &new_det_ids {
        if used.contains(&det) || !fresh.insert(det) {
            return Err(DemError::InvalidArgument(format!(
                "new detector D{det} is already in use"
            )));
        }
    }

    let mut instructions = Vec::with_capacity(dem.len() + new_det_ids.len());
    for instr in dem {
        match instr {
            Instruction::Error(error) => {
                let converted = error.map_targets(|t| match t {
                    Target::Observable(obs) => mapping
                        .get(obs)
                        .map_or(*t, |&det| Target::Detector(det)),
                    other => *other,
                });
                instructions.push(Instruction::Error(converted));
            }
            Instruction::LogicalObservable(obs) if mapping.contains_key(obs) => {}
            other => instructions.push(other.clone()),
        }
    }
    instructions.extend(new_det_ids.iter().map(|&det| Instruction::detector(det)));

    debug!(converted = mapping.len(), "converted observables to detectors");
    Ok(dem.derive(instructions))
}

fn referenced_detectors(dem: &Dem) -> BTreeSet<u32> {
    dem.iter()
        .flat_map(|instr| match instr {
            Instruction::Error(error) => error
                .targets()
                .iter()
                .filter_map(Target::detector_id)
                .collect(),
            Instruction::Detector(decl) => vec![decl.id],
            Instruction::Other(other) => other.targets.iter().filter_map(Target::detector_id).collect(),
            Instruction::LogicalObservable(_) => Vec::new(),
        })
        .collect()
}

fn referenced_observables(dem: &Dem) -> BTreeSet<u32> {
    let mut ids = get_flippable_logicals(dem);
    ids.extend(dem.iter().filter_map(|instr| match instr {
        Instruction::LogicalObservable(id) => Some(*id),
        _ => None,
    }));
    ids
}

fn to_id(value: usize) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| DemError::InvalidArgument(format!("id {value} does not fit in 32 bits")))
}
