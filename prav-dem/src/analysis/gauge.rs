//! Gauge detector elimination.
//!
//! A gauge detector is flipped with probability exactly 1/2 by a mechanism
//! that touches nothing else (`error(0.5) D<k>`). It carries no decoding
//! information, so the mechanism can be dropped, provided no other error
//! depends on that detector.

use std::collections::BTreeSet;

use tracing::debug;

use crate::dem::{Dem, ErrorInstruction, Instruction, Target};
use crate::error::{DemError, Result};

const GAUGE_PROBABILITY: f64 = 0.5;

/// Remove every `error(0.5) D<k>` instruction from `dem`.
///
/// Structural instructions (including the gauge detectors' own
/// declarations) and the declared counts are kept.
///
/// # Errors
///
/// [`DemError::IntegrityViolation`] if an `error(0.5)` instruction has more
/// than one target, or if a gauge detector is referenced by any other error
/// instruction. A single-target `error(0.5)` on an observable is kept as an
/// ordinary error.
pub fn remove_gauge_detectors(dem: &Dem) -> Result<Dem> {
    let mut gauges = BTreeSet::new();
    for error in dem.errors() {
        if error.probability() != GAUGE_PROBABILITY {
            continue;
        }
        match error.targets() {
            [Target::Detector(id)] => {
                gauges.insert(*id);
            }
            // A lone observable (or nothing at all) is an ordinary error.
            [] | [_] => {}
            _ => {
                return Err(DemError::IntegrityViolation(format!(
                    "there exists a 'composed' gauge detector: '{error}'"
                )));
            }
        }
    }

    let mut instructions = Vec::with_capacity(dem.len());
    for instr in dem {
        match instr {
            Instruction::Error(error) if is_gauge(error) => {}
            Instruction::Error(error) => {
                let reused = error
                    .targets()
                    .iter()
                    .filter_map(Target::detector_id)
                    .find(|id| gauges.contains(id));
                if let Some(id) = reused {
                    return Err(DemError::IntegrityViolation(format!(
                        "gauge detector D{id} is present in the error '{error}'"
                    )));
                }
                instructions.push(instr.clone());
            }
            other => instructions.push(other.clone()),
        }
    }

    debug!(gauges = gauges.len(), "removed gauge detectors");
    Ok(dem.derive(instructions))
}

fn is_gauge(error: &ErrorInstruction) -> bool {
    error.probability() == GAUGE_PROBABILITY && matches!(error.targets(), [Target::Detector(_)])
}
