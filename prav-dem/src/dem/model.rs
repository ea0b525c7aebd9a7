//! A flattened detector error model.

use super::types::{ErrorInstruction, Instruction, Target};
use crate::error::{DemError, Result};

/// An ordered sequence of instructions plus the detector and observable
/// counts.
///
/// Instructions arrive already flattened (no `repeat` blocks, no
/// `shift_detectors`). Counts are either derived as one more than the
/// largest id referenced or supplied by the caller and checked.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawDem"))]
pub struct Dem {
    instructions: Vec<Instruction>,
    num_detectors: usize,
    num_observables: usize,
}

/// Unchecked wire form of [`Dem`]; counts are checked by [`Dem::with_counts`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawDem {
    instructions: Vec<Instruction>,
    num_detectors: usize,
    num_observables: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDem> for Dem {
    type Error = DemError;

    fn try_from(raw: RawDem) -> Result<Self> {
        Dem::with_counts(raw.instructions, raw.num_detectors, raw.num_observables)
    }
}

impl Dem {
    /// Create a model, deriving the counts from the ids referenced.
    #[must_use]
    pub fn new(instructions: Vec<Instruction>) -> Self {
        let (num_detectors, num_observables) = referenced_counts(&instructions);
        Self {
            instructions,
            num_detectors,
            num_observables,
        }
    }

    /// Create a model with externally supplied counts.
    ///
    /// # Errors
    ///
    /// [`DemError::InvalidArgument`] if an instruction references an id
    /// outside `[0, num_detectors)` or `[0, num_observables)`.
    pub fn with_counts(
        instructions: Vec<Instruction>,
        num_detectors: usize,
        num_observables: usize,
    ) -> Result<Self> {
        for instr in &instructions {
            for target in instr.referenced_targets() {
                match target {
                    Target::Detector(id) if id as usize >= num_detectors => {
                        return Err(DemError::InvalidArgument(format!(
                            "detector D{id} in '{instr}' is out of range, num_detectors = {num_detectors}"
                        )));
                    }
                    Target::Observable(id) if id as usize >= num_observables => {
                        return Err(DemError::InvalidArgument(format!(
                            "observable L{id} in '{instr}' is out of range, num_observables = {num_observables}"
                        )));
                    }
                    _ => {}
                }
            }
        }
        Ok(Self {
            instructions,
            num_detectors,
            num_observables,
        })
    }

    /// Same counts as `self`, different instructions. Only grows the counts
    /// if the new instructions need it.
    pub(crate) fn derive(&self, instructions: Vec<Instruction>) -> Self {
        let (num_detectors, num_observables) = referenced_counts(&instructions);
        Self {
            instructions,
            num_detectors: num_detectors.max(self.num_detectors),
            num_observables: num_observables.max(self.num_observables),
        }
    }

    /// All instructions in order.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Consume the model, returning its instructions.
    #[must_use]
    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }

    /// Number of detectors.
    #[must_use]
    pub fn num_detectors(&self) -> usize {
        self.num_detectors
    }

    /// Number of logical observables.
    #[must_use]
    pub fn num_observables(&self) -> usize {
        self.num_observables
    }

    /// Number of instructions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// True if there are no instructions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Iterate over all instructions.
    pub fn iter(&self) -> core::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Iterate over the error instructions only.
    pub fn errors(&self) -> impl Iterator<Item = &ErrorInstruction> + '_ {
        self.instructions.iter().filter_map(|instr| match instr {
            Instruction::Error(error) => Some(error),
            _ => None,
        })
    }
}

impl FromIterator<Instruction> for Dem {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dem {
    type Item = &'a Instruction;
    type IntoIter = core::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

impl core::fmt::Display for Dem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for instr in &self.instructions {
            writeln!(f, "{instr}")?;
        }
        Ok(())
    }
}

fn referenced_counts(instructions: &[Instruction]) -> (usize, usize) {
    let mut num_detectors = 0;
    let mut num_observables = 0;
    for target in instructions.iter().flat_map(Instruction::referenced_targets) {
        match target {
            Target::Detector(id) => num_detectors = num_detectors.max(id as usize + 1),
            Target::Observable(id) => num_observables = num_observables.max(id as usize + 1),
            Target::Separator => {}
        }
    }
    (num_detectors, num_observables)
}
