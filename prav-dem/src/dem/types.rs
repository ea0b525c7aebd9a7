//! Detector Error Model (DEM) instruction types.
//!
//! An error instruction lists the targets flipped by one fault mechanism:
//!
//! ```text
//! error(0.1) D0 D7 L0 ^ D7 D4 L0 ^ D1 L0
//! ```
//!
//! - `D<id>` is a detector target, `L<id>` a logical observable target;
//! - `^` separates the *components* of a decomposed error. Each component is
//!   an elementary fault; the net effect of the instruction is the XOR of its
//!   components.
//!
//! Instructions are immutable values. Every transformation returns a new
//! instruction.

use core::fmt;
use std::collections::BTreeSet;

use crate::error::{DemError, Result};

/// Target of an error instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    /// A detector flipped by the fault.
    Detector(u32),
    /// A logical observable flipped by the fault.
    Observable(u32),
    /// Boundary between two components of a decomposed fault.
    Separator,
}

impl Target {
    /// Check if this target is a detector.
    #[must_use]
    pub const fn is_detector(&self) -> bool {
        matches!(self, Target::Detector(_))
    }

    /// Check if this target is a logical observable.
    #[must_use]
    pub const fn is_observable(&self) -> bool {
        matches!(self, Target::Observable(_))
    }

    /// Check if this target is a separator.
    #[must_use]
    pub const fn is_separator(&self) -> bool {
        matches!(self, Target::Separator)
    }

    /// Get detector ID if this is a detector target.
    #[must_use]
    pub const fn detector_id(&self) -> Option<u32> {
        match self {
            Target::Detector(id) => Some(*id),
            _ => None,
        }
    }

    /// Get observable ID if this is an observable target.
    #[must_use]
    pub const fn observable_id(&self) -> Option<u32> {
        match self {
            Target::Observable(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Detector(id) => write!(f, "D{id}"),
            Target::Observable(id) => write!(f, "L{id}"),
            Target::Separator => f.write_str("^"),
        }
    }
}

/// One elementary fault: the detectors and observables it flips.
///
/// Both id lists are sorted and free of duplicates, so structural equality
/// is set equality.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaultComponent {
    detectors: Vec<u32>,
    observables: Vec<u32>,
}

impl FaultComponent {
    /// Create a component from unordered ids.
    pub fn new(
        detectors: impl IntoIterator<Item = u32>,
        observables: impl IntoIterator<Item = u32>,
    ) -> Self {
        let detectors: BTreeSet<u32> = detectors.into_iter().collect();
        let observables: BTreeSet<u32> = observables.into_iter().collect();
        Self {
            detectors: detectors.into_iter().collect(),
            observables: observables.into_iter().collect(),
        }
    }

    /// Sorted detector ids.
    #[must_use]
    pub fn detectors(&self) -> &[u32] {
        &self.detectors
    }

    /// Sorted observable ids.
    #[must_use]
    pub fn observables(&self) -> &[u32] {
        &self.observables
    }

    /// True if the component flips nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty() && self.observables.is_empty()
    }
}

/// An `error(p)` instruction.
///
/// Deserialization goes through [`ErrorInstruction::new`], so a stored
/// instruction is validated and trimmed like a constructed one.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawErrorInstruction"))]
pub struct ErrorInstruction {
    probability: f64,
    targets: Vec<Target>,
}

/// Unchecked wire form of [`ErrorInstruction`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawErrorInstruction {
    probability: f64,
    targets: Vec<Target>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawErrorInstruction> for ErrorInstruction {
    type Error = DemError;

    fn try_from(raw: RawErrorInstruction) -> Result<Self> {
        Self::new(raw.probability, raw.targets)
    }
}

impl ErrorInstruction {
    /// Create an error instruction.
    ///
    /// Leading and trailing separators are trimmed. Separators between
    /// components are kept as given, including consecutive ones.
    ///
    /// # Errors
    ///
    /// [`DemError::InvalidArgument`] if `probability` is not in `[0, 1]`.
    pub fn new(probability: f64, targets: impl IntoIterator<Item = Target>) -> Result<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(DemError::InvalidArgument(format!(
                "probability must be in [0, 1], but {probability} was given"
            )));
        }
        Ok(Self::from_parts(probability, targets.into_iter().collect()))
    }

    /// Probability already validated by the caller.
    pub(crate) fn from_parts(probability: f64, targets: Vec<Target>) -> Self {
        Self {
            probability,
            targets: trim_separators(targets),
        }
    }

    /// Probability of the fault.
    #[must_use]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Raw targets in the order they were given.
    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Split the targets at separators into components.
    ///
    /// An instruction without separators yields a single component, which
    /// is empty if the instruction has no targets.
    #[must_use]
    pub fn components(&self) -> Vec<FaultComponent> {
        self.targets
            .split(Target::is_separator)
            .map(|segment| {
                FaultComponent::new(
                    segment.iter().filter_map(Target::detector_id),
                    segment.iter().filter_map(Target::observable_id),
                )
            })
            .collect()
    }

    /// True if the instruction has more than one component.
    #[must_use]
    pub fn has_separator(&self) -> bool {
        self.targets.iter().any(Target::is_separator)
    }

    /// Net detectors flipped, sorted.
    ///
    /// For a decomposed instruction this is the symmetric difference of the
    /// components' detectors: ids present in an even number of components
    /// cancel.
    #[must_use]
    pub fn detectors(&self) -> Vec<u32> {
        xor_sets(self.components().iter().map(FaultComponent::detectors))
    }

    /// Net observables flipped, sorted. See [`detectors`](Self::detectors).
    #[must_use]
    pub fn observables(&self) -> Vec<u32> {
        xor_sets(self.components().iter().map(FaultComponent::observables))
    }

    /// Number of net detectors flipped.
    #[must_use]
    pub fn detector_weight(&self) -> usize {
        self.detectors().len()
    }

    /// Drop the given detector ids from every component.
    ///
    /// Separators left dangling at either end are trimmed; empty components
    /// in the middle are kept.
    #[must_use]
    pub fn remove_detectors(&self, ids: &[u32]) -> Self {
        let ids: BTreeSet<u32> = ids.iter().copied().collect();
        let targets = self
            .targets
            .iter()
            .filter(|t| !t.detector_id().is_some_and(|id| ids.contains(&id)))
            .copied()
            .collect();
        Self::from_parts(self.probability, targets)
    }

    /// Collapse all components into one, with net detectors first and net
    /// observables second, each ascending.
    ///
    /// Two instructions with the same net effect and probability have equal
    /// canonical forms regardless of decomposition or target order.
    #[must_use]
    pub fn canonical_order(&self) -> Self {
        let targets = self
            .detectors()
            .into_iter()
            .map(Target::Detector)
            .chain(self.observables().into_iter().map(Target::Observable))
            .collect();
        Self::from_parts(self.probability, targets)
    }

    /// Chain the targets of `parts` with separators, keeping each part's
    /// target order.
    pub(crate) fn chain<'a>(
        probability: f64,
        parts: impl IntoIterator<Item = &'a ErrorInstruction>,
    ) -> Self {
        let mut targets = Vec::new();
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                targets.push(Target::Separator);
            }
            targets.extend_from_slice(&part.targets);
        }
        Self::from_parts(probability, targets)
    }

    /// Rewrite targets one by one.
    pub(crate) fn map_targets(&self, f: impl FnMut(&Target) -> Target) -> Self {
        Self::from_parts(self.probability, self.targets.iter().map(f).collect())
    }
}

impl fmt::Display for ErrorInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error({})", self.probability)?;
        for target in &self.targets {
            write!(f, " {target}")?;
        }
        Ok(())
    }
}

/// A `detector` declaration, with optional coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectorDecl {
    /// Detector ID.
    pub id: u32,
    /// Coordinates, possibly empty.
    pub coords: Vec<f64>,
}

/// Any other structural instruction, carried through untouched.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OtherInstruction {
    /// Instruction name.
    pub name: String,
    /// Parenthesised arguments.
    pub args: Vec<f64>,
    /// Targets.
    pub targets: Vec<Target>,
}

/// One instruction of a flattened detector error model.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Instruction {
    /// `error(p) ...`
    Error(ErrorInstruction),
    /// `detector(coords) D<id>`
    Detector(DetectorDecl),
    /// `logical_observable L<id>`
    LogicalObservable(u32),
    /// Anything else.
    Other(OtherInstruction),
}

impl Instruction {
    /// Create an error instruction. See [`ErrorInstruction::new`].
    pub fn error(probability: f64, targets: impl IntoIterator<Item = Target>) -> Result<Self> {
        ErrorInstruction::new(probability, targets).map(Instruction::Error)
    }

    /// Create a detector declaration without coordinates.
    #[must_use]
    pub fn detector(id: u32) -> Self {
        Instruction::Detector(DetectorDecl { id, coords: Vec::new() })
    }

    /// Create a detector declaration with coordinates.
    #[must_use]
    pub fn detector_at(id: u32, coords: impl Into<Vec<f64>>) -> Self {
        Instruction::Detector(DetectorDecl { id, coords: coords.into() })
    }

    /// Instruction name: `error`, `detector`, `logical_observable`, or the
    /// name of an [`OtherInstruction`].
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Instruction::Error(_) => "error",
            Instruction::Detector(_) => "detector",
            Instruction::LogicalObservable(_) => "logical_observable",
            Instruction::Other(other) => &other.name,
        }
    }

    /// Check if this is an error instruction.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Instruction::Error(_))
    }

    /// Borrow the error instruction, or fail with
    /// [`DemError::InvalidArgument`] for any other kind.
    pub fn as_error(&self) -> Result<&ErrorInstruction> {
        match self {
            Instruction::Error(error) => Ok(error),
            other => Err(DemError::not_an_error(other.kind())),
        }
    }

    /// All targets referenced, separators included.
    pub(crate) fn referenced_targets(&self) -> Vec<Target> {
        match self {
            Instruction::Error(error) => error.targets.clone(),
            Instruction::Detector(decl) => vec![Target::Detector(decl.id)],
            Instruction::LogicalObservable(id) => vec![Target::Observable(*id)],
            Instruction::Other(other) => other.targets.clone(),
        }
    }
}

impl From<ErrorInstruction> for Instruction {
    fn from(error: ErrorInstruction) -> Self {
        Instruction::Error(error)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Error(error) => error.fmt(f),
            Instruction::Detector(decl) => {
                f.write_str("detector")?;
                write_args(f, &decl.coords)?;
                write!(f, " D{}", decl.id)
            }
            Instruction::LogicalObservable(id) => write!(f, "logical_observable L{id}"),
            Instruction::Other(other) => {
                f.write_str(&other.name)?;
                write_args(f, &other.args)?;
                for target in &other.targets {
                    write!(f, " {target}")?;
                }
                Ok(())
            }
        }
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[f64]) -> fmt::Result {
    if args.is_empty() {
        return Ok(());
    }
    f.write_str("(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{arg}")?;
    }
    f.write_str(")")
}

fn trim_separators(mut targets: Vec<Target>) -> Vec<Target> {
    while targets.last().is_some_and(Target::is_separator) {
        targets.pop();
    }
    let leading = targets.iter().take_while(|t| t.is_separator()).count();
    targets.drain(..leading);
    targets
}

fn xor_sets<'a>(sets: impl IntoIterator<Item = &'a [u32]>) -> Vec<u32> {
    let mut acc = BTreeSet::new();
    for set in sets {
        for &id in set {
            if !acc.remove(&id) {
                acc.insert(id);
            }
        }
    }
    acc.into_iter().collect()
}
