//! Hyperedge decomposition.
//!
//! Rewrites a high-order fault (a *hyperedge*, flipping more than two
//! detectors) as an XOR-chain of low-order faults (*edges*) taken from a
//! reference set, so that graph-based decoders can consume it:
//!
//! ```text
//! error(0.1) D0 D1 D4 L0
//!     with edges  D0 D7 L0 | D7 D4 L0 | D1 L0 | D1 D2
//!     becomes     error(0.1) D0 D7 L0 ^ D7 D4 L0 ^ D1 L0
//! ```
//!
//! # Algorithm
//!
//! Each reference edge becomes one column of a GF(2) matrix holding its
//! net-effect indicator vector over `detectors ∪ observables`; the
//! hyperedge's net effect is the right-hand side. [`gf2::solve`] returns
//! *a* solution with free variables fixed at 0, so the selected edges are
//! the ones dictated by pivot order. They are not guaranteed to be the
//! fewest possible.
//!
//! [`gf2::solve`]: crate::gf2::solve

use tracing::{debug, trace, warn};

use crate::dem::{Dem, ErrorInstruction, Instruction, Target};
use crate::error::{DemError, Result};
use crate::gf2::decompose_labels_into_basis;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// What to do when a hyperedge cannot be decomposed exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailurePolicy {
    /// Fail with [`DemError::DecompositionFailure`].
    #[default]
    Raise,
    /// Keep the hyperedge as it is.
    KeepHyperedge,
    /// Retry matching detectors only, accepting a chain whose observables
    /// differ from the hyperedge's. Keeps the hyperedge if that fails too.
    MatchDetectorsOnly,
}

/// Options for [`decompose_hyperedges_to_edges`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecomposeOptions {
    /// Failure handling.
    pub failure_policy: FailurePolicy,
    /// Largest detector weight still considered an edge. Error instructions
    /// above it are decomposed; the ones at or below it form the default
    /// reference set.
    pub max_edge_weight: usize,
}

impl Default for DecomposeOptions {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::Raise,
            max_edge_weight: 2,
        }
    }
}

impl DecomposeOptions {
    /// Default options: raise on failure, edges have weight ≤ 2.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the failure policy.
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Set the largest weight considered an edge.
    #[must_use]
    pub fn with_max_edge_weight(mut self, weight: usize) -> Self {
        self.max_edge_weight = weight;
        self
    }
}

/// A reference set of edges, prepared once and shared by many
/// decompositions.
///
/// Only atomic error instructions are used; decomposed ones are skipped.
#[derive(Clone, Debug)]
pub struct EdgeLibrary<'a> {
    edges: Vec<&'a ErrorInstruction>,
    basis: Vec<(usize, Vec<Target>)>,
}

impl<'a> EdgeLibrary<'a> {
    /// Build a library from every atomic error instruction of `dem`.
    #[must_use]
    pub fn new(dem: &'a Dem) -> Self {
        Self::from_edges(dem.errors())
    }

    /// Build a library from the given instructions, skipping decomposed
    /// ones.
    pub fn from_edges(edges: impl IntoIterator<Item = &'a ErrorInstruction>) -> Self {
        let edges: Vec<_> = edges.into_iter().filter(|e| !e.has_separator()).collect();
        let basis = edges
            .iter()
            .enumerate()
            .map(|(i, edge)| (i, net_targets(edge)))
            .collect();
        Self { edges, basis }
    }

    /// Number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True if the library has no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Decompose `hyperedge` into a chain of library edges.
    ///
    /// The chain keeps library order and each edge's own target order, and
    /// takes the hyperedge's probability. A hyperedge with no net effect is
    /// returned unchanged.
    pub fn decompose(
        &self,
        hyperedge: &ErrorInstruction,
        policy: FailurePolicy,
    ) -> Result<ErrorInstruction> {
        let target = net_targets(hyperedge);
        if target.is_empty() {
            return Ok(hyperedge.clone());
        }

        match decompose_labels_into_basis(&target, &self.basis) {
            Ok(selected) => {
                debug!(%hyperedge, edges = selected.len(), "decomposed hyperedge");
                return Ok(self.chain(hyperedge.probability(), &selected));
            }
            Err(DemError::InfeasibleSystem) => {}
            Err(e) => return Err(e),
        }

        match policy {
            FailurePolicy::Raise => Err(DemError::DecompositionFailure(format!(
                "'{hyperedge}' is not a combination of the {} reference edges",
                self.edges.len()
            ))),
            FailurePolicy::KeepHyperedge => {
                warn!(%hyperedge, "decomposition failed, keeping hyperedge");
                Ok(hyperedge.clone())
            }
            FailurePolicy::MatchDetectorsOnly => self.decompose_detectors_only(hyperedge),
        }
    }

    fn decompose_detectors_only(&self, hyperedge: &ErrorInstruction) -> Result<ErrorInstruction> {
        let target: Vec<Target> = net_targets(hyperedge)
            .into_iter()
            .filter(Target::is_detector)
            .collect();
        let basis: Vec<(usize, Vec<Target>)> = self
            .basis
            .iter()
            .map(|(i, labels)| (*i, labels.iter().copied().filter(Target::is_detector).collect()))
            .collect();

        match decompose_labels_into_basis(&target, &basis) {
            Ok(selected) if !selected.is_empty() => {
                warn!(%hyperedge, edges = selected.len(), "decomposed hyperedge matching detectors only");
                Ok(self.chain(hyperedge.probability(), &selected))
            }
            Ok(_) | Err(DemError::InfeasibleSystem) => {
                warn!(%hyperedge, "decomposition failed, keeping hyperedge");
                Ok(hyperedge.clone())
            }
            Err(e) => Err(e),
        }
    }

    fn chain(&self, probability: f64, selected: &[usize]) -> ErrorInstruction {
        ErrorInstruction::chain(probability, selected.iter().map(|&i| self.edges[i]))
    }
}

/// Decompose one hyperedge against the atomic error instructions of
/// `edges`.
///
/// # Errors
///
/// - [`DemError::InvalidArgument`] if `hyperedge` is not an error.
/// - [`DemError::DecompositionFailure`] if no combination of edges
///   reproduces it and `policy` is [`FailurePolicy::Raise`].
pub fn decompose_hyperedge_to_edges(
    hyperedge: &Instruction,
    edges: &Dem,
    policy: FailurePolicy,
) -> Result<Instruction> {
    let hyperedge = hyperedge.as_error()?;
    EdgeLibrary::new(edges)
        .decompose(hyperedge, policy)
        .map(Instruction::Error)
}

/// Decompose every atomic hyperedge of `dem`.
///
/// An error instruction is a hyperedge if its detector weight exceeds
/// `options.max_edge_weight`. The reference set is `reference` if given,
/// otherwise the atomic error instructions of `dem` that are not
/// hyperedges. Edges, already-decomposed errors and non-error instructions
/// are kept as they are; order is preserved.
pub fn decompose_hyperedges_to_edges(
    dem: &Dem,
    reference: Option<&Dem>,
    options: DecomposeOptions,
) -> Result<Dem> {
    let is_hyperedge = |e: &ErrorInstruction| e.detector_weight() > options.max_edge_weight;

    let library = match reference {
        Some(reference) => EdgeLibrary::new(reference),
        None => EdgeLibrary::from_edges(dem.errors().filter(|&e| !is_hyperedge(e))),
    };
    debug!(edges = library.len(), "edge library ready");

    let step = |instr: &Instruction| -> Result<Instruction> {
        match instr {
            Instruction::Error(error) if !error.has_separator() && is_hyperedge(error) => {
                trace!(%error, "decomposing");
                library
                    .decompose(error, options.failure_policy)
                    .map(Instruction::Error)
            }
            other => Ok(other.clone()),
        }
    };

    #[cfg(feature = "rayon")]
    let instructions: Result<Vec<Instruction>> = dem.instructions().par_iter().map(step).collect();
    #[cfg(not(feature = "rayon"))]
    let instructions: Result<Vec<Instruction>> = dem.iter().map(step).collect();

    Ok(dem.derive(instructions?))
}

/// Net effect as labels: detectors ascending, then observables ascending.
fn net_targets(error: &ErrorInstruction) -> Vec<Target> {
    error.canonical_order().targets().to_vec()
}
