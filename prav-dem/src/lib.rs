//! # prav-dem: Detector Error Model Algebra for Quantum Error Correction
//!
//! `prav-dem` analyzes and rewrites **detector error models** (DEMs): the
//! hypergraphs that describe how fault mechanisms in a QEC circuit flip
//! detectors and logical observables.
//!
//! ## Overview
//!
//! Graph-based decoders (matching, union-find) need every fault to flip at
//! most two detectors. Circuit-level noise produces *hyperedges* that flip
//! more. This crate provides the algebra to prepare a DEM for such decoders:
//!
//! 1. **Clean the model** - Drop gauge detectors, turn observables into
//!    detectors
//! 2. **Decompose hyperedges** - Rewrite each hyperedge as an XOR-chain of
//!    edges found by exact GF(2) solving
//! 3. **Inspect the result** - Connectivity, weights, differences between
//!    models
//!
//! ## Quick Start
//!
//! ```ignore
//! use prav_dem::{decompose_hyperedges_to_edges, DecomposeOptions, Dem, Instruction, Target};
//!
//! let dem = Dem::new(vec![
//!     Instruction::error(0.1, [Target::Detector(0), Target::Detector(1), Target::Detector(2)])?,
//!     Instruction::error(0.2, [Target::Detector(0), Target::Detector(1)])?,
//!     Instruction::error(0.2, [Target::Detector(2)])?,
//! ]);
//!
//! // error(0.1) D0 D1 ^ D2
//! let decomposed = decompose_hyperedges_to_edges(&dem, None, DecomposeOptions::default())?;
//! ```
//!
//! ## Module Organization
//!
//! - [`gf2`] - Row reduction and linear solving over GF(2)
//! - [`dem`] - Instructions, fault components and models
//! - [`decompose`] - Hyperedge decomposition
//! - [`analysis`] - Gauge removal, differencing, connectivity, queries
//! - [`error`] - Crate error type

#![deny(missing_docs)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Hypergraph analysis of whole models.
pub mod analysis;

/// Hyperedge decomposition into edges.
pub mod decompose;

/// Fault model types and single-instruction operations.
pub mod dem;

/// Error type and `Result` alias.
pub mod error;

/// Exact linear algebra over GF(2).
pub mod gf2;

// =============================================================================
// Convenience Re-exports (Clean Public API)
// =============================================================================

// Errors
pub use error::{DemError, Result};

// Fault model
pub use dem::{Dem, DetectorDecl, ErrorInstruction, FaultComponent, Instruction, OtherInstruction, Target};

// GF(2)
pub use gf2::{decompose_into_basis, decompose_labels_into_basis, row_reduce, solve, Gf2Matrix};

// Decomposition
pub use decompose::{
    decompose_hyperedge_to_edges, decompose_hyperedges_to_edges, DecomposeOptions, EdgeLibrary,
    FailurePolicy,
};

// Analysis
pub use analysis::{
    contains_only_edges, convert_observables_to_detectors, dem_difference, disjoint_graphs,
    get_errors_triggering_detectors, get_flippable_detectors, get_flippable_logicals,
    get_max_weight_hyperedge, is_instr_in_dem, only_errors, remove_gauge_detectors, GraphOptions,
};
