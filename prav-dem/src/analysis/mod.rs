//! Hypergraph analysis of a whole model.
//!
//! # Module Organization
//!
//! - [`gauge`] - Gauge detector elimination
//! - [`diff`] - Decomposition-insensitive model differencing
//! - [`graph`] - Connected components of the detector graph (union-find)
//! - [`queries`] - Weight, flippability and support queries
//! - [`convert`] - Observable to detector conversion

pub mod convert;
pub mod diff;
pub mod gauge;
pub mod graph;
pub mod queries;

pub use convert::convert_observables_to_detectors;
pub use diff::{dem_difference, is_instr_in_dem};
pub use gauge::remove_gauge_detectors;
pub use graph::{disjoint_graphs, DisjointSets, GraphOptions, UnionFind};
pub use queries::{
    contains_only_edges, get_errors_triggering_detectors, get_flippable_detectors,
    get_flippable_logicals, get_max_weight_hyperedge, only_errors,
};
