//! Error types for prav-dem.

use thiserror::Error;

/// Result type alias for prav-dem operations.
pub type Result<T> = std::result::Result<T, DemError>;

/// Errors raised by the DEM algebra.
///
/// Every error is raised at the point of detection. No operation retries
/// internally or leaves a caller-visible value half-modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DemError {
    /// Wrong instruction kind, out-of-range id, bad probability, or a
    /// malformed matrix/vector.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A gauge detector is referenced elsewhere, or a gauge is composed of
    /// more than one target.
    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),

    /// The requested GF(2) linear system has no solution.
    #[error("The given linear system over GF(2) does not have a solution")]
    InfeasibleSystem,

    /// No combination of reference edges reproduces the hyperedge.
    #[error("Decomposition failure: {0}")]
    DecompositionFailure(String),
}

impl DemError {
    pub(crate) fn not_an_error(kind: &str) -> Self {
        DemError::InvalidArgument(format!("instruction is not an error, it is '{kind}'"))
    }
}
