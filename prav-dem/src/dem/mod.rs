//! Fault model: instructions, components and whole models.
//!
//! # Module Organization
//!
//! - [`types`] - `Target`, `FaultComponent`, `ErrorInstruction`, `Instruction`
//! - [`instr`] - Kind-checked operations over a single `Instruction`
//! - [`model`] - `Dem`, an ordered instruction sequence with counts

pub mod instr;
pub mod model;
pub mod types;

pub use instr::{canonical_order, components, detectors, has_separator, observables, remove_detectors};
pub use model::Dem;
pub use types::{DetectorDecl, ErrorInstruction, FaultComponent, Instruction, OtherInstruction, Target};
