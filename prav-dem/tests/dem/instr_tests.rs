//! Integration tests for single-instruction operations.
//!
//! - Net detectors/observables of atomic and decomposed errors
//! - Separator detection and component splitting
//! - Detector removal with edge-separator trimming
//! - Canonical ordering

#[path = "../common/mod.rs"]
mod common;

use common::{err, error, targets};
use prav_dem::dem::{canonical_order, components, detectors, has_separator, observables, remove_detectors};
use prav_dem::{DemError, FaultComponent, Instruction};

// =============================================================================
// detectors() / observables()
// =============================================================================

#[test]
fn test_detectors_decomposed_cancel_in_pairs() {
    let instr = error(0.1, "D0 L0 ^ D1 L1 ^ D0 L1");
    assert_eq!(detectors(&instr).unwrap(), vec![1]);
    assert_eq!(observables(&instr).unwrap(), vec![0]);
}

#[test]
fn test_detectors_atomic_sorted() {
    let instr = error(0.1, "D1 D0 L2 L1");
    assert_eq!(detectors(&instr).unwrap(), vec![0, 1]);
    assert_eq!(observables(&instr).unwrap(), vec![1, 2]);
}

#[test]
fn test_operations_reject_declarations() {
    for instr in [
        Instruction::detector(0),
        Instruction::LogicalObservable(0),
    ] {
        assert!(matches!(detectors(&instr), Err(DemError::InvalidArgument(_))));
        assert!(matches!(observables(&instr), Err(DemError::InvalidArgument(_))));
        assert!(matches!(has_separator(&instr), Err(DemError::InvalidArgument(_))));
        assert!(matches!(components(&instr), Err(DemError::InvalidArgument(_))));
    }
}

// =============================================================================
// has_separator() / components()
// =============================================================================

#[test]
fn test_has_separator() {
    assert!(has_separator(&error(0.1, "D0 L0 ^ D1 L1 ^ D0 L1")).unwrap());
    assert!(!has_separator(&error(0.1, "D0 D1 L2 L1")).unwrap());
}

#[test]
fn test_components_in_order() {
    let parts = components(&error(0.1, "D3 D1 ^ L0 ^ D2 L1")).unwrap();
    assert_eq!(
        parts,
        vec![
            FaultComponent::new([1, 3], []),
            FaultComponent::new([], [0]),
            FaultComponent::new([2], [1]),
        ]
    );
}

// =============================================================================
// remove_detectors()
// =============================================================================

#[test]
fn test_remove_detectors_trims_trailing_component() {
    let out = remove_detectors(&error(0.1, "D0 L0 ^ D1 L1 ^ D0"), &[0]).unwrap();
    assert_eq!(out, err(0.1, "L0 ^ D1 L1"));
}

#[test]
fn test_remove_detectors_atomic() {
    let out = remove_detectors(&error(0.1, "D0 D1 L2 L1"), &[0]).unwrap();
    assert_eq!(out, err(0.1, "D1 L2 L1"));
}

#[test]
fn test_remove_detectors_trims_leading_components() {
    let out = remove_detectors(&error(0.1, "D0 ^ D5 ^ D1 ^ D2"), &[0, 5]).unwrap();
    assert_eq!(out.targets(), targets("D1 ^ D2").as_slice());
}

#[test]
fn test_remove_detectors_keeps_inner_empty_component() {
    let out = remove_detectors(&error(0.1, "D1 ^ D0 ^ D2"), &[0]).unwrap();
    assert_eq!(out.targets(), targets("D1 ^ ^ D2").as_slice());
    assert_eq!(out.components().len(), 3);
}

#[test]
fn test_remove_everything() {
    let out = remove_detectors(&error(0.3, "D0 ^ D1"), &[0, 1]).unwrap();
    assert!(out.targets().is_empty());
    assert_eq!(out.probability(), 0.3);
}

// =============================================================================
// canonical_order()
// =============================================================================

#[test]
fn test_canonical_order() {
    let out = canonical_order(&error(0.1, "D0 L0 ^ D1 L1 ^ D0")).unwrap();
    assert_eq!(out, err(0.1, "D1 L0 L1"));

    let out = canonical_order(&error(0.1, "L2 D1 D0 L1")).unwrap();
    assert_eq!(out, err(0.1, "D0 D1 L1 L2"));
}

#[test]
fn test_canonical_order_rejects_non_error() {
    assert!(matches!(
        canonical_order(&Instruction::detector(1)),
        Err(DemError::InvalidArgument(_))
    ));
}
