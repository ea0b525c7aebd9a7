//! Integration tests for hyperedge decomposition.
//!
//! - Single hyperedge against a reference set
//! - Failure policies
//! - Whole-model decomposition with the default and an explicit reference set

#[path = "../common/mod.rs"]
mod common;

use common::{dem, err, error};
use prav_dem::{
    decompose_hyperedge_to_edges, decompose_hyperedges_to_edges, DecomposeOptions, Dem, DemError,
    FailurePolicy, Instruction,
};

fn reference_edges() -> Dem {
    dem(&[
        (0.2, "D0 D7 L0"),
        (0.2, "D7 D4 L0"),
        (0.2, "D1 L0"),
        (0.2, "D1 D2"),
    ])
}

/// The reference edges followed by `hyperedge` and a detector declaration.
fn model_with(hyperedge: &str) -> Dem {
    let mut instructions = vec![error(0.1, hyperedge)];
    instructions.extend(reference_edges().into_instructions());
    instructions.push(Instruction::detector_at(0, vec![0.0, 2.0, 1.0]));
    Dem::new(instructions)
}

// =============================================================================
// decompose_hyperedge_to_edges()
// =============================================================================

#[test]
fn test_decompose_hyperedge() {
    let out = decompose_hyperedge_to_edges(
        &error(0.1, "D0 D1 D4 L0"),
        &reference_edges(),
        FailurePolicy::Raise,
    )
    .unwrap();
    assert_eq!(out, error(0.1, "D0 D7 L0 ^ D7 D4 L0 ^ D1 L0"));
}

#[test]
fn test_decompose_hyperedge_failure_raises() {
    let result = decompose_hyperedge_to_edges(
        &error(0.1, "D0 D1 D4"),
        &reference_edges(),
        FailurePolicy::Raise,
    );
    assert!(matches!(result, Err(DemError::DecompositionFailure(_))));
}

#[test]
fn test_decompose_hyperedge_failure_tolerated() {
    let hyperedge = error(0.1, "D0 D1 D4");
    let edges = reference_edges();

    let kept = decompose_hyperedge_to_edges(&hyperedge, &edges, FailurePolicy::KeepHyperedge).unwrap();
    assert_eq!(kept, hyperedge);

    let matched =
        decompose_hyperedge_to_edges(&hyperedge, &edges, FailurePolicy::MatchDetectorsOnly).unwrap();
    assert_eq!(matched, error(0.1, "D0 D7 L0 ^ D7 D4 L0 ^ D1 L0"));
}

#[test]
fn test_decompose_hyperedge_without_boundary_edge() {
    let hyperedge = error(0.1, "D0 D1 D4 L0");
    let edges = dem(&[(0.2, "D0 D7 L0"), (0.2, "D7 D4 L0"), (0.2, "D1 D2")]);
    assert!(matches!(
        decompose_hyperedge_to_edges(&hyperedge, &edges, FailurePolicy::Raise),
        Err(DemError::DecompositionFailure(_))
    ));
    assert_eq!(
        decompose_hyperedge_to_edges(&hyperedge, &edges, FailurePolicy::KeepHyperedge).unwrap(),
        hyperedge
    );
}

#[test]
fn test_decompose_hyperedge_insufficient_edges() {
    let hyperedge = error(0.1, "D0 D1 D4");
    let edges = dem(&[(0.2, "D1 L0"), (0.2, "D1 D2")]);
    assert!(matches!(
        decompose_hyperedge_to_edges(&hyperedge, &edges, FailurePolicy::Raise),
        Err(DemError::DecompositionFailure(_))
    ));
    // Nothing matches on detectors either, so the hyperedge survives.
    assert_eq!(
        decompose_hyperedge_to_edges(&hyperedge, &edges, FailurePolicy::MatchDetectorsOnly).unwrap(),
        hyperedge
    );
}

#[test]
fn test_decompose_hyperedge_rejects_declaration() {
    assert!(matches!(
        decompose_hyperedge_to_edges(&Instruction::detector(0), &reference_edges(), FailurePolicy::Raise),
        Err(DemError::InvalidArgument(_))
    ));
}

#[test]
fn test_decompose_with_empty_reference() {
    let result = decompose_hyperedge_to_edges(&error(0.1, "D0 D1 D2"), &Dem::default(), FailurePolicy::Raise);
    assert!(matches!(result, Err(DemError::DecompositionFailure(_))));
}

// =============================================================================
// decompose_hyperedges_to_edges()
// =============================================================================

#[test]
fn test_decompose_model() {
    let model = model_with("D0 D4 D1 L0");
    let out = decompose_hyperedges_to_edges(&model, None, DecomposeOptions::default()).unwrap();

    let expected = model_with("D0 D7 L0 ^ D7 D4 L0 ^ D1 L0");
    assert_eq!(out.instructions(), expected.instructions());
    assert_eq!(out.num_detectors(), model.num_detectors());
    assert_eq!(out.num_observables(), model.num_observables());
}

#[test]
fn test_decompose_model_failure() {
    let model = model_with("D0 D4 D1");

    assert!(matches!(
        decompose_hyperedges_to_edges(&model, None, DecomposeOptions::default()),
        Err(DemError::DecompositionFailure(_))
    ));

    let options = DecomposeOptions::new().with_failure_policy(FailurePolicy::MatchDetectorsOnly);
    let out = decompose_hyperedges_to_edges(&model, None, options).unwrap();
    assert_eq!(
        out.instructions(),
        model_with("D0 D7 L0 ^ D7 D4 L0 ^ D1 L0").instructions()
    );

    let options = DecomposeOptions::new().with_failure_policy(FailurePolicy::KeepHyperedge);
    let out = decompose_hyperedges_to_edges(&model, None, options).unwrap();
    assert_eq!(out.instructions(), model.instructions());
}

#[test]
fn test_decompose_model_explicit_reference() {
    let model = dem(&[(0.1, "D0 D1 D4 L0"), (0.3, "D5 D6")]);
    let out = decompose_hyperedges_to_edges(&model, Some(&reference_edges()), DecomposeOptions::default())
        .unwrap();
    assert_eq!(
        out.instructions(),
        dem(&[(0.1, "D0 D7 L0 ^ D7 D4 L0 ^ D1 L0"), (0.3, "D5 D6")]).instructions()
    );
}

#[test]
fn test_decompose_model_keeps_decomposed_errors() {
    // Already decomposed, even though its net weight is three.
    let model = dem(&[(0.1, "D0 D1 ^ D2"), (0.2, "D0 D1")]);
    let out = decompose_hyperedges_to_edges(&model, None, DecomposeOptions::default()).unwrap();
    assert_eq!(out, model);
}

#[test]
fn test_decompose_model_max_edge_weight() {
    let model = dem(&[(0.1, "D0 D1 D2"), (0.2, "D0 D1"), (0.2, "D2")]);

    // Weight three counts as an edge: nothing to do.
    let options = DecomposeOptions::new().with_max_edge_weight(3);
    let out = decompose_hyperedges_to_edges(&model, None, options).unwrap();
    assert_eq!(out, model);

    let out = decompose_hyperedges_to_edges(&model, None, DecomposeOptions::default()).unwrap();
    assert_eq!(out.errors().next(), Some(&err(0.1, "D0 D1 ^ D2")));
}
