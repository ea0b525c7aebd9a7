//! Connectivity of the fault hypergraph.
//!
//! Detectors are nodes; every error instruction connects all the detectors
//! it targets (across all of its components). Connected components are
//! tracked with a disjoint set forest:
//!
//! - **Path halving**: when traversing, each node points to its grandparent,
//!   halving path length per query.
//! - **Deterministic union**: the smaller root becomes a child of the larger,
//!   giving reproducible forests without rank tracking.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::dem::{Dem, Instruction, Target};

/// Disjoint set forest operations.
///
/// Each set is identified by its root, the node with `parent(root) == root`.
///
/// ```text
/// Before union:       After union(A, B):
///   A    B               B (root)
///  /|    |              /|\
/// 1 2    3             A 1 2
///                        |
///                        3
/// ```
pub trait UnionFind {
    /// Find the root of the set containing `i`.
    fn find(&mut self, i: u32) -> u32;

    /// Merge two sets given their roots.
    ///
    /// Returns `false` if they were already the same set.
    fn union_roots(&mut self, root_u: u32, root_v: u32) -> bool;

    /// Merge the sets containing `u` and `v`.
    ///
    /// Returns `false` if they were already the same set.
    fn union(&mut self, u: u32, v: u32) -> bool {
        let root_u = self.find(u);
        let root_v = self.find(v);
        self.union_roots(root_u, root_v)
    }
}

/// A dense disjoint set forest over node ids `0..n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisjointSets {
    parents: Vec<u32>,
}

impl DisjointSets {
    /// `n` singleton sets.
    #[must_use]
    pub fn new(n: u32) -> Self {
        Self {
            parents: (0..n).collect(),
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// True if there are no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

impl UnionFind for DisjointSets {
    fn find(&mut self, mut i: u32) -> u32 {
        // Fast path: most nodes stay self-rooted.
        if self.parents[i as usize] == i {
            return i;
        }
        loop {
            let p = self.parents[i as usize];
            if p == i {
                return i;
            }
            let gp = self.parents[p as usize];
            self.parents[i as usize] = gp;
            i = gp;
        }
    }

    fn union_roots(&mut self, root_u: u32, root_v: u32) -> bool {
        if root_u == root_v {
            return false;
        }
        let (child, parent) = if root_u < root_v {
            (root_u, root_v)
        } else {
            (root_v, root_u)
        };
        self.parents[child as usize] = parent;
        true
    }
}

/// Options for [`disjoint_graphs`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphOptions {
    /// Detectors only declared by a `detector` instruction, never flipped by
    /// an error, become singleton components.
    pub include_declared_detectors: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            include_declared_detectors: true,
        }
    }
}

impl GraphOptions {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether declared-only detectors are included.
    #[must_use]
    pub fn with_declared_detectors(mut self, include: bool) -> Self {
        self.include_declared_detectors = include;
        self
    }
}

/// Connected components of the detector graph of `dem`.
///
/// Each component is sorted ascending and components are ordered by their
/// smallest detector.
#[must_use]
pub fn disjoint_graphs(dem: &Dem, options: GraphOptions) -> Vec<Vec<u32>> {
    let mut ids = BTreeSet::new();
    for instr in dem {
        match instr {
            Instruction::Error(error) => {
                ids.extend(error.targets().iter().filter_map(Target::detector_id));
            }
            Instruction::Detector(decl) if options.include_declared_detectors => {
                ids.insert(decl.id);
            }
            _ => {}
        }
    }

    // Dense node index per detector, in ascending id order.
    let node: HashMap<u32, u32> = ids.iter().copied().zip(0u32..).collect();
    let mut sets = DisjointSets::new(node.len() as u32);
    for error in dem.errors() {
        let mut nodes = error.targets().iter().filter_map(|t| t.detector_id().map(|id| node[&id]));
        if let Some(first) = nodes.next() {
            for other in nodes {
                sets.union(first, other);
            }
        }
    }

    let mut slot_of_root: HashMap<u32, usize> = HashMap::new();
    let mut components: Vec<Vec<u32>> = Vec::new();
    for &id in &ids {
        let root = sets.find(node[&id]);
        let slot = *slot_of_root.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[slot].push(id);
    }

    debug!(components = components.len(), "disjoint detector graphs");
    components
}
