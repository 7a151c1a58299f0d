//! Bounded multi-source edge relaxation.
//!
//! Distances are propagated from a group's seeds by sweeping the flat edge
//! list a fixed number of times. Each sweep relaxes every edge in both
//! directions, in place, so one sweep can carry a minimum across several
//! edges when the edge order allows it. After `K - 1` sweeps every vertex
//! within `K - 1` hops of a seed holds an upper bound of its edge-graph
//! distance; vertices further out may still hold the sentinel.
//!
//! This is Bellman-Ford capped at a pass budget rather than run to a
//! fixpoint. The budget doubles as the cost ceiling: `O(K * |E|)` per group.

use rayon::prelude::*;
use tracing::debug;

use crate::distance::DistanceField;
use crate::graph::{Edge, EdgeGraph};
use crate::resolve::GroupAssignment;

/// Default iteration count.
pub const DEFAULT_ITERATIONS: usize = 20;

/// Relax every edge once in both directions.
///
/// Returns `true` if any distance decreased. Distances never increase.
/// Edges with an endpoint outside `distances` are skipped.
pub fn relax_pass(edges: &[Edge], distances: &mut [f64]) -> bool {
    let mut changed = false;

    for &Edge { u, v, weight } in edges {
        let (u, v) = (u as usize, v as usize);
        if u >= distances.len() || v >= distances.len() {
            continue;
        }

        let via_u = distances[u] + weight;
        if via_u < distances[v] {
            distances[v] = via_u;
            changed = true;
        }

        let via_v = distances[v] + weight;
        if via_v < distances[u] {
            distances[u] = via_v;
            changed = true;
        }
    }

    changed
}

/// Distance field solver over a mesh edge graph.
///
/// # Example
///
/// ```
/// use mesh_colorize::{Edge, EdgeGraph, RelaxationSolver};
///
/// // Path 0 - 1 - 2 with unit edges
/// let graph = EdgeGraph::from_edges(
///     3,
///     vec![
///         Edge { u: 0, v: 1, weight: 1.0 },
///         Edge { u: 1, v: 2, weight: 1.0 },
///     ],
/// );
///
/// let solver = RelaxationSolver::new(&graph, 10.0, 20);
/// let field = solver.compute(&[0]);
///
/// assert_eq!(field.distance(0), 0.0);
/// assert_eq!(field.distance(2), 2.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RelaxationSolver<'a> {
    graph: &'a EdgeGraph,
    sentinel: f64,
    iterations: usize,
}

impl<'a> RelaxationSolver<'a> {
    /// Create a solver.
    ///
    /// `sentinel` is the starting value of every non-seed vertex and must be
    /// an upper bound on useful distances. `iterations` is the `K` of the
    /// pass budget: `K - 1` sweeps are run. Values below 1 are treated as 1.
    #[must_use]
    pub fn new(graph: &'a EdgeGraph, sentinel: f64, iterations: usize) -> Self {
        Self {
            graph,
            sentinel,
            iterations: iterations.max(1),
        }
    }

    /// The graph being solved over.
    #[must_use]
    pub const fn graph(&self) -> &'a EdgeGraph {
        self.graph
    }

    /// The unreached value.
    #[must_use]
    pub const fn sentinel(&self) -> f64 {
        self.sentinel
    }

    /// The iteration count `K`.
    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    /// Compute the distance field of one seed set.
    ///
    /// Seeds outside the graph are ignored. With no seeds the field stays at
    /// the sentinel everywhere.
    #[must_use]
    pub fn compute(&self, seeds: &[u32]) -> DistanceField {
        let vertex_count = self.graph.vertex_count();
        let mut field = DistanceField::new(vertex_count, self.sentinel);

        let distances = field.as_mut_slice();
        let mut seeded = false;
        for &seed in seeds {
            if let Some(d) = distances.get_mut(seed as usize) {
                *d = 0.0;
                seeded = true;
            }
        }

        if !seeded {
            return field;
        }

        let mut passes = 0;
        for _ in 1..self.iterations {
            passes += 1;
            // A sweep that changes nothing is a fixpoint; later sweeps would not either
            if !relax_pass(self.graph.edges(), distances) {
                break;
            }
        }

        debug!(
            seeds = seeds.len(),
            passes,
            reached = field.reached_count(),
            "Relaxed distance field"
        );

        field
    }

    /// Compute one distance field per group of an assignment.
    ///
    /// Fields are returned in group order. Groups are independent, so with
    /// `parallel` set they are solved on the rayon pool; the result is the
    /// same either way.
    #[must_use]
    pub fn compute_all(&self, assignment: &GroupAssignment, parallel: bool) -> Vec<DistanceField> {
        let groups = assignment.group_count();

        if parallel && groups > 1 {
            (0..groups)
                .into_par_iter()
                .map(|g| self.compute(assignment.seeds(g)))
                .collect()
        } else {
            (0..groups).map(|g| self.compute(assignment.seeds(g))).collect()
        }
    }
}
