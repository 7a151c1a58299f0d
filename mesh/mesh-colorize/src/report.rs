//! Summary of a colorization run.

use crate::blend::BlendPolicy;

/// What a call to [`colorize`](crate::colorize) did.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorizeReport {
    /// Number of mesh vertices.
    pub vertices: usize,

    /// Number of entries in the relaxed edge list.
    pub edges: usize,

    /// Number of declared groups.
    pub groups: usize,

    /// Number of declared groups that own at least one vertex.
    pub seeded_groups: usize,

    /// Vertices colored directly by their group.
    pub seeded_vertices: usize,

    /// Unassigned vertices that received a blended color.
    pub blended_vertices: usize,

    /// Vertices left at their previous color.
    pub kept_vertices: usize,

    /// Loops whose color was written.
    pub loops_written: usize,

    /// Blend policy used.
    pub policy: BlendPolicy,

    /// Iteration count used.
    pub iterations: usize,
}

impl ColorizeReport {
    /// Report for a mesh with no vertices.
    #[must_use]
    pub const fn empty(groups: usize, policy: BlendPolicy, iterations: usize) -> Self {
        Self {
            vertices: 0,
            edges: 0,
            groups,
            seeded_groups: 0,
            seeded_vertices: 0,
            blended_vertices: 0,
            kept_vertices: 0,
            loops_written: 0,
            policy,
            iterations,
        }
    }

    /// Check if any loop was written.
    #[must_use]
    pub const fn wrote_colors(&self) -> bool {
        self.loops_written > 0
    }
}

impl std::fmt::Display for ColorizeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Colorize ({}, K={}): {}/{} groups seeded, {} seeded + {} blended + {} kept vertices, {} loops written",
            self.policy,
            self.iterations,
            self.seeded_groups,
            self.groups,
            self.seeded_vertices,
            self.blended_vertices,
            self.kept_vertices,
            self.loops_written
        )
    }
}
