//! Multi-source color interpolation.
//!
//! Seeded vertices take their group's color unchanged. Every unassigned
//! vertex blends the colors of all groups that own at least one seed, with
//! factors derived from the vertex's distance to each group. Groups without
//! seeds contribute nothing.
//!
//! Two policies are available:
//!
//! - [`BlendPolicy::Polynomial`] multiplies pairwise distance ratios. With
//!   two groups it is the classic inverse-distance split; with more groups
//!   the factors are not normalized and need not sum to one.
//! - [`BlendPolicy::WeightedInverse`] is a normalized inverse-distance
//!   average scaled by group weights.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::{ColorSum, Rgba};
use crate::distance::DistanceField;
use crate::groups::GroupList;
use crate::resolve::GroupAssignment;

/// Floor applied to distances and denominators in the weighted inverse blend.
pub const DISTANCE_EPSILON: f64 = 1e-4;

/// Interpolation scheme for unassigned vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BlendPolicy {
    /// Product of pairwise ratios of weight-normalized distances.
    ///
    /// For group `i` with normalized distance `d_i = D_i / w_i`, the factor
    /// is the product over every other group `j` of `d_j / (d_i + d_j)`.
    #[default]
    Polynomial,

    /// Weight over distance, normalized by the sum of factors.
    ///
    /// The factor of group `i` is `w_i / max(D_i, 1e-4)`. A vertex whose
    /// factor sum does not exceed `1e-4` keeps its previous color.
    WeightedInverse,
}

impl std::fmt::Display for BlendPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Polynomial => write!(f, "polynomial"),
            Self::WeightedInverse => write!(f, "weighted inverse"),
        }
    }
}

/// Computed color of every vertex.
///
/// `None` marks a vertex whose color must not be written: the weighted
/// inverse fallback, or any unassigned vertex when no group has seeds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexColors {
    colors: Vec<Option<Rgba>>,
    seeded: usize,
    blended: usize,
}

impl VertexColors {
    /// Color of a vertex, `None` if it keeps its previous color.
    #[inline]
    #[must_use]
    pub fn get(&self, vertex: usize) -> Option<Rgba> {
        self.colors.get(vertex).copied().flatten()
    }

    /// All colors indexed by vertex.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Option<Rgba>] {
        &self.colors
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if there are no vertices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Number of vertices colored directly by their group.
    #[inline]
    #[must_use]
    pub const fn seeded_count(&self) -> usize {
        self.seeded
    }

    /// Number of unassigned vertices that received a blended color.
    #[inline]
    #[must_use]
    pub const fn blended_count(&self) -> usize {
        self.blended
    }

    /// Number of vertices left at their previous color.
    #[must_use]
    pub fn kept_count(&self) -> usize {
        self.colors.len() - self.seeded - self.blended
    }
}

/// A group that takes part in blending.
#[derive(Debug, Clone, Copy)]
struct Source<'a> {
    color: Rgba,
    weight: f64,
    field: &'a DistanceField,
}

/// Compute the color of every vertex.
///
/// `fields` holds one distance field per group of `groups`, in declaration
/// order, as produced by
/// [`RelaxationSolver::compute_all`](crate::RelaxationSolver::compute_all).
/// The policy is matched once; the per-vertex loop is specialized for it.
///
/// Groups without a field in `fields` are left out of the blend.
#[must_use]
pub fn blend(
    fields: &[DistanceField],
    groups: &GroupList,
    assignment: &GroupAssignment,
    policy: BlendPolicy,
) -> VertexColors {
    let sources: Vec<Source<'_>> = assignment
        .seeded_groups()
        .filter_map(|g| {
            let group = groups.at(g)?;
            let field = fields.get(g)?;
            Some(Source {
                color: group.color(),
                weight: group.weight(),
                field,
            })
        })
        .collect();

    match policy {
        BlendPolicy::Polynomial => blend_with(groups, assignment, &sources, polynomial),
        BlendPolicy::WeightedInverse => {
            blend_with(groups, assignment, &sources, weighted_inverse)
        }
    }
}

fn blend_with<F>(
    groups: &GroupList,
    assignment: &GroupAssignment,
    sources: &[Source<'_>],
    color_at: F,
) -> VertexColors
where
    F: Fn(&[Source<'_>], usize) -> Option<Rgba>,
{
    let mut colors = vec![None; assignment.vertex_count()];
    let mut seeded = 0;
    let mut blended = 0;

    for (vertex, color) in colors.iter_mut().enumerate() {
        if let Some(group) = assignment.owner(vertex).and_then(|g| groups.at(g)) {
            *color = Some(group.color());
            seeded += 1;
        }
    }

    if !sources.is_empty() {
        for &vertex in assignment.unassigned() {
            let vertex = vertex as usize;
            if let Some(c) = color_at(sources, vertex) {
                colors[vertex] = Some(c);
                blended += 1;
            }
        }
    }

    VertexColors {
        colors,
        seeded,
        blended,
    }
}

/// Pairwise ratio `other / (own + other)`.
///
/// Both distances at zero is an exact tie and splits evenly.
#[inline]
fn pair_ratio(own: f64, other: f64) -> f64 {
    let sum = own + other;
    if sum > 0.0 { other / sum } else { 0.5 }
}

#[allow(clippy::unnecessary_wraps)]
fn polynomial(sources: &[Source<'_>], vertex: usize) -> Option<Rgba> {
    let mut sum = ColorSum::default();

    for (i, source) in sources.iter().enumerate() {
        let own = source.field.distance(vertex) / source.weight;

        let factor: f64 = sources
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, other)| pair_ratio(own, other.field.distance(vertex) / other.weight))
            .product();

        sum.add_scaled(source.color, factor);
    }

    Some(sum.into_rgba())
}

fn weighted_inverse(sources: &[Source<'_>], vertex: usize) -> Option<Rgba> {
    let mut sum = ColorSum::default();
    let mut total = 0.0;

    for source in sources {
        let factor = source.weight / source.field.distance(vertex).max(DISTANCE_EPSILON);
        sum.add_scaled(source.color, factor);
        total += factor;
    }

    (total > DISTANCE_EPSILON).then(|| sum.divided(total))
}
