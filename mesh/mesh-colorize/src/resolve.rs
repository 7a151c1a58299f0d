//! Partition of vertices into seeded and unassigned.

use crate::groups::{GroupList, VertexGroups};

/// Default membership-strength threshold.
pub const DEFAULT_THRESHOLD: f32 = 0.1;

/// Result of group resolution.
///
/// Every vertex is either seeded into exactly one declared group or
/// unassigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupAssignment {
    /// Owning group index of each vertex.
    owner: Vec<Option<usize>>,
    /// Seed vertices of each declared group, ascending.
    seeds: Vec<Vec<u32>>,
    /// Vertices owned by no group, ascending.
    unassigned: Vec<u32>,
}

impl GroupAssignment {
    /// Owning group of a vertex, as an index into the [`GroupList`].
    #[inline]
    #[must_use]
    pub fn owner(&self, vertex: usize) -> Option<usize> {
        self.owner.get(vertex).copied().flatten()
    }

    /// Seed vertices of a group, empty for an unknown index.
    #[inline]
    #[must_use]
    pub fn seeds(&self, group: usize) -> &[u32] {
        self.seeds.get(group).map_or(&[], Vec::as_slice)
    }

    /// Vertices owned by no group.
    #[inline]
    #[must_use]
    pub fn unassigned(&self) -> &[u32] {
        &self.unassigned
    }

    /// Number of groups the assignment was computed for.
    #[inline]
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.seeds.len()
    }

    /// Number of vertices covered.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.owner.len()
    }

    /// Number of seeded vertices across all groups.
    #[must_use]
    pub fn seeded_count(&self) -> usize {
        self.seeds.iter().map(Vec::len).sum()
    }

    /// Indices of groups with at least one seed.
    pub fn seeded_groups(&self) -> impl Iterator<Item = usize> + '_ {
        self.seeds
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_empty())
            .map(|(i, _)| i)
    }
}

/// Assign each vertex to at most one declared group.
///
/// A vertex qualifies for a group when its membership strength is strictly
/// greater than `threshold` and a color group with the vertex group's name
/// is declared. When a vertex qualifies for several groups, the one declared
/// first in `groups` wins, regardless of the order in which the vertex lists
/// its memberships.
///
/// Memberships in vertex groups that have no declared color group are
/// ignored, as are vertices beyond the end of `vertex_groups`.
///
/// # Example
///
/// ```
/// use mesh_colorize::{resolve_groups, ColorGroup, GroupList, Rgba, VertexGroups};
///
/// let mut vg = VertexGroups::new(3);
/// let a = vg.add_group("a");
/// let b = vg.add_group("b");
/// vg.assign(0, a, 1.0);
/// vg.assign(1, b, 1.0);
/// vg.assign(1, a, 1.0);
///
/// let mut groups = GroupList::new();
/// groups.add(ColorGroup::new("a", Rgba::WHITE)).unwrap();
/// groups.add(ColorGroup::new("b", Rgba::BLACK)).unwrap();
///
/// let assignment = resolve_groups(&groups, &vg, 3, 0.1);
/// assert_eq!(assignment.seeds(0), &[0, 1]);
/// assert_eq!(assignment.unassigned(), &[2]);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
// Truncation: vertex indices are u32, meshes with >4B vertices unsupported
pub fn resolve_groups(
    groups: &GroupList,
    vertex_groups: &VertexGroups,
    vertex_count: usize,
    threshold: f32,
) -> GroupAssignment {
    let declared = vertex_groups.declared_indices(groups);

    let mut owner = Vec::with_capacity(vertex_count);
    let mut seeds = vec![Vec::new(); groups.len()];
    let mut unassigned = Vec::new();

    for vertex in 0..vertex_count {
        let winner = vertex_groups
            .memberships(vertex)
            .iter()
            .filter(|m| m.strength > threshold)
            .filter_map(|m| declared.get(m.group as usize).copied().flatten())
            .min();

        match winner {
            Some(group) => seeds[group].push(vertex as u32),
            None => unassigned.push(vertex as u32),
        }
        owner.push(winner);
    }

    GroupAssignment {
        owner,
        seeds,
        unassigned,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::groups::ColorGroup;

    fn declare(names: &[&str]) -> GroupList {
        let mut groups = GroupList::new();
        for name in names {
            groups.add(ColorGroup::new(*name, Rgba::WHITE)).unwrap();
        }
        groups
    }

    #[test]
    fn threshold_is_strict() {
        let mut vg = VertexGroups::new(3);
        let a = vg.add_group("a");
        vg.assign(0, a, 0.1);
        vg.assign(1, a, 0.11);
        vg.assign(2, a, 0.0);

        let assignment = resolve_groups(&declare(&["a"]), &vg, 3, DEFAULT_THRESHOLD);
        assert_eq!(assignment.seeds(0), &[1]);
        assert_eq!(assignment.unassigned(), &[0, 2]);
    }

    #[test]
    fn ties_go_to_first_declared() {
        let mut vg = VertexGroups::new(2);
        let a = vg.add_group("a");
        let b = vg.add_group("b");
        // Vertex 0 lists b first, vertex 1 lists a first
        vg.assign(0, b, 1.0);
        vg.assign(0, a, 0.5);
        vg.assign(1, a, 0.5);
        vg.assign(1, b, 1.0);

        let ab = resolve_groups(&declare(&["a", "b"]), &vg, 2, 0.1);
        assert_eq!(ab.owner(0), Some(0));
        assert_eq!(ab.owner(1), Some(0));

        let ba = resolve_groups(&declare(&["b", "a"]), &vg, 2, 0.1);
        assert_eq!(ba.owner(0), Some(0));
        assert_eq!(ba.seeds(0), &[0, 1]);
        assert!(ba.seeds(1).is_empty());
    }

    #[test]
    fn undeclared_groups_are_ignored() {
        let mut vg = VertexGroups::new(2);
        let hidden = vg.add_group("hidden");
        let a = vg.add_group("a");
        vg.assign(0, hidden, 1.0);
        vg.assign(1, hidden, 1.0);
        vg.assign(1, a, 0.2);

        let assignment = resolve_groups(&declare(&["a"]), &vg, 2, 0.1);
        assert_eq!(assignment.unassigned(), &[0]);
        assert_eq!(assignment.seeds(0), &[1]);
    }

    #[test]
    fn assignment_is_total() {
        let mut vg = VertexGroups::new(3);
        let a = vg.add_group("a");
        let b = vg.add_group("b");
        vg.assign(0, a, 1.0);
        vg.assign(2, b, 1.0);

        // Table shorter than the mesh: vertex 3 has no memberships
        let assignment = resolve_groups(&declare(&["a", "b"]), &vg, 4, 0.1);
        assert_eq!(assignment.vertex_count(), 4);
        assert_eq!(
            assignment.seeded_count() + assignment.unassigned().len(),
            4
        );
        for v in 0..4 {
            let in_seeds = (0..assignment.group_count())
                .filter(|&g| assignment.seeds(g).contains(&(v as u32)))
                .count();
            let in_unassigned = usize::from(assignment.unassigned().contains(&(v as u32)));
            assert_eq!(in_seeds + in_unassigned, 1);
        }
    }

    #[test]
    fn seeded_groups_skips_empty() {
        let mut vg = VertexGroups::new(2);
        let b = vg.add_group("b");
        vg.assign(0, b, 1.0);

        let assignment = resolve_groups(&declare(&["a", "b", "c"]), &vg, 2, 0.1);
        assert_eq!(assignment.seeded_groups().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn empty_mesh() {
        let assignment = resolve_groups(&declare(&["a"]), &VertexGroups::default(), 0, 0.1);
        assert_eq!(assignment.vertex_count(), 0);
        assert!(assignment.unassigned().is_empty());
        assert_eq!(assignment.group_count(), 1);
    }
}
