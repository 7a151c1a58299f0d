//! Color group declarations and vertex group membership.
//!
//! Two tables describe the groups of a colorization:
//!
//! - [`GroupList`] is the user's ordered list of color groups, each with a
//!   target color and an influence weight. Its order is the tie-break order
//!   for vertices that qualify for more than one group.
//! - [`VertexGroups`] is the mesh's own vertex group data: named groups and,
//!   for every vertex, the strength of its membership in each of them.
//!
//! A color group picks up the mesh vertex group with the same name.

use hashbrown::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{ColorizeError, ColorizeResult};

/// Smallest allowed group weight.
pub const MIN_WEIGHT: f64 = 0.01;

/// Largest allowed group weight.
pub const MAX_WEIGHT: f64 = 5.0;

/// A named color group.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorGroup {
    name: String,
    color: Rgba,
    weight: f64,
}

impl ColorGroup {
    /// Create a group with weight 1.
    ///
    /// Color channels are clamped into `[0, 1]`.
    #[must_use]
    pub fn new(name: impl Into<String>, color: Rgba) -> Self {
        Self {
            name: name.into(),
            color: color.clamped(),
            weight: 1.0,
        }
    }

    /// Set the influence weight.
    ///
    /// The weight is clamped into `[0.01, 5.0]`. A larger weight makes the
    /// group reach further: distances to it are divided by its weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = if weight.is_nan() {
            1.0
        } else {
            weight.clamp(MIN_WEIGHT, MAX_WEIGHT)
        };
        self
    }

    /// The group name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The target color.
    #[inline]
    #[must_use]
    pub const fn color(&self) -> Rgba {
        self.color
    }

    /// The influence weight.
    #[inline]
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }
}

/// Ordered list of declared color groups.
///
/// # Example
///
/// ```
/// use mesh_colorize::{ColorGroup, GroupList, Rgba};
///
/// let mut groups = GroupList::new();
/// groups.add(ColorGroup::new("head", Rgba::WHITE)).unwrap();
/// groups.add(ColorGroup::new("feet", Rgba::BLACK).with_weight(2.0)).unwrap();
///
/// assert_eq!(groups.index_of("feet"), Some(1));
/// assert!(groups.add(ColorGroup::new("head", Rgba::BLACK)).is_err());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupList {
    groups: Vec<ColorGroup>,
}

impl GroupList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a group.
    ///
    /// # Errors
    ///
    /// Returns [`ColorizeError::DuplicateGroup`] if a group with the same
    /// name is already declared.
    pub fn add(&mut self, group: ColorGroup) -> ColorizeResult<()> {
        if self.contains(group.name()) {
            return Err(ColorizeError::DuplicateGroup {
                name: group.name,
            });
        }
        self.groups.push(group);
        Ok(())
    }

    /// Remove a group by name, keeping the order of the others.
    ///
    /// # Errors
    ///
    /// Returns [`ColorizeError::UnknownGroup`] if no group has this name.
    pub fn remove(&mut self, name: &str) -> ColorizeResult<ColorGroup> {
        let index = self.index_of(name).ok_or_else(|| ColorizeError::UnknownGroup {
            name: name.to_string(),
        })?;
        Ok(self.groups.remove(index))
    }

    /// Get a group by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ColorGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Get a mutable reference to a group by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut ColorGroup> {
        self.groups.iter_mut().find(|g| g.name == name)
    }

    /// Position of a group in declaration order.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name == name)
    }

    /// Check if a group with this name is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Group at a declaration index.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&ColorGroup> {
        self.groups.get(index)
    }

    /// Groups in declaration order.
    #[must_use]
    pub fn as_slice(&self) -> &[ColorGroup] {
        &self.groups
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ColorGroup> {
        self.groups.iter()
    }

    /// Number of declared groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no group is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a GroupList {
    type Item = &'a ColorGroup;
    type IntoIter = std::slice::Iter<'a, ColorGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// One vertex's membership in a mesh vertex group.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Membership {
    /// Slot of the vertex group in [`VertexGroups::names`].
    pub group: u32,
    /// Membership strength in `[0, 1]`.
    pub strength: f32,
}

/// Named vertex groups of a mesh with per-vertex memberships.
///
/// # Example
///
/// ```
/// use mesh_colorize::VertexGroups;
///
/// let mut vg = VertexGroups::new(4);
/// let arm = vg.add_group("arm");
/// vg.assign(0, arm, 1.0);
/// vg.assign(1, arm, 0.05);
///
/// assert_eq!(vg.strength(0, arm), Some(1.0));
/// assert_eq!(vg.strength(2, arm), None);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexGroups {
    names: Vec<String>,
    memberships: Vec<Vec<Membership>>,
}

impl VertexGroups {
    /// Create a table for `vertex_count` vertices with no groups.
    #[must_use]
    pub fn new(vertex_count: usize) -> Self {
        Self {
            names: Vec::new(),
            memberships: vec![Vec::new(); vertex_count],
        }
    }

    /// Add a named group, returning its slot.
    ///
    /// Adding an existing name returns the existing slot.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: more than 4B vertex groups is unsupported
    pub fn add_group(&mut self, name: impl Into<String>) -> u32 {
        let name = name.into();
        if let Some(slot) = self.slot_of(&name) {
            return slot;
        }
        self.names.push(name);
        (self.names.len() - 1) as u32
    }

    /// Slot of a named group.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn slot_of(&self, name: &str) -> Option<u32> {
        self.names.iter().position(|n| n == name).map(|i| i as u32)
    }

    /// Group names by slot.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Set a vertex's membership strength in a group.
    ///
    /// Vertices beyond the current table size grow the table. Assigning the
    /// same group twice replaces the earlier strength.
    pub fn assign(&mut self, vertex: usize, group: u32, strength: f32) {
        if vertex >= self.memberships.len() {
            self.memberships.resize(vertex + 1, Vec::new());
        }
        let list = &mut self.memberships[vertex];
        match list.iter_mut().find(|m| m.group == group) {
            Some(m) => m.strength = strength,
            None => list.push(Membership { group, strength }),
        }
    }

    /// Assign every listed vertex to a group with the same strength.
    pub fn assign_all(&mut self, vertices: impl IntoIterator<Item = usize>, group: u32, strength: f32) {
        for vertex in vertices {
            self.assign(vertex, group, strength);
        }
    }

    /// Memberships of a vertex, empty if it has none.
    #[must_use]
    pub fn memberships(&self, vertex: usize) -> &[Membership] {
        self.memberships.get(vertex).map_or(&[], Vec::as_slice)
    }

    /// Strength of a vertex's membership in a group.
    #[must_use]
    pub fn strength(&self, vertex: usize, group: u32) -> Option<f32> {
        self.memberships(vertex)
            .iter()
            .find(|m| m.group == group)
            .map(|m| m.strength)
    }

    /// Number of vertices covered by the table.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.memberships.len()
    }

    /// Map each vertex group slot to the index of the color group with the
    /// same name, if one is declared.
    #[must_use]
    pub(crate) fn declared_indices(&self, groups: &GroupList) -> Vec<Option<usize>> {
        let by_name: HashMap<&str, usize> = groups
            .iter()
            .enumerate()
            .map(|(i, g)| (g.name(), i))
            .collect();

        self.names
            .iter()
            .map(|n| by_name.get(n.as_str()).copied())
            .collect()
    }
}
