//! Per-vertex distance to one group's seeds.

/// Per-vertex approximate distance to a group.
///
/// Unreached vertices hold the sentinel value, a finite upper bound (the
/// mesh diameter), never infinity. Blending treats the sentinel as "very
/// far" rather than as missing data.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceField {
    /// Distance values for each vertex.
    distances: Vec<f64>,
    /// Value of unreached vertices.
    sentinel: f64,
}

impl DistanceField {
    /// Create a field with every vertex at the sentinel.
    #[must_use]
    pub fn new(vertex_count: usize, sentinel: f64) -> Self {
        Self {
            distances: vec![sentinel; vertex_count],
            sentinel,
        }
    }

    /// Create a field from raw distances.
    #[must_use]
    pub const fn from_distances(distances: Vec<f64>, sentinel: f64) -> Self {
        Self {
            distances,
            sentinel,
        }
    }

    /// Get the distance to a vertex.
    ///
    /// Returns the sentinel if the index is out of bounds.
    #[inline]
    #[must_use]
    pub fn distance(&self, vertex: usize) -> f64 {
        self.distances.get(vertex).copied().unwrap_or(self.sentinel)
    }

    /// The unreached value.
    #[inline]
    #[must_use]
    pub const fn sentinel(&self) -> f64 {
        self.sentinel
    }

    /// Check if relaxation brought a vertex below the sentinel.
    #[inline]
    #[must_use]
    pub fn is_reached(&self, vertex: usize) -> bool {
        self.distance(vertex) < self.sentinel
    }

    /// Count vertices below the sentinel.
    #[must_use]
    pub fn reached_count(&self) -> usize {
        self.distances.iter().filter(|&&d| d < self.sentinel).count()
    }

    /// Largest distance below the sentinel, if any vertex was reached.
    #[must_use]
    pub fn max_reached_distance(&self) -> Option<f64> {
        self.distances
            .iter()
            .copied()
            .filter(|&d| d < self.sentinel)
            .reduce(f64::max)
    }

    /// Get the number of vertices.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Check if the field is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Get all distances as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.distances
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.distances
    }

    /// Consume and return the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.distances
    }

    /// Iterate over (vertex index, distance) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.distances.iter().copied().enumerate()
    }
}
