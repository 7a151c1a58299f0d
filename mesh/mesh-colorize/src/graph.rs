//! Edge graph derived from a triangulation.

use nalgebra::Point3;

use crate::error::{ColorizeError, ColorizeResult};
use crate::mesh::ColorMesh;

/// An undirected weighted mesh edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// First endpoint.
    pub u: u32,
    /// Second endpoint.
    pub v: u32,
    /// Euclidean length of the edge.
    pub weight: f64,
}

/// Flat edge list plus per-vertex adjacency.
///
/// The edge list keeps one entry per triangle side, so an edge shared by two
/// triangles appears twice. Relaxation is idempotent under duplicates, and a
/// flat list keeps the sweep cache friendly. The adjacency lists are
/// deduplicated and hold both directions of every edge.
#[derive(Debug, Clone, Default)]
pub struct EdgeGraph {
    /// Triangle sides in triangle order.
    edges: Vec<Edge>,
    /// For each vertex, list of (neighbor index, edge length) pairs.
    neighbors: Vec<Vec<(u32, f64)>>,
}

impl EdgeGraph {
    /// Build the graph of a mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if a triangle references a missing vertex.
    pub fn from_mesh(mesh: &ColorMesh) -> ColorizeResult<Self> {
        Self::from_triangles(&mesh.positions, &mesh.triangles)
    }

    /// Build the graph from positions and triangle indices.
    ///
    /// Sides whose endpoints are the same vertex are skipped. Sides between
    /// distinct vertices at the same position are kept with weight 0.
    ///
    /// # Errors
    ///
    /// Returns [`ColorizeError::InvalidVertex`] if a triangle references a missing vertex.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_colorize::EdgeGraph;
    /// use nalgebra::Point3;
    ///
    /// let positions = [
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(3.0, 0.0, 0.0),
    ///     Point3::new(0.0, 4.0, 0.0),
    /// ];
    /// let graph = EdgeGraph::from_triangles(&positions, &[[0, 1, 2]]).unwrap();
    ///
    /// assert_eq!(graph.edge_count(), 3);
    /// assert_eq!(graph.neighbors(0).len(), 2);
    /// ```
    pub fn from_triangles(
        positions: &[Point3<f64>],
        triangles: &[[u32; 3]],
    ) -> ColorizeResult<Self> {
        let vertex_count = positions.len();

        for (triangle, corners) in triangles.iter().enumerate() {
            if let Some(&index) = corners.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(ColorizeError::InvalidVertex {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }

        let mut edges = Vec::with_capacity(triangles.len() * 3);
        for &[i0, i1, i2] in triangles {
            for (u, v) in [(i0, i1), (i1, i2), (i2, i0)] {
                if u == v {
                    continue;
                }
                let weight = (positions[v as usize] - positions[u as usize]).norm();
                edges.push(Edge { u, v, weight });
            }
        }

        Ok(Self::from_edges(vertex_count, edges))
    }

    /// Build the graph from an explicit edge list.
    ///
    /// Edges with an endpoint outside `0..vertex_count` or with equal
    /// endpoints are dropped.
    #[must_use]
    pub fn from_edges(vertex_count: usize, edges: Vec<Edge>) -> Self {
        let edges: Vec<Edge> = edges
            .into_iter()
            .filter(|e| {
                e.u != e.v && (e.u as usize) < vertex_count && (e.v as usize) < vertex_count
            })
            .collect();

        let mut neighbors: Vec<Vec<(u32, f64)>> = vec![Vec::new(); vertex_count];
        for edge in &edges {
            Self::add_neighbor(&mut neighbors, edge.u, edge.v, edge.weight);
            Self::add_neighbor(&mut neighbors, edge.v, edge.u, edge.weight);
        }

        Self { edges, neighbors }
    }

    /// Record `to` as a neighbor of `from`, keeping the shortest length seen.
    fn add_neighbor(neighbors: &mut [Vec<(u32, f64)>], from: u32, to: u32, length: f64) {
        let list = &mut neighbors[from as usize];
        match list.iter_mut().find(|(n, _)| *n == to) {
            Some(entry) => entry.1 = entry.1.min(length),
            None => list.push((to, length)),
        }
    }

    /// Get the number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of entries in the flat edge list, duplicates included.
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of distinct undirected edges.
    #[must_use]
    pub fn unique_edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// The flat edge list.
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get the neighbors of a vertex.
    ///
    /// Returns a slice of (neighbor index, edge length) pairs, empty for an
    /// out-of-range vertex.
    #[inline]
    #[must_use]
    pub fn neighbors(&self, vertex: usize) -> &[(u32, f64)] {
        self.neighbors.get(vertex).map_or(&[], Vec::as_slice)
    }

    /// Check if the graph has no vertices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}
