//! Mesh snapshot consumed by the colorizer.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ColorizeError, ColorizeResult};

/// Triangle mesh with per-loop vertex references.
///
/// A *loop* is a face corner: one entry per corner of every polygon, each
/// naming the vertex it sits on. Color buffers are indexed by loop, so a
/// vertex shared by six faces owns six loops.
///
/// Triangles drive the edge graph; loops drive the color write-back. Hosts
/// with n-gon faces pass their triangulation in `triangles` and their
/// polygon corners in `loops`.
///
/// # Example
///
/// ```
/// use mesh_colorize::ColorMesh;
/// use nalgebra::Point3;
///
/// let mesh = ColorMesh::from_triangles(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.loop_count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorMesh {
    /// Vertex positions.
    pub positions: Vec<Point3<f64>>,

    /// Triangles as indices into `positions`.
    pub triangles: Vec<[u32; 3]>,

    /// Vertex index of each loop (face corner).
    pub loops: Vec<u32>,
}

impl ColorMesh {
    /// Create an empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            triangles: Vec::new(),
            loops: Vec::new(),
        }
    }

    /// Create a mesh from all three parts.
    #[inline]
    #[must_use]
    pub const fn from_parts(
        positions: Vec<Point3<f64>>,
        triangles: Vec<[u32; 3]>,
        loops: Vec<u32>,
    ) -> Self {
        Self {
            positions,
            triangles,
            loops,
        }
    }

    /// Create a mesh whose loops are the triangle corners in order.
    #[must_use]
    pub fn from_triangles(positions: Vec<Point3<f64>>, triangles: Vec<[u32; 3]>) -> Self {
        let loops = triangles.iter().flatten().copied().collect();
        Self {
            positions,
            triangles,
            loops,
        }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of loops.
    #[inline]
    #[must_use]
    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }

    /// Check if the mesh has no vertices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Largest side of the axis-aligned bounding box.
    ///
    /// This is the upper bound used for unreached distances. Returns 0 for
    /// an empty mesh or a mesh collapsed to a single point.
    #[must_use]
    pub fn diameter(&self) -> f64 {
        let Some(first) = self.positions.first() else {
            return 0.0;
        };

        let (min, max) = self
            .positions
            .iter()
            .fold((first.coords, first.coords), |(min, max), p| {
                (min.inf(&p.coords), max.sup(&p.coords))
            });

        (max - min).max()
    }

    /// Check that every triangle and loop references an existing vertex.
    ///
    /// # Errors
    ///
    /// Returns [`ColorizeError::InvalidVertex`] for the first bad triangle
    /// index, or [`ColorizeError::InvalidLoop`] for the first bad loop.
    pub fn validate(&self) -> ColorizeResult<()> {
        let vertex_count = self.vertex_count();

        for (triangle, corners) in self.triangles.iter().enumerate() {
            if let Some(&index) = corners.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(ColorizeError::InvalidVertex {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }

        if let Some((corner, &index)) = self
            .loops
            .iter()
            .enumerate()
            .find(|&(_, &i)| i as usize >= vertex_count)
        {
            return Err(ColorizeError::InvalidLoop {
                corner,
                index,
                vertex_count,
            });
        }

        Ok(())
    }
}
