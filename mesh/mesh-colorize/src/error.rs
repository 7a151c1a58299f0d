//! Error types for vertex colorization.

use thiserror::Error;

/// Result type for colorization operations.
pub type ColorizeResult<T> = Result<T, ColorizeError>;

/// Errors that can occur while configuring or running a colorization.
///
/// Every variant is structural: it is raised before any color buffer is
/// written. Numeric edge cases (unreachable vertices, near-zero distances)
/// are handled locally and never surface here.
#[derive(Debug, Error)]
pub enum ColorizeError {
    /// No color groups were declared.
    #[error("no color groups declared")]
    NoGroups,

    /// The mesh has no color layer to write into.
    #[error("no color layer selected or active")]
    NoColorLayer,

    /// A named color layer was requested but neither it nor an active layer exists.
    #[error("color layer '{name}' not found and no active layer")]
    MissingColorLayer {
        /// The requested layer name.
        name: String,
    },

    /// A group with this name was already declared.
    #[error("group '{name}' is already declared")]
    DuplicateGroup {
        /// The duplicated group name.
        name: String,
    },

    /// No declared group has this name.
    #[error("group '{name}' is not declared")]
    UnknownGroup {
        /// The requested group name.
        name: String,
    },

    /// A triangle references a vertex that does not exist.
    #[error("triangle {triangle} references vertex {index} (mesh has {vertex_count} vertices)")]
    InvalidVertex {
        /// The offending triangle.
        triangle: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A loop (face corner) references a vertex that does not exist.
    #[error("loop {corner} references vertex {index} (mesh has {vertex_count} vertices)")]
    InvalidLoop {
        /// The offending loop index.
        corner: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// The color buffer does not have one entry per loop.
    #[error("color buffer has {actual} entries, mesh has {expected} loops")]
    BufferSizeMismatch {
        /// Number of loops in the mesh.
        expected: usize,
        /// Number of entries in the buffer.
        actual: usize,
    },

    /// A configuration value is out of range.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl ColorizeError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
