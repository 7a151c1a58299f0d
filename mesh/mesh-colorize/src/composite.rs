//! Masked write-back of vertex colors into a per-loop buffer.

use crate::blend::VertexColors;
use crate::color::{ChannelMask, Rgba};
use crate::error::{ColorizeError, ColorizeResult};

/// Write vertex colors into a per-loop color buffer.
///
/// Every loop takes the color of the vertex it references, but only in the
/// channels enabled by `mask`; other channels keep their previous value.
/// Loops whose vertex has no color are left untouched.
///
/// The inputs are checked before anything is written, so an error leaves
/// the buffer unchanged.
///
/// Returns the number of loops written.
///
/// # Errors
///
/// Returns [`ColorizeError::BufferSizeMismatch`] if `buffer` does not have
/// one entry per loop, or [`ColorizeError::InvalidLoop`] if a loop
/// references a vertex outside `colors`.
///
/// # Example
///
/// ```
/// use mesh_colorize::{composite, ChannelMask, Rgba, VertexColors};
///
/// let colors = VertexColors::default();
/// let mut buffer: Vec<Rgba> = Vec::new();
/// let written = composite(&colors, &[], &mut buffer, ChannelMask::ALL).unwrap();
/// assert_eq!(written, 0);
/// ```
pub fn composite(
    colors: &VertexColors,
    loops: &[u32],
    buffer: &mut [Rgba],
    mask: ChannelMask,
) -> ColorizeResult<usize> {
    if buffer.len() != loops.len() {
        return Err(ColorizeError::BufferSizeMismatch {
            expected: loops.len(),
            actual: buffer.len(),
        });
    }

    if let Some((corner, &index)) = loops
        .iter()
        .enumerate()
        .find(|&(_, &v)| v as usize >= colors.len())
    {
        return Err(ColorizeError::InvalidLoop {
            corner,
            index,
            vertex_count: colors.len(),
        });
    }

    if mask.is_empty() {
        return Ok(0);
    }

    let mut written = 0;
    for (slot, &vertex) in buffer.iter_mut().zip(loops) {
        if let Some(color) = colors.get(vertex as usize) {
            mask.apply(slot, color);
            written += 1;
        }
    }

    Ok(written)
}
