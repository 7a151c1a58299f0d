//! Named per-loop color layers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{ColorizeError, ColorizeResult};

/// One per-loop color buffer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorLayer {
    /// Layer name.
    pub name: String,
    /// One color per loop.
    pub data: Vec<Rgba>,
}

impl ColorLayer {
    /// Create a layer with every loop set to `fill`.
    #[must_use]
    pub fn filled(name: impl Into<String>, loop_count: usize, fill: Rgba) -> Self {
        Self {
            name: name.into(),
            data: vec![fill; loop_count],
        }
    }
}

/// The color layers of a mesh, one of which may be active.
///
/// # Example
///
/// ```
/// use mesh_colorize::{ColorLayer, ColorLayers, Rgba};
///
/// let mut layers = ColorLayers::new();
/// layers.push(ColorLayer::filled("Col", 6, Rgba::WHITE));
/// layers.push(ColorLayer::filled("Mask", 6, Rgba::BLACK));
///
/// // The first layer added becomes active
/// assert_eq!(layers.select(None).unwrap().name, "Col");
/// assert_eq!(layers.select(Some("Mask")).unwrap().name, "Mask");
/// // Unknown names fall back to the active layer
/// assert_eq!(layers.select(Some("Other")).unwrap().name, "Col");
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorLayers {
    layers: Vec<ColorLayer>,
    active: Option<usize>,
}

impl ColorLayers {
    /// Create an empty layer set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer, replacing any layer with the same name.
    ///
    /// The first layer added becomes active.
    pub fn push(&mut self, layer: ColorLayer) {
        if let Some(index) = self.index_of(&layer.name) {
            self.layers[index] = layer;
            return;
        }
        self.layers.push(layer);
        if self.active.is_none() {
            self.active = Some(self.layers.len() - 1);
        }
    }

    /// Make a named layer active.
    ///
    /// # Errors
    ///
    /// Returns [`ColorizeError::MissingColorLayer`] if no layer has this name.
    pub fn set_active(&mut self, name: &str) -> ColorizeResult<()> {
        let index = self
            .index_of(name)
            .ok_or_else(|| ColorizeError::MissingColorLayer {
                name: name.to_string(),
            })?;
        self.active = Some(index);
        Ok(())
    }

    /// The active layer.
    #[must_use]
    pub fn active(&self) -> Option<&ColorLayer> {
        self.active.and_then(|i| self.layers.get(i))
    }

    /// Get a layer by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ColorLayer> {
        self.index_of(name).map(|i| &self.layers[i])
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Check if there are no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.name == name)
    }

    fn selected_index(&self, name: Option<&str>) -> ColorizeResult<usize> {
        name.and_then(|n| self.index_of(n))
            .or(self.active)
            .filter(|&i| i < self.layers.len())
            .ok_or_else(|| match name {
                Some(n) => ColorizeError::MissingColorLayer {
                    name: n.to_string(),
                },
                None => ColorizeError::NoColorLayer,
            })
    }

    /// Resolve the layer a colorization writes to.
    ///
    /// A named layer that exists wins; otherwise the active layer is used.
    ///
    /// # Errors
    ///
    /// Returns [`ColorizeError::MissingColorLayer`] if a name was given and
    /// neither it nor an active layer exists, or
    /// [`ColorizeError::NoColorLayer`] if no name was given and no layer is
    /// active.
    pub fn select(&self, name: Option<&str>) -> ColorizeResult<&ColorLayer> {
        let index = self.selected_index(name)?;
        Ok(&self.layers[index])
    }

    /// Mutable variant of [`select`](Self::select).
    ///
    /// # Errors
    ///
    /// Same as [`select`](Self::select).
    pub fn select_mut(&mut self, name: Option<&str>) -> ColorizeResult<&mut ColorLayer> {
        let index = self.selected_index(name)?;
        Ok(&mut self.layers[index])
    }
}
