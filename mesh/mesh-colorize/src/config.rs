//! Configuration for colorization.
//!
//! # Presets
//!
//! - [`ColorizeConfig::default()`] - 20 iterations, polynomial blend, red and
//!   green channels written
//! - [`ColorizeConfig::smooth()`] - More iterations and the normalized
//!   weighted inverse blend
//! - [`ColorizeConfig::fast()`] - Few iterations, single threaded
//!
//! # Example
//!
//! ```
//! use mesh_colorize::{BlendPolicy, ChannelMask, ColorizeConfig};
//!
//! let config = ColorizeConfig::default()
//!     .with_iterations(40)
//!     .with_policy(BlendPolicy::WeightedInverse)
//!     .with_mask(ChannelMask::RGB)
//!     .with_layer("Col");
//!
//! assert!(config.validate().is_ok());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::blend::BlendPolicy;
use crate::color::ChannelMask;
use crate::error::{ColorizeError, ColorizeResult};
use crate::relax::DEFAULT_ITERATIONS;
use crate::resolve::DEFAULT_THRESHOLD;

/// Configuration for [`colorize`](crate::colorize).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorizeConfig {
    /// Iteration count `K`; `K - 1` relaxation sweeps are run per group.
    /// Default: 20
    pub iterations: usize,

    /// Interpolation scheme for unassigned vertices.
    /// Default: [`BlendPolicy::Polynomial`]
    pub policy: BlendPolicy,

    /// Channels the write-back may modify.
    /// Default: red and green
    pub mask: ChannelMask,

    /// Membership strength a vertex must exceed to seed a group.
    /// Default: 0.1
    pub threshold: f32,

    /// Name of the color layer to write. `None` uses the active layer, as
    /// does a name that does not exist.
    pub layer: Option<String>,

    /// Whether to solve groups in parallel (via rayon).
    /// Default: true
    pub parallel: bool,
}

impl Default for ColorizeConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            policy: BlendPolicy::Polynomial,
            mask: ChannelMask::default(),
            threshold: DEFAULT_THRESHOLD,
            layer: None,
            parallel: true,
        }
    }
}

impl ColorizeConfig {
    /// Preset that propagates further and blends with normalized weights.
    #[must_use]
    pub fn smooth() -> Self {
        Self {
            iterations: 60,
            policy: BlendPolicy::WeightedInverse,
            ..Default::default()
        }
    }

    /// Preset for quick previews on small meshes.
    #[must_use]
    pub fn fast() -> Self {
        Self {
            iterations: 5,
            parallel: false,
            ..Default::default()
        }
    }

    /// Set the iteration count.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the blend policy.
    #[must_use]
    pub fn with_policy(mut self, policy: BlendPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the channel mask.
    #[must_use]
    pub fn with_mask(mut self, mask: ChannelMask) -> Self {
        self.mask = mask;
        self
    }

    /// Set the membership threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Select a color layer by name.
    #[must_use]
    pub fn with_layer(mut self, name: impl Into<String>) -> Self {
        self.layer = Some(name.into());
        self
    }

    /// Enable or disable parallel group solving.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ColorizeError::InvalidParameter`] if `iterations` is 0 or
    /// `threshold` is not finite.
    pub fn validate(&self) -> ColorizeResult<()> {
        if self.iterations == 0 {
            return Err(ColorizeError::invalid_param(
                "iterations",
                self.iterations,
                "must be at least 1",
            ));
        }
        if !self.threshold.is_finite() {
            return Err(ColorizeError::invalid_param(
                "threshold",
                self.threshold,
                "must be finite",
            ));
        }
        Ok(())
    }
}
