//! RGBA colors and per-channel write masks.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of channels in an [`Rgba`] color.
pub const CHANNELS: usize = 4;

/// Floating point RGBA color.
///
/// Channels are nominally in `[0, 1]`, but blended colors are not clamped:
/// the polynomial blend is unnormalized and may leave the unit range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgba {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Rgba {
    /// Create a color from its four channels.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_colorize::Rgba;
    ///
    /// let orange = Rgba::new(1.0, 0.5, 0.0, 1.0);
    /// assert_eq!(orange.channel(1), 0.5);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from a channel array in RGBA order.
    #[inline]
    #[must_use]
    pub const fn from_array([r, g, b, a]: [f32; CHANNELS]) -> Self {
        Self { r, g, b, a }
    }

    /// Channels in RGBA order.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [f32; CHANNELS] {
        [self.r, self.g, self.b, self.a]
    }

    /// Read a channel by index (0 = R, 1 = G, 2 = B, 3 = A).
    ///
    /// # Panics
    ///
    /// Panics if `index >= 4`.
    #[inline]
    #[must_use]
    pub fn channel(&self, index: usize) -> f32 {
        self.to_array()[index]
    }

    /// Overwrite a channel by index (0 = R, 1 = G, 2 = B, 3 = A).
    ///
    /// # Panics
    ///
    /// Panics if `index >= 4`.
    #[inline]
    pub fn set_channel(&mut self, index: usize, value: f32) {
        match index {
            0 => self.r = value,
            1 => self.g = value,
            2 => self.b = value,
            3 => self.a = value,
            _ => panic!("channel index {index} out of range"),
        }
    }

    /// Clamp every channel into `[0, 1]`.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self::from_array(self.to_array().map(|c| c.clamp(0.0, 1.0)))
    }

    /// Transparent black (0, 0, 0, 0).
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Opaque black (0, 0, 0, 1).
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Opaque white (1, 1, 1, 1).
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[f32; CHANNELS]> for Rgba {
    fn from(channels: [f32; CHANNELS]) -> Self {
        Self::from_array(channels)
    }
}

/// Accumulator for weighted color sums.
///
/// Blending is done in `f64` so that many small contributions do not lose
/// precision before the final conversion back to [`Rgba`].
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ColorSum([f64; CHANNELS]);

impl ColorSum {
    /// Add `color * factor` to the sum.
    #[inline]
    pub(crate) fn add_scaled(&mut self, color: Rgba, factor: f64) {
        for (acc, c) in self.0.iter_mut().zip(color.to_array()) {
            *acc += f64::from(c) * factor;
        }
    }

    /// Convert the sum into a color, dividing every channel by `divisor`.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: colors are stored as f32, the f64 sum only carries precision
    pub(crate) fn divided(self, divisor: f64) -> Rgba {
        Rgba::from_array(self.0.map(|c| (c / divisor) as f32))
    }

    /// Convert the sum into a color as is.
    #[inline]
    pub(crate) fn into_rgba(self) -> Rgba {
        self.divided(1.0)
    }
}

/// Selects which channels a write may modify.
///
/// Channels whose flag is `false` are left at their previous value.
///
/// # Example
///
/// ```
/// use mesh_colorize::ChannelMask;
///
/// let mask = ChannelMask::default();
/// assert!(mask.red && mask.green);
/// assert!(!mask.blue && !mask.alpha);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct ChannelMask {
    /// Allow writes to the red channel.
    pub red: bool,
    /// Allow writes to the green channel.
    pub green: bool,
    /// Allow writes to the blue channel.
    pub blue: bool,
    /// Allow writes to the alpha channel.
    pub alpha: bool,
}

impl ChannelMask {
    /// Create a mask from four channel flags.
    #[inline]
    #[must_use]
    pub const fn new(red: bool, green: bool, blue: bool, alpha: bool) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Mask allowing writes to every channel.
    pub const ALL: Self = Self::new(true, true, true, true);

    /// Mask allowing writes to the color channels only.
    pub const RGB: Self = Self::new(true, true, true, false);

    /// Mask blocking every write.
    pub const NONE: Self = Self::new(false, false, false, false);

    /// Flags in RGBA order.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [bool; CHANNELS] {
        [self.red, self.green, self.blue, self.alpha]
    }

    /// Check whether no channel may be written.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.red || self.green || self.blue || self.alpha)
    }

    /// Copy the allowed channels of `src` into `dst`.
    #[inline]
    pub fn apply(&self, dst: &mut Rgba, src: Rgba) {
        for (index, allowed) in self.to_array().into_iter().enumerate() {
            if allowed {
                dst.set_channel(index, src.channel(index));
            }
        }
    }
}

impl Default for ChannelMask {
    fn default() -> Self {
        Self::new(true, true, false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_access() {
        let mut c = Rgba::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(c.channel(2), 0.3);
        c.set_channel(3, 0.9);
        assert_eq!(c.a, 0.9);
        assert_eq!(c.to_array(), [0.1, 0.2, 0.3, 0.9]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn channel_out_of_range() {
        let mut c = Rgba::BLACK;
        c.set_channel(4, 1.0);
    }

    #[test]
    fn clamped() {
        let c = Rgba::new(-0.5, 1.5, 0.5, 1.0).clamped();
        assert_eq!(c, Rgba::new(0.0, 1.0, 0.5, 1.0));
    }

    #[test]
    fn mask_apply_preserves_unmasked() {
        let mut dst = Rgba::new(0.1, 0.2, 0.3, 0.4);
        ChannelMask::new(true, false, false, true).apply(&mut dst, Rgba::WHITE);
        assert_eq!(dst, Rgba::new(1.0, 0.2, 0.3, 1.0));
    }

    #[test]
    fn empty_mask_writes_nothing() {
        let mut dst = Rgba::TRANSPARENT;
        assert!(ChannelMask::NONE.is_empty());
        ChannelMask::NONE.apply(&mut dst, Rgba::WHITE);
        assert_eq!(dst, Rgba::TRANSPARENT);
    }

    #[test]
    fn color_sum_weighted_average() {
        let mut sum = ColorSum::default();
        sum.add_scaled(Rgba::WHITE, 1.0);
        sum.add_scaled(Rgba::TRANSPARENT, 1.0);
        let avg = sum.divided(2.0);
        assert_eq!(avg, Rgba::new(0.5, 0.5, 0.5, 0.5));
    }
}
