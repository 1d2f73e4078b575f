//! Despill kernel and tone protection.
//!
//! The kernel works in a hue-rotated frame: the pixel is rotated around
//! the gray axis so the spill hue lands on the suppressed channel, the
//! excess of that channel over the other two is measured, and the excess
//! is removed along the rotated-back axis.
//!
//! ```rust
//! use despill_math::{HueRotation, Vec3};
//! use despill_ops::kernel::{DespillMath, Kernel, ToneProtection};
//!
//! let kernel = Kernel::new(DespillMath::Average, 0.0, 1, ToneProtection::default());
//! let out = kernel.apply(Vec3::new(0.2, 0.8, 0.2), &HueRotation::identity(), 1.0);
//! assert!((out.rgb.y - 0.2).abs() < 1e-6);
//! assert_eq!(out.rgb.x, 0.2);
//! ```

use despill_math::{lerp, saturate, smoothstep, HueRotation, Vec3};

/// How the spill excess is measured against the two other channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum DespillMath {
    /// Excess over the mean of the other two. The classic "average" limit.
    #[default]
    Average,
    /// Excess over the larger of the other two. Gentlest.
    Maximum,
    /// Excess over the smaller of the other two. Strongest.
    Minimum,
    /// Blend between average and maximum by a weight in [-1, 1].
    Custom,
}

impl DespillMath {
    /// All variants, in menu order.
    pub const ALL: [Self; 4] = [Self::Average, Self::Maximum, Self::Minimum, Self::Custom];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Average => "Average",
            Self::Maximum => "Max",
            Self::Minimum => "Min",
            Self::Custom => "Custom",
        }
    }
}

/// Spill excess of `value` over the two other channels `a` and `b`.
///
/// Never negative. `custom_weight` only matters for [`DespillMath::Custom`],
/// where 0 gives the average result, 1 the maximum result, and values
/// outside [0, 1] extrapolate.
///
/// ```rust
/// use despill_ops::kernel::{spill_amount, DespillMath};
///
/// let avg = spill_amount(DespillMath::Average, 0.0, 0.8, 0.1, 0.3);
/// let max = spill_amount(DespillMath::Maximum, 0.0, 0.8, 0.1, 0.3);
/// assert!((avg - 0.6).abs() < 1e-6);
/// assert!((max - 0.5).abs() < 1e-6);
/// ```
#[inline]
pub fn spill_amount(math: DespillMath, custom_weight: f32, value: f32, a: f32, b: f32) -> f32 {
    let average = (value - (a + b) * 0.5).max(0.0);
    let maximum = (value - a.max(b)).max(0.0);
    match math {
        DespillMath::Average => average,
        DespillMath::Maximum => maximum,
        DespillMath::Minimum => (value - a.min(b)).max(0.0),
        DespillMath::Custom => lerp(average, maximum, custom_weight).max(0.0),
    }
}

/// Tone protection parameters.
///
/// Pixels close to `color` get a protection matte near 1 and are despilled
/// less. The matte is 1 within `tolerance` of the color (Euclidean RGB
/// distance) and rolls off smoothly to 0 over a further `falloff`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ToneProtection {
    /// Protection on/off.
    pub enabled: bool,
    /// Show the protection matte instead of the despilled image.
    pub preview: bool,
    /// Color to protect, typically a skin tone.
    pub color: [f32; 3],
    /// Distance treated as fully protected.
    pub tolerance: f32,
    /// Width of the soft edge beyond `tolerance`.
    pub falloff: f32,
    /// Protection strength; the matte is multiplied by it.
    pub effect: f32,
}

impl Default for ToneProtection {
    fn default() -> Self {
        Self {
            enabled: false,
            preview: false,
            color: [0.0, 0.0, 0.0],
            tolerance: 0.2,
            falloff: 2.0,
            effect: 1.0,
        }
    }
}

impl ToneProtection {
    /// Protection matte for `rgb`, in [0, 1]. Zero when disabled.
    ///
    /// With `x = (tolerance - distance) / falloff` the matte is
    /// `smoothstep(-1, 0, x)`. A non-positive falloff gives a hard edge.
    pub fn matte(&self, rgb: Vec3) -> f32 {
        if !self.enabled {
            return 0.0;
        }
        let distance = rgb.distance(Vec3::from(self.color));
        if self.falloff <= 0.0 {
            return if distance <= self.tolerance { 1.0 } else { 0.0 };
        }
        smoothstep(-1.0, 0.0, (self.tolerance - distance) / self.falloff)
    }

    /// Fraction of the despill that survives protection.
    #[inline]
    pub fn damping(&self, matte: f32) -> f32 {
        1.0 - self.strength(matte)
    }

    /// `matte * effect`, clamped to [0, 1].
    #[inline]
    pub fn strength(&self, matte: f32) -> f32 {
        saturate(matte * self.effect)
    }

    /// True when the preview matte replaces the image.
    #[inline]
    pub fn previewing(&self) -> bool {
        self.enabled && self.preview
    }
}

/// Kernel output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DespillResult {
    /// Despilled color.
    pub rgb: Vec3,
    /// Protection matte of the input pixel.
    pub matte: f32,
}

/// Per-pass despill kernel settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel {
    math: DespillMath,
    custom_weight: f32,
    channel: usize,
    protection: ToneProtection,
}

impl Kernel {
    /// Creates a kernel suppressing `channel` (0 = R, 1 = G, 2 = B).
    ///
    /// # Panics
    ///
    /// Panics if `channel > 2`.
    pub fn new(
        math: DespillMath,
        custom_weight: f32,
        channel: usize,
        protection: ToneProtection,
    ) -> Self {
        assert!(channel < 3, "despill channel must be 0, 1 or 2, got {channel}");
        Self {
            math,
            custom_weight,
            channel,
            protection,
        }
    }

    /// Suppressed channel in the rotated frame.
    #[inline]
    pub fn channel(&self) -> usize {
        self.channel
    }

    /// Tone protection settings.
    #[inline]
    pub fn protection(&self) -> &ToneProtection {
        &self.protection
    }

    /// Despills `rgb`.
    ///
    /// `rotation` turns the spill hue onto the suppressed channel and
    /// `limit` scales the removed amount. A zero limit returns the input
    /// untouched; the protection matte is reported either way.
    pub fn apply(&self, rgb: Vec3, rotation: &HueRotation, limit: f32) -> DespillResult {
        let matte = self.protection.matte(rgb);
        if limit == 0.0 {
            return DespillResult { rgb, matte };
        }

        let rotated = rotation.apply(rgb);
        let c = self.channel;
        let (a, b) = (rotated[(c + 1) % 3], rotated[(c + 2) % 3]);
        let spill = spill_amount(self.math, self.custom_weight, rotated[c], a, b)
            * limit
            * self.protection.damping(matte);
        if spill == 0.0 {
            return DespillResult { rgb, matte };
        }

        // remove along the spill axis expressed in the unrotated frame
        let removed = rotation.invert(Vec3::axis(c) * spill);
        DespillResult {
            rgb: rgb - removed,
            matte,
        }
    }
}
