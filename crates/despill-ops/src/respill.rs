//! Luma weighting, luma-range remap and respill compositing.
//!
//! After despill the removed spill is measured as a luma, remapped between
//! a black and a white point, and used to add a replacement color back:
//!
//! ```text
//! range = clamp((luma - black) / (white - black), 0, 1)
//! out   = despilled + respill * range
//! ```

use despill_math::{linearstep, Vec3};

use crate::normalize::NormalizedSpill;

/// Rec. 709 luma weights.
pub const REC709_LUMA: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// CCIR 601 luma weights.
pub const CCIR601_LUMA: [f32; 3] = [0.299, 0.587, 0.114];

/// Rec. 2020 luma weights.
pub const REC2020_LUMA: [f32; 3] = [0.2627, 0.6780, 0.0593];

/// How a spill vector is reduced to one strength value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum LumaMode {
    /// Rec. 709 weights.
    #[default]
    Rec709,
    /// CCIR 601 weights.
    Ccir601,
    /// Rec. 2020 weights.
    Rec2020,
    /// Plain mean of R, G and B.
    Average,
    /// Largest component.
    Maximum,
}

impl LumaMode {
    /// All variants, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Rec709,
        Self::Ccir601,
        Self::Rec2020,
        Self::Average,
        Self::Maximum,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Rec709 => "Rec 709",
            Self::Ccir601 => "Ccir 601",
            Self::Rec2020 => "Rec 2020",
            Self::Average => "Average",
            Self::Maximum => "Max",
        }
    }

    /// Luma of `rgb`.
    ///
    /// ```rust
    /// use despill_math::Vec3;
    /// use despill_ops::respill::LumaMode;
    ///
    /// assert_eq!(LumaMode::Maximum.luma(Vec3::new(0.1, 0.6, 0.3)), 0.6);
    /// assert!((LumaMode::Rec709.luma(Vec3::ONE) - 1.0).abs() < 1e-6);
    /// ```
    #[inline]
    pub fn luma(self, rgb: Vec3) -> f32 {
        match self {
            Self::Rec709 => rgb.dot(Vec3::from(REC709_LUMA)),
            Self::Ccir601 => rgb.dot(Vec3::from(CCIR601_LUMA)),
            Self::Rec2020 => rgb.dot(Vec3::from(REC2020_LUMA)),
            Self::Average => rgb.mean(),
            Self::Maximum => rgb.max_element(),
        }
    }
}

/// Black/white point remap of a luma.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LumaRange {
    /// Values at or below map to 0.
    pub black: f32,
    /// Values at or above map to 1.
    pub white: f32,
}

impl Default for LumaRange {
    fn default() -> Self {
        Self { black: 0.0, white: 1.0 }
    }
}

impl LumaRange {
    /// Creates a range.
    pub fn new(black: f32, white: f32) -> Self {
        Self { black, white }
    }

    /// Remaps `luma` into [0, 1].
    ///
    /// A white point at or below the black point turns the ramp into a
    /// step at the black point.
    ///
    /// ```rust
    /// use despill_ops::respill::LumaRange;
    ///
    /// let range = LumaRange::new(0.1, 0.9);
    /// assert_eq!(range.remap(0.05), 0.0);
    /// assert!((range.remap(0.5) - 0.5).abs() < 1e-6);
    /// assert_eq!(range.remap(0.95), 1.0);
    /// ```
    #[inline]
    pub fn remap(&self, luma: f32) -> f32 {
        linearstep(self.black, self.white, luma)
    }
}

/// What the RGB output carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum OutputMode {
    /// Despilled image with respill added.
    #[default]
    Despill,
    /// The removed spill itself.
    SpillMatte,
}

impl OutputMode {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Despill => "Despill",
            Self::SpillMatte => "Spill",
        }
    }
}

/// Respill stage settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Respill {
    /// Output mode.
    pub output: OutputMode,
    /// Constant respill color, used when no respill input is connected.
    pub color: Vec3,
    /// Luma remap.
    pub range: LumaRange,
}

impl Respill {
    /// Final RGB and the spill strength handed to the alpha stage.
    ///
    /// `live` is the respill input sample when that input is connected.
    /// In despill output the strength is the remapped luma; in matte
    /// output it is the normalized luma, unremapped.
    pub fn composite(&self, spill: &NormalizedSpill, live: Option<Vec3>) -> (Vec3, f32) {
        match self.output {
            OutputMode::Despill => {
                let range = self.range.remap(spill.luma);
                let color = live.unwrap_or(self.color);
                (spill.rgb + color * range, range)
            }
            OutputMode::SpillMatte => (spill.spill, spill.luma),
        }
    }
}
