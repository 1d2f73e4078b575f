//! Spill alpha policy.

use despill_math::saturate;

/// What the scalar output channel receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum AlphaMode {
    /// The source alpha, unchanged.
    Passthrough,
    /// Spill strength: 1 where spill was removed.
    Spill,
    /// Inverted spill strength: 0 where spill was removed.
    #[default]
    InvertedSpill,
}

impl AlphaMode {
    /// Maps the "output spill alpha" and "invert" toggles to a mode.
    pub fn from_flags(output_alpha: bool, invert: bool) -> Self {
        match (output_alpha, invert) {
            (false, _) => Self::Passthrough,
            (true, false) => Self::Spill,
            (true, true) => Self::InvertedSpill,
        }
    }

    /// True unless the mode passes source alpha through.
    pub fn outputs_spill(self) -> bool {
        !matches!(self, Self::Passthrough)
    }

    /// Output value for one pixel, clamped to [0, 1].
    ///
    /// ```rust
    /// use despill_ops::alpha::AlphaMode;
    ///
    /// assert!((AlphaMode::InvertedSpill.resolve(0.3, 1.0) - 0.7).abs() < 1e-6);
    /// assert_eq!(AlphaMode::Passthrough.resolve(0.3, 0.25), 0.25);
    /// assert_eq!(AlphaMode::Spill.resolve(1.7, 0.0), 1.0);
    /// ```
    #[inline]
    pub fn resolve(self, spill_luma: f32, input_alpha: f32) -> f32 {
        let value = match self {
            Self::Passthrough => input_alpha,
            Self::Spill => spill_luma,
            Self::InvertedSpill => 1.0 - spill_luma,
        };
        saturate(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_to_modes() {
        assert_eq!(AlphaMode::from_flags(false, true), AlphaMode::Passthrough);
        assert_eq!(AlphaMode::from_flags(false, false), AlphaMode::Passthrough);
        assert_eq!(AlphaMode::from_flags(true, false), AlphaMode::Spill);
        assert_eq!(AlphaMode::from_flags(true, true), AlphaMode::InvertedSpill);
    }

    #[test]
    fn output_is_clamped() {
        assert_eq!(AlphaMode::InvertedSpill.resolve(1.5, 0.0), 0.0);
        assert_eq!(AlphaMode::Spill.resolve(-0.2, 0.0), 0.0);
        assert_eq!(AlphaMode::Passthrough.resolve(0.0, 3.0), 1.0);
    }
}
