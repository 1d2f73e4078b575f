//! Despill configuration.
//!
//! [`DespillConfig`] holds every user parameter of the operator. It is
//! built once per evaluation and never changes during a pass. With the
//! `serde` feature it loads from YAML or JSON; missing fields take their
//! defaults:
//!
//! ```yaml
//! color: green
//! despill_math: maximum
//! hue_limit: 0.8
//! protect:
//!   enabled: true
//!   color: [0.8, 0.55, 0.45]
//! respill_color: [0.18, 0.18, 0.18]
//! ```

use despill_core::Channel;
use despill_math::{clamp, Vec3};
use tracing::warn;

use crate::alpha::AlphaMode;
use crate::kernel::{DespillMath, ToneProtection};
use crate::respill::{LumaMode, LumaRange, OutputMode};
use crate::selection::SpillColor;
use crate::{OpsError, OpsResult};

/// User parameters for one despill pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DespillConfig {
    /// Spill color source.
    pub color: SpillColor,
    /// Picked spill color, used with [`SpillColor::Picker`].
    pub pick: [f32; 3],
    /// Normalize spill against the reference color.
    pub absolute: bool,
    /// Despill math.
    pub despill_math: DespillMath,
    /// Weight for [`DespillMath::Custom`], in [-1, 1].
    pub custom_weight: f32,
    /// Hue fine-tune in degrees, added to the automatic shift.
    pub hue_offset: f32,
    /// Maximum despill strength.
    pub hue_limit: f32,
    /// Channel read from the limit input.
    pub limit_channel: Channel,
    /// Invert the limit mask.
    pub invert_limit_mask: bool,
    /// Tone protection.
    pub protect: ToneProtection,
    /// Luma weighting for spill strength.
    pub respill_math: LumaMode,
    /// Constant respill color.
    pub respill_color: [f32; 3],
    /// Luma black point.
    pub black_point: f32,
    /// Luma white point.
    pub white_point: f32,
    /// Despilled image or spill matte.
    pub output: OutputMode,
    /// Scalar output policy.
    pub alpha: AlphaMode,
    /// Channel receiving the scalar output.
    pub output_channel: Channel,
}

impl Default for DespillConfig {
    fn default() -> Self {
        Self {
            color: SpillColor::Picker,
            pick: [0.0, 1.0, 0.0],
            absolute: false,
            despill_math: DespillMath::Average,
            custom_weight: 0.0,
            hue_offset: 0.0,
            hue_limit: 1.0,
            limit_channel: Channel::ALPHA,
            invert_limit_mask: true,
            protect: ToneProtection::default(),
            respill_math: LumaMode::Rec709,
            respill_color: [1.0, 1.0, 1.0],
            black_point: 0.0,
            white_point: 1.0,
            output: OutputMode::Despill,
            alpha: AlphaMode::InvertedSpill,
            output_channel: Channel::ALPHA,
        }
    }
}

/// Replaces a non-finite or out-of-range value, logging the correction.
fn fix(name: &str, value: f32, default: f32, min: f32, max: f32) -> f32 {
    if !value.is_finite() {
        warn!(param = name, value, default, "non-finite parameter replaced by default");
        return default;
    }
    let clamped = clamp(value, min, max);
    if clamped != value {
        warn!(param = name, value, clamped, "parameter clamped to valid range");
    }
    clamped
}

/// Replaces a color with any non-finite component, logging the correction.
fn fix_color(name: &str, color: [f32; 3], default: [f32; 3]) -> [f32; 3] {
    if Vec3::from(color).is_finite() {
        return color;
    }
    warn!(param = name, ?color, ?default, "non-finite color replaced by default");
    default
}

fn check_color(name: &str, color: [f32; 3]) -> OpsResult<()> {
    if Vec3::from(color).is_finite() {
        Ok(())
    } else {
        Err(OpsError::InvalidParameter(format!("{name} has non-finite components: {color:?}")))
    }
}

impl DespillConfig {
    /// Rejects colors with NaN or infinite components.
    ///
    /// [`normalized`](Self::normalized) repairs them silently for the
    /// pipeline; loaders call this to refuse a bad file instead.
    pub fn validate(&self) -> OpsResult<()> {
        check_color("pick", self.pick)?;
        check_color("respill_color", self.respill_color)?;
        check_color("protect.color", self.protect.color)?;
        Ok(())
    }

    /// Copy with parameters forced into their valid ranges.
    ///
    /// Custom weight is clamped to [-1, 1]; hue limit and the protection
    /// tolerance, falloff and effect are floored at 0. Non-finite scalars
    /// and colors with a non-finite component fall back to their defaults.
    pub fn normalized(&self) -> Self {
        let d = Self::default();
        let mut c = self.clone();
        c.custom_weight = fix("custom_weight", c.custom_weight, d.custom_weight, -1.0, 1.0);
        c.hue_offset = fix("hue_offset", c.hue_offset, d.hue_offset, f32::MIN, f32::MAX);
        c.hue_limit = fix("hue_limit", c.hue_limit, d.hue_limit, 0.0, f32::MAX);
        c.black_point = fix("black_point", c.black_point, d.black_point, f32::MIN, f32::MAX);
        c.white_point = fix("white_point", c.white_point, d.white_point, f32::MIN, f32::MAX);
        c.pick = fix_color("pick", c.pick, d.pick);
        c.respill_color = fix_color("respill_color", c.respill_color, d.respill_color);

        let dp = &d.protect;
        let p = &mut c.protect;
        p.tolerance = fix("protect.tolerance", p.tolerance, dp.tolerance, 0.0, f32::MAX);
        p.falloff = fix("protect.falloff", p.falloff, dp.falloff, 0.0, f32::MAX);
        p.effect = fix("protect.effect", p.effect, dp.effect, 0.0, f32::MAX);
        p.color = fix_color("protect.color", p.color, dp.color);
        c
    }

    /// Picked color as a vector.
    pub fn pick_color(&self) -> Vec3 {
        Vec3::from(self.pick)
    }

    /// Respill color as a vector.
    pub fn respill_rgb(&self) -> Vec3 {
        Vec3::from(self.respill_color)
    }

    /// Black/white luma points.
    pub fn luma_range(&self) -> LumaRange {
        LumaRange::new(self.black_point, self.white_point)
    }

    /// Limit strength for one pixel.
    ///
    /// `mask` is the limit input sample, `None` when that input is not
    /// connected. The sample is clamped to [0, 1] and optionally inverted
    /// before scaling the hue limit.
    #[inline]
    pub fn limit_strength(&self, mask: Option<f32>) -> f32 {
        match mask {
            None => self.hue_limit,
            Some(m) => {
                let m = clamp(m, 0.0, 1.0);
                let m = if self.invert_limit_mask { 1.0 - m } else { m };
                self.hue_limit * m
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_node_defaults() {
        let c = DespillConfig::default();
        assert_eq!(c.color, SpillColor::Picker);
        assert_eq!(c.pick, [0.0, 1.0, 0.0]);
        assert_eq!(c.alpha, AlphaMode::InvertedSpill);
        assert!(c.invert_limit_mask);
        assert_eq!(c.protect.tolerance, 0.2);
        assert_eq!(c.protect.falloff, 2.0);
        assert_eq!(c.output_channel, Channel::ALPHA);
    }

    #[test]
    fn normalized_clamps_ranges() {
        let mut c = DespillConfig {
            custom_weight: 3.0,
            hue_limit: -1.0,
            ..Default::default()
        };
        c.protect.effect = -2.0;
        c.protect.falloff = f32::NAN;
        let n = c.normalized();
        assert_eq!(n.custom_weight, 1.0);
        assert_eq!(n.hue_limit, 0.0);
        assert_eq!(n.protect.effect, 0.0);
        assert_eq!(n.protect.falloff, 2.0);
    }

    #[test]
    fn normalized_is_idempotent() {
        let c = DespillConfig {
            custom_weight: -0.4,
            hue_offset: 12.0,
            ..Default::default()
        };
        assert_eq!(c.normalized(), c);
    }

    #[test]
    fn normalized_repairs_colors() {
        let mut c = DespillConfig {
            pick: [f32::NAN, 1.0, 0.0],
            respill_color: [0.5, f32::INFINITY, 0.5],
            ..Default::default()
        };
        c.protect.color = [0.8, 0.6, f32::NEG_INFINITY];
        let n = c.normalized();
        assert_eq!(n.pick, [0.0, 1.0, 0.0]);
        assert_eq!(n.respill_color, [1.0, 1.0, 1.0]);
        assert_eq!(n.protect.color, [0.0, 0.0, 0.0]);
        assert!(n.validate().is_ok());
    }

    #[test]
    fn validate_rejects_nan_colors() {
        let c = DespillConfig {
            pick: [0.0, f32::NAN, 0.0],
            ..Default::default()
        };
        assert!(matches!(c.validate(), Err(OpsError::InvalidParameter(_))));
        assert!(DespillConfig::default().validate().is_ok());
    }

    #[test]
    fn limit_strength_policy() {
        let mut c = DespillConfig {
            hue_limit: 2.0,
            invert_limit_mask: false,
            ..Default::default()
        };
        assert_eq!(c.limit_strength(None), 2.0);
        assert_eq!(c.limit_strength(Some(0.25)), 0.5);
        assert_eq!(c.limit_strength(Some(4.0)), 2.0);
        c.invert_limit_mask = true;
        assert_eq!(c.limit_strength(Some(1.0)), 0.0);
        assert_eq!(c.limit_strength(Some(0.25)), 1.5);
    }
}
