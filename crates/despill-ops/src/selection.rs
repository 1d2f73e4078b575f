//! Spill color selection and hue shift resolution.
//!
//! Decides, once per pass, which color counts as spill and how far pixels
//! must be rotated around the gray axis so that color lands on the red
//! axis. Every resolved selection therefore suppresses channel 0 in the
//! rotated frame.
//!
//! | Condition              | Selection                   | Hue shift                  |
//! |------------------------|-----------------------------|----------------------------|
//! | color input connected  | [`ColorSelection::Live`]    | offset - angle(sample)     |
//! | channel button (R/G/B) | [`ColorSelection::Channel`] | offset - angle(axis)       |
//! | picker with R = G = B  | [`ColorSelection::Bypass`]  | none                       |
//! | picker                 | [`ColorSelection::Picked`]  | offset - angle(pick)       |

use despill_math::{hue_angle, HueRotation, Vec3};

/// Channel index suppressed after hue rotation.
pub const SUPPRESSED_CHANNEL: usize = 0;

/// The spill color control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SpillColor {
    /// Red screen.
    Red,
    /// Green screen.
    Green,
    /// Blue screen.
    Blue,
    /// Use the picked color.
    #[default]
    Picker,
}

impl SpillColor {
    /// All variants, in menu order.
    pub const ALL: [Self; 4] = [Self::Red, Self::Green, Self::Blue, Self::Picker];

    /// Channel index for the channel buttons, `None` for the picker.
    pub fn channel(self) -> Option<usize> {
        match self {
            Self::Red => Some(0),
            Self::Green => Some(1),
            Self::Blue => Some(2),
            Self::Picker => None,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Picker => "Pick",
        }
    }
}

/// Reference color and the rotation that aligns it with the red axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reference {
    /// Spill reference color, used by absolute mode.
    pub color: Vec3,
    /// Rotation by the hue shift.
    pub rotation: HueRotation,
}

impl Reference {
    /// Reference for `color` with a user hue offset in degrees.
    pub fn new(color: Vec3, hue_offset: f32) -> Self {
        Self {
            color,
            rotation: HueRotation::new(hue_shift(color, hue_offset)),
        }
    }

    /// Hue shift in degrees.
    #[inline]
    pub fn hue_shift(&self) -> f32 {
        self.rotation.degrees()
    }
}

/// `hue_offset - angle(color, red)` in degrees.
#[inline]
pub fn hue_shift(color: Vec3, hue_offset: f32) -> f32 {
    hue_offset - hue_angle(color)
}

/// Resolved spill color source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSelection {
    /// Achromatic pick: pixels pass through unchanged.
    Bypass,
    /// Picked color with a fixed hue shift.
    Picked(Reference),
    /// Channel button; the reference is the unit vector on that axis.
    Channel {
        /// Selected channel (0 = R, 1 = G, 2 = B).
        channel: usize,
        /// Axis reference.
        reference: Reference,
    },
    /// Color input connected: reference and hue shift come from each
    /// pixel of the color strip.
    Live {
        /// User hue offset applied on top of each sample's angle.
        hue_offset: f32,
    },
}

impl ColorSelection {
    /// Resolves the selection for one pass.
    ///
    /// `color` is the spill color control, `pick` the picker value and
    /// `live_connected` whether the color reference input is connected.
    pub fn resolve(color: SpillColor, pick: Vec3, hue_offset: f32, live_connected: bool) -> Self {
        if live_connected {
            return Self::Live { hue_offset };
        }
        match color.channel() {
            Some(channel) => Self::Channel {
                channel,
                reference: Reference::new(Vec3::axis(channel), hue_offset),
            },
            None if pick.is_achromatic() => Self::Bypass,
            None => Self::Picked(Reference::new(pick, hue_offset)),
        }
    }

    /// True for [`ColorSelection::Bypass`].
    #[inline]
    pub fn is_bypass(&self) -> bool {
        matches!(self, Self::Bypass)
    }

    /// True for [`ColorSelection::Live`].
    #[inline]
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live { .. })
    }

    /// The pass-wide reference, if the selection has one.
    pub fn fixed_reference(&self) -> Option<Reference> {
        match self {
            Self::Picked(reference) | Self::Channel { reference, .. } => Some(*reference),
            Self::Bypass | Self::Live { .. } => None,
        }
    }

    /// Reference for one pixel.
    ///
    /// Live selections derive it from `sample`; fixed selections ignore
    /// the sample. `None` for bypass, or for a live selection without a
    /// sample.
    pub fn reference_for(&self, sample: Option<Vec3>) -> Option<Reference> {
        match self {
            Self::Live { hue_offset } => sample.map(|s| Reference::new(s, *hue_offset)),
            _ => self.fixed_reference(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const PICK_GREEN: Vec3 = Vec3::new(0.0, 1.0, 0.0);

    #[test]
    fn live_wins_over_everything() {
        let sel = ColorSelection::resolve(SpillColor::Red, PICK_GREEN, 5.0, true);
        assert_eq!(sel, ColorSelection::Live { hue_offset: 5.0 });
        assert!(sel.fixed_reference().is_none());
    }

    #[test]
    fn channel_buttons_carry_axis_rotation() {
        let red = ColorSelection::resolve(SpillColor::Red, PICK_GREEN, 0.0, false);
        let green = ColorSelection::resolve(SpillColor::Green, PICK_GREEN, 0.0, false);
        let blue = ColorSelection::resolve(SpillColor::Blue, PICK_GREEN, 0.0, false);

        assert_abs_diff_eq!(red.fixed_reference().unwrap().hue_shift(), 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(green.fixed_reference().unwrap().hue_shift(), -120.0, epsilon = 1e-3);
        assert_abs_diff_eq!(blue.fixed_reference().unwrap().hue_shift(), 120.0, epsilon = 1e-3);
        assert_eq!(green.fixed_reference().unwrap().color, Vec3::Y);
    }

    #[test]
    fn offset_is_added() {
        let sel = ColorSelection::resolve(SpillColor::Green, Vec3::ZERO, 10.0, false);
        assert_abs_diff_eq!(sel.fixed_reference().unwrap().hue_shift(), -110.0, epsilon = 1e-3);
    }

    #[test]
    fn gray_pick_bypasses() {
        let sel = ColorSelection::resolve(SpillColor::Picker, Vec3::splat(0.5), 0.0, false);
        assert!(sel.is_bypass());
        assert_eq!(sel.reference_for(Some(PICK_GREEN)), None);
    }

    #[test]
    fn gray_pick_with_channel_button_does_not_bypass() {
        let sel = ColorSelection::resolve(SpillColor::Blue, Vec3::splat(0.5), 0.0, false);
        assert!(!sel.is_bypass());
    }

    #[test]
    fn picked_color_rotates_onto_red() {
        let pick = Vec3::new(0.2, 0.7, 0.4);
        let sel = ColorSelection::resolve(SpillColor::Picker, pick, 0.0, false);
        let reference = sel.fixed_reference().unwrap();
        assert_eq!(reference.color, pick);
        let aligned = reference.rotation.apply(pick);
        assert!(aligned.x > aligned.y && aligned.x > aligned.z);
        assert_abs_diff_eq!(aligned.y, aligned.z, epsilon = 1e-5);
    }

    #[test]
    fn live_reference_follows_sample() {
        let sel = ColorSelection::Live { hue_offset: 0.0 };
        let reference = sel.reference_for(Some(Vec3::new(0.1, 0.1, 0.9))).unwrap();
        assert_abs_diff_eq!(reference.hue_shift(), 120.0, epsilon = 1e-3);
        assert_eq!(sel.reference_for(None), None);
    }
}
