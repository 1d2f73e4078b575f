//! Hue geometry around the gray axis.
//!
//! Hue is treated as an angle in the plane orthogonal to (1, 1, 1). Pure
//! red sits at 0°, angles grow counter-clockwise when looking down the gray
//! axis toward black (right-hand rule), so green is at +120° and blue at
//! -120°.
//!
//! Rotating a color around the gray axis keeps its mean (and therefore its
//! gray component) and moves only its chroma.

use crate::Vec3;

/// The achromatic axis.
pub const GRAY_AXIS: Vec3 = Vec3::ONE;

/// Projects `v` onto the plane through the origin with normal `normal`.
///
/// ```rust
/// use despill_math::{project_to_plane, Vec3, GRAY_AXIS};
///
/// let p = project_to_plane(Vec3::splat(0.7), GRAY_AXIS);
/// assert!(p.length() < 1e-6);
/// ```
#[inline]
pub fn project_to_plane(v: Vec3, normal: Vec3) -> Vec3 {
    let n = normal.normalize();
    v - n * v.dot(n)
}

/// Signed angle in radians that rotates `from` onto `to` about `axis`.
///
/// Both vectors are expected to lie in the plane normal to `axis`.
/// Returns 0 when either vector is zero.
#[inline]
pub fn signed_angle(from: Vec3, to: Vec3, axis: Vec3) -> f32 {
    let n = axis.normalize();
    from.cross(to).dot(n).atan2(from.dot(to))
}

/// Hue angle of `color` in degrees, measured from the red axis.
///
/// Achromatic colors have no projection and report 0.
///
/// ```rust
/// use despill_math::{hue_angle, Vec3};
///
/// assert!(hue_angle(Vec3::X).abs() < 1e-4);
/// assert!((hue_angle(Vec3::Y) - 120.0).abs() < 1e-3);
/// assert!((hue_angle(Vec3::Z) + 120.0).abs() < 1e-3);
/// ```
pub fn hue_angle(color: Vec3) -> f32 {
    // projection of a gray is rounding noise, its atan2 is meaningless
    if color.is_achromatic() {
        return 0.0;
    }
    let v = project_to_plane(color, GRAY_AXIS);
    let red = project_to_plane(Vec3::X, GRAY_AXIS);
    signed_angle(red, v, GRAY_AXIS).to_degrees()
}

/// A rotation around the gray axis and its inverse.
///
/// Built once per hue shift and applied to many pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueRotation {
    degrees: f32,
    forward: glam::Mat3,
    inverse: glam::Mat3,
}

impl HueRotation {
    /// Creates a rotation by `degrees` around the gray axis.
    pub fn new(degrees: f32) -> Self {
        let axis = GRAY_AXIS.normalize().to_glam();
        let radians = degrees.to_radians();
        Self {
            degrees,
            forward: glam::Mat3::from_axis_angle(axis, radians),
            inverse: glam::Mat3::from_axis_angle(axis, -radians),
        }
    }

    /// The no-op rotation.
    pub fn identity() -> Self {
        Self::new(0.0)
    }

    /// Rotation angle in degrees.
    #[inline]
    pub fn degrees(&self) -> f32 {
        self.degrees
    }

    /// True for a zero-degree rotation.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.degrees == 0.0
    }

    /// Rotates `v` forward.
    #[inline]
    pub fn apply(&self, v: Vec3) -> Vec3 {
        if self.is_identity() {
            return v;
        }
        Vec3::from_glam(self.forward * v.to_glam())
    }

    /// Undoes [`apply`](Self::apply).
    #[inline]
    pub fn invert(&self, v: Vec3) -> Vec3 {
        if self.is_identity() {
            return v;
        }
        Vec3::from_glam(self.inverse * v.to_glam())
    }
}

impl Default for HueRotation {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPSILON: f32 = 1e-5;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = EPSILON);
        assert_abs_diff_eq!(a.y, b.y, epsilon = EPSILON);
        assert_abs_diff_eq!(a.z, b.z, epsilon = EPSILON);
    }

    #[test]
    fn projection_removes_gray() {
        let v = Vec3::new(0.2, 0.8, 0.2);
        let p = project_to_plane(v, GRAY_AXIS);
        assert_abs_diff_eq!(p.dot(GRAY_AXIS), 0.0, epsilon = EPSILON);
        assert_vec_eq(p, Vec3::new(-0.2, 0.4, -0.2));
    }

    #[test]
    fn hue_angle_ignores_brightness_and_gray() {
        let a = hue_angle(Vec3::new(0.1, 0.6, 0.1));
        let b = hue_angle(Vec3::new(0.5, 1.5, 0.5));
        assert_abs_diff_eq!(a, 120.0, epsilon = 1e-3);
        assert_abs_diff_eq!(a, b, epsilon = 1e-3);
    }

    #[test]
    fn hue_angle_secondaries() {
        assert_abs_diff_eq!(hue_angle(Vec3::new(1.0, 1.0, 0.0)), 60.0, epsilon = 1e-3);
        assert_abs_diff_eq!(hue_angle(Vec3::new(0.0, 1.0, 1.0)).abs(), 180.0, epsilon = 1e-3);
        assert_abs_diff_eq!(hue_angle(Vec3::new(1.0, 0.0, 1.0)), -60.0, epsilon = 1e-3);
    }

    #[test]
    fn achromatic_angle_is_zero() {
        assert_eq!(hue_angle(Vec3::splat(0.4)), 0.0);
    }

    #[test]
    fn rotation_maps_primaries() {
        let rot = HueRotation::new(120.0);
        assert_vec_eq(rot.apply(Vec3::X), Vec3::Y);
        assert_vec_eq(rot.apply(Vec3::Y), Vec3::Z);
        assert_vec_eq(rot.apply(Vec3::Z), Vec3::X);
    }

    #[test]
    fn rotation_preserves_mean() {
        let rot = HueRotation::new(37.0);
        let v = Vec3::new(0.3, 0.9, 0.1);
        assert_abs_diff_eq!(rot.apply(v).mean(), v.mean(), epsilon = EPSILON);
    }

    #[test]
    fn rotation_round_trip() {
        let rot = HueRotation::new(-73.5);
        let v = Vec3::new(0.3, 0.9, 0.1);
        assert_vec_eq(rot.invert(rot.apply(v)), v);
    }

    #[test]
    fn identity_is_exact() {
        let v = Vec3::new(0.123, 4.56, -0.7);
        assert_eq!(HueRotation::identity().apply(v), v);
        assert_eq!(HueRotation::identity().invert(v), v);
    }

    #[test]
    fn negated_hue_angle_aligns_with_red() {
        let pick = Vec3::new(0.15, 0.7, 0.3);
        let rot = HueRotation::new(-hue_angle(pick));
        let aligned = project_to_plane(rot.apply(pick), GRAY_AXIS);
        assert_abs_diff_eq!(hue_angle(aligned), 0.0, epsilon = 1e-3);
        assert!(aligned.x > 0.0);
    }
}
