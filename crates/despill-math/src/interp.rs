//! Interpolation utilities.
//!
//! ```rust
//! use despill_math::{lerp, linearstep, smoothstep};
//!
//! assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
//! assert_eq!(linearstep(0.0, 1.0, 0.25), 0.25);
//! assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
//! ```

/// Linear interpolation between two values.
///
/// `t` outside [0, 1] extrapolates.
///
/// ```rust
/// use despill_math::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
/// assert_eq!(lerp(0.0, 10.0, -1.0), -10.0);
/// ```
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamps a value to the range [min, max].
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Clamps a value to [0, 1].
#[inline]
pub fn saturate(value: f32) -> f32 {
    clamp(value, 0.0, 1.0)
}

/// Clamped linear ramp from `edge0` (0) to `edge1` (1).
///
/// When `edge1 <= edge0` there is no ramp to speak of and the function
/// becomes a step at `edge0`: values strictly above it give 1, the rest 0.
///
/// ```rust
/// use despill_math::linearstep;
///
/// assert_eq!(linearstep(0.1, 0.9, 0.05), 0.0);
/// assert_eq!(linearstep(0.1, 0.9, 0.95), 1.0);
/// assert_eq!(linearstep(0.5, 0.5, 0.6), 1.0);
/// assert_eq!(linearstep(0.5, 0.5, 0.5), 0.0);
/// ```
#[inline]
pub fn linearstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x > edge0 { 1.0 } else { 0.0 };
    }
    saturate((x - edge0) / (edge1 - edge0))
}

/// Hermite smoothstep interpolation.
///
/// Returns 0 for `x <= edge0`, 1 for `x >= edge1`, and a cubic
/// `t * t * (3 - 2 * t)` ramp in between. Degenerate edges behave like
/// [`linearstep`].
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = linearstep(edge0, edge1, x);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linearstep_is_linear_inside() {
        let v = linearstep(0.1, 0.9, 0.5);
        assert!((v - 0.5).abs() < 1e-6);
    }

    #[test]
    fn linearstep_degenerate_is_step() {
        assert_eq!(linearstep(0.6, 0.2, 0.3), 0.0);
        assert_eq!(linearstep(0.6, 0.2, 0.7), 1.0);
    }

    #[test]
    fn smoothstep_edges() {
        assert_eq!(smoothstep(-1.0, 0.0, -2.0), 0.0);
        assert_eq!(smoothstep(-1.0, 0.0, 0.5), 1.0);
        assert_eq!(smoothstep(-1.0, 0.0, -0.5), 0.5);
    }

    #[test]
    fn smoothstep_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let v = smoothstep(0.0, 1.0, i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }
}
