//! Relative and absolute spill normalization.
//!
//! Relative mode reports the raw removed spill. Absolute mode expresses the
//! pixel's spill as a fraction of the spill the reference color itself
//! would lose, and removes that fraction of the reference color. A pixel
//! equal to the reference therefore has a normalized spill of exactly 1.

use despill_math::Vec3;

use crate::kernel::{DespillResult, Kernel};
use crate::respill::LumaMode;
use crate::selection::Reference;

/// Normalizer output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedSpill {
    /// Despilled color.
    pub rgb: Vec3,
    /// Spill strength: raw luma (relative) or ratio to the reference (absolute).
    pub luma: f32,
    /// Removed spill, written as RGB in spill-matte output.
    pub spill: Vec3,
}

/// Spill normalization settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpillNormalizer {
    /// Normalize against the reference color.
    pub absolute: bool,
    /// Luma weighting shared by pixel and reference spill.
    pub luma: LumaMode,
}

impl SpillNormalizer {
    /// Creates a normalizer.
    pub fn new(absolute: bool, luma: LumaMode) -> Self {
        Self { absolute, luma }
    }

    /// Normalizes the kernel output for `rgb`.
    ///
    /// In absolute mode the kernel is re-run on `reference.color` with the
    /// same rotation and `limit`. A reference that loses no spill yields a
    /// normalized luma of 0.
    pub fn normalize(
        &self,
        rgb: Vec3,
        despilled: &DespillResult,
        reference: &Reference,
        kernel: &Kernel,
        limit: f32,
    ) -> NormalizedSpill {
        let spill = rgb - despilled.rgb;
        let luma = self.luma.luma(spill);

        if !self.absolute {
            return NormalizedSpill {
                rgb: despilled.rgb,
                luma,
                spill,
            };
        }

        let pick = kernel.apply(reference.color, &reference.rotation, limit);
        let pick_luma = self.luma.luma(reference.color - pick.rgb);
        let ratio = if pick_luma == 0.0 { 0.0 } else { luma / pick_luma };
        let scaled = reference.color * ratio;

        NormalizedSpill {
            rgb: rgb - scaled,
            luma: ratio,
            spill: scaled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{DespillMath, ToneProtection};
    use approx::assert_abs_diff_eq;

    const EPSILON: f32 = 1e-5;

    fn setup(pick: Vec3) -> (Kernel, Reference) {
        let kernel = Kernel::new(DespillMath::Average, 0.0, 0, ToneProtection::default());
        (kernel, Reference::new(pick, 0.0))
    }

    #[test]
    fn relative_passes_kernel_output() {
        let (kernel, reference) = setup(Vec3::new(0.1, 0.9, 0.2));
        let rgb = Vec3::new(0.3, 0.8, 0.3);
        let d = kernel.apply(rgb, &reference.rotation, 1.0);
        let n = SpillNormalizer::new(false, LumaMode::Rec709)
            .normalize(rgb, &d, &reference, &kernel, 1.0);
        assert_eq!(n.rgb, d.rgb);
        assert_eq!(n.spill, rgb - d.rgb);
        assert_abs_diff_eq!(n.luma, LumaMode::Rec709.luma(rgb - d.rgb), epsilon = EPSILON);
    }

    #[test]
    fn absolute_reference_pixel_is_one() {
        let pick = Vec3::new(0.15, 0.85, 0.3);
        let (kernel, reference) = setup(pick);
        let d = kernel.apply(pick, &reference.rotation, 1.0);
        for luma in LumaMode::ALL {
            let n = SpillNormalizer::new(true, luma).normalize(pick, &d, &reference, &kernel, 1.0);
            assert_abs_diff_eq!(n.luma, 1.0, epsilon = EPSILON);
            assert_abs_diff_eq!(n.spill.y, pick.y, epsilon = EPSILON);
            assert_abs_diff_eq!(n.rgb.length(), 0.0, epsilon = EPSILON);
        }
    }

    #[test]
    fn absolute_scales_reference_color() {
        let pick = Vec3::new(0.0, 1.0, 0.0);
        let (kernel, reference) = setup(pick);
        let rgb = Vec3::new(0.2, 0.7, 0.2);
        let d = kernel.apply(rgb, &reference.rotation, 1.0);
        let n = SpillNormalizer::new(true, LumaMode::Average)
            .normalize(rgb, &d, &reference, &kernel, 1.0);
        // pixel spill 0.5 of green vs reference spill 1.0
        assert_abs_diff_eq!(n.luma, 0.5, epsilon = EPSILON);
        assert_abs_diff_eq!(n.spill.y, 0.5, epsilon = EPSILON);
        assert_abs_diff_eq!(n.rgb.y, 0.2, epsilon = EPSILON);
        assert_abs_diff_eq!(n.rgb.x, 0.2, epsilon = EPSILON);
    }

    #[test]
    fn zero_reference_spill_is_safe() {
        let pick = Vec3::new(0.0, 1.0, 0.0);
        let (kernel, reference) = setup(pick);
        let rgb = Vec3::new(0.2, 0.7, 0.2);
        let d = kernel.apply(rgb, &reference.rotation, 0.0);
        let n = SpillNormalizer::new(true, LumaMode::Rec709)
            .normalize(rgb, &d, &reference, &kernel, 0.0);
        assert_eq!(n.luma, 0.0);
        assert_eq!(n.rgb, rgb);
        assert!(n.rgb.is_finite());
    }
}
