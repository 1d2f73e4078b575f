//! # despill-math
//!
//! Scalar and 3-vector math used by the despill pipeline.
//!
//! - [`Vec3`] - RGB triplets with component-wise arithmetic
//! - [`lerp`], [`smoothstep`], [`linearstep`] - interpolation helpers
//! - [`HueRotation`], [`hue_angle`] - rotations around the gray axis
//!
//! # Design
//!
//! Values are never clamped implicitly. Scene-linear footage routinely
//! carries values above 1.0 and slightly below 0.0, and the pipeline
//! preserves both.
//!
//! ```rust
//! use despill_math::{hue_angle, HueRotation, Vec3};
//!
//! let green = Vec3::new(0.0, 1.0, 0.0);
//! let angle = hue_angle(green);
//! assert!((angle - 120.0).abs() < 1e-3);
//!
//! // Rotating by the negated angle lands green on the red axis.
//! let red = HueRotation::new(-angle).apply(green);
//! assert!((red.x - 1.0).abs() < 1e-5);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - axis-angle rotation matrices
//!
//! # Used By
//!
//! - `despill-ops` - despill kernel, normalizer and respill stages

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod hue;
mod interp;
mod vec3;

pub use hue::*;
pub use interp::*;
pub use vec3::*;
