//! # despill-ops
//!
//! Green/blue screen spill suppression for compositing.
//!
//! A pixel goes through four stages:
//!
//! 1. [`kernel`] - rotate hue so the spill lands on red, clamp red against
//!    green and blue, damp by tone protection, rotate back.
//! 2. [`normalize`] - report spill raw or relative to the reference color.
//! 3. [`respill`] - remap spill luma between black and white points and add
//!    a replacement color back.
//! 4. [`alpha`] - write spill strength, or the source alpha, to a scalar
//!    channel.
//!
//! [`driver`] wires them together over strips: [`DespillPlan`] is resolved
//! once from a [`DespillConfig`] and input connectivity, then processes rows.
//!
//! # Modules
//!
//! - [`config`] - user parameters and their normalization
//! - [`selection`] - spill color source and hue shift
//! - [`kernel`] - despill math and tone protection
//! - [`normalize`] - absolute/relative spill
//! - [`respill`] - luma modes, luma range, respill compositing
//! - [`alpha`] - scalar output policy
//! - [`driver`] - pass modes and strip processing
//!
//! # Example
//!
//! ```rust
//! use despill_core::{Channel, ChannelSet, Strip};
//! use despill_ops::{AuxStrips, Connections, DespillConfig, DespillPlan};
//!
//! let plan = DespillPlan::new(&DespillConfig::default(), Connections::default());
//! let row = Strip::from_rgba(0, &[[0.1, 0.9, 0.1, 1.0], [0.5, 0.5, 0.5, 1.0]]);
//! let out = plan.process(&row, &AuxStrips::default(), ChannelSet::RGBA)?;
//!
//! // Spill removed from the green pixel, gray left alone.
//! let alpha = out.plane(Channel::ALPHA).unwrap();
//! assert!(alpha[0] < 1.0);
//! assert!(alpha[1] > 0.999);
//! # Ok::<(), despill_ops::OpsError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `serde` - `Serialize`/`Deserialize` for [`DespillConfig`] and its enums

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod alpha;
pub mod config;
pub mod driver;
mod error;
pub mod kernel;
pub mod normalize;
pub mod respill;
pub mod selection;

pub use alpha::AlphaMode;
pub use config::DespillConfig;
pub use driver::{
    AuxStrips, Connections, DespillPlan, Input, InputRequests, PassMode, PixelContext, PixelOutput,
};
pub use error::{OpsError, OpsResult};
pub use kernel::{DespillMath, Kernel, ToneProtection};
pub use normalize::{NormalizedSpill, SpillNormalizer};
pub use respill::{LumaMode, LumaRange, OutputMode, Respill};
pub use selection::{ColorSelection, Reference, SpillColor};
