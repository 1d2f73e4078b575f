//! # despill-core
//!
//! Core types shared by the despill crates:
//!
//! - [`Channel`], [`ChannelSet`] - channel ids and bit-mask sets
//! - [`Strip`] - a planar row segment of `f32` samples
//! - [`Error`], [`Result`] - structural errors
//!
//! ## Crate Structure
//!
//! ```text
//! despill-core (this crate)
//!    ^
//!    |
//!    +-- despill-ops (pipeline stages, strip driver)
//!    +-- despill-cli (command-line tool)
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - `Serialize`/`Deserialize` for [`Channel`] (as its name)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod channel;
pub mod error;
pub mod strip;

pub use channel::{Channel, ChannelSet};
pub use error::{Error, Result};
pub use strip::Strip;
