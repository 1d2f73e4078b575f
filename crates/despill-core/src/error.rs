//! Error types for despill-core.
//!
//! Structural problems with strips and channel names. The numeric
//! pipeline itself never fails; see `despill-ops` for how degenerate
//! inputs are resolved.
//!
//! ```rust
//! use despill_core::{Channel, Error, Result};
//!
//! fn need_alpha(has_alpha: bool) -> Result<()> {
//!     if !has_alpha {
//!         return Err(Error::MissingChannel { channel: Channel::ALPHA });
//!     }
//!     Ok(())
//! }
//! assert!(need_alpha(false).unwrap_err().to_string().contains("alpha"));
//! ```

use thiserror::Error;

use crate::Channel;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or reading pixel strips.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A strip does not carry a channel the caller needs.
    #[error("strip has no '{channel}' channel")]
    MissingChannel {
        /// The absent channel
        channel: Channel,
    },

    /// A plane's length does not match the strip width.
    ///
    /// Every plane in a strip covers the same horizontal span.
    #[error("plane for '{channel}' has {actual} samples, strip width is {expected}")]
    WidthMismatch {
        /// Channel whose plane was rejected
        channel: Channel,
        /// Strip width
        expected: usize,
        /// Plane length
        actual: usize,
    },

    /// Two strips that must line up cover different spans.
    #[error("strip span [{a_x}, +{a_width}) does not match [{b_x}, +{b_width})")]
    SpanMismatch {
        /// First strip start
        a_x: i32,
        /// First strip width
        a_width: usize,
        /// Second strip start
        b_x: i32,
        /// Second strip width
        b_width: usize,
    },

    /// Channel name could not be parsed.
    #[error("unknown channel name: {0}")]
    UnknownChannel(String),

    /// Channel index beyond [`Channel::MAX`](crate::Channel::MAX).
    #[error("channel index {0} out of range")]
    ChannelOutOfRange(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_channel() {
        let err = Error::WidthMismatch {
            channel: Channel::GREEN,
            expected: 8,
            actual: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("green"));
        assert!(msg.contains('8'));
        assert!(msg.contains('7'));
    }
}
