//! Channel identifiers and channel sets.
//!
//! A [`Channel`] is a small integer id. The first five ids are the named
//! image channels (red, green, blue, alpha, depth); the rest are generic
//! auxiliary channels written as `chanN`.
//!
//! [`ChannelSet`] is a 64-bit mask over channel ids, cheap to copy and to
//! combine:
//!
//! ```rust
//! use despill_core::{Channel, ChannelSet};
//!
//! let requested = ChannelSet::RGBA | Channel::DEPTH;
//! let passthrough = requested - ChannelSet::RGB - Channel::ALPHA;
//! assert_eq!(passthrough.iter().collect::<Vec<_>>(), vec![Channel::DEPTH]);
//! ```

use std::fmt;
use std::ops::{BitOr, BitOrAssign, Sub, SubAssign};
use std::str::FromStr;

use crate::{Error, Result};

/// A channel id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Channel(u8);

impl Channel {
    /// Red
    pub const RED: Self = Self(0);
    /// Green
    pub const GREEN: Self = Self(1);
    /// Blue
    pub const BLUE: Self = Self(2);
    /// Alpha
    pub const ALPHA: Self = Self(3);
    /// Depth
    pub const DEPTH: Self = Self(4);

    /// Number of addressable channel ids.
    pub const MAX: usize = 64;

    const NAMES: [&'static str; 5] = ["red", "green", "blue", "alpha", "depth"];

    /// Creates a channel from its id.
    pub fn new(index: usize) -> Result<Self> {
        if index >= Self::MAX {
            return Err(Error::ChannelOutOfRange(index));
        }
        Ok(Self(index as u8))
    }

    /// The channel id.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// True for red, green and blue.
    #[inline]
    pub fn is_rgb(self) -> bool {
        self.0 < 3
    }

    /// The RGB channels in order.
    pub const fn rgb() -> [Self; 3] {
        [Self::RED, Self::GREEN, Self::BLUE]
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Self::NAMES.get(self.index()) {
            Some(name) => f.write_str(name),
            None => write!(f, "chan{}", self.0),
        }
    }
}

impl FromStr for Channel {
    type Err = Error;

    /// Accepts full names (`green`), short names (`g`), layer-qualified
    /// names (`rgba.green`) and generic ids (`chan7` or `7`).
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let name = lower.strip_prefix("rgba.").unwrap_or(&lower);
        match name {
            "r" | "red" => Ok(Self::RED),
            "g" | "green" => Ok(Self::GREEN),
            "b" | "blue" => Ok(Self::BLUE),
            "a" | "alpha" => Ok(Self::ALPHA),
            "z" | "depth" | "depth.z" => Ok(Self::DEPTH),
            other => {
                let digits = other.strip_prefix("chan").unwrap_or(other);
                let index: usize = digits
                    .parse()
                    .map_err(|_| Error::UnknownChannel(s.to_string()))?;
                Self::new(index)
            }
        }
    }
}

impl TryFrom<String> for Channel {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Channel> for String {
    fn from(c: Channel) -> Self {
        c.to_string()
    }
}

/// A set of channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChannelSet(u64);

impl ChannelSet {
    /// No channels.
    pub const EMPTY: Self = Self(0);
    /// Red, green, blue.
    pub const RGB: Self = Self(0b111);
    /// Red, green, blue, alpha.
    pub const RGBA: Self = Self(0b1111);

    /// A set holding one channel.
    #[inline]
    pub const fn single(channel: Channel) -> Self {
        Self(1u64 << channel.0)
    }

    /// True if `channel` is in the set.
    #[inline]
    pub fn contains(self, channel: Channel) -> bool {
        self.0 & (1u64 << channel.0) != 0
    }

    /// Adds a channel.
    #[inline]
    pub fn insert(&mut self, channel: Channel) {
        self.0 |= 1u64 << channel.0;
    }

    /// Removes a channel.
    #[inline]
    pub fn remove(&mut self, channel: Channel) {
        self.0 &= !(1u64 << channel.0);
    }

    /// True if the set is empty.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of channels in the set.
    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// True if every channel of `other` is also in `self`.
    #[inline]
    pub fn is_superset(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Channels in ascending id order.
    pub fn iter(self) -> impl Iterator<Item = Channel> {
        (0..Channel::MAX as u8)
            .filter(move |i| self.0 & (1u64 << i) != 0)
            .map(Channel)
    }
}

impl BitOr for ChannelSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<Channel> for ChannelSet {
    type Output = Self;

    fn bitor(self, rhs: Channel) -> Self {
        self | Self::single(rhs)
    }
}

impl BitOrAssign for ChannelSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitOrAssign<Channel> for ChannelSet {
    fn bitor_assign(&mut self, rhs: Channel) {
        self.insert(rhs);
    }
}

impl Sub for ChannelSet {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 & !rhs.0)
    }
}

impl Sub<Channel> for ChannelSet {
    type Output = Self;

    fn sub(self, rhs: Channel) -> Self {
        self - Self::single(rhs)
    }
}

impl SubAssign for ChannelSet {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 &= !rhs.0;
    }
}

impl From<Channel> for ChannelSet {
    fn from(c: Channel) -> Self {
        Self::single(c)
    }
}

impl FromIterator<Channel> for ChannelSet {
    fn from_iter<I: IntoIterator<Item = Channel>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for c in iter {
            set.insert(c);
        }
        set
    }
}

impl fmt::Display for ChannelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|c| c.to_string()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
