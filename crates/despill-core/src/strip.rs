//! Horizontal pixel strips.
//!
//! A [`Strip`] is one row segment of an image, `width` pixels starting at
//! column `x`, stored planar: one contiguous `f32` plane per channel. This
//! is the shape in which a compositing host hands scanlines to an
//! operator.
//!
//! ```rust
//! use despill_core::{Channel, Strip};
//!
//! let strip = Strip::from_rgba(10, &[[0.1, 0.8, 0.2, 1.0], [0.0, 0.5, 0.0, 0.5]]);
//! assert_eq!(strip.width(), 2);
//! assert_eq!(strip.x(), 10);
//! assert_eq!(strip.plane(Channel::GREEN).unwrap(), &[0.8, 0.5]);
//! ```

use std::collections::BTreeMap;
use std::ops::Range;

use crate::{Channel, ChannelSet, Error, Result};

/// A row segment with one plane per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Strip {
    x: i32,
    width: usize,
    planes: BTreeMap<Channel, Vec<f32>>,
}

impl Strip {
    /// Creates a strip with no channels.
    pub fn new(x: i32, width: usize) -> Self {
        Self {
            x,
            width,
            planes: BTreeMap::new(),
        }
    }

    /// Creates a strip where every channel of `channels` holds `value`.
    pub fn filled(x: i32, width: usize, channels: ChannelSet, value: f32) -> Self {
        let planes = channels
            .iter()
            .map(|c| (c, vec![value; width]))
            .collect();
        Self { x, width, planes }
    }

    /// Creates an RGB strip from interleaved pixels.
    pub fn from_rgb(x: i32, pixels: &[[f32; 3]]) -> Self {
        let mut strip = Self::new(x, pixels.len());
        for (i, c) in Channel::rgb().into_iter().enumerate() {
            strip.planes.insert(c, pixels.iter().map(|p| p[i]).collect());
        }
        strip
    }

    /// Creates an RGBA strip from interleaved pixels.
    pub fn from_rgba(x: i32, pixels: &[[f32; 4]]) -> Self {
        let mut strip = Self::new(x, pixels.len());
        let channels = [Channel::RED, Channel::GREEN, Channel::BLUE, Channel::ALPHA];
        for (i, c) in channels.into_iter().enumerate() {
            strip.planes.insert(c, pixels.iter().map(|p| p[i]).collect());
        }
        strip
    }

    /// Builder form of [`set_plane`](Self::set_plane).
    pub fn with_plane(mut self, channel: Channel, data: Vec<f32>) -> Result<Self> {
        self.set_plane(channel, data)?;
        Ok(self)
    }

    /// Inserts or replaces a channel plane.
    ///
    /// Fails if `data` does not cover exactly the strip width.
    pub fn set_plane(&mut self, channel: Channel, data: Vec<f32>) -> Result<()> {
        if data.len() != self.width {
            return Err(Error::WidthMismatch {
                channel,
                expected: self.width,
                actual: data.len(),
            });
        }
        self.planes.insert(channel, data);
        Ok(())
    }

    /// Removes a plane, returning its samples.
    pub fn remove_plane(&mut self, channel: Channel) -> Option<Vec<f32>> {
        self.planes.remove(&channel)
    }

    /// First column.
    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Number of pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Covered columns, `x..x + width`.
    pub fn columns(&self) -> Range<i32> {
        self.x..self.x + self.width as i32
    }

    /// True if both strips cover the same columns.
    pub fn same_span(&self, other: &Strip) -> bool {
        self.x == other.x && self.width == other.width
    }

    /// Fails with [`Error::SpanMismatch`] unless both strips line up.
    pub fn check_span(&self, other: &Strip) -> Result<()> {
        if self.same_span(other) {
            Ok(())
        } else {
            Err(Error::SpanMismatch {
                a_x: self.x,
                a_width: self.width,
                b_x: other.x,
                b_width: other.width,
            })
        }
    }

    /// Channels present in this strip.
    pub fn channels(&self) -> ChannelSet {
        self.planes.keys().copied().collect()
    }

    /// True if the channel is present.
    pub fn has(&self, channel: Channel) -> bool {
        self.planes.contains_key(&channel)
    }

    /// Samples of one channel.
    pub fn plane(&self, channel: Channel) -> Option<&[f32]> {
        self.planes.get(&channel).map(Vec::as_slice)
    }

    /// Samples of one channel, or [`Error::MissingChannel`].
    pub fn require(&self, channel: Channel) -> Result<&[f32]> {
        self.plane(channel).ok_or(Error::MissingChannel { channel })
    }

    /// Mutable samples of one channel.
    pub fn plane_mut(&mut self, channel: Channel) -> Option<&mut [f32]> {
        self.planes.get_mut(&channel).map(Vec::as_mut_slice)
    }

    /// The red, green and blue planes.
    pub fn rgb_planes(&self) -> Result<[&[f32]; 3]> {
        Ok([
            self.require(Channel::RED)?,
            self.require(Channel::GREEN)?,
            self.require(Channel::BLUE)?,
        ])
    }

    /// Interleaved RGB of pixel `i`, if the strip has RGB.
    pub fn rgb_at(&self, i: usize) -> Option<[f32; 3]> {
        let [r, g, b] = self.rgb_planes().ok()?;
        Some([*r.get(i)?, *g.get(i)?, *b.get(i)?])
    }
}
