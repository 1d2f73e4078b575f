//! Strip driver.
//!
//! [`DespillPlan`] is the immutable parameter block for one pass: the
//! normalized config, input connectivity and everything resolved from
//! them. It processes strips independently, so a host may call it from
//! any number of threads.
//!
//! # Pass modes
//!
//! Chosen once per pass, before the pixel loop:
//!
//! 1. [`PassMode::Bypass`] - achromatic pick, RGB passes through.
//! 2. [`PassMode::ProtectionPreview`] - RGB scaled by the protection matte.
//! 3. [`PassMode::Normal`] - kernel, normalizer, respill and alpha.
//!
//! # Example
//!
//! ```rust
//! use despill_core::{ChannelSet, Strip};
//! use despill_ops::{AuxStrips, Connections, DespillConfig, DespillPlan, SpillColor};
//!
//! let config = DespillConfig { color: SpillColor::Green, ..Default::default() };
//! let plan = DespillPlan::new(&config, Connections::default());
//!
//! let source = Strip::from_rgba(0, &[[0.2, 0.8, 0.2, 1.0]]);
//! let out = plan.process(&source, &AuxStrips::default(), ChannelSet::RGBA).unwrap();
//! let [r, g, b] = out.rgb_at(0).unwrap();
//! assert!(g < 0.8 && r > 0.2 && b > 0.2);
//! ```

use std::fmt;

use despill_core::{Channel, ChannelSet, Strip};
use despill_math::Vec3;
use tracing::{debug, trace, warn};

use crate::config::DespillConfig;
use crate::kernel::Kernel;
use crate::normalize::SpillNormalizer;
use crate::respill::Respill;
use crate::selection::{ColorSelection, Reference, SUPPRESSED_CHANNEL};
use crate::OpsResult;

/// Operator inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    /// Image to despill.
    Source,
    /// Per-pixel limit mask.
    Limit,
    /// Per-pixel spill color reference.
    Color,
    /// Per-pixel respill color.
    Respill,
}

impl Input {
    /// All inputs in port order.
    pub const ALL: [Self; 4] = [Self::Source, Self::Limit, Self::Color, Self::Respill];

    /// Port index.
    pub fn index(self) -> usize {
        match self {
            Self::Source => 0,
            Self::Limit => 1,
            Self::Color => 2,
            Self::Respill => 3,
        }
    }

    /// Port label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Source => "Source",
            Self::Limit => "Limit",
            Self::Color => "Color",
            Self::Respill => "Respill",
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which optional inputs have a meaningful upstream.
///
/// A port fed by a default black source counts as disconnected. The flag
/// cannot be inferred from strip contents, the host must report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Connections {
    /// Limit mask connected.
    pub limit: bool,
    /// Color reference connected.
    pub color: bool,
    /// Respill color connected.
    pub respill: bool,
}

impl Connections {
    /// Connection flag for an input. The source is always connected.
    pub fn is_connected(&self, input: Input) -> bool {
        match input {
            Input::Source => true,
            Input::Limit => self.limit,
            Input::Color => self.color,
            Input::Respill => self.respill,
        }
    }
}

/// Optional input strips for one row. Only read when the matching
/// [`Connections`] flag is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuxStrips<'a> {
    /// Limit mask strip.
    pub limit: Option<&'a Strip>,
    /// Color reference strip.
    pub color: Option<&'a Strip>,
    /// Respill color strip.
    pub respill: Option<&'a Strip>,
}

/// Channels to fetch from each input for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputRequests {
    /// From the source.
    pub source: ChannelSet,
    /// From the limit input.
    pub limit: ChannelSet,
    /// From the color input.
    pub color: ChannelSet,
    /// From the respill input.
    pub respill: ChannelSet,
}

impl InputRequests {
    /// Channels requested from `input`.
    pub fn get(&self, input: Input) -> ChannelSet {
        match input {
            Input::Source => self.source,
            Input::Limit => self.limit,
            Input::Color => self.color,
            Input::Respill => self.respill,
        }
    }
}

/// Per-pass processing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassMode {
    /// RGB unchanged.
    Bypass,
    /// RGB times clamped protection matte.
    ProtectionPreview,
    /// Full pipeline.
    Normal,
}

/// One pixel's inputs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelContext {
    /// Source color.
    pub rgb: Vec3,
    /// Source alpha.
    pub alpha: f32,
    /// Color reference sample, if connected.
    pub live: Option<Vec3>,
    /// Respill sample, if connected.
    pub respill: Option<Vec3>,
    /// Limit mask sample, if connected.
    pub limit: Option<f32>,
}

impl PixelContext {
    /// Context with only a source color and alpha.
    pub fn new(rgb: Vec3, alpha: f32) -> Self {
        Self {
            rgb,
            alpha,
            ..Default::default()
        }
    }
}

/// One pixel's outputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelOutput {
    /// Output color.
    pub rgb: Vec3,
    /// Scalar output, `None` when the pass leaves it untouched.
    pub alpha: Option<f32>,
    /// Protection matte of the source pixel.
    pub matte: f32,
}

/// Resolved, immutable parameters for one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DespillPlan {
    config: DespillConfig,
    connections: Connections,
    selection: ColorSelection,
    mode: PassMode,
    kernel: Kernel,
    normalizer: SpillNormalizer,
    respill: Respill,
}

impl DespillPlan {
    /// Resolves a plan from user parameters and input connectivity.
    pub fn new(config: &DespillConfig, connections: Connections) -> Self {
        let config = config.normalized();
        let selection = ColorSelection::resolve(
            config.color,
            config.pick_color(),
            config.hue_offset,
            connections.color,
        );
        let mode = if selection.is_bypass() {
            PassMode::Bypass
        } else if config.protect.previewing() {
            PassMode::ProtectionPreview
        } else {
            PassMode::Normal
        };
        let kernel = Kernel::new(
            config.despill_math,
            config.custom_weight,
            SUPPRESSED_CHANNEL,
            config.protect,
        );
        debug!(
            ?selection,
            ?mode,
            ?connections,
            channel = kernel.channel(),
            "despill plan resolved"
        );

        Self {
            kernel,
            normalizer: SpillNormalizer::new(config.absolute, config.respill_math),
            respill: Respill {
                output: config.output,
                color: config.respill_rgb(),
                range: config.luma_range(),
            },
            config,
            connections,
            selection,
            mode,
        }
    }

    /// The normalized config.
    pub fn config(&self) -> &DespillConfig {
        &self.config
    }

    /// Input connectivity.
    pub fn connections(&self) -> Connections {
        self.connections
    }

    /// Resolved color selection.
    pub fn selection(&self) -> &ColorSelection {
        &self.selection
    }

    /// Resolved pass mode.
    pub fn mode(&self) -> PassMode {
        self.mode
    }

    /// Channels the operator produces when `requested` is asked for.
    pub fn output_channels(&self, requested: ChannelSet) -> ChannelSet {
        requested | self.config.output_channel
    }

    /// Channels to fetch from each input to produce `requested`.
    ///
    /// RGB is always fetched from the source. Source alpha is added when it
    /// is passed through to the output channel. Optional inputs are only
    /// asked for when connected.
    pub fn requests(&self, requested: ChannelSet) -> InputRequests {
        let mut source = requested | ChannelSet::RGB;
        if !self.config.alpha.outputs_spill() && requested.contains(self.config.output_channel) {
            source |= Channel::ALPHA;
        }
        let when = |connected: bool, set: ChannelSet| {
            if connected { set } else { ChannelSet::EMPTY }
        };
        let limit = ChannelSet::single(self.config.limit_channel);
        InputRequests {
            source,
            limit: when(self.connections.limit, limit),
            color: when(self.connections.color, ChannelSet::RGB),
            respill: when(self.connections.respill, ChannelSet::RGB),
        }
    }

    /// Runs one pixel through the plan.
    ///
    /// Samples in `px` for inputs the plan treats as disconnected are
    /// ignored. A live plan without a color sample passes the pixel
    /// through.
    pub fn process_pixel(&self, px: &PixelContext) -> PixelOutput {
        let matte = self.kernel.protection().matte(px.rgb);
        match self.mode {
            PassMode::Bypass => PixelOutput { rgb: px.rgb, alpha: None, matte },
            PassMode::ProtectionPreview => PixelOutput {
                rgb: self.preview(px.rgb, matte),
                alpha: None,
                matte,
            },
            PassMode::Normal => {
                let live = px.live.filter(|_| self.connections.color);
                let Some(reference) = self.selection.reference_for(live) else {
                    return PixelOutput { rgb: px.rgb, alpha: None, matte };
                };
                let limit = px.limit.filter(|_| self.connections.limit);
                let respill = px.respill.filter(|_| self.connections.respill);
                let (rgb, alpha, matte) =
                    self.pipeline(px.rgb, px.alpha, &reference, limit, respill);
                PixelOutput { rgb, alpha: Some(alpha), matte }
            }
        }
    }

    /// Processes one row into a new strip.
    ///
    /// The output holds the channels of `requested` plus RGB. Channels
    /// other than RGB and the output channel are copied from `source`
    /// unchanged. The output channel is written only when requested, and
    /// never when it is one of R, G or B.
    ///
    /// Optional strips that are disconnected, missing, misaligned or
    /// lacking channels are treated as disconnected for this row.
    pub fn process(
        &self,
        source: &Strip,
        aux: &AuxStrips<'_>,
        requested: ChannelSet,
    ) -> OpsResult<Strip> {
        let usable = self.usable_connections(source, aux);
        if usable != self.connections {
            warn!(
                planned = ?self.connections,
                usable = ?usable,
                "optional inputs unusable for this row, falling back"
            );
            return DespillPlan::new(&self.config, usable).process(source, aux, requested);
        }

        trace!(x = source.x(), width = source.width(), mode = ?self.mode, "despill strip");
        let [r, g, b] = source.rgb_planes()?;
        let width = source.width();
        let out_channel = self.config.output_channel;

        let mut out = Strip::new(source.x(), width);
        for c in (requested - ChannelSet::RGB - out_channel).iter() {
            if let Some(plane) = source.plane(c) {
                out.set_plane(c, plane.to_vec())?;
            }
        }

        let rgb_at = |i: usize| Vec3::new(r[i], g[i], b[i]);
        let mut rgb_out: [Vec<f32>; 3] = std::array::from_fn(|_| Vec::with_capacity(width));
        let mut alpha_out: Option<Vec<f32>> = None;

        match self.mode {
            PassMode::Bypass => {
                for i in 0..width {
                    push_rgb(&mut rgb_out, rgb_at(i));
                }
            }
            PassMode::ProtectionPreview => {
                let protection = self.kernel.protection();
                for i in 0..width {
                    let rgb = rgb_at(i);
                    push_rgb(&mut rgb_out, self.preview(rgb, protection.matte(rgb)));
                }
            }
            PassMode::Normal => {
                let row = RowInputs {
                    rgb: [r, g, b],
                    alpha: source.plane(Channel::ALPHA),
                    limit: self.connected_plane(
                        aux.limit,
                        self.connections.limit,
                        self.config.limit_channel,
                    ),
                    respill: self.connected_rgb(aux.respill, self.connections.respill),
                };
                let live = self.connected_rgb(aux.color, self.connections.color);
                alpha_out = match (self.selection, live) {
                    (ColorSelection::Live { hue_offset }, Some([cr, cg, cb])) => {
                        let sample = |i: usize| Vec3::new(cr[i], cg[i], cb[i]);
                        Some(self.run_normal(
                            &row,
                            |i| Reference::new(sample(i), hue_offset),
                            &mut rgb_out,
                        ))
                    }
                    (selection, _) => selection
                        .fixed_reference()
                        .map(|fixed| self.run_normal(&row, |_| fixed, &mut rgb_out)),
                };
                if alpha_out.is_none() {
                    rgb_out = [r.to_vec(), g.to_vec(), b.to_vec()];
                }
            }
        }

        let [ro, go, bo] = rgb_out;
        out.set_plane(Channel::RED, ro)?;
        out.set_plane(Channel::GREEN, go)?;
        out.set_plane(Channel::BLUE, bo)?;

        if requested.contains(out_channel) && !out_channel.is_rgb() {
            match alpha_out {
                Some(alpha) => out.set_plane(out_channel, alpha)?,
                None => {
                    if let Some(plane) = source.plane(out_channel) {
                        out.set_plane(out_channel, plane.to_vec())?;
                    }
                }
            }
        }
        Ok(out)
    }

    /// Processes one row in place.
    ///
    /// Only R, G, B and the output channel (when requested and not RGB) are
    /// written. Every other plane of `row` is left as it was. See
    /// [`process`](Self::process).
    pub fn process_in_place(
        &self,
        row: &mut Strip,
        aux: &AuxStrips<'_>,
        requested: ChannelSet,
    ) -> OpsResult<()> {
        let mut written = ChannelSet::RGB;
        if requested.contains(self.config.output_channel) {
            written |= self.config.output_channel;
        }
        let mut out = self.process(row, aux, written)?;
        for c in written.iter() {
            let Some(data) = out.remove_plane(c) else {
                continue;
            };
            match row.plane_mut(c) {
                Some(dst) => dst.copy_from_slice(&data),
                None => row.set_plane(c, data)?,
            }
        }
        Ok(())
    }

    /// Full pipeline over one row, returning the scalar output plane.
    fn run_normal<F>(
        &self,
        row: &RowInputs<'_>,
        reference: F,
        rgb_out: &mut [Vec<f32>; 3],
    ) -> Vec<f32>
    where
        F: Fn(usize) -> Reference,
    {
        let [r, g, b] = row.rgb;
        let mut alpha = Vec::with_capacity(r.len());
        for i in 0..r.len() {
            let (rgb, a, _) = self.pipeline(
                Vec3::new(r[i], g[i], b[i]),
                row.alpha.map_or(0.0, |p| p[i]),
                &reference(i),
                row.limit.map(|p| p[i]),
                row.respill.map(|[sr, sg, sb]| Vec3::new(sr[i], sg[i], sb[i])),
            );
            push_rgb(rgb_out, rgb);
            alpha.push(a);
        }
        alpha
    }

    /// Kernel, normalizer, respill and alpha for one pixel.
    #[inline]
    fn pipeline(
        &self,
        rgb: Vec3,
        input_alpha: f32,
        reference: &Reference,
        limit_sample: Option<f32>,
        respill_sample: Option<Vec3>,
    ) -> (Vec3, f32, f32) {
        let limit = self.config.limit_strength(limit_sample);
        let despilled = self.kernel.apply(rgb, &reference.rotation, limit);
        let spill = self.normalizer.normalize(rgb, &despilled, reference, &self.kernel, limit);
        let (out, strength) = self.respill.composite(&spill, respill_sample);
        (out, self.config.alpha.resolve(strength, input_alpha), despilled.matte)
    }

    #[inline]
    fn preview(&self, rgb: Vec3, matte: f32) -> Vec3 {
        rgb * self.kernel.protection().strength(matte)
    }

    /// Connections restricted to strips that can actually be read.
    fn usable_connections(&self, source: &Strip, aux: &AuxStrips<'_>) -> Connections {
        let fits = |strip: Option<&Strip>, needed: ChannelSet| {
            strip.is_some_and(|s| s.same_span(source) && s.channels().is_superset(needed))
        };
        Connections {
            limit: self.connections.limit
                && fits(aux.limit, ChannelSet::single(self.config.limit_channel)),
            color: self.connections.color && fits(aux.color, ChannelSet::RGB),
            respill: self.connections.respill && fits(aux.respill, ChannelSet::RGB),
        }
    }

    fn connected_plane<'a>(
        &self,
        strip: Option<&'a Strip>,
        connected: bool,
        channel: Channel,
    ) -> Option<&'a [f32]> {
        if !connected {
            return None;
        }
        strip?.plane(channel)
    }

    fn connected_rgb<'a>(
        &self,
        strip: Option<&'a Strip>,
        connected: bool,
    ) -> Option<[&'a [f32]; 3]> {
        if !connected {
            return None;
        }
        strip?.rgb_planes().ok()
    }
}

/// Planes read by the full pipeline for one row.
struct RowInputs<'a> {
    rgb: [&'a [f32]; 3],
    alpha: Option<&'a [f32]>,
    limit: Option<&'a [f32]>,
    respill: Option<[&'a [f32]; 3]>,
}

#[inline]
fn push_rgb(planes: &mut [Vec<f32>; 3], rgb: Vec3) {
    planes[0].push(rgb.x);
    planes[1].push(rgb.y);
    planes[2].push(rgb.z);
}
