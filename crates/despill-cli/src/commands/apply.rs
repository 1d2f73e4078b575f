//! Apply command
//!
//! Runs sample pixels through the full pipeline as one strip, with
//! optional per-pixel limit, color and respill samples.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use despill_core::{Channel, ChannelSet, Strip};
use despill_math::Vec3;
use despill_ops::{AuxStrips, Connections, DespillPlan, PixelContext};
use tracing::debug;

use super::{format_rgb, load_config, parse_rgb};

/// Arguments for the `apply` command.
#[derive(Args)]
pub struct ApplyArgs {
    /// Pixels as R,G,B
    #[arg(required = true, allow_hyphen_values = true)]
    pub pixels: Vec<String>,

    /// Config file (YAML); defaults when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Source alpha for every pixel
    #[arg(short, long, default_value = "1.0")]
    pub alpha: f32,

    /// Limit mask sample; connects the limit input
    #[arg(long)]
    pub limit: Option<f32>,

    /// Color reference as R,G,B; connects the color input
    #[arg(long)]
    pub live: Option<String>,

    /// Respill color as R,G,B; connects the respill input
    #[arg(long)]
    pub respill: Option<String>,
}

/// Run the apply command.
pub fn run(args: ApplyArgs, verbose: u8) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let pixels = args
        .pixels
        .iter()
        .map(|p| parse_rgb(p))
        .collect::<Result<Vec<_>>>()?;
    let live = args.live.as_deref().map(parse_rgb).transpose()?;
    let respill = args.respill.as_deref().map(parse_rgb).transpose()?;

    let connections = Connections {
        limit: args.limit.is_some(),
        color: live.is_some(),
        respill: respill.is_some(),
    };
    let plan = DespillPlan::new(&config, connections);
    let width = pixels.len();
    debug!(width, ?connections, "applying");

    let rgba: Vec<[f32; 4]> = pixels.iter().map(|p| [p[0], p[1], p[2], args.alpha]).collect();
    let source = Strip::from_rgba(0, &rgba);
    let limit_strip = args
        .limit
        .map(|m| Strip::filled(0, width, ChannelSet::single(config.limit_channel), m));
    let live_strip = live.map(|c| Strip::from_rgb(0, &vec![c; width]));
    let respill_strip = respill.map(|c| Strip::from_rgb(0, &vec![c; width]));
    let aux = AuxStrips {
        limit: limit_strip.as_ref(),
        color: live_strip.as_ref(),
        respill: respill_strip.as_ref(),
    };

    let out_channel = config.output_channel;
    let requested = ChannelSet::RGBA | out_channel;
    let out = plan
        .process(&source, &aux, requested)
        .context("Despill failed")?;

    for (i, input) in pixels.iter().enumerate() {
        let rgb = out.rgb_at(i).context("Missing RGB in output")?;
        let scalar = out.plane(out_channel).map(|p| p[i]);
        let matte = plan
            .process_pixel(&PixelContext {
                live: live.map(Vec3::from),
                respill: respill.map(Vec3::from),
                limit: args.limit,
                ..PixelContext::new(Vec3::from(*input), args.alpha)
            })
            .matte;

        print!("[{}] -> [{}]", format_rgb(*input), format_rgb(rgb));
        if let Some(v) = scalar.filter(|_| !out_channel.is_rgb()) {
            print!("  {}={:.6}", out_channel, v);
        }
        if verbose > 0 || config.protect.enabled {
            print!("  matte={:.6}", matte);
        }
        println!();
    }

    if verbose > 0 && out_channel != Channel::ALPHA {
        println!("Output channel: {}", out_channel);
    }
    Ok(())
}
