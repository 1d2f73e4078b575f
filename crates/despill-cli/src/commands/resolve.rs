//! Resolve command
//!
//! Shows the pass-wide decisions a configuration leads to: color
//! selection, hue shift, pass mode and the channels fetched per input.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use despill_core::ChannelSet;
use despill_ops::{ColorSelection, Connections, DespillPlan, Input, PassMode};

use super::{format_rgb, load_config};

/// Arguments for the `resolve` command.
#[derive(Args)]
pub struct ResolveArgs {
    /// Config file (YAML); defaults when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Treat the limit input as connected
    #[arg(long)]
    pub limit: bool,

    /// Treat the color input as connected
    #[arg(long)]
    pub live: bool,

    /// Treat the respill input as connected
    #[arg(long)]
    pub respill: bool,
}

/// Run the resolve command.
pub fn run(args: ResolveArgs, verbose: u8) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let connections = Connections {
        limit: args.limit,
        color: args.live,
        respill: args.respill,
    };
    let plan = DespillPlan::new(&config, connections);

    println!("Selection: {}", describe(plan.selection()));
    println!("Pass mode: {}", mode_name(plan.mode()));

    if verbose > 0 {
        let requested = ChannelSet::RGBA;
        let requests = plan.requests(requested);
        println!("Output channels: {}", plan.output_channels(requested));
        for input in Input::ALL {
            println!("  {:<8} {}", input.label(), requests.get(input));
        }
    }
    Ok(())
}

fn describe(selection: &ColorSelection) -> String {
    match selection {
        ColorSelection::Bypass => "bypass (achromatic pick)".to_string(),
        ColorSelection::Picked(r) => {
            let color = format_rgb(r.color.to_array());
            format!("picked [{}], hue shift {:.3} deg", color, r.hue_shift())
        }
        ColorSelection::Channel { channel, reference } => {
            format!("channel {}, hue shift {:.3} deg", channel, reference.hue_shift())
        }
        ColorSelection::Live { hue_offset } => {
            format!("live reference, offset {:.3} deg", hue_offset)
        }
    }
}

fn mode_name(mode: PassMode) -> &'static str {
    match mode {
        PassMode::Bypass => "bypass",
        PassMode::ProtectionPreview => "protection preview",
        PassMode::Normal => "normal",
    }
}
