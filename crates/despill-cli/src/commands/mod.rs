//! CLI command implementations

pub mod apply;
pub mod config;
pub mod resolve;

use std::path::Path;

use anyhow::{Context, Result, bail};
use despill_ops::DespillConfig;
use tracing::debug;

/// Load a config from YAML, or the defaults when no path is given.
///
/// Missing fields take their defaults. Colors with non-finite components
/// are rejected.
pub fn load_config(path: Option<&Path>) -> Result<DespillConfig> {
    let Some(path) = path else {
        debug!("no config given, using defaults");
        return Ok(DespillConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: DespillConfig = serde_yaml::from_str(&text)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config: {}", path.display()))?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Parse `"r,g,b"` into a color.
pub fn parse_rgb(text: &str) -> Result<[f32; 3]> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        bail!("Expected R,G,B, got '{}'", text);
    }
    let mut rgb = [0.0; 3];
    for (slot, part) in rgb.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .with_context(|| format!("Bad component '{}' in '{}'", part, text))?;
    }
    Ok(rgb)
}

/// Format a color for display.
pub fn format_rgb(rgb: [f32; 3]) -> String {
    format!("{:.6}, {:.6}, {:.6}", rgb[0], rgb[1], rgb[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use despill_core::Channel;
    use despill_ops::{AlphaMode, DespillMath, SpillColor};
    use std::io::Write;

    #[test]
    fn parse_rgb_accepts_spaces() {
        assert_eq!(parse_rgb("0.2, 0.8,0.2").unwrap(), [0.2, 0.8, 0.2]);
        assert_eq!(parse_rgb("-1,2.5,0").unwrap(), [-1.0, 2.5, 0.0]);
    }

    #[test]
    fn parse_rgb_rejects_garbage() {
        assert!(parse_rgb("0.2,0.8").is_err());
        assert!(parse_rgb("0.2,green,0.1").is_err());
        assert!(parse_rgb("").is_err());
    }

    #[test]
    fn missing_path_gives_defaults() {
        assert_eq!(load_config(None).unwrap(), DespillConfig::default());
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "color: blue").unwrap();
        writeln!(file, "despill_math: maximum").unwrap();
        writeln!(file, "output_channel: depth").unwrap();
        writeln!(file, "protect:").unwrap();
        writeln!(file, "  enabled: true").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.color, SpillColor::Blue);
        assert_eq!(config.despill_math, DespillMath::Maximum);
        assert_eq!(config.output_channel, Channel::DEPTH);
        assert!(config.protect.enabled);
        assert_eq!(config.protect.tolerance, 0.2);
        assert_eq!(config.alpha, AlphaMode::InvertedSpill);
    }

    #[test]
    fn default_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("despill.yaml");
        let config = DespillConfig {
            hue_offset: 7.5,
            alpha: AlphaMode::Passthrough,
            ..Default::default()
        };
        std::fs::write(&path, serde_yaml::to_string(&config).unwrap()).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), config);
    }

    #[test]
    fn bad_yaml_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "color: purple").unwrap();
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(format!("{err}").contains("Failed to parse config"));
    }

    #[test]
    fn nan_color_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "pick: [0.0, .nan, 0.0]").unwrap();
        assert!(load_config(Some(file.path())).is_err());
    }
}
