//! Canvas configuration
//!
//! All fields have defaults matching the classic 120x80 layout, so a JSON
//! file only needs the keys it overrides.
//!
//! ## Usage
//!
//! ```rust
//! use pitch_core::config::CanvasConfig;
//!
//! let config = CanvasConfig::default();
//! assert_eq!(config.dimensions.width, 120.0);
//!
//! let wide = CanvasConfig::from_json(r#"{"dimensions": {"width": 105.0, "height": 68.0}}"#).unwrap();
//! assert_eq!(wide.view_padding, 2.0);
//! ```
//!
//! ## Environment Variables
//!
//! - `PITCHPLOT_CONFIG`: path to a JSON config file

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::density::MAX_RESOLUTION;
use crate::error::{PitchError, Result};
use crate::pitch::{PitchDimensions, DEFAULT_VIEW_PADDING};
use crate::style::Color;

pub const CONFIG_ENV_VAR: &str = "PITCHPLOT_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub dimensions: PitchDimensions,
    /// Padding around the pitch in the visible range
    pub view_padding: f64,
    /// Figure size in inches (width, height)
    pub figure_size: (f64, f64),
    /// Pixels per inch when rasterizing the figure size
    pub dpi: f64,
    pub player: PlayerStyle,
    pub pass: PassDefaults,
    pub heatmap: HeatmapDefaults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStyle {
    pub radius: f64,
    pub color: Color,
    /// Jersey number offset from the marker center
    pub number_offset: (f64, f64),
    pub number_font_size: f64,
    pub number_color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassDefaults {
    pub color: Color,
    pub glyph_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapDefaults {
    pub color: Color,
    pub levels: usize,
    /// Grid cells along the x axis of the view
    pub resolution: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            dimensions: PitchDimensions::default(),
            view_padding: DEFAULT_VIEW_PADDING,
            figure_size: (12.0, 8.0),
            dpi: 100.0,
            player: PlayerStyle::default(),
            pass: PassDefaults::default(),
            heatmap: HeatmapDefaults::default(),
        }
    }
}

impl Default for PlayerStyle {
    fn default() -> Self {
        Self {
            radius: 1.5,
            color: Color::RED,
            number_offset: (-0.9, -0.3),
            number_font_size: 7.0,
            number_color: Color::BLACK,
        }
    }
}

impl Default for PassDefaults {
    fn default() -> Self {
        Self { color: Color::STEEL_BLUE, glyph_size: 6.0 }
    }
}

impl Default for HeatmapDefaults {
    fn default() -> Self {
        Self { color: Color::BLUE, levels: 50, resolution: 124 }
    }
}

impl CanvasConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            PitchError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Load from the file named by `PITCHPLOT_CONFIG`, or use defaults.
    ///
    /// An unreadable or invalid file is logged and ignored.
    pub fn from_env_or_default() -> Self {
        match env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.is_empty() => match Self::from_file(Path::new(&path)) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(%path, error = %e, "ignoring canvas config");
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.dimensions.validate()?;
        positive("view_padding", self.view_padding, true)?;
        positive("figure_size.0", self.figure_size.0, false)?;
        positive("figure_size.1", self.figure_size.1, false)?;
        positive("dpi", self.dpi, false)?;
        positive("player.radius", self.player.radius, false)?;
        positive("player.number_font_size", self.player.number_font_size, false)?;
        positive("pass.glyph_size", self.pass.glyph_size, false)?;
        if self.heatmap.levels == 0 {
            return Err(PitchError::Configuration("heatmap.levels must be at least 1".into()));
        }
        if self.heatmap.resolution == 0 || self.heatmap.resolution > MAX_RESOLUTION {
            return Err(PitchError::Configuration(format!(
                "heatmap.resolution must be in 1..={}, got {}",
                MAX_RESOLUTION, self.heatmap.resolution
            )));
        }
        Ok(())
    }

    /// Output size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.figure_size.0 * self.dpi).round() as u32,
            (self.figure_size.1 * self.dpi).round() as u32,
        )
    }
}

fn positive(name: &str, value: f64, allow_zero: bool) -> Result<()> {
    let ok = value.is_finite() && if allow_zero { value >= 0.0 } else { value > 0.0 };
    if ok {
        Ok(())
    } else {
        Err(PitchError::Configuration(format!("{} must be positive, got {}", name, value)))
    }
}
