//! Viewer configuration
//!
//! Loaded from an optional JSON file; every field falls back to its default, and the
//! command line can override the window settings on top.

use crate::display::{Color, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in config `{}`: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub view: ViewConfig,
    pub palette: Palette,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "isowire".to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            vsync: true,
        }
    }
}

/// Initial view parameters and the bounds the height-scale commands respect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub height_scale: i32,
    /// Lowest allowed height scale (inclusive)
    pub height_scale_min: i32,
    /// Upper bound (exclusive)
    pub height_scale_max: i32,
    pub height_scale_step: i32,
    /// Floor for the per-cell screen spacing along x
    pub min_spacing: i32,
    /// Degrees per rotate command
    pub rotation_step: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            height_scale: 2,
            height_scale_min: -10,
            height_scale_max: 30,
            height_scale_step: 1,
            min_spacing: 2,
            rotation_step: 15.0,
        }
    }
}

/// Colors and marker size used by a redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub edge: Color,
    pub marker: Color,
    pub marker_radius: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            edge: Color::WHITE,
            marker: Color::RED,
            marker_radius: 3,
        }
    }
}

/// Largest marker the palette accepts
pub const MAX_MARKER_RADIUS: u32 = 256;

/// Command line values that take precedence over the file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub vsync: Option<bool>,
}

impl Config {
    /// Load config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(w) = overrides.width {
            self.window.width = w;
        }
        if let Some(h) = overrides.height {
            self.window.height = h;
        }
        if let Some(v) = overrides.vsync {
            self.window.vsync = v;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        let w = &self.window;
        let v = &self.view;

        if w.width == 0 || w.height == 0 {
            return invalid(format!("window size {}x{} is empty", w.width, w.height));
        }
        if v.height_scale_min >= v.height_scale_max {
            return invalid(format!(
                "height_scale_min ({}) must be below height_scale_max ({})",
                v.height_scale_min, v.height_scale_max
            ));
        }
        if v.height_scale < v.height_scale_min || v.height_scale >= v.height_scale_max {
            return invalid(format!(
                "height_scale {} outside [{}, {})",
                v.height_scale, v.height_scale_min, v.height_scale_max
            ));
        }
        if v.height_scale_step < 1 {
            return invalid(format!(
                "height_scale_step must be >= 1, got {}",
                v.height_scale_step
            ));
        }
        if v.min_spacing < 1 {
            return invalid(format!("min_spacing must be >= 1, got {}", v.min_spacing));
        }
        if !v.rotation_step.is_finite() {
            return invalid("rotation_step must be finite".to_string());
        }
        if self.palette.marker_radius > MAX_MARKER_RADIUS {
            return invalid(format!(
                "marker_radius must be <= {MAX_MARKER_RADIUS}, got {}",
                self.palette.marker_radius
            ));
        }
        Ok(())
    }
}

/// Parse a `WxH` resolution such as `1280x720`
pub fn parse_resolution(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got `{s}`"))?;
    let w: u32 = w.trim().parse().map_err(|_| format!("bad width in `{s}`"))?;
    let h: u32 = h.trim().parse().map_err(|_| format!("bad height in `{s}`"))?;
    if w == 0 || h == 0 {
        return Err(format!("resolution `{s}` is empty"));
    }
    Ok((w, h))
}
