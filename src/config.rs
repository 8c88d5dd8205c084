//! Drawing configuration, parsed from TOML (e.g. `globe.toml`).
//!
//! Every field is optional in the file; missing fields take the defaults
//! below.
//!
//! ```toml
//! radius = 2.0
//! outline_step = 5.0
//! border_step = 0.25
//! grid_step = 2.0
//! fallback_color = "#bfbfbf"
//! ```

use std::{fs, path::Path};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::{Rgb, FALLBACK_COLOR};

/// Parameters of the GeoJSON-to-globe pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobeConfig {
    /// Sphere radius every primitive is projected onto
    pub radius: f64,
    /// Max lon/lat gap (degrees, per axis) between consecutive outline points
    pub outline_step: f64,
    /// Max bisection depth per outline segment
    pub outline_max_depth: u32,
    /// Max great-circle gap (degrees) between fill border points
    pub border_step: f64,
    /// Spacing (degrees) of the interior fill grid
    pub grid_step: f64,
    /// Color for regions with no positive value
    pub fallback_color: Rgb,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            radius: 2.0,
            outline_step: 5.0,
            outline_max_depth: 32,
            border_step: 0.25,
            grid_step: 2.0,
            fallback_color: FALLBACK_COLOR,
        }
    }
}

impl GlobeConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("[config] Failed to parse globe config")?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("[config] Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("[config] Invalid config file: {}", path.display()))
    }

    /// Check that every step and the radius are positive and finite.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("radius", self.radius),
            ("outline_step", self.outline_step),
            ("border_step", self.border_step),
            ("grid_step", self.grid_step),
        ] {
            ensure!(value.is_finite() && value > 0.0, "[config] {name} must be positive and finite, got {value}");
        }
        Ok(())
    }
}
