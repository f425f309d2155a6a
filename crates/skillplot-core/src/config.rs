//! Configuration for skillplot
//!
//! Chart geometry, styling, sampling and rating-model settings. Every field
//! has a default, so a TOML file only needs the values it overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::curve::CurveOptions;
use crate::error::validation;
use crate::model::VarianceMode;
use crate::render::{PointStyle, Rgb};
use skillplot_stats::DEFAULT_BETA;

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {message}", path.display())]
    Read { path: PathBuf, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    OutOfRange(String),
}

/// Margins around the plot area, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Margins {
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }
}

/// Canvas size and margins of one chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub width: f64,
    pub height: f64,
    pub margin: Margins,
}

impl Geometry {
    /// Pixel range of the x axis, left to right
    pub fn x_range(&self) -> (f64, f64) {
        (self.margin.left, self.width - self.margin.right)
    }

    /// Pixel range of the y axis, bottom to top
    pub fn y_range(&self) -> (f64, f64) {
        (self.height - self.margin.bottom, self.margin.top)
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        validation::validate_dimensions(self.width, self.height)
            .map_err(|e| ConfigError::OutOfRange(format!("{}: {}", name, e)))?;
        let m = &self.margin;
        if [m.top, m.bottom, m.left, m.right].iter().any(|v| !(*v >= 0.0)) {
            return Err(ConfigError::OutOfRange(format!(
                "{}: margins must be non-negative",
                name
            )));
        }
        let (x0, x1) = self.x_range();
        let (y0, y1) = self.y_range();
        if x1 <= x0 || y0 <= y1 {
            return Err(ConfigError::OutOfRange(format!(
                "{}: margins leave no plot area",
                name
            )));
        }
        Ok(())
    }
}

/// Scatter chart settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    /// Point radius in pixels
    pub radius: f64,
    pub fill: Rgb,
    pub fill_opacity: f64,
    pub highlight_fill: Rgb,
    pub highlight_opacity: f64,
    /// Outline drawn around the highlighted point
    pub highlight_stroke: Rgb,
    pub geometry: Geometry,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            geometry: Geometry {
                width: 800.0,
                height: 600.0,
                margin: Margins {
                    top: 20.0,
                    bottom: 40.0,
                    left: 40.0,
                    right: 20.0,
                },
            },
            radius: 4.0,
            fill: Rgb::BLACK,
            fill_opacity: 0.1,
            highlight_fill: Rgb::CORAL,
            highlight_opacity: 1.0,
            highlight_stroke: Rgb::BLACK,
        }
    }
}

impl ScatterConfig {
    pub fn default_style(&self) -> PointStyle {
        PointStyle {
            fill: self.fill,
            fill_opacity: self.fill_opacity,
            stroke: None,
        }
    }

    pub fn highlight_style(&self) -> PointStyle {
        PointStyle {
            fill: self.highlight_fill,
            fill_opacity: self.highlight_opacity,
            stroke: Some(self.highlight_stroke),
        }
    }
}

/// Density comparison chart settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityConfig {
    /// Sampling step in μ units
    pub resolution: f64,
    /// Half-width of each curve, in standard deviations
    pub tail_width: f64,
    /// Fixed y ceiling; derived from the data when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_max: Option<f64>,
    pub left_color: Rgb,
    pub right_color: Rgb,
    pub fill_opacity: f64,
    pub geometry: Geometry,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            geometry: Geometry {
                width: 800.0,
                height: 200.0,
                margin: Margins::uniform(20.0),
            },
            resolution: 0.1,
            tail_width: 4.0,
            density_max: None,
            left_color: Rgb::BLUE,
            right_color: Rgb::RED,
            fill_opacity: 0.35,
        }
    }
}

/// Rating model settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub variance_mode: VarianceMode,
    /// Performance noise used by the matchup predictor
    pub beta: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            variance_mode: VarianceMode::default(),
            beta: DEFAULT_BETA,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillplotConfig {
    pub scatter: ScatterConfig,
    pub density: DensityConfig,
    pub model: ModelConfig,
}

impl SkillplotConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read and validate a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// `<config dir>/skillplot/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skillplot").join("config.toml"))
    }

    /// Load from `path` if given, else the default location if it exists,
    /// else built-in defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(default) if default.exists() => {
                tracing::debug!("Loading config from {:?}", default);
                Self::from_file(&default)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Sampling options for density curves
    pub fn curve_options(&self) -> CurveOptions {
        CurveOptions {
            resolution: self.density.resolution,
            tail_width: self.density.tail_width,
            variance_mode: self.model.variance_mode,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scatter.geometry.validate("scatter")?;
        self.density.geometry.validate("density")?;

        if !(self.scatter.radius > 0.0 && self.scatter.radius.is_finite()) {
            return Err(ConfigError::OutOfRange(
                "scatter.radius must be positive".to_string(),
            ));
        }

        for (name, value) in [
            ("scatter.fill_opacity", self.scatter.fill_opacity),
            ("scatter.highlight_opacity", self.scatter.highlight_opacity),
            ("density.fill_opacity", self.density.fill_opacity),
        ] {
            if !validation::validate_unit_interval(value) {
                return Err(ConfigError::OutOfRange(format!(
                    "{} must be between 0.0 and 1.0",
                    name
                )));
            }
        }

        for (name, value) in [
            ("density.resolution", self.density.resolution),
            ("density.tail_width", self.density.tail_width),
            ("model.beta", self.model.beta),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::OutOfRange(format!("{} must be positive", name)));
            }
        }

        if let Some(max) = self.density.density_max {
            if !(max > 0.0 && max.is_finite()) {
                return Err(ConfigError::OutOfRange(
                    "density.density_max must be positive".to_string(),
                ));
            }
        }

        Ok(())
    }
}
