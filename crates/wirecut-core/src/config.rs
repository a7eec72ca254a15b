//! Configuration for the toolpath pipeline and code emitter
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats, selected by file extension.
//!
//! Configuration is organized into logical sections:
//! - Optimizer settings (sampling step, sequencing resolution, crossing penalty)
//! - Machine settings (units, feed rate, origin offset, scale, axis letters)
//! - Tapered settings (synchronization resolution for 4-axis work)

use crate::error::{ConfigError, Result};
use crate::geometry::Point;
use crate::units::Units;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Smallest accepted `samples_per_contour`.
pub const MIN_SAMPLES_PER_CONTOUR: usize = 4;
/// Largest accepted `samples_per_contour`.
pub const MAX_SAMPLES_PER_CONTOUR: usize = 256;
/// Smallest accepted sampling step, in drawing units.
pub const MIN_STEP: f64 = 1e-3;

/// How a contour's default entry parameter is chosen when no override exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStrategy {
    /// Enter at the curve's canonical origin (`t = 0`).
    #[default]
    Origin,
    /// Enter at the sampled boundary point the sequencer found nearest.
    Nearest,
}

impl std::fmt::Display for EntryStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Origin => write!(f, "origin"),
            Self::Nearest => write!(f, "nearest"),
        }
    }
}

/// Sequencing and sampling settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerSettings {
    /// Machine home / safe-start position in drawing space
    pub origin: Point,
    /// Sampling step for the stitched polyline (drawing units)
    pub step: f64,
    /// Boundary samples per contour used for travel estimation
    pub samples_per_contour: usize,
    /// Travel cost multiplier for rapids crossing already-cut contours
    pub crossing_penalty_weight: f64,
    /// Upper bound on 2-opt candidate evaluations per sequencing level
    pub max_2opt_evaluations: usize,
    /// Default entry selection
    pub entry_strategy: EntryStrategy,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            origin: Point::new(0.0, 0.0),
            step: 1.0,
            samples_per_contour: 32,
            crossing_penalty_weight: 1.0,
            max_2opt_evaluations: 2000,
            entry_strategy: EntryStrategy::Origin,
        }
    }
}

impl OptimizerSettings {
    /// Sampling resolution clamped to the supported range.
    pub fn samples(&self) -> usize {
        self.samples_per_contour
            .clamp(MIN_SAMPLES_PER_CONTOUR, MAX_SAMPLES_PER_CONTOUR)
    }

    /// Sets the crossing penalty weight.
    pub fn with_crossing_penalty(mut self, weight: f64) -> Self {
        self.crossing_penalty_weight = weight;
        self
    }

    /// Sets the sampling step.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Sets the home position.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Sets the entry strategy.
    pub fn with_entry_strategy(mut self, strategy: EntryStrategy) -> Self {
        self.entry_strategy = strategy;
        self
    }

    /// Sets the 2-opt evaluation budget (0 disables local improvement).
    pub fn with_max_2opt_evaluations(mut self, evaluations: usize) -> Self {
        self.max_2opt_evaluations = evaluations;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !self.origin.is_finite() {
            return Err(ConfigError::invalid("origin", "must be finite"));
        }
        if !self.step.is_finite() || self.step < MIN_STEP {
            return Err(ConfigError::out_of_range("step", self.step, MIN_STEP, f64::MAX));
        }
        if !self.crossing_penalty_weight.is_finite() || self.crossing_penalty_weight < 1.0 {
            return Err(ConfigError::out_of_range(
                "crossing_penalty_weight",
                self.crossing_penalty_weight,
                1.0,
                f64::MAX,
            ));
        }
        Ok(())
    }
}

/// Axis letters used by 4-axis output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisNames {
    pub x: String,
    pub y: String,
    pub u: String,
    pub v: String,
}

impl Default for AxisNames {
    fn default() -> Self {
        Self {
            x: "X".to_string(),
            y: "Y".to_string(),
            u: "U".to_string(),
            v: "V".to_string(),
        }
    }
}

impl AxisNames {
    pub fn new(x: &str, y: &str, u: &str, v: &str) -> Self {
        Self {
            x: x.to_string(),
            y: y.to_string(),
            u: u.to_string(),
            v: v.to_string(),
        }
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        let names = [&self.x, &self.y, &self.u, &self.v];
        for name in names {
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(ConfigError::invalid(
                    "axis_names",
                    format!("'{}' is not an axis letter", name),
                ));
            }
        }
        for (i, a) in names.iter().enumerate() {
            if names[i + 1..].iter().any(|b| b.eq_ignore_ascii_case(a)) {
                return Err(ConfigError::invalid(
                    "axis_names",
                    format!("axis '{}' is used twice", a),
                ));
            }
        }
        Ok(())
    }
}

/// Machine preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineSettings {
    /// Unit system declared in the program header
    pub units: Units,
    /// Cutting feed rate (machine units/min)
    pub feed_rate: f64,
    /// Multiplier applied after the origin offset
    pub scale: f64,
    /// Drawing-space point mapped to machine zero
    pub origin: Point,
    /// Axis letters for 4-axis output
    pub axis_names: AxisNames,
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self {
            units: Units::MM,
            feed_rate: 1500.0,
            scale: 1.0,
            origin: Point::new(0.0, 0.0),
            axis_names: AxisNames::default(),
        }
    }
}

impl MachineSettings {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !self.feed_rate.is_finite() || self.feed_rate <= 0.0 {
            return Err(ConfigError::out_of_range(
                "feed_rate",
                self.feed_rate,
                0.0,
                f64::MAX,
            ));
        }
        if !self.scale.is_finite() || self.scale == 0.0 {
            return Err(ConfigError::invalid(
                "scale",
                format!("must be finite and non-zero, got {}", self.scale),
            ));
        }
        if !self.origin.is_finite() {
            return Err(ConfigError::invalid("origin", "must be finite"));
        }
        self.axis_names.validate()
    }
}

/// Tapered (4-axis) synchronization settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaperedSettings {
    /// Number of intervals; `samples + 1` synchronized points are produced
    pub samples: usize,
}

impl Default for TaperedSettings {
    fn default() -> Self {
        Self { samples: 100 }
    }
}

/// Complete job configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sequencing and sampling
    pub optimizer: OptimizerSettings,
    /// Output program parameters
    pub machine: MachineSettings,
    /// 4-axis synchronization
    pub tapered: TaperedSettings,
}

impl Config {
    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Format::from_path(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let content = self.to_string_for(Format::from_path(path)?)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        self.to_string_for(Format::Toml)
    }

    fn to_string_for(&self, format: Format) -> Result<String> {
        Ok(match format {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.optimizer.validate()?;
        self.machine.validate()?;
        if self.tapered.samples == 0 {
            return Err(ConfigError::out_of_range("tapered.samples", 0.0, 1.0, f64::MAX).into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> std::result::Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            _ => Err(ConfigError::UnsupportedFormat(format!(
                "{} (config file must be .json or .toml)",
                path.display()
            ))),
        }
    }
}
