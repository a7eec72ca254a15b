//! Error handling for Wirecut
//!
//! Provides error types for every failure class of the pipeline:
//! - Input errors (caller bugs: nothing to optimize, dangling references)
//! - Configuration errors (out-of-range settings rejected up front)
//! - Geometry warnings (recoverable, the offending contour is skipped)
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::ContourId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Input error type
///
/// Surfaced to the caller immediately; the pipeline returns no result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// No contours were supplied
    #[error("nothing to optimize")]
    NoContours,

    /// A reference names a contour that is not part of the job
    #[error("Unknown contour: {id}")]
    UnknownContour {
        /// The identifier that could not be resolved.
        id: ContourId,
    },

    /// Two contours share the same identifier
    #[error("Duplicate contour identifier: {id}")]
    DuplicateContour {
        /// The repeated identifier.
        id: ContourId,
    },
}

/// Configuration error type
///
/// Raised at the boundary, before any pipeline stage runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A numeric value is outside its valid range
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        /// The parameter name.
        name: String,
        /// The rejected value.
        value: f64,
        /// Smallest accepted value.
        min: f64,
        /// Largest accepted value.
        max: f64,
    },

    /// A value is invalid for a reason other than its range
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue {
        /// The parameter name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The configuration file format is not supported
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

impl ConfigError {
    pub fn out_of_range(name: &str, value: f64, min: f64, max: f64) -> Self {
        ConfigError::OutOfRange {
            name: name.to_string(),
            value,
            min,
            max,
        }
    }

    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Main error type for Wirecut
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Input error
    #[error(transparent)]
    Input(#[from] InputError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an input error
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::Input(_))
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Why a contour was skipped or altered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningKind {
    /// The contour has fewer than two distinct vertices, and so no length.
    NoSegments,
    /// The contour could not produce a point at a non-finite parameter.
    InvalidParameter { t: f64 },
    /// No entry/exit pair was supplied for the contour.
    MissingEntryExit,
    /// Flagged as a hole but enclosed by nothing; treated as an outer.
    DemotedHole,
}

/// A recoverable geometry problem attached to one contour.
///
/// Reported through `tracing` and collected on the pipeline result; never
/// aborts a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryWarning {
    pub contour_id: ContourId,
    #[serde(flatten)]
    pub kind: WarningKind,
}

impl GeometryWarning {
    pub fn new(contour_id: impl Into<ContourId>, kind: WarningKind) -> Self {
        Self {
            contour_id: contour_id.into(),
            kind,
        }
    }
}

impl fmt::Display for GeometryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::NoSegments => {
                write!(f, "contour {} has no segments (zero length)", self.contour_id)
            }
            WarningKind::InvalidParameter { t } => write!(
                f,
                "contour {} cannot produce a point at t={:.3}",
                self.contour_id, t
            ),
            WarningKind::MissingEntryExit => {
                write!(f, "no entry/exit found for contour {}", self.contour_id)
            }
            WarningKind::DemotedHole => write!(
                f,
                "contour {} is flagged as a hole but has no enclosing boundary",
                self.contour_id
            ),
        }
    }
}
