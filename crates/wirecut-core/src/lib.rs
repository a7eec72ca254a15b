//! # Wirecut Core
//!
//! Core types, units, errors and configuration shared by the Wirecut crates.
//! Provides the fundamental value types that flow through the toolpath
//! pipeline (points in drawing space, 4-axis samples, bounding boxes) and the
//! settings that parameterise it.

pub mod config;
pub mod error;
pub mod geometry;
pub mod units;

pub use config::{AxisNames, Config, EntryStrategy, MachineSettings, OptimizerSettings, TaperedSettings};
pub use error::{ConfigError, Error, GeometryWarning, InputError, Result, WarningKind};
pub use geometry::{Bounds, Point, Point4};
pub use units::Units;

/// Identifier of a contour, stable across pipeline invocations.
pub type ContourId = String;

/// Identifier of an island produced by the grouper.
pub type IslandId = String;
