//! # Wirecut
//!
//! Toolpath optimizer and G-code generator for hot-wire foam cutting CNC
//! machines.
//!
//! ## Architecture
//!
//! Wirecut is organized as a workspace with multiple crates:
//!
//! 1. **wirecut-core** - Points, units, errors, configuration
//! 2. **wirecut-toolpath** - Island grouping, sequencing, entry/exit
//!    selection, polyline stitching, tapered synchronization
//! 3. **wirecut-gcode** - 2-axis and 4-axis program emission
//! 4. **wirecut** - Job files, command-line interface and logging
//!
//! The pipeline is a pure function of its inputs: every run takes a snapshot
//! of contours plus settings and returns a fresh [`OptimizedPath`].

pub mod commands;
pub mod job;

pub use wirecut_core::{
    AxisNames, Config, ConfigError, EntryStrategy, Error, GeometryWarning, InputError,
    MachineSettings, OptimizerSettings, Point, Point4, Result, TaperedSettings, Units,
    WarningKind,
};

pub use wirecut_toolpath::{
    group_into_islands, run_full_optimization, sync_tapered_contours, sync_tapered_paths, Contour,
    EntryExit, EntryExitOverride, Island, OptimizedPath, Overrides, PathOptimizer, Sequencer,
    TaperedPath,
};

pub use wirecut_gcode::{GcodeEmitter, GcodeStats};

pub use job::{ContourSpec, JobFile, ProfileFile};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, keeping stdout free for generated programs
/// - RUST_LOG environment variable support (INFO by default)
/// - JSON lines instead of human-readable text when `json` is set
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    if json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_current_span(false);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
