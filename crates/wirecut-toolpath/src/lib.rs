//! # Wirecut Toolpath
//!
//! Toolpath optimization for hot-wire foam cutting.
//!
//! The pipeline runs leaves first:
//! - [`contour`]: arc-length parameterized curves
//! - [`islands`]: outer/hole grouping by containment parity
//! - [`sequence`]: nearest-neighbour plus 2-opt ordering with a crossing penalty
//! - [`entry_exit`]: per-contour start/end parameters with overrides
//! - [`stitch`]: one continuous polyline from the home position
//! - [`tapered`]: arc-length synchronized root/tip profiles for 4-axis work
//! - [`pipeline`]: the whole chain behind [`PathOptimizer`]

pub mod contour;
pub mod entry_exit;
pub mod islands;
pub mod pipeline;
pub mod sequence;
pub mod stitch;
pub mod tapered;

pub use contour::{contours_from_lyon_path, Contour, CurveGeometry};
pub use entry_exit::{select, select_with_hints, EntryExit, EntryExitOverride, Overrides};
pub use islands::{group_into_islands, Island, IslandGrouping};
pub use pipeline::{run_full_optimization, OptimizedPath, PathOptimizer};
pub use sequence::{SequenceStep, Sequencer};
pub use stitch::{polyline_length, stitch, Stitched};
pub use tapered::{sync_tapered_contours, sync_tapered_paths, TaperedPath};
