//! # Wirecut G-code
//!
//! Serializes stitched toolpaths into machine programs:
//! - 2-axis output from a point list or an [`wirecut_toolpath::OptimizedPath`]
//! - 4-axis output from synchronized root/tip samples
//! - Summary statistics over generated text

pub mod emitter;
pub mod stats;

pub use emitter::{emit, emit4, GcodeEmitter};
pub use stats::GcodeStats;
