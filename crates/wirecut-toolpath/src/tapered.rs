//! Tapered (4-axis) synchronization
//!
//! Root and tip profiles are cut by the same wire at the same time, so they
//! must progress in lock-step by arc length. Both polylines are resampled at
//! `samples + 1` shared normalized parameters and paired into [`Point4`]s.

use crate::contour::Contour;
use crate::stitch::polyline_length;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wirecut_core::{Point, Point4};

/// A synchronized 4-axis path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaperedPath {
    pub polyline4: Vec<Point4>,
    pub root_length: f64,
    pub tip_length: f64,
}

impl TaperedPath {
    pub fn is_empty(&self) -> bool {
        self.polyline4.is_empty()
    }

    pub fn len(&self) -> usize {
        self.polyline4.len()
    }
}

/// Point at normalized arc-length fraction `t`; `t <= 0` and `t >= 1` clamp
/// to the end vertices.
fn point_at_fraction(path: &[Point], total: f64, t: f64) -> Point {
    let first = path[0];
    let last = path[path.len() - 1];
    if t <= 0.0 || total <= 0.0 {
        return first;
    }
    if t >= 1.0 {
        return last;
    }

    let target = total * t;
    let mut walked = 0.0;
    for pair in path.windows(2) {
        let seg = pair[0].distance_to(&pair[1]);
        if seg > 0.0 && walked + seg >= target {
            return pair[0].lerp(&pair[1], (target - walked) / seg);
        }
        walked += seg;
    }
    last
}

/// Resamples `root` and `tip` at `samples + 1` shared parameters.
///
/// Returns an empty path when either side has fewer than two points.
pub fn sync_tapered_paths(root: &[Point], tip: &[Point], samples: usize) -> TaperedPath {
    if root.len() < 2 || tip.len() < 2 {
        warn!(
            "Tapered sync needs two points per side (root {}, tip {})",
            root.len(),
            tip.len()
        );
        return TaperedPath::default();
    }

    let samples = samples.max(1);
    let root_length = polyline_length(root);
    let tip_length = polyline_length(tip);

    let polyline4 = (0..=samples)
        .map(|i| {
            let t = i as f64 / samples as f64;
            Point4::from_pair(
                point_at_fraction(root, root_length, t),
                point_at_fraction(tip, tip_length, t),
            )
        })
        .collect();

    debug!(
        "Synchronized root ({:.3}) and tip ({:.3}) at {} samples",
        root_length, tip_length, samples
    );
    TaperedPath {
        polyline4,
        root_length,
        tip_length,
    }
}

/// Synchronizes two contours, each traced from its own entry parameter.
pub fn sync_tapered_contours(
    root: &Contour,
    root_entry_t: f64,
    tip: &Contour,
    tip_entry_t: f64,
    samples: usize,
) -> TaperedPath {
    sync_tapered_paths(
        &root.traverse_from(root_entry_t),
        &tip.traverse_from(tip_entry_t),
        samples,
    )
}
