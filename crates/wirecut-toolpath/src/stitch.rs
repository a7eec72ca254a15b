//! Polyline stitching
//!
//! Walks the ordered contours and joins rapid transitions and sampled arcs
//! into one continuous point sequence starting at the home position.

use crate::contour::Contour;
use crate::entry_exit::EntryExit;
use std::collections::HashMap;
use tracing::{debug, warn};
use wirecut_core::{ContourId, GeometryWarning, Point, WarningKind};

/// Gap above which a rapid transition is inserted before a contour.
pub const TRANSITION_EPSILON: f64 = 0.01;
/// Minimum samples per contour regardless of step.
pub const MIN_CONTOUR_SAMPLES: usize = 50;
/// Upper bound on samples per contour.
pub const MAX_CONTOUR_SAMPLES: usize = 1_000_000;

const DUPLICATE_EPSILON: f64 = 1e-9;

/// Output of [`stitch`].
#[derive(Debug, Clone, Default)]
pub struct Stitched {
    pub points: Vec<Point>,
    /// Indices into `points` reached by a rapid (non-cutting) move.
    pub rapid_indices: Vec<usize>,
    pub warnings: Vec<GeometryWarning>,
    /// Ids of the contours actually traced, in order.
    pub traced: Vec<ContourId>,
}

impl Stitched {
    /// Length of the rapid segments only.
    pub fn travel_length(&self) -> f64 {
        self.rapid_indices
            .iter()
            .filter(|&&i| i > 0)
            .map(|&i| self.points[i - 1].distance_to(&self.points[i]))
            .sum()
    }

    fn push(&mut self, p: Point, tolerance: f64) {
        if self
            .points
            .last()
            .map_or(true, |last| last.distance_to(&p) > tolerance)
        {
            self.points.push(p);
        }
    }

    fn skip(&mut self, contour_id: &str, kind: WarningKind) {
        let warning = GeometryWarning::new(contour_id, kind);
        warn!("Skipping contour: {}", warning);
        self.warnings.push(warning);
    }
}

/// Sum of Euclidean distances between consecutive points.
pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

/// Samples per contour for a given step: `max(50, ceil(length / step))`,
/// capped at [`MAX_CONTOUR_SAMPLES`].
pub fn sample_count(length: f64, step: f64) -> usize {
    let by_step = if step > 0.0 && length.is_finite() {
        (length / step).ceil() as usize
    } else {
        0
    };
    by_step.clamp(MIN_CONTOUR_SAMPLES, MAX_CONTOUR_SAMPLES)
}

/// Parameters visited tracing a contour from `entry_t` to `exit_t`.
///
/// Closed contours always travel forward, wrapping through `t = 1`; equal
/// entry and exit is one full revolution. Open contours never wrap: they run
/// to `exit_t` when it lies ahead of `entry_t`, else to the curve end.
pub fn trace_parameters(closed: bool, entry_t: f64, exit_t: f64, samples: usize) -> Vec<f64> {
    let n = samples.max(1);
    if closed {
        let mut span = (exit_t - entry_t).rem_euclid(1.0);
        if span <= DUPLICATE_EPSILON {
            span = 1.0;
        }
        (0..=n)
            .map(|i| {
                let t = entry_t + span * i as f64 / n as f64;
                if t > 1.0 {
                    t - 1.0
                } else {
                    t
                }
            })
            .collect()
    } else {
        let end = if exit_t > entry_t { exit_t } else { 1.0 };
        (0..=n)
            .map(|i| entry_t + (end - entry_t) * i as f64 / n as f64)
            .collect()
    }
}

/// Stitches ordered contours into one polyline starting at `origin`.
///
/// Contours without geometry or without a matching entry/exit are skipped
/// with a warning; the rest of the job proceeds.
pub fn stitch(
    ordered: &[&Contour],
    entry_exits: &[EntryExit],
    step: f64,
    origin: Point,
) -> Stitched {
    let by_id: HashMap<&str, &EntryExit> = entry_exits
        .iter()
        .map(|ee| (ee.contour_id.as_str(), ee))
        .collect();

    let mut out = Stitched {
        points: vec![origin],
        ..Default::default()
    };

    for contour in ordered {
        if contour.is_degenerate() {
            out.skip(&contour.id, WarningKind::NoSegments);
            continue;
        }
        let Some(ee) = by_id.get(contour.id.as_str()) else {
            out.skip(&contour.id, WarningKind::MissingEntryExit);
            continue;
        };
        let Some(entry) = contour.point_at(ee.entry_t) else {
            out.skip(&contour.id, WarningKind::InvalidParameter { t: ee.entry_t });
            continue;
        };
        if !ee.exit_t.is_finite() {
            out.skip(&contour.id, WarningKind::InvalidParameter { t: ee.exit_t });
            continue;
        }

        let last = out.points.last().copied().unwrap_or(origin);
        if last.distance_to(&entry) > TRANSITION_EPSILON {
            out.rapid_indices.push(out.points.len());
            out.points.push(entry);
        }

        let n = sample_count(contour.length(), step);
        let params = trace_parameters(contour.is_closed(), ee.entry_t, ee.exit_t, n);
        for (i, t) in params.into_iter().enumerate() {
            let Some(p) = contour.point_at(t) else {
                continue;
            };
            let tolerance = if i == 0 {
                TRANSITION_EPSILON
            } else {
                DUPLICATE_EPSILON
            };
            out.push(p, tolerance);
        }

        debug!(
            "Traced contour {} with {} samples from t={:.3} to t={:.3}",
            contour.id, n, ee.entry_t, ee.exit_t
        );
        out.traced.push(contour.id.clone());
    }
    out
}
