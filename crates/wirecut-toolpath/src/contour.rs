//! Contour model: an immutable planar curve with arc-length sampling.
//!
//! Geometry is stored as a flattened vertex list with a cumulative arc-length
//! table, so `point_at(t)` maps `t` to a fraction of the curve's length rather
//! than to a vertex index. Short, vertex-dense stretches therefore receive the
//! same sample density as long straight edges.

use cavalier_contours::core::math::Vector2;
use cavalier_contours::polyline::{PlineSource, PlineSourceMut, PlineVertex, Polyline};
use lyon::path::iterator::*;
use lyon::path::{Event, Path};
use std::f64::consts::PI;
use std::sync::Arc;
use wirecut_core::{Bounds, ContourId, IslandId, Point};

/// Vertices closer than this are merged when building geometry.
const VERTEX_MERGE_EPSILON: f64 = 1e-9;
/// Chord count bounds for [`Contour::circle`].
const MIN_CIRCLE_SEGMENTS: usize = 16;
const MAX_CIRCLE_SEGMENTS: usize = 4096;

/// Flattened curve geometry shared between contour copies.
#[derive(Debug, Clone)]
pub struct CurveGeometry {
    vertices: Vec<Point>,
    /// Arc length at each vertex; closed curves carry one extra entry for the
    /// closing segment back to vertex 0.
    cumulative: Vec<f64>,
    closed: bool,
    bounds: Option<Bounds>,
    pline: Polyline<f64>,
}

impl CurveGeometry {
    pub fn new(points: &[Point], closed: bool) -> Self {
        let mut vertices: Vec<Point> = Vec::with_capacity(points.len());
        for p in points {
            match vertices.last() {
                Some(last) if last.distance_to(p) < VERTEX_MERGE_EPSILON => {}
                _ => vertices.push(*p),
            }
        }
        if closed && vertices.len() > 1 {
            let first = vertices[0];
            if let Some(last) = vertices.last() {
                if last.distance_to(&first) < VERTEX_MERGE_EPSILON {
                    vertices.pop();
                }
            }
        }

        let mut cumulative = Vec::with_capacity(vertices.len() + 1);
        let mut acc = 0.0;
        if !vertices.is_empty() {
            cumulative.push(0.0);
            for pair in vertices.windows(2) {
                acc += pair[0].distance_to(&pair[1]);
                cumulative.push(acc);
            }
            if closed && vertices.len() > 1 {
                acc += vertices[vertices.len() - 1].distance_to(&vertices[0]);
                cumulative.push(acc);
            }
        }

        let mut pline = Polyline::new();
        for p in &vertices {
            pline.add_vertex(PlineVertex::new(p.x, p.y, 0.0));
        }
        pline.set_is_closed(closed);

        Self {
            bounds: Bounds::from_points(&vertices),
            vertices,
            cumulative,
            closed,
            pline,
        }
    }

    pub fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    fn segment_count(&self) -> usize {
        self.cumulative.len().saturating_sub(1)
    }

    fn vertex(&self, index: usize) -> Point {
        self.vertices[index % self.vertices.len()]
    }

    /// Segment index and ratio along it for an arc-length distance.
    fn locate(&self, distance: f64) -> (usize, f64) {
        let segments = self.segment_count();
        let upper = self.cumulative.partition_point(|&d| d <= distance);
        let seg = upper.saturating_sub(1).min(segments - 1);
        let seg_len = self.cumulative[seg + 1] - self.cumulative[seg];
        let ratio = if seg_len > 0.0 {
            ((distance - self.cumulative[seg]) / seg_len).clamp(0.0, 1.0)
        } else {
            1.0
        };
        (seg, ratio)
    }

    fn point_at(&self, t: f64) -> Option<Point> {
        if !t.is_finite() || self.segment_count() == 0 || self.length() <= 0.0 {
            return None;
        }
        let (seg, ratio) = self.locate(t.clamp(0.0, 1.0) * self.length());
        Some(self.vertex(seg).lerp(&self.vertex(seg + 1), ratio))
    }
}

/// A contour to be cut.
///
/// Cloning is cheap: the geometry is reference counted. Topology fields
/// (`hole`, `parent_id`, `island_id`) are filled in by the island grouper.
#[derive(Debug, Clone)]
pub struct Contour {
    pub id: ContourId,
    geometry: Arc<CurveGeometry>,
    /// Whether this contour is a hole inside an island's outer boundary
    pub hole: bool,
    /// The outer boundary enclosing this hole
    pub parent_id: Option<ContourId>,
    /// Island this contour belongs to
    pub island_id: Option<IslandId>,
}

impl Contour {
    /// Creates a contour from its vertices.
    pub fn from_points(id: impl Into<ContourId>, points: &[Point], closed: bool) -> Self {
        Self {
            id: id.into(),
            geometry: Arc::new(CurveGeometry::new(points, closed)),
            hole: false,
            parent_id: None,
            island_id: None,
        }
    }

    /// Creates a contour from the first sub-path of a lyon path, flattening
    /// curves to within `tolerance`.
    pub fn from_lyon_path(id: impl Into<ContourId>, path: &Path, tolerance: f32) -> Option<Self> {
        let id = id.into();
        flatten_subpaths(path, tolerance)
            .into_iter()
            .next()
            .map(|(points, closed)| Contour::from_points(id, &points, closed))
    }

    /// Creates a closed polygonal circle whose chords deviate from the true
    /// circle by at most `tolerance`, within 16 to 4096 chords.
    pub fn circle(id: impl Into<ContourId>, center: Point, radius: f64, tolerance: f64) -> Self {
        let segments = if radius > tolerance && tolerance > 0.0 {
            (PI / (1.0 - tolerance / radius).acos()).ceil() as usize
        } else {
            MIN_CIRCLE_SEGMENTS
        }
        .clamp(MIN_CIRCLE_SEGMENTS, MAX_CIRCLE_SEGMENTS);

        let points: Vec<Point> = (0..segments)
            .map(|i| {
                let angle = 2.0 * PI * i as f64 / segments as f64;
                Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            })
            .collect();
        Contour::from_points(id, &points, true)
    }

    /// Marks the contour as an explicit hole.
    pub fn with_hole(mut self, hole: bool) -> Self {
        self.hole = hole;
        self
    }

    pub fn is_closed(&self) -> bool {
        self.geometry.closed
    }

    /// Total arc length, including the closing segment of closed contours.
    pub fn length(&self) -> f64 {
        self.geometry.length()
    }

    pub fn vertices(&self) -> &[Point] {
        &self.geometry.vertices
    }

    pub fn segment_count(&self) -> usize {
        self.geometry.segment_count()
    }

    /// Straight segments between consecutive vertices, including the closing
    /// segment of a closed contour.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let geometry = &self.geometry;
        (0..geometry.segment_count()).map(move |i| (geometry.vertex(i), geometry.vertex(i + 1)))
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.geometry.bounds
    }

    /// Signed area; positive for counter-clockwise winding, zero for open
    /// contours.
    pub fn signed_area(&self) -> f64 {
        if self.is_closed() && self.geometry.vertices.len() > 2 {
            self.geometry.pline.area()
        } else {
            0.0
        }
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// True when the contour cannot be sampled.
    pub fn is_degenerate(&self) -> bool {
        self.segment_count() == 0 || self.length() <= 0.0
    }

    /// Point at arc-length-normalized parameter `t` (clamped to `0..=1`).
    pub fn point_at(&self, t: f64) -> Option<Point> {
        self.geometry.point_at(t)
    }

    /// True when `p` lies inside this closed contour (non-zero winding).
    pub fn contains_point(&self, p: Point) -> bool {
        if !self.is_closed() || self.geometry.vertices.len() < 3 {
            return false;
        }
        self.geometry.pline.winding_number(Vector2::new(p.x, p.y)) != 0
    }

    /// Evenly spaced `(t, point)` samples. Closed contours omit `t = 1`,
    /// which repeats `t = 0`; open contours include both ends.
    pub fn sample(&self, count: usize) -> Vec<(f64, Point)> {
        if self.is_degenerate() || count == 0 {
            return Vec::new();
        }
        let last = if self.is_closed() { count - 1 } else { count };
        (0..=last)
            .filter_map(|k| {
                let t = k as f64 / count as f64;
                self.point_at(t).map(|p| (t, p))
            })
            .collect()
    }

    /// Parameter of the sample nearest to `p`, ties going to the smaller `t`.
    pub fn closest_parameter(&self, p: Point, samples: usize) -> Option<f64> {
        let mut best: Option<(f64, f64)> = None;
        for (t, q) in self.sample(samples) {
            let d = p.distance_to(&q);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((t, d));
            }
        }
        best.map(|(t, _)| t)
    }

    /// The contour's exact geometry as a polyline starting at parameter `t`.
    ///
    /// Closed contours run one full revolution and end back at the start
    /// point; open contours run from `t` to their last vertex.
    pub fn traverse_from(&self, t: f64) -> Vec<Point> {
        let Some(start) = self.point_at(t) else {
            return Vec::new();
        };
        let geometry = &self.geometry;
        let (seg, _) = geometry.locate(t.clamp(0.0, 1.0) * geometry.length());

        let mut points = vec![start];
        let mut push = |p: Point| {
            if points
                .last()
                .map_or(true, |last| last.distance_to(&p) > VERTEX_MERGE_EPSILON)
            {
                points.push(p);
            }
        };

        if self.is_closed() {
            let n = geometry.vertices.len();
            for k in 1..=n {
                push(geometry.vertex(seg + k));
            }
            push(start);
        } else {
            for k in seg + 1..geometry.vertices.len() {
                push(geometry.vertices[k]);
            }
        }
        points
    }
}

/// Splits a lyon path into one contour per sub-path, ids suffixed `-<n>`.
pub fn contours_from_lyon_path(prefix: &str, path: &Path, tolerance: f32) -> Vec<Contour> {
    flatten_subpaths(path, tolerance)
        .into_iter()
        .enumerate()
        .map(|(i, (points, closed))| Contour::from_points(format!("{}-{}", prefix, i), &points, closed))
        .collect()
}

fn flatten_subpaths(path: &Path, tolerance: f32) -> Vec<(Vec<Point>, bool)> {
    let mut subpaths = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    for event in path.iter().flattened(tolerance) {
        match event {
            Event::Begin { at } => {
                current.clear();
                current.push(Point::new(at.x as f64, at.y as f64));
            }
            Event::Line { to, .. } => {
                current.push(Point::new(to.x as f64, to.y as f64));
            }
            Event::End { close, .. } => {
                if !current.is_empty() {
                    subpaths.push((std::mem::take(&mut current), close));
                }
            }
            _ => {}
        }
    }
    subpaths
}
