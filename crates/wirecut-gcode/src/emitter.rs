//! G-code emission from stitched polylines.
//!
//! Output layout, one command per line:
//!
//! ```text
//! G21            units (G20 for inches)
//! G90            absolute positioning
//! G0 X.. Y..     rapid to the first point
//! G1 F1500.0     feed rate
//! G1 X.. Y..     one linear move per remaining point
//! M2             program end
//! ```
//!
//! Every coordinate is mapped as `(value - origin) * scale` and written with
//! three decimals; the feed rate uses one. Lines are joined with `\n` and
//! there is no trailing newline. An empty point list produces empty text.

use tracing::debug;
use wirecut_core::{AxisNames, MachineSettings, Point, Point4, Units};
use wirecut_toolpath::OptimizedPath;

/// Absolute positioning mode.
const ABSOLUTE: &str = "G90";
const RAPID: &str = "G0";
const LINEAR: &str = "G1";
const PROGRAM_END: &str = "M2";

/// Formats a coordinate with three decimals, folding negative zero.
fn coord(value: f64) -> String {
    let text = format!("{:.3}", value);
    if text == "-0.000" {
        "0.000".to_string()
    } else {
        text
    }
}

/// G-code emitter for 2-axis and 4-axis hot-wire programs.
#[derive(Debug, Clone, PartialEq)]
pub struct GcodeEmitter {
    feed_rate: f64,
    units: Units,
    origin: Point,
    scale: f64,
    axis_names: AxisNames,
}

impl GcodeEmitter {
    /// Creates an emitter with no offset, unit scale and X/Y/U/V axes.
    pub fn new(feed_rate: f64, units: Units) -> Self {
        Self {
            feed_rate,
            units,
            origin: Point::default(),
            scale: 1.0,
            axis_names: AxisNames::default(),
        }
    }

    /// Creates an emitter from machine settings.
    pub fn from_settings(settings: &MachineSettings) -> Self {
        Self {
            feed_rate: settings.feed_rate,
            units: settings.units,
            origin: settings.origin,
            scale: settings.scale,
            axis_names: settings.axis_names.clone(),
        }
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_axis_names(mut self, axis_names: AxisNames) -> Self {
        self.axis_names = axis_names;
        self
    }

    fn map_x(&self, x: f64) -> f64 {
        (x - self.origin.x) * self.scale
    }

    fn map_y(&self, y: f64) -> f64 {
        (y - self.origin.y) * self.scale
    }

    fn xy(&self, p: &Point) -> String {
        format!("X{} Y{}", coord(self.map_x(p.x)), coord(self.map_y(p.y)))
    }

    fn xyuv(&self, p: &Point4) -> String {
        let axes = &self.axis_names;
        format!(
            "{}{} {}{} {}{} {}{}",
            axes.x,
            coord(self.map_x(p.x)),
            axes.y,
            coord(self.map_y(p.y)),
            axes.u,
            coord(self.map_x(p.u)),
            axes.v,
            coord(self.map_y(p.v)),
        )
    }

    fn header(&self, first_move: String) -> Vec<String> {
        vec![
            self.units.gcode_word().to_string(),
            ABSOLUTE.to_string(),
            format!("{} {}", RAPID, first_move),
            format!("{} F{:.1}", LINEAR, self.feed_rate),
        ]
    }

    /// Emits a 2-axis program: a rapid to the first point, then linear moves.
    pub fn emit(&self, points: &[Point]) -> String {
        let Some(first) = points.first() else {
            return String::new();
        };
        let mut lines = self.header(self.xy(first));
        lines.extend(
            points[1..]
                .iter()
                .map(|p| format!("{} {}", LINEAR, self.xy(p))),
        );
        lines.push(PROGRAM_END.to_string());
        debug!("Emitted {} lines for {} points", lines.len(), points.len());
        lines.join("\n")
    }

    /// Emits an optimized path, writing its rapid transitions as `G0`.
    pub fn emit_path(&self, path: &OptimizedPath) -> String {
        let Some(first) = path.polyline.first() else {
            return String::new();
        };
        let mut lines = self.header(self.xy(first));
        for (i, p) in path.polyline.iter().enumerate().skip(1) {
            let word = if path.is_rapid(i) { RAPID } else { LINEAR };
            lines.push(format!("{} {}", word, self.xy(p)));
        }
        lines.push(PROGRAM_END.to_string());
        debug!(
            "Emitted {} lines for {} points ({} rapids)",
            lines.len(),
            path.polyline.len(),
            path.rapid_indices.len()
        );
        lines.join("\n")
    }

    /// Emits a 4-axis program with both coordinate pairs on every line.
    pub fn emit4(&self, points: &[Point4]) -> String {
        let Some(first) = points.first() else {
            return String::new();
        };
        let mut lines = self.header(self.xyuv(first));
        lines.extend(
            points[1..]
                .iter()
                .map(|p| format!("{} {}", LINEAR, self.xyuv(p))),
        );
        lines.push(PROGRAM_END.to_string());
        debug!("Emitted {} 4-axis lines for {} points", lines.len(), points.len());
        lines.join("\n")
    }
}

/// Emits a 2-axis program.
pub fn emit(points: &[Point], feed_rate: f64, units: Units, origin: Point, scale: f64) -> String {
    GcodeEmitter::new(feed_rate, units)
        .with_origin(origin)
        .with_scale(scale)
        .emit(points)
}

/// Emits a 4-axis program under the given axis letters.
pub fn emit4(
    points: &[Point4],
    feed_rate: f64,
    units: Units,
    origin: Point,
    scale: f64,
    axis_names: &AxisNames,
) -> String {
    GcodeEmitter::new(feed_rate, units)
        .with_origin(origin)
        .with_scale(scale)
        .with_axis_names(axis_names.clone())
        .emit4(points)
}
