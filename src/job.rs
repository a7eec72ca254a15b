//! Job and profile files
//!
//! A job file is JSON holding the contours produced by an import step and
//! the optional per-contour entry/exit overrides:
//!
//! ```json
//! {
//!   "contours": [
//!     { "id": "outer", "points": [[0, 0], [10, 0], [10, 10], [0, 10]] },
//!     { "id": "slot", "points": [[2, 2], [4, 2], [4, 4]], "hole": true }
//!   ],
//!   "overrides": { "outer": { "entry_t": 0.25 } }
//! }
//! ```
//!
//! A profile file holds one point list for tapered work.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use wirecut_core::{ContourId, Point, Result};
use wirecut_toolpath::{Contour, Overrides};

fn default_closed() -> bool {
    true
}

/// One contour as written in a job file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourSpec {
    pub id: ContourId,
    pub points: Vec<[f64; 2]>,
    #[serde(default = "default_closed")]
    pub closed: bool,
    #[serde(default)]
    pub hole: bool,
}

impl ContourSpec {
    pub fn to_contour(&self) -> Contour {
        let points: Vec<Point> = self.points.iter().copied().map(Point::from).collect();
        Contour::from_points(self.id.clone(), &points, self.closed).with_hole(self.hole)
    }
}

/// A 2-axis cutting job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobFile {
    pub contours: Vec<ContourSpec>,
    #[serde(default)]
    pub overrides: Overrides,
}

impl JobFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let job: Self = serde_json::from_str(&content)?;
        debug!(
            "Loaded job {} with {} contours and {} overrides",
            path.display(),
            job.contours.len(),
            job.overrides.len()
        );
        Ok(job)
    }

    pub fn contours(&self) -> Vec<Contour> {
        self.contours.iter().map(ContourSpec::to_contour).collect()
    }
}

/// One profile of a tapered cut.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileFile {
    pub points: Vec<[f64; 2]>,
    /// Closed profiles are traced one full loop from `entry_t`
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub entry_t: f64,
}

impl ProfileFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn points(&self) -> Vec<Point> {
        self.points.iter().copied().map(Point::from).collect()
    }

    /// The profile as a polyline, traced from `entry_t` when closed.
    pub fn polyline(&self, id: &str) -> Vec<Point> {
        if self.closed {
            Contour::from_points(id, &self.points(), true).traverse_from(self.entry_t)
        } else {
            self.points()
        }
    }
}
