//! End-to-end toolpath optimization
//!
//! Runs grouping, sequencing, entry/exit selection and stitching over one
//! immutable snapshot of contours and returns a fresh [`OptimizedPath`].

use crate::contour::Contour;
use crate::entry_exit::{
    select_with_hints, validate_overrides, EntryExit, EntryExitOverride, Overrides,
};
use crate::islands::group_into_islands;
use crate::sequence::Sequencer;
use crate::stitch::{polyline_length, stitch};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};
use wirecut_core::{
    ContourId, EntryStrategy, GeometryWarning, InputError, OptimizerSettings, Point, Result,
};

/// Result of one optimization run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizedPath {
    /// Ids of the traced contours in cutting order
    pub contours_ordered: Vec<ContourId>,
    pub entry_exits: Vec<EntryExit>,
    pub polyline: Vec<Point>,
    /// Indices into `polyline` reached by a rapid move
    pub rapid_indices: Vec<usize>,
    /// Total polyline length, rapids included
    pub length: f64,
    pub cut_length: f64,
    pub travel_length: f64,
    pub warnings: Vec<GeometryWarning>,
}

impl OptimizedPath {
    pub fn is_rapid(&self, index: usize) -> bool {
        self.rapid_indices.binary_search(&index).is_ok()
    }
}

/// Toolpath optimizer
pub struct PathOptimizer {
    settings: OptimizerSettings,
}

impl PathOptimizer {
    pub fn new(settings: OptimizerSettings) -> Self {
        Self { settings }
    }

    /// Optimizes `contours` into one continuous path.
    ///
    /// Fails on invalid settings, an empty job, duplicate contour ids or
    /// overrides naming unknown contours. Bad geometry only produces
    /// warnings on the result.
    pub fn optimize(&self, contours: &[Contour], overrides: &Overrides) -> Result<OptimizedPath> {
        self.settings.validate()?;
        if contours.is_empty() {
            return Err(InputError::NoContours.into());
        }
        let mut seen = HashSet::new();
        for contour in contours {
            if !seen.insert(contour.id.as_str()) {
                return Err(InputError::DuplicateContour {
                    id: contour.id.clone(),
                }
                .into());
            }
        }
        let known: Vec<&Contour> = contours.iter().collect();
        validate_overrides(overrides, &known)?;

        info!("Optimizing toolpath for {} contours", contours.len());

        let grouping = group_into_islands(contours);
        let steps = Sequencer::new(&self.settings)
            .with_fixed_entries(self.fixed_entries(contours, overrides))
            .sequence(&grouping.islands);

        let by_id: HashMap<&str, &Contour> = grouping
            .islands
            .iter()
            .flat_map(|island| island.all_contours())
            .map(|c| (c.id.as_str(), c))
            .collect();
        let ordered: Vec<&Contour> = steps
            .iter()
            .filter_map(|step| by_id.get(step.contour_id.as_str()).copied())
            .collect();

        let hints: HashMap<ContourId, f64> = match self.settings.entry_strategy {
            EntryStrategy::Origin => HashMap::new(),
            EntryStrategy::Nearest => steps
                .iter()
                .map(|step| (step.contour_id.clone(), step.entry_hint_t))
                .collect(),
        };
        let entry_exits = select_with_hints(&ordered, overrides, &hints)?;

        let stitched = stitch(&ordered, &entry_exits, self.settings.step, self.settings.origin);

        let length = polyline_length(&stitched.points);
        let travel_length = stitched.travel_length();
        let traced: HashSet<&str> = stitched.traced.iter().map(String::as_str).collect();
        let entry_exits = entry_exits
            .into_iter()
            .filter(|ee| traced.contains(ee.contour_id.as_str()))
            .collect();

        let mut warnings = grouping.warnings;
        warnings.extend(stitched.warnings);

        info!(
            "Toolpath: {} contours, {} points, length {:.3} (travel {:.3}), {} warnings",
            stitched.traced.len(),
            stitched.points.len(),
            length,
            travel_length,
            warnings.len()
        );
        debug!("Cutting order: {:?}", stitched.traced);

        Ok(OptimizedPath {
            contours_ordered: stitched.traced,
            entry_exits,
            polyline: stitched.points,
            rapid_indices: stitched.rapid_indices,
            length,
            cut_length: length - travel_length,
            travel_length,
            warnings,
        })
    }

    /// Parameters known before sequencing: overrides, plus `t = 0` entries
    /// under the origin strategy.
    fn fixed_entries(&self, contours: &[Contour], overrides: &Overrides) -> Overrides {
        contours
            .iter()
            .filter_map(|contour| {
                let o = overrides.get(&contour.id).copied().unwrap_or_default();
                let entry_t = match self.settings.entry_strategy {
                    EntryStrategy::Origin => Some(o.entry_t.unwrap_or(0.0)),
                    EntryStrategy::Nearest => o.entry_t,
                };
                let fixed = EntryExitOverride {
                    entry_t,
                    exit_t: o.exit_t,
                };
                (fixed != EntryExitOverride::default()).then(|| (contour.id.clone(), fixed))
            })
            .collect()
    }
}

/// Convenience wrapper around [`PathOptimizer::optimize`].
pub fn run_full_optimization(
    contours: &[Contour],
    overrides: &Overrides,
    settings: &OptimizerSettings,
) -> Result<OptimizedPath> {
    PathOptimizer::new(settings.clone()).optimize(contours, overrides)
}
