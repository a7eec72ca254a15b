//! Island grouping
//!
//! Partitions contours into nesting groups. A closed contour enclosed by an
//! even number of other closed contours is an outer boundary; an odd count
//! makes it a hole of its nearest (smallest) enclosing contour. An island
//! nested inside a hole therefore starts a new island of its own.

use crate::contour::Contour;
use tracing::{debug, warn};
use wirecut_core::{GeometryWarning, IslandId, WarningKind};

/// One outer boundary and the holes directly inside it.
#[derive(Debug, Clone)]
pub struct Island {
    pub id: IslandId,
    pub outer: Contour,
    pub holes: Vec<Contour>,
}

impl Island {
    /// Outer boundary first, then holes in input order.
    pub fn all_contours(&self) -> Vec<&Contour> {
        std::iter::once(&self.outer).chain(self.holes.iter()).collect()
    }
}

/// Result of grouping: islands in outer input order plus demotion warnings.
#[derive(Debug, Clone, Default)]
pub struct IslandGrouping {
    pub islands: Vec<Island>,
    pub warnings: Vec<GeometryWarning>,
}

/// True when `outer` strictly encloses `inner`.
fn encloses(outer: &Contour, inner: &Contour) -> bool {
    if !outer.is_closed() || !inner.is_closed() || outer.area() <= inner.area() {
        return false;
    }
    let (Some(ob), Some(ib)) = (outer.bounds(), inner.bounds()) else {
        return false;
    };
    if !ob.contains_bounds(&ib) {
        return false;
    }
    inner
        .vertices()
        .first()
        .is_some_and(|p| outer.contains_point(*p))
}

/// Groups contours into islands.
pub fn group_into_islands(contours: &[Contour]) -> IslandGrouping {
    let mut grouping = IslandGrouping::default();
    if contours.is_empty() {
        return grouping;
    }

    // Indices of every contour enclosing contour i.
    let containers: Vec<Vec<usize>> = contours
        .iter()
        .map(|inner| {
            contours
                .iter()
                .enumerate()
                .filter(|(_, outer)| !std::ptr::eq(*outer, inner) && encloses(outer, inner))
                .map(|(j, _)| j)
                .collect()
        })
        .collect();

    let nearest = |i: usize| -> Option<usize> {
        containers[i].iter().copied().min_by(|&a, &b| {
            contours[a]
                .area()
                .total_cmp(&contours[b].area())
                .then(a.cmp(&b))
        })
    };

    // Parent index for holes, None for outers.
    let mut parent: Vec<Option<usize>> = vec![None; contours.len()];
    for (i, contour) in contours.iter().enumerate() {
        let depth = containers[i].len();
        if depth % 2 == 1 {
            parent[i] = nearest(i);
        } else if contour.hole {
            if depth == 0 {
                warn!("Contour {} flagged as hole has no enclosing boundary", contour.id);
                grouping
                    .warnings
                    .push(GeometryWarning::new(contour.id.clone(), WarningKind::DemotedHole));
            } else {
                debug!("Contour {} flagged as hole sits at even depth {}", contour.id, depth);
            }
        }
    }
    // A hole must hang off an outer; otherwise it starts its own island.
    for i in 0..contours.len() {
        if let Some(p) = parent[i] {
            if parent[p].is_some() {
                parent[i] = None;
            }
        }
    }

    let mut island_of: Vec<Option<usize>> = vec![None; contours.len()];
    for (i, contour) in contours.iter().enumerate() {
        if parent[i].is_some() {
            continue;
        }
        let id = format!("island-{}", grouping.islands.len());
        let mut outer = contour.clone();
        outer.hole = false;
        outer.parent_id = None;
        outer.island_id = Some(id.clone());
        island_of[i] = Some(grouping.islands.len());
        grouping.islands.push(Island {
            id,
            outer,
            holes: Vec::new(),
        });
    }

    for (i, contour) in contours.iter().enumerate() {
        let Some(p) = parent[i] else { continue };
        let Some(index) = island_of[p] else { continue };
        let island = &mut grouping.islands[index];
        let mut hole = contour.clone();
        hole.hole = true;
        hole.parent_id = Some(island.outer.id.clone());
        hole.island_id = Some(island.id.clone());
        island.holes.push(hole);
    }

    debug!(
        "Grouped {} contours into {} islands",
        contours.len(),
        grouping.islands.len()
    );
    grouping
}
