//! Cutting sequence optimization.
//!
//! Orders islands, and contours within each island, to keep rapid travel
//! short. Each contour is reduced to `samples_per_contour` boundary samples;
//! the travel estimate from the cursor to a contour is the distance to its
//! nearest sample, multiplied by `crossing_penalty_weight` when the straight
//! rapid would cut through an already-cut closed contour.
//!
//! # Algorithms
//!
//! 1. **Nearest Neighbor**: greedy construction from the home position.
//!    Islands are chosen by their outer boundary; inside an island the outer
//!    is cut first, then holes are picked greedily.
//! 2. **2-opt**: sub-sequence reversals accepted only when the simulated
//!    penalized travel strictly drops, bounded by `max_2opt_evaluations`
//!    candidate evaluations per pass.
//!
//! Equal-cost candidates resolve to the lowest contour id, so identical input
//! always yields identical order.
//!
//! Contours whose entry or exit parameter is already fixed (see
//! [`Sequencer::with_fixed_entries`]) are entered at that parameter and left
//! at their exit point, so the estimate follows the rapids actually emitted.

use crate::contour::Contour;
use crate::entry_exit::Overrides;
use crate::islands::Island;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wirecut_core::{ContourId, IslandId, OptimizerSettings, Point};

/// Costs closer than this are treated as equal.
const COST_EPSILON: f64 = 1e-9;
/// Intersections this close to a rapid's own endpoints are not crossings.
const ENDPOINT_EPSILON: f64 = 1e-9;

/// One contour visit in the final sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceStep {
    pub contour_id: ContourId,
    pub island_id: IslandId,
    /// Sampled parameter the travel estimate entered at.
    pub entry_hint_t: f64,
    /// Unpenalized rapid distance from the previous cursor to the entry hint.
    pub travel: f64,
}

/// A contour with its precomputed boundary samples.
struct Sampled<'a> {
    contour: &'a Contour,
    island_id: &'a str,
    samples: Vec<(f64, Point)>,
    /// Fixed exit point; otherwise the wire leaves where it entered.
    exit: Option<Point>,
}

impl Sampled<'_> {
    fn is_degenerate(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Best entry onto one contour from a cursor.
#[derive(Debug, Clone, Copy)]
struct Entry {
    t: f64,
    point: Point,
    distance: f64,
    cost: f64,
}

/// Simulated traversal state.
#[derive(Clone)]
struct Walk<'a> {
    cursor: Point,
    cut: Vec<&'a Contour>,
    cost: f64,
    steps: Vec<SequenceStep>,
}

impl<'a> Walk<'a> {
    fn new(origin: Point) -> Self {
        Self {
            cursor: origin,
            cut: Vec::new(),
            cost: 0.0,
            steps: Vec::new(),
        }
    }
}

/// Orders islands and contours for minimal penalized rapid travel.
#[derive(Debug, Clone)]
pub struct Sequencer {
    origin: Point,
    samples: usize,
    crossing_penalty_weight: f64,
    max_evaluations: usize,
    fixed: Overrides,
}

impl Sequencer {
    pub fn new(settings: &OptimizerSettings) -> Self {
        Self {
            origin: settings.origin,
            samples: settings.samples(),
            crossing_penalty_weight: settings.crossing_penalty_weight,
            max_evaluations: settings.max_2opt_evaluations,
            fixed: Overrides::new(),
        }
    }

    /// Entry and exit parameters decided before sequencing. A fixed
    /// `entry_t` replaces the boundary samples of that contour; a fixed
    /// `exit_t` moves the cursor after it is cut.
    pub fn with_fixed_entries(mut self, fixed: Overrides) -> Self {
        self.fixed = fixed;
        self
    }

    /// Islands in cutting order.
    pub fn order_islands(&self, islands: &[Island]) -> Vec<Island> {
        let (island_order, _) = self.plan(islands);
        island_order.into_iter().map(|i| islands[i].clone()).collect()
    }

    /// Contour ids of one island in cutting order, starting from the home
    /// position. The outer boundary always comes first.
    pub fn order_within_island(&self, island: &Island) -> Vec<ContourId> {
        let items = self.sample_island(island);
        let order = self.order_island(&items, &Walk::new(self.origin));
        order.into_iter().map(|i| items[i].contour.id.clone()).collect()
    }

    /// The full job sequence: every contour of every island, in cutting order.
    pub fn sequence(&self, islands: &[Island]) -> Vec<SequenceStep> {
        let sampled: Vec<Vec<Sampled>> = islands.iter().map(|i| self.sample_island(i)).collect();
        let (island_order, internal) = self.plan_sampled(&sampled);

        let mut walk = Walk::new(self.origin);
        for &i in &island_order {
            for &c in &internal[i] {
                self.visit(&mut walk, &sampled[i][c]);
            }
        }
        debug!(
            "Sequenced {} contours, penalized travel {:.3}",
            walk.steps.len(),
            walk.cost
        );
        walk.steps
    }

    fn plan(&self, islands: &[Island]) -> (Vec<usize>, Vec<Vec<usize>>) {
        let sampled: Vec<Vec<Sampled>> = islands.iter().map(|i| self.sample_island(i)).collect();
        self.plan_sampled(&sampled)
    }

    /// Island order plus the internal contour order of each island.
    fn plan_sampled<'a>(&self, islands: &[Vec<Sampled<'a>>]) -> (Vec<usize>, Vec<Vec<usize>>) {
        let mut internal: Vec<Vec<usize>> = vec![Vec::new(); islands.len()];
        let mut remaining: Vec<usize> = (0..islands.len()).collect();
        let mut order = Vec::with_capacity(islands.len());
        let mut walk = Walk::new(self.origin);

        while !remaining.is_empty() {
            let pick = self.nearest(&walk, remaining.iter().map(|&i| &islands[i][0]));
            let island = remaining.remove(pick);

            internal[island] = self.order_island(&islands[island], &walk);
            for &c in &internal[island] {
                self.visit(&mut walk, &islands[island][c]);
            }
            order.push(island);
        }

        let start = Walk::new(self.origin);
        self.two_opt(&mut order, 0, |candidate| {
            let mut walk = start.clone();
            for &i in candidate {
                for &c in &internal[i] {
                    self.visit(&mut walk, &islands[i][c]);
                }
            }
            walk.cost
        });
        (order, internal)
    }

    /// Outer first, then holes by nearest neighbour and 2-opt.
    fn order_island<'a>(&self, items: &[Sampled<'a>], start: &Walk<'a>) -> Vec<usize> {
        let mut walk = start.clone();
        let mut order = vec![0];
        self.visit(&mut walk, &items[0]);

        let mut remaining: Vec<usize> = (1..items.len()).collect();
        while !remaining.is_empty() {
            let pick = self.nearest(&walk, remaining.iter().map(|&i| &items[i]));
            let hole = remaining.remove(pick);
            self.visit(&mut walk, &items[hole]);
            order.push(hole);
        }

        self.two_opt(&mut order, 1, |candidate| {
            let mut walk = start.clone();
            for &c in candidate {
                self.visit(&mut walk, &items[c]);
            }
            walk.cost
        });
        order
    }

    fn sample_island<'a>(&self, island: &'a Island) -> Vec<Sampled<'a>> {
        island
            .all_contours()
            .into_iter()
            .map(|contour| {
                let fixed = self.fixed.get(&contour.id).copied().unwrap_or_default();
                let samples = match fixed.entry_t {
                    Some(t) => contour.point_at(t).map(|p| vec![(t, p)]).unwrap_or_default(),
                    None => contour.sample(self.samples),
                };
                Sampled {
                    contour,
                    island_id: &island.id,
                    samples,
                    exit: fixed.exit_t.and_then(|t| contour.point_at(t)),
                }
            })
            .collect()
    }

    /// Position of the cheapest candidate; degenerate contours rank last and
    /// ties go to the lowest contour id.
    fn nearest<'s, 'a: 's>(
        &self,
        walk: &Walk,
        candidates: impl Iterator<Item = &'s Sampled<'a>>,
    ) -> usize {
        let mut best: Option<(usize, bool, f64, &str)> = None;
        for (pos, item) in candidates.enumerate() {
            let degenerate = item.is_degenerate();
            let cost = self
                .best_entry(walk, item)
                .map_or(0.0, |entry| entry.cost);
            let id = item.contour.id.as_str();
            let better = match best {
                None => true,
                Some((_, best_degenerate, best_cost, best_id)) => {
                    if degenerate != best_degenerate {
                        !degenerate
                    } else if cost < best_cost - COST_EPSILON {
                        true
                    } else {
                        (cost - best_cost).abs() <= COST_EPSILON && id < best_id
                    }
                }
            };
            if better {
                best = Some((pos, degenerate, cost, id));
            }
        }
        best.map_or(0, |(pos, ..)| pos)
    }

    /// Cheapest sample to enter `item` at; ties go to the smaller parameter.
    fn best_entry(&self, walk: &Walk, item: &Sampled) -> Option<Entry> {
        let mut best: Option<Entry> = None;
        for &(t, point) in &item.samples {
            let distance = walk.cursor.distance_to(&point);
            let cost = if self.crossing_penalty_weight > 1.0
                && crosses_any(walk.cursor, point, &walk.cut)
            {
                distance * self.crossing_penalty_weight
            } else {
                distance
            };
            if best.map_or(true, |b| cost < b.cost - COST_EPSILON) {
                best = Some(Entry {
                    t,
                    point,
                    distance,
                    cost,
                });
            }
        }
        best
    }

    fn visit<'a>(&self, walk: &mut Walk<'a>, item: &Sampled<'a>) {
        let entry = self.best_entry(walk, item);
        let (t, travel) = match entry {
            Some(entry) => {
                walk.cost += entry.cost;
                walk.cursor = item.exit.unwrap_or(entry.point);
                (entry.t, entry.distance)
            }
            None => (0.0, 0.0),
        };
        if item.contour.is_closed() && !item.is_degenerate() {
            walk.cut.push(item.contour);
        }
        walk.steps.push(SequenceStep {
            contour_id: item.contour.id.clone(),
            island_id: item.island_id.to_string(),
            entry_hint_t: t,
            travel,
        });
    }

    /// Reverses sub-sequences of `order[fixed..]` while the cost strictly drops.
    fn two_opt<F>(&self, order: &mut [usize], fixed: usize, cost: F)
    where
        F: Fn(&[usize]) -> f64,
    {
        let n = order.len();
        if n < fixed + 2 || self.max_evaluations == 0 {
            return;
        }

        let mut best = cost(order);
        let mut evaluations = 0;
        let mut improved = true;
        while improved {
            improved = false;
            for i in fixed..n - 1 {
                for j in i + 1..n {
                    if evaluations >= self.max_evaluations {
                        debug!("2-opt budget of {} evaluations exhausted", evaluations);
                        return;
                    }
                    order[i..=j].reverse();
                    evaluations += 1;
                    let candidate = cost(order);
                    if candidate < best - COST_EPSILON {
                        best = candidate;
                        improved = true;
                    } else {
                        order[i..=j].reverse();
                    }
                }
            }
        }
    }
}

fn crosses_any(from: Point, to: Point, cut: &[&Contour]) -> bool {
    cut.iter()
        .any(|contour| contour.segments().any(|(a, b)| properly_crosses(from, to, a, b)))
}

/// True when segment `p`-`q` meets segment `a`-`b` strictly between `p` and
/// `q`. Collinear overlaps are not counted.
fn properly_crosses(p: Point, q: Point, a: Point, b: Point) -> bool {
    let r = (q.x - p.x, q.y - p.y);
    let s = (b.x - a.x, b.y - a.y);
    let denom = r.0 * s.1 - r.1 * s.0;
    if denom.abs() < 1e-12 {
        return false;
    }
    let w = (a.x - p.x, a.y - p.y);
    let along_rapid = (w.0 * s.1 - w.1 * s.0) / denom;
    let along_edge = (w.0 * r.1 - w.1 * r.0) / denom;
    along_rapid > ENDPOINT_EPSILON
        && along_rapid < 1.0 - ENDPOINT_EPSILON
        && (0.0..=1.0).contains(&along_edge)
}
