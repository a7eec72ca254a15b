use crate::fixtures::{rect, square_at};
use wirecut_core::OptimizerSettings;
use wirecut_toolpath::{group_into_islands, EntryExitOverride, Island, Overrides, Sequencer};

/// C sits between the home position and A; B lies on the other side.
///
/// Without a penalty the cheapest greedy route is C, A, B, whose last rapid
/// runs back through C. With a penalty the route avoids cut material.
fn crossing_layout() -> Vec<Island> {
    let contours = vec![
        rect("A", 4.0, -0.5, 5.0, 0.5),
        rect("B", -4.5, -0.5, -3.5, 0.5),
        rect("C", 1.0, -1.0, 3.0, 1.0),
    ];
    group_into_islands(&contours).islands
}

fn order(sequencer: &Sequencer, islands: &[Island]) -> Vec<String> {
    sequencer
        .sequence(islands)
        .into_iter()
        .map(|s| s.contour_id)
        .collect()
}

#[test]
fn test_crossing_penalty_changes_order() {
    let islands = crossing_layout();

    let plain = Sequencer::new(&OptimizerSettings::default());
    assert_eq!(order(&plain, &islands), vec!["C", "A", "B"]);

    let penalized =
        Sequencer::new(&OptimizerSettings::default().with_crossing_penalty(5.0));
    assert_eq!(order(&penalized, &islands), vec!["B", "A", "C"]);
}

#[test]
fn test_travel_reported_per_step() {
    let islands = crossing_layout();
    let sequencer = Sequencer::new(&OptimizerSettings::default());
    let steps = sequencer.sequence(&islands);

    let travel: Vec<f64> = steps.iter().map(|s| s.travel).collect();
    assert_eq!(travel, vec![1.0, 3.0, 7.5]);
    assert_eq!(steps[0].entry_hint_t, 0.875);
    assert_eq!(steps[0].island_id, "island-2");
}

#[test]
fn test_order_islands_matches_sequence() {
    let islands = crossing_layout();
    let sequencer = Sequencer::new(&OptimizerSettings::default());
    let ordered: Vec<_> = sequencer
        .order_islands(&islands)
        .into_iter()
        .map(|i| i.outer.id)
        .collect();
    assert_eq!(ordered, vec!["C", "A", "B"]);
}

#[test]
fn test_sequencing_is_deterministic() {
    let contours: Vec<_> = (0..12)
        .map(|i| {
            let x = ((i * 7) % 5) as f64 * 15.0;
            let y = ((i * 3) % 4) as f64 * 15.0;
            square_at(&format!("p{:02}", i), x, y, 6.0)
        })
        .collect();
    let islands = group_into_islands(&contours).islands;
    let sequencer = Sequencer::new(&OptimizerSettings::default().with_crossing_penalty(3.0));

    let first = sequencer.sequence(&islands);
    let second = sequencer.sequence(&islands);
    assert_eq!(first, second);
    assert_eq!(first.len(), contours.len());

    for island in &islands {
        assert_eq!(
            sequencer.order_within_island(island),
            sequencer.order_within_island(island)
        );
    }
}

#[test]
fn test_holes_follow_nearest_neighbour() {
    let contours = vec![
        rect("outer", 0.0, 0.0, 100.0, 20.0),
        rect("h-far", 80.0, 5.0, 90.0, 15.0),
        rect("h-near", 10.0, 5.0, 20.0, 15.0),
        rect("h-mid", 45.0, 5.0, 55.0, 15.0),
    ];
    let islands = group_into_islands(&contours).islands;
    let sequencer = Sequencer::new(&OptimizerSettings::default());
    assert_eq!(
        sequencer.order_within_island(&islands[0]),
        vec!["outer", "h-near", "h-mid", "h-far"]
    );
}

#[test]
fn test_two_opt_never_worse_than_greedy() {
    let contours: Vec<_> = (0..8)
        .map(|i| square_at(&format!("s{}", i), (i as f64) * 10.0, ((i % 3) as f64) * 25.0, 4.0))
        .collect();
    let islands = group_into_islands(&contours).islands;

    let greedy = Sequencer::new(&OptimizerSettings::default().with_max_2opt_evaluations(0));
    let improved = Sequencer::new(&OptimizerSettings::default());
    let total = |s: &Sequencer| s.sequence(&islands).iter().map(|s| s.travel).sum::<f64>();
    assert!(total(&improved) <= total(&greedy) + 1e-9);
}

#[test]
fn test_fixed_entry_replaces_nearest_sample() {
    let islands = group_into_islands(&[rect("a", 10.0, 0.0, 20.0, 10.0)]).islands;

    let free = Sequencer::new(&OptimizerSettings::default()).sequence(&islands);
    assert_eq!(free[0].travel, 10.0);

    let mut fixed = Overrides::new();
    fixed.insert("a".into(), EntryExitOverride::entry(0.5));
    let pinned = Sequencer::new(&OptimizerSettings::default())
        .with_fixed_entries(fixed)
        .sequence(&islands);
    assert_eq!(pinned[0].entry_hint_t, 0.5);
    assert_eq!(pinned[0].travel, 500f64.sqrt());
}

#[test]
fn test_fixed_exit_moves_cursor() {
    let islands = group_into_islands(&[
        rect("a", 0.0, 0.0, 2.0, 2.0),
        rect("b", -10.0, 0.0, -8.0, 2.0),
        rect("c", 11.0, 2.0, 13.0, 4.0),
    ])
    .islands;

    let mut entry_only = Overrides::new();
    entry_only.insert("a".into(), EntryExitOverride::entry(0.0));
    let sequencer = Sequencer::new(&OptimizerSettings::default()).with_fixed_entries(entry_only);
    assert_eq!(order(&sequencer, &islands), vec!["a", "b", "c"]);

    // Leaving "a" at its far corner (2, 2) puts "c" closer than "b".
    let mut with_exit = Overrides::new();
    with_exit.insert("a".into(), EntryExitOverride::new(0.0, 0.5));
    let sequencer = Sequencer::new(&OptimizerSettings::default()).with_fixed_entries(with_exit);
    let steps = sequencer.sequence(&islands);
    let ids: Vec<_> = steps.iter().map(|s| s.contour_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c", "b"]);
    assert_eq!(steps[1].travel, 9.0);
    assert_eq!(steps[2].travel, 19.0);
}
