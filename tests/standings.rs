mod common;

use std::collections::HashMap;

use common::{capped_entry, leaderboard, parsed_entry, Entry};
use podium::{points_for_place, PointsSystem, Scheme, TraditionalConfig};
use pretty_assertions::assert_eq;

fn event_points(entries: &[Entry], system: &PointsSystem) -> HashMap<&'static str, i64> {
    leaderboard(entries)
        .into_iter()
        .map(|(name, rank)| (name, points_for_place(system, rank as u32)))
        .collect()
}

// Two events, winner-takes-more scoring, overall decided by total points.
#[test]
fn two_event_series() {
    let sprint = vec![
        parsed_entry("Alice", "3:02", Scheme::Time),
        parsed_entry("Bob", "2:58", Scheme::Time),
        parsed_entry("Carol", "3:15", Scheme::Time),
    ];
    let amrap = vec![
        parsed_entry("Alice", "7+04", Scheme::RoundsReps),
        parsed_entry("Bob", "6+20", Scheme::RoundsReps),
        parsed_entry("Carol", "7+04", Scheme::RoundsReps),
    ];
    let system = PointsSystem::WinnerTakesMore;
    let first = event_points(&sprint, &system);
    let second = event_points(&amrap, &system);
    let mut totals: Vec<_> = ["Alice", "Bob", "Carol"]
        .iter()
        .map(|&name| (name, first[name] + second[name]))
        .collect();
    totals.sort_by_key(|&(_, points)| -points);

    // Sprint: Bob, Alice, Carol. Amrap: Alice and Carol share first, Bob
    // third. Shared first pays full first-place points to both.
    assert_eq!(first["Bob"], 100);
    assert_eq!(second["Alice"], 100);
    assert_eq!(second["Carol"], 100);
    assert_eq!(second["Bob"], 75);
    // Bob and Carol end level on points; the stable sort keeps entry order.
    assert_eq!(totals, vec![("Alice", 185), ("Bob", 175), ("Carol", 175)]);
}

#[test]
fn capped_athletes_still_earn_points() {
    let entries = vec![
        parsed_entry("Alice", "11:58", Scheme::TimeWithCap),
        capped_entry("Bob", Scheme::TimeWithCap, "12:00", 96),
        parsed_entry("Carol", "dnf", Scheme::TimeWithCap),
    ];
    let points = event_points(&entries, &PointsSystem::WinnerTakesMore);
    assert_eq!(points["Alice"], 100);
    assert_eq!(points["Bob"], 85);
    assert_eq!(points["Carol"], 75); // last, but present on the board
}

#[test]
fn traditional_series_scoring() {
    let system = PointsSystem::Traditional {
        config: TraditionalConfig { first_place_points: 50, step: 10 },
    };
    let entries = vec![
        parsed_entry("Alice", "150", Scheme::Reps),
        parsed_entry("Bob", "120", Scheme::Reps),
        parsed_entry("Carol", "180", Scheme::Reps),
    ];
    let points = event_points(&entries, &system);
    assert_eq!(points["Carol"], 50);
    assert_eq!(points["Alice"], 40);
    assert_eq!(points["Bob"], 30);
}

// Online scoring: points equal rank, lowest total wins.
#[test]
fn online_series_lowest_total_wins() {
    let sprint = vec![
        parsed_entry("Alice", "3:02", Scheme::Time),
        parsed_entry("Bob", "2:58", Scheme::Time),
        parsed_entry("Carol", "3:15", Scheme::Time),
    ];
    let points = event_points(&sprint, &PointsSystem::Online);
    assert_eq!(points["Bob"], 1);
    assert_eq!(points["Alice"], 2);
    assert_eq!(points["Carol"], 3);
}

#[test]
fn custom_overrides_reshape_the_podium() {
    let system = PointsSystem::Custom {
        config: podium::CustomTableConfig {
            base_template: podium::BaseTemplate::Traditional,
            overrides: HashMap::from([(1, 200), (2, 150)]),
            traditional_config: TraditionalConfig::default(),
        },
    };
    assert_eq!(points_for_place(&system, 1), 200);
    assert_eq!(points_for_place(&system, 2), 150);
    assert_eq!(points_for_place(&system, 3), 90); // back on the default scale
}
