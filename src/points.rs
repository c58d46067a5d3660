use std::cmp::Ordering;
use std::collections::HashMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::rank::find_rank;
use crate::scheme::{sort_direction, ScoreDirection};
use crate::score::{Score, ScoreStatus};

// Top-heavy award table used by championship-style leaderboards: a big gap
// at the podium, shrinking steps down to place 30, nothing after that.
pub const WINNER_TAKES_MORE_TABLE: [i64; 30] = [
    100, 85, 75, 67, 62, 58, 55, 52, 50, 48, 46, 44, 42, 40, 38, 36, 34, 32, 30, 28, 26, 24, 22,
    20, 18, 16, 14, 12, 10, 5,
];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseTemplate {
    Traditional,
    WinnerTakesMore,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TraditionalConfig {
    pub first_place_points: i64,
    pub step: i64,
}

impl Default for TraditionalConfig {
    fn default() -> Self {
        TraditionalConfig { first_place_points: 100, step: 5 }
    }
}

// A base template with explicit per-place exceptions. Override keys
// serialize as strings, matching the stored JSON configuration shape.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CustomTableConfig {
    pub base_template: BaseTemplate,
    #[serde(default)]
    pub overrides: HashMap<u32, i64>,
    #[serde(default)]
    pub traditional_config: TraditionalConfig,
}

// Points system of an event. The tag and field names match the stored
// leaderboard configuration records.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointsSystem {
    WinnerTakesMore,
    Traditional {
        #[serde(default)]
        config: TraditionalConfig,
    },
    Custom {
        config: CustomTableConfig,
    },
    // Points equal rank and the lowest total wins. Works for online
    // qualifiers where the field size is unknown up front.
    Online,
}

pub fn winner_takes_more_points(place: u32) -> i64 {
    let place = place.max(1) as usize;
    WINNER_TAKES_MORE_TABLE.get(place - 1).copied().unwrap_or(0)
}

// Linear scale: first place gets the configured maximum, every place after
// loses one step. Deep fields may legitimately go negative.
pub fn traditional_points(place: u32, config: &TraditionalConfig) -> i64 {
    let place = i64::from(place.max(1));
    config.first_place_points - (place - 1) * config.step
}

pub fn base_points(template: BaseTemplate, place: u32, config: &TraditionalConfig) -> i64 {
    match template {
        BaseTemplate::Traditional => traditional_points(place, config),
        BaseTemplate::WinnerTakesMore => winner_takes_more_points(place),
    }
}

// An override wins verbatim, zero and beyond-table places included;
// everything else falls back to the base template. Place zero reads as
// first place rather than erroring (existing configurations rely on it).
pub fn calculate_custom_points(place: u32, config: &CustomTableConfig) -> i64 {
    let place = place.max(1);
    match config.overrides.get(&place) {
        Some(&points) => points,
        None => base_points(config.base_template, place, &config.traditional_config),
    }
}

pub fn online_points(place: u32) -> i64 {
    i64::from(place.max(1))
}

// Which athletes define the reference median for performance scoring.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedianField {
    TopHalf,
    All,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PScoreConfig {
    pub allow_negatives: bool,
    pub median_field: MedianField,
}

impl Default for PScoreConfig {
    fn default() -> Self {
        PScoreConfig { allow_negatives: true, median_field: MedianField::TopHalf }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PScoreResult {
    pub p_score: f64,
    pub rank: usize,
}

// Performance scoring: unlike place-based tables, the margin of victory
// matters. The best result anchors 100, the median reference anchors 50, and
// everything else scales linearly along the line through those two points,
// so a runaway win is worth more than a photo finish. Below the median the
// line continues into negative territory unless the config clamps it.
//
// Results come back parallel to the input. Athletes without a countable
// result (non-scored statuses, or a scored record with no value) take no
// part in the formula: they score zero and only receive a rank.
pub fn calculate_p_scores(field: &[Score], config: &PScoreConfig) -> Vec<PScoreResult> {
    let is_active = |score: &Score| {
        matches!(score.status, ScoreStatus::Scored | ScoreStatus::Cap) && score.value.is_some()
    };
    // The value normalized so that bigger is worse regardless of the
    // scheme's direction.
    let worseness = |score: &Score| {
        let value = score.value.unwrap_or(0) as f64;
        match sort_direction(score.scheme, score.score_type) {
            ScoreDirection::Asc => value,
            ScoreDirection::Desc => -value,
        }
    };
    // Capped athletes order after every scored one, whatever their clock
    // reads; within a tier, performance order.
    let sorted_active = field
        .iter()
        .filter(|&score| is_active(score))
        .sorted_by(|&a, &b| {
            let key = |s: &Score| (s.status == ScoreStatus::Cap, worseness(s));
            key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal)
        })
        .collect_vec();
    if sorted_active.is_empty() {
        return field
            .iter()
            .map(|score| PScoreResult { p_score: 0.0, rank: find_rank(field, score) })
            .collect();
    }
    let best = worseness(sorted_active[0]);
    let distances = sorted_active.iter().map(|&score| worseness(score) - best).collect_vec();
    let median = match config.median_field {
        // The boundary athlete of the top half defines the median; with two
        // athletes the top half is just the winner.
        MedianField::TopHalf => distances[distances.len().div_ceil(2) - 1],
        MedianField::All => {
            let n = distances.len();
            if n % 2 == 1 {
                distances[n / 2]
            } else {
                (distances[n / 2 - 1] + distances[n / 2]) / 2.0
            }
        }
    };
    field
        .iter()
        .map(|score| {
            let rank = find_rank(field, score);
            let p_score = if !is_active(score) {
                0.0
            } else {
                let distance = worseness(score) - best;
                let p = if distance == 0.0 {
                    100.0
                } else if median == 0.0 {
                    // Everyone in the reference half is tied with the best;
                    // no slope to extrapolate along.
                    0.0
                } else {
                    100.0 - distance * 50.0 / median
                };
                if config.allow_negatives { p } else { p.max(0.0) }
            };
            PScoreResult { p_score, rank }
        })
        .collect()
}

pub fn points_for_place(system: &PointsSystem, place: u32) -> i64 {
    match system {
        PointsSystem::WinnerTakesMore => winner_takes_more_points(place),
        PointsSystem::Traditional { config } => traditional_points(place, config),
        PointsSystem::Custom { config } => calculate_custom_points(place, config),
        PointsSystem::Online => online_points(place),
    }
}

// Award table for places 1 through `places`.
pub fn generate_points_table(system: &PointsSystem, places: u32) -> Vec<i64> {
    (1..=places).map(|place| points_for_place(system, place)).collect()
}
