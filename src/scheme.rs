use enum_map::{enum_map, Enum, EnumMap};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

// Measurement kind of an event score. Adding a variant here forces every
// dispatcher (encoding, parsing, formatting, direction table) to be updated:
// they all match exhaustively.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Scheme {
    Time,
    TimeWithCap,
    Emom,
    RoundsReps,
    Load,
    Meters,
    Feet,
    Reps,
    Calories,
    Points,
    PassFail,
}

// Explicit per-event override of the scheme's natural direction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreType {
    Min, // lower value wins
    Max, // higher value wins
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreDirection {
    Asc,  // smaller raw value ranks first
    Desc, // larger raw value ranks first
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadUnit {
    Kg,
    Lbs,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    M,
    Km,
    Ft,
    Mi,
}

lazy_static! {
    // Note. EMOM is descending on purpose: the encoded value is how long the
    // athlete kept up with the clock, so surviving longer is better.
    static ref SCHEME_DIRECTION: EnumMap<Scheme, ScoreDirection> = enum_map! {
        Scheme::Time => ScoreDirection::Asc,
        Scheme::TimeWithCap => ScoreDirection::Asc,
        Scheme::Emom => ScoreDirection::Desc,
        Scheme::RoundsReps => ScoreDirection::Desc,
        Scheme::Load => ScoreDirection::Desc,
        Scheme::Meters => ScoreDirection::Desc,
        Scheme::Feet => ScoreDirection::Desc,
        Scheme::Reps => ScoreDirection::Desc,
        Scheme::Calories => ScoreDirection::Desc,
        Scheme::Points => ScoreDirection::Desc,
        Scheme::PassFail => ScoreDirection::Desc,
    };
}

impl Scheme {
    pub fn direction(self) -> ScoreDirection { SCHEME_DIRECTION[self] }

    // Encoded as milliseconds.
    pub fn is_time_like(self) -> bool {
        matches!(self, Scheme::Time | Scheme::TimeWithCap | Scheme::Emom)
    }
    // Encoded as millimeters.
    pub fn is_distance(self) -> bool { matches!(self, Scheme::Meters | Scheme::Feet) }
    // Encoded as a raw integer count.
    pub fn is_count(self) -> bool {
        matches!(self, Scheme::Reps | Scheme::Calories | Scheme::Points)
    }

    pub fn supports_tiebreak(self) -> bool { matches!(self, Scheme::Time | Scheme::Reps) }
}

impl ScoreType {
    pub fn direction(self) -> ScoreDirection {
        match self {
            ScoreType::Min => ScoreDirection::Asc,
            ScoreType::Max => ScoreDirection::Desc,
        }
    }
}

// Effective direction for an event: the scheme's natural direction unless the
// event configuration overrides it.
pub fn sort_direction(scheme: Scheme, score_type: Option<ScoreType>) -> ScoreDirection {
    match score_type {
        Some(t) => t.direction(),
        None => scheme.direction(),
    }
}

pub fn is_lower_better(scheme: Scheme) -> bool { scheme.direction() == ScoreDirection::Asc }
