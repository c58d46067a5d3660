use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::scheme::{Scheme, ScoreType};

// Coarse result tier. Always dominates value comparison: a capped athlete
// never beats a scored one, and the bottom tiers rank in this fixed order no
// matter what values they carry.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ScoreStatus {
    Scored,
    Cap,
    Dq,
    Withdrawn,
    Dns,
    Dnf,
}

impl ScoreStatus {
    // Position of the tier within the sort key. Smaller ranks first.
    pub fn order(self) -> u8 {
        match self {
            ScoreStatus::Scored => 0,
            ScoreStatus::Cap => 1,
            ScoreStatus::Dq => 2,
            ScoreStatus::Withdrawn => 3,
            ScoreStatus::Dns => 4,
            ScoreStatus::Dnf => 5,
        }
    }

    pub fn from_order(order: u8) -> Option<Self> {
        ScoreStatus::iter().find(|status| status.order() == order)
    }
}

// Recorded when an athlete hit the time limit before finishing. The secondary
// value (typically reps completed at the buzzer) orders capped athletes
// relative to each other.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TimeCap {
    pub ms: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_scheme: Option<Scheme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_value: Option<i64>,
}

// Secondary score consulted only when primary ordering is a dead heat.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Tiebreak {
    pub scheme: Scheme,
    pub value: i64,
}

// The canonical unit the engine operates on. `value` is in scheme-specific
// units: ms for time-likes, grams for load, millimeters for distance,
// `rounds * 100_000 + reps` for rounds-reps, the raw count otherwise.
// `value` is `None` only for non-scored statuses (a capped result may still
// carry the stopped clock time).
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Score {
    pub scheme: Scheme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_type: Option<ScoreType>,
    pub value: Option<i64>,
    pub status: ScoreStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_cap: Option<TimeCap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiebreak: Option<Tiebreak>,
}

impl Score {
    pub fn scored(scheme: Scheme, value: i64) -> Self {
        Score {
            scheme,
            score_type: None,
            value: Some(value),
            status: ScoreStatus::Scored,
            time_cap: None,
            tiebreak: None,
        }
    }

    pub fn capped(scheme: Scheme, cap_ms: i64, secondary_value: i64) -> Self {
        Score {
            scheme,
            score_type: None,
            value: None,
            status: ScoreStatus::Cap,
            time_cap: Some(TimeCap {
                ms: cap_ms,
                secondary_scheme: Some(Scheme::Reps),
                secondary_value: Some(secondary_value),
            }),
            tiebreak: None,
        }
    }

    pub fn unscored(scheme: Scheme, status: ScoreStatus) -> Self {
        Score {
            scheme,
            score_type: None,
            value: None,
            status,
            time_cap: None,
            tiebreak: None,
        }
    }

    pub fn with_tiebreak(mut self, scheme: Scheme, value: i64) -> Self {
        self.tiebreak = Some(Tiebreak { scheme, value });
        self
    }
}
