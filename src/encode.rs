use chain_cmp::chmp;
use itertools::Itertools;
use lazy_static::lazy_static;
use log::debug;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::scheme::{DistanceUnit, LoadUnit, Scheme};

// Composite rounds-reps encoding: `rounds * ROUNDS_REPS_BASE + reps`.
// Reps must stay below the base so they never carry into the rounds digits.
pub const ROUNDS_REPS_BASE: i64 = 100_000;

const MS_PER_SEC: i64 = 1000;
const GRAMS_PER_KG: f64 = 1000.0;
const GRAMS_PER_POUND: f64 = 453.592;
const MM_PER_METER: f64 = 1000.0;
const MM_PER_KM: f64 = 1_000_000.0;
const MM_PER_FOOT: f64 = 304.8;
const MM_PER_MILE: f64 = 1_609_344.0;

// Unit context for schemes whose raw input is unit-dependent. Absent units
// fall back to the scheme defaults: pounds for load, the scheme's own unit
// for distance.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct EncodeOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_unit: Option<LoadUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_unit: Option<DistanceUnit>,
}

impl EncodeOptions {
    pub fn load(unit: LoadUnit) -> Self {
        EncodeOptions { load_unit: Some(unit), ..EncodeOptions::default() }
    }
    pub fn distance(unit: DistanceUnit) -> Self {
        EncodeOptions { distance_unit: Some(unit), ..EncodeOptions::default() }
    }
}

// Every function in this module is pure and total: malformed input yields
// `None`, never a panic.

// Accepts "SS", "M:SS" and "H:MM:SS", each with an optional ".fff" fractional
// suffix. A bare number is raw seconds and may exceed 59; so may the minute
// component when no hour segment is present ("120:30" is 120 minutes).
pub fn encode_time(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if !raw.contains(':') {
        let (whole, frac_ms) = split_fraction(raw)?;
        let seconds: i64 = parse_digits(whole)?;
        return Some(seconds * MS_PER_SEC + frac_ms);
    }
    lazy_static! {
        static ref TIME_RE: Regex =
            Regex::new(r"^(\d+):(\d{1,2})(?::(\d{1,2}))?(?:\.(\d{1,3}))?$").unwrap();
    }
    let cap = TIME_RE.captures(raw)?;
    let first: i64 = cap.get(1).unwrap().as_str().parse().ok()?;
    let second: i64 = cap.get(2).unwrap().as_str().parse().ok()?;
    let frac_ms = cap.get(4).map_or(0, |m| fraction_ms(m.as_str()));
    let total_seconds = match cap.get(3) {
        Some(third) => {
            // H:MM:SS
            let third: i64 = third.as_str().parse().ok()?;
            if second >= 60 || third >= 60 {
                return None;
            }
            first * 3600 + second * 60 + third
        }
        None => {
            // M:SS
            if second >= 60 {
                return None;
            }
            first * 60 + second
        }
    };
    Some(total_seconds * MS_PER_SEC + frac_ms)
}

pub fn encode_time_from_seconds(seconds: f64) -> i64 {
    (seconds * MS_PER_SEC as f64).round() as i64
}

// "R+reps" or a bare "R" (R complete rounds, zero reps). Whitespace around
// the '+' is tolerated.
pub fn encode_rounds_reps(raw: &str) -> Option<i64> {
    lazy_static! {
        static ref ROUNDS_REPS_RE: Regex =
            Regex::new(r"^(\d+)(?:\s*\+\s*(\d+))?$").unwrap();
    }
    let cap = ROUNDS_REPS_RE.captures(raw.trim())?;
    let rounds: i64 = cap.get(1).unwrap().as_str().parse().ok()?;
    let reps: i64 = match cap.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    encode_rounds_reps_from_parts(rounds, reps)
}

pub fn encode_rounds_reps_from_parts(rounds: i64, reps: i64) -> Option<i64> {
    if rounds < 0 || !chmp!(0 <= reps < ROUNDS_REPS_BASE) {
        return None;
    }
    Some(rounds * ROUNDS_REPS_BASE + reps)
}

// Exact inverse of the rounds-reps encoding.
pub fn extract_rounds_reps(value: i64) -> (i64, i64) {
    (value / ROUNDS_REPS_BASE, value % ROUNDS_REPS_BASE)
}

pub fn encode_load(raw: &str, unit: LoadUnit) -> Option<i64> {
    encode_load_from_number(parse_non_negative(raw)?, unit)
}

pub fn encode_load_from_number(value: f64, unit: LoadUnit) -> Option<i64> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let grams = match unit {
        LoadUnit::Kg => value * GRAMS_PER_KG,
        LoadUnit::Lbs => value * GRAMS_PER_POUND,
    };
    Some(grams.round() as i64)
}

pub fn encode_distance(raw: &str, unit: DistanceUnit) -> Option<i64> {
    encode_distance_from_number(parse_non_negative(raw)?, unit)
}

pub fn encode_distance_from_number(value: f64, unit: DistanceUnit) -> Option<i64> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let mm = match unit {
        DistanceUnit::M => value * MM_PER_METER,
        DistanceUnit::Km => value * MM_PER_KM,
        DistanceUnit::Ft => value * MM_PER_FOOT,
        DistanceUnit::Mi => value * MM_PER_MILE,
    };
    Some(mm.round() as i64)
}

// Scheme-dispatched encoding of a raw score string into canonical units.
// Unit suffixes in numeric input ("225 lbs", "1000m") are ignored; the unit
// comes from `options` and the scheme, never from the text.
pub fn encode_score(raw: &str, scheme: Scheme, options: &EncodeOptions) -> Option<i64> {
    let raw = raw.trim();
    match scheme {
        Scheme::Time | Scheme::TimeWithCap | Scheme::Emom => encode_time(raw),
        Scheme::RoundsReps => encode_rounds_reps(raw),
        Scheme::Load => {
            let unit = options.load_unit.unwrap_or(LoadUnit::Lbs);
            encode_load(&strip_numeric(raw), unit)
        }
        Scheme::Meters => {
            let unit = options.distance_unit.unwrap_or(DistanceUnit::M);
            encode_distance(&strip_numeric(raw), unit)
        }
        Scheme::Feet => {
            let unit = options.distance_unit.unwrap_or(DistanceUnit::Ft);
            encode_distance(&strip_numeric(raw), unit)
        }
        Scheme::Reps | Scheme::Calories => {
            // Decimals truncate without error ("150.5" counts as 150).
            let value = parse_non_negative(&strip_numeric(raw))?;
            Some(value.trunc() as i64)
        }
        Scheme::Points => {
            // Points may legitimately go negative (penalties).
            let value: f64 = strip_numeric(raw).parse().ok()?;
            if !value.is_finite() {
                return None;
            }
            Some(value.trunc() as i64)
        }
        Scheme::PassFail => match raw.to_lowercase().as_str() {
            "pass" | "p" | "yes" | "1" => Some(1),
            "fail" | "f" | "no" | "0" => Some(0),
            _ => None,
        },
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Min,
    Max,
    Sum,
    Average,
    First,
    Last,
}

// One athlete's entry for a single round of a multi-round event.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct RoundInput {
    pub raw: String,
    // Mixed-measurement events record a different scheme per round.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme_override: Option<Scheme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_unit: Option<LoadUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_unit: Option<DistanceUnit>,
}

impl RoundInput {
    pub fn new(raw: impl Into<String>) -> Self {
        RoundInput { raw: raw.into(), ..RoundInput::default() }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EncodedRounds {
    // One slot per input round; un-encodable rounds keep a `None` slot so
    // round numbering survives.
    pub rounds: Vec<Option<i64>>,
    // Aggregate over the encodable rounds; `None` when there are none.
    pub aggregated: Option<i64>,
}

pub fn encode_rounds(
    inputs: &[RoundInput], scheme: Scheme, aggregation: Aggregation, options: &EncodeOptions,
) -> EncodedRounds {
    let rounds = inputs
        .iter()
        .enumerate()
        .map(|(i, input)| {
            let round_scheme = input.scheme_override.unwrap_or(scheme);
            let round_options = EncodeOptions {
                load_unit: input.load_unit.or(options.load_unit),
                distance_unit: input.distance_unit.or(options.distance_unit),
            };
            let encoded = encode_score(&input.raw, round_scheme, &round_options);
            if encoded.is_none() {
                debug!("round {} not encodable as {:?}: {:?}", i + 1, round_scheme, input.raw);
            }
            encoded
        })
        .collect_vec();
    let values = rounds.iter().copied().flatten().collect_vec();
    let aggregated = aggregate_values(&values, aggregation);
    EncodedRounds { rounds, aggregated }
}

pub fn aggregate_values(values: &[i64], aggregation: Aggregation) -> Option<i64> {
    if values.is_empty() {
        return None;
    }
    let ret = match aggregation {
        Aggregation::Min => *values.iter().min().unwrap(),
        Aggregation::Max => *values.iter().max().unwrap(),
        Aggregation::Sum => values.iter().sum(),
        Aggregation::Average => {
            let sum: i64 = values.iter().sum();
            (sum as f64 / values.len() as f64).round() as i64
        }
        Aggregation::First => values[0],
        Aggregation::Last => *values.last().unwrap(),
    };
    Some(ret)
}

fn strip_numeric(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+')).collect()
}

fn parse_digits(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn parse_non_negative(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value)
}

// Splits "34.5" into ("34", 500). At most three fractional digits.
fn split_fraction(raw: &str) -> Option<(&str, i64)> {
    match raw.split_once('.') {
        Some((whole, frac)) => {
            if frac.is_empty() || frac.len() > 3 || !frac.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            Some((whole, fraction_ms(frac)))
        }
        None => Some((raw, 0)),
    }
}

fn fraction_ms(digits: &str) -> i64 {
    let value: i64 = digits.parse().unwrap_or(0);
    value * 10_i64.pow(3 - digits.len() as u32)
}
