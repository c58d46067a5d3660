use serde::{Deserialize, Serialize};

use crate::encode::extract_rounds_reps;
use crate::scheme::{LoadUnit, Scheme};
use crate::score::{Score, ScoreStatus};

const MS_PER_SEC: i64 = 1000;

const GRAMS_PER_KG: f64 = 1000.0;
const GRAMS_PER_POUND: f64 = 453.592;
const MM_PER_METER: f64 = 1000.0;
const MM_PER_FOOT: f64 = 304.8;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct FormatOptions {
    pub load_unit: LoadUnit,
    // Whether to append unit suffixes ("225 lbs" vs "225").
    pub include_unit: bool,
    // Whether to wrap non-scored results in their status ("CAP (142 reps)"
    // vs the bare "142 reps").
    pub show_status: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions { load_unit: LoadUnit::Lbs, include_unit: true, show_status: true }
    }
}

// Canonical clock rendering: "M:SS", or "H:MM:SS" from one hour up, with a
// ".fff" suffix only when the value has sub-second precision. Minutes are not
// zero-padded ("0:34", not "00:34").
pub fn format_ms(ms: i64) -> String {
    let total_seconds = ms / MS_PER_SEC;
    let millis = ms % MS_PER_SEC;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    let mut ret = if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    };
    if millis > 0 {
        ret.push_str(&format!(".{millis:03}"));
    }
    ret
}

// Canonical display of an encoded value in its scheme. The inverse of
// `encode_score` for canonical values: feeding the output back through the
// parser reproduces the same encoding.
pub fn format_value(value: i64, scheme: Scheme, options: &FormatOptions) -> String {
    match scheme {
        Scheme::Time | Scheme::TimeWithCap | Scheme::Emom => format_ms(value),
        Scheme::RoundsReps => {
            let (rounds, reps) = extract_rounds_reps(value);
            format!("{rounds:02}+{reps:02}")
        }
        Scheme::Load => {
            let (amount, suffix) = match options.load_unit {
                LoadUnit::Kg => (value as f64 / GRAMS_PER_KG, " kg"),
                LoadUnit::Lbs => (value as f64 / GRAMS_PER_POUND, " lbs"),
            };
            let amount = trim_number(amount);
            if options.include_unit { format!("{amount}{suffix}") } else { amount }
        }
        Scheme::Meters => {
            let amount = trim_number(value as f64 / MM_PER_METER);
            if options.include_unit { format!("{amount}m") } else { amount }
        }
        Scheme::Feet => {
            let amount = trim_number(value as f64 / MM_PER_FOOT);
            if options.include_unit { format!("{amount}ft") } else { amount }
        }
        Scheme::Reps | Scheme::Calories | Scheme::Points => value.to_string(),
        Scheme::PassFail => {
            if value == 0 { "Fail".to_owned() } else { "Pass".to_owned() }
        }
    }
}

// `format_value` with default options; display inverse of `encode_score`.
pub fn decode_score(value: i64, scheme: Scheme) -> String {
    format_value(value, scheme, &FormatOptions::default())
}

// Full leaderboard-cell rendering, status included.
pub fn format_score(score: &Score, options: &FormatOptions) -> String {
    match score.status {
        ScoreStatus::Scored => match score.value {
            Some(value) => format_value(value, score.scheme, options),
            None => "N/A".to_owned(),
        },
        ScoreStatus::Cap => {
            let secondary = score.time_cap.as_ref().and_then(|tc| {
                let scheme = tc.secondary_scheme.unwrap_or(Scheme::Reps);
                tc.secondary_value.map(|v| {
                    let formatted = format_value(v, scheme, options);
                    if scheme.is_count() { format!("{formatted} reps") } else { formatted }
                })
            });
            match (options.show_status, secondary) {
                (true, Some(secondary)) => format!("CAP ({secondary})"),
                (false, Some(secondary)) => secondary,
                // No secondary recorded: fall back to the cap clock if known.
                (true, None) => match score.time_cap.as_ref() {
                    Some(tc) => format!("CAP ({})", format_ms(tc.ms)),
                    None => "CAP".to_owned(),
                },
                (false, None) => "CAP".to_owned(),
            }
        }
        ScoreStatus::Dq => "DQ".to_owned(),
        ScoreStatus::Withdrawn => "WD".to_owned(),
        ScoreStatus::Dns => "DNS".to_owned(),
        ScoreStatus::Dnf => "DNF".to_owned(),
    }
}

pub fn format_score_with_tiebreak(score: &Score) -> String {
    let options = FormatOptions::default();
    let main = format_score(score, &options);
    match &score.tiebreak {
        Some(tb) => {
            format!("{main} (TB: {})", format_value(tb.value, tb.scheme, &options))
        }
        None => main,
    }
}

// Per-round display for multi-round results. Rounds that failed to encode
// render as "N/A".
pub fn format_rounds(
    rounds: &[Option<i64>], scheme: Scheme, options: &FormatOptions,
) -> Vec<String> {
    rounds
        .iter()
        .map(|round| match round {
            Some(value) => format_value(*value, scheme, options),
            None => "N/A".to_owned(),
        })
        .collect()
}

// Renders with up to three decimal places, trailing zeros trimmed.
fn trim_number(value: f64) -> String {
    let mut ret = format!("{value:.3}");
    while ret.ends_with('0') {
        ret.pop();
    }
    if ret.ends_with('.') {
        ret.pop();
    }
    ret
}
