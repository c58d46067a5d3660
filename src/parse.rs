use std::fmt;

use serde::{Deserialize, Serialize};

use crate::encode::{
    encode_rounds_reps, encode_score, encode_time, encode_time_from_seconds, EncodeOptions,
};
use crate::format::{format_ms, format_value, FormatOptions};
use crate::scheme::{LoadUnit, Scheme};
use crate::score::ScoreStatus;

// How to read bare digits in time input when no notation disambiguates them.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePrecision {
    // Clock heuristic: 1-2 digits are seconds, "530" is 5:30, "1230" is
    // 12:30, "13015" is 1:30:15, "123456" is 12:34:56.
    #[default]
    Auto,
    // Bare digits are a raw second count.
    Seconds,
    // Bare digits are a raw millisecond count.
    Millis,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct ParseOptions {
    pub precision: TimePrecision,
    pub encode: EncodeOptions,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ParseWarning {
    // "7" in a rounds-reps event reads as seven complete rounds, which is
    // frequently an operator forgetting the "+reps" part.
    BareRoundsNumber,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::BareRoundsNumber => {
                write!(f, "Bare number read as complete rounds; use rounds+reps for a partial round")
            }
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ParsedScore {
    // Canonical encoded value; `None` for non-scored statuses.
    pub encoded: Option<i64>,
    // Canonical display of the accepted input. Feeding it back into the
    // parser yields the same encoding.
    pub formatted: String,
    pub status: ScoreStatus,
    pub warnings: Vec<ParseWarning>,
}

impl ParsedScore {
    fn scored(encoded: i64, formatted: String) -> Self {
        ParsedScore {
            encoded: Some(encoded),
            formatted,
            status: ScoreStatus::Scored,
            warnings: vec![],
        }
    }

    fn unscored(status: ScoreStatus, formatted: &str) -> Self {
        ParsedScore { encoded: None, formatted: formatted.to_owned(), status, warnings: vec![] }
    }

    fn with_warning(mut self, warning: ParseWarning) -> Self {
        self.warnings.push(warning);
        self
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ParseError {
    EmptyInput,
    InvalidTime,
    InvalidRoundsReps,
    InvalidReps,
    InvalidLoad,
    InvalidCalories,
    InvalidDistance,
    InvalidPoints,
    InvalidPassFail,
    CapRequiresTimedScheme,
    TiebreakSchemeNotSupported(Scheme),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Operator-facing messages, shown verbatim in score entry forms.
        let message = match self {
            ParseError::EmptyInput => "Empty input",
            ParseError::InvalidTime => "Invalid time format",
            ParseError::InvalidRoundsReps => "Invalid rounds+reps format",
            ParseError::InvalidReps => "Invalid rep count",
            ParseError::InvalidLoad => "Invalid load",
            ParseError::InvalidCalories => "Invalid calorie count",
            ParseError::InvalidDistance => "Invalid distance",
            ParseError::InvalidPoints => "Invalid points",
            ParseError::InvalidPassFail => "Enter 'pass' or 'fail'",
            ParseError::CapRequiresTimedScheme => "CAP is only valid for timed workouts",
            ParseError::TiebreakSchemeNotSupported(_) => {
                "Tiebreaks are recorded as time or reps only"
            }
        };
        write!(f, "{message}")
    }
}

impl std::error::Error for ParseError {}

// Lenient time entry. Notation with a colon or a decimal point is taken at
// face value; bare digits go through the configured precision.
pub fn parse_time(raw: &str, options: &ParseOptions) -> Result<ParsedScore, ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let ms = if raw.contains(':') {
        encode_time(raw).ok_or(ParseError::InvalidTime)?
    } else if raw.contains('.') {
        let seconds: f64 = raw.parse().map_err(|_| ParseError::InvalidTime)?;
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(ParseError::InvalidTime);
        }
        encode_time_from_seconds(seconds)
    } else {
        if !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseError::InvalidTime);
        }
        match options.precision {
            TimePrecision::Auto => digits_as_clock(raw).ok_or(ParseError::InvalidTime)?,
            TimePrecision::Seconds => {
                let seconds: i64 = raw.parse().map_err(|_| ParseError::InvalidTime)?;
                seconds * 1000
            }
            TimePrecision::Millis => raw.parse().map_err(|_| ParseError::InvalidTime)?,
        }
    };
    Ok(ParsedScore::scored(ms, format_ms(ms)))
}

// Full score entry for a scheme: status shorthand first, then scheme-specific
// notation.
pub fn parse_score(
    raw: &str, scheme: Scheme, options: &ParseOptions,
) -> Result<ParsedScore, ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    if let Some(parsed) = parse_status_word(raw, scheme)? {
        return Ok(parsed);
    }
    match scheme {
        Scheme::Time | Scheme::TimeWithCap | Scheme::Emom => parse_time(raw, options),
        Scheme::RoundsReps => {
            let encoded = encode_rounds_reps(raw).ok_or(ParseError::InvalidRoundsReps)?;
            let formatted = format_value(encoded, scheme, &format_options(options));
            let parsed = ParsedScore::scored(encoded, formatted);
            if !raw.contains('+') {
                Ok(parsed.with_warning(ParseWarning::BareRoundsNumber))
            } else {
                Ok(parsed)
            }
        }
        _ => {
            let encoded =
                encode_score(raw, scheme, &options.encode).ok_or(value_error(scheme))?;
            let formatted = format_value(encoded, scheme, &format_options(options));
            Ok(ParsedScore::scored(encoded, formatted))
        }
    }
}

// Tiebreaks are restricted to the schemes the comparator knows how to refine.
pub fn parse_tiebreak(raw: &str, scheme: Scheme) -> Result<ParsedScore, ParseError> {
    if !scheme.supports_tiebreak() {
        return Err(ParseError::TiebreakSchemeNotSupported(scheme));
    }
    parse_score(raw, scheme, &ParseOptions::default())
}

fn parse_status_word(raw: &str, scheme: Scheme) -> Result<Option<ParsedScore>, ParseError> {
    let ret = match raw.to_lowercase().as_str() {
        "dns" | "did not start" => ParsedScore::unscored(ScoreStatus::Dns, "DNS"),
        "dnf" | "did not finish" => ParsedScore::unscored(ScoreStatus::Dnf, "DNF"),
        "wd" | "withdrawn" => ParsedScore::unscored(ScoreStatus::Withdrawn, "WD"),
        "dq" | "disqualified" => ParsedScore::unscored(ScoreStatus::Dq, "DQ"),
        "cap" | "c" => {
            if !matches!(scheme, Scheme::Time | Scheme::TimeWithCap) {
                return Err(ParseError::CapRequiresTimedScheme);
            }
            ParsedScore::unscored(ScoreStatus::Cap, "CAP")
        }
        _ => return Ok(None),
    };
    Ok(Some(ret))
}

fn value_error(scheme: Scheme) -> ParseError {
    match scheme {
        Scheme::Time | Scheme::TimeWithCap | Scheme::Emom => ParseError::InvalidTime,
        Scheme::RoundsReps => ParseError::InvalidRoundsReps,
        Scheme::Load => ParseError::InvalidLoad,
        Scheme::Meters | Scheme::Feet => ParseError::InvalidDistance,
        Scheme::Reps => ParseError::InvalidReps,
        Scheme::Calories => ParseError::InvalidCalories,
        Scheme::Points => ParseError::InvalidPoints,
        Scheme::PassFail => ParseError::InvalidPassFail,
    }
}

fn format_options(options: &ParseOptions) -> FormatOptions {
    FormatOptions {
        load_unit: options.encode.load_unit.unwrap_or(LoadUnit::Lbs),
        ..FormatOptions::default()
    }
}

// Clock reading of an all-digit string: the last two digits are seconds, the
// two before are minutes, the rest are hours. One or two digits are plain
// seconds and may exceed 59; longer forms validate each component.
fn digits_as_clock(digits: &str) -> Option<i64> {
    let (hours, minutes, seconds) = match digits.len() {
        1 | 2 => return Some(digits.parse::<i64>().ok()? * 1000),
        3 | 4 => {
            let split = digits.len() - 2;
            (0, digits[..split].parse::<i64>().ok()?, digits[split..].parse::<i64>().ok()?)
        }
        5 | 6 => {
            let split = digits.len() - 4;
            (
                digits[..split].parse::<i64>().ok()?,
                digits[split..split + 2].parse::<i64>().ok()?,
                digits[split + 2..].parse::<i64>().ok()?,
            )
        }
        _ => return None,
    };
    if minutes >= 60 || seconds >= 60 {
        return None;
    }
    Some((hours * 3600 + minutes * 60 + seconds) * 1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_digit_heuristic() {
        let cases = [
            ("5", Some(5_000)),
            ("45", Some(45_000)),
            ("90", Some(90_000)), // two digits stay raw seconds
            ("530", Some(330_000)),
            ("909", Some(549_000)),
            ("1230", Some(750_000)),
            ("13015", Some(5_415_000)),
            ("90130", Some(32_490_000)),
            ("123456", Some(45_296_000)),
            ("1234567", None), // too long for any clock reading
            ("170", None),     // 70 seconds is not a valid clock component
            ("16030", None),
        ];
        let options = ParseOptions::default();
        for (raw, expected) in cases {
            let result = parse_time(raw, &options);
            assert_eq!(result.ok().and_then(|p| p.encoded), expected, "raw: {raw:?}");
        }
    }

    #[test]
    fn time_notation_bypasses_heuristic() {
        let options = ParseOptions::default();
        assert_eq!(parse_time("12:34", &options).unwrap().encoded, Some(754_000));
        assert_eq!(parse_time("1:02:03", &options).unwrap().encoded, Some(3_723_000));
        assert_eq!(parse_time("90.5", &options).unwrap().encoded, Some(90_500));
        assert_eq!(parse_time("12:60", &options), Err(ParseError::InvalidTime));
        assert_eq!(parse_time("", &options), Err(ParseError::EmptyInput));
        assert_eq!(parse_time("   ", &options), Err(ParseError::EmptyInput));
    }

    #[test]
    fn time_precision_overrides() {
        let seconds =
            ParseOptions { precision: TimePrecision::Seconds, ..ParseOptions::default() };
        assert_eq!(parse_time("530", &seconds).unwrap().encoded, Some(530_000));
        let millis = ParseOptions { precision: TimePrecision::Millis, ..ParseOptions::default() };
        assert_eq!(parse_time("530", &millis).unwrap().encoded, Some(530));
        // Notation still reads as notation.
        assert_eq!(parse_time("5:30", &millis).unwrap().encoded, Some(330_000));
    }

    #[test]
    fn time_formatting_round_trip() {
        let options = ParseOptions::default();
        for raw in ["530", "12:34", "1:02:03", "90.5"] {
            let parsed = parse_time(raw, &options).unwrap();
            let reparsed = parse_time(&parsed.formatted, &options).unwrap();
            assert_eq!(reparsed.encoded, parsed.encoded, "raw: {raw:?}");
        }
    }

    #[test]
    fn status_words() {
        let options = ParseOptions::default();
        let cases = [
            ("dns", ScoreStatus::Dns, "DNS"),
            ("DNS", ScoreStatus::Dns, "DNS"),
            ("did not start", ScoreStatus::Dns, "DNS"),
            ("dnf", ScoreStatus::Dnf, "DNF"),
            ("did not finish", ScoreStatus::Dnf, "DNF"),
            ("wd", ScoreStatus::Withdrawn, "WD"),
            ("withdrawn", ScoreStatus::Withdrawn, "WD"),
            ("dq", ScoreStatus::Dq, "DQ"),
            ("disqualified", ScoreStatus::Dq, "DQ"),
            ("cap", ScoreStatus::Cap, "CAP"),
            ("C", ScoreStatus::Cap, "CAP"),
        ];
        for (raw, status, formatted) in cases {
            let parsed = parse_score(raw, Scheme::TimeWithCap, &options).unwrap();
            assert_eq!(parsed.status, status, "raw: {raw:?}");
            assert_eq!(parsed.formatted, formatted, "raw: {raw:?}");
            assert_eq!(parsed.encoded, None, "raw: {raw:?}");
        }
    }

    #[test]
    fn cap_requires_a_timed_scheme() {
        let options = ParseOptions::default();
        assert!(parse_score("cap", Scheme::Time, &options).is_ok());
        assert!(parse_score("cap", Scheme::TimeWithCap, &options).is_ok());
        for scheme in [Scheme::RoundsReps, Scheme::Reps, Scheme::Load, Scheme::Emom] {
            assert_eq!(
                parse_score("cap", scheme, &options),
                Err(ParseError::CapRequiresTimedScheme),
                "scheme: {scheme:?}"
            );
        }
    }

    #[test]
    fn scheme_dispatch() {
        let options = ParseOptions::default();
        let parsed = parse_score("5+12", Scheme::RoundsReps, &options).unwrap();
        assert_eq!(parsed.encoded, Some(500_012));
        assert_eq!(parsed.formatted, "05+12");
        assert!(parsed.warnings.is_empty());

        let parsed = parse_score("225 lbs", Scheme::Load, &options).unwrap();
        assert_eq!(parsed.encoded, Some(102_058));
        assert_eq!(parsed.formatted, "225 lbs");

        let parsed = parse_score("150", Scheme::Reps, &options).unwrap();
        assert_eq!(parsed.encoded, Some(150));
        assert_eq!(parsed.formatted, "150");

        let parsed = parse_score("pass", Scheme::PassFail, &options).unwrap();
        assert_eq!(parsed.encoded, Some(1));
        assert_eq!(parsed.formatted, "Pass");
    }

    #[test]
    fn bare_rounds_number_warns() {
        let options = ParseOptions::default();
        let parsed = parse_score("7", Scheme::RoundsReps, &options).unwrap();
        assert_eq!(parsed.encoded, Some(700_000));
        assert_eq!(parsed.warnings, vec![ParseWarning::BareRoundsNumber]);
    }

    #[test]
    fn error_messages() {
        let options = ParseOptions::default();
        let cases = [
            ("", Scheme::Time, "Empty input"),
            ("abc", Scheme::Time, "Invalid time format"),
            ("5+12+3", Scheme::RoundsReps, "Invalid rounds+reps format"),
            ("-5", Scheme::Reps, "Invalid rep count"),
            ("abc", Scheme::Load, "Invalid load"),
            ("abc", Scheme::Calories, "Invalid calorie count"),
            ("abc", Scheme::Meters, "Invalid distance"),
            ("abc", Scheme::Points, "Invalid points"),
            ("maybe", Scheme::PassFail, "Enter 'pass' or 'fail'"),
        ];
        for (raw, scheme, message) in cases {
            let err = parse_score(raw, scheme, &options).unwrap_err();
            assert_eq!(err.to_string(), message, "raw: {raw:?}");
        }
    }

    #[test]
    fn tiebreak_schemes_are_restricted() {
        assert_eq!(parse_tiebreak("8:30", Scheme::Time).unwrap().encoded, Some(510_000));
        assert_eq!(parse_tiebreak("150", Scheme::Reps).unwrap().encoded, Some(150));
        assert_eq!(
            parse_tiebreak("5+12", Scheme::RoundsReps),
            Err(ParseError::TiebreakSchemeNotSupported(Scheme::RoundsReps))
        );
        assert_eq!(
            parse_tiebreak("225", Scheme::Load),
            Err(ParseError::TiebreakSchemeNotSupported(Scheme::Load))
        );
    }
}
