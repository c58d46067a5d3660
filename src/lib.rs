#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod encode;
pub mod format;
pub mod parse;
pub mod points;
pub mod rank;
pub mod scheme;
pub mod score;
pub mod sort_key;

pub use encode::{
    aggregate_values, encode_distance, encode_distance_from_number, encode_load,
    encode_load_from_number, encode_rounds, encode_rounds_reps, encode_rounds_reps_from_parts,
    encode_score, encode_time, encode_time_from_seconds, extract_rounds_reps, Aggregation,
    EncodeOptions, EncodedRounds, RoundInput, ROUNDS_REPS_BASE,
};
pub use format::{
    decode_score, format_ms, format_rounds, format_score, format_score_with_tiebreak,
    format_value, FormatOptions,
};
pub use parse::{
    parse_score, parse_tiebreak, parse_time, ParseError, ParseOptions, ParseWarning, ParsedScore,
    TimePrecision,
};
pub use points::{
    calculate_custom_points, calculate_p_scores, generate_points_table, online_points,
    points_for_place, traditional_points, winner_takes_more_points, BaseTemplate,
    CustomTableConfig, MedianField, PScoreConfig, PScoreResult, PointsSystem, TraditionalConfig,
    WINNER_TAKES_MORE_TABLE,
};
pub use rank::{find_rank, rank_field, sort_field, standings};
pub use scheme::{
    is_lower_better, sort_direction, DistanceUnit, LoadUnit, Scheme, ScoreDirection, ScoreType,
};
pub use score::{Score, ScoreStatus, Tiebreak, TimeCap};
pub use sort_key::{
    compare_scores, compute_sort_key, compute_sort_key_with_direction, extract_from_sort_key,
    sort_key_to_string,
};
