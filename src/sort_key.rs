use std::cmp::Ordering;

use crate::scheme::{sort_direction, ScoreDirection};
use crate::score::{Score, ScoreStatus};

// A packed ranking key: status tier in the top bits, value component below.
// Comparing keys as plain integers ranks better results first regardless of
// scheme direction, which is what lets byte-ordered stores index on it.
pub const STATUS_SHIFT: u32 = 60;

const VALUE_MASK: u64 = (1 << STATUS_SHIFT) - 1;

pub fn compute_sort_key(score: &Score) -> u64 {
    compute_sort_key_with_direction(
        score.value,
        score.status,
        sort_direction(score.scheme, score.score_type),
    )
}

// The packing primitive under `compute_sort_key`: a bare value and direction
// with no scheme attached. The component `VALUE_MASK` is reserved for a null
// value, so real values clamp into `[0, VALUE_MASK - 1]` in either direction
// and a zero score on a descending scheme stays distinguishable from null.
pub fn compute_sort_key_with_direction(
    value: Option<i64>, status: ScoreStatus, direction: ScoreDirection,
) -> u64 {
    let component = match value {
        None => VALUE_MASK, // sorts last within its tier
        Some(value) => {
            let value = value.clamp(0, VALUE_MASK as i64 - 1) as u64;
            match direction {
                ScoreDirection::Asc => value,
                ScoreDirection::Desc => VALUE_MASK - 1 - value,
            }
        }
    };
    (u64::from(status.order()) << STATUS_SHIFT) | component
}

// Fixed-width decimal rendering: the largest possible key has 19 digits, so
// zero-padding to 19 makes lexicographic order equal numeric order.
pub fn sort_key_to_string(key: u64) -> String {
    format!("{key:019}")
}

// Exact inverse of `compute_sort_key_with_direction` for keys built from a
// real in-range value; a null-value key comes back as `None`.
pub fn extract_from_sort_key(
    key: u64, direction: ScoreDirection,
) -> (Option<ScoreStatus>, Option<i64>) {
    let status = ScoreStatus::from_order((key >> STATUS_SHIFT) as u8);
    let component = key & VALUE_MASK;
    if component == VALUE_MASK {
        return (status, None);
    }
    let value = match direction {
        ScoreDirection::Asc => component as i64,
        ScoreDirection::Desc => (VALUE_MASK - 1 - component) as i64,
    };
    (status, Some(value))
}

// Full ordering of two results. The packed key decides almost everything; two
// refinements apply only when the keys tie:
//   - both capped with a recorded secondary: more work at the buzzer ranks
//     first;
//   - both carrying a tiebreak in the same scheme: the tiebreak scheme's own
//     direction decides.
// A refinement recorded on only one side never moves either athlete. That
// rule makes the comparison non-transitive when tiebreak data is partial
// (two different tiebreaks both tie against a missing one without tying
// against each other), so a sorted order over such a field is one valid
// order, not a canonical one.
pub fn compare_scores(a: &Score, b: &Score) -> Ordering {
    let primary = compute_sort_key(a).cmp(&compute_sort_key(b));
    if primary != Ordering::Equal {
        return primary;
    }
    if a.status == ScoreStatus::Cap && b.status == ScoreStatus::Cap {
        let secondary_a = a.time_cap.as_ref().and_then(|tc| tc.secondary_value);
        let secondary_b = b.time_cap.as_ref().and_then(|tc| tc.secondary_value);
        if let (Some(secondary_a), Some(secondary_b)) = (secondary_a, secondary_b) {
            let refined = secondary_b.cmp(&secondary_a);
            if refined != Ordering::Equal {
                return refined;
            }
        }
    }
    if let (Some(tb_a), Some(tb_b)) = (&a.tiebreak, &b.tiebreak) {
        if tb_a.scheme == tb_b.scheme {
            let refined = match sort_direction(tb_a.scheme, None) {
                ScoreDirection::Asc => tb_a.value.cmp(&tb_b.value),
                ScoreDirection::Desc => tb_b.value.cmp(&tb_a.value),
            };
            if refined != Ordering::Equal {
                return refined;
            }
        }
    }
    Ordering::Equal
}
