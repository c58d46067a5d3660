use std::cmp::Ordering;

use itertools::Itertools;

use crate::score::Score;
use crate::sort_key::compare_scores;

// Competition ranking ("1224"): a result's rank is one more than the number
// of strictly better results, so tied athletes share a rank and the next
// place skips past them.
pub fn find_rank(field: &[Score], target: &Score) -> usize {
    1 + field.iter().filter(|score| compare_scores(score, target) == Ordering::Less).count()
}

pub fn rank_field(field: &[Score]) -> Vec<usize> {
    field.iter().map(|score| find_rank(field, score)).collect()
}

// Indices of the field from first place to last. Ties keep input order, so
// re-running on an already-ordered field is a no-op.
pub fn standings(field: &[Score]) -> Vec<usize> {
    (0..field.len())
        .sorted_by(|&a, &b| compare_scores(&field[a], &field[b]))
        .collect()
}

pub fn sort_field(field: &mut [Score]) {
    field.sort_by(compare_scores);
}
