// Shared between integration tests; not every test uses every helper.
#![allow(dead_code)]

use podium::{
    compare_scores, encode_time, parse_score, ParseOptions, Scheme, Score, ScoreStatus,
};

// One leaderboard line: an athlete name plus their recorded result.
#[derive(Clone, Debug)]
pub struct Entry {
    pub name: &'static str,
    pub score: Score,
}

pub fn entry(name: &'static str, score: Score) -> Entry {
    Entry { name, score }
}

// Builds a score the way the scoring pipeline does: raw operator input goes
// through the parser, and the parsed status decides the record shape.
pub fn parsed_entry(name: &'static str, raw: &str, scheme: Scheme) -> Entry {
    let parsed = parse_score(raw, scheme, &ParseOptions::default())
        .unwrap_or_else(|err| panic!("bad input {raw:?}: {err}"));
    let score = match (parsed.status, parsed.encoded) {
        (ScoreStatus::Scored, Some(value)) => Score::scored(scheme, value),
        (status, _) => Score::unscored(scheme, status),
    };
    entry(name, score)
}

pub fn capped_entry(name: &'static str, scheme: Scheme, cap: &str, reps: i64) -> Entry {
    let cap_ms = encode_time(cap).unwrap_or_else(|| panic!("bad cap {cap:?}"));
    entry(name, Score::capped(scheme, cap_ms, reps))
}

// Final standings as (name, rank) pairs, first place first. Competition
// ranking: ties share a rank and the next place skips past them.
pub fn leaderboard(entries: &[Entry]) -> Vec<(&'static str, usize)> {
    let scores: Vec<_> = entries.iter().map(|e| e.score.clone()).collect();
    podium::standings(&scores)
        .into_iter()
        .map(|i| (entries[i].name, podium::find_rank(&scores, &entries[i].score)))
        .collect()
}

pub fn assert_tied(a: &Score, b: &Score) {
    assert_eq!(compare_scores(a, b), std::cmp::Ordering::Equal, "{a:?} vs {b:?}");
}
