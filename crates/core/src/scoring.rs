//! Scoring module - points per matched run
//!
//! Score is attributed per run, not per cell: a cell at the crossing of a
//! horizontal and a vertical run contributes to both runs' points.

use crate::types::{MATCH_SCORES, MIN_MATCH_LEN};

/// Points for a single run of `len` same-kind items.
///
/// Runs shorter than [`MIN_MATCH_LEN`] are not matches and score 0. Runs
/// longer than the table are capped at the last entry.
pub fn run_score(len: usize) -> u32 {
    if len < MIN_MATCH_LEN {
        return 0;
    }
    let idx = (len - MIN_MATCH_LEN).min(MATCH_SCORES.len() - 1);
    MATCH_SCORES[idx]
}

/// Total points for a set of run lengths
pub fn total_run_score(runs: impl IntoIterator<Item = usize>) -> u32 {
    runs.into_iter()
        .map(run_score)
        .fold(0u32, |acc, s| acc.saturating_add(s))
}
