//! Candidate ranking. Descending by published score; ties keep input order.

use crate::matching::MatchReport;

/// Anything carrying a published match percentage.
pub trait Scored {
    fn match_score(&self) -> u32;
}

impl Scored for MatchReport {
    fn match_score(&self) -> u32 {
        self.match_score_percent
    }
}

/// Sorts by descending score. The sort is stable and there is no secondary
/// key, so equal scores retain their relative input order.
pub fn rank_candidates<T: Scored>(mut results: Vec<T>) -> Vec<T> {
    results.sort_by(|a, b| b.match_score().cmp(&a.match_score()));
    results
}

/// The `count` best-ranked results.
pub fn top_candidates<T: Scored>(results: Vec<T>, count: usize) -> Vec<T> {
    let mut ranked = rank_candidates(results);
    ranked.truncate(count);
    ranked
}
