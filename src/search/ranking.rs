use crate::matcher::MatchMap;
use serde::Serialize;

/// Matches found in one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedResult {
    pub id: u64,
    pub matches: MatchMap,
}

impl RankedResult {
    pub fn new(id: u64, matches: MatchMap) -> Self {
        Self { id, matches }
    }

    /// Sum of all occurrence counts.
    pub fn total(&self) -> usize {
        self.matches.values().sum()
    }
}

/// Keep documents with matches, order by total descending and cut to `top_n`.
///
/// The sort is stable: equal totals keep their input (corpus) order.
pub fn rank(candidates: Vec<RankedResult>, top_n: usize) -> Vec<RankedResult> {
    let mut ranked: Vec<RankedResult> = candidates
        .into_iter()
        .filter(|r| !r.matches.is_empty())
        .collect();
    ranked.sort_by(|a, b| b.total().cmp(&a.total()));
    ranked.truncate(top_n);
    ranked
}
