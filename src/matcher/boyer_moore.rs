//! Boyer-Moore search using the bad-character heuristic only
use super::{ScanOutcome, SinglePatternMatcher};
use std::collections::HashMap;

/// Boyer-Moore matcher for one pattern
#[derive(Debug, Clone)]
pub struct BoyerMoore {
    pattern: Vec<char>,
}

impl BoyerMoore {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.chars().collect(),
        }
    }

    /// Count non-overlapping occurrences, comparing right to left at each alignment.
    pub fn scan(&self, text: &[char]) -> ScanOutcome {
        let m = self.pattern.len();
        let n = text.len();
        if m == 0 || n < m {
            return ScanOutcome::NONE;
        }

        let table = last_occurrence_table(text, &self.pattern);
        let mut outcome = ScanOutcome::NONE;
        let mut i = 0;
        while i + m <= n {
            let mismatch = (0..m).rev().find(|&j| text[i + j] != self.pattern[j]);
            match mismatch {
                None => {
                    outcome.count += 1;
                    outcome.last_match = Some(i);
                    i += m;
                }
                Some(j) => {
                    let last = table.get(&text[i + j]).copied().unwrap_or(-1);
                    i += bad_character_shift(j, last);
                }
            }
        }

        outcome
    }
}

impl SinglePatternMatcher for BoyerMoore {
    fn scan(&self, text: &[char]) -> ScanOutcome {
        BoyerMoore::scan(self, text)
    }

    fn name(&self) -> &'static str {
        "Boyer-Moore"
    }
}

/// Last index in `pattern` of every symbol present in `text`, `-1` when absent.
pub fn last_occurrence_table(text: &[char], pattern: &[char]) -> HashMap<char, isize> {
    let mut table: HashMap<char, isize> = text.iter().map(|&c| (c, -1)).collect();
    for (idx, c) in pattern.iter().enumerate() {
        if let Some(slot) = table.get_mut(c) {
            *slot = idx as isize;
        }
    }
    table
}

/// Shift after a mismatch at pattern offset `j` against a symbol whose last
/// pattern occurrence is `last`.
///
/// Aligns that occurrence under the mismatching symbol, or moves past it when
/// the symbol is absent. At `j == len - 1` this is `len` for an absent symbol
/// and `len - 1 - last` otherwise. An occurrence right of `j` would need a
/// backward move, so the window advances by one.
#[inline]
fn bad_character_shift(j: usize, last: isize) -> usize {
    let j = j as isize;
    if last < j { (j - last) as usize } else { 1 }
}

/// One-shot Boyer-Moore count of `pattern` in `text`.
pub fn count(text: &str, pattern: &str) -> ScanOutcome {
    let text: Vec<char> = text.chars().collect();
    BoyerMoore::new(pattern).scan(&text)
}
