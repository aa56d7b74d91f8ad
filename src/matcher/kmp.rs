//! Knuth-Morris-Pratt single-pattern search
use super::{ScanOutcome, SinglePatternMatcher};

/// KMP matcher with a precomputed border function
#[derive(Debug, Clone)]
pub struct Kmp {
    pattern: Vec<char>,
    border: Vec<usize>,
}

impl Kmp {
    pub fn new(pattern: &str) -> Self {
        let pattern: Vec<char> = pattern.chars().collect();
        let border = border_function(&pattern);
        Self { pattern, border }
    }

    /// `border()[i]` is the longest proper border of the first `i` pattern characters.
    pub fn border(&self) -> &[usize] {
        &self.border
    }

    /// Count non-overlapping occurrences, scanning left to right.
    ///
    /// After a full match the automaton restarts at the pattern start, so the
    /// next occurrence must begin after the one just counted.
    pub fn scan(&self, text: &[char]) -> ScanOutcome {
        let m = self.pattern.len();
        if m == 0 || text.len() < m {
            return ScanOutcome::NONE;
        }

        let mut outcome = ScanOutcome::NONE;
        let mut j = 0;
        for (i, &c) in text.iter().enumerate() {
            while j > 0 && c != self.pattern[j] {
                j = self.border[j];
            }
            if c == self.pattern[j] {
                j += 1;
            }
            if j == m {
                outcome.count += 1;
                outcome.last_match = Some(i + 1 - m);
                j = 0;
            }
        }

        outcome
    }
}

impl SinglePatternMatcher for Kmp {
    fn scan(&self, text: &[char]) -> ScanOutcome {
        Kmp::scan(self, text)
    }

    fn name(&self) -> &'static str {
        "KMP"
    }
}

/// Border table of length `pattern.len() + 1`, with `border[0] == 0`.
pub fn border_function(pattern: &[char]) -> Vec<usize> {
    let m = pattern.len();
    let mut border = vec![0; m + 1];
    let mut k = 0;
    for i in 1..m {
        while k > 0 && pattern[i] != pattern[k] {
            k = border[k];
        }
        if pattern[i] == pattern[k] {
            k += 1;
        }
        border[i + 1] = k;
    }
    border
}

/// One-shot KMP count of `pattern` in `text`.
pub fn count(text: &str, pattern: &str) -> ScanOutcome {
    let text: Vec<char> = text.chars().collect();
    Kmp::new(pattern).scan(&text)
}
