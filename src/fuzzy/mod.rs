//! Approximate keyword search over whitespace-delimited word windows
//!
//! A keyword of `n` words is compared against every run of `n` consecutive
//! document words. Comparing whole windows rather than raw substrings lets a
//! misspelt token such as `javscript` still line up with `JavaScript`.
pub mod levenshtein;

use crate::error::{CvscanError, Result};
use crate::matcher::MatchMap;

pub use levenshtein::distance;

/// Similarity percentage a window needs to count as a match.
pub const DEFAULT_THRESHOLD: f64 = 80.0;

/// Outcome of a fuzzy search over one text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuzzyOutcome {
    pub found: bool,
    pub count: usize,
    /// Matched window text (as it appears in the document) to count.
    pub matches: MatchMap,
    /// Character offset of every accepted window, in document order.
    pub offsets: Vec<usize>,
}

/// Reject thresholds outside `0..=100` (including NaN).
pub fn validate_threshold(threshold: f64) -> Result<f64> {
    if threshold.is_finite() && (0.0..=100.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(CvscanError::InvalidThreshold(threshold))
    }
}

/// Case-insensitive similarity in percent:
/// `(1 - distance / max(len(pattern), len(candidate))) * 100`.
///
/// Two empty strings are identical.
pub fn similarity(pattern: &str, candidate: &str) -> f64 {
    let pattern: String = pattern.chars().flat_map(char::to_lowercase).collect();
    let candidate: String = candidate.chars().flat_map(char::to_lowercase).collect();
    let longest = pattern.chars().count().max(candidate.chars().count());
    if longest == 0 {
        return 100.0;
    }
    let same = longest - distance(&pattern, &candidate);
    100.0 * same as f64 / longest as f64
}

/// Slide a keyword-sized word window over `text` and collect the windows
/// whose similarity to `keyword` reaches `threshold`.
pub fn search(keyword: &str, text: &str, threshold: f64) -> FuzzyOutcome {
    let pattern_words: Vec<&str> = keyword.split_whitespace().collect();
    let width = pattern_words.len();
    let words = words_with_offsets(text);
    let mut outcome = FuzzyOutcome::default();
    if width == 0 || words.len() < width {
        return outcome;
    }

    let pattern = pattern_words.join(" ");
    for window in words.windows(width) {
        let candidate = window
            .iter()
            .map(|(_, word)| *word)
            .collect::<Vec<_>>()
            .join(" ");
        if similarity(&pattern, &candidate) >= threshold {
            outcome.offsets.push(window[0].0);
            *outcome.matches.entry(candidate).or_insert(0) += 1;
            outcome.count += 1;
        }
    }

    outcome.found = outcome.count > 0;
    outcome
}

/// Whitespace-delimited words paired with their character offsets.
fn words_with_offsets(text: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut start: Option<(usize, usize)> = None;
    let mut chars = 0;

    for (byte, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some((char_start, byte_start)) = start.take() {
                words.push((char_start, &text[byte_start..byte]));
            }
        } else if start.is_none() {
            start = Some((chars, byte));
        }
        chars += 1;
    }
    if let Some((char_start, byte_start)) = start {
        words.push((char_start, &text[byte_start..]));
    }

    words
}
