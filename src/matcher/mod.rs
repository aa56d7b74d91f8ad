//! Exact keyword matchers: KMP, Boyer-Moore and Aho-Corasick
pub mod aho_corasick;
pub mod boyer_moore;
pub mod kmp;

use crate::error::CvscanError;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub use aho_corasick::AhoCorasick;
pub use boyer_moore::BoyerMoore;
pub use kmp::Kmp;

/// Keyword (or matched window text) to occurrence count. Never holds zero counts.
pub type MatchMap = BTreeMap<String, usize>;

/// Add every count in `other` to `into`.
pub fn merge_counts(into: &mut MatchMap, other: MatchMap) {
    for (key, count) in other {
        if count > 0 {
            *into.entry(key).or_insert(0) += count;
        }
    }
}

/// Result of a single-pattern scan.
///
/// `last_match` is the character offset of the last accepted occurrence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub count: usize,
    pub last_match: Option<usize>,
}

impl ScanOutcome {
    pub const NONE: ScanOutcome = ScanOutcome {
        count: 0,
        last_match: None,
    };

    pub fn found(&self) -> bool {
        self.count > 0
    }
}

/// Exact search algorithm selectable per request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Kmp,
    BoyerMoore,
    AhoCorasick,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Kmp,
        Algorithm::BoyerMoore,
        Algorithm::AhoCorasick,
    ];

    /// Whether one automaton pass covers every keyword at once.
    pub fn is_multi_pattern(self) -> bool {
        matches!(self, Algorithm::AhoCorasick)
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Kmp => "KMP",
            Algorithm::BoyerMoore => "Boyer-Moore",
            Algorithm::AhoCorasick => "Aho-Corasick",
        }
    }
}

impl FromStr for Algorithm {
    type Err = CvscanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kmp" | "knuth-morris-pratt" => Ok(Algorithm::Kmp),
            "bm" | "boyer-moore" | "boyermoore" | "boyer_moore" => Ok(Algorithm::BoyerMoore),
            "ac" | "aho-corasick" | "ahocorasick" | "aho_corasick" => Ok(Algorithm::AhoCorasick),
            _ => Err(CvscanError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Kmp => write!(f, "kmp"),
            Algorithm::BoyerMoore => write!(f, "boyer-moore"),
            Algorithm::AhoCorasick => write!(f, "aho-corasick"),
        }
    }
}

/// A matcher bound to one pattern, reusable across documents
pub trait SinglePatternMatcher: Send + Sync {
    /// Count non-overlapping occurrences of the bound pattern in `text`.
    fn scan(&self, text: &[char]) -> ScanOutcome;

    fn name(&self) -> &'static str;
}

/// Builds the single-pattern matcher for an algorithm.
///
/// Returns `None` for multi-pattern algorithms, which are built from the whole
/// keyword set instead.
pub struct MatcherFactory;

impl MatcherFactory {
    pub fn create(algorithm: Algorithm, pattern: &str) -> Option<Box<dyn SinglePatternMatcher>> {
        match algorithm {
            Algorithm::Kmp => Some(Box::new(Kmp::new(pattern))),
            Algorithm::BoyerMoore => Some(Box::new(BoyerMoore::new(pattern))),
            Algorithm::AhoCorasick => None,
        }
    }
}
