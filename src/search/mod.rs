//! Corpus-wide keyword search with exact matching and a fuzzy fallback
pub mod engine;
pub mod ranking;

use crate::alphabet::Alphabet;
use crate::corpus::Corpus;
use crate::error::{CvscanError, Result};
use crate::fuzzy::DEFAULT_THRESHOLD;
use crate::matcher::Algorithm;
use std::time::Duration;

pub use engine::SearchEngine;
pub use ranking::{RankedResult, rank};

/// Engine-wide settings shared by every request
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum similarity percentage for fuzzy window matches.
    pub threshold: f64,
    /// Scan documents on the rayon pool.
    pub parallel: bool,
    /// Base symbol table for Aho-Corasick automata.
    pub alphabet: Alphabet,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            parallel: true,
            alphabet: Alphabet::default(),
        }
    }
}

/// One search invocation
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub keywords: Vec<String>,
    pub algorithm: Algorithm,
    pub top_n: usize,
}

impl SearchRequest {
    pub fn new<S: AsRef<str>>(keywords: &[S], algorithm: Algorithm, top_n: usize) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.as_ref().to_string()).collect(),
            algorithm,
            top_n,
        }
    }

    /// Build a request from an algorithm identifier such as `"KMP"` or `"aho-corasick"`.
    pub fn with_algorithm_name<S: AsRef<str>>(
        keywords: &[S],
        algorithm: &str,
        top_n: usize,
    ) -> Result<Self> {
        Ok(Self::new(keywords, algorithm.parse()?, top_n))
    }

    /// Reject blank keywords before any scanning starts.
    pub fn validate(&self) -> Result<()> {
        match self.keywords.iter().position(|k| k.trim().is_empty()) {
            Some(idx) => Err(CvscanError::EmptyKeyword(idx)),
            None => Ok(()),
        }
    }
}

/// Ranked results plus the time spent in each phase
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub results: Vec<RankedResult>,
    /// `None` when the request was short-circuited.
    pub exact_elapsed: Option<Duration>,
    /// `None` unless the exact phase ranked nothing.
    pub fuzzy_elapsed: Option<Duration>,
}

impl SearchOutcome {
    pub fn used_fuzzy(&self) -> bool {
        self.fuzzy_elapsed.is_some()
    }

    pub fn exact_elapsed_ms(&self) -> u64 {
        phase_millis(self.exact_elapsed)
    }

    pub fn fuzzy_elapsed_ms(&self) -> u64 {
        phase_millis(self.fuzzy_elapsed)
    }
}

/// Whole milliseconds, rounded up so a phase that ran never reports zero.
fn phase_millis(elapsed: Option<Duration>) -> u64 {
    match elapsed {
        None => 0,
        Some(d) => d.as_nanos().div_ceil(1_000_000).max(1) as u64,
    }
}

/// Search `corpus` with default engine settings.
pub fn search<S: AsRef<str>>(
    keywords: &[S],
    algorithm: Algorithm,
    corpus: &Corpus,
    top_n: usize,
) -> Result<SearchOutcome> {
    SearchEngine::default().search(&SearchRequest::new(keywords, algorithm, top_n), corpus)
}
