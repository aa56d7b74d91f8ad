//! Keyword screening over normalized resume text.
//!
//! Exact matching (KMP, Boyer-Moore or Aho-Corasick) runs first; when it
//! ranks no document at all, a Levenshtein word-window search takes over
//! with a threshold calibrated by [`calibration::calibrate`].
pub mod alphabet;
pub mod calibration;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod fuzzy;
pub mod matcher;
pub mod metrics;
pub mod normalize;
pub mod search;
mod walker;

pub use crate::error::{CvscanError, Result};
pub use alphabet::Alphabet;
pub use calibration::{Calibration, LabeledPair, calibrate};
pub use clap::Parser;
pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
pub use corpus::{Corpus, Document};
pub use fuzzy::{DEFAULT_THRESHOLD, FuzzyOutcome};
pub use matcher::{AhoCorasick, Algorithm, BoyerMoore, Kmp, MatchMap, ScanOutcome};
pub use metrics::Metrics;
pub use search::{EngineConfig, RankedResult, SearchEngine, SearchOutcome, SearchRequest, search};
