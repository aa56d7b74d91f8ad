use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CvscanError {
    #[error("Unknown search algorithm '{0}' (expected kmp, boyer-moore or aho-corasick)")]
    UnknownAlgorithm(String),

    #[error("Keyword at position {0} is empty")]
    EmptyKeyword(usize),

    #[error("Similarity threshold must be within 0..=100, got {0}")]
    InvalidThreshold(f64),

    #[error("Calibration error: {0}")]
    Calibration(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to load corpus from '{path}': {source}")]
    Corpus {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("An unexpected error occurred: {0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl CvscanError {
    /// True for errors raised while validating a request, before any text is scanned.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CvscanError::UnknownAlgorithm(_)
                | CvscanError::EmptyKeyword(_)
                | CvscanError::InvalidThreshold(_)
                | CvscanError::Config(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CvscanError>;
