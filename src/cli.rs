use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::fmt;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    #[clap(long, value_parser, default_value_t = false, global = true)]
    pub verbose: bool,

    #[clap(long, value_parser, global = true)]
    pub log: Option<PathBuf>,

    /// Config file to use instead of the default lookup
    #[clap(long, value_parser, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank resumes by keyword occurrences, with a fuzzy fallback
    Search {
        /// Keywords; comma separated lists are split
        #[clap(required = true, value_delimiter = ',')]
        keywords: Vec<String>,

        /// Directory of .txt resumes or a JSON object of id -> text
        #[clap(long, value_parser)]
        corpus: PathBuf,

        /// kmp, boyer-moore or aho-corasick (case-insensitive)
        #[clap(short, long, value_parser)]
        algorithm: Option<String>,

        #[clap(short, long, value_parser)]
        top: Option<usize>,

        /// Fuzzy similarity threshold in percent
        #[clap(long, value_parser)]
        threshold: Option<f64>,

        #[clap(short, long, value_parser, default_value_t = false)]
        recursive: bool,

        #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Print Prometheus counters after the results
        #[clap(long, value_parser, default_value_t = false)]
        metrics: bool,
    },
    /// Pick the fuzzy threshold with the best cross-validated F1
    Calibrate {
        #[clap(short = 'k', long, value_parser)]
        folds: Option<usize>,

        /// JSON array of {pattern, candidate, expected}; bundled set when omitted
        #[clap(long, value_parser)]
        dataset: Option<PathBuf>,

        #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Generate shell completion scripts
    Completions {
        #[clap(value_enum)]
        shell: Shell,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Trimmed keywords with blank entries removed.
pub fn clean_keywords(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
