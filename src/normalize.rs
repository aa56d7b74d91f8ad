//! Text cleaning applied to extracted resume text before it enters a corpus
use crate::alphabet::DEFAULT_SYMBOLS;

/// Lower-case `raw`, drop characters outside the default alphabet and
/// collapse whitespace runs into single spaces.
pub fn clean(raw: &str) -> String {
    let filtered: String = raw
        .chars()
        .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
        .flat_map(char::to_lowercase)
        .filter(|c| DEFAULT_SYMBOLS.contains(*c))
        .collect();

    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}
