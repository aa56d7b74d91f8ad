//! Symbol tables mapping characters to dense automaton indices
use std::collections::HashMap;

/// Characters that survive [`crate::normalize::clean`].
pub const DEFAULT_SYMBOLS: &str = "abcdefghijklmnopqrstuvwxyz0123456789.,;:!?/-+()%@'\"& ";

/// Dense character index used to size automaton transition rows.
///
/// Symbols are stored lower-cased. ASCII lookups go through a flat table, the
/// rest through a hash map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    ascii: [Option<u16>; 128],
    other: HashMap<char, u16>,
    symbols: Vec<char>,
}

impl Alphabet {
    pub fn new<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut alphabet = Self {
            ascii: [None; 128],
            other: HashMap::new(),
            symbols: Vec::new(),
        };
        for c in symbols {
            alphabet.insert(c);
        }
        alphabet
    }

    fn insert(&mut self, c: char) {
        for lower in c.to_lowercase() {
            self.intern(lower);
        }
    }

    /// Index of `c`, adding it as a new symbol when missing.
    ///
    /// `c` is taken as already lower-cased.
    pub fn intern(&mut self, c: char) -> usize {
        if let Some(idx) = self.index_of(c) {
            return idx;
        }
        let idx = self.symbols.len();
        if c.is_ascii() {
            self.ascii[c as usize] = Some(idx as u16);
        } else {
            self.other.insert(c, idx as u16);
        }
        self.symbols.push(c);
        idx
    }

    #[inline]
    pub fn index_of(&self, c: char) -> Option<usize> {
        if c.is_ascii() {
            self.ascii[c as usize].map(usize::from)
        } else {
            self.other.get(&c).copied().map(usize::from)
        }
    }

    pub fn contains(&self, c: char) -> bool {
        self.index_of(c).is_some()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::new(DEFAULT_SYMBOLS.chars())
    }
}

impl From<&str> for Alphabet {
    fn from(symbols: &str) -> Self {
        Self::new(symbols.chars())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_covers_normalized_text() {
        let alphabet = Alphabet::default();
        assert_eq!(alphabet.len(), DEFAULT_SYMBOLS.chars().count());
        assert!(alphabet.contains('a'));
        assert!(alphabet.contains('9'));
        assert!(alphabet.contains('&'));
        assert!(alphabet.contains(' '));
        assert!(!alphabet.contains('#'));
    }

    #[test]
    fn test_indices_are_dense_and_deduplicated() {
        let alphabet = Alphabet::from("abcABC");
        assert_eq!(alphabet.len(), 3);
        assert_eq!(alphabet.index_of('a'), Some(0));
        assert_eq!(alphabet.index_of('c'), Some(2));
    }

    #[test]
    fn test_intern_adds_missing_symbols() {
        let mut alphabet = Alphabet::from("abc");
        assert_eq!(alphabet.intern('c'), 2);
        assert_eq!(alphabet.intern('#'), 3);
        assert_eq!(alphabet.intern('é'), 4);
        assert_eq!(alphabet.index_of('é'), Some(4));
        assert_eq!(alphabet.len(), 5);
    }
}
