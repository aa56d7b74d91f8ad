//! Aho-Corasick automaton for single-pass multi-keyword counting
//!
//! The automaton is compiled into a dense DFA: every `(state, symbol)` pair has
//! a transition, failure links are folded into the table during construction.
//! Once built it is never mutated, so one instance can be shared by reference
//! across worker threads scanning different documents.
use super::MatchMap;
use crate::alphabet::Alphabet;
use std::collections::VecDeque;

const ROOT: usize = 0;

/// Set of keyword indices terminating at (or suffix-linked from) a state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct KeywordMask {
    words: Vec<u64>,
}

impl KeywordMask {
    fn with_capacity(keywords: usize) -> Self {
        Self {
            words: vec![0; keywords.div_ceil(64)],
        }
    }

    fn insert(&mut self, idx: usize) {
        self.words[idx / 64] |= 1u64 << (idx % 64);
    }

    fn union_with(&mut self, other: &KeywordMask) {
        for (word, bits) in self.words.iter_mut().zip(&other.words) {
            *word |= bits;
        }
    }

    fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Keyword indices in ascending order.
    fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &bits)| {
            (0..64usize)
                .filter(move |&b| bits & (1u64 << b) != 0)
                .map(move |b| w * 64 + b)
        })
    }
}

/// Compiled automaton over one keyword set
#[derive(Debug, Clone)]
pub struct AhoCorasick {
    keywords: Vec<String>,
    lengths: Vec<usize>,
    alphabet: Alphabet,
    goto: Vec<usize>,
    fail: Vec<usize>,
    output: Vec<KeywordMask>,
}

impl AhoCorasick {
    /// Build the automaton for `keywords`.
    ///
    /// Keywords are matched lower-cased. Their characters are added to
    /// `alphabet` when missing so every keyword is reachable. Empty keywords
    /// never match.
    pub fn new<S: AsRef<str>>(keywords: &[S], alphabet: &Alphabet) -> Self {
        let mut alphabet = alphabet.clone();
        let encoded: Vec<Vec<usize>> = keywords
            .iter()
            .map(|k| {
                k.as_ref()
                    .chars()
                    .flat_map(char::to_lowercase)
                    .map(|c| alphabet.intern(c))
                    .collect()
            })
            .collect();

        let width = alphabet.len();
        let n = keywords.len();

        // Trie phase: missing edges stay `None` until the failure pass.
        let mut trie: Vec<Vec<Option<usize>>> = vec![vec![None; width]];
        let mut output = vec![KeywordMask::with_capacity(n)];
        for (idx, symbols) in encoded.iter().enumerate() {
            if symbols.is_empty() {
                continue;
            }
            let mut state = ROOT;
            for &sym in symbols {
                state = match trie[state][sym] {
                    Some(next) => next,
                    None => {
                        let next = trie.len();
                        trie.push(vec![None; width]);
                        output.push(KeywordMask::with_capacity(n));
                        trie[state][sym] = Some(next);
                        next
                    }
                };
            }
            output[state].insert(idx);
        }

        let states = trie.len();
        let mut goto = vec![ROOT; states * width];
        let mut fail = vec![ROOT; states];
        let mut queue = VecDeque::new();

        for sym in 0..width {
            if let Some(next) = trie[ROOT][sym] {
                goto[sym] = next;
                queue.push_back(next);
            }
        }

        while let Some(state) = queue.pop_front() {
            for sym in 0..width {
                let fallback = goto[fail[state] * width + sym];
                match trie[state][sym] {
                    Some(next) => {
                        fail[next] = fallback;
                        let inherited = output[fallback].clone();
                        output[next].union_with(&inherited);
                        goto[state * width + sym] = next;
                        queue.push_back(next);
                    }
                    None => goto[state * width + sym] = fallback,
                }
            }
        }

        Self {
            keywords: keywords.iter().map(|k| k.as_ref().to_string()).collect(),
            lengths: encoded.iter().map(Vec::len).collect(),
            alphabet,
            goto,
            fail,
            output,
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn state_count(&self) -> usize {
        self.fail.len()
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Failure link of `state`.
    pub fn failure(&self, state: usize) -> usize {
        self.fail[state]
    }

    /// DFA transition; characters outside the alphabet lead back to the root.
    #[inline]
    pub fn next_state(&self, state: usize, c: char) -> usize {
        match self.alphabet.index_of(c) {
            Some(sym) => self.goto[state * self.alphabet.len() + sym],
            None => ROOT,
        }
    }

    /// Count keyword occurrences in `text` in one pass.
    ///
    /// An occurrence is accepted only when it starts after the end of the last
    /// accepted occurrence of *any* keyword. Keywords ending at the same
    /// position are tried in keyword order.
    pub fn find_counts(&self, text: &str) -> MatchMap {
        let mut matches = MatchMap::new();
        let mut state = ROOT;
        let mut last_end: Option<usize> = None;

        for (i, c) in text.chars().flat_map(char::to_lowercase).enumerate() {
            state = self.next_state(state, c);
            let out = &self.output[state];
            if out.is_empty() {
                continue;
            }
            for idx in out.iter() {
                let start = i + 1 - self.lengths[idx];
                if last_end.is_none_or(|end| start > end) {
                    *matches.entry(self.keywords[idx].clone()).or_insert(0) += 1;
                    last_end = Some(i);
                }
            }
        }

        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(keywords: &[&str]) -> AhoCorasick {
        AhoCorasick::new(keywords, &Alphabet::default())
    }

    #[test]
    fn test_mask_iterates_in_order_across_words() {
        let mut mask = KeywordMask::with_capacity(130);
        mask.insert(129);
        mask.insert(3);
        mask.insert(64);
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![3, 64, 129]);
        assert!(!mask.is_empty());
        assert!(KeywordMask::with_capacity(10).is_empty());
    }

    #[test]
    fn test_root_transitions_are_total() {
        let ac = build(&["he", "she", "his", "hers"]);
        for &c in ac.alphabet().symbols() {
            assert!(ac.next_state(ROOT, c) < ac.state_count());
        }
        assert_eq!(ac.next_state(ROOT, 'z'), ROOT);
        assert_eq!(ac.next_state(ROOT, '#'), ROOT);
    }

    #[test]
    fn test_failure_links() {
        let ac = build(&["he", "she"]);
        let s = ac.next_state(ROOT, 's');
        let sh = ac.next_state(s, 'h');
        let she = ac.next_state(sh, 'e');
        let h = ac.next_state(ROOT, 'h');
        let he = ac.next_state(h, 'e');
        assert_eq!(ac.failure(sh), h);
        assert_eq!(ac.failure(she), he);
        assert_eq!(ac.failure(h), ROOT);
    }

    #[test]
    fn test_counts_multiple_keywords() {
        let ac = build(&["java", "python", "sql"]);
        let counts = ac.find_counts("java and sql, python, more java");
        assert_eq!(counts.get("java"), Some(&2));
        assert_eq!(counts.get("python"), Some(&1));
        assert_eq!(counts.get("sql"), Some(&1));
    }

    #[test]
    fn test_cross_keyword_non_overlap() {
        let counts = build(&["ab", "bc"]).find_counts("abc");
        assert_eq!(counts, MatchMap::from([("ab".to_string(), 1)]));
    }

    #[test]
    fn test_suffix_keyword_suppressed_when_ending_together() {
        let counts = build(&["she", "he"]).find_counts("she");
        assert_eq!(counts, MatchMap::from([("she".to_string(), 1)]));
    }

    #[test]
    fn test_case_insensitive_text_and_keywords() {
        let counts = build(&["react"]).find_counts("ReAcT");
        assert_eq!(counts, MatchMap::from([("react".to_string(), 1)]));

        let counts = build(&["React"]).find_counts("expert react developer");
        assert_eq!(counts, MatchMap::from([("React".to_string(), 1)]));
    }

    #[test]
    fn test_keyword_outside_default_alphabet() {
        let counts = build(&["c#"]).find_counts("c# and c#");
        assert_eq!(counts.get("c#"), Some(&2));
    }

    #[test]
    fn test_multi_word_keyword() {
        let counts = build(&["machine learning"]).find_counts("machine learning, machine-learning");
        assert_eq!(counts.get("machine learning"), Some(&1));
    }

    #[test]
    fn test_empty_keyword_set_and_empty_keyword() {
        let empty: [&str; 0] = [];
        assert!(build(&empty).find_counts("anything").is_empty());
        assert!(build(&[""]).find_counts("anything").is_empty());
    }
}
