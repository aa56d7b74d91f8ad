//! Search orchestration: exact pass, ranking, fuzzy fallback
use super::ranking::{RankedResult, rank};
use super::{EngineConfig, SearchOutcome, SearchRequest};
use crate::corpus::{Corpus, Document};
use crate::error::Result;
use crate::fuzzy;
use crate::matcher::{
    AhoCorasick, Algorithm, MatchMap, MatcherFactory, SinglePatternMatcher, merge_counts,
};
use crate::metrics::Metrics;
use log::{debug, info};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;

/// Runs search requests against a corpus
pub struct SearchEngine {
    pub config: EngineConfig,
    pub metrics: Arc<Metrics>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default(), Arc::new(Metrics::new()))
    }
}

impl SearchEngine {
    pub fn new(config: EngineConfig, metrics: Arc<Metrics>) -> Self {
        Self { config, metrics }
    }

    /// Exact search over every document; when that ranks nothing, one fuzzy
    /// pass over the whole corpus.
    ///
    /// Configuration problems are reported before any document is scanned.
    pub fn search(&self, request: &SearchRequest, corpus: &Corpus) -> Result<SearchOutcome> {
        request.validate()?;
        let threshold = fuzzy::validate_threshold(self.config.threshold)?;
        self.metrics.searches_total.inc();

        if request.top_n == 0 {
            debug!("top_n is 0, nothing to rank");
            return Ok(SearchOutcome::default());
        }

        let started = Instant::now();
        let exact = rank(self.exact_pass(request, corpus), request.top_n);
        let exact_elapsed = started.elapsed();
        debug!(
            "{} pass over {} documents ranked {} in {:.2?}",
            request.algorithm.name(),
            corpus.len(),
            exact.len(),
            exact_elapsed
        );

        if !exact.is_empty() {
            return Ok(SearchOutcome {
                results: exact,
                exact_elapsed: Some(exact_elapsed),
                fuzzy_elapsed: None,
            });
        }

        info!(
            "No exact matches for {} keyword(s), falling back to fuzzy search at {threshold:.1}%",
            request.keywords.len()
        );
        self.metrics.fuzzy_fallbacks.inc();
        let started = Instant::now();
        let approximate = rank(self.fuzzy_pass(request, corpus, threshold), request.top_n);
        let fuzzy_elapsed = started.elapsed();
        debug!("Fuzzy pass ranked {} in {:.2?}", approximate.len(), fuzzy_elapsed);

        Ok(SearchOutcome {
            results: approximate,
            exact_elapsed: Some(exact_elapsed),
            fuzzy_elapsed: Some(fuzzy_elapsed),
        })
    }

    fn exact_pass(&self, request: &SearchRequest, corpus: &Corpus) -> Vec<RankedResult> {
        match request.algorithm {
            Algorithm::AhoCorasick => {
                let automaton =
                    AhoCorasick::new(request.keywords.as_slice(), &self.config.alphabet);
                debug!(
                    "Built automaton with {} states over {} symbols",
                    automaton.state_count(),
                    automaton.alphabet().len()
                );
                self.scan_documents(corpus, |text| automaton.find_counts(text))
            }
            algorithm => {
                let matchers: Vec<(&str, Box<dyn SinglePatternMatcher>)> = request
                    .keywords
                    .iter()
                    .filter_map(|k| {
                        let folded: String = k.chars().flat_map(char::to_lowercase).collect();
                        MatcherFactory::create(algorithm, &folded).map(|m| (k.as_str(), m))
                    })
                    .collect();
                self.scan_documents(corpus, |text| {
                    let chars: Vec<char> = text.chars().flat_map(char::to_lowercase).collect();
                    let mut matches = MatchMap::new();
                    for (keyword, matcher) in &matchers {
                        let outcome = matcher.scan(&chars);
                        if outcome.found() {
                            matches.insert(keyword.to_string(), outcome.count);
                        }
                    }
                    matches
                })
            }
        }
    }

    fn fuzzy_pass(
        &self,
        request: &SearchRequest,
        corpus: &Corpus,
        threshold: f64,
    ) -> Vec<RankedResult> {
        self.scan_documents(corpus, |text| {
            let mut matches = MatchMap::new();
            for keyword in &request.keywords {
                merge_counts(&mut matches, fuzzy::search(keyword, text, threshold).matches);
            }
            matches
        })
    }

    /// Apply `scan` to every document, keeping corpus order in the output
    /// regardless of which worker finishes first.
    fn scan_documents<F>(&self, corpus: &Corpus, scan: F) -> Vec<RankedResult>
    where
        F: Fn(&str) -> MatchMap + Sync,
    {
        let run = |doc: &Document| RankedResult::new(doc.id, scan(&doc.text));
        let results: Vec<RankedResult> = if self.config.parallel {
            corpus.documents().par_iter().map(&run).collect()
        } else {
            corpus.iter().map(&run).collect()
        };

        self.metrics.documents_scanned.inc_by(results.len() as u64);
        let matched = results.iter().filter(|r| !r.matches.is_empty()).count();
        self.metrics.documents_matched.inc_by(matched as u64);
        results
    }
}
