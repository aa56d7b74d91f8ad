use cvscan::error::CvscanError;
use cvscan::matcher::{Algorithm, MatchMap};
use cvscan::metrics::Metrics;
use cvscan::search::{EngineConfig, SearchEngine, SearchRequest, search};
use cvscan::{Corpus, RankedResult};
use std::sync::Arc;

fn resumes() -> Corpus {
    [
        (1, "frontend engineer with react and typescript. react hooks, react router"),
        (2, "backend developer: rust, go, postgres. some react"),
        (3, "data scientist. python, pandas, pytorch"),
        (4, "full stack: react, rust, typescript"),
    ]
    .into_iter()
    .collect()
}

fn counts(pairs: &[(&str, usize)]) -> MatchMap {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn test_exact_match_skips_fuzzy() {
    let corpus: Corpus = [(1, "experienced react developer")].into_iter().collect();
    let outcome = search(&["React"], Algorithm::Kmp, &corpus, 5).unwrap();

    assert_eq!(
        outcome.results,
        vec![RankedResult::new(1, counts(&[("React", 1)]))]
    );
    assert!(!outcome.used_fuzzy());
    assert_eq!(outcome.fuzzy_elapsed_ms(), 0);
    assert!(outcome.exact_elapsed_ms() >= 1);
}

#[test]
fn test_fuzzy_fallback_when_nothing_matches_exactly() {
    let corpus: Corpus = [(1, "java and javscript")].into_iter().collect();
    let outcome = search(&["JavaScript"], Algorithm::BoyerMoore, &corpus, 5).unwrap();

    assert!(outcome.used_fuzzy());
    assert!(outcome.fuzzy_elapsed_ms() >= 1);
    assert_eq!(
        outcome.results,
        vec![RankedResult::new(1, counts(&[("javscript", 1)]))]
    );
}

#[test]
fn test_algorithms_agree_on_distinct_keywords() {
    let corpus = resumes();
    let keywords = ["react", "rust", "typescript", "python"];
    let expected = search(&keywords, Algorithm::Kmp, &corpus, 10).unwrap().results;
    for algorithm in [Algorithm::BoyerMoore, Algorithm::AhoCorasick] {
        let outcome = search(&keywords, algorithm, &corpus, 10).unwrap();
        assert_eq!(outcome.results, expected, "{algorithm} disagrees with kmp");
    }
}

#[test]
fn test_ranking_by_total_with_corpus_order_ties() {
    let outcome = search(&["react", "rust"], Algorithm::AhoCorasick, &resumes(), 10).unwrap();
    let ranked: Vec<(u64, usize)> = outcome.results.iter().map(|r| (r.id, r.total())).collect();
    assert_eq!(ranked, vec![(1, 3), (2, 2), (4, 2)]);
}

#[test]
fn test_top_n_truncates() {
    let outcome = search(&["react"], Algorithm::Kmp, &resumes(), 2).unwrap();
    let ids: Vec<u64> = outcome.results.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_top_n_zero_runs_no_phase() {
    let outcome = search(&["react"], Algorithm::Kmp, &resumes(), 0).unwrap();
    assert!(outcome.results.is_empty());
    assert_eq!(outcome.exact_elapsed_ms(), 0);
    assert!(!outcome.used_fuzzy());
}

#[test]
fn test_empty_inputs() {
    let empty = Corpus::new();
    let outcome = search(&["react"], Algorithm::AhoCorasick, &empty, 5).unwrap();
    assert!(outcome.results.is_empty());

    let no_keywords: [&str; 0] = [];
    let outcome = search(&no_keywords, Algorithm::Kmp, &resumes(), 5).unwrap();
    assert!(outcome.results.is_empty());
}

#[test]
fn test_duplicate_keywords_counted_by_text_form() {
    let corpus: Corpus = [(7, "react")].into_iter().collect();
    let outcome = search(&["react", "React"], Algorithm::Kmp, &corpus, 5).unwrap();
    assert_eq!(outcome.results[0].matches, counts(&[("React", 1), ("react", 1)]));
}

#[test]
fn test_configuration_errors() {
    let err = SearchRequest::with_algorithm_name(&["react"], "soundex", 5).unwrap_err();
    assert!(matches!(err, CvscanError::UnknownAlgorithm(ref name) if name == "soundex"));
    assert!(err.is_configuration());

    let err = search(&["react", ""], Algorithm::Kmp, &resumes(), 5).unwrap_err();
    assert!(matches!(err, CvscanError::EmptyKeyword(1)));
}

#[test]
fn test_custom_threshold_controls_fallback() {
    let corpus: Corpus = [(1, "pyhton developer")].into_iter().collect();
    let request = SearchRequest::new(&["python"], Algorithm::Kmp, 5);

    let strict = SearchEngine::new(
        EngineConfig {
            threshold: 95.0,
            ..Default::default()
        },
        Arc::new(Metrics::new()),
    );
    assert!(strict.search(&request, &corpus).unwrap().results.is_empty());

    let lenient = SearchEngine::new(
        EngineConfig {
            threshold: 60.0,
            ..Default::default()
        },
        Arc::new(Metrics::new()),
    );
    let outcome = lenient.search(&request, &corpus).unwrap();
    assert_eq!(outcome.results[0].matches, counts(&[("pyhton", 1)]));
}

#[test]
fn test_two_document_react_search() {
    let corpus: Corpus = [(1, "expert react developer"), (2, "java backend engineer")]
        .into_iter()
        .collect();
    for algorithm in Algorithm::ALL {
        let outcome = search(&["React"], algorithm, &corpus, 5).unwrap();
        assert_eq!(
            outcome.results,
            vec![RankedResult::new(1, counts(&[("React", 1)]))],
            "{algorithm}"
        );
        assert!(outcome.results.iter().all(|r| r.id != 2));
        assert!(!outcome.used_fuzzy());
        assert_eq!(outcome.fuzzy_elapsed_ms(), 0);
    }
}

#[test]
fn test_final_sigma_folds_the_same_for_every_algorithm() {
    let corpus: Corpus = [(1, "ΟΔΟΣ")].into_iter().collect();
    for algorithm in Algorithm::ALL {
        let outcome = search(&["ΟΔΟΣ"], algorithm, &corpus, 5).unwrap();
        assert!(!outcome.used_fuzzy(), "{algorithm} fell back to fuzzy search");
        assert_eq!(
            outcome.results,
            vec![RankedResult::new(1, counts(&[("ΟΔΟΣ", 1)]))],
            "{algorithm}"
        );
    }
}
