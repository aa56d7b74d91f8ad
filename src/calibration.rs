//! Offline k-fold calibration of the fuzzy similarity threshold
//!
//! Every integer threshold in [`THRESHOLD_RANGE`] is scored by its mean F1
//! over contiguous folds of a labeled `(pattern, candidate, expected)` dataset.
//! Nothing here runs on the search path; it exists to reproduce
//! [`crate::fuzzy::DEFAULT_THRESHOLD`].
use crate::error::{CvscanError, Result};
use crate::fuzzy::similarity;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::{Range, RangeInclusive};
use std::path::Path;

pub const DEFAULT_FOLDS: usize = 5;
pub const THRESHOLD_RANGE: RangeInclusive<u32> = 50..=100;

/// One labeled keyword/candidate pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledPair {
    pub pattern: String,
    pub candidate: String,
    #[serde(alias = "expected_match", alias = "is_match")]
    pub expected: bool,
}

impl LabeledPair {
    pub fn new(pattern: &str, candidate: &str, expected: bool) -> Self {
        Self {
            pattern: pattern.to_string(),
            candidate: candidate.to_string(),
            expected,
        }
    }
}

/// Best threshold and the mean F1 it reached
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Calibration {
    pub threshold: u32,
    pub f1: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Confusion {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub true_negatives: usize,
}

impl Confusion {
    fn record(&mut self, predicted: bool, expected: bool) {
        match (predicted, expected) {
            (true, true) => self.true_positives += 1,
            (true, false) => self.false_positives += 1,
            (false, true) => self.false_negatives += 1,
            (false, false) => self.true_negatives += 1,
        }
    }

    /// Zero when nothing was predicted positive.
    pub fn precision(&self) -> f64 {
        ratio(
            self.true_positives,
            self.true_positives + self.false_positives,
        )
    }

    /// Zero when the sample holds no positives.
    pub fn recall(&self) -> f64 {
        ratio(
            self.true_positives,
            self.true_positives + self.false_negatives,
        )
    }

    pub fn f1(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

/// Contiguous fold ranges over `len` items; earlier folds take the remainder.
pub fn fold_ranges(len: usize, k: usize) -> Vec<Range<usize>> {
    if k == 0 {
        return Vec::new();
    }
    let base = len / k;
    let extra = len % k;
    let mut start = 0;
    (0..k)
        .map(|i| {
            let size = base + usize::from(i < extra);
            let range = start..start + size;
            start += size;
            range
        })
        .collect()
}

/// Confusion counts for `similarity >= threshold` predictions over `pairs`.
pub fn evaluate(pairs: &[LabeledPair], threshold: f64) -> Confusion {
    let scores: Vec<f64> = pairs
        .iter()
        .map(|p| similarity(&p.pattern, &p.candidate))
        .collect();
    confusion(pairs, &scores, threshold)
}

fn confusion(pairs: &[LabeledPair], scores: &[f64], threshold: f64) -> Confusion {
    let mut confusion = Confusion::default();
    for (pair, &score) in pairs.iter().zip(scores) {
        confusion.record(score >= threshold, pair.expected);
    }
    confusion
}

/// Threshold in [`THRESHOLD_RANGE`] with the highest mean F1 across `k` folds.
///
/// Ties go to the higher threshold, the stricter setting.
pub fn calibrate(dataset: &[LabeledPair], k: usize) -> Result<Calibration> {
    calibrate_with(dataset, k, |_, _| {})
}

/// [`calibrate`] that reports each threshold's mean F1 as it is scored.
pub fn calibrate_with<F>(dataset: &[LabeledPair], k: usize, mut on_score: F) -> Result<Calibration>
where
    F: FnMut(u32, f64),
{
    if dataset.is_empty() {
        return Err(CvscanError::Calibration("dataset is empty".to_string()));
    }
    if k < 2 || k > dataset.len() {
        return Err(CvscanError::Calibration(format!(
            "fold count must be within 2..={}, got {k}",
            dataset.len()
        )));
    }

    let scores: Vec<f64> = dataset
        .iter()
        .map(|p| similarity(&p.pattern, &p.candidate))
        .collect();
    let folds = fold_ranges(dataset.len(), k);

    let mut best: Option<Calibration> = None;
    for threshold in THRESHOLD_RANGE {
        let total: f64 = folds
            .iter()
            .map(|fold| {
                confusion(
                    &dataset[fold.clone()],
                    &scores[fold.clone()],
                    f64::from(threshold),
                )
                .f1()
            })
            .sum();
        let f1 = total / folds.len() as f64;
        on_score(threshold, f1);

        if best.is_none_or(|b| f1 >= b.f1) {
            best = Some(Calibration { threshold, f1 });
        }
    }

    best.ok_or_else(|| CvscanError::Calibration("no threshold evaluated".to_string()))
}

/// Read a JSON array of labeled pairs.
pub fn load_dataset(path: &Path) -> Result<Vec<LabeledPair>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read calibration dataset: {}", path.display()))?;
    let pairs = serde_json::from_str(&content)?;
    Ok(pairs)
}

const DEFAULT_PAIRS: &[(&str, &str, bool)] = &[
    ("javascript", "javscript", true),
    ("javascript", "java script", true),
    ("javascript", "java", false),
    ("typescript", "typscript", true),
    ("typescript", "javascript", false),
    ("python", "pyhton", true),
    ("python", "pytorch", false),
    ("react", "redux", false),
    ("react", "reactjs", true),
    ("kubernetes", "kubernets", true),
    ("kubernetes", "kubectl", false),
    ("docker", "dockerfile", false),
    ("postgresql", "postgres", true),
    ("postgresql", "mysql", false),
    ("machine learning", "machine lerning", true),
    ("machine learning", "machine vision", false),
    ("data analysis", "data analytics", true),
    ("data analysis", "data entry", false),
    ("project management", "product management", false),
    ("tensorflow", "tensorflo", true),
    ("tensorflow", "terraform", false),
    ("excel", "exel", true),
    ("excel", "excellent", false),
    ("linux", "linus", true),
    ("linux", "unix", false),
    ("golang", "go lang", true),
    ("golang", "erlang", false),
    ("rust", "rest", false),
    ("rust", "rust", true),
    ("communication", "comunication", true),
    ("communication", "commutation", false),
    ("leadership", "leadershp", true),
    ("leadership", "readership", false),
    ("spring boot", "springboot", true),
    ("spring boot", "spring mvc", false),
    ("node.js", "nodejs", true),
    ("node.js", "nuxt.js", false),
    ("java", "javafx", false),
    ("sql", "nosql", false),
    ("aws", "awk", false),
    ("ruby", "rube", false),
    ("redis", "reddit", false),
    ("agile", "fragile", false),
    ("angular", "angulr", true),
    ("kotlin", "kotlln", true),
    ("pandas", "panda", true),
    ("excel", "excels", true),
];

/// Resume-skill spellings labeled by whether they name the same skill.
pub fn default_dataset() -> Vec<LabeledPair> {
    DEFAULT_PAIRS
        .iter()
        .map(|&(pattern, candidate, expected)| LabeledPair::new(pattern, candidate, expected))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(pattern: &str, candidate: &str, expected: bool) -> LabeledPair {
        LabeledPair::new(pattern, candidate, expected)
    }

    #[test]
    fn test_fold_ranges() {
        assert_eq!(fold_ranges(10, 3), vec![0..4, 4..7, 7..10]);
        assert_eq!(fold_ranges(4, 2), vec![0..2, 2..4]);
        assert!(fold_ranges(4, 0).is_empty());
    }

    #[test]
    fn test_confusion_metrics() {
        let c = Confusion {
            true_positives: 3,
            false_positives: 1,
            false_negatives: 2,
            true_negatives: 4,
        };
        assert_eq!(c.precision(), 0.75);
        assert_eq!(c.recall(), 0.6);
        assert!((c.f1() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(Confusion::default().f1(), 0.0);
    }

    #[test]
    fn test_evaluate() {
        let pairs = [
            pair("javascript", "javscript", true),
            pair("abcdefghij", "abcdefxxxx", false),
        ];
        let c = evaluate(&pairs, 80.0);
        assert_eq!(c.true_positives, 1);
        assert_eq!(c.true_negatives, 1);
        let c = evaluate(&pairs, 50.0);
        assert_eq!(c.false_positives, 1);
    }

    #[test]
    fn test_calibrate_separable_dataset() {
        // positives score 90, negatives 60
        let pairs = [
            pair("javascript", "javscript", true),
            pair("abcdefghij", "abcdefxxxx", false),
            pair("tensorflow", "tensorflo", true),
            pair("klmnopqrst", "klmnopwxyz", false),
        ];
        let best = calibrate(&pairs, 2).unwrap();
        assert_eq!(best.threshold, 90);
        assert_eq!(best.f1, 1.0);
    }

    #[test]
    fn test_ties_pick_the_highest_threshold() {
        // positives score 75, negatives 0: every threshold in 50..=75 reaches F1 1.0
        let pairs = [
            pair("abcd", "abcx", true),
            pair("abcd", "wxyz", false),
            pair("efgh", "efgy", true),
            pair("efgh", "mnop", false),
        ];
        let mut perfect = Vec::new();
        let best = calibrate_with(&pairs, 2, |t, f1| {
            if f1 == 1.0 {
                perfect.push(t);
            }
        })
        .unwrap();
        assert_eq!(perfect, (50..=75).collect::<Vec<_>>());
        assert_eq!(best.threshold, 75);
        assert_eq!(best.f1, 1.0);
    }

    #[test]
    fn test_reports_every_threshold() {
        let pairs = default_dataset();
        let mut seen = Vec::new();
        calibrate_with(&pairs, DEFAULT_FOLDS, |t, _| seen.push(t)).unwrap();
        assert_eq!(seen, THRESHOLD_RANGE.collect::<Vec<_>>());
    }

    #[test]
    fn test_default_dataset_reproduces_default_threshold() {
        let best = calibrate(&default_dataset(), DEFAULT_FOLDS).unwrap();
        assert_eq!(best.threshold, crate::fuzzy::DEFAULT_THRESHOLD as u32);
        assert!((best.f1 - 0.9156).abs() < 1e-3, "f1 = {}", best.f1);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(calibrate(&[], 5).is_err());
        let pairs = [pair("a", "a", true), pair("b", "c", false)];
        assert!(calibrate(&pairs, 1).is_err());
        assert!(calibrate(&pairs, 3).is_err());
        assert!(calibrate(&pairs, 2).is_ok());
    }
}
