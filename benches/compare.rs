use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use cvscan::Corpus;
use cvscan::matcher::Algorithm;
use cvscan::search::{EngineConfig, SearchEngine, SearchRequest};
use std::hint::black_box;

const KEYWORDS: &[&str] = &[
    "react",
    "typescript",
    "kubernetes",
    "postgres",
    "machine learning",
    "rust",
];

fn synthetic_corpus(documents: u64) -> Corpus {
    let vocabulary = [
        "developer", "react", "team", "python", "rust", "cloud", "postgres", "agile",
        "typescript", "testing", "machine", "learning", "docker", "lead",
    ];
    (1..=documents)
        .map(|id| {
            let text: Vec<&str> = (0..400)
                .map(|i| vocabulary[(i * 7 + id as usize * 13) % vocabulary.len()])
                .collect();
            (id, text.join(" "))
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let corpus = synthetic_corpus(200);
    let mut group = c.benchmark_group("exact_search");

    for algorithm in Algorithm::ALL {
        for parallel in [false, true] {
            let engine = SearchEngine::new(
                EngineConfig {
                    parallel,
                    ..Default::default()
                },
                Default::default(),
            );
            let request = SearchRequest::new(KEYWORDS, algorithm, 10);
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(
                BenchmarkId::new(algorithm.name(), label),
                &request,
                |b, request| b.iter(|| engine.search(black_box(request), &corpus)),
            );
        }
    }
    group.finish();

    let fallback = SearchRequest::new(&["kubernets"], Algorithm::AhoCorasick, 10);
    let engine = SearchEngine::default();
    c.bench_function("fuzzy_fallback", |b| {
        b.iter(|| engine.search(black_box(&fallback), &corpus))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
