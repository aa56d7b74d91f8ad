use prometheus::{Encoder, IntCounter, Opts, Registry, TextEncoder};
use std::sync::Arc;

#[derive(Clone)]
pub struct Metrics {
    pub searches_total: IntCounter,
    pub documents_scanned: IntCounter,
    pub documents_matched: IntCounter,
    pub fuzzy_fallbacks: IntCounter,
    registry: Arc<Registry>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

fn counter(name: &str, help: &str) -> IntCounter {
    IntCounter::with_opts(Opts::new(name, help)).expect("metric name and help are valid")
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();
        let searches_total = counter("searches_total", "Number of search requests served");
        let documents_scanned = counter(
            "documents_scanned",
            "Number of document scans across exact and fuzzy phases",
        );
        let documents_matched = counter(
            "documents_matched",
            "Number of documents with at least one match before truncation",
        );
        let fuzzy_fallbacks = counter(
            "fuzzy_fallbacks",
            "Number of searches that fell back to fuzzy matching",
        );

        registry.register(Box::new(searches_total.clone())).ok();
        registry.register(Box::new(documents_scanned.clone())).ok();
        registry.register(Box::new(documents_matched.clone())).ok();
        registry.register(Box::new(fuzzy_fallbacks.clone())).ok();

        Metrics {
            searches_total,
            documents_scanned,
            documents_matched,
            fuzzy_fallbacks,
            registry: Arc::new(registry),
        }
    }

    /// Prometheus text exposition of every counter.
    pub fn gather(&self) -> String {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if encoder.encode(&metric_families, &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gather_lists_counters() {
        let metrics = Metrics::new();
        metrics.searches_total.inc();
        metrics.documents_scanned.inc_by(3);
        let text = metrics.gather();
        assert!(text.contains("searches_total 1"));
        assert!(text.contains("documents_scanned 3"));
        assert!(text.contains("fuzzy_fallbacks 0"));
    }
}
