use prometheus::{Encoder, IntCounter, Opts, Registry, TextEncoder};
use std::sync::Arc;

#[derive(Clone)]
pub struct Metrics {
    pub searches_total: IntCounter,
    pub cache_exact_hits: IntCounter,
    pub cache_refined_hits: IntCounter,
    pub full_scans: IntCounter,
    pub superseded_inputs: IntCounter,
    pub deferred_searches: IntCounter,
    registry: Arc<Registry>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

fn counter(name: &str, help: &str) -> IntCounter {
    IntCounter::with_opts(Opts::new(name, help)).expect("static counter options are valid")
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();
        let searches_total = counter("searches_total", "Number of keywords resolved");
        let cache_exact_hits =
            counter("cache_exact_hits", "Searches answered by an identical prior keyword");
        let cache_refined_hits = counter(
            "cache_refined_hits",
            "Searches answered by filtering a narrower prior keyword's rows",
        );
        let full_scans = counter("full_scans", "Searches that scanned the whole row store");
        let superseded_inputs = counter(
            "superseded_inputs",
            "Pending searches cancelled by newer input",
        );
        let deferred_searches = counter(
            "deferred_searches",
            "Searches that fired before the row store was loaded",
        );

        registry.register(Box::new(searches_total.clone())).ok();
        registry.register(Box::new(cache_exact_hits.clone())).ok();
        registry.register(Box::new(cache_refined_hits.clone())).ok();
        registry.register(Box::new(full_scans.clone())).ok();
        registry.register(Box::new(superseded_inputs.clone())).ok();
        registry.register(Box::new(deferred_searches.clone())).ok();

        Metrics {
            searches_total,
            cache_exact_hits,
            cache_refined_hits,
            full_scans,
            superseded_inputs,
            deferred_searches,
            registry: Arc::new(registry),
        }
    }

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
