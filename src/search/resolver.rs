//! Keyword resolution: exact history hit, refined history hit, or full scan
use crate::search::cache::HistoryCache;
use crate::search::matcher::KeywordMatcher;
use crate::search::{Resolution, ResolutionSource};
use crate::store::{Row, RowStore};
use rayon::prelude::*;
use std::sync::Arc;

/// Stores at or above this many rows are scanned in parallel.
pub const DEFAULT_PARALLEL_SCAN_THRESHOLD: usize = 4096;

pub struct SearchResolver<'a> {
    store: &'a RowStore,
    parallel_scan_threshold: usize,
}

impl<'a> SearchResolver<'a> {
    pub fn new(store: &'a RowStore) -> Self {
        Self {
            store,
            parallel_scan_threshold: DEFAULT_PARALLEL_SCAN_THRESHOLD,
        }
    }

    pub fn with_parallel_scan_threshold(mut self, threshold: usize) -> Self {
        self.parallel_scan_threshold = threshold;
        self
    }

    /// Resolve a non-empty keyword. Writing the result back into the cache
    /// is left to the caller.
    pub fn resolve(&self, cache: &HistoryCache, keyword: &str) -> Resolution {
        if let Some(rows) = cache.get(keyword) {
            log::debug!("History hit for '{keyword}' ({} rows)", rows.len());
            return Resolution {
                rows: rows.to_vec(),
                source: ResolutionSource::Exact,
            };
        }

        if let Some(rows) = cache.find_prefix_match(keyword) {
            return Resolution {
                rows,
                source: ResolutionSource::Refined,
            };
        }

        let rows = self.full_scan(keyword);
        log::debug!(
            "Full scan for '{keyword}': {} of {} rows",
            rows.len(),
            self.store.len()
        );
        Resolution {
            rows,
            source: ResolutionSource::FullScan,
        }
    }

    /// Every row containing `keyword` in some field, in store order.
    pub fn full_scan(&self, keyword: &str) -> Vec<Arc<Row>> {
        let matcher = KeywordMatcher::new(keyword);
        let rows = self.store.rows();

        if rows.len() >= self.parallel_scan_threshold {
            rows.par_iter()
                .filter(|row| matcher.matches_row(row))
                .cloned()
                .collect()
        } else {
            rows.iter()
                .filter(|row| matcher.matches_row(row))
                .cloned()
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RowStore {
        RowStore::from_records(vec![
            vec!["搜".into(), "search".into(), "검색".into()],
            vec!["樹".into(), "tree".into(), "나무".into()],
            vec!["海".into(), "sea".into(), "바다".into()],
        ])
    }

    fn headwords(rows: &[Arc<Row>]) -> Vec<&str> {
        rows.iter().map(|row| row.headword()).collect()
    }

    #[test]
    fn test_full_scan_on_empty_cache() {
        let store = store();
        let resolver = SearchResolver::new(&store);
        let cache = HistoryCache::new();

        let resolution = resolver.resolve(&cache, "search");
        assert_eq!(resolution.source, ResolutionSource::FullScan);
        assert_eq!(headwords(&resolution.rows), vec!["搜"]);
    }

    #[test]
    fn test_no_match_is_empty_not_absent() {
        let store = store();
        let resolver = SearchResolver::new(&store);
        let resolution = resolver.resolve(&HistoryCache::new(), "無");
        assert!(resolution.rows.is_empty());
    }

    #[test]
    fn test_exact_history_hit() {
        let store = store();
        let resolver = SearchResolver::new(&store);
        let mut cache = HistoryCache::new();
        let first = resolver.resolve(&cache, "sea");
        cache.put("sea", first.rows.clone());

        let second = resolver.resolve(&cache, "sea");
        assert_eq!(second.source, ResolutionSource::Exact);
        assert_eq!(second.rows, first.rows);
    }

    #[test]
    fn test_refined_history_hit() {
        let store = store();
        let resolver = SearchResolver::new(&store);
        let mut cache = HistoryCache::new();
        cache.put("sea", resolver.full_scan("sea"));

        let resolution = resolver.resolve(&cache, "search");
        assert_eq!(resolution.source, ResolutionSource::Refined);
        assert_eq!(headwords(&resolution.rows), vec!["搜"]);
    }

    #[test]
    fn test_broader_query_does_not_reuse_narrower_result() {
        let store = store();
        let resolver = SearchResolver::new(&store);
        let mut cache = HistoryCache::new();
        cache.put("search", resolver.full_scan("search"));

        let resolution = resolver.resolve(&cache, "se");
        assert_eq!(resolution.source, ResolutionSource::FullScan);
        assert_eq!(headwords(&resolution.rows), vec!["搜", "海"]);
    }

    #[test]
    fn test_parallel_scan_preserves_order() {
        let records: Vec<Vec<String>> = (0..500)
            .map(|i| vec![format!("字{i}"), format!("word {}", i % 7)])
            .collect();
        let store = RowStore::from_records(records);
        let sequential = SearchResolver::new(&store).full_scan("word 3");
        let parallel = SearchResolver::new(&store)
            .with_parallel_scan_threshold(1)
            .full_scan("word 3");

        assert_eq!(sequential, parallel);
        assert!(!parallel.is_empty());
    }
}
