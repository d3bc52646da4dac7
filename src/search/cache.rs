//! Session-scoped history of keyword searches and their result rows
use crate::search::matcher::KeywordMatcher;
use crate::store::Row;
use std::collections::HashMap;
use std::sync::Arc;

/// Append-only memo of keyword -> rows matched at search time.
///
/// Entries are never evicted: the row store is fixed for the session, so a
/// cached result stays exact for as long as the session lives.
#[derive(Debug, Default)]
pub struct HistoryCache {
    entries: HashMap<String, Vec<Arc<Row>>>,
}

impl HistoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact lookup of a previously searched keyword
    pub fn get(&self, keyword: &str) -> Option<&[Arc<Row>]> {
        self.entries.get(keyword).map(Vec::as_slice)
    }

    /// Insert or overwrite the rows for `keyword`
    pub fn put(&mut self, keyword: &str, rows: Vec<Arc<Row>>) {
        if keyword.is_empty() {
            return;
        }
        self.entries.insert(keyword.to_string(), rows);
    }

    /// Derive results for `keyword` from a narrower prior search.
    ///
    /// A cached key contained in `keyword` matched a superset of the rows
    /// `keyword` can match, so filtering its rows is enough. The longest such
    /// key is used. An empty refinement reports `None` so the caller falls
    /// back to a full scan.
    pub fn find_prefix_match(&self, keyword: &str) -> Option<Vec<Arc<Row>>> {
        if keyword.is_empty() {
            return None;
        }

        let (key, rows) = self
            .entries
            .iter()
            .filter(|(key, _)| !key.is_empty() && keyword.contains(key.as_str()))
            .max_by_key(|(key, _)| key.len())?;

        let matcher = KeywordMatcher::new(keyword);
        let refined: Vec<Arc<Row>> = rows
            .iter()
            .filter(|row| matcher.matches_row(row))
            .cloned()
            .collect();

        log::debug!(
            "Refined '{}' from cached '{}': {} -> {} rows",
            keyword,
            key,
            rows.len(),
            refined.len()
        );

        if refined.is_empty() {
            None
        } else {
            Some(refined)
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Arc<Row> {
        Arc::new(Row::new(fields.iter().copied()).unwrap())
    }

    #[test]
    fn test_get_and_put() {
        let mut cache = HistoryCache::new();
        assert!(cache.get("search").is_none());

        let rows = vec![row(&["搜", "search"])];
        cache.put("search", rows.clone());
        assert_eq!(cache.get("search").unwrap(), rows.as_slice());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_overwrites() {
        let mut cache = HistoryCache::new();
        cache.put("a", vec![row(&["a"])]);
        cache.put("a", vec![row(&["ab"]), row(&["ac"])]);
        assert_eq!(cache.get("a").unwrap().len(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_empty_keyword_is_not_cached() {
        let mut cache = HistoryCache::new();
        cache.put("", vec![row(&["a"])]);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_prefix_match_refines_narrower_key() {
        let mut cache = HistoryCache::new();
        cache.put(
            "sea",
            vec![row(&["搜", "search"]), row(&["海", "sea"]), row(&["季", "season"])],
        );

        let refined = cache.find_prefix_match("search").unwrap();
        assert_eq!(refined.len(), 1);
        assert_eq!(refined[0].headword(), "搜");
    }

    #[test]
    fn test_prefix_match_ignores_wider_key() {
        let mut cache = HistoryCache::new();
        cache.put("search", vec![row(&["搜", "search"])]);

        // "searc" does not contain "search"; reusing it would drop rows.
        assert!(cache.find_prefix_match("searc").is_none());
    }

    #[test]
    fn test_prefix_match_empty_refinement_is_absent() {
        let mut cache = HistoryCache::new();
        cache.put("tr", vec![row(&["樹", "tree"])]);
        assert!(cache.find_prefix_match("trial").is_none());
    }

    #[test]
    fn test_prefix_match_prefers_longest_key() {
        let mut cache = HistoryCache::new();
        // Rows differ per key only so the chosen key is observable.
        cache.put("s", vec![row(&["搜", "search"]), row(&["海", "sea"])]);
        cache.put("sea", vec![row(&["海", "sea"])]);

        let refined = cache.find_prefix_match("sea").unwrap();
        assert_eq!(refined.len(), 1);
        assert_eq!(refined[0].headword(), "海");
    }

    #[test]
    fn test_prefix_match_accepts_infix_key() {
        let mut cache = HistoryCache::new();
        cache.put("arc", vec![row(&["搜", "search"]), row(&["弓", "arc"])]);

        let refined = cache.find_prefix_match("search").unwrap();
        assert_eq!(refined.len(), 1);
        assert_eq!(refined[0].headword(), "搜");
    }
}
