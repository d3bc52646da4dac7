//! History-assisted incremental search over the row store
pub mod cache;
pub mod matcher;
pub mod resolver;

use crate::store::Row;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

pub use cache::HistoryCache;
pub use matcher::KeywordMatcher;
pub use resolver::SearchResolver;

/// How a keyword was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// Same keyword was searched before
    Exact,
    /// Filtered from a narrower keyword's cached rows
    Refined,
    /// Scanned the whole row store
    FullScan,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionSource::Exact => write!(f, "exact"),
            ResolutionSource::Refined => write!(f, "refined"),
            ResolutionSource::FullScan => write!(f, "full-scan"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub rows: Vec<Arc<Row>>,
    pub source: ResolutionSource,
}

/// Search outcome delivered to result listeners
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub keyword: String,
    pub rows: Vec<Arc<Row>>,
    pub source: ResolutionSource,
}

impl SearchResults {
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
