//! Search session: owns the history cache and drives debounced lookups
use crate::debounce::{DEFAULT_QUIET_PERIOD, Debouncer};
use crate::error::{DictError, Result};
use crate::metrics::Metrics;
use crate::scheduler::{Scheduler, TokioScheduler};
use crate::search::resolver::DEFAULT_PARALLEL_SCAN_THRESHOLD;
use crate::search::{HistoryCache, ResolutionSource, SearchResolver, SearchResults};
use crate::store::RowStore;
use log::{debug, info};
use parking_lot::{Mutex, RwLock};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

/// Receives search outcomes; `None` means no search is active.
pub type ResultListener = Arc<dyn Fn(Option<SearchResults>) + Send + Sync>;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub quiet_period: Duration,
    pub parallel_scan_threshold: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            quiet_period: DEFAULT_QUIET_PERIOD,
            parallel_scan_threshold: DEFAULT_PARALLEL_SCAN_THRESHOLD,
        }
    }
}

#[derive(Default)]
struct SessionState {
    history: HistoryCache,
    /// Latest keyword whose timer fired before the row store was loaded
    deferred: Option<String>,
}

struct SessionCore {
    store: OnceLock<Arc<RowStore>>,
    state: Mutex<SessionState>,
    listener: RwLock<Option<ResultListener>>,
    metrics: Arc<Metrics>,
    parallel_scan_threshold: usize,
}

impl SessionCore {
    /// Timer expiry for `keyword`
    fn fire(&self, keyword: String) {
        if keyword.is_empty() {
            self.state.lock().deferred = None;
            self.emit(None);
            return;
        }

        let results = {
            let mut state = self.state.lock();
            let Some(store) = self.store.get() else {
                debug!("Row store not loaded yet, deferring '{keyword}'");
                self.metrics.deferred_searches.inc();
                state.deferred = Some(keyword);
                return;
            };
            self.resolve_locked(&mut state, store, &keyword)
        };

        self.emit(Some(results));
    }

    fn resolve_locked(
        &self,
        state: &mut SessionState,
        store: &RowStore,
        keyword: &str,
    ) -> SearchResults {
        let resolution = SearchResolver::new(store)
            .with_parallel_scan_threshold(self.parallel_scan_threshold)
            .resolve(&state.history, keyword);
        state.history.put(keyword, resolution.rows.clone());

        self.metrics.searches_total.inc();
        match resolution.source {
            ResolutionSource::Exact => self.metrics.cache_exact_hits.inc(),
            ResolutionSource::Refined => self.metrics.cache_refined_hits.inc(),
            ResolutionSource::FullScan => self.metrics.full_scans.inc(),
        }
        debug!(
            "Resolved '{keyword}' via {}: {} rows",
            resolution.source,
            resolution.rows.len()
        );

        SearchResults {
            keyword: keyword.to_string(),
            rows: resolution.rows,
            source: resolution.source,
        }
    }

    fn emit(&self, results: Option<SearchResults>) {
        let listener = self.listener.read().clone();
        if let Some(listener) = listener {
            listener(results);
        }
    }
}

/// One user's search session over a row store.
///
/// The row store is installed once with [`SearchSession::load_row_store`];
/// keystrokes go through [`SearchSession::on_input_changed`] and results
/// arrive at the listener registered with [`SearchSession::on_result`].
pub struct SearchSession<S: Scheduler = TokioScheduler> {
    core: Arc<SessionCore>,
    debouncer: Debouncer<S>,
}

impl SearchSession<TokioScheduler> {
    /// Session whose timers run on the current tokio runtime
    pub fn with_tokio(config: SessionConfig, metrics: Arc<Metrics>) -> Result<Self> {
        Ok(Self::new(config, TokioScheduler::current()?, metrics))
    }
}

impl<S: Scheduler> SearchSession<S> {
    pub fn new(config: SessionConfig, scheduler: S, metrics: Arc<Metrics>) -> Self {
        Self {
            core: Arc::new(SessionCore {
                store: OnceLock::new(),
                state: Mutex::new(SessionState::default()),
                listener: RwLock::new(None),
                metrics,
                parallel_scan_threshold: config.parallel_scan_threshold,
            }),
            debouncer: Debouncer::new(scheduler, config.quiet_period),
        }
    }

    /// Install the row store. Only the first call succeeds; a search that
    /// fired while waiting for data is resolved right away.
    pub fn load_row_store(&self, records: Vec<Vec<String>>) -> Result<()> {
        let store = Arc::new(RowStore::from_records(records));
        let rows = store.len();

        let deferred = {
            let mut state = self.core.state.lock();
            self.core
                .store
                .set(store)
                .map_err(|_| DictError::StoreAlreadyLoaded)?;
            state.deferred.take()
        };
        info!("Row store loaded with {rows} entries");

        if let Some(keyword) = deferred {
            debug!("Resolving deferred search '{keyword}'");
            self.core.fire(keyword);
        }
        Ok(())
    }

    /// Feed the latest input text; the search runs once input is quiet.
    pub fn on_input_changed(&self, keyword: &str) {
        let keyword = keyword.trim().to_string();
        // Newer input supersedes a search waiting for the row store.
        if self.core.state.lock().deferred.take().is_some() {
            self.core.metrics.superseded_inputs.inc();
        }
        let core = Arc::clone(&self.core);
        if self.debouncer.submit(keyword, move |keyword| core.fire(keyword)) {
            self.core.metrics.superseded_inputs.inc();
        }
    }

    /// Register the result listener, replacing any earlier one
    pub fn on_result<F>(&self, callback: F)
    where
        F: Fn(Option<SearchResults>) + Send + Sync + 'static,
    {
        *self.core.listener.write() = Some(Arc::new(callback));
    }

    /// Resolve immediately, bypassing the quiet period. Returns `None` for
    /// an empty keyword.
    pub fn search_now(&self, keyword: &str) -> Result<Option<SearchResults>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(None);
        }
        let store = self.core.store.get().ok_or(DictError::StoreNotLoaded)?;

        let mut state = self.core.state.lock();
        Ok(Some(self.core.resolve_locked(&mut state, store, keyword)))
    }

    /// Run the pending search now instead of waiting out the quiet period.
    /// Returns false when nothing was pending.
    pub fn flush_pending(&self) -> bool {
        match self.debouncer.take_pending() {
            Some(keyword) => {
                debug!("Flushing pending search '{keyword}'");
                self.core.fire(keyword);
                true
            }
            None => false,
        }
    }

    pub fn store(&self) -> Option<Arc<RowStore>> {
        self.core.store.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.core.store.get().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn history_len(&self) -> usize {
        self.core.state.lock().history.len()
    }

    pub fn metrics(&self) -> &Metrics {
        &self.core.metrics
    }

    /// End the session; a pending search never runs.
    pub fn teardown(self) {
        if self.debouncer.cancel() {
            debug!("Session torn down with a pending search");
        }
    }
}
