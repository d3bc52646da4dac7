pub mod cli;
pub mod config;
pub mod debounce;
pub mod error;
pub mod interactive;
pub mod loader;
pub mod metrics;
pub mod output;
pub mod progress;
pub mod scheduler;
pub mod search;
pub mod session;
pub mod store;

pub use crate::error::{DictError, Result};
pub use clap::Parser;
pub use cli::{Cli, Commands, OutputFormat};
pub use debounce::{DEFAULT_QUIET_PERIOD, Debouncer};
pub use loader::{Source, load_records, load_source, parse_csv};
pub use metrics::Metrics;
pub use scheduler::{Scheduler, Task, TaskHandle, TokioScheduler};
pub use search::{
    HistoryCache, KeywordMatcher, Resolution, ResolutionSource, SearchResolver, SearchResults,
};
pub use session::{ResultListener, SearchSession, SessionConfig};
pub use store::{Row, RowStore};
