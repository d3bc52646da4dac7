use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DictError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Row store has already been loaded for this session")]
    StoreAlreadyLoaded,

    #[error("Row store has not been loaded yet")]
    StoreNotLoaded,

    #[error("Row store is empty: {0}")]
    EmptyStore(String),

    #[error("No async runtime available: {0}")]
    NoRuntime(String),

    #[error("An unexpected error occurred: {0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DictError>;
