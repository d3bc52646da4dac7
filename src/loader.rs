//! Fetching and parsing the spreadsheet CSV export
use crate::error::{DictError, Result};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the CSV text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(std::path::PathBuf),
}

impl Source {
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Source::Url(location.to_string())
        } else {
            Source::File(Path::new(location).to_path_buf())
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{url}"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Read the raw CSV text from a URL or a local file
pub async fn load_source(source: &Source, timeout: Duration) -> Result<String> {
    match source {
        Source::Url(url) => fetch_csv(url, timeout).await,
        Source::File(path) => {
            log::debug!("Reading rows from {}", path.display());
            Ok(tokio::fs::read_to_string(path).await?)
        }
    }
}

async fn fetch_csv(url: &str, timeout: Duration) -> Result<String> {
    log::debug!("Fetching rows from {url}");
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let response = client.get(url).send().await?;
    let text = response.error_for_status()?.text().await?;
    Ok(text)
}

/// Parse header-less CSV into records, dropping empty fields.
///
/// With `skip_header` the first record (the sheet's title row) is dropped.
pub fn parse_csv(text: &str, skip_header: bool) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        if skip_header && index == 0 {
            continue;
        }
        records.push(
            record
                .iter()
                .filter(|field| !field.is_empty())
                .map(str::to_string)
                .collect(),
        );
    }

    Ok(records)
}

/// Load and parse in one step, rejecting sources with no rows
pub async fn load_records(
    source: &Source,
    skip_header: bool,
    timeout: Duration,
) -> Result<Vec<Vec<String>>> {
    let text = load_source(source, timeout).await?;
    let records = parse_csv(&text, skip_header)?;
    if records.iter().all(Vec::is_empty) {
        return Err(DictError::EmptyStore(source.to_string()));
    }
    log::info!("Parsed {} records from {source}", records.len());
    Ok(records)
}
