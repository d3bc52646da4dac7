//! Rendering of search results for the terminal
pub mod formats;

use crate::cli::OutputFormat;
use crate::search::SearchResults;

pub use formats::{JsonFormatter, TextFormatter};

/// Trait for result formatters
pub trait ResultFormatter: Send + Sync {
    fn format(&self, results: &SearchResults) -> String;
}

#[derive(Debug, Clone, Copy)]
pub struct DisplayOptions {
    /// Rows shown at most; the total is still reported
    pub max_results: usize,
    /// Emit colors and keyword highlights
    pub highlight: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            max_results: 100,
            highlight: true,
        }
    }
}

pub fn formatter_for(format: OutputFormat, options: DisplayOptions) -> Box<dyn ResultFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(options)),
        OutputFormat::Json => Box::new(JsonFormatter::new(options)),
    }
}

/// Piece of a field, either plain text or an occurrence of the keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Keyword(&'a str),
}

/// Split `field` around every occurrence of `keyword`.
pub fn highlight_segments<'a>(field: &'a str, keyword: &'a str) -> Vec<Segment<'a>> {
    if keyword.is_empty() {
        return vec![Segment::Plain(field)];
    }

    let mut segments = Vec::new();
    let mut parts = field.split(keyword).peekable();
    while let Some(part) = parts.next() {
        if !part.is_empty() {
            segments.push(Segment::Plain(part));
        }
        if parts.peek().is_some() {
            segments.push(Segment::Keyword(keyword));
        }
    }
    segments
}

/// Notice shown when more rows matched than are displayed
pub fn truncation_notice(total: usize, shown: usize) -> Option<String> {
    (total > shown).then(|| format!("總共有{total}相關字詞，顯示首{shown}個結果"))
}
