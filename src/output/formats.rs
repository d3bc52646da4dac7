use super::{DisplayOptions, ResultFormatter, Segment, highlight_segments, truncation_notice};
use crate::error::Result;
use crate::search::{ResolutionSource, SearchResults};
use crate::store::Row;
use colored::*;
use log::warn;
use serde::Serialize;
use std::fmt::Write;
use std::sync::Arc;

/// Headword on its own line, translations indented beneath it
pub struct TextFormatter {
    options: DisplayOptions,
}

impl TextFormatter {
    pub fn new(options: DisplayOptions) -> Self {
        Self { options }
    }

    fn styled_field(&self, field: &str, keyword: Option<&str>, headword: bool) -> String {
        if !self.options.highlight {
            return field.to_string();
        }

        let mut out = String::new();
        for segment in highlight_segments(field, keyword.unwrap_or("")) {
            let piece = match segment {
                Segment::Keyword(text) => text.yellow().bold().to_string(),
                Segment::Plain(text) if headword => text.cyan().bold().to_string(),
                Segment::Plain(text) => text.to_string(),
            };
            out.push_str(&piece);
        }
        out
    }

    pub fn format_row(&self, row: &Row, keyword: Option<&str>) -> String {
        let mut out = self.styled_field(row.headword(), keyword, true);
        out.push('\n');
        for translation in row.translations() {
            let _ = writeln!(out, "  {}", self.styled_field(translation, keyword, false));
        }
        out
    }
}

impl ResultFormatter for TextFormatter {
    fn format(&self, results: &SearchResults) -> String {
        if results.is_empty() {
            return if self.options.highlight {
                format!("{}\n", "No matches found".yellow())
            } else {
                "No matches found\n".to_string()
            };
        }

        let shown = results.total().min(self.options.max_results);
        let mut out = String::new();
        for row in results.rows.iter().take(shown) {
            out.push_str(&self.format_row(row, Some(&results.keyword)));
            out.push('\n');
        }

        if let Some(notice) = truncation_notice(results.total(), shown) {
            if self.options.highlight {
                let _ = writeln!(out, "{}", notice.dimmed());
            } else {
                let _ = writeln!(out, "{notice}");
            }
        }
        out
    }
}

#[derive(Serialize)]
struct JsonResults<'a> {
    keyword: &'a str,
    total: usize,
    shown: usize,
    source: ResolutionSource,
    rows: &'a [Arc<Row>],
}

pub struct JsonFormatter {
    options: DisplayOptions,
}

impl JsonFormatter {
    pub fn new(options: DisplayOptions) -> Self {
        Self { options }
    }

    pub fn render(&self, results: &SearchResults) -> Result<String> {
        let shown = results.total().min(self.options.max_results);
        let payload = JsonResults {
            keyword: &results.keyword,
            total: results.total(),
            shown,
            source: results.source,
            rows: &results.rows[..shown],
        };
        Ok(serde_json::to_string_pretty(&payload)?)
    }
}

impl ResultFormatter for JsonFormatter {
    fn format(&self, results: &SearchResults) -> String {
        match self.render(results) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize results for '{}': {e}", results.keyword);
                String::new()
            }
        }
    }
}
