//! Immutable row storage for loaded dictionary entries
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// One dictionary entry: the headword followed by its translations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Row {
    fields: Vec<String>,
}

impl Row {
    /// Build a row, dropping empty fields. Returns `None` when nothing is left.
    pub fn new<I, S>(fields: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields
            .into_iter()
            .map(Into::into)
            .filter(|field| !field.is_empty())
            .collect();

        if fields.is_empty() {
            None
        } else {
            Some(Self { fields })
        }
    }

    pub fn headword(&self) -> &str {
        &self.fields[0]
    }

    pub fn translations(&self) -> &[String] {
        &self.fields[1..]
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fields.join(" | "))
    }
}

/// Ordered, read-only collection of rows in source order.
#[derive(Debug, Default)]
pub struct RowStore {
    rows: Vec<Arc<Row>>,
}

impl RowStore {
    pub fn from_records(records: Vec<Vec<String>>) -> Self {
        let total = records.len();
        let rows: Vec<Arc<Row>> = records
            .into_iter()
            .filter_map(Row::new)
            .map(Arc::new)
            .collect();

        if rows.len() < total {
            log::debug!(
                "Dropped {} records with no non-empty fields",
                total - rows.len()
            );
        }

        Self { rows }
    }

    pub fn rows(&self) -> &[Arc<Row>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Deterministic daily pick: day number since the common era modulo row count.
    pub fn word_of_the_day(&self, date: NaiveDate) -> Option<&Arc<Row>> {
        if self.rows.is_empty() {
            return None;
        }
        let day = date.num_days_from_ce().unsigned_abs() as usize;
        self.rows.get(day % self.rows.len())
    }
}
