//! Substring matching of a keyword against row fields using memchr
use crate::store::Row;
use memchr::memmem::Finder;

/// Case-sensitive substring matcher for one keyword.
#[derive(Clone, Debug)]
pub struct KeywordMatcher {
    finder: Finder<'static>,
}

impl KeywordMatcher {
    pub fn new(keyword: &str) -> Self {
        Self {
            finder: Finder::new(keyword.as_bytes()).into_owned(),
        }
    }

    pub fn matches_text(&self, text: &str) -> bool {
        if text.is_empty() || self.finder.needle().is_empty() {
            return false;
        }
        self.finder.find(text.as_bytes()).is_some()
    }

    /// True when at least one non-empty field contains the keyword.
    pub fn matches_row(&self, row: &Row) -> bool {
        row.fields().iter().any(|field| self.matches_text(field))
    }
}
