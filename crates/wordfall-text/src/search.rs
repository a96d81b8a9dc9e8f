#![forbid(unsafe_code)]

//! Single-word frequency lookups.
//!
//! Empty input and absent words are ordinary outcomes, not errors; the
//! host renders [`SearchOutcome::message`] as an informational note.

use std::fmt;

use crate::normalize::normalize_token;
use crate::rank::FrequencyTable;

/// A normalized query and its count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub query: String,
    pub count: usize,
}

/// Result of a frequency search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// There is no analysed text to search.
    EmptyText,
    /// The query normalized to nothing.
    EmptyQuery,
    /// The query occurs at least once.
    Found(SearchHit),
    /// The query does not occur; `count` is 0.
    NotFound(SearchHit),
}

impl SearchOutcome {
    /// Whether the searched word was found.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The hit for `Found`/`NotFound` outcomes.
    #[must_use]
    pub fn hit(&self) -> Option<&SearchHit> {
        match self {
            Self::Found(hit) | Self::NotFound(hit) => Some(hit),
            Self::EmptyText | Self::EmptyQuery => None,
        }
    }

    /// Informational message for the host; empty when there is nothing to
    /// report.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyText | Self::EmptyQuery => Ok(()),
            Self::Found(hit) => {
                let unit = if hit.count == 1 { "time" } else { "times" };
                write!(f, "\"{}\" shows up {} {unit} in the text", hit.query, hit.count)
            }
            Self::NotFound(hit) => write!(f, "\"{}\" does not exist in the text", hit.query),
        }
    }
}

/// Look up `query` in `table`.
#[must_use]
pub fn search(table: &FrequencyTable, query: &str) -> SearchOutcome {
    if table.is_empty() {
        return SearchOutcome::EmptyText;
    }
    let normalized = normalize_token(query.trim());
    if normalized.is_empty() {
        return SearchOutcome::EmptyQuery;
    }
    let count = table.count(&normalized);
    let hit = SearchHit {
        query: normalized,
        count,
    };
    if count > 0 {
        SearchOutcome::Found(hit)
    } else {
        SearchOutcome::NotFound(hit)
    }
}
