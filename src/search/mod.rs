//! Search client module
//!
//! Issues the user query against a search engine's HTML endpoint and turns
//! the response into a filtered, priority-ranked list of candidate URLs.

mod duckduckgo;

pub use duckduckgo::SearchClient;

use serde::{Deserialize, Serialize};

/// A single candidate produced by the search scrape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Target URL, already unwrapped from any redirector
    pub url: String,
    /// Display title from the results page
    pub title: String,
    /// Whether the host is on the priority list
    pub is_priority: bool,
}

impl SearchHit {
    pub fn new(url: impl Into<String>, title: impl Into<String>, is_priority: bool) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            is_priority,
        }
    }
}
