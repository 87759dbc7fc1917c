//! Hirforras: AI-assisted web search and summarization service
//!
//! Scrapes a search engine for a user query, fetches the most promising
//! pages from trusted sources, extracts the readable article text and
//! summarizes it through a chat-completion API.

pub mod config;
pub mod domains;
pub mod extract;
pub mod network;
pub mod pipeline;
pub mod search;
pub mod summarize;
pub mod web;

pub use config::Settings;
pub use pipeline::{Pipeline, SearchOutcome, SummaryResult};
pub use search::SearchHit;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of search hits kept after filtering
pub const MAX_SEARCH_HITS: usize = 10;

/// Number of candidate pages processed concurrently per request
pub const FANOUT_CANDIDATES: usize = 3;

/// Maximum number of summaries returned to the caller
pub const MAX_RESULTS: usize = 2;
