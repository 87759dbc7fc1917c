//! Request orchestration
//!
//! Coordinates one search request end to end: search, candidate selection,
//! concurrency-bounded fetch-and-summarize fan-out, priority ranking and
//! final truncation. Nothing survives the request; there is no shared
//! mutable state between candidates or between requests.

use crate::config::Settings;
use crate::domains::DomainFilter;
use crate::extract::Extractor;
use crate::network::HttpClient;
use crate::search::{SearchClient, SearchHit};
use crate::summarize::SummarizerClient;
use crate::{FANOUT_CANDIDATES, MAX_RESULTS};
use anyhow::Result;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};

/// One summarized source, as returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResult {
    /// Source URL
    pub link: String,
    /// Short Hungarian summary of the article
    #[serde(rename = "összegzés")]
    pub summary: String,
    /// Display title of the source page
    #[serde(rename = "forrás")]
    pub source_title: String,
    /// Whether the source host is on the priority list
    pub priority: bool,
}

/// The final response payload for one search request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// The original query
    #[serde(rename = "lekérdezés")]
    pub query: String,
    /// Ranked summaries, priority sources first, at most two
    #[serde(rename = "találatok")]
    pub results: Vec<SummaryResult>,
    /// Elapsed wall-clock time in milliseconds
    pub response_time_ms: f64,
}

/// Orchestrates the search → extract → summarize pipeline
#[derive(Clone)]
pub struct Pipeline {
    search: SearchClient,
    extractor: Extractor,
    summarizer: SummarizerClient,
    filter: DomainFilter,
}

impl Pipeline {
    pub fn new(settings: &Settings, http: HttpClient) -> Self {
        let filter = DomainFilter::new(&settings.domains);
        Self {
            search: SearchClient::new(http.clone(), filter.clone(), &settings.search),
            extractor: Extractor::new(http.clone()),
            summarizer: SummarizerClient::new(http, settings.summarizer.clone()),
            filter,
        }
    }

    /// Run the full pipeline for one query.
    ///
    /// An empty search result is a successful outcome with an empty list,
    /// never an error. A candidate failing at any stage is dropped without
    /// retry; the rest of the fan-out is unaffected.
    pub async fn run(&self, query: &str) -> Result<SearchOutcome> {
        let start = Instant::now();

        let hits = self.search.search(query).await;
        if hits.is_empty() {
            info!("No search hits for '{}'", query);
            return Ok(Self::outcome(query, Vec::new(), start));
        }

        let candidates: Vec<SearchHit> = hits.into_iter().take(FANOUT_CANDIDATES).collect();
        info!(
            "Processing {} candidates for '{}' in parallel",
            candidates.len(),
            query
        );

        // One task per candidate; the fan-out is bounded by the candidate
        // cap itself. Workers own their candidate and share nothing.
        let tasks: Vec<_> = candidates
            .into_iter()
            .map(|hit| {
                let extractor = self.extractor.clone();
                let summarizer = self.summarizer.clone();
                let query = query.to_string();
                tokio::spawn(async move {
                    process_candidate(&extractor, &summarizer, hit, &query).await
                })
            })
            .collect();

        let mut results = Vec::new();
        for joined in join_all(tasks).await {
            match joined {
                Ok(Some(result)) => results.push(result),
                Ok(None) => {}
                Err(e) => warn!("Candidate task failed to join: {}", e),
            }
        }

        // Stable sort: priority sources first, completion order otherwise.
        results.sort_by_key(|r| !r.priority);
        results.truncate(MAX_RESULTS);

        Ok(Self::outcome(query, results, start))
    }

    /// Plain-text mode: walk the hits sequentially, fetch only allow-listed
    /// domains, return up to two raw article texts prefixed with their
    /// source URL. No summarization.
    pub async fn run_plain(&self, query: &str) -> Result<Vec<String>> {
        let hits = self.search.search(query).await;
        let mut texts = Vec::new();

        for hit in hits {
            if texts.len() >= MAX_RESULTS {
                break;
            }
            if !self.filter.is_allowed(&hit.url) {
                debug!("Skipping non-trusted domain: {}", hit.url);
                continue;
            }
            match self.extractor.extract(&hit.url).await {
                Ok(text) => texts.push(format!("Forrás: {}\n\n{}\n", hit.url, text)),
                Err(e) => debug!("Dropping {}: {}", hit.url, e),
            }
        }

        Ok(texts)
    }

    fn outcome(query: &str, results: Vec<SummaryResult>, start: Instant) -> SearchOutcome {
        SearchOutcome {
            query: query.to_string(),
            results,
            response_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

/// Process one candidate independently: extract, then summarize. Any
/// failure drops the candidate and is only logged.
async fn process_candidate(
    extractor: &Extractor,
    summarizer: &SummarizerClient,
    hit: SearchHit,
    query: &str,
) -> Option<SummaryResult> {
    let text = match extractor.extract(&hit.url).await {
        Ok(t) => t,
        Err(e) => {
            debug!("Extraction dropped {}: {}", hit.url, e);
            return None;
        }
    };

    match summarizer.summarize(&text, query).await {
        Ok(summary) => Some(SummaryResult {
            link: hit.url,
            summary,
            source_title: hit.title,
            priority: hit.is_priority,
        }),
        Err(e) => {
            warn!("Summarization dropped {}: {}", hit.url, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(link: &str, priority: bool) -> SummaryResult {
        SummaryResult {
            link: link.to_string(),
            summary: "összefoglaló".to_string(),
            source_title: "cím".to_string(),
            priority,
        }
    }

    #[test]
    fn test_priority_sort_is_stable() {
        let mut results = vec![
            result("https://a.example", false),
            result("https://telex.hu/1", true),
            result("https://b.example", false),
            result("https://telex.hu/2", true),
        ];
        results.sort_by_key(|r| !r.priority);

        assert_eq!(results[0].link, "https://telex.hu/1");
        assert_eq!(results[1].link, "https://telex.hu/2");
        assert_eq!(results[2].link, "https://a.example");
        assert_eq!(results[3].link, "https://b.example");
    }

    #[test]
    fn test_outcome_serialization_uses_hungarian_fields() {
        let outcome = SearchOutcome {
            query: "időjárás".to_string(),
            results: vec![result("https://telex.hu/cikk", true)],
            response_time_ms: 12.5,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["lekérdezés"], "időjárás");
        assert_eq!(json["találatok"][0]["link"], "https://telex.hu/cikk");
        assert_eq!(json["találatok"][0]["összegzés"], "összefoglaló");
        assert_eq!(json["találatok"][0]["forrás"], "cím");
        assert_eq!(json["találatok"][0]["priority"], true);
    }
}
