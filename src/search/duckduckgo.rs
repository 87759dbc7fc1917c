//! DuckDuckGo HTML results scraping

use super::SearchHit;
use crate::config::SearchSettings;
use crate::domains::DomainFilter;
use crate::network::HttpClient;
use crate::MAX_SEARCH_HITS;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Markers of the engine's outbound-link redirector
const REDIRECT_PREFIXES: &[&str] = &[
    "//duckduckgo.com/l/",
    "https://duckduckgo.com/l/",
    "http://duckduckgo.com/l/",
];

/// Scrapes the DuckDuckGo HTML endpoint for candidate URLs
#[derive(Clone)]
pub struct SearchClient {
    http: HttpClient,
    filter: DomainFilter,
    endpoint: String,
    timeout: Duration,
}

impl SearchClient {
    pub fn new(http: HttpClient, filter: DomainFilter, settings: &SearchSettings) -> Self {
        Self {
            http,
            filter,
            endpoint: settings.endpoint.clone(),
            timeout: Duration::from_secs_f64(settings.timeout),
        }
    }

    /// Run the query and return filtered, priority-first hits.
    ///
    /// Search failure is never fatal: any transport or parse problem yields
    /// an empty list, which the caller reports as "no results".
    pub async fn search(&self, query: &str) -> Vec<SearchHit> {
        let mut form = HashMap::new();
        form.insert("q".to_string(), query.to_string());

        let response = match self.http.post_form(&self.endpoint, &form, self.timeout).await {
            Ok(r) => r,
            Err(e) => {
                warn!("Search request failed: {}", e);
                return Vec::new();
            }
        };

        if !response.is_success() {
            warn!("Search engine returned HTTP {}", response.status);
            return Vec::new();
        }

        self.parse_results(&response.text)
    }

    fn parse_results(&self, html: &str) -> Vec<SearchHit> {
        let document = Html::parse_document(html);
        let anchor_selector =
            Selector::parse("a.result__a").expect("static selector must parse");

        let mut priority = Vec::new();
        let mut rest = Vec::new();

        for anchor in document.select(&anchor_selector) {
            let href = match anchor.value().attr("href") {
                Some(h) if !h.is_empty() => h,
                _ => continue,
            };

            let title = anchor.text().collect::<String>().trim().to_string();
            if title.is_empty() {
                continue;
            }

            let url = unwrap_redirect(href);

            if self.filter.is_blocked(&url) {
                debug!("Dropping block-listed hit: {}", url);
                continue;
            }

            let is_priority = self.filter.is_priority(&url);
            let hit = SearchHit::new(url, title, is_priority);
            if is_priority {
                priority.push(hit);
            } else {
                rest.push(hit);
            }
        }

        let mut hits = priority;
        hits.extend(rest);
        hits.truncate(MAX_SEARCH_HITS);

        debug!("Search produced {} candidate hits", hits.len());
        hits
    }
}

/// Unwrap the engine's redirect-wrapper URLs.
///
/// `//duckduckgo.com/l/?uddg=<encoded>&rut=...` becomes the decoded target;
/// everything after the first `&` of the wrapper is discarded. Other URLs
/// pass through unchanged.
pub fn unwrap_redirect(url: &str) -> String {
    let is_wrapped = REDIRECT_PREFIXES.iter().any(|p| url.starts_with(p));
    if !is_wrapped {
        return url.to_string();
    }

    let encoded = match url.split_once("uddg=") {
        Some((_, tail)) => tail.split('&').next().unwrap_or(tail),
        None => return url.to_string(),
    };

    match urlencoding::decode(encoded) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SearchClient {
        SearchClient::new(
            HttpClient::new().unwrap(),
            DomainFilter::default(),
            &SearchSettings::default(),
        )
    }

    fn results_page(anchors: &[(&str, &str)]) -> String {
        let body: String = anchors
            .iter()
            .map(|(href, title)| {
                format!(
                    "<div class=\"result\"><a class=\"result__a\" href=\"{}\">{}</a></div>",
                    href, title
                )
            })
            .collect();
        format!("<html><body>{}</body></html>", body)
    }

    #[test]
    fn test_unwrap_redirect() {
        let wrapped = "//duckduckgo.com/l/?uddg=https%3A%2F%2Ftelex.hu%2Fbelfold%2Fcikk&rut=abc123";
        assert_eq!(unwrap_redirect(wrapped), "https://telex.hu/belfold/cikk");
    }

    #[test]
    fn test_unwrap_redirect_passthrough() {
        let plain = "https://example.com/page?x=1&y=2";
        assert_eq!(unwrap_redirect(plain), plain);
    }

    #[test]
    fn test_unwrap_redirect_without_uddg() {
        let odd = "//duckduckgo.com/l/?other=thing";
        assert_eq!(unwrap_redirect(odd), odd);
    }

    #[test]
    fn test_block_list_excluded() {
        let html = results_page(&[
            ("https://www.facebook.com/page", "Facebook oldal"),
            ("https://example.com/article", "Cikk"),
        ]);
        let hits = client().parse_results(&html);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url, "https://example.com/article");
    }

    #[test]
    fn test_priority_hits_first() {
        let html = results_page(&[
            ("https://example.com/a", "Egyéb"),
            ("https://telex.hu/cikk", "Telex cikk"),
            ("https://example.org/b", "Másik"),
        ]);
        let hits = client().parse_results(&html);
        assert_eq!(hits.len(), 3);
        assert!(hits[0].is_priority);
        assert_eq!(hits[0].url, "https://telex.hu/cikk");
        assert!(!hits[1].is_priority);
    }

    #[test]
    fn test_hit_cap() {
        let anchors: Vec<(String, String)> = (0..15)
            .map(|i| (format!("https://example.com/{}", i), format!("Cikk {}", i)))
            .collect();
        let refs: Vec<(&str, &str)> = anchors
            .iter()
            .map(|(u, t)| (u.as_str(), t.as_str()))
            .collect();
        let hits = client().parse_results(&results_page(&refs));
        assert_eq!(hits.len(), MAX_SEARCH_HITS);
    }

    #[test]
    fn test_untitled_anchor_skipped() {
        let html = results_page(&[("https://example.com/a", "  ")]);
        assert!(client().parse_results(&html).is_empty());
    }
}
