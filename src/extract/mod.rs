//! Content extraction
//!
//! Turns raw page markup into a cleaned plain-text approximation of the
//! article body. Looks for a main content landmark first, then falls back
//! to harvesting every paragraph on the page.

use crate::network::HttpClient;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Extracted text shorter than this is treated as noise, not content.
pub const MIN_CONTENT_CHARS: usize = 150;

/// Page fetch timeout
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Class attribute tokens that suggest a content container. The Hungarian
/// tokens ("cikk", "szoveg") cover the domestic news sites.
static CONTENT_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(content|main|post|article|cikk|szoveg)").unwrap());

/// Elements whose subtree never contributes article text
const SKIP_ANCESTORS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "aside", "form", "noscript", "figure",
];

/// Why a candidate page produced no usable text. All variants are
/// recoverable: the orchestrator drops the candidate and moves on.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("page fetch failed: {0}")]
    Fetch(String),
    #[error("page returned HTTP {0}")]
    HttpStatus(u16),
    #[error("no readable content found")]
    NoContent,
    #[error("content too short ({0} chars)")]
    TooShort(usize),
}

/// Fetches pages and extracts their readable text
#[derive(Clone)]
pub struct Extractor {
    http: HttpClient,
}

impl Extractor {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Fetch `url` and return its cleaned article text.
    pub async fn extract(&self, url: &str) -> Result<String, ExtractError> {
        let response = self
            .http
            .get(url, FETCH_TIMEOUT)
            .await
            .map_err(|e| ExtractError::Fetch(e.to_string()))?;

        if !response.is_success() {
            return Err(ExtractError::HttpStatus(response.status));
        }

        let text = extract_text(&response.text)?;
        debug!("Extracted {} chars from {}", text.chars().count(), url);
        Ok(text)
    }
}

/// Extract cleaned article text from raw HTML.
pub fn extract_text(html: &str) -> Result<String, ExtractError> {
    let document = Html::parse_document(html);

    let region = find_content_region(&document).unwrap_or_else(|| document.root_element());
    let text = harvest_text(region);

    if text.is_empty() {
        return Err(ExtractError::NoContent);
    }
    let chars = text.chars().count();
    if chars < MIN_CONTENT_CHARS {
        return Err(ExtractError::TooShort(chars));
    }
    Ok(text)
}

/// Locate the primary content region: a `main` landmark, then `article`,
/// then any container whose class attribute looks content-like.
fn find_content_region(document: &Html) -> Option<ElementRef<'_>> {
    for selector in ["main", "article"] {
        let sel = Selector::parse(selector).expect("static selector must parse");
        if let Some(region) = document.select(&sel).next() {
            return Some(region);
        }
    }

    let container_sel =
        Selector::parse("div[class], section[class]").expect("static selector must parse");
    document.select(&container_sel).find(|el| {
        el.value()
            .attr("class")
            .map(|c| CONTENT_CLASS.is_match(c))
            .unwrap_or(false)
    })
}

/// Concatenate paragraph and heading text inside the region, skipping
/// anything nested in navigation, footers and other non-content markup.
fn harvest_text(region: ElementRef<'_>) -> String {
    let text_sel = Selector::parse("p, h1, h2, h3").expect("static selector must parse");

    let mut pieces = Vec::new();
    for element in region.select(&text_sel) {
        if has_skipped_ancestor(element) {
            continue;
        }
        let text = element.text().collect::<String>();
        if !text.trim().is_empty() {
            pieces.push(text);
        }
    }

    // Collapse all whitespace runs to single spaces
    pieces
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn has_skipped_ancestor(element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| SKIP_ANCESTORS.contains(&a.value().name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(paragraph: &str) -> String {
        format!("<html><body><article><p>{}</p></article></body></html>", paragraph)
    }

    fn long_paragraph() -> String {
        "A hosszú bekezdés, amely bőven túllépi a minimális tartalomküszöböt. ".repeat(4)
    }

    #[test]
    fn test_extracts_article_landmark() {
        let html = article(&long_paragraph());
        let text = extract_text(&html).unwrap();
        assert!(text.starts_with("A hosszú bekezdés"));
        // Whitespace collapsed to single spaces
        assert!(!text.contains("  "));
    }

    #[test]
    fn test_too_short_is_an_error() {
        let html = article("Rövid.");
        match extract_text(&html) {
            Err(ExtractError::TooShort(n)) => assert!(n < MIN_CONTENT_CHARS),
            other => panic!("expected TooShort, got {:?}", other),
        }
    }

    #[test]
    fn test_no_content() {
        let html = "<html><body><div><span>no paragraphs here</span></div></body></html>";
        assert!(matches!(extract_text(html), Err(ExtractError::NoContent)));
    }

    #[test]
    fn test_class_pattern_container() {
        let html = format!(
            "<html><body><div class=\"cikk-torzs\"><p>{}</p></div>\
             <div class=\"sidebar\"><p>mellékes szöveg</p></div></body></html>",
            long_paragraph()
        );
        let text = extract_text(&html).unwrap();
        assert!(!text.contains("mellékes"));
    }

    #[test]
    fn test_navigation_and_footer_skipped() {
        let html = format!(
            "<html><body><article><nav><p>menüpontok</p></nav><p>{}</p>\
             <footer><p>impresszum</p></footer></article></body></html>",
            long_paragraph()
        );
        let text = extract_text(&html).unwrap();
        assert!(!text.contains("menüpontok"));
        assert!(!text.contains("impresszum"));
    }

    #[test]
    fn test_whole_document_fallback() {
        let html = format!(
            "<html><body><div><p>{}</p><h2>Alcím</h2></div></body></html>",
            long_paragraph()
        );
        let text = extract_text(&html).unwrap();
        assert!(text.contains("Alcím"));
    }
}
