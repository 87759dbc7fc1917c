//! Summarizer client
//!
//! Sends extracted article text plus the original query to a chat-completion
//! API and returns a short Hungarian summary. Every failure is recoverable:
//! the orchestrator simply drops the candidate.

use crate::config::SummarizerSettings;
use crate::network::HttpClient;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Why a summarization attempt produced nothing
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("summarization request failed: {0}")]
    Request(String),
    #[error("summarization API returned HTTP {0}")]
    Status(u16),
    #[error("malformed summarization response")]
    MalformedResponse,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: String,
}

/// Client for the chat-completion summarization API
#[derive(Clone)]
pub struct SummarizerClient {
    http: HttpClient,
    settings: SummarizerSettings,
    timeout: Duration,
}

impl SummarizerClient {
    pub fn new(http: HttpClient, settings: SummarizerSettings) -> Self {
        let timeout = Duration::from_secs_f64(settings.timeout);
        Self {
            http,
            settings,
            timeout,
        }
    }

    /// Summarize `text` in the context of the original `query`.
    pub async fn summarize(&self, text: &str, query: &str) -> Result<String, SummarizeError> {
        let prompt = self.build_prompt(text, query);

        let body = json!({
            "model": self.settings.model,
            "messages": [
                {"role": "user", "content": prompt}
            ],
            "temperature": self.settings.temperature,
            "max_tokens": self.settings.max_tokens,
        });

        let response = self
            .http
            .post_json_auth(&self.settings.api_url, &body, &self.settings.api_key, self.timeout)
            .await
            .map_err(|e| SummarizeError::Request(e.to_string()))?;

        if !response.is_success() {
            return Err(SummarizeError::Status(response.status));
        }

        let parsed: CompletionResponse = response
            .json()
            .map_err(|_| SummarizeError::MalformedResponse)?;

        let summary = parsed
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(SummarizeError::MalformedResponse)?;

        debug!("Summary produced ({} chars)", summary.chars().count());
        Ok(summary)
    }

    /// Hungarian, fact-focused, at most three sentences; the article text
    /// is truncated to bound payload size and cost.
    fn build_prompt(&self, text: &str, query: &str) -> String {
        let truncated: String = text.chars().take(self.settings.max_input_chars).collect();
        format!(
            "Foglald össze az alábbi cikket magyarul, legfeljebb 3 mondatban, \
             tényszerűen, a kérdésre koncentrálva.\n\nKérdés: {}\n\nCikk:\n{}",
            query, truncated
        )
    }
}
