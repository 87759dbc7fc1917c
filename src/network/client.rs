//! HTTP client for outgoing requests

use super::user_agent::{accept_html, accept_language, pick_user_agent};
use anyhow::Result;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

/// HTTP client wrapper with browser-like defaults
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
}

/// A fetched response, reduced to what the pipeline needs
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
}

impl HttpResponse {
    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse response body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.text)?)
    }
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder().gzip(true).brotli(true).build()?;
        Ok(Self {
            client,
            user_agent: pick_user_agent().to_string(),
        })
    }

    /// GET a page with browser-like headers
    pub async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .header("User-Agent", &self.user_agent)
            .header("Accept", accept_html())
            .header("Accept-Language", accept_language())
            .send()
            .await?;

        Self::read_response(response).await
    }

    /// POST a form body with browser-like headers
    pub async fn post_form(
        &self,
        url: &str,
        form: &HashMap<String, String>,
        timeout: Duration,
    ) -> Result<HttpResponse> {
        let response = self
            .client
            .post(url)
            .timeout(timeout)
            .header("User-Agent", &self.user_agent)
            .header("Accept", accept_html())
            .header("Accept-Language", accept_language())
            .form(form)
            .send()
            .await?;

        Self::read_response(response).await
    }

    /// POST a JSON body with a bearer credential
    pub async fn post_json_auth(
        &self,
        url: &str,
        body: &serde_json::Value,
        bearer: &str,
        timeout: Duration,
    ) -> Result<HttpResponse> {
        let response = self
            .client
            .post(url)
            .timeout(timeout)
            .header("Authorization", format!("Bearer {}", bearer))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        Self::read_response(response).await
    }

    /// Current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    async fn read_response(response: reqwest::Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let text = response.text().await?;
        Ok(HttpResponse { status, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_response_success_range() {
        let ok = HttpResponse {
            status: 204,
            text: String::new(),
        };
        let err = HttpResponse {
            status: 500,
            text: String::new(),
        };
        assert!(ok.is_success());
        assert!(!err.is_success());
    }
}
