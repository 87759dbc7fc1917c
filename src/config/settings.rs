//! Settings structures for Hirforras configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub search: SearchSettings,
    pub summarizer: SummarizerSettings,
    pub domains: DomainSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (HIRFORRAS_* prefix, plus PORT)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("HIRFORRAS_PORT").or_else(|_| std::env::var("PORT")) {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("HIRFORRAS_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("HIRFORRAS_API_KEY") {
            self.summarizer.api_key = val;
        }
        if let Ok(val) = std::env::var("HIRFORRAS_MODEL") {
            self.summarizer.model = val;
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_address: "0.0.0.0".to_string(),
        }
    }
}

/// Search engine scrape settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// HTML results endpoint of the search engine
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://html.duckduckgo.com/html/".to_string(),
            timeout: 5.0,
        }
    }
}

/// Summarization API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerSettings {
    /// Chat-completion endpoint
    pub api_url: String,
    /// Bearer credential for the API
    pub api_key: String,
    /// Model identifier sent in the request body
    pub model: String,
    /// Sampling temperature (kept low to favor determinism)
    pub temperature: f64,
    /// Response length cap in tokens
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout: f64,
    /// Maximum number of input characters sent per article
    pub max_input_chars: usize,
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            api_url: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            api_key: String::new(),
            model: "openai/gpt-4o-mini".to_string(),
            temperature: 0.2,
            max_tokens: 300,
            timeout: 15.0,
            max_input_chars: 4500,
        }
    }
}

/// Domain classification lists. Matching is a case-insensitive substring
/// check against the URL host, so `telex.hu` also matches `www.telex.hu`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainSettings {
    /// Domains whose content may be served raw in plain-text mode
    pub trusted: Vec<String>,
    /// Domains whose hits are ranked ahead of everything else
    pub priority: Vec<String>,
    /// Domains excluded from search results entirely
    pub blocked: Vec<String>,
}

impl Default for DomainSettings {
    fn default() -> Self {
        Self {
            trusted: vec![
                "index.hu".to_string(),
                "telex.hu".to_string(),
                "444.hu".to_string(),
                "bbc.com".to_string(),
                "euronews.com".to_string(),
                "hu.wikipedia.org".to_string(),
                "en.wikipedia.org".to_string(),
                "fandom.com".to_string(),
                "gamepedia.com".to_string(),
                "minecraft.wiki".to_string(),
            ],
            priority: vec![
                "telex.hu".to_string(),
                "index.hu".to_string(),
                "444.hu".to_string(),
                "bbc.com".to_string(),
                "euronews.com".to_string(),
                "hu.wikipedia.org".to_string(),
                "en.wikipedia.org".to_string(),
            ],
            blocked: vec![
                "facebook.com".to_string(),
                "twitter.com".to_string(),
                "youtube.com".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.server.bind_address, "0.0.0.0");
        assert!(settings.summarizer.api_key.is_empty());
        assert!(!settings.domains.trusted.is_empty());
    }

    #[test]
    fn test_yaml_partial_override() {
        let yaml = "server:\n  port: 8080\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.server.port, 8080);
        // Untouched sections keep their defaults
        assert_eq!(settings.search.endpoint, "https://html.duckduckgo.com/html/");
    }
}
