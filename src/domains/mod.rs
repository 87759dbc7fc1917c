//! Domain classification for search hits and extraction targets
//!
//! All matching is a case-insensitive substring check, mirroring the
//! behavior the service has always had: `telex.hu` matches `www.telex.hu`
//! but also `nottelex.hu.evil.com`. That looseness is documented and kept.

use crate::config::DomainSettings;
use url::Url;

/// Classifies URLs against the configured trusted, priority and block lists.
#[derive(Debug, Clone)]
pub struct DomainFilter {
    trusted: Vec<String>,
    priority: Vec<String>,
    blocked: Vec<String>,
}

impl DomainFilter {
    pub fn new(settings: &DomainSettings) -> Self {
        let lower = |list: &[String]| list.iter().map(|d| d.to_lowercase()).collect();
        Self {
            trusted: lower(&settings.trusted),
            priority: lower(&settings.priority),
            blocked: lower(&settings.blocked),
        }
    }

    /// True if the URL's host contains a trusted-list entry.
    /// Non-parseable URLs are never allowed.
    pub fn is_allowed(&self, url: &str) -> bool {
        match host_of(url) {
            Some(host) => self.trusted.iter().any(|d| host.contains(d.as_str())),
            None => false,
        }
    }

    /// True if the raw URL contains a block-list entry anywhere.
    pub fn is_blocked(&self, url: &str) -> bool {
        let url = url.to_lowercase();
        self.blocked.iter().any(|d| url.contains(d.as_str()))
    }

    /// True if the URL's host contains a priority-list entry.
    pub fn is_priority(&self, url: &str) -> bool {
        match host_of(url) {
            Some(host) => self.priority.iter().any(|d| host.contains(d.as_str())),
            None => false,
        }
    }
}

impl Default for DomainFilter {
    fn default() -> Self {
        Self::new(&DomainSettings::default())
    }
}

fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
}
