//! Outgoing HTTP plumbing
//!
//! Wraps reqwest with the browser-like headers that keep search engines
//! and news sites from serving degraded pages to obvious bots.

mod client;
mod user_agent;

pub use client::HttpClient;
pub use user_agent::pick_user_agent;
