//! Configuration module for Hirforras
//!
//! Handles loading settings from a YAML file and environment variables.
//! Settings are read-only after startup.

mod settings;

pub use settings::*;
