//! TOML configuration file support for the invocation harness.
//!
//! Instead of passing CLI flags, callers can pin settings in a config file:
//!
//! ```toml
//! # format-support.toml
//! [process]
//! header = true
//! generate_uuid = false
//! prefer_tab = false
//! ```
//!
//! Explicit CLI flags override config file values; unset values fall back to
//! the documented defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure for format-support.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Process-specific settings.
    #[serde(default)]
    pub process: ProcessConfig,
}

/// Configuration for the process command.
#[derive(Debug, Default, Deserialize)]
pub struct ProcessConfig {
    /// Whether the first line is a header row.
    pub header: Option<bool>,

    /// Whether to synthesize identifiers for missing or invalid ones.
    pub generate_uuid: Option<bool>,

    /// Prefer tab when comma and tab are equally plausible delimiters.
    pub prefer_tab: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
