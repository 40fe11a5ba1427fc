//! CLI configuration file
//!
//! ```toml
//! [lookup]
//! base_url = "http://localhost:8080/blocks"
//! overrides = "overrides.json"
//! timeout_secs = 10
//! cache_capacity = 10000
//!
//! [rules]
//! file = "rules.toml"
//!
//! [engine]
//! enrichment = true
//! ```

use anyhow::Context;
use blockmerge_engine::{EngineConfig, DEFAULT_LOOKUP_TIMEOUT};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Whole configuration file; every section is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Lookup sources
    pub lookup: LookupSection,
    /// Rule tables
    pub rules: RulesSection,
    /// Engine switches
    pub engine: EngineSection,
}

/// `[lookup]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LookupSection {
    /// HTTP endpoint root
    pub base_url: Option<String>,
    /// JSON override table
    pub overrides: Option<PathBuf>,
    /// Budget for one lookup call
    pub timeout_secs: u64,
    /// Memoized answers kept across catalogs
    pub cache_capacity: u64,
}

impl Default for LookupSection {
    fn default() -> Self {
        Self {
            base_url: None,
            overrides: None,
            timeout_secs: DEFAULT_LOOKUP_TIMEOUT.as_secs(),
            cache_capacity: blockmerge_lookup::DEFAULT_CAPACITY,
        }
    }
}

impl LookupSection {
    /// Check if any source is configured
    #[must_use]
    pub fn has_sources(&self) -> bool {
        self.base_url.is_some() || self.overrides.is_some()
    }

    /// Lookup budget
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `[rules]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesSection {
    /// Rule table TOML replacing the built-in tables
    pub file: Option<PathBuf>,
}

/// `[engine]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSection {
    /// Whether unmatched records are sent to the lookup sources
    pub enrichment: bool,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self { enrichment: true }
    }
}

impl CliConfig {
    /// Parse configuration text
    ///
    /// # Errors
    /// Fails on invalid TOML or unknown keys.
    pub fn from_toml(input: &str) -> anyhow::Result<Self> {
        toml::from_str(input).context("invalid configuration")
    }

    /// Read a configuration file
    ///
    /// # Errors
    /// Fails if the file cannot be read or parsed.
    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Engine settings derived from this file
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new()
            .with_lookup_timeout(self.lookup.timeout())
            .with_enrichment(self.engine.enrichment)
    }
}
