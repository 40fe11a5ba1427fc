//! Engine configuration

use std::time::Duration;

/// Default budget for one lookup source call
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Reconciler settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Budget for a single lookup call; expiry counts as a failed lookup
    pub lookup_timeout: Duration,

    /// Whether the lookup source is consulted at all
    pub enrichment: bool,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With lookup timeout
    #[inline]
    #[must_use]
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// With enrichment switched on or off
    #[inline]
    #[must_use]
    pub fn with_enrichment(mut self, enabled: bool) -> Self {
        self.enrichment = enabled;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            enrichment: true,
        }
    }
}
