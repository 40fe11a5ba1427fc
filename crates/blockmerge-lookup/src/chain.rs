//! Source composition

use async_trait::async_trait;
use blockmerge_catalog::BlockAttributes;
use blockmerge_engine::{LookupError, LookupSource};
use std::fmt;

/// Tries each source in order; the first success wins
///
/// When every source fails the last error is returned. An empty chain
/// is `Unavailable`.
#[derive(Default)]
pub struct ChainLookup {
    sources: Vec<Box<dyn LookupSource>>,
}

impl ChainLookup {
    /// Create empty chain
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source
    #[must_use]
    pub fn with(mut self, source: impl LookupSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Number of sources
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if the chain has no sources
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl fmt::Debug for ChainLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainLookup")
            .field("sources", &self.sources.len())
            .finish()
    }
}

#[async_trait]
impl LookupSource for ChainLookup {
    async fn get(&self, name: &str) -> Result<BlockAttributes, LookupError> {
        let mut last = LookupError::Unavailable("no lookup sources configured".to_string());
        for source in &self.sources {
            match source.get(name).await {
                Ok(attributes) => return Ok(attributes),
                Err(error) => {
                    tracing::trace!("{name}: {error}");
                    last = error;
                }
            }
        }
        Err(last)
    }
}
