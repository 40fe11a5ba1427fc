//! Memoizing lookup wrapper using moka

use async_trait::async_trait;
use blockmerge_catalog::BlockAttributes;
use blockmerge_engine::{LookupError, LookupSource};
use moka::future::Cache;

/// Default number of memoized answers
pub const DEFAULT_CAPACITY: u64 = 10_000;

/// Caches successful answers of the wrapped source by block name
///
/// Failures are never cached, so a transient error is retried on the
/// next catalog.
#[derive(Debug)]
pub struct CachedLookup<S> {
    inner: S,
    cache: Cache<String, BlockAttributes>,
}

impl<S: LookupSource> CachedLookup<S> {
    /// Wrap source with max capacity
    #[must_use]
    pub fn new(inner: S, max_capacity: u64) -> Self {
        Self {
            inner,
            cache: Cache::new(max_capacity),
        }
    }

    /// Wrapped source
    #[inline]
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: LookupSource> LookupSource for CachedLookup<S> {
    async fn get(&self, name: &str) -> Result<BlockAttributes, LookupError> {
        if let Some(cached) = self.cache.get(name).await {
            tracing::trace!("{name}: lookup cache hit");
            return Ok(cached);
        }

        let attributes = self.inner.get(name).await?;
        self.cache.insert(name.to_string(), attributes.clone()).await;
        Ok(attributes)
    }
}
