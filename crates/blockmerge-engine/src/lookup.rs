//! Lookup source boundary
//!
//! Provides the [`LookupSource`] trait, the engine's only asynchronous
//! collaborator. Implementations live in `blockmerge-lookup`.

use async_trait::async_trait;
use blockmerge_catalog::BlockAttributes;
use std::sync::Arc;
use std::time::Duration;

/// External knowledge source queried when every local strategy missed
///
/// A failure is never fatal to a run; the engine logs it and leaves the
/// record unmatched.
#[async_trait]
pub trait LookupSource: Send + Sync {
    /// Fetch attributes for a block by its new name
    ///
    /// # Errors
    /// Any `LookupError`; the caller treats them all as a miss.
    async fn get(&self, name: &str) -> Result<BlockAttributes, LookupError>;
}

#[async_trait]
impl<T: LookupSource + ?Sized> LookupSource for Arc<T> {
    async fn get(&self, name: &str) -> Result<BlockAttributes, LookupError> {
        (**self).get(name).await
    }
}

#[async_trait]
impl<T: LookupSource + ?Sized> LookupSource for Box<T> {
    async fn get(&self, name: &str) -> Result<BlockAttributes, LookupError> {
        (**self).get(name).await
    }
}

/// Lookup failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// Source has no entry for the name
    #[error("no lookup entry for {0}")]
    NotFound(String),

    /// Source did not answer in time
    #[error("lookup for {name} timed out after {after:?}")]
    Timeout {
        /// Queried name
        name: String,
        /// Elapsed budget
        after: Duration,
    },

    /// Network / transport failure
    #[error("lookup transport error: {0}")]
    Transport(String),

    /// Response could not be decoded
    #[error("lookup decode error: {0}")]
    Decode(String),

    /// Source refused or is not usable
    #[error("lookup unavailable: {0}")]
    Unavailable(String),
}

impl LookupError {
    /// Create timeout error
    #[inline]
    pub fn timeout(name: impl Into<String>, after: Duration) -> Self {
        Self::Timeout {
            name: name.into(),
            after,
        }
    }
}
