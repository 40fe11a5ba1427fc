//! JSON catalog store
//!
//! The only component of the catalog crate that touches the filesystem for
//! the new catalog. It performs no merging.

use crate::error::{CatalogError, CatalogResult};
use crate::record::BlockRecord;
use std::path::{Path, PathBuf};

/// Loads and persists the ordered record sequence of a new catalog
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    /// Create store for the document at `path`
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Document location
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the catalog
    ///
    /// # Errors
    /// - `CatalogError::Io` if the document cannot be read
    /// - `CatalogError::Malformed` if it is not a JSON array of records
    pub async fn load(&self) -> CatalogResult<Vec<BlockRecord>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::io_error(&self.path, e))?;

        let records = decode(&content).map_err(|e| CatalogError::malformed(&self.path, e))?;
        tracing::debug!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Write the catalog back, pretty-printed with 2-space indentation
    ///
    /// # Errors
    /// - `CatalogError::Encode` if a record cannot be serialized
    /// - `CatalogError::Write` if the document cannot be written
    pub async fn persist(&self, records: &[BlockRecord]) -> CatalogResult<()> {
        let content = encode(records)?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| CatalogError::write_error(&self.path, e))?;

        tracing::debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

/// Decode a catalog document
///
/// # Errors
/// Returns the JSON error if the document is not an array of records.
pub fn decode(content: &str) -> Result<Vec<BlockRecord>, serde_json::Error> {
    serde_json::from_str(content)
}

/// Encode records as a pretty-printed catalog document
///
/// # Errors
/// Returns `CatalogError::Encode` if serialization fails.
pub fn encode(records: &[BlockRecord]) -> CatalogResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
