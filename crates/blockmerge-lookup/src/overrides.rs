//! Static override table

use async_trait::async_trait;
use blockmerge_catalog::{BlockAttributes, CatalogError, CatalogResult};
use blockmerge_engine::{LookupError, LookupSource};
use std::collections::HashMap;
use std::path::Path;

/// Answers from a fixed name -> attributes table
///
/// The document is a JSON object keyed by new block name.
#[derive(Debug, Clone, Default)]
pub struct OverrideLookup {
    entries: HashMap<String, BlockAttributes>,
}

impl OverrideLookup {
    /// Parse an override document
    ///
    /// # Errors
    /// The JSON error if the document is not an object of attribute groups.
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            entries: serde_json::from_str(content)?,
        })
    }

    /// Read an override document
    ///
    /// # Errors
    /// - `CatalogError::Io` if the file cannot be read
    /// - `CatalogError::Malformed` if it cannot be parsed
    pub async fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CatalogError::io_error(path, e))?;
        let table = Self::from_json_str(&content).map_err(|e| CatalogError::malformed(path, e))?;

        tracing::debug!("Loaded {} overrides from {}", table.len(), path.display());
        Ok(table)
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl LookupSource for OverrideLookup {
    async fn get(&self, name: &str) -> Result<BlockAttributes, LookupError> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(name.to_string()))
    }
}
