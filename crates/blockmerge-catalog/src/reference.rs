//! Reference index over the old catalog
//!
//! Provides [`ReferenceIndex`], an ordered, read-only collection of
//! [`OldRecord`]s searched by linear scan.

use crate::error::{CatalogError, CatalogResult};
use crate::record::OldRecord;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

/// Accepted shapes of a reference document
#[derive(Deserialize)]
#[serde(untagged)]
enum ReferenceDocument {
    /// Object keyed by arbitrary ids (document order is kept)
    Keyed(IndexMap<String, OldRecord>),

    /// Plain array
    Listed(Vec<OldRecord>),
}

impl From<ReferenceDocument> for Vec<OldRecord> {
    fn from(doc: ReferenceDocument) -> Self {
        match doc {
            ReferenceDocument::Keyed(map) => map.into_values().collect(),
            ReferenceDocument::Listed(list) => list,
        }
    }
}

/// Searchable view of the reference catalog
///
/// Iteration order is the document order, so [`find_first`](Self::find_first)
/// is deterministic for a given document. The index is never mutated after
/// construction.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    records: Vec<OldRecord>,
}

impl ReferenceIndex {
    /// Create index over records, keeping their order
    #[inline]
    #[must_use]
    pub fn new(records: Vec<OldRecord>) -> Self {
        Self { records }
    }

    /// Parse a reference document (keyed object or array)
    ///
    /// # Errors
    /// - `CatalogError::Malformed` if the document is not a reference catalog
    pub fn from_json_str(content: &str) -> CatalogResult<Self> {
        Self::parse(content, Path::new("<memory>"))
    }

    /// Read and parse a reference document from disk
    ///
    /// # Errors
    /// - `CatalogError::Io` if the file cannot be read
    /// - `CatalogError::Malformed` if the document is not a reference catalog
    pub async fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CatalogError::io_error(path, e))?;

        let index = Self::parse(&content, path)?;
        tracing::debug!("Loaded {} reference records from {}", index.len(), path.display());
        Ok(index)
    }

    fn parse(content: &str, path: &Path) -> CatalogResult<Self> {
        let doc: ReferenceDocument =
            serde_json::from_str(content).map_err(|e| CatalogError::malformed(path, e))?;
        Ok(Self::new(doc.into()))
    }

    /// First record satisfying `predicate`, in document order
    #[must_use]
    pub fn find_first<P>(&self, mut predicate: P) -> Option<&OldRecord>
    where
        P: FnMut(&OldRecord) -> bool,
    {
        self.records.iter().find(|old| predicate(old))
    }

    /// First record whose name equals `name`
    #[inline]
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&OldRecord> {
        self.find_first(|old| old.name == name)
    }

    /// Iterate records in document order
    pub fn iter(&self) -> impl Iterator<Item = &OldRecord> {
        self.records.iter()
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if index is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<OldRecord> for ReferenceIndex {
    fn from_iter<I: IntoIterator<Item = OldRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
