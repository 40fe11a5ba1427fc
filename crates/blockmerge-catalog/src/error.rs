//! Error types for catalog loading and persistence
//!
//! Every variant here is fatal to a merge run.

use std::path::PathBuf;

/// Errors reading or writing catalog documents
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Source document could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// Document path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Source document is not a valid catalog
    #[error("malformed catalog {path}: {source}")]
    Malformed {
        /// Document path
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Destination could not be written
    #[error("io error writing {path}: {source}")]
    Write {
        /// Document path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Records could not be encoded
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CatalogError {
    /// Create read error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create malformed-document error for path
    pub fn malformed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Malformed {
            path: path.into(),
            source,
        }
    }

    /// Create write error for path
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
