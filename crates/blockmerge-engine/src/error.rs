//! Fatal errors of a merge run
//!
//! Per-record misses are never errors; they end up as
//! [`MergeResult::Unmatched`](crate::MergeResult::Unmatched).

use blockmerge_catalog::CatalogError;
use blockmerge_rules::RuleError;

/// Errors that abort a run
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// Catalog could not be read or written
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Rule tables are unusable
    #[error("rule error: {0}")]
    Rules(#[from] RuleError),
}

/// Result type alias for merge runs
pub type RunResult<T> = Result<T, MergeError>;
