//! File-level merge runs

use crate::engine::Reconciler;
use crate::error::RunResult;
use crate::outcome::RunReport;
use blockmerge_catalog::CatalogStore;
use std::path::PathBuf;

/// Load a catalog, reconcile every record, write it back in place
///
/// Record count and order are preserved. The file is only rewritten once
/// every record has been processed.
///
/// # Errors
/// - `MergeError::Catalog` if the catalog cannot be read, decoded or written
pub async fn reconcile_file(reconciler: &Reconciler, path: impl Into<PathBuf>) -> RunResult<RunReport> {
    let store = CatalogStore::new(path);
    let mut records = store.load().await?;

    tracing::info!("Reconciling {}", store.path().display());
    let report = reconciler.reconcile_all(&mut records).await;

    store.persist(&records).await?;
    Ok(report)
}
