//! Testing utilities for the blockmerge workspace
//!
//! Shared fixtures, catalog builders and a scripted lookup source.

#![allow(missing_docs)]

use async_trait::async_trait;
use blockmerge_catalog::{BlockAttributes, BlockRecord, BoundingBox, OldRecord, ReferenceIndex};
use blockmerge_engine::{LookupError, LookupSource};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

/// Opaque full block with the given light emission
pub fn solid(emit: u8) -> BlockAttributes {
    BlockAttributes::new(false, 15, emit, BoundingBox::BLOCK)
}

/// Transparent, non-colliding block
pub fn transparent() -> BlockAttributes {
    BlockAttributes::new(true, 0, 0, BoundingBox::EMPTY)
}

pub fn old(name: &str, attributes: BlockAttributes) -> OldRecord {
    OldRecord::new(name, attributes)
}

/// Reference catalog of solid blocks, one per name
pub fn reference_of(names: &[&str]) -> ReferenceIndex {
    names.iter().map(|name| old(name, solid(0))).collect()
}

/// New records carrying only their names
pub fn records_of(names: &[&str]) -> Vec<BlockRecord> {
    names.iter().map(|name| BlockRecord::new(*name)).collect()
}

/// Write a catalog document into a fresh temp dir
///
/// The returned `TempDir` must outlive the path.
pub fn write_catalog(records: &[BlockRecord]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blocks.json");
    std::fs::write(&path, serde_json::to_string_pretty(records).unwrap()).unwrap();
    (dir, path)
}

pub fn read_catalog(path: &std::path::Path) -> Vec<BlockRecord> {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

/// Lookup source answering from a fixed table
///
/// Unknown names yield `NotFound`. Every call is counted, and an optional
/// delay is applied before answering. The highest number of calls in
/// flight at once is recorded.
#[derive(Debug, Default)]
pub struct ScriptedLookup {
    responses: HashMap<String, Result<BlockAttributes, LookupError>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ScriptedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, name: &str, attributes: BlockAttributes) -> Self {
        self.responses.insert(name.to_string(), Ok(attributes));
        self
    }

    pub fn fail(mut self, name: &str, error: LookupError) -> Self {
        self.responses.insert(name.to_string(), Err(error));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LookupSource for ScriptedLookup {
    async fn get(&self, name: &str) -> Result<BlockAttributes, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.responses
            .get(name)
            .cloned()
            .unwrap_or_else(|| Err(LookupError::NotFound(name.to_string())))
    }
}
