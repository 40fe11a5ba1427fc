//! Blockmerge Engine
//!
//! Fills the physical attributes of newly generated block records by
//! finding their counterpart in an older reference catalog.
//!
//! # Core Concepts
//!
//! - [`Reconciler`]: runs the ordered strategy cascade for each record
//! - [`Strategy`]: exact, color variant, material variant, categorical,
//!   normalized, then enrichment through a [`LookupSource`]
//! - [`MergeResult`]: the terminal state of one record; attributes are
//!   copied from exactly one source or left untouched
//! - [`RunReport`]: outcomes, diagnostics and per-strategy counts of a run
//!
//! # Example
//!
//! ```rust,ignore
//! use blockmerge_engine::{reconcile_file, EngineConfig, Reconciler};
//! use blockmerge_catalog::ReferenceIndex;
//! use blockmerge_rules::RuleSet;
//!
//! # async fn example() -> Result<(), blockmerge_engine::MergeError> {
//! let reference = ReferenceIndex::load("old/blocks.json").await?;
//! let reconciler = Reconciler::new(reference, RuleSet::default(), EngineConfig::new());
//!
//! let report = reconcile_file(&reconciler, "new/blocks.json").await?;
//! println!("{}", report.counts());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod lookup;
pub mod outcome;

// Re-exports
pub use config::{EngineConfig, DEFAULT_LOOKUP_TIMEOUT};
pub use driver::reconcile_file;
pub use engine::{Attempt, Reconciler};
pub use error::{MergeError, RunResult};
pub use lookup::{LookupError, LookupSource};
pub use outcome::{
    Diagnostic, MergeResult, RecordOutcome, RunReport, Strategy, StrategyCounts, UnmatchedReason,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
