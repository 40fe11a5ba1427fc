//! Blockmerge CLI
//!
//! Configuration loading, lookup wiring and report rendering behind the
//! `blockmerge` binary.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod app;
pub mod config;
pub mod logging;

pub use app::{build_lookup, load_rules, render_rules, render_summary, run_merge, MergeOptions, SummaryFormat};
pub use config::CliConfig;
pub use logging::LogFormat;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
