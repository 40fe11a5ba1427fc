//! Blockmerge Lookup
//!
//! Concrete [`LookupSource`] adapters for the enrichment strategy.
//!
//! # Core Concepts
//!
//! - [`HttpLookup`]: queries a JSON endpoint at `{base_url}/{name}`
//! - [`OverrideLookup`]: answers from a local name -> attributes table
//! - [`ChainLookup`]: tries several sources in order
//! - [`CachedLookup`]: memoizes successful answers across catalogs
//!
//! # Example
//!
//! ```rust,ignore
//! use blockmerge_lookup::{CachedLookup, ChainLookup, HttpLookup, OverrideLookup};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let overrides = OverrideLookup::load("overrides.json").await?;
//! let http = HttpLookup::new("http://localhost:8080/blocks", Duration::from_secs(5))?;
//!
//! let source = CachedLookup::new(ChainLookup::new().with(overrides).with(http), 1_000);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod cache;
mod chain;
mod http;
mod overrides;

// Re-exports
pub use blockmerge_engine::{LookupError, LookupSource};
pub use cache::{CachedLookup, DEFAULT_CAPACITY};
pub use chain::ChainLookup;
pub use http::HttpLookup;
pub use overrides::OverrideLookup;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
