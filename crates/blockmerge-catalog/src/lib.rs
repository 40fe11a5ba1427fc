//! Blockmerge Catalog
//!
//! Typed block records and the two collections the merger works over.
//!
//! # Core Concepts
//!
//! - [`BlockRecord`]: a record of the freshly generated catalog, possibly
//!   missing its physical attributes
//! - [`BlockAttributes`]: the four-field attribute group copied as a unit
//! - [`ReferenceIndex`]: the older donor catalog, searchable by predicate
//! - [`CatalogStore`]: loads and persists the new catalog as a JSON document
//!
//! # Example
//!
//! ```rust,ignore
//! use blockmerge_catalog::{CatalogStore, ReferenceIndex};
//!
//! # async fn example() -> Result<(), blockmerge_catalog::CatalogError> {
//! let reference = ReferenceIndex::load("old/blocks.json").await?;
//! let store = CatalogStore::new("new/blocks.json");
//! let mut blocks = store.load().await?;
//!
//! if let Some(old) = reference.find_by_name(&blocks[0].name) {
//!     blocks[0].apply(&old.attributes);
//! }
//!
//! store.persist(&blocks).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod record;
pub mod reference;
pub mod store;

// Re-exports
pub use error::{CatalogError, CatalogResult};
pub use record::{BlockAttributes, BlockRecord, BoundingBox, BoxKind, OldRecord};
pub use reference::ReferenceIndex;
pub use store::CatalogStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
