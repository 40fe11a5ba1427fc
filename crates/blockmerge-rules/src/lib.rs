//! Blockmerge Rules
//!
//! Immutable, ordered rule tables that map a new block name to the name it
//! most plausibly had in an older catalog.
//!
//! # Core Concepts
//!
//! - [`PrefixFamily`]: a closed set of prefix tokens (colors, wood types)
//!   that are stripped to obtain a bare name
//! - [`CategoricalRule`]: a guard over the full name plus a resolution to
//!   the old name; evaluated top-to-bottom, first guard wins
//! - [`RuleSet`]: the complete configuration injected into the engine
//!
//! # Example
//!
//! ```rust
//! use blockmerge_rules::RuleSet;
//!
//! let rules = RuleSet::default();
//!
//! let (token, bare) = rules.colors.strip("red_wool").unwrap();
//! assert_eq!((token, bare), ("red", "wool"));
//!
//! let (_, target) = rules.first_categorical("wall_torch").unwrap();
//! assert_eq!(target, "torch");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod categorical;
mod defaults;
mod error;
mod family;
mod ruleset;

// Re-exports
pub use categorical::{CategoricalRule, Guard, Resolve};
pub use error::RuleError;
pub use family::PrefixFamily;
pub use ruleset::RuleSet;

/// Remove every underscore and hyphen from a name
///
/// Used by the last-resort comparison, where both sides are normalized.
#[must_use]
pub fn normalize(name: &str) -> String {
    name.chars().filter(|c| *c != '_' && *c != '-').collect()
}

/// Compare two names as if both had been passed through [`normalize`]
#[must_use]
pub fn normalized_eq(a: &str, b: &str) -> bool {
    let strip = |c: &char| *c != '_' && *c != '-';
    a.chars().filter(strip).eq(b.chars().filter(strip))
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
