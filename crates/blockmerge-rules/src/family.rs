//! Prefix token families
//!
//! Provides [`PrefixFamily`] for the color and material variant strategies.

use crate::error::RuleError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Separator between a prefix token and the bare name
const SEPARATOR: char = '_';

/// A closed set of prefix tokens with the exceptions that go with them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixFamily {
    /// Tokens in priority order
    pub tokens: Vec<String>,

    /// Bare names that must not be matched through this family
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<String>,

    /// Bare name -> old name renames
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub renames: IndexMap<String, String>,
}

impl PrefixFamily {
    /// Create family from tokens only
    #[must_use]
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            exclusions: Vec::new(),
            renames: IndexMap::new(),
        }
    }

    /// Add excluded bare names
    #[must_use]
    pub fn with_exclusions<I, S>(mut self, exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions.extend(exclusions.into_iter().map(Into::into));
        self
    }

    /// Add a bare-name rename
    #[must_use]
    pub fn with_rename(mut self, bare: impl Into<String>, old: impl Into<String>) -> Self {
        self.renames.insert(bare.into(), old.into());
        self
    }

    /// Split `name` into `(token, bare)` if it starts with a token and separator
    ///
    /// Tokens are tried in table order. A name equal to a token, or a token
    /// that is not followed by the separator, does not count.
    #[must_use]
    pub fn strip<'a>(&self, name: &'a str) -> Option<(&'a str, &'a str)> {
        self.tokens.iter().find_map(|token| {
            let bare = name.strip_prefix(token.as_str())?.strip_prefix(SEPARATOR)?;
            (!bare.is_empty()).then(|| (&name[..token.len()], bare))
        })
    }

    /// True if `name` starts with one of the tokens
    #[inline]
    #[must_use]
    pub fn applies_to(&self, name: &str) -> bool {
        self.strip(name).is_some()
    }

    /// True if the bare name is a known false positive
    #[inline]
    #[must_use]
    pub fn is_excluded(&self, bare: &str) -> bool {
        self.exclusions.iter().any(|e| e == bare)
    }

    /// Old name to look up for a bare name
    #[inline]
    #[must_use]
    pub fn resolve<'a>(&'a self, bare: &'a str) -> &'a str {
        self.renames.get(bare).map_or(bare, String::as_str)
    }

    pub(crate) fn validate(&self, family: &str) -> Result<(), RuleError> {
        if let Some(pos) = self.tokens.iter().position(String::is_empty) {
            return Err(RuleError::validation(format!(
                "{family}: token #{pos} is empty"
            )));
        }

        for (i, token) in self.tokens.iter().enumerate() {
            if self.tokens[..i].contains(token) {
                return Err(RuleError::validation(format!(
                    "{family}: duplicate token '{token}'"
                )));
            }
        }

        if let Some((bare, _)) = self.renames.iter().find(|(_, old)| old.is_empty()) {
            return Err(RuleError::validation(format!(
                "{family}: rename of '{bare}' has an empty target"
            )));
        }

        Ok(())
    }
}
