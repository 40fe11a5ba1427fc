//! Complete rule configuration
//!
//! Provides [`RuleSet`], the immutable table set the reconciliation engine
//! is constructed with.

use crate::categorical::CategoricalRule;
use crate::defaults;
use crate::error::RuleError;
use crate::family::PrefixFamily;
use serde::{Deserialize, Serialize};

/// Every table the matching cascade consults
///
/// `Default` gives the built-in tables. Tests and alternative catalogs can
/// substitute smaller tables through [`RuleSet::from_toml`] or by building
/// the struct directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Color variant family
    #[serde(default)]
    pub colors: PrefixFamily,

    /// Wood / material variant family
    #[serde(default)]
    pub materials: PrefixFamily,

    /// Categorical table, evaluated top-to-bottom
    #[serde(default)]
    pub categorical: Vec<CategoricalRule>,
}

impl RuleSet {
    /// Rule set with every table empty
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            colors: PrefixFamily::default(),
            materials: PrefixFamily::default(),
            categorical: Vec::new(),
        }
    }

    /// Parse and validate a TOML rule document
    ///
    /// Tables missing from the document are empty, not defaulted.
    ///
    /// # Errors
    /// - `RuleError::Parse` on TOML syntax / shape errors
    /// - `RuleError::Validation` on unusable rules
    pub fn from_toml(input: &str) -> Result<Self, RuleError> {
        let rules: RuleSet = toml::from_str(input).map_err(|e| RuleError::Parse(e.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }

    /// Render as TOML
    ///
    /// # Errors
    /// Returns `RuleError::Encode` if serialization fails.
    pub fn to_toml(&self) -> Result<String, RuleError> {
        toml::to_string_pretty(self).map_err(|e| RuleError::Encode(e.to_string()))
    }

    /// Check every table
    ///
    /// # Errors
    /// Returns `RuleError::Validation` describing the first bad entry.
    pub fn validate(&self) -> Result<(), RuleError> {
        self.colors.validate("colors")?;
        self.materials.validate("materials")?;
        for (position, rule) in self.categorical.iter().enumerate() {
            rule.validate(position)?;
        }
        Ok(())
    }

    /// First categorical rule whose guard matches, with its target name
    #[must_use]
    pub fn first_categorical(&self, name: &str) -> Option<(usize, String)> {
        self.categorical
            .iter()
            .enumerate()
            .find_map(|(position, rule)| rule.target(name).map(|target| (position, target)))
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            colors: defaults::colors(),
            materials: defaults::materials(),
            categorical: defaults::categorical(),
        }
    }
}
