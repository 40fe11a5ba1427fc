//! Categorical heuristic rules
//!
//! A [`CategoricalRule`] pairs a [`Guard`] over the full new name with a
//! [`Resolve`] that produces the old name to search for.

use crate::error::RuleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Applicability test over a new block name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Guard {
    /// Name equals the value
    Exact(String),

    /// Name is one of the listed values
    AnyOf(Vec<String>),

    /// Name starts with the value
    StartsWith(String),

    /// Name ends with the value
    EndsWith(String),

    /// Name contains the value anywhere
    Contains(String),
}

impl Guard {
    /// Check guard against a name
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(value) => name == value,
            Self::AnyOf(values) => values.iter().any(|v| v == name),
            Self::StartsWith(prefix) => name.starts_with(prefix.as_str()),
            Self::EndsWith(suffix) => name.ends_with(suffix.as_str()),
            Self::Contains(part) => name.contains(part.as_str()),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Self::AnyOf(values) => values.is_empty() || values.iter().any(String::is_empty),
            Self::Exact(v) | Self::StartsWith(v) | Self::EndsWith(v) | Self::Contains(v) => {
                v.is_empty()
            }
        }
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(v) => write!(f, "== {v}"),
            Self::AnyOf(values) => write!(f, "in [{}]", values.join(", ")),
            Self::StartsWith(v) => write!(f, "{v}*"),
            Self::EndsWith(v) => write!(f, "*{v}"),
            Self::Contains(v) => write!(f, "*{v}*"),
        }
    }
}

/// How the old name is derived once a guard matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolve {
    /// Fixed old name
    To(String),

    /// New name with the first occurrence of the text removed
    Remove(String),
}

impl Resolve {
    /// Old name for `name`
    #[must_use]
    pub fn apply(&self, name: &str) -> String {
        match self {
            Self::To(target) => target.clone(),
            Self::Remove(text) => name.replacen(text.as_str(), "", 1),
        }
    }
}

/// One row of the categorical table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalRule {
    /// When the rule applies
    pub guard: Guard,

    /// What old name it points to
    pub resolve: Resolve,
}

impl CategoricalRule {
    /// Create rule
    #[inline]
    #[must_use]
    pub fn new(guard: Guard, resolve: Resolve) -> Self {
        Self { guard, resolve }
    }

    /// Exact alias `from` -> `to`
    #[must_use]
    pub fn alias(from: &str, to: &str) -> Self {
        Self::new(Guard::Exact(from.to_string()), Resolve::To(to.to_string()))
    }

    /// Names in `members` all map to `to`
    #[must_use]
    pub fn group(members: &[&str], to: &str) -> Self {
        Self::new(
            Guard::AnyOf(members.iter().map(|m| (*m).to_string()).collect()),
            Resolve::To(to.to_string()),
        )
    }

    /// Names starting with `prefix` map to the name without it
    #[must_use]
    pub fn drop_prefix(prefix: &str) -> Self {
        Self::new(
            Guard::StartsWith(prefix.to_string()),
            Resolve::Remove(prefix.to_string()),
        )
    }

    /// Old name if the guard matches
    #[must_use]
    pub fn target(&self, name: &str) -> Option<String> {
        self.guard.matches(name).then(|| self.resolve.apply(name))
    }

    pub(crate) fn validate(&self, position: usize) -> Result<(), RuleError> {
        if self.guard.is_blank() {
            return Err(RuleError::validation(format!(
                "categorical rule #{position}: guard has no text"
            )));
        }
        match &self.resolve {
            Resolve::To(t) | Resolve::Remove(t) if t.is_empty() => Err(RuleError::validation(
                format!("categorical rule #{position}: empty resolution"),
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for CategoricalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.resolve {
            Resolve::To(target) => write!(f, "{} -> {target}", self.guard),
            Resolve::Remove(text) => write!(f, "{} -> drop '{text}'", self.guard),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_variants() {
        assert!(Guard::Exact("fern".into()).matches("fern"));
        assert!(!Guard::Exact("fern".into()).matches("large_fern"));
        assert!(Guard::AnyOf(vec!["lilac".into(), "peony".into()]).matches("peony"));
        assert!(Guard::StartsWith("potted_".into()).matches("potted_cactus"));
        assert!(Guard::EndsWith("_slab".into()).matches("oak_slab"));
        assert!(Guard::Contains("stone_bricks".into()).matches("mossy_stone_bricks"));
    }

    #[test]
    fn alias_targets_fixed_name() {
        let rule = CategoricalRule::alias("cobweb", "web");
        assert_eq!(rule.target("cobweb").as_deref(), Some("web"));
        assert_eq!(rule.target("web"), None);
    }

    #[test]
    fn drop_prefix_removes_first_occurrence() {
        let rule = CategoricalRule::drop_prefix("cut_");
        assert_eq!(rule.target("cut_sandstone").as_deref(), Some("sandstone"));
        assert_eq!(rule.target("cut_red_cut_x").as_deref(), Some("red_cut_x"));
    }

    #[test]
    fn validate_rejects_blank_guard() {
        let rule = CategoricalRule::new(Guard::AnyOf(vec![]), Resolve::To("x".into()));
        assert!(rule.validate(0).is_err());
        let rule = CategoricalRule::new(Guard::Exact("a".into()), Resolve::Remove(String::new()));
        assert!(rule.validate(0).is_err());
        assert!(CategoricalRule::alias("a", "b").validate(0).is_ok());
    }

    #[test]
    fn display_is_readable() {
        assert_eq!(CategoricalRule::alias("cobweb", "web").to_string(), "== cobweb -> web");
        assert_eq!(CategoricalRule::drop_prefix("cut_").to_string(), "cut_* -> drop 'cut_'");
    }
}
