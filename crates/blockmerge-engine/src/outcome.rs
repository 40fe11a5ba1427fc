//! Per-record outcomes, diagnostics and run summaries

use blockmerge_catalog::BlockAttributes;
use serde::Serialize;
use std::fmt;

/// Matching strategies, in cascade order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Same name in the old catalog
    Exact,

    /// Color prefix stripped
    ColorVariant,

    /// Wood / material prefix stripped
    MaterialVariant,

    /// Categorical table row
    Categorical,

    /// Names compared without `_` and `-`
    Normalized,

    /// External lookup source
    Enrichment,
}

impl Strategy {
    /// Local strategies, in the order they are attempted
    pub const LOCAL: [Strategy; 5] = [
        Self::Exact,
        Self::ColorVariant,
        Self::MaterialVariant,
        Self::Categorical,
        Self::Normalized,
    ];

    /// Whether a miss of this strategy is reported as a diagnostic
    #[inline]
    #[must_use]
    pub fn reports_misses(self) -> bool {
        matches!(self, Self::ColorVariant | Self::MaterialVariant)
    }

    /// Stable snake_case name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::ColorVariant => "color_variant",
            Self::MaterialVariant => "material_variant",
            Self::Categorical => "categorical",
            Self::Normalized => "normalized",
            Self::Enrichment => "enrichment",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal state of one record for one run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MergeResult {
    /// Attributes copied from a single source
    Matched {
        /// Strategy that produced the match
        strategy: Strategy,
        /// Old record name, or the queried name for enrichment
        source: String,
        /// The copied attribute group
        attributes: BlockAttributes,
    },

    /// Record left untouched
    Unmatched {
        /// Why nothing was copied
        reason: UnmatchedReason,
    },
}

impl MergeResult {
    /// Check if the record was matched
    #[inline]
    #[must_use]
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    /// Strategy that matched, if any
    #[inline]
    #[must_use]
    pub fn strategy(&self) -> Option<Strategy> {
        match self {
            Self::Matched { strategy, .. } => Some(*strategy),
            Self::Unmatched { .. } => None,
        }
    }
}

/// Why a record stayed unmatched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum UnmatchedReason {
    /// Lookup source returned an error (message kept)
    EnrichmentFailed(String),

    /// No lookup source configured, or enrichment switched off
    EnrichmentDisabled,
}

impl fmt::Display for UnmatchedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnrichmentFailed(error) => write!(f, "enrichment failed: {error}"),
            Self::EnrichmentDisabled => f.write_str("no local match and enrichment disabled"),
        }
    }
}

/// Advisory message produced while reconciling
///
/// Each diagnostic corresponds to exactly one emitted log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Color / material strategy applied but the bare name was not found
    NoOldMatch {
        /// Strategy that missed
        strategy: Strategy,
        /// Name with the prefix token removed
        bare: String,
        /// Full new name
        full: String,
    },

    /// Lookup source failed
    EnrichmentFailed {
        /// Queried name
        name: String,
        /// Error text
        error: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoOldMatch { bare, full, .. } => {
                write!(f, "Could not find the old block match for {bare} ({full})")
            }
            Self::EnrichmentFailed { name, error } => write!(f, "{name}: {error}"),
        }
    }
}

/// Result of reconciling one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordOutcome {
    /// Record name
    pub name: String,

    /// Terminal state
    pub result: MergeResult,

    /// Diagnostics raised while processing this record
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

/// Per-strategy counters of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StrategyCounts {
    /// Records matched by exact name
    pub exact: usize,
    /// Records matched through a color prefix
    pub color_variant: usize,
    /// Records matched through a material prefix
    pub material_variant: usize,
    /// Records matched by the categorical table
    pub categorical: usize,
    /// Records matched by normalized comparison
    pub normalized: usize,
    /// Records filled by the lookup source
    pub enrichment: usize,
    /// Records left untouched
    pub unmatched: usize,
}

impl StrategyCounts {
    fn record(&mut self, result: &MergeResult) {
        let slot = match result.strategy() {
            Some(Strategy::Exact) => &mut self.exact,
            Some(Strategy::ColorVariant) => &mut self.color_variant,
            Some(Strategy::MaterialVariant) => &mut self.material_variant,
            Some(Strategy::Categorical) => &mut self.categorical,
            Some(Strategy::Normalized) => &mut self.normalized,
            Some(Strategy::Enrichment) => &mut self.enrichment,
            None => &mut self.unmatched,
        };
        *slot += 1;
    }

    /// Records that ended matched
    #[must_use]
    pub fn matched(&self) -> usize {
        self.exact
            + self.color_variant
            + self.material_variant
            + self.categorical
            + self.normalized
            + self.enrichment
    }
}

impl fmt::Display for StrategyCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "exact={} color={} material={} categorical={} normalized={} enrichment={} unmatched={}",
            self.exact,
            self.color_variant,
            self.material_variant,
            self.categorical,
            self.normalized,
            self.enrichment,
            self.unmatched
        )
    }
}

/// Outcome of a whole run, in catalog order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    /// One outcome per record
    pub outcomes: Vec<RecordOutcome>,
}

impl RunReport {
    /// Append an outcome
    #[inline]
    pub fn push(&mut self, outcome: RecordOutcome) {
        self.outcomes.push(outcome);
    }

    /// Every diagnostic, in emission order
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.outcomes.iter().flat_map(|o| o.diagnostics.iter())
    }

    /// Names of records left unmatched
    pub fn unmatched(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| !o.result.is_matched())
            .map(|o| o.name.as_str())
    }

    /// Outcome for a record name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RecordOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    /// Per-strategy counts
    #[must_use]
    pub fn counts(&self) -> StrategyCounts {
        let mut counts = StrategyCounts::default();
        for outcome in &self.outcomes {
            counts.record(&outcome.result);
        }
        counts
    }

    /// Number of records processed
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Check if no record was processed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
