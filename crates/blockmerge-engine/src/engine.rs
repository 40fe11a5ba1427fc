//! Reconciliation engine
//!
//! Runs the ordered strategy cascade for each new record:
//!
//! 1. exact name
//! 2. color prefix stripped (misses logged)
//! 3. material prefix stripped (misses logged)
//! 4. categorical table, first matching row
//! 5. names compared without `_` / `-`
//! 6. lookup source, under a timeout
//!
//! The first strategy that yields an old record wins; its attribute group is
//! copied onto the record in one step.

use crate::config::EngineConfig;
use crate::error::RunResult;
use crate::lookup::{LookupError, LookupSource};
use crate::outcome::{Diagnostic, MergeResult, RecordOutcome, RunReport, Strategy, UnmatchedReason};
use blockmerge_catalog::{BlockRecord, OldRecord, ReferenceIndex};
use blockmerge_rules::{normalize, normalized_eq, PrefixFamily, RuleSet};
use std::fmt;
use std::sync::Arc;

/// Result of trying a single local strategy
#[derive(Debug, Clone, PartialEq)]
pub enum Attempt<'a> {
    /// Strategy does not apply to this name
    Skipped,

    /// Strategy applied and found an old record
    Hit {
        /// Old name that was searched
        target: String,
        /// The donor record
        old: &'a OldRecord,
    },

    /// Strategy applied but nothing was found
    Miss {
        /// Bare name for prefix strategies, searched name otherwise
        candidate: String,
    },
}

/// Strategy cascade over one reference catalog
///
/// The reference index and rule tables are shared and never mutated, so a
/// single reconciler can process any number of catalogs.
#[derive(Clone)]
pub struct Reconciler {
    reference: Arc<ReferenceIndex>,
    rules: Arc<RuleSet>,
    config: EngineConfig,
    lookup: Option<Arc<dyn LookupSource>>,
}

impl Reconciler {
    /// Create reconciler without a lookup source
    #[must_use]
    pub fn new(
        reference: impl Into<Arc<ReferenceIndex>>,
        rules: impl Into<Arc<RuleSet>>,
        config: EngineConfig,
    ) -> Self {
        Self {
            reference: reference.into(),
            rules: rules.into(),
            config,
            lookup: None,
        }
    }

    /// Create reconciler after checking the rule tables
    ///
    /// # Errors
    /// `MergeError::Rules` if any table is unusable.
    pub fn try_new(
        reference: impl Into<Arc<ReferenceIndex>>,
        rules: impl Into<Arc<RuleSet>>,
        config: EngineConfig,
    ) -> RunResult<Self> {
        let rules = rules.into();
        rules.validate()?;
        Ok(Self::new(reference, rules, config))
    }

    /// With lookup source for the last-resort strategy
    #[must_use]
    pub fn with_lookup(self, lookup: impl LookupSource + 'static) -> Self {
        self.with_shared_lookup(Arc::new(lookup))
    }

    /// With an already shared lookup source
    #[must_use]
    pub fn with_shared_lookup(mut self, lookup: Arc<dyn LookupSource>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Reference catalog
    #[inline]
    #[must_use]
    pub fn reference(&self) -> &ReferenceIndex {
        &self.reference
    }

    /// Rule tables
    #[inline]
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Try one local strategy against `name`
    ///
    /// [`Strategy::Enrichment`] is not local and always yields
    /// [`Attempt::Skipped`] here.
    #[must_use]
    pub fn attempt(&self, strategy: Strategy, name: &str) -> Attempt<'_> {
        match strategy {
            Strategy::Exact => self.search(name),
            Strategy::ColorVariant => self.attempt_family(&self.rules.colors, name),
            Strategy::MaterialVariant => self.attempt_family(&self.rules.materials, name),
            Strategy::Categorical => match self.rules.first_categorical(name) {
                Some((position, target)) => {
                    tracing::trace!("{name}: categorical rule #{position} -> {target}");
                    self.search(&target)
                }
                None => Attempt::Skipped,
            },
            Strategy::Normalized if normalize(name).is_empty() => Attempt::Skipped,
            Strategy::Normalized => {
                match self.reference.find_first(|old| normalized_eq(&old.name, name)) {
                    Some(old) => Attempt::Hit {
                        target: old.name.clone(),
                        old,
                    },
                    None => Attempt::Miss {
                        candidate: name.to_string(),
                    },
                }
            }
            Strategy::Enrichment => Attempt::Skipped,
        }
    }

    fn search(&self, target: &str) -> Attempt<'_> {
        match self.reference.find_by_name(target) {
            Some(old) => Attempt::Hit {
                target: target.to_string(),
                old,
            },
            None => Attempt::Miss {
                candidate: target.to_string(),
            },
        }
    }

    fn attempt_family<'a>(&'a self, family: &'a PrefixFamily, name: &str) -> Attempt<'a> {
        let Some((token, bare)) = family.strip(name) else {
            return Attempt::Skipped;
        };

        if family.is_excluded(bare) {
            tracing::trace!("{name}: '{bare}' is excluded for prefix '{token}'");
            return Attempt::Skipped;
        }

        match self.search(family.resolve(bare)) {
            Attempt::Miss { .. } => Attempt::Miss {
                candidate: bare.to_string(),
            },
            attempt => attempt,
        }
    }

    /// Run strategies 1-5 in order, stopping at the first hit
    ///
    /// Misses of the color and material strategies are logged and appended
    /// to `diagnostics`.
    pub fn resolve_local(
        &self,
        name: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<(Strategy, &OldRecord)> {
        for strategy in Strategy::LOCAL {
            match self.attempt(strategy, name) {
                Attempt::Hit { old, .. } => return Some((strategy, old)),
                Attempt::Miss { candidate } if strategy.reports_misses() => {
                    let diagnostic = Diagnostic::NoOldMatch {
                        strategy,
                        bare: candidate,
                        full: name.to_string(),
                    };
                    tracing::warn!(%strategy, "{diagnostic}");
                    diagnostics.push(diagnostic);
                }
                Attempt::Miss { .. } | Attempt::Skipped => {}
            }
        }
        None
    }

    /// Reconcile one record in place
    ///
    /// On a match the whole attribute group is replaced; otherwise the
    /// record is left exactly as it was.
    pub async fn reconcile_record(&self, record: &mut BlockRecord) -> RecordOutcome {
        let mut diagnostics = Vec::new();

        let result = match self.resolve_local(&record.name, &mut diagnostics) {
            Some((strategy, old)) => {
                tracing::debug!("{} <- {} ({strategy})", record.name, old.name);
                record.apply(&old.attributes);
                MergeResult::Matched {
                    strategy,
                    source: old.name.clone(),
                    attributes: old.attributes.clone(),
                }
            }
            None => self.enrich(record, &mut diagnostics).await,
        };

        RecordOutcome {
            name: record.name.clone(),
            result,
            diagnostics,
        }
    }

    async fn enrich(&self, record: &mut BlockRecord, diagnostics: &mut Vec<Diagnostic>) -> MergeResult {
        let lookup = match &self.lookup {
            Some(lookup) if self.config.enrichment => lookup,
            _ => {
                tracing::debug!("{}: no local match, enrichment disabled", record.name);
                return MergeResult::Unmatched {
                    reason: UnmatchedReason::EnrichmentDisabled,
                };
            }
        };

        let timeout = self.config.lookup_timeout;
        let response = tokio::time::timeout(timeout, lookup.get(&record.name))
            .await
            .unwrap_or_else(|_| Err(LookupError::timeout(&record.name, timeout)));

        match response {
            Ok(attributes) => {
                tracing::debug!("{} <- lookup source", record.name);
                record.apply(&attributes);
                MergeResult::Matched {
                    strategy: Strategy::Enrichment,
                    source: record.name.clone(),
                    attributes,
                }
            }
            Err(error) => {
                let diagnostic = Diagnostic::EnrichmentFailed {
                    name: record.name.clone(),
                    error: error.to_string(),
                };
                tracing::warn!("{diagnostic}");
                diagnostics.push(diagnostic);
                MergeResult::Unmatched {
                    reason: UnmatchedReason::EnrichmentFailed(error.to_string()),
                }
            }
        }
    }

    /// Reconcile every record sequentially, in catalog order
    ///
    /// At most one lookup call is in flight at any time.
    pub async fn reconcile_all(&self, records: &mut [BlockRecord]) -> RunReport {
        tracing::info!(
            "Merging {} blocks against {} reference blocks",
            records.len(),
            self.reference.len()
        );

        let mut report = RunReport::default();
        for record in records.iter_mut() {
            report.push(self.reconcile_record(record).await);
        }

        tracing::info!("Merge finished: {}", report.counts());
        report
    }
}

impl fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reconciler")
            .field("reference", &self.reference.len())
            .field("categorical_rules", &self.rules.categorical.len())
            .field("config", &self.config)
            .field("lookup", &self.lookup.is_some())
            .finish()
    }
}
