//! Merge and rules commands

use crate::config::{CliConfig, LookupSection, RulesSection};
use anyhow::Context;
use blockmerge_catalog::ReferenceIndex;
use blockmerge_engine::{reconcile_file, LookupSource, Reconciler, RunReport, StrategyCounts};
use blockmerge_lookup::{CachedLookup, ChainLookup, HttpLookup, OverrideLookup};
use blockmerge_rules::RuleSet;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// How run summaries are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SummaryFormat {
    /// One line per catalog, diagnostics indented below
    #[default]
    Text,
    /// One JSON document per catalog
    Json,
}

impl FromStr for SummaryFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown summary format '{other}'")),
        }
    }
}

/// Inputs of one `merge` invocation
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Old reference catalog
    pub reference: PathBuf,
    /// New catalogs, rewritten in place in this order
    pub catalogs: Vec<PathBuf>,
    /// Effective configuration (file plus flags)
    pub config: CliConfig,
}

/// Build the lookup chain described by `[lookup]`
///
/// Overrides are consulted before the HTTP source. Returns `None` when no
/// source is configured.
///
/// # Errors
/// Fails if the override table cannot be loaded or the HTTP client built.
pub async fn build_lookup(section: &LookupSection) -> anyhow::Result<Option<Arc<dyn LookupSource>>> {
    if !section.has_sources() {
        return Ok(None);
    }

    let mut chain = ChainLookup::new();
    if let Some(path) = &section.overrides {
        chain = chain.with(OverrideLookup::load(path).await?);
    }
    if let Some(base_url) = &section.base_url {
        chain = chain.with(HttpLookup::new(base_url.as_str(), section.timeout())?);
    }

    tracing::debug!("Lookup chain with {} sources", chain.len());
    Ok(Some(Arc::new(CachedLookup::new(chain, section.cache_capacity))))
}

/// Built-in rules, or the file named by `[rules]`
///
/// # Errors
/// Fails if the rule file cannot be read or is invalid.
pub async fn load_rules(section: &RulesSection) -> anyhow::Result<RuleSet> {
    let Some(path) = &section.file else {
        return Ok(RuleSet::default());
    };

    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read rules {}", path.display()))?;
    RuleSet::from_toml(&content).with_context(|| format!("in {}", path.display()))
}

/// Reconcile every catalog against one reference
///
/// The first fatal error aborts the run; catalogs already written stay
/// written.
///
/// # Errors
/// Any load, rule, lookup setup or persistence failure.
pub async fn run_merge(options: &MergeOptions) -> anyhow::Result<Vec<(PathBuf, RunReport)>> {
    let reference = ReferenceIndex::load(&options.reference).await?;
    let rules = load_rules(&options.config.rules).await?;

    let mut reconciler = Reconciler::try_new(reference, rules, options.config.engine_config())?;
    if options.config.engine.enrichment {
        if let Some(lookup) = build_lookup(&options.config.lookup).await? {
            reconciler = reconciler.with_shared_lookup(lookup);
        }
    }

    let mut reports = Vec::with_capacity(options.catalogs.len());
    for catalog in &options.catalogs {
        let report = reconcile_file(&reconciler, catalog)
            .await
            .with_context(|| format!("failed to merge {}", catalog.display()))?;
        reports.push((catalog.clone(), report));
    }
    Ok(reports)
}

#[derive(Serialize)]
struct Summary<'a> {
    catalog: &'a Path,
    blocks: usize,
    counts: StrategyCounts,
    unmatched: Vec<&'a str>,
    diagnostics: Vec<String>,
}

/// Render the summary of one catalog
///
/// # Errors
/// Fails only if JSON encoding fails.
pub fn render_summary(catalog: &Path, report: &RunReport, format: SummaryFormat) -> anyhow::Result<String> {
    match format {
        SummaryFormat::Json => {
            let summary = Summary {
                catalog,
                blocks: report.len(),
                counts: report.counts(),
                unmatched: report.unmatched().collect(),
                diagnostics: report.diagnostics().map(ToString::to_string).collect(),
            };
            Ok(serde_json::to_string_pretty(&summary)?)
        }
        SummaryFormat::Text => {
            let counts = report.counts();
            let mut out = format!(
                "{}: {}/{} matched ({counts})",
                catalog.display(),
                counts.matched(),
                report.len()
            );
            for diagnostic in report.diagnostics() {
                out.push_str("\n  ");
                out.push_str(&diagnostic.to_string());
            }
            Ok(out)
        }
    }
}

/// Effective rule tables as TOML
///
/// # Errors
/// Fails if the rule file cannot be loaded or encoded.
pub async fn render_rules(section: &RulesSection) -> anyhow::Result<String> {
    Ok(load_rules(section).await?.to_toml()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockmerge_engine::{MergeResult, RecordOutcome, UnmatchedReason};

    fn report() -> RunReport {
        let mut report = RunReport::default();
        report.push(RecordOutcome {
            name: "kelp".into(),
            result: MergeResult::Unmatched {
                reason: UnmatchedReason::EnrichmentDisabled,
            },
            diagnostics: vec![],
        });
        report
    }

    #[test]
    fn parse_summary_format() {
        assert_eq!("json".parse::<SummaryFormat>(), Ok(SummaryFormat::Json));
        assert!("xml".parse::<SummaryFormat>().is_err());
    }

    #[test]
    fn text_summary() {
        let text = render_summary(Path::new("blocks.json"), &report(), SummaryFormat::Text).unwrap();
        assert!(text.starts_with("blocks.json: 0/1 matched"));
        assert!(text.contains("unmatched=1"));
    }

    #[test]
    fn json_summary() {
        let json = render_summary(Path::new("blocks.json"), &report(), SummaryFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["blocks"], 1);
        assert_eq!(value["unmatched"][0], "kelp");
        assert_eq!(value["counts"]["unmatched"], 1);
    }

    #[tokio::test]
    async fn no_sources_means_no_lookup() {
        assert!(build_lookup(&LookupSection::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn default_rules_render() {
        let toml = render_rules(&RulesSection::default()).await.unwrap();
        assert!(RuleSet::from_toml(&toml).is_ok());
    }
}
