use blockmerge_catalog::{BlockAttributes, BlockRecord, BoundingBox, ReferenceIndex};
use blockmerge_engine::{
    Diagnostic, EngineConfig, LookupError, LookupSource, MergeResult, Reconciler, Strategy,
    UnmatchedReason,
};
use blockmerge_rules::{CategoricalRule, PrefixFamily, RuleSet};
use blockmerge_test_utils::{old, records_of, reference_of, solid, transparent, ScriptedLookup};
use async_trait::async_trait;
use mockall::mock;
use pretty_assertions::assert_eq;
use std::time::Duration;

mock! {
    Source {}

    #[async_trait]
    impl LookupSource for Source {
        async fn get(&self, name: &str) -> Result<BlockAttributes, LookupError>;
    }
}

fn engine(names: &[&str]) -> Reconciler {
    Reconciler::new(reference_of(names), RuleSet::default(), EngineConfig::new())
}

#[tokio::test]
async fn test_color_variant_copies_bare_match() {
    let engine = engine(&["wool"]);
    let mut record = BlockRecord::new("red_wool");

    let outcome = engine.reconcile_record(&mut record).await;

    assert_eq!(outcome.result.strategy(), Some(Strategy::ColorVariant));
    assert_eq!(record.attributes, solid(0));
    assert!(outcome.diagnostics.is_empty());
}

#[tokio::test]
async fn test_material_variant_uses_rename() {
    let engine = engine(&["wooden_door"]);
    let mut record = BlockRecord::new("oak_door");

    let outcome = engine.reconcile_record(&mut record).await;

    match outcome.result {
        MergeResult::Matched { strategy, source, .. } => {
            assert_eq!(strategy, Strategy::MaterialVariant);
            assert_eq!(source, "wooden_door");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_exact_match_takes_precedence() {
    let reference: ReferenceIndex = vec![old("red_wool", transparent()), old("wool", solid(0))]
        .into_iter()
        .collect();
    let engine = Reconciler::new(reference, RuleSet::default(), EngineConfig::new());
    let mut record = BlockRecord::new("red_wool");

    let outcome = engine.reconcile_record(&mut record).await;

    assert_eq!(outcome.result.strategy(), Some(Strategy::Exact));
    assert_eq!(record.attributes, transparent());
}

#[tokio::test]
async fn test_excluded_color_name_falls_through() {
    // red_sand must never be treated as a colored "sand"
    let engine = engine(&["sand", "redsand"]);
    let mut record = BlockRecord::new("red_sand");

    let outcome = engine.reconcile_record(&mut record).await;

    match &outcome.result {
        MergeResult::Matched { strategy, source, .. } => {
            assert_eq!(*strategy, Strategy::Normalized);
            assert_eq!(source, "redsand");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(outcome.diagnostics.is_empty());
}

#[tokio::test]
async fn test_categorical_and_normalized() {
    let engine = engine(&["torch", "nether_wart_block"]);
    let mut records = records_of(&["wall_torch", "netherwart-block"]);

    let report = engine.reconcile_all(&mut records).await;

    assert_eq!(report.get("wall_torch").unwrap().result.strategy(), Some(Strategy::Categorical));
    assert_eq!(
        report.get("netherwart-block").unwrap().result.strategy(),
        Some(Strategy::Normalized)
    );
}

#[tokio::test]
async fn test_novel_block_with_failing_lookup() {
    let mut source = MockSource::new();
    source
        .expect_get()
        .times(1)
        .returning(|name| Err(LookupError::Unavailable(format!("{name} refused"))));

    let engine = engine(&[]).with_lookup(source);
    let mut record = BlockRecord::new("totally_novel_block");

    let outcome = engine.reconcile_record(&mut record).await;

    assert!(matches!(
        outcome.result,
        MergeResult::Unmatched {
            reason: UnmatchedReason::EnrichmentFailed(_)
        }
    ));
    assert_eq!(record.attributes, BlockAttributes::default());
    assert_eq!(outcome.diagnostics.len(), 1);
    assert!(matches!(outcome.diagnostics[0], Diagnostic::EnrichmentFailed { .. }));
}

#[tokio::test]
async fn test_enrichment_fills_record() {
    let attributes = BlockAttributes::new(true, 1, 0, BoundingBox::BLOCK);
    let lookup = ScriptedLookup::new().answer("kelp", attributes.clone());
    let engine = engine(&["stone"]).with_lookup(lookup);
    let mut record = BlockRecord::new("kelp");

    let outcome = engine.reconcile_record(&mut record).await;

    assert_eq!(outcome.result.strategy(), Some(Strategy::Enrichment));
    assert_eq!(record.attributes, attributes);
}

#[tokio::test]
async fn test_lookup_not_called_after_local_match() {
    let mut source = MockSource::new();
    source.expect_get().never();

    let engine = engine(&["stone"]).with_lookup(source);
    let mut record = BlockRecord::new("stone");
    let outcome = engine.reconcile_record(&mut record).await;

    assert!(outcome.result.is_matched());
}

#[tokio::test]
async fn test_lookup_timeout_is_a_failure() {
    let lookup = ScriptedLookup::new()
        .answer("kelp", solid(0))
        .with_delay(Duration::from_secs(5));
    let config = EngineConfig::new().with_lookup_timeout(Duration::from_millis(50));
    let engine = Reconciler::new(reference_of(&[]), RuleSet::default(), config).with_lookup(lookup);
    let mut record = BlockRecord::new("kelp");

    let outcome = engine.reconcile_record(&mut record).await;

    match outcome.result {
        MergeResult::Unmatched {
            reason: UnmatchedReason::EnrichmentFailed(message),
        } => assert!(message.contains("timed out")),
        other => panic!("unexpected {other:?}"),
    }
    assert!(!record.has_attributes());
}

#[tokio::test]
async fn test_enrichment_switched_off() {
    let lookup = ScriptedLookup::new().answer("kelp", solid(0));
    let config = EngineConfig::new().with_enrichment(false);
    let engine = Reconciler::new(reference_of(&[]), RuleSet::default(), config).with_lookup(lookup);
    let mut record = BlockRecord::new("kelp");

    let outcome = engine.reconcile_record(&mut record).await;

    assert_eq!(
        outcome.result,
        MergeResult::Unmatched {
            reason: UnmatchedReason::EnrichmentDisabled
        }
    );
    assert!(outcome.diagnostics.is_empty());
}

#[tokio::test]
async fn test_color_miss_is_reported_once() {
    let engine = engine(&[]);
    let mut record = BlockRecord::new("pink_bed");

    let outcome = engine.reconcile_record(&mut record).await;

    assert_eq!(
        outcome.diagnostics,
        vec![Diagnostic::NoOldMatch {
            strategy: Strategy::ColorVariant,
            bare: "bed".into(),
            full: "pink_bed".into(),
        }]
    );
}

#[tokio::test]
async fn test_smaller_rule_tables_can_be_substituted() {
    let rules = RuleSet {
        colors: PrefixFamily::new(["teal"]),
        materials: PrefixFamily::new(["maple"]).with_rename("door", "wooden_door"),
        categorical: vec![CategoricalRule::alias("gizmo", "stone")],
    };
    let engine = Reconciler::new(
        reference_of(&["wool", "wooden_door", "stone"]),
        rules,
        EngineConfig::new(),
    );
    let mut records = records_of(&["teal_wool", "maple_door", "gizmo", "red_wool"]);

    let report = engine.reconcile_all(&mut records).await;
    let counts = report.counts();

    assert_eq!(counts.color_variant, 1);
    assert_eq!(counts.material_variant, 1);
    assert_eq!(counts.categorical, 1);
    assert_eq!(counts.unmatched, 1);
    assert_eq!(report.unmatched().collect::<Vec<_>>(), vec!["red_wool"]);
}

#[tokio::test]
async fn test_lookup_calls_are_sequential() {
    let lookup = std::sync::Arc::new(
        ScriptedLookup::new()
            .answer("a", solid(1))
            .with_delay(Duration::from_millis(10)),
    );
    let engine = engine(&[]).with_shared_lookup(lookup.clone());
    let mut records = records_of(&["a", "b", "c", "d"]);

    let report = engine.reconcile_all(&mut records).await;

    assert_eq!(lookup.calls(), 4);
    assert_eq!(lookup.peak_in_flight(), 1);
    assert_eq!(report.counts().enrichment, 1);
    assert_eq!(report.diagnostics().count(), 3);
}

#[tokio::test]
async fn test_color_miss_then_categorical_match() {
    let engine = engine(&["stone_stairs"]);
    let mut record = BlockRecord::new("red_nether_brick_stairs");

    let outcome = engine.reconcile_record(&mut record).await;

    assert_eq!(outcome.result.strategy(), Some(Strategy::Categorical));
    assert_eq!(
        outcome.diagnostics,
        vec![Diagnostic::NoOldMatch {
            strategy: Strategy::ColorVariant,
            bare: "nether_brick_stairs".into(),
            full: "red_nether_brick_stairs".into(),
        }]
    );
    assert!(record.has_attributes());
}

#[tokio::test]
async fn test_material_miss_is_reported() {
    let engine = engine(&[]);
    let mut record = BlockRecord::new("oak_fence");

    let outcome = engine.reconcile_record(&mut record).await;

    assert!(!outcome.result.is_matched());
    assert_eq!(
        outcome.diagnostics,
        vec![Diagnostic::NoOldMatch {
            strategy: Strategy::MaterialVariant,
            bare: "fence".into(),
            full: "oak_fence".into(),
        }]
    );
}

#[tokio::test]
async fn test_scripted_failure_leaves_record_untouched() {
    let lookup = ScriptedLookup::new().fail("kelp", LookupError::Transport("connection reset".into()));
    let engine = engine(&[]).with_lookup(lookup);
    let mut record = BlockRecord::new("kelp");

    let outcome = engine.reconcile_record(&mut record).await;

    assert_eq!(
        outcome.result,
        MergeResult::Unmatched {
            reason: UnmatchedReason::EnrichmentFailed("lookup transport error: connection reset".into())
        }
    );
    assert_eq!(
        outcome.diagnostics,
        vec![Diagnostic::EnrichmentFailed {
            name: "kelp".into(),
            error: "lookup transport error: connection reset".into(),
        }]
    );
    assert!(!record.has_attributes());
}
