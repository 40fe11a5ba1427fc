use blockmerge_catalog::BlockRecord;
use blockmerge_engine::{EngineConfig, Reconciler};
use blockmerge_rules::RuleSet;
use blockmerge_test_utils::{read_catalog, records_of, reference_of, write_catalog};
use proptest::prelude::*;

const OLD_NAMES: [&str; 8] = [
    "wool",
    "stone",
    "torch",
    "wooden_door",
    "stone_slab",
    "prismarine",
    "mob_spawner",
    "sand",
];

fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "red_wool", "oak_door", "wall_torch", "poppy", "granite", "spawner", "red_sand",
            "cut_sandstone_slab", "mob-spawner", "kelp",
        ])
        .prop_map(str::to_string),
        "[a-z_]{1,12}",
    ]
}

fn run(names: &[String]) -> (Vec<BlockRecord>, String) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let engine = Reconciler::new(reference_of(&OLD_NAMES), RuleSet::default(), EngineConfig::new());
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let mut records = records_of(&names);
    let report = runtime.block_on(engine.reconcile_all(&mut records));
    (records, serde_json::to_string(&report).unwrap())
}

proptest! {
    #[test]
    fn prop_runs_are_deterministic(names in proptest::collection::vec(name_strategy(), 0..24)) {
        let (first_records, first_report) = run(&names);
        let (second_records, second_report) = run(&names);

        prop_assert_eq!(first_records, second_records);
        prop_assert_eq!(first_report, second_report);
    }

    #[test]
    fn prop_count_and_order_preserved(names in proptest::collection::vec(name_strategy(), 0..24)) {
        let (records, _) = run(&names);

        prop_assert_eq!(records.len(), names.len());
        for (record, name) in records.iter().zip(&names) {
            prop_assert_eq!(&record.name, name);
        }
    }
}

#[tokio::test]
async fn test_file_round_trip_keeps_unknown_fields() {
    let mut input = records_of(&["red_wool", "kelp", "oak_door"]);
    input[1].extra.insert("hardness".into(), serde_json::json!(0.5));
    let (_dir, path) = write_catalog(&input);

    let engine = Reconciler::new(reference_of(&OLD_NAMES), RuleSet::default(), EngineConfig::new());
    let report = blockmerge_engine::reconcile_file(&engine, &path).await.unwrap();
    let output = read_catalog(&path);

    assert_eq!(report.len(), 3);
    assert_eq!(
        output.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        vec!["red_wool", "kelp", "oak_door"]
    );
    assert!(output[0].has_attributes());
    assert!(!output[1].has_attributes());
    assert_eq!(output[1].extra["hardness"], serde_json::json!(0.5));
    assert!(output[2].has_attributes());
}
