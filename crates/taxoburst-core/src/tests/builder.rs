use super::SAMPLE_CSV;
use crate::*;
use futures::executor::block_on;

fn record(c: &str, s: &str, i: &str) -> RawRecord {
    RawRecord {
        category: Some(c.to_string()),
        subcategory: Some(s.to_string()),
        item: Some(i.to_string()),
        example: Some(format!("{i} example")),
        frameworks: FrameworkSet::empty(),
    }
}

#[test]
fn parse_taxonomy_groups_in_first_seen_order() {
    let engine = Engine::new();
    let tree = block_on(engine.parse_taxonomy(SAMPLE_CSV)).unwrap();

    let names = tree
        .categories
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Misuse", "Reliability"]);
    assert_eq!(tree.item_count, 4);

    let misuse = &tree.categories[0];
    let subs = misuse
        .subcategories
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(subs, vec!["Cyber", "Bio, chem"]);

    let cyber = &misuse.subcategories[0];
    assert_eq!(cyber.items[0].name, "Malware generation");
    assert_eq!(cyber.items[0].number, 1);
    assert_eq!(cyber.items[1].name, "Phishing");
    assert_eq!(cyber.items[1].number, 2);
}

#[test]
fn missing_example_is_synthesized() {
    let tree = Engine::new().parse_taxonomy_sync(SAMPLE_CSV).unwrap();
    let phishing = tree
        .resolve(&NodeKey::item("Misuse", "Cyber", "Phishing"))
        .unwrap();
    let NodeRef::Item(_, _, item) = phishing else {
        panic!("expected item");
    };
    assert_eq!(item.example, "Example for Phishing");
}

#[test]
fn item_ids_replace_non_alphanumerics() {
    let tree = Engine::new().parse_taxonomy_sync(SAMPLE_CSV).unwrap();
    let ids = tree.items().map(|i| i.id.as_str()).collect::<Vec<_>>();
    assert_eq!(
        ids,
        vec![
            "Misuse_Cyber_Malware_generation",
            "Misuse_Cyber_Phishing",
            "Misuse_Bio__chem_Pathogen_uplift",
            "Reliability_Hallucination_Fabricated_citations",
        ]
    );
}

#[test]
fn coverage_aggregates_over_descendant_items() {
    let tree = Engine::new().parse_taxonomy_sync(SAMPLE_CSV).unwrap();

    let cyber = &tree.categories[0].subcategories[0];
    assert_eq!(cyber.coverage.get(Framework::EuAiAct), 100);
    assert_eq!(cyber.coverage.get(Framework::NistAiRmf), 50);
    assert_eq!(cyber.coverage.get(Framework::OwaspLlmTop10), 0);

    // Category coverage counts items (3), not the mean of subcategory percentages
    // (which would be (50 + 100) / 2 = 75 for NIST).
    let misuse = &tree.categories[0];
    assert_eq!(misuse.coverage.get(Framework::NistAiRmf), 67);
    assert_eq!(misuse.coverage.get(Framework::OwaspLlmTop10), 33);

    assert_eq!(tree.coverage.get(Framework::EuAiAct), 75);
    assert_eq!(tree.coverage.get(Framework::MitreAtlas), 25);

    for (_, pct) in tree.coverage.iter() {
        assert!(pct <= 100);
    }
}

#[test]
fn empty_subcategory_reports_zero_coverage() {
    let sub = Subcategory::new("Empty", Vec::new());
    for (_, pct) in sub.coverage.iter() {
        assert_eq!(pct, 0);
    }
    let cat = Category::new("Cat", "#fff", vec![sub]);
    assert_eq!(cat.item_count(), 0);
    assert_eq!(cat.coverage, Coverage::default());
}

#[test]
fn zero_valid_records_is_data_empty() {
    let text = "preamble\nheader\n1,,Sub,Item,example\n2,Cat,,Item,example\n";
    let err = Engine::new().parse_taxonomy_sync(text).unwrap_err();
    assert!(err.is_data_empty(), "unexpected error: {err}");

    let err = TreeBuilder::new().build(Vec::new()).unwrap_err();
    assert!(matches!(err, Error::DataEmpty));
}

#[test]
fn duplicate_triples_keep_first_occurrence() {
    let mut dup = record("C", "S", "I");
    dup.example = Some("second".to_string());
    let tree = TreeBuilder::new()
        .build(vec![record("C", "S", "I"), dup, record("C", "S", "J")])
        .unwrap();
    let sub = &tree.categories[0].subcategories[0];
    assert_eq!(sub.items.len(), 2);
    assert_eq!(sub.items[0].example, "I example");
    assert_eq!(sub.items[1].number, 2);
}

#[test]
fn palette_cycles_in_category_order() {
    let tree = TreeBuilder::new()
        .with_palette(vec!["#111".to_string(), "#222".to_string()])
        .build(vec![
            record("A", "s", "i"),
            record("B", "s", "i"),
            record("C", "s", "i"),
        ])
        .unwrap();
    let colors = tree
        .categories
        .iter()
        .map(|c| c.color.as_str())
        .collect::<Vec<_>>();
    assert_eq!(colors, vec!["#111", "#222", "#111"]);
}

#[test]
fn load_missing_file_is_fetch_failure() {
    let err = block_on(Engine::new().load_taxonomy("/definitely/not/here.csv")).unwrap_err();
    assert!(matches!(err, Error::DataFetchFailed { .. }));
    assert!(!err.is_data_empty());
    assert!(err.to_string().contains("/definitely/not/here.csv"));
}

#[test]
fn load_reads_file_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taxonomy.csv");
    std::fs::write(&path, SAMPLE_CSV).unwrap();
    let tree = Engine::new().load_taxonomy_sync(&path).unwrap();
    assert_eq!(tree.categories.len(), 2);
}
