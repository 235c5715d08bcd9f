use crate::*;
use serde_json::json;

#[test]
fn node_key_from_path() {
    assert_eq!(NodeKey::from_path("A"), Some(NodeKey::category("A")));
    assert_eq!(
        NodeKey::from_path(" A / B "),
        Some(NodeKey::subcategory("A", "B"))
    );
    assert_eq!(
        NodeKey::from_path("A/B/C"),
        Some(NodeKey::item("A", "B", "C"))
    );
    assert_eq!(NodeKey::from_path(""), None);
    assert_eq!(NodeKey::from_path("a/b/c/d"), None);
}

#[test]
fn node_key_lineage() {
    let cat = NodeKey::category("A");
    let sub = NodeKey::subcategory("A", "B");
    let item = NodeKey::item("A", "B", "C");
    let other = NodeKey::item("A", "X", "C");

    assert!(cat.is_ancestor_or_self_of(&item));
    assert!(sub.is_ancestor_or_self_of(&item));
    assert!(!sub.is_ancestor_or_self_of(&other));
    assert!(item.is_ancestor_or_self_of(&item));
    assert!(!item.is_ancestor_or_self_of(&sub));
    assert_eq!(item.category_key(), Some(cat.clone()));
    assert_eq!(NodeKey::Root.category_key(), None);
}

#[test]
fn node_key_serializes_tagged() {
    let key = NodeKey::subcategory("A", "B");
    assert_eq!(
        serde_json::to_value(&key).unwrap(),
        json!({ "kind": "subcategory", "category": "A", "subcategory": "B" })
    );
    let back: NodeKey = serde_json::from_value(json!({ "kind": "category", "category": "A" })).unwrap();
    assert_eq!(back, NodeKey::category("A"));
}

#[test]
fn framework_labels_round_trip() {
    for f in Framework::ALL {
        assert_eq!(Framework::from_label(f.label()), Some(f));
    }
    assert_eq!(Framework::from_label("nist ai rmf"), Some(Framework::NistAiRmf));
}

#[test]
fn coverage_serializes_as_label_map() {
    let mut frameworks = FrameworkSet::empty();
    frameworks.insert(Framework::MitreAtlas);
    let item = Item {
        id: item_id("a", "b", "c"),
        category: "a".to_string(),
        subcategory: "b".to_string(),
        name: "c".to_string(),
        number: 1,
        example: "e".to_string(),
        frameworks,
    };
    let coverage = Coverage::from_items([&item]);
    assert_eq!(
        serde_json::to_value(coverage).unwrap(),
        json!({
            "EU AI Act": 0,
            "NIST AI RMF": 0,
            "ISO/IEC 42001": 0,
            "OWASP LLM Top 10": 0,
            "MITRE ATLAS": 100
        })
    );
    assert_eq!(serde_json::to_value(frameworks).unwrap(), json!(["MITRE ATLAS"]));
}
