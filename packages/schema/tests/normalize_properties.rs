//! Property tests for the schema normalizer: totality, idempotence, and
//! the structural invariants, checked over arbitrary JSON input.

use pagecraft_schema::{normalize_project, normalize_section, ContentItem, IdGenerator};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Keys biased toward the schema's real field names so generated shapes
/// regularly hit the interesting normalization paths.
fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("type".to_string()),
        Just("id".to_string()),
        Just("content".to_string()),
        Just("items".to_string()),
        Just("lines".to_string()),
        Just("data".to_string()),
        Just("style".to_string()),
        Just("marks".to_string()),
        Just("title".to_string()),
        Just("text".to_string()),
        Just("images".to_string()),
        Just("src".to_string()),
        Just("primaryText".to_string()),
        Just("button".to_string()),
        Just("sections".to_string()),
        Just("meta".to_string()),
        "[a-z]{1,8}",
    ]
}

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        any::<f64>().prop_map(|f| serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null)),
        "[a-zA-Z0-9#. \\n-]{0,16}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::btree_map(arb_key(), inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Raw values that look more like real sections than pure noise.
fn arb_sectionish() -> impl Strategy<Value = Value> {
    let kind = prop_oneof![
        Just(json!("hero")),
        Just(json!("text")),
        Just(json!("legalNotes")),
        Just(json!("targetStores")),
        Just(json!("image")),
        Just(json!("nonsense")),
    ];
    (kind, arb_json()).prop_map(|(kind, mut body)| {
        if let Value::Object(map) = &mut body {
            map.insert("type".to_string(), kind);
        }
        body
    })
}

proptest! {
    #[test]
    fn normalize_section_never_panics(raw in arb_json()) {
        let mut ids = IdGenerator::new("prop");
        let section = normalize_section(&raw, &mut ids);
        prop_assert!(!section.id.is_empty());
    }

    #[test]
    fn normalize_section_is_idempotent(raw in arb_sectionish()) {
        let mut ids = IdGenerator::new("prop");
        let once = normalize_section(&raw, &mut ids);
        let round_tripped = serde_json::to_value(&once).expect("serialize");
        let twice = normalize_section(&round_tripped, &mut ids);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalize_project_is_idempotent(raw in arb_json()) {
        let once = normalize_project(&raw);
        let round_tripped = serde_json::to_value(&once).expect("serialize");
        let twice = normalize_project(&round_tripped);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn title_is_unique_and_pinned(raw in arb_sectionish()) {
        let mut ids = IdGenerator::new("prop");
        let section = normalize_section(&raw, &mut ids);

        let title_count = section
            .content
            .items
            .iter()
            .filter(|i| i.is_title())
            .count();
        prop_assert!(title_count <= 1);
        if title_count == 1 {
            prop_assert!(section.content.items[0].is_title());
        }
    }

    #[test]
    fn text_items_are_never_empty(raw in arb_sectionish()) {
        let mut ids = IdGenerator::new("prop");
        let section = normalize_section(&raw, &mut ids);

        for item in &section.content.items {
            if let ContentItem::Text { lines, .. } = item {
                prop_assert!(!lines.is_empty());
            }
        }
    }

    #[test]
    fn numeric_style_fields_stay_in_range(raw in arb_json()) {
        let mut ids = IdGenerator::new("prop");
        let section = normalize_section(&raw, &mut ids);

        let style = &section.style;
        prop_assert!((8.0..=96.0).contains(&style.font_size));
        prop_assert!((1.0..=3.0).contains(&style.line_height));
        prop_assert!((0.0..=1.0).contains(&style.background.opacity));
        prop_assert!((0.0..=240.0).contains(&style.padding.top));
        prop_assert!((0.0..=240.0).contains(&style.padding.bottom));
    }
}
