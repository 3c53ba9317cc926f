//! End-to-end aggregation scenarios: both detection streams merged into
//! one deduplicated ingredient set, with a complete ordered diagnostic
//! record.

use pantrysense::engine::DetectionAggregator;
use pantrysense::schema::{LabelAnnotation, ObjectAnnotation};
use std::collections::BTreeSet;

fn label(description: &str, score: f32) -> LabelAnnotation {
    LabelAnnotation {
        description: description.to_string(),
        score,
    }
}

fn object(name: &str, score: f32) -> ObjectAnnotation {
    ObjectAnnotation {
        name: name.to_string(),
        score,
    }
}

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn fridge_photo_scenario() {
    let aggregator = DetectionAggregator::default();
    let labels = vec![
        label("orange", 0.45),
        label("tomato", 0.6),
        label("plate", 0.9),
    ];
    let objects = vec![object("tomato", 0.55)];

    let report = aggregator.aggregate(&labels, &objects);

    assert_eq!(report.ingredients, names(&["orange", "tomato"]));
    assert_eq!(
        report.diagnostics,
        vec![
            "orange (45.0%)",
            "tomato (60.0%)",
            "plate (90.0%)",
            "tomato (55.0%)",
        ]
    );
}

#[test]
fn synonym_scenario() {
    let aggregator = DetectionAggregator::default();

    let report = aggregator.aggregate(&[label("scallion", 0.6)], &[]);
    assert_eq!(report.ingredients, names(&["onion"]));

    let report = aggregator.aggregate(&[label("scallion", 0.45)], &[]);
    assert!(report.ingredients.is_empty());
}

#[test]
fn same_ingredient_from_both_streams_appears_once() {
    let aggregator = DetectionAggregator::default();
    let report = aggregator.aggregate(&[label("carrot", 0.8)], &[object("carrot", 0.7)]);

    assert_eq!(report.ingredients, names(&["carrot"]));
    assert_eq!(report.diagnostics.len(), 2);
}

#[test]
fn alias_and_canonical_collapse_to_one_entry() {
    // "tomatoes" resolves to "tomato"; a direct "tomato" detection from
    // the other stream must not duplicate it.
    let aggregator = DetectionAggregator::default();
    let report = aggregator.aggregate(&[label("tomatoes", 0.7)], &[object("Tomato", 0.8)]);

    assert_eq!(report.ingredients, names(&["tomato"]));
}

#[test]
fn case_differences_resolve_identically() {
    let aggregator = DetectionAggregator::default();
    let report = aggregator.aggregate(
        &[label("Apple", 0.8), label("APPLE", 0.8), label("apple", 0.8)],
        &[],
    );

    assert_eq!(report.ingredients, names(&["apple"]));
    assert_eq!(report.diagnostics.len(), 3);
}

#[test]
fn aggregation_is_idempotent_over_identical_input() {
    let aggregator = DetectionAggregator::default();
    let labels = vec![
        label("orange", 0.45),
        label("scallion", 0.6),
        label("plate", 0.9),
    ];
    let objects = vec![object("chicken", 0.8), object("bowl", 0.95)];

    let first = aggregator.aggregate(&labels, &objects);
    let second = aggregator.aggregate(&labels, &objects);

    assert_eq!(first.ingredients, second.ingredients);
    assert_eq!(first.diagnostics, second.diagnostics);
}

#[test]
fn one_rejection_never_aborts_the_rest() {
    let aggregator = DetectionAggregator::default();
    let labels = vec![
        label("plate", 0.99),
        label("tomato", 0.6),
        label("", 0.5),
        label("onion", 0.7),
    ];

    let report = aggregator.aggregate(&labels, &[]);

    assert_eq!(report.ingredients, names(&["tomato", "onion"]));
    assert_eq!(report.diagnostics.len(), 4);
}

#[test]
fn report_serializes_with_schema_version() {
    let aggregator = DetectionAggregator::default();
    let report = aggregator.aggregate(&[label("tomato", 0.6)], &[]);

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"ingredients\":[\"tomato\"]"));
    assert!(json.contains("\"version\":\"0.1.0\""));
}
