//! End-to-end: Parse → Validate → Estimate every database query on the canvas.

use analyzer::parse::{self, NodeKind};
use analyzer::query;
use analyzer::validate;

#[test]
fn end_to_end_connected_architecture() {
    let json = include_str!("fixtures/connected_architecture.json");
    let graphs = parse::parse_graphs(json).unwrap();

    let result = validate::validate(&graphs);
    assert!(result.valid);

    let reports: Vec<_> = graphs
        .tabs
        .values()
        .flat_map(|t| t.nodes.iter())
        .filter_map(|n| match n.kind() {
            NodeKind::Database(db) => Some(query::estimate_database(db)),
            _ => None,
        })
        .flatten()
        .collect();

    assert_eq!(reports.len(), 3);
    let needs_index: Vec<_> = reports
        .iter()
        .flat_map(|r| r.estimate.suggested_indexes.iter())
        .collect();
    assert_eq!(needs_index, vec!["users.email"]);
}

#[test]
fn end_to_end_result_round_trips_through_json() {
    let json = include_str!("fixtures/lenient_payloads.json");
    let graphs = parse::parse_graphs(json).unwrap();
    let result = validate::validate(&graphs);

    let encoded = serde_json::to_string(&result).unwrap();
    let decoded: validate::ValidationResult = serde_json::from_str(&encoded).unwrap();
    assert_eq!(result, decoded);
}
