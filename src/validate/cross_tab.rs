//! Rules that need the whole multi-tab graph at once.

use std::collections::HashSet;

use tracing::trace;

use super::issue::{IssueCode, ValidationIssue};
use super::structural::display_name;
use crate::parse::graph::ArchitectureGraph;
use crate::parse::types::NodeKind;

pub fn validate_cross_tab(graph: &ArchitectureGraph) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    duplicate_routes(graph, &mut issues);
    missing_functions(graph, &mut issues);

    trace!(count = issues.len(), "cross-tab rules done");
    issues
}

/// First binding for a `METHOD route` pair wins; every later one is flagged.
fn duplicate_routes(graph: &ArchitectureGraph, issues: &mut Vec<ValidationIssue>) {
    let mut seen = HashSet::new();
    for entry in graph.active_nodes() {
        let NodeKind::ApiBinding(api) = entry.node.kind() else {
            continue;
        };
        if api.route.trim().is_empty() {
            continue;
        }
        let key = api.route_key();
        if !seen.insert(key.clone()) {
            issues.push(
                ValidationIssue::new(
                    IssueCode::DuplicateRoute,
                    format!(
                        "'{}' duplicates route {}",
                        display_name(entry.node.label(), entry.node.id()),
                        key.trim()
                    ),
                )
                .at(entry.tab, entry.node.id())
                .with_suggestion("Change the method or route, or delete the duplicate"),
            );
        }
    }
}

fn missing_functions(graph: &ArchitectureGraph, issues: &mut Vec<ValidationIssue>) {
    if graph.count_kind(|k| matches!(k, NodeKind::Process(_))) > 0 {
        return;
    }
    let apis = graph.count_kind(|k| matches!(k, NodeKind::ApiBinding(_)));
    if apis > 0 {
        issues.push(
            ValidationIssue::new(
                IssueCode::NoFunctions,
                format!("{} API(s) exist but no function handles them", apis),
            )
            .with_suggestion("Add a function node and connect the APIs to it"),
        );
    }
    let databases = graph.count_kind(|k| matches!(k, NodeKind::Database(_)));
    if databases > 0 {
        issues.push(
            ValidationIssue::new(
                IssueCode::DbNoFunctions,
                format!("{} database(s) exist but no function reads or writes them", databases),
            )
            .with_suggestion("Add a function node that uses the database"),
        );
    }
}
