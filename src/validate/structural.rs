//! Graph-level structural rules: canvas, edges, labels and connectivity.

use std::collections::HashMap;

use tracing::trace;

use super::issue::{IssueCode, ValidationIssue};
use crate::parse::graph::{ArchitectureGraph, TabNode};

/// Run all structural rules. Per-node rules are skipped on an empty canvas;
/// edge rules always run.
pub fn validate_structural(graph: &ArchitectureGraph) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let canvas_empty = empty_canvas(graph, &mut issues);
    dangling_edges(graph, &mut issues);
    self_loops(graph, &mut issues);

    if !canvas_empty {
        missing_labels(graph, &mut issues);
        duplicate_labels(graph, &mut issues);
        orphan_nodes(graph, &mut issues);
        all_isolated(graph, &mut issues);
    }

    trace!(count = issues.len(), "structural rules done");
    issues
}

fn empty_canvas(graph: &ArchitectureGraph, issues: &mut Vec<ValidationIssue>) -> bool {
    if graph.active_count() > 0 {
        return false;
    }
    issues.push(
        ValidationIssue::new(IssueCode::EmptyCanvas, "The canvas has no components")
            .with_suggestion("Add at least one API, function, database, queue or infra node"),
    );
    true
}

fn missing_labels(graph: &ArchitectureGraph, issues: &mut Vec<ValidationIssue>) {
    for TabNode { tab, node } in graph.active_nodes() {
        if node.label().trim().is_empty() {
            issues.push(
                ValidationIssue::new(
                    IssueCode::MissingLabel,
                    format!("A {} node has no name", node.kind_name()),
                )
                .at(tab, node.id())
                .with_suggestion("Give the node a descriptive name"),
            );
        }
    }
}

fn dangling_edges(graph: &ArchitectureGraph, issues: &mut Vec<ValidationIssue>) {
    for te in &graph.edges {
        let edge = te.edge;
        let ends = [(&edge.source, &edge.target, "source"), (&edge.target, &edge.source, "target")];
        for (end, other, role) in ends {
            if graph.contains(end) {
                continue;
            }
            let mut issue = ValidationIssue::new(
                IssueCode::DanglingEdge,
                format!("Edge '{}' references unknown {} node '{}'", edge.id, role, end),
            )
            .with_suggestion("Delete the edge or reconnect it to an existing node");
            // Highlight the surviving endpoint, never the missing one.
            if let Some(anchor) = graph.node(other) {
                issue = issue.at(anchor.tab, anchor.node.id());
            } else {
                issue.tab = Some(te.tab.to_string());
            }
            issues.push(issue);
        }
    }
}

fn self_loops(graph: &ArchitectureGraph, issues: &mut Vec<ValidationIssue>) {
    for te in &graph.edges {
        if !te.edge.is_self_loop() {
            continue;
        }
        let node = graph.node(&te.edge.source);
        if node.is_some_and(|n| n.node.is_boundary()) {
            continue;
        }
        let mut issue = ValidationIssue::new(
            IssueCode::SelfLoop,
            format!("Edge '{}' connects node '{}' to itself", te.edge.id, te.edge.source),
        )
        .with_suggestion("Remove the edge; self-references carry no meaning here");
        if let Some(n) = node {
            issue = issue.at(n.tab, n.node.id());
        }
        issues.push(issue);
    }
}

fn duplicate_labels(graph: &ArchitectureGraph, issues: &mut Vec<ValidationIssue>) {
    // Groups in order of first appearance.
    let mut groups: Vec<(String, Vec<TabNode>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in graph.active_nodes() {
        let key = entry.node.label().trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        match index.get(&key) {
            Some(&i) => groups[i].1.push(entry),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![entry]));
            }
        }
    }

    for (_, members) in groups.into_iter().filter(|(_, m)| m.len() > 1) {
        let first = members[0];
        let ids: Vec<String> = members.iter().map(|m| m.node.id().to_string()).collect();
        issues.push(
            ValidationIssue::new(
                IssueCode::DuplicateLabel,
                format!(
                    "{} nodes share the name '{}': {}",
                    ids.len(),
                    first.node.label().trim(),
                    ids.join(", ")
                ),
            )
            .at(first.tab, first.node.id())
            .with_suggestion("Use unique names so generated code does not collide")
            .with_related(ids),
        );
    }
}

fn orphan_nodes(graph: &ArchitectureGraph, issues: &mut Vec<ValidationIssue>) {
    if graph.active_count() < 2 {
        return;
    }
    for TabNode { tab, node } in graph.active_nodes() {
        if !graph.is_connected(node.id()) {
            issues.push(
                ValidationIssue::new(
                    IssueCode::OrphanNode,
                    format!("'{}' is not connected to anything", display_name(node.label(), node.id())),
                )
                .at(tab, node.id())
                .with_suggestion("Connect it with an edge or remove it"),
            );
        }
    }
}

fn all_isolated(graph: &ArchitectureGraph, issues: &mut Vec<ValidationIssue>) {
    let count = graph.active_count();
    if count > 1 && graph.active_nodes().all(|n| !graph.is_connected(n.node.id())) {
        issues.push(
            ValidationIssue::new(
                IssueCode::AllIsolated,
                format!("None of the {} components are connected", count),
            )
            .with_suggestion("Draw edges to describe how requests and data flow"),
        );
    }
}

pub(crate) fn display_name<'n>(label: &'n str, id: &'n str) -> &'n str {
    let label = label.trim();
    if label.is_empty() { id } else { label }
}
