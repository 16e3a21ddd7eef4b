//! Graph validation.
//!
//! Flattens every tab into one [`ArchitectureGraph`], then runs each rule as
//! an independent scan. Never fails: malformed payloads were already
//! normalized to empty values during parsing.

pub mod cross_tab;
pub mod issue;
pub mod node_rules;
pub mod structural;

pub use issue::{GraphStats, IssueCode, Severity, ValidationIssue, ValidationResult};

use tracing::debug;

use crate::parse::graph::ArchitectureGraph;
use crate::parse::types::GraphCollection;

/// Validate a snapshot of all editor tabs.
pub fn validate(graphs: &GraphCollection) -> ValidationResult {
    let graph = ArchitectureGraph::build(graphs);
    let issues = validate_graph(&graph);
    let stats = GraphStats {
        node_count: graph.active_count(),
        edge_count: graph.edges.len(),
        tab_count: graph.tab_count,
        boundary_count: graph.boundary_count(),
    };

    let result = ValidationResult::from_issues(issues, stats);
    debug!(
        valid = result.valid,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        nodes = stats.node_count,
        edges = stats.edge_count,
        "graph validated"
    );
    result
}

/// Run every rule against an already built graph.
pub fn validate_graph(graph: &ArchitectureGraph) -> Vec<ValidationIssue> {
    let mut issues = structural::validate_structural(graph);

    for entry in graph.active_nodes() {
        issues.extend(node_rules::validate_node(entry, graph));
    }

    issues.extend(cross_tab::validate_cross_tab(graph));
    issues
}
