//! Per-node payload rules.
//! The match in `validate_node` is exhaustive over `NodeKind`; adding a kind
//! forces a decision here.

use super::issue::{IssueCode, ValidationIssue};
use super::structural::display_name;
use crate::parse::graph::{ArchitectureGraph, TabNode};
use crate::parse::types::*;

/// Validate a single node's payload. Returns all issues found.
pub fn validate_node(entry: TabNode, graph: &ArchitectureGraph) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let TabNode { tab, node } = entry;
    let name = display_name(node.label(), node.id());

    match node.kind() {
        NodeKind::ApiBinding(api) => {
            if api.protocol == ApiProtocol::Rest {
                rest_shape(api, name, &mut issues);
            }
            if !graph.is_connected(node.id()) {
                issues.push(
                    ValidationIssue::new(
                        IssueCode::IsolatedApi,
                        format!("API '{}' is not wired to any function or service", name),
                    )
                    .with_suggestion("Connect the API to the function that handles it"),
                );
            }
        }
        NodeKind::Process(process) => {
            if process.steps.is_empty() {
                issues.push(
                    ValidationIssue::new(
                        IssueCode::ProcNoSteps,
                        format!("Function '{}' has no steps", name),
                    )
                    .with_suggestion("Describe the steps so generated code is not guessed from the name"),
                );
            }
        }
        NodeKind::Database(db) => {
            if db.tables.is_empty() {
                issues.push(
                    ValidationIssue::new(
                        IssueCode::DbNoTables,
                        format!("Database '{}' has no tables", name),
                    )
                    .with_suggestion("Model at least one table in the schema designer"),
                );
            }
            for table in db.tables.iter().filter(|t| t.fields.is_empty()) {
                issues.push(
                    ValidationIssue::new(
                        IssueCode::TableNoFields,
                        format!(
                            "Table '{}' in database '{}' has no fields",
                            display_name(&table.name, "<unnamed>"),
                            name
                        ),
                    )
                    .with_suggestion("Add fields or delete the table"),
                );
            }
        }
        NodeKind::Queue(queue) => {
            if queue.guarantee().is_none() {
                let allowed: Vec<&str> = DeliveryGuarantee::ALL.iter().map(|g| g.as_str()).collect();
                issues.push(
                    ValidationIssue::new(
                        IssueCode::QueueBadDelivery,
                        format!(
                            "Queue '{}' has invalid delivery guarantee '{}'",
                            name, queue.delivery
                        ),
                    )
                    .with_suggestion(format!("Use one of: {}", allowed.join(", "))),
                );
            }
        }
        NodeKind::ApiEndpoint(endpoint) => match endpoint.target() {
            None => issues.push(
                ValidationIssue::new(
                    IssueCode::ApiEndpointUnlinked,
                    format!("Endpoint '{}' is not linked to an API", name),
                )
                .with_suggestion("Pick the API binding this endpoint implements"),
            ),
            Some(target) if !graph.api_bindings.contains_key(target) => issues.push(
                ValidationIssue::new(
                    IssueCode::ApiEndpointDanglingRef,
                    format!(
                        "Endpoint '{}' references API '{}' which does not exist in any tab",
                        name, target
                    ),
                )
                .with_suggestion("Relink the endpoint or restore the deleted API"),
            ),
            Some(_) => {}
        },
        NodeKind::Infra(_) => {}
        NodeKind::ServiceBoundary(_) => {}
    }

    issues.into_iter().map(|i| i.at(tab, node.id())).collect()
}

fn rest_shape(api: &ApiBindingData, name: &str, issues: &mut Vec<ValidationIssue>) {
    let route = api.route.trim();
    if route.is_empty() {
        issues.push(
            ValidationIssue::new(IssueCode::ApiNoRoute, format!("REST API '{}' has no route", name))
                .with_suggestion("Set a route such as /users"),
        );
    } else {
        if !route.starts_with('/') {
            issues.push(
                ValidationIssue::new(
                    IssueCode::ApiRouteSlash,
                    format!("Route '{}' of '{}' must start with '/'", route, name),
                )
                .with_suggestion(format!("Use /{}", route)),
            );
        }
        if route.chars().any(char::is_whitespace) {
            issues.push(
                ValidationIssue::new(
                    IssueCode::ApiRouteSpaces,
                    format!("Route '{}' of '{}' contains whitespace", route, name),
                )
                .with_suggestion("Replace spaces with '-' or '_'"),
            );
        }
    }
    if api.method.trim().is_empty() {
        issues.push(
            ValidationIssue::new(IssueCode::ApiNoMethod, format!("REST API '{}' has no HTTP method", name))
                .with_suggestion("Choose GET, POST, PUT, PATCH or DELETE"),
        );
    }
}
