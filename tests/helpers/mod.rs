use analyzer::parse::*;

// =============================================================================
// Node builders
// =============================================================================

pub fn rest_api(id: &str, label: &str, method: &str, route: &str) -> GraphNode {
    GraphNode::new(id, label, NodeKind::ApiBinding(ApiBindingData::rest(method, route)))
}

pub fn api_with_protocol(id: &str, label: &str, protocol: ApiProtocol, route: &str) -> GraphNode {
    GraphNode::new(
        id,
        label,
        NodeKind::ApiBinding(ApiBindingData {
            protocol,
            route: route.into(),
            ..ApiBindingData::default()
        }),
    )
}

pub fn process(id: &str, label: &str, steps: &[&str]) -> GraphNode {
    GraphNode::new(
        id,
        label,
        NodeKind::Process(ProcessData {
            steps: steps
                .iter()
                .map(|s| serde_json::Value::String(s.to_string()))
                .collect(),
            runtime: None,
        }),
    )
}

pub fn database(id: &str, label: &str, tables: Vec<DatabaseTable>) -> GraphNode {
    GraphNode::new(id, label, NodeKind::Database(DatabaseModel::new(DbType::Sql, tables)))
}

pub fn queue(id: &str, label: &str, delivery: &str) -> GraphNode {
    GraphNode::new(id, label, NodeKind::Queue(QueueData::with_delivery(delivery)))
}

pub fn infra(id: &str, label: &str) -> GraphNode {
    GraphNode::new(
        id,
        label,
        NodeKind::Infra(InfraData {
            resource_type: "bucket".into(),
            provider: "aws".into(),
        }),
    )
}

pub fn boundary(id: &str, label: &str) -> GraphNode {
    GraphNode::new(id, label, NodeKind::ServiceBoundary(ServiceBoundaryData::default()))
}

pub fn endpoint(id: &str, label: &str, target_api_id: Option<&str>) -> GraphNode {
    GraphNode::new(
        id,
        label,
        NodeKind::ApiEndpoint(ApiEndpointData {
            target_api_id: target_api_id.map(str::to_string),
        }),
    )
}

pub fn edge(source: &str, target: &str) -> GraphEdge {
    GraphEdge::new(format!("{}->{}", source, target), source, target)
}

// =============================================================================
// Collection builders
// =============================================================================

pub fn single_tab(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> GraphCollection {
    GraphCollection::new().with_tab("api", TabGraph::new(nodes, edges))
}

/// `users(id PK, email, status)` with an index on `status`.
pub fn users_table() -> DatabaseTable {
    DatabaseTable::new(
        "users",
        vec![
            DatabaseField::new("id", "uuid").primary(),
            DatabaseField::new("email", "text"),
            DatabaseField::new("status", "text"),
        ],
    )
    .with_indexes(["status"])
}

pub fn users_db(db_type: DbType) -> DatabaseModel {
    DatabaseModel::new(db_type, vec![users_table()])
}
