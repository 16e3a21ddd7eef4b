//! Rust types mirroring the visual editor's node/edge JSON.
//!
//! A node arrives as `{ id, data: { kind, label, ...payload } }` and an edge
//! as `{ id, source, target }`. Every tab of the editor contributes one
//! `TabGraph`; the validator always works over the union of all tabs.
//!
//! Deserialization is tolerant: `null` or missing strings, arrays and flags
//! collapse to their empty/default value instead of failing. A `null` tab is
//! an empty tab, `null` list entries are dropped, and a node without `data`
//! has no kind to validate, so it is dropped too.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::trace;

/// Treat `null` the same as a missing field.
pub(crate) fn lenient<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(de).map(Option::unwrap_or_default)
}

/// A list that may be `null` and may contain `null` entries.
pub(crate) fn lenient_seq<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items = Option::<Vec<Option<T>>>::deserialize(de)?;
    Ok(items.into_iter().flatten().flatten().collect())
}

fn lenient_tabs<'de, D>(de: D) -> Result<BTreeMap<String, TabGraph>, D::Error>
where
    D: Deserializer<'de>,
{
    let tabs = Option::<BTreeMap<String, Option<TabGraph>>>::deserialize(de)?;
    Ok(tabs
        .unwrap_or_default()
        .into_iter()
        .map(|(name, tab)| (name, tab.unwrap_or_default()))
        .collect())
}

/// Node as it may arrive from the editor, before its kind is known.
#[derive(Deserialize)]
struct NodeEntry {
    #[serde(default, deserialize_with = "lenient")]
    id: String,
    #[serde(default)]
    data: Option<NodeData>,
}

fn lenient_nodes<'de, D>(de: D) -> Result<Vec<GraphNode>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Vec<NodeEntry> = lenient_seq(de)?;
    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry.data {
            Some(data) => Some(GraphNode { id: entry.id, data }),
            None => {
                trace!(id = %entry.id, "node without data skipped");
                None
            }
        })
        .collect())
}

// =============================================================================
// GRAPH COLLECTION
// =============================================================================

/// Tab name → that tab's nodes and edges. Ordered so that every scan over the
/// collection is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphCollection {
    #[serde(deserialize_with = "lenient_tabs")]
    pub tabs: BTreeMap<String, TabGraph>,
}

impl GraphCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, replacing any tab with the same name.
    pub fn with_tab(mut self, name: impl Into<String>, tab: TabGraph) -> Self {
        self.tabs.insert(name.into(), tab);
        self
    }

    pub fn node_count(&self) -> usize {
        self.tabs.values().map(|t| t.nodes.len()).sum()
    }

    pub fn edge_count(&self) -> usize {
        self.tabs.values().map(|t| t.edges.len()).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabGraph {
    #[serde(default, deserialize_with = "lenient_nodes")]
    pub nodes: Vec<GraphNode>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub edges: Vec<GraphEdge>,
}

impl TabGraph {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Self { nodes, edges }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub source: String,
    #[serde(default, deserialize_with = "lenient")]
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl GraphEdge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

// =============================================================================
// NODES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    pub data: NodeData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(default, deserialize_with = "lenient")]
    pub label: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

/// Closed set of node kinds the designer can place on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    ApiBinding(ApiBindingData),
    Process(ProcessData),
    Database(DatabaseModel),
    Queue(QueueData),
    Infra(InfraData),
    ServiceBoundary(ServiceBoundaryData),
    ApiEndpoint(ApiEndpointData),
}

impl GraphNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            data: NodeData {
                label: label.into(),
                kind,
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.data.label
    }

    pub fn kind(&self) -> &NodeKind {
        &self.data.kind
    }

    pub fn kind_name(&self) -> &'static str {
        self.data.kind.name()
    }

    /// Boundaries only group other nodes visually.
    pub fn is_boundary(&self) -> bool {
        matches!(self.data.kind, NodeKind::ServiceBoundary(_))
    }
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::ApiBinding(_) => "api_binding",
            NodeKind::Process(_) => "process",
            NodeKind::Database(_) => "database",
            NodeKind::Queue(_) => "queue",
            NodeKind::Infra(_) => "infra",
            NodeKind::ServiceBoundary(_) => "service_boundary",
            NodeKind::ApiEndpoint(_) => "api_endpoint",
        }
    }
}

// =============================================================================
// API BINDING
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBindingData {
    #[serde(default, deserialize_with = "lenient")]
    pub protocol: ApiProtocol,
    #[serde(default, deserialize_with = "lenient")]
    pub method: String,
    #[serde(default, deserialize_with = "lenient")]
    pub route: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ApiBindingData {
    pub fn rest(method: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            protocol: ApiProtocol::Rest,
            method: method.into(),
            route: route.into(),
            description: None,
        }
    }

    /// `METHOD route` key used for duplicate detection.
    pub fn route_key(&self) -> String {
        format!("{} {}", self.method.trim().to_uppercase(), self.route.trim())
    }
}

/// Protocol tags are matched case-insensitively; unknown tags become `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiProtocol {
    #[default]
    Rest,
    Ws,
    Grpc,
    Graphql,
    Sse,
    Webhook,
    #[serde(rename = "socket.io")]
    SocketIo,
    Other,
}

impl ApiProtocol {
    /// A blank tag means the editor default, REST.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "" | "rest" => ApiProtocol::Rest,
            "ws" | "websocket" => ApiProtocol::Ws,
            "grpc" => ApiProtocol::Grpc,
            "graphql" => ApiProtocol::Graphql,
            "sse" => ApiProtocol::Sse,
            "webhook" => ApiProtocol::Webhook,
            "socket.io" | "socketio" => ApiProtocol::SocketIo,
            _ => ApiProtocol::Other,
        }
    }
}

impl<'de> Deserialize<'de> for ApiProtocol {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        String::deserialize(de).map(|tag| ApiProtocol::parse(&tag))
    }
}

// =============================================================================
// PROCESS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessData {
    /// Steps are authored free-form in the editor (strings or objects).
    #[serde(default, deserialize_with = "lenient")]
    pub steps: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
}

// =============================================================================
// DATABASE
// =============================================================================

/// A database node's payload; also the schema the query estimator reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseModel {
    #[serde(default, deserialize_with = "lenient")]
    pub db_type: DbType,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub tables: Vec<DatabaseTable>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub queries: Vec<DatabaseQuery>,
}

impl DatabaseModel {
    pub fn new(db_type: DbType, tables: Vec<DatabaseTable>) -> Self {
        Self {
            db_type,
            tables,
            queries: Vec::new(),
        }
    }

    /// Case-insensitive table lookup.
    pub fn table(&self, name: &str) -> Option<&DatabaseTable> {
        let name = name.trim();
        self.tables
            .iter()
            .find(|t| t.name == name)
            .or_else(|| self.tables.iter().find(|t| t.name.eq_ignore_ascii_case(name)))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    #[default]
    Sql,
    Nosql,
    Other,
}

impl DbType {
    /// Case-insensitive; engine names map onto their family.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "" | "sql" | "postgres" | "postgresql" | "mysql" | "sqlite" => DbType::Sql,
            "nosql" | "mongodb" | "document" => DbType::Nosql,
            _ => DbType::Other,
        }
    }

    pub fn is_document_store(self) -> bool {
        matches!(self, DbType::Nosql)
    }
}

impl<'de> Deserialize<'de> for DbType {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        String::deserialize(de).map(|tag| DbType::parse(&tag))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseTable {
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub fields: Vec<DatabaseField>,
    /// Free-text index definitions, e.g. `"idx_status (status)"`.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub indexes: Vec<String>,
}

impl DatabaseTable {
    pub fn new(name: impl Into<String>, fields: Vec<DatabaseField>) -> Self {
        Self {
            name: name.into(),
            fields,
            indexes: Vec::new(),
        }
    }

    pub fn with_indexes<I, S>(mut self, indexes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indexes = indexes.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseField {
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub field_type: String,
    #[serde(default, deserialize_with = "lenient")]
    pub nullable: bool,
    #[serde(default, alias = "isPrimaryKey", deserialize_with = "lenient")]
    pub primary_key: bool,
    #[serde(default, alias = "isForeignKey", deserialize_with = "lenient")]
    pub foreign_key: bool,
}

impl DatabaseField {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            ..Self::default()
        }
    }

    pub fn primary(mut self) -> Self {
        self.primary_key = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseQuery {
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub operation: QueryOperation,
    #[serde(default, deserialize_with = "lenient")]
    pub target: String,
    #[serde(default, deserialize_with = "lenient")]
    pub conditions: String,
}

impl DatabaseQuery {
    pub fn new(
        operation: QueryOperation,
        target: impl Into<String>,
        conditions: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            target: target.into(),
            conditions: conditions.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QueryOperation {
    #[default]
    #[serde(alias = "select")]
    Select,
    #[serde(alias = "insert")]
    Insert,
    #[serde(alias = "update")]
    Update,
    #[serde(alias = "delete")]
    Delete,
}

impl QueryOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryOperation::Select => "SELECT",
            QueryOperation::Insert => "INSERT",
            QueryOperation::Update => "UPDATE",
            QueryOperation::Delete => "DELETE",
        }
    }
}

// =============================================================================
// QUEUE / INFRA / BOUNDARY / ENDPOINT
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueData {
    /// Raw delivery tag as typed in the editor; see [`DeliveryGuarantee`].
    #[serde(default, deserialize_with = "lenient")]
    pub delivery: String,
    #[serde(default, deserialize_with = "lenient")]
    pub dlq: bool,
}

impl QueueData {
    pub fn with_delivery(delivery: impl Into<String>) -> Self {
        Self {
            delivery: delivery.into(),
            dlq: false,
        }
    }

    pub fn guarantee(&self) -> Option<DeliveryGuarantee> {
        DeliveryGuarantee::parse(&self.delivery)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryGuarantee {
    AtLeastOnce,
    AtMostOnce,
    ExactlyOnce,
}

impl DeliveryGuarantee {
    pub const ALL: [DeliveryGuarantee; 3] = [
        DeliveryGuarantee::AtLeastOnce,
        DeliveryGuarantee::AtMostOnce,
        DeliveryGuarantee::ExactlyOnce,
    ];

    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL.into_iter().find(|g| g.as_str() == tag)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryGuarantee::AtLeastOnce => "at_least_once",
            DeliveryGuarantee::AtMostOnce => "at_most_once",
            DeliveryGuarantee::ExactlyOnce => "exactly_once",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfraData {
    #[serde(default, alias = "resource", deserialize_with = "lenient")]
    pub resource_type: String,
    #[serde(default, deserialize_with = "lenient")]
    pub provider: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBoundaryData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Cross-tab pointer from an endpoint to an `api_binding` node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndpointData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_api_id: Option<String>,
}

impl ApiEndpointData {
    pub fn linked_to(api_id: impl Into<String>) -> Self {
        Self {
            target_api_id: Some(api_id.into()),
        }
    }

    /// Trimmed target id, `None` when unset or blank.
    pub fn target(&self) -> Option<&str> {
        self.target_api_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
