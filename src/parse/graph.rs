//! petgraph-based view over every tab of the architecture canvas.

use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

use super::types::{GraphCollection, GraphEdge, GraphNode, NodeKind};

/// A node together with the tab it was placed on.
#[derive(Debug, Clone, Copy)]
pub struct TabNode<'a> {
    pub tab: &'a str,
    pub node: &'a GraphNode,
}

#[derive(Debug, Clone, Copy)]
pub struct TabEdge<'a> {
    pub tab: &'a str,
    pub edge: &'a GraphEdge,
}

/// One logical graph built from all tabs of a [`GraphCollection`].
///
/// Edges whose endpoints are both known become petgraph edges; dangling
/// edges stay in `edges` so the validator can report them, and their known
/// endpoint still counts as connected. When two tabs declare the same node
/// id the first one (in tab order) owns the index.
pub struct ArchitectureGraph<'a> {
    pub graph: DiGraph<&'a str, &'a str>,
    pub node_indices: HashMap<&'a str, NodeIndex>,
    by_id: HashMap<&'a str, TabNode<'a>>,
    pub nodes: Vec<TabNode<'a>>,
    pub edges: Vec<TabEdge<'a>>,
    /// Endpoints of edges that could not be added to `graph`.
    dangling_endpoints: HashSet<&'a str>,
    /// Global `api_binding` id index used for cross-tab resolution.
    pub api_bindings: HashMap<&'a str, TabNode<'a>>,
    pub tab_count: usize,
}

impl<'a> ArchitectureGraph<'a> {
    pub fn build(graphs: &'a GraphCollection) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        let mut by_id = HashMap::new();
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        let mut dangling_endpoints = HashSet::new();
        let mut api_bindings = HashMap::new();

        for (tab, tab_graph) in &graphs.tabs {
            for node in &tab_graph.nodes {
                let entry = TabNode { tab, node };
                let id = node.id();
                node_indices
                    .entry(id)
                    .or_insert_with(|| graph.add_node(id));
                by_id.entry(id).or_insert(entry);
                if let NodeKind::ApiBinding(_) = node.kind() {
                    api_bindings.entry(id).or_insert(entry);
                }
                nodes.push(entry);
            }
        }

        for (tab, tab_graph) in &graphs.tabs {
            for edge in &tab_graph.edges {
                let source = node_indices.get(edge.source.as_str());
                let target = node_indices.get(edge.target.as_str());
                match (source, target) {
                    (Some(&s), Some(&t)) => {
                        graph.add_edge(s, t, edge.id.as_str());
                    }
                    _ => {
                        dangling_endpoints.insert(edge.source.as_str());
                        dangling_endpoints.insert(edge.target.as_str());
                    }
                }
                edges.push(TabEdge { tab, edge });
            }
        }

        ArchitectureGraph {
            graph,
            node_indices,
            by_id,
            nodes,
            edges,
            dangling_endpoints,
            api_bindings,
            tab_count: graphs.tabs.len(),
        }
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.node_indices.contains_key(node_id)
    }

    pub fn node(&self, node_id: &str) -> Option<TabNode<'a>> {
        self.by_id.get(node_id).copied()
    }

    /// Nodes that take part in structural rules (everything but boundaries).
    pub fn active_nodes(&self) -> impl Iterator<Item = TabNode<'a>> + '_ {
        self.nodes.iter().copied().filter(|n| !n.node.is_boundary())
    }

    pub fn active_count(&self) -> usize {
        self.active_nodes().count()
    }

    pub fn boundary_count(&self) -> usize {
        self.nodes.len() - self.active_count()
    }

    /// True when the node is an endpoint of any edge, dangling ones included.
    pub fn is_connected(&self, node_id: &str) -> bool {
        self.degree(node_id) > 0 || self.dangling_endpoints.contains(node_id)
    }

    /// Number of resolved edges touching the node in either direction.
    /// A self-loop counts twice.
    pub fn degree(&self, node_id: &str) -> usize {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return 0;
        };
        self.graph.edges_directed(idx, Direction::Outgoing).count()
            + self.graph.edges_directed(idx, Direction::Incoming).count()
    }

    pub fn count_kind(&self, pred: impl Fn(&NodeKind) -> bool) -> usize {
        self.active_nodes().filter(|n| pred(n.node.kind())).count()
    }
}
