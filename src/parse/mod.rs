//! Parse phase: editor JSON → Rust types + unified graph construction.

pub mod graph;
pub mod types;

pub use graph::ArchitectureGraph;
pub use types::*;

use crate::error::AnalyzerError;
use crate::query::EstimatorConfig;

/// Deserialize the editor's `{ tab: { nodes, edges } }` JSON.
pub fn parse_graphs(json: &str) -> Result<GraphCollection, AnalyzerError> {
    serde_json::from_str(json).map_err(AnalyzerError::InvalidGraph)
}

/// Deserialize a database node payload (`{ dbType, tables, queries }`).
pub fn parse_database(json: &str) -> Result<DatabaseModel, AnalyzerError> {
    serde_json::from_str(json).map_err(AnalyzerError::InvalidDatabase)
}

pub fn parse_query(json: &str) -> Result<DatabaseQuery, AnalyzerError> {
    serde_json::from_str(json).map_err(AnalyzerError::InvalidQuery)
}

/// Deserialize estimator tuning. Missing keys keep their defaults.
pub fn parse_estimator_config(json: &str) -> Result<EstimatorConfig, AnalyzerError> {
    serde_json::from_str(json).map_err(AnalyzerError::InvalidConfig)
}
