//! Errors raised at the JSON boundary.
//!
//! Analysis itself never fails: the validator and estimator always return a
//! result. Only decoding editor payloads can go wrong.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("[P001] Failed to parse graph JSON: {0}")]
    InvalidGraph(#[source] serde_json::Error),

    #[error("[P002] Failed to parse database JSON: {0}")]
    InvalidDatabase(#[source] serde_json::Error),

    #[error("[P003] Failed to parse query JSON: {0}")]
    InvalidQuery(#[source] serde_json::Error),

    #[error("[P004] Failed to parse estimator config JSON: {0}")]
    InvalidConfig(#[source] serde_json::Error),
}

impl AnalyzerError {
    /// Stable machine code surfaced to the editor.
    pub fn code(&self) -> &'static str {
        match self {
            AnalyzerError::InvalidGraph(_) => "P001",
            AnalyzerError::InvalidDatabase(_) => "P002",
            AnalyzerError::InvalidQuery(_) => "P003",
            AnalyzerError::InvalidConfig(_) => "P004",
        }
    }
}
