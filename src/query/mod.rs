//! Query performance estimation.
//!
//! Public API: `estimate(database, query) -> QueryEstimate` and
//! `preview_statement(db_type, query) -> String`.

pub mod estimate;
pub mod preview;
pub mod tokenize;

pub use estimate::{Complexity, EstimatorConfig, QueryEstimate, QueryEstimator, QueryReport};
pub use preview::preview_statement;
pub use tokenize::{Tokenize, WordTokenizer};

use crate::parse::types::{DatabaseModel, DatabaseQuery};

/// Estimate one query with the default configuration.
pub fn estimate(database: &DatabaseModel, query: &DatabaseQuery) -> QueryEstimate {
    QueryEstimator::new(EstimatorConfig::default()).estimate(database, query)
}

/// Estimate every query stored on a database node.
pub fn estimate_database(database: &DatabaseModel) -> Vec<QueryReport> {
    QueryEstimator::new(EstimatorConfig::default()).estimate_database(database)
}
