//! Heuristic cost estimate for a single query against its target table.
//!
//! Directional feedback only: conditions are never parsed as SQL, and the
//! row count assumes a fixed hypothetical table population.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tokenize::{Tokenize, WordTokenizer, count_words};
use crate::parse::types::{DatabaseModel, DatabaseQuery, DatabaseTable, QueryOperation};

/// Tunable constants of the heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EstimatorConfig {
    pub assumed_table_rows: u64,
    /// Fraction of rows a predicate matches when an index covers it.
    pub indexed_selectivity: f64,
    pub unindexed_selectivity: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            assumed_table_rows: 10_000,
            indexed_selectivity: 0.12,
            unindexed_selectivity: 0.55,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl Complexity {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=2 => Complexity::Simple,
            3..=4 => Complexity::Moderate,
            _ => Complexity::Complex,
        }
    }
}

/// Derived diagnostics for one query. Always recomputable, never stored as truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryEstimate {
    pub complexity: Complexity,
    pub uses_index: bool,
    /// `table.field` entries for uncovered condition fields.
    pub suggested_indexes: Vec<String>,
    pub estimated_rows_scanned: u64,
    pub condition_fields: Vec<String>,
    pub join_count: usize,
    pub predicate_count: usize,
    pub score: u32,
}

/// One row of a whole-database report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryReport {
    pub query_id: String,
    pub query_name: String,
    pub estimate: QueryEstimate,
    pub preview: String,
}

#[derive(Debug, Clone)]
pub struct QueryEstimator<T = WordTokenizer> {
    config: EstimatorConfig,
    tokenizer: T,
}

impl QueryEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            config,
            tokenizer: WordTokenizer,
        }
    }
}

impl Default for QueryEstimator {
    fn default() -> Self {
        Self::new(EstimatorConfig::default())
    }
}

impl<T: Tokenize> QueryEstimator<T> {
    pub fn with_tokenizer(config: EstimatorConfig, tokenizer: T) -> Self {
        Self { config, tokenizer }
    }

    pub fn estimate(&self, database: &DatabaseModel, query: &DatabaseQuery) -> QueryEstimate {
        let table = database.table(&query.target);
        let tokens = self.tokenizer.tokenize(&query.conditions);

        let condition_fields = table
            .map(|t| condition_fields(t, &tokens))
            .unwrap_or_default();
        let indexed = table
            .map(|t| self.indexed_fields(t))
            .unwrap_or_default();

        let uses_index = condition_fields
            .iter()
            .any(|f| indexed.contains(&f.to_lowercase()));

        let suggested_indexes = match table {
            Some(t) if !condition_fields.is_empty() && !uses_index => condition_fields
                .iter()
                .filter(|f| !indexed.contains(&f.to_lowercase()))
                .map(|f| format!("{}.{}", t.name, f))
                .collect(),
            _ => Vec::new(),
        };

        let join_count = count_words(&tokens, &["join"]);
        let predicate_count = if query.conditions.trim().is_empty() {
            0
        } else {
            1 + count_words(&tokens, &["and", "or"])
        };

        let score = score(query.operation, join_count, predicate_count, uses_index);
        let estimated_rows_scanned =
            self.rows_scanned(query.operation, uses_index, join_count, predicate_count);

        debug!(
            target_table = %query.target,
            operation = query.operation.as_str(),
            score,
            uses_index,
            rows = estimated_rows_scanned,
            "query estimated"
        );

        QueryEstimate {
            complexity: Complexity::from_score(score),
            uses_index,
            suggested_indexes,
            estimated_rows_scanned,
            condition_fields,
            join_count,
            predicate_count,
            score,
        }
    }

    /// Estimate every query declared on a database node.
    pub fn estimate_database(&self, database: &DatabaseModel) -> Vec<QueryReport> {
        database
            .queries
            .iter()
            .map(|q| QueryReport {
                query_id: q.id.clone(),
                query_name: q.name.clone(),
                estimate: self.estimate(database, q),
                preview: super::preview::preview_statement(database.db_type, q),
            })
            .collect()
    }

    /// Lowercased names of fields mentioned by an index definition, plus
    /// every primary key.
    fn indexed_fields(&self, table: &DatabaseTable) -> HashSet<String> {
        let names: HashSet<String> = table.fields.iter().map(|f| f.name.to_lowercase()).collect();

        let mut indexed: HashSet<String> = table
            .indexes
            .iter()
            .flat_map(|def| self.tokenizer.tokenize(def))
            .map(str::to_lowercase)
            .filter(|t| names.contains(t))
            .collect();
        indexed.extend(
            table
                .fields
                .iter()
                .filter(|f| f.primary_key)
                .map(|f| f.name.to_lowercase()),
        );
        indexed
    }

    fn rows_scanned(
        &self,
        operation: QueryOperation,
        uses_index: bool,
        join_count: usize,
        predicate_count: usize,
    ) -> u64 {
        if operation == QueryOperation::Insert {
            return 1;
        }
        if predicate_count == 0 {
            return self.config.assumed_table_rows;
        }
        let selectivity = if uses_index {
            self.config.indexed_selectivity
        } else {
            self.config.unindexed_selectivity
        };
        let fan_out = (join_count + 1).max(1) as f64;
        let rows = self.config.assumed_table_rows as f64 * selectivity * fan_out
            / predicate_count.max(1) as f64;
        (rows.round() as u64).max(1)
    }
}

/// Declared field names (declaration order, deduplicated) that appear as
/// tokens in the condition text.
fn condition_fields(table: &DatabaseTable, tokens: &[&str]) -> Vec<String> {
    let mentioned: HashSet<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
    let mut seen = HashSet::new();
    table
        .fields
        .iter()
        .map(|f| f.name.as_str())
        .filter(|name| mentioned.contains(&name.to_lowercase()))
        .filter(|name| seen.insert(name.to_lowercase()))
        .map(str::to_string)
        .collect()
}

fn score(operation: QueryOperation, joins: usize, predicates: usize, uses_index: bool) -> u32 {
    let mut score = 1 + 2 * joins as u32;
    if predicates >= 3 {
        score += 1;
    }
    if predicates >= 6 {
        score += 1;
    }
    if predicates > 0 && !uses_index {
        score += 1;
    }
    if operation != QueryOperation::Select {
        score += 1;
    }
    score
}
