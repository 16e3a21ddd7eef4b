//! WASM entry points for the browser editor.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::AnalyzerError;
use crate::parse::types::DbType;
use crate::query::{EstimatorConfig, QueryEstimator};

/// Validate all editor tabs.
/// Returns `{ status: "ok", result: ValidationResult }` or `{ status: "errors", result: [...] }`.
#[wasm_bindgen]
pub fn validate_graphs(json: &str) -> JsValue {
    to_js(&validate_graphs_inner(json))
}

fn validate_graphs_inner(json: &str) -> Response<crate::validate::ValidationResult> {
    match crate::parse::parse_graphs(json) {
        Ok(graphs) => Response::Ok(crate::validate::validate(&graphs)),
        Err(e) => Response::from(e),
    }
}

/// Estimate one query against a database payload. `config_json` may be empty.
#[wasm_bindgen]
pub fn estimate_query(database_json: &str, query_json: &str, config_json: &str) -> JsValue {
    to_js(&estimate_query_inner(database_json, query_json, config_json))
}

fn estimate_query_inner(
    database_json: &str,
    query_json: &str,
    config_json: &str,
) -> Response<crate::query::QueryEstimate> {
    let run = || -> Result<_, AnalyzerError> {
        let database = crate::parse::parse_database(database_json)?;
        let query = crate::parse::parse_query(query_json)?;
        let estimator = QueryEstimator::new(config(config_json)?);
        Ok(estimator.estimate(&database, &query))
    };
    run().map_or_else(Response::from, Response::Ok)
}

/// Estimate every query declared on a database payload.
#[wasm_bindgen]
pub fn estimate_database(database_json: &str, config_json: &str) -> JsValue {
    to_js(&estimate_database_inner(database_json, config_json))
}

fn estimate_database_inner(
    database_json: &str,
    config_json: &str,
) -> Response<Vec<crate::query::QueryReport>> {
    let run = || -> Result<_, AnalyzerError> {
        let database = crate::parse::parse_database(database_json)?;
        let estimator = QueryEstimator::new(config(config_json)?);
        Ok(estimator.estimate_database(&database))
    };
    run().map_or_else(Response::from, Response::Ok)
}

/// Render the preview statement. Unknown `db_type` strings render as SQL.
#[wasm_bindgen]
pub fn preview_statement(db_type: &str, query_json: &str) -> JsValue {
    to_js(&preview_statement_inner(db_type, query_json))
}

fn preview_statement_inner(db_type: &str, query_json: &str) -> Response<String> {
    let db_type = DbType::parse(db_type);
    match crate::parse::parse_query(query_json) {
        Ok(query) => Response::Ok(crate::query::preview_statement(db_type, &query)),
        Err(e) => Response::from(e),
    }
}

fn config(json: &str) -> Result<EstimatorConfig, AnalyzerError> {
    if json.trim().is_empty() {
        return Ok(EstimatorConfig::default());
    }
    crate::parse::parse_estimator_config(json)
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(Debug, serde::Serialize)]
struct ErrorDto {
    code: String,
    message: String,
}

impl From<AnalyzerError> for ErrorDto {
    fn from(e: AnalyzerError) -> Self {
        ErrorDto {
            code: e.code().to_string(),
            message: e.to_string(),
        }
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(tag = "status", content = "result")]
enum Response<T> {
    #[serde(rename = "ok")]
    Ok(T),
    #[serde(rename = "errors")]
    Errors(Vec<ErrorDto>),
}

impl<T> From<AnalyzerError> for Response<T> {
    fn from(e: AnalyzerError) -> Self {
        Response::Errors(vec![ErrorDto::from(e)])
    }
}
