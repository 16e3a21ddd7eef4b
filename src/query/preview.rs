//! Dialect-flavoured statement stubs for the query editor.
//!
//! Presentation only; nothing in the estimate depends on this text.

use crate::parse::types::{DatabaseQuery, DbType, QueryOperation};

pub fn preview_statement(db_type: DbType, query: &DatabaseQuery) -> String {
    let target = match query.target.trim() {
        "" => "<table>",
        t => t,
    };
    let conditions = query.conditions.trim();

    if db_type.is_document_store() {
        document_call(query.operation, target, conditions)
    } else {
        relational(query.operation, target, conditions)
    }
}

fn relational(operation: QueryOperation, target: &str, conditions: &str) -> String {
    let filter = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions)
    };
    match operation {
        QueryOperation::Select => format!("SELECT * FROM {}{};", target, filter),
        QueryOperation::Insert => format!("INSERT INTO {} (...) VALUES (...);", target),
        QueryOperation::Update => format!("UPDATE {} SET ...{};", target, filter),
        QueryOperation::Delete => format!("DELETE FROM {}{};", target, filter),
    }
}

fn document_call(operation: QueryOperation, target: &str, conditions: &str) -> String {
    let filter = if conditions.is_empty() { "{}" } else { conditions };
    match operation {
        QueryOperation::Select => format!("db.{}.find({})", target, filter),
        QueryOperation::Insert => format!("db.{}.insertOne({{ ... }})", target),
        QueryOperation::Update => format!("db.{}.updateMany({}, {{ $set: {{ ... }} }})", target, filter),
        QueryOperation::Delete => format!("db.{}.deleteMany({})", target, filter),
    }
}
