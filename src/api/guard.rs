//! Enumeration guard middleware.
//!
//! Inspects the query string and JSON body of every todo request and rejects
//! disallowed enumerated values before a handler runs. Checks are an ordered
//! first-match list: the first listed field that is present decides the
//! outcome, later fields are not inspected.

use std::collections::HashMap;

use axum::{
    body::{Body, Bytes},
    extract::{Query, Request},
    http::Uri,
    middleware::Next,
    response::Response,
};
use serde_json::{Map, Value};
use tracing::warn;

use super::error::{ApiError, ValidationError};
use crate::db::{DueDate, TodoCategory, TodoPriority, TodoStatus};

/// Largest JSON body the guard buffers.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Request fields keyed by name.
pub type Fields = Map<String, Value>;

#[derive(Debug, Clone, Copy)]
enum Source {
    Query,
    Body,
}

#[derive(Debug, Clone, Copy)]
enum Check {
    Status,
    Priority,
    Category,
    Date,
}

impl Check {
    fn accepts(&self, value: &Value) -> bool {
        let Some(s) = value.as_str() else {
            return false;
        };
        match self {
            Check::Status => s.parse::<TodoStatus>().is_ok(),
            Check::Priority => s.parse::<TodoPriority>().is_ok(),
            Check::Category => s.parse::<TodoCategory>().is_ok(),
            Check::Date => s.parse::<DueDate>().is_ok(),
        }
    }

    fn error(&self) -> ValidationError {
        match self {
            Check::Status => ValidationError::InvalidStatus,
            Check::Priority => ValidationError::InvalidPriority,
            Check::Category => ValidationError::InvalidCategory,
            Check::Date => ValidationError::InvalidDueDate,
        }
    }
}

const RULES: [(Source, &str, Check); 8] = [
    (Source::Query, "status", Check::Status),
    (Source::Query, "priority", Check::Priority),
    (Source::Query, "category", Check::Category),
    (Source::Query, "date", Check::Date),
    (Source::Body, "status", Check::Status),
    (Source::Body, "priority", Check::Priority),
    (Source::Body, "category", Check::Category),
    (Source::Body, "dueDate", Check::Date),
];

/// A field is present when its key exists, whatever the value.
pub fn has_field(fields: &Fields, name: &str) -> bool {
    fields.contains_key(name)
}

/// Accept or reject one request.
pub fn check_request(query: &Fields, body: &Fields) -> Result<(), ValidationError> {
    for (source, name, check) in RULES {
        let fields = match source {
            Source::Query => query,
            Source::Body => body,
        };
        if !has_field(fields, name) {
            continue;
        }
        return match fields.get(name) {
            Some(value) if check.accepts(value) => Ok(()),
            _ => Err(check.error()),
        };
    }
    Ok(())
}

/// Check every enumerated body field that is present, in rule order.
///
/// Writes go through this after the guard so that no field hidden behind an
/// earlier accepted one reaches the store unchecked.
pub fn check_body_values(body: &Fields) -> Result<(), ValidationError> {
    for (source, name, check) in RULES {
        if !matches!(source, Source::Body) {
            continue;
        }
        match body.get(name) {
            Some(value) if !check.accepts(value) => return Err(check.error()),
            _ => {}
        }
    }
    Ok(())
}

/// Query parameters as string fields.
pub fn query_fields(uri: &Uri) -> Result<Fields, ApiError> {
    let Query(params) = Query::<HashMap<String, String>>::try_from_uri(uri)
        .map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(params
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect())
}

/// Top-level members of a JSON object body; anything else has no fields.
pub fn body_fields(bytes: &[u8]) -> Fields {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => map,
        _ => Fields::new(),
    }
}

/// Middleware running [`check_request`], the body is restored for the handler.
pub async fn enumeration_guard(request: Request, next: Next) -> Result<Response, ApiError> {
    let (parts, body) = request.into_parts();

    let query = query_fields(&parts.uri)?;
    let bytes: Bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    if let Err(e) = check_request(&query, &body_fields(&bytes)) {
        warn!(method = %parts.method, uri = %parts.uri, reason = %e, "Rejected request");
        return Err(e.into());
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}
