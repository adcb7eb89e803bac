//! Extractor error handlers.
//!
//! Malformed JSON bodies and query strings are reported through [`AppError`]
//! so every failure shares the `{"error": {"code", "message"}}` body.

use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    web, Error, HttpRequest,
};

use crate::core::AppError;

/// Maximum accepted JSON body size
pub const JSON_LIMIT: usize = 2 * 1024 * 1024;

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected JSON payload");

    AppError::validation(format!("Invalid JSON payload: {}", err)).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected query string");

    AppError::validation(format!("Invalid query string: {}", err)).into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(json_error_handler)
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}
