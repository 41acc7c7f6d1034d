//! Centralized helpers for WebSocket and HTTP error responses.
//!
//! Use these helpers to ensure all error messages are consistent, explicit, and include a code and context.

use actix_web::{http::StatusCode, HttpResponse};

/// Formats a WebSocket error message as a JSON string.
///
/// # Arguments
/// - `code`: Unique error code (e.g. "INVALID_EVENT").
/// - `message`: Human-readable error message (in English).
/// - `context`: Optional context (e.g. match_id).
pub fn ws_error_message(code: &str, message: &str, context: Option<&str>) -> String {
    let context_str = context.unwrap_or("");
    format!(
        r#"{{"event":"error","data":{{"code":"{}","message":"{}","context":"{}"}}}}"#,
        code, message, context_str
    )
}

/// Returns an HTTP error response with a JSON body.
///
/// # Arguments
/// - `code`: Unique error code.
/// - `message`: Human-readable error message.
/// - `context`: Optional context string.
/// - `status`: HTTP status code.
pub fn http_error_response(
    code: &str,
    message: &str,
    context: Option<&str>,
    status: StatusCode,
) -> HttpResponse {
    let context_str = context.unwrap_or("");
    let body = format!(
        r#"{{"error":{{"code":"{}","message":"{}","context":"{}"}}}}"#,
        code, message, context_str
    );
    HttpResponse::build(status)
        .content_type("application/json")
        .body(body)
}
