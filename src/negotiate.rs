//! Content negotiation for the dual JSON/HTML surface.
//!
//! Classification is exact string equality on the raw header value, matching
//! the contract: `Accept: application/json` selects JSON and anything else
//! (including absent or weighted headers) selects HTML; write endpoints only
//! accept JSON or form-encoded bodies.

use axum::http::HeaderMap;
use axum::http::header::{ACCEPT, CONTENT_TYPE};

/// Response representation selected by the `Accept` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Html,
}

/// Body encoding declared by the `Content-Type` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    Json,
    Form,
    Unsupported,
}

/// Classify the response representation a client asked for.
#[must_use]
pub fn response_format(headers: &HeaderMap) -> ResponseFormat {
    match headers.get(ACCEPT).and_then(|v| v.to_str().ok()) {
        Some("application/json") => ResponseFormat::Json,
        _ => ResponseFormat::Html,
    }
}

/// Classify the body encoding a client declared.
#[must_use]
pub fn request_format(headers: &HeaderMap) -> RequestFormat {
    match headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
        Some("application/json") => RequestFormat::Json,
        Some("application/x-www-form-urlencoded") => RequestFormat::Form,
        _ => RequestFormat::Unsupported,
    }
}
