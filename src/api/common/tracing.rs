//! Custom tracing utilities for HTTP requests
//!
//! Span and logging callbacks for `tower_http::trace::TraceLayer`. Each
//! request span carries the request id and an `api_version` field that the
//! version middleware fills in once the version is resolved.

use axum::http::{HeaderValue, Request, Response};
use std::collections::HashMap;
use std::time::Duration;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::{field, info_span, Level, Span};
use uuid::Uuid;

/// Generates a v4 UUID for requests arriving without `x-request-id`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Opens the request span, with an empty `api_version` field to fill in later
#[tracing::instrument(name = "make_custom_span", skip(request))]
pub fn make_custom_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri().path(),
        query = ?request.uri().query(),
        version = ?request.version(),
        request_id = request_id,
        api_version = field::Empty,
        user_agent = ?request.headers().get("user-agent"),
    )
}

/// Logs an incoming request with sensitive headers redacted
#[tracing::instrument(name = "on_custom_request", skip(request, _span))]
pub fn on_custom_request<B>(request: &Request<B>, _span: &Span) {
    let headers: HashMap<String, String> = request
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            let lower = name.as_str();
            if lower.contains("authorization") || lower.contains("cookie") || lower.contains("token") {
                Some((name.to_string(), "[REDACTED]".to_string()))
            } else {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            }
        })
        .collect();

    tracing::info!(
        method = %request.method(),
        uri = %request.uri(),
        headers = ?headers,
        "Incoming HTTP request"
    );
}

/// Logs the response status, latency and the version it was served with
#[tracing::instrument(name = "on_custom_response", skip(response, _span))]
pub fn on_custom_response<B>(response: &Response<B>, latency: Duration, _span: &Span) {
    let status = response.status();
    let latency_ms = latency.as_millis();
    let served_version = response
        .headers()
        .get("x-api-version")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none");
    let deprecated = response.headers().contains_key("deprecation");

    let level = match status.as_u16() {
        400..=499 => Level::WARN,
        500..=599 => Level::ERROR,
        _ => Level::INFO,
    };

    match level {
        Level::WARN => tracing::warn!(
            status = %status,
            latency_ms = latency_ms,
            served_version = served_version,
            deprecated = deprecated,
            "HTTP request completed with client error"
        ),
        Level::ERROR => tracing::error!(
            status = %status,
            latency_ms = latency_ms,
            served_version = served_version,
            deprecated = deprecated,
            "HTTP request completed with server error"
        ),
        _ => tracing::info!(
            status = %status,
            latency_ms = latency_ms,
            served_version = served_version,
            deprecated = deprecated,
            "HTTP request completed successfully"
        ),
    }
}

/// Handles custom logging for HTTP request failures
#[tracing::instrument(name = "on_custom_failure", skip(_span))]
pub fn on_custom_failure(error: ServerErrorsFailureClass, latency: Duration, _span: &Span) {
    let error_type = match error {
        ServerErrorsFailureClass::StatusCode(code) => format!("HTTP {}", code.as_u16()),
        ServerErrorsFailureClass::Error(_) => "Internal Error".to_string(),
    };

    tracing::error!(
        error = ?error,
        latency_ms = latency.as_millis(),
        error_type = error_type,
        "HTTP request failed"
    );
}
