use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Request, State},
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::versioning::{
    annotate, Deprecation, RequestVersionContext, VersionConfig, VersionGate, VersionRejected,
};

/// Response header naming the version a request was served with.
pub const API_VERSION: HeaderName = HeaderName::from_static("x-api-version");

/// Resolves the request's API version, exposes it to handlers as a
/// [`RequestVersionContext`] extension and reports it in `X-API-Version`.
///
/// A context found in the response extensions (set by an inner pinning
/// layer or gate) takes precedence over the one resolved here.
pub async fn resolve_version(
    State(config): State<Arc<VersionConfig>>,
    mut request: Request,
    next: Next,
) -> Response {
    let context =
        RequestVersionContext::resolve(request_path(&request), request.headers(), &config);

    tracing::Span::current().record("api_version", context.version());
    tracing::debug!(api_version = %context.version(), "Resolved API version");

    request.extensions_mut().insert(context.clone());
    let mut response = next.run(request).await;

    let context = response
        .extensions_mut()
        .remove::<RequestVersionContext>()
        .unwrap_or(context);

    if let Ok(value) = HeaderValue::from_str(context.version()) {
        response.headers_mut().insert(API_VERSION, value);
    }
    response
}

/// Rejects requests whose version is not enabled by the [`VersionGate`].
pub async fn require_version(
    State(gate): State<VersionGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, VersionRejected> {
    let existing = request.extensions().get::<RequestVersionContext>().cloned();
    let context = match existing {
        Some(context) => context,
        None => {
            let context = gate.resolve(request_path(&request), request.headers());
            request.extensions_mut().insert(context.clone());
            context
        }
    };

    tracing::debug!(
        api_version = %context.version(),
        allowed = ?gate.allowed(),
        "Checking version gate"
    );
    gate.check(context.version())?;

    let mut response = next.run(request).await;
    response.extensions_mut().insert(context);
    Ok(response)
}

/// Adds deprecation headers to whatever the wrapped handler returns.
pub async fn mark_deprecated(
    State(deprecation): State<Deprecation>,
    request: Request,
    next: Next,
) -> Response {
    tracing::debug!(
        path = %request_path(&request),
        notice = ?deprecation.message(),
        sunset = ?deprecation.sunset(),
        "Serving deprecated endpoint"
    );
    annotate(next.run(request).await, &deprecation)
}

/// Pins every request through this layer to one version.
pub async fn pin_version(
    State(context): State<RequestVersionContext>,
    mut request: Request,
    next: Next,
) -> Response {
    request.extensions_mut().insert(context.clone());
    let mut response = next.run(request).await;

    if response.extensions().get::<RequestVersionContext>().is_none() {
        response.extensions_mut().insert(context);
    }
    response
}

// Nested routers see a stripped URI; the full path is kept in `OriginalUri`.
fn request_path(request: &Request) -> &str {
    request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path())
        .unwrap_or_else(|| request.uri().path())
}
