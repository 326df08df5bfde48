//! Request/response logging middleware

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

/// Logs one line per request with method, route, status and duration.
/// Does not open its own span: `TraceLayer` already does.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = extract_path(&request);
    let query = request.uri().query().map(str::to_string).unwrap_or_default();

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis();
    let status = response.status();

    if status.is_server_error() {
        warn!(
            method = %method,
            path = %path,
            query = %query,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            query = %query,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            "Request completed"
        );
    }

    response
}

/// Matched route template, or the raw path for unmatched requests
fn extract_path(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_path_falls_back_to_uri() {
        let request = Request::builder()
            .uri("/recipes?page=2")
            .body(Body::empty())
            .unwrap();

        assert_eq!(extract_path(&request), "/recipes");
    }
}
