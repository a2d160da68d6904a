//! # Request/Response Logging Middleware
//!
//! One structured line per request and one per response, tagged with the request
//! id from [`RequestStamp`](super::RequestStamp). Session cookies and auth headers
//! are redacted from the debug header dump. Latency is measured from the stamp's
//! `received_at`. Request bodies are never logged.

use super::mw_req_stamp::{received_at, request_id};
use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{debug, error, info, warn};

/// Headers whose values never reach the log.
const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "set-cookie"];

/// Header list with sensitive values replaced.
fn sanitized_headers(req: &Request) -> Vec<(String, String)> {
    req.headers()
        .iter()
        .map(|(name, value)| {
            let value = if SENSITIVE_HEADERS.contains(&name.as_str()) {
                "***REDACTED***".to_string()
            } else {
                value.to_str().unwrap_or("<binary>").to_string()
            };
            (name.to_string(), value)
        })
        .collect()
}

/// Request/response logging middleware.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let start = received_at(&req);
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let request_id = request_id(&req);

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "[REQUEST] {} {}",
        method,
        path
    );
    debug!(request_id = %request_id, headers = ?sanitized_headers(&req), "[REQUEST HEADERS]");

    let response = next.run(req).await;

    let duration_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        error!(
            request_id = %request_id,
            status,
            duration_ms,
            "[RESPONSE] {} {} -> {} ({}ms) [SERVER ERROR]",
            method, path, status, duration_ms
        );
    } else if response.status().is_client_error() {
        warn!(
            request_id = %request_id,
            status,
            duration_ms,
            "[RESPONSE] {} {} -> {} ({}ms) [CLIENT ERROR]",
            method, path, status, duration_ms
        );
    } else {
        info!(
            request_id = %request_id,
            status,
            duration_ms,
            "[RESPONSE] {} {} -> {} ({}ms)",
            method, path, status, duration_ms
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_sensitive_headers_are_redacted() {
        let req = axum::http::Request::builder()
            .header("cookie", "token=eyJhbGciOi")
            .header("authorization", "Bearer abc")
            .header("content-type", "application/json")
            .body(Body::empty())
            .unwrap();

        let headers = sanitized_headers(&req);

        assert!(headers.iter().all(|(_, v)| !v.contains("eyJ") && !v.contains("abc")));
        assert!(headers.contains(&("content-type".to_string(), "application/json".to_string())));
    }
}
