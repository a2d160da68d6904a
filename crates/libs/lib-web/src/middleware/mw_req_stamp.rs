//! # Request Stamping Middleware
//!
//! Gives every request a UUID. The stamp is placed in request extensions (for
//! the logging middleware and trace spans) and echoed as `X-Request-ID`.
//! A client-supplied `X-Request-ID` is reused when it is a valid UUID.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Request metadata for tracing and debugging.
#[derive(Clone, Debug)]
pub struct RequestStamp {
    /// Unique request identifier
    pub id: String,
    /// When the request entered the stack
    pub received_at: Instant,
}

impl RequestStamp {
    fn from_request(req: &Request) -> Self {
        let id = req
            .headers()
            .get(&REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v).ok())
            .unwrap_or_else(Uuid::new_v4);

        Self {
            id: id.to_string(),
            received_at: Instant::now(),
        }
    }
}

/// Request id for log lines, `"unknown"` if the request was never stamped.
pub fn request_id(req: &Request) -> String {
    req.extensions()
        .get::<RequestStamp>()
        .map(|s| s.id.clone())
        .unwrap_or_else(|| "unknown".to_string())
}

/// When the request entered the stack. Unstamped requests count from now.
pub fn received_at(req: &Request) -> Instant {
    req.extensions()
        .get::<RequestStamp>()
        .map(|s| s.received_at)
        .unwrap_or_else(Instant::now)
}

/// Request stamping middleware.
pub async fn stamp_req(mut req: Request, next: Next) -> Response {
    let stamp = RequestStamp::from_request(&req);
    req.extensions_mut().insert(stamp.clone());

    let mut res = next.run(req).await;

    if let Ok(header_value) = HeaderValue::from_str(&stamp.id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    res
}
