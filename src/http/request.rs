//! Request identification.
//!
//! Every inbound request gets an `x-request-id` (kept if the caller sent one)
//! which is recorded on the request span and echoed on the response. Ids are
//! generated by tower-http's `MakeRequestUuid`.

use axum::http::Request;

pub const X_REQUEST_ID: &str = "x-request-id";

/// The request id header value, or `"unknown"` when absent or not UTF-8.
pub fn request_id_of<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
